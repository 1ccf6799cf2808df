use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{SectionId, TopicId};

/// A grouping entity that owns topics through the junction relation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
  pub id: SectionId,
  pub title: String,
}

/// Payload for creating a section together with its initial topics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSection {
  pub title: String,
  #[serde(default)]
  pub topics: Vec<TopicId>,
}

/// Payload for updating a section.
///
/// `topics` is the desired membership, not a stored list. It is realized
/// through junction records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionUpdate {
  pub id: SectionId,
  pub title: String,
  #[serde(default)]
  pub topics: Vec<TopicId>,
}

/// Reduced projection of a section used by bulk export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionShort {
  pub id: SectionId,
  pub title: String,
}

impl Section {
  /// Build a section from a creation payload with a freshly generated identity
  pub fn from_new(new: &NewSection) -> Self {
    Self { id: Uuid::new_v4(), title: new.title.clone() }
  }
}

impl From<&SectionUpdate> for Section {
  fn from(update: &SectionUpdate) -> Self {
    Self { id: update.id, title: update.title.clone() }
  }
}

impl From<&Section> for SectionShort {
  fn from(section: &Section) -> Self {
    Self { id: section.id, title: section.title.clone() }
  }
}

impl From<SectionShort> for Section {
  fn from(short: SectionShort) -> Self {
    Self { id: short.id, title: short.title }
  }
}
