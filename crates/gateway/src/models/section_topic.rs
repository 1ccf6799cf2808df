use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{SectionId, TopicId};

/// Junction record linking one section to one topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTopic {
  pub id: Uuid,
  pub section_id: SectionId,
  pub topic_id: TopicId,
}

impl SectionTopic {
  /// New link with a fresh identity
  pub fn link(section_id: SectionId, topic_id: TopicId) -> Self {
    Self { id: Uuid::new_v4(), section_id, topic_id }
  }
}
