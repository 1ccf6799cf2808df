use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::TopicId;

/// Sub-category assigned to topics created through the creation flow
pub const DEFAULT_SUB_CATEGORY: i32 = 0;

/// A leaf content entity, searchable and independently owned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
  pub id: TopicId,
  pub title: String,
  pub description: String,
  pub sub_category: i32,
}

/// Payload for creating a topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTopic {
  pub title: String,
  pub description: String,
}

/// Payload for updating an existing topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicUpdate {
  pub id: TopicId,
  pub title: String,
  pub description: String,
  pub sub_category: i32,
}

/// Topic as presented inside responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicView {
  pub id: TopicId,
  pub title: String,
  pub description: String,
}

impl Topic {
  /// Build a topic from a creation payload.
  ///
  /// The identity is always freshly generated and the sub-category starts at
  /// [`DEFAULT_SUB_CATEGORY`], whatever the caller sent.
  pub fn from_new(new: NewTopic) -> Self {
    Self {
      id: Uuid::new_v4(),
      title: new.title,
      description: new.description,
      sub_category: DEFAULT_SUB_CATEGORY,
    }
  }
}

impl From<TopicUpdate> for Topic {
  fn from(update: TopicUpdate) -> Self {
    Self {
      id: update.id,
      title: update.title,
      description: update.description,
      sub_category: update.sub_category,
    }
  }
}

impl From<&Topic> for TopicView {
  fn from(topic: &Topic) -> Self {
    Self { id: topic.id, title: topic.title.clone(), description: topic.description.clone() }
  }
}
