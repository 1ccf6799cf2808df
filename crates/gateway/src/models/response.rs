use serde::{Deserialize, Serialize};

use super::{SectionId, TopicId, TopicView};

/// One row of the section/topic join, one per linked pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionTopicRow {
  pub section_id: SectionId,
  pub section_title: String,
  pub topic_id: TopicId,
  pub topic_title: String,
  pub topic_description: String,
}

/// A section with the topics that matched a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionResponse {
  pub id: SectionId,
  pub title: String,
  pub topics: Vec<TopicView>,
}

impl SectionTopicRow {
  pub fn topic_view(&self) -> TopicView {
    TopicView {
      id: self.topic_id,
      title: self.topic_title.clone(),
      description: self.topic_description.clone(),
    }
  }
}
