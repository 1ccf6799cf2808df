//! Topic creation and maintenance flow

use std::sync::Arc;
use tracing::info;

use crate::error::Result;
use crate::models::{NewTopic, Topic, TopicId, TopicUpdate, TopicView};
use crate::repository::TopicRepository;

#[derive(Clone)]
pub struct TopicService {
  topics: Arc<dyn TopicRepository>,
}

impl TopicService {
  pub fn new(topics: Arc<dyn TopicRepository>) -> Self {
    Self { topics }
  }

  /// Create a topic with a fresh identity and the default sub-category
  pub async fn add(&self, new: NewTopic) -> Result<TopicId> {
    let topic = Topic::from_new(new);
    let id = self.topics.add(topic).await?;
    info!(topic_id = %id, "Added topic");
    Ok(id)
  }

  pub async fn update(&self, update: TopicUpdate) -> Result<()> {
    let id = update.id;
    self.topics.update(Topic::from(update)).await?;
    info!(topic_id = %id, "Updated topic");
    Ok(())
  }

  pub async fn list(&self) -> Result<Vec<TopicView>> {
    let topics = self.topics.fetch_all().await?;
    Ok(topics.iter().map(TopicView::from).collect())
  }
}
