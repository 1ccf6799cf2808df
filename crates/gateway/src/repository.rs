//! Repository interfaces for sections, topics and their junction records
//!
//! Storage internals are out of reach of the core. These traits are the
//! whole contract, so any store (SQL, document, in-memory) can sit behind
//! them without changing the orchestration code.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{
  Section, SectionId, SectionShort, SectionTopic, SectionTopicRow, Topic, TopicId,
};

/// Section storage, including the joined section/topic projection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SectionRepository: Send + Sync {
  /// Every stored section
  async fn fetch_all(&self) -> Result<Vec<Section>>;

  /// One 1-based page of sections
  async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Vec<Section>>;

  async fn fetch_by_id(&self, id: SectionId) -> Result<Option<Section>>;

  /// Reduced projection of every section, used by export
  async fn fetch_short(&self) -> Result<Vec<SectionShort>>;

  /// Ids of the topics currently linked to a section
  async fn fetch_topic_ids(&self, section_id: SectionId) -> Result<Vec<TopicId>>;

  /// Join rows for every (section, topic) link whose topic is in `topic_ids`
  async fn fetch_rows_by_topics(&self, topic_ids: &[TopicId]) -> Result<Vec<SectionTopicRow>>;

  /// Store a section and return its identity
  async fn add(&self, section: Section) -> Result<SectionId>;

  /// Store many sections. Stores with a bulk insert path should override this.
  async fn add_batch(&self, sections: Vec<Section>) -> Result<()> {
    for section in sections {
      self.add(section).await?;
    }
    Ok(())
  }

  async fn update(&self, section: Section) -> Result<()>;

  async fn count(&self) -> Result<u64>;
}

/// Topic storage
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TopicRepository: Send + Sync {
  async fn fetch_all(&self) -> Result<Vec<Topic>>;

  /// Topics currently linked to a section
  async fn fetch_by_section(&self, section_id: SectionId) -> Result<Vec<Topic>>;

  /// Store a topic and return its identity
  async fn add(&self, topic: Topic) -> Result<TopicId>;

  /// Store many topics. Stores with a bulk insert path should override this.
  async fn add_batch(&self, topics: Vec<Topic>) -> Result<()> {
    for topic in topics {
      self.add(topic).await?;
    }
    Ok(())
  }

  async fn update(&self, topic: Topic) -> Result<()>;
}

/// Junction storage for section/topic links
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SectionTopicRepository: Send + Sync {
  async fn fetch_all(&self) -> Result<Vec<SectionTopic>>;

  async fn add(&self, link: SectionTopic) -> Result<()>;

  /// Store many links. Stores with a bulk insert path should override this.
  async fn add_batch(&self, links: Vec<SectionTopic>) -> Result<()> {
    for link in links {
      self.add(link).await?;
    }
    Ok(())
  }

  /// Remove the link between `section_id` and `topic_id`
  async fn remove(&self, section_id: SectionId, topic_id: TopicId) -> Result<()>;
}
