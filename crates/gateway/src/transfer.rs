//! Ordered bulk export and import of topics, sections and their links
//!
//! A transfer is exactly three JSON payloads in a fixed order: topics,
//! sections, section topics. Import writes them back in that order because
//! every junction record references a topic and a section by id.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{GatewayError, Result};
use crate::models::{Section, SectionShort, SectionTopic, Topic};
use crate::repository::{SectionRepository, SectionTopicRepository, TopicRepository};

/// Number of payloads in a transfer
pub const PAYLOAD_COUNT: usize = 3;

/// The three serialized collections of a transfer, in import order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferPayloads {
  pub topics: String,
  pub sections: String,
  pub section_topics: String,
}

impl TransferPayloads {
  /// Positional form: `[topics, sections, section_topics]`
  pub fn into_vec(self) -> Vec<String> {
    vec![self.topics, self.sections, self.section_topics]
  }
}

impl TryFrom<Vec<String>> for TransferPayloads {
  type Error = GatewayError;

  fn try_from(payloads: Vec<String>) -> Result<Self> {
    let received = payloads.len();
    let [topics, sections, section_topics]: [String; PAYLOAD_COUNT] =
      payloads.try_into().map_err(|_| GatewayError::transfer_shape(received))?;
    Ok(Self { topics, sections, section_topics })
  }
}

/// Decoded records of a transfer, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecords {
  pub topics: Vec<Topic>,
  pub sections: Vec<Section>,
  pub section_topics: Vec<SectionTopic>,
}

impl TransferRecords {
  /// Decode every payload. Nothing is returned unless all three decode.
  pub fn decode(payloads: &TransferPayloads) -> Result<Self> {
    let topics: Vec<Topic> = decode_collection("topics", &payloads.topics)?;
    let sections: Vec<SectionShort> = decode_collection("sections", &payloads.sections)?;
    let section_topics: Vec<SectionTopic> =
      decode_collection("section topics", &payloads.section_topics)?;

    Ok(Self {
      topics,
      sections: sections.into_iter().map(Section::from).collect(),
      section_topics,
    })
  }
}

fn decode_collection<T: DeserializeOwned>(collection: &'static str, payload: &str) -> Result<Vec<T>> {
  serde_json::from_str(payload).map_err(|e| GatewayError::payload(collection, e))
}

fn encode_collection<T: Serialize>(collection: &'static str, records: &[T]) -> Result<String> {
  serde_json::to_string(records).map_err(|e| GatewayError::payload(collection, e))
}

/// Moves whole collections in and out of the repositories
#[derive(Clone)]
pub struct TransferCoordinator {
  sections: Arc<dyn SectionRepository>,
  topics: Arc<dyn TopicRepository>,
  section_topics: Arc<dyn SectionTopicRepository>,
}

impl TransferCoordinator {
  pub fn new(
    sections: Arc<dyn SectionRepository>,
    topics: Arc<dyn TopicRepository>,
    section_topics: Arc<dyn SectionTopicRepository>,
  ) -> Self {
    Self { sections, topics, section_topics }
  }

  /// Snapshot all three collections. No consistency check is made.
  pub async fn export(&self) -> Result<TransferPayloads> {
    let topics = self.topics.fetch_all().await?;
    let sections = self.sections.fetch_short().await?;
    let section_topics = self.section_topics.fetch_all().await?;

    info!(
      topics = topics.len(),
      sections = sections.len(),
      section_topics = section_topics.len(),
      "Exported collections"
    );

    Ok(TransferPayloads {
      topics: encode_collection("topics", &topics)?,
      sections: encode_collection("sections", &sections)?,
      section_topics: encode_collection("section topics", &section_topics)?,
    })
  }

  /// Import a positional payload sequence.
  ///
  /// Anything other than exactly three payloads fails before any write, as
  /// does a payload that does not decode. Records are not deduplicated, so the
  /// target store should be empty.
  pub async fn import(&self, payloads: Vec<String>) -> Result<()> {
    let payloads = TransferPayloads::try_from(payloads)?;
    let records = TransferRecords::decode(&payloads)?;
    self.write(records).await
  }

  /// Write decoded records stage by stage: topics, then sections, then links
  pub async fn write(&self, records: TransferRecords) -> Result<()> {
    let TransferRecords { topics, sections, section_topics } = records;
    let counts = (topics.len(), sections.len(), section_topics.len());

    debug!(count = counts.0, "Importing topics");
    self.topics.add_batch(topics).await?;

    debug!(count = counts.1, "Importing sections");
    self.sections.add_batch(sections).await?;

    debug!(count = counts.2, "Importing section topics");
    self.section_topics.add_batch(section_topics).await?;

    info!(topics = counts.0, sections = counts.1, section_topics = counts.2, "Imported collections");
    Ok(())
  }
}
