//! Section orchestration: listing, membership updates, relevance-driven
//! responses and bulk transfer

use futures::future::try_join_all;
use std::sync::Arc;
use tracing::{debug, info};

use crate::aggregate::aggregate;
use crate::config::GatewayConfig;
use crate::error::Result;
use crate::models::{
  NewSection, Page, PageRequest, Section, SectionId, SectionResponse, SectionTopic, SectionUpdate,
  TopicId, TopicView,
};
use crate::relevance::filter_relevant;
use crate::repository::{SectionRepository, SectionTopicRepository, TopicRepository};
use crate::search::SearchEngine;
use crate::sync::{self, MembershipDelta};
use crate::transfer::{TransferCoordinator, TransferPayloads};

#[derive(Clone)]
pub struct SectionService {
  sections: Arc<dyn SectionRepository>,
  topics: Arc<dyn TopicRepository>,
  section_topics: Arc<dyn SectionTopicRepository>,
  search: Arc<dyn SearchEngine>,
  transfer: TransferCoordinator,
  config: GatewayConfig,
}

impl SectionService {
  pub fn new(
    sections: Arc<dyn SectionRepository>,
    topics: Arc<dyn TopicRepository>,
    section_topics: Arc<dyn SectionTopicRepository>,
    search: Arc<dyn SearchEngine>,
    config: GatewayConfig,
  ) -> Self {
    let transfer = TransferCoordinator::new(sections.clone(), topics.clone(), section_topics.clone());
    Self { sections, topics, section_topics, search, transfer, config }
  }

  pub fn config(&self) -> &GatewayConfig {
    &self.config
  }

  /// All sections, or one page of them when `page` is given
  pub async fn list(&self, page: Option<PageRequest>) -> Result<Page<Section>> {
    let Some(request) = page else {
      return Ok(Page::complete(self.sections.fetch_all().await?));
    };

    let items = self.sections.fetch_page(request.page, request.page_size).await?;
    let total = self.sections.count().await?;
    Ok(Page { items, is_last: request.is_last(total) })
  }

  /// One page of sections, using the configured page size when none is given
  pub async fn list_page(&self, page: u32, page_size: Option<u32>) -> Result<Page<Section>> {
    let request = PageRequest::new(page, page_size.unwrap_or(self.config.default_page_size))?;
    self.list(Some(request)).await
  }

  pub async fn get(&self, id: SectionId) -> Result<Option<Section>> {
    Ok(self.sections.fetch_by_id(id).await?)
  }

  /// Topics currently linked to a section
  pub async fn topics(&self, section_id: SectionId) -> Result<Vec<TopicView>> {
    let topics = self.topics.fetch_by_section(section_id).await?;
    Ok(topics.iter().map(TopicView::from).collect())
  }

  /// Create a section and link it to each distinct requested topic
  pub async fn add(&self, new: NewSection) -> Result<SectionId> {
    let section_id = self.sections.add(Section::from_new(&new)).await?;

    let links: Vec<SectionTopic> =
      sync::diff(&[], &new.topics).to_add.into_iter().map(|topic_id| SectionTopic::link(section_id, topic_id)).collect();
    let linked = links.len();
    if !links.is_empty() {
      self.section_topics.add_batch(links).await?;
    }

    info!(section_id = %section_id, topics = linked, "Added section");
    Ok(section_id)
  }

  /// Update a section's record and reconcile its topic links with
  /// `update.topics`.
  ///
  /// The delta is computed once from the links fetched after the record
  /// update. Every removal completes before any link is added.
  pub async fn update(&self, update: SectionUpdate) -> Result<MembershipDelta> {
    self.sections.update(Section::from(&update)).await?;

    let current = self.sections.fetch_topic_ids(update.id).await?;
    let delta = sync::diff(&current, &update.topics);
    if delta.is_empty() {
      debug!(section_id = %update.id, "Section membership already matches");
      return Ok(delta);
    }

    self.remove_links(update.id, &delta.to_remove).await?;
    self.add_links(update.id, &delta.to_add).await?;

    info!(
      section_id = %update.id,
      added = delta.to_add.len(),
      removed = delta.to_remove.len(),
      "Synchronized section topics"
    );
    Ok(delta)
  }

  async fn remove_links(&self, section_id: SectionId, topic_ids: &[TopicId]) -> Result<()> {
    let removals = topic_ids.iter().map(|topic_id| self.section_topics.remove(section_id, *topic_id));
    try_join_all(removals).await?;
    Ok(())
  }

  async fn add_links(&self, section_id: SectionId, topic_ids: &[TopicId]) -> Result<()> {
    if topic_ids.is_empty() {
      return Ok(());
    }
    let links = topic_ids.iter().map(|topic_id| SectionTopic::link(section_id, *topic_id)).collect();
    self.section_topics.add_batch(links).await?;
    Ok(())
  }

  /// Sections holding the topics most relevant to a free-text request.
  ///
  /// The text is analyzed into tokens, the tokens are searched as one
  /// space-joined query, and only hits reaching the configured share of the
  /// best score are kept. The surviving topics are grouped by section.
  pub async fn generate_response(&self, request: &str) -> Result<Vec<SectionResponse>> {
    let tokens = self.search.analyze(request).await?;
    if tokens.is_empty() {
      debug!("Request produced no search tokens");
      return Ok(Vec::new());
    }

    let query = tokens.join(" ");
    let results = self.search.search(&query).await?;
    let topic_ids = filter_relevant(&results.hits, results.max_score, self.config.relevance_ratio);

    debug!(
      query = %query,
      hits = results.hits.len(),
      relevant = topic_ids.len(),
      max_score = results.max_score,
      ratio = %self.config.relevance_ratio,
      "Filtered search hits"
    );

    if topic_ids.is_empty() {
      return Ok(Vec::new());
    }

    let rows = self.sections.fetch_rows_by_topics(&topic_ids).await?;
    Ok(aggregate(rows))
  }

  pub async fn export(&self) -> Result<TransferPayloads> {
    self.transfer.export().await
  }

  pub async fn import(&self, payloads: Vec<String>) -> Result<()> {
    self.transfer.import(payloads).await
  }
}
