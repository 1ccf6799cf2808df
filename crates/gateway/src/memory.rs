//! In-memory store implementing every repository trait
//!
//! Enforces the same referential rules a relational store would: unique
//! identities, junction records only between existing sections and topics,
//! and at most one link per (section, topic) pair. Insertion order is kept.

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::{
  Section, SectionId, SectionShort, SectionTopic, SectionTopicRow, Topic, TopicId,
};
use crate::repository::{SectionRepository, SectionTopicRepository, TopicRepository};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StoreState {
  pub topics: Vec<Topic>,
  pub sections: Vec<Section>,
  pub section_topics: Vec<SectionTopic>,
}

impl StoreState {
  fn topic(&self, id: TopicId) -> Option<&Topic> {
    self.topics.iter().find(|topic| topic.id == id)
  }

  fn section(&self, id: SectionId) -> Option<&Section> {
    self.sections.iter().find(|section| section.id == id)
  }

  fn check_new_topic(&self, topic: &Topic) -> Result<()> {
    if self.topic(topic.id).is_some() {
      bail!("topic {} already exists", topic.id);
    }
    Ok(())
  }

  fn check_new_section(&self, section: &Section) -> Result<()> {
    if self.section(section.id).is_some() {
      bail!("section {} already exists", section.id);
    }
    Ok(())
  }

  fn check_new_link(&self, link: &SectionTopic) -> Result<()> {
    if self.section(link.section_id).is_none() {
      bail!("section {} does not exist", link.section_id);
    }
    if self.topic(link.topic_id).is_none() {
      bail!("topic {} does not exist", link.topic_id);
    }
    for existing in &self.section_topics {
      if existing.id == link.id {
        bail!("section topic {} already exists", link.id);
      }
      if existing.section_id == link.section_id && existing.topic_id == link.topic_id {
        bail!("section {} is already linked to topic {}", link.section_id, link.topic_id);
      }
    }
    Ok(())
  }
}

/// Shared in-memory store handing out one repository per collection
#[derive(Clone, Default)]
pub struct InMemoryStore {
  state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn sections(&self) -> Arc<MemorySections> {
    Arc::new(MemorySections { state: self.state.clone() })
  }

  pub fn topics(&self) -> Arc<MemoryTopics> {
    Arc::new(MemoryTopics { state: self.state.clone() })
  }

  pub fn section_topics(&self) -> Arc<MemorySectionTopics> {
    Arc::new(MemorySectionTopics { state: self.state.clone() })
  }

  /// Copy of every collection
  pub async fn snapshot(&self) -> StoreState {
    self.state.read().await.clone()
  }
}

pub struct MemorySections {
  state: Arc<RwLock<StoreState>>,
}

pub struct MemoryTopics {
  state: Arc<RwLock<StoreState>>,
}

pub struct MemorySectionTopics {
  state: Arc<RwLock<StoreState>>,
}

#[async_trait]
impl SectionRepository for MemorySections {
  async fn fetch_all(&self) -> Result<Vec<Section>> {
    Ok(self.state.read().await.sections.clone())
  }

  async fn fetch_page(&self, page: u32, page_size: u32) -> Result<Vec<Section>> {
    if page == 0 {
      bail!("pages are 1-based");
    }
    let skip = (page as usize - 1) * page_size as usize;
    Ok(self.state.read().await.sections.iter().skip(skip).take(page_size as usize).cloned().collect())
  }

  async fn fetch_by_id(&self, id: SectionId) -> Result<Option<Section>> {
    Ok(self.state.read().await.section(id).cloned())
  }

  async fn fetch_short(&self) -> Result<Vec<SectionShort>> {
    Ok(self.state.read().await.sections.iter().map(SectionShort::from).collect())
  }

  async fn fetch_topic_ids(&self, section_id: SectionId) -> Result<Vec<TopicId>> {
    let state = self.state.read().await;
    Ok(
      state
        .section_topics
        .iter()
        .filter(|link| link.section_id == section_id)
        .map(|link| link.topic_id)
        .collect(),
    )
  }

  async fn fetch_rows_by_topics(&self, topic_ids: &[TopicId]) -> Result<Vec<SectionTopicRow>> {
    let wanted: HashSet<&TopicId> = topic_ids.iter().collect();
    let state = self.state.read().await;

    let mut rows = Vec::new();
    for link in state.section_topics.iter().filter(|link| wanted.contains(&link.topic_id)) {
      let section = state.section(link.section_id).ok_or_else(|| anyhow!("dangling section {}", link.section_id))?;
      let topic = state.topic(link.topic_id).ok_or_else(|| anyhow!("dangling topic {}", link.topic_id))?;
      rows.push(SectionTopicRow {
        section_id: section.id,
        section_title: section.title.clone(),
        topic_id: topic.id,
        topic_title: topic.title.clone(),
        topic_description: topic.description.clone(),
      });
    }
    Ok(rows)
  }

  async fn add(&self, section: Section) -> Result<SectionId> {
    let mut state = self.state.write().await;
    state.check_new_section(&section)?;
    let id = section.id;
    state.sections.push(section);
    Ok(id)
  }

  /// All-or-nothing: every section is checked before any is stored
  async fn add_batch(&self, sections: Vec<Section>) -> Result<()> {
    let mut state = self.state.write().await;
    let mut batch_ids = HashSet::new();
    for section in &sections {
      state.check_new_section(section)?;
      if !batch_ids.insert(section.id) {
        bail!("section {} appears twice in batch", section.id);
      }
    }
    state.sections.extend(sections);
    Ok(())
  }

  async fn update(&self, section: Section) -> Result<()> {
    let mut state = self.state.write().await;
    let existing = state
      .sections
      .iter_mut()
      .find(|existing| existing.id == section.id)
      .ok_or_else(|| anyhow!("section {} does not exist", section.id))?;
    *existing = section;
    Ok(())
  }

  async fn count(&self) -> Result<u64> {
    Ok(self.state.read().await.sections.len() as u64)
  }
}

#[async_trait]
impl TopicRepository for MemoryTopics {
  async fn fetch_all(&self) -> Result<Vec<Topic>> {
    Ok(self.state.read().await.topics.clone())
  }

  async fn fetch_by_section(&self, section_id: SectionId) -> Result<Vec<Topic>> {
    let state = self.state.read().await;
    Ok(
      state
        .section_topics
        .iter()
        .filter(|link| link.section_id == section_id)
        .filter_map(|link| state.topic(link.topic_id).cloned())
        .collect(),
    )
  }

  async fn add(&self, topic: Topic) -> Result<TopicId> {
    let mut state = self.state.write().await;
    state.check_new_topic(&topic)?;
    let id = topic.id;
    state.topics.push(topic);
    Ok(id)
  }

  /// All-or-nothing: every topic is checked before any is stored
  async fn add_batch(&self, topics: Vec<Topic>) -> Result<()> {
    let mut state = self.state.write().await;
    let mut batch_ids = HashSet::new();
    for topic in &topics {
      state.check_new_topic(topic)?;
      if !batch_ids.insert(topic.id) {
        bail!("topic {} appears twice in batch", topic.id);
      }
    }
    state.topics.extend(topics);
    Ok(())
  }

  async fn update(&self, topic: Topic) -> Result<()> {
    let mut state = self.state.write().await;
    let existing = state
      .topics
      .iter_mut()
      .find(|existing| existing.id == topic.id)
      .ok_or_else(|| anyhow!("topic {} does not exist", topic.id))?;
    *existing = topic;
    Ok(())
  }
}

#[async_trait]
impl SectionTopicRepository for MemorySectionTopics {
  async fn fetch_all(&self) -> Result<Vec<SectionTopic>> {
    Ok(self.state.read().await.section_topics.clone())
  }

  async fn add(&self, link: SectionTopic) -> Result<()> {
    let mut state = self.state.write().await;
    state.check_new_link(&link)?;
    state.section_topics.push(link);
    Ok(())
  }

  /// All-or-nothing: every link is checked against the store and the rest of
  /// the batch before any is stored
  async fn add_batch(&self, links: Vec<SectionTopic>) -> Result<()> {
    let mut state = self.state.write().await;
    let mut batch_ids = HashSet::new();
    let mut batch_pairs = HashSet::new();
    for link in &links {
      state.check_new_link(link)?;
      if !batch_ids.insert(link.id) {
        bail!("section topic {} appears twice in batch", link.id);
      }
      if !batch_pairs.insert((link.section_id, link.topic_id)) {
        bail!("section {} is linked to topic {} twice in batch", link.section_id, link.topic_id);
      }
    }
    state.section_topics.extend(links);
    Ok(())
  }

  async fn remove(&self, section_id: SectionId, topic_id: TopicId) -> Result<()> {
    let mut state = self.state.write().await;
    let position = state
      .section_topics
      .iter()
      .position(|link| link.section_id == section_id && link.topic_id == topic_id)
      .ok_or_else(|| anyhow!("section {section_id} is not linked to topic {topic_id}"))?;
    state.section_topics.remove(position);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use uuid::Uuid;

  fn topic(title: &str) -> Topic {
    Topic { id: Uuid::new_v4(), title: title.to_string(), description: String::new(), sub_category: 0 }
  }

  fn section(title: &str) -> Section {
    Section { id: Uuid::new_v4(), title: title.to_string() }
  }

  #[tokio::test]
  async fn test_link_requires_existing_section_and_topic() {
    let store = InMemoryStore::new();
    let t = topic("Slices");
    store.topics().add(t.clone()).await.unwrap();

    let result = store.section_topics().add(SectionTopic::link(Uuid::new_v4(), t.id)).await;

    assert!(result.unwrap_err().to_string().contains("section"));
    assert!(store.snapshot().await.section_topics.is_empty());
  }

  #[tokio::test]
  async fn test_duplicate_pair_is_rejected() {
    let store = InMemoryStore::new();
    let (s, t) = (section("Memory"), topic("Box"));
    store.sections().add(s.clone()).await.unwrap();
    store.topics().add(t.clone()).await.unwrap();

    store.section_topics().add(SectionTopic::link(s.id, t.id)).await.unwrap();
    let second = store.section_topics().add(SectionTopic::link(s.id, t.id)).await;

    assert!(second.is_err());
    assert_eq!(store.snapshot().await.section_topics.len(), 1);
  }

  #[tokio::test]
  async fn test_batch_with_duplicate_identity_stores_nothing() {
    let store = InMemoryStore::new();
    let t = topic("Rc");

    let result = store.topics().add_batch(vec![topic("Arc"), t.clone(), t]).await;

    assert!(result.is_err());
    assert!(store.snapshot().await.topics.is_empty());
  }

  #[tokio::test]
  async fn test_link_batch_with_dangling_topic_stores_nothing() {
    let store = InMemoryStore::new();
    let (s, t) = (section("Traits"), topic("Dispatch"));
    store.sections().add(s.clone()).await.unwrap();
    store.topics().add(t.clone()).await.unwrap();

    let result = store
      .section_topics()
      .add_batch(vec![SectionTopic::link(s.id, t.id), SectionTopic::link(s.id, Uuid::new_v4())])
      .await;

    assert!(result.is_err());
    assert!(store.snapshot().await.section_topics.is_empty());
  }

  #[tokio::test]
  async fn test_link_batch_with_repeated_pair_stores_nothing() {
    let store = InMemoryStore::new();
    let (s, t) = (section("Traits"), topic("Objects"));
    store.sections().add(s.clone()).await.unwrap();
    store.topics().add(t.clone()).await.unwrap();

    let result = store
      .section_topics()
      .add_batch(vec![SectionTopic::link(s.id, t.id), SectionTopic::link(s.id, t.id)])
      .await;

    assert!(result.unwrap_err().to_string().contains("twice in batch"));
    assert!(store.snapshot().await.section_topics.is_empty());
  }

  #[tokio::test]
  async fn test_rows_follow_link_order() {
    let store = InMemoryStore::new();
    let (a, b) = (section("A"), section("B"));
    let (t1, t2) = (topic("one"), topic("two"));
    store.sections().add_batch(vec![a.clone(), b.clone()]).await.unwrap();
    store.topics().add_batch(vec![t1.clone(), t2.clone()]).await.unwrap();
    let links = store.section_topics();
    links.add(SectionTopic::link(b.id, t2.id)).await.unwrap();
    links.add(SectionTopic::link(a.id, t1.id)).await.unwrap();
    links.add(SectionTopic::link(a.id, t2.id)).await.unwrap();

    let rows = store.sections().fetch_rows_by_topics(&[t2.id]).await.unwrap();

    let sections: Vec<_> = rows.iter().map(|row| row.section_id).collect();
    assert_eq!(sections, vec![b.id, a.id]);
  }

  #[tokio::test]
  async fn test_pages_are_one_based() {
    let store = InMemoryStore::new();
    let sections: Vec<Section> = (0..5).map(|n| section(&format!("S{n}"))).collect();
    store.sections().add_batch(sections.clone()).await.unwrap();

    let page = store.sections().fetch_page(2, 2).await.unwrap();

    assert_eq!(page, sections[2..4].to_vec());
    assert!(store.sections().fetch_page(0, 2).await.is_err());
  }

  #[tokio::test]
  async fn test_remove_missing_link_fails() {
    let store = InMemoryStore::new();
    assert!(store.section_topics().remove(Uuid::new_v4(), Uuid::new_v4()).await.is_err());
  }
}
