//! Search collaborator interface
//!
//! Only the output contract of the search engine is consumed here: scored
//! hits and the batch maximum score. Indexing and scoring live elsewhere.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::TopicId;

/// A single scored topic returned by the search engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
  pub topic_id: TopicId,
  /// Relevance score (non-negative, higher is more relevant)
  pub score: f64,
}

/// Hits for one query together with the highest score in the batch
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
  pub hits: Vec<SearchHit>,
  pub max_score: f64,
}

impl SearchHit {
  pub fn new(topic_id: TopicId, score: f64) -> Self {
    Self { topic_id, score }
  }
}

impl SearchResults {
  /// Build results from hits, taking the max score from the hits themselves
  pub fn from_hits(hits: Vec<SearchHit>) -> Self {
    let max_score = hits.iter().map(|hit| hit.score).fold(0.0, f64::max);
    Self { hits, max_score }
  }
}

/// Full-text search engine over topics
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SearchEngine: Send + Sync {
  /// Break free text into the engine's analyzed tokens, in order
  async fn analyze(&self, text: &str) -> Result<Vec<String>>;

  /// Run an analyzed query
  async fn search(&self, query: &str) -> Result<SearchResults>;
}
