//! Relevance threshold filtering of search hits
//!
//! A hit is relevant when its score reaches a configured fraction of the
//! best score in the same batch.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::GatewayError;
use crate::models::TopicId;
use crate::search::SearchHit;

/// Fraction of the maximum score a hit must reach, within (0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RelevanceRatio(f64);

impl RelevanceRatio {
  pub const DEFAULT: f64 = 0.7;

  pub fn new(ratio: f64) -> Result<Self, GatewayError> {
    if ratio > 0.0 && ratio <= 1.0 {
      Ok(Self(ratio))
    } else {
      Err(GatewayError::InvalidRatio(ratio))
    }
  }

  pub fn value(self) -> f64 {
    self.0
  }

  /// Minimum score kept for a batch whose best score is `max_score`
  pub fn threshold(self, max_score: f64) -> f64 {
    max_score * self.0
  }
}

impl Default for RelevanceRatio {
  fn default() -> Self {
    Self(Self::DEFAULT)
  }
}

impl TryFrom<f64> for RelevanceRatio {
  type Error = GatewayError;

  fn try_from(ratio: f64) -> Result<Self, Self::Error> {
    Self::new(ratio)
  }
}

impl From<RelevanceRatio> for f64 {
  fn from(ratio: RelevanceRatio) -> Self {
    ratio.0
  }
}

impl fmt::Display for RelevanceRatio {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// Ids of the hits scoring at least `max_score * ratio`.
///
/// Each id appears once, in the order of its first passing hit. A batch with
/// a max score of zero has a zero threshold, so every hit passes.
pub fn filter_relevant(hits: &[SearchHit], max_score: f64, ratio: RelevanceRatio) -> Vec<TopicId> {
  let threshold = ratio.threshold(max_score);
  let mut seen = HashSet::new();

  hits
    .iter()
    .filter(|hit| hit.score >= threshold)
    .filter(|hit| seen.insert(hit.topic_id))
    .map(|hit| hit.topic_id)
    .collect()
}
