//! Error taxonomy for the gateway core

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GatewayError>;

#[derive(Error, Debug)]
pub enum GatewayError {
  #[error("Bulk transfer requires exactly 3 payloads (topics, sections, section topics), received {received}")]
  TransferShape { received: usize },

  #[error("Failed to decode {collection} payload: {source}")]
  Payload {
    collection: &'static str,
    #[source]
    source: serde_json::Error,
  },

  #[error("Relevance ratio must be within (0, 1], got {0}")]
  InvalidRatio(f64),

  #[error("Invalid page request: page {page}, page size {page_size} (both must be at least 1)")]
  InvalidPage { page: u32, page_size: u32 },

  #[error("Configuration error: {message}")]
  Config { message: String },

  #[error(transparent)]
  Io(#[from] std::io::Error),

  /// A repository or search call failed. The collaborator's error is kept as-is.
  #[error(transparent)]
  Collaborator(#[from] anyhow::Error),
}

impl GatewayError {
  pub fn transfer_shape(received: usize) -> Self {
    Self::TransferShape { received }
  }

  pub fn payload(collection: &'static str, source: serde_json::Error) -> Self {
    Self::Payload { collection, source }
  }

  pub fn config(message: impl Into<String>) -> Self {
    Self::Config { message: message.into() }
  }
}
