//! Gateway - Section and Topic Relationship Core
//!
//! Keeps the many-to-many relation between sections and topics consistent
//! and turns ranked search hits into a section-grouped response.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod memory;
pub mod models;
pub mod relevance;
pub mod repository;
pub mod search;
pub mod services;
pub mod sync;
pub mod telemetry;
pub mod transfer;

pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use services::{SectionService, TopicService};
