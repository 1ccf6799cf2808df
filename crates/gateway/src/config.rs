//! Configuration management for the gateway core
//!
//! Loads the relevance ratio and listing defaults from YAML or JSON, with an
//! environment override for the ratio.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{GatewayError, Result};
use crate::relevance::RelevanceRatio;

/// Environment variable that overrides the configured relevance ratio
pub const RELEVANCE_RATIO_ENV: &str = "GATEWAY_RELEVANCE_RATIO";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
  /// Fraction of the best search score a topic must reach to be returned
  #[serde(default)]
  pub relevance_ratio: RelevanceRatio,
  /// Page size used when a caller asks for a page without a size
  #[serde(default = "default_page_size")]
  pub default_page_size: u32,
  /// Log level directive used when `RUST_LOG` is unset
  #[serde(default = "default_log_level")]
  pub log_level: String,
}

fn default_page_size() -> u32 {
  20
}
fn default_log_level() -> String {
  "info".to_string()
}

impl Default for GatewayConfig {
  fn default() -> Self {
    Self {
      relevance_ratio: RelevanceRatio::default(),
      default_page_size: default_page_size(),
      log_level: default_log_level(),
    }
  }
}

impl GatewayConfig {
  /// Load configuration from a YAML or JSON file, picked by extension
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let config: GatewayConfig = match path.extension().and_then(|ext| ext.to_str()) {
      Some("json") => serde_json::from_str(&content)
        .map_err(|e| GatewayError::config(format!("{}: {e}", path.display())))?,
      _ => serde_yaml::from_str(&content)
        .map_err(|e| GatewayError::config(format!("{}: {e}", path.display())))?,
    };

    config.validate()?;
    Ok(config)
  }

  /// Load from `explicit` if given, else the first existing default location,
  /// else defaults. The environment override is applied last.
  pub fn load(explicit: Option<&Path>) -> Result<Self> {
    let config = match explicit {
      Some(path) => Self::load_from_file(path)?,
      None => match Self::candidate_paths().into_iter().find(|path| path.exists()) {
        Some(path) => Self::load_from_file(path)?,
        None => Self::default(),
      },
    };

    config.with_env_overrides()
  }

  /// Locations searched when no explicit path is given
  pub fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from("gateway.yaml"), PathBuf::from("gateway.json")];
    if let Some(home) = dirs::home_dir() {
      paths.push(home.join(".gateway").join("config.yaml"));
    }
    paths
  }

  /// Apply `GATEWAY_RELEVANCE_RATIO` if set
  pub fn with_env_overrides(mut self) -> Result<Self> {
    if let Ok(raw) = env::var(RELEVANCE_RATIO_ENV) {
      let ratio: f64 = raw
        .trim()
        .parse()
        .map_err(|_| GatewayError::config(format!("{RELEVANCE_RATIO_ENV} is not a number: {raw}")))?;
      self.relevance_ratio = RelevanceRatio::new(ratio)?;
    }
    Ok(self)
  }

  pub fn validate(&self) -> Result<()> {
    if self.default_page_size == 0 {
      return Err(GatewayError::config("default_page_size must be at least 1"));
    }
    Ok(())
  }
}
