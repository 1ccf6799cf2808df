use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};

/// 1-based page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
  pub page: u32,
  pub page_size: u32,
}

/// A slice of items and whether it is the final one
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
  pub items: Vec<T>,
  pub is_last: bool,
}

impl PageRequest {
  pub fn new(page: u32, page_size: u32) -> Result<Self> {
    if page == 0 || page_size == 0 {
      return Err(GatewayError::InvalidPage { page, page_size });
    }
    Ok(Self { page, page_size })
  }

  /// True when this page reaches or passes the end of `total` items
  pub fn is_last(&self, total: u64) -> bool {
    u64::from(self.page) * u64::from(self.page_size) >= total
  }
}

impl<T> Page<T> {
  /// Everything in one page
  pub fn complete(items: Vec<T>) -> Self {
    Self { items, is_last: true }
  }
}
