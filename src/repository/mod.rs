//! Repository layer for the venue catalog
//!
//! The catalog lives in an external data store; this crate only reads
//! snapshots of it through [`CatalogSource`].

pub mod catalog;

use async_trait::async_trait;

use crate::{error::AppResult, models::venue::Venue};

pub use catalog::{InMemoryCatalog, JsonFileCatalog};

/// Supplies a fresh catalog snapshot on every call
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> AppResult<Vec<Venue>>;
}
