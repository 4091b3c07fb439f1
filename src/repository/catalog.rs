//! Catalog snapshot sources

use std::path::PathBuf;

use async_trait::async_trait;

use super::CatalogSource;
use crate::{
    error::{AppError, AppResult},
    models::venue::Venue,
};

/// Catalog exported as a JSON array of venue records
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for JsonFileCatalog {
    async fn load(&self) -> AppResult<Vec<Venue>> {
        let raw = tokio::fs::read(&self.path).await.map_err(|e| {
            AppError::Catalog(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        let venues: Vec<Venue> = serde_json::from_slice(&raw).map_err(|e| {
            AppError::Catalog(format!("Invalid catalog {}: {}", self.path.display(), e))
        })?;

        tracing::debug!("Loaded {} venues from {}", venues.len(), self.path.display());
        Ok(venues)
    }
}

/// Fixed catalog held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    venues: Vec<Venue>,
}

impl InMemoryCatalog {
    pub fn new(venues: Vec<Venue>) -> Self {
        Self { venues }
    }
}

#[async_trait]
impl CatalogSource for InMemoryCatalog {
    async fn load(&self) -> AppResult<Vec<Venue>> {
        Ok(self.venues.clone())
    }
}
