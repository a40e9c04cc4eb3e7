//! Café service
//!
//! Read-side business logic for the café directory. Listings enter the
//! database through seeding or administrative tooling, so the service
//! surface is the full list plus lookup by name.

use crate::db::repositories::CafeRepository;
use crate::models::Cafe;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Error types for café service operations
#[derive(Debug, thiserror::Error)]
pub enum CafeServiceError {
    /// Café not found
    #[error("Café not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Café service for directory listings
pub struct CafeService {
    repo: Arc<dyn CafeRepository>,
}

impl CafeService {
    /// Create a new café service
    pub fn new(repo: Arc<dyn CafeRepository>) -> Self {
        Self { repo }
    }

    /// List all cafés, newest first
    pub async fn list(&self) -> Result<Vec<Cafe>, CafeServiceError> {
        self.repo
            .list()
            .await
            .context("Failed to list cafés")
            .map_err(Into::into)
    }

    /// Get a café by its exact name.
    ///
    /// Names are not unique in the schema; if seeding ever produces
    /// duplicates this returns an arbitrary one.
    pub async fn get_by_name(&self, name: &str) -> Result<Cafe, CafeServiceError> {
        self.repo
            .get_by_name(name)
            .await
            .context("Failed to get café by name")?
            .ok_or_else(|| CafeServiceError::NotFound(name.to_string()))
    }
}
