//! Persistence trait interfaces consumed by the core.
//!
//! The core never touches storage directly: business logic depends on
//! these traits and the HTTP shell injects concrete implementations
//! (Postgres, in-memory, ...). Implementations must keep the error
//! contract: missing entities surface as `Error::NotFound`, transient
//! backend failures as `Error::Storage`, and missed deadlines as
//! `Error::Timeout`, so callers can tell them apart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::domain::identifiers::RanchId;
use crate::domain::ranch::Ranch;
use crate::error::Result;

// ============================================================================
// READ MODELS
// ============================================================================

/// Animal gender as recorded by the herd backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
}

/// Filter for herd count queries.
///
/// `active_only` excludes sold animals; gender `None` counts both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimalFilter {
    pub gender: Option<Gender>,
    pub active_only: bool,
}

impl AnimalFilter {
    /// All animals whose status is not `sold`.
    #[must_use]
    pub const fn active() -> Self {
        Self {
            gender: None,
            active_only: true,
        }
    }

    /// Narrow the filter to one gender.
    #[must_use]
    pub const fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }
}

/// Production type tracked by the backend.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProductionType {
    Milk,
    Meat,
}

/// Aggregated production figures for one type within a query window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionSummary {
    pub production_type: ProductionType,
    pub total: f64,
    pub average: f64,
    pub record_count: u64,
}

/// Kind of recorded herd event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EventType {
    Vaccination,
    Illness,
    Birth,
    Weighing,
    Production,
    Movement,
    Other,
}

/// A recorded herd event, newest-first in query results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HerdEvent {
    pub id: String,
    pub ranch_id: RanchId,
    pub event_type: EventType,
    pub description: String,
    pub occurred_at: DateTime<Utc>,
}

/// Alert priority scale; statistics only count high and critical.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlertPriority {
    Low,
    Medium,
    High,
    Critical,
}

// ============================================================================
// RANCH REPOSITORY
// ============================================================================

/// Persistence boundary for the ranch aggregate (embedded pastures
/// included).
///
/// # Concurrency
///
/// `save` must compare the aggregate's `version` against the stored one and
/// reject stale writes with `Error::Conflict`, persisting `version + 1` on
/// success. Two concurrent rotations therefore cannot both commit against
/// the same base state.
#[async_trait]
pub trait RanchRepository: Send + Sync {
    /// Load a ranch aggregate by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no ranch with the given id exists.
    /// Returns `Storage` on backend failure.
    async fn load(&self, id: &RanchId) -> Result<Ranch>;

    /// Save a ranch aggregate (create or update) under the optimistic
    /// version check, returning the persisted aggregate with its bumped
    /// version.
    ///
    /// # Errors
    ///
    /// Returns `Conflict` when the aggregate's version is stale.
    /// Returns `Storage` on backend failure.
    async fn save(&self, ranch: &Ranch) -> Result<Ranch>;

    /// Delete a ranch by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the ranch doesn't exist.
    /// Returns `Storage` on backend failure.
    async fn delete(&self, id: &RanchId) -> Result<()>;

    /// List all ranches in undefined order.
    ///
    /// # Errors
    ///
    /// Returns `Storage` on backend failure.
    async fn list_all(&self) -> Result<Vec<Ranch>>;

    /// Check whether a ranch exists. Absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns `Storage` on backend failure.
    async fn exists(&self, id: &RanchId) -> Result<bool> {
        match self.load(id).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}

// ============================================================================
// HERD REPOSITORY
// ============================================================================

/// Read-only boundary over the animal, production, event, and alert
/// backends, scoped by ranch.
#[async_trait]
pub trait HerdRepository: Send + Sync {
    /// Count animals matching the filter.
    async fn count_animals(&self, ranch_id: &RanchId, filter: AnimalFilter) -> Result<u64>;

    /// Production summaries for records on or after `since`.
    async fn production_summaries(
        &self,
        ranch_id: &RanchId,
        since: DateTime<Utc>,
    ) -> Result<Vec<ProductionSummary>>;

    /// Most recent events, newest first, at most `limit` entries.
    async fn recent_events(&self, ranch_id: &RanchId, limit: usize) -> Result<Vec<HerdEvent>>;

    /// Count unresolved alerts at or above the given priority.
    async fn count_active_alerts(
        &self,
        ranch_id: &RanchId,
        min_priority: AlertPriority,
    ) -> Result<u64>;
}

// ============================================================================
// IMAGE SERVICE
// ============================================================================

/// External image pipeline. The core stores the returned URL on
/// `Ranch.image_url` and never interprets image bytes.
#[async_trait]
pub trait ImageService: Send + Sync {
    /// Process an uploaded file and return the public URL.
    ///
    /// # Errors
    ///
    /// Returns `Storage` when processing fails, `Timeout` when the service
    /// misses its deadline.
    async fn process(&self, upload_path: &str) -> Result<String>;
}
