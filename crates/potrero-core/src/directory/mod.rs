//! Ranch directory: listing, search, and lifecycle of ranch records.
//!
//! The directory is the write path for ranch aggregates. Creation and
//! updates validate geography and municipality through [`crate::geo`];
//! every mutation checks ownership against the already-authenticated
//! requesting user; deletion is blocked while the ranch still has non-sold
//! animals.
//!
//! Listing loads the collection once and filters/sorts/paginates in
//! memory (`filter` submodule). Summary listings enrich the current page
//! with herd counts fetched concurrently per row.

mod filter;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::{PartialRanchConfiguration, RanchConfiguration};
use crate::domain::{
    AlertPriority, AnimalFilter, HerdRepository, ImageService, Location, ManagementSystem,
    OperationType, OwnerId, Ranch, RanchId, RanchRepository, RanchStatus,
};
use crate::error::{Error, Result};
use crate::geo;
use crate::stats::HerdStatisticsAggregator;

pub use filter::{Page, RanchFilter, RanchQuery, RanchSort, SortDirection};

/// One page of full ranch aggregates.
pub type RanchPage = Page<Ranch>;

/// One page of summary rows.
pub type SummaryPage = Page<RanchSummary>;

/// Listing row with herd columns for dashboard tables.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RanchSummary {
    pub id: RanchId,
    pub name: String,
    pub municipality: String,
    pub status: RanchStatus,
    pub total_area_hectares: f64,
    /// Active (non-sold) head count; zero when the herd backend is down
    pub herd_count: u64,
    /// High/critical unresolved alerts; zero when the alert backend is down
    pub active_alert_count: u64,
}

/// Creation payload for a new ranch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRanch {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub total_area_hectares: f64,
    #[serde(default)]
    pub pasture_area_hectares: f64,
    #[serde(default)]
    pub address: String,
    pub municipality: String,
    pub state_name: String,
    #[serde(default)]
    pub postal_code: String,
    pub location: Location,
    pub operation_type: OperationType,
    pub management_system: ManagementSystem,
    #[serde(default)]
    pub infrastructure: serde_json::Value,
    /// Overrides applied on top of deployment defaults
    #[serde(default)]
    pub configuration: PartialRanchConfiguration,
}

/// Field-wise patch for an existing ranch.
///
/// `None` leaves the field untouched. Location and municipality changes
/// are re-validated against the governed region.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RanchPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub total_area_hectares: Option<f64>,
    pub pasture_area_hectares: Option<f64>,
    pub address: Option<String>,
    pub municipality: Option<String>,
    pub postal_code: Option<String>,
    pub location: Option<Location>,
    pub operation_type: Option<OperationType>,
    pub management_system: Option<ManagementSystem>,
    pub infrastructure: Option<serde_json::Value>,
    pub configuration: Option<PartialRanchConfiguration>,
    pub status: Option<RanchStatus>,
}

/// Directory service over the ranch and herd persistence boundaries.
#[derive(Clone)]
pub struct RanchDirectory {
    ranches: Arc<dyn RanchRepository>,
    herd: Arc<dyn HerdRepository>,
    images: Arc<dyn ImageService>,
    stats: HerdStatisticsAggregator,
}

impl RanchDirectory {
    #[must_use]
    pub fn new(
        ranches: Arc<dyn RanchRepository>,
        herd: Arc<dyn HerdRepository>,
        images: Arc<dyn ImageService>,
    ) -> Self {
        let stats = HerdStatisticsAggregator::new(herd.clone());
        Self {
            ranches,
            herd,
            images,
            stats,
        }
    }

    /// Statistics aggregator sharing this directory's herd backend.
    #[must_use]
    pub const fn statistics(&self) -> &HerdStatisticsAggregator {
        &self.stats
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// List ranches matching the query, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` for a zero page or page size, `Storage`
    /// on backend failure.
    pub async fn list(&self, query: &RanchQuery) -> Result<RanchPage> {
        validate_query(query)?;
        let ranches = self.ranches.list_all().await?;
        Ok(filter::apply_query(ranches, query))
    }

    /// List ranches with herd summary columns.
    ///
    /// Herd counts for the page's rows are fetched concurrently; a row
    /// whose counts fail degrades to zeros rather than failing the page.
    pub async fn list_with_summaries(&self, query: &RanchQuery) -> Result<SummaryPage> {
        let page = self.list(query).await?;

        let summaries = join_all(page.items.into_iter().map(|ranch| self.summarize(ranch))).await;

        Ok(Page {
            items: summaries,
            total_count: page.total_count,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
            has_next_page: page.has_next_page,
            has_previous_page: page.has_previous_page,
        })
    }

    /// Load one ranch by id.
    pub async fn get(&self, ranch_id: &RanchId) -> Result<Ranch> {
        self.ranches.load(ranch_id).await
    }

    async fn summarize(&self, ranch: Ranch) -> RanchSummary {
        let (herd_count, active_alert_count) = tokio::join!(
            self.herd.count_animals(&ranch.id, AnimalFilter::active()),
            self.herd.count_active_alerts(&ranch.id, AlertPriority::High),
        );

        let herd_count = herd_count.unwrap_or_else(|e| {
            warn!(ranch = %ranch.id, error = %e, "herd count failed, using zero");
            0
        });
        let active_alert_count = active_alert_count.unwrap_or_else(|e| {
            warn!(ranch = %ranch.id, error = %e, "alert count failed, using zero");
            0
        });

        RanchSummary {
            id: ranch.id,
            name: ranch.name,
            municipality: ranch.municipality,
            status: ranch.status,
            total_area_hectares: ranch.total_area_hectares,
            herd_count,
            active_alert_count,
        }
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Create a new ranch for the owning user.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` naming the failed check when the
    /// location is outside the governed region, the municipality is not
    /// whitelisted, the state is wrong, or areas/name are malformed.
    pub async fn create(
        &self,
        spec: NewRanch,
        owner_id: OwnerId,
        now: DateTime<Utc>,
    ) -> Result<Ranch> {
        validate_geography(&spec.location, &spec.municipality, &spec.state_name)?;
        if spec.name.trim().is_empty() {
            return Err(Error::validation("ranch name cannot be empty"));
        }
        if spec.total_area_hectares <= 0.0 {
            return Err(Error::validation(format!(
                "total area must be positive, got {}",
                spec.total_area_hectares
            )));
        }

        let configuration = RanchConfiguration::merged_with_defaults(spec.configuration);
        let ranch = Ranch::builder()
            .id(RanchId::generate(now))
            .name(spec.name)
            .description(spec.description)
            .total_area_hectares(spec.total_area_hectares)
            .pasture_area_hectares(spec.pasture_area_hectares)
            .address(spec.address)
            .municipality(spec.municipality)
            .state_name(spec.state_name)
            .postal_code(spec.postal_code)
            .location(spec.location)
            .operation_type(spec.operation_type)
            .management_system(spec.management_system)
            .infrastructure(spec.infrastructure)
            .configuration(configuration)
            .owner_id(owner_id)
            .created_at(now)
            .build()?;

        let saved = self.ranches.save(&ranch).await?;
        info!(ranch = %saved.id, owner = %saved.owner_id, "ranch created");
        Ok(saved)
    }

    /// Update a ranch owned by the requesting user.
    ///
    /// # Errors
    ///
    /// Returns `Error::Authorization` when the requester is not the owner,
    /// `Error::NotFound` for an unknown ranch, `Error::Validation` when a
    /// patched location/municipality fails regional validation, and
    /// `Error::Conflict` when a concurrent write invalidated the version.
    pub async fn update(
        &self,
        ranch_id: &RanchId,
        patch: RanchPatch,
        requesting_user: &OwnerId,
        now: DateTime<Utc>,
    ) -> Result<Ranch> {
        let mut ranch = self.ranches.load(ranch_id).await?;
        ensure_owner(&ranch, requesting_user)?;

        // Re-validate regional fields when the patch touches them.
        let location = patch.location.unwrap_or(ranch.location);
        let municipality = patch
            .municipality
            .clone()
            .unwrap_or_else(|| ranch.municipality.clone());
        if patch.location.is_some() || patch.municipality.is_some() {
            validate_geography(&location, &municipality, &ranch.state_name)?;
        }

        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(Error::validation("ranch name cannot be empty"));
            }
            ranch.name = name;
        }
        if let Some(description) = patch.description {
            ranch.description = description;
        }
        if let Some(area) = patch.total_area_hectares {
            if area <= 0.0 {
                return Err(Error::validation(format!(
                    "total area must be positive, got {area}"
                )));
            }
            ranch.total_area_hectares = area;
        }
        if let Some(area) = patch.pasture_area_hectares {
            ranch.pasture_area_hectares = area;
        }
        if let Some(address) = patch.address {
            ranch.address = address;
        }
        ranch.municipality = municipality;
        ranch.location = location;
        if let Some(postal_code) = patch.postal_code {
            ranch.postal_code = postal_code;
        }
        if let Some(operation_type) = patch.operation_type {
            ranch.operation_type = operation_type;
        }
        if let Some(management_system) = patch.management_system {
            ranch.management_system = management_system;
        }
        if let Some(infrastructure) = patch.infrastructure {
            ranch.infrastructure = infrastructure;
        }
        if let Some(overrides) = patch.configuration {
            ranch.configuration = ranch.configuration.merge(overrides);
        }
        if let Some(status) = patch.status {
            ranch.status = status;
        }

        ranch.touch(now);
        self.ranches.save(&ranch).await
    }

    /// Attach a processed image to a ranch the requesting user owns.
    ///
    /// The upload path goes to the external image service; only the
    /// returned URL is stored.
    pub async fn attach_image(
        &self,
        ranch_id: &RanchId,
        upload_path: &str,
        requesting_user: &OwnerId,
        now: DateTime<Utc>,
    ) -> Result<Ranch> {
        let mut ranch = self.ranches.load(ranch_id).await?;
        ensure_owner(&ranch, requesting_user)?;

        let url = self.images.process(upload_path).await?;
        ranch.image_url = Some(url);
        ranch.touch(now);
        self.ranches.save(&ranch).await
    }

    /// Delete a ranch owned by the requesting user.
    ///
    /// # Errors
    ///
    /// Returns `Error::Authorization` on ownership mismatch and
    /// `Error::Conflict` while the ranch still has non-sold animals;
    /// deletion stays blocked until the herd is relocated or sold.
    pub async fn delete(&self, ranch_id: &RanchId, requesting_user: &OwnerId) -> Result<()> {
        let ranch = self.ranches.load(ranch_id).await?;
        ensure_owner(&ranch, requesting_user)?;

        let remaining = self
            .herd
            .count_animals(ranch_id, AnimalFilter::active())
            .await?;
        if remaining > 0 {
            return Err(Error::conflict(format!(
                "ranch {ranch_id} still has {remaining} non-sold animals"
            )));
        }

        self.ranches.delete(ranch_id).await?;
        info!(ranch = %ranch_id, "ranch deleted");
        Ok(())
    }
}

fn ensure_owner(ranch: &Ranch, requesting_user: &OwnerId) -> Result<()> {
    if ranch.is_owned_by(requesting_user) {
        Ok(())
    } else {
        Err(Error::authorization(format!(
            "user {requesting_user} does not own ranch {}",
            ranch.id
        )))
    }
}

fn validate_query(query: &RanchQuery) -> Result<()> {
    if query.page == 0 {
        return Err(Error::validation("page numbers start at 1"));
    }
    if query.page_size == 0 {
        return Err(Error::validation("page size must be positive"));
    }
    Ok(())
}

fn validate_geography(location: &Location, municipality: &str, state_name: &str) -> Result<()> {
    if !geo::is_within_region(location.latitude, location.longitude) {
        return Err(Error::validation(format!(
            "location ({}, {}) is outside {}",
            location.latitude,
            location.longitude,
            geo::REGION_STATE_NAME
        )));
    }
    if !geo::is_valid_municipality(municipality) {
        return Err(Error::validation(format!(
            "unknown municipality: {municipality}"
        )));
    }
    if state_name != geo::REGION_STATE_NAME {
        return Err(Error::validation(format!(
            "ranches must be registered in {}, got {state_name}",
            geo::REGION_STATE_NAME
        )));
    }
    Ok(())
}
