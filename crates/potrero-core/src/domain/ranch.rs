//! Ranch aggregate root.
//!
//! A ranch exclusively owns its pastures: no pasture exists or is
//! referenced outside its parent, and every pasture mutation goes through
//! the store operations in [`crate::pastures`]. The aggregate carries an
//! optimistic `version` token; [`crate::domain::repository::RanchRepository::save`]
//! rejects writes whose version does not match the stored one, which gives
//! rotations their per-ranch mutual exclusion.

use chrono::{DateTime, Utc};
use im::Vector;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::config::RanchConfiguration;
use crate::domain::identifiers::{OwnerId, PastureId, RanchId};
use crate::domain::pasture::Pasture;

/// Geographic point of the ranch's main access.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Primary production orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OperationType {
    Dairy,
    Beef,
    Mixed,
}

/// Grazing management intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ManagementSystem {
    Extensive,
    SemiIntensive,
    Intensive,
}

/// Administrative state of a ranch record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RanchStatus {
    Active,
    Inactive,
    Suspended,
}

impl RanchStatus {
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Top-level managed property with land, herd, and configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ranch {
    pub id: RanchId,
    pub name: String,
    pub description: String,
    pub total_area_hectares: f64,
    pub pasture_area_hectares: f64,
    pub address: String,
    /// Must be one of the governed region's municipalities
    pub municipality: String,
    /// Fixed to the governed region's state
    pub state_name: String,
    pub postal_code: String,
    pub location: Location,
    /// Set from the external image service, never computed here
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub operation_type: OperationType,
    pub management_system: ManagementSystem,
    /// Opaque structured record, not interpreted by the core
    #[serde(default)]
    pub infrastructure: serde_json::Value,
    pub configuration: RanchConfiguration,
    /// Exclusively owned; mutated only through the pasture store
    pub pastures: Vector<Pasture>,
    pub owner_id: OwnerId,
    pub status: RanchStatus,
    /// Optimistic concurrency token, bumped on every save
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ranch {
    /// Find a pasture by id.
    #[must_use]
    pub fn pasture(&self, id: &PastureId) -> Option<&Pasture> {
        self.pastures.iter().find(|p| &p.id == id)
    }

    /// Position of a pasture in the owned collection.
    #[must_use]
    pub fn pasture_index(&self, id: &PastureId) -> Option<usize> {
        self.pastures.iter().position(|p| &p.id == id)
    }

    /// Sum of all pasture areas in hectares. Derived, never stored.
    #[must_use]
    pub fn total_pasture_area(&self) -> f64 {
        self.pastures.iter().map(|p| p.area_hectares).sum()
    }

    /// Sum of all pasture occupancies. Derived, never stored.
    #[must_use]
    pub fn total_occupancy(&self) -> u64 {
        self.pastures
            .iter()
            .map(|p| u64::from(p.current_bovines))
            .sum()
    }

    /// Whether the requesting user owns this ranch.
    #[must_use]
    pub fn is_owned_by(&self, user: &OwnerId) -> bool {
        &self.owner_id == user
    }

    /// Record a modification at the given instant.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    /// Create a builder for constructing ranches.
    #[must_use]
    pub fn builder() -> RanchBuilder {
        RanchBuilder::default()
    }
}

/// Builder for constructing ranch aggregates.
///
/// Geographic and municipality validation is the directory's concern; the
/// builder only assembles the record.
#[derive(Debug, Default)]
pub struct RanchBuilder {
    id: Option<RanchId>,
    name: Option<String>,
    description: Option<String>,
    total_area_hectares: Option<f64>,
    pasture_area_hectares: Option<f64>,
    address: Option<String>,
    municipality: Option<String>,
    state_name: Option<String>,
    postal_code: Option<String>,
    location: Option<Location>,
    image_url: Option<String>,
    operation_type: Option<OperationType>,
    management_system: Option<ManagementSystem>,
    infrastructure: Option<serde_json::Value>,
    configuration: Option<RanchConfiguration>,
    owner_id: Option<OwnerId>,
    created_at: Option<DateTime<Utc>>,
}

impl RanchBuilder {
    #[must_use]
    pub fn id(mut self, id: RanchId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn total_area_hectares(mut self, area: f64) -> Self {
        self.total_area_hectares = Some(area);
        self
    }

    #[must_use]
    pub fn pasture_area_hectares(mut self, area: f64) -> Self {
        self.pasture_area_hectares = Some(area);
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn municipality(mut self, municipality: impl Into<String>) -> Self {
        self.municipality = Some(municipality.into());
        self
    }

    #[must_use]
    pub fn state_name(mut self, state_name: impl Into<String>) -> Self {
        self.state_name = Some(state_name.into());
        self
    }

    #[must_use]
    pub fn postal_code(mut self, postal_code: impl Into<String>) -> Self {
        self.postal_code = Some(postal_code.into());
        self
    }

    #[must_use]
    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn operation_type(mut self, operation_type: OperationType) -> Self {
        self.operation_type = Some(operation_type);
        self
    }

    #[must_use]
    pub fn management_system(mut self, management_system: ManagementSystem) -> Self {
        self.management_system = Some(management_system);
        self
    }

    #[must_use]
    pub fn infrastructure(mut self, infrastructure: serde_json::Value) -> Self {
        self.infrastructure = Some(infrastructure);
        self
    }

    #[must_use]
    pub fn configuration(mut self, configuration: RanchConfiguration) -> Self {
        self.configuration = Some(configuration);
        self
    }

    #[must_use]
    pub fn owner_id(mut self, owner_id: OwnerId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Build the ranch.
    ///
    /// New ranches start `Active`, with no pastures, at version 0.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` naming the first missing required field.
    pub fn build(self) -> crate::Result<Ranch> {
        let missing =
            |field: &str| crate::Error::validation(format!("ranch {field} is required"));

        let created_at = self.created_at.ok_or_else(|| missing("created_at"))?;
        Ok(Ranch {
            id: self.id.ok_or_else(|| missing("id"))?,
            name: self.name.ok_or_else(|| missing("name"))?,
            description: self.description.unwrap_or_default(),
            total_area_hectares: self
                .total_area_hectares
                .ok_or_else(|| missing("total_area_hectares"))?,
            pasture_area_hectares: self.pasture_area_hectares.unwrap_or(0.0),
            address: self.address.unwrap_or_default(),
            municipality: self.municipality.ok_or_else(|| missing("municipality"))?,
            state_name: self.state_name.ok_or_else(|| missing("state_name"))?,
            postal_code: self.postal_code.unwrap_or_default(),
            location: self.location.ok_or_else(|| missing("location"))?,
            image_url: self.image_url,
            operation_type: self
                .operation_type
                .ok_or_else(|| missing("operation_type"))?,
            management_system: self
                .management_system
                .ok_or_else(|| missing("management_system"))?,
            infrastructure: self.infrastructure.unwrap_or(serde_json::Value::Null),
            configuration: self.configuration.unwrap_or_default(),
            pastures: Vector::new(),
            owner_id: self.owner_id.ok_or_else(|| missing("owner_id"))?,
            status: RanchStatus::Active,
            version: 0,
            created_at,
            updated_at: created_at,
        })
    }
}
