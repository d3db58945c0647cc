//! Pasture entity: a bounded subdivision of a ranch's land with its own
//! livestock capacity and occupancy.
//!
//! # Invariants
//!
//! 1. `current_bovines <= capacity_bovines` at all times
//! 2. Pasture ids are unique within one ranch
//!
//! Both are enforced by the store operations in [`crate::pastures`]; this
//! module only defines the data and its local queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::domain::identifiers::PastureId;

/// A single boundary vertex of a pasture polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub lat: f64,
    pub lng: f64,
}

/// Vegetation classification of a pasture.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PastureType {
    Natural,
    Improved,
    Silvopastoral,
}

/// Occupancy state of a pasture.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PastureStatus {
    Available,
    Occupied,
    Resting,
    Maintenance,
}

impl PastureStatus {
    #[must_use]
    pub const fn is_resting(self) -> bool {
        matches!(self, Self::Resting)
    }

    #[must_use]
    pub const fn is_occupied(self) -> bool {
        matches!(self, Self::Occupied)
    }
}

/// A grazing subdivision owned by exactly one ranch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pasture {
    /// Unique within the parent ranch, generated on creation
    pub id: PastureId,
    pub name: String,
    pub area_hectares: f64,
    /// Maximum occupancy
    pub capacity_bovines: u32,
    /// Current occupancy count
    pub current_bovines: u32,
    pub pasture_type: PastureType,
    pub grass_species: Vec<String>,
    /// Ordered lat/lng vertices describing the area boundary
    pub coordinates: Vec<Vertex>,
    pub status: PastureStatus,
    /// Set when the pasture was vacated and entered its rest period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resting_since: Option<DateTime<Utc>>,
}

impl Pasture {
    /// Head count the pasture can still take before hitting capacity.
    #[must_use]
    pub const fn remaining_capacity(&self) -> u32 {
        self.capacity_bovines.saturating_sub(self.current_bovines)
    }

    /// Whether the pasture holds no animals.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.current_bovines == 0
    }
}

/// Creation record for a new pasture.
///
/// Id, status, and occupancy are assigned by the store, not the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PastureSpec {
    pub name: String,
    pub area_hectares: f64,
    pub capacity_bovines: u32,
    pub pasture_type: PastureType,
    #[serde(default)]
    pub grass_species: Vec<String>,
    #[serde(default)]
    pub coordinates: Vec<Vertex>,
}

/// Field-wise patch for an existing pasture.
///
/// `None` leaves the field untouched. Occupancy is deliberately absent:
/// it only changes through rotation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PasturePatch {
    pub name: Option<String>,
    pub area_hectares: Option<f64>,
    pub capacity_bovines: Option<u32>,
    pub pasture_type: Option<PastureType>,
    pub grass_species: Option<Vec<String>>,
    pub coordinates: Option<Vec<Vertex>>,
    pub status: Option<PastureStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pasture(capacity: u32, current: u32) -> Pasture {
        Pasture {
            id: PastureId::new("pz-1").expect("valid id"),
            name: "La Ceiba".to_string(),
            area_hectares: 12.5,
            capacity_bovines: capacity,
            current_bovines: current,
            pasture_type: PastureType::Improved,
            grass_species: vec!["Estrella".to_string()],
            coordinates: Vec::new(),
            status: PastureStatus::Occupied,
            resting_since: None,
        }
    }

    #[test]
    fn test_remaining_capacity() {
        assert_eq!(pasture(10, 4).remaining_capacity(), 6);
        assert_eq!(pasture(10, 10).remaining_capacity(), 0);
    }

    #[test]
    fn test_is_empty() {
        assert!(pasture(10, 0).is_empty());
        assert!(!pasture(10, 1).is_empty());
    }

    #[test]
    fn test_status_serde_uses_snake_case() {
        let json = serde_json::to_string(&PastureStatus::Resting).expect("serializes");
        assert_eq!(json, r#""resting""#);
        let back: PastureStatus = serde_json::from_str(r#""maintenance""#).expect("deserializes");
        assert_eq!(back, PastureStatus::Maintenance);
    }

    #[test]
    fn test_pasture_type_display() {
        assert_eq!(PastureType::Silvopastoral.to_string(), "silvopastoral");
    }
}
