//! Ranch configuration type definitions.
//!
//! Pure data holders with derived traits; defaults live in `defaults.rs`
//! and override merging in `merge.rs`.

use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// FULL CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════

/// Per-ranch operational settings, embedded in the ranch aggregate.
///
/// Assembled at creation from deployment defaults merged under any
/// caller-supplied overrides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RanchConfiguration {
    pub rotation: RotationConfig,
    pub milking: MilkingConfig,
    pub feeding: FeedingConfig,
    pub alerts: AlertThresholds,
}

/// Pasture rotation policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RotationConfig {
    pub enabled: bool,
    /// Grazing period before a rotation is due
    pub rotation_days: u32,
    /// Minimum days a vacated pasture rests before accepting animals again
    pub rest_days: u32,
}

/// Milking schedule settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MilkingConfig {
    pub milkings_per_day: u8,
    /// Local times of day, "HH:MM"
    pub schedule: Vec<String>,
}

/// Supplemental feeding settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FeedingConfig {
    pub supplement_enabled: bool,
    /// Local times of day, "HH:MM"
    pub schedule: Vec<String>,
}

/// Thresholds that trigger dashboard alerts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlertThresholds {
    /// Daily milk production below this raises a low-production alert
    pub low_production_threshold_liters: f64,
    /// Days since last vaccination before an overdue alert
    pub overdue_vaccination_days: u32,
    /// Pasture occupancy as percent of capacity that counts as overloaded
    pub pasture_overload_percent: u8,
}

// ═══════════════════════════════════════════════════════════════════════════
// PARTIAL (OVERRIDE) CONFIGURATION
// ═══════════════════════════════════════════════════════════════════════════

/// Caller-supplied configuration overrides at ranch creation.
///
/// `None` fields fall back to deployment defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PartialRanchConfiguration {
    pub rotation: Option<PartialRotationConfig>,
    pub milking: Option<PartialMilkingConfig>,
    pub feeding: Option<PartialFeedingConfig>,
    pub alerts: Option<PartialAlertThresholds>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartialRotationConfig {
    pub enabled: Option<bool>,
    pub rotation_days: Option<u32>,
    pub rest_days: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartialMilkingConfig {
    pub milkings_per_day: Option<u8>,
    pub schedule: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartialFeedingConfig {
    pub supplement_enabled: Option<bool>,
    pub schedule: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PartialAlertThresholds {
    pub low_production_threshold_liters: Option<f64>,
    pub overdue_vaccination_days: Option<u32>,
    pub pasture_overload_percent: Option<u8>,
}
