//! Deployment-default configuration values.

use super::types::{
    AlertThresholds, FeedingConfig, MilkingConfig, RanchConfiguration, RotationConfig,
};

// ═══════════════════════════════════════════════════════════════════════════
// DEFAULT IMPLEMENTATIONS
// ═══════════════════════════════════════════════════════════════════════════

impl Default for RanchConfiguration {
    fn default() -> Self {
        Self {
            rotation: RotationConfig::default(),
            milking: MilkingConfig::default(),
            feeding: FeedingConfig::default(),
            alerts: AlertThresholds::default(),
        }
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            rotation_days: 30,
            rest_days: 25,
        }
    }
}

impl Default for MilkingConfig {
    fn default() -> Self {
        Self {
            milkings_per_day: 2,
            schedule: vec!["05:00".to_string(), "17:00".to_string()],
        }
    }
}

impl Default for FeedingConfig {
    fn default() -> Self {
        Self {
            supplement_enabled: false,
            schedule: vec!["06:00".to_string(), "18:00".to_string()],
        }
    }
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            low_production_threshold_liters: 8.0,
            overdue_vaccination_days: 180,
            pasture_overload_percent: 90,
        }
    }
}
