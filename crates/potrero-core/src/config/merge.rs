//! Configuration merging (immutable functional pattern).
//!
//! Deployment defaults are applied first; caller-supplied overrides win
//! field-by-field. All merges return new instances.

use super::types::{
    AlertThresholds, FeedingConfig, MilkingConfig, PartialAlertThresholds, PartialFeedingConfig,
    PartialMilkingConfig, PartialRanchConfiguration, PartialRotationConfig, RanchConfiguration,
    RotationConfig,
};

impl RanchConfiguration {
    /// Deployment defaults with the given overrides applied on top.
    #[must_use]
    pub fn merged_with_defaults(overrides: PartialRanchConfiguration) -> Self {
        Self::default().merge(overrides)
    }

    /// Apply overrides onto this configuration (overrides take precedence).
    #[must_use]
    pub fn merge(self, overrides: PartialRanchConfiguration) -> Self {
        Self {
            rotation: match overrides.rotation {
                Some(o) => self.rotation.merge(o),
                None => self.rotation,
            },
            milking: match overrides.milking {
                Some(o) => self.milking.merge(o),
                None => self.milking,
            },
            feeding: match overrides.feeding {
                Some(o) => self.feeding.merge(o),
                None => self.feeding,
            },
            alerts: match overrides.alerts {
                Some(o) => self.alerts.merge(o),
                None => self.alerts,
            },
        }
    }
}

impl RotationConfig {
    fn merge(self, other: PartialRotationConfig) -> Self {
        Self {
            enabled: other.enabled.unwrap_or(self.enabled),
            rotation_days: other.rotation_days.unwrap_or(self.rotation_days),
            rest_days: other.rest_days.unwrap_or(self.rest_days),
        }
    }
}

impl MilkingConfig {
    fn merge(self, other: PartialMilkingConfig) -> Self {
        Self {
            milkings_per_day: other.milkings_per_day.unwrap_or(self.milkings_per_day),
            schedule: other.schedule.unwrap_or(self.schedule),
        }
    }
}

impl FeedingConfig {
    fn merge(self, other: PartialFeedingConfig) -> Self {
        Self {
            supplement_enabled: other.supplement_enabled.unwrap_or(self.supplement_enabled),
            schedule: other.schedule.unwrap_or(self.schedule),
        }
    }
}

impl AlertThresholds {
    fn merge(self, other: PartialAlertThresholds) -> Self {
        Self {
            low_production_threshold_liters: other
                .low_production_threshold_liters
                .unwrap_or(self.low_production_threshold_liters),
            overdue_vaccination_days: other
                .overdue_vaccination_days
                .unwrap_or(self.overdue_vaccination_days),
            pasture_overload_percent: other
                .pasture_overload_percent
                .unwrap_or(self.pasture_overload_percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_overrides_yield_defaults() {
        let merged =
            RanchConfiguration::merged_with_defaults(PartialRanchConfiguration::default());
        assert_eq!(merged, RanchConfiguration::default());
    }

    #[test]
    fn test_present_override_fields_win() {
        let overrides = PartialRanchConfiguration {
            rotation: Some(PartialRotationConfig {
                rest_days: Some(40),
                ..PartialRotationConfig::default()
            }),
            ..PartialRanchConfiguration::default()
        };

        let merged = RanchConfiguration::merged_with_defaults(overrides);
        assert_eq!(merged.rotation.rest_days, 40);
        // Untouched sibling fields keep their defaults
        assert_eq!(
            merged.rotation.rotation_days,
            RotationConfig::default().rotation_days
        );
        assert_eq!(merged.milking, MilkingConfig::default());
    }

    #[test]
    fn test_nested_schedule_override_replaces_whole_list() {
        let overrides = PartialRanchConfiguration {
            milking: Some(PartialMilkingConfig {
                schedule: Some(vec!["04:30".to_string()]),
                milkings_per_day: None,
            }),
            ..PartialRanchConfiguration::default()
        };

        let merged = RanchConfiguration::merged_with_defaults(overrides);
        assert_eq!(merged.milking.schedule, vec!["04:30".to_string()]);
        assert_eq!(
            merged.milking.milkings_per_day,
            MilkingConfig::default().milkings_per_day
        );
    }
}
