//! Per-ranch configuration: rotation, milking, feeding, and alert
//! thresholds.
//!
//! Split into pure data (`types`), deployment defaults (`defaults`), and
//! override merging (`merge`).

mod defaults;
mod merge;
mod types;

pub use types::{
    AlertThresholds, FeedingConfig, MilkingConfig, PartialAlertThresholds, PartialFeedingConfig,
    PartialMilkingConfig, PartialRanchConfiguration, PartialRotationConfig, RanchConfiguration,
    RotationConfig,
};
