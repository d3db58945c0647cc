//! # Potrero Core
//!
//! Core functionality for ranch land and herd allocation - strictly
//! functional Rust with zero unwraps.
//!
//! The crate is a library invoked per-request by a stateless HTTP shell
//! (out of scope here). It owns four concerns:
//!
//! - **`geo`** - validates coordinates and municipality membership for the
//!   governed region
//! - **`pastures`** - the pasture store: add/update/remove/rotate over a
//!   ranch's owned pasture collection, enforcing capacity and rest-period
//!   invariants
//! - **`stats`** - on-demand herd statistics snapshots assembled from
//!   concurrent persistence sub-queries
//! - **`directory`** - ranch listing/search/pagination plus create/update/
//!   delete with ownership and herd-conflict rules
//!
//! Persistence and image processing are consumed through the trait
//! interfaces in [`domain::repository`]; this crate implements neither.
//!
//! ## Laws (Compiler Enforced)
//!
//! - No `unwrap()` - returns `Result` instead
//! - No `expect()` - returns `Result` instead
//! - No `panic!()` - returns `Result` instead
//! - No `unsafe` - safe Rust only
//!
//! ## Error Handling
//!
//! All fallible operations return `Result<T, Error>`. Use:
//! - `?` operator for propagation
//! - `map`, `and_then` combinators for transformation
//! - `match` / `map_or` / `unwrap_or_else` for defaults

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::panic))]
#![forbid(unsafe_code)]

pub mod config;
pub mod directory;
pub mod domain;
mod error;
pub mod geo;
pub mod pastures;
pub mod stats;

pub use config::{PartialRanchConfiguration, RanchConfiguration, RotationConfig};
pub use directory::{
    NewRanch, Page, RanchDirectory, RanchFilter, RanchPage, RanchPatch, RanchQuery, RanchSort,
    RanchSummary, SortDirection, SummaryPage,
};
pub use domain::{
    HerdEvent, Location, ManagementSystem, OperationType, OwnerId, Pasture, PastureId,
    PasturePatch, PastureSpec, PastureStatus, PastureType, ProductionSummary, Ranch, RanchBuilder,
    RanchId, RanchStatus,
};
pub use error::{Error, Result};
pub use pastures::RotationOutcome;
pub use stats::{HerdStatisticsAggregator, HerdStatisticsSnapshot};
