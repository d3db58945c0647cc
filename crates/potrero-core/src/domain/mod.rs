//! # Domain Layer
//!
//! Core domain models for ranch land and herd allocation, independent of
//! infrastructure concerns.
//!
//! - **Identifiers** - validated newtypes ([`RanchId`], [`PastureId`],
//!   [`OwnerId`]); parse once at the boundary, carry semantic types after
//! - **Entities** - [`Pasture`] and the [`Ranch`] aggregate root, which
//!   exclusively owns its pasture collection
//! - **Repository traits** - the persistence boundary the core consumes
//!   but never implements
//!
//! Business rules that span entities (capacity, rest periods, rotation)
//! live in [`crate::pastures`]; this layer keeps the data honest locally.

pub mod identifiers;
pub mod pasture;
pub mod ranch;
pub mod repository;

pub use identifiers::{OwnerId, PastureId, RanchId};
pub use pasture::{Pasture, PasturePatch, PastureSpec, PastureStatus, PastureType, Vertex};
pub use ranch::{Location, ManagementSystem, OperationType, Ranch, RanchBuilder, RanchStatus};
pub use repository::{
    AlertPriority, AnimalFilter, EventType, Gender, HerdEvent, HerdRepository, ImageService,
    ProductionSummary, ProductionType, RanchRepository,
};
