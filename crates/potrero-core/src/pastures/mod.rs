//! Pasture store: every mutation of a ranch's owned pasture collection.
//!
//! Operations take a `&mut Ranch` that the caller has loaded; the store
//! performs no I/O and the caller saves the aggregate afterwards under the
//! repository's optimistic version check. Each operation validates first
//! and mutates only after every check passes, so an error implies an
//! untouched aggregate.
//!
//! Centralizing the mutations here keeps the two pasture invariants in one
//! place: occupancy never exceeds capacity, and ids stay unique within the
//! ranch.

pub mod rotation;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::domain::{Pasture, PastureId, PasturePatch, PastureSpec, PastureStatus, Ranch};
use crate::error::{Error, Result};

pub use rotation::{rotate, RotationOutcome};

fn validate_spec(spec: &PastureSpec) -> Result<()> {
    if spec.name.trim().is_empty() {
        return Err(Error::validation("pasture name cannot be empty"));
    }
    if spec.area_hectares <= 0.0 {
        return Err(Error::validation(format!(
            "pasture area must be positive, got {}",
            spec.area_hectares
        )));
    }
    Ok(())
}

/// Generate a pasture id unique within the ranch.
///
/// Ids are time-based; a same-millisecond collision gets a numeric suffix.
fn unique_pasture_id(ranch: &Ranch, now: DateTime<Utc>) -> PastureId {
    let base = PastureId::generate(now);
    if ranch.pasture(&base).is_none() {
        return base;
    }
    let mut n = 1_u32;
    loop {
        match PastureId::new(format!("{base}-{n}")) {
            Ok(candidate) if ranch.pasture(&candidate).is_none() => return candidate,
            _ => n = n.saturating_add(1),
        }
    }
}

/// Add a new pasture to the ranch.
///
/// The new pasture starts `Available` and empty; id, status, and occupancy
/// are assigned here, never by the caller.
///
/// # Errors
///
/// Returns `Error::Validation` for an empty name or non-positive area.
pub fn add_pasture(ranch: &mut Ranch, spec: PastureSpec, now: DateTime<Utc>) -> Result<PastureId> {
    validate_spec(&spec)?;

    let id = unique_pasture_id(ranch, now);
    ranch.pastures.push_back(Pasture {
        id: id.clone(),
        name: spec.name,
        area_hectares: spec.area_hectares,
        capacity_bovines: spec.capacity_bovines,
        current_bovines: 0,
        pasture_type: spec.pasture_type,
        grass_species: spec.grass_species,
        coordinates: spec.coordinates,
        status: PastureStatus::Available,
        resting_since: None,
    });
    ranch.touch(now);

    debug!(ranch = %ranch.id, pasture = %id, "pasture added");
    Ok(id)
}

/// Merge patch fields into an existing pasture.
///
/// Occupancy cannot be patched; it only changes through rotation.
///
/// # Errors
///
/// Returns `Error::NotFound` for an unknown pasture id.
/// Returns `Error::Validation` if the patched pasture would hold more
/// animals than its capacity, or end up with a non-positive area or an
/// empty name.
pub fn update_pasture(
    ranch: &mut Ranch,
    pasture_id: &PastureId,
    patch: PasturePatch,
    now: DateTime<Utc>,
) -> Result<()> {
    let index = ranch
        .pasture_index(pasture_id)
        .ok_or_else(|| Error::not_found("pasture", pasture_id))?;

    // Build the patched pasture in full before committing anything.
    let mut updated = ranch.pastures[index].clone();
    if let Some(name) = patch.name {
        updated.name = name;
    }
    if let Some(area) = patch.area_hectares {
        updated.area_hectares = area;
    }
    if let Some(capacity) = patch.capacity_bovines {
        updated.capacity_bovines = capacity;
    }
    if let Some(pasture_type) = patch.pasture_type {
        updated.pasture_type = pasture_type;
    }
    if let Some(species) = patch.grass_species {
        updated.grass_species = species;
    }
    if let Some(coordinates) = patch.coordinates {
        updated.coordinates = coordinates;
    }
    if let Some(status) = patch.status {
        updated.status = status;
    }

    if updated.name.trim().is_empty() {
        return Err(Error::validation("pasture name cannot be empty"));
    }
    if updated.area_hectares <= 0.0 {
        return Err(Error::validation(format!(
            "pasture area must be positive, got {}",
            updated.area_hectares
        )));
    }
    if updated.current_bovines > updated.capacity_bovines {
        return Err(Error::validation(format!(
            "capacity {} is below current occupancy {}",
            updated.capacity_bovines, updated.current_bovines
        )));
    }

    ranch.pastures.set(index, updated);
    ranch.touch(now);
    Ok(())
}

/// Remove a pasture from the ranch, returning the removed record.
///
/// # Errors
///
/// Returns `Error::NotFound` for an unknown pasture id.
/// Returns `Error::Conflict` while the pasture holds animals; they must be
/// rotated out first.
pub fn remove_pasture(
    ranch: &mut Ranch,
    pasture_id: &PastureId,
    now: DateTime<Utc>,
) -> Result<Pasture> {
    let index = ranch
        .pasture_index(pasture_id)
        .ok_or_else(|| Error::not_found("pasture", pasture_id))?;

    let occupancy = ranch.pastures[index].current_bovines;
    if occupancy > 0 {
        return Err(Error::conflict(format!(
            "pasture {pasture_id} still holds {occupancy} head"
        )));
    }

    let removed = ranch.pastures.remove(index);
    ranch.touch(now);

    debug!(ranch = %ranch.id, pasture = %pasture_id, "pasture removed");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Location, ManagementSystem, OperationType, OwnerId, PastureType, RanchId,
    };

    fn test_ranch() -> Ranch {
        Ranch::builder()
            .id(RanchId::new("r-1").expect("valid id"))
            .name("Santa Elena")
            .municipality("Centro")
            .state_name("Tabasco")
            .location(Location {
                latitude: 17.9,
                longitude: -92.9,
            })
            .total_area_hectares(200.0)
            .operation_type(OperationType::Mixed)
            .management_system(ManagementSystem::Extensive)
            .owner_id(OwnerId::new("u-1").expect("valid id"))
            .created_at(Utc::now())
            .build()
            .expect("builder works")
    }

    fn spec(name: &str, area: f64, capacity: u32) -> PastureSpec {
        PastureSpec {
            name: name.to_string(),
            area_hectares: area,
            capacity_bovines: capacity,
            pasture_type: PastureType::Natural,
            grass_species: Vec::new(),
            coordinates: Vec::new(),
        }
    }

    #[test]
    fn test_add_pasture_defaults() {
        let mut ranch = test_ranch();
        let id = add_pasture(&mut ranch, spec("Norte", 15.0, 30), Utc::now()).expect("adds");

        let pasture = ranch.pasture(&id).expect("present");
        assert_eq!(pasture.status, PastureStatus::Available);
        assert_eq!(pasture.current_bovines, 0);
        assert_eq!(pasture.capacity_bovines, 30);
    }

    #[test]
    fn test_add_pasture_rejects_bad_area() {
        let mut ranch = test_ranch();
        assert!(matches!(
            add_pasture(&mut ranch, spec("Sur", 0.0, 10), Utc::now()),
            Err(Error::Validation { .. })
        ));
        assert!(matches!(
            add_pasture(&mut ranch, spec("Sur", -3.0, 10), Utc::now()),
            Err(Error::Validation { .. })
        ));
        assert!(ranch.pastures.is_empty());
    }

    #[test]
    fn test_same_instant_ids_are_uniquified() {
        let mut ranch = test_ranch();
        let now = Utc::now();
        let a = add_pasture(&mut ranch, spec("A", 5.0, 10), now).expect("adds");
        let b = add_pasture(&mut ranch, spec("B", 5.0, 10), now).expect("adds");
        assert_ne!(a, b);
        assert_eq!(ranch.pastures.len(), 2);
    }

    #[test]
    fn test_update_pasture_patch_merge() {
        let mut ranch = test_ranch();
        let id = add_pasture(&mut ranch, spec("Norte", 15.0, 30), Utc::now()).expect("adds");

        let patch = PasturePatch {
            name: Some("Norte Alto".to_string()),
            capacity_bovines: Some(25),
            ..PasturePatch::default()
        };
        update_pasture(&mut ranch, &id, patch, Utc::now()).expect("updates");

        let pasture = ranch.pasture(&id).expect("present");
        assert_eq!(pasture.name, "Norte Alto");
        assert_eq!(pasture.capacity_bovines, 25);
        // Untouched fields survive the merge
        assert!((pasture.area_hectares - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_update_rejects_capacity_below_occupancy() {
        let mut ranch = test_ranch();
        let id = add_pasture(&mut ranch, spec("Norte", 15.0, 30), Utc::now()).expect("adds");
        if let Some(i) = ranch.pasture_index(&id) {
            let mut p = ranch.pastures[i].clone();
            p.current_bovines = 20;
            ranch.pastures.set(i, p);
        }

        let patch = PasturePatch {
            capacity_bovines: Some(10),
            ..PasturePatch::default()
        };
        let result = update_pasture(&mut ranch, &id, patch, Utc::now());
        assert!(matches!(result, Err(Error::Validation { .. })));
        // The rejected patch left the pasture untouched
        let pasture = ranch.pasture(&id).expect("present");
        assert_eq!(pasture.capacity_bovines, 30);
        assert_eq!(pasture.current_bovines, 20);
    }

    #[test]
    fn test_update_unknown_pasture() {
        let mut ranch = test_ranch();
        let ghost = PastureId::new("pz-ghost").expect("valid id");
        let result = update_pasture(&mut ranch, &ghost, PasturePatch::default(), Utc::now());
        assert!(matches!(result, Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_remove_occupied_pasture_conflicts() {
        let mut ranch = test_ranch();
        let id = add_pasture(&mut ranch, spec("Norte", 15.0, 30), Utc::now()).expect("adds");
        if let Some(i) = ranch.pasture_index(&id) {
            let mut p = ranch.pastures[i].clone();
            p.current_bovines = 5;
            ranch.pastures.set(i, p);
        }

        assert!(matches!(
            remove_pasture(&mut ranch, &id, Utc::now()),
            Err(Error::Conflict { .. })
        ));
        assert!(ranch.pasture(&id).is_some());
    }

    #[test]
    fn test_remove_empty_pasture_succeeds() {
        let mut ranch = test_ranch();
        let id = add_pasture(&mut ranch, spec("Norte", 15.0, 30), Utc::now()).expect("adds");

        let removed = remove_pasture(&mut ranch, &id, Utc::now()).expect("removes");
        assert_eq!(removed.id, id);
        assert!(ranch.pasture(&id).is_none());
        assert!(ranch.pastures.is_empty());
    }
}
