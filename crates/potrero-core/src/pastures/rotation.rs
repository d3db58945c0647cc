//! Animal rotation between pastures.
//!
//! The workflow checks, in order: both pastures exist, the quantity is
//! sound, the destination has capacity, and the destination's rest period
//! has elapsed. Only after every check passes are both pastures updated,
//! so either both updates apply or neither does.
//!
//! The caller provides `now` and is responsible for saving the aggregate
//! under the repository's version check; that check is what serializes
//! concurrent rotations on the same ranch.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{PastureId, PastureStatus, Ranch};
use crate::error::{Error, Result};

/// Result of a completed rotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationOutcome {
    pub from: PastureId,
    pub to: PastureId,
    pub quantity: u32,
    /// Head count left behind in the source pasture
    pub from_remaining: u32,
    /// Whether the source was vacated and entered its rest period
    pub from_now_resting: bool,
}

/// Move `quantity` animals from one pasture to another.
///
/// On success the source loses `quantity` head (entering `Resting` with a
/// rest timestamp when vacated) and the destination gains them and becomes
/// `Occupied`.
///
/// # Errors
///
/// - `Error::Validation` - source and destination are the same, the
///   quantity is zero, or it exceeds the source occupancy
/// - `Error::NotFound` - either pasture id is absent from the ranch
/// - `Error::CapacityExceeded` - the destination cannot take the quantity
/// - `Error::RestPeriodViolation` - the destination is resting and its
///   rest period has not elapsed
///
/// Any error leaves both pastures unchanged.
pub fn rotate(
    ranch: &mut Ranch,
    from_id: &PastureId,
    to_id: &PastureId,
    quantity: u32,
    now: DateTime<Utc>,
) -> Result<RotationOutcome> {
    if from_id == to_id {
        return Err(Error::validation(
            "source and destination pasture must differ",
        ));
    }

    let from_index = ranch
        .pasture_index(from_id)
        .ok_or_else(|| Error::not_found("pasture", from_id))?;
    let to_index = ranch
        .pasture_index(to_id)
        .ok_or_else(|| Error::not_found("pasture", to_id))?;

    let from = &ranch.pastures[from_index];
    let to = &ranch.pastures[to_index];

    if quantity == 0 {
        return Err(Error::validation("rotation quantity must be positive"));
    }
    if quantity > from.current_bovines {
        return Err(Error::validation(format!(
            "cannot move {quantity} head from {from_id}: only {} present",
            from.current_bovines
        )));
    }

    let target_occupancy = to.current_bovines.saturating_add(quantity);
    if target_occupancy > to.capacity_bovines {
        return Err(Error::CapacityExceeded {
            pasture: to_id.clone(),
            requested: quantity,
            capacity: to.capacity_bovines,
            current: to.current_bovines,
        });
    }

    let rest_days = ranch.configuration.rotation.rest_days;
    if rest_days > 0 && to.status.is_resting() {
        // A resting pasture without a recorded timestamp has no clock to
        // measure against and accepts animals.
        if let Some(resting_since) = to.resting_since {
            let rested_for = now.signed_duration_since(resting_since);
            if rested_for < Duration::days(i64::from(rest_days)) {
                return Err(Error::RestPeriodViolation {
                    pasture: to_id.clone(),
                    rest_days,
                    resting_since,
                });
            }
        }
    }

    // All checks passed; apply both updates.
    let mut from = ranch.pastures[from_index].clone();
    let mut to = ranch.pastures[to_index].clone();

    from.current_bovines -= quantity;
    let from_now_resting = from.is_empty();
    if from_now_resting {
        from.status = PastureStatus::Resting;
        from.resting_since = Some(now);
    }

    to.current_bovines = target_occupancy;
    to.status = PastureStatus::Occupied;
    to.resting_since = None;

    let from_remaining = from.current_bovines;
    ranch.pastures.set(from_index, from);
    ranch.pastures.set(to_index, to);
    ranch.touch(now);

    info!(
        ranch = %ranch.id,
        from = %from_id,
        to = %to_id,
        quantity,
        from_remaining,
        "rotated animals between pastures"
    );

    Ok(RotationOutcome {
        from: from_id.clone(),
        to: to_id.clone(),
        quantity,
        from_remaining,
        from_now_resting,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Location, ManagementSystem, OperationType, OwnerId, Pasture, PastureType, RanchId,
    };

    fn pasture(id: &str, capacity: u32, current: u32, status: PastureStatus) -> Pasture {
        Pasture {
            id: PastureId::new(id).expect("valid id"),
            name: id.to_string(),
            area_hectares: 10.0,
            capacity_bovines: capacity,
            current_bovines: current,
            pasture_type: PastureType::Natural,
            grass_species: Vec::new(),
            coordinates: Vec::new(),
            status,
            resting_since: None,
        }
    }

    fn ranch_with(pastures: Vec<Pasture>, rest_days: u32) -> Ranch {
        let mut ranch = Ranch::builder()
            .id(RanchId::new("r-1").expect("valid id"))
            .name("La Victoria")
            .municipality("Macuspana")
            .state_name("Tabasco")
            .location(Location {
                latitude: 17.75,
                longitude: -92.6,
            })
            .total_area_hectares(300.0)
            .operation_type(OperationType::Beef)
            .management_system(ManagementSystem::Extensive)
            .owner_id(OwnerId::new("u-1").expect("valid id"))
            .created_at(Utc::now())
            .build()
            .expect("builder works");
        ranch.configuration.rotation.rest_days = rest_days;
        for p in pastures {
            ranch.pastures.push_back(p);
        }
        ranch
    }

    fn id(s: &str) -> PastureId {
        PastureId::new(s).expect("valid id")
    }

    #[test]
    fn test_rotation_moves_head_and_marks_destination_occupied() {
        // Spec scenario: P1 {cap 10, cur 10}, P2 {cap 5, cur 0}, move 5.
        let mut ranch = ranch_with(
            vec![
                pasture("P1", 10, 10, PastureStatus::Occupied),
                pasture("P2", 5, 0, PastureStatus::Available),
            ],
            0,
        );

        let outcome =
            rotate(&mut ranch, &id("P1"), &id("P2"), 5, Utc::now()).expect("rotation works");

        let p1 = ranch.pasture(&id("P1")).expect("present");
        let p2 = ranch.pasture(&id("P2")).expect("present");
        assert_eq!(p1.current_bovines, 5);
        assert_eq!(p2.current_bovines, 5);
        assert_eq!(p2.status, PastureStatus::Occupied);
        assert_eq!(outcome.from_remaining, 5);
        assert!(!outcome.from_now_resting);
    }

    #[test]
    fn test_vacated_source_enters_rest() {
        let mut ranch = ranch_with(
            vec![
                pasture("P1", 10, 4, PastureStatus::Occupied),
                pasture("P2", 20, 0, PastureStatus::Available),
            ],
            30,
        );
        let now = Utc::now();

        let outcome = rotate(&mut ranch, &id("P1"), &id("P2"), 4, now).expect("rotation works");

        let p1 = ranch.pasture(&id("P1")).expect("present");
        assert!(outcome.from_now_resting);
        assert_eq!(p1.status, PastureStatus::Resting);
        assert_eq!(p1.resting_since, Some(now));
    }

    #[test]
    fn test_over_rotation_fails_and_changes_nothing() {
        let mut ranch = ranch_with(
            vec![
                pasture("P1", 10, 3, PastureStatus::Occupied),
                pasture("P2", 20, 0, PastureStatus::Available),
            ],
            0,
        );

        let result = rotate(&mut ranch, &id("P1"), &id("P2"), 4, Utc::now());
        assert!(matches!(result, Err(Error::Validation { .. })));

        assert_eq!(ranch.pasture(&id("P1")).expect("present").current_bovines, 3);
        assert_eq!(ranch.pasture(&id("P2")).expect("present").current_bovines, 0);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut ranch = ranch_with(
            vec![
                pasture("P1", 10, 3, PastureStatus::Occupied),
                pasture("P2", 20, 0, PastureStatus::Available),
            ],
            0,
        );
        assert!(matches!(
            rotate(&mut ranch, &id("P1"), &id("P2"), 0, Utc::now()),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_capacity_overflow_fails_and_changes_nothing() {
        let mut ranch = ranch_with(
            vec![
                pasture("P1", 10, 8, PastureStatus::Occupied),
                pasture("P2", 5, 3, PastureStatus::Occupied),
            ],
            0,
        );

        let result = rotate(&mut ranch, &id("P1"), &id("P2"), 4, Utc::now());
        assert!(matches!(result, Err(Error::CapacityExceeded { .. })));

        assert_eq!(ranch.pasture(&id("P1")).expect("present").current_bovines, 8);
        assert_eq!(ranch.pasture(&id("P2")).expect("present").current_bovines, 3);
    }

    #[test]
    fn test_unknown_pasture_fails() {
        let mut ranch = ranch_with(vec![pasture("P1", 10, 8, PastureStatus::Occupied)], 0);
        assert!(matches!(
            rotate(&mut ranch, &id("P1"), &id("ghost"), 1, Utc::now()),
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(
            rotate(&mut ranch, &id("ghost"), &id("P1"), 1, Utc::now()),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_self_rotation_rejected() {
        let mut ranch = ranch_with(vec![pasture("P1", 10, 8, PastureStatus::Occupied)], 0);
        assert!(matches!(
            rotate(&mut ranch, &id("P1"), &id("P1"), 1, Utc::now()),
            Err(Error::Validation { .. })
        ));
    }

    #[test]
    fn test_resting_destination_blocks_until_rest_elapsed() {
        let now = Utc::now();
        let mut resting = pasture("P2", 20, 0, PastureStatus::Resting);
        resting.resting_since = Some(now - Duration::days(10));
        let mut ranch = ranch_with(
            vec![pasture("P1", 10, 8, PastureStatus::Occupied), resting],
            25,
        );

        let result = rotate(&mut ranch, &id("P1"), &id("P2"), 2, now);
        assert!(matches!(result, Err(Error::RestPeriodViolation { .. })));
        assert_eq!(ranch.pasture(&id("P2")).expect("present").current_bovines, 0);
    }

    #[test]
    fn test_resting_destination_accepts_after_rest_elapsed() {
        let now = Utc::now();
        let mut resting = pasture("P2", 20, 0, PastureStatus::Resting);
        resting.resting_since = Some(now - Duration::days(26));
        let mut ranch = ranch_with(
            vec![pasture("P1", 10, 8, PastureStatus::Occupied), resting],
            25,
        );

        rotate(&mut ranch, &id("P1"), &id("P2"), 2, now).expect("rest has elapsed");
        let p2 = ranch.pasture(&id("P2")).expect("present");
        assert_eq!(p2.current_bovines, 2);
        assert_eq!(p2.status, PastureStatus::Occupied);
        assert_eq!(p2.resting_since, None);
    }

    #[test]
    fn test_zero_rest_days_disables_rest_check() {
        let now = Utc::now();
        let mut resting = pasture("P2", 20, 0, PastureStatus::Resting);
        resting.resting_since = Some(now);
        let mut ranch = ranch_with(
            vec![pasture("P1", 10, 8, PastureStatus::Occupied), resting],
            0,
        );

        rotate(&mut ranch, &id("P1"), &id("P2"), 2, now).expect("rest check disabled");
    }

    #[test]
    fn test_round_trip_restores_occupancies() {
        let mut ranch = ranch_with(
            vec![
                pasture("P1", 10, 7, PastureStatus::Occupied),
                pasture("P2", 10, 2, PastureStatus::Occupied),
            ],
            0,
        );

        rotate(&mut ranch, &id("P1"), &id("P2"), 3, Utc::now()).expect("first leg");
        rotate(&mut ranch, &id("P2"), &id("P1"), 3, Utc::now()).expect("second leg");

        assert_eq!(ranch.pasture(&id("P1")).expect("present").current_bovines, 7);
        assert_eq!(ranch.pasture(&id("P2")).expect("present").current_bovines, 2);
    }
}
