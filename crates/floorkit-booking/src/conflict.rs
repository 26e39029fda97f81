//! Per-table availability classification for a candidate booking.
//!
//! Overlap reasoning uses half-open intervals `[start, end)`: two
//! windows that merely touch at an endpoint (a 18:00-20:00 booking and
//! a 20:00-22:00 booking) do not conflict. Comparing instants rather
//! than clock times makes overnight windows work without special
//! casing.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use floorkit_canvas::{FloorObject, ObjectId};
use floorkit_core::constants;

use crate::reservation::Reservation;

/// The booking being placed: the window to test every table against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateBooking {
    /// When editing an existing reservation, its id; that reservation
    /// is not "other" and never conflicts with itself.
    pub reservation_id: Option<String>,
    pub start: DateTime<Utc>,
    pub turn_minutes: i64,
    pub party_size: u32,
}

impl CandidateBooking {
    /// A new candidate with the default turn time.
    pub fn new(start: DateTime<Utc>, party_size: u32) -> Self {
        Self {
            reservation_id: None,
            start,
            turn_minutes: constants::DEFAULT_TURN_MINUTES,
            party_size,
        }
    }

    /// End of the candidate window.
    pub fn end(&self) -> DateTime<Utc> {
        self.start + Duration::minutes(self.turn_minutes)
    }
}

/// Classification of one table against a candidate booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableAvailability {
    pub table_id: ObjectId,
    /// Another reservation's window overlaps the candidate window.
    pub conflicting_booking: bool,
    /// A party is physically at the table right now, independent of
    /// any time window.
    pub currently_occupied: bool,
    /// `!conflicting_booking && !currently_occupied`.
    pub can_be_selected: bool,
    /// The table seats the party. Advisory highlight only: an
    /// unsuitable-but-available table stays selectable.
    pub is_suitable: bool,
}

/// Half-open interval overlap: `[s1, e1)` and `[s2, e2)` overlap iff
/// `s1 < e2 && s2 < e1`. Symmetric; touching endpoints do not overlap.
pub fn windows_overlap(
    s1: DateTime<Utc>,
    e1: DateTime<Utc>,
    s2: DateTime<Utc>,
    e2: DateTime<Utc>,
) -> bool {
    s1 < e2 && s2 < e1
}

/// Classifies one table against the candidate booking.
pub fn classify_table(
    table: &FloorObject,
    reservations: &[Reservation],
    candidate: &CandidateBooking,
) -> TableAvailability {
    let booking_end = candidate.end();

    let mut conflicting_booking = false;
    let mut currently_occupied = false;

    for reservation in reservations {
        if !reservation.is_assigned_to(&table.id) {
            continue;
        }
        // The reservation being edited is not "other".
        if candidate.reservation_id.as_deref() == Some(reservation.id.as_str()) {
            continue;
        }

        // A live occupancy always wins over a scheduled one.
        if reservation.status.is_active_occupancy() {
            currently_occupied = true;
        }

        if reservation.status.holds_time_window() {
            // Missing time data: no classification basis, treated as
            // non-conflicting.
            if let (Some(start), Some(end)) = (reservation.start, reservation.end()) {
                if windows_overlap(candidate.start, booking_end, start, end) {
                    conflicting_booking = true;
                }
            }
        }
    }

    let is_suitable = table
        .table()
        .is_some_and(|attrs| attrs.capacity() >= candidate.party_size);

    TableAvailability {
        table_id: table.id.clone(),
        conflicting_booking,
        currently_occupied,
        can_be_selected: !conflicting_booking && !currently_occupied,
        is_suitable,
    }
}

/// Classifies every table in the list. Non-table objects are skipped.
pub fn classify_tables(
    tables: &[FloorObject],
    reservations: &[Reservation],
    candidate: &CandidateBooking,
) -> Vec<TableAvailability> {
    let result: Vec<TableAvailability> = tables
        .iter()
        .filter(|object| object.kind.is_table())
        .map(|table| classify_table(table, reservations, candidate))
        .collect();
    tracing::trace!(
        tables = result.len(),
        selectable = result.iter().filter(|t| t.can_be_selected).count(),
        "tables classified"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservation::ReservationStatus;
    use chrono::TimeZone;
    use floorkit_canvas::{ObjectKind, ObjectMetadata, TableAttrs};
    use floorkit_core::{GridPoint, GridSize};

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, h, m, 0).unwrap()
    }

    fn table(id: &str, max_seats: u32) -> FloorObject {
        FloorObject {
            id: ObjectId::new(id),
            kind: ObjectKind::Table(TableAttrs {
                max_seats,
                ..TableAttrs::default()
            }),
            position: GridPoint::new(0.0, 0.0),
            size: GridSize::new(3.0, 3.0),
            rotation: 0.0,
            z_index: 0,
            metadata: ObjectMetadata::created_at(at(0, 0), None),
        }
    }

    fn reservation(id: &str, table_id: &str, start: DateTime<Utc>, minutes: i64) -> Reservation {
        Reservation {
            id: id.to_string(),
            table_ids: vec![ObjectId::new(table_id)],
            start: Some(start),
            turn_minutes: minutes,
            party_size: 2,
            status: ReservationStatus::Confirmed,
        }
    }

    #[test]
    fn touching_windows_do_not_overlap() {
        // [18:00, 20:00) vs [20:00, 22:00): back to back, no conflict.
        assert!(!windows_overlap(at(18, 0), at(20, 0), at(20, 0), at(22, 0)));
        // [18:00, 20:00) vs [19:00, 21:00): one hour shared, conflict.
        assert!(windows_overlap(at(18, 0), at(20, 0), at(19, 0), at(21, 0)));
    }

    #[test]
    fn overlap_is_symmetric() {
        assert_eq!(
            windows_overlap(at(18, 0), at(20, 0), at(19, 0), at(21, 0)),
            windows_overlap(at(19, 0), at(21, 0), at(18, 0), at(20, 0)),
        );
    }

    #[test]
    fn overnight_windows_compare_as_instants() {
        // 23:00-01:00 the next day against 00:30-02:30.
        let late_start = at(23, 0);
        let late_end = late_start + Duration::minutes(120);
        let early = Utc.with_ymd_and_hms(2025, 6, 2, 0, 30, 0).unwrap();
        assert!(windows_overlap(
            late_start,
            late_end,
            early,
            early + Duration::minutes(120)
        ));
    }

    #[test]
    fn back_to_back_booking_is_selectable() {
        let t = table("t1", 4);
        let existing = vec![reservation("r1", "t1", at(18, 0), 120)];
        let candidate = CandidateBooking::new(at(20, 0), 2);

        let result = classify_table(&t, &existing, &candidate);
        assert!(!result.conflicting_booking);
        assert!(result.can_be_selected);
    }

    #[test]
    fn overlapping_booking_conflicts() {
        let t = table("t1", 4);
        let existing = vec![reservation("r1", "t1", at(19, 0), 120)];
        let candidate = CandidateBooking::new(at(18, 0), 2);

        let result = classify_table(&t, &existing, &candidate);
        assert!(result.conflicting_booking);
        assert!(!result.can_be_selected);
    }

    #[test]
    fn active_occupancy_blocks_regardless_of_window() {
        let t = table("t1", 4);
        // Seated party whose scheduled window ended hours ago.
        let mut lingering = reservation("r1", "t1", at(11, 0), 60);
        lingering.status = ReservationStatus::MainCourse;
        let candidate = CandidateBooking::new(at(20, 0), 2);

        let result = classify_table(&t, &[lingering], &candidate);
        assert!(result.currently_occupied);
        assert!(!result.can_be_selected);
        assert!(!result.conflicting_booking);
    }

    #[test]
    fn cancelled_bookings_release_their_window() {
        let t = table("t1", 4);
        let mut cancelled = reservation("r1", "t1", at(19, 0), 120);
        cancelled.status = ReservationStatus::Cancelled;
        let candidate = CandidateBooking::new(at(18, 0), 2);

        let result = classify_table(&t, &[cancelled], &candidate);
        assert!(result.can_be_selected);
    }

    #[test]
    fn reservations_on_other_tables_are_ignored() {
        let t = table("t1", 4);
        let existing = vec![reservation("r1", "t2", at(19, 0), 120)];
        let candidate = CandidateBooking::new(at(18, 0), 2);

        assert!(classify_table(&t, &existing, &candidate).can_be_selected);
    }

    #[test]
    fn editing_a_reservation_does_not_conflict_with_itself() {
        let t = table("t1", 4);
        let existing = vec![reservation("r1", "t1", at(19, 0), 120)];
        let candidate = CandidateBooking {
            reservation_id: Some("r1".to_string()),
            start: at(19, 30),
            turn_minutes: 120,
            party_size: 2,
        };

        assert!(classify_table(&t, &existing, &candidate).can_be_selected);
    }

    #[test]
    fn missing_time_data_is_non_conflicting() {
        let t = table("t1", 4);
        let timeless = Reservation {
            id: "r1".to_string(),
            table_ids: vec![ObjectId::new("t1")],
            start: None,
            ..Reservation::default()
        };
        let candidate = CandidateBooking::new(at(18, 0), 2);

        let result = classify_table(&t, &[timeless], &candidate);
        assert!(!result.conflicting_booking);
        assert!(result.can_be_selected);
    }

    #[test]
    fn unsuitable_table_remains_selectable() {
        let t = table("t1", 4);
        let candidate = CandidateBooking::new(at(18, 0), 6);

        let result = classify_table(&t, &[], &candidate);
        assert!(!result.is_suitable);
        assert!(result.can_be_selected);
    }

    #[test]
    fn classify_tables_skips_non_table_objects() {
        let mut wall = table("w1", 0);
        wall.kind = ObjectKind::Wall;
        let tables = vec![table("t1", 4), wall, table("t2", 8)];
        let candidate = CandidateBooking::new(at(18, 0), 2);

        let results = classify_tables(&tables, &[], &candidate);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.can_be_selected));
    }

    #[test]
    fn default_turn_time_is_two_hours() {
        let candidate = CandidateBooking::new(at(18, 0), 2);
        assert_eq!(candidate.end(), at(20, 0));
    }
}
