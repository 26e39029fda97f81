//! Reservation facts supplied by the booking system. Read-only input
//! to the conflict detector.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use floorkit_canvas::ObjectId;
use floorkit_core::constants;

/// Lifecycle state of a reservation.
///
/// The states from `Arrived` through `Payment` mean the party is
/// physically at the table right now; see
/// [`ReservationStatus::is_active_occupancy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Arrived,
    Seated,
    Ordered,
    Appetizers,
    MainCourse,
    Dessert,
    Payment,
    Completed,
    Cancelled,
    NoShow,
}

impl ReservationStatus {
    /// Whether this status means the table is physically in use right
    /// now, independent of the scheduled time window.
    pub fn is_active_occupancy(&self) -> bool {
        matches!(
            self,
            Self::Arrived
                | Self::Seated
                | Self::Ordered
                | Self::Appetizers
                | Self::MainCourse
                | Self::Dessert
                | Self::Payment
        )
    }

    /// Whether this reservation still claims its time window.
    /// Cancelled and no-show bookings hold no claim.
    pub fn holds_time_window(&self) -> bool {
        !matches!(self, Self::Cancelled | Self::NoShow | Self::Completed)
    }
}

/// An existing booking: a time window, a party size and the tables it
/// is assigned to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub table_ids: Vec<ObjectId>,
    /// Scheduled start. `None` when the upstream record is missing its
    /// time data; such reservations never conflict.
    pub start: Option<DateTime<Utc>>,
    /// Expected table turn time in minutes.
    pub turn_minutes: i64,
    pub party_size: u32,
    pub status: ReservationStatus,
}

impl Reservation {
    /// Scheduled end: start plus the turn time. `None` without a start.
    pub fn end(&self) -> Option<DateTime<Utc>> {
        self.start
            .map(|start| start + Duration::minutes(self.turn_minutes))
    }

    /// Whether this reservation is assigned to the given table.
    pub fn is_assigned_to(&self, table_id: &ObjectId) -> bool {
        self.table_ids.iter().any(|id| id == table_id)
    }
}

impl Default for Reservation {
    fn default() -> Self {
        Self {
            id: String::new(),
            table_ids: Vec::new(),
            start: None,
            turn_minutes: constants::DEFAULT_TURN_MINUTES,
            party_size: 2,
            status: ReservationStatus::Confirmed,
        }
    }
}
