//! # Floorkit Booking
//!
//! Table-conflict detection: given a candidate booking (time window and
//! party size) and the existing reservations, classifies every table on
//! the floor plan as selectable, time-conflicted, currently occupied,
//! or capacity-unsuitable.
//!
//! The detector is pure and stateless: it is recomputed from current
//! inputs on every call and never throws - reservations with missing
//! time data are treated as non-conflicting rather than erroring into
//! the caller's render path.

pub mod conflict;
pub mod reservation;

pub use conflict::{classify_table, classify_tables, windows_overlap, CandidateBooking, TableAvailability};
pub use reservation::{Reservation, ReservationStatus};
