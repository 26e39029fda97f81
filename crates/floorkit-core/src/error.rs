//! Error handling for Floorkit
//!
//! Provides shared error types for the core and canvas layers.
//! Interactive affordances (zoom clamping, empty selections, history
//! boundaries) are deliberately *not* errors - those are silent no-ops.
//! Errors here cover data problems: malformed documents, invalid legacy
//! records, serialization failures.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Core error type shared across Floorkit crates.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A legacy flat table record could not be converted.
    #[error("Invalid legacy record for table {table_id}: {reason}")]
    InvalidLegacyRecord {
        /// Identifier of the offending record.
        table_id: String,
        /// Why the record was rejected.
        reason: String,
    },

    /// A floor-plan document failed validation.
    #[error("Invalid floor plan {plan_id}: {reason}")]
    InvalidFloorPlan {
        /// Identifier of the offending document.
        plan_id: String,
        /// Why the document was rejected.
        reason: String,
    },

    /// A numeric field was not finite where a finite value is required.
    #[error("Non-finite value for {field}: {value}")]
    NonFiniteValue {
        /// The field name.
        field: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Generic core error.
    #[error("{message}")]
    Other {
        /// The error message.
        message: String,
    },
}

/// Convenience result alias using [`CoreError`].
pub type Result<T> = std::result::Result<T, CoreError>;
