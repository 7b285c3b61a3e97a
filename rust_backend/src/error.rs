//! Error types for tile selection and its collaborators.

use crate::models::TileId;

/// Result type for scheduler operations
pub type SchedulerResult<T> = Result<T, SchedulerError>;

/// Error type for scheduler operations.
///
/// Finding no eligible tile is not an error; it is reported as
/// [`crate::models::Selection::NoEligibleTile`].
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    #[error("Invalid selection context: {0}")]
    InvalidContext(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Service failure for tile {tile}: {source}")]
    Service {
        tile: TileId,
        #[source]
        source: ServiceError,
    },

    #[error("Unknown program: {0}")]
    UnknownProgram(String),
}

/// Error raised by an external collaborator (ephemeris, avoidance, airmass).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    #[error("Ephemeris unavailable: {0}")]
    EphemerisUnavailable(String),

    #[error("Epoch MJD {mjd} outside the supported range")]
    EpochOutOfRange { mjd: f64 },

    #[error("Internal service error: {0}")]
    Internal(String),
}
