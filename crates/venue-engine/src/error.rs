//! Error types for venue-engine operations.

use thiserror::Error;

use crate::tenant::TenantClass;

/// Errors produced by parsing, expansion and the role store.
///
/// The set is closed: callers match on the variant instead of inspecting
/// messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VenueError {
    /// A wall-clock time was not `HH:MM` in `00:00..=23:59` (or `24:00` as an end).
    #[error("Invalid time format: {0}")]
    InvalidTimeFormat(String),

    /// A calendar date was not `YYYY-MM-DD`.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid RRULE: {0}")]
    InvalidRule(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// A demo identity touched real data, or the other way round.
    #[error("Tenant mismatch: {actor} identity cannot access {resource} data")]
    TenantMismatch {
        actor: TenantClass,
        resource: TenantClass,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, VenueError>;
