//! Business errors raised when agency rules reject an operation.
//!
//! Every variant carries a stable, human-readable message that is safe to
//! return to a caller. These errors are expected outcomes: they are never
//! retried and never logged as failures.
//!
//! # Examples
//!
//! ```
//! use spycats::domain::error::DomainError;
//! use spycats::domain::mission::validate_target_count;
//!
//! assert!(matches!(
//!     validate_target_count(4),
//!     Err(DomainError::InvalidTargetCount { count: 4 })
//! ));
//! ```

use thiserror::Error;

/// Action named in [`DomainError::MissionCompleted`] when adding a target.
pub const ADD_TARGET: &str = "add target to";

/// Action named in [`DomainError::MissionCompleted`] when editing notes.
pub const UPDATE_TARGET: &str = "update target in";

/// Errors that occur when agency invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No live spy cat has the requested id.
    #[error("spy cat not found")]
    SpyCatNotFound,

    /// The breed is not in the breed catalog.
    #[error("invalid breed")]
    InvalidBreed {
        /// The rejected breed name.
        breed: String,
    },

    /// Years of experience must be at least one.
    #[error("years of experience must be greater than 0")]
    NonPositiveExperience,

    /// Salary must be strictly positive.
    #[error("salary must be greater than 0")]
    NonPositiveSalary,

    /// A required text field was empty.
    #[error("{field} cannot be empty")]
    EmptyField {
        /// Name of the empty field.
        field: &'static str,
    },

    /// No live mission has the requested id.
    #[error("mission not found")]
    MissionNotFound,

    /// Missions are created with one to three targets.
    #[error("mission must have between 1 and 3 targets")]
    InvalidTargetCount {
        /// The number of targets supplied.
        count: usize,
    },

    /// Assigned missions cannot be deleted.
    #[error("cannot delete mission assigned to a cat")]
    AssignedToCat,

    /// The mission already has a cat.
    #[error("mission already has an assigned cat")]
    AlreadyAssigned,

    /// The cat already has a mission.
    #[error("spy cat is already assigned to a mission")]
    CatBusy,

    /// The mission (or the target itself) is completed and frozen.
    #[error("cannot {action} completed mission")]
    MissionCompleted {
        /// What was attempted, see [`ADD_TARGET`] and [`UPDATE_TARGET`].
        action: &'static str,
    },

    /// The mission already holds the maximum number of targets.
    #[error("mission cannot have more than 3 targets")]
    TooManyTargets,

    /// No live target has the requested id.
    #[error("target not found")]
    TargetNotFound,

    /// Completed targets cannot be deleted.
    #[error("cannot delete completed target")]
    TargetCompleted,
}
