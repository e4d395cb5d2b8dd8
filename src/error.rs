//! Error types for the accrual engine.
//!
//! Period math never fails: missing boundaries are reported as `None`.
//! The errors below cover the fallible edges of the crate, which are loading
//! configuration, validating policy definitions, and building assignment
//! histories.

use chrono::NaiveDate;
use thiserror::Error;

/// The main error type for the accrual engine.
///
/// # Example
///
/// ```
/// use accrual_engine::error::EngineError;
///
/// let error = EngineError::PolicyNotFound {
///     policy_id: "vacation_2x".to_string(),
/// };
/// assert_eq!(error.to_string(), "Policy not found: vacation_2x");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A policy id was referenced but is not part of the catalogue.
    #[error("Policy not found: {policy_id}")]
    PolicyNotFound {
        /// The policy id that was not found.
        policy_id: String,
    },

    /// A policy definition failed validation.
    #[error("Invalid policy '{policy_id}': {message}")]
    InvalidPolicy {
        /// The id of the invalid policy.
        policy_id: String,
        /// A description of what made the policy invalid.
        message: String,
    },

    /// Two assignments in the same employee/category share an effective date.
    #[error(
        "Duplicate assignment for employee '{employee_id}' in category '{category_id}' effective {effective_at}"
    )]
    DuplicateAssignment {
        /// The employee owning the history.
        employee_id: String,
        /// The time-off category of the history.
        category_id: String,
        /// The effective date used more than once.
        effective_at: NaiveDate,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
