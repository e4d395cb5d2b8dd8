//! Time-off policy definitions.
//!
//! A [`PolicyDefinition`] describes a recurring accrual cycle: an annual
//! anchor (start day/month), an optional validity offset (end day/month),
//! the number of years a cycle lasts, and whether balances count up or
//! expire.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// How balances accrued under a policy behave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyType {
    /// Tracks time taken; balances never expire and close at period end.
    Counter,
    /// Grants an allowance whose additions may expire on a validity date.
    Balancer,
}

impl std::fmt::Display for PolicyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyType::Counter => write!(f, "counter"),
            PolicyType::Balancer => write!(f, "balancer"),
        }
    }
}

/// An immutable description of a recurring time-off policy.
///
/// # Example
///
/// ```
/// use accrual_engine::models::{PolicyDefinition, PolicyType};
///
/// let policy = PolicyDefinition {
///     id: "vacation".to_string(),
///     name: "Vacation".to_string(),
///     policy_type: PolicyType::Balancer,
///     start_day: 1,
///     start_month: 1,
///     end_day: Some(1),
///     end_month: Some(4),
///     years_to_effect: 0,
///     reset: false,
/// };
///
/// assert!(policy.validate().is_ok());
/// assert_eq!(policy.policy_length(), 1);
/// assert!(policy.has_end_date());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDefinition {
    /// Unique identifier of the policy.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Counter or balancer.
    pub policy_type: PolicyType,
    /// Day of the annual anchor.
    pub start_day: u32,
    /// Month of the annual anchor.
    pub start_month: u32,
    /// Day of the validity offset.
    #[serde(default)]
    pub end_day: Option<u32>,
    /// Month of the validity offset.
    #[serde(default)]
    pub end_month: Option<u32>,
    /// Years a cycle lasts; zero behaves like one.
    #[serde(default)]
    pub years_to_effect: u32,
    /// Reset policies carry no recurring cycle.
    #[serde(default)]
    pub reset: bool,
}

impl PolicyDefinition {
    /// Returns the cycle length in years, `max(years_to_effect, 1)`.
    pub fn policy_length(&self) -> u32 {
        self.years_to_effect.max(1)
    }

    /// Returns the validity offset when both end day and end month are set.
    pub fn end_anchor(&self) -> Option<(u32, u32)> {
        match (self.end_month, self.end_day) {
            (Some(month), Some(day)) => Some((month, day)),
            _ => None,
        }
    }

    /// Returns true if additions under this policy carry a validity date.
    pub fn has_end_date(&self) -> bool {
        self.end_anchor().is_some()
    }

    /// Returns true for counter policies.
    pub fn is_counter(&self) -> bool {
        self.policy_type == PolicyType::Counter
    }

    /// Checks that the anchors name real calendar days.
    ///
    /// February 29 is accepted; in common years it falls back to
    /// February 28 when a date is built from it.
    pub fn validate(&self) -> EngineResult<()> {
        self.check_day_month("start", self.start_month, self.start_day)?;

        match (self.end_month, self.end_day) {
            (Some(month), Some(day)) => self.check_day_month("end", month, day),
            (None, None) => Ok(()),
            _ => Err(self.invalid("end_day and end_month must be set together")),
        }
    }

    fn check_day_month(&self, prefix: &str, month: u32, day: u32) -> EngineResult<()> {
        if !(1..=12).contains(&month) {
            return Err(self.invalid(format!("{prefix}_month must be between 1 and 12")));
        }
        // 2000 is a leap year, so February 29 is accepted here.
        if NaiveDate::from_ymd_opt(2000, month, day).is_none() {
            return Err(self.invalid(format!(
                "{prefix}_day {day} does not exist in month {month}"
            )));
        }
        Ok(())
    }

    fn invalid(&self, message: impl Into<String>) -> EngineError {
        EngineError::InvalidPolicy {
            policy_id: self.id.clone(),
            message: message.into(),
        }
    }
}
