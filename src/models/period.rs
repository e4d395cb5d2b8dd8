//! Computed policy periods.
//!
//! A [`Period`] is a half-open date range `[start, end)`. The end is absent
//! only for the open-ended periods that follow a reset policy with nothing
//! assigned after it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Names the three periods an engine exposes around its reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    /// The cycle before the current one.
    Previous,
    /// The cycle containing the reference date.
    Current,
    /// The cycle after the current one.
    Future,
}

impl std::fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodKind::Previous => write!(f, "previous"),
            PeriodKind::Current => write!(f, "current"),
            PeriodKind::Future => write!(f, "future"),
        }
    }
}

/// Selects how reset policies take part in period math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodMode {
    /// Every assignment is treated as a recurring cycle.
    Standard,
    /// Reset policies have no cycle; their only anchor is their effective date.
    #[default]
    ResetAware,
}

impl std::fmt::Display for PeriodMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodMode::Standard => write!(f, "standard"),
            PeriodMode::ResetAware => write!(f, "reset_aware"),
        }
    }
}

/// A half-open date range `[start, end)`.
///
/// # Example
///
/// ```
/// use accrual_engine::models::Period;
/// use chrono::NaiveDate;
///
/// let period = Period::new(
///     NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2017, 1, 1).unwrap(),
/// );
///
/// assert!(period.contains(NaiveDate::from_ymd_opt(2016, 1, 1).unwrap())); // start
/// assert!(period.contains(NaiveDate::from_ymd_opt(2016, 12, 31).unwrap()));
/// assert!(!period.contains(NaiveDate::from_ymd_opt(2017, 1, 1).unwrap())); // end is excluded
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// First day of the period (inclusive).
    pub start: NaiveDate,
    /// Day after the last day of the period (exclusive); `None` when open-ended.
    pub end: Option<NaiveDate>,
}

impl Period {
    /// Creates a bounded period.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end: Some(end),
        }
    }

    /// Creates a period with no end.
    pub fn open_ended(start: NaiveDate) -> Self {
        Self { start, end: None }
    }

    /// Returns true if the period has no end.
    pub fn is_open_ended(&self) -> bool {
        self.end.is_none()
    }

    /// Returns true if no date falls into the period.
    pub fn is_empty(&self) -> bool {
        self.end.is_some_and(|end| end <= self.start)
    }

    /// Checks if a date falls within `[start, end)`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && self.end.is_none_or(|end| date < end)
    }

    /// Returns the last day inside the period, if bounded and non-empty.
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.end
            .filter(|end| *end > self.start)
            .and_then(|end| end.pred_opt())
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}...{}", self.start, end),
            None => write!(f, "{}...", self.start),
        }
    }
}
