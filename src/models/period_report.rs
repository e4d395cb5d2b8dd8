//! Period report model.
//!
//! This module contains the [`PeriodReport`] type, a serializable snapshot of
//! every boundary and period an engine computed for one employee and
//! category at a reference date.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Period, PeriodMode};

/// The four period boundaries around a reference date.
///
/// Each boundary is absent when there is not enough history to compute it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodBoundaries {
    /// Start of the previous period.
    pub previous_start_date: Option<NaiveDate>,
    /// Start of the current period.
    pub current_start_date: Option<NaiveDate>,
    /// Start of the next period (end of the current one).
    pub next_start_date: Option<NaiveDate>,
    /// Start of the period after the next one.
    pub future_start_date: Option<NaiveDate>,
}

impl PeriodBoundaries {
    /// Returns true if every defined boundary is no earlier than the one before it.
    pub fn is_monotonic(&self) -> bool {
        let defined: Vec<NaiveDate> = [
            self.previous_start_date,
            self.current_start_date,
            self.next_start_date,
            self.future_start_date,
        ]
        .into_iter()
        .flatten()
        .collect();

        defined.windows(2).all(|pair| pair[0] <= pair[1])
    }
}

/// A snapshot of the periods computed for one employee and category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodReport {
    /// Unique identifier of this report.
    pub report_id: Uuid,
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Version of the engine that produced the report.
    pub engine_version: String,
    /// The employee the report is about.
    pub employee_id: String,
    /// The time-off category the report is about.
    pub category_id: String,
    /// The date the periods were computed for.
    pub reference_date: NaiveDate,
    /// How reset policies were treated.
    pub mode: PeriodMode,
    /// Id of the policy active on the reference date.
    pub active_policy_id: Option<String>,
    /// The four period boundaries.
    pub boundaries: PeriodBoundaries,
    /// `[previous_start, current_start)`.
    pub previous_policy_period: Option<Period>,
    /// `[current_start, next_start)`.
    pub current_policy_period: Option<Period>,
    /// `[next_start, future_start)`.
    pub future_policy_period: Option<Period>,
    /// Validity date for an addition created at the current start.
    pub current_validity_date: Option<NaiveDate>,
}
