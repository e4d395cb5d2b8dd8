//! Period lookup by date for one employee/category.
//!
//! Ledger regeneration walks a date range cycle by cycle. For any date this
//! module returns the period in force on that date, the assignment governing
//! it, and the validity date an addition at the period start would get.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{AssignmentHistory, Period, PeriodMode};

use super::PolicyPeriodEngine;

/// The period in force on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodInformation {
    /// Id of the policy active on the date.
    pub policy_id: String,
    /// Effective date of the active assignment.
    pub assignment_effective_at: NaiveDate,
    /// The period containing the date.
    pub period: Period,
    /// Expiry of an addition created at the period start.
    pub validity_date: Option<NaiveDate>,
}

/// Returns the period in force on `date`, or `None` before the first assignment.
pub fn period_information_for(
    history: &AssignmentHistory,
    date: NaiveDate,
    mode: PeriodMode,
) -> Option<PeriodInformation> {
    let engine = PolicyPeriodEngine::new(history, date, mode);
    let active = engine.active_assignment()?;
    let period = engine.current_policy_period()?;

    Some(PeriodInformation {
        policy_id: active.policy.id.clone(),
        assignment_effective_at: active.effective_at,
        validity_date: engine.validity_date_for(period.start),
        period,
    })
}

/// Returns the consecutive periods in force between `from` and `to` (exclusive).
///
/// Dates before the first assignment are skipped. The walk stops at an
/// open-ended period.
pub fn periods_between(
    history: &AssignmentHistory,
    from: NaiveDate,
    to: NaiveDate,
    mode: PeriodMode,
) -> Vec<PeriodInformation> {
    let mut periods = Vec::new();
    let mut cursor = match history.assignments().first() {
        Some(first) => from.max(first.effective_at),
        None => return periods,
    };

    while cursor < to {
        let Some(information) = period_information_for(history, cursor, mode) else {
            break;
        };
        let end = information.period.end;
        periods.push(information);

        match end {
            Some(end) if end > cursor => cursor = end,
            _ => break,
        }
    }

    periods
}
