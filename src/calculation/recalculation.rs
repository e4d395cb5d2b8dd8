//! Ledger recalculation windows after an assignment change.
//!
//! When a policy assignment is created, moved to another date, or destroyed,
//! every ledger entry from the start of the earliest affected cycle up to the
//! next untouched assignment has to be regenerated. This module computes that
//! window `[starting_date, ending_date)` and selects the entries inside it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{AssignmentHistory, BalanceLedgerEntry, Period, PeriodMode};

use super::PolicyPeriodEngine;

/// An edit to one policy assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "snake_case")]
pub enum AssignmentChange {
    /// A new assignment was added.
    Created {
        /// Effective date of the new assignment.
        effective_at: NaiveDate,
    },
    /// An assignment's effective date was corrected.
    Moved {
        /// The old effective date.
        from: NaiveDate,
        /// The new effective date.
        to: NaiveDate,
    },
    /// An assignment was removed.
    Destroyed {
        /// Effective date of the removed assignment.
        effective_at: NaiveDate,
    },
}

impl AssignmentChange {
    /// Returns the earliest date touched by the change.
    pub fn earliest_date(&self) -> NaiveDate {
        match *self {
            AssignmentChange::Created { effective_at }
            | AssignmentChange::Destroyed { effective_at } => effective_at,
            AssignmentChange::Moved { from, to } => from.min(to),
        }
    }

    /// Returns the latest date touched by the change.
    pub fn latest_date(&self) -> NaiveDate {
        match *self {
            AssignmentChange::Created { effective_at }
            | AssignmentChange::Destroyed { effective_at } => effective_at,
            AssignmentChange::Moved { from, to } => from.max(to),
        }
    }
}

/// The ledger range to regenerate after an assignment change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecalculationWindow {
    /// The employee whose ledger is affected.
    pub employee_id: String,
    /// The time-off category whose ledger is affected.
    pub category_id: String,
    /// First date to regenerate (inclusive).
    pub starting_date: NaiveDate,
    /// First date left untouched; `None` means up to the end of the ledger.
    pub ending_date: Option<NaiveDate>,
}

impl RecalculationWindow {
    /// Returns the window as a period.
    pub fn as_period(&self) -> Period {
        Period {
            start: self.starting_date,
            end: self.ending_date,
        }
    }

    /// Checks if a date falls within the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.as_period().contains(date)
    }

    /// Selects the ledger entries of this employee and category inside the window.
    pub fn entries_to_recalculate<'e>(
        &self,
        entries: &'e [BalanceLedgerEntry],
    ) -> Vec<&'e BalanceLedgerEntry> {
        entries
            .iter()
            .filter(|entry| {
                entry.employee_id == self.employee_id
                    && entry.category_id == self.category_id
                    && self.contains(entry.effective_at)
            })
            .collect()
    }
}

/// Computes the recalculation window for `change`.
///
/// `before` and `after` are the same employee/category history on either
/// side of the change. The window starts at the earliest cycle start that
/// contains a changed date in either history, or at the changed date itself
/// when no policy was active then. It ends at the first assignment of
/// `after` that starts after the latest changed date.
pub fn recalculation_window(
    before: &AssignmentHistory,
    after: &AssignmentHistory,
    change: AssignmentChange,
    mode: PeriodMode,
) -> RecalculationWindow {
    let earliest = change.earliest_date();

    let starting_date = [before, after]
        .into_iter()
        .filter_map(|history| PolicyPeriodEngine::new(history, earliest, mode).current_start_date())
        .fold(earliest, NaiveDate::min);

    let ending_date = after
        .first_after(change.latest_date())
        .map(|assignment| assignment.effective_at);

    let window = RecalculationWindow {
        employee_id: after.employee_id().to_string(),
        category_id: after.category_id().to_string(),
        starting_date,
        ending_date,
    };

    info!(
        employee_id = %window.employee_id,
        category_id = %window.category_id,
        change = ?change,
        starting_date = %window.starting_date,
        ending_date = ?window.ending_date,
        "Computed ledger recalculation window"
    );

    window
}
