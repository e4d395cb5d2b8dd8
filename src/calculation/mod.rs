//! Period calculation for the accrual engine.
//!
//! This module contains the cycle arithmetic for a single policy assignment,
//! the resolution of related assignments around a reference date, the
//! composed period engine, and the ledger-facing operations built on it:
//! period reports, cycle entry planning, period lookup by date and
//! recalculation windows.

mod calendar;
mod cycle_entries;
mod period_calculator;
mod period_information;
mod policy_period;
mod recalculation;
mod related_policies;
mod report;

pub use cycle_entries::{CycleEntryPlan, plan_cycle_entries};
pub use period_calculator::PeriodCalculator;
pub use period_information::{PeriodInformation, period_information_for, periods_between};
pub use policy_period::PolicyPeriodEngine;
pub use recalculation::{AssignmentChange, RecalculationWindow, recalculation_window};
pub use related_policies::{
    PREVIOUS_LOOKBACK, RelatedPolicies, RelatedPolicyResolver, UPCOMING_LOOKAHEAD,
};
pub use report::build_period_report;
