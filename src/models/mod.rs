//! Core data models for the accrual engine.
//!
//! This module contains the policy, assignment, period and ledger types
//! shared by the calculators and the configuration layer.

mod assignment;
mod ledger_entry;
mod period;
mod period_report;
mod policy;

pub use assignment::{AssignmentHistory, PolicyAssignment};
pub use ledger_entry::{BalanceLedgerEntry, LedgerEntryKind};
pub use period::{Period, PeriodKind, PeriodMode};
pub use period_report::{PeriodBoundaries, PeriodReport};
pub use policy::{PolicyDefinition, PolicyType};
