//! Balance ledger entries.
//!
//! The ledger itself is owned by the caller. This module only describes the
//! shape of an entry so that cycle planning and recalculation windows can
//! produce and select them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What produced a ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEntryKind {
    /// Allowance granted at the start of a cycle.
    Addition,
    /// Offset of an addition at its validity date or at the period close.
    Removal,
    /// Balance consumed by a time-off request.
    TimeOff,
    /// Manual correction entered by an administrator.
    ManualAdjustment,
}

/// A single entry of an employee's time-off balance ledger.
///
/// # Example
///
/// ```
/// use accrual_engine::models::{BalanceLedgerEntry, LedgerEntryKind};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let addition = BalanceLedgerEntry::new(
///     "emp_001",
///     "vacation",
///     LedgerEntryKind::Addition,
///     Decimal::new(1440, 0),
///     NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
/// );
///
/// assert!(addition.is_addition());
/// assert_eq!(addition.validity_date, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceLedgerEntry {
    /// Unique identifier of the entry.
    pub id: Uuid,
    /// The employee owning the balance.
    pub employee_id: String,
    /// The time-off category of the balance.
    pub category_id: String,
    /// What produced the entry.
    pub kind: LedgerEntryKind,
    /// Signed amount, in the category's unit.
    pub amount: Decimal,
    /// The date the entry takes effect.
    pub effective_at: NaiveDate,
    /// Expiry date of an addition.
    #[serde(default)]
    pub validity_date: Option<NaiveDate>,
    /// For removals, the addition being offset.
    #[serde(default)]
    pub balance_credit_addition: Option<Uuid>,
}

impl BalanceLedgerEntry {
    /// Creates an entry with a fresh id and no validity or linkage.
    pub fn new(
        employee_id: impl Into<String>,
        category_id: impl Into<String>,
        kind: LedgerEntryKind,
        amount: Decimal,
        effective_at: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            employee_id: employee_id.into(),
            category_id: category_id.into(),
            kind,
            amount,
            effective_at,
            validity_date: None,
            balance_credit_addition: None,
        }
    }

    /// Returns true for cycle additions.
    pub fn is_addition(&self) -> bool {
        self.kind == LedgerEntryKind::Addition
    }

    /// Returns true for removals.
    pub fn is_removal(&self) -> bool {
        self.kind == LedgerEntryKind::Removal
    }

    /// Returns true if this entry removes the given addition.
    pub fn removes(&self, addition: &BalanceLedgerEntry) -> bool {
        self.is_removal() && self.balance_credit_addition == Some(addition.id)
    }
}
