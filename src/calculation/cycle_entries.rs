//! Ledger entry planning for the current cycle.
//!
//! Given an engine, this module decides which ledger entries the current
//! period needs: an addition at the period start and, depending on the
//! policy type, a removal that offsets it.
//!
//! - Balancer with an end date: removal at the addition's validity date.
//! - Balancer without an end date: no removal, the addition never expires.
//! - Counter: removal at the period close (the next start date).
//!
//! Removal amounts are left at zero; the ledger resolves them when balances
//! are recalculated.

use rust_decimal::Decimal;
use tracing::info;

use crate::models::{BalanceLedgerEntry, LedgerEntryKind, Period};

use super::PolicyPeriodEngine;

/// The entries the current cycle needs in the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleEntryPlan {
    /// The period the entries belong to.
    pub period: Period,
    /// Allowance granted at the period start.
    pub addition: BalanceLedgerEntry,
    /// Offset of the addition, linked through `balance_credit_addition`.
    pub removal: Option<BalanceLedgerEntry>,
}

/// Plans the addition and removal for the current period of `engine`.
///
/// Returns `None` when there is no current period or the active policy is
/// handled as a reset.
pub fn plan_cycle_entries(
    engine: &PolicyPeriodEngine<'_>,
    amount: Decimal,
) -> Option<CycleEntryPlan> {
    let active = engine.active_assignment()?;
    if engine.treats_as_reset(active) {
        return None;
    }

    let period = engine.current_policy_period()?;
    let history = engine.history();

    let mut addition = BalanceLedgerEntry::new(
        history.employee_id(),
        history.category_id(),
        LedgerEntryKind::Addition,
        amount,
        period.start,
    );
    addition.validity_date = engine.validity_date_for(period.start);

    let removal_date = if active.policy.is_counter() {
        period.end
    } else {
        addition.validity_date
    };

    let removal = removal_date.map(|effective_at| {
        let mut removal = BalanceLedgerEntry::new(
            history.employee_id(),
            history.category_id(),
            LedgerEntryKind::Removal,
            Decimal::ZERO,
            effective_at,
        );
        removal.balance_credit_addition = Some(addition.id);
        removal
    });

    info!(
        employee_id = %history.employee_id(),
        category_id = %history.category_id(),
        policy_id = %active.policy.id,
        policy_type = %active.policy.policy_type,
        period = %period,
        addition_at = %addition.effective_at,
        removal_at = ?removal.as_ref().map(|r| r.effective_at),
        "Planned cycle ledger entries"
    );

    Some(CycleEntryPlan {
        period,
        addition,
        removal,
    })
}
