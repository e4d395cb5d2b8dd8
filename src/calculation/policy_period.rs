//! Policy period engine.
//!
//! The [`PolicyPeriodEngine`] is the primary query object: for one
//! employee/category history and a reference date it produces the previous,
//! current and future policy periods, and the four boundary dates they are
//! built from.
//!
//! Boundaries are driven by two sources that can disagree: the natural cycle
//! of the active policy, and the dates at which neighbouring assignments take
//! over. Where both produce a candidate, the earlier one wins.
//!
//! In [`PeriodMode::ResetAware`] a reset policy has no cycle; its only anchor
//! is its `effective_at`. In [`PeriodMode::Standard`] every assignment is
//! treated as a recurring cycle.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::{
    AssignmentHistory, Period, PeriodBoundaries, PeriodKind, PeriodMode, PeriodReport,
    PolicyAssignment,
};

use super::calendar::add_years;
use super::{PeriodCalculator, RelatedPolicies, RelatedPolicyResolver};

/// Computes policy periods around a reference date.
///
/// Related assignments are resolved once, at construction.
///
/// # Example
///
/// ```
/// use accrual_engine::calculation::PolicyPeriodEngine;
/// use accrual_engine::models::{
///     AssignmentHistory, Period, PeriodMode, PolicyAssignment, PolicyDefinition, PolicyType,
/// };
/// use chrono::NaiveDate;
///
/// let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// let policy = PolicyDefinition {
///     id: "vacation".to_string(),
///     name: "Vacation".to_string(),
///     policy_type: PolicyType::Balancer,
///     start_day: 1,
///     start_month: 1,
///     end_day: None,
///     end_month: None,
///     years_to_effect: 0,
///     reset: false,
/// };
/// let history = AssignmentHistory::new(
///     "emp_001",
///     "vacation",
///     vec![PolicyAssignment::new(policy, date(2014, 1, 1))],
/// )
/// .unwrap();
///
/// let engine = PolicyPeriodEngine::new(&history, date(2016, 1, 1), PeriodMode::Standard);
/// assert_eq!(
///     engine.current_policy_period(),
///     Some(Period::new(date(2016, 1, 1), date(2017, 1, 1)))
/// );
/// assert_eq!(
///     engine.previous_policy_period(),
///     Some(Period::new(date(2015, 1, 1), date(2016, 1, 1)))
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PolicyPeriodEngine<'a> {
    history: &'a AssignmentHistory,
    related: RelatedPolicies<'a>,
    reference_date: NaiveDate,
    mode: PeriodMode,
}

impl<'a> PolicyPeriodEngine<'a> {
    /// Creates an engine for `history` evaluated at `reference_date`.
    pub fn new(
        history: &'a AssignmentHistory,
        reference_date: NaiveDate,
        mode: PeriodMode,
    ) -> Self {
        let related = RelatedPolicyResolver::new(history).resolve(reference_date);

        debug!(
            employee_id = %history.employee_id(),
            category_id = %history.category_id(),
            reference_date = %reference_date,
            mode = %mode,
            active = ?related.active.map(|a| a.effective_at),
            previous = ?related.previous.map(|a| a.effective_at),
            next = ?related.next.map(|a| a.effective_at),
            future = ?related.future.map(|a| a.effective_at),
            "Resolved related policy assignments"
        );

        Self {
            history,
            related,
            reference_date,
            mode,
        }
    }

    /// Returns the history the engine was built from.
    pub fn history(&self) -> &'a AssignmentHistory {
        self.history
    }

    /// Returns the date the periods are computed for.
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
    }

    /// Returns the mode the engine was built with.
    pub fn mode(&self) -> PeriodMode {
        self.mode
    }

    /// Returns the assignments around the reference date.
    pub fn related(&self) -> &RelatedPolicies<'a> {
        &self.related
    }

    /// Returns the assignment active on the reference date.
    pub fn active_assignment(&self) -> Option<&'a PolicyAssignment> {
        self.related.active
    }

    /// Start of the period containing the reference date.
    ///
    /// While the active policy has not reached its first anniversary and an
    /// earlier assignment exists, the earlier assignment's cycle still
    /// governs.
    pub fn current_start_date(&self) -> Option<NaiveDate> {
        let active = self.related.active?;
        if self.treats_as_reset(active) {
            return Some(active.effective_at);
        }

        let calculator = PeriodCalculator::for_assignment(active);
        match self.related.previous {
            Some(previous) if calculator.first_start_date()? > self.reference_date => {
                self.anchor_on_or_before(previous, self.reference_date)
            }
            _ => calculator.last_start_date(self.reference_date),
        }
    }

    /// Start of the period before the current one.
    ///
    /// When the active assignment took effect after its own computed previous
    /// start, the previous assignment's last anchor before the switch is used
    /// instead. In reset-aware mode a reset active policy always defers to the
    /// previous assignment, and has no previous start without one.
    pub fn previous_start_date(&self) -> Option<NaiveDate> {
        let active = self.related.active?;
        if self.treats_as_reset(active) {
            let previous = self.related.previous?;
            return self.anchor_before(previous, active.effective_at);
        }

        let computed =
            PeriodCalculator::for_assignment(active).previous_start_date(self.reference_date)?;
        match self.related.previous {
            Some(previous) if active.effective_at > computed => {
                self.anchor_before(previous, active.effective_at)
            }
            _ => Some(computed),
        }
    }

    /// Start of the period after the current one.
    ///
    /// The earlier of the active cycle's end and the next assignment's first
    /// anchor. After a reset active policy it is simply the next assignment's
    /// `effective_at`, and absent if nothing follows.
    pub fn next_start_date(&self) -> Option<NaiveDate> {
        let active = self.related.active?;
        if self.treats_as_reset(active) {
            return self.related.next.map(|next| next.effective_at);
        }

        let cycle_end = PeriodCalculator::for_assignment(active).end_date(self.reference_date)?;
        match self.related.next {
            Some(next) => Some(self.first_anchor(next)?.min(cycle_end)),
            None => Some(cycle_end),
        }
    }

    /// Start of the period after the next one.
    ///
    /// Mirrors [`next_start_date`](Self::next_start_date) one level further
    /// out. Without a future assignment the next period is extrapolated by one
    /// cycle of the policy in force from `next_start_date`. When
    /// `next_start_date` lies on that policy's anchor grid the cycle end is
    /// rebuilt from the anchor, so a February 29 policy returns to February 29
    /// in leap years.
    pub fn future_start_date(&self) -> Option<NaiveDate> {
        let active = self.related.active?;
        let next_start = self.next_start_date()?;

        let Some(next) = self.related.next else {
            return PeriodCalculator::for_assignment(active).end_date(next_start);
        };
        if self.treats_as_reset(next) {
            return self.related.future.and_then(|future| self.first_anchor(future));
        }

        let next_calculator = PeriodCalculator::for_assignment(next);
        match self.related.future {
            Some(future) => {
                let next_end = next_calculator.end_date(next_start)?;
                Some(self.first_anchor(future)?.min(next_end))
            }
            None if self.first_anchor(next) == Some(next_start) => {
                next_calculator.end_date(next_start)
            }
            // The active cycle ended before the next policy's first anchor.
            None => add_years(next_start, next.policy.policy_length()),
        }
    }

    /// `[previous_start_date, current_start_date)`.
    pub fn previous_policy_period(&self) -> Option<Period> {
        Some(Period::new(
            self.previous_start_date()?,
            self.current_start_date()?,
        ))
    }

    /// `[current_start_date, next_start_date)`.
    ///
    /// Open-ended for a reset active policy with nothing after it.
    pub fn current_policy_period(&self) -> Option<Period> {
        let active = self.related.active?;
        let start = self.current_start_date()?;

        match self.next_start_date() {
            Some(end) => Some(Period::new(start, end)),
            None if self.treats_as_reset(active) => Some(Period::open_ended(start)),
            None => None,
        }
    }

    /// `[next_start_date, future_start_date)`.
    ///
    /// Absent when a reset active policy has nothing after it; open-ended when
    /// the next assignment is a reset with nothing after it.
    ///
    /// A future assignment whose first anchor falls before `next_start_date`
    /// yields an empty period (end before start). Callers planning ledger
    /// entries should skip it with [`Period::is_empty`].
    pub fn future_policy_period(&self) -> Option<Period> {
        let start = self.next_start_date()?;

        match self.future_start_date() {
            Some(end) => Some(Period::new(start, end)),
            None if self.trailing_next_reset() => Some(Period::open_ended(start)),
            None => None,
        }
    }

    /// Returns the four boundaries together.
    pub fn boundaries(&self) -> PeriodBoundaries {
        PeriodBoundaries {
            previous_start_date: self.previous_start_date(),
            current_start_date: self.current_start_date(),
            next_start_date: self.next_start_date(),
            future_start_date: self.future_start_date(),
        }
    }

    /// Captures the engine state in a serializable report.
    pub fn report(&self) -> PeriodReport {
        super::build_period_report(self)
    }

    /// Returns the named period containing `date`, if any.
    pub fn period_containing(&self, date: NaiveDate) -> Option<(PeriodKind, Period)> {
        [
            (PeriodKind::Previous, self.previous_policy_period()),
            (PeriodKind::Current, self.current_policy_period()),
            (PeriodKind::Future, self.future_policy_period()),
        ]
        .into_iter()
        .find_map(|(kind, period)| period.filter(|p| p.contains(date)).map(|p| (kind, p)))
    }

    /// Expiry date, under the active policy, for an addition created on `date`.
    pub fn validity_date_for(&self, date: NaiveDate) -> Option<NaiveDate> {
        let active = self.related.active?;
        if self.treats_as_reset(active) {
            return None;
        }
        PeriodCalculator::for_assignment(active).validity_date_for(date)
    }

    /// Last day the active assignment is in force: the day before the next one.
    pub fn effective_till(&self) -> Option<NaiveDate> {
        let next = self.related.active.and(self.related.next)?;
        next.effective_at.pred_opt()
    }

    /// Returns true if `assignment` is handled as a reset, with no cycle.
    pub fn treats_as_reset(&self, assignment: &PolicyAssignment) -> bool {
        self.mode == PeriodMode::ResetAware && assignment.policy.reset
    }

    fn trailing_next_reset(&self) -> bool {
        self.related.future.is_none()
            && self
                .related
                .next
                .is_some_and(|next| self.treats_as_reset(next))
    }

    // First date at which `assignment` would start a period of its own.
    fn first_anchor(&self, assignment: &PolicyAssignment) -> Option<NaiveDate> {
        if self.treats_as_reset(assignment) {
            Some(assignment.effective_at)
        } else {
            PeriodCalculator::for_assignment(assignment).first_start_date()
        }
    }

    fn anchor_on_or_before(
        &self,
        assignment: &PolicyAssignment,
        date: NaiveDate,
    ) -> Option<NaiveDate> {
        if self.treats_as_reset(assignment) {
            Some(assignment.effective_at)
        } else {
            PeriodCalculator::for_assignment(assignment).last_start_date(date)
        }
    }

    fn anchor_before(&self, assignment: &PolicyAssignment, date: NaiveDate) -> Option<NaiveDate> {
        if self.treats_as_reset(assignment) {
            Some(assignment.effective_at)
        } else {
            PeriodCalculator::for_assignment(assignment).last_start_date_before(date)
        }
    }
}
