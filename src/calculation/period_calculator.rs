//! Recurring cycle arithmetic for a single policy assignment.
//!
//! A [`PeriodCalculator`] answers "where do the cycles of this policy start
//! and end" for one assignment. Every method is a pure function of the
//! policy, the assignment's `effective_at`, and the date passed in; none of
//! them reads the clock.
//!
//! All results are `Option`: validity dates are absent when the policy has
//! no end day/month, and any date is absent if it would fall outside the
//! supported calendar range.

use chrono::{Datelike, NaiveDate};

use crate::models::{PolicyAssignment, PolicyDefinition};

use super::calendar::{anniversary, year_of};

/// Computes cycle anchor dates for one policy assignment.
///
/// # Example
///
/// ```
/// use accrual_engine::calculation::PeriodCalculator;
/// use accrual_engine::models::{PolicyDefinition, PolicyType};
/// use chrono::NaiveDate;
///
/// let policy = PolicyDefinition {
///     id: "vacation".to_string(),
///     name: "Vacation".to_string(),
///     policy_type: PolicyType::Balancer,
///     start_day: 1,
///     start_month: 1,
///     end_day: None,
///     end_month: None,
///     years_to_effect: 3,
///     reset: false,
/// };
///
/// let calculator = PeriodCalculator::new(&policy, NaiveDate::from_ymd_opt(2009, 1, 1).unwrap());
/// let today = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
///
/// assert_eq!(calculator.last_start_date(today), NaiveDate::from_ymd_opt(2015, 1, 1));
/// assert_eq!(calculator.previous_start_date(today), NaiveDate::from_ymd_opt(2012, 1, 1));
/// assert_eq!(calculator.end_date(today), NaiveDate::from_ymd_opt(2018, 1, 1));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PeriodCalculator<'a> {
    policy: &'a PolicyDefinition,
    effective_at: NaiveDate,
}

impl<'a> PeriodCalculator<'a> {
    /// Creates a calculator for `policy` assigned from `effective_at`.
    pub fn new(policy: &'a PolicyDefinition, effective_at: NaiveDate) -> Self {
        Self {
            policy,
            effective_at,
        }
    }

    /// Creates a calculator for an assignment.
    pub fn for_assignment(assignment: &'a PolicyAssignment) -> Self {
        Self::new(&assignment.policy, assignment.effective_at)
    }

    /// Returns the cycle length in years.
    ///
    /// `years_to_effect` of 0 and 1 both give a one-year cycle.
    pub fn policy_length(&self) -> u32 {
        self.policy.policy_length()
    }

    /// Returns the first anchor on or after `effective_at`.
    pub fn first_start_date(&self) -> Option<NaiveDate> {
        let year = self.effective_at.year();
        let start = self.start_in(year)?;

        if start < self.effective_at {
            self.start_in(year.checked_add(1)?)
        } else {
            Some(start)
        }
    }

    /// Returns the latest cycle start on or before `reference_date`.
    ///
    /// Cycle starts lie on the grid of `policy_length` years counted from
    /// [`first_start_date`](Self::first_start_date). A reference date before
    /// the first start yields the grid point before it.
    pub fn last_start_date(&self, reference_date: NaiveDate) -> Option<NaiveDate> {
        let first_start = self.first_start_date()?;
        let length = self.length_years();
        let years_before = i64::from(reference_date.year() - first_start.year()).rem_euclid(length);

        let year = year_of(reference_date, -years_before)?;
        let candidate = self.start_in(year)?;

        if candidate > reference_date {
            self.start_in(year_of(candidate, -length)?)
        } else {
            Some(candidate)
        }
    }

    /// Returns the latest cycle start strictly before `date`.
    pub fn last_start_date_before(&self, date: NaiveDate) -> Option<NaiveDate> {
        self.last_start_date(date.pred_opt()?)
    }

    /// Returns the start of the cycle before the one containing `reference_date`.
    pub fn previous_start_date(&self, reference_date: NaiveDate) -> Option<NaiveDate> {
        let last_start = self.last_start_date(reference_date)?;
        self.start_in(year_of(last_start, -self.length_years())?)
    }

    /// Returns the end (exclusive) of the cycle containing `reference_date`.
    pub fn end_date(&self, reference_date: NaiveDate) -> Option<NaiveDate> {
        let last_start = self.last_start_date(reference_date)?;
        self.start_in(year_of(last_start, self.length_years())?)
    }

    /// Returns the validity date of the first cycle.
    pub fn first_validity_date(&self) -> Option<NaiveDate> {
        let first_start = self.first_start_date()?;
        self.end_in(year_of(first_start, self.years_to_effect())?)
    }

    /// Returns the validity date of the cycle containing `reference_date`.
    pub fn last_validity_date(&self, reference_date: NaiveDate) -> Option<NaiveDate> {
        let last_start = self.last_start_date(reference_date)?;
        self.end_in(year_of(last_start, self.years_to_effect())?)
    }

    /// Returns the expiry date for an addition created on `date`.
    ///
    /// The result is never before `date`.
    pub fn validity_date_for(&self, date: NaiveDate) -> Option<NaiveDate> {
        let year = year_of(date, self.years_to_effect())?;
        let candidate = self.end_in(year)?;

        if candidate < date {
            self.end_in(year.checked_add(1)?)
        } else {
            Some(candidate)
        }
    }

    fn length_years(&self) -> i64 {
        i64::from(self.policy_length())
    }

    // Validity offsets use the raw value, not the policy length.
    fn years_to_effect(&self) -> i64 {
        i64::from(self.policy.years_to_effect)
    }

    fn start_in(&self, year: i32) -> Option<NaiveDate> {
        anniversary(year, self.policy.start_month, self.policy.start_day)
    }

    fn end_in(&self, year: i32) -> Option<NaiveDate> {
        let (month, day) = self.policy.end_anchor()?;
        anniversary(year, month, day)
    }
}
