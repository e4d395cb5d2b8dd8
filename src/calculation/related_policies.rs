//! Neighbour lookup within an assignment history.
//!
//! Given a reference date, the resolver finds the active assignment and the
//! assignments around it: the one before the active assignment, and the
//! first two that start after the reference date.

use chrono::NaiveDate;

use crate::models::{AssignmentHistory, PolicyAssignment};

/// How many assignments, counting the active one, are examined backwards.
pub const PREVIOUS_LOOKBACK: usize = 3;

/// How many upcoming assignments are examined forwards.
pub const UPCOMING_LOOKAHEAD: usize = 2;

/// The assignments surrounding a reference date.
///
/// Every neighbour is optional; a missing neighbour is never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelatedPolicies<'a> {
    /// The assignment immediately before the active one.
    pub previous: Option<&'a PolicyAssignment>,
    /// The latest assignment with `effective_at <= date`.
    pub active: Option<&'a PolicyAssignment>,
    /// The earliest assignment with `effective_at > date`.
    pub next: Option<&'a PolicyAssignment>,
    /// The assignment after `next`.
    pub future: Option<&'a PolicyAssignment>,
}

/// Classifies the assignments of a history around a reference date.
///
/// # Example
///
/// ```
/// use accrual_engine::calculation::RelatedPolicyResolver;
/// use accrual_engine::models::{AssignmentHistory, PolicyAssignment, PolicyDefinition, PolicyType};
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
///     years_to_effect: 0,
///     reset: false,
/// };
/// let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// let history = AssignmentHistory::new(
///     "emp_001",
///     "vacation",
///     vec![
///         PolicyAssignment::new(policy.clone(), date(2014, 1, 1)),
///         PolicyAssignment::new(policy.clone(), date(2015, 9, 1)),
///         PolicyAssignment::new(policy, date(2016, 6, 1)),
///     ],
/// )
/// .unwrap();
///
/// let related = RelatedPolicyResolver::new(&history).resolve(date(2016, 1, 1));
/// assert_eq!(related.active.map(|a| a.effective_at), Some(date(2015, 9, 1)));
/// assert_eq!(related.previous.map(|a| a.effective_at), Some(date(2014, 1, 1)));
/// assert_eq!(related.next.map(|a| a.effective_at), Some(date(2016, 6, 1)));
/// assert!(related.future.is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct RelatedPolicyResolver<'a> {
    history: &'a AssignmentHistory,
}

impl<'a> RelatedPolicyResolver<'a> {
    /// Creates a resolver over a history.
    pub fn new(history: &'a AssignmentHistory) -> Self {
        Self { history }
    }

    /// Returns all neighbours of `date` at once.
    pub fn resolve(&self, date: NaiveDate) -> RelatedPolicies<'a> {
        let (previous, active) = self.previous_and_active(date);
        let mut upcoming = self.upcoming(date);

        RelatedPolicies {
            previous,
            active,
            next: upcoming.next(),
            future: upcoming.next(),
        }
    }

    /// Returns the latest assignment with `effective_at <= date`.
    pub fn active_assignment(&self, date: NaiveDate) -> Option<&'a PolicyAssignment> {
        self.previous_and_active(date).1
    }

    /// Returns the assignment immediately before the active one.
    pub fn previous_assignment(&self, date: NaiveDate) -> Option<&'a PolicyAssignment> {
        self.previous_and_active(date).0
    }

    /// Returns the earliest assignment with `effective_at > date`.
    pub fn next_assignment(&self, date: NaiveDate) -> Option<&'a PolicyAssignment> {
        self.upcoming(date).next()
    }

    /// Returns the second assignment with `effective_at > date`.
    pub fn future_assignment(&self, date: NaiveDate) -> Option<&'a PolicyAssignment> {
        self.upcoming(date).nth(1)
    }

    fn previous_and_active(
        &self,
        date: NaiveDate,
    ) -> (Option<&'a PolicyAssignment>, Option<&'a PolicyAssignment>) {
        let mut recent = self.started_by(date).rev().take(PREVIOUS_LOOKBACK);
        let active = recent.next();
        let previous = recent.next();
        (previous, active)
    }

    fn started_by(&self, date: NaiveDate) -> std::slice::Iter<'a, PolicyAssignment> {
        let assignments = self.history.assignments();
        let split = assignments.partition_point(|assignment| assignment.effective_at <= date);
        assignments[..split].iter()
    }

    fn upcoming(&self, date: NaiveDate) -> impl Iterator<Item = &'a PolicyAssignment> + 'a {
        let assignments = self.history.assignments();
        let split = assignments.partition_point(|assignment| assignment.effective_at <= date);
        assignments[split..].iter().take(UPCOMING_LOOKAHEAD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PolicyDefinition, PolicyType};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn create_policy(id: &str) -> PolicyDefinition {
        PolicyDefinition {
            id: id.to_string(),
            name: id.to_string(),
            policy_type: PolicyType::Balancer,
            start_day: 1,
            start_month: 1,
            end_day: None,
            end_month: None,
            years_to_effect: 0,
            reset: false,
        }
    }

    fn create_history(dates: &[NaiveDate]) -> AssignmentHistory {
        let assignments = dates
            .iter()
            .enumerate()
            .map(|(i, d)| PolicyAssignment::new(create_policy(&format!("policy_{}", i)), *d))
            .collect();
        AssignmentHistory::new("emp_001", "vacation", assignments).unwrap()
    }

    fn effective(assignment: Option<&PolicyAssignment>) -> Option<NaiveDate> {
        assignment.map(|a| a.effective_at)
    }

    #[test]
    fn test_empty_history_has_no_neighbours() {
        let history = AssignmentHistory::empty("emp_001", "vacation");
        let related = RelatedPolicyResolver::new(&history).resolve(date(2016, 1, 1));
        assert_eq!(related, RelatedPolicies::default());
    }

    #[test]
    fn test_assignment_effective_on_reference_date_is_active() {
        let history = create_history(&[date(2014, 1, 1), date(2016, 1, 1)]);
        let resolver = RelatedPolicyResolver::new(&history);

        assert_eq!(effective(resolver.active_assignment(date(2016, 1, 1))), Some(date(2016, 1, 1)));
        assert_eq!(effective(resolver.previous_assignment(date(2016, 1, 1))), Some(date(2014, 1, 1)));
        assert_eq!(resolver.next_assignment(date(2016, 1, 1)), None);
    }

    #[test]
    fn test_previous_is_immediately_before_active() {
        let history = create_history(&[
            date(2010, 1, 1),
            date(2012, 1, 1),
            date(2014, 1, 1),
            date(2015, 1, 1),
        ]);
        let related = RelatedPolicyResolver::new(&history).resolve(date(2016, 1, 1));

        assert_eq!(effective(related.active), Some(date(2015, 1, 1)));
        assert_eq!(effective(related.previous), Some(date(2014, 1, 1)));
    }

    #[test]
    fn test_before_first_assignment_only_upcoming_are_found() {
        let history = create_history(&[date(2016, 6, 1), date(2017, 1, 1), date(2018, 1, 1)]);
        let related = RelatedPolicyResolver::new(&history).resolve(date(2016, 1, 1));

        assert_eq!(related.active, None);
        assert_eq!(related.previous, None);
        assert_eq!(effective(related.next), Some(date(2016, 6, 1)));
        assert_eq!(effective(related.future), Some(date(2017, 1, 1)));
    }

    #[test]
    fn test_future_assignment_is_second_upcoming() {
        let history = create_history(&[date(2014, 1, 1), date(2016, 6, 1), date(2017, 1, 1)]);
        let resolver = RelatedPolicyResolver::new(&history);

        assert_eq!(effective(resolver.next_assignment(date(2016, 1, 1))), Some(date(2016, 6, 1)));
        assert_eq!(effective(resolver.future_assignment(date(2016, 1, 1))), Some(date(2017, 1, 1)));
        assert_eq!(resolver.future_assignment(date(2016, 6, 1)), None);
    }

    #[test]
    fn test_single_assignment_has_no_previous() {
        let history = create_history(&[date(2014, 1, 1)]);
        let related = RelatedPolicyResolver::new(&history).resolve(date(2016, 1, 1));

        assert_eq!(effective(related.active), Some(date(2014, 1, 1)));
        assert_eq!(related.previous, None);
        assert_eq!(related.next, None);
        assert_eq!(related.future, None);
    }
}
