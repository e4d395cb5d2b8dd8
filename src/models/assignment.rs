//! Policy assignments and per-category assignment histories.
//!
//! This module contains the [`PolicyAssignment`] and [`AssignmentHistory`]
//! types. A history is the chronologically ordered list of assignments for
//! one employee in one time-off category, as fetched by the caller's
//! persistence layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, EngineResult};

use super::PolicyDefinition;

/// Binds a policy to an employee and category from a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyAssignment {
    /// The date the assignment becomes active.
    pub effective_at: NaiveDate,
    /// The assigned policy.
    pub policy: PolicyDefinition,
}

impl PolicyAssignment {
    /// Creates a new assignment.
    pub fn new(policy: PolicyDefinition, effective_at: NaiveDate) -> Self {
        Self {
            effective_at,
            policy,
        }
    }
}

/// The ordered assignment history of one employee in one category.
///
/// Assignments are sorted by `effective_at`, and each effective date occurs
/// at most once.
///
/// # Example
///
/// ```
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
///
/// let history = AssignmentHistory::new(
///     "emp_001",
///     "vacation",
///     vec![
///         PolicyAssignment::new(policy.clone(), NaiveDate::from_ymd_opt(2016, 1, 1).unwrap()),
///         PolicyAssignment::new(policy, NaiveDate::from_ymd_opt(2014, 1, 1).unwrap()),
///     ],
/// )
/// .unwrap();
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.assignments()[0].effective_at, NaiveDate::from_ymd_opt(2014, 1, 1).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentHistory {
    employee_id: String,
    category_id: String,
    assignments: Vec<PolicyAssignment>,
}

impl AssignmentHistory {
    /// Builds a history, sorting assignments and rejecting duplicate dates.
    pub fn new(
        employee_id: impl Into<String>,
        category_id: impl Into<String>,
        assignments: Vec<PolicyAssignment>,
    ) -> EngineResult<Self> {
        let employee_id = employee_id.into();
        let category_id = category_id.into();

        let mut sorted = assignments;
        sorted.sort_by_key(|assignment| assignment.effective_at);

        if let Some(pair) = sorted
            .windows(2)
            .find(|pair| pair[0].effective_at == pair[1].effective_at)
        {
            warn!(
                employee_id = %employee_id,
                category_id = %category_id,
                effective_at = %pair[0].effective_at,
                "Rejected assignment history with duplicate effective date"
            );
            return Err(EngineError::DuplicateAssignment {
                employee_id,
                category_id,
                effective_at: pair[0].effective_at,
            });
        }

        Ok(Self {
            employee_id,
            category_id,
            assignments: sorted,
        })
    }

    /// Builds a history with no assignments.
    pub fn empty(employee_id: impl Into<String>, category_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            category_id: category_id.into(),
            assignments: Vec::new(),
        }
    }

    /// Returns the employee owning this history.
    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    /// Returns the time-off category of this history.
    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    /// Returns the assignments, oldest first.
    pub fn assignments(&self) -> &[PolicyAssignment] {
        &self.assignments
    }

    /// Returns the number of assignments.
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Returns true if nothing was ever assigned.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Returns the assignment effective on exactly `date`, if any.
    pub fn assignment_at(&self, date: NaiveDate) -> Option<&PolicyAssignment> {
        self.assignments
            .binary_search_by_key(&date, |assignment| assignment.effective_at)
            .ok()
            .map(|index| &self.assignments[index])
    }

    /// Returns the first assignment that starts strictly after `date`.
    pub fn first_after(&self, date: NaiveDate) -> Option<&PolicyAssignment> {
        self.assignments
            .iter()
            .find(|assignment| assignment.effective_at > date)
    }
}
