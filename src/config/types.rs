//! Configuration types for the accrual engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;

use crate::models::{PeriodMode, PolicyDefinition, PolicyType};

/// Engine settings from engine.yaml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineSettings {
    /// Tenant the configuration belongs to.
    pub tenant: String,
    /// Period mode used when none is given explicitly.
    #[serde(default)]
    pub period_mode: PeriodMode,
}

/// A policy entry in policies.yaml; the id is the map key.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyEntry {
    /// Human-readable name.
    pub name: String,
    /// Counter or balancer.
    pub policy_type: PolicyType,
    /// Day of the annual anchor.
    pub start_day: u32,
    /// Month of the annual anchor.
    pub start_month: u32,
    /// Day of the validity offset.
    #[serde(default)]
    pub end_day: Option<u32>,
    /// Month of the validity offset.
    #[serde(default)]
    pub end_month: Option<u32>,
    /// Years a cycle lasts.
    #[serde(default)]
    pub years_to_effect: u32,
    /// Whether the policy is a reset point.
    #[serde(default)]
    pub reset: bool,
}

impl PolicyEntry {
    /// Builds the policy definition registered under `id`.
    pub fn into_definition(self, id: impl Into<String>) -> PolicyDefinition {
        PolicyDefinition {
            id: id.into(),
            name: self.name,
            policy_type: self.policy_type,
            start_day: self.start_day,
            start_month: self.start_month,
            end_day: self.end_day,
            end_month: self.end_month,
            years_to_effect: self.years_to_effect,
            reset: self.reset,
        }
    }
}

/// Policies configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct PoliciesConfig {
    /// Map of policy id to policy details.
    pub policies: HashMap<String, PolicyEntry>,
}

/// One assignment record from assignments.yaml.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AssignmentRecord {
    /// The assigned employee.
    pub employee_id: String,
    /// The time-off category.
    pub category_id: String,
    /// Id of the assigned policy.
    pub policy_id: String,
    /// Date the assignment takes effect.
    pub effective_at: NaiveDate,
}

/// Assignments configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentsConfig {
    /// All assignment records, in any order.
    #[serde(default)]
    pub assignments: Vec<AssignmentRecord>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    settings: EngineSettings,
    policies: HashMap<String, PolicyDefinition>,
    assignments: Vec<AssignmentRecord>,
}

impl CatalogConfig {
    /// Creates a new CatalogConfig from its component parts.
    ///
    /// Assignments are sorted by employee, category and effective date.
    pub fn new(
        settings: EngineSettings,
        policies: HashMap<String, PolicyDefinition>,
        assignments: Vec<AssignmentRecord>,
    ) -> Self {
        let mut sorted_assignments = assignments;
        sorted_assignments.sort_by(|a, b| {
            (&a.employee_id, &a.category_id, a.effective_at).cmp(&(
                &b.employee_id,
                &b.category_id,
                b.effective_at,
            ))
        });
        Self {
            settings,
            policies,
            assignments: sorted_assignments,
        }
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns all policies keyed by id.
    pub fn policies(&self) -> &HashMap<String, PolicyDefinition> {
        &self.policies
    }

    /// Returns all assignment records.
    pub fn assignments(&self) -> &[AssignmentRecord] {
        &self.assignments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_entry_defaults() {
        let yaml = "name: Sick\npolicy_type: counter\nstart_day: 1\nstart_month: 1\n";
        let entry: PolicyEntry = serde_yaml::from_str(yaml).unwrap();
        let policy = entry.into_definition("sick");

        assert_eq!(policy.id, "sick");
        assert_eq!(policy.policy_type, PolicyType::Counter);
        assert_eq!(policy.end_day, None);
        assert_eq!(policy.years_to_effect, 0);
        assert!(!policy.reset);
    }

    #[test]
    fn test_engine_settings_default_mode() {
        let settings: EngineSettings = serde_yaml::from_str("tenant: acme\n").unwrap();
        assert_eq!(settings.period_mode, PeriodMode::ResetAware);
    }

    #[test]
    fn test_catalog_sorts_assignments() {
        let record = |employee: &str, y: i32| AssignmentRecord {
            employee_id: employee.to_string(),
            category_id: "vacation".to_string(),
            policy_id: "january".to_string(),
            effective_at: NaiveDate::from_ymd_opt(y, 1, 1).unwrap(),
        };

        let catalog = CatalogConfig::new(
            EngineSettings::default(),
            HashMap::new(),
            vec![record("emp_002", 2014), record("emp_001", 2016), record("emp_001", 2014)],
        );

        let order: Vec<(&str, i32)> = catalog
            .assignments()
            .iter()
            .map(|r| (r.employee_id.as_str(), chrono::Datelike::year(&r.effective_at)))
            .collect();
        assert_eq!(order, vec![("emp_001", 2014), ("emp_001", 2016), ("emp_002", 2014)]);
    }
}
