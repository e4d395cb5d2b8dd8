//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading a tenant's
//! policy catalogue and assignments from YAML files.

use chrono::NaiveDate;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::calculation::PolicyPeriodEngine;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AssignmentHistory, PeriodMode, PeriodReport, PolicyAssignment, PolicyDefinition,
};

use super::types::{AssignmentsConfig, CatalogConfig, EngineSettings, PoliciesConfig};

/// Loads and provides access to a tenant's engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/demo/
/// ├── engine.yaml       # Tenant and default period mode
/// ├── policies.yaml     # Policy catalogue keyed by id
/// └── assignments.yaml  # Employee policy assignments
/// ```
///
/// # Example
///
/// ```no_run
/// use accrual_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/demo")?;
///
/// let today = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
/// let report = loader.period_report("emp_001", "vacation", today)?;
/// println!("Current period: {:?}", report.current_policy_period);
/// # Ok::<(), accrual_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: CatalogConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any file is missing or holds invalid YAML, if a
    /// policy fails validation, or if an assignment names an unknown policy.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = Self::load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        let policies_config = Self::load_yaml::<PoliciesConfig>(&path.join("policies.yaml"))?;
        let assignments_config =
            Self::load_yaml::<AssignmentsConfig>(&path.join("assignments.yaml"))?;

        let mut policies = HashMap::with_capacity(policies_config.policies.len());
        for (id, entry) in policies_config.policies {
            let policy = entry.into_definition(id.clone());
            policy.validate()?;
            policies.insert(id, policy);
        }

        if let Some(record) = assignments_config
            .assignments
            .iter()
            .find(|record| !policies.contains_key(&record.policy_id))
        {
            return Err(EngineError::PolicyNotFound {
                policy_id: record.policy_id.clone(),
            });
        }

        debug!(
            path = %path.display(),
            tenant = %settings.tenant,
            period_mode = %settings.period_mode,
            policies = policies.len(),
            assignments = assignments_config.assignments.len(),
            "Loaded engine configuration"
        );

        let config = CatalogConfig::new(settings, policies, assignments_config.assignments);

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying catalogue configuration.
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Returns the configured default period mode.
    pub fn period_mode(&self) -> PeriodMode {
        self.config.settings().period_mode
    }

    /// Gets a policy by its id.
    pub fn policy(&self, policy_id: &str) -> EngineResult<&PolicyDefinition> {
        self.config
            .policies()
            .get(policy_id)
            .ok_or_else(|| EngineError::PolicyNotFound {
                policy_id: policy_id.to_string(),
            })
    }

    /// Builds the assignment history of one employee in one category.
    ///
    /// The history is empty when nothing is assigned.
    pub fn history(&self, employee_id: &str, category_id: &str) -> EngineResult<AssignmentHistory> {
        let assignments = self
            .config
            .assignments()
            .iter()
            .filter(|record| {
                record.employee_id == employee_id && record.category_id == category_id
            })
            .map(|record| {
                let policy = self.policy(&record.policy_id)?;
                Ok(PolicyAssignment::new(policy.clone(), record.effective_at))
            })
            .collect::<EngineResult<Vec<_>>>()?;

        AssignmentHistory::new(employee_id, category_id, assignments)
    }

    /// Builds a period report using the configured period mode.
    pub fn period_report(
        &self,
        employee_id: &str,
        category_id: &str,
        reference_date: NaiveDate,
    ) -> EngineResult<PeriodReport> {
        self.period_report_with_mode(employee_id, category_id, reference_date, self.period_mode())
    }

    /// Builds a period report in an explicit period mode.
    pub fn period_report_with_mode(
        &self,
        employee_id: &str,
        category_id: &str,
        reference_date: NaiveDate,
        mode: PeriodMode,
    ) -> EngineResult<PeriodReport> {
        let history = self.history(employee_id, category_id)?;
        let engine = PolicyPeriodEngine::new(&history, reference_date, mode);
        Ok(engine.report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Period;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/demo"
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // Writes a throwaway configuration directory under the target dir.
    fn write_config(name: &str, policies: &str, assignments: &str) -> PathBuf {
        let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("target")
            .join("test-config")
            .join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("engine.yaml"), "tenant: scratch\n").unwrap();
        fs::write(dir.join("policies.yaml"), policies).unwrap();
        fs::write(dir.join("assignments.yaml"), assignments).unwrap();
        dir
    }

    const JANUARY_POLICY: &str = "\
policies:
  january:
    name: January
    policy_type: balancer
    start_day: 1
    start_month: 1
";

    #[test]
    fn test_load_config() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.config().settings().tenant, "demo");
        assert_eq!(loader.period_mode(), PeriodMode::ResetAware);
    }

    #[test]
    fn test_get_policy() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let policy = loader.policy("vacation_january").unwrap();
        assert_eq!(policy.id, "vacation_january");
        assert_eq!(policy.start_month, 1);
        assert_eq!(policy.end_anchor(), Some((4, 1)));
    }

    #[test]
    fn test_get_policy_unknown_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.policy("unknown") {
            Err(EngineError::PolicyNotFound { policy_id }) => assert_eq!(policy_id, "unknown"),
            other => panic!("Expected PolicyNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_history_is_sorted() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let history = loader.history("emp_001", "vacation").unwrap();
        let dates: Vec<NaiveDate> = history.assignments().iter().map(|a| a.effective_at).collect();
        assert_eq!(dates, vec![date(2014, 1, 1), date(2015, 9, 1)]);
    }

    #[test]
    fn test_history_for_unassigned_employee_is_empty() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        assert!(loader.history("emp_999", "vacation").unwrap().is_empty());
    }

    #[test]
    fn test_period_report_uses_configured_mode() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let report = loader
            .period_report("emp_002", "vacation", date(2016, 1, 1))
            .unwrap();

        assert_eq!(report.mode, PeriodMode::ResetAware);
        assert_eq!(
            report.current_policy_period,
            Some(Period::new(date(2016, 1, 1), date(2017, 1, 1)))
        );
    }

    #[test]
    fn test_missing_directory_returns_config_not_found() {
        match ConfigLoader::load("./config/does_not_exist") {
            Err(EngineError::ConfigNotFound { path }) => assert!(path.ends_with("engine.yaml")),
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_policy_reference_is_rejected() {
        let dir = write_config(
            "unknown_policy",
            JANUARY_POLICY,
            "\
assignments:
  - employee_id: emp_001
    category_id: vacation
    policy_id: april
    effective_at: 2015-04-01
",
        );

        match ConfigLoader::load(&dir) {
            Err(EngineError::PolicyNotFound { policy_id }) => assert_eq!(policy_id, "april"),
            other => panic!("Expected PolicyNotFound error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let dir = write_config(
            "invalid_policy",
            "\
policies:
  broken:
    name: Broken
    policy_type: counter
    start_day: 1
    start_month: 13
",
            "assignments: []\n",
        );

        assert!(matches!(
            ConfigLoader::load(&dir),
            Err(EngineError::InvalidPolicy { .. })
        ));
    }

    #[test]
    fn test_malformed_yaml_returns_parse_error() {
        let dir = write_config("malformed", "policies: [unclosed\n", "assignments: []\n");

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.ends_with("policies.yaml"))
            }
            other => panic!("Expected ConfigParseError error, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_assignment_surfaces_on_history() {
        let dir = write_config(
            "duplicate_assignment",
            JANUARY_POLICY,
            "\
assignments:
  - employee_id: emp_001
    category_id: vacation
    policy_id: january
    effective_at: 2015-01-01
  - employee_id: emp_001
    category_id: vacation
    policy_id: january
    effective_at: 2015-01-01
",
        );

        let loader = ConfigLoader::load(&dir).unwrap();
        assert!(matches!(
            loader.history("emp_001", "vacation"),
            Err(EngineError::DuplicateAssignment { .. })
        ));
    }
}
