//! Period report generation.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::models::PeriodReport;

use super::PolicyPeriodEngine;

/// Captures every boundary and period of an engine in a [`PeriodReport`].
///
/// The validity date is the one an addition created at the current start
/// would carry.
pub fn build_period_report(engine: &PolicyPeriodEngine<'_>) -> PeriodReport {
    let history = engine.history();
    let boundaries = engine.boundaries();
    let current_validity_date = boundaries
        .current_start_date
        .and_then(|start| engine.validity_date_for(start));

    let report = PeriodReport {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        employee_id: history.employee_id().to_string(),
        category_id: history.category_id().to_string(),
        reference_date: engine.reference_date(),
        mode: engine.mode(),
        active_policy_id: engine
            .active_assignment()
            .map(|assignment| assignment.policy.id.clone()),
        boundaries,
        previous_policy_period: engine.previous_policy_period(),
        current_policy_period: engine.current_policy_period(),
        future_policy_period: engine.future_policy_period(),
        current_validity_date,
    };

    info!(
        report_id = %report.report_id,
        employee_id = %report.employee_id,
        category_id = %report.category_id,
        reference_date = %report.reference_date,
        current_start_date = ?report.boundaries.current_start_date,
        next_start_date = ?report.boundaries.next_start_date,
        "Period report generated"
    );

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AssignmentHistory, Period, PeriodMode, PolicyAssignment, PolicyDefinition, PolicyType,
    };
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn balancer_with_expiry() -> PolicyDefinition {
        PolicyDefinition {
            id: "vacation".to_string(),
            name: "Vacation".to_string(),
            policy_type: PolicyType::Balancer,
            start_day: 1,
            start_month: 1,
            end_day: Some(1),
            end_month: Some(4),
            years_to_effect: 0,
            reset: false,
        }
    }

    #[test]
    fn test_report_captures_engine_state() {
        let history = AssignmentHistory::new(
            "emp_001",
            "vacation",
            vec![PolicyAssignment::new(balancer_with_expiry(), date(2014, 1, 1))],
        )
        .unwrap();
        let engine = PolicyPeriodEngine::new(&history, date(2016, 1, 1), PeriodMode::ResetAware);

        let report = build_period_report(&engine);

        assert_eq!(report.employee_id, "emp_001");
        assert_eq!(report.category_id, "vacation");
        assert_eq!(report.mode, PeriodMode::ResetAware);
        assert_eq!(report.active_policy_id.as_deref(), Some("vacation"));
        assert_eq!(report.engine_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(
            report.current_policy_period,
            Some(Period::new(date(2016, 1, 1), date(2017, 1, 1)))
        );
        assert_eq!(report.current_validity_date, Some(date(2016, 4, 1)));
        assert!(report.boundaries.is_monotonic());
    }

    #[test]
    fn test_report_for_empty_history() {
        let history = AssignmentHistory::empty("emp_002", "sick");
        let engine = PolicyPeriodEngine::new(&history, date(2016, 1, 1), PeriodMode::Standard);

        let report = build_period_report(&engine);

        assert_eq!(report.active_policy_id, None);
        assert_eq!(report.current_policy_period, None);
        assert_eq!(report.current_validity_date, None);
    }

    #[test]
    fn test_reports_have_unique_ids() {
        let history = AssignmentHistory::empty("emp_002", "sick");
        let engine = PolicyPeriodEngine::new(&history, date(2016, 1, 1), PeriodMode::Standard);

        assert_ne!(
            build_period_report(&engine).report_id,
            build_period_report(&engine).report_id
        );
    }
}
