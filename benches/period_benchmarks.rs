//! Performance benchmarks for the accrual engine.
//!
//! Covers the hot paths a ledger regeneration hits:
//! - Single calculator lookups
//! - Engine construction and boundaries for a long history
//! - Period reports built from the loaded configuration
//! - Walking a decade of periods by date
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::NaiveDate;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use accrual_engine::calculation::{PeriodCalculator, PolicyPeriodEngine, periods_between};
use accrual_engine::config::ConfigLoader;
use accrual_engine::models::{
    AssignmentHistory, PeriodMode, PolicyAssignment, PolicyDefinition, PolicyType,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn create_policy(start_month: u32, years_to_effect: u32) -> PolicyDefinition {
    PolicyDefinition {
        id: format!("policy_{start_month}_{years_to_effect}"),
        name: "Benchmark".to_string(),
        policy_type: PolicyType::Balancer,
        start_day: 1,
        start_month,
        end_day: Some(1),
        end_month: Some(start_month % 12 + 1),
        years_to_effect,
        reset: false,
    }
}

/// Creates a history with one assignment every eight months.
fn create_history(assignment_count: usize) -> AssignmentHistory {
    let assignments = (0..assignment_count)
        .map(|i| {
            let months = chrono::Months::new(8 * i as u32);
            let effective_at = date(2000, 1, 15).checked_add_months(months).unwrap();
            let policy = create_policy((i % 12) as u32 + 1, (i % 3) as u32);
            PolicyAssignment::new(policy, effective_at)
        })
        .collect();

    AssignmentHistory::new("emp_bench_001", "vacation", assignments).unwrap()
}

/// Benchmark: calculator lookups for a three-year policy.
fn bench_calculator(c: &mut Criterion) {
    let policy = create_policy(4, 3);
    let calculator = PeriodCalculator::new(&policy, date(2009, 6, 1));

    c.bench_function("calculator_end_date", |b| {
        b.iter(|| black_box(calculator.end_date(black_box(date(2016, 1, 1)))))
    });
}

/// Benchmark: engine boundaries as the history grows.
fn bench_engine_boundaries(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_boundaries");

    for assignment_count in [1usize, 10, 100, 1000] {
        let history = create_history(assignment_count);
        let reference_date = history
            .assignments()
            .last()
            .map(|assignment| assignment.effective_at)
            .unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(assignment_count),
            &history,
            |b, history| {
                b.iter(|| {
                    let engine =
                        PolicyPeriodEngine::new(history, reference_date, PeriodMode::ResetAware);
                    black_box(engine.boundaries())
                })
            },
        );
    }

    group.finish();
}

/// Benchmark: period report from the demo configuration.
fn bench_period_report(c: &mut Criterion) {
    let loader = ConfigLoader::load("./config/demo").expect("Failed to load config");

    c.bench_function("period_report", |b| {
        b.iter(|| {
            black_box(
                loader
                    .period_report("emp_001", "vacation", date(2016, 1, 1))
                    .unwrap(),
            )
        })
    });
}

/// Benchmark: walking ten years of periods.
fn bench_periods_between(c: &mut Criterion) {
    let history = create_history(15);

    let mut group = c.benchmark_group("periods_between");
    group.throughput(Throughput::Elements(10));

    group.bench_function("decade", |b| {
        b.iter(|| {
            black_box(periods_between(
                &history,
                date(2000, 1, 15),
                date(2010, 1, 15),
                PeriodMode::ResetAware,
            ))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_calculator,
    bench_engine_boundaries,
    bench_period_report,
    bench_periods_between
);
criterion_main!(benches);
