use chrono::{Local, NaiveDate};
use rand::distributions::WeightedIndex;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing::{debug, info, warn};

use crate::domain::batch::{
    BatchRecord, OverallStatus, ParameterKind, ParameterReading, QualityStatus, ReadingStatus,
    column_key,
};
use crate::domain::process::{ProcessDefinition, ProcessStep};
use crate::services::statistics::round_to;

pub const SHELF_LIFE_DAYS: i64 = 730;
pub const DAYS_BETWEEN_BATCHES: i64 = 2;
/// Only the first parameters of each step are simulated.
pub const READINGS_PER_STEP: usize = 3;
/// Target used for duration parameters of steps without a declared duration.
pub const DEFAULT_DURATION_TARGET_HOURS: f64 = 4.0;

const BATCH_SIZES: [u32; 4] = [100, 200, 300, 500];
const LINES: [&str; 3] = ["Line-1", "Line-2", "Line-3"];
const SHIFTS: [&str; 3] = ["A", "B", "C"];
const QUALITY_OUTCOMES: [(QualityStatus, f64); 3] = [
    (QualityStatus::Passed, 0.95),
    (QualityStatus::Pending, 0.04),
    (QualityStatus::Rejected, 0.01),
];
const PASS_PROBABILITY: f64 = 0.9;
const YIELD_RANGE: (f64, f64) = (85.0, 98.0);

/// Generates `batch_count` synthetic batch records ending today.
///
/// See [`generate_batch_records_from`].
pub fn generate_batch_records(process: &ProcessDefinition, batch_count: usize) -> Vec<BatchRecord> {
    generate_batch_records_from(process, batch_count, Local::now().date_naive())
}

/// Generates `batch_count` synthetic batch records, the last one manufactured on `today`.
///
/// Batch `n` draws from a generator seeded with `n`, so the same process and
/// count always yield the same records. A process without steps yields an
/// empty table.
pub fn generate_batch_records_from(
    process: &ProcessDefinition,
    batch_count: usize,
    today: NaiveDate,
) -> Vec<BatchRecord> {
    if process.steps.is_empty() {
        warn!(process = %process.name, "process has no steps, no batch records generated");
        return Vec::new();
    }
    if batch_count == 0 {
        return Vec::new();
    }

    let Some(base_date) = batch_offset(batch_count).and_then(|span| today.checked_sub_signed(span))
    else {
        warn!(process = %process.name, batch_count, "batch dates out of range, no batch records generated");
        return Vec::new();
    };
    let product_name = process.product_name();
    let records: Option<Vec<BatchRecord>> = (1..=batch_count)
        .map(|batch_number| {
            let mut rng = StdRng::seed_from_u64(batch_number as u64);
            generate_batch(process, &product_name, batch_number, base_date, &mut rng)
        })
        .collect();
    let Some(records) = records else {
        warn!(process = %process.name, batch_count, "batch dates out of range, no batch records generated");
        return Vec::new();
    };

    info!(process = %process.name, batches = records.len(), "generated synthetic batch records");
    records
}

fn generate_batch<R: Rng + ?Sized>(
    process: &ProcessDefinition,
    product_name: &str,
    batch_number: usize,
    base_date: NaiveDate,
    rng: &mut R,
) -> Option<BatchRecord> {
    let manufacturing_date = base_date.checked_add_signed(batch_offset(batch_number)?)?;
    let expiry_date =
        manufacturing_date.checked_add_signed(chrono::Duration::try_days(SHELF_LIFE_DAYS)?)?;

    let batch_size = BATCH_SIZES.choose(rng).copied().unwrap_or(BATCH_SIZES[0]);
    let line = LINES.choose(rng).copied().unwrap_or(LINES[0]);
    let shift = SHIFTS.choose(rng).copied().unwrap_or(SHIFTS[0]);
    let yield_percent = round_to(rng.gen_range(YIELD_RANGE.0..YIELD_RANGE.1), 2);
    let quality_status = draw_quality_status(rng);
    let overall_status = if rng.gen_bool(PASS_PROBABILITY) {
        OverallStatus::Pass
    } else {
        OverallStatus::Investigate
    };

    let mut readings = Vec::new();
    for (index, step) in process.steps.iter().enumerate() {
        for parameter in step.parameters.iter().take(READINGS_PER_STEP) {
            readings.push(simulate_reading(index + 1, step, parameter, rng));
        }
    }

    debug!(batch_number, readings = readings.len(), "generated batch record");

    Some(BatchRecord {
        batch_number: format!("BATCH-{batch_number:04}"),
        product_name: product_name.to_string(),
        manufacturing_date,
        expiry_date,
        batch_size,
        line: line.to_string(),
        shift: shift.to_string(),
        operator: format!("OP{:03}", batch_number % 5 + 1),
        supervisor: format!("SUP{:02}", batch_number % 3 + 1),
        yield_percent,
        quality_status,
        overall_status,
        readings,
    })
}

/// Span covered by `batches` production intervals, `None` when it leaves the date range.
fn batch_offset(batches: usize) -> Option<chrono::Duration> {
    let days = i64::try_from(batches).ok()?.checked_mul(DAYS_BETWEEN_BATCHES)?;
    chrono::Duration::try_days(days)
}

fn draw_quality_status<R: Rng + ?Sized>(rng: &mut R) -> QualityStatus {
    WeightedIndex::new(QUALITY_OUTCOMES.iter().map(|(_, weight)| *weight))
        .map(|outcomes| QUALITY_OUTCOMES[outcomes.sample(rng)].0)
        .unwrap_or(QualityStatus::Passed)
}

/// Distribution an actual reading is drawn from.
struct ReadingModel {
    target: f64,
    std_dev: f64,
    decimals: i32,
}

impl ReadingModel {
    fn for_kind(kind: ParameterKind, step: &ProcessStep) -> Self {
        match kind {
            ParameterKind::Temperature => Self {
                target: 25.0,
                std_dev: 1.5,
                decimals: 1,
            },
            ParameterKind::Pressure => Self {
                target: 1.0,
                std_dev: 0.15,
                decimals: 2,
            },
            ParameterKind::Acidity => Self {
                target: 7.0,
                std_dev: 0.2,
                decimals: 2,
            },
            ParameterKind::Duration => {
                let target = duration_target_hours(step);
                Self {
                    target,
                    std_dev: target * 0.1,
                    decimals: 1,
                }
            }
            ParameterKind::Other => Self {
                target: 100.0,
                std_dev: 2.0,
                decimals: 1,
            },
        }
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let value = Normal::new(self.target, self.std_dev)
            .map(|normal| normal.sample(rng))
            .unwrap_or(self.target);
        round_to(value, self.decimals)
    }
}

fn duration_target_hours(step: &ProcessStep) -> f64 {
    let hours = step.duration.as_hours();
    if hours > 0.0 {
        hours
    } else {
        DEFAULT_DURATION_TARGET_HOURS
    }
}

/// Whether `actual` lies inside the tolerance band of its parameter kind.
pub fn within_tolerance(kind: ParameterKind, target: f64, actual: f64) -> bool {
    match kind {
        ParameterKind::Temperature => (actual - target).abs() <= 2.0,
        ParameterKind::Pressure => (actual - target).abs() <= 0.2,
        ParameterKind::Acidity => (6.5..=7.5).contains(&actual),
        ParameterKind::Duration => (actual - target).abs() <= target * 0.15,
        ParameterKind::Other => (95.0..=105.0).contains(&actual),
    }
}

fn simulate_reading<R: Rng + ?Sized>(
    step_number: usize,
    step: &ProcessStep,
    parameter: &str,
    rng: &mut R,
) -> ParameterReading {
    let kind = ParameterKind::classify(parameter);
    let model = ReadingModel::for_kind(kind, step);
    let actual = model.draw(rng);
    let status = if within_tolerance(kind, model.target, actual) {
        ReadingStatus::Normal
    } else {
        ReadingStatus::Deviated
    };

    ParameterReading {
        key: column_key(step_number, parameter),
        step_number,
        step_name: step.name.clone(),
        parameter: parameter.to_string(),
        kind,
        target: model.target,
        actual,
        status,
    }
}
