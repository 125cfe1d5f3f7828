use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use crate::domain::batch::{
    BatchRecord, QualityStatus, column_label, column_values, reading_columns, slugify,
};
use crate::services::analysis_types::{
    ParameterStability, ParameterStatistics, QualityDistribution, QualityReport, QualitySummary,
    StabilityTier,
};
use crate::services::statistics::{
    OUTLIER_Z_THRESHOLD, capability_index, coefficient_of_variation, max_value, mean, min_value,
    outlier_indices, round_to, sample_std_dev, trend,
};

/// Number of reading columns classified in the quality report.
pub const STABILITY_COLUMNS: usize = 5;
pub const YIELD_TARGET_PERCENT: f64 = 90.0;

/// Statistics for every reading column whose key contains one of `parameter_names`.
///
/// Names are slugged the same way column keys are, so `"Temperature"` and
/// `"temperature"` select the same columns. The result is keyed by column key.
pub fn summarize_trends<S: AsRef<str>>(
    batches: &[BatchRecord],
    parameter_names: &[S],
) -> BTreeMap<String, ParameterStatistics> {
    let filters: Vec<String> = parameter_names
        .iter()
        .map(|name| slugify(name.as_ref()))
        .filter(|slug| !slug.is_empty())
        .collect();

    let mut statistics = BTreeMap::new();
    for column in reading_columns(batches) {
        if !filters.iter().any(|filter| column.contains(filter.as_str())) {
            continue;
        }
        let values = column_values(batches, &column);
        debug!(column = %column, points = values.len(), "summarizing column");
        let summary = parameter_statistics(&column, &values);
        statistics.insert(column, summary);
    }

    info!(
        batches = batches.len(),
        columns = statistics.len(),
        "summarized parameter trends"
    );
    statistics
}

fn parameter_statistics(column: &str, values: &[f64]) -> ParameterStatistics {
    ParameterStatistics {
        label: column_label(column),
        mean: round_to(mean(values), 3),
        std_dev: round_to(sample_std_dev(values), 3),
        min: round_to(min_value(values), 3),
        max: round_to(max_value(values), 3),
        cv_percent: round_to(coefficient_of_variation(values), 2),
        trend: trend(values),
        capability_index: capability_index(values),
        outliers: outlier_indices(values, OUTLIER_Z_THRESHOLD),
    }
}

/// Aggregate pass/yield counts, stability tiers and recommendations.
pub fn summarize_quality(batches: &[BatchRecord]) -> QualityReport {
    if batches.is_empty() {
        warn!("empty batch table, quality report is empty");
        return QualityReport::default();
    }

    let yields: Vec<f64> = batches.iter().map(|batch| batch.yield_percent).collect();
    let passed_batches = batches.iter().filter(|batch| batch.passed()).count();
    let summary = QualitySummary {
        total_batches: batches.len(),
        passed_batches,
        failed_batches: batches.len() - passed_batches,
        yield_average: round_to(mean(&yields), 2),
        yield_min: min_value(&yields),
        yield_max: max_value(&yields),
    };

    let mut quality_distribution = QualityDistribution::default();
    for batch in batches {
        match batch.quality_status {
            QualityStatus::Passed => quality_distribution.passed += 1,
            QualityStatus::Pending => quality_distribution.pending += 1,
            QualityStatus::Rejected => quality_distribution.rejected += 1,
        }
    }

    let parameter_stability: Vec<ParameterStability> = reading_columns(batches)
        .into_iter()
        .take(STABILITY_COLUMNS)
        .map(|column| {
            let cv_percent = round_to(
                coefficient_of_variation(&column_values(batches, &column)),
                2,
            );
            ParameterStability {
                label: column_label(&column),
                column,
                cv_percent,
                stability: StabilityTier::from_cv(cv_percent),
            }
        })
        .collect();

    let recommendations = quality_recommendations(&summary, &parameter_stability);

    info!(
        batches = summary.total_batches,
        failed = summary.failed_batches,
        yield_average = summary.yield_average,
        "summarized batch quality"
    );

    QualityReport {
        summary,
        quality_distribution,
        parameter_stability,
        recommendations,
    }
}

fn quality_recommendations(
    summary: &QualitySummary,
    stability: &[ParameterStability],
) -> Vec<String> {
    let mut recommendations = Vec::new();
    if summary.failed_batches > 0 {
        recommendations.push(format!(
            "Investigate {} failed batch(es)",
            summary.failed_batches
        ));
    }
    if summary.yield_average < YIELD_TARGET_PERCENT {
        recommendations.push("Yield below target; optimize the process".to_string());
    }
    for entry in stability {
        if entry.stability == StabilityTier::Low {
            recommendations.push(format!(
                "{} stability is low; strengthen process control",
                entry.label
            ));
        }
    }
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::batch::{OverallStatus, ParameterKind, ParameterReading, ReadingStatus};
    use crate::services::batch_generator::generate_batch_records_from;
    use crate::services::statistics::Trend;
    use crate::test_support::{build_biologic_process, on_date};

    fn reading(key: &str, actual: f64) -> ParameterReading {
        ParameterReading {
            key: key.to_string(),
            step_number: 1,
            step_name: "Mixing".to_string(),
            parameter: key.to_string(),
            kind: ParameterKind::Other,
            target: 100.0,
            actual,
            status: ReadingStatus::Normal,
        }
    }

    fn batch(index: usize, yield_percent: f64, passed: bool, readings: Vec<ParameterReading>) -> BatchRecord {
        let date = on_date(2026, 1, 1) + chrono::Duration::days(index as i64);
        BatchRecord {
            batch_number: format!("BATCH-{index:04}"),
            product_name: "Tablets".to_string(),
            manufacturing_date: date,
            expiry_date: date + chrono::Duration::days(730),
            batch_size: 100,
            line: "Line-1".to_string(),
            shift: "A".to_string(),
            operator: "OP001".to_string(),
            supervisor: "SUP01".to_string(),
            yield_percent,
            quality_status: QualityStatus::Passed,
            overall_status: if passed {
                OverallStatus::Pass
            } else {
                OverallStatus::Investigate
            },
            readings,
        }
    }

    #[test]
    fn trends_select_columns_by_slugged_name() {
        let batches = generate_batch_records_from(&build_biologic_process(), 10, on_date(2026, 3, 1));
        let names = vec!["Pressure".to_string()];

        let trends = summarize_trends(&batches, &names);
        let keys: Vec<&str> = trends.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["step_2_column_pressure", "step_3_filter_pressure"]);
        let column = &trends["step_2_column_pressure"];
        assert_eq!(column.label, "Step 2 Column Pressure");
        assert!(column.min <= column.mean && column.mean <= column.max);
    }

    #[test]
    fn rising_series_is_detected_with_capability_one() {
        let batches: Vec<BatchRecord> = [10.0, 11.0, 12.0, 13.0, 14.0]
            .iter()
            .enumerate()
            .map(|(idx, value)| batch(idx, 95.0, true, vec![reading("step_1_mixing_speed", *value)]))
            .collect();

        let trends = summarize_trends(&batches, &["mixing"]);
        let stats = &trends["step_1_mixing_speed"];
        assert_eq!(stats.trend, Trend::Rising);
        assert_eq!(stats.mean, 12.0);
        assert_eq!(stats.std_dev, 1.581);
        assert_eq!(stats.capability_index, 1.0);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn constant_series_is_stable_with_zero_capability() {
        let batches: Vec<BatchRecord> = (0..4)
            .map(|idx| batch(idx, 95.0, true, vec![reading("step_1_fill_weight", 50.0)]))
            .collect();

        let stats = &summarize_trends(&batches, &["fill"])["step_1_fill_weight"];
        assert_eq!(stats.trend, Trend::Stable);
        assert_eq!(stats.std_dev, 0.0);
        assert_eq!(stats.cv_percent, 0.0);
        assert_eq!(stats.capability_index, 0.0);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn two_points_are_insufficient_for_a_trend() {
        let batches: Vec<BatchRecord> = [1.0, 2.0]
            .iter()
            .enumerate()
            .map(|(idx, value)| batch(idx, 95.0, true, vec![reading("step_1_flux", *value)]))
            .collect();

        let stats = &summarize_trends(&batches, &["flux"])["step_1_flux"];
        assert_eq!(stats.trend, Trend::InsufficientData);
        assert!(stats.outliers.is_empty());
    }

    #[test]
    fn empty_table_or_filters_yield_no_trends() {
        let no_names: [&str; 0] = [];
        assert!(summarize_trends(&[], &["temperature"]).is_empty());
        let batches = generate_batch_records_from(&build_biologic_process(), 3, on_date(2026, 3, 1));
        assert!(summarize_trends(&batches, &no_names).is_empty());
        assert!(summarize_trends(&batches, &["  "]).is_empty());
    }

    #[test]
    fn quality_report_counts_and_recommends() {
        let batches = vec![
            batch(0, 86.0, true, vec![reading("step_1_assay", 100.0)]),
            batch(1, 88.0, false, vec![reading("step_1_assay", 140.0)]),
            batch(2, 90.0, true, vec![reading("step_1_assay", 80.0)]),
        ];

        let report = summarize_quality(&batches);
        assert_eq!(report.summary.total_batches, 3);
        assert_eq!(report.summary.passed_batches, 2);
        assert_eq!(report.summary.failed_batches, 1);
        assert_eq!(report.summary.yield_average, 88.0);
        assert_eq!(report.summary.yield_min, 86.0);
        assert_eq!(report.summary.yield_max, 90.0);
        assert_eq!(report.quality_distribution.passed, 3);
        assert_eq!(report.parameter_stability[0].stability, StabilityTier::Low);
        assert_eq!(
            report.recommendations,
            vec![
                "Investigate 1 failed batch(es)".to_string(),
                "Yield below target; optimize the process".to_string(),
                "Step 1 Assay stability is low; strengthen process control".to_string(),
            ]
        );
    }

    #[test]
    fn stability_covers_first_five_columns_only() {
        let batches = generate_batch_records_from(&build_biologic_process(), 10, on_date(2026, 3, 1));
        let report = summarize_quality(&batches);
        assert_eq!(report.parameter_stability.len(), STABILITY_COLUMNS);
        assert_eq!(report.parameter_stability[0].column, "step_1_temperature_36_5_37_5_c");
        assert_eq!(report.parameter_stability[4].column, "step_2_load_density");
    }

    #[test]
    fn empty_table_gives_empty_quality_report() {
        let report = summarize_quality(&[]);
        assert_eq!(report, QualityReport::default());
        assert!(report.recommendations.is_empty());
    }
}
