use rand::Rng;
use tracing::{info, warn};

use crate::domain::batch::BatchRecord;
use crate::services::analysis_types::{LossAnalysis, OeeResult, OeeTier};
use crate::services::statistics::{mean, round_to};

const AVAILABILITY_RANGE: (f64, f64) = (85.0, 95.0);
const PERFORMANCE_RANGE: (f64, f64) = (90.0, 98.0);

/// Overall equipment efficiency for a batch table.
///
/// Availability and performance are sampled from an unseeded generator and
/// are not derived from the batches, so two calls over the same table differ.
/// Use [`compute_oee_with_rng`] for reproducible figures. Returns `None` for
/// an empty table.
pub fn compute_oee(batches: &[BatchRecord]) -> Option<OeeResult> {
    let mut rng = rand::thread_rng();
    compute_oee_with_rng(batches, &mut rng)
}

pub fn compute_oee_with_rng<R: Rng + ?Sized>(
    batches: &[BatchRecord],
    rng: &mut R,
) -> Option<OeeResult> {
    if batches.is_empty() {
        warn!("empty batch table, OEE not computed");
        return None;
    }

    let availability = round_to(rng.gen_range(AVAILABILITY_RANGE.0..AVAILABILITY_RANGE.1), 2);
    let performance = round_to(rng.gen_range(PERFORMANCE_RANGE.0..PERFORMANCE_RANGE.1), 2);
    let yields: Vec<f64> = batches.iter().map(|batch| batch.yield_percent).collect();
    let quality = round_to(mean(&yields), 2);

    let oee = round_to(availability * performance * quality / 10_000.0, 2);
    let tier = OeeTier::from_oee(oee);

    info!(oee, tier = tier.label(), batches = batches.len(), "computed OEE");

    Some(OeeResult {
        availability_percent: availability,
        performance_percent: performance,
        quality_percent: quality,
        oee_percent: oee,
        tier,
        losses: LossAnalysis {
            availability_loss: round_to(100.0 - availability, 2),
            performance_loss: round_to(100.0 - performance, 2),
            quality_loss: round_to(100.0 - quality, 2),
        },
    })
}
