use crate::models::{PreferenceWeights, RankedListing};

/// Weighted sum of amenity counts for one candidate.
///
/// Never fails: hostile weights (negative, out of range) only shift the
/// ranking.
#[inline]
pub fn raw_score(schools: u32, hospitals: u32, restaurants: u32, weights: &PreferenceWeights) -> f64 {
    f64::from(schools) * weights.schools
        + f64::from(hospitals) * weights.hospitals
        + f64::from(restaurants) * weights.restaurants
}

/// Stage 4 of the pipeline: two-pass scoring over the enriched set.
///
/// Pass 1 computes raw weighted sums and the set maximum; pass 2 rescales
/// each raw score to [0, 100] relative to that maximum. Scores are relative
/// to the current result set only and are not comparable across requests.
///
/// Ranking is a stable descending sort on the normalized score; ties keep
/// their enrichment order, so output is deterministic for deterministic
/// inputs.
pub fn score_and_rank(
    mut candidates: Vec<RankedListing>,
    weights: &PreferenceWeights,
) -> Vec<RankedListing> {
    let mut max_raw: f64 = 0.0;
    for candidate in &mut candidates {
        candidate.raw_score = raw_score(
            candidate.schools,
            candidate.hospitals,
            candidate.restaurants,
            weights,
        );
        if candidate.raw_score > max_raw {
            max_raw = candidate.raw_score;
        }
    }

    for candidate in &mut candidates {
        candidate.score = if max_raw > 0.0 {
            normalize(candidate.raw_score, max_raw)
        } else {
            0
        };
    }

    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}

/// Rescale to [0, 100], rounding half away from zero. Clamped so that a
/// negative raw score (possible with negative weights) stays in range.
#[inline]
fn normalize(raw: f64, max_raw: f64) -> u8 {
    ((raw / max_raw) * 100.0).round().clamp(0.0, 100.0) as u8
}
