//! Reduce a pairing analysis to a 0-100 compatibility score.
//!
//! Penalties: critical -30, high -20, medium -10, low -5 per warning.
//! A COI band is penalized once: through its inbreeding warning when the
//! analysis carries one, otherwise directly (> high: -20, > moderate: -10).

use crate::models::{Advice, BreedingScore, PairingAnalysis, RecommendationTier, RiskLevel};
use crate::policy::BreedingPolicy;

const MAX_SCORE: i32 = 100;
const HIGH_COI_PENALTY: i32 = 20;
const MODERATE_COI_PENALTY: i32 = 10;

/// Points deducted for one warning of the given severity.
pub fn severity_penalty(level: RiskLevel) -> i32 {
    match level {
        RiskLevel::Critical => 30,
        RiskLevel::High => 20,
        RiskLevel::Medium => 10,
        RiskLevel::Low => 5,
    }
}

/// Direct COI penalty, used only when no inbreeding warning is present.
pub fn coi_penalty(coi: f64, policy: &BreedingPolicy) -> i32 {
    if coi > policy.coi_high_threshold {
        HIGH_COI_PENALTY
    } else if coi > policy.coi_moderate_threshold {
        MODERATE_COI_PENALTY
    } else {
        0
    }
}

/// Score a pairing and assign its tier and advisory.
pub fn score_pairing(analysis: &PairingAnalysis, policy: &BreedingPolicy) -> BreedingScore {
    let direct_coi = if analysis.has_inbreeding_warning() {
        0
    } else {
        coi_penalty(analysis.coi, policy)
    };
    let penalties = analysis
        .health_warnings
        .iter()
        .map(|w| severity_penalty(w.risk_level))
        .chain(std::iter::once(direct_coi));
    let raw = deduct(MAX_SCORE, penalties);

    let score = raw.clamp(0, MAX_SCORE) as u8;
    BreedingScore {
        score,
        tier: RecommendationTier::for_score(score),
        advice: Advice::for_score(score),
    }
}

fn deduct(start: i32, penalties: impl IntoIterator<Item = i32>) -> i32 {
    penalties
        .into_iter()
        .fold(start, |raw, penalty| raw.saturating_sub(penalty))
}
