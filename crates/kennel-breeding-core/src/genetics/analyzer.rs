//! Sire/dam hereditary compatibility analysis.
//!
//! Only conditions tested in both animals are assessed. Outcomes per pair:
//! - clear × clear: compatible
//! - carrier × carrier: critical, 25% affected offspring
//! - affected × carrier (either order): high, 50% affected offspring
//! - affected × affected: critical, 100% affected offspring
//! - anything with one clear parent: no finding

use log::debug;

use crate::models::{
    HealthWarning, MarkerMap, MarkerStatus, PairingAnalysis, RiskLevel, WarningKind,
};
use crate::policy::BreedingPolicy;

use super::{GeneticsError, GeneticsResult};

/// Outcome for one shared condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    Compatible,
    Risk {
        level: RiskLevel,
        affected_percentage: u8,
    },
    NoFinding,
}

/// Apply the pairwise rule table.
pub fn pair_outcome(sire: MarkerStatus, dam: MarkerStatus) -> PairOutcome {
    use MarkerStatus::*;

    match (sire, dam) {
        (Clear, Clear) => PairOutcome::Compatible,
        (Carrier, Carrier) => PairOutcome::Risk {
            level: RiskLevel::Critical,
            affected_percentage: 25,
        },
        (Affected, Carrier) | (Carrier, Affected) => PairOutcome::Risk {
            level: RiskLevel::High,
            affected_percentage: 50,
        },
        (Affected, Affected) => PairOutcome::Risk {
            level: RiskLevel::Critical,
            affected_percentage: 100,
        },
        (Clear, Carrier) | (Carrier, Clear) | (Clear, Affected) | (Affected, Clear) => {
            PairOutcome::NoFinding
        }
    }
}

/// Compare two marker maps and band the supplied COI.
pub fn analyze_pairing(
    sire: &MarkerMap,
    dam: &MarkerMap,
    coi: f64,
    policy: &BreedingPolicy,
) -> GeneticsResult<PairingAnalysis> {
    if !coi.is_finite() || !(0.0..=100.0).contains(&coi) {
        return Err(GeneticsError::InvalidCoi(coi));
    }

    let mut health_warnings = Vec::new();
    let mut compatible_conditions = Vec::new();
    let mut incompatible_conditions = Vec::new();

    for (condition, sire_marker) in sire {
        let Some(dam_marker) = dam.get(condition) else {
            continue;
        };

        match pair_outcome(sire_marker.status, dam_marker.status) {
            PairOutcome::Compatible => compatible_conditions.push(condition.clone()),
            PairOutcome::Risk {
                level,
                affected_percentage,
            } => {
                health_warnings.push(HealthWarning {
                    condition: condition.clone(),
                    risk_level: level,
                    description: describe_risk(
                        condition,
                        sire_marker.status,
                        dam_marker.status,
                        affected_percentage,
                    ),
                    affected_percentage: Some(affected_percentage),
                    kind: WarningKind::HereditaryCondition,
                });
                incompatible_conditions.push(condition.clone());
            }
            PairOutcome::NoFinding => {}
        }
    }

    if let Some(warning) = inbreeding_warning(coi, policy) {
        health_warnings.push(warning);
    }

    // Stable: equal severities keep condition order, COI last
    health_warnings.sort_by(|a, b| b.risk_level.cmp(&a.risk_level));

    debug!(
        "pairing analysis: coi {:.2}, {} warnings, {} compatible",
        coi,
        health_warnings.len(),
        compatible_conditions.len()
    );

    Ok(PairingAnalysis {
        coi,
        health_warnings,
        compatible_conditions,
        incompatible_conditions,
    })
}

/// Warning for the COI band, if the COI reaches one.
pub fn inbreeding_warning(coi: f64, policy: &BreedingPolicy) -> Option<HealthWarning> {
    if coi >= policy.coi_high_threshold {
        Some(HealthWarning {
            condition: "High Inbreeding".into(),
            risk_level: RiskLevel::High,
            description: format!(
                "COI of {:.2}% is at or above {}%; expect reduced litter size and vigor",
                coi, policy.coi_high_threshold
            ),
            affected_percentage: None,
            kind: WarningKind::Inbreeding,
        })
    } else if coi >= policy.coi_moderate_threshold {
        Some(HealthWarning {
            condition: "Moderate Inbreeding".into(),
            risk_level: RiskLevel::Medium,
            description: format!(
                "COI of {:.2}% is between {}% and {}%",
                coi, policy.coi_moderate_threshold, policy.coi_high_threshold
            ),
            affected_percentage: None,
            kind: WarningKind::Inbreeding,
        })
    } else {
        None
    }
}

fn describe_risk(
    condition: &str,
    sire: MarkerStatus,
    dam: MarkerStatus,
    affected_percentage: u8,
) -> String {
    format!(
        "Sire is {} and dam is {} for {}; {}% of puppies are expected to be affected",
        sire.as_str(),
        dam.as_str(),
        condition,
        affected_percentage
    )
}
