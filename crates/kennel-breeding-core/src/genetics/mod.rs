//! Breeding compatibility: hereditary risk analysis and pairing score.
//!
//! Pipeline: Marker Maps → Analyzer → Score Aggregator

mod analyzer;
mod score;

pub use analyzer::*;
pub use score::*;

use log::warn;
use thiserror::Error;

use crate::models::{Animal, MarkerMap, PairingReport, Sex};
use crate::policy::BreedingPolicy;

/// Compatibility errors.
#[derive(Error, Debug, PartialEq)]
pub enum GeneticsError {
    #[error("COI must be a percentage between 0 and 100, got {0}")]
    InvalidCoi(f64),

    #[error("Animal {animal_id} cannot be used as {role}")]
    WrongSex { animal_id: String, role: &'static str },
}

pub type GeneticsResult<T> = Result<T, GeneticsError>;

/// Analyze and score a sire/dam pair.
///
/// `coi` falls back to the policy placeholder when no pedigree value is supplied.
pub fn pairing_report(
    sire: &Animal,
    sire_markers: &MarkerMap,
    dam: &Animal,
    dam_markers: &MarkerMap,
    coi: Option<f64>,
    policy: &BreedingPolicy,
) -> GeneticsResult<PairingReport> {
    check_role(sire, Sex::Male, "sire")?;
    check_role(dam, Sex::Female, "dam")?;

    let analysis = analyze_pairing(
        sire_markers,
        dam_markers,
        coi.unwrap_or(policy.placeholder_coi),
        policy,
    )?;
    let score = score_pairing(&analysis, policy);

    Ok(PairingReport {
        sire_id: sire.id.clone(),
        dam_id: dam.id.clone(),
        analysis,
        score,
    })
}

fn check_role(animal: &Animal, expected: Sex, role: &'static str) -> GeneticsResult<()> {
    if animal.sex != expected {
        warn!("animal {} is {}, cannot be {}", animal.id, animal.sex.as_str(), role);
        return Err(GeneticsError::WrongSex {
            animal_id: animal.id.clone(),
            role,
        });
    }
    Ok(())
}
