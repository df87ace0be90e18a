//! Reproductive-cycle engine.
//!
//! Pipeline: Validation → Cycle Statistics → Next-Heat Projection → Status → Gestation
//!
//! Every function here is pure over its inputs and an explicit `as_of` date.

pub mod date_math;
mod gestation;
mod prediction;
mod statistics;
mod status;

pub use gestation::*;
pub use prediction::*;
pub use statistics::*;
pub use status::*;

use std::collections::HashMap;

use chrono::NaiveDate;
use log::{debug, warn};
use thiserror::Error;

use crate::models::{
    Animal, CycleStatistics, HeatCycleRecord, ReproductiveStatus, ReproductiveSummary,
};
use crate::policy::BreedingPolicy;

/// Reproductive engine errors. All are caller input problems.
#[derive(Error, Debug, PartialEq)]
pub enum ReproError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Heat cycle {cycle_id} ends ({end}) before it starts ({start})")]
    EndBeforeStart {
        cycle_id: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Heat cycle {cycle_id} is open but is not the most recent cycle")]
    OpenCycleNotLatest { cycle_id: String },

    #[error("{field} {date} is after the reference date {as_of}")]
    DateAfterReference {
        field: &'static str,
        date: NaiveDate,
        as_of: NaiveDate,
    },

    #[error("Puppies alive ({alive}) exceeds puppies born ({born})")]
    InvalidLitter { born: u32, alive: u32 },

    #[error("Whelp date {whelp} precedes tie date {tie}")]
    WhelpBeforeTie { tie: NaiveDate, whelp: NaiveDate },

    #[error("Animal is not pregnant: {0}")]
    NotPregnant(String),
}

pub type ReproResult<T> = Result<T, ReproError>;

/// Check cycle history invariants: chronological bounds, and only the most
/// recent cycle per animal may be open.
pub fn validate_cycles(cycles: &[HeatCycleRecord]) -> ReproResult<()> {
    let mut latest: HashMap<&str, NaiveDate> = HashMap::new();
    for cycle in cycles {
        if let Some(end) = cycle.end_date {
            if end < cycle.start_date {
                return Err(ReproError::EndBeforeStart {
                    cycle_id: cycle.id.clone(),
                    start: cycle.start_date,
                    end,
                });
            }
        }
        let entry = latest.entry(cycle.animal_id.as_str()).or_insert(cycle.start_date);
        if cycle.start_date > *entry {
            *entry = cycle.start_date;
        }
    }

    for cycle in cycles.iter().filter(|c| c.is_open()) {
        let newest = latest
            .get(cycle.animal_id.as_str())
            .copied()
            .unwrap_or(cycle.start_date);
        if cycle.start_date < newest {
            return Err(ReproError::OpenCycleNotLatest {
                cycle_id: cycle.id.clone(),
            });
        }
    }

    Ok(())
}

/// Build the combined reproductive summary for one animal.
pub fn summarize(
    animal: &Animal,
    cycles: &[HeatCycleRecord],
    as_of: NaiveDate,
    policy: &BreedingPolicy,
) -> ReproResult<ReproductiveSummary> {
    if let Err(e) = validate_inputs(animal, cycles, as_of) {
        warn!("summary for {} rejected: {}", animal.id, e);
        return Err(e);
    }

    if !animal.is_female() {
        debug!("animal {} is male; no cycle tracking", animal.id);
        return Ok(empty_summary(animal, as_of, CycleStatistics::unknown()));
    }

    let stats = cycle_statistics(cycles);
    let next_heat = predict_next_heat(animal, cycles, &stats, as_of, policy);
    let assessment = assess_status(animal, next_heat.as_ref(), as_of, policy);
    let gestation = gestation_status(animal, as_of, policy);

    debug!("animal {} classified {:?} on {}", animal.id, assessment.status, as_of);

    let mut summary = empty_summary(animal, as_of, stats);
    summary.status = assessment.status;
    if let Some(heat) = assessment.heat {
        summary.day_of_cycle = Some(heat.day_of_cycle);
        summary.stage = Some(heat.stage);
        summary.stage_description = Some(heat.stage.description().to_string());
        summary.fertility = Some(heat.fertility);
        summary.fertility_window = Some(heat.fertility_window);
    }
    if let Some(prediction) = next_heat {
        summary.next_heat_date = Some(prediction.next_heat_date);
        summary.days_until_next_heat = Some(prediction.days_until_next_heat);
    }
    if let Some(gestation) = gestation {
        summary.gestation_days = Some(gestation.gestation_days);
        summary.estimated_due_date = Some(gestation.estimated_due_date);
        summary.days_until_due = Some(gestation.days_until_due);
    }

    Ok(summary)
}

fn validate_inputs(animal: &Animal, cycles: &[HeatCycleRecord], as_of: NaiveDate) -> ReproResult<()> {
    validate_cycles(cycles)?;

    let dated_fields = [
        ("last_heat_date", animal.last_heat_date),
        ("tie_date", animal.tie_date),
    ];
    for (field, date) in dated_fields {
        if let Some(date) = date {
            if date > as_of {
                return Err(ReproError::DateAfterReference { field, date, as_of });
            }
        }
    }
    Ok(())
}

fn empty_summary(animal: &Animal, as_of: NaiveDate, stats: CycleStatistics) -> ReproductiveSummary {
    ReproductiveSummary {
        animal_id: animal.id.clone(),
        as_of,
        status: ReproductiveStatus::NotInHeat,
        day_of_cycle: None,
        stage: None,
        stage_description: None,
        fertility: None,
        fertility_window: None,
        next_heat_date: None,
        days_until_next_heat: None,
        gestation_days: None,
        estimated_due_date: None,
        days_until_due: None,
        cycle_statistics: stats,
    }
}
