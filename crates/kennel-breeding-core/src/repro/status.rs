//! Reproductive state classification.
//!
//! Rules, first match wins:
//! 1. Pregnant flag set → `Pregnant`
//! 2. Last heat started 0..=heat_duration days ago → `InHeat` (with stage details)
//! 3. Inside the lead window before a predicted heat → `PreHeat`
//! 4. Otherwise → `NotInHeat`

use chrono::NaiveDate;
use log::debug;

use crate::models::{
    Animal, Fertility, FertilityWindow, HeatDetails, HeatStage, NextHeatPrediction,
    ReproductiveStatus, StatusAssessment,
};
use crate::policy::BreedingPolicy;

use super::date_math::{add_days, days_between};

/// Classify the animal's state on `as_of`.
pub fn assess_status(
    animal: &Animal,
    next_heat: Option<&NextHeatPrediction>,
    as_of: NaiveDate,
    policy: &BreedingPolicy,
) -> StatusAssessment {
    if animal.is_pregnant {
        return StatusAssessment {
            status: ReproductiveStatus::Pregnant,
            heat: None,
        };
    }

    if let Some(last_heat) = animal.last_heat_date {
        let elapsed = days_between(last_heat, as_of);
        if (0..=policy.heat_duration_days).contains(&elapsed) {
            let details = heat_details(last_heat, as_of, policy);
            debug!(
                "animal {} in heat: day {} ({})",
                animal.id,
                details.day_of_cycle,
                details.stage.name()
            );
            return StatusAssessment {
                status: ReproductiveStatus::InHeat,
                heat: Some(details),
            };
        }
    }

    if let Some(prediction) = next_heat {
        let lead_start = add_days(prediction.next_heat_date, -policy.pre_heat_lead_days);
        if as_of >= lead_start && as_of < prediction.next_heat_date {
            debug!(
                "animal {} pre-heat: {} days until predicted heat",
                animal.id, prediction.days_until_next_heat
            );
            return StatusAssessment {
                status: ReproductiveStatus::PreHeat,
                heat: None,
            };
        }
    }

    StatusAssessment {
        status: ReproductiveStatus::NotInHeat,
        heat: None,
    }
}

/// Stage, fertility, and window for a heat that started on `last_heat`.
pub fn heat_details(last_heat: NaiveDate, as_of: NaiveDate, policy: &BreedingPolicy) -> HeatDetails {
    let day_of_cycle = days_between(last_heat, as_of) + 1;
    HeatDetails {
        day_of_cycle,
        stage: HeatStage::for_day(day_of_cycle),
        fertility: Fertility::for_day(day_of_cycle),
        fertility_window: fertility_window(last_heat, policy),
    }
}

/// Breeding window for a heat that started on `last_heat`.
pub fn fertility_window(last_heat: NaiveDate, policy: &BreedingPolicy) -> FertilityWindow {
    FertilityWindow {
        start: add_days(last_heat, policy.fertility_window_start_offset),
        end: add_days(last_heat, policy.fertility_window_end_offset),
    }
}
