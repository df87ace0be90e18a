//! Gestation tracking and whelping validation.

use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::models::{Animal, GestationStatus, PregnancyRecord};
use crate::policy::BreedingPolicy;

use super::date_math::{add_days, days_between};
use super::{ReproError, ReproResult};

/// Due date for a tie date. Fixed-length, not breed-adjusted.
pub fn estimated_due_date(tie_date: NaiveDate, policy: &BreedingPolicy) -> NaiveDate {
    add_days(tie_date, policy.gestation_days)
}

/// Gestation progress, or `None` unless pregnant with a known tie date.
pub fn gestation_status(
    animal: &Animal,
    as_of: NaiveDate,
    policy: &BreedingPolicy,
) -> Option<GestationStatus> {
    if !animal.is_pregnant {
        return None;
    }
    let tie_date = animal.tie_date?;
    let due = estimated_due_date(tie_date, policy);

    Some(GestationStatus {
        tie_date,
        gestation_days: days_between(tie_date, as_of),
        estimated_due_date: due,
        days_until_due: days_between(as_of, due),
    })
}

/// Whelping outcome supplied by the caregiver.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WhelpingReport {
    pub actual_whelp_date: NaiveDate,
    pub puppies_born: u32,
    pub puppies_alive: u32,
}

/// State changes the record store must apply after a validated whelping.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WhelpingOutcome {
    /// Dam with pregnancy flag and tie date cleared
    pub dam: Animal,
    /// Pregnancy with whelp date and counts filled in
    pub pregnancy: PregnancyRecord,
}

/// Validate a whelping report and derive the terminal pregnancy state.
///
/// Nothing is persisted here; the caller writes `WhelpingOutcome` back.
pub fn complete_pregnancy(
    dam: &Animal,
    pregnancy: &PregnancyRecord,
    report: WhelpingReport,
) -> ReproResult<WhelpingOutcome> {
    if !dam.is_pregnant {
        warn!("rejecting whelping for {}: not pregnant", dam.id);
        return Err(ReproError::NotPregnant(dam.id.clone()));
    }

    if report.puppies_alive > report.puppies_born {
        warn!(
            "rejecting whelping for {}: {} alive of {} born",
            dam.id, report.puppies_alive, report.puppies_born
        );
        return Err(ReproError::InvalidLitter {
            born: report.puppies_born,
            alive: report.puppies_alive,
        });
    }

    if let Some(tie_date) = dam.tie_date {
        if report.actual_whelp_date < tie_date {
            warn!("rejecting whelping for {}: whelp date precedes tie", dam.id);
            return Err(ReproError::WhelpBeforeTie {
                tie: tie_date,
                whelp: report.actual_whelp_date,
            });
        }
    }

    let mut finished_dam = dam.clone();
    finished_dam.end_pregnancy();

    let mut finished = pregnancy.clone();
    finished.actual_whelp_date = Some(report.actual_whelp_date);
    finished.puppies_born = Some(report.puppies_born);
    finished.puppies_alive = Some(report.puppies_alive);

    Ok(WhelpingOutcome {
        dam: finished_dam,
        pregnancy: finished,
    })
}
