//! Reproductive history records: heat cycles, breedings, pregnancies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::policy::BreedingPolicy;
use crate::repro::{date_math, ReproError, ReproResult};

/// A single observed heat cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatCycleRecord {
    /// Unique cycle ID
    pub id: String,
    /// Owning animal ID
    pub animal_id: String,
    /// First day of bleeding / swelling
    pub start_date: NaiveDate,
    /// Last day of the cycle; `None` while in progress
    pub end_date: Option<NaiveDate>,
    /// Recorded cycle length, if the caregiver entered one
    pub cycle_length_days: Option<i64>,
    /// Caregiver intensity note (opaque to the engine)
    pub intensity: Option<String>,
    /// Observed symptoms (opaque to the engine)
    pub symptoms: Vec<String>,
    /// Per-animal sequence number
    pub sequence: u32,
}

impl HeatCycleRecord {
    /// Create an open (in-progress) cycle.
    pub fn new(animal_id: String, start_date: NaiveDate, sequence: u32) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            animal_id,
            start_date,
            end_date: None,
            cycle_length_days: None,
            intensity: None,
            symptoms: Vec::new(),
            sequence,
        }
    }

    /// Whether the cycle is still in progress.
    pub fn is_open(&self) -> bool {
        self.end_date.is_none()
    }

    /// Close the cycle on `end_date`.
    ///
    /// `cycle_length_days` is the interval between heats and is left as the
    /// caregiver recorded it.
    pub fn close(&mut self, end_date: NaiveDate) -> ReproResult<()> {
        if end_date < self.start_date {
            return Err(ReproError::EndBeforeStart {
                cycle_id: self.id.clone(),
                start: self.start_date,
                end: end_date,
            });
        }
        self.end_date = Some(end_date);
        Ok(())
    }

    /// Days the heat itself lasted, inclusive; `None` while open.
    pub fn heat_duration_days(&self) -> Option<i64> {
        self.end_date
            .map(|end| date_math::days_between(self.start_date, end) + 1)
    }
}

/// How a breeding was performed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BreedingMethod {
    Natural,
    ArtificialFresh,
    ArtificialChilled,
    ArtificialFrozen,
}

impl BreedingMethod {
    /// Parse a stored method label.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "natural" => Some(BreedingMethod::Natural),
            "artificial_fresh" | "ai_fresh" => Some(BreedingMethod::ArtificialFresh),
            "artificial_chilled" | "ai_chilled" => Some(BreedingMethod::ArtificialChilled),
            "artificial_frozen" | "ai_frozen" => Some(BreedingMethod::ArtificialFrozen),
            _ => None,
        }
    }

    /// Canonical label.
    pub fn as_str(&self) -> &'static str {
        match self {
            BreedingMethod::Natural => "natural",
            BreedingMethod::ArtificialFresh => "artificial_fresh",
            BreedingMethod::ArtificialChilled => "artificial_chilled",
            BreedingMethod::ArtificialFrozen => "artificial_frozen",
        }
    }
}

/// A logged mating.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BreedingRecord {
    /// Unique breeding ID
    pub id: String,
    /// Dam ID
    pub female_id: String,
    /// Sire ID
    pub male_id: String,
    /// Heat cycle the mating happened in
    pub heat_cycle_id: Option<String>,
    /// Mating date
    pub tie_date: NaiveDate,
    /// Breeding method
    pub method: BreedingMethod,
    /// Set later by the caller once pregnancy is confirmed or ruled out
    pub successful: Option<bool>,
    /// Always `tie_date` + gestation length
    pub estimated_due_date: NaiveDate,
}

impl BreedingRecord {
    /// Log a new mating. The due date is derived from the policy gestation length.
    pub fn new(
        female_id: String,
        male_id: String,
        heat_cycle_id: Option<String>,
        tie_date: NaiveDate,
        method: BreedingMethod,
        policy: &BreedingPolicy,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            female_id,
            male_id,
            heat_cycle_id,
            tie_date,
            method,
            successful: None,
            estimated_due_date: date_math::add_days(tie_date, policy.gestation_days),
        }
    }
}

/// A confirmed pregnancy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PregnancyRecord {
    /// Unique pregnancy ID
    pub id: String,
    /// Dam ID
    pub female_id: String,
    /// Breeding that produced this pregnancy
    pub breeding_record_id: String,
    /// Date pregnancy was confirmed (ultrasound, palpation, relaxin test)
    pub confirmation_date: Option<NaiveDate>,
    /// Expected whelping date
    pub estimated_whelp_date: NaiveDate,
    /// Actual whelping date, once recorded
    pub actual_whelp_date: Option<NaiveDate>,
    /// Puppies born
    pub puppies_born: Option<u32>,
    /// Puppies alive at whelping
    pub puppies_alive: Option<u32>,
}

impl PregnancyRecord {
    /// Open a pregnancy record for a breeding.
    pub fn from_breeding(breeding: &BreedingRecord, confirmation_date: Option<NaiveDate>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            female_id: breeding.female_id.clone(),
            breeding_record_id: breeding.id.clone(),
            confirmation_date,
            estimated_whelp_date: breeding.estimated_due_date,
            actual_whelp_date: None,
            puppies_born: None,
            puppies_alive: None,
        }
    }

    /// Terminal once the whelp date and outcome are recorded.
    pub fn is_complete(&self) -> bool {
        self.actual_whelp_date.is_some() && self.puppies_born.is_some()
    }
}
