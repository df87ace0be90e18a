//! Kennel Breeding Core Library
//!
//! Reproductive-cycle tracking and breeding compatibility engine for a
//! dog-breeding record system.
//!
//! # Architecture
//!
//! ```text
//!   Record Store (SQLite)
//!         │
//!         │  animal, heat cycles            sire + dam markers, COI
//!         ▼                                          ▼
//!   ┌─────────────────────────────┐      ┌──────────────────────────┐
//!   │ Cycle Statistics            │      │ Compatibility Analyzer   │
//!   │   → Next-Heat Projection    │      │   pairwise rule table    │
//!   │   → Status Classification   │      │   + COI banding          │
//!   │ Gestation Tracking          │      │           │              │
//!   └──────────────┬──────────────┘      │ Score Aggregator         │
//!                  ▼                     └───────────┬──────────────┘
//!          Reproductive Summary                Pairing Report
//! ```
//!
//! # Core Principle
//!
//! **Derived values are never stored.** Every summary and score is recomputed
//! from the records and an explicit `as_of` date, so repeated calls with the
//! same inputs return identical results.
//!
//! # Modules
//!
//! - [`models`]: Domain types (Animal, HeatCycleRecord, PairingAnalysis, etc.)
//! - [`repro`]: Cycle statistics, status, next-heat projection, gestation
//! - [`genetics`]: Hereditary compatibility analysis and pairing score
//! - [`policy`]: Policy defaults (cycle length, gestation, COI bands)
//! - [`db`]: SQLite record store

pub mod db;
pub mod genetics;
pub mod models;
pub mod policy;
pub mod repro;

// Re-export commonly used types
pub use db::Database;
pub use models::{
    Animal, BreedingRecord, HealthWarning, HeatCycleRecord, HereditaryMarker, MarkerMap,
    MarkerStatus, PairingAnalysis, PairingReport, PregnancyRecord, ReproductiveStatus,
    ReproductiveSummary, RiskLevel, Sex,
};
pub use policy::BreedingPolicy;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use repro::date_math::{format_date, parse_date, parse_optional_date};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum KennelError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<db::DbError> for KennelError {
    fn from(e: db::DbError) -> Self {
        match e {
            db::DbError::NotFound(id) => KennelError::NotFound(id),
            other => KennelError::DatabaseError(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for KennelError {
    fn from(e: serde_json::Error) -> Self {
        KennelError::SerializationError(e.to_string())
    }
}

impl From<repro::ReproError> for KennelError {
    fn from(e: repro::ReproError) -> Self {
        KennelError::InvalidInput(e.to_string())
    }
}

impl From<genetics::GeneticsError> for KennelError {
    fn from(e: genetics::GeneticsError) -> Self {
        KennelError::InvalidInput(e.to_string())
    }
}

impl From<policy::PolicyError> for KennelError {
    fn from(e: policy::PolicyError) -> Self {
        KennelError::InvalidInput(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for KennelError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        KennelError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a database at the given path with default policy.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<KennelCore>, KennelError> {
    let db = Database::open(&path)?;
    Ok(KennelCore::wrap(db, BreedingPolicy::default()))
}

/// Open or create a database with policy overrides given as JSON.
#[uniffi::export]
pub fn open_database_with_policy(
    path: String,
    policy_json: String,
) -> Result<Arc<KennelCore>, KennelError> {
    let policy = BreedingPolicy::from_json(&policy_json)?;
    let db = Database::open(&path)?;
    Ok(KennelCore::wrap(db, policy))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<KennelCore>, KennelError> {
    let db = Database::open_in_memory()?;
    Ok(KennelCore::wrap(db, BreedingPolicy::default()))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe database wrapper for FFI.
#[derive(uniffi::Object)]
pub struct KennelCore {
    db: Arc<Mutex<Database>>,
    policy: BreedingPolicy,
}

impl KennelCore {
    fn wrap(db: Database, policy: BreedingPolicy) -> Arc<Self> {
        Arc::new(Self {
            db: Arc::new(Mutex::new(db)),
            policy,
        })
    }
}

fn require_animal(db: &Database, id: &str) -> Result<Animal, KennelError> {
    db.get_animal(id)?
        .ok_or_else(|| KennelError::NotFound(format!("animal {}", id)))
}

fn resolve_as_of(as_of: Option<String>) -> Result<NaiveDate, KennelError> {
    Ok(parse_optional_date(as_of.as_deref())?.unwrap_or_else(|| chrono::Local::now().date_naive()))
}

#[uniffi::export]
impl KennelCore {
    // =========================================================================
    // Animal Operations
    // =========================================================================

    /// Create a new animal.
    pub fn create_animal(&self, name: String, sex: String) -> Result<FfiAnimal, KennelError> {
        let sex = Sex::parse(&sex)
            .ok_or_else(|| KennelError::InvalidInput(format!("unknown sex: {}", sex)))?;
        let db = self.db.lock()?;
        let animal = Animal::new(name, sex);
        db.insert_animal(&animal)?;
        Ok(animal.into())
    }

    /// Add or update an animal.
    pub fn upsert_animal(&self, animal: FfiAnimal) -> Result<(), KennelError> {
        let animal = Animal::try_from(animal)?;
        let db = self.db.lock()?;
        db.upsert_animal(&animal)?;
        Ok(())
    }

    /// Get an animal by ID.
    pub fn get_animal(&self, id: String) -> Result<Option<FfiAnimal>, KennelError> {
        let db = self.db.lock()?;
        Ok(db.get_animal(&id)?.map(|a| a.into()))
    }

    // =========================================================================
    // Heat Cycle Operations
    // =========================================================================

    /// Start a new heat cycle. Fails while another cycle is still open.
    pub fn log_heat_cycle(
        &self,
        animal_id: String,
        start_date: String,
    ) -> Result<FfiHeatCycle, KennelError> {
        let start_date = parse_date(&start_date)?;
        let db = self.db.lock()?;
        let mut animal = require_animal(&db, &animal_id)?;
        if !animal.is_female() {
            return Err(KennelError::InvalidInput(format!(
                "animal {} is male",
                animal_id
            )));
        }
        if let Some(open) = db.open_heat_cycle(&animal_id)? {
            return Err(KennelError::InvalidInput(format!(
                "cycle {} is still open; close it first",
                open.id
            )));
        }

        let sequence = db.next_cycle_sequence(&animal_id)?;
        let cycle = HeatCycleRecord::new(animal_id, start_date, sequence);
        db.insert_heat_cycle(&cycle)?;

        if animal.last_heat_date.map_or(true, |d| d < start_date) {
            animal.last_heat_date = Some(start_date);
            db.update_animal(&animal)?;
        }
        Ok(cycle.into())
    }

    /// Close the animal's open heat cycle.
    pub fn end_heat_cycle(
        &self,
        animal_id: String,
        end_date: String,
    ) -> Result<FfiHeatCycle, KennelError> {
        let end_date = parse_date(&end_date)?;
        let db = self.db.lock()?;
        let mut cycle = db
            .open_heat_cycle(&animal_id)?
            .ok_or_else(|| KennelError::NotFound(format!("open cycle for {}", animal_id)))?;
        cycle.close(end_date)?;
        db.update_heat_cycle(&cycle)?;
        Ok(cycle.into())
    }

    /// List an animal's heat cycles, most recent first.
    pub fn list_heat_cycles(&self, animal_id: String) -> Result<Vec<FfiHeatCycle>, KennelError> {
        let db = self.db.lock()?;
        let cycles = db.list_heat_cycles(&animal_id)?;
        Ok(cycles.into_iter().map(|c| c.into()).collect())
    }

    // =========================================================================
    // Breeding & Pregnancy Operations
    // =========================================================================

    /// Log a mating against the dam's most recent cycle.
    pub fn log_breeding(
        &self,
        female_id: String,
        male_id: String,
        tie_date: String,
        method: String,
    ) -> Result<FfiBreedingRecord, KennelError> {
        let tie_date = parse_date(&tie_date)?;
        let method = models::BreedingMethod::parse(&method)
            .ok_or_else(|| KennelError::InvalidInput(format!("unknown method: {}", method)))?;
        let db = self.db.lock()?;
        let dam = require_animal(&db, &female_id)?;
        let sire = require_animal(&db, &male_id)?;
        if !dam.is_female() || sire.is_female() {
            return Err(KennelError::InvalidInput(
                "breeding requires a female dam and a male sire".into(),
            ));
        }

        let cycle_id = db
            .list_heat_cycles(&female_id)?
            .into_iter()
            .find(|c| c.start_date <= tie_date)
            .map(|c| c.id);
        let record = BreedingRecord::new(female_id, male_id, cycle_id, tie_date, method, &self.policy);
        db.insert_breeding_record(&record)?;
        Ok(record.into())
    }

    /// Confirm a breeding took: opens a pregnancy and marks the dam pregnant.
    pub fn confirm_pregnancy(
        &self,
        breeding_id: String,
        confirmation_date: Option<String>,
    ) -> Result<FfiPregnancy, KennelError> {
        let confirmation_date = parse_optional_date(confirmation_date.as_deref())?;
        let db = self.db.lock()?;
        let breeding = db
            .get_breeding_record(&breeding_id)?
            .ok_or_else(|| KennelError::NotFound(format!("breeding {}", breeding_id)))?;
        if let Some(confirmed) = confirmation_date {
            if confirmed < breeding.tie_date {
                return Err(KennelError::InvalidInput(format!(
                    "confirmation {} precedes tie {}",
                    confirmed, breeding.tie_date
                )));
            }
        }
        let mut dam = require_animal(&db, &breeding.female_id)?;
        if dam.is_pregnant {
            return Err(KennelError::InvalidInput(format!(
                "animal {} already has a pregnancy in progress",
                dam.id
            )));
        }

        let pregnancy = PregnancyRecord::from_breeding(&breeding, confirmation_date);
        dam.begin_pregnancy(breeding.tie_date);
        db.apply_pregnancy_confirmation(&pregnancy, &dam)?;
        Ok(pregnancy.into())
    }

    /// Record a whelping and end the dam's pregnancy.
    pub fn complete_pregnancy(
        &self,
        female_id: String,
        actual_whelp_date: String,
        puppies_born: u32,
        puppies_alive: u32,
    ) -> Result<FfiPregnancy, KennelError> {
        let report = repro::WhelpingReport {
            actual_whelp_date: parse_date(&actual_whelp_date)?,
            puppies_born,
            puppies_alive,
        };
        let db = self.db.lock()?;
        let dam = require_animal(&db, &female_id)?;
        let pregnancy = db
            .active_pregnancy(&female_id)?
            .ok_or_else(|| KennelError::NotFound(format!("active pregnancy for {}", female_id)))?;

        let outcome = repro::complete_pregnancy(&dam, &pregnancy, report)?;
        db.apply_whelping(&outcome)?;
        Ok(outcome.pregnancy.into())
    }

    /// List a dam's pregnancies, most recent first.
    pub fn list_pregnancies(&self, female_id: String) -> Result<Vec<FfiPregnancy>, KennelError> {
        let db = self.db.lock()?;
        let pregnancies = db.list_pregnancies(&female_id)?;
        Ok(pregnancies.into_iter().map(|p| p.into()).collect())
    }

    // =========================================================================
    // Genetics Operations
    // =========================================================================

    /// Record a hereditary test result.
    pub fn record_hereditary_marker(
        &self,
        animal_id: String,
        condition: String,
        status: String,
        genotype: Option<String>,
        test_date: Option<String>,
    ) -> Result<(), KennelError> {
        let marker = HereditaryMarker {
            status: MarkerStatus::parse(&status)
                .ok_or_else(|| KennelError::InvalidInput(format!("unknown status: {}", status)))?,
            genotype,
            test_date: parse_optional_date(test_date.as_deref())?,
        };
        let db = self.db.lock()?;
        require_animal(&db, &animal_id)?;
        db.upsert_marker(&animal_id, &condition, &marker)?;
        Ok(())
    }

    // =========================================================================
    // Engine Operations
    // =========================================================================

    /// Reproductive summary as of a date (defaults to today).
    pub fn reproductive_summary(
        &self,
        animal_id: String,
        as_of: Option<String>,
    ) -> Result<FfiReproductiveSummary, KennelError> {
        Ok(self.summary(&animal_id, as_of)?.into())
    }

    /// Reproductive summary as JSON.
    pub fn reproductive_summary_json(
        &self,
        animal_id: String,
        as_of: Option<String>,
    ) -> Result<String, KennelError> {
        Ok(self.summary(&animal_id, as_of)?.to_json()?)
    }

    /// Compatibility analysis and score for a sire/dam pair.
    ///
    /// `coi` is the pedigree COI in percent; the policy placeholder is used when absent.
    pub fn pairing_report(
        &self,
        sire_id: String,
        dam_id: String,
        coi: Option<f64>,
    ) -> Result<FfiPairingReport, KennelError> {
        Ok(self.report(&sire_id, &dam_id, coi)?.into())
    }

    /// Pairing report as JSON.
    pub fn pairing_report_json(
        &self,
        sire_id: String,
        dam_id: String,
        coi: Option<f64>,
    ) -> Result<String, KennelError> {
        Ok(self.report(&sire_id, &dam_id, coi)?.to_json()?)
    }
}

impl KennelCore {
    fn summary(&self, animal_id: &str, as_of: Option<String>) -> Result<ReproductiveSummary, KennelError> {
        let as_of = resolve_as_of(as_of)?;
        let db = self.db.lock()?;
        let animal = require_animal(&db, animal_id)?;
        let cycles = db.list_heat_cycles(animal_id)?;
        Ok(repro::summarize(&animal, &cycles, as_of, &self.policy)?)
    }

    fn report(&self, sire_id: &str, dam_id: &str, coi: Option<f64>) -> Result<PairingReport, KennelError> {
        let db = self.db.lock()?;
        let sire = require_animal(&db, sire_id)?;
        let dam = require_animal(&db, dam_id)?;
        let sire_markers = db.get_markers(sire_id)?;
        let dam_markers = db.get_markers(dam_id)?;
        Ok(genetics::pairing_report(
            &sire,
            &sire_markers,
            &dam,
            &dam_markers,
            coi,
            &self.policy,
        )?)
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe animal.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAnimal {
    pub id: String,
    pub name: String,
    pub sex: String,
    pub last_heat_date: Option<String>,
    pub is_pregnant: bool,
    pub tie_date: Option<String>,
}

impl From<Animal> for FfiAnimal {
    fn from(animal: Animal) -> Self {
        Self {
            id: animal.id,
            name: animal.name,
            sex: animal.sex.as_str().to_string(),
            last_heat_date: animal.last_heat_date.map(format_date),
            is_pregnant: animal.is_pregnant,
            tie_date: animal.tie_date.map(format_date),
        }
    }
}

impl TryFrom<FfiAnimal> for Animal {
    type Error = KennelError;

    fn try_from(animal: FfiAnimal) -> Result<Self, Self::Error> {
        Ok(Animal {
            sex: Sex::parse(&animal.sex)
                .ok_or_else(|| KennelError::InvalidInput(format!("unknown sex: {}", animal.sex)))?,
            last_heat_date: parse_optional_date(animal.last_heat_date.as_deref())?,
            tie_date: parse_optional_date(animal.tie_date.as_deref())?,
            id: animal.id,
            name: animal.name,
            is_pregnant: animal.is_pregnant,
        })
    }
}

/// FFI-safe heat cycle.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHeatCycle {
    pub id: String,
    pub animal_id: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub cycle_length_days: Option<i64>,
    pub heat_duration_days: Option<i64>,
    pub sequence: u32,
}

impl From<HeatCycleRecord> for FfiHeatCycle {
    fn from(cycle: HeatCycleRecord) -> Self {
        let heat_duration_days = cycle.heat_duration_days();
        Self {
            id: cycle.id,
            animal_id: cycle.animal_id,
            start_date: format_date(cycle.start_date),
            end_date: cycle.end_date.map(format_date),
            cycle_length_days: cycle.cycle_length_days,
            heat_duration_days,
            sequence: cycle.sequence,
        }
    }
}

/// FFI-safe breeding record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBreedingRecord {
    pub id: String,
    pub female_id: String,
    pub male_id: String,
    pub heat_cycle_id: Option<String>,
    pub tie_date: String,
    pub method: String,
    pub successful: Option<bool>,
    pub estimated_due_date: String,
}

impl From<BreedingRecord> for FfiBreedingRecord {
    fn from(record: BreedingRecord) -> Self {
        Self {
            id: record.id,
            female_id: record.female_id,
            male_id: record.male_id,
            heat_cycle_id: record.heat_cycle_id,
            tie_date: format_date(record.tie_date),
            method: record.method.as_str().to_string(),
            successful: record.successful,
            estimated_due_date: format_date(record.estimated_due_date),
        }
    }
}

/// FFI-safe pregnancy.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPregnancy {
    pub id: String,
    pub female_id: String,
    pub breeding_record_id: String,
    pub confirmation_date: Option<String>,
    pub estimated_whelp_date: String,
    pub actual_whelp_date: Option<String>,
    pub puppies_born: Option<u32>,
    pub puppies_alive: Option<u32>,
}

impl From<PregnancyRecord> for FfiPregnancy {
    fn from(pregnancy: PregnancyRecord) -> Self {
        Self {
            id: pregnancy.id,
            female_id: pregnancy.female_id,
            breeding_record_id: pregnancy.breeding_record_id,
            confirmation_date: pregnancy.confirmation_date.map(format_date),
            estimated_whelp_date: format_date(pregnancy.estimated_whelp_date),
            actual_whelp_date: pregnancy.actual_whelp_date.map(format_date),
            puppies_born: pregnancy.puppies_born,
            puppies_alive: pregnancy.puppies_alive,
        }
    }
}

/// FFI-safe reproductive summary.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiReproductiveSummary {
    pub animal_id: String,
    pub as_of: String,
    pub status: String,
    pub day_of_cycle: Option<i64>,
    pub stage: Option<String>,
    pub stage_description: Option<String>,
    pub fertility: Option<String>,
    pub fertility_window_start: Option<String>,
    pub fertility_window_end: Option<String>,
    pub next_heat_date: Option<String>,
    pub days_until_next_heat: Option<i64>,
    pub gestation_days: Option<i64>,
    pub estimated_due_date: Option<String>,
    pub days_until_due: Option<i64>,
    pub average_cycle_length: Option<i64>,
}

impl From<ReproductiveSummary> for FfiReproductiveSummary {
    fn from(summary: ReproductiveSummary) -> Self {
        Self {
            animal_id: summary.animal_id,
            as_of: format_date(summary.as_of),
            status: summary.status.label().to_string(),
            day_of_cycle: summary.day_of_cycle,
            stage: summary.stage.map(|s| s.name().to_string()),
            stage_description: summary.stage_description,
            fertility: summary.fertility.map(|f| f.as_str().to_string()),
            fertility_window_start: summary.fertility_window.map(|w| format_date(w.start)),
            fertility_window_end: summary.fertility_window.map(|w| format_date(w.end)),
            next_heat_date: summary.next_heat_date.map(format_date),
            days_until_next_heat: summary.days_until_next_heat,
            gestation_days: summary.gestation_days,
            estimated_due_date: summary.estimated_due_date.map(format_date),
            days_until_due: summary.days_until_due,
            average_cycle_length: summary.cycle_statistics.average_cycle_length,
        }
    }
}

/// FFI-safe health warning.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHealthWarning {
    pub condition: String,
    pub risk_level: String,
    pub description: String,
    pub affected_percentage: Option<u8>,
}

impl From<HealthWarning> for FfiHealthWarning {
    fn from(warning: HealthWarning) -> Self {
        Self {
            condition: warning.condition,
            risk_level: warning.risk_level.as_str().to_string(),
            description: warning.description,
            affected_percentage: warning.affected_percentage,
        }
    }
}

/// FFI-safe pairing report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPairingReport {
    pub sire_id: String,
    pub dam_id: String,
    pub coi: f64,
    pub health_warnings: Vec<FfiHealthWarning>,
    pub compatible_conditions: Vec<String>,
    pub incompatible_conditions: Vec<String>,
    pub score: u8,
    pub tier: String,
    pub recommendation: String,
}

impl From<PairingReport> for FfiPairingReport {
    fn from(report: PairingReport) -> Self {
        Self {
            sire_id: report.sire_id,
            dam_id: report.dam_id,
            coi: report.analysis.coi,
            health_warnings: report
                .analysis
                .health_warnings
                .into_iter()
                .map(|w| w.into())
                .collect(),
            compatible_conditions: report.analysis.compatible_conditions,
            incompatible_conditions: report.analysis.incompatible_conditions,
            score: report.score.score,
            tier: report.score.tier.as_str().to_string(),
            recommendation: report.score.recommendation_text().to_string(),
        }
    }
}
