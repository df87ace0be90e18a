//! Heat cycle, breeding, and pregnancy database operations.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{parse_json_list, parse_label, Database, DbError, DbResult};
use crate::models::{Animal, BreedingMethod, BreedingRecord, HeatCycleRecord, PregnancyRecord};
use crate::repro::WhelpingOutcome;

const CYCLE_COLUMNS: &str =
    "id, animal_id, start_date, end_date, cycle_length_days, intensity, symptoms, sequence";

const BREEDING_COLUMNS: &str =
    "id, female_id, male_id, heat_cycle_id, tie_date, method, successful, estimated_due_date";

const PREGNANCY_COLUMNS: &str = "id, female_id, breeding_record_id, confirmation_date, \
     estimated_whelp_date, actual_whelp_date, puppies_born, puppies_alive";

fn cycle_from_row(row: &Row<'_>) -> rusqlite::Result<HeatCycleRecord> {
    Ok(HeatCycleRecord {
        id: row.get(0)?,
        animal_id: row.get(1)?,
        start_date: row.get(2)?,
        end_date: row.get(3)?,
        cycle_length_days: row.get(4)?,
        intensity: row.get(5)?,
        symptoms: parse_json_list(6, row.get(6)?)?,
        sequence: row.get(7)?,
    })
}

fn breeding_from_row(row: &Row<'_>) -> rusqlite::Result<BreedingRecord> {
    Ok(BreedingRecord {
        id: row.get(0)?,
        female_id: row.get(1)?,
        male_id: row.get(2)?,
        heat_cycle_id: row.get(3)?,
        tie_date: row.get(4)?,
        method: parse_label(5, row.get(5)?, BreedingMethod::parse)?,
        successful: row.get(6)?,
        estimated_due_date: row.get(7)?,
    })
}

fn pregnancy_from_row(row: &Row<'_>) -> rusqlite::Result<PregnancyRecord> {
    Ok(PregnancyRecord {
        id: row.get(0)?,
        female_id: row.get(1)?,
        breeding_record_id: row.get(2)?,
        confirmation_date: row.get(3)?,
        estimated_whelp_date: row.get(4)?,
        actual_whelp_date: row.get(5)?,
        puppies_born: row.get(6)?,
        puppies_alive: row.get(7)?,
    })
}

fn insert_pregnancy_row(conn: &Connection, pregnancy: &PregnancyRecord) -> DbResult<()> {
    conn.execute(
        &format!(
            "INSERT INTO pregnancy_records ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            PREGNANCY_COLUMNS
        ),
        params![
            pregnancy.id,
            pregnancy.female_id,
            pregnancy.breeding_record_id,
            pregnancy.confirmation_date,
            pregnancy.estimated_whelp_date,
            pregnancy.actual_whelp_date,
            pregnancy.puppies_born,
            pregnancy.puppies_alive,
        ],
    )?;
    Ok(())
}

impl Database {
    // =========================================================================
    // Heat cycles
    // =========================================================================

    /// Insert a heat cycle.
    pub fn insert_heat_cycle(&self, cycle: &HeatCycleRecord) -> DbResult<()> {
        let symptoms = serde_json::to_string(&cycle.symptoms)?;
        self.conn.execute(
            &format!(
                "INSERT INTO heat_cycles ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                CYCLE_COLUMNS
            ),
            params![
                cycle.id,
                cycle.animal_id,
                cycle.start_date,
                cycle.end_date,
                cycle.cycle_length_days,
                cycle.intensity,
                symptoms,
                cycle.sequence,
            ],
        )?;
        Ok(())
    }

    /// Update a heat cycle (typically to close it).
    pub fn update_heat_cycle(&self, cycle: &HeatCycleRecord) -> DbResult<bool> {
        let symptoms = serde_json::to_string(&cycle.symptoms)?;
        let rows_affected = self.conn.execute(
            r#"
            UPDATE heat_cycles SET
                start_date = ?2,
                end_date = ?3,
                cycle_length_days = ?4,
                intensity = ?5,
                symptoms = ?6,
                sequence = ?7
            WHERE id = ?1
            "#,
            params![
                cycle.id,
                cycle.start_date,
                cycle.end_date,
                cycle.cycle_length_days,
                cycle.intensity,
                symptoms,
                cycle.sequence,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// List an animal's heat cycles, most recent first.
    pub fn list_heat_cycles(&self, animal_id: &str) -> DbResult<Vec<HeatCycleRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM heat_cycles WHERE animal_id = ? ORDER BY start_date DESC",
            CYCLE_COLUMNS
        ))?;

        let rows = stmt.query_map([animal_id], cycle_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// The animal's in-progress cycle, if any.
    pub fn open_heat_cycle(&self, animal_id: &str) -> DbResult<Option<HeatCycleRecord>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM heat_cycles WHERE animal_id = ? AND end_date IS NULL \
                     ORDER BY start_date DESC LIMIT 1",
                    CYCLE_COLUMNS
                ),
                [animal_id],
                cycle_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// Next per-animal sequence number.
    pub fn next_cycle_sequence(&self, animal_id: &str) -> DbResult<u32> {
        let max: Option<u32> = self.conn.query_row(
            "SELECT MAX(sequence) FROM heat_cycles WHERE animal_id = ?",
            [animal_id],
            |row| row.get(0),
        )?;
        Ok(max.map_or(1, |m| m + 1))
    }

    // =========================================================================
    // Breedings
    // =========================================================================

    /// Insert a breeding record.
    pub fn insert_breeding_record(&self, record: &BreedingRecord) -> DbResult<()> {
        self.conn.execute(
            &format!(
                "INSERT INTO breeding_records ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                BREEDING_COLUMNS
            ),
            params![
                record.id,
                record.female_id,
                record.male_id,
                record.heat_cycle_id,
                record.tie_date,
                record.method.as_str(),
                record.successful,
                record.estimated_due_date,
            ],
        )?;
        Ok(())
    }

    /// Record whether a breeding took.
    pub fn set_breeding_success(&self, id: &str, successful: bool) -> DbResult<()> {
        let rows_affected = self.conn.execute(
            "UPDATE breeding_records SET successful = ?2 WHERE id = ?1",
            params![id, successful],
        )?;
        if rows_affected == 0 {
            return Err(DbError::NotFound(id.to_string()));
        }
        Ok(())
    }

    /// Get a breeding record by ID.
    pub fn get_breeding_record(&self, id: &str) -> DbResult<Option<BreedingRecord>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM breeding_records WHERE id = ?", BREEDING_COLUMNS),
                [id],
                breeding_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List a dam's breedings, most recent first.
    pub fn list_breeding_records(&self, female_id: &str) -> DbResult<Vec<BreedingRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM breeding_records WHERE female_id = ? ORDER BY tie_date DESC",
            BREEDING_COLUMNS
        ))?;

        let rows = stmt.query_map([female_id], breeding_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    // =========================================================================
    // Pregnancies
    // =========================================================================

    /// Insert a pregnancy record.
    pub fn insert_pregnancy(&self, pregnancy: &PregnancyRecord) -> DbResult<()> {
        insert_pregnancy_row(&self.conn, pregnancy)
    }

    /// The dam's pregnancy that has not whelped yet.
    pub fn active_pregnancy(&self, female_id: &str) -> DbResult<Option<PregnancyRecord>> {
        self.conn
            .query_row(
                &format!(
                    "SELECT {} FROM pregnancy_records \
                     WHERE female_id = ? AND actual_whelp_date IS NULL \
                     ORDER BY estimated_whelp_date DESC LIMIT 1",
                    PREGNANCY_COLUMNS
                ),
                [female_id],
                pregnancy_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List a dam's pregnancies, most recent first.
    pub fn list_pregnancies(&self, female_id: &str) -> DbResult<Vec<PregnancyRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM pregnancy_records WHERE female_id = ? \
             ORDER BY estimated_whelp_date DESC",
            PREGNANCY_COLUMNS
        ))?;

        let rows = stmt.query_map([female_id], pregnancy_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Persist a confirmed pregnancy atomically: mark the breeding successful,
    /// insert the pregnancy, and flag the dam pregnant.
    pub fn apply_pregnancy_confirmation(
        &self,
        pregnancy: &PregnancyRecord,
        dam: &Animal,
    ) -> DbResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        let updated = tx.execute(
            "UPDATE breeding_records SET successful = 1 WHERE id = ?1",
            params![pregnancy.breeding_record_id],
        )?;
        if updated == 0 {
            return Err(DbError::NotFound(pregnancy.breeding_record_id.clone()));
        }

        insert_pregnancy_row(&tx, pregnancy)?;

        let updated = tx.execute(
            r#"
            UPDATE animals SET
                is_pregnant = ?2,
                tie_date = ?3,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![dam.id, dam.is_pregnant, dam.tie_date],
        )?;
        if updated == 0 {
            return Err(DbError::NotFound(dam.id.clone()));
        }

        tx.commit()?;
        Ok(())
    }

    /// Persist a validated whelping atomically: close the pregnancy and clear
    /// the dam's pregnancy state.
    pub fn apply_whelping(&self, outcome: &WhelpingOutcome) -> DbResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        let updated = tx.execute(
            r#"
            UPDATE pregnancy_records SET
                actual_whelp_date = ?2,
                puppies_born = ?3,
                puppies_alive = ?4
            WHERE id = ?1
            "#,
            params![
                outcome.pregnancy.id,
                outcome.pregnancy.actual_whelp_date,
                outcome.pregnancy.puppies_born,
                outcome.pregnancy.puppies_alive,
            ],
        )?;
        if updated == 0 {
            return Err(DbError::NotFound(outcome.pregnancy.id.clone()));
        }

        let updated = tx.execute(
            r#"
            UPDATE animals SET
                is_pregnant = ?2,
                tie_date = ?3,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![outcome.dam.id, outcome.dam.is_pregnant, outcome.dam.tie_date],
        )?;
        if updated == 0 {
            return Err(DbError::NotFound(outcome.dam.id.clone()));
        }

        tx.commit()?;
        Ok(())
    }
}
