//! Hereditary marker database operations.

use rusqlite::params;

use super::{parse_label, Database, DbResult};
use crate::models::{HereditaryMarker, MarkerMap, MarkerStatus};

impl Database {
    /// Insert or replace one condition result for an animal.
    pub fn upsert_marker(
        &self,
        animal_id: &str,
        condition: &str,
        marker: &HereditaryMarker,
    ) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO hereditary_markers (animal_id, condition, status, genotype, test_date)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(animal_id, condition) DO UPDATE SET
                status = excluded.status,
                genotype = excluded.genotype,
                test_date = excluded.test_date
            "#,
            params![
                animal_id,
                condition,
                marker.status.as_str(),
                marker.genotype,
                marker.test_date,
            ],
        )?;
        Ok(())
    }

    /// All condition results for an animal.
    pub fn get_markers(&self, animal_id: &str) -> DbResult<MarkerMap> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT condition, status, genotype, test_date
            FROM hereditary_markers
            WHERE animal_id = ?
            "#,
        )?;

        let rows = stmt.query_map([animal_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                HereditaryMarker {
                    status: parse_label(1, row.get(1)?, MarkerStatus::parse)?,
                    genotype: row.get(2)?,
                    test_date: row.get(3)?,
                },
            ))
        })?;

        rows.collect::<Result<MarkerMap, _>>().map_err(Into::into)
    }
}
