//! Animal database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{parse_label, Database, DbResult};
use crate::models::{Animal, Sex};

const ANIMAL_COLUMNS: &str = "id, name, sex, last_heat_date, is_pregnant, tie_date";

fn animal_from_row(row: &Row<'_>) -> rusqlite::Result<Animal> {
    Ok(Animal {
        id: row.get(0)?,
        name: row.get(1)?,
        sex: parse_label(2, row.get(2)?, Sex::parse)?,
        last_heat_date: row.get(3)?,
        is_pregnant: row.get(4)?,
        tie_date: row.get(5)?,
    })
}

impl Database {
    /// Insert a new animal.
    pub fn insert_animal(&self, animal: &Animal) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO animals (id, name, sex, last_heat_date, is_pregnant, tie_date)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                animal.id,
                animal.name,
                animal.sex.as_str(),
                animal.last_heat_date,
                animal.is_pregnant,
                animal.tie_date,
            ],
        )?;
        Ok(())
    }

    /// Update an existing animal.
    pub fn update_animal(&self, animal: &Animal) -> DbResult<bool> {
        let rows_affected = self.conn.execute(
            r#"
            UPDATE animals SET
                name = ?2,
                sex = ?3,
                last_heat_date = ?4,
                is_pregnant = ?5,
                tie_date = ?6,
                updated_at = datetime('now')
            WHERE id = ?1
            "#,
            params![
                animal.id,
                animal.name,
                animal.sex.as_str(),
                animal.last_heat_date,
                animal.is_pregnant,
                animal.tie_date,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Insert or update an animal.
    pub fn upsert_animal(&self, animal: &Animal) -> DbResult<()> {
        if !self.update_animal(animal)? {
            self.insert_animal(animal)?;
        }
        Ok(())
    }

    /// Get an animal by ID.
    pub fn get_animal(&self, id: &str) -> DbResult<Option<Animal>> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM animals WHERE id = ?", ANIMAL_COLUMNS),
                [id],
                animal_from_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List animals of one sex, by name.
    pub fn list_animals_by_sex(&self, sex: Sex) -> DbResult<Vec<Animal>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM animals WHERE sex = ? ORDER BY name",
            ANIMAL_COLUMNS
        ))?;

        let rows = stmt.query_map([sex.as_str()], animal_from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Delete an animal and its history.
    pub fn delete_animal(&self, id: &str) -> DbResult<bool> {
        let rows_affected = self.conn.execute("DELETE FROM animals WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_insert_and_get() {
        let db = Database::open_in_memory().unwrap();
        let mut dam = Animal::new("Juniper".into(), Sex::Female);
        dam.last_heat_date = NaiveDate::from_ymd_opt(2024, 5, 1);
        db.insert_animal(&dam).unwrap();

        let loaded = db.get_animal(&dam.id).unwrap().unwrap();
        assert_eq!(loaded, dam);
    }

    #[test]
    fn test_upsert_updates() {
        let db = Database::open_in_memory().unwrap();
        let mut dam = Animal::new("Juniper".into(), Sex::Female);
        db.upsert_animal(&dam).unwrap();

        dam.begin_pregnancy(NaiveDate::from_ymd_opt(2024, 5, 12).unwrap());
        db.upsert_animal(&dam).unwrap();

        let loaded = db.get_animal(&dam.id).unwrap().unwrap();
        assert!(loaded.is_pregnant);
        assert_eq!(loaded.tie_date, dam.tie_date);
    }

    #[test]
    fn test_list_by_sex() {
        let db = Database::open_in_memory().unwrap();
        db.insert_animal(&Animal::new("Willow".into(), Sex::Female)).unwrap();
        db.insert_animal(&Animal::new("Atlas".into(), Sex::Male)).unwrap();
        db.insert_animal(&Animal::new("Aspen".into(), Sex::Female)).unwrap();

        let females = db.list_animals_by_sex(Sex::Female).unwrap();
        let names: Vec<_> = females.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Aspen", "Willow"]);
    }

    #[test]
    fn test_missing_animal() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_animal("nope").unwrap().is_none());
        assert!(!db.delete_animal("nope").unwrap());
    }
}
