//! Animal models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Biological sex of a breeding animal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Parse a stored sex label ("male" / "female", case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "male" | "m" => Some(Sex::Male),
            "female" | "f" => Some(Sex::Female),
            _ => None,
        }
    }

    /// Canonical lowercase label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

/// An animal record, limited to the fields the reproductive engine reads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Animal {
    /// Local UUID
    pub id: String,
    /// Call name
    pub name: String,
    /// Sex
    pub sex: Sex,
    /// First day of the most recent observed heat
    pub last_heat_date: Option<NaiveDate>,
    /// Whether a pregnancy is currently in progress
    pub is_pregnant: bool,
    /// Mating date of the current pregnancy
    pub tie_date: Option<NaiveDate>,
}

impl Animal {
    /// Create a new animal with no reproductive history.
    pub fn new(name: String, sex: Sex) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name,
            sex,
            last_heat_date: None,
            is_pregnant: false,
            tie_date: None,
        }
    }

    /// Check whether this animal can carry a heat cycle.
    pub fn is_female(&self) -> bool {
        self.sex == Sex::Female
    }

    /// Mark the animal pregnant from the given tie date.
    pub fn begin_pregnancy(&mut self, tie_date: NaiveDate) {
        self.is_pregnant = true;
        self.tie_date = Some(tie_date);
    }

    /// Clear pregnancy state after whelping.
    pub fn end_pregnancy(&mut self) {
        self.is_pregnant = false;
        self.tie_date = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_animal() {
        let animal = Animal::new("Juniper".into(), Sex::Female);
        assert_eq!(animal.name, "Juniper");
        assert!(animal.is_female());
        assert!(!animal.is_pregnant);
        assert_eq!(animal.id.len(), 36); // UUID format
    }

    #[test]
    fn test_sex_parse() {
        assert_eq!(Sex::parse("Female"), Some(Sex::Female));
        assert_eq!(Sex::parse(" m "), Some(Sex::Male));
        assert_eq!(Sex::parse("unknown"), None);
    }

    #[test]
    fn test_pregnancy_toggle() {
        let mut animal = Animal::new("Juniper".into(), Sex::Female);
        let tie = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        animal.begin_pregnancy(tie);
        assert!(animal.is_pregnant);
        assert_eq!(animal.tie_date, Some(tie));

        animal.end_pregnancy();
        assert!(!animal.is_pregnant);
        assert!(animal.tie_date.is_none());
    }
}
