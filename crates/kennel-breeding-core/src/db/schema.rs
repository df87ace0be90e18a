//! SQLite schema definition.

/// Complete database schema for the kennel record store.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Animals
-- ============================================================================

CREATE TABLE IF NOT EXISTS animals (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    sex TEXT NOT NULL CHECK (sex IN ('male', 'female')),
    last_heat_date TEXT,                         -- YYYY-MM-DD
    is_pregnant INTEGER NOT NULL DEFAULT 0,
    tie_date TEXT,                               -- YYYY-MM-DD, set while pregnant
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_animals_sex ON animals(sex);

-- ============================================================================
-- Heat Cycles
-- ============================================================================

CREATE TABLE IF NOT EXISTS heat_cycles (
    id TEXT PRIMARY KEY,
    animal_id TEXT NOT NULL REFERENCES animals(id) ON DELETE CASCADE,
    start_date TEXT NOT NULL,
    end_date TEXT,                               -- NULL while in progress
    cycle_length_days INTEGER,
    intensity TEXT,
    symptoms TEXT NOT NULL DEFAULT '[]',         -- JSON array of strings
    sequence INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_heat_cycles_animal ON heat_cycles(animal_id, start_date DESC);

-- ============================================================================
-- Breedings
-- ============================================================================

CREATE TABLE IF NOT EXISTS breeding_records (
    id TEXT PRIMARY KEY,
    female_id TEXT NOT NULL REFERENCES animals(id) ON DELETE CASCADE,
    male_id TEXT NOT NULL REFERENCES animals(id),
    heat_cycle_id TEXT REFERENCES heat_cycles(id) ON DELETE SET NULL,
    tie_date TEXT NOT NULL,
    method TEXT NOT NULL,
    successful INTEGER,                          -- NULL until known
    estimated_due_date TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_breedings_female ON breeding_records(female_id, tie_date DESC);

-- ============================================================================
-- Pregnancies
-- ============================================================================

CREATE TABLE IF NOT EXISTS pregnancy_records (
    id TEXT PRIMARY KEY,
    female_id TEXT NOT NULL REFERENCES animals(id) ON DELETE CASCADE,
    breeding_record_id TEXT NOT NULL REFERENCES breeding_records(id),
    confirmation_date TEXT,
    estimated_whelp_date TEXT NOT NULL,
    actual_whelp_date TEXT,                      -- NULL until whelped
    puppies_born INTEGER,
    puppies_alive INTEGER,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    CHECK (puppies_alive IS NULL OR puppies_born IS NULL OR puppies_alive <= puppies_born)
);

CREATE INDEX IF NOT EXISTS idx_pregnancies_female ON pregnancy_records(female_id);

-- ============================================================================
-- Hereditary Markers
-- ============================================================================

CREATE TABLE IF NOT EXISTS hereditary_markers (
    animal_id TEXT NOT NULL REFERENCES animals(id) ON DELETE CASCADE,
    condition TEXT NOT NULL,
    status TEXT NOT NULL CHECK (status IN ('clear', 'carrier', 'affected')),
    genotype TEXT,
    test_date TEXT,
    PRIMARY KEY (animal_id, condition)
);
"#;
