//! Property tests for the reproductive and compatibility engines.

use chrono::NaiveDate;
use proptest::prelude::*;

use kennel_breeding_core::genetics::{analyze_pairing, score_pairing};
use kennel_breeding_core::models::{
    Animal, HereditaryMarker, MarkerMap, MarkerStatus, ReproductiveStatus, Sex,
};
use kennel_breeding_core::policy::BreedingPolicy;
use kennel_breeding_core::repro::{self, date_math::add_days, estimated_due_date};

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
}

fn marker_status() -> impl Strategy<Value = MarkerStatus> {
    prop_oneof![
        Just(MarkerStatus::Clear),
        Just(MarkerStatus::Carrier),
        Just(MarkerStatus::Affected),
    ]
}

fn marker_map() -> impl Strategy<Value = MarkerMap> {
    prop::collection::btree_map("[A-Z]{2,4}", marker_status(), 0..8).prop_map(|m| {
        m.into_iter()
            .map(|(k, v)| (k, HereditaryMarker::with_status(v)))
            .collect()
    })
}

proptest! {
    #[test]
    fn in_heat_window_gives_day_of_cycle(offset in 0i64..3650, elapsed in 0i64..=21) {
        let last_heat = add_days(base_date(), offset);
        let as_of = add_days(last_heat, elapsed);
        let mut animal = Animal::new("Juniper".into(), Sex::Female);
        animal.last_heat_date = Some(last_heat);

        let summary = repro::summarize(&animal, &[], as_of, &BreedingPolicy::default()).unwrap();
        prop_assert_eq!(summary.status, ReproductiveStatus::InHeat);
        prop_assert_eq!(summary.day_of_cycle, Some(elapsed + 1));
    }

    #[test]
    fn pregnant_always_pregnant(
        heat_offset in proptest::option::of(0i64..400),
        tie_offset in 0i64..400,
        extra in 0i64..200,
    ) {
        let mut animal = Animal::new("Juniper".into(), Sex::Female);
        animal.last_heat_date = heat_offset.map(|d| add_days(base_date(), d));
        animal.begin_pregnancy(add_days(base_date(), tie_offset));
        let as_of = add_days(base_date(), 400 + extra);

        let summary = repro::summarize(&animal, &[], as_of, &BreedingPolicy::default()).unwrap();
        prop_assert_eq!(summary.status, ReproductiveStatus::Pregnant);
        prop_assert!(summary.day_of_cycle.is_none());
    }

    #[test]
    fn due_date_is_tie_plus_63(offset in -20000i64..20000) {
        let tie = add_days(base_date(), offset);
        let due = estimated_due_date(tie, &BreedingPolicy::default());
        prop_assert_eq!(due.signed_duration_since(tie).num_days(), 63);
    }

    #[test]
    fn score_always_in_range(sire in marker_map(), dam in marker_map(), coi in 0.0f64..=100.0) {
        let policy = BreedingPolicy::default();
        let analysis = analyze_pairing(&sire, &dam, coi, &policy).unwrap();
        let score = score_pairing(&analysis, &policy);
        prop_assert!(score.score <= 100);

        // Severity order is non-increasing
        for pair in analysis.health_warnings.windows(2) {
            prop_assert!(pair[0].risk_level >= pair[1].risk_level);
        }
    }

    #[test]
    fn engines_are_idempotent(
        sire in marker_map(),
        dam in marker_map(),
        coi in 0.0f64..=100.0,
        heat_offset in 0i64..400,
        as_of_offset in 400i64..800,
    ) {
        let policy = BreedingPolicy::default();
        let first = analyze_pairing(&sire, &dam, coi, &policy).unwrap();
        let second = analyze_pairing(&sire, &dam, coi, &policy).unwrap();
        prop_assert_eq!(score_pairing(&first, &policy), score_pairing(&second, &policy));
        prop_assert_eq!(first, second);

        let mut animal = Animal::new("Juniper".into(), Sex::Female);
        animal.last_heat_date = Some(add_days(base_date(), heat_offset));
        let as_of = add_days(base_date(), as_of_offset);
        let a = repro::summarize(&animal, &[], as_of, &policy).unwrap();
        let b = repro::summarize(&animal, &[], as_of, &policy).unwrap();
        prop_assert_eq!(a, b);
    }
}
