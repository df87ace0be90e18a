//! Next-heat projection from the last heat and average cycle length.

use chrono::NaiveDate;
use log::debug;

use crate::models::{Animal, CycleStatistics, HeatCycleRecord, NextHeatPrediction};
use crate::policy::BreedingPolicy;

use super::date_math::{add_days, days_between};

/// Project the next heat.
///
/// Anchored on `last_heat_date`, or the most recent cycle start when that is
/// unset. Returns `None` while pregnant or when there is no anchor at all.
pub fn predict_next_heat(
    animal: &Animal,
    cycles: &[HeatCycleRecord],
    stats: &CycleStatistics,
    as_of: NaiveDate,
    policy: &BreedingPolicy,
) -> Option<NextHeatPrediction> {
    if animal.is_pregnant {
        return None;
    }

    let anchor = animal
        .last_heat_date
        .or_else(|| cycles.iter().map(|c| c.start_date).max())?;

    let (cycle_length_days, used_default_length) = match stats.average_cycle_length {
        Some(average) => (average, false),
        None => (policy.default_cycle_length_days, true),
    };

    let next_heat_date = add_days(anchor, cycle_length_days);
    if used_default_length {
        debug!(
            "animal {}: no usable cycle history, projecting with default {} days",
            animal.id, cycle_length_days
        );
    }

    Some(NextHeatPrediction {
        next_heat_date,
        days_until_next_heat: days_between(as_of, next_heat_date),
        cycle_length_days,
        used_default_length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AverageSource, Sex};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn stats(average: Option<i64>) -> CycleStatistics {
        CycleStatistics {
            average_cycle_length: average,
            source: average.map(|_| AverageSource::StartDateGaps),
            samples: average.map_or(0, |_| 2),
        }
    }

    #[test]
    fn test_uses_average() {
        let mut animal = Animal::new("Juniper".into(), Sex::Female);
        animal.last_heat_date = Some(date(2024, 1, 1));

        let prediction =
            predict_next_heat(&animal, &[], &stats(Some(150)), date(2024, 5, 1), &BreedingPolicy::default())
                .unwrap();

        assert_eq!(prediction.next_heat_date, date(2024, 5, 30));
        assert_eq!(prediction.days_until_next_heat, 29);
        assert!(!prediction.used_default_length);
    }

    #[test]
    fn test_default_length_and_overdue() {
        let mut animal = Animal::new("Juniper".into(), Sex::Female);
        animal.last_heat_date = Some(date(2024, 1, 1));

        let prediction =
            predict_next_heat(&animal, &[], &stats(None), date(2024, 7, 8), &BreedingPolicy::default())
                .unwrap();

        assert_eq!(prediction.next_heat_date, date(2024, 6, 29));
        assert_eq!(prediction.days_until_next_heat, -9); // overdue, not clamped
        assert!(prediction.used_default_length);
    }

    #[test]
    fn test_falls_back_to_latest_cycle_start() {
        let animal = Animal::new("Juniper".into(), Sex::Female);
        let cycles = vec![
            HeatCycleRecord::new(animal.id.clone(), date(2023, 7, 1), 1),
            HeatCycleRecord::new(animal.id.clone(), date(2024, 1, 1), 2),
        ];

        let prediction =
            predict_next_heat(&animal, &cycles, &stats(None), date(2024, 2, 1), &BreedingPolicy::default())
                .unwrap();

        assert_eq!(prediction.next_heat_date, date(2024, 6, 29));
    }

    #[test]
    fn test_huge_average_saturates() {
        let mut animal = Animal::new("Juniper".into(), Sex::Female);
        animal.last_heat_date = Some(date(2024, 1, 1));

        let prediction =
            predict_next_heat(&animal, &[], &stats(Some(i64::MAX)), date(2024, 2, 1), &BreedingPolicy::default())
                .unwrap();

        assert_eq!(prediction.next_heat_date, NaiveDate::MAX);
        assert!(prediction.days_until_next_heat > 0);
    }

    #[test]
    fn test_none_when_pregnant() {
        let mut animal = Animal::new("Juniper".into(), Sex::Female);
        animal.last_heat_date = Some(date(2024, 1, 1));
        animal.begin_pregnancy(date(2024, 1, 12));

        assert!(predict_next_heat(&animal, &[], &stats(Some(180)), date(2024, 2, 1), &BreedingPolicy::default())
            .is_none());
    }

    #[test]
    fn test_none_without_anchor() {
        let animal = Animal::new("Juniper".into(), Sex::Female);
        assert!(predict_next_heat(&animal, &[], &stats(None), date(2024, 2, 1), &BreedingPolicy::default())
            .is_none());
    }
}
