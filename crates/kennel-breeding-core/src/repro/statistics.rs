//! Average heat-cycle length from a female's cycle history.

use log::debug;

use crate::models::{AverageSource, CycleStatistics, HeatCycleRecord};

use super::date_math::days_between;

/// Derive the average cycle length.
///
/// Start-date gaps take precedence; recorded `cycle_length_days` values are
/// only consulted when no positive gap exists. Zero gaps (duplicate start
/// dates) are skipped rather than rejected.
pub fn cycle_statistics(cycles: &[HeatCycleRecord]) -> CycleStatistics {
    let mut starts: Vec<_> = cycles.iter().map(|c| c.start_date).collect();
    starts.sort_by(|a, b| b.cmp(a));

    let gaps: Vec<i64> = starts
        .windows(2)
        .map(|w| days_between(w[1], w[0]))
        .filter(|gap| *gap > 0)
        .collect();

    if let Some(average) = rounded_mean(&gaps) {
        debug!("cycle average {} days from {} start-date gaps", average, gaps.len());
        return CycleStatistics {
            average_cycle_length: Some(average),
            source: Some(AverageSource::StartDateGaps),
            samples: gaps.len(),
        };
    }

    let recorded: Vec<i64> = cycles
        .iter()
        .filter_map(|c| c.cycle_length_days)
        .filter(|len| *len > 0)
        .collect();

    match rounded_mean(&recorded) {
        Some(average) => {
            debug!("cycle average {} days from {} recorded lengths", average, recorded.len());
            CycleStatistics {
                average_cycle_length: Some(average),
                source: Some(AverageSource::RecordedLengths),
                samples: recorded.len(),
            }
        }
        None => CycleStatistics::unknown(),
    }
}

/// Mean rounded half away from zero; `None` for an empty slice.
fn rounded_mean(values: &[i64]) -> Option<i64> {
    if values.is_empty() {
        return None;
    }
    let sum: i128 = values.iter().map(|v| i128::from(*v)).sum();
    Some((sum as f64 / values.len() as f64).round() as i64)
}
