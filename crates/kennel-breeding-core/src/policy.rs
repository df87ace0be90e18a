//! Policy constants for cycle projection, gestation, and inbreeding bands.
//!
//! Every fallback the engine applies lives here, once. Hosts can override
//! individual values from JSON; missing keys keep their defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Policy errors.
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid policy value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

pub type PolicyResult<T> = Result<T, PolicyError>;

/// Upper bound for any day-count policy value (ten years).
pub const MAX_POLICY_DAYS: i64 = 3650;

/// Tunable engine policy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BreedingPolicy {
    /// Cycle length used when history is insufficient (semi-annual)
    pub default_cycle_length_days: i64,
    /// Tie-to-whelp length, not breed-adjusted
    pub gestation_days: i64,
    /// Days after the last heat start still classified as in heat
    pub heat_duration_days: i64,
    /// Days before a predicted heat classified as pre-heat
    pub pre_heat_lead_days: i64,
    /// Fertility window start, days after heat start
    pub fertility_window_start_offset: i64,
    /// Fertility window end, days after heat start
    pub fertility_window_end_offset: i64,
    /// Lower bound of the moderate COI band, percent
    pub coi_moderate_threshold: f64,
    /// Lower bound of the high COI band, percent
    pub coi_high_threshold: f64,
    /// COI assumed when no pedigree computation is available
    pub placeholder_coi: f64,
}

impl Default for BreedingPolicy {
    fn default() -> Self {
        Self {
            default_cycle_length_days: 180,
            gestation_days: 63,
            heat_duration_days: 21,
            pre_heat_lead_days: 14,
            fertility_window_start_offset: 9,
            fertility_window_end_offset: 14,
            coi_moderate_threshold: 6.25,
            coi_high_threshold: 12.5,
            placeholder_coi: 4.2,
        }
    }
}

impl BreedingPolicy {
    /// Load overrides from JSON and validate them.
    pub fn from_json(json: &str) -> PolicyResult<Self> {
        let policy: BreedingPolicy = serde_json::from_str(json)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Reject values the engine cannot reason with.
    pub fn validate(&self) -> PolicyResult<()> {
        let day_fields = [
            ("default_cycle_length_days", self.default_cycle_length_days),
            ("gestation_days", self.gestation_days),
            ("heat_duration_days", self.heat_duration_days),
            ("pre_heat_lead_days", self.pre_heat_lead_days),
        ];
        for (field, value) in day_fields {
            if value <= 0 || value > MAX_POLICY_DAYS {
                return Err(PolicyError::Invalid {
                    field,
                    reason: format!("must be within 1..={}, got {}", MAX_POLICY_DAYS, value),
                });
            }
        }

        if self.fertility_window_start_offset < 0
            || self.fertility_window_end_offset < self.fertility_window_start_offset
            || self.fertility_window_end_offset > MAX_POLICY_DAYS
        {
            return Err(PolicyError::Invalid {
                field: "fertility_window_end_offset",
                reason: format!(
                    "window {}..{} is empty or negative",
                    self.fertility_window_start_offset, self.fertility_window_end_offset
                ),
            });
        }

        if !(self.coi_moderate_threshold.is_finite() && self.coi_high_threshold.is_finite())
            || self.coi_moderate_threshold < 0.0
            || self.coi_high_threshold < self.coi_moderate_threshold
        {
            return Err(PolicyError::Invalid {
                field: "coi_high_threshold",
                reason: format!(
                    "bands must satisfy 0 <= moderate ({}) <= high ({})",
                    self.coi_moderate_threshold, self.coi_high_threshold
                ),
            });
        }

        if !(0.0..=100.0).contains(&self.placeholder_coi) {
            return Err(PolicyError::Invalid {
                field: "placeholder_coi",
                reason: format!("must be a percentage, got {}", self.placeholder_coi),
            });
        }

        Ok(())
    }
}
