//! Derived reproductive and pairing views. Recomputed on every call, never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::genetics::PairingAnalysis;

/// Top-level reproductive state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReproductiveStatus {
    NotInHeat,
    PreHeat,
    InHeat,
    Pregnant,
}

impl ReproductiveStatus {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            ReproductiveStatus::NotInHeat => "Not in heat",
            ReproductiveStatus::PreHeat => "Pre-heat",
            ReproductiveStatus::InHeat => "In heat",
            ReproductiveStatus::Pregnant => "Pregnant",
        }
    }
}

/// Sub-stage of an active heat, keyed by day of cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HeatStage {
    /// Days 1-3
    EarlyProestrus,
    /// Days 4-9
    Proestrus,
    /// Days 10-14
    Estrus,
    /// Days 15-21
    Diestrus,
    /// Beyond day 21
    Anestrus,
}

impl HeatStage {
    /// Stage for a 1-based day of cycle.
    pub fn for_day(day_of_cycle: i64) -> Self {
        match day_of_cycle {
            i64::MIN..=3 => HeatStage::EarlyProestrus,
            4..=9 => HeatStage::Proestrus,
            10..=14 => HeatStage::Estrus,
            15..=21 => HeatStage::Diestrus,
            _ => HeatStage::Anestrus,
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            HeatStage::EarlyProestrus => "Early Proestrus",
            HeatStage::Proestrus => "Proestrus",
            HeatStage::Estrus => "Estrus",
            HeatStage::Diestrus => "Diestrus",
            HeatStage::Anestrus => "Anestrus",
        }
    }

    /// Caregiver-facing description.
    pub fn description(&self) -> &'static str {
        match self {
            HeatStage::EarlyProestrus => "Swelling and bloody discharge begin; not yet receptive to males",
            HeatStage::Proestrus => "Discharge continues; males are attracted but she will usually refuse",
            HeatStage::Estrus => "Fertile period; discharge lightens and she will accept a male",
            HeatStage::Diestrus => "Receptivity ends; swelling subsides",
            HeatStage::Anestrus => "Resting phase between cycles",
        }
    }
}

/// Conception likelihood at a point in the cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Fertility {
    Low,
    High,
    /// Cycle days 11-13
    Peak,
}

impl Fertility {
    /// Fertility for a 1-based day of cycle.
    pub fn for_day(day_of_cycle: i64) -> Self {
        match day_of_cycle {
            11..=13 => Fertility::Peak,
            10 | 14 => Fertility::High,
            _ => Fertility::Low,
        }
    }

    /// Canonical label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Fertility::Low => "low",
            Fertility::High => "high",
            Fertility::Peak => "peak",
        }
    }

    /// High or peak.
    pub fn is_fertile(&self) -> bool {
        matches!(self, Fertility::High | Fertility::Peak)
    }
}

/// Inclusive date range in which breeding is most likely to succeed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FertilityWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl FertilityWindow {
    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Active-heat details, present only while in heat.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeatDetails {
    /// 1-based day of the current heat
    pub day_of_cycle: i64,
    pub stage: HeatStage,
    pub fertility: Fertility,
    pub fertility_window: FertilityWindow,
}

/// Output of the status classifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusAssessment {
    pub status: ReproductiveStatus,
    pub heat: Option<HeatDetails>,
}

/// Where an average cycle length came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AverageSource {
    /// Gaps between consecutive start dates
    StartDateGaps,
    /// Caregiver-recorded cycle lengths
    RecordedLengths,
}

/// Average heat-cycle length derived from history.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CycleStatistics {
    /// `None` when history yields no usable data
    pub average_cycle_length: Option<i64>,
    pub source: Option<AverageSource>,
    /// Number of values averaged
    pub samples: usize,
}

impl CycleStatistics {
    /// No usable history.
    pub fn unknown() -> Self {
        Self {
            average_cycle_length: None,
            source: None,
            samples: 0,
        }
    }
}

/// Projected next heat.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NextHeatPrediction {
    pub next_heat_date: NaiveDate,
    /// Negative when overdue
    pub days_until_next_heat: i64,
    /// Cycle length used for the projection
    pub cycle_length_days: i64,
    /// True when the policy default was used instead of history
    pub used_default_length: bool,
}

/// Pregnancy progress.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GestationStatus {
    pub tie_date: NaiveDate,
    pub gestation_days: i64,
    pub estimated_due_date: NaiveDate,
    /// Negative when past due
    pub days_until_due: i64,
}

/// Combined reproductive view for one animal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReproductiveSummary {
    pub animal_id: String,
    pub as_of: NaiveDate,
    pub status: ReproductiveStatus,
    pub day_of_cycle: Option<i64>,
    pub stage: Option<HeatStage>,
    pub stage_description: Option<String>,
    pub fertility: Option<Fertility>,
    pub fertility_window: Option<FertilityWindow>,
    pub next_heat_date: Option<NaiveDate>,
    pub days_until_next_heat: Option<i64>,
    pub gestation_days: Option<i64>,
    pub estimated_due_date: Option<NaiveDate>,
    pub days_until_due: Option<i64>,
    pub cycle_statistics: CycleStatistics,
}

impl ReproductiveSummary {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Five-band recommendation tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    Excellent,
    Good,
    Fair,
    Poor,
    NotRecommended,
}

impl RecommendationTier {
    /// Tier for a clamped 0-100 score.
    pub fn for_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => RecommendationTier::Excellent,
            70..=89 => RecommendationTier::Good,
            50..=69 => RecommendationTier::Fair,
            30..=49 => RecommendationTier::Poor,
            _ => RecommendationTier::NotRecommended,
        }
    }

    /// Canonical label.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationTier::Excellent => "excellent",
            RecommendationTier::Good => "good",
            RecommendationTier::Fair => "fair",
            RecommendationTier::Poor => "poor",
            RecommendationTier::NotRecommended => "not_recommended",
        }
    }
}

/// Simplified two-cut advisory.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Advice {
    Recommended,
    ProceedWithCaution,
    NotRecommended,
}

impl Advice {
    /// Advisory for a clamped 0-100 score.
    pub fn for_score(score: u8) -> Self {
        match score {
            70..=u8::MAX => Advice::Recommended,
            50..=69 => Advice::ProceedWithCaution,
            _ => Advice::NotRecommended,
        }
    }

    /// Display text.
    pub fn text(&self) -> &'static str {
        match self {
            Advice::Recommended => "Recommended",
            Advice::ProceedWithCaution => "Proceed with caution",
            Advice::NotRecommended => "Not recommended",
        }
    }
}

/// Compatibility score for a pairing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BreedingScore {
    /// 0-100
    pub score: u8,
    pub tier: RecommendationTier,
    pub advice: Advice,
}

impl BreedingScore {
    /// Advisory display text.
    pub fn recommendation_text(&self) -> &'static str {
        self.advice.text()
    }
}

/// Analysis and score for one sire/dam pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PairingReport {
    pub sire_id: String,
    pub dam_id: String,
    pub analysis: PairingAnalysis,
    pub score: BreedingScore,
}

impl PairingReport {
    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_boundaries() {
        assert_eq!(HeatStage::for_day(1), HeatStage::EarlyProestrus);
        assert_eq!(HeatStage::for_day(3), HeatStage::EarlyProestrus);
        assert_eq!(HeatStage::for_day(4), HeatStage::Proestrus);
        assert_eq!(HeatStage::for_day(9), HeatStage::Proestrus);
        assert_eq!(HeatStage::for_day(10), HeatStage::Estrus);
        assert_eq!(HeatStage::for_day(14), HeatStage::Estrus);
        assert_eq!(HeatStage::for_day(15), HeatStage::Diestrus);
        assert_eq!(HeatStage::for_day(21), HeatStage::Diestrus);
        assert_eq!(HeatStage::for_day(22), HeatStage::Anestrus);
    }

    #[test]
    fn test_fertility_by_day() {
        assert_eq!(Fertility::for_day(9), Fertility::Low);
        assert_eq!(Fertility::for_day(10), Fertility::High);
        assert_eq!(Fertility::for_day(12), Fertility::Peak);
        assert_eq!(Fertility::for_day(14), Fertility::High);
        assert_eq!(Fertility::for_day(15), Fertility::Low);
        assert!(Fertility::Peak.is_fertile());
        assert!(!Fertility::Low.is_fertile());
    }

    #[test]
    fn test_tiers() {
        assert_eq!(RecommendationTier::for_score(100), RecommendationTier::Excellent);
        assert_eq!(RecommendationTier::for_score(90), RecommendationTier::Excellent);
        assert_eq!(RecommendationTier::for_score(89), RecommendationTier::Good);
        assert_eq!(RecommendationTier::for_score(50), RecommendationTier::Fair);
        assert_eq!(RecommendationTier::for_score(30), RecommendationTier::Poor);
        assert_eq!(RecommendationTier::for_score(29), RecommendationTier::NotRecommended);
        assert_eq!(RecommendationTier::for_score(0), RecommendationTier::NotRecommended);
    }

    #[test]
    fn test_advice() {
        assert_eq!(Advice::for_score(70).text(), "Recommended");
        assert_eq!(Advice::for_score(69).text(), "Proceed with caution");
        assert_eq!(Advice::for_score(50).text(), "Proceed with caution");
        assert_eq!(Advice::for_score(49).text(), "Not recommended");
    }

    #[test]
    fn test_status_serializes_screaming_case() {
        let json = serde_json::to_string(&ReproductiveStatus::PreHeat).unwrap();
        assert_eq!(json, "\"PRE_HEAT\"");
    }
}
