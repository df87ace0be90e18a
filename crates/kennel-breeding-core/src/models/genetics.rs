//! Hereditary test results and pairing analysis models.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Result of a hereditary condition test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MarkerStatus {
    /// Tests negative for the risk allele
    Clear,
    /// One copy of a recessive risk allele, no symptoms
    Carrier,
    /// Expresses the condition
    Affected,
}

impl MarkerStatus {
    /// Parse a lab result label.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "clear" | "normal" => Some(MarkerStatus::Clear),
            "carrier" => Some(MarkerStatus::Carrier),
            "affected" | "at risk" => Some(MarkerStatus::Affected),
            _ => None,
        }
    }

    /// Canonical label.
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerStatus::Clear => "clear",
            MarkerStatus::Carrier => "carrier",
            MarkerStatus::Affected => "affected",
        }
    }
}

/// One animal's result for one hereditary condition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HereditaryMarker {
    /// Test result
    pub status: MarkerStatus,
    /// Genotype notation as reported by the lab (e.g. "N/vWD1")
    pub genotype: Option<String>,
    /// Date the sample was tested
    pub test_date: Option<NaiveDate>,
}

impl HereditaryMarker {
    /// Marker with only a status.
    pub fn with_status(status: MarkerStatus) -> Self {
        Self {
            status,
            genotype: None,
            test_date: None,
        }
    }
}

/// Condition name → test result, one map per animal.
pub type MarkerMap = BTreeMap<String, HereditaryMarker>;

/// Severity of a health warning. Ordered `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Canonical label.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }
}

/// What produced a warning.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Shared hereditary condition risk
    HereditaryCondition,
    /// Coefficient-of-inbreeding band
    Inbreeding,
}

/// A derived, non-persisted pairing warning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthWarning {
    /// Condition name, or "High Inbreeding" / "Moderate Inbreeding"
    pub condition: String,
    /// Severity
    pub risk_level: RiskLevel,
    /// Human-readable explanation
    pub description: String,
    /// Expected share of affected offspring, when known
    pub affected_percentage: Option<u8>,
    /// Source of the warning
    pub kind: WarningKind,
}

/// Result of comparing a sire and dam.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PairingAnalysis {
    /// Coefficient of inbreeding, percent
    pub coi: f64,
    /// Warnings, most severe first
    pub health_warnings: Vec<HealthWarning>,
    /// Shared conditions where both animals test clear
    pub compatible_conditions: Vec<String>,
    /// Shared conditions that produced a hereditary warning
    pub incompatible_conditions: Vec<String>,
}

impl PairingAnalysis {
    /// The `n` most severe warnings.
    pub fn top_warnings(&self, n: usize) -> &[HealthWarning] {
        &self.health_warnings[..n.min(self.health_warnings.len())]
    }

    /// Whether any warning was raised from the COI band.
    pub fn has_inbreeding_warning(&self) -> bool {
        self.health_warnings
            .iter()
            .any(|w| w.kind == WarningKind::Inbreeding)
    }

    /// Highest severity present, if any.
    pub fn highest_risk(&self) -> Option<RiskLevel> {
        self.health_warnings.iter().map(|w| w.risk_level).max()
    }
}
