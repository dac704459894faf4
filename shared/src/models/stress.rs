//! Plant stress tiers and the label decision table

use serde::{Deserialize, Serialize};

/// Label the classifier emits for severe stress
pub const SEVERE_STRESS_LABEL: &str = "Severe Stress";

/// Label the classifier emits for mild stress
pub const MILD_STRESS_LABEL: &str = "Mild Stress";

/// Display severity of an assessment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Success,
}

/// Plant stress tier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StressTier {
    Severe,
    Mild,
    Healthy,
}

impl StressTier {
    /// Map a classifier label to a tier.
    ///
    /// Exact matches on the two stress labels; every other label, including
    /// ones a retrained model may introduce, falls into `Healthy`.
    pub fn from_label(label: &str) -> Self {
        match label {
            SEVERE_STRESS_LABEL => StressTier::Severe,
            MILD_STRESS_LABEL => StressTier::Mild,
            _ => StressTier::Healthy,
        }
    }

    /// Whether `label` is one the decision table matches explicitly
    pub fn is_known_label(label: &str) -> bool {
        matches!(label, SEVERE_STRESS_LABEL | MILD_STRESS_LABEL)
    }

    pub fn severity(&self) -> Severity {
        match self {
            StressTier::Severe => Severity::Error,
            StressTier::Mild => Severity::Warning,
            StressTier::Healthy => Severity::Success,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            StressTier::Severe => "🚨",
            StressTier::Mild => "⚠️",
            StressTier::Healthy => "✅",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            StressTier::Severe => "Severe Plant Stress Detected",
            StressTier::Mild => "Mild Plant Stress Detected",
            StressTier::Healthy => "Healthy Conditions",
        }
    }

    /// Headline shown with the prediction, confidence to 2 decimal places
    pub fn headline(&self, confidence: f64) -> String {
        format!("{}\n\nConfidence: {:.2}", self.title(), confidence)
    }

    /// Recommended actions, in display order
    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            StressTier::Severe => &[
                "Increase irrigation immediately",
                "Avoid pruning operations",
                "Apply mulch to retain soil moisture",
                "Monitor disease and pest outbreaks",
            ],
            StressTier::Mild => &[
                "Monitor weather conditions closely",
                "Light irrigation if rainfall decreases",
                "Preventive disease management",
            ],
            StressTier::Healthy => &[
                "Climate conditions are favorable",
                "Continue regular plantation practices",
                "Weekly monitoring recommended",
            ],
        }
    }
}

impl std::fmt::Display for StressTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StressTier::Severe => write!(f, "Severe"),
            StressTier::Mild => write!(f, "Mild"),
            StressTier::Healthy => write!(f, "Healthy"),
        }
    }
}

/// Display-ready result of the decision table
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StressAssessment {
    pub tier: StressTier,
    pub severity: Severity,
    pub icon: String,
    pub title: String,
    pub headline: String,
    pub recommendations: Vec<String>,
}

impl StressAssessment {
    pub fn new(label: &str, confidence: f64) -> Self {
        Self::for_tier(StressTier::from_label(label), confidence)
    }

    pub fn for_tier(tier: StressTier, confidence: f64) -> Self {
        Self {
            tier,
            severity: tier.severity(),
            icon: tier.icon().to_string(),
            title: tier.title().to_string(),
            headline: tier.headline(confidence),
            recommendations: tier
                .recommendations()
                .iter()
                .map(|r| r.to_string())
                .collect(),
        }
    }
}
