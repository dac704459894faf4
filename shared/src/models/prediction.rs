//! Classifier prediction models

use serde::{Deserialize, Serialize};

use super::stress::{StressAssessment, StressTier};

/// Outcome of running the stress classifier on one feature row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictionResult {
    /// Class index returned by the classifier
    pub class_index: usize,
    /// Human-readable label resolved through the label encoder
    pub label: String,
    /// Maximum class probability, in [0, 1]
    pub confidence: f64,
    /// Per-class probabilities, indexed like the label encoder classes
    pub probabilities: Vec<f64>,
}

impl PredictionResult {
    pub fn tier(&self) -> StressTier {
        StressTier::from_label(&self.label)
    }

    pub fn assessment(&self) -> StressAssessment {
        StressAssessment::new(&self.label, self.confidence)
    }
}
