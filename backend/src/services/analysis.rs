//! Climate impact analysis: feature assembly, inference and stress mapping

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::inference::InferenceEngine;
use shared::{
    validate_inputs, ClimateReading, FeatureRow, PredictionResult, StressAssessment, StressTier,
    TemporalContext,
};

/// Analysis service running one reading through the stress classifier
#[derive(Clone)]
pub struct AnalysisService {
    engine: Arc<InferenceEngine>,
}

/// Input for analyzing a reading with an explicit month and week
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeInput {
    pub climate: ClimateReading,
    pub temporal: TemporalContext,
}

/// Input for analyzing a reading taken on a calendar date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeByDateInput {
    pub climate: ClimateReading,
    pub date: NaiveDate,
}

/// Full analysis result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub request_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub climate: ClimateReading,
    pub temporal: TemporalContext,
    pub features: FeatureRow,
    pub prediction: PredictionResult,
    pub assessment: StressAssessment,
}

impl AnalysisService {
    pub fn new(engine: Arc<InferenceEngine>) -> Self {
        Self { engine }
    }

    /// Analyze a reading with an explicit calendar context
    pub fn analyze(&self, input: AnalyzeInput) -> AppResult<AnalysisReport> {
        let AnalyzeInput { climate, temporal } = input;

        // Validate input ranges
        validate_inputs(&climate, &temporal)?;

        let features = FeatureRow::assemble(&climate, &temporal);
        let prediction = self.engine.predict(&features)?;

        let tier = prediction.tier();
        if tier == StressTier::Healthy && !self.is_healthy_label(&prediction.label) {
            tracing::warn!(
                label = %prediction.label,
                "Unrecognized stress label mapped to the Healthy tier"
            );
        }
        let assessment = prediction.assessment();

        tracing::info!(
            tier = %tier,
            confidence = prediction.confidence,
            month = temporal.month,
            week = temporal.week,
            "Climate impact analyzed"
        );

        Ok(AnalysisReport {
            request_id: Uuid::new_v4(),
            analyzed_at: Utc::now(),
            climate,
            temporal,
            features,
            prediction,
            assessment,
        })
    }

    /// Analyze a reading, deriving month and week from its date
    pub fn analyze_by_date(&self, input: AnalyzeByDateInput) -> AppResult<AnalysisReport> {
        self.analyze(AnalyzeInput {
            climate: input.climate,
            temporal: TemporalContext::from_date(input.date),
        })
    }

    /// The one encoder class that reaches the Healthy tier by default
    fn is_healthy_label(&self, label: &str) -> bool {
        let mut defaulted = self
            .engine
            .classes()
            .iter()
            .filter(|c| !StressTier::is_known_label(c));
        match (defaulted.next(), defaulted.next()) {
            (Some(only), None) => only == label,
            _ => false,
        }
    }
}
