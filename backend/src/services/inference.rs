//! Inference engine wrapping the stress classifier and label encoder

use shared::{FeatureRow, PredictionResult, StressTier};

use crate::config::ArtifactsConfig;
use crate::error::{AppError, AppResult};
use crate::external::{load_label_encoder, load_model, ModelArtifact};
use crate::models::{Classifier, LabelEncoder, ProbabilisticClassifier};

/// Loaded classifier and encoder, read-only after construction.
///
/// Built once at startup and shared behind an `Arc`.
#[derive(Debug)]
pub struct InferenceEngine {
    classifier: Classifier,
    encoder: LabelEncoder,
}

impl InferenceEngine {
    /// Pair a verified model artifact with its label encoder
    pub fn new(model: ModelArtifact, encoder: LabelEncoder) -> AppResult<Self> {
        model.verify()?;
        encoder.check()?;

        if model.classifier.n_classes() != encoder.len() {
            return Err(AppError::ArtifactLoad(format!(
                "classifier predicts {} classes but the label encoder has {}",
                model.classifier.n_classes(),
                encoder.len()
            )));
        }

        let defaulted: Vec<&str> = encoder
            .classes()
            .iter()
            .map(String::as_str)
            .filter(|c| !StressTier::is_known_label(c))
            .collect();
        if defaulted.len() > 1 {
            tracing::warn!(
                classes = ?defaulted,
                "Several encoder classes fall through to the Healthy tier"
            );
        }

        Ok(Self {
            classifier: model.classifier,
            encoder,
        })
    }

    /// Load both artifacts from disk
    pub fn load(artifacts: &ArtifactsConfig) -> AppResult<Self> {
        let model = load_model(&artifacts.model_path)?;
        let encoder = load_label_encoder(&artifacts.encoder_path)?;
        Self::new(model, encoder)
    }

    pub fn classes(&self) -> &[String] {
        self.encoder.classes()
    }

    pub fn classifier_kind(&self) -> &'static str {
        self.classifier.kind()
    }

    pub fn encoder(&self) -> &LabelEncoder {
        &self.encoder
    }

    /// Classify one feature row
    pub fn predict(&self, row: &FeatureRow) -> AppResult<PredictionResult> {
        let values = row.values();
        if values.len() != self.classifier.n_features() {
            return Err(AppError::SchemaMismatch(format!(
                "classifier expects {} features, row has {}",
                self.classifier.n_features(),
                values.len()
            )));
        }

        let class_index = self.classifier.predict(values)?;
        let probabilities = self.classifier.predict_proba(values)?;
        let label = self.encoder.inverse_transform(class_index)?.to_string();
        let confidence = probabilities.iter().cloned().fold(0.0, f64::max);

        tracing::debug!(
            label = %label,
            class_index,
            confidence,
            "Classified feature row"
        );

        Ok(PredictionResult {
            class_index,
            label,
            confidence,
            probabilities,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DecisionTree, LogisticRegression, RandomForest, TreeNode};
    use shared::{ClimateReading, TemporalContext};

    fn encoder() -> LabelEncoder {
        LabelEncoder::new(vec![
            "Healthy".to_string(),
            "Mild Stress".to_string(),
            "Severe Stress".to_string(),
        ])
        .unwrap()
    }

    /// Splits on temperature only: <= 30 healthy, <= 36 mild, else severe
    fn temperature_forest() -> Classifier {
        Classifier::RandomForest(RandomForest {
            n_features: 8,
            n_classes: 3,
            trees: vec![DecisionTree {
                nodes: vec![
                    TreeNode::Split {
                        feature: 0,
                        threshold: 30.0,
                        left: 1,
                        right: 2,
                    },
                    TreeNode::Leaf {
                        value: vec![8.0, 2.0, 0.0],
                    },
                    TreeNode::Split {
                        feature: 0,
                        threshold: 36.0,
                        left: 3,
                        right: 4,
                    },
                    TreeNode::Leaf {
                        value: vec![1.0, 6.0, 3.0],
                    },
                    TreeNode::Leaf {
                        value: vec![0.0, 1.0, 9.0],
                    },
                ],
            }],
        })
    }

    fn row(temperature: f64) -> FeatureRow {
        let climate = ClimateReading {
            avg_temperature: temperature,
            ..ClimateReading::default()
        };
        FeatureRow::assemble(&climate, &TemporalContext::default())
    }

    #[test]
    fn test_predict_resolves_labels() {
        let engine =
            InferenceEngine::new(ModelArtifact::for_feature_row(temperature_forest()), encoder())
                .unwrap();

        let result = engine.predict(&row(25.0)).unwrap();
        assert_eq!(result.label, "Healthy");
        assert!((result.confidence - 0.8).abs() < 1e-12);

        let result = engine.predict(&row(33.0)).unwrap();
        assert_eq!(result.label, "Mild Stress");
        assert_eq!(result.class_index, 1);

        let result = engine.predict(&row(41.0)).unwrap();
        assert_eq!(result.label, "Severe Stress");
        assert!((result.confidence - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_class_count_mismatch_is_artifact_error() {
        let two_classes = LabelEncoder::new(vec!["A".to_string(), "B".to_string()]).unwrap();
        let result =
            InferenceEngine::new(ModelArtifact::for_feature_row(temperature_forest()), two_classes);
        assert!(matches!(result, Err(AppError::ArtifactLoad(_))));
    }

    #[test]
    fn test_narrow_classifier_is_schema_mismatch() {
        let narrow = Classifier::LogisticRegression(LogisticRegression {
            coefficients: vec![vec![0.0; 6], vec![0.0; 6], vec![0.0; 6]],
            intercepts: vec![0.0; 3],
        });
        let result = InferenceEngine::new(ModelArtifact::for_feature_row(narrow), encoder());
        assert!(matches!(result, Err(AppError::SchemaMismatch(_))));
    }
}
