//! Artifact store
//!
//! Reads the classifier and label encoder exported by the offline training
//! job. The model artifact carries the feature names it was trained on and a
//! SHA-256 fingerprint of them, so a column order change is caught at load
//! rather than producing silent mispredictions.

use std::path::Path;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared::FeatureRow;

use crate::error::{AppError, AppResult};
use crate::models::{Classifier, LabelEncoder, ProbabilisticClassifier};

/// Artifact format this build understands
pub const MODEL_FORMAT_VERSION: u32 = 1;

/// Exported stress classifier with its training schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    /// Column names in training order
    pub feature_names: Vec<String>,
    /// Hex SHA-256 of `feature_names` joined by `,`
    pub schema_fingerprint: String,
    pub classifier: Classifier,
}

impl ModelArtifact {
    /// Wrap a classifier trained on the standard feature row columns
    pub fn for_feature_row(classifier: Classifier) -> Self {
        let feature_names: Vec<String> =
            FeatureRow::COLUMNS.iter().map(|c| c.to_string()).collect();
        Self {
            format_version: MODEL_FORMAT_VERSION,
            schema_fingerprint: schema_fingerprint(&feature_names),
            feature_names,
            classifier,
        }
    }

    /// Check the artifact is intact and matches the feature row schema
    pub fn verify(&self) -> AppResult<()> {
        if self.format_version != MODEL_FORMAT_VERSION {
            return Err(AppError::ArtifactLoad(format!(
                "unsupported model format version {}",
                self.format_version
            )));
        }

        if schema_fingerprint(&self.feature_names) != self.schema_fingerprint {
            return Err(AppError::ArtifactLoad(
                "schema fingerprint does not match the recorded feature names".to_string(),
            ));
        }

        if self.feature_names.len() != FeatureRow::COLUMNS.len() {
            return Err(AppError::SchemaMismatch(format!(
                "model was trained on {} features, feature row has {}",
                self.feature_names.len(),
                FeatureRow::COLUMNS.len()
            )));
        }
        if let Some((i, (trained, expected))) = self
            .feature_names
            .iter()
            .zip(FeatureRow::COLUMNS)
            .enumerate()
            .find(|(_, (trained, expected))| trained.as_str() != *expected)
        {
            return Err(AppError::SchemaMismatch(format!(
                "column {} is '{}' in the model but '{}' in the feature row",
                i, trained, expected
            )));
        }

        self.classifier.check()?;
        if self.classifier.n_features() != self.feature_names.len() {
            return Err(AppError::SchemaMismatch(format!(
                "classifier takes {} features but {} are named",
                self.classifier.n_features(),
                self.feature_names.len()
            )));
        }
        Ok(())
    }
}

/// Fingerprint of an ordered list of column names
pub fn schema_fingerprint<S: AsRef<str>>(feature_names: &[S]) -> String {
    let joined = feature_names
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(",");
    format!("{:x}", Sha256::digest(joined.as_bytes()))
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> AppResult<T> {
    let bytes = std::fs::read(path).map_err(|e| {
        AppError::ArtifactLoad(format!("cannot read {} {}: {}", what, path.display(), e))
    })?;
    serde_json::from_slice(&bytes).map_err(|e| {
        AppError::ArtifactLoad(format!("cannot parse {} {}: {}", what, path.display(), e))
    })
}

/// Load and verify the stress classifier artifact
pub fn load_model(path: &Path) -> AppResult<ModelArtifact> {
    let artifact: ModelArtifact = read_json(path, "model")?;
    artifact.verify()?;

    tracing::info!(
        path = %path.display(),
        kind = artifact.classifier.kind(),
        classes = artifact.classifier.n_classes(),
        "Loaded stress classifier"
    );
    Ok(artifact)
}

/// Load and verify the label encoder artifact
pub fn load_label_encoder(path: &Path) -> AppResult<LabelEncoder> {
    let encoder: LabelEncoder = read_json(path, "label encoder")?;
    encoder.check()?;

    tracing::info!(
        path = %path.display(),
        classes = ?encoder.classes(),
        "Loaded label encoder"
    );
    Ok(encoder)
}
