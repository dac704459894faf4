//! Label encoder mapping class indices to category names

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Bidirectional mapping between class indices and labels
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Build an encoder, rejecting empty or duplicate classes
    pub fn new(classes: Vec<String>) -> AppResult<Self> {
        let encoder = Self { classes };
        encoder.check()?;
        Ok(encoder)
    }

    /// Validate a deserialized encoder
    pub fn check(&self) -> AppResult<()> {
        if self.classes.is_empty() {
            return Err(AppError::ArtifactLoad(
                "label encoder has no classes".to_string(),
            ));
        }
        for (i, class) in self.classes.iter().enumerate() {
            if class.is_empty() {
                return Err(AppError::ArtifactLoad(format!(
                    "label encoder class {} is empty",
                    i
                )));
            }
            if self.classes[..i].contains(class) {
                return Err(AppError::ArtifactLoad(format!(
                    "label encoder class '{}' is duplicated",
                    class
                )));
            }
        }
        Ok(())
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Class index to label
    pub fn inverse_transform(&self, index: usize) -> AppResult<&str> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| {
                AppError::SchemaMismatch(format!(
                    "class index {} is outside the encoder's {} classes",
                    index,
                    self.classes.len()
                ))
            })
    }

    /// Label to class index
    pub fn transform(&self, label: &str) -> AppResult<usize> {
        self.classes
            .iter()
            .position(|c| c == label)
            .ok_or_else(|| AppError::InvalidInput {
                field: "label".to_string(),
                message: format!("unknown label '{}'", label),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> LabelEncoder {
        LabelEncoder::new(vec![
            "Healthy".to_string(),
            "Mild Stress".to_string(),
            "Severe Stress".to_string(),
        ])
        .unwrap()
    }

    #[test]
    fn test_inverse_transform() {
        let le = encoder();
        assert_eq!(le.inverse_transform(0).unwrap(), "Healthy");
        assert_eq!(le.inverse_transform(2).unwrap(), "Severe Stress");
        assert!(matches!(
            le.inverse_transform(3),
            Err(AppError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_transform_unknown_label() {
        assert!(matches!(
            encoder().transform("Drought"),
            Err(AppError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        assert!(LabelEncoder::new(vec![]).is_err());
        assert!(LabelEncoder::new(vec!["A".into(), "A".into()]).is_err());
        assert!(LabelEncoder::new(vec!["A".into(), "".into()]).is_err());
    }

    #[test]
    fn test_deserialize() {
        let le: LabelEncoder =
            serde_json::from_str(r#"{"classes": ["Healthy", "Mild Stress"]}"#).unwrap();
        assert_eq!(le.len(), 2);
        assert_eq!(le.transform("Mild Stress").unwrap(), 1);
    }
}
