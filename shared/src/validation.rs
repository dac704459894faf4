//! Input range validation for the analyzer
//!
//! The feature assembler never checks ranges; this module is the boundary
//! check applied before a reading reaches the classifier.

use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::models::{ClimateReading, FeatureRow, TemporalContext};
use crate::types::InputSchema;

/// An input value outside its allowed range
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{field} must be between {min} and {max}, got {value}")]
pub struct InputRangeError {
    pub field: String,
    pub min: f64,
    pub max: f64,
    pub value: f64,
}

/// Validate a climate reading and calendar context.
///
/// Reports the first offending field in feature row order.
pub fn validate_inputs(
    climate: &ClimateReading,
    temporal: &TemporalContext,
) -> Result<(), InputRangeError> {
    let row = FeatureRow::assemble(climate, temporal);

    let mut failed = Vec::new();
    if let Err(errors) = climate.validate() {
        failed.extend(failed_fields(&errors));
    }
    if let Err(errors) = temporal.validate() {
        failed.extend(failed_fields(&errors));
    }

    let schema = InputSchema::default();
    for column in FeatureRow::COLUMNS {
        let value = row.get(column).unwrap_or(f64::NAN);
        // range checks pass NaN through, so reject non-finite values here
        if value.is_finite() && !failed.iter().any(|f| f == column) {
            continue;
        }
        let (min, max) = schema
            .field(column)
            .map(|f| (f.min, f.max))
            .unwrap_or((f64::NAN, f64::NAN));
        return Err(InputRangeError {
            field: column.to_string(),
            min,
            max,
            value,
        });
    }
    Ok(())
}

fn failed_fields(errors: &ValidationErrors) -> Vec<String> {
    errors
        .field_errors()
        .keys()
        .map(|k| k.to_string())
        .collect()
}
