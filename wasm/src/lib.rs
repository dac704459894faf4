//! WebAssembly module for the Tea Garden Climate Impact Analyzer
//!
//! Provides client-side computation for:
//! - Stress tier lookup from a predicted label
//! - Headline and recommendation text
//! - Feature row assembly with range validation
//! - Input schema defaults

use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str(APP_TITLE));
}

/// Stress tier name ("Severe", "Mild" or "Healthy") for a classifier label
#[wasm_bindgen]
pub fn classify_stress_label(label: &str) -> String {
    StressTier::from_label(label).to_string()
}

/// Display severity ("error", "warning" or "success") for a classifier label
#[wasm_bindgen]
pub fn stress_severity(label: &str) -> String {
    match StressTier::from_label(label).severity() {
        Severity::Error => "error".to_string(),
        Severity::Warning => "warning".to_string(),
        Severity::Success => "success".to_string(),
    }
}

/// Headline for a classifier label and confidence
#[wasm_bindgen]
pub fn stress_headline(label: &str, confidence: f64) -> String {
    StressTier::from_label(label).headline(confidence)
}

/// Recommended actions for a classifier label, as a JS array of strings
#[wasm_bindgen]
pub fn stress_recommendations(label: &str) -> js_sys::Array {
    StressTier::from_label(label)
        .recommendations()
        .iter()
        .map(|r| JsValue::from_str(r))
        .collect()
}

fn parse_inputs(inputs_json: &str) -> Result<(ClimateReading, TemporalContext), String> {
    #[derive(serde::Deserialize)]
    struct Inputs {
        climate: ClimateReading,
        temporal: TemporalContext,
    }

    let inputs: Inputs =
        serde_json::from_str(inputs_json).map_err(|e| format!("Invalid inputs JSON: {}", e))?;
    validate_inputs(&inputs.climate, &inputs.temporal).map_err(|e| e.to_string())?;
    Ok((inputs.climate, inputs.temporal))
}

/// Build the model feature row from `{ climate, temporal }` JSON
#[wasm_bindgen]
pub fn assemble_feature_row(inputs_json: &str) -> Result<Vec<f64>, JsValue> {
    let (climate, temporal) = parse_inputs(inputs_json).map_err(|e| {
        web_sys::console::warn_1(&JsValue::from_str(&e));
        JsValue::from_str(&e)
    })?;
    Ok(FeatureRow::assemble(&climate, &temporal).values().to_vec())
}

/// Input schema with ranges and defaults, as JSON
#[wasm_bindgen]
pub fn default_inputs_json() -> Result<String, JsValue> {
    serde_json::to_string(&InputSchema::default())
        .map_err(|e| JsValue::from_str(&format!("Failed to encode schema: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_stress_label() {
        assert_eq!(classify_stress_label("Severe Stress"), "Severe");
        assert_eq!(classify_stress_label("Mild Stress"), "Mild");
        assert_eq!(classify_stress_label("Healthy"), "Healthy");
        assert_eq!(classify_stress_label("No Stress"), "Healthy");
    }

    #[test]
    fn test_stress_severity() {
        assert_eq!(stress_severity("Severe Stress"), "error");
        assert_eq!(stress_severity("Mild Stress"), "warning");
        assert_eq!(stress_severity("anything"), "success");
    }

    #[test]
    fn test_stress_headline() {
        assert_eq!(
            stress_headline("Mild Stress", 0.5551),
            "Mild Plant Stress Detected\n\nConfidence: 0.56"
        );
    }

    #[test]
    fn test_parse_inputs() {
        let json = r#"{
            "climate": {
                "avg_temperature": 28.0, "rainfall": 80.0, "humidity": 70.0,
                "wind_speed": 10.0, "cloud_cover": 50.0, "aqi": 120
            },
            "temporal": { "month": 7, "week": 28 }
        }"#;
        let (climate, temporal) = parse_inputs(json).unwrap();
        assert_eq!(climate, ClimateReading::default());
        assert_eq!(temporal, TemporalContext::new(7, 28));

        let out_of_range = json.replace("\"month\": 7", "\"month\": 13");
        let err = parse_inputs(&out_of_range).unwrap_err();
        assert!(err.starts_with("month must be between"));
    }
}
