//! Input schema shared with the presentation layer

use serde::{Deserialize, Serialize};

use crate::models::{ClimateReading, TemporalContext};

/// Application title shown by the presentation layer
pub const APP_TITLE: &str = "Climate Impact Analyzer for Tea Gardens";

/// Caption shown under the title
pub const APP_CAPTION: &str = "Early-warning system using climate data & ML";

/// Short month names, January first
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Description of a single numeric input
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputField {
    pub key: String,
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    /// Integer-valued input (AQI, month, week)
    pub integer: bool,
}

impl InputField {
    fn new(key: &str, label: &str, min: f64, max: f64, default: f64, integer: bool) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            min,
            max,
            default,
            integer,
        }
    }
}

/// Month selector option
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthOption {
    pub value: i32,
    pub name: String,
}

/// Everything a front-end needs to render the analyzer inputs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputSchema {
    pub title: String,
    pub caption: String,
    /// Fields in feature row order
    pub fields: Vec<InputField>,
    pub months: Vec<MonthOption>,
}

impl InputSchema {
    pub fn field(&self, key: &str) -> Option<&InputField> {
        self.fields.iter().find(|f| f.key == key)
    }
}

impl Default for InputSchema {
    fn default() -> Self {
        let climate = ClimateReading::default();
        let temporal = TemporalContext::default();

        Self {
            title: APP_TITLE.to_string(),
            caption: APP_CAPTION.to_string(),
            fields: vec![
                InputField::new(
                    "avg_temperature",
                    "Avg Temperature (°C)",
                    10.0,
                    45.0,
                    climate.avg_temperature,
                    false,
                ),
                InputField::new("rainfall", "Rainfall (mm)", 0.0, 300.0, climate.rainfall, false),
                InputField::new("humidity", "Humidity (%)", 20.0, 100.0, climate.humidity, false),
                InputField::new(
                    "wind_speed",
                    "Wind Speed (km/h)",
                    0.0,
                    40.0,
                    climate.wind_speed,
                    false,
                ),
                InputField::new(
                    "cloud_cover",
                    "Cloud Cover (%)",
                    0.0,
                    100.0,
                    climate.cloud_cover,
                    false,
                ),
                InputField::new("aqi", "AQI", 0.0, 500.0, f64::from(climate.aqi), true),
                InputField::new("month", "Month", 1.0, 12.0, f64::from(temporal.month), true),
                InputField::new("week", "Week of Year", 1.0, 52.0, f64::from(temporal.week), true),
            ],
            months: MONTH_NAMES
                .iter()
                .enumerate()
                .map(|(i, name)| MonthOption {
                    value: i as i32 + 1,
                    name: name.to_string(),
                })
                .collect(),
        }
    }
}
