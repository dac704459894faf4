//! Climate readings, calendar context and the model feature row

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Climate readings for a tea garden
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Validate)]
pub struct ClimateReading {
    /// Average temperature (°C)
    #[validate(range(min = 10.0, max = 45.0))]
    pub avg_temperature: f64,
    /// Rainfall (mm)
    #[validate(range(min = 0.0, max = 300.0))]
    pub rainfall: f64,
    /// Relative humidity (%)
    #[validate(range(min = 20.0, max = 100.0))]
    pub humidity: f64,
    /// Wind speed (km/h)
    #[validate(range(min = 0.0, max = 40.0))]
    pub wind_speed: f64,
    /// Cloud cover (%)
    #[validate(range(min = 0.0, max = 100.0))]
    pub cloud_cover: f64,
    /// Air quality index
    #[validate(range(min = 0, max = 500))]
    pub aqi: i32,
}

impl Default for ClimateReading {
    fn default() -> Self {
        Self {
            avg_temperature: 28.0,
            rainfall: 80.0,
            humidity: 70.0,
            wind_speed: 10.0,
            cloud_cover: 50.0,
            aqi: 120,
        }
    }
}

/// Calendar position of a reading
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct TemporalContext {
    /// Month of year (1-12)
    #[validate(range(min = 1, max = 12))]
    pub month: i32,
    /// Week of year (1-52)
    #[validate(range(min = 1, max = 52))]
    pub week: i32,
}

impl Default for TemporalContext {
    fn default() -> Self {
        Self { month: 1, week: 20 }
    }
}

impl TemporalContext {
    pub fn new(month: i32, week: i32) -> Self {
        Self { month, week }
    }

    /// Derive month and week-of-year from a calendar date.
    ///
    /// Uses the ISO week number. ISO week 53 is reported as week 52.
    pub fn from_date(date: NaiveDate) -> Self {
        let week = date.iso_week().week().min(52) as i32;
        Self {
            month: date.month() as i32,
            week,
        }
    }
}

/// Number of columns the stress classifier consumes
pub const FEATURE_COUNT: usize = 8;

/// Single-row model input in training column order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct FeatureRow([f64; FEATURE_COUNT]);

impl FeatureRow {
    /// Column names, in the order the classifier was trained with
    pub const COLUMNS: [&'static str; FEATURE_COUNT] = [
        "avg_temperature",
        "rainfall",
        "humidity",
        "wind_speed",
        "cloud_cover",
        "aqi",
        "month",
        "week",
    ];

    /// Build the feature row for one reading.
    ///
    /// Values are copied as-is: no scaling, no clamping, no range checks.
    pub fn assemble(climate: &ClimateReading, temporal: &TemporalContext) -> Self {
        Self([
            climate.avg_temperature,
            climate.rainfall,
            climate.humidity,
            climate.wind_speed,
            climate.cloud_cover,
            f64::from(climate.aqi),
            f64::from(temporal.month),
            f64::from(temporal.week),
        ])
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value of a named column
    pub fn get(&self, column: &str) -> Option<f64> {
        Self::COLUMNS
            .iter()
            .position(|c| *c == column)
            .map(|i| self.0[i])
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureRow {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assemble_column_order() {
        let climate = ClimateReading {
            avg_temperature: 31.5,
            rainfall: 12.0,
            humidity: 44.0,
            wind_speed: 7.5,
            cloud_cover: 20.0,
            aqi: 180,
        };
        let row = FeatureRow::assemble(&climate, &TemporalContext::new(4, 15));

        assert_eq!(
            row.values(),
            &[31.5, 12.0, 44.0, 7.5, 20.0, 180.0, 4.0, 15.0]
        );
        assert_eq!(row.get("aqi"), Some(180.0));
        assert_eq!(row.get("week"), Some(15.0));
        assert_eq!(row.get("soil_ph"), None);
    }

    #[test]
    fn test_assemble_does_not_clamp() {
        let climate = ClimateReading {
            avg_temperature: 60.0,
            aqi: -5,
            ..ClimateReading::default()
        };
        let row = FeatureRow::assemble(&climate, &TemporalContext::new(13, 0));

        assert_eq!(row.get("avg_temperature"), Some(60.0));
        assert_eq!(row.get("aqi"), Some(-5.0));
        assert_eq!(row.get("month"), Some(13.0));
        assert_eq!(row.get("week"), Some(0.0));
    }

    #[test]
    fn test_temporal_context_from_date() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 15).unwrap();
        assert_eq!(TemporalContext::from_date(date), TemporalContext::new(5, 20));

        // 2020-12-31 falls in ISO week 53
        let date = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
        assert_eq!(TemporalContext::from_date(date), TemporalContext::new(12, 52));
    }

    #[test]
    fn test_defaults_are_in_range() {
        assert!(ClimateReading::default().validate().is_ok());
        assert!(TemporalContext::default().validate().is_ok());
    }
}
