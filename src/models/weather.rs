//! Weather data models and display methods

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Current conditions for a city, normalized from the provider payload.
///
/// Temperatures are rounded to the nearest integer at construction time;
/// the rounding is one-way and the raw values are not retained.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentWeather {
    /// Temperature in the configured units (rounded)
    pub temp: i64,
    /// Perceived temperature (rounded)
    pub feels_like: i64,
    /// Minimum temperature at the moment of observation (rounded)
    pub temp_min: i64,
    /// Maximum temperature at the moment of observation (rounded)
    pub temp_max: i64,
    /// Relative humidity percentage (0-100)
    pub humidity: i64,
    /// Atmospheric pressure in hPa
    pub pressure: i64,
    /// Human-readable description of conditions
    pub description: String,
    /// Weather condition icon ID from the provider
    pub icon: String,
    /// Cloud cover percentage (0-100)
    pub clouds: i64,
    /// Wind speed in the configured units
    pub wind_speed: f64,
    /// Sunrise time
    pub sunrise: DateTime<Utc>,
    /// Sunset time
    pub sunset: DateTime<Utc>,
    /// City name as reported by the provider
    pub city_name: String,
    /// Country code (ISO 3166-1 alpha-2)
    pub country: String,
}

impl CurrentWeather {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{}°C", self.temp)
    }

    /// Derived sunshine percentage, `100 - cloud cover`
    #[must_use]
    pub fn sunshine_pct(&self) -> i64 {
        100 - self.clouds
    }
}

/// Aggregated weather for one calendar date of a forecast.
///
/// Invariant: `sunshine_pct = 100 - avg_clouds`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DailySummary {
    /// Calendar date in the forecast city's local time
    pub date: NaiveDate,
    /// Mean temperature over the day's forecast entries (rounded)
    pub avg_temp: i64,
    /// Minimum temperature over the day (rounded)
    pub min_temp: i64,
    /// Maximum temperature over the day (rounded)
    pub max_temp: i64,
    /// Mean relative humidity (rounded)
    pub avg_humidity: i64,
    /// Mean cloud cover percentage (rounded)
    pub avg_clouds: i64,
    /// Derived sunshine percentage, `100 - avg_clouds`
    pub sunshine_pct: i64,
    /// Description taken from the day's first forecast entry
    pub description: String,
    /// Icon taken from the day's first forecast entry
    pub icon: String,
}

/// Normalized one-call response: current conditions plus per-day summaries
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OneCallWeather {
    /// Current conditions at the queried coordinates
    pub current: CurrentWeather,
    /// One summary per forecast day
    pub daily: Vec<DailySummary>,
}
