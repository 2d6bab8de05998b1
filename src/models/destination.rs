//! Destination catalog entries, search criteria, and pipeline stages

use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::weather::{CurrentWeather, DailySummary};
use crate::error::SunseekerError;

/// A static, catalog-defined travel candidate with descriptive tags.
///
/// `avg_temp` and `sunshine` are pre-baked seasonal estimates used only by
/// the offline fallback path when live weather is unavailable.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Destination {
    /// City name, also used as the weather query
    pub name: String,
    /// Country name
    pub country: String,
    /// Has beaches worth travelling for
    pub beach: bool,
    /// Has significant cultural sights
    pub culture: bool,
    /// Has notable nature or outdoor activities
    pub nature: bool,
    /// Short blurb shown on the result card
    pub description: String,
    /// Emoji shown next to the name
    pub emoji: String,
    /// Typical temperature estimate for the fallback path
    pub avg_temp: i64,
    /// Typical sunshine percentage estimate for the fallback path
    pub sunshine: i64,
}

/// User-entered search criteria from the form boundary
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SearchCriteria {
    /// Trip start date
    pub start_date: Option<NaiveDate>,
    /// Trip duration in days
    pub duration_days: u32,
    /// Minimum acceptable average temperature
    pub min_temp: i64,
    /// Maximum acceptable average temperature
    pub max_temp: i64,
    /// Require at least 70% average sunshine
    pub sunny: bool,
    /// Require a beach destination
    pub beach: bool,
    /// Require a culture destination
    pub culture: bool,
    /// Require a nature destination
    pub nature: bool,
}

impl SearchCriteria {
    /// Validate the criteria before any network call is made
    pub fn validate(&self) -> Result<()> {
        if self.min_temp > self.max_temp {
            return Err(SunseekerError::validation(format!(
                "Minimum temperature ({}) cannot exceed maximum temperature ({})",
                self.min_temp, self.max_temp
            ))
            .into());
        }

        if self.duration_days < 1 || self.duration_days > 30 {
            return Err(SunseekerError::validation(format!(
                "Trip duration must be between 1 and 30 days, got {}",
                self.duration_days
            ))
            .into());
        }

        Ok(())
    }

    /// Midpoint of the acceptable temperature range, used by the scorer
    #[must_use]
    pub fn temp_midpoint(&self) -> f64 {
        (self.min_temp + self.max_temp) as f64 / 2.0
    }
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self {
            start_date: None,
            duration_days: 7,
            min_temp: 15,
            max_temp: 30,
            sunny: false,
            beach: false,
            culture: false,
            nature: false,
        }
    }
}

/// A destination that survived the hard filters, enriched with trip-level
/// aggregates and the fetched weather data.
///
/// The offline fallback path produces these too; there `current` is `None`
/// and `forecast` is empty, with the aggregates taken from the static tags.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EvaluatedDestination {
    /// The catalog entry this evaluation is for
    pub destination: Destination,
    /// Rounded mean of the forecast's daily average temperatures
    pub avg_temp: i64,
    /// Rounded mean of the forecast's daily sunshine percentages
    pub sunshine: i64,
    /// Current humidity, when live data was available
    pub humidity: Option<i64>,
    /// Current conditions, when live data was available
    pub current: Option<CurrentWeather>,
    /// Per-day forecast summaries (empty on the fallback path)
    pub forecast: Vec<DailySummary>,
}

/// Terminal pipeline shape: an evaluated destination plus its match score
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ScoredDestination {
    /// The evaluated destination being ranked
    pub evaluated: EvaluatedDestination,
    /// Weighted match score; unbounded above by design
    pub match_score: i64,
}
