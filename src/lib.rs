//! `Sunseeker` - weather-aware travel destination finder
//!
//! This library queries a weather provider and a places provider, merges
//! their responses with a static catalog of candidate destinations, filters
//! and scores the candidates against user criteria, and renders the ranked
//! result as terminal cards.

pub mod catalog;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod models;
pub mod places;
pub mod report;
pub mod scorer;
pub mod search;
pub mod weather;

// Re-export core types for public API
pub use config::SunseekerConfig;
pub use error::SunseekerError;
pub use models::{
    CurrentWeather, DailySummary, Destination, EvaluatedDestination, PlaceSummary,
    ScoredDestination, SearchCriteria,
};
pub use places::PlacesApiClient;
pub use scorer::calculate_scores;
pub use search::{CityOverview, SearchService};
pub use weather::WeatherApiClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
