//! Destination search orchestration
//!
//! Drives the fetch-all-in-parallel → filter → score pipeline. The whole
//! live-data path runs under a global timeout; when it fires, the pending
//! evaluation futures are dropped (aborting their in-flight requests) and
//! the offline fallback scores the catalog's static weather tags instead.

use crate::config::SearchConfig;
use crate::evaluator::{evaluate_destination, evaluate_offline};
use crate::models::{
    CurrentWeather, DailySummary, Destination, EvaluatedDestination, PlaceSummary,
    ScoredDestination, SearchCriteria,
};
use crate::places::PlacesApiClient;
use crate::scorer::calculate_scores;
use crate::weather::WeatherApiClient;
use anyhow::Result;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

/// Everything known about a single city, for the detail/overview view
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CityOverview {
    /// City name as queried
    pub city: String,
    /// Current conditions, when the weather call succeeded
    pub weather: Option<CurrentWeather>,
    /// Per-day forecast summaries (empty when the call failed)
    pub forecast: Vec<DailySummary>,
    /// Top attractions (truncated to the configured maximum)
    pub places: Vec<PlaceSummary>,
    /// Photo URLs of the first place, when any
    pub photos: Vec<String>,
}

/// Destination search service: the composition of both API clients and the
/// static catalog, constructed once and injected wherever searches run
pub struct SearchService {
    weather: WeatherApiClient,
    places: PlacesApiClient,
    catalog: Vec<Destination>,
    timeout: Duration,
    max_places: usize,
}

impl SearchService {
    /// Create a new search service from injected clients and catalog
    #[must_use]
    pub fn new(
        weather: WeatherApiClient,
        places: PlacesApiClient,
        catalog: Vec<Destination>,
        config: &SearchConfig,
    ) -> Self {
        Self {
            weather,
            places,
            catalog,
            timeout: Duration::from_secs(config.timeout_seconds.into()),
            max_places: config.max_places as usize,
        }
    }

    /// Search the catalog against the criteria.
    ///
    /// Validates first; no network call is made for invalid criteria. Every
    /// catalog entry is evaluated concurrently, one slow or failing
    /// destination never blocks the others. On global timeout the in-flight
    /// work is dropped and the offline fallback path answers instead.
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<ScoredDestination>> {
        criteria.validate()?;

        info!(
            "Searching {} destinations ({}..{}°C{})",
            self.catalog.len(),
            criteria.min_temp,
            criteria.max_temp,
            if criteria.sunny { ", sunny" } else { "" }
        );

        match timeout(self.timeout, self.evaluate_catalog(criteria)).await {
            Ok(evaluated) => {
                info!("{} destinations survived the filters", evaluated.len());
                Ok(calculate_scores(evaluated, criteria))
            }
            Err(_elapsed) => {
                warn!(
                    "Live search exceeded {:.0}s, falling back to catalog weather tags",
                    self.timeout.as_secs_f64()
                );
                Ok(self.search_offline(criteria))
            }
        }
    }

    /// Offline evaluation using only the catalog's pre-baked weather tags
    #[must_use]
    pub fn search_offline(&self, criteria: &SearchCriteria) -> Vec<ScoredDestination> {
        let evaluated = self
            .catalog
            .iter()
            .filter_map(|destination| evaluate_offline(destination, criteria))
            .collect();
        calculate_scores(evaluated, criteria)
    }

    async fn evaluate_catalog(&self, criteria: &SearchCriteria) -> Vec<EvaluatedDestination> {
        let evaluations = self
            .catalog
            .iter()
            .map(|destination| evaluate_destination(&self.weather, destination, criteria));

        join_all(evaluations).await.into_iter().flatten().collect()
    }

    /// Gather weather, forecast and top attractions for one city.
    ///
    /// The three calls run together; each failure degrades its own slice of
    /// the overview (logged) instead of failing the whole view.
    pub async fn city_overview(&self, city: &str) -> CityOverview {
        let attractions_query = format!("{city} attractions");
        let (weather, forecast, places) = tokio::join!(
            self.weather.current_weather(city),
            self.weather.forecast(city),
            self.places.text_search(&attractions_query, None),
        );

        let weather = weather
            .map_err(|e| warn!("No current weather for {city}: {e}"))
            .ok();
        let forecast = forecast
            .map_err(|e| warn!("No forecast for {city}: {e}"))
            .unwrap_or_default();
        let mut places = places
            .map_err(|e| warn!("No places for {city}: {e}"))
            .unwrap_or_default();
        places.truncate(self.max_places);

        let photos = places
            .first()
            .map(|place| place.photos.clone())
            .unwrap_or_default();

        CityOverview {
            city: city.to_string(),
            weather,
            forecast,
            places,
            photos,
        }
    }

    /// Build overviews for several cities concurrently
    pub async fn compare_cities(&self, cities: &[String]) -> Vec<CityOverview> {
        join_all(cities.iter().map(|city| self.city_overview(city))).await
    }

    /// First photo of the best-matching place for a city, when any
    pub async fn destination_photo(&self, city: &str) -> Option<String> {
        match self.places.text_search(city, None).await {
            Ok(places) => places
                .first()
                .and_then(|place| place.photos.first().cloned()),
            Err(e) => {
                warn!("Photo lookup failed for {city}: {e}");
                None
            }
        }
    }
}
