//! Places API client for the Google-Places-compatible provider
//!
//! Covers text search, nearby search, place details, city autocomplete and
//! the pure photo-URL builder. Raw payloads live in the private
//! `googleplaces` submodule; results are normalized into `PlaceSummary`.

use crate::config::PlacesConfig;
use crate::error::SunseekerError;
use crate::models::{AutocompleteSuggestion, LatLng, PlaceSummary};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

/// Default maximum width for photo URLs, in pixels
pub const DEFAULT_PHOTO_WIDTH: u32 = 400;

/// Radius in meters applied when a text search is biased to a location
const TEXT_SEARCH_RADIUS_M: u32 = 50_000;

/// Default radius for nearby searches, in meters
pub const DEFAULT_NEARBY_RADIUS_M: u32 = 5_000;

/// Default place type for nearby searches
pub const DEFAULT_NEARBY_TYPE: &str = "tourist_attraction";

/// Places API client
pub struct PlacesApiClient {
    /// HTTP client
    client: reqwest::Client,
    /// API configuration
    config: PlacesConfig,
    /// Optional CORS proxy prefix; the target URL is appended query-encoded
    proxy: Option<String>,
}

impl PlacesApiClient {
    /// Create a new places API client
    pub fn new(config: PlacesConfig, proxy: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("sunseeker/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            config,
            proxy,
        })
    }

    /// Free-text place search, optionally biased to a location
    #[instrument(skip(self, near))]
    pub async fn text_search(
        &self,
        query: &str,
        near: Option<&LatLng>,
    ) -> Result<Vec<PlaceSummary>> {
        let mut api_url = format!(
            "{}/textsearch/json?query={}&key={}&language={}",
            self.config.base_url,
            urlencoding::encode(query),
            self.config.api_key,
            self.config.language
        );

        if let Some(location) = near {
            api_url.push_str(&format!(
                "&location={}&radius={}",
                location.as_query_param(),
                TEXT_SEARCH_RADIUS_M
            ));
        }

        let payload: googleplaces::SearchResponse =
            self.fetch_json(&api_url, "place text search").await?;
        Ok(self.format_place_results(payload.results.unwrap_or_default()))
    }

    /// Search for places of one type around a location
    #[instrument(skip(self, location))]
    pub async fn nearby_search(
        &self,
        location: &LatLng,
        radius_m: u32,
        place_type: &str,
    ) -> Result<Vec<PlaceSummary>> {
        let api_url = format!(
            "{}/nearbysearch/json?location={}&radius={}&type={}&key={}&language={}",
            self.config.base_url,
            location.as_query_param(),
            radius_m,
            place_type,
            self.config.api_key,
            self.config.language
        );

        let payload: googleplaces::SearchResponse =
            self.fetch_json(&api_url, "nearby search").await?;
        Ok(self.format_place_results(payload.results.unwrap_or_default()))
    }

    /// Fetch full details for a single place
    #[instrument(skip(self))]
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceSummary> {
        let api_url = format!(
            "{}/details/json?place_id={}&key={}&language={}&fields=name,rating,formatted_address,geometry,photos,types,user_ratings_total",
            self.config.base_url, place_id, self.config.api_key, self.config.language
        );

        let payload: googleplaces::DetailsResponse =
            self.fetch_json(&api_url, "place details").await?;
        let raw = payload
            .result
            .ok_or_else(|| SunseekerError::api(format!("No details returned for {place_id}")))?;
        Ok(self.format_place(raw))
    }

    /// City-name autocomplete suggestions
    #[instrument(skip(self))]
    pub async fn autocomplete(&self, input: &str) -> Result<Vec<AutocompleteSuggestion>> {
        let api_url = format!(
            "{}/autocomplete/json?input={}&types=(cities)&key={}&language={}",
            self.config.base_url,
            urlencoding::encode(input),
            self.config.api_key,
            self.config.language
        );

        let payload: googleplaces::AutocompleteResponse =
            self.fetch_json(&api_url, "autocomplete").await?;

        Ok(payload
            .predictions
            .unwrap_or_default()
            .into_iter()
            .map(|p| AutocompleteSuggestion {
                description: p.description,
                place_id: p.place_id,
            })
            .collect())
    }

    /// Build a photo URL for a photo reference. Pure string templating, no
    /// network effect; the exact shape is the contract with the image host.
    #[must_use]
    pub fn photo_url(&self, photo_reference: &str, max_width: u32) -> String {
        format!(
            "{}/photo?maxwidth={}&photo_reference={}&key={}",
            self.config.base_url, max_width, photo_reference, self.config.api_key
        )
    }

    /// Normalize raw place records 1:1, substituting zero-defaults for
    /// missing rating fields and building photo URLs
    fn format_place_results(&self, results: Vec<googleplaces::RawPlace>) -> Vec<PlaceSummary> {
        results
            .into_iter()
            .map(|place| self.format_place(place))
            .collect()
    }

    fn format_place(&self, place: googleplaces::RawPlace) -> PlaceSummary {
        let photos = place
            .photos
            .unwrap_or_default()
            .iter()
            .map(|photo| self.photo_url(&photo.photo_reference, DEFAULT_PHOTO_WIDTH))
            .collect();

        PlaceSummary {
            place_id: place.place_id,
            name: place.name,
            address: place.formatted_address.unwrap_or_default(),
            location: place.geometry.location,
            rating: place.rating.unwrap_or(0.0),
            user_ratings_total: place.user_ratings_total.unwrap_or(0),
            types: place.types.unwrap_or_default(),
            photos,
        }
    }

    /// Route a request through the CORS proxy when one is configured
    fn request_url(&self, api_url: &str) -> String {
        match &self.proxy {
            Some(proxy) => format!("{}{}", proxy, urlencoding::encode(api_url)),
            None => api_url.to_string(),
        }
    }

    async fn fetch_json<T: DeserializeOwned>(&self, api_url: &str, what: &str) -> Result<T> {
        let url = self.request_url(api_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SunseekerError::api(format!("{what} request failed: {e}")))?;

        let status = response.status();
        debug!("{} response: {}", what, status);

        if !status.is_success() {
            return Err(SunseekerError::api(format!(
                "{what} request failed with status {status}"
            ))
            .into());
        }

        response
            .json()
            .await
            .map_err(|e| SunseekerError::api(format!("Invalid {what} response: {e}")).into())
    }
}

/// Google Places API response structures
mod googleplaces {
    use crate::models::LatLng;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct SearchResponse {
        #[serde(default)]
        pub results: Option<Vec<RawPlace>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct DetailsResponse {
        #[serde(default)]
        pub result: Option<RawPlace>,
    }

    #[derive(Debug, Deserialize)]
    pub struct AutocompleteResponse {
        #[serde(default)]
        pub predictions: Option<Vec<Prediction>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Prediction {
        pub description: String,
        pub place_id: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct RawPlace {
        #[serde(default)]
        pub place_id: String,
        pub name: String,
        #[serde(default)]
        pub formatted_address: Option<String>,
        pub geometry: Geometry,
        #[serde(default)]
        pub rating: Option<f64>,
        #[serde(default)]
        pub user_ratings_total: Option<i64>,
        #[serde(default)]
        pub types: Option<Vec<String>>,
        #[serde(default)]
        pub photos: Option<Vec<Photo>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Geometry {
        pub location: LatLng,
    }

    #[derive(Debug, Deserialize)]
    pub struct Photo {
        pub photo_reference: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlacesConfig;

    fn client() -> PlacesApiClient {
        PlacesApiClient::new(
            PlacesConfig {
                api_key: "test_key".to_string(),
                base_url: "https://maps.googleapis.com/maps/api/place".to_string(),
                language: "en".to_string(),
            },
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_photo_url_template() {
        let url = client().photo_url("abc123", DEFAULT_PHOTO_WIDTH);
        assert_eq!(
            url,
            "https://maps.googleapis.com/maps/api/place/photo?maxwidth=400&photo_reference=abc123&key=test_key"
        );
    }

    #[test]
    fn test_format_place_defaults_missing_fields() {
        let raw: googleplaces::RawPlace = serde_json::from_value(serde_json::json!({
            "place_id": "p1",
            "name": "Sagrada Família",
            "geometry": { "location": { "lat": 41.4036, "lng": 2.1744 } }
        }))
        .unwrap();

        let place = client().format_place(raw);
        assert_eq!(place.rating, 0.0);
        assert_eq!(place.user_ratings_total, 0);
        assert!(place.types.is_empty());
        assert!(place.photos.is_empty());
        assert_eq!(place.address, "");
    }

    #[test]
    fn test_format_place_builds_photo_urls() {
        let raw: googleplaces::RawPlace = serde_json::from_value(serde_json::json!({
            "place_id": "p2",
            "name": "Park Güell",
            "formatted_address": "08024 Barcelona, Spain",
            "geometry": { "location": { "lat": 41.4145, "lng": 2.1527 } },
            "rating": 4.6,
            "user_ratings_total": 190000,
            "types": ["park", "tourist_attraction"],
            "photos": [ { "photo_reference": "ref1" }, { "photo_reference": "ref2" } ]
        }))
        .unwrap();

        let place = client().format_place(raw);
        assert_eq!(place.photos.len(), 2);
        assert!(place.photos[0].contains("photo_reference=ref1"));
        assert!(place.photos[0].contains("maxwidth=400"));
        assert_eq!(place.rating, 4.6);
    }

    #[test]
    fn test_proxy_wraps_target_url() {
        let proxied = PlacesApiClient::new(
            PlacesConfig {
                api_key: "test_key".to_string(),
                base_url: "https://maps.googleapis.com/maps/api/place".to_string(),
                language: "en".to_string(),
            },
            Some("https://corsproxy.example/?".to_string()),
        )
        .unwrap();

        let url = proxied.request_url("https://maps.googleapis.com/maps/api/place/x?y=1");
        assert!(url.starts_with("https://corsproxy.example/?"));
        assert!(url.contains("https%3A%2F%2Fmaps.googleapis.com"));
    }
}
