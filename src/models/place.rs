//! Place models normalized from the places provider

use serde::{Deserialize, Serialize};

/// Geographic coordinates as reported by the places provider
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct LatLng {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
}

impl LatLng {
    /// Format as the `lat,lng` pair the provider expects in query strings
    #[must_use]
    pub fn as_query_param(&self) -> String {
        format!("{},{}", self.lat, self.lng)
    }
}

/// A place search result, normalized 1:1 from the raw record.
///
/// `rating` and `user_ratings_total` default to 0 when the provider omits
/// them; `photos` is empty when the record carries no photo references.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaceSummary {
    /// Provider's stable place identifier
    pub place_id: String,
    /// Display name
    pub name: String,
    /// Formatted address
    pub address: String,
    /// Location coordinates
    pub location: LatLng,
    /// Average user rating (0 when absent)
    pub rating: f64,
    /// Number of user ratings (0 when absent)
    pub user_ratings_total: i64,
    /// Provider place-type tags
    pub types: Vec<String>,
    /// Ready-to-fetch photo URLs
    pub photos: Vec<String>,
}

/// A city autocomplete suggestion
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AutocompleteSuggestion {
    /// Suggested place description (e.g. "Barcelona, Spain")
    pub description: String,
    /// Provider's stable place identifier
    pub place_id: String,
}
