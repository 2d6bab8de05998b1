//! Data models for the `Sunseeker` application

pub mod destination;
pub mod place;
pub mod weather;

pub use destination::{Destination, EvaluatedDestination, ScoredDestination, SearchCriteria};
pub use place::{AutocompleteSuggestion, LatLng, PlaceSummary};
pub use weather::{CurrentWeather, DailySummary, OneCallWeather};
