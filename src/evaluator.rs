//! Destination evaluation
//!
//! For each catalog destination the evaluator fetches current weather and
//! the 5-day forecast concurrently, derives trip-level aggregates and applies
//! the hard filters. A failed fetch or an empty forecast excludes the
//! destination; that is a normal filtering outcome, never an error. The
//! offline variant applies the same filters to the catalog's static tags.

use crate::models::{DailySummary, Destination, EvaluatedDestination, SearchCriteria};
use crate::weather::WeatherApiClient;
use tracing::{debug, warn};

/// Minimum average sunshine percentage required when `criteria.sunny` is set
const SUNNY_THRESHOLD: i64 = 70;

/// Rounded mean of an integer series
fn rounded_mean(values: impl Iterator<Item = i64>) -> i64 {
    let collected: Vec<i64> = values.collect();
    if collected.is_empty() {
        return 0;
    }
    (collected.iter().sum::<i64>() as f64 / collected.len() as f64).round() as i64
}

/// Trip-level aggregates derived from the per-day forecast
#[must_use]
pub fn forecast_aggregates(forecast: &[DailySummary]) -> (i64, i64) {
    let avg_temp = rounded_mean(forecast.iter().map(|day| day.avg_temp));
    let avg_sunshine = rounded_mean(forecast.iter().map(|day| day.sunshine_pct));
    (avg_temp, avg_sunshine)
}

/// The five hard exclusion rules, evaluated in order.
///
/// Returns `true` when the destination survives all of them. This is a pure
/// predicate: nothing else ever excludes a destination.
#[must_use]
pub fn passes_filters(
    avg_temp: i64,
    avg_sunshine: i64,
    destination: &Destination,
    criteria: &SearchCriteria,
) -> bool {
    if avg_temp < criteria.min_temp || avg_temp > criteria.max_temp {
        return false;
    }
    if criteria.sunny && avg_sunshine < SUNNY_THRESHOLD {
        return false;
    }
    if criteria.beach && !destination.beach {
        return false;
    }
    if criteria.culture && !destination.culture {
        return false;
    }
    if criteria.nature && !destination.nature {
        return false;
    }
    true
}

/// Evaluate one destination against live weather data.
///
/// Current weather and forecast are fetched together; the destination is
/// dropped unless both arrive and the forecast is non-empty.
pub async fn evaluate_destination(
    weather: &WeatherApiClient,
    destination: &Destination,
    criteria: &SearchCriteria,
) -> Option<EvaluatedDestination> {
    let (current, forecast) = tokio::join!(
        weather.current_weather(&destination.name),
        weather.forecast(&destination.name)
    );

    let current = match current {
        Ok(current) => current,
        Err(e) => {
            warn!("Excluding {}: current weather failed: {e}", destination.name);
            return None;
        }
    };

    let forecast = match forecast {
        Ok(forecast) => forecast,
        Err(e) => {
            warn!("Excluding {}: forecast failed: {e}", destination.name);
            return None;
        }
    };

    if forecast.is_empty() {
        warn!("Excluding {}: forecast was empty", destination.name);
        return None;
    }

    let (avg_temp, avg_sunshine) = forecast_aggregates(&forecast);

    if !passes_filters(avg_temp, avg_sunshine, destination, criteria) {
        debug!(
            "{} filtered out (avg temp {avg_temp}, sunshine {avg_sunshine}%)",
            destination.name
        );
        return None;
    }

    Some(EvaluatedDestination {
        destination: destination.clone(),
        avg_temp,
        sunshine: avg_sunshine,
        humidity: Some(current.humidity),
        current: Some(current),
        forecast,
    })
}

/// Evaluate one destination against its static catalog tags only.
///
/// Used by the fallback path when live data is unavailable or too slow.
#[must_use]
pub fn evaluate_offline(
    destination: &Destination,
    criteria: &SearchCriteria,
) -> Option<EvaluatedDestination> {
    if !passes_filters(
        destination.avg_temp,
        destination.sunshine,
        destination,
        criteria,
    ) {
        return None;
    }

    Some(EvaluatedDestination {
        destination: destination.clone(),
        avg_temp: destination.avg_temp,
        sunshine: destination.sunshine,
        humidity: None,
        current: None,
        forecast: Vec::new(),
    })
}
