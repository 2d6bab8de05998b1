//! Weather API client for the OpenWeatherMap-compatible provider
//!
//! One configurable client covers the current-weather, 5-day/3-hour forecast
//! and one-call endpoints. Raw provider payloads live in the private
//! `openweather` submodule together with the normalization into the crate's
//! own models; callers only ever see `CurrentWeather` and `DailySummary`.

use crate::config::WeatherConfig;
use crate::error::SunseekerError;
use crate::models::{CurrentWeather, DailySummary, OneCallWeather};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Weather API client
pub struct WeatherApiClient {
    /// HTTP client
    client: reqwest::Client,
    /// API configuration
    config: WeatherConfig,
    /// Optional CORS proxy prefix; the target URL is appended query-encoded
    proxy: Option<String>,
}

impl WeatherApiClient {
    /// Create a new weather API client
    pub fn new(config: WeatherConfig, proxy: Option<String>) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("sunseeker/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            config,
            proxy,
        })
    }

    /// Get normalized current weather for a city
    #[instrument(skip(self))]
    pub async fn current_weather(&self, city: &str) -> Result<CurrentWeather> {
        let api_url = format!(
            "{}/weather?q={}&appid={}&units={}&lang={}",
            self.config.base_url,
            urlencoding::encode(city),
            self.config.api_key,
            self.config.units,
            self.config.lang
        );

        let payload: openweather::CurrentResponse =
            self.fetch_json(&api_url, "current weather").await?;
        Ok(openweather::format_current_weather(&payload))
    }

    /// Get normalized current weather for coordinates
    #[instrument(skip(self))]
    pub async fn current_weather_by_coords(&self, lat: f64, lon: f64) -> Result<CurrentWeather> {
        let api_url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units={}&lang={}",
            self.config.base_url, lat, lon, self.config.api_key, self.config.units, self.config.lang
        );

        let payload: openweather::CurrentResponse =
            self.fetch_json(&api_url, "current weather").await?;
        Ok(openweather::format_current_weather(&payload))
    }

    /// Get the 5-day forecast for a city, aggregated into per-day summaries.
    ///
    /// The provider returns 3-hour interval entries; these are grouped by
    /// calendar date in the city's own UTC offset and averaged per day.
    #[instrument(skip(self))]
    pub async fn forecast(&self, city: &str) -> Result<Vec<DailySummary>> {
        let api_url = format!(
            "{}/forecast?q={}&appid={}&units={}&lang={}",
            self.config.base_url,
            urlencoding::encode(city),
            self.config.api_key,
            self.config.units,
            self.config.lang
        );

        let start = Instant::now();
        let payload: openweather::ForecastResponse = self.fetch_json(&api_url, "forecast").await?;
        let daily = openweather::format_forecast(&payload);

        info!(
            "Aggregated {} forecast entries into {} daily summaries for {} in {:.3}s",
            payload.list.len(),
            daily.len(),
            city,
            start.elapsed().as_secs_f64()
        );

        Ok(daily)
    }

    /// Get current conditions plus per-day summaries from the one-call endpoint
    #[instrument(skip(self))]
    pub async fn one_call(&self, lat: f64, lon: f64) -> Result<OneCallWeather> {
        let api_url = format!(
            "{}/onecall?lat={}&lon={}&appid={}&units={}&lang={}",
            self.config.base_url, lat, lon, self.config.api_key, self.config.units, self.config.lang
        );

        let payload: openweather::OneCallResponse = self.fetch_json(&api_url, "one-call").await?;
        Ok(openweather::format_one_call_weather(&payload))
    }

    /// Route a request through the CORS proxy when one is configured
    fn request_url(&self, api_url: &str) -> String {
        match &self.proxy {
            Some(proxy) => format!("{}{}", proxy, urlencoding::encode(api_url)),
            None => api_url.to_string(),
        }
    }

    /// Issue one GET and deserialize the JSON body.
    ///
    /// A non-success status and a malformed body are both reported as API
    /// errors; the caller decides whether that excludes a destination or
    /// degrades an overview.
    async fn fetch_json<T: DeserializeOwned>(&self, api_url: &str, what: &str) -> Result<T> {
        let url = self.request_url(api_url);
        let start = Instant::now();

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SunseekerError::api(format!("{what} request failed: {e}")))?;

        let status = response.status();
        debug!(
            "{} response: {} in {:.3}s",
            what,
            status,
            start.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            return Err(SunseekerError::api(format!(
                "{what} request failed with status {status}"
            ))
            .into());
        }

        if start.elapsed().as_secs() > 5 {
            warn!(
                "Slow {} response: {:.3}s",
                what,
                start.elapsed().as_secs_f64()
            );
        }

        response
            .json()
            .await
            .map_err(|e| SunseekerError::api(format!("Invalid {what} response: {e}")).into())
    }
}

/// OpenWeatherMap API response structures and normalization
mod openweather {
    use crate::models::{CurrentWeather, DailySummary, OneCallWeather};
    use chrono::{DateTime, FixedOffset, Offset, Utc};
    use indexmap::IndexMap;
    use serde::Deserialize;

    /// Current-weather payload (`/weather` endpoint)
    #[derive(Debug, Deserialize)]
    pub struct CurrentResponse {
        pub name: String,
        pub main: Main,
        pub weather: Vec<Condition>,
        pub clouds: Clouds,
        pub wind: Wind,
        pub sys: Sys,
    }

    #[derive(Debug, Deserialize)]
    pub struct Main {
        pub temp: f64,
        pub feels_like: f64,
        pub temp_min: f64,
        pub temp_max: f64,
        pub humidity: i64,
        pub pressure: i64,
    }

    #[derive(Debug, Deserialize, Clone)]
    pub struct Condition {
        pub description: String,
        pub icon: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct Clouds {
        pub all: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct Wind {
        pub speed: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct Sys {
        #[serde(default)]
        pub country: Option<String>,
        pub sunrise: i64,
        pub sunset: i64,
    }

    /// 5-day/3-hour forecast payload (`/forecast` endpoint)
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub list: Vec<ForecastEntry>,
        pub city: ForecastCity,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastEntry {
        pub dt: i64,
        pub main: ForecastMain,
        pub weather: Vec<Condition>,
        pub clouds: Clouds,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastMain {
        pub temp: f64,
        pub humidity: f64,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastCity {
        /// Shift in seconds from UTC for the forecast city
        #[serde(default)]
        pub timezone: i64,
    }

    /// One-call payload (`/onecall` endpoint)
    #[derive(Debug, Deserialize)]
    pub struct OneCallResponse {
        #[serde(default)]
        pub timezone_offset: i64,
        pub current: OneCallCurrent,
        pub daily: Vec<OneCallDaily>,
    }

    #[derive(Debug, Deserialize)]
    pub struct OneCallCurrent {
        pub temp: f64,
        pub feels_like: f64,
        pub humidity: i64,
        pub pressure: i64,
        pub clouds: f64,
        pub wind_speed: f64,
        pub sunrise: i64,
        pub sunset: i64,
        pub weather: Vec<Condition>,
    }

    #[derive(Debug, Deserialize)]
    pub struct OneCallDaily {
        pub dt: i64,
        pub temp: OneCallDailyTemp,
        pub humidity: f64,
        pub clouds: f64,
        pub weather: Vec<Condition>,
    }

    #[derive(Debug, Deserialize)]
    pub struct OneCallDailyTemp {
        pub min: f64,
        pub max: f64,
        pub day: f64,
    }

    /// Round half away from zero, the way the card values are displayed
    fn round(value: f64) -> i64 {
        value.round() as i64
    }

    fn mean(values: &[f64]) -> f64 {
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Out-of-range epochs map to the Unix epoch so normalization stays
    /// deterministic for any payload.
    fn epoch_to_utc(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }

    fn condition(conditions: &[Condition]) -> Condition {
        conditions.first().cloned().unwrap_or(Condition {
            description: String::new(),
            icon: String::new(),
        })
    }

    /// Normalize the current-weather payload
    pub fn format_current_weather(payload: &CurrentResponse) -> CurrentWeather {
        let condition = condition(&payload.weather);

        CurrentWeather {
            temp: round(payload.main.temp),
            feels_like: round(payload.main.feels_like),
            temp_min: round(payload.main.temp_min),
            temp_max: round(payload.main.temp_max),
            humidity: payload.main.humidity,
            pressure: payload.main.pressure,
            description: condition.description,
            icon: condition.icon,
            clouds: round(payload.clouds.all),
            wind_speed: payload.wind.speed,
            sunrise: epoch_to_utc(payload.sys.sunrise),
            sunset: epoch_to_utc(payload.sys.sunset),
            city_name: payload.name.clone(),
            country: payload.sys.country.clone().unwrap_or_default(),
        }
    }

    /// Per-date accumulator for the 3-hourly forecast entries
    #[derive(Default)]
    struct DayBucket {
        temps: Vec<f64>,
        humidity: Vec<f64>,
        clouds: Vec<f64>,
        description: String,
        icon: String,
    }

    /// Aggregate 3-hour forecast entries into per-day summaries.
    ///
    /// Entries are grouped by calendar date in the city's own UTC offset and
    /// the buckets keep first-encounter order, so the output follows the
    /// order dates appear in the payload rather than a sorted order.
    /// Description and icon come from each bucket's first entry.
    pub fn format_forecast(payload: &ForecastResponse) -> Vec<DailySummary> {
        let offset = FixedOffset::east_opt(payload.city.timezone as i32)
            .unwrap_or_else(|| Utc.fix());

        let mut buckets: IndexMap<chrono::NaiveDate, DayBucket> = IndexMap::new();

        for entry in &payload.list {
            let date = epoch_to_utc(entry.dt).with_timezone(&offset).date_naive();
            let condition = condition(&entry.weather);

            let bucket = buckets.entry(date).or_default();
            if bucket.temps.is_empty() {
                bucket.description = condition.description;
                bucket.icon = condition.icon;
            }
            bucket.temps.push(entry.main.temp);
            bucket.humidity.push(entry.main.humidity);
            bucket.clouds.push(entry.clouds.all);
        }

        buckets
            .into_iter()
            .map(|(date, bucket)| {
                let min = bucket.temps.iter().copied().fold(f64::INFINITY, f64::min);
                let max = bucket
                    .temps
                    .iter()
                    .copied()
                    .fold(f64::NEG_INFINITY, f64::max);
                let avg_clouds = round(mean(&bucket.clouds));

                DailySummary {
                    date,
                    avg_temp: round(mean(&bucket.temps)),
                    min_temp: round(min),
                    max_temp: round(max),
                    avg_humidity: round(mean(&bucket.humidity)),
                    avg_clouds,
                    sunshine_pct: 100 - avg_clouds,
                    description: bucket.description,
                    icon: bucket.icon,
                }
            })
            .collect()
    }

    /// Normalize the one-call payload into current conditions plus daily
    /// summaries. Each day reports a single cloud value, so sunshine is
    /// `100 - clouds` directly with no averaging.
    pub fn format_one_call_weather(payload: &OneCallResponse) -> OneCallWeather {
        let offset = FixedOffset::east_opt(payload.timezone_offset as i32)
            .unwrap_or_else(|| Utc.fix());
        let current_condition = condition(&payload.current.weather);

        // The one-call current block has no per-observation min/max; take
        // today's daily range when present.
        let (temp_min, temp_max) = payload
            .daily
            .first()
            .map(|day| (round(day.temp.min), round(day.temp.max)))
            .unwrap_or((round(payload.current.temp), round(payload.current.temp)));

        let current = CurrentWeather {
            temp: round(payload.current.temp),
            feels_like: round(payload.current.feels_like),
            temp_min,
            temp_max,
            humidity: payload.current.humidity,
            pressure: payload.current.pressure,
            description: current_condition.description,
            icon: current_condition.icon,
            clouds: round(payload.current.clouds),
            wind_speed: payload.current.wind_speed,
            sunrise: epoch_to_utc(payload.current.sunrise),
            sunset: epoch_to_utc(payload.current.sunset),
            city_name: String::new(),
            country: String::new(),
        };

        let daily = payload
            .daily
            .iter()
            .map(|day| {
                let condition = condition(&day.weather);
                let clouds = round(day.clouds);

                DailySummary {
                    date: epoch_to_utc(day.dt).with_timezone(&offset).date_naive(),
                    avg_temp: round(day.temp.day),
                    min_temp: round(day.temp.min),
                    max_temp: round(day.temp.max),
                    avg_humidity: round(day.humidity),
                    avg_clouds: clouds,
                    sunshine_pct: 100 - clouds,
                    description: condition.description,
                    icon: condition.icon,
                }
            })
            .collect();

        OneCallWeather { current, daily }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        fn entry(dt: i64, temp: f64, humidity: f64, clouds: f64, description: &str) -> ForecastEntry {
            ForecastEntry {
                dt,
                main: ForecastMain { temp, humidity },
                weather: vec![Condition {
                    description: description.to_string(),
                    icon: "01d".to_string(),
                }],
                clouds: Clouds { all: clouds },
            }
        }

        // 2024-06-01 00:00:00 UTC
        const DAY_ONE: i64 = 1_717_200_000;
        const THREE_HOURS: i64 = 3 * 3600;
        const ONE_DAY: i64 = 24 * 3600;

        #[test]
        fn test_format_forecast_buckets_by_date() {
            let payload = ForecastResponse {
                list: vec![
                    entry(DAY_ONE, 20.0, 50.0, 20.0, "clear sky"),
                    entry(DAY_ONE + THREE_HOURS, 24.0, 60.0, 40.0, "few clouds"),
                    entry(DAY_ONE + ONE_DAY, 18.0, 70.0, 90.0, "rain"),
                ],
                city: ForecastCity { timezone: 0 },
            };

            let daily = format_forecast(&payload);
            assert_eq!(daily.len(), 2);

            let first = &daily[0];
            assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
            assert_eq!(first.avg_temp, 22);
            assert_eq!(first.min_temp, 20);
            assert_eq!(first.max_temp, 24);
            assert_eq!(first.avg_humidity, 55);
            assert_eq!(first.avg_clouds, 30);
            assert_eq!(first.sunshine_pct, 70);
            // description comes from the bucket's first entry, not the mode
            assert_eq!(first.description, "clear sky");

            let second = &daily[1];
            assert_eq!(second.avg_clouds, 90);
            assert_eq!(second.sunshine_pct, 10);
            assert_eq!(second.description, "rain");
        }

        #[test]
        fn test_format_forecast_preserves_first_encounter_order() {
            // Later date appears first in the payload; output must not re-sort
            let payload = ForecastResponse {
                list: vec![
                    entry(DAY_ONE + ONE_DAY, 18.0, 70.0, 10.0, "clear"),
                    entry(DAY_ONE, 20.0, 50.0, 20.0, "clouds"),
                ],
                city: ForecastCity { timezone: 0 },
            };

            let daily = format_forecast(&payload);
            assert_eq!(daily.len(), 2);
            assert!(daily[0].date > daily[1].date);
        }

        #[test]
        fn test_format_forecast_city_offset_shifts_bucket_boundary() {
            // 23:00 UTC on day one falls on day two at UTC+2
            let payload = ForecastResponse {
                list: vec![
                    entry(DAY_ONE + 23 * 3600, 20.0, 50.0, 0.0, "clear"),
                    entry(DAY_ONE + ONE_DAY + 2 * 3600, 22.0, 50.0, 0.0, "clear"),
                ],
                city: ForecastCity { timezone: 7200 },
            };

            let daily = format_forecast(&payload);
            assert_eq!(daily.len(), 1);
            assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        }

        #[test]
        fn test_sunshine_invariant_holds_per_bucket() {
            let payload = ForecastResponse {
                list: vec![
                    entry(DAY_ONE, 20.0, 50.0, 33.0, "x"),
                    entry(DAY_ONE + THREE_HOURS, 20.0, 50.0, 40.0, "x"),
                ],
                city: ForecastCity { timezone: 0 },
            };

            let daily = format_forecast(&payload);
            // mean clouds 36.5 rounds to 37 (half away from zero)
            assert_eq!(daily[0].avg_clouds, 37);
            assert_eq!(daily[0].sunshine_pct, 100 - daily[0].avg_clouds);
        }

        #[test]
        fn test_unrepresentable_epoch_normalizes_to_unix_epoch() {
            let payload = ForecastResponse {
                list: vec![entry(i64::MAX, 20.0, 50.0, 10.0, "clear")],
                city: ForecastCity { timezone: 0 },
            };

            let daily = format_forecast(&payload);
            assert_eq!(daily[0].date, NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
        }

        #[test]
        fn test_format_current_weather_rounds_temperatures() {
            let payload = CurrentResponse {
                name: "Lisbon".to_string(),
                main: Main {
                    temp: 21.4,
                    feels_like: 20.6,
                    temp_min: 18.5,
                    temp_max: 23.49,
                    humidity: 55,
                    pressure: 1016,
                },
                weather: vec![Condition {
                    description: "scattered clouds".to_string(),
                    icon: "03d".to_string(),
                }],
                clouds: Clouds { all: 40.0 },
                wind: Wind { speed: 3.6 },
                sys: Sys {
                    country: Some("PT".to_string()),
                    sunrise: DAY_ONE,
                    sunset: DAY_ONE + 14 * 3600,
                },
            };

            let weather = format_current_weather(&payload);
            assert_eq!(weather.temp, 21);
            assert_eq!(weather.feels_like, 21);
            assert_eq!(weather.temp_min, 19);
            assert_eq!(weather.temp_max, 23);
            assert_eq!(weather.city_name, "Lisbon");
            assert_eq!(weather.country, "PT");
            assert_eq!(weather.sunrise.timestamp(), DAY_ONE);
        }

        #[test]
        fn test_format_one_call_weather() {
            let payload = OneCallResponse {
                timezone_offset: 0,
                current: OneCallCurrent {
                    temp: 25.2,
                    feels_like: 26.0,
                    humidity: 45,
                    pressure: 1012,
                    clouds: 15.0,
                    wind_speed: 2.4,
                    sunrise: DAY_ONE,
                    sunset: DAY_ONE + 14 * 3600,
                    weather: vec![Condition {
                        description: "few clouds".to_string(),
                        icon: "02d".to_string(),
                    }],
                },
                daily: vec![OneCallDaily {
                    dt: DAY_ONE + 12 * 3600,
                    temp: OneCallDailyTemp {
                        min: 17.8,
                        max: 27.2,
                        day: 25.0,
                    },
                    humidity: 45.0,
                    clouds: 30.0,
                    weather: vec![Condition {
                        description: "few clouds".to_string(),
                        icon: "02d".to_string(),
                    }],
                }],
            };

            let one_call = format_one_call_weather(&payload);
            assert_eq!(one_call.current.temp, 25);
            assert_eq!(one_call.current.temp_min, 18);
            assert_eq!(one_call.current.temp_max, 27);
            assert_eq!(one_call.daily.len(), 1);
            assert_eq!(one_call.daily[0].sunshine_pct, 70);
        }
    }
}
