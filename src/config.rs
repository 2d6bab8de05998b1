//! Configuration management for the `Sunseeker` application
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::SunseekerError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `Sunseeker` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SunseekerConfig {
    /// Weather API configuration
    pub weather: WeatherConfig,
    /// Places API configuration
    pub places: PlacesConfig,
    /// Search pipeline settings
    #[serde(default)]
    pub search: SearchConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Weather API key
    pub api_key: String,
    /// Base URL for the weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Measurement units (metric or imperial)
    #[serde(default = "default_units")]
    pub units: String,
    /// Response language code
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Places API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesConfig {
    /// Places API key
    pub api_key: String,
    /// Base URL for the places API
    #[serde(default = "default_places_base_url")]
    pub base_url: String,
    /// Response language code
    #[serde(default = "default_lang")]
    pub language: String,
}

/// Search pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Global timeout for the live search path, in seconds
    #[serde(default = "default_search_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of places attached to a city overview
    #[serde(default = "default_max_places")]
    pub max_places: u32,
    /// Optional CORS proxy prefix; the target URL is appended query-encoded
    #[serde(default)]
    pub cors_proxy: Option<String>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_places_base_url() -> String {
    "https://maps.googleapis.com/maps/api/place".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_search_timeout() -> u32 {
    10
}

fn default_max_places() -> u32 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_search_timeout(),
            max_places: default_max_places(),
            cors_proxy: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for SunseekerConfig {
    fn default() -> Self {
        Self {
            weather: WeatherConfig {
                api_key: String::new(),
                base_url: default_weather_base_url(),
                units: default_units(),
                lang: default_lang(),
                timeout_seconds: default_weather_timeout(),
            },
            places: PlacesConfig {
                api_key: String::new(),
                base_url: default_places_base_url(),
                language: default_lang(),
            },
            search: SearchConfig {
                timeout_seconds: default_search_timeout(),
                max_places: default_max_places(),
                cors_proxy: None,
            },
            logging: LoggingConfig {
                level: default_log_level(),
                format: default_log_format(),
            },
        }
    }
}

impl SunseekerConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from a specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with SUNSEEKER_ prefix. The level
        // separator is "__" so field names containing underscores survive:
        // SUNSEEKER_WEATHER__API_KEY maps to weather.api_key.
        builder = builder.add_source(
            Environment::with_prefix("SUNSEEKER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: SunseekerConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("sunseeker").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        if self.weather.api_key.is_empty() {
            return Err(SunseekerError::config(
                "Weather API key is required. Set SUNSEEKER_WEATHER__API_KEY or add it to the config file."
            ).into());
        }

        if self.weather.api_key.len() < 8 || self.weather.api_key.len() > 100 {
            return Err(SunseekerError::config(
                "Weather API key appears to be invalid. Please check your API key.",
            )
            .into());
        }

        if self.places.api_key.is_empty() {
            return Err(SunseekerError::config(
                "Places API key is required. Set SUNSEEKER_PLACES__API_KEY or add it to the config file."
            ).into());
        }

        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(SunseekerError::config(
                "Weather API timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.search.timeout_seconds == 0 || self.search.timeout_seconds > 120 {
            return Err(
                SunseekerError::config("Search timeout must be between 1 and 120 seconds").into(),
            );
        }

        if self.search.max_places > 20 {
            return Err(
                SunseekerError::config("Maximum places per overview cannot exceed 20").into(),
            );
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(SunseekerError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(SunseekerError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        let valid_units = ["metric", "imperial", "standard"];
        if !valid_units.contains(&self.weather.units.as_str()) {
            return Err(SunseekerError::config(format!(
                "Invalid units '{}'. Must be one of: {}",
                self.weather.units,
                valid_units.join(", ")
            ))
            .into());
        }

        for (label, url) in [
            ("Weather", &self.weather.base_url),
            ("Places", &self.places.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(SunseekerError::config(format!(
                    "{label} API base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}
