//! Configuration management for the `WeatherWatch` application
//!
//! Handles loading configuration from files and environment variables,
//! and provides validation for all configuration settings.

use crate::WeatherWatchError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `WeatherWatch` application
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WeatherWatchConfig {
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Threshold monitoring configuration
    #[serde(default)]
    pub monitor: MonitorConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key
    pub api_key: Option<String>,
    /// Base URL for the current-weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Unit system requested from the provider
    #[serde(default = "default_weather_units")]
    pub units: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
}

/// Threshold monitoring settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Seconds between scheduled weather checks
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
    /// Lower temperature bound in Celsius
    pub min_celsius: Option<f64>,
    /// Upper temperature bound in Celsius
    pub max_celsius: Option<f64>,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log file path used while the TUI owns the terminal
    #[serde(default = "default_log_file")]
    pub file: String,
}

// Default value functions
fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_units() -> String {
    "metric".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_poll_interval() -> u64 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "weatherwatch.log".to_string()
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            units: default_weather_units(),
            timeout_seconds: default_weather_timeout(),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            min_celsius: None,
            max_celsius: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

impl WeatherWatchConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        // Load from file if path is provided or use default location
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

        // Add environment variable overrides with WEATHERWATCH_ prefix
        builder = builder.add_source(
            Environment::with_prefix("WEATHERWATCH")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: WeatherWatchConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        // Validate configuration
        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("weatherwatch").join("config.toml"))
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        if let Some(api_key) = &self.weather.api_key {
            if api_key.is_empty() {
                return Err(WeatherWatchError::config(
                    "Weather API key cannot be empty if provided. Either remove it or provide a valid key."
                ).into());
            }
        }

        if self.weather.timeout_seconds == 0 || self.weather.timeout_seconds > 300 {
            return Err(WeatherWatchError::config(
                "Weather API timeout must be between 1 and 300 seconds",
            )
            .into());
        }

        if self.monitor.poll_interval_secs == 0 {
            return Err(
                WeatherWatchError::config("Poll interval must be at least 1 second").into(),
            );
        }

        if let (Some(min), Some(max)) = (self.monitor.min_celsius, self.monitor.max_celsius) {
            if min > max {
                return Err(WeatherWatchError::config(format!(
                    "Minimum threshold ({min}) cannot exceed maximum threshold ({max})"
                ))
                .into());
            }
        }

        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(WeatherWatchError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        if !self.weather.base_url.starts_with("http://")
            && !self.weather.base_url.starts_with("https://")
        {
            return Err(WeatherWatchError::config(
                "Weather API base URL must be a valid HTTP or HTTPS URL",
            )
            .into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WeatherWatchConfig::default();
        assert_eq!(
            config.weather.base_url,
            "https://api.openweathermap.org/data/2.5"
        );
        assert_eq!(config.weather.units, "metric");
        assert_eq!(config.weather.timeout_seconds, 30);
        assert_eq!(config.monitor.poll_interval_secs, 60);
        assert!(config.monitor.min_celsius.is_none());
        assert!(config.monitor.max_celsius.is_none());
        assert_eq!(config.logging.level, "info");
        assert!(config.weather.api_key.is_none());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = WeatherWatchConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_empty_api_key() {
        let mut config = WeatherWatchConfig::default();
        config.weather.api_key = Some(String::new());
        let result = config.validate();
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("cannot be empty"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = WeatherWatchConfig::default();
        config.logging.level = "loud".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_timeout_range() {
        let mut config = WeatherWatchConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout"));
    }

    #[test]
    fn test_config_validation_inverted_thresholds() {
        let mut config = WeatherWatchConfig::default();
        config.monitor.min_celsius = Some(25.0);
        config.monitor.max_celsius = Some(10.0);
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot exceed"));
    }

    #[test]
    fn test_single_threshold_is_valid() {
        let mut config = WeatherWatchConfig::default();
        config.monitor.min_celsius = Some(5.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_path_generation() {
        let path = WeatherWatchConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("weatherwatch"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }
}
