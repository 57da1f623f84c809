//! Weather API client for OpenWeatherMap integration
//!
//! This module provides HTTP client functionality for retrieving current
//! weather conditions from the OpenWeatherMap API. One GET per lookup; a
//! failed request is surfaced to the caller and never retried here, since
//! the next scheduled check is the retry.

use crate::config::WeatherWatchConfig;
use crate::models::{Condition, WeatherReading};
use crate::{Result, WeatherWatchError};
use anyhow::Context;
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Source of current weather readings.
///
/// The monitor and UI depend on this seam rather than on a concrete HTTP
/// client, so tests can script readings without touching the network.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch the current weather for a city.
    ///
    /// The city must be non-empty after trimming; callers guard blank
    /// input before reaching the provider.
    async fn current_weather(&self, city: &str) -> Result<WeatherReading>;
}

/// Weather API client for OpenWeatherMap
#[derive(Debug)]
pub struct OpenWeatherClient {
    /// HTTP client
    client: Client,
    /// Current-weather endpoint base URL
    base_url: String,
    /// API credential
    api_key: String,
    /// Unit system requested from the provider
    units: String,
}

impl OpenWeatherClient {
    /// Create a new weather API client from configuration.
    ///
    /// Fails if no API key is configured; OpenWeatherMap rejects
    /// unauthenticated requests.
    pub fn new(config: &WeatherWatchConfig) -> anyhow::Result<Self> {
        let api_key = config
            .weather
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                WeatherWatchError::config(
                    "Weather API key is required. Set weather.api_key in config.toml \
                     or the WEATHERWATCH_WEATHER__API_KEY environment variable.",
                )
            })?;

        let timeout = Duration::from_secs(config.weather.timeout_seconds.into());

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("WeatherWatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.weather.base_url.clone(),
            api_key,
            units: config.weather.units.clone(),
        })
    }

    fn request_url(&self, city: &str) -> String {
        format!(
            "{}/weather?q={}&units={}&appid={}",
            self.base_url,
            urlencoding::encode(city),
            self.units,
            self.api_key
        )
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn current_weather(&self, city: &str) -> Result<WeatherReading> {
        let city = city.trim();
        if city.is_empty() {
            return Err(WeatherWatchError::validation("City must not be empty"));
        }

        info!("Fetching current weather for '{}'", city);
        let start_time = Instant::now();

        let url = self.request_url(city);
        debug!(
            "OpenWeatherMap request URL: {}",
            url.split("appid=").next().unwrap_or(&url)
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| WeatherWatchError::fetch(format!("Network error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Weather request for '{}' failed with HTTP {}", city, status);
            return Err(status_error(status, city));
        }

        let payload: openweather::CurrentWeatherResponse = response
            .json()
            .await
            .map_err(|e| WeatherWatchError::fetch(format!("Invalid weather response: {e}")))?;

        let reading = reading_from_payload(city, payload)?;

        info!(
            "Fetched weather for '{}' in {:.3}s: {} {}",
            city,
            start_time.elapsed().as_secs_f64(),
            reading.format_temperature(),
            reading.description
        );

        Ok(reading)
    }
}

/// Map a non-success HTTP status to the fetch error taxonomy.
///
/// 404 means the provider does not know the city; everything else is a
/// transient failure.
fn status_error(status: StatusCode, city: &str) -> WeatherWatchError {
    if status == StatusCode::NOT_FOUND {
        WeatherWatchError::city_not_found(city)
    } else {
        WeatherWatchError::fetch(format!(
            "Weather API request failed with status: {} - {}",
            status,
            status.canonical_reason().unwrap_or("Unknown error")
        ))
    }
}

/// Convert a parsed provider response into a [`WeatherReading`].
fn reading_from_payload(
    city: &str,
    payload: openweather::CurrentWeatherResponse,
) -> Result<WeatherReading> {
    let label = payload
        .weather
        .first()
        .map(|entry| entry.main.clone())
        .ok_or_else(|| {
            WeatherWatchError::fetch("Weather response contained no condition entry")
        })?;

    Ok(WeatherReading {
        city: city.to_string(),
        observed_at: Utc::now(),
        temperature_c: payload.main.temp,
        humidity_pct: payload.main.humidity,
        wind_speed_ms: payload.wind.speed,
        condition: Condition::from_label(&label),
        description: label,
    })
}

/// `OpenWeatherMap` API response structures
mod openweather {
    use serde::Deserialize;

    /// Current weather response from `OpenWeatherMap`
    #[derive(Debug, Deserialize)]
    pub struct CurrentWeatherResponse {
        pub weather: Vec<ConditionEntry>,
        pub main: MainMeasurements,
        pub wind: Wind,
    }

    /// One condition entry; the first is the primary condition
    #[derive(Debug, Deserialize)]
    pub struct ConditionEntry {
        /// Group label such as "Rain" or "Clouds"
        pub main: String,
    }

    /// Temperature and humidity block
    #[derive(Debug, Deserialize)]
    pub struct MainMeasurements {
        pub temp: f64,
        pub humidity: u8,
    }

    /// Wind block
    #[derive(Debug, Deserialize)]
    pub struct Wind {
        pub speed: f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON_RESPONSE: &str = r#"{
        "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
        "main": {"temp": 15.04, "feels_like": 14.5, "pressure": 1012, "humidity": 72},
        "wind": {"speed": 4.63, "deg": 200},
        "name": "London",
        "cod": 200
    }"#;

    #[test]
    fn test_parse_current_weather_response() {
        let payload: openweather::CurrentWeatherResponse =
            serde_json::from_str(LONDON_RESPONSE).unwrap();
        let reading = reading_from_payload("London", payload).unwrap();

        assert_eq!(reading.city, "London");
        assert_eq!(reading.temperature_c, 15.04);
        assert_eq!(reading.humidity_pct, 72);
        assert_eq!(reading.wind_speed_ms, 4.63);
        assert_eq!(reading.condition, Condition::Rain);
        assert_eq!(reading.description, "Rain");
    }

    #[test]
    fn test_unrecognized_condition_label() {
        let raw = r#"{
            "weather": [{"id": 771, "main": "Squall"}],
            "main": {"temp": 9.0, "humidity": 80},
            "wind": {"speed": 19.0}
        }"#;
        let payload: openweather::CurrentWeatherResponse = serde_json::from_str(raw).unwrap();
        let reading = reading_from_payload("Testville", payload).unwrap();

        assert_eq!(reading.condition, Condition::Other);
        // Raw label survives for display even when the enum defaults.
        assert_eq!(reading.description, "Squall");
    }

    #[test]
    fn test_empty_condition_list_is_fetch_error() {
        let raw = r#"{
            "weather": [],
            "main": {"temp": 9.0, "humidity": 80},
            "wind": {"speed": 2.0}
        }"#;
        let payload: openweather::CurrentWeatherResponse = serde_json::from_str(raw).unwrap();
        let err = reading_from_payload("Testville", payload).unwrap_err();
        assert!(matches!(err, WeatherWatchError::Fetch { .. }));
    }

    #[test]
    fn test_status_error_mapping() {
        let err = status_error(StatusCode::NOT_FOUND, "Atlantis");
        assert!(matches!(err, WeatherWatchError::CityNotFound { .. }));

        let err = status_error(StatusCode::INTERNAL_SERVER_ERROR, "London");
        assert!(matches!(err, WeatherWatchError::Fetch { .. }));

        let err = status_error(StatusCode::UNAUTHORIZED, "London");
        assert!(matches!(err, WeatherWatchError::Fetch { .. }));
    }

    #[test]
    fn test_request_url_shape() {
        let mut config = WeatherWatchConfig::default();
        config.weather.api_key = Some("test-key".to_string());
        let client = OpenWeatherClient::new(&config).unwrap();

        let url = client.request_url("New York");
        assert!(url.starts_with("https://api.openweathermap.org/data/2.5/weather?q=New%20York"));
        assert!(url.contains("units=metric"));
        assert!(url.contains("appid=test-key"));
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = WeatherWatchConfig::default();
        let result = OpenWeatherClient::new(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API key"));
    }
}
