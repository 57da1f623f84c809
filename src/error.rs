//! Error types and handling for the `WeatherWatch` application

use thiserror::Error;

/// Main error type for the `WeatherWatch` application
#[derive(Error, Debug)]
pub enum WeatherWatchError {
    /// The weather provider does not know the requested city
    #[error("City not found: {city}")]
    CityNotFound { city: String },

    /// Transient network, HTTP, or parse failure while fetching weather
    #[error("Fetch error: {message}")]
    Fetch { message: String },

    /// The platform has no notification capability
    #[error("Desktop notifications are not supported on this platform")]
    NotificationUnsupported,

    /// The user (or platform) declined notification delivery
    #[error("Notification permission denied")]
    PermissionDenied,

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl WeatherWatchError {
    /// Create a new city-not-found error
    pub fn city_not_found<S: Into<String>>(city: S) -> Self {
        Self::CityNotFound { city: city.into() }
    }

    /// Create a new transient fetch error
    pub fn fetch<S: Into<String>>(message: S) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// True for failures where the next scheduled check is the retry
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(self, WeatherWatchError::Fetch { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherWatchError::CityNotFound { .. } => {
                "City not found.\nPlease enter a valid city name.".to_string()
            }
            WeatherWatchError::Fetch { .. } => {
                "Error fetching weather data.\nPlease try again later.".to_string()
            }
            WeatherWatchError::NotificationUnsupported => {
                "This system does not support notifications.".to_string()
            }
            WeatherWatchError::PermissionDenied => {
                "Please allow notifications to get updates.".to_string()
            }
            WeatherWatchError::Config { .. } => {
                "Configuration error. Please check your config file and API key.".to_string()
            }
            WeatherWatchError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            WeatherWatchError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
