//! `WeatherWatch` - terminal weather lookup and temperature monitoring
//!
//! This library provides the core functionality for fetching current
//! weather conditions, classifying temperatures against user thresholds,
//! and driving desktop notifications through a capability port.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod monitor;
pub mod notify;
pub mod state;
pub mod ui;

// Re-export core types for public API
pub use api::{OpenWeatherClient, WeatherProvider};
pub use config::WeatherWatchConfig;
pub use error::WeatherWatchError;
pub use models::{Condition, WeatherReading};
pub use monitor::{Classification, MonitorSession, Thresholds, ThresholdMonitor, classify};
pub use notify::{DesktopNotifier, NotificationPort, Permission};
pub use state::{PermissionStatus, WeatherEvent, WeatherViewState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherWatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
