//! Weather data model and display methods

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Categorical weather condition reported by the provider.
///
/// Labels are matched exactly; anything the provider reports outside this
/// set parses to [`Condition::Other`]. Display assets for `Other` resolve
/// to the `Clear` defaults (see `ui::theme::condition_assets`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Snow,
    Mist,
    Haze,
    Other,
}

impl Condition {
    /// Parse a provider condition label by exact string match.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Clear" => Condition::Clear,
            "Clouds" => Condition::Clouds,
            "Rain" => Condition::Rain,
            "Drizzle" => Condition::Drizzle,
            "Snow" => Condition::Snow,
            "Mist" => Condition::Mist,
            "Haze" => Condition::Haze,
            _ => Condition::Other,
        }
    }

    /// Canonical label for this condition.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Clear => "Clear",
            Condition::Clouds => "Clouds",
            Condition::Rain => "Rain",
            Condition::Drizzle => "Drizzle",
            Condition::Snow => "Snow",
            Condition::Mist => "Mist",
            Condition::Haze => "Haze",
            Condition::Other => "Other",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One observation of current weather, produced fresh per fetch.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WeatherReading {
    /// City the observation belongs to
    pub city: String,
    /// Timestamp for this weather observation
    pub observed_at: DateTime<Utc>,
    /// Temperature in Celsius
    pub temperature_c: f64,
    /// Relative humidity percentage (0-100)
    pub humidity_pct: u8,
    /// Wind speed in m/s
    pub wind_speed_ms: f64,
    /// Categorical condition, parsed from the provider label
    pub condition: Condition,
    /// Raw condition label as the provider reported it
    pub description: String,
}

impl WeatherReading {
    /// Format temperature with unit
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format!("{:.1}°C", self.temperature_c)
    }

    /// Format humidity with unit
    #[must_use]
    pub fn format_humidity(&self) -> String {
        format!("{}%", self.humidity_pct)
    }

    /// Format wind speed with unit
    #[must_use]
    pub fn format_wind(&self) -> String {
        format!("{:.1} m/s", self.wind_speed_ms)
    }
}
