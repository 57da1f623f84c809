//! Immutable view state and the event reducer
//!
//! Everything the widget displays lives in one [`WeatherViewState`] value
//! produced by a pure reducer, so the displayed facets always come from a
//! single fetch result instead of scattered mutable fields.

use crate::models::WeatherReading;
use crate::monitor::{Classification, Thresholds};
use crate::notify::Permission;

/// Resolved notification capability for this session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    /// The platform has no notification service
    Unsupported,
    Granted,
    Denied,
}

impl From<Permission> for PermissionStatus {
    fn from(permission: Permission) -> Self {
        match permission {
            Permission::Granted => PermissionStatus::Granted,
            Permission::Denied => PermissionStatus::Denied,
        }
    }
}

impl PermissionStatus {
    /// Status-region message mirroring the permission banner.
    #[must_use]
    pub fn message(&self) -> &'static str {
        match self {
            PermissionStatus::Granted => "Notifications are enabled!",
            PermissionStatus::Denied => "Please allow notifications to get updates.",
            PermissionStatus::Unsupported => "This system does not support notifications.",
        }
    }
}

/// One thing that happened to the widget.
#[derive(Debug, Clone)]
pub enum WeatherEvent {
    /// A search was submitted and a monitor session armed
    SearchStarted { city: String },
    /// A scheduled or immediate check completed successfully
    ReadingReceived {
        reading: WeatherReading,
        classification: Classification,
    },
    /// A check failed; `message` is already user-facing
    FetchFailed { message: String },
    /// The user changed the threshold bounds
    ThresholdsChanged(Thresholds),
    /// The startup permission handshake finished
    PermissionResolved(PermissionStatus),
}

/// Everything the widget displays, derived from the latest events.
#[derive(Debug, Clone)]
pub struct WeatherViewState {
    /// City of the most recent search
    pub city: String,
    /// A fetch is in flight for the current search
    pub loading: bool,
    /// Most recently completed successful reading
    pub reading: Option<WeatherReading>,
    /// Classification of the most recent reading
    pub classification: Classification,
    /// Currently configured threshold bounds
    pub thresholds: Thresholds,
    /// User-facing message for the most recent failure
    pub error: Option<String>,
    /// Notification channel status for this session
    pub permission: PermissionStatus,
}

impl WeatherViewState {
    /// Initial state before any search.
    #[must_use]
    pub fn new(permission: PermissionStatus, thresholds: Thresholds) -> Self {
        Self {
            city: String::new(),
            loading: false,
            reading: None,
            classification: Classification::NotConfigured,
            thresholds,
            error: None,
            permission,
        }
    }

    /// Threshold-violation message for the display region, if any.
    #[must_use]
    pub fn threshold_message(&self) -> Option<String> {
        match self.classification {
            Classification::BelowMin => self.thresholds.min_celsius.map(|min| {
                format!("The current temperature is below the minimum threshold of {min}°C!")
            }),
            Classification::AboveMax => self.thresholds.max_celsius.map(|max| {
                format!("The current temperature has exceeded the maximum threshold of {max}°C!")
            }),
            Classification::WithinRange => {
                Some("Temperature is within the acceptable range.".to_string())
            }
            Classification::NotConfigured => None,
        }
    }
}

/// Pure reducer from `(previous state, event)` to the next state.
///
/// A failed fetch keeps the last displayed reading; only a completed
/// fetch replaces it (last to complete wins).
#[must_use]
pub fn reduce(state: &WeatherViewState, event: WeatherEvent) -> WeatherViewState {
    let mut next = state.clone();
    match event {
        WeatherEvent::SearchStarted { city } => {
            next.city = city;
            next.loading = true;
            next.error = None;
        }
        WeatherEvent::ReadingReceived {
            reading,
            classification,
        } => {
            next.loading = false;
            next.error = None;
            next.reading = Some(reading);
            next.classification = classification;
        }
        WeatherEvent::FetchFailed { message } => {
            next.loading = false;
            next.error = Some(message);
        }
        WeatherEvent::ThresholdsChanged(thresholds) => {
            next.thresholds = thresholds;
        }
        WeatherEvent::PermissionResolved(permission) => {
            next.permission = permission;
        }
    }
    next
}
