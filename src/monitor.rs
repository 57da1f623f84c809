//! Temperature threshold monitoring
//!
//! Owns the repeating check schedule. A [`ThresholdMonitor`] is either
//! idle or armed with exactly one [`MonitorSession`]; arming a new session
//! cancels the previous one first, and dropping the monitor (UI teardown)
//! cancels whatever is armed. Each cycle fetches current weather,
//! classifies the temperature against the configured bounds, and emits
//! notifications plus a state event.

use std::sync::{Arc, RwLock};

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{info, warn};

use crate::api::WeatherProvider;
use crate::notify::NotificationPort;
use crate::state::WeatherEvent;

/// User-configured temperature bounds in Celsius.
///
/// Monitoring classifies only when both bounds are present.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Thresholds {
    pub min_celsius: Option<f64>,
    pub max_celsius: Option<f64>,
}

impl Thresholds {
    /// True when both bounds are set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.min_celsius.is_some() && self.max_celsius.is_some()
    }
}

/// Where a temperature sits relative to the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    BelowMin,
    AboveMax,
    WithinRange,
    NotConfigured,
}

/// Classify a temperature against the threshold bounds.
///
/// Total over all inputs. Equality to a bound counts as within range.
#[must_use]
pub fn classify(temperature_c: f64, thresholds: &Thresholds) -> Classification {
    let (Some(min), Some(max)) = (thresholds.min_celsius, thresholds.max_celsius) else {
        return Classification::NotConfigured;
    };

    if temperature_c < min {
        Classification::BelowMin
    } else if temperature_c > max {
        Classification::AboveMax
    } else {
        Classification::WithinRange
    }
}

/// One armed monitoring session: a city bound to a repeating check task.
///
/// The schedule handle is released on drop, so a session can never leak
/// its timer past replacement or teardown.
pub struct MonitorSession {
    city: String,
    handle: JoinHandle<()>,
}

impl MonitorSession {
    /// City this session is checking.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }
}

impl Drop for MonitorSession {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Repeating fetch-and-classify scheduler.
pub struct ThresholdMonitor {
    provider: Arc<dyn WeatherProvider>,
    notifier: Arc<dyn NotificationPort>,
    /// Permission outcome resolved once at startup; gates the
    /// notification channel only, never classification or events.
    notifications_enabled: bool,
    thresholds: Arc<RwLock<Thresholds>>,
    events: UnboundedSender<WeatherEvent>,
    period: Duration,
    session: Option<MonitorSession>,
}

impl ThresholdMonitor {
    /// Create an idle monitor.
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        notifier: Arc<dyn NotificationPort>,
        notifications_enabled: bool,
        thresholds: Thresholds,
        period: Duration,
        events: UnboundedSender<WeatherEvent>,
    ) -> Self {
        Self {
            provider,
            notifier,
            notifications_enabled,
            thresholds: Arc::new(RwLock::new(thresholds)),
            events,
            period,
            session: None,
        }
    }

    /// Currently configured bounds.
    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        *self.thresholds.read().expect("thresholds lock poisoned")
    }

    /// Replace the threshold bounds; takes effect on the next check.
    pub fn set_thresholds(&self, thresholds: Thresholds) {
        *self.thresholds.write().expect("thresholds lock poisoned") = thresholds;
        let _ = self.events.send(WeatherEvent::ThresholdsChanged(thresholds));
    }

    /// Whether a session is currently armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.session.is_some()
    }

    /// City of the armed session, if any.
    #[must_use]
    pub fn active_city(&self) -> Option<&str> {
        self.session.as_ref().map(MonitorSession::city)
    }

    /// Arm a monitoring session for a city.
    ///
    /// Blank input is a no-op. An already-armed session is cancelled
    /// before the replacement is armed, so at most one schedule is ever
    /// live. The new session performs one immediate check, then repeats
    /// at the fixed period. Must be called within a tokio runtime.
    pub fn start(&mut self, city: &str) {
        let city = city.trim().to_string();
        if city.is_empty() {
            return;
        }

        // Cancel-before-replace keeps the single-schedule invariant.
        self.session = None;

        let _ = self.events.send(WeatherEvent::SearchStarted { city: city.clone() });

        let provider = Arc::clone(&self.provider);
        let notifier = Arc::clone(&self.notifier);
        let notifications_enabled = self.notifications_enabled;
        let thresholds = Arc::clone(&self.thresholds);
        let events = self.events.clone();
        let period = self.period;
        let task_city = city.clone();

        let handle = tokio::spawn(async move {
            // One immediate cycle on search, then the fixed schedule.
            check_city(
                &*provider,
                &*notifier,
                notifications_enabled,
                &thresholds,
                &events,
                &task_city,
            )
            .await;

            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await; // first tick completes immediately

            loop {
                ticker.tick().await;
                check_city(
                    &*provider,
                    &*notifier,
                    notifications_enabled,
                    &thresholds,
                    &events,
                    &task_city,
                )
                .await;
            }
        });

        self.session = Some(MonitorSession { city, handle });
    }

    /// Cancel the armed session, if any.
    pub fn stop(&mut self) {
        self.session = None;
    }
}

/// One fetch-and-classify cycle.
///
/// A failed fetch is logged and reported; the session stays armed and the
/// next tick retries naturally.
async fn check_city(
    provider: &dyn WeatherProvider,
    notifier: &dyn NotificationPort,
    notifications_enabled: bool,
    thresholds: &RwLock<Thresholds>,
    events: &UnboundedSender<WeatherEvent>,
    city: &str,
) {
    match provider.current_weather(city).await {
        Ok(reading) => {
            let thresholds = *thresholds.read().expect("thresholds lock poisoned");
            let classification = classify(reading.temperature_c, &thresholds);

            info!(
                "Checked temperature for '{}': {:.1}°C (min: {:?}, max: {:?}, {:?})",
                city,
                reading.temperature_c,
                thresholds.min_celsius,
                thresholds.max_celsius,
                classification
            );

            if notifications_enabled {
                notifier.notify(
                    "Weather Update",
                    &format!(
                        "The current temperature in {} is {}.",
                        city,
                        reading.format_temperature()
                    ),
                );

                match classification {
                    Classification::BelowMin => {
                        if let Some(min) = thresholds.min_celsius {
                            notifier.notify(
                                "Weather Update",
                                &format!(
                                    "Alert! The current temperature in {city} is below your minimum threshold of {min}°C."
                                ),
                            );
                        }
                    }
                    Classification::AboveMax => {
                        if let Some(max) = thresholds.max_celsius {
                            notifier.notify(
                                "Weather Update",
                                &format!(
                                    "Alert! The current temperature in {city} has exceeded your maximum threshold of {max}°C."
                                ),
                            );
                        }
                    }
                    Classification::WithinRange | Classification::NotConfigured => {}
                }
            }

            let _ = events.send(WeatherEvent::ReadingReceived {
                reading,
                classification,
            });
        }
        Err(err) => {
            warn!("Weather check for '{}' failed: {}", city, err);
            let _ = events.send(WeatherEvent::FetchFailed {
                message: err.user_message(),
            });
        }
    }
}
