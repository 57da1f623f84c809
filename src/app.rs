//! Application state for the TUI shell.

use tokio::sync::mpsc::UnboundedReceiver;

use crate::monitor::{Thresholds, ThresholdMonitor};
use crate::state::{reduce, WeatherEvent, WeatherViewState};
use crate::ui::Theme;

/// Which input field receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    City,
    MinThreshold,
    MaxThreshold,
}

impl Focus {
    /// Cycle to the next input field.
    pub fn next(self) -> Self {
        match self {
            Focus::City => Focus::MinThreshold,
            Focus::MinThreshold => Focus::MaxThreshold,
            Focus::MaxThreshold => Focus::City,
        }
    }

    /// Cycle to the previous input field.
    pub fn prev(self) -> Self {
        match self {
            Focus::City => Focus::MaxThreshold,
            Focus::MinThreshold => Focus::City,
            Focus::MaxThreshold => Focus::MinThreshold,
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub focus: Focus,
    pub city_input: String,
    pub min_input: String,
    pub max_input: String,
    /// Temporary feedback for input problems
    pub status_message: Option<String>,
    pub view: WeatherViewState,
    pub theme: Theme,

    monitor: ThresholdMonitor,
    events_rx: UnboundedReceiver<WeatherEvent>,
}

impl App {
    /// Create a new App around an idle monitor.
    pub fn new(
        monitor: ThresholdMonitor,
        events_rx: UnboundedReceiver<WeatherEvent>,
        view: WeatherViewState,
    ) -> Self {
        let thresholds = view.thresholds;
        Self {
            running: true,
            focus: Focus::City,
            city_input: String::new(),
            min_input: format_bound(thresholds.min_celsius),
            max_input: format_bound(thresholds.max_celsius),
            status_message: None,
            view,
            theme: Theme::default(),
            monitor,
            events_rx,
        }
    }

    /// Move focus to the next input field.
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Move focus to the previous input field.
    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Append a character to the focused input field.
    pub fn input_push(&mut self, c: char) {
        self.focused_input_mut().push(c);
    }

    /// Remove the last character from the focused input field.
    pub fn input_pop(&mut self) {
        self.focused_input_mut().pop();
    }

    fn focused_input_mut(&mut self) -> &mut String {
        match self.focus {
            Focus::City => &mut self.city_input,
            Focus::MinThreshold => &mut self.min_input,
            Focus::MaxThreshold => &mut self.max_input,
        }
    }

    /// Submit the current inputs: update thresholds and arm a session.
    ///
    /// A blank city is a no-op; an unparseable threshold blocks the
    /// search with a status message instead of arming with bad bounds.
    pub fn search(&mut self) {
        self.status_message = None;

        if self.city_input.trim().is_empty() {
            return;
        }

        let min_celsius = match parse_bound(&self.min_input) {
            Ok(bound) => bound,
            Err(message) => {
                self.status_message = Some(format!("Min threshold: {message}"));
                return;
            }
        };
        let max_celsius = match parse_bound(&self.max_input) {
            Ok(bound) => bound,
            Err(message) => {
                self.status_message = Some(format!("Max threshold: {message}"));
                return;
            }
        };

        self.monitor
            .set_thresholds(Thresholds { min_celsius, max_celsius });
        self.monitor.start(&self.city_input);
    }

    /// Apply all pending monitor events to the view state.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.view = reduce(&self.view, event);
        }
    }

    /// Whether a monitoring session is armed.
    #[must_use]
    pub fn is_monitoring(&self) -> bool {
        self.monitor.is_armed()
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

fn format_bound(bound: Option<f64>) -> String {
    bound.map(|v| v.to_string()).unwrap_or_default()
}

/// Parse one threshold input: blank means unset.
fn parse_bound(input: &str) -> Result<Option<f64>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    input
        .parse::<f64>()
        .map(Some)
        .map_err(|_| format!("'{input}' is not a number"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_cycles_through_all_fields() {
        let mut focus = Focus::City;
        focus = focus.next();
        assert_eq!(focus, Focus::MinThreshold);
        focus = focus.next();
        assert_eq!(focus, Focus::MaxThreshold);
        focus = focus.next();
        assert_eq!(focus, Focus::City);

        assert_eq!(Focus::City.prev(), Focus::MaxThreshold);
    }

    #[test]
    fn test_parse_bound() {
        assert_eq!(parse_bound(""), Ok(None));
        assert_eq!(parse_bound("   "), Ok(None));
        assert_eq!(parse_bound("10"), Ok(Some(10.0)));
        assert_eq!(parse_bound(" -3.5 "), Ok(Some(-3.5)));
        assert!(parse_bound("warm").is_err());
    }

    #[test]
    fn test_format_bound_round_trips() {
        assert_eq!(format_bound(None), "");
        assert_eq!(format_bound(Some(10.0)), "10");
        assert_eq!(format_bound(Some(-3.5)), "-3.5");
    }
}
