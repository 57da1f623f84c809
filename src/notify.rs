//! Desktop notification capability port
//!
//! Notification delivery is modeled as an explicit capability passed into
//! the monitor, never read from ambient global state. The monitor only
//! sees the [`NotificationPort`] trait; tests substitute an in-memory
//! recording port.

use tracing::{debug, warn};

/// Outcome of a notification permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Platform notification capability.
///
/// Permission is resolved once at startup; the Granted/Denied outcome
/// gates every later [`notify`](NotificationPort::notify) call for the
/// session. Delivery failures are logged and swallowed; the side-effect
/// channel must never affect classification or UI state.
pub trait NotificationPort: Send + Sync {
    /// Whether this platform can deliver notifications at all.
    fn supported(&self) -> bool;

    /// Request permission to deliver notifications.
    fn request_permission(&self) -> Permission;

    /// Deliver one notification.
    fn notify(&self, summary: &str, body: &str);
}

/// Notification port backed by the desktop notification service.
#[derive(Debug, Default)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }
}

impl NotificationPort for DesktopNotifier {
    fn supported(&self) -> bool {
        cfg!(any(
            target_os = "linux",
            target_os = "freebsd",
            target_os = "macos",
            target_os = "windows"
        ))
    }

    fn request_permission(&self) -> Permission {
        // Desktops have no browser-style prompt; a handshake delivery
        // tells us whether a notification service is actually reachable.
        match notify_rust::Notification::new()
            .summary("Weather Update")
            .body("Notifications are enabled!")
            .show()
        {
            Ok(_) => {
                debug!("Notification handshake delivered");
                Permission::Granted
            }
            Err(e) => {
                warn!("Notification service unreachable: {}", e);
                Permission::Denied
            }
        }
    }

    fn notify(&self, summary: &str, body: &str) {
        if let Err(e) = notify_rust::Notification::new()
            .summary(summary)
            .body(body)
            .show()
        {
            warn!("Failed to deliver notification: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// In-memory port used across the crate's tests.
    #[derive(Default)]
    pub struct RecordingPort {
        pub sent: Mutex<Vec<(String, String)>>,
    }

    impl NotificationPort for RecordingPort {
        fn supported(&self) -> bool {
            true
        }

        fn request_permission(&self) -> Permission {
            Permission::Granted
        }

        fn notify(&self, summary: &str, body: &str) {
            self.sent
                .lock()
                .unwrap()
                .push((summary.to_string(), body.to_string()));
        }
    }

    #[test]
    fn test_recording_port_captures_messages() {
        let port = RecordingPort::default();
        port.notify("Weather Update", "The current temperature in London is 15°C.");

        let sent = port.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "Weather Update");
        assert!(sent[0].1.contains("15°C"));
    }
}
