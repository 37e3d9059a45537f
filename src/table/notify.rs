use std::time::{Duration, Instant};

use tracing::{debug, info};

/// Default time a notification stays on screen.
pub const DEFAULT_NOTIFICATION_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Success or error styling of a notification.
pub enum NotificationKind {
    Success,
    Error,
}

impl NotificationKind {
    /// Lower-case name used in log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A notification on screen and the instant it goes away.
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub expires_at: Instant,
}

/// Holds the single visible notification, if any, and its removal deadline.
#[derive(Debug, Clone)]
pub struct NotificationSlot {
    ttl: Duration,
    current: Option<Notification>,
}

impl NotificationSlot {
    /// Empty slot whose notifications last `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    /// Replace whatever is showing with a new notification that expires
    /// `ttl` after `now`.
    pub fn show(
        &mut self,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        now: Instant,
    ) {
        if let Some(previous) = self.current.take() {
            debug!(title = %previous.title, "notification superseded");
        }
        let notification = Notification {
            kind,
            title: title.into(),
            message: message.into(),
            expires_at: now + self.ttl,
        };
        info!(
            kind = notification.kind.as_str(),
            title = %notification.title,
            "notification shown"
        );
        self.current = Some(notification);
    }

    /// Drop the notification once its deadline has passed. Returns `true`
    /// when something was removed.
    pub fn expire(&mut self, now: Instant) -> bool {
        match &self.current {
            Some(notification) if now >= notification.expires_at => {
                debug!(title = %notification.title, "notification expired");
                self.current = None;
                true
            }
            _ => false,
        }
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}

impl Default for NotificationSlot {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_TTL)
    }
}
