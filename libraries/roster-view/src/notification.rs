//! Transient toast notifications.

use std::time::Duration;
use tokio::time::Instant;

/// How long a notification stays visible.
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_millis(3000);

/// Message shown after a committed edit.
pub const UPDATE_SUCCESS_MESSAGE: &str = "User updated Successfully";

/// Visual intent of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Success,
    Danger,
}

/// A message that disappears once its timeout elapses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub intent: Intent,
    expires_at: Instant,
}

impl Notification {
    pub fn new(message: impl Into<String>, intent: Intent) -> Self {
        Self {
            message: message.into(),
            intent,
            expires_at: Instant::now() + NOTIFICATION_TIMEOUT,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Intent::Success)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(message, Intent::Danger)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
