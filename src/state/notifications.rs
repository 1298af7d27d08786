//! Toasts and the error dialog queue

use crate::register::{Notification, NotificationKind, Notifier};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Notification sink backing the status bar toast and the error dialog
#[derive(Debug)]
pub struct Notifications {
    /// Success toast and the moment it was raised
    toast: Option<(Notification, Instant)>,
    /// Errors waiting to be acknowledged, oldest first
    errors: VecDeque<String>,
    ttl: Duration,
}

impl Notifications {
    pub fn new(ttl: Duration) -> Self {
        Self {
            toast: None,
            errors: VecDeque::new(),
            ttl,
        }
    }

    /// Push an error message to the queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.errors.push_back(message.into());
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The error currently shown in the dialog
    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    /// Errors waiting behind the one currently shown
    pub fn queued_errors(&self) -> usize {
        self.errors.len().saturating_sub(1)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }

    pub fn toast(&self) -> Option<&Notification> {
        self.toast.as_ref().map(|(n, _)| n)
    }

    /// Drop the toast once it has been visible for the configured ttl
    pub fn expire(&mut self, now: Instant) {
        if let Some((_, raised)) = &self.toast {
            if now.saturating_duration_since(*raised) >= self.ttl {
                self.toast = None;
            }
        }
    }
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(Duration::from_secs(5))
    }
}

impl Notifier for Notifications {
    fn notify(&mut self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => self.toast = Some((notification, Instant::now())),
            NotificationKind::Error => self.push_error(notification.message()),
        }
    }
}
