//! User-facing notifications raised by the submission flow

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// A toast or alert shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub header: String,
    pub description: Option<String>,
}

impl Notification {
    pub fn success(header: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            header: header.into(),
            description: None,
        }
    }

    pub fn error(header: impl Into<String>, description: Option<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            header: header.into(),
            description,
        }
    }

    /// Header and description as one block of text
    pub fn message(&self) -> String {
        match &self.description {
            Some(description) if !description.is_empty() => {
                format!("{}\n\n{}", self.header, description)
            }
            _ => self.header.clone(),
        }
    }
}

/// Sink for notifications, injected into the submission handler
#[cfg_attr(test, mockall::automock)]
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}
