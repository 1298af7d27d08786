//! Application state definitions

use super::forms::RegisterScreen;
use super::notifications::Notifications;
use crate::config::AppConfig;

/// Current view in the application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Register,
    /// Confirmation shown after the server accepted a registration
    Registered,
}

/// Pending "discard changes?" confirmation
#[derive(Debug, Clone, Default)]
pub struct DiscardDialog {
    /// false = Keep editing, true = Discard
    pub selected_option: bool,
}

impl DiscardDialog {
    pub fn toggle(&mut self) {
        self.selected_option = !self.selected_option;
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    pub current_view: View,
    pub register: RegisterScreen,
    pub notifications: Notifications,
    pub pending_discard: Option<DiscardDialog>,
    /// Email of the last account registered in this session
    pub registered_email: Option<String>,
    pub api_endpoint: String,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            register: RegisterScreen::new(config.lock_fields_while_submitting()),
            notifications: Notifications::new(config.notification_ttl()),
            api_endpoint: config.api_endpoint(),
            ..Default::default()
        }
    }

    /// Start a fresh registration, keeping the session settings
    pub fn start_new_registration(&mut self) {
        self.register.reset();
        self.pending_discard = None;
        self.current_view = View::Register;
    }
}
