//! Application state and core logic

use crate::api::{ApiError, GraphQlClient, RegisterResponse, RegistrationApi};
use crate::config::AppConfig;
use crate::register::{Begin, Completion, TopField};
use crate::state::{AppState, DiscardDialog, Form, FormSlot, View, REGISTER_BUTTON};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use uuid::Uuid;

/// Mutation result delivered back to the UI loop
#[derive(Debug)]
pub struct SubmissionResult {
    pub attempt: Uuid,
    pub result: Result<RegisterResponse, ApiError>,
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Registration API, shared with in-flight requests
    api: Arc<dyn RegistrationApi>,
    results_tx: UnboundedSender<SubmissionResult>,
    results_rx: UnboundedReceiver<SubmissionResult>,
    /// Email of the attempt in flight, shown on the confirmation view
    in_flight_email: Option<String>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create a new App talking to the configured endpoint
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = GraphQlClient::new(config)?;
        tracing::info!(endpoint = client.endpoint(), "using registration API");
        Ok(Self::with_api(config, Arc::new(client)))
    }

    pub fn with_api(config: &AppConfig, api: Arc<dyn RegistrationApi>) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::new(config),
            api,
            results_tx,
            results_rx,
            in_flight_email: None,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }

    /// Apply finished requests and expire old toasts
    pub fn tick(&mut self) {
        while let Ok(result) = self.results_rx.try_recv() {
            self.apply_result(result);
        }
        self.state.notifications.expire(Instant::now());
    }

    fn apply_result(&mut self, SubmissionResult { attempt, result }: SubmissionResult) {
        let AppState {
            register,
            notifications,
            ..
        } = &mut self.state;
        let completion =
            register
                .submission
                .complete(attempt, result, &mut register.form, notifications);

        match completion {
            Completion::Registered => {
                self.state.registered_email = self.in_flight_email.take();
                self.state.pending_discard = None;
                self.state.current_view = View::Registered;
            }
            Completion::Rejected => self.state.register.focus_first_error(),
            Completion::Failed | Completion::Stale => {}
        }
    }

    /// Validate the form and send it in the background
    pub fn submit(&mut self) {
        let screen = &mut self.state.register;
        match screen.submission.begin(&mut screen.form) {
            Begin::Ready(ticket) => {
                self.in_flight_email = ticket.payload.email.clone();
                let api = Arc::clone(&self.api);
                let tx = self.results_tx.clone();
                tokio::spawn(async move {
                    let result = ticket.send(api.as_ref()).await;
                    let message = SubmissionResult {
                        attempt: ticket.attempt,
                        result,
                    };
                    if tx.send(message).is_err() {
                        tracing::debug!("app closed before registration finished");
                    }
                });
            }
            Begin::Invalid => screen.focus_first_error(),
            Begin::Busy | Begin::Closed => {}
        }
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        // Error dialog is modal
        if self.state.notifications.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.notifications.dismiss_error();
            }
            return;
        }

        if self.state.pending_discard.is_some() {
            self.handle_discard_dialog_key(key);
            return;
        }

        match self.state.current_view {
            View::Register => self.handle_register_key(key),
            View::Registered => self.handle_registered_key(key),
        }
    }

    fn handle_register_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('s') {
                self.submit();
            }
            return;
        }

        let screen = &mut self.state.register;
        let slot = screen.active_slot();
        match key.code {
            KeyCode::Esc => self.request_discard(),
            KeyCode::Tab | KeyCode::Down => screen.next_field(),
            KeyCode::BackTab | KeyCode::Up => screen.prev_field(),
            KeyCode::Left if slot == FormSlot::Top(TopField::UserType) => screen.cycle_role(false),
            KeyCode::Right if slot == FormSlot::Top(TopField::UserType) => screen.cycle_role(true),
            KeyCode::Left if slot == FormSlot::Actions => screen.prev_button(),
            KeyCode::Right if slot == FormSlot::Actions => screen.next_button(),
            KeyCode::Enter if slot == FormSlot::Actions => {
                if screen.selected_button == REGISTER_BUTTON {
                    self.submit();
                } else if !screen.form.is_pristine() || screen.submission.is_submitting() {
                    self.state.pending_discard = Some(DiscardDialog::default());
                }
            }
            KeyCode::Enter => screen.next_field(),
            KeyCode::Backspace => screen.backspace(),
            KeyCode::Char(c) => screen.input_char(c),
            _ => {}
        }
    }

    /// Ask before throwing away typed data; an empty form quits right away
    fn request_discard(&mut self) {
        if self.state.register.form.is_pristine() && !self.state.register.submission.is_submitting()
        {
            self.quit = true;
        } else {
            self.state.pending_discard = Some(DiscardDialog::default());
        }
    }

    fn handle_discard_dialog_key(&mut self, key: KeyEvent) {
        let Some(dialog) = self.state.pending_discard.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
                dialog.toggle();
            }
            KeyCode::Enter => {
                if dialog.selected_option {
                    self.in_flight_email = None;
                    self.state.start_new_registration();
                } else {
                    self.state.pending_discard = None;
                }
            }
            KeyCode::Esc => self.state.pending_discard = None,
            _ => {}
        }
    }

    fn handle_registered_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter | KeyCode::Char('n') => self.state.start_new_registration(),
            KeyCode::Esc | KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
    }
}
