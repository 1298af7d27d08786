//! Submission flow for the registration form
//!
//! One attempt moves through
//! `Idle → Validating → {Invalid → Idle | Submitting → {Success | Failed → Idle}}`.
//! Validation failures never reach the network. At most one attempt is in
//! flight; its result is matched by attempt id so a result arriving after
//! the form was discarded is dropped.

use super::errors::ErrorTree;
use super::form::RegistrationForm;
use super::notify::{Notification, Notifier};
use super::RegistrationFields;
use crate::api::{ApiError, RegisterResponse, RegistrationApi};
use uuid::Uuid;

const SUCCESS_HEADER: &str = "Registration successful";
const FAILURE_HEADER: &str = "Failed to register";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmitState {
    #[default]
    Idle,
    Validating,
    Submitting,
    /// Terminal; the form has been reset
    Success,
}

/// Everything needed to run the mutation for one attempt
#[derive(Debug, Clone)]
pub struct SubmissionTicket {
    pub attempt: Uuid,
    pub payload: RegistrationFields,
}

impl SubmissionTicket {
    /// Run the mutation for this attempt
    pub async fn send<A>(&self, api: &A) -> Result<RegisterResponse, ApiError>
    where
        A: RegistrationApi + ?Sized,
    {
        api.register(&self.payload).await
    }
}

/// Result of starting an attempt
#[derive(Debug, Clone)]
pub enum Begin {
    /// Another attempt is still in flight
    Busy,
    /// The form already registered successfully
    Closed,
    /// Client-side validation failed; errors are on the form
    Invalid,
    Ready(SubmissionTicket),
}

/// Result of applying a mutation response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Registered,
    /// Server reported validation errors
    Rejected,
    /// Transport or GraphQL-level failure
    Failed,
    /// Result of an abandoned attempt, ignored
    Stale,
}

/// Outcome of [`SubmissionHandler::submit`]
#[cfg(test)]
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    NotSent(Begin),
    Sent(Completion),
}

/// Per-form submission state machine
#[derive(Debug, Default)]
pub struct SubmissionHandler {
    state: SubmitState,
    in_flight: Option<Uuid>,
}

impl SubmissionHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SubmitState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == SubmitState::Submitting
    }

    /// Validate the form and, when valid, open a new attempt
    pub fn begin(&mut self, form: &mut RegistrationForm) -> Begin {
        match self.state {
            SubmitState::Submitting => {
                tracing::debug!("registration already in flight, ignoring submit");
                return Begin::Busy;
            }
            SubmitState::Success => return Begin::Closed,
            SubmitState::Idle | SubmitState::Validating => {}
        }

        self.state = SubmitState::Validating;
        let errors = form.schema().validate(form.value());
        if !errors.is_empty() {
            tracing::info!(
                fields = ?errors.field_names().collect::<Vec<_>>(),
                "registration form invalid"
            );
            form.set_errors(errors);
            self.state = SubmitState::Idle;
            return Begin::Invalid;
        }

        form.set_errors(ErrorTree::default());
        let attempt = Uuid::new_v4();
        self.in_flight = Some(attempt);
        self.state = SubmitState::Submitting;
        tracing::info!(%attempt, user_type = ?form.value().user_type, "submitting registration");
        Begin::Ready(SubmissionTicket {
            attempt,
            payload: form.payload(),
        })
    }

    /// Apply the mutation result of `attempt` to the form
    pub fn complete(
        &mut self,
        attempt: Uuid,
        result: Result<RegisterResponse, ApiError>,
        form: &mut RegistrationForm,
        notifier: &mut dyn Notifier,
    ) -> Completion {
        if self.in_flight != Some(attempt) {
            tracing::debug!(%attempt, "discarding result of abandoned registration");
            return Completion::Stale;
        }
        self.in_flight = None;

        match result {
            Ok(response) if response.ok => {
                tracing::info!(%attempt, "registration accepted");
                notifier.notify(Notification::success(SUCCESS_HEADER));
                form.reset();
                self.state = SubmitState::Success;
                Completion::Registered
            }
            Ok(response) => {
                let errors = ErrorTree::from_server(response.errors.as_deref().unwrap_or(&[]));
                tracing::info!(
                    %attempt,
                    errors = %errors.summary(),
                    "registration rejected by server"
                );
                let description = errors.internal().map(str::to_string);
                form.set_errors(errors);
                notifier.notify(Notification::error(FAILURE_HEADER, description));
                self.state = SubmitState::Idle;
                Completion::Rejected
            }
            Err(err) => {
                tracing::warn!(%attempt, error = %err, "registration request failed");
                notifier.notify(Notification::error(FAILURE_HEADER, Some(err.to_string())));
                self.state = SubmitState::Idle;
                Completion::Failed
            }
        }
    }

    /// Forget the in-flight attempt; its result will be ignored
    pub fn abandon(&mut self) {
        if let Some(attempt) = self.in_flight.take() {
            tracing::debug!(%attempt, "abandoning registration attempt");
        }
        self.state = SubmitState::Idle;
    }

    /// Validate, send and apply the result in one go
    #[cfg(test)]
    pub async fn submit<A>(
        &mut self,
        form: &mut RegistrationForm,
        api: &A,
        notifier: &mut dyn Notifier,
    ) -> SubmitOutcome
    where
        A: RegistrationApi + ?Sized,
    {
        let ticket = match self.begin(form) {
            Begin::Ready(ticket) => ticket,
            other => return SubmitOutcome::NotSent(other),
        };
        let result = ticket.send(api).await;
        SubmitOutcome::Sent(self.complete(ticket.attempt, result, form, notifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockRegistrationApi;
    use crate::register::notify::{MockNotifier, NotificationKind};
    use crate::register::{
        FieldInput, NestedGroup, ObjectError, OrganizationField, TopField, UserType,
    };
    use pretty_assertions::assert_eq;

    fn base_form(user_type: UserType) -> RegistrationForm {
        let mut form = RegistrationForm::new();
        form.set_text(TopField::Email, "head@shanti.edu.np".to_string());
        form.set_text(TopField::Password, "bookworm".to_string());
        form.set_text(TopField::PhoneNumber, "9851000000".to_string());
        form.set_user_type(Some(user_type));
        form
    }

    fn school_admin_form() -> RegistrationForm {
        let mut form = base_form(UserType::SchoolAdmin);
        let mut school = form.nested(NestedGroup::School, false);
        school.set_field(
            OrganizationField::Name,
            FieldInput::Text("Shanti Secondary School".to_string()),
        );
        school.set_field(
            OrganizationField::Municipality,
            FieldInput::Text("Bhaktapur".to_string()),
        );
        school.set_field(OrganizationField::WardNumber, FieldInput::Number(Some(2)));
        school.set_field(
            OrganizationField::PanNumber,
            FieldInput::Text("302112233".to_string()),
        );
        school.set_field(
            OrganizationField::VatNumber,
            FieldInput::Text("602112233".to_string()),
        );
        form
    }

    fn silent_notifier() -> MockNotifier {
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().times(0);
        notifier
    }

    fn notifier_expecting(kind: NotificationKind) -> MockNotifier {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(move |n: &Notification| n.kind == kind)
            .times(1)
            .return_const(());
        notifier
    }

    #[tokio::test]
    async fn test_individual_without_names_is_not_sent() {
        let mut form = base_form(UserType::IndividualUser);
        let mut api = MockRegistrationApi::new();
        api.expect_register().times(0);
        let mut notifier = silent_notifier();
        let mut handler = SubmissionHandler::new();

        let outcome = handler.submit(&mut form, &api, &mut notifier).await;

        assert!(matches!(outcome, SubmitOutcome::NotSent(Begin::Invalid)));
        let fields: Vec<_> = form.errors().field_names().collect();
        assert_eq!(fields, vec!["firstName", "lastName"]);
        assert_eq!(handler.state(), SubmitState::Idle);
    }

    #[tokio::test]
    async fn test_valid_school_admin_sends_one_mutation() {
        let mut form = school_admin_form();
        let expected = form.payload();
        assert!(expected.school.is_some());

        let mut api = MockRegistrationApi::new();
        api.expect_register()
            .withf(move |payload: &RegistrationFields| *payload == expected)
            .times(1)
            .returning(|_| Ok(RegisterResponse::success()));
        let mut notifier = notifier_expecting(NotificationKind::Success);
        let mut handler = SubmissionHandler::new();

        let outcome = handler.submit(&mut form, &api, &mut notifier).await;

        assert!(matches!(outcome, SubmitOutcome::Sent(Completion::Registered)));
        assert_eq!(handler.state(), SubmitState::Success);
        assert!(form.is_pristine());
    }

    #[tokio::test]
    async fn test_payload_excludes_previously_selected_group() {
        let mut form = school_admin_form();
        form.set_user_type(Some(UserType::Publisher));
        let mut publisher = form.nested(NestedGroup::Publisher, false);
        publisher.set_field(
            OrganizationField::Name,
            FieldInput::Text("Ekta Books".to_string()),
        );
        publisher.set_field(
            OrganizationField::Municipality,
            FieldInput::Text("Lalitpur".to_string()),
        );
        publisher.set_field(OrganizationField::WardNumber, FieldInput::Number(Some(5)));
        publisher.set_field(OrganizationField::PanNumber, FieldInput::Text("1".to_string()));
        publisher.set_field(OrganizationField::VatNumber, FieldInput::Text("2".to_string()));

        let mut api = MockRegistrationApi::new();
        api.expect_register()
            .withf(|payload: &RegistrationFields| {
                payload.school.is_none() && payload.publisher.is_some()
            })
            .times(1)
            .returning(|_| Ok(RegisterResponse::success()));
        let mut notifier = notifier_expecting(NotificationKind::Success);

        let outcome = SubmissionHandler::new()
            .submit(&mut form, &api, &mut notifier)
            .await;
        assert!(matches!(outcome, SubmitOutcome::Sent(Completion::Registered)));
    }

    #[tokio::test]
    async fn test_server_errors_populate_form() {
        let mut form = school_admin_form();
        let mut api = MockRegistrationApi::new();
        api.expect_register().times(1).returning(|_| {
            Ok(RegisterResponse::rejected(vec![
                ObjectError {
                    field: "email".to_string(),
                    messages: Some("User with this email already exists.".to_string()),
                    object_errors: None,
                    client_id: None,
                },
                ObjectError {
                    field: "school".to_string(),
                    messages: None,
                    object_errors: Some(vec![ObjectError {
                        field: "panNumber".to_string(),
                        messages: Some("PAN already registered.".to_string()),
                        object_errors: None,
                        client_id: None,
                    }]),
                    client_id: None,
                },
            ]))
        });
        let mut notifier = notifier_expecting(NotificationKind::Error);
        let mut handler = SubmissionHandler::new();

        let outcome = handler.submit(&mut form, &api, &mut notifier).await;

        assert!(matches!(outcome, SubmitOutcome::Sent(Completion::Rejected)));
        assert_eq!(
            form.error(TopField::Email),
            Some("User with this email already exists.")
        );
        assert_eq!(
            form.nested_view(NestedGroup::School).error(OrganizationField::PanNumber),
            Some("PAN already registered.")
        );
        assert_eq!(handler.state(), SubmitState::Idle);
        // Value kept for correction and resubmission
        assert_eq!(form.value().text(TopField::Email), "head@shanti.edu.np");
    }

    #[tokio::test]
    async fn test_non_field_errors_become_description() {
        let mut form = school_admin_form();
        let mut api = MockRegistrationApi::new();
        api.expect_register().returning(|_| {
            Ok(RegisterResponse::rejected(vec![ObjectError {
                field: "nonFieldErrors".to_string(),
                messages: Some("Registrations are paused.".to_string()),
                object_errors: None,
                client_id: None,
            }]))
        });
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|n: &Notification| {
                n.kind == NotificationKind::Error
                    && n.description.as_deref() == Some("Registrations are paused.")
            })
            .times(1)
            .return_const(());

        SubmissionHandler::new()
            .submit(&mut form, &api, &mut notifier)
            .await;
        assert_eq!(form.errors().internal(), Some("Registrations are paused."));
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_form_and_allows_retry() {
        let mut form = school_admin_form();
        let before = form.value().clone();
        let mut api = MockRegistrationApi::new();
        api.expect_register()
            .times(1)
            .returning(|_| Err(ApiError::Status(reqwest::StatusCode::BAD_GATEWAY)));
        let mut notifier = notifier_expecting(NotificationKind::Error);
        let mut handler = SubmissionHandler::new();

        let outcome = handler.submit(&mut form, &api, &mut notifier).await;

        assert!(matches!(outcome, SubmitOutcome::Sent(Completion::Failed)));
        assert_eq!(form.value(), &before);
        assert!(form.errors().is_empty());
        assert_eq!(handler.state(), SubmitState::Idle);
        assert!(matches!(handler.begin(&mut form), Begin::Ready(_)));
    }

    #[test]
    fn test_second_submit_while_in_flight_is_busy() {
        let mut form = school_admin_form();
        let mut handler = SubmissionHandler::new();
        assert!(matches!(handler.begin(&mut form), Begin::Ready(_)));
        assert!(handler.is_submitting());
        assert!(matches!(handler.begin(&mut form), Begin::Busy));
    }

    #[test]
    fn test_abandoned_attempt_result_is_ignored() {
        let mut form = school_admin_form();
        let mut handler = SubmissionHandler::new();
        let Begin::Ready(ticket) = handler.begin(&mut form) else {
            panic!("form should be valid");
        };
        handler.abandon();
        form.reset();

        let mut notifier = silent_notifier();
        let completion = handler.complete(
            ticket.attempt,
            Ok(RegisterResponse::success()),
            &mut form,
            &mut notifier,
        );
        assert_eq!(completion, Completion::Stale);
        assert_eq!(handler.state(), SubmitState::Idle);
    }

    #[test]
    fn test_unknown_attempt_is_stale() {
        let mut form = school_admin_form();
        let mut handler = SubmissionHandler::new();
        let _ = handler.begin(&mut form);
        let mut notifier = silent_notifier();
        let completion = handler.complete(
            Uuid::new_v4(),
            Ok(RegisterResponse::success()),
            &mut form,
            &mut notifier,
        );
        assert_eq!(completion, Completion::Stale);
        assert!(handler.is_submitting());
    }

    #[test]
    fn test_success_is_terminal() {
        let mut form = school_admin_form();
        let mut handler = SubmissionHandler::new();
        let Begin::Ready(ticket) = handler.begin(&mut form) else {
            panic!("form should be valid");
        };
        let mut notifier = notifier_expecting(NotificationKind::Success);
        handler.complete(
            ticket.attempt,
            Ok(RegisterResponse::success()),
            &mut form,
            &mut notifier,
        );
        assert!(matches!(handler.begin(&mut form), Begin::Closed));
    }

    #[test]
    fn test_moderator_registers_with_base_fields() {
        let mut form = base_form(UserType::Moderator);
        let mut api = MockRegistrationApi::new();
        api.expect_register()
            .withf(|payload: &RegistrationFields| {
                payload.user_type == Some(UserType::Moderator)
                    && payload.first_name.is_none()
                    && payload.school.is_none()
            })
            .times(1)
            .returning(|_| Ok(RegisterResponse::success()));
        let mut notifier = notifier_expecting(NotificationKind::Success);

        let outcome = tokio_test::block_on(SubmissionHandler::new().submit(
            &mut form,
            &api,
            &mut notifier,
        ));
        assert!(matches!(outcome, SubmitOutcome::Sent(Completion::Registered)));
    }
}
