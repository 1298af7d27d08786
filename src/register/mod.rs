//! Registration form domain
//!
//! Validation schema, nested organization sub-forms and the submission
//! flow of the account registration form. Nothing in here knows about the
//! terminal; the UI drives it through [`RegistrationForm`] and
//! [`SubmissionHandler`].

mod errors;
mod fields;
mod form;
mod nested;
mod notify;
mod schema;
mod submission;

pub use errors::ObjectError;
pub use fields::{
    FieldInput, FieldValue, NestedGroup, OrganizationField, RegistrationFields, TopField, UserType,
};
pub use form::RegistrationForm;
pub use notify::{Notification, NotificationKind, Notifier};
pub use schema::{FormSchema, NestedSchema, Role, Validator};
pub use submission::{Begin, Completion, SubmissionHandler, SubmitState};
