//! Parent form: owns the value and the error tree

use super::errors::ErrorTree;
use super::fields::{NestedGroup, RegistrationFields, TopField, UserType};
use super::nested::{NestedForm, NestedView};
use super::schema::{resolve, FormSchema, Role};

/// Registration form value plus the errors currently shown for it
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    value: RegistrationFields,
    errors: ErrorTree,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &RegistrationFields {
        &self.value
    }

    pub fn errors(&self) -> &ErrorTree {
        &self.errors
    }

    pub fn role(&self) -> Role {
        Role::of(self.value.user_type)
    }

    /// Nested group validated for the current role, if any
    pub fn active_group(&self) -> Option<NestedGroup> {
        self.role().nested_group()
    }

    pub fn schema(&self) -> FormSchema {
        resolve(&self.value)
    }

    /// Change a top-level text field and clear its error
    pub fn set_text(&mut self, field: TopField, text: String) {
        self.value.set_text(field, text);
        self.errors.remove(field.key());
    }

    /// Change the role. Errors belonging to groups or name fields that the
    /// new role no longer validates are dropped; typed values are kept.
    pub fn set_user_type(&mut self, user_type: Option<UserType>) {
        if self.value.user_type == user_type {
            return;
        }
        self.value.user_type = user_type;
        self.errors.remove(TopField::UserType.key());

        let schema = self.schema();
        let active = schema.nested_group();
        let names_required = schema.is_required(TopField::FirstName);
        self.errors.retain(|name| {
            let stale_group = NestedGroup::ALL
                .iter()
                .any(|g| g.key() == name && Some(*g) != active);
            let stale_name = !names_required
                && (name == TopField::FirstName.key() || name == TopField::LastName.key());
            !(stale_group || stale_name)
        });
        tracing::debug!(?user_type, ?active, "registration role changed");
    }

    /// Scoped sub-form for `group`
    pub fn nested(&mut self, group: NestedGroup, disabled: bool) -> NestedForm<'_> {
        NestedForm::new(
            group,
            self.value.group_slot_mut(group),
            &mut self.errors,
            disabled,
        )
    }

    /// Read-only counterpart of [`RegistrationForm::nested`]
    pub fn nested_view(&self, group: NestedGroup) -> NestedView<'_> {
        NestedView::new(group, self.value.group(group), &self.errors)
    }

    pub fn error(&self, field: TopField) -> Option<&str> {
        self.errors.message(field.key())
    }

    pub fn set_errors(&mut self, errors: ErrorTree) {
        self.errors = errors;
    }

    /// Serialized mutation input: only what the current role's schema
    /// lists is kept
    pub fn payload(&self) -> RegistrationFields {
        self.schema().payload(&self.value)
    }

    pub fn is_pristine(&self) -> bool {
        self.value.is_empty() && self.errors.is_empty()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
