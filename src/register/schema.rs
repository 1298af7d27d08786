//! Role-conditional validation schema
//!
//! The schema is never stored: [`resolve`] rebuilds it from the current
//! `userType` every time the form is evaluated.

use super::errors::ErrorTree;
use super::fields::{
    FieldValue, NestedGroup, OrganizationField, OrganizationFields, RegistrationFields, TopField,
    UserType,
};
use regex::Regex;
use std::sync::LazyLock;

const REQUIRED_MESSAGE: &str = "This field is required";
const EMAIL_MESSAGE: &str = "Value must be a valid email";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[-!#$%&'*+/0-9=?A-Z^_a-z{|}~](\.?[-!#$%&'*+/0-9=?A-Z^_`a-z{|}~])*@[a-zA-Z0-9](-*\.?[a-zA-Z0-9])*\.[a-zA-Z](-?[a-zA-Z0-9])+$",
    )
    .expect("email pattern is valid")
});

/// A single field predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// Value present; blank text counts as absent
    Required,
    /// Text present and not blank
    RequiredString,
    /// Text, when present, is a syntactically valid email address
    Email,
    /// Text, when present, is longer than `n` characters
    LengthGreaterThan(usize),
    /// Text, when present, is shorter than `n` characters
    LengthSmallerThan(usize),
}

impl Validator {
    /// Returns the error message when the value fails this predicate
    pub fn check(&self, value: Option<FieldValue<'_>>) -> Option<String> {
        match (self, value) {
            (Self::Required | Self::RequiredString, None) => Some(REQUIRED_MESSAGE.to_string()),
            (Self::Required | Self::RequiredString, Some(FieldValue::Text(s)))
                if s.trim().is_empty() =>
            {
                Some(REQUIRED_MESSAGE.to_string())
            }
            (Self::Email, Some(FieldValue::Text(s))) if !EMAIL_PATTERN.is_match(s) => {
                Some(EMAIL_MESSAGE.to_string())
            }
            (Self::LengthGreaterThan(n), Some(FieldValue::Text(s))) if s.chars().count() <= *n => {
                Some(format!("Length must be greater than {n}"))
            }
            (Self::LengthSmallerThan(n), Some(FieldValue::Text(s))) if s.chars().count() >= *n => {
                Some(format!("Length must be smaller than {n}"))
            }
            _ => None,
        }
    }
}

/// Run validators in order, stopping at the first failure
fn first_error(validators: &[Validator], value: Option<FieldValue<'_>>) -> Option<String> {
    validators.iter().find_map(|v| v.check(value))
}

/// Which extra rules apply, derived from `userType`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Individual,
    Organization(NestedGroup),
    /// No role picked, or a role that cannot self-register
    Unspecified,
}

impl Role {
    pub fn of(user_type: Option<UserType>) -> Self {
        match user_type {
            Some(UserType::IndividualUser) => Self::Individual,
            Some(UserType::InstitutionalUser) => Self::Organization(NestedGroup::Institution),
            Some(UserType::Publisher) => Self::Organization(NestedGroup::Publisher),
            Some(UserType::SchoolAdmin) => Self::Organization(NestedGroup::School),
            Some(UserType::Moderator) | None => Self::Unspecified,
        }
    }

    pub fn nested_group(&self) -> Option<NestedGroup> {
        match self {
            Self::Organization(group) => Some(*group),
            Self::Individual | Self::Unspecified => None,
        }
    }

    /// Full rule set for this role
    pub fn schema(self) -> FormSchema {
        let mut schema = FormSchema::base();
        match self {
            Self::Individual => {
                schema.fields.push((TopField::FirstName, vec![Validator::Required]));
                schema.fields.push((TopField::LastName, vec![Validator::Required]));
            }
            Self::Organization(group) => {
                schema.nested = Some((group, NestedSchema::organization()));
            }
            Self::Unspecified => {}
        }
        schema
    }
}

/// Validators of an organization sub-form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NestedSchema {
    pub fields: Vec<(OrganizationField, Vec<Validator>)>,
}

impl NestedSchema {
    pub fn organization() -> Self {
        Self {
            fields: vec![
                (OrganizationField::Name, vec![]),
                (OrganizationField::Municipality, vec![Validator::RequiredString]),
                (OrganizationField::WardNumber, vec![Validator::Required]),
                (OrganizationField::LocalAddress, vec![]),
                (OrganizationField::PanNumber, vec![Validator::Required]),
                (OrganizationField::VatNumber, vec![Validator::Required]),
            ],
        }
    }

    pub fn rules(&self, field: OrganizationField) -> &[Validator] {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }

    /// An absent sub-form validates like an empty one
    pub fn validate(&self, value: Option<&OrganizationFields>) -> ErrorTree {
        let mut errors = ErrorTree::default();
        for (field, validators) in &self.fields {
            let current = value.and_then(|v| v.get(*field));
            if let Some(message) = first_error(validators, current) {
                errors.insert(field.key(), message);
            }
        }
        errors
    }
}

/// Field → validators mapping for one evaluation of the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    pub fields: Vec<(TopField, Vec<Validator>)>,
    pub nested: Option<(NestedGroup, NestedSchema)>,
}

impl FormSchema {
    /// Rules that apply regardless of role
    pub fn base() -> Self {
        Self {
            fields: vec![
                (TopField::Email, vec![Validator::Email, Validator::RequiredString]),
                (TopField::UserType, vec![Validator::Required]),
                (
                    TopField::Password,
                    vec![
                        Validator::RequiredString,
                        Validator::LengthGreaterThan(4),
                        Validator::LengthSmallerThan(129),
                    ],
                ),
                (
                    TopField::PhoneNumber,
                    vec![
                        Validator::RequiredString,
                        Validator::LengthGreaterThan(9),
                        Validator::LengthSmallerThan(15),
                    ],
                ),
            ],
            nested: None,
        }
    }

    pub fn rules(&self, field: TopField) -> &[Validator] {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn nested_group(&self) -> Option<NestedGroup> {
        self.nested.as_ref().map(|(group, _)| *group)
    }

    /// Whether `field` has at least one required-style validator
    pub fn is_required(&self, field: TopField) -> bool {
        self.rules(field)
            .iter()
            .any(|v| matches!(v, Validator::Required | Validator::RequiredString))
    }

    /// Mutation input for `value`: fields and groups this schema does not
    /// list are left out
    pub fn payload(&self, value: &RegistrationFields) -> RegistrationFields {
        value.project(self.fields.iter().map(|(field, _)| *field), self.nested_group())
    }

    /// Validate every field; each field reports only its first failure
    pub fn validate(&self, value: &RegistrationFields) -> ErrorTree {
        let mut errors = ErrorTree::default();
        for (field, validators) in &self.fields {
            if let Some(message) = first_error(validators, value.get(*field)) {
                errors.insert(field.key(), message);
            }
        }
        if let Some((group, schema)) = &self.nested {
            errors.insert_nested(group.key(), schema.validate(value.group(*group)));
        }
        errors
    }
}

/// Resolve the schema for the current form value
pub fn resolve(value: &RegistrationFields) -> FormSchema {
    Role::of(value.user_type).schema()
}
