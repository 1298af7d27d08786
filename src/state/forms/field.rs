//! Focusable rows of the registration screen

use crate::register::{
    FieldValue, FormSchema, NestedGroup, OrganizationField, RegistrationForm, TopField, Validator,
};

/// Mask character for the password field
const SECRET_CHAR: char = '•';

/// One focusable row: a top-level field, a sub-form field, or the buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormSlot {
    Top(TopField),
    Group(NestedGroup, OrganizationField),
    Actions,
}

impl FormSlot {
    pub fn label(&self) -> String {
        match self {
            Self::Top(field) => field.label().to_string(),
            Self::Group(group, field) => field.label(*group),
            Self::Actions => "Actions".to_string(),
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Top(TopField::UserType))
    }

    pub fn is_secret(&self) -> bool {
        matches!(self, Self::Top(TopField::Password))
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Group(_, field) if field.is_numeric())
    }

    /// Text shown in the field box
    pub fn display_value(&self, form: &RegistrationForm) -> String {
        match self {
            Self::Top(TopField::UserType) => form
                .value()
                .user_type
                .map(|u| format!("◂ {} ▸", u.label()))
                .unwrap_or_default(),
            Self::Top(field) if self.is_secret() => {
                SECRET_CHAR.to_string().repeat(form.value().text(*field).chars().count())
            }
            Self::Top(field) => form.value().text(*field).to_string(),
            Self::Group(group, field) => {
                match form.nested_view(*group).value().and_then(|g| g.get(*field)) {
                    Some(FieldValue::Text(s)) => s.to_string(),
                    Some(FieldValue::Number(n)) => n.to_string(),
                    None => String::new(),
                }
            }
            Self::Actions => String::new(),
        }
    }

    /// Placeholder shown when the field is empty
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Top(TopField::UserType) => "←/→ to choose a role",
            Self::Top(TopField::Email) => "you@example.com",
            Self::Top(TopField::PhoneNumber) => "98XXXXXXXX",
            Self::Group(_, OrganizationField::Name) => "Togglecorp",
            _ => "",
        }
    }

    pub fn error<'a>(&self, form: &'a RegistrationForm) -> Option<&'a str> {
        match self {
            Self::Top(field) => form.error(*field),
            Self::Group(group, field) => form.nested_view(*group).error(*field),
            Self::Actions => form.errors().internal(),
        }
    }

    pub fn is_required(&self, schema: &FormSchema) -> bool {
        let rules: &[Validator] = match self {
            Self::Top(field) => schema.rules(*field),
            Self::Group(_, field) => schema
                .nested
                .as_ref()
                .map(|(_, nested)| nested.rules(*field))
                .unwrap_or(&[]),
            Self::Actions => &[],
        };
        rules
            .iter()
            .any(|v| matches!(v, Validator::Required | Validator::RequiredString))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::{FieldInput, UserType};

    #[test]
    fn test_password_is_masked() {
        let mut form = RegistrationForm::new();
        form.set_text(TopField::Password, "pässword".to_string());
        let slot = FormSlot::Top(TopField::Password);
        assert_eq!(slot.display_value(&form), "••••••••");
    }

    #[test]
    fn test_user_type_display() {
        let mut form = RegistrationForm::new();
        let slot = FormSlot::Top(TopField::UserType);
        assert_eq!(slot.display_value(&form), "");
        form.set_user_type(Some(UserType::Publisher));
        assert_eq!(slot.display_value(&form), "◂ Publisher ▸");
        assert!(slot.is_choice());
    }

    #[test]
    fn test_group_value_display() {
        let mut form = RegistrationForm::new();
        form.set_user_type(Some(UserType::SchoolAdmin));
        form.nested(NestedGroup::School, false)
            .set_field(OrganizationField::WardNumber, FieldInput::Number(Some(11)));
        let slot = FormSlot::Group(NestedGroup::School, OrganizationField::WardNumber);
        assert_eq!(slot.display_value(&form), "11");
        assert!(slot.is_numeric());
        assert_eq!(slot.label(), "Ward Number");
        assert_eq!(
            FormSlot::Group(NestedGroup::School, OrganizationField::Name).label(),
            "Name of the School"
        );
    }

    #[test]
    fn test_group_error_is_scoped_to_its_group() {
        let mut form = RegistrationForm::new();
        form.set_user_type(Some(UserType::Publisher));
        let errors = form.schema().validate(form.value());
        form.set_errors(errors);

        let pan = FormSlot::Group(NestedGroup::Publisher, OrganizationField::PanNumber);
        assert_eq!(pan.error(&form), Some("This field is required"));
        assert!(FormSlot::Group(NestedGroup::School, OrganizationField::PanNumber)
            .error(&form)
            .is_none());
        assert!(FormSlot::Group(NestedGroup::Publisher, OrganizationField::Name)
            .error(&form)
            .is_none());
    }

    #[test]
    fn test_required_markers_follow_schema() {
        let mut form = RegistrationForm::new();
        form.set_user_type(Some(UserType::InstitutionalUser));
        let schema = form.schema();
        assert!(FormSlot::Top(TopField::Email).is_required(&schema));
        assert!(!FormSlot::Top(TopField::FirstName).is_required(&schema));
        assert!(FormSlot::Group(NestedGroup::Institution, OrganizationField::PanNumber)
            .is_required(&schema));
        assert!(!FormSlot::Group(NestedGroup::Institution, OrganizationField::LocalAddress)
            .is_required(&schema));
        assert!(!FormSlot::Actions.is_required(&schema));
    }
}
