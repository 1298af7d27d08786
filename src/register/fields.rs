//! Registration form value objects

use serde::{Deserialize, Serialize};

/// Account role, serialized as the API's `UserUserType` enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserType {
    IndividualUser,
    InstitutionalUser,
    Publisher,
    SchoolAdmin,
    Moderator,
}

impl UserType {
    /// Roles offered by the registration form, in picker order
    pub const REGISTRABLE: [UserType; 4] = [
        UserType::IndividualUser,
        UserType::InstitutionalUser,
        UserType::Publisher,
        UserType::SchoolAdmin,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::IndividualUser => "Individual",
            Self::InstitutionalUser => "Institution",
            Self::Publisher => "Publisher",
            Self::SchoolAdmin => "School",
            Self::Moderator => "Moderator",
        }
    }

    /// Next role in picker order; wraps through "not selected"
    pub fn next_registrable(current: Option<Self>) -> Option<Self> {
        let position = current.and_then(|c| Self::REGISTRABLE.iter().position(|r| *r == c));
        match position {
            None => Some(Self::REGISTRABLE[0]),
            Some(i) if i + 1 < Self::REGISTRABLE.len() => Some(Self::REGISTRABLE[i + 1]),
            Some(_) => None,
        }
    }

    /// Previous role in picker order; wraps through "not selected"
    pub fn prev_registrable(current: Option<Self>) -> Option<Self> {
        let position = current.and_then(|c| Self::REGISTRABLE.iter().position(|r| *r == c));
        match position {
            None => Self::REGISTRABLE.last().copied(),
            Some(0) => None,
            Some(i) => Some(Self::REGISTRABLE[i - 1]),
        }
    }
}

/// Top-level fields of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TopField {
    Email,
    FirstName,
    LastName,
    Password,
    PhoneNumber,
    UserType,
}

impl TopField {
    /// Field name as sent to and reported by the API
    pub fn key(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Password => "password",
            Self::PhoneNumber => "phoneNumber",
            Self::UserType => "userType",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::FirstName => "First Name",
            Self::LastName => "Last Name",
            Self::Password => "Password",
            Self::PhoneNumber => "Phone Number",
            Self::UserType => "Register As",
        }
    }
}

/// Organization sub-forms; each is stored under its own key in the parent value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NestedGroup {
    Institution,
    Publisher,
    School,
}

impl NestedGroup {
    pub const ALL: [NestedGroup; 3] = [
        NestedGroup::Institution,
        NestedGroup::Publisher,
        NestedGroup::School,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Institution => "institution",
            Self::Publisher => "publisher",
            Self::School => "school",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Institution => "Institution",
            Self::Publisher => "Publisher",
            Self::School => "School",
        }
    }
}

/// Fields shared by every organization sub-form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrganizationField {
    Name,
    Municipality,
    WardNumber,
    LocalAddress,
    PanNumber,
    VatNumber,
}

impl OrganizationField {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Municipality => "municipality",
            Self::WardNumber => "wardNumber",
            Self::LocalAddress => "localAddress",
            Self::PanNumber => "panNumber",
            Self::VatNumber => "vatNumber",
        }
    }

    pub fn label(&self, group: NestedGroup) -> String {
        match self {
            Self::Name => format!("Name of the {}", group.label()),
            Self::Municipality => "Municipality".to_string(),
            Self::WardNumber => "Ward Number".to_string(),
            Self::LocalAddress => "Local Address".to_string(),
            Self::PanNumber => "PAN".to_string(),
            Self::VatNumber => "VAT Number".to_string(),
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::WardNumber)
    }
}

/// Borrowed view of a single field value, as seen by validators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(u32),
}

/// A single-field update for an organization sub-form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldInput {
    Text(String),
    Number(Option<u32>),
}

/// Partial value of an organization sub-form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ward_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub local_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vat_number: Option<String>,
}

impl OrganizationFields {
    pub fn get(&self, field: OrganizationField) -> Option<FieldValue<'_>> {
        match field {
            OrganizationField::WardNumber => self.ward_number.map(FieldValue::Number),
            _ => self.text_of(field).map(FieldValue::Text),
        }
    }

    /// Merge one field into the value. Empty text clears the field.
    pub fn set(&mut self, field: OrganizationField, input: FieldInput) {
        match (field, input) {
            (OrganizationField::WardNumber, FieldInput::Number(n)) => self.ward_number = n,
            (OrganizationField::WardNumber, FieldInput::Text(s)) => {
                self.ward_number = s.trim().parse().ok();
            }
            (field, FieldInput::Text(s)) => {
                if let Some(slot) = self.text_slot_mut(field) {
                    *slot = non_empty(s);
                }
            }
            (field, FieldInput::Number(n)) => {
                if let Some(slot) = self.text_slot_mut(field) {
                    *slot = n.map(|n| n.to_string());
                }
            }
        }
    }

    fn text_of(&self, field: OrganizationField) -> Option<&str> {
        match field {
            OrganizationField::Name => self.name.as_deref(),
            OrganizationField::Municipality => self.municipality.as_deref(),
            OrganizationField::LocalAddress => self.local_address.as_deref(),
            OrganizationField::PanNumber => self.pan_number.as_deref(),
            OrganizationField::VatNumber => self.vat_number.as_deref(),
            OrganizationField::WardNumber => None,
        }
    }

    // Ward number is numeric and has no text slot
    fn text_slot_mut(&mut self, field: OrganizationField) -> Option<&mut Option<String>> {
        match field {
            OrganizationField::Name => Some(&mut self.name),
            OrganizationField::Municipality => Some(&mut self.municipality),
            OrganizationField::LocalAddress => Some(&mut self.local_address),
            OrganizationField::PanNumber => Some(&mut self.pan_number),
            OrganizationField::VatNumber => Some(&mut self.vat_number),
            OrganizationField::WardNumber => None,
        }
    }
}

/// Partial registration form value. Doubles as the mutation payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_type: Option<UserType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<OrganizationFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<OrganizationFields>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<OrganizationFields>,
}

impl RegistrationFields {
    pub fn get(&self, field: TopField) -> Option<FieldValue<'_>> {
        match field {
            TopField::UserType => self
                .user_type
                .as_ref()
                .map(|_| FieldValue::Text(self.user_type_key())),
            _ => self.text_of(field).map(FieldValue::Text),
        }
    }

    /// Current text of a text field, empty when unset
    pub fn text(&self, field: TopField) -> &str {
        match field {
            TopField::UserType => self.user_type.map(|u| u.label()).unwrap_or(""),
            _ => self.text_of(field).unwrap_or(""),
        }
    }

    /// Set a text field. Empty text clears it; `userType` is set through
    /// [`RegistrationFields::user_type`] instead and is ignored here.
    pub fn set_text(&mut self, field: TopField, value: String) {
        if let Some(slot) = self.text_slot_mut(field) {
            *slot = non_empty(value);
        }
    }

    pub fn group(&self, group: NestedGroup) -> Option<&OrganizationFields> {
        self.group_slot(group).as_ref()
    }

    pub fn group_slot(&self, group: NestedGroup) -> &Option<OrganizationFields> {
        match group {
            NestedGroup::Institution => &self.institution,
            NestedGroup::Publisher => &self.publisher,
            NestedGroup::School => &self.school,
        }
    }

    pub fn group_slot_mut(&mut self, group: NestedGroup) -> &mut Option<OrganizationFields> {
        match group {
            NestedGroup::Institution => &mut self.institution,
            NestedGroup::Publisher => &mut self.publisher,
            NestedGroup::School => &mut self.school,
        }
    }

    /// Copy of the value holding only `fields` and the `group` sub-form
    pub fn project<I>(&self, fields: I, group: Option<NestedGroup>) -> Self
    where
        I: IntoIterator<Item = TopField>,
    {
        let mut kept = Self::default();
        for field in fields {
            match field {
                TopField::UserType => kept.user_type = self.user_type,
                _ => {
                    if let Some(slot) = kept.text_slot_mut(field) {
                        *slot = self.text_of(field).map(str::to_string);
                    }
                }
            }
        }
        if let Some(group) = group {
            *kept.group_slot_mut(group) = self.group(group).cloned();
        }
        kept
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn user_type_key(&self) -> &'static str {
        match self.user_type {
            Some(UserType::IndividualUser) => "INDIVIDUAL_USER",
            Some(UserType::InstitutionalUser) => "INSTITUTIONAL_USER",
            Some(UserType::Publisher) => "PUBLISHER",
            Some(UserType::SchoolAdmin) => "SCHOOL_ADMIN",
            Some(UserType::Moderator) => "MODERATOR",
            None => "",
        }
    }

    fn text_of(&self, field: TopField) -> Option<&str> {
        match field {
            TopField::Email => self.email.as_deref(),
            TopField::FirstName => self.first_name.as_deref(),
            TopField::LastName => self.last_name.as_deref(),
            TopField::Password => self.password.as_deref(),
            TopField::PhoneNumber => self.phone_number.as_deref(),
            TopField::UserType => None,
        }
    }

    fn text_slot_mut(&mut self, field: TopField) -> Option<&mut Option<String>> {
        match field {
            TopField::Email => Some(&mut self.email),
            TopField::FirstName => Some(&mut self.first_name),
            TopField::LastName => Some(&mut self.last_name),
            TopField::Password => Some(&mut self.password),
            TopField::PhoneNumber => Some(&mut self.phone_number),
            TopField::UserType => None,
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_user_type_serializes_as_api_enum() {
        let json = serde_json::to_value(UserType::SchoolAdmin).unwrap();
        assert_eq!(json, json!("SCHOOL_ADMIN"));
        let parsed: UserType = serde_json::from_value(json!("INSTITUTIONAL_USER")).unwrap();
        assert_eq!(parsed, UserType::InstitutionalUser);
    }

    #[test]
    fn test_role_picker_cycles_through_unselected() {
        let mut current = None;
        let mut seen = Vec::new();
        for _ in 0..5 {
            current = UserType::next_registrable(current);
            seen.push(current);
        }
        assert_eq!(
            seen,
            vec![
                Some(UserType::IndividualUser),
                Some(UserType::InstitutionalUser),
                Some(UserType::Publisher),
                Some(UserType::SchoolAdmin),
                None,
            ]
        );
        assert_eq!(UserType::prev_registrable(None), Some(UserType::SchoolAdmin));
        assert_eq!(UserType::prev_registrable(Some(UserType::IndividualUser)), None);
    }

    #[test]
    fn test_moderator_is_not_offered() {
        assert!(!UserType::REGISTRABLE.contains(&UserType::Moderator));
        assert_eq!(
            UserType::next_registrable(Some(UserType::Moderator)),
            Some(UserType::IndividualUser)
        );
    }

    #[test]
    fn test_set_text_empty_clears_field() {
        let mut fields = RegistrationFields::default();
        fields.set_text(TopField::Email, "a@b.np".to_string());
        assert_eq!(fields.text(TopField::Email), "a@b.np");
        fields.set_text(TopField::Email, String::new());
        assert!(fields.email.is_none());
        assert!(fields.is_empty());
    }

    #[test]
    fn test_set_text_ignores_user_type() {
        let mut fields = RegistrationFields::default();
        fields.set_text(TopField::UserType, "PUBLISHER".to_string());
        assert!(fields.user_type.is_none());
        assert!(fields.email.is_none());
    }

    #[test]
    fn test_organization_ward_number_parses_text() {
        let mut org = OrganizationFields::default();
        org.set(OrganizationField::WardNumber, FieldInput::Text("12".to_string()));
        assert_eq!(org.ward_number, Some(12));
        assert_eq!(org.get(OrganizationField::WardNumber), Some(FieldValue::Number(12)));
        org.set(OrganizationField::WardNumber, FieldInput::Number(None));
        assert_eq!(org, OrganizationFields::default());
    }

    #[test]
    fn test_organization_set_does_not_touch_other_fields() {
        let mut org = OrganizationFields {
            pan_number: Some("123".to_string()),
            ..Default::default()
        };
        org.set(OrganizationField::Name, FieldInput::Text("Ekta Books".to_string()));
        assert_eq!(org.pan_number.as_deref(), Some("123"));
        assert_eq!(org.get(OrganizationField::Name), Some(FieldValue::Text("Ekta Books")));
    }

    #[test]
    fn test_project_keeps_only_listed_fields_and_group() {
        let fields = RegistrationFields {
            email: Some("ram@example.com".to_string()),
            first_name: Some("Ram".to_string()),
            user_type: Some(UserType::SchoolAdmin),
            institution: Some(OrganizationFields {
                name: Some("Old".to_string()),
                ..Default::default()
            }),
            school: Some(OrganizationFields {
                name: Some("New".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let kept = fields.project([TopField::Email, TopField::UserType], Some(NestedGroup::School));
        assert_eq!(
            kept,
            RegistrationFields {
                email: fields.email.clone(),
                user_type: Some(UserType::SchoolAdmin),
                school: fields.school.clone(),
                ..Default::default()
            }
        );
        assert!(fields.project([], None).is_empty());
    }

    #[test]
    fn test_payload_uses_camel_case_and_skips_absent() {
        let fields = RegistrationFields {
            email: Some("head@school.edu.np".to_string()),
            phone_number: Some("9800000000".to_string()),
            user_type: Some(UserType::SchoolAdmin),
            school: Some(OrganizationFields {
                municipality: Some("Lalitpur".to_string()),
                ward_number: Some(3),
                ..Default::default()
            }),
            ..Default::default()
        };
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(
            json,
            json!({
                "email": "head@school.edu.np",
                "phoneNumber": "9800000000",
                "userType": "SCHOOL_ADMIN",
                "school": { "municipality": "Lalitpur", "wardNumber": 3 }
            })
        );
    }
}
