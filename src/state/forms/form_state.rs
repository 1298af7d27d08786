//! Registration screen state: form value, focus and submission

use super::field::FormSlot;
use crate::register::{
    FieldInput, FieldValue, NestedSchema, RegistrationForm, Role, SubmissionHandler, TopField,
    UserType,
};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// Buttons on the actions row: 0=Register, 1=Reset
pub const REGISTER_BUTTON: usize = 0;
pub const RESET_BUTTON: usize = 1;
const BUTTON_COUNT: usize = 2;

/// Fields shown for every role, in focus order
const COMMON_FIELDS: [TopField; 4] = [
    TopField::UserType,
    TopField::Email,
    TopField::Password,
    TopField::PhoneNumber,
];

#[derive(Debug, Default)]
pub struct RegisterScreen {
    pub form: RegistrationForm,
    pub submission: SubmissionHandler,
    pub active_field_index: usize,
    pub selected_button: usize,
    /// Organization fields become read-only while a registration is in flight
    pub lock_groups_while_submitting: bool,
}

impl RegisterScreen {
    pub fn new(lock_groups_while_submitting: bool) -> Self {
        Self {
            form: RegistrationForm::new(),
            submission: SubmissionHandler::new(),
            active_field_index: 0,
            selected_button: REGISTER_BUTTON,
            lock_groups_while_submitting,
        }
    }

    /// Focusable rows for the current role, ending with the actions row
    pub fn slots(&self) -> Vec<FormSlot> {
        let mut slots: Vec<FormSlot> = COMMON_FIELDS.iter().map(|f| FormSlot::Top(*f)).collect();
        match self.form.role() {
            Role::Individual => {
                slots.push(FormSlot::Top(TopField::FirstName));
                slots.push(FormSlot::Top(TopField::LastName));
            }
            Role::Organization(group) => {
                let schema = NestedSchema::organization();
                slots.extend(schema.fields.iter().map(|(f, _)| FormSlot::Group(group, *f)));
            }
            Role::Unspecified => {}
        }
        slots.push(FormSlot::Actions);
        slots
    }

    pub fn active_slot(&self) -> FormSlot {
        self.slots()
            .get(self.active_field_index)
            .copied()
            .unwrap_or(FormSlot::Actions)
    }

    /// Returns true if the buttons row is currently active
    pub fn is_buttons_row_active(&self) -> bool {
        self.active_slot() == FormSlot::Actions
    }

    /// Move to the next button (wraps around)
    pub fn next_button(&mut self) {
        self.selected_button = (self.selected_button + 1) % BUTTON_COUNT;
    }

    /// Move to the previous button (wraps around)
    pub fn prev_button(&mut self) {
        if self.selected_button == 0 {
            self.selected_button = BUTTON_COUNT - 1;
        } else {
            self.selected_button -= 1;
        }
    }

    pub fn groups_disabled(&self) -> bool {
        self.lock_groups_while_submitting && self.submission.is_submitting()
    }

    /// Switch to the next/previous role; focus stays on the role picker
    pub fn cycle_role(&mut self, forward: bool) {
        let current = self.form.value().user_type;
        let next = if forward {
            UserType::next_registrable(current)
        } else {
            UserType::prev_registrable(current)
        };
        self.form.set_user_type(next);
        self.set_active_field(self.active_field_index);
    }

    /// Type a character into the focused field
    pub fn input_char(&mut self, c: char) {
        let slot = self.active_slot();
        match slot {
            FormSlot::Top(TopField::UserType) => {
                if c == ' ' {
                    self.cycle_role(true);
                }
            }
            FormSlot::Top(field) => {
                let mut text = self.form.value().text(field).to_string();
                text.push(c);
                self.form.set_text(field, text);
            }
            FormSlot::Group(group, field) => {
                let disabled = self.groups_disabled();
                let mut nested = self.form.nested(group, disabled);
                if nested.is_disabled() {
                    return;
                }
                let current = nested.view().value().and_then(|g| g.get(field));
                let input = match current {
                    _ if slot.is_numeric() => {
                        let Some(digit) = c.to_digit(10) else {
                            return;
                        };
                        let number = match current {
                            Some(FieldValue::Number(n)) => {
                                match n.checked_mul(10).and_then(|n| n.checked_add(digit)) {
                                    Some(n) => n,
                                    None => return,
                                }
                            }
                            _ => digit,
                        };
                        FieldInput::Number(Some(number))
                    }
                    Some(FieldValue::Text(s)) => FieldInput::Text(format!("{s}{c}")),
                    _ => FieldInput::Text(c.to_string()),
                };
                nested.set_field(field, input);
            }
            FormSlot::Actions => {}
        }
    }

    /// Delete the last character of the focused field
    pub fn backspace(&mut self) {
        match self.active_slot() {
            FormSlot::Top(TopField::UserType) | FormSlot::Actions => {}
            FormSlot::Top(field) => {
                let mut text = self.form.value().text(field).to_string();
                text.pop();
                self.form.set_text(field, text);
            }
            FormSlot::Group(group, field) => {
                let disabled = self.groups_disabled();
                let mut nested = self.form.nested(group, disabled);
                let input = match nested.view().value().and_then(|g| g.get(field)) {
                    Some(FieldValue::Number(n)) => {
                        FieldInput::Number(Some(n / 10).filter(|n| *n > 0))
                    }
                    Some(FieldValue::Text(s)) => {
                        let mut text = s.to_string();
                        text.pop();
                        FieldInput::Text(text)
                    }
                    None => return,
                };
                nested.set_field(field, input);
            }
        }
    }

    /// Focus the first row that carries an error
    pub fn focus_first_error(&mut self) {
        let form = &self.form;
        if let Some(index) = self
            .slots()
            .iter()
            .position(|slot| *slot != FormSlot::Actions && slot.error(form).is_some())
        {
            self.active_field_index = index;
        }
    }

    /// Start over with an empty form; an in-flight result will be ignored
    pub fn reset(&mut self) {
        self.submission.abandon();
        self.submission = SubmissionHandler::new();
        self.form.reset();
        self.active_field_index = 0;
        self.selected_button = REGISTER_BUTTON;
    }
}

impl Form for RegisterScreen {
    fn field_count(&self) -> usize {
        self.slots().len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count() - 1);
    }
}
