//! Scoped access to one organization sub-form, read-only or for editing

use super::errors::ErrorTree;
use super::fields::{FieldInput, NestedGroup, OrganizationField, OrganizationFields};

/// Read-only view over one nested group of the parent form
#[derive(Debug, Clone, Copy)]
pub struct NestedView<'a> {
    group: NestedGroup,
    value: Option<&'a OrganizationFields>,
    errors: &'a ErrorTree,
}

impl<'a> NestedView<'a> {
    /// `errors` is the parent's tree; the group's subtree is looked up by key
    pub fn new(
        group: NestedGroup,
        value: Option<&'a OrganizationFields>,
        errors: &'a ErrorTree,
    ) -> Self {
        Self {
            group,
            value,
            errors,
        }
    }

    pub fn value(&self) -> Option<&'a OrganizationFields> {
        self.value
    }

    pub fn error(&self, field: OrganizationField) -> Option<&'a str> {
        self.errors
            .nested(self.group.key())
            .and_then(|tree| tree.message(field.key()))
    }
}

/// Mutable view over one nested group of the parent form.
///
/// Reads and writes only the group's own slice of the value and the
/// group's own subtree of the error tree.
pub struct NestedForm<'a> {
    group: NestedGroup,
    value: &'a mut Option<OrganizationFields>,
    errors: &'a mut ErrorTree,
    disabled: bool,
}

impl<'a> NestedForm<'a> {
    pub fn new(
        group: NestedGroup,
        value: &'a mut Option<OrganizationFields>,
        errors: &'a mut ErrorTree,
        disabled: bool,
    ) -> Self {
        Self {
            group,
            value,
            errors,
            disabled,
        }
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn view(&self) -> NestedView<'_> {
        NestedView::new(self.group, self.value.as_ref(), &*self.errors)
    }

    /// Merge a single field into the group, creating the group on first
    /// write. Clears that field's error. No-op while disabled.
    pub fn set_field(&mut self, field: OrganizationField, input: FieldInput) {
        if self.disabled {
            return;
        }
        self.value
            .get_or_insert_with(OrganizationFields::default)
            .set(field, input);

        let key = self.group.key();
        let now_empty = match self.errors.nested_mut(key) {
            Some(tree) => {
                tree.remove(field.key());
                tree.is_empty()
            }
            None => false,
        };
        if now_empty {
            self.errors.remove(key);
        }
    }
}
