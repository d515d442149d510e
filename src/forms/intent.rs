//! "Change password" intent for edit forms, where leaving both password fields
//! empty keeps the current password.

use crate::dom::Element;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChangeIntent {
    /// No input observed and the page did not preset the hidden field.
    #[default]
    Unset,
    Keep,
    Change,
}

impl ChangeIntent {
    pub fn from_fields(password: &str, confirm: &str) -> Self {
        if compute_change_intention(password, confirm) {
            Self::Change
        } else {
            Self::Keep
        }
    }

    /// Reads the value the server rendered into the hidden field.
    pub fn from_field_value(value: &str) -> Self {
        match value.trim() {
            "true" => Self::Change,
            "false" => Self::Keep,
            _ => Self::Unset,
        }
    }

    pub fn is_changing(self) -> bool {
        self == Self::Change
    }

    pub fn field_value(self) -> Option<&'static str> {
        match self {
            Self::Unset => None,
            Self::Keep => Some("false"),
            Self::Change => Some("true"),
        }
    }
}

pub fn compute_change_intention(password: &str, confirm: &str) -> bool {
    !password.is_empty() || !confirm.is_empty()
}

/// Hidden intent field and the two password inputs whose `required` flag follows it.
#[derive(Clone, Debug)]
pub struct ChangeIntentFields<E> {
    pub flag: Option<E>,
    pub password: E,
    pub confirm: E,
}

impl<E: Element> ChangeIntentFields<E> {
    pub fn apply(&self, intent: ChangeIntent) {
        if let (Some(flag), Some(value)) = (&self.flag, intent.field_value()) {
            flag.set_value(value);
        }
        let required = intent.is_changing();
        self.password.set_required(required);
        self.confirm.set_required(required);
    }
}
