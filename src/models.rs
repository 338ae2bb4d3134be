//! Data model of the registration form

use std::borrow::Cow;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// One of the ten fields of the form, in display order.
///
/// The wire name of a field (`firstName`, `confirmPassword`, ...) is its
/// `as_ref()` / `to_string()` value and is what `str::parse` accepts.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    AsRefStr,
    strum_macros::Display,
)]
#[strum(serialize_all = "camelCase")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Phone,
    Country,
    Dob,
    Password,
    ConfirmPassword,
    Passkey,
    Terms,
}

impl Field {
    /// Human readable label shown next to the input
    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name",
            Field::LastName => "Last Name",
            Field::Email => "Email",
            Field::Phone => "Phone",
            Field::Country => "Country",
            Field::Dob => "Date of Birth",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm Password",
            Field::Passkey => "Passkey (optional)",
            Field::Terms => "Agreement",
        }
    }

    /// The kind of input control rendering this field
    pub fn input_kind(self) -> InputKind {
        match self {
            Field::FirstName | Field::LastName => InputKind::Text,
            Field::Email => InputKind::Email,
            Field::Phone => InputKind::Tel,
            Field::Country => InputKind::Select,
            Field::Dob => InputKind::Date,
            Field::Password | Field::ConfirmPassword | Field::Passkey => InputKind::Password,
            Field::Terms => InputKind::Checkbox,
        }
    }

    /// Whether the value of this field must never be written to logs or output
    pub fn is_secret(self) -> bool {
        matches!(
            self,
            Field::Password | Field::ConfirmPassword | Field::Passkey
        )
    }
}

/// Kind of input control that produced a raw value.
///
/// Only checkboxes change how the raw value is read; everything else is text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    Text,
    Email,
    Tel,
    Select,
    Date,
    Password,
    Checkbox,
}

impl InputKind {
    /// Converts the raw value of a control into a field value
    pub fn coerce(self, raw: &str) -> FieldValue {
        match self {
            InputKind::Checkbox => {
                let raw = raw.trim();
                let checked = ["true", "on", "1", "yes", "checked"]
                    .iter()
                    .any(|truthy| raw.eq_ignore_ascii_case(truthy));
                FieldValue::Flag(checked)
            }
            _ => FieldValue::Text(raw.to_owned()),
        }
    }
}

/// Value held by a single field
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl FieldValue {
    /// Textual view of the value; a flag reads as `"true"` or `""`
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Text(text) => Cow::Borrowed(text.as_str()),
            FieldValue::Flag(true) => Cow::Borrowed("true"),
            FieldValue::Flag(false) => Cow::Borrowed(""),
        }
    }

    /// Truthiness of the value; text is set when non-empty
    pub fn is_set(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.is_empty(),
            FieldValue::Flag(flag) => *flag,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

/// Current content of every field of the form.
///
/// Starts with every text empty and the terms unchecked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub dob: String,
    pub password: String,
    pub confirm_password: String,
    pub passkey: String,
    pub terms: bool,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> FieldValue {
        match self.text(field) {
            Some(text) => FieldValue::Text(text.to_owned()),
            None => FieldValue::Flag(self.terms),
        }
    }

    /// Stores a value, converting it to the type the field holds
    pub fn set(&mut self, field: Field, value: FieldValue) {
        match self.text_mut(field) {
            Some(slot) => *slot = value.as_text().into_owned(),
            None => self.terms = value.is_set(),
        }
    }

    /// Copy of these values with one field replaced
    pub fn with(&self, field: Field, value: FieldValue) -> Self {
        let mut updated = self.clone();
        updated.set(field, value);
        updated
    }

    /// Copy of these values with every secret field masked
    pub fn redacted(&self) -> Self {
        let mask = |secret: &str| "*".repeat(secret.chars().count());
        Self {
            password: mask(&self.password),
            confirm_password: mask(&self.confirm_password),
            passkey: mask(&self.passkey),
            ..self.clone()
        }
    }

    fn text(&self, field: Field) -> Option<&str> {
        let text = match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Country => &self.country,
            Field::Dob => &self.dob,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
            Field::Passkey => &self.passkey,
            Field::Terms => return None,
        };
        Some(text.as_str())
    }

    fn text_mut(&mut self, field: Field) -> Option<&mut String> {
        let text = match field {
            Field::FirstName => &mut self.first_name,
            Field::LastName => &mut self.last_name,
            Field::Email => &mut self.email,
            Field::Phone => &mut self.phone,
            Field::Country => &mut self.country,
            Field::Dob => &mut self.dob,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
            Field::Passkey => &mut self.passkey,
            Field::Terms => return None,
        };
        Some(text)
    }
}

/// Options offered by the country selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display, AsRefStr)]
pub enum Country {
    India,
    #[strum(serialize = "USA")]
    #[display("USA")]
    Usa,
    #[strum(serialize = "UK")]
    #[display("UK")]
    Uk,
}
