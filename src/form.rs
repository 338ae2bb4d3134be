//! Form state controller.
//!
//! The state of a form session is a single [`FormState`] record. Each user
//! interaction is a [`FormEvent`], and [`FormState::apply`] maps the current
//! state and an event to the next state without touching the original.
//! [`FormController`] owns the current state and exposes the operations used
//! by the front-end.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, info, warn};
use strum::IntoEnumIterator;

use crate::models::{Field, FieldValue, FormValues, InputKind};
use crate::utils::input_validation::{validate_field, FieldError};

/// Fields whose validation reads another field, keyed by the field they read.
///
/// When a key field changes, every dependent that was already touched is
/// validated again against the new snapshot.
static DEPENDENT_FIELDS: &[(Field, &[Field])] = &[(Field::Password, &[Field::ConfirmPassword])];

/// Fields to validate again when `field` changes
pub fn dependents_of(field: Field) -> &'static [Field] {
    DEPENDENT_FIELDS
        .iter()
        .find(|(source, _)| *source == field)
        .map(|(_, dependents)| *dependents)
        .unwrap_or(&[])
}

/// A user interaction with the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// The content of a field was edited
    Change {
        name: String,
        raw: String,
        kind: InputKind,
    },
    /// A field lost the focus
    Blur {
        name: String,
        raw: String,
        kind: InputKind,
    },
    /// The submit button was pressed
    Submit,
}

/// Result of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Every field is valid; holds the submitted values
    Accepted(FormValues),
    /// Some fields are invalid; holds how many
    Rejected(usize),
}

/// Complete state of a form session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    values: FormValues,
    touched: BTreeSet<Field>,
    errors: BTreeMap<Field, FieldError>,
    submit_attempted: bool,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes the state following `event`
    pub fn apply(&self, event: &FormEvent) -> FormState {
        let mut next = self.clone();
        match event {
            FormEvent::Change { name, raw, kind } => {
                if let Some(field) = known_field(name) {
                    next.change(field, kind.coerce(raw));
                }
            }
            FormEvent::Blur { name, raw, kind } => {
                if let Some(field) = known_field(name) {
                    next.blur(field, kind.coerce(raw));
                }
            }
            FormEvent::Submit => next.submit(),
        }
        next
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Stored error of a field, visible or not
    pub fn error(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// Whether the message of `field` must be shown
    pub fn is_error_visible(&self, field: Field) -> bool {
        self.errors.contains_key(&field) && (self.is_touched(field) || self.submit_attempted)
    }

    /// Errors to display, in form order
    pub fn visible_errors(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.errors
            .iter()
            .filter(|(field, _)| self.is_error_visible(**field))
            .map(|(field, error)| (*field, *error))
    }

    /// Whether no error is currently stored
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn change(&mut self, field: Field, value: FieldValue) {
        self.values.set(field, value);
        self.touched.insert(field);
        self.revalidate(field);

        for &dependent in dependents_of(field) {
            if self.is_touched(dependent) {
                debug!("Revalidating {dependent} after a change of {field}");
                self.revalidate(dependent);
            }
        }
    }

    // Validates the blurred value against the stored values; the value itself
    // is not stored.
    fn blur(&mut self, field: Field, value: FieldValue) {
        self.touched.insert(field);
        let result = validate_field(field, &value, &self.values);
        self.record(field, result);
    }

    fn submit(&mut self) {
        self.submit_attempted = true;
        self.touched.extend(Field::iter());
        self.validate_all();
    }

    /// Validates every field against the stored values, replacing all errors
    fn validate_all(&mut self) -> bool {
        self.errors = Field::iter()
            .filter_map(|field| {
                validate_field(field, &self.values.get(field), &self.values)
                    .err()
                    .map(|error| (field, error))
            })
            .collect();
        self.is_valid()
    }

    fn revalidate(&mut self, field: Field) {
        let result = validate_field(field, &self.values.get(field), &self.values);
        self.record(field, result);
    }

    fn record(&mut self, field: Field, result: Result<(), FieldError>) {
        match result {
            Ok(()) => {
                self.errors.remove(&field);
            }
            Err(error) => {
                self.errors.insert(field, error);
            }
        }
    }
}

fn known_field(name: &str) -> Option<Field> {
    match name.parse() {
        Ok(field) => Some(field),
        Err(_) => {
            warn!("Ignoring event on unknown field {name:?}");
            None
        }
    }
}

/// Behaviour of the controller after a successful submission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormOptions {
    /// Start a pristine form once a submission is accepted
    pub reset_on_success: bool,
}

/// Owner of the state of one form session
#[derive(Debug, Default)]
pub struct FormController {
    state: FormState,
    options: FormOptions,
}

impl FormController {
    pub fn new(options: FormOptions) -> Self {
        Self {
            state: FormState::new(),
            options,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn options(&self) -> FormOptions {
        self.options
    }

    pub fn values(&self) -> &FormValues {
        self.state.values()
    }

    pub fn on_field_change(&mut self, name: &str, raw: &str, kind: InputKind) {
        debug!("Change on {name}");
        self.dispatch(FormEvent::Change {
            name: name.to_owned(),
            raw: raw.to_owned(),
            kind,
        });
    }

    pub fn on_field_blur(&mut self, name: &str, raw: &str, kind: InputKind) {
        debug!("Blur on {name}");
        self.dispatch(FormEvent::Blur {
            name: name.to_owned(),
            raw: raw.to_owned(),
            kind,
        });
    }

    /// Validates every field, replacing all errors, and tells whether the
    /// form is valid
    pub fn validate_all(&mut self) -> bool {
        self.state.validate_all()
    }

    /// Attempts a submission.
    ///
    /// From now on every error is shown. On success the submitted values are
    /// returned and, if configured, the form goes back to its pristine state.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.dispatch(FormEvent::Submit);

        if !self.state.is_valid() {
            let failing = self.state.errors.len();
            info!("Submission rejected, {failing} invalid field(s)");
            return SubmitOutcome::Rejected(failing);
        }

        let submitted = self.state.values.clone();
        info!("Form submitted successfully");
        if self.options.reset_on_success {
            debug!("Resetting the form");
            self.state = FormState::new();
        }
        SubmitOutcome::Accepted(submitted)
    }

    pub fn is_error_visible(&self, name: &str) -> bool {
        name.parse()
            .map(|field| self.state.is_error_visible(field))
            .unwrap_or(false)
    }

    /// Stored message of a field, empty when it is valid or unknown
    pub fn error(&self, name: &str) -> String {
        name.parse()
            .ok()
            .and_then(|field| self.state.error(field))
            .map(|error| error.to_string())
            .unwrap_or_default()
    }

    pub fn visible_errors(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.state.visible_errors()
    }

    fn dispatch(&mut self, event: FormEvent) {
        self.state = self.state.apply(&event);
    }
}
