//! Validation rules of every form field.
//!
//! Each rule is a pure function of the field value and, for cross-field
//! checks, the snapshot of the whole form. Failures are reported as a
//! [`FieldError`] whose `Display` is the message shown under the input.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::consts::{MIN_PASSKEY_LENGTH, MIN_PASSWORD_LENGTH, PHONE_DIGITS};
use crate::models::{Field, FieldValue, FormValues};

// Whitespace as understood by browsers: `\s` and `trim` in form scripts.
// Includes U+FEFF, excludes U+0085.
const WHITESPACE_CLASS: &str =
    r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

// Regex for email: something@something.something, no spaces and no extra '@'
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    let part = format!("[^{WHITESPACE_CLASS}@]+");
    Regex::new(&format!(r"^{part}@{part}\.{part}$")).expect("Failed to compile email regex")
});

// Regex for phone numbers, ASCII digits only
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^[0-9]{{{PHONE_DIGITS}}}$")).expect("Failed to compile phone regex")
});

/// A validation failure on a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum FieldError {
    #[error("First name is required")]
    FirstNameRequired,

    #[error("Last name is required")]
    LastNameRequired,

    #[error("Email is required")]
    EmailRequired,

    #[error("Invalid email (e.g., you@site.com)")]
    EmailInvalid,

    #[error("Phone is required")]
    PhoneRequired,

    #[error("Phone must be 10 digits")]
    PhoneInvalid,

    #[error("Please select a country")]
    CountryRequired,

    #[error("Date of birth is required")]
    DobRequired,

    #[error("Password is required")]
    PasswordRequired,

    #[error("Password must be at least 8 characters")]
    PasswordTooShort,

    #[error("Confirm password is required")]
    ConfirmPasswordRequired,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Passkey should be 6+ characters")]
    PasskeyTooShort,

    #[error("You must accept the terms")]
    TermsNotAccepted,
}

/// Validates `value` as the content of `field`.
///
/// `snapshot` is the whole form and is only read by cross-field rules; it is
/// authoritative, so the value of `field` itself inside it is ignored.
pub fn validate_field(
    field: Field,
    value: &FieldValue,
    snapshot: &FormValues,
) -> Result<(), FieldError> {
    let text = value.as_text();
    let text: &str = &text;

    match field {
        Field::FirstName => required_trimmed(text, FieldError::FirstNameRequired),
        Field::LastName => required_trimmed(text, FieldError::LastNameRequired),
        Field::Email => email_validation(text),
        Field::Phone => phone_validation(text),
        Field::Country => required(text, FieldError::CountryRequired),
        Field::Dob => required(text, FieldError::DobRequired),
        Field::Password => password_validation(text),
        Field::ConfirmPassword => confirm_password_validation(text, &snapshot.password),
        Field::Passkey => passkey_validation(text),
        Field::Terms => {
            if value.is_set() {
                Ok(())
            } else {
                Err(FieldError::TermsNotAccepted)
            }
        }
    }
}

/// Validates a field given by name and returns the message to display.
///
/// An empty string means the value is valid. Unknown names are always valid.
pub fn validate(name: &str, value: &FieldValue, snapshot: &FormValues) -> String {
    let Ok(field) = name.parse::<Field>() else {
        return String::new();
    };

    match validate_field(field, value, snapshot) {
        Ok(()) => String::new(),
        Err(error) => error.to_string(),
    }
}

fn required(text: &str, error: FieldError) -> Result<(), FieldError> {
    if text.is_empty() {
        Err(error)
    } else {
        Ok(())
    }
}

fn required_trimmed(text: &str, error: FieldError) -> Result<(), FieldError> {
    required(text.trim_matches(is_form_whitespace), error)
}

fn is_form_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{0B}' | '\u{0C}' | '\r' | ' '
            | '\u{A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

/// Length of a text in UTF-16 code units, the way browsers count it
fn text_length(text: &str) -> usize {
    text.encode_utf16().count()
}

fn email_validation(email: &str) -> Result<(), FieldError> {
    required(email, FieldError::EmailRequired)?;

    if EMAIL_REGEX.is_match(email) {
        Ok(())
    } else {
        Err(FieldError::EmailInvalid)
    }
}

fn phone_validation(phone: &str) -> Result<(), FieldError> {
    required(phone, FieldError::PhoneRequired)?;

    if PHONE_REGEX.is_match(phone) {
        Ok(())
    } else {
        Err(FieldError::PhoneInvalid)
    }
}

fn password_validation(password: &str) -> Result<(), FieldError> {
    required(password, FieldError::PasswordRequired)?;

    if text_length(password) < MIN_PASSWORD_LENGTH {
        return Err(FieldError::PasswordTooShort);
    }
    Ok(())
}

fn confirm_password_validation(confirmation: &str, password: &str) -> Result<(), FieldError> {
    required(confirmation, FieldError::ConfirmPasswordRequired)?;

    if confirmation != password {
        return Err(FieldError::PasswordMismatch);
    }
    Ok(())
}

// The passkey is optional, it is only checked once something was typed
fn passkey_validation(passkey: &str) -> Result<(), FieldError> {
    if !passkey.is_empty() && text_length(passkey) < MIN_PASSKEY_LENGTH {
        return Err(FieldError::PasskeyTooShort);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn text(value: &str) -> FieldValue {
        FieldValue::Text(value.to_string())
    }

    fn check(name: &str, value: &str) -> String {
        validate(name, &text(value), &FormValues::default())
    }

    mod required_tests {
        use super::*;

        #[test]
        fn test_empty_values_are_required() {
            let expected = vec![
                (Field::FirstName, "First name is required"),
                (Field::LastName, "Last name is required"),
                (Field::Email, "Email is required"),
                (Field::Phone, "Phone is required"),
                (Field::Country, "Please select a country"),
                (Field::Dob, "Date of birth is required"),
                (Field::Password, "Password is required"),
                (Field::ConfirmPassword, "Confirm password is required"),
                (Field::Passkey, ""),
                (Field::Terms, "You must accept the terms"),
            ];

            let empty = FormValues::default();
            for (field, message) in expected {
                let value = empty.get(field);
                assert_eq!(
                    validate(field.as_ref(), &value, &empty),
                    message,
                    "Unexpected message for empty {}",
                    field
                );
            }
        }

        #[test]
        fn test_every_field_covered() {
            let empty = FormValues::default();
            let failing = Field::iter()
                .filter(|&f| validate_field(f, &empty.get(f), &empty).is_err())
                .count();
            assert_eq!(failing, 9);
        }

        #[test]
        fn test_names_are_trimmed() {
            for blank in vec![" ", "\t", "  \n  "] {
                assert_eq!(check("firstName", blank), "First name is required");
                assert_eq!(check("lastName", blank), "Last name is required");
            }
            assert_eq!(check("firstName", " Ada "), "");
            assert_eq!(check("lastName", "Lovelace"), "");
        }

        #[test]
        fn test_browser_whitespace_set() {
            for blank in vec!["\u{FEFF}", "\u{A0}", " \u{3000} ", "\u{2028}"] {
                assert_eq!(check("firstName", blank), "First name is required", "{:?}", blank);
            }
            // NEL is not whitespace for a browser
            assert_eq!(check("lastName", "\u{85}"), "");
        }

        #[test]
        fn test_other_fields_are_not_trimmed() {
            assert_eq!(check("country", " "), "");
            assert_eq!(check("dob", " "), "");
            assert_eq!(check("email", " "), "Invalid email (e.g., you@site.com)");
        }
    }

    mod email_tests {
        use super::*;

        #[test]
        fn test_valid_email() {
            let valid_cases = vec![
                "a@b.com",
                "you@site.com",
                "first.last@sub.domain.org",
                "x+y@d.io",
                "a\u{85}@b.com", // NEL is not whitespace for a browser
            ];

            for email in valid_cases {
                assert_eq!(check("email", email), "", "Valid email {} was rejected !", email);
            }
        }

        #[test]
        fn test_invalid_email() {
            let invalid_cases = vec![
                "abc",
                "abc@",
                "@site.com",
                "you@site",
                "you@@site.com",
                "you @site.com",
                "you@site.",
                "you@.com",
                "a\u{FEFF}@b.com",
                "a@b\u{A0}c.com",
            ];

            for email in invalid_cases {
                assert_eq!(
                    check("email", email),
                    "Invalid email (e.g., you@site.com)",
                    "Invalid email {} was approved !",
                    email
                );
            }
        }
    }

    mod phone_tests {
        use super::*;

        #[test]
        fn test_valid_phone() {
            assert_eq!(check("phone", "1234567890"), "");
            assert_eq!(check("phone", "0000000000"), "");
        }

        #[test]
        fn test_invalid_phone() {
            let invalid_cases = vec![
                "12345",
                "12345678901",
                "123456789a",
                "123-456-7890",
                " 1234567890",
                "１２３４５６７８９０", // full-width digits
            ];

            for phone in invalid_cases {
                assert_eq!(
                    check("phone", phone),
                    "Phone must be 10 digits",
                    "Invalid phone {} was approved !",
                    phone
                );
            }
        }
    }

    mod password_tests {
        use super::*;

        #[test]
        fn test_password_length_boundaries() {
            assert_eq!(check("password", "short"), "Password must be at least 8 characters");
            assert_eq!(check("password", "1234567"), "Password must be at least 8 characters");
            assert_eq!(check("password", "12345678"), "");
            assert_eq!(check("password", "longenough1"), "");
        }

        #[test]
        fn test_password_counts_utf16_units() {
            let test_cases = vec![
                // (password, expected message)
                ("ééééééé", "Password must be at least 8 characters"), // 7 units, 14 bytes
                ("éééééééé", ""),
                ("😀😀😀", "Password must be at least 8 characters"), // 6 units
                ("😀😀😀😀", ""),                                      // 8 units
                ("abcdef😀", ""),
            ];

            for (password, expected) in test_cases {
                assert_eq!(check("password", password), expected, "Password {:?}", password);
            }
        }

        #[test]
        fn test_confirm_password() {
            let snapshot = FormValues {
                password: "y".to_string(),
                ..FormValues::default()
            };

            assert_eq!(
                validate("confirmPassword", &text("x"), &snapshot),
                "Passwords do not match"
            );
            assert_eq!(validate("confirmPassword", &text("y"), &snapshot), "");
            assert_eq!(
                validate("confirmPassword", &text(""), &snapshot),
                "Confirm password is required"
            );
        }

        #[test]
        fn test_confirm_password_uses_snapshot_only() {
            // The confirmation stored in the snapshot is not consulted
            let snapshot = FormValues {
                password: "secret123".to_string(),
                confirm_password: "other".to_string(),
                ..FormValues::default()
            };
            assert_eq!(validate("confirmPassword", &text("secret123"), &snapshot), "");
        }

        #[test]
        fn test_passkey() {
            assert_eq!(check("passkey", ""), "");
            assert_eq!(check("passkey", "12345"), "Passkey should be 6+ characters");
            assert_eq!(check("passkey", "123456"), "");
            assert_eq!(check("passkey", "😀😀"), "Passkey should be 6+ characters");
            assert_eq!(check("passkey", "😀😀😀"), "");
        }
    }

    #[test]
    fn test_terms() {
        let empty = FormValues::default();
        assert_eq!(validate("terms", &FieldValue::Flag(false), &empty), "You must accept the terms");
        assert_eq!(validate("terms", &FieldValue::Flag(true), &empty), "");
    }

    #[test]
    fn test_unknown_field_is_valid() {
        for name in vec!["", "username", "FirstName", "showPassword"] {
            assert_eq!(check(name, ""), "", "Unknown field {} produced an error", name);
        }
    }

    #[test]
    fn test_typed_errors() {
        let empty = FormValues::default();
        assert_eq!(
            validate_field(Field::Email, &text("abc"), &empty),
            Err(FieldError::EmailInvalid)
        );
        assert_eq!(validate_field(Field::Phone, &text("1234567890"), &empty), Ok(()));
    }
}
