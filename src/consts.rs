//! Global constants and configuration defaults.

use log::LevelFilter;

pub const DEFAULT_LOG_FILE: &str = "./signup.log"; // Log file used when SIGNUP_LOG_FILE is unset.
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

pub const ENV_LOG_FILE: &str = "SIGNUP_LOG_FILE";
pub const ENV_LOG_LEVEL: &str = "SIGNUP_LOG_LEVEL";
pub const ENV_RESET_ON_SUCCESS: &str = "SIGNUP_RESET_ON_SUCCESS";

/// Minimum length of the account password
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Minimum length of the optional passkey, when one is given
pub const MIN_PASSKEY_LENGTH: usize = 6;
/// Number of digits of a phone number
pub const PHONE_DIGITS: usize = 10;
