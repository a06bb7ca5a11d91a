//! Password policy for new accounts.

use docvault_core::config::AuthConfig;
use docvault_core::error::AppError;

/// Upper bound on accepted passwords, to keep hashing cost bounded.
const MAX_PASSWORD_LEN: usize = 256;

/// Validates new passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length in characters.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Returns an error describing the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let length = password.chars().count();
        if length < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }
        if length > MAX_PASSWORD_LEN {
            return Err(AppError::validation(format!(
                "Password must be at most {MAX_PASSWORD_LEN} characters long"
            )));
        }
        if password.trim().is_empty() {
            return Err(AppError::validation("Password must not be blank"));
        }
        Ok(())
    }
}
