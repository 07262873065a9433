//! Form checks that run before any credentials leave the client.

use serde::Serialize;

use crate::error::ApiError;

pub const PASSWORD_MISMATCH: &str = "Passwords do not match";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
pub const MISSING_FIELDS: &str = "Please fill in all required fields";
pub const MISSING_CREDENTIALS: &str = "Email and password are required";

pub const MIN_PASSWORD_LEN: usize = 6;

/// Raw sign-up form as typed by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub department: String,
    pub faculty: String,
    pub year_of_study: String,
}

/// Body of `POST /auth/register`. Blank optional fields are sent as `null`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub department: Option<String>,
    pub faculty: Option<String>,
    pub year_of_study: Option<String>,
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl SignUpForm {
    /// Check the form and build the request. The password checks come first,
    /// in the order the form shows them.
    pub fn validate(&self) -> Result<RegisterRequest, ApiError> {
        if self.password != self.confirm_password {
            return Err(ApiError::Validation(PASSWORD_MISMATCH.into()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::Validation(PASSWORD_TOO_SHORT.into()));
        }
        let name = self.name.trim();
        let email = self.email.trim();
        if name.is_empty() || email.is_empty() {
            return Err(ApiError::Validation(MISSING_FIELDS.into()));
        }

        Ok(RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            department: optional(&self.department),
            faculty: optional(&self.faculty),
            year_of_study: optional(&self.year_of_study),
        })
    }
}

/// Sign-in only checks presence; the server judges the credentials.
pub fn validate_sign_in(email: &str, password: &str) -> Result<(), ApiError> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(ApiError::Validation(MISSING_CREDENTIALS.into()));
    }
    Ok(())
}
