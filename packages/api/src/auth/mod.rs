//! Session lifecycle: sign in, sign up, sign out, profile updates and passive
//! re-validation of a stored token.

mod manager;
mod validation;

pub use manager::{
    AuthOutcome, Notice, SessionManager, SignOutOutcome, SIGNED_IN, SIGNED_OUT, SIGNED_UP,
};
pub use validation::{
    validate_sign_in, RegisterRequest, SignUpForm, MIN_PASSWORD_LEN, MISSING_CREDENTIALS,
    MISSING_FIELDS, PASSWORD_MISMATCH, PASSWORD_TOO_SHORT,
};
