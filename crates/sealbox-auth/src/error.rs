//! Authentication error types.

use sealbox_core::error::SealboxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email and wrong password share one variant; the two
    /// cases are indistinguishable to a caller.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email is already registered")]
    EmailTaken,

    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("invalid email address")]
    InvalidEmail,

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for SealboxError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => SealboxError::AuthenticationFailed {
                reason: err.to_string(),
            },
            AuthError::EmailTaken => SealboxError::AlreadyExists {
                entity: "user".into(),
            },
            AuthError::PasswordTooShort { .. } | AuthError::InvalidEmail => {
                SealboxError::Validation {
                    message: err.to_string(),
                }
            }
            AuthError::Crypto(msg) => SealboxError::Crypto(msg),
        }
    }
}
