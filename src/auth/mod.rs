//! Account registration and sign-in backed by a local credential file.

mod credentials;
mod password;

pub use credentials::{CredentialStore, UserRecord};
pub use password::{hash_password, verify_password, PasswordError};

use thiserror::Error;

use crate::errors::LedgerError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("`{0}` is not a valid email address")]
    InvalidEmail(String),
    #[error("registration is restricted to @{domain} addresses")]
    DomainNotAllowed { domain: String },
    #[error("`{0}` is already registered")]
    AlreadyRegistered(String),
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error(transparent)]
    Password(#[from] PasswordError),
    #[error(transparent)]
    Storage(#[from] LedgerError),
}
