use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::{
    clock::Clock,
    session::{AccountIdentity, Session},
    utils::{write_atomic, PathResolver},
};
use crate::errors::LedgerError;

use super::{hash_password, verify_password, AuthError};

/// Stored account entry. Only the Argon2id hash of the password is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub email: AccountIdentity,
    pub password_hash: String,
    pub domain: String,
    pub created_at: DateTime<Utc>,
}

/// Registered accounts persisted as a JSON array in `users.json`.
pub struct CredentialStore {
    path: PathBuf,
    allowed_domain: Option<String>,
    clock: Arc<dyn Clock>,
}

impl CredentialStore {
    pub fn new(path: PathBuf, allowed_domain: Option<&str>, clock: Arc<dyn Clock>) -> Self {
        let allowed_domain = allowed_domain
            .map(|domain| domain.trim().trim_start_matches('@').to_lowercase())
            .filter(|domain| !domain.is_empty());
        Self {
            path,
            allowed_domain,
            clock,
        }
    }

    pub fn in_base(base: &Path, allowed_domain: Option<&str>, clock: Arc<dyn Clock>) -> Self {
        Self::new(PathResolver::users_file_in(base), allowed_domain, clock)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn allowed_domain(&self) -> Option<&str> {
        self.allowed_domain.as_deref()
    }

    pub fn users(&self) -> Result<Vec<UserRecord>, AuthError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path).map_err(LedgerError::from)?;
        let users = serde_json::from_str(&data).map_err(|source| LedgerError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        Ok(users)
    }

    pub fn is_registered(&self, email: &str) -> Result<bool, AuthError> {
        let Ok(identity) = AccountIdentity::parse(email) else {
            return Ok(false);
        };
        Ok(self.users()?.iter().any(|user| user.email == identity))
    }

    /// Creates an account. Checks run in order: address shape, domain
    /// restriction, duplicate registration, then the passwords.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        confirmation: &str,
    ) -> Result<AccountIdentity, AuthError> {
        let (identity, domain) = parse_email(email)?;
        if let Some(allowed) = &self.allowed_domain {
            if &domain != allowed {
                warn!(email = %identity, "registration outside allowed domain");
                return Err(AuthError::DomainNotAllowed {
                    domain: allowed.clone(),
                });
            }
        }

        let mut users = self.users()?;
        if users.iter().any(|user| user.email == identity) {
            return Err(AuthError::AlreadyRegistered(identity.to_string()));
        }
        if password.is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        if password != confirmation {
            return Err(AuthError::PasswordMismatch);
        }

        users.push(UserRecord {
            email: identity.clone(),
            password_hash: hash_password(password)?,
            domain,
            created_at: self.clock.now(),
        });
        let json = serde_json::to_string_pretty(&users).map_err(LedgerError::from)?;
        write_atomic(&self.path, &json).map_err(LedgerError::from)?;
        info!(email = %identity, "account registered");
        Ok(identity)
    }

    /// Opens a session for valid credentials. Unknown accounts and wrong
    /// passwords both yield [`AuthError::InvalidCredentials`].
    pub fn authenticate(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let Ok(identity) = AccountIdentity::parse(email) else {
            return Err(AuthError::InvalidCredentials);
        };
        let users = self.users()?;
        let Some(user) = users.iter().find(|user| user.email == identity) else {
            warn!(email = %identity, "sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        };
        if !verify_password(password, &user.password_hash)? {
            warn!(email = %identity, "sign-in rejected");
            return Err(AuthError::InvalidCredentials);
        }
        info!(email = %identity, "signed in");
        Ok(Session::new(identity, self.clock.now()))
    }
}

fn parse_email(raw: &str) -> Result<(AccountIdentity, String), AuthError> {
    let invalid = || AuthError::InvalidEmail(raw.trim().to_string());
    let identity = AccountIdentity::parse(raw).map_err(|_| invalid())?;
    let (local, domain) = identity.as_str().split_once('@').ok_or_else(invalid)?;
    let domain_ok = !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.');
    if local.is_empty() || !domain_ok {
        return Err(invalid());
    }
    let domain = domain.to_string();
    Ok((identity, domain))
}
