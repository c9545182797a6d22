use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{LedgerError, Result};

/// Normalized account key (trimmed, lowercased). Each identity owns exactly
/// one ledger document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountIdentity(String);

impl AccountIdentity {
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(LedgerError::InvalidInput(
                "account identity must not be empty".into(),
            ));
        }
        if normalized.chars().any(|c| c.is_control() || c.is_whitespace()) {
            return Err(LedgerError::InvalidInput(format!(
                "account identity `{}` contains whitespace or control characters",
                raw.trim()
            )));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Authenticated context handed to every ledger operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: Uuid,
    identity: AccountIdentity,
    started_at: DateTime<Utc>,
}

impl Session {
    pub fn new(identity: AccountIdentity, started_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity,
            started_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn identity(&self) -> &AccountIdentity {
        &self.identity
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}
