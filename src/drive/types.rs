use std::fmt;

use chrono::{
    DateTime,
    Duration,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::core::StorageError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriveFile {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub modified_time: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FileMetadata<'a> {
    pub name: &'a str,
    pub mime_type: &'a str,
}

/// A bearer token and when it stops being usable. Never refreshed.
#[derive(Clone)]
pub struct Credential {
    access_token: String,
    scope: Option<String>,
    expires_at: DateTime<Utc>,
}

impl Credential {
    pub fn new(
        access_token: impl Into<String>,
        scope: Option<String>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self { access_token: access_token.into(), scope, expires_at }
    }

    pub fn expiring_in(access_token: impl Into<String>, seconds: i64) -> Self {
        Self::new(access_token, None, Utc::now() + Duration::seconds(seconds))
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_token", &"<redacted>")
            .field("scope", &self.scope)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unset,
    Pending,
    Valid,
    Expired,
}

/// Explicit token lifecycle: unset -> pending -> valid -> expired.
#[derive(Debug, Clone, Default)]
pub enum AuthSession {
    #[default]
    Unset,
    Pending,
    Active(Credential),
}

impl AuthSession {
    pub fn state_at(&self, now: DateTime<Utc>) -> SessionState {
        match self {
            AuthSession::Unset => SessionState::Unset,
            AuthSession::Pending => SessionState::Pending,
            AuthSession::Active(credential) if credential.is_expired_at(now) => {
                SessionState::Expired
            }
            AuthSession::Active(_) => SessionState::Valid,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state_at(Utc::now())
    }

    pub fn begin(&mut self) {
        *self = AuthSession::Pending;
    }

    pub fn complete(&mut self, credential: Credential) {
        *self = AuthSession::Active(credential);
    }

    pub fn reset(&mut self) {
        *self = AuthSession::Unset;
    }

    pub fn credential_at(&self, now: DateTime<Utc>) -> Result<&Credential, StorageError> {
        match self {
            AuthSession::Active(credential) if credential.is_expired_at(now) => {
                Err(StorageError::TokenExpired)
            }
            AuthSession::Active(credential) => Ok(credential),
            AuthSession::Unset | AuthSession::Pending => Err(StorageError::NotAuthenticated),
        }
    }

    pub fn credential(&self) -> Result<&Credential, StorageError> {
        self.credential_at(Utc::now())
    }
}
