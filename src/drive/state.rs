use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{
    info,
    warn,
};

use super::{
    api::DriveClient,
    auth::{
        PendingConsent,
        TokenClient,
    },
    types::{
        AuthSession,
        Credential,
        DriveFile,
        SessionState,
    },
};
use crate::core::{
    config::DriveSettings,
    AuthError,
    BackupSnapshot,
    StorageError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupState {
    Uninitialized,
    TokenClientReady,
    AwaitingConsent,
    Authenticated,
    Located(DriveFile),
    Idle,
    SessionExpired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Authenticated,
    Located(DriveFile),
    Idle,
}

/// Backup flow: identity setup, login, then locate / download / upload-or-replace.
pub struct BackupClient {
    http: Client,
    settings: DriveSettings,
    token_client: Option<TokenClient>,
    session: AuthSession,
    phase: Phase,
    remote: Option<DriveFile>,
}

impl BackupClient {
    pub fn new(http: Client, settings: DriveSettings) -> Self {
        Self {
            http,
            settings,
            token_client: None,
            session: AuthSession::default(),
            phase: Phase::Authenticated,
            remote: None,
        }
    }

    pub fn state(&self) -> BackupState {
        if self.token_client.is_none() {
            return BackupState::Uninitialized;
        }
        match self.session.state() {
            SessionState::Unset => BackupState::TokenClientReady,
            SessionState::Pending => BackupState::AwaitingConsent,
            SessionState::Expired => BackupState::SessionExpired,
            SessionState::Valid => match &self.phase {
                Phase::Authenticated => BackupState::Authenticated,
                Phase::Located(file) => BackupState::Located(file.clone()),
                Phase::Idle => BackupState::Idle,
            },
        }
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    /// Last file located or written during this session.
    pub fn remote_file(&self) -> Option<&DriveFile> {
        self.remote.as_ref()
    }

    pub async fn initialize(&mut self) -> Result<(), AuthError> {
        if self.token_client.is_some() {
            return Ok(());
        }
        let token_client = TokenClient::initialize(self.http.clone(), &self.settings).await?;
        self.token_client = Some(token_client);
        Ok(())
    }

    /// Opens the consent request, initialising first when needed.
    pub async fn begin_login(&mut self) -> Result<PendingConsent, AuthError> {
        if self.token_client.is_none() {
            self.initialize().await?;
        }
        let token_client = self.token_client.as_ref().ok_or(AuthError::NotInitialized)?;

        let pending = token_client.request_access_token().await?;
        self.session.begin();
        Ok(pending)
    }

    pub fn finish_login(&mut self, result: Result<Credential, AuthError>) -> Result<(), AuthError> {
        match result {
            Ok(credential) => {
                self.session.complete(credential);
                self.phase = Phase::Authenticated;
                self.remote = None;
                info!("signed in to Google Drive");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "sign-in failed");
                self.session.reset();
                Err(err)
            }
        }
    }

    /// Full interactive login. `on_consent` receives the URL the user must visit.
    pub async fn login(&mut self, on_consent: impl FnOnce(&str)) -> Result<(), AuthError> {
        let pending = self.begin_login().await?;
        on_consent(pending.authorize_url());
        let result = pending.wait_for_token().await;
        self.finish_login(result)
    }

    pub fn sign_out(&mut self) {
        self.session.reset();
        self.phase = Phase::Authenticated;
        self.remote = None;
    }

    fn drive(&self) -> Result<DriveClient, StorageError> {
        let credential = self.session.credential()?.clone();
        Ok(DriveClient::new(self.http.clone(), &self.settings, credential))
    }

    pub async fn locate(&mut self) -> Result<Option<DriveFile>, StorageError> {
        let file = self.drive()?.find_backup_file().await?;
        self.phase = match &file {
            Some(f) => Phase::Located(f.clone()),
            None => Phase::Authenticated,
        };
        self.remote = file.clone();
        Ok(file)
    }

    pub async fn download(&mut self, file_id: &str) -> Result<Value, StorageError> {
        let data = self.drive()?.download_backup_file(file_id).await?;
        self.phase = Phase::Idle;
        Ok(data)
    }

    pub async fn upload<T: Serialize>(
        &mut self,
        data: &T,
        existing_file_id: Option<&str>,
    ) -> Result<DriveFile, StorageError> {
        let file = self.drive()?.upload_backup_file(data, existing_file_id).await?;
        self.phase = Phase::Idle;
        self.remote = Some(file.clone());
        Ok(file)
    }

    /// Locates first so a retried save replaces the existing file instead of adding one.
    pub async fn back_up(&mut self, snapshot: &BackupSnapshot) -> Result<DriveFile, StorageError> {
        let existing = self.locate().await?;
        self.upload(snapshot, existing.as_ref().map(|f| f.id.as_str())).await
    }

    /// `Ok(None)` when no backup exists yet.
    pub async fn restore(&mut self) -> Result<Option<BackupSnapshot>, StorageError> {
        let Some(file) = self.locate().await? else {
            return Ok(None);
        };
        let data = self.download(&file.id).await?;
        parse_snapshot(data).map(Some)
    }
}

pub fn parse_snapshot(data: Value) -> Result<BackupSnapshot, StorageError> {
    serde_json::from_value(data).map_err(|e| StorageError::InvalidSnapshot(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_client_is_uninitialized() {
        let client = BackupClient::new(Client::new(), DriveSettings::default());
        assert_eq!(client.state(), BackupState::Uninitialized);
        assert!(client.remote_file().is_none());
    }

    #[tokio::test]
    async fn drive_calls_without_token_fail_immediately() {
        let mut client = BackupClient::new(Client::new(), DriveSettings::default());
        assert!(matches!(client.locate().await, Err(StorageError::NotAuthenticated)));
        assert!(matches!(
            client.upload(&serde_json::json!({}), None).await,
            Err(StorageError::NotAuthenticated)
        ));
    }

    #[test]
    fn failed_login_resets_session() {
        let mut client = BackupClient::new(Client::new(), DriveSettings::default());
        let err = client.finish_login(Err(AuthError::ConsentDenied("access_denied".to_string())));
        assert!(err.is_err());
        assert!(matches!(client.session(), AuthSession::Unset));
    }

    #[test]
    fn snapshot_parse_rejects_other_documents() {
        assert!(matches!(
            parse_snapshot(serde_json::json!({ "files": [] })),
            Err(StorageError::InvalidSnapshot(_))
        ));
        let snapshot = parse_snapshot(serde_json::json!({ "words": [] })).unwrap();
        assert!(snapshot.words.is_empty());
    }
}
