use chrono::Utc;
use reqwest::{
    multipart::{
        Form,
        Part,
    },
    Client,
    RequestBuilder,
    Response,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{
    debug,
    error,
    info,
};

use super::{
    types::{
        Credential,
        DriveFile,
        FileList,
        FileMetadata,
    },
    BACKUP_FILE_NAME,
};
use crate::core::{
    config::DriveSettings,
    http::ensure_success,
    StorageError,
};

const JSON_MIME: &str = "application/json";

/// Drive REST calls authorised by one credential.
pub struct DriveClient {
    http: Client,
    api_base: String,
    upload_base: String,
    credential: Credential,
}

impl DriveClient {
    pub fn new(http: Client, settings: &DriveSettings, credential: Credential) -> Self {
        Self {
            http,
            api_base: settings.api_base.trim_end_matches('/').to_string(),
            upload_base: settings.upload_base.trim_end_matches('/').to_string(),
            credential,
        }
    }

    /// First file named `BACKUP_FILE_NAME` that is not trashed, or `None`.
    pub async fn find_backup_file(&self) -> Result<Option<DriveFile>, StorageError> {
        let query = format!("name = '{BACKUP_FILE_NAME}' and trashed = false");
        let request = self.http.get(format!("{}/files", self.api_base)).query(&[
            ("q", query.as_str()),
            ("fields", "files(id,name,modifiedTime)"),
            ("spaces", "drive"),
        ]);

        let list: FileList = self.send(request).await?.json().await?;
        let file = list.files.into_iter().next();
        match &file {
            Some(f) => debug!(file_id = %f.id, "backup file found"),
            None => debug!("no backup file found"),
        }
        Ok(file)
    }

    /// Raw JSON content of a file, returned without any shape check.
    pub async fn download_backup_file(&self, file_id: &str) -> Result<Value, StorageError> {
        let request = self
            .http
            .get(format!("{}/files/{}", self.api_base, file_id))
            .query(&[("alt", "media")]);

        let data: Value = self.send(request).await?.json().await?;
        info!(file_id, "backup downloaded");
        Ok(data)
    }

    /// Creates the backup file, or replaces the content of `existing_file_id` in place.
    pub async fn upload_backup_file<T: Serialize>(
        &self,
        data: &T,
        existing_file_id: Option<&str>,
    ) -> Result<DriveFile, StorageError> {
        let file_content = serde_json::to_string_pretty(data)?;
        let metadata =
            serde_json::to_string(&FileMetadata { name: BACKUP_FILE_NAME, mime_type: JSON_MIME })?;

        let form = Form::new()
            .part("metadata", Part::text(metadata).mime_str(JSON_MIME)?)
            .part(
                "file",
                Part::bytes(file_content.into_bytes())
                    .file_name(BACKUP_FILE_NAME)
                    .mime_str(JSON_MIME)?,
            );

        let request = match existing_file_id {
            Some(id) => self.http.patch(format!("{}/files/{}", self.upload_base, id)),
            None => self.http.post(format!("{}/files", self.upload_base)),
        }
        .query(&[("uploadType", "multipart")])
        .multipart(form);

        let file: DriveFile = self.send(request).await?.json().await?;
        info!(file_id = %file.id, replaced = existing_file_id.is_some(), "backup uploaded");
        Ok(file)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StorageError> {
        if self.credential.is_expired_at(Utc::now()) {
            return Err(StorageError::TokenExpired);
        }

        let resp = request.bearer_auth(self.credential.access_token()).send().await?;
        ensure_success(resp).await.map_err(|(status, body)| {
            error!(status, %body, "Drive request failed");
            StorageError::Http { status, body }
        })
    }
}
