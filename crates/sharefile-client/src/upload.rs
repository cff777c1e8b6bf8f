//! Standard (single request) upload: negotiate a chunk URI, then POST the file
//! to it as `multipart/form-data`.
//!
//! The whole file is read into memory before sending, so very large files are
//! bounded by available RAM.

use crate::{
    client::item_path,
    multipart::{detect_content_type, encode_file_part},
    types::UploadConfig,
    ClientError, Result, ShareFileClient,
};
use reqwest::header;
use std::path::Path;
use tracing::{debug, info, instrument};

impl ShareFileClient {
    /// Request an upload specification for `folder_id`
    #[instrument(skip(self))]
    pub async fn negotiate_upload(&self, folder_id: &str) -> Result<UploadConfig> {
        let path = format!("{}/Upload", item_path(folder_id));
        self.get_json(&path).await
    }

    /// Negotiate an upload and return the granted chunk URI
    #[instrument(skip(self))]
    pub async fn begin_upload(&self, folder_id: &str) -> Result<String> {
        let config = self.negotiate_upload(folder_id).await?;
        config.chunk_uri().map(str::to_string).ok_or_else(|| {
            ClientError::UploadNegotiation(format!(
                "no {} granted for folder {}",
                UploadConfig::CHUNK_URI,
                folder_id
            ))
        })
    }

    /// Upload the file at `local_path` into `folder_id`.
    ///
    /// Returns the HTTP status code of the chunk upload.
    #[instrument(skip(self, local_path), fields(path = %local_path.as_ref().display()))]
    pub async fn upload_file(&self, local_path: impl AsRef<Path>, folder_id: &str) -> Result<u16> {
        let local_path = local_path.as_ref();
        let chunk_uri = self.begin_upload(folder_id).await?;
        let session = self.require_session()?;

        let data = tokio::fs::read(local_path)
            .await
            .map_err(|source| ClientError::FileRead {
                path: local_path.to_path_buf(),
                source,
            })?;

        let file_name = local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let content_type = detect_content_type(local_path, &data);
        let payload = encode_file_part(&file_name, &content_type, &data);
        drop(data);

        debug!(
            "Uploading {} ({}, {} bytes encoded) to {}",
            file_name,
            content_type,
            payload.content_length(),
            chunk_uri
        );

        let response = self
            .http()
            .post(&chunk_uri)
            .header(header::AUTHORIZATION, session.authorization_header())
            .header(header::CONTENT_TYPE, payload.content_type())
            .header(header::CONTENT_LENGTH, payload.content_length())
            .body(payload.into_body())
            .send()
            .await
            .map_err(|e| ClientError::Upload {
                status: None,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Upload {
                status: Some(status.as_u16()),
                message: body,
            });
        }

        info!(status = status.as_u16(), "Uploaded {}", file_name);
        Ok(status.as_u16())
    }
}
