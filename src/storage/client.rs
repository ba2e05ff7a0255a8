//! HTTP client for the hosted object-storage bucket.
//!
//! Endpoints follow the Supabase storage REST layout: objects are created
//! under `/storage/v1/object/{bucket}/{path}` and served publicly from
//! `/storage/v1/object/public/{bucket}/{path}`.

use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use thiserror::Error;

use crate::config::StorageSettings;

/// Failures of a single storage call. Terminal for that call; the caller
/// decides whether to re-try by re-submitting.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("storage returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not read {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

/// A remote object descriptor as returned by `list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteObject {
    pub name: String,
    pub size: Option<u64>,
    pub last_modified: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawObject {
    name: String,
    updated_at: Option<String>,
    metadata: Option<RawMetadata>,
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
    size: Option<u64>,
}

pub struct StorageClient {
    http: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    bucket: String,
    object_prefix: String,
}

impl StorageClient {
    pub fn new(settings: &StorageSettings) -> Result<Self, StorageError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
            bucket: settings.bucket.clone(),
            object_prefix: settings.object_prefix.trim_matches('/').to_string(),
        })
    }

    /// Upload `file` under `object_name` and return its public URL.
    /// No automatic retry, no dedup; an existing object is not replaced.
    pub fn store(&self, file: &Path, object_name: &str) -> Result<String, StorageError> {
        // Read before any network traffic: an unreadable file never
        // produces a half-made request.
        let bytes = std::fs::read(file).map_err(|source| StorageError::Read {
            path: file.to_path_buf(),
            source,
        })?;

        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            self.object_path(object_name)
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .header("cache-control", "3600")
            .header("x-upsert", "false")
            .header("content-type", "application/octet-stream")
            .body(bytes)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        Ok(self.public_url(object_name))
    }

    /// List remote objects under `prefix`. Companion call; the playback
    /// core never touches it.
    pub fn list(&self, prefix: &str) -> Result<Vec<RemoteObject>, StorageError> {
        let url = format!("{}/storage/v1/object/list/{}", self.base_url, self.bucket);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({
                "prefix": prefix,
                "limit": 100,
                "offset": 0,
            }))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Status {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let raw: Vec<RawObject> = response.json()?;
        Ok(raw
            .into_iter()
            .map(|o| RemoteObject {
                name: o.name,
                size: o.metadata.and_then(|m| m.size),
                last_modified: o.updated_at,
            })
            .collect())
    }

    /// Public URL for a stored object.
    pub fn public_url(&self, object_name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            self.object_path(object_name)
        )
    }

    fn object_path(&self, object_name: &str) -> String {
        if self.object_prefix.is_empty() {
            object_name.to_string()
        } else {
            format!("{}/{}", self.object_prefix, object_name)
        }
    }
}

/// Millisecond timestamp used for generated names and uploaded-track ids.
pub fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Object name for an upload: `{unix_millis}-{file_name}`, keeping the
/// original file name visible in the stored path.
pub fn object_name_for(file_name: &str) -> String {
    format!("{}-{}", unix_millis(), file_name)
}
