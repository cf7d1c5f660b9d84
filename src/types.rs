//! SharePoint Client Types and Constants
//!
//! This module defines the client configuration, the per-file properties
//! record, and the URL-computation helpers for the two server path
//! conventions used by the document library.

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::api::RemoteFile;
use crate::errors::{Result, SharePointError};

/// Default chunk size for chunked transfers (20 MB)
pub const DEFAULT_CHUNK_SIZE: u64 = 20 * 1_000_000;

/// Default number of extra attempts after the initial failure
pub const DEFAULT_RETRY_COUNT: u32 = 5;

/// Default delay before the folder-listing re-attempt and before each
/// rename retry
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Strict timestamp format the remote service reports for files
pub const REMOTE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Client configuration options
///
/// Credential fields come in two alternative pairs: `client_id`/`client_secret`
/// and `username`/`password`. When both pairs are non-empty the client pair
/// wins. Values default to the `SHAREPOINT_*` environment variables via
/// [`ClientConfig::from_env`]; explicit builder values always override them.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Account email used for user-credential authentication
    pub username: String,
    /// Account password used for user-credential authentication
    pub password: String,
    /// Application client id used for client-credential authentication
    pub client_id: String,
    /// Application client secret used for client-credential authentication
    pub client_secret: String,
    /// Full site URL, e.g. `https://example.sharepoint.com/sites/CZO_data`
    pub site_url: String,
    /// Site name component used in server-relative content URLs
    pub site_name: String,
    /// Document-library title under which folders and files live
    pub doc_library: String,
    /// Chunk size in bytes for chunked transfers
    pub chunk_size: u64,
    /// Number of retries after the initial failed attempt
    pub retry_count: u32,
    /// Fixed delay used by the listing re-attempt and the rename retries
    pub retry_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            client_id: String::new(),
            client_secret: String::new(),
            site_url: String::new(),
            site_name: String::new(),
            doc_library: String::new(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            retry_count: DEFAULT_RETRY_COUNT,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

fn env_or_empty(key: &str) -> String {
    std::env::var(key).unwrap_or_default()
}

impl ClientConfig {
    /// Creates a configuration for a site and document library
    pub fn new(
        site_url: impl Into<String>,
        site_name: impl Into<String>,
        doc_library: impl Into<String>,
    ) -> Self {
        Self {
            site_url: site_url.into(),
            site_name: site_name.into(),
            doc_library: doc_library.into(),
            ..Default::default()
        }
    }

    /// Reads every setting from the `SHAREPOINT_*` environment variables
    ///
    /// Missing variables yield empty strings; apply `with_*` builders on the
    /// result to override individual values.
    pub fn from_env() -> Self {
        Self {
            username: env_or_empty("SHAREPOINT_EMAIL"),
            password: env_or_empty("SHAREPOINT_PASSWORD"),
            client_id: env_or_empty("SHAREPOINT_CLIENT_ID"),
            client_secret: env_or_empty("SHAREPOINT_CLIENT_SECRET"),
            site_url: env_or_empty("SHAREPOINT_URL_SITE"),
            site_name: env_or_empty("SHAREPOINT_SITE_NAME"),
            doc_library: env_or_empty("SHAREPOINT_DOC_LIBRARY"),
            ..Default::default()
        }
    }

    /// Sets the user-credential pair
    pub fn with_user_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = username.into();
        self.password = password.into();
        self
    }

    /// Sets the client-credential pair
    pub fn with_client_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = client_id.into();
        self.client_secret = client_secret.into();
        self
    }

    /// Sets the chunk size in bytes
    pub fn with_chunk_size(mut self, chunk_size: u64) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Sets the retry count
    pub fn with_retry_count(mut self, count: u32) -> Self {
        self.retry_count = count;
        self
    }

    /// Sets the fixed retry delay
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Computes the library-relative URL used by listing operations:
    /// `{doc_library}/{folder}`. An empty folder addresses the library root.
    pub fn library_url(&self, folder: &str) -> String {
        format!("{}/{}", self.doc_library, folder)
    }

    /// Computes the server-relative URL used by file-content operations:
    /// `/sites/{site_name}/{doc_library}/{folder}/{name}`
    pub fn content_url(&self, folder: &str, name: &str) -> String {
        format!(
            "/sites/{}/{}/{}/{}",
            self.site_name, self.doc_library, folder, name
        )
    }

    /// Computes the server-relative URL for a library-relative target path:
    /// `/sites/{site_name}/{doc_library}/{target_path}`
    pub fn target_url(&self, target_path: &str) -> String {
        format!(
            "/sites/{}/{}/{}",
            self.site_name, self.doc_library, target_path
        )
    }
}

/// Properties of a file stored in the document library
///
/// Used only for listing and post-upload verification; never cached beyond a
/// single call. Timestamps are kept exactly as the service reports them
/// (ISO-8601, `Z`-suffixed UTC).
#[derive(Debug, Clone)]
pub struct FileProperties {
    /// Unique id of the file
    pub id: String,
    /// File name (leaf component)
    pub name: String,
    /// Major version number
    pub major_version: u32,
    /// Minor version number
    pub minor_version: u32,
    /// Byte length of the file
    pub length: u64,
    /// Creation timestamp as reported by the service
    pub time_created: String,
    /// Last-modified timestamp as reported by the service
    pub time_last_modified: String,
}

impl From<RemoteFile> for FileProperties {
    fn from(file: RemoteFile) -> Self {
        Self {
            id: file.id,
            name: file.name,
            major_version: file.major_version,
            minor_version: file.minor_version,
            length: file.length,
            time_created: file.time_created,
            time_last_modified: file.time_last_modified,
        }
    }
}

/// Parses a remote timestamp in the strict `%Y-%m-%dT%H:%M:%SZ` format
///
/// Anything else is an error; the caller decides whether that surfaces.
pub fn parse_remote_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value, REMOTE_TIMESTAMP_FORMAT)?;
    Ok(naive.and_utc())
}

/// Splits a server-relative file URL into its parent folder URL and leaf name
pub fn split_file_url(url: &str) -> Result<(&str, &str)> {
    match url.rsplit_once('/') {
        Some((folder, name)) if !name.is_empty() => Ok((folder, name)),
        _ => Err(SharePointError::InvalidPath(url.to_string())),
    }
}

/// Extracts the leaf file-name component of a path
pub fn file_name_of(path: &str) -> &str {
    path.rsplit_once('/').map_or(path, |(_, name)| name)
}
