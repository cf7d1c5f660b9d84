//! Remote Storage Capability Interface
//!
//! This module defines the boundary to the authenticated remote-storage API.
//! The client orchestrates transfers through [`RemoteApi`] and never speaks
//! the wire protocol itself; a transport crate (or a test double) supplies
//! the implementation.

use std::path::Path;

use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::Result;

/// Progress callback invoked with the cumulative byte offset after each chunk
pub type ProgressFn = dyn Fn(u64) + Send + Sync;

/// Opaque authenticated handle bound to one site + document-library pair
///
/// Created by [`RemoteApi::authenticate`] and reused across calls until the
/// owner explicitly renews it. This layer never expires or refreshes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
}

impl Session {
    /// Wraps a transport-issued token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Returns the transport token backing this session
    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Credential pair presented to [`RemoteApi::authenticate`]
#[derive(Debug, Clone)]
pub enum Credentials {
    /// Username + password
    User {
        /// Account email
        username: String,
        /// Account password
        password: String,
    },
    /// App client id + client secret
    Client {
        /// Application client id
        client_id: String,
        /// Application client secret
        client_secret: String,
    },
}

/// Handle to a file as returned by a folder listing
#[derive(Debug, Clone)]
pub struct RemoteFile {
    /// Unique id of the file
    pub id: String,
    /// File name (leaf component)
    pub name: String,
    /// Major version number
    pub major_version: u32,
    /// Minor version number
    pub minor_version: u32,
    /// Byte length
    pub length: u64,
    /// Creation timestamp, ISO-8601 `Z`-suffixed
    pub time_created: String,
    /// Last-modified timestamp, ISO-8601 `Z`-suffixed
    pub time_last_modified: String,
}

/// Result of expanding a remote folder into its files and subfolders
#[derive(Debug, Clone, Default)]
pub struct FolderListing {
    /// Files directly inside the folder
    pub files: Vec<RemoteFile>,
    /// Names of the direct subfolders
    pub folders: Vec<String>,
}

/// Capability interface of the remote storage service
///
/// Folder arguments follow two distinct URL conventions that must be passed
/// through exactly: listing calls take `{doc_library}/{folder}` while
/// content calls take `/sites/{site_name}/{doc_library}/{path}`.
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Authenticates against a site and returns a session handle
    async fn authenticate(&self, site_url: &str, credentials: &Credentials) -> Result<Session>;

    /// Expands a folder (library-relative URL) into files and subfolders
    async fn list_folder(&self, session: &Session, folder_url: &str) -> Result<FolderListing>;

    /// Returns the full binary content of a file (server-relative URL)
    async fn open_file_binary(&self, session: &Session, file_url: &str) -> Result<Bytes>;

    /// Returns the byte length of a file (server-relative URL)
    async fn file_length(&self, session: &Session, file_url: &str) -> Result<u64>;

    /// Streams a file's content into `local_path` in bounded chunks,
    /// invoking `progress` with the cumulative offset after each chunk
    async fn download_session(
        &self,
        session: &Session,
        file_url: &str,
        local_path: &Path,
        progress: &ProgressFn,
    ) -> Result<()>;

    /// Creates the folder path if absent; safe to call when already present
    async fn ensure_folder_path(&self, session: &Session, folder_url: &str) -> Result<()>;

    /// Uploads `local_path` into `folder_url` as `file_name` in chunks of
    /// `chunk_size` bytes, invoking `progress` with the cumulative offset
    /// after each uploaded chunk
    async fn create_upload_session(
        &self,
        session: &Session,
        folder_url: &str,
        file_name: &str,
        local_path: &Path,
        chunk_size: u64,
        progress: &ProgressFn,
    ) -> Result<()>;

    /// Uploads a small file's content in a single request
    async fn upload_small(
        &self,
        session: &Session,
        folder_url: &str,
        file_name: &str,
        content: &[u8],
    ) -> Result<()>;

    /// Renames a file (server-relative URL) to a new leaf name; the parent
    /// folder cannot change
    async fn rename_file(&self, session: &Session, file_url: &str, new_name: &str) -> Result<()>;

    /// Lists the items of a named document library (lists, not files)
    async fn list_library(&self, session: &Session, title: &str) -> Result<Vec<String>>;
}
