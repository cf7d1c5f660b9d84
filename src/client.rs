//! SharePoint Client
//!
//! Main client struct for synchronizing files with a SharePoint document
//! library through a remote-storage transport.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;

use crate::api::{RemoteApi, RemoteFile, Session};
use crate::errors::{Result, SharePointError};
use crate::operations::Operations;
use crate::session::SessionManager;
use crate::types::{ClientConfig, FileProperties};

/// Client for one site + document-library pair
///
/// The client holds the credentials and a lazily established session, and
/// orchestrates chunked transfers with verification and bounded retries.
/// Progress state lives inside each transfer call, so one client instance
/// supports one transfer at a time; use one instance per concurrent
/// transfer.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use sharepoint::{ClientConfig, SharePoint};
///
/// let config = ClientConfig::from_env();
/// let api = Arc::new(my_transport::SharePointTransport::new());
/// let client = SharePoint::new(api, config)?;
/// client.upload_file("flux.dat".as_ref(), "Bahada/Tower/flux.dat").await?;
/// ```
pub struct SharePoint {
    config: ClientConfig,
    sessions: Arc<SessionManager>,
    ops: Operations,
}

impl SharePoint {
    /// Creates a new client over the given transport and configuration
    ///
    /// No session is established yet; that happens lazily on the first
    /// operation, or explicitly via [`connect`](Self::connect).
    pub fn new(api: Arc<dyn RemoteApi>, config: ClientConfig) -> Result<Self> {
        Self::validate_config(&config)?;
        let sessions = Arc::new(SessionManager::new(api.clone(), &config));
        let ops = Operations::new(api, sessions.clone(), config.clone());
        Ok(Self {
            config,
            sessions,
            ops,
        })
    }

    fn validate_config(config: &ClientConfig) -> Result<()> {
        if config.site_url.is_empty() {
            return Err(SharePointError::InvalidArgument(
                "site URL is required".to_string(),
            ));
        }
        if config.doc_library.is_empty() {
            return Err(SharePointError::InvalidArgument(
                "document library is required".to_string(),
            ));
        }
        if config.chunk_size == 0 {
            return Err(SharePointError::InvalidArgument(
                "chunk size must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Ensures an authenticated session exists, renewing it when asked
    ///
    /// Without `force_renew` this is idempotent and returns the cached
    /// session unchanged.
    pub async fn connect(&self, force_renew: bool) -> Result<Session> {
        self.sessions.connect(force_renew).await
    }

    /// Returns whether a session is currently held
    pub async fn is_connected(&self) -> bool {
        self.sessions.has_session().await
    }

    /// Lists the files directly inside a remote folder
    pub async fn list_files(&self, folder: &str) -> Result<Vec<RemoteFile>> {
        self.ops.list_files(folder).await
    }

    /// Lists the names of a remote folder's direct subfolders
    pub async fn list_folders(&self, folder: &str) -> Result<Vec<String>> {
        self.ops.list_folders(folder).await
    }

    /// Lists per-file properties of a remote folder; never fails, returns
    /// an empty vector after one delayed re-attempt
    pub async fn list_file_properties(&self, folder: &str) -> Vec<FileProperties> {
        self.ops.list_file_properties(folder).await
    }

    /// Finds one file's properties by exact name match
    pub async fn get_file_properties(
        &self,
        file_name: &str,
        folder: &str,
    ) -> Option<FileProperties> {
        self.ops.get_file_properties(file_name, folder).await
    }

    /// Downloads a small file's full content in one request
    pub async fn download_file(&self, file_name: &str, folder: &str) -> Result<Bytes> {
        self.ops.download_file(file_name, folder).await
    }

    /// Streams a large remote file into a local file with progress reporting
    pub async fn download_to_file(
        &self,
        file_name: &str,
        folder: &str,
        local_path: &Path,
    ) -> Result<()> {
        self.ops.download_to_file(file_name, folder, local_path).await
    }

    /// Downloads the most recently modified file of a folder, returning its
    /// name and content
    pub async fn download_latest_file(&self, folder: &str) -> Result<(String, Bytes)> {
        self.ops.download_latest_file(folder).await
    }

    /// Uploads a local file to a library-relative target path in chunks,
    /// with folder auto-creation, size verification, and bounded retries
    pub async fn upload_file(&self, local_path: &Path, target_path: &str) -> Result<()> {
        self.ops.upload_file(local_path, target_path).await
    }

    /// Uploads a small content buffer in a single request
    pub async fn upload_buffer(&self, file_name: &str, folder: &str, content: &[u8]) -> Result<()> {
        self.ops.upload_buffer(file_name, folder, content).await
    }

    /// Renames a remote file to the destination path's leaf name, with the
    /// same bounded retry policy as upload plus a delay before each retry
    pub async fn rename_file(&self, source_path: &str, dest_path: &str) -> Result<()> {
        self.ops.rename_file(source_path, dest_path).await
    }

    /// Lists the items of a named document library
    pub async fn list_library_items(&self, title: &str) -> Result<Vec<String>> {
        self.ops.list_library_items(title).await
    }
}
