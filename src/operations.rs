//! SharePoint Operations
//!
//! This module implements the metadata accessor, the transfer engine
//! (whole-file and chunked upload/download with post-upload verification
//! and bounded retries), and the retryable rename operation.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tokio::time::sleep;

use crate::api::{FolderListing, RemoteApi, RemoteFile, Session};
use crate::elapsed::ElapsedTime;
use crate::errors::{Result, SharePointError};
use crate::progress::ProgressReporter;
use crate::session::SessionManager;
use crate::types::{
    file_name_of, parse_remote_timestamp, split_file_url, ClientConfig, FileProperties,
};

/// Handles all document-library operations
///
/// This struct is used internally by the client facade.
pub struct Operations {
    api: Arc<dyn RemoteApi>,
    sessions: Arc<SessionManager>,
    config: ClientConfig,
}

impl Operations {
    /// Creates a new operations handler
    pub fn new(api: Arc<dyn RemoteApi>, sessions: Arc<SessionManager>, config: ClientConfig) -> Self {
        Self {
            api,
            sessions,
            config,
        }
    }

    async fn expand_folder(&self, folder: &str) -> Result<FolderListing> {
        let session = self.sessions.connect(false).await?;
        let folder_url = self.config.library_url(folder);
        match self.api.list_folder(&session, &folder_url).await {
            Ok(listing) => Ok(listing),
            Err(e) => {
                tracing::error!("not possible to list {folder_url}: {e}");
                Err(e)
            }
        }
    }

    /// Lists the files directly inside a remote folder
    ///
    /// An empty folder argument addresses the document-library root. A remote
    /// failure is logged and surfaced as `Err`, which callers must treat
    /// distinctly from an empty `Ok` listing.
    pub async fn list_files(&self, folder: &str) -> Result<Vec<RemoteFile>> {
        Ok(self.expand_folder(folder).await?.files)
    }

    /// Lists the names of the direct subfolders of a remote folder
    pub async fn list_folders(&self, folder: &str) -> Result<Vec<String>> {
        Ok(self.expand_folder(folder).await?.folders)
    }

    /// Lists per-file properties of a remote folder
    ///
    /// When the listing fails, waits the configured retry delay and retries
    /// exactly once; if that also fails the result is an empty vector. This
    /// call never reports failure, so iterating callers need no error path.
    pub async fn list_file_properties(&self, folder: &str) -> Vec<FileProperties> {
        match self.list_files(folder).await {
            Ok(files) => files.into_iter().map(FileProperties::from).collect(),
            Err(_) => {
                tracing::warn!(
                    "listing '{folder}' failed, retrying in {:?}",
                    self.config.retry_delay
                );
                sleep(self.config.retry_delay).await;
                match self.list_files(folder).await {
                    Ok(files) => files.into_iter().map(FileProperties::from).collect(),
                    Err(e) => {
                        tracing::error!("listing '{folder}' failed twice, treating as empty: {e}");
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Finds one file's properties by exact name match
    pub async fn get_file_properties(&self, file_name: &str, folder: &str) -> Option<FileProperties> {
        self.list_file_properties(folder)
            .await
            .into_iter()
            .find(|p| p.name == file_name)
    }

    /// Downloads a file's full content in one request
    ///
    /// Intended for small files; there is no retry, failure is logged and
    /// surfaced immediately.
    pub async fn download_file(&self, file_name: &str, folder: &str) -> Result<Bytes> {
        let session = self.sessions.connect(false).await?;
        let file_url = self.config.content_url(folder, file_name);
        match self.api.open_file_binary(&session, &file_url).await {
            Ok(content) => Ok(content),
            Err(e) => {
                tracing::error!("not possible to download {file_name}: {e}");
                Err(e)
            }
        }
    }

    /// Streams a remote file into a local file in bounded chunks
    ///
    /// The file's byte length is fetched first to size the progress
    /// indicator; the progress callback then receives the cumulative offset
    /// after each chunk. No retry happens at this layer; the caller decides
    /// whether to repeat a failed download.
    pub async fn download_to_file(
        &self,
        file_name: &str,
        folder: &str,
        local_path: &Path,
    ) -> Result<()> {
        let session = self.sessions.connect(false).await?;
        let file_url = self.config.content_url(folder, file_name);
        let timer = ElapsedTime::start();
        match self.stream_download(&session, &file_url, local_path).await {
            Ok(()) => {
                tracing::info!(
                    "file {file_name} downloaded successfully in {}",
                    timer.elapsed()
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!("not possible to download {file_name}: {e}");
                Err(e)
            }
        }
    }

    async fn stream_download(
        &self,
        session: &Session,
        file_url: &str,
        local_path: &Path,
    ) -> Result<()> {
        let total = self.api.file_length(session, file_url).await?;
        let reporter = ProgressReporter::new("downloaded", total);
        let progress = move |offset: u64| reporter.update(offset);
        self.api
            .download_session(session, file_url, local_path, &progress)
            .await?;
        reporter.finish();
        Ok(())
    }

    /// Uploads a local file to a library-relative target path in chunks,
    /// with idempotent parent-folder creation, post-upload size
    /// verification, and a bounded retry policy
    ///
    /// The ceiling is one original attempt plus `retry_count` retries; the
    /// upload path retries immediately, without a delay. On exhaustion a
    /// fatal line names both paths and the last failure is returned.
    pub async fn upload_file(&self, local_path: &Path, target_path: &str) -> Result<()> {
        let target_url = self.config.target_url(target_path);
        let (folder_url, file_name) = split_file_url(&target_url)?;
        let parent_folder = match target_path.rsplit_once('/') {
            Some((folder, _)) => folder,
            None => "",
        };

        let mut attempt = 0;
        loop {
            match self
                .try_upload(local_path, &target_url, folder_url, file_name, parent_folder)
                .await
            {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::error!("not possible to upload {file_name}: {e}");
                    if attempt >= self.config.retry_count {
                        tracing::error!(
                            "giving up: failed to upload {} to {}",
                            local_path.display(),
                            target_url
                        );
                        return Err(SharePointError::RetriesExhausted {
                            attempts: attempt + 1,
                            source_path: local_path.display().to_string(),
                            dest_path: target_url.clone(),
                            source: Box::new(e),
                        });
                    }
                    if attempt == 0 {
                        tracing::warn!("trying again");
                    } else {
                        tracing::warn!("and trying again");
                    }
                    attempt += 1;
                }
            }
        }
    }

    async fn try_upload(
        &self,
        local_path: &Path,
        target_url: &str,
        folder_url: &str,
        file_name: &str,
        parent_folder: &str,
    ) -> Result<()> {
        let session = self.sessions.connect(false).await?;

        // Create-if-absent; safe when the folder path already exists.
        self.api.ensure_folder_path(&session, folder_url).await?;

        tracing::info!("uploading {} to {}", local_path.display(), target_url);
        let timer = ElapsedTime::start();

        // The local length recorded here is the expected remote length.
        let expected = tokio::fs::metadata(local_path).await?.len();
        let reporter = ProgressReporter::new("uploaded", expected);
        let progress = move |offset: u64| reporter.update(offset);
        self.api
            .create_upload_session(
                &session,
                folder_url,
                file_name,
                local_path,
                self.config.chunk_size,
                &progress,
            )
            .await?;
        reporter.finish();
        tracing::info!("upload completed in {}", timer.elapsed());

        // Independent re-fetch through the metadata accessor; a file the
        // listing cannot see counts as length 0.
        let actual = self
            .get_file_properties(file_name, parent_folder)
            .await
            .map(|p| p.length)
            .unwrap_or(0);
        if actual != expected {
            tracing::error!(
                "uploaded size mismatch for {target_url}: expected {expected} bytes, remote reports {actual}"
            );
            return Err(SharePointError::Verification {
                path: target_url.to_string(),
                expected,
                actual,
            });
        }

        tracing::info!("file {file_name} uploaded successfully");
        Ok(())
    }

    /// Uploads a small content buffer in a single request, without retry
    pub async fn upload_buffer(&self, file_name: &str, folder: &str, content: &[u8]) -> Result<()> {
        let session = self.sessions.connect(false).await?;
        let folder_url = self.config.target_url(folder);
        match self
            .api
            .upload_small(&session, &folder_url, file_name, content)
            .await
        {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!("not possible to upload {file_name}: {e}");
                Err(e)
            }
        }
    }

    /// Downloads the most recently modified file of a remote folder
    ///
    /// Timestamps must be in the strict `%Y-%m-%dT%H:%M:%SZ` format; a file
    /// that fails to parse surfaces as an error. Equal timestamps are broken
    /// deterministically by name, lexicographically ascending.
    pub async fn download_latest_file(&self, folder: &str) -> Result<(String, Bytes)> {
        let files = self.list_files(folder).await?;
        let mut stamped = Vec::with_capacity(files.len());
        for file in &files {
            stamped.push((
                parse_remote_timestamp(&file.time_last_modified)?,
                file.name.clone(),
            ));
        }
        stamped.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
        let (_, name) = stamped
            .into_iter()
            .next()
            .ok_or_else(|| SharePointError::FileNotFound(format!("no files in '{folder}'")))?;
        let content = self.download_file(&name, folder).await?;
        Ok((name, content))
    }

    /// Renames a file to the destination path's leaf name
    ///
    /// The underlying remote capability only changes the leaf name, never
    /// the folder. Uses the same bounded retry policy as upload, but waits
    /// the configured delay before every retry.
    pub async fn rename_file(&self, source_path: &str, dest_path: &str) -> Result<()> {
        let source_url = self.config.target_url(source_path);
        let new_name = file_name_of(dest_path);

        let mut attempt = 0;
        loop {
            match self.try_rename(&source_url, new_name).await {
                Ok(()) => {
                    tracing::info!("renamed {source_url} to {new_name}");
                    return Ok(());
                }
                Err(e) => {
                    tracing::error!("not possible to rename {source_url}: {e}");
                    if attempt >= self.config.retry_count {
                        tracing::error!("giving up: failed to move {source_path} to {dest_path}");
                        return Err(SharePointError::RetriesExhausted {
                            attempts: attempt + 1,
                            source_path: source_path.to_string(),
                            dest_path: dest_path.to_string(),
                            source: Box::new(e),
                        });
                    }
                    sleep(self.config.retry_delay).await;
                    if attempt == 0 {
                        tracing::warn!("trying again");
                    } else {
                        tracing::warn!("and trying again");
                    }
                    attempt += 1;
                }
            }
        }
    }

    async fn try_rename(&self, source_url: &str, new_name: &str) -> Result<()> {
        let session = self.sessions.connect(false).await?;
        self.api.rename_file(&session, source_url, new_name).await
    }

    /// Lists the items of a named document library (lists, not files)
    pub async fn list_library_items(&self, title: &str) -> Result<Vec<String>> {
        let session = self.sessions.connect(false).await?;
        self.api.list_library(&session, title).await
    }
}
