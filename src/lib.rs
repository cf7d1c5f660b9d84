//! SharePoint Client Library
//!
//! Async client for synchronizing files between a local filesystem and a
//! SharePoint document library. The crate covers the transfer orchestration
//! only: chunked upload with idempotent folder creation, post-upload size
//! verification and bounded retries, chunked and whole-file download with
//! progress reporting, folder metadata access, and a retryable rename. The
//! authenticated wire transport is supplied by the caller as a [`RemoteApi`]
//! implementation.
//!
//! # Features
//!
//! - Chunked upload with progress, size verification, and a 6-attempt ceiling
//! - Chunked download streamed to a local file with progress
//! - Whole-file upload/download for small files
//! - Latest-file selection by last-modified timestamp
//! - Lazy session establishment with explicit renewal
//! - Folder-tree upload and pattern-filtered bulk download helpers
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sharepoint::{ClientConfig, SharePoint};
//!
//! let config = ClientConfig::from_env().with_client_credentials("app-id", "app-secret");
//! let client = SharePoint::new(Arc::new(transport), config)?;
//!
//! client.upload_file("data/flux.dat".as_ref(), "Bahada/Tower/flux.dat").await?;
//! let (name, content) = client.download_latest_file("Bahada/Tower").await?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod api;
mod client;
mod elapsed;
mod errors;
mod operations;
mod progress;
mod session;
mod types;

pub mod logging;
pub mod sync;

// Re-export public API
pub use api::{Credentials, FolderListing, ProgressFn, RemoteApi, RemoteFile, Session};
pub use client::SharePoint;
pub use elapsed::{format_duration, ElapsedTime};
pub use errors::{Result, SharePointError};
pub use progress::ProgressReporter;
pub use types::{
    parse_remote_timestamp, ClientConfig, FileProperties, DEFAULT_CHUNK_SIZE, DEFAULT_RETRY_COUNT,
    DEFAULT_RETRY_DELAY, REMOTE_TIMESTAMP_FORMAT,
};
