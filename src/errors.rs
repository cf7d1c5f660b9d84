//! SharePoint Client Error Definitions
//!
//! This module defines all error types and the `Result` alias for the client.
//! Errors are categorized into credential/authentication failures, remote
//! operation failures, post-transfer verification failures, and local I/O.

use thiserror::Error;

/// Result type alias for SharePoint client operations
pub type Result<T> = std::result::Result<T, SharePointError>;

/// Base error type for all SharePoint client errors
#[derive(Error, Debug)]
pub enum SharePointError {
    /// Neither a client-credential pair nor a user-credential pair is
    /// configured. Fatal; no remote call is attempted and nothing retries it.
    #[error("no credentials provided")]
    NoCredentials,

    /// The remote service rejected the credentials, or the network failed
    /// during authentication. The session is left empty; callers may invoke
    /// `connect` again if they want another attempt.
    #[error("authentication failed")]
    Auth(#[source] Box<SharePointError>),

    /// A remote listing/metadata/transfer/rename call failed
    #[error("remote {operation} failed: {message}")]
    Remote {
        /// Name of the remote operation that failed
        operation: String,
        /// Human-readable failure detail
        message: String,
    },

    /// The remote reported a byte length different from the local file's
    /// size after a nominally successful upload. Treated like a transport
    /// failure and fed to the same retry policy.
    #[error("uploaded size mismatch for {path}: expected {expected} bytes, remote reports {actual}")]
    Verification {
        /// Remote target path of the upload
        path: String,
        /// Local byte length recorded before the transfer started
        expected: u64,
        /// Byte length the remote reported afterwards (0 when missing)
        actual: u64,
    },

    /// The bounded retry policy ran out of attempts
    #[error("giving up after {attempts} attempts: {source_path} -> {dest_path}")]
    RetriesExhausted {
        /// Total attempts made, including the original one
        attempts: u32,
        /// Source path of the failed operation
        source_path: String,
        /// Destination path of the failed operation
        dest_path: String,
        /// The failure observed on the last attempt
        #[source]
        source: Box<SharePointError>,
    },

    /// Requested file does not exist in the remote folder
    #[error("file not found: {0}")]
    FileNotFound(String),

    /// A local or remote path could not be interpreted
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Invalid argument was provided
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Local I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A remote timestamp was not in the expected ISO-8601 `Z` format
    #[error("timestamp parse error: {0}")]
    Timestamp(#[from] chrono::ParseError),
}

impl SharePointError {
    /// Convenience constructor for remote operation failures
    pub fn remote(operation: impl Into<String>, message: impl Into<String>) -> Self {
        SharePointError::Remote {
            operation: operation.into(),
            message: message.into(),
        }
    }
}
