//! Session Management
//!
//! This module holds the credentials and the lazily established session
//! handle for one site + document-library pair, with support for forced
//! renewal.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::api::{Credentials, RemoteApi, Session};
use crate::errors::{Result, SharePointError};
use crate::types::ClientConfig;

/// Manages the cached session for a client instance
///
/// The session is absent at construction, created on the first call that
/// needs it (or on explicit renewal), and then held for the lifetime of the
/// owning client. It is never expired or refreshed automatically; callers
/// request renewal on failure if desired.
pub struct SessionManager {
    api: Arc<dyn RemoteApi>,
    site_url: String,
    username: String,
    password: String,
    client_id: String,
    client_secret: String,
    session: RwLock<Option<Session>>,
}

impl SessionManager {
    /// Creates a manager from the client configuration
    pub fn new(api: Arc<dyn RemoteApi>, config: &ClientConfig) -> Self {
        Self {
            api,
            site_url: config.site_url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            session: RwLock::new(None),
        }
    }

    /// Returns the cached session, establishing one if necessary
    ///
    /// With `force_renew` the existing session is discarded first. When a
    /// session already exists and renewal was not forced, it is returned
    /// unchanged. Authentication failures leave the session empty and are
    /// reported as [`SharePointError::Auth`]; calling again retries.
    pub async fn connect(&self, force_renew: bool) -> Result<Session> {
        if force_renew {
            tracing::info!("connection going to renew");
            *self.session.write().await = None;
        }

        if let Some(session) = self.session.read().await.clone() {
            tracing::debug!("connection already exists");
            return Ok(session);
        }

        // Credential selection happens before any remote call; with neither
        // pair usable the session stays empty and nothing is attempted.
        let credentials = self.select_credentials()?;

        match self.api.authenticate(&self.site_url, &credentials).await {
            Ok(session) => {
                *self.session.write().await = Some(session.clone());
                tracing::info!(site = %self.site_url, "authenticated");
                Ok(session)
            }
            Err(e) => {
                tracing::error!("not possible to authenticate: {e}");
                Err(SharePointError::Auth(Box::new(e)))
            }
        }
    }

    /// Picks the credential pair to authenticate with
    ///
    /// The client pair takes precedence over the user pair; both members of
    /// a pair must be non-empty for it to be usable.
    fn select_credentials(&self) -> Result<Credentials> {
        if !self.client_id.is_empty() && !self.client_secret.is_empty() {
            tracing::info!("authenticating with client credentials");
            return Ok(Credentials::Client {
                client_id: self.client_id.clone(),
                client_secret: self.client_secret.clone(),
            });
        }
        if !self.username.is_empty() && !self.password.is_empty() {
            tracing::info!("authenticating with user credentials");
            return Ok(Credentials::User {
                username: self.username.clone(),
                password: self.password.clone(),
            });
        }
        tracing::error!("no credentials provided");
        Err(SharePointError::NoCredentials)
    }

    /// Returns whether a session is currently held
    pub async fn has_session(&self) -> bool {
        self.session.read().await.is_some()
    }
}
