//! Session entity
//!
//! A session owns its project store outright. Nothing is shared between
//! sessions and nothing outlives the process.

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use super::credentials::OperatorCredentials;
use crate::domain::projects::ProjectStore;
use crate::error::{Error, Result};

/// One live instance of the application's in-memory state
#[derive(Debug, Clone)]
pub struct Session {
    /// Unique session identifier, used to correlate log lines
    pub id: Uuid,
    /// When the session started
    pub started_at: DateTime<Utc>,
    operator: Option<String>,
    store: ProjectStore,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Start a session with an empty store and nobody logged in
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            operator: None,
            store: ProjectStore::new(),
        }
    }

    /// Log in when the submitted pair matches `credentials`
    pub fn login(
        &mut self,
        credentials: &OperatorCredentials,
        username: &str,
        password: &str,
    ) -> Result<()> {
        if !credentials.verify(username, password) {
            warn!(session = %self.id, username, "Login rejected");
            return Err(Error::AuthenticationFailed);
        }

        info!(session = %self.id, username, "Operator logged in");
        self.operator = Some(username.to_string());
        Ok(())
    }

    /// Log out. Projects recorded so far stay in the session.
    pub fn logout(&mut self) {
        if let Some(operator) = self.operator.take() {
            info!(session = %self.id, operator = %operator, "Operator logged out");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.operator.is_some()
    }

    /// Name of the logged-in operator
    pub fn operator(&self) -> Option<&str> {
        self.operator.as_deref()
    }

    /// Read access to the store, only while logged in
    pub fn projects(&self) -> Result<&ProjectStore> {
        if self.is_authenticated() {
            Ok(&self.store)
        } else {
            Err(Error::NotAuthenticated)
        }
    }

    /// Write access to the store, only while logged in
    pub fn projects_mut(&mut self) -> Result<&mut ProjectStore> {
        if self.is_authenticated() {
            Ok(&mut self.store)
        } else {
            Err(Error::NotAuthenticated)
        }
    }

    /// Ungated read access
    pub fn store(&self) -> &ProjectStore {
        &self.store
    }
}
