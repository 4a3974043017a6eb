//! Operator credentials
//!
//! A plain comparison against one configured username/password pair.

use std::fmt;

/// The single operator allowed to open a session
#[derive(Clone, PartialEq, Eq)]
pub struct OperatorCredentials {
    username: String,
    password: String,
}

impl OperatorCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Check a submitted username/password pair; both must match exactly
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl fmt::Debug for OperatorCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
