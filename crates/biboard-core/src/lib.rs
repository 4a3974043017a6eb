//! Biboard Core Library
//!
//! This crate provides the core functionality for Biboard, including:
//! - Session-scoped project store (add, list, status updates)
//! - Derived metrics (date-based progress, days remaining, status counts)
//! - Report rows for the overview, status and timeline views
//! - Input validation for project creation
//! - Operator login and configuration

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod reports;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::domain::projects::{
        Project, ProjectStatus, ProjectStore, StatusCounts, progress_percent,
        progress_percent_at, status_label,
    };
    pub use crate::domain::session::{OperatorCredentials, Session};
    pub use crate::error::{Error, Result};
}
