//! Domain layer - Business logic and entities

pub mod projects;
pub mod session;

pub use projects::{Project, ProjectStatus, ProjectStore, StatusCounts};
pub use session::{OperatorCredentials, Session};
