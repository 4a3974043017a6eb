//! Project domain module
//!
//! Contains the project entity, its status set, the session-scoped store
//! and the date-based metrics derived from project records.

pub mod entity;
pub mod metrics;
pub mod store;

pub use entity::*;
pub use metrics::*;
pub use store::*;
