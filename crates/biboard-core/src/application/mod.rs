//! Application service layer
//!
//! Input checks the presentation layer runs before touching the store.

pub mod errors;
pub mod validators;

pub use errors::{AppResult, ApplicationError};
pub use validators::ProjectValidator;
