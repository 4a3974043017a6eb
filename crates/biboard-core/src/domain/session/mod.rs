//! Session domain module
//!
//! One operator's interaction window: the login state plus the project
//! store that lives exactly as long as the session.

pub mod credentials;
pub mod session;

pub use credentials::OperatorCredentials;
pub use session::Session;
