//! Request and response shapes for the web handlers.

pub mod health;
pub mod submit;

pub use health::{CheckStatus, HealthChecks, HealthResponse};
pub use submit::{IndexQuery, SubmitForm};
