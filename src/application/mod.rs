//! Application layer services implementing business logic.
//!
//! Services coordinate repository calls, validation and code generation and
//! give HTTP handlers and the admin CLI a single entry point.
//!
//! - [`services::short_link_service::ShortLinkService`] - Submission, redirect resolution and listing

pub mod services;
