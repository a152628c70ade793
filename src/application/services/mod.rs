//! Business logic services for the application layer.

pub mod short_link_service;

pub use short_link_service::{Decline, ShortLinkService, SubmitOutcome};
