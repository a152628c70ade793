//! Core domain entities.
//!
//! - [`ShortLink`] - A submitted URL and its short code

pub mod short_link;

pub use short_link::{ShortLink, short_url};
