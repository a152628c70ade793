//! HTTP handlers for the form, listing, redirect and health endpoints.

mod health;
mod index;
mod redirect;
mod submit;
mod view_urls;

pub use health::health_handler;
pub use index::{IndexTemplate, index_handler};
pub use redirect::redirect_handler;
pub use submit::{submit_handler, submit_redirect_handler};
pub use view_urls::{LinkRow, ViewUrlsTemplate, view_urls_handler};
