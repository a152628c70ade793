//! Web layer: HTML pages, form handling and redirects.
//!
//! Pages are rendered server-side with Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`dto`] - Form, query and JSON shapes
//! - [`handlers`] - Request handlers
//! - [`middleware`] - Request tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
