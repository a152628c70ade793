//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::ShortLinkService;
use crate::infrastructure::persistence::PgShortLinkRepository;

/// Service handle used by the HTTP layer.
pub type LinkService = ShortLinkService<PgShortLinkRepository>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    /// Public prefix short links are displayed under.
    pub base_url: String,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>, base_url: impl Into<String>) -> Self {
        Self {
            link_service,
            base_url: base_url.into(),
        }
    }
}
