//! Listing page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::error::AppError;
use crate::state::AppState;

/// One row of the listing table.
pub struct LinkRow {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
}

/// Template for the listing page.
///
/// Renders `templates/viewurls.html` with every stored link.
#[derive(Template, WebTemplate)]
#[template(path = "viewurls.html")]
pub struct ViewUrlsTemplate {
    pub links: Vec<LinkRow>,
}

/// Lists all short links.
///
/// # Endpoint
///
/// `GET /viewurls`
///
/// # Errors
///
/// Returns 500 Internal Server Error if the links cannot be read.
pub async fn view_urls_handler(
    State(state): State<AppState>,
) -> Result<ViewUrlsTemplate, AppError> {
    let links = state
        .link_service
        .list_links()
        .await?
        .into_iter()
        .map(|link| LinkRow {
            short_url: link.short_url(&state.base_url),
            id: link.id,
            original_url: link.original_url,
            short_code: link.short_code,
        })
        .collect();

    Ok(ViewUrlsTemplate { links })
}
