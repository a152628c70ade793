//! Submission form page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};

use crate::application::services::Decline;
use crate::domain::entities;
use crate::state::AppState;
use crate::web::dto::IndexQuery;

/// Template for the index page.
///
/// Renders `templates/index.html` with the URL form and, after a
/// submission, either the new short URL or the reason it was declined.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub error_message: Option<&'static str>,
    pub short_url: Option<String>,
}

/// Renders the submission form.
///
/// # Endpoint
///
/// `GET /`
///
/// # Query
///
/// - `error` - `no_input`, `invalid_url` or `url_exists`
/// - `success=shortened&code=<code>` - shows the new short URL
pub async fn index_handler(
    State(state): State<AppState>,
    Query(query): Query<IndexQuery>,
) -> IndexTemplate {
    let error_message = query
        .error
        .as_deref()
        .and_then(Decline::from_code)
        .map(|d| d.message());

    let short_url = match (query.success.as_deref(), query.code) {
        (Some("shortened"), Some(code)) if code.chars().all(|c| c.is_ascii_alphanumeric()) => {
            Some(entities::short_url(&state.base_url, &code))
        }
        _ => None,
    };

    IndexTemplate {
        error_message,
        short_url,
    }
}
