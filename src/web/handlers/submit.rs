//! Form submission handler.

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, State};
use axum::response::Redirect;
use tracing::debug;

use crate::application::services::SubmitOutcome;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::dto::SubmitForm;

/// Shortens the URL posted from the index form.
///
/// # Endpoint
///
/// `POST /submit` (form field `textInput`)
///
/// # Response
///
/// Always `303 See Other` back to the index page:
///
/// - `/?success=shortened&code=<code>` - link created
/// - `/?error=no_input` - empty or unreadable form
/// - `/?error=invalid_url` - not an absolute URL
/// - `/?error=url_exists` - URL was shortened before
///
/// # Errors
///
/// Returns 500 Internal Server Error on database failures.
pub async fn submit_handler(
    State(state): State<AppState>,
    form: Result<Form<SubmitForm>, FormRejection>,
) -> Result<Redirect, AppError> {
    let input = match form {
        Ok(Form(form)) => form.text_input,
        Err(rejection) => {
            debug!(%rejection, "Unreadable submission body");
            String::new()
        }
    };

    let location = match state.link_service.submit(&input).await? {
        SubmitOutcome::Created(link) => format!("/?success=shortened&code={}", link.short_code),
        SubmitOutcome::Declined(decline) => format!("/?error={}", decline.as_str()),
    };

    Ok(Redirect::to(&location))
}

/// Sends non-POST requests for `/submit` back to the form.
///
/// # Endpoint
///
/// `GET /submit`
pub async fn submit_redirect_handler() -> Redirect {
    Redirect::to("/")
}
