//! Form and query parameters of the submission workflow.

use serde::Deserialize;

/// Body of `POST /submit`.
#[derive(Debug, Default, Deserialize)]
pub struct SubmitForm {
    /// The URL typed into the form; absent fields count as empty input.
    #[serde(rename = "textInput", default)]
    pub text_input: String,
}

/// Query string of `GET /` after a submission.
///
/// `/?error=invalid_url` or `/?success=shortened&code=abc12`.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    pub error: Option<String>,
    pub success: Option<String>,
    pub code: Option<String>,
}
