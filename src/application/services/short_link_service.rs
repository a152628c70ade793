//! Short link submission, resolution and listing.

use std::sync::Arc;

use serde_json::json;
use tracing::{info, instrument, warn};

use crate::domain::entities::ShortLink;
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, DEFAULT_MAX_ATTEMPTS, get_unique_code};
use crate::utils::url_validator::is_valid_url;

/// Number of generate-and-insert rounds when a concurrent insert takes the
/// chosen code first.
const MAX_INSERT_ATTEMPTS: usize = 3;

/// Why a submission was turned away without storing anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decline {
    NoInput,
    InvalidUrl,
    UrlExists,
}

impl Decline {
    /// Query-string code used by the index page.
    pub fn as_str(&self) -> &'static str {
        match self {
            Decline::NoInput => "no_input",
            Decline::InvalidUrl => "invalid_url",
            Decline::UrlExists => "url_exists",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "no_input" => Some(Decline::NoInput),
            "invalid_url" => Some(Decline::InvalidUrl),
            "url_exists" => Some(Decline::UrlExists),
            _ => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Decline::NoInput => "Please enter a URL.",
            Decline::InvalidUrl => "That does not look like a valid URL. Include the scheme, e.g. https://",
            Decline::UrlExists => "That URL has already been shortened.",
        }
    }
}

/// Result of a form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(ShortLink),
    Declined(Decline),
}

/// Service for creating and resolving short links.
///
/// Uniqueness of generated codes is checked against a snapshot of existing
/// codes taken during the same submission. A code taken by a concurrent
/// submission in between is caught by the storage constraint and the code is
/// regenerated.
pub struct ShortLinkService<R: ShortLinkRepository> {
    repository: Arc<R>,
    code_length: usize,
    max_attempts: usize,
}

impl<R: ShortLinkRepository> ShortLinkService<R> {
    /// Creates a service generating codes of the default length.
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            code_length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Overrides the generated code length and collision retry budget.
    pub fn with_code_settings(mut self, code_length: usize, max_attempts: usize) -> Self {
        self.code_length = code_length;
        self.max_attempts = max_attempts;
        self
    }

    pub fn code_length(&self) -> usize {
        self.code_length
    }

    /// Shortens a submitted URL.
    ///
    /// # Flow
    ///
    /// 1. Empty input or an invalid URL is declined
    /// 2. A URL that is already stored is declined (deduplication by URL)
    /// 3. A code is generated against a snapshot of all stored codes
    /// 4. The link is inserted and read back to obtain its id
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors or when no unique
    /// code can be found.
    #[instrument(skip(self))]
    pub async fn submit(&self, input: &str) -> Result<SubmitOutcome, AppError> {
        let url = input.trim();

        if url.is_empty() {
            info!("Declined submission: no input");
            return Ok(SubmitOutcome::Declined(Decline::NoInput));
        }

        if !is_valid_url(url) {
            info!("Declined submission: invalid URL");
            return Ok(SubmitOutcome::Declined(Decline::InvalidUrl));
        }

        if let Some(existing) = self.repository.find_by_original_url(url).await? {
            info!(code = %existing.short_code, "Declined submission: URL already exists");
            return Ok(SubmitOutcome::Declined(Decline::UrlExists));
        }

        for attempt in 1..=MAX_INSERT_ATTEMPTS {
            let existing_codes = self.repository.all_codes().await?;
            let code = get_unique_code(&existing_codes, self.code_length, self.max_attempts)?;

            match self.repository.create(ShortLink::new(url, code.as_str())).await {
                Ok(()) => {
                    let link = self.repository.find_by_code(&code).await?.ok_or_else(|| {
                        AppError::internal(
                            "Stored link could not be read back",
                            json!({ "code": code }),
                        )
                    })?;

                    info!(id = link.id, code = %link.short_code, "Short link created");
                    return Ok(SubmitOutcome::Created(link));
                }
                Err(AppError::Conflict { .. }) => {
                    warn!(attempt, %code, "Short code taken by a concurrent submission");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Looks up the link a short code points to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Internal`] on database errors.
    #[instrument(skip(self))]
    pub async fn resolve(&self, code: &str) -> Result<ShortLink, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Returns every stored link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_links(&self) -> Result<Vec<ShortLink>, AppError> {
        self.repository.list().await
    }

    /// Returns the number of stored links.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_links(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}
