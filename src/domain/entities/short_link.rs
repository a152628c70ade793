//! Short link entity representing a shortened URL mapping.

use serde::Serialize;

/// A submitted URL and the short code that redirects to it.
///
/// Records are written once and never modified. `id` is assigned by the
/// database on insert; a link built with [`ShortLink::new`] carries `0`
/// until it is read back from storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShortLink {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
}

impl ShortLink {
    /// Creates a link that has not been stored yet.
    pub fn new(original_url: impl Into<String>, short_code: impl Into<String>) -> Self {
        Self {
            id: 0,
            original_url: original_url.into(),
            short_code: short_code.into(),
        }
    }

    /// Public URL of this link under `base_url`, e.g. `http://localhost:8080/abc12`.
    pub fn short_url(&self, base_url: &str) -> String {
        short_url(base_url, &self.short_code)
    }

    /// Returns true once the database has assigned an id.
    pub fn is_persisted(&self) -> bool {
        self.id > 0
    }
}

/// Joins `base_url` and `code` with exactly one slash.
pub fn short_url(base_url: &str, code: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_link_is_not_persisted() {
        let link = ShortLink::new("https://example.com", "abc12");

        assert_eq!(link.id, 0);
        assert_eq!(link.original_url, "https://example.com");
        assert_eq!(link.short_code, "abc12");
        assert!(!link.is_persisted());
    }

    #[test]
    fn test_stored_link_is_persisted() {
        let link = ShortLink {
            id: 4,
            ..ShortLink::new("https://rust-lang.org", "Xy9aB")
        };
        assert!(link.is_persisted());
    }

    #[test]
    fn test_short_url() {
        let link = ShortLink::new("https://example.com", "abc12");

        assert_eq!(link.short_url("http://localhost:8080"), "http://localhost:8080/abc12");
        assert_eq!(link.short_url("https://s.example.com/"), "https://s.example.com/abc12");
    }

    #[test]
    fn test_short_url_from_code() {
        assert_eq!(short_url("http://sho.rt", "aB3xY"), "http://sho.rt/aB3xY");
        assert_eq!(short_url("http://sho.rt//", "aB3xY"), "http://sho.rt/aB3xY");
    }
}
