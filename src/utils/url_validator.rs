//! Validation of submitted URLs.

use url::Url;

/// Schemes a short link may redirect to.
pub const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

/// Returns true if `input` is an absolute `http` or `https` URL with a host.
///
/// Relative references such as `example.com` or `/path` are rejected, as are
/// absolute URLs without an authority (`mailto:user@example.com`) and other
/// schemes (`javascript://`, `ftp://`).
///
/// Input containing control characters is rejected outright: the URL parser
/// strips tabs and newlines, so the stored text would not match what was
/// validated and could not be sent back in a `Location` header.
pub fn is_valid_url(input: &str) -> bool {
    if input.chars().any(char::is_control) {
        return false;
    }

    match Url::parse(input) {
        Ok(url) => {
            ALLOWED_SCHEMES.contains(&url.scheme())
                && url.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}
