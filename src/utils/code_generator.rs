//! Short code generation.
//!
//! Codes are drawn uniformly from the 62-character alphanumeric alphabet.
//! Uniqueness is checked against a caller-supplied snapshot of existing
//! codes, so two concurrent submissions may still pick the same code; the
//! storage layer's unique constraint catches that case.

use std::collections::HashSet;

use rand::Rng;

/// Characters a short code may contain.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default number of characters in a generated code.
pub const DEFAULT_CODE_LENGTH: usize = 5;

/// Default number of candidates tried before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 64;

/// Codes that would shadow a fixed route and are never handed out.
pub const RESERVED_CODES: &[&str] = &["submit", "viewurls", "health", "static"];

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodeGenerationError {
    #[error("short code length must be greater than zero")]
    ZeroLength,
    #[error("every code of length {length} is already taken")]
    SpaceExhausted { length: usize },
    #[error("no unique short code found after {attempts} attempts")]
    Exhausted { attempts: usize },
}

/// Generates a random code of exactly `length` characters.
///
/// Uses the thread-local generator from [`rand::rng`], which is seeded from
/// the operating system on first use in each thread and needs no locking.
pub fn generate_random_code(length: usize) -> String {
    generate_random_code_with(&mut rand::rng(), length)
}

/// Same as [`generate_random_code`] with an explicit random source.
pub fn generate_random_code_with<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

/// Returns a code that is neither in `existing` nor reserved.
///
/// # Errors
///
/// - [`CodeGenerationError::ZeroLength`] if `length` is zero
/// - [`CodeGenerationError::SpaceExhausted`] if `existing` covers every
///   possible code of that length
/// - [`CodeGenerationError::Exhausted`] if `max_attempts` candidates all
///   collided
pub fn get_unique_code(
    existing: &[String],
    length: usize,
    max_attempts: usize,
) -> Result<String, CodeGenerationError> {
    get_unique_code_with(&mut rand::rng(), existing, length, max_attempts)
}

/// Same as [`get_unique_code`] with an explicit random source.
pub fn get_unique_code_with<R: Rng + ?Sized>(
    rng: &mut R,
    existing: &[String],
    length: usize,
    max_attempts: usize,
) -> Result<String, CodeGenerationError> {
    if length == 0 {
        return Err(CodeGenerationError::ZeroLength);
    }

    let taken: HashSet<&str> = existing.iter().map(String::as_str).collect();

    // Only codes of the requested length occupy its space.
    let occupied = taken
        .iter()
        .chain(RESERVED_CODES)
        .filter(|code| code.len() == length)
        .collect::<HashSet<_>>()
        .len();

    if code_space(length).is_some_and(|space| occupied as u128 >= space) {
        return Err(CodeGenerationError::SpaceExhausted { length });
    }

    for attempt in 1..=max_attempts {
        let candidate = generate_random_code_with(rng, length);

        if !taken.contains(candidate.as_str()) && !RESERVED_CODES.contains(&candidate.as_str()) {
            return Ok(candidate);
        }

        tracing::warn!(attempt, code = %candidate, "Short code collision, retrying");
    }

    Err(CodeGenerationError::Exhausted {
        attempts: max_attempts,
    })
}

/// Number of distinct codes of `length` characters, if it fits in a `u128`.
fn code_space(length: usize) -> Option<u128> {
    let exp = u32::try_from(length).ok()?;
    (ALPHABET.len() as u128).checked_pow(exp)
}
