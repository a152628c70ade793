//! Classification of database errors raised by PostgreSQL.

/// Name of the uniqueness constraint on `url_shortener.short_code`.
pub const SHORT_CODE_CONSTRAINT: &str = "url_shortener_short_code_key";

/// Returns the violated constraint name when `e` is a unique violation.
///
/// Yields `Some("")` for a unique violation that does not report a
/// constraint name.
pub fn unique_violation_constraint(e: &sqlx::Error) -> Option<String> {
    let db_err = e.as_database_error()?;

    if !db_err.is_unique_violation() {
        return None;
    }

    Some(db_err.constraint().unwrap_or_default().to_string())
}

/// Returns true if `e` is a unique violation on the short code column.
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    unique_violation_constraint(e).is_some_and(|c| c == SHORT_CODE_CONSTRAINT)
}
