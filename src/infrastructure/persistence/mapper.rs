//! Generic table access for [`Record`] types.
//!
//! Builds `SELECT` and `INSERT` statements from a table name and the
//! record's field list and runs them against a PostgreSQL pool. Predicates
//! are written with `?` placeholders and bound positionally.

use sqlx::PgPool;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::Query;
use std::sync::Arc;
use tracing::debug;

use super::record::{BindValue, Record};

/// Errors raised while reading or writing records.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error("invalid SQL identifier: {0:?}")]
    InvalidIdentifier(String),
    #[error("predicate expects {expected} arguments, got {found}")]
    ArgumentCount { expected: usize, found: usize },
    #[error("row has {found} columns but record declares {expected} fields")]
    ShapeMismatch { expected: usize, found: usize },
}

impl StoreError {
    /// Returns true if a single-row lookup matched nothing.
    pub fn is_row_not_found(&self) -> bool {
        matches!(self, StoreError::Database(sqlx::Error::RowNotFound))
    }
}

/// Executes generated SQL for any [`Record`] type.
#[derive(Clone)]
pub struct RecordMapper {
    pool: Arc<PgPool>,
}

impl RecordMapper {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Reads every row of `table`.
    ///
    /// # Errors
    ///
    /// Returns the query error, or the first row that fails to map.
    pub async fn fetch_all<R: Record>(&self, table: &str) -> Result<Vec<R>, StoreError> {
        let sql = select_all_sql(table)?;
        debug!(%sql, "fetch_all");

        let rows = sqlx::query(&sql).fetch_all(self.pool.as_ref()).await?;

        rows.iter().map(R::from_row).collect()
    }

    /// Reads the first row of `table` matching `predicate`.
    ///
    /// `args` are bound to the predicate's `?` placeholders in order.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] wrapping [`sqlx::Error::RowNotFound`]
    /// when nothing matches (see [`StoreError::is_row_not_found`]), and
    /// [`StoreError::ArgumentCount`] when `args` does not fit the predicate.
    pub async fn fetch_one_where<R: Record>(
        &self,
        table: &str,
        predicate: &str,
        args: Vec<BindValue>,
    ) -> Result<R, StoreError> {
        let (sql, expected) = select_where_sql(table, predicate)?;
        if expected != args.len() {
            return Err(StoreError::ArgumentCount {
                expected,
                found: args.len(),
            });
        }
        debug!(%sql, "fetch_one_where");

        let row = bind_all(sqlx::query(&sql), args)
            .fetch_one(self.pool.as_ref())
            .await?;

        R::from_row(&row)
    }

    /// Inserts `record` into `table`.
    ///
    /// Identity fields are omitted and left for the database to assign; the
    /// assigned value is not written back into `record`.
    ///
    /// # Errors
    ///
    /// Propagates the execution error unchanged (constraint violations,
    /// connectivity failures).
    pub async fn insert<R: Record>(&self, table: &str, record: &R) -> Result<(), StoreError> {
        let sql = insert_sql::<R>(table)?;
        debug!(%sql, "insert");

        let values = record.insert_values().into_iter().map(|(_, v)| v).collect();

        bind_all(sqlx::query(&sql), values)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}

fn bind_all<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    values: Vec<BindValue>,
) -> Query<'q, Postgres, PgArguments> {
    for value in values {
        query = match value {
            BindValue::Int(v) => query.bind(v),
            BindValue::Text(v) => query.bind(v),
            BindValue::Bool(v) => query.bind(v),
        };
    }
    query
}

fn check_identifier(name: &str) -> Result<(), StoreError> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidIdentifier(name.to_string()))
    }
}

pub(crate) fn select_all_sql(table: &str) -> Result<String, StoreError> {
    check_identifier(table)?;
    Ok(format!("SELECT * FROM {table}"))
}

/// Returns the statement and the number of placeholders it expects.
pub(crate) fn select_where_sql(table: &str, predicate: &str) -> Result<(String, usize), StoreError> {
    check_identifier(table)?;
    let (predicate, count) = number_placeholders(predicate);
    Ok((format!("SELECT * FROM {table} WHERE {predicate}"), count))
}

pub(crate) fn insert_sql<R: Record>(table: &str) -> Result<String, StoreError> {
    check_identifier(table)?;

    let columns: Vec<&str> = R::fields()
        .iter()
        .filter(|f| !f.identity)
        .map(|f| f.name)
        .collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("${i}")).collect();

    Ok(format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", ")
    ))
}

/// Rewrites `?` placeholders as `$1`, `$2`, ... outside string literals.
pub(crate) fn number_placeholders(predicate: &str) -> (String, usize) {
    let mut out = String::with_capacity(predicate.len() + 4);
    let mut count = 0;
    let mut in_literal = false;

    for c in predicate.chars() {
        match c {
            '\'' => {
                in_literal = !in_literal;
                out.push(c);
            }
            '?' if !in_literal => {
                count += 1;
                out.push('$');
                out.push_str(&count.to_string());
            }
            _ => out.push(c),
        }
    }

    (out, count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShortLink;

    #[test]
    fn test_select_all_sql() {
        assert_eq!(
            select_all_sql("url_shortener").unwrap(),
            "SELECT * FROM url_shortener"
        );
    }

    #[test]
    fn test_select_where_sql_numbers_placeholders() {
        let (sql, count) = select_where_sql("test_table", "id = ? AND name = ?").unwrap();
        assert_eq!(sql, "SELECT * FROM test_table WHERE id = $1 AND name = $2");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_placeholders_inside_literals_are_kept() {
        let (sql, count) = number_placeholders("note = 'why?' AND code = ?");
        assert_eq!(sql, "note = 'why?' AND code = $1");
        assert_eq!(count, 1);

        let (sql, count) = number_placeholders("name = 'it''s?' OR name = ?");
        assert_eq!(sql, "name = 'it''s?' OR name = $1");
        assert_eq!(count, 1);
    }

    #[test]
    fn test_predicate_without_placeholders() {
        assert_eq!(number_placeholders("id > 0"), ("id > 0".to_string(), 0));
    }

    #[test]
    fn test_insert_sql_skips_identity() {
        assert_eq!(
            insert_sql::<ShortLink>("url_shortener").unwrap(),
            "INSERT INTO url_shortener (original_url, short_code) VALUES ($1, $2)"
        );
    }

    #[test]
    fn test_invalid_table_names_are_rejected() {
        for name in ["", "1table", "links; DROP TABLE x", "a-b", "schema.table"] {
            assert!(
                matches!(
                    select_all_sql(name),
                    Err(StoreError::InvalidIdentifier(_))
                ),
                "{name:?} should be rejected"
            );
        }
        assert!(select_all_sql("_private_table2").is_ok());
    }

    #[test]
    fn test_is_row_not_found() {
        assert!(StoreError::Database(sqlx::Error::RowNotFound).is_row_not_found());
        assert!(!StoreError::Database(sqlx::Error::PoolTimedOut).is_row_not_found());
        assert!(
            !StoreError::ArgumentCount {
                expected: 1,
                found: 0
            }
            .is_row_not_found()
        );
    }
}
