//! PostgreSQL implementation of the short link repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use super::mapper::{RecordMapper, StoreError};
use super::record::{BindValue, Field, Record};
use crate::domain::entities::ShortLink;
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_code;

/// Table holding [`ShortLink`] rows.
pub const SHORT_LINK_TABLE: &str = "url_shortener";

fn get_id(link: &ShortLink) -> BindValue {
    link.id.into()
}

fn set_id(link: &mut ShortLink, row: &PgRow, index: usize) -> Result<(), sqlx::Error> {
    link.id = row.try_get(index)?;
    Ok(())
}

fn get_original_url(link: &ShortLink) -> BindValue {
    link.original_url.as_str().into()
}

fn set_original_url(link: &mut ShortLink, row: &PgRow, index: usize) -> Result<(), sqlx::Error> {
    link.original_url = row.try_get(index)?;
    Ok(())
}

fn get_short_code(link: &ShortLink) -> BindValue {
    link.short_code.as_str().into()
}

fn set_short_code(link: &mut ShortLink, row: &PgRow, index: usize) -> Result<(), sqlx::Error> {
    link.short_code = row.try_get(index)?;
    Ok(())
}

/// Same order as the columns of `url_shortener`.
static SHORT_LINK_FIELDS: [Field<ShortLink>; 3] = [
    Field::identity("id", get_id, set_id),
    Field::new("original_url", get_original_url, set_original_url),
    Field::new("short_code", get_short_code, set_short_code),
];

impl Record for ShortLink {
    fn fields() -> &'static [Field<Self>] {
        &SHORT_LINK_FIELDS
    }
}

/// PostgreSQL repository for short links, built on [`RecordMapper`].
pub struct PgShortLinkRepository {
    mapper: RecordMapper,
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self {
            mapper: RecordMapper::new(pool.clone()),
            pool,
        }
    }

    async fn find_one_where(
        &self,
        predicate: &str,
        value: &str,
    ) -> Result<Option<ShortLink>, AppError> {
        match self
            .mapper
            .fetch_one_where::<ShortLink>(SHORT_LINK_TABLE, predicate, vec![value.into()])
            .await
        {
            Ok(link) => Ok(Some(link)),
            Err(e) if e.is_row_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn create(&self, link: ShortLink) -> Result<(), AppError> {
        match self.mapper.insert(SHORT_LINK_TABLE, &link).await {
            Ok(()) => Ok(()),
            Err(StoreError::Database(e)) if is_unique_violation_on_code(&e) => {
                Err(AppError::conflict(
                    "Short code already exists",
                    json!({ "code": link.short_code }),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, AppError> {
        self.find_one_where("short_code = ?", code).await
    }

    async fn find_by_original_url(&self, url: &str) -> Result<Option<ShortLink>, AppError> {
        self.find_one_where("original_url = ?", url).await
    }

    async fn list(&self) -> Result<Vec<ShortLink>, AppError> {
        let mut links: Vec<ShortLink> = self.mapper.fetch_all(SHORT_LINK_TABLE).await?;
        links.sort_by_key(|l| l.id);
        Ok(links)
    }

    async fn all_codes(&self) -> Result<Vec<String>, AppError> {
        let links: Vec<ShortLink> = self.mapper.fetch_all(SHORT_LINK_TABLE).await?;
        Ok(links.into_iter().map(|l| l.short_code).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_shortener")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
