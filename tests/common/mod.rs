#![allow(dead_code)]

use sqlx::PgPool;
use std::sync::Arc;
use url_alias::application::services::ShortLinkService;
use url_alias::infrastructure::persistence::PgShortLinkRepository;
use url_alias::state::AppState;

pub const TEST_BASE_URL: &str = "http://sho.rt";

pub async fn create_test_link(pool: &PgPool, code: &str, url: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO url_shortener (original_url, short_code) VALUES ($1, $2) RETURNING id",
    )
    .bind(url)
    .bind(code)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_links(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM url_shortener")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn code_for(pool: &PgPool, url: &str) -> Option<String> {
    sqlx::query_scalar("SELECT short_code FROM url_shortener WHERE original_url = $1")
        .bind(url)
        .fetch_optional(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: PgPool) -> AppState {
    let repository = Arc::new(PgShortLinkRepository::new(Arc::new(pool)));
    let link_service = Arc::new(ShortLinkService::new(repository));

    AppState::new(link_service, TEST_BASE_URL)
}
