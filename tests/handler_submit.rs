mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use sqlx::PgPool;
use url_alias::web::handlers::{index_handler, submit_handler, submit_redirect_handler};

fn test_server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/submit", get(submit_redirect_handler).post(submit_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

fn location(response: &axum_test::TestResponse) -> String {
    response.header("location").to_str().unwrap().to_string()
}

#[sqlx::test]
async fn test_submit_creates_link(pool: PgPool) {
    let server = test_server(pool.clone());

    let response = server
        .post("/submit")
        .form(&[("textInput", "https://example.com/a")])
        .await;

    assert_eq!(response.status_code(), 303);

    let location = location(&response);
    let code = location
        .strip_prefix("/?success=shortened&code=")
        .expect("success redirect");
    assert_eq!(code.len(), 5);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));

    assert_eq!(
        common::code_for(&pool, "https://example.com/a").await.as_deref(),
        Some(code)
    );
}

#[sqlx::test]
async fn test_submit_existing_url(pool: PgPool) {
    common::create_test_link(&pool, "abc12", "https://example.com/a").await;
    let server = test_server(pool.clone());

    let response = server
        .post("/submit")
        .form(&[("textInput", "https://example.com/a")])
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(location(&response), "/?error=url_exists");
    assert_eq!(common::count_links(&pool).await, 1);
}

#[sqlx::test]
async fn test_submit_twice_stores_once(pool: PgPool) {
    let server = test_server(pool.clone());

    let first = server
        .post("/submit")
        .form(&[("textInput", "https://example.com/twice")])
        .await;
    let second = server
        .post("/submit")
        .form(&[("textInput", "https://example.com/twice")])
        .await;

    assert!(location(&first).starts_with("/?success=shortened&code="));
    assert_eq!(location(&second), "/?error=url_exists");
    assert_eq!(common::count_links(&pool).await, 1);
}

#[sqlx::test]
async fn test_submit_invalid_url(pool: PgPool) {
    let server = test_server(pool.clone());

    for input in ["not a url", "example.com", "http://"] {
        let response = server.post("/submit").form(&[("textInput", input)]).await;

        assert_eq!(response.status_code(), 303);
        assert_eq!(location(&response), "/?error=invalid_url", "input {input:?}");
    }

    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_submit_empty_input(pool: PgPool) {
    let server = test_server(pool.clone());

    for input in ["", "   "] {
        let response = server.post("/submit").form(&[("textInput", input)]).await;

        assert_eq!(location(&response), "/?error=no_input");
    }

    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_submit_missing_field(pool: PgPool) {
    let server = test_server(pool.clone());

    let response = server.post("/submit").form(&[("other", "x")]).await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(location(&response), "/?error=no_input");
}

#[sqlx::test]
async fn test_submit_trims_input(pool: PgPool) {
    let server = test_server(pool.clone());

    let response = server
        .post("/submit")
        .form(&[("textInput", "  https://example.com/trim  ")])
        .await;

    assert!(location(&response).starts_with("/?success=shortened&code="));
    assert!(common::code_for(&pool, "https://example.com/trim").await.is_some());
}

#[sqlx::test]
async fn test_get_submit_redirects_home(pool: PgPool) {
    let server = test_server(pool);

    let response = server.get("/submit").await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(location(&response), "/");
}

#[sqlx::test]
async fn test_index_shows_error_message(pool: PgPool) {
    let server = test_server(pool);

    let response = server.get("/").add_query_param("error", "url_exists").await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("name=\"textInput\""));
    assert!(body.contains("already been shortened"));
}

#[sqlx::test]
async fn test_index_shows_short_url(pool: PgPool) {
    let server = test_server(pool);

    let response = server
        .get("/")
        .add_query_param("success", "shortened")
        .add_query_param("code", "aB3xY")
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("http://sho.rt/aB3xY"));
}

#[sqlx::test]
async fn test_index_ignores_unknown_error(pool: PgPool) {
    let server = test_server(pool);

    let response = server.get("/").add_query_param("error", "bogus").await;

    response.assert_status_ok();
    assert!(!response.text().contains("class=\"notice error\""));
}

#[sqlx::test]
async fn test_submit_script_scheme_is_declined(pool: PgPool) {
    let server = test_server(pool.clone());

    for input in [
        "javascript://example.com/%0Aalert(document.cookie)",
        "ftp://files.example.com/pub",
    ] {
        let response = server.post("/submit").form(&[("textInput", input)]).await;

        assert_eq!(response.status_code(), 303);
        assert_eq!(location(&response), "/?error=invalid_url", "input {input:?}");
    }

    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_submit_embedded_newline_is_declined(pool: PgPool) {
    let server = test_server(pool.clone());

    for input in ["https://example.com/a\nb", "https://example.com/a\tb"] {
        let response = server.post("/submit").form(&[("textInput", input)]).await;

        assert_eq!(location(&response), "/?error=invalid_url", "input {input:?}");
    }

    assert_eq!(common::count_links(&pool).await, 0);
}
