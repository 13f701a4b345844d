use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        browse::browse,
        catalog::{list_authors, list_genres},
        create::create_quote,
        health::livez,
        random::random_quote,
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState) -> Router {
    // Answers preflight requests; the header layers below stamp the same
    // values on every other response.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/quotes", get(browse))
        .route("/quote", get(random_quote).post(create_quote))
        .route("/genres", get(list_genres))
        .route("/authors", get(list_authors))
        .route("/livez", get(livez))
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type,Authorization"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET,POST,OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        ))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{HeaderMap, Request, StatusCode},
        response::Response,
    };
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use novamuse_core::quote::{NewQuote, Quote};
    use novamuse_core::storage::{
        Page, PageKey, QuoteIndex, QuoteRepository, RepositoryError, Result, SortOrder,
    };

    use super::*;
    use crate::config::Config;
    use crate::storage::InMemoryRepository;

    const TABLE: &str = "NovaMuseQuotes";

    fn quote(text: &str, author: &str, genre: &str, minute: i64) -> Quote {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap();
        Quote::new(
            NewQuote {
                text: text.to_string(),
                author: author.to_string(),
                genre: genre.to_string(),
                source: "Collected Works".to_string(),
            },
            start + ChronoDuration::minutes(minute),
        )
    }

    /// Ten sci-fi and ten fantasy quotes, inserted alternately.
    fn twenty_quotes() -> Vec<Quote> {
        let mut quotes = Vec::new();
        for i in 0..10 {
            let sci_fi = format!("sci-fi quote {i}");
            let fantasy = format!("fantasy quote {i}");
            quotes.push(quote(&sci_fi, "Asimov", "sci-fi", 2 * i));
            quotes.push(quote(&fantasy, "Tolkien", "fantasy", 2 * i + 1));
        }
        quotes
    }

    /// `count` quotes by the same author in one genre, a minute apart.
    fn anonymous_quotes(genre: &str, count: i64) -> Vec<Quote> {
        (0..count)
            .map(|i| quote(&format!("quote {i}"), "Anon", genre, i))
            .collect()
    }

    fn app_with(repo: InMemoryRepository) -> Router {
        create_app(AppState::new(Arc::new(repo), Config::new(TABLE)))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response: Response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, headers, json)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let (status, _, body) = send(app, get(uri)).await;
        (status, body)
    }

    fn post_quote(body: Value, groups: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/quote")
            .header("content-type", "application/json");
        if let Some(groups) = groups {
            builder = builder.header("x-auth-groups", groups);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn admin_post(body: Value) -> Request<Body> {
        post_quote(body, Some("admins"))
    }

    fn full_body() -> Value {
        json!({
            "text": "Do or do not. There is no try.",
            "author": "Yoda",
            "genre": "sci-fi",
            "source": "Star Wars: The Empire Strikes Back"
        })
    }

    fn texts(body: &Value) -> Vec<String> {
        body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|q| q["text"].as_str().unwrap().to_string())
            .collect()
    }

    fn refused() -> RepositoryError {
        RepositoryError::ConnectionFailed("connection refused".to_string())
    }

    /// Fails every call.
    struct BrokenRepository;

    #[async_trait]
    impl QuoteRepository for BrokenRepository {
        async fn query(
            &self,
            _index: QuoteIndex,
            _partition_key: &str,
            _limit: Option<usize>,
            _exclusive_start_key: Option<PageKey>,
            _order: SortOrder,
        ) -> Result<Page<Quote>> {
            Err(refused())
        }

        async fn scan(
            &self,
            _limit: Option<usize>,
            _exclusive_start_key: Option<PageKey>,
        ) -> Result<Page<Quote>> {
            Err(refused())
        }

        async fn scan_index_keys(
            &self,
            _index: QuoteIndex,
            _exclusive_start_key: Option<PageKey>,
        ) -> Result<Page<String>> {
            Err(refused())
        }

        async fn put_if_absent(&self, _quote: &Quote) -> Result<()> {
            let err = RepositoryError::QueryFailed("Throughput exceeded".to_string());
            Err(err)
        }
    }

    fn broken_app() -> Router {
        let state = AppState::new(Arc::new(BrokenRepository), Config::new(TABLE));
        create_app(state)
    }

    // ------------------------------------------------------------------
    // Browse
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_browse_genre_pages_in_creation_order() {
        let repo = InMemoryRepository::with_quotes(twenty_quotes());

        let uri = "/quotes?limit=5&genre=sci-fi";
        let (status, first) = get_json(app_with(repo.clone()), uri).await;
        assert_eq!(status, StatusCode::OK);
        let expected: Vec<String> = (0..5).map(|i| format!("sci-fi quote {i}")).collect();
        assert_eq!(texts(&first), expected);
        let cursor = first["nextCursor"].as_str().unwrap().to_string();

        let uri = format!("/quotes?limit=5&genre=sci-fi&cursor={cursor}");
        let (status, second) = get_json(app_with(repo), &uri).await;
        assert_eq!(status, StatusCode::OK);
        let expected: Vec<String> = (5..10).map(|i| format!("sci-fi quote {i}")).collect();
        assert_eq!(texts(&second), expected);
        assert_eq!(second["nextCursor"], Value::Null);
    }

    #[tokio::test]
    async fn test_browse_limit_larger_than_partition() {
        let app = app_with(InMemoryRepository::with_quotes(twenty_quotes()));

        let (status, body) = get_json(app, "/quotes?limit=15&genre=fantasy").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["items"].as_array().unwrap().len(), 10);
        assert_eq!(body["nextCursor"], Value::Null);
    }

    #[tokio::test]
    async fn test_browse_descending_order() {
        let repo = InMemoryRepository::with_quotes(twenty_quotes());
        let mut config = Config::new(TABLE);
        config.browse_order = SortOrder::Descending;
        let app = create_app(AppState::new(Arc::new(repo), config));

        let (_, body) = get_json(app, "/quotes?limit=2&genre=fantasy").await;

        assert_eq!(texts(&body), ["fantasy quote 9", "fantasy quote 8"]);
    }

    #[tokio::test]
    async fn test_browse_author_only() {
        let app = app_with(InMemoryRepository::with_quotes(twenty_quotes()));

        let (_, body) = get_json(app, "/quotes?author=Tolkien&limit=50").await;

        let items = body["items"].as_array().unwrap();
        assert_eq!(items.len(), 10);
        assert!(items.iter().all(|q| q["author"] == "Tolkien"));
    }

    #[tokio::test]
    async fn test_browse_post_filter_suppresses_cursor() {
        let mut quotes = twenty_quotes();
        quotes.push(quote("Sand worms ahead.", "Herbert", "sci-fi", -1));
        let app = app_with(InMemoryRepository::with_quotes(quotes));

        let (status, body) = get_json(app, "/quotes?genre=sci-fi&author=Herbert&limit=5").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(texts(&body), ["Sand worms ahead."]);
        assert_eq!(body["nextCursor"], Value::Null);
    }

    #[tokio::test]
    async fn test_browse_post_filter_keeps_cursor_when_nothing_removed() {
        let app = app_with(InMemoryRepository::with_quotes(twenty_quotes()));

        let (_, body) = get_json(app, "/quotes?genre=sci-fi&author=Asimov&limit=3").await;

        assert_eq!(body["items"].as_array().unwrap().len(), 3);
        assert!(body["nextCursor"].is_string());
    }

    #[tokio::test]
    async fn test_browse_scan_defaults_and_clamps_limit() {
        let repo = InMemoryRepository::with_quotes(anonymous_quotes("misc", 60));

        let (_, body) = get_json(app_with(repo.clone()), "/quotes").await;
        assert_eq!(body["items"].as_array().unwrap().len(), 10);

        let (_, body) = get_json(app_with(repo.clone()), "/quotes?limit=100").await;
        assert_eq!(body["items"].as_array().unwrap().len(), 50);
        assert!(body["nextCursor"].is_string());

        let (_, body) = get_json(app_with(repo), "/quotes?limit=abc").await;
        assert_eq!(body["items"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_browse_items_expose_only_public_attributes() {
        let app = app_with(InMemoryRepository::with_quotes(twenty_quotes()));

        let (_, body) = get_json(app, "/quotes?limit=1").await;

        let item = body["items"][0].as_object().unwrap();
        let mut fields: Vec<&str> = item.keys().map(String::as_str).collect();
        fields.sort();
        assert_eq!(
            fields.join(","),
            "author,createdAt,genre,quoteId,source,text"
        );
    }

    #[tokio::test]
    async fn test_browse_malformed_cursor_is_500() {
        let app = app_with(InMemoryRepository::with_quotes(twenty_quotes()));

        let (status, body) = get_json(app, "/quotes?cursor=not-base64!!").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_browse_cursor_for_wrong_path_is_500() {
        let repo = InMemoryRepository::with_quotes(twenty_quotes());

        let (_, first) = get_json(app_with(repo.clone()), "/quotes?limit=2").await;
        let scan_cursor = first["nextCursor"].as_str().unwrap().to_string();

        let uri = format!("/quotes?genre=sci-fi&cursor={scan_cursor}");
        let (status, body) = get_json(app_with(repo), &uri).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("starting key"));
    }

    #[tokio::test]
    async fn test_browse_duplicate_parameter_is_json_500() {
        let request = get("/quotes?limit=5&limit=6");

        let (status, headers, body) = send(app_with(InMemoryRepository::new()), request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(headers["content-type"], "application/json");
        assert!(body["error"].as_str().unwrap().contains("duplicate field"));
    }

    #[tokio::test]
    async fn test_browse_storage_failure_is_500() {
        let (status, body) = get_json(broken_app(), "/quotes?genre=sci-fi").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Connection failed: connection refused");
    }

    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_create_then_duplicate() {
        let repo = InMemoryRepository::new();

        let (status, _, body) = send(app_with(repo.clone()), admin_post(full_body())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Quote created successfully");
        assert_eq!(body["quoteId"].as_str().unwrap().len(), 8);

        let stored = repo.scan(None, None).await.unwrap();
        assert_eq!(stored.items.len(), 1);
        assert_eq!(stored.items[0].quote_id.len(), 8);

        let (status, _, body) = send(app_with(repo.clone()), admin_post(full_body())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body, json!({ "error": "Quote already exists" }));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_duplicate_detection_ignores_case_and_spacing() {
        let repo = InMemoryRepository::new();
        send(app_with(repo.clone()), admin_post(full_body())).await;

        let mut variant = full_body();
        variant["text"] = json!("  do OR do not.   there is no TRY. ");
        let (status, _, _) = send(app_with(repo.clone()), admin_post(variant)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_requires_admin() {
        let repo = InMemoryRepository::new();

        let request = post_quote(full_body(), Some("readers"));
        let (status, _, body) = send(app_with(repo.clone()), request).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body["error"].as_str().unwrap().contains("Admins only"));

        let request = post_quote(full_body(), None);
        let (status, _, _) = send(app_with(repo.clone()), request).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_accepts_group_list_claim() {
        let repo = InMemoryRepository::new();

        let groups = r#"["editors","admins"]"#;
        let request = post_quote(full_body(), Some(groups));
        let (status, _, _) = send(app_with(repo.clone()), request).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_create_missing_field_is_400() {
        let repo = InMemoryRepository::new();
        let body = json!({ "text": "Incomplete quote" });

        let (status, _, body) = send(app_with(repo.clone()), admin_post(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("required"));
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn test_create_authorization_checked_before_validation() {
        let body = json!({ "text": "Incomplete quote" });

        let request = post_quote(body, Some("readers"));
        let (status, _, _) = send(app_with(InMemoryRepository::new()), request).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_create_unparsable_body_is_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/quote")
            .header("x-auth-groups", "admins")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, _, body) = send(app_with(InMemoryRepository::new()), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_create_unexpected_storage_failure_is_opaque_500() {
        let (status, _, body) = send(broken_app(), admin_post(full_body())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Internal Server Error" }));
    }

    #[tokio::test]
    async fn test_create_honors_configured_admin_group_and_header() {
        let repo = InMemoryRepository::new();
        let mut config = Config::new(TABLE);
        config.admin_group = "curators".to_string();
        config.groups_header = "x-claims-groups".to_string();
        let app = create_app(AppState::new(Arc::new(repo.clone()), config));

        let request = Request::builder()
            .method("POST")
            .uri("/quote")
            .header("X-Claims-Groups", "curators")
            .body(Body::from(full_body().to_string()))
            .unwrap();
        let (status, _, _) = send(app, request).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(repo.len().await, 1);
    }

    // ------------------------------------------------------------------
    // Random / lookup
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_lookup_by_author() {
        let repo = InMemoryRepository::with_quotes([
            quote("Do or do not. There is no try.", "Yoda", "sci-fi", 1),
            quote("Fear is the mind-killer.", "Paul Atreides", "sci-fi", 2),
        ]);
        let app = app_with(repo);

        let (status, body) = get_json(app, "/quote?author=Yoda").await;

        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["author"], "Yoda");
    }

    #[tokio::test]
    async fn test_lookup_by_genre_is_capped() {
        let repo = InMemoryRepository::with_quotes(anonymous_quotes("sci-fi", 30));
        let app = app_with(repo);

        let (_, body) = get_json(app, "/quote?genre=sci-fi").await;

        assert_eq!(body.as_array().unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_random_with_configured_genre() {
        let repo = InMemoryRepository::with_quotes(twenty_quotes());
        let mut config = Config::new(TABLE);
        config.random_genre = Some("fantasy".to_string());
        let app = create_app(AppState::new(Arc::new(repo), config));

        let (status, body) = get_json(app, "/quote").await;

        assert_eq!(status, StatusCode::OK);
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["genre"], "fantasy");
        assert!(items[0]["text"].is_string());
    }

    #[tokio::test]
    async fn test_random_is_deterministic_with_seed() {
        let repo = InMemoryRepository::with_quotes(twenty_quotes());
        let mut config = Config::new(TABLE);
        config.random_seed = Some(1234);

        let mut picks = Vec::new();
        for _ in 0..2 {
            let state = AppState::new(Arc::new(repo.clone()), config.clone());
            let (_, body) = get_json(create_app(state), "/quote").await;
            picks.push(body);
        }

        assert_eq!(picks[0], picks[1]);
        assert_eq!(picks[0].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_random_loads_genre_cache_once() {
        let repo = InMemoryRepository::with_quotes(twenty_quotes());
        let state = AppState::new(Arc::new(repo), Config::new(TABLE));
        let genres = state.genres.clone();

        assert!(!genres.is_loaded().await);
        get_json(create_app(state.clone()), "/quote").await;
        assert!(genres.is_loaded().await);

        let cached = genres
            .get_or_load(|| async { Err::<Vec<String>, ()>(()) })
            .await
            .unwrap();
        assert_eq!(cached.as_slice(), ["fantasy", "sci-fi"]);
    }

    #[tokio::test]
    async fn test_random_on_empty_table() {
        let (status, body) = get_json(app_with(InMemoryRepository::new()), "/quote").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_lookup_duplicate_parameter_is_json_400() {
        let request = get("/quote?author=a&author=b");

        let (status, headers, body) = send(app_with(InMemoryRepository::new()), request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(headers["content-type"], "application/json");
        assert!(body["error"].as_str().unwrap().contains("duplicate field"));
    }

    #[tokio::test]
    async fn test_random_storage_failure_is_500() {
        let (status, body) = get_json(broken_app(), "/quote?author=Yoda").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
    }

    // ------------------------------------------------------------------
    // Genres / authors
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_list_genres_and_authors_on_empty_table() {
        let repo = InMemoryRepository::new();

        let (status, genres) = get_json(app_with(repo.clone()), "/genres").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(genres, json!([]));

        let (status, authors) = get_json(app_with(repo), "/authors").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(authors, json!([]));
    }

    #[tokio::test]
    async fn test_list_genres_and_authors_across_scan_pages() {
        let mut quotes = twenty_quotes();
        quotes.push(quote("Boo.", "Poe", "horror", 50));
        let repo = InMemoryRepository::with_quotes(quotes).with_scan_page_size(3);

        let (_, genres) = get_json(app_with(repo.clone()), "/genres").await;
        assert_eq!(genres, json!(["fantasy", "horror", "sci-fi"]));

        let (_, authors) = get_json(app_with(repo), "/authors").await;
        assert_eq!(authors, json!(["Asimov", "Poe", "Tolkien"]));
    }

    #[tokio::test]
    async fn test_list_storage_failure_is_500() {
        let (status, body) = get_json(broken_app(), "/genres").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
    }

    // ------------------------------------------------------------------
    // Headers and health
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn test_responses_carry_cors_and_json_headers() {
        let (_, headers, _) = send(app_with(InMemoryRepository::new()), get("/genres")).await;

        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(
            headers["access-control-allow-headers"],
            "Content-Type,Authorization"
        );
        assert_eq!(headers["access-control-allow-methods"], "GET,POST,OPTIONS");
        assert_eq!(headers["content-type"], "application/json");
    }

    #[tokio::test]
    async fn test_error_responses_carry_cors_headers() {
        let (_, headers, _) = send(
            app_with(InMemoryRepository::new()),
            post_quote(full_body(), None),
        )
        .await;

        assert_eq!(headers["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn test_preflight() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/quote")
            .header("origin", "http://localhost:5173")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();

        let (status, headers, _) = send(app_with(InMemoryRepository::new()), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], "GET,POST,OPTIONS");
    }

    #[tokio::test]
    async fn test_livez() {
        let (status, _) = get_json(app_with(InMemoryRepository::new()), "/livez").await;
        assert_eq!(status, StatusCode::OK);
    }
}
