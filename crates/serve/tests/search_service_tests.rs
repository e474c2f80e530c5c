//! Integration tests for the search service
//!
//! The full application (middleware stack included) is driven with
//! `tower::ServiceExt::oneshot` against the bundled reference dataset.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;
use usersearch_core::{Dataset, SearchErrorResponse, UserRecord};
use usersearch_serve::{create_app, AppState, ServerConfig, FAULT_INJECTION_TOKEN};

const DATASET: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/dataset.json");
const TOKEN: &str = "583-asgl-1s4gh-789b";

fn test_config(fault_injection: bool) -> ServerConfig {
    ServerConfig {
        dataset_path: DATASET.into(),
        access_tokens: vec![TOKEN.to_string()],
        fault_injection,
        ..ServerConfig::default()
    }
}

/// Creates the full application over the reference dataset
fn create_test_router(fault_injection: bool) -> Router {
    let config = test_config(fault_injection);
    let state = AppState::new(&config, Dataset::load_all(DATASET).unwrap());
    create_app(state, &config)
}

struct TestResponse {
    status: StatusCode,
    has_next_page: Option<String>,
    total_count: Option<String>,
    request_id: Option<String>,
    body: Vec<u8>,
}

impl TestResponse {
    fn users(&self) -> Vec<UserRecord> {
        serde_json::from_slice(&self.body).unwrap()
    }

    fn error(&self) -> String {
        let payload: SearchErrorResponse = serde_json::from_slice(&self.body).unwrap();
        payload.error
    }
}

/// Helper to make a GET request with an optional access token
async fn get(router: Router, uri: &str, token: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header("AccessToken", token);
    }

    let response = router
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .map(|v| v.to_str().unwrap().to_string())
    };
    let status = response.status();
    let has_next_page = header("x-has-next-page");
    let total_count = header("x-total-count");
    let request_id = header("x-request-id");

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        has_next_page,
        total_count,
        request_id,
        body,
    }
}

#[tokio::test]
async fn test_search_single_match() {
    let response = get(
        create_test_router(false),
        "/search?query=Boyd&limit=30&offset=0&order_field=Age&order_by=-1",
        Some(TOKEN),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.has_next_page.as_deref(), Some("false"));
    assert_eq!(response.total_count.as_deref(), Some("1"));

    let users = response.users();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].id, 0);
    assert_eq!(users[0].name, "Boyd Wolf");
    assert_eq!(users[0].age, 22);
}

#[tokio::test]
async fn test_search_next_page_flag() {
    let response = get(
        create_test_router(false),
        "/search?query=commodo%20e&limit=2&offset=0&order_field=Id&order_by=1",
        Some(TOKEN),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.has_next_page.as_deref(), Some("true"));
    assert_eq!(response.total_count.as_deref(), Some("3"));

    let ids: Vec<u32> = response.users().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![34, 1]);
}

#[tokio::test]
async fn test_search_page_size_is_capped() {
    let response = get(
        create_test_router(false),
        "/search?limit=1000&offset=0&order_by=0",
        Some(TOKEN),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.users().len(), 35);
    assert_eq!(response.has_next_page.as_deref(), Some("false"));
}

#[tokio::test]
async fn test_search_offset_past_end() {
    let response = get(
        create_test_router(false),
        "/search?limit=5&offset=100&order_by=0",
        Some(TOKEN),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.users().is_empty());
    assert_eq!(response.total_count.as_deref(), Some("35"));
}

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let response = get(
        create_test_router(false),
        "/search?limit=5&offset=0&order_by=0",
        None,
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error(), "unauthorized");
}

#[tokio::test]
async fn test_unknown_token_checked_before_params() {
    // invalid params must not leak past a bad token
    let response = get(
        create_test_router(false),
        "/search?limit=-1&offset=0&order_by=7",
        Some("wrong-token"),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error(), "unauthorized");
}

#[tokio::test]
async fn test_bearer_token_accepted() {
    let router = create_test_router(false);
    let response = router
        .oneshot(
            Request::builder()
                .uri("/search?limit=1&offset=0&order_by=0")
                .header("Authorization", format!("Bearer {}", TOKEN))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_validation_reasons() {
    let cases = [
        ("/search?offset=0&order_by=0", "ErrorBadParam"),
        ("/search?limit=abc&offset=0&order_by=0", "ErrorBadParam"),
        ("/search?limit=5&offset=0", "ErrorBadParam"),
        ("/search?limit=0&offset=0&order_by=0", "ErrorBadLimit"),
        ("/search?limit=-3&offset=0&order_by=0", "ErrorBadLimit"),
        ("/search?limit=5&offset=-1&order_by=0", "ErrorBadOffset"),
        ("/search?limit=5&offset=0&order_by=2", "ErrorBadOrderBy"),
        (
            "/search?limit=5&offset=0&order_by=1&order_field=Something",
            "ErrorBadOrderField",
        ),
        // order_by is checked before order_field
        (
            "/search?limit=5&offset=0&order_by=9&order_field=Something",
            "ErrorBadOrderBy",
        ),
    ];

    for (uri, reason) in cases {
        let response = get(create_test_router(false), uri, Some(TOKEN)).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "uri: {}", uri);
        assert_eq!(response.error(), reason, "uri: {}", uri);
    }
}

#[tokio::test]
async fn test_fault_injection_returns_500_and_recovers() {
    let router = create_test_router(true);

    let response = get(
        router.clone(),
        "/search?limit=5&offset=0&order_by=0",
        Some(FAULT_INJECTION_TOKEN),
    )
    .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.error(), "internal server error");

    // the service keeps answering after the failure
    let response = get(router, "/search?limit=5&offset=0&order_by=0", Some(TOKEN)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.users().len(), 5);
}

#[tokio::test]
async fn test_fault_injection_disabled_is_unauthorized() {
    let response = get(
        create_test_router(false),
        "/search?limit=5&offset=0&order_by=0",
        Some(FAULT_INJECTION_TOKEN),
    )
    .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let response = get(create_test_router(false), "/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    let health: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["records"], 35);
}

#[tokio::test]
async fn test_request_id_header_present() {
    let response = get(create_test_router(false), "/health", None).await;
    let request_id = response.request_id.expect("x-request-id header");
    assert!(uuid::Uuid::parse_str(&request_id).is_ok());
}
