//! tally-api - HTTP API server for tally

mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    http::{HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use tally_report::{
    AssignmentClassifier, EmployeeAssetIndexer, PaginatedAssetFetcher, SummaryAggregator,
};
use tally_store::{DocumentStore, MemoryStore};

use handlers::{
    add_asset, employees_with_assets, get_all_assets, get_summary, health_check,
    unassigned_assets,
};

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful for
/// log correlation and debugging production incidents.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// Application state shared across handlers.
///
/// Each report engine is an independent read path over the same store; they
/// share nothing but the store handle.
#[derive(Clone)]
struct AppState {
    store: Arc<dyn DocumentStore>,
    summary: SummaryAggregator,
    assets: PaginatedAssetFetcher,
    unassigned: AssignmentClassifier,
    employees: EmployeeAssetIndexer,
}

impl AppState {
    fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            summary: SummaryAggregator::new(store.clone()),
            assets: PaginatedAssetFetcher::new(store.clone()),
            unassigned: AssignmentClassifier::new(store.clone()),
            employees: EmployeeAssetIndexer::new(store.clone()),
            store,
        }
    }
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

#[derive(Debug)]
enum ApiError {
    /// Store failure surfaced with the underlying message for diagnostics.
    Internal(tally_core::Error),
    NotFound(String),
    BadRequest(String),
}

impl From<tally_core::Error> for ApiError {
    fn from(err: tally_core::Error) -> Self {
        match err {
            tally_core::Error::NotFound(msg) => ApiError::NotFound(msg),
            tally_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::Internal(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

// =============================================================================
// ROUTER
// =============================================================================

fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/get-summary", get(get_summary))
        .route("/get-all-assets", get(get_all_assets))
        .route("/unassigned-assets", get(unassigned_assets))
        .route("/employees-with-assets", get(employees_with_assets))
        .route("/add-asset", post(add_asset))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .with_state(state)
}

// =============================================================================
// STARTUP
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter (default: "tally_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tally_api=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // Optionally create a file appender with daily rotation
    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("tally-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer().with_writer(non_blocking);
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            } else {
                layer = layer.with_ansi(false); // no ANSI in files
            }
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        // Console-only output
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    // Get configuration from environment
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse()
        .unwrap_or(8000);

    // CORS: a single allowed frontend origin, or "*" to disable the check.
    let cors_origin =
        std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());
    let cors = if cors_origin == "*" {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(cors_origin.parse::<HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any)
    };
    info!(cors_origin = %cors_origin, "CORS configured");

    // The in-process backend; the production document store plugs in behind
    // the DocumentStore trait.
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let state = AppState::new(store);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "tally-api listening");

    axum::serve(listener, app(state).layer(cors)).await?;
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value as JsonValue};
    use tally_core::document_from_json;
    use tower::ServiceExt;

    async fn seeded_app() -> Router {
        let store = MemoryStore::new();
        store
            .insert_many(
                "Inventory_Laptop",
                vec![
                    document_from_json(json!({
                        "Material Name": "X1",
                        "Issued to": "Ana",
                        "Total Price": 900.0
                    }))
                    .unwrap(),
                    document_from_json(json!({
                        "Material Name": "T14",
                        "Issued to": "",
                        "Total Price": 700.0
                    }))
                    .unwrap(),
                ],
            )
            .await
            .unwrap();

        app(AppState::new(Arc::new(store)))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, JsonValue) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (status, body) = get_json(seeded_app().await, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], json!("ok"));
    }

    #[tokio::test]
    async fn test_get_summary_shape() {
        let (status, body) = get_json(seeded_app().await, "/get-summary").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["assigned_assets"], json!(1));
        assert_eq!(body["available_assets"], json!(1));
        assert_eq!(body["total_assets"], json!(2));
        assert_eq!(body["total_spent_summary"]["Inventory_Laptop"], json!(1600.0));
    }

    #[tokio::test]
    async fn test_get_all_assets_defaults() {
        let (status, body) = get_json(seeded_app().await, "/get-all-assets").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["current_page"], json!(1));
        assert_eq!(body["total_assets"], json!(2));
        assert_eq!(body["assets"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_get_all_assets_rejects_unknown_collection() {
        let (status, body) =
            get_json(seeded_app().await, "/get-all-assets?collection=Inventory_Nope").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("Inventory_Nope"));
    }

    #[tokio::test]
    async fn test_get_all_assets_rejects_oversized_limit() {
        let (status, _) = get_json(seeded_app().await, "/get-all-assets?limit=501").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unassigned_assets_endpoint() {
        let (status, body) = get_json(seeded_app().await, "/unassigned-assets").await;
        assert_eq!(status, StatusCode::OK);
        let assets = body["unassigned_assets"].as_array().unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0]["Material Name"], json!("T14"));
    }

    #[tokio::test]
    async fn test_employees_with_assets_endpoint() {
        let (status, body) = get_json(seeded_app().await, "/employees-with-assets").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["employees"]["Ana"][0]["Material Name"],
            json!("X1")
        );
    }

    #[tokio::test]
    async fn test_employees_with_assets_404_when_none_assigned() {
        let empty = app(AppState::new(Arc::new(MemoryStore::new())));
        let (status, body) = get_json(empty, "/employees-with-assets").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("no employees"));
    }

    #[tokio::test]
    async fn test_add_asset_rejects_non_canonical_collection() {
        let app = seeded_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/add-asset")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({
                            "collection": "users",
                            "data": {"Material Name": "rogue"},
                            "added_by": "admin@example.org"
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_add_asset_inserts_and_is_listed() {
        let store = MemoryStore::new();
        let state = AppState::new(Arc::new(store));
        let router = app(state);

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/add-asset")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        json!({
                            "collection": "Inventory_Furniture",
                            "data": {"Material Name": "standing desk"},
                            "added_by": "admin@example.org"
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let (status, body) = get_json(router, "/get-all-assets").await;
        assert_eq!(status, StatusCode::OK);
        let assets = body["assets"].as_array().unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0]["Material Name"], json!("standing desk"));
        assert_eq!(assets[0]["added_by"], json!("admin@example.org"));
    }
}
