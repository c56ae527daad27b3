use std::path::Path;
use std::sync::Arc;

use axum::{
    routing::{get, post, put},
    Json, Router,
};
use service::records::RecordRepository;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

pub mod records;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub records: Arc<dyn RecordRepository>,
}

impl AppState {
    pub fn new(records: Arc<dyn RecordRepository>) -> Self {
        Self { records }
    }
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: record routes, health, and static
/// assets from `public_dir` for everything else.
pub fn build_router(state: AppState, public_dir: &str, cors: CorsLayer) -> Router {
    let index = Path::new(public_dir).join("index.html");
    let static_dir = ServeDir::new(public_dir).fallback(ServeFile::new(index));

    let record_routes = Router::new()
        .route("/getter", get(records::getter))
        .route("/putter", put(records::putter))
        .route("/purger/:key", post(records::purger));

    Router::new()
        .route("/health", get(health))
        .merge(record_routes)
        .fallback_service(static_dir)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径，级别 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // 响应返回时记录状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx 以 ERROR 记录
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
