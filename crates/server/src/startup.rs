use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::observability;
use crate::routes::{self, AppState};
use service::{records::RecordRepository, runtime};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Router for a store that has already been opened.
pub fn build_app(records: Arc<dyn RecordRepository>, public_dir: &str) -> Router {
    routes::build_router(AppState::new(records), public_dir, build_cors())
}

async fn start_admin(cfg: &AppConfig) -> Result<(), StartupError> {
    if !cfg.admin.enabled {
        return Ok(());
    }
    let addr = cfg
        .admin
        .socket_addr()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    // The task lives for the rest of the process.
    let _ = common::admin_http::spawn_admin_server(addr, observability::encode_metrics).await?;
    Ok(())
}

/// Serve `app` on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    Ok(())
}

async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; shutdown only by process exit");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Public entry: open the store, build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let records = runtime::open_file_store(&cfg.storage).await?;
    let app = build_app(records, &cfg.storage.public_dir);

    start_admin(&cfg).await?;

    let addr: SocketAddr = cfg.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;
    info!(%addr, public_dir = %cfg.storage.public_dir, "server listening");
    serve(listener, app, ctrl_c()).await?;
    Ok(())
}
