use axum::http::{header, HeaderValue, Method};
use configs::{AppConfig, ServerConfig};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use crate::{routes, state::AppState};
use service::runtime;

/// Permissive CORS when no origins are configured, otherwise an allow-list.
pub fn build_cors(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::very_permissive();
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

async fn bind(server: &ServerConfig) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind((server.host.as_str(), server.port)).await?;
    Ok(listener)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; running until killed");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Public entry: connect storage, build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    runtime::ensure_env(&cfg.server.frontend_dir, &cfg.database.url).await?;

    let db = models::db::connect_and_migrate(&cfg.database).await?;
    let state = AppState::new(db);

    let cors = build_cors(&cfg.server.cors_origins);
    let app = routes::build_router(state, cors, &cfg.server.frontend_dir);

    let listener = bind(&cfg.server).await?;
    let addr = listener.local_addr()?;
    info!(%addr, frontend = %cfg.server.frontend_dir, "parking api listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
