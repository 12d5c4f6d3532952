use std::future::Future;
use std::io;
use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use configs::AppConfig;
use service::SeaOrmStorage;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect to the database and wrap it as the request pipeline's storage.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<ServerState> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    Ok(ServerState::new(Arc::new(SeaOrmStorage::new(db))))
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Serve `app` on `listener` until Ctrl+C or SIGTERM.
pub async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let app = build_app(state);

    let addr = cfg.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!(%addr, "listening");
    serve(listener, app).await
}

/// Resolves once `signal` fires. When its handler cannot be installed the
/// future parks forever, so a failed install never triggers shutdown.
async fn signal_or_pending<F>(signal: F, name: &str)
where
    F: Future<Output = io::Result<()>>,
{
    if let Err(err) = signal.await {
        error!(error = %err, signal = name, "unable to install signal handler");
        std::future::pending::<()>().await;
    }
}

async fn shutdown_signal() {
    let ctrl_c = signal_or_pending(tokio::signal::ctrl_c(), "ctrl_c");

    #[cfg(unix)]
    let terminate = signal_or_pending(
        async {
            use tokio::signal::unix::{signal, SignalKind};
            signal(SignalKind::terminate())?.recv().await;
            Ok::<(), io::Error>(())
        },
        "sigterm",
    );

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
