use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use promptsmith_api::config::ServerConfig;
use promptsmith_api::router::build_app_router;
use promptsmith_api::state::AppState;
use promptsmith_llm::DeepSeekClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "promptsmith_api=debug,promptsmith_llm=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        model = %config.llm.model,
        has_server_key = config.llm.api_key.is_some(),
        "Loaded server configuration",
    );

    // --- Completion client ---
    let provider = DeepSeekClient::new(
        config.llm.base_url.clone(),
        config.llm.model.clone(),
        config.llm.temperature,
    );

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        provider: Arc::new(provider),
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    let (signal_tx, signal_rx) = oneshot::channel::<()>();
    let mut server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                shutdown_signal().await;
                let _ = signal_tx.send(());
            })
            .await
    });

    // Once a signal arrives, in-flight streams get a bounded drain window.
    tokio::select! {
        result = &mut server => {
            result.expect("Server task panicked").expect("Server error");
        }
        Ok(()) = signal_rx => {
            let drain = Duration::from_secs(config.shutdown_timeout_secs);
            match tokio::time::timeout(drain, &mut server).await {
                Ok(result) => {
                    result.expect("Server task panicked").expect("Server error");
                }
                Err(_) => {
                    tracing::warn!(
                        timeout_secs = config.shutdown_timeout_secs,
                        "Drain timeout elapsed, dropping open connections",
                    );
                    server.abort();
                }
            }
        }
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
