use axum::{Router, routing::get};
use scrawl_server::{
    collab::{DocumentStore, EmbeddedDocument, SyncCollaborator},
    config::Config,
    handlers::{GateState, PadState, pad_routes, status_routes, sync_routes},
    sync::BroadcastRelay,
};
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scrawl_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration; a missing signing key refuses to serve
    let config = match Config::from_env() {
        Ok(c) => Arc::new(c),
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Starting Scrawl Server v{}", env!("CARGO_PKG_VERSION"));
    info!("Deployment mode: {:?}", config.mode);

    // Create shared state
    let relay = BroadcastRelay::new();
    let documents: Arc<dyn DocumentStore> = Arc::new(EmbeddedDocument);
    let sync: Arc<dyn SyncCollaborator> = Arc::new(relay.clone());

    let pad_state = PadState {
        config: config.clone(),
        documents,
    };
    let gate_state = GateState {
        config: config.clone(),
        sync,
    };

    // Build the router
    let app = Router::new()
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Status endpoint
        .merge(status_routes(relay))
        // Pad entry (id assignment + credential issuance)
        .merge(pad_routes(pad_state))
        // Gated sync endpoint
        .merge(sync_routes(gate_state))
        // Add layers
        .layer(TraceLayer::new_for_http());

    // Create listener
    let addr = config.server_addr();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    info!("Server listening on http://{}", addr);

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    info!("Server shut down gracefully");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
