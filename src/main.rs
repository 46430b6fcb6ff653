use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use tokio::signal;
use tracing::info;

use proxycat::actions;
use proxycat::api::routes::{create_router, AppState};
use proxycat::config::Config;
use proxycat::domain::{ActionKind, ActionOutcome};
use proxycat::observability::{init_tracing, MetricsRegistry};
use proxycat::probe::ProxyEndpoint;
use proxycat::store::{FileStore, SnapshotStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Initialize tracing
    init_tracing(&config.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting proxycat list connector"
    );

    let store = Arc::new(FileStore::new(&config.data_path)) as Arc<dyn SnapshotStore>;
    let proxy = ProxyEndpoint::from_config(&config);

    // One-shot mode: run a single action bracketed by load and save, report, exit.
    // Failures are reported in the JSON body, never as a process failure.
    if let Some(ref action) = config.action {
        let kind = ActionKind::from_str(action)
            .ok_or_else(|| anyhow::anyhow!("unknown action: {action}"))?;

        let report = match actions::run(kind, config.url.as_deref(), store.as_ref(), &proxy).await
        {
            Ok(outcome) => outcome,
            Err(e) => ActionOutcome::failure(e.to_string(), e.code()),
        };

        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    // Create application state
    let state = Arc::new(AppState {
        store,
        session_lock: parking_lot::Mutex::new(()),
        proxy,
        metrics: MetricsRegistry::new(),
        start_time: Instant::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    });

    // Create router
    let app = create_router(state);

    // Parse listen address
    let addr: SocketAddr = config.listen_addr.parse()?;

    info!(addr = %addr, "Starting HTTP server");

    // Create TCP listener
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Run server with graceful shutdown
    if config.graceful_shutdown {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
    } else {
        axum::serve(listener, app).await?;
    }

    info!("Shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Received shutdown signal");
}
