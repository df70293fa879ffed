//! Server entry point.

use api::config::Config;
use metrics_exporter_prometheus::PrometheusHandle;
use storage::{DocumentStorage, FileStorage, InMemoryStorage};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

async fn serve<S: DocumentStorage + 'static>(
    config: &Config,
    storage: S,
    metrics_handle: PrometheusHandle,
) {
    let state = api::create_state(storage, config.store_config()).await;
    let app = api::create_app(state, metrics_handle);

    let addr = config.addr();
    tracing::info!(%addr, reject_policy = %config.reject_policy, "starting server");

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind address");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

#[tokio::main]
async fn main() {
    // 1. Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {e}");
            std::process::exit(2);
        }
    };

    // 2. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 3. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 4. Open storage and serve
    match &config.data_dir {
        Some(dir) => {
            let storage = FileStorage::open(dir)
                .await
                .expect("failed to open data directory");
            tracing::info!(dir = %dir.display(), "using file storage");
            serve(&config, storage, metrics_handle).await;
        }
        None => {
            tracing::warn!("EMS_DATA_DIR not set, data will not survive a restart");
            serve(&config, InMemoryStorage::new(), metrics_handle).await;
        }
    }

    tracing::info!("server shut down gracefully");
}
