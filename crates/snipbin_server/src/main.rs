//! snipbin API server entrypoint.

use snipbin_server::{
    config, constants, serve_router, spawn_expiry_sweep, AppState, Config, MemoryStore,
    PasteStore, RedbStore, StoreBackend, DEFAULT_PORT,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn parse_cli_flags(args: &[String]) -> anyhow::Result<bool> {
    let mut help = false;
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" => help = true,
            value => {
                anyhow::bail!(
                    "Unknown argument: '{}'. Use --help to see supported options.",
                    value
                );
            }
        }
    }
    Ok(help)
}

fn open_store(config: &Config) -> anyhow::Result<(Arc<dyn PasteStore>, bool)> {
    match config.backend() {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory paste store (pastes do not survive restarts)");
            Ok((Arc::new(MemoryStore::new()), true))
        }
        StoreBackend::Redb(path) => {
            let store = RedbStore::open(&path)?;
            // Reconcile rows whose TTL elapsed while the process was down.
            let purged = store.purge_expired()?;
            if purged > 0 {
                tracing::info!("Purged {} expired pastes at startup", purged);
            }
            tracing::info!("Using redb paste store at {}", path.display());
            Ok((Arc::new(store), false))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snipbin=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    if parse_cli_flags(&args)? {
        print_help();
        return Ok(());
    }

    let config = Config::from_env();
    let (store, is_memory) = open_store(&config)?;

    if is_memory {
        // The durable backend purges lazily on read instead.
        spawn_expiry_sweep(store.clone());
    }

    let state = AppState::new(config.clone(), store);

    let allow_public = config::env_flag_enabled("ALLOW_PUBLIC_ACCESS");
    if allow_public {
        tracing::warn!("Public access enabled - server will accept requests from any address");
    }

    let bind_addr = snipbin_server::resolve_bind_address(&config, allow_public);
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let actual_addr = listener.local_addr().unwrap_or(bind_addr);
    tracing::info!("snipbin running at http://{}", actual_addr);

    serve_router(listener, state, shutdown_signal()).await?;

    tracing::info!("Server stopped");
    Ok(())
}

fn print_help() {
    println!("snipbin server\n");
    println!("Usage: snipbin [OPTIONS]\n");
    println!("Options:");
    println!("  --help            Show this help message");
    println!("\nEnvironment variables:");
    println!(
        "  PORT                 Server port (default: {})",
        DEFAULT_PORT
    );
    println!("  DB_PATH              Directory for the durable redb store; unset = in-memory");
    println!(
        "  MAX_CONTENT_CHARS    Maximum paste length in characters (default: {})",
        constants::DEFAULT_MAX_CONTENT_CHARS
    );
    println!("  ALLOW_PUBLIC_ACCESS  Allow binding to non-loopback addresses");
    println!(
        "  BIND                 Override bind address (e.g. 0.0.0.0:{})",
        DEFAULT_PORT
    );
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
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
}
