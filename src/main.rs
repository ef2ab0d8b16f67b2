//! authmap daemon: watches a mapping resource and serves it as an in-memory
//! lookup store.
//!
//! This binary wires the file-backed source to the sync loop; embedding the
//! library against a different backend replaces only the source.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use authmap::lifecycle::{signals, Shutdown};
use authmap::mapstore::MapStore;
use authmap::observability::{logging, metrics};
use authmap::sync::file::FileSource;
use authmap::sync::{SyncConfig, SyncEngine};

#[derive(Parser, Debug)]
#[command(name = "authmap", about = "Continuously-synchronized identity mapping store")]
struct Args {
    /// Path to the mapping document (YAML map of mapUsers/mapRoles/mapAccounts).
    #[arg(long)]
    source: PathBuf,

    /// Address for the Prometheus metrics exporter; disabled when omitted.
    #[arg(long)]
    metrics_address: Option<SocketAddr>,

    /// Base reconnect delay in milliseconds.
    #[arg(long, default_value_t = 200)]
    reconnect_base_ms: u64,

    /// Reconnect delay cap in milliseconds.
    #[arg(long, default_value_t = 30_000)]
    reconnect_max_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logging::init_logging();
    tracing::info!(source = ?args.source, "authmap starting");

    if let Some(addr) = args.metrics_address {
        metrics::init_metrics(addr);
    }

    let store = Arc::new(MapStore::new());
    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(&shutdown);

    let engine = SyncEngine::new(
        FileSource::new(&args.source),
        Arc::clone(&store),
        SyncConfig {
            reconnect_base_ms: args.reconnect_base_ms,
            reconnect_max_ms: args.reconnect_max_ms,
        },
    );

    // A fatal initial-watch failure propagates out of main: a store that can
    // never synchronize must not keep running as if it were authoritative.
    // The engine itself only observes shutdown between watches, so the
    // process-level exit races it with the signal directly.
    let mut signalled = shutdown.subscribe();
    tokio::select! {
        result = engine.run(shutdown.subscribe()) => result?,
        _ = signalled.recv() => {}
    }

    tracing::info!("shutdown complete");
    Ok(())
}
