//! echod: a line-oriented TCP echo server
//!
//! Each accepted connection is served by its own task. Every read is
//! scanned for the first newline byte and the prefix through that newline
//! is written back to the peer; a read without a newline ends the
//! connection with an explicit error.
//!
//! Features:
//! - Per-connection echo loop with a bounded receive buffer
//! - Connection cap via a semaphore
//! - Configuration via CLI arguments or TOML file

mod config;
mod error;
mod listener;
mod scan;
mod server;

use config::Config;
use server::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load configuration
    let config = Config::load()?;

    // Initialize logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!(
        listen = %config.listen,
        buffer_size = config.buffer_size,
        max_connections = config.max_connections,
        workers = ?config.workers,
        "Starting echod server"
    );

    let mut runtime = tokio::runtime::Builder::new_multi_thread();
    runtime.enable_all();
    if let Some(workers) = config.workers {
        runtime.worker_threads(workers);
    }

    runtime.build()?.block_on(Server::new(config).run())?;

    Ok(())
}
