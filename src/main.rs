use anyhow::Context;
use clap::Parser;
use std::sync::Arc;

use nocache_serve::config::{AppState, Cli, Config};
use nocache_serve::logger;
use nocache_serve::server::{self, ShutdownSignal};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = Config::load(&cli).context("failed to load configuration")?;
    logger::init(&cfg.logging)?;

    // Build the Tokio runtime, sizing the worker pool from config when set
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();

    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
        tracing::debug!(workers, "using configured worker threads");
    }

    let runtime = runtime_builder
        .build()
        .context("failed to build Tokio runtime")?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> anyhow::Result<()> {
    let addr = cfg.get_socket_addr()?;
    let state = Arc::new(AppState::new(cfg)?);
    let listener = server::create_listener(addr)?;
    let shutdown = ShutdownSignal::register()?;

    let port = listener
        .local_addr()
        .context("failed to read listener address")?
        .port();
    tracing::debug!(%addr, root = %state.root.display(), "static file root resolved");
    println!("Serving at http://localhost:{port} (no-cache)");

    server::start_server_loop(listener, state, shutdown.recv()).await;
    Ok(())
}
