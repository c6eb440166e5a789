use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rinha_ledger::Ledger;
use rinha_ledger::api::build_app;
use rinha_ledger::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let ledger = Arc::new(Ledger::with_default_roster());
    info!(clients = ledger.clients().count(), "ledger ready");

    let listener = TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("failed to bind {}", config.addr()))?;
    info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, build_app(ledger))
        .await
        .context("server error")
}
