use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use panchang_core::PanchangService;
use panchang_web::{router, AppState};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "panchang-server")]
#[command(about = "Panchang aggregation and fallback API server")]
#[command(version)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "PANCHANG_BIND_ADDR", default_value = "0.0.0.0:3000")]
    bind: SocketAddr,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, env = "PANCHANG_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let state = Arc::new(AppState::new(PanchangService::from_env()));
    let listener = TcpListener::bind(cli.bind).await?;
    info!(address = %listener.local_addr()?, "panchang server listening");

    axum::serve(listener, router(state)).await?;
    Ok(())
}
