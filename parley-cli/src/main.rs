use anyhow::Context;
use clap::Parser;
use colored::*;
use parley_server::{ServerConfig, SessionManager, app};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "parley")]
#[command(about = "Signaling server for peer-to-peer video meetings")]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:3000")]
    addr: SocketAddr,

    /// Outbound event queue capacity per connection.
    #[arg(long, default_value_t = 64)]
    send_queue: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let sessions = SessionManager::new(ServerConfig {
        send_queue_capacity: args.send_queue,
    });

    // Browser clients live on another origin than the signaling endpoint.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = app(sessions).layer(cors);

    println!("{}", "Parley signaling server".green().bold());
    info!("listening on ws://{}/ws", args.addr);

    let listener = tokio::net::TcpListener::bind(args.addr)
        .await
        .with_context(|| format!("failed to bind {}", args.addr))?;
    axum::serve(listener, router)
        .await
        .context("server terminated")?;

    Ok(())
}
