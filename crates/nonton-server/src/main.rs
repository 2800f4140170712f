use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nonton_api::consumer::ConsumerClient;
use nonton_api::HttpUpstream;
use nonton_core::config::AppConfig;
use nonton_core::{Envelope, EnvelopeCodec};
use nonton_server::{build_router, AppState};
use tracing::info;

mod logging;

#[derive(Parser)]
#[command(name = "nonton", version)]
#[command(about = "Media catalog aggregation server", long_about = None)]
struct Cli {
    /// Config file (defaults to the per-user config path)
    #[arg(short, long, global = true, env = "NONTON_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Address to bind, overriding the config
        #[arg(short, long)]
        bind: Option<String>,
    },
    /// Decode an envelope and print its payload. `-` reads stdin.
    Decode {
        /// The `data` string, or a whole `{"data": "..."}` object
        envelope: String,
    },
    /// Fetch a path from a running server and print the decoded payload
    Fetch {
        /// Route path, e.g. /api/komik/popular
        path: String,

        #[arg(long, default_value = "http://127.0.0.1:3000")]
        server: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("loading config")?;
    let _guard = logging::init(&config.logging);
    let codec = EnvelopeCodec::new(&config.envelope.secret);

    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => serve(config, codec, bind).await,
        Command::Decode { envelope } => decode(&codec, envelope),
        Command::Fetch { path, server } => {
            let client = ConsumerClient::new(&server, codec);
            let payload = client.fetch_value(&path).await?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(())
        }
    }
}

async fn serve(config: AppConfig, codec: EnvelopeCodec, bind: Option<String>) -> Result<()> {
    info!("Starting nonton v{}", env!("CARGO_PKG_VERSION"));

    let upstream = HttpUpstream::new(&config.upstream.base_url)?;
    info!("Upstream: {}", upstream.base_url());

    let state = AppState::new(upstream, codec, config.cache.freereels_home_ttl());
    let app = build_router(state);

    let bind = bind.unwrap_or(config.server.bind);
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("binding {bind}"))?;
    info!("nonton listening on http://{bind}");
    info!("Health check: http://{bind}/health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("nonton stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {e}");
    }
}

fn decode(codec: &EnvelopeCodec, input: String) -> Result<()> {
    let input = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        input
    };
    let input = input.trim();

    let payload: serde_json::Value = if input.starts_with('{') {
        let envelope: Envelope = serde_json::from_str(input).context("parsing envelope object")?;
        codec.decode(&envelope)?
    } else {
        codec.decode_str(input)?
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
