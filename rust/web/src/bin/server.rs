//! Standalone table server
//!
//! Usage: cargo run -p nebula_web --bin nebula-table-server -- --port 4000

use std::path::PathBuf;

use clap::Parser;
use nebula_web::{ConfigOverrides, ServerConfig, WebServer};

#[derive(Parser, Debug)]
#[command(
    name = "nebula-table-server",
    version,
    about = "Single-table Texas Hold'em server: one hero against four bots"
)]
struct Args {
    /// TOML config file (overrides NEBULA_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    host: Option<String>,
    #[arg(long, short = 'p')]
    port: Option<u16>,
    /// Directory holding table.json and users.json
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Bot policy name (calling-station)
    #[arg(long)]
    bot_policy: Option<String>,
    /// Fixed shuffle seed for reproducible deals
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    nebula_web::init_logging()?;

    let resolved = ServerConfig::load(args.config.as_deref())?.apply_overrides(ConfigOverrides {
        host: args.host,
        port: args.port,
        data_dir: args.data_dir,
        bot_policy: args.bot_policy,
        seed: args.seed,
    })?;
    tracing::debug!(sources = ?resolved.sources, "configuration resolved");

    let handle = WebServer::new(resolved.config)?.start().await?;
    println!("Table server running at http://{}", handle.address());
    println!("Press Ctrl+C to stop");

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    handle.shutdown().await?;

    Ok(())
}
