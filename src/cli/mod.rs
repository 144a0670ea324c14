//! Command-line entry points
//!
//! - `serve`: run the HTTP API
//! - `ask`: answer one query through the cache and print the result

pub mod ask;
pub mod serve;

use std::net::SocketAddr;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;

/// Vector Semantic Cache - similarity-based response cache
#[derive(Parser)]
#[command(name = "vector-semantic-cache")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Look up a single query and print the response as JSON
    Ask(ask::AskArgs),
}

/// Load `.env` and layered configuration, falling back to defaults
pub fn load_config() -> AppConfig {
    dotenvy::dotenv().ok();

    match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration, using defaults: {}", e);
            AppConfig::default()
        }
    }
}

fn build_socket_addr(config: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    )))
}
