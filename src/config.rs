//! Command-line and environment configuration.

use crate::fetch::{DEFAULT_MAX_BODY_BYTES, FetchConfig};
use clap::Args;
use std::net::SocketAddr;
use std::time::Duration;

/// Settings shared by every subcommand that talks to an upstream.
#[derive(Args, Debug, Clone)]
pub struct FetchArgs {
    /// Upstream request timeout in seconds
    #[arg(long, env = "JSON2XML_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Largest upstream body accepted, in bytes
    #[arg(long, env = "JSON2XML_MAX_BODY_BYTES", default_value_t = DEFAULT_MAX_BODY_BYTES)]
    pub max_body_bytes: usize,

    /// User-Agent sent upstream
    #[arg(long, env = "JSON2XML_USER_AGENT")]
    pub user_agent: Option<String>,
}

impl FetchArgs {
    pub fn to_fetch_config(&self) -> FetchConfig {
        let mut config = FetchConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            max_body_bytes: self.max_body_bytes,
            ..FetchConfig::default()
        };
        if let Some(agent) = &self.user_agent {
            config.user_agent = agent.clone();
        }
        config
    }
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "JSON2XML_LISTEN", default_value = "127.0.0.1:8080")]
    pub listen: SocketAddr,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

/// Top-level configuration for the HTTP service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub listen: SocketAddr,
    pub fetch: FetchConfig,
}

impl From<&ServeArgs> for ServerConfig {
    fn from(args: &ServeArgs) -> Self {
        Self {
            listen: args.listen,
            fetch: args.fetch.to_fetch_config(),
        }
    }
}
