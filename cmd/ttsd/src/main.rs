//! ttsd - text-to-speech export server.

use anyhow::bail;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use qanet_tts::{ProviderIdentity, Router};

mod config;
mod handler;
mod server;

use config::{HeaderPolicy, ServerConfig};

/// ttsd - text-to-speech export server.
///
/// Serves `POST /api/tts`, synthesizing text with the configured provider
/// (mock, google, azure or aws) and falling back to a tone on any provider
/// failure.
///
/// Configuration is read from ~/.qanet/ttsd/config.yaml when present, then
/// from the environment, then from these flags.
#[derive(Parser)]
#[command(name = "ttsd")]
#[command(about = "Text-to-speech export server")]
#[command(version)]
struct Cli {
    /// Config file (default is ~/.qanet/ttsd/config.yaml)
    #[arg(long)]
    config: Option<String>,

    /// Listen address, e.g. :3001 or 127.0.0.1:3001
    #[arg(long)]
    addr: Option<String>,

    /// Synthesis provider: mock, google, azure or aws
    #[arg(long)]
    provider: Option<String>,

    /// Response header selection: configured or produced
    #[arg(long)]
    header_policy: Option<HeaderPolicy>,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn apply(&self, config: &mut ServerConfig) -> anyhow::Result<()> {
        if let Some(addr) = &self.addr {
            config.addr = addr.clone();
        }
        if let Some(name) = &self.provider {
            if !ProviderIdentity::is_known(name) {
                bail!("unknown provider '{}'", name);
            }
            config.tts.provider = ProviderIdentity::resolve(Some(name));
        }
        if let Some(policy) = self.header_policy {
            config.header_policy = policy;
        }
        Ok(())
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "qanet=debug,ttsd=debug,tower_http=debug"
    } else {
        "qanet=info,ttsd=info,tower_http=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = ServerConfig::load(cli.config.as_deref())?;
    for name in config.apply_env(|key| std::env::var(key).ok()) {
        warn!(variable = name, "ttsd: ignoring invalid environment value");
    }
    cli.apply(&mut config)?;

    let router = Router::from_config(&config.tts).await?;
    server::serve(&config, router).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "ttsd",
            "--addr",
            "127.0.0.1:9000",
            "--provider",
            "AWS",
            "--header-policy",
            "produced",
        ]);
        let mut config = ServerConfig::default();
        cli.apply(&mut config).unwrap();
        assert_eq!(config.addr, "127.0.0.1:9000");
        assert_eq!(config.tts.provider, ProviderIdentity::Aws);
        assert_eq!(config.header_policy, HeaderPolicy::Produced);
    }

    #[test]
    fn test_cli_rejects_unknown_provider() {
        let cli = Cli::parse_from(["ttsd", "--provider", "watson"]);
        assert!(cli.apply(&mut ServerConfig::default()).is_err());
    }

    #[test]
    fn test_cli_rejects_unknown_header_policy() {
        assert!(Cli::try_parse_from(["ttsd", "--header-policy", "both"]).is_err());
    }
}
