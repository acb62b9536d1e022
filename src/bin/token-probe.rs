use std::io;

use anyhow::Result;
use clap::Parser;
use token_probe::session;
use token_probe::utils::config_loader;
use token_probe::utils::constants::DEFAULT_CONFIG_PATH;
use token_probe::utils::logging;
use token_probe::utils::logging::LogLevel;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "PROBE_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// overrides the token from the config file
    #[arg(long, env = "PROBE_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// decode and print the token, send no probes
    #[arg(long)]
    inspect_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read args, load YAML config
    // -------------------------------

    let args = Args::parse();
    let probe_config = config_loader::run(&args.config).await?;
    logging::run(&probe_config, args.log_level)?;

    // -------------------------------
    // 2. Resolve token (cli / env / file / literal)
    // -------------------------------

    let token = session::resolve_token(&probe_config, args.token).await?;

    // -------------------------------
    // 3. Inspect token, run probes, print summary
    // -------------------------------

    info!(config = %args.config, "token-probe starting...");
    let mut stdout = io::stdout().lock();
    session::run(&probe_config, token.as_deref(), args.inspect_only, &mut stdout).await?;

    Ok(())
}
