//! solwatch - Solana wallet & token watchlist monitor

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use solwatch::adapters::jupiter::DEFAULT_SLIPPAGE_BPS;
use solwatch::application::{QueryService, SweepRunner};
use solwatch::config::load_config;

/// solwatch - Solana wallet & token watchlist monitor
#[derive(Parser, Debug)]
#[command(
    name = "solwatch",
    version = env!("CARGO_PKG_VERSION"),
    about = "Solana wallet & token watchlist monitor",
    long_about = "Runs scheduled monitoring sweeps over a watchlist of wallets and tokens, \
                  detects balance and price changes against the previous snapshot, and \
                  renders markdown reports. Also answers one-shot price, balance, quote, \
                  and network queries."
)]
struct CliApp {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one monitoring sweep (fetch, detect, persist, report)
    Sweep(SweepCmd),

    /// Check the price of a token
    Price(PriceCmd),

    /// Check the SOL balance of a wallet
    Balance(BalanceCmd),

    /// Get a Jupiter swap quote
    Quote(QuoteCmd),

    /// Show network status (slot, blockhash, TPS)
    Network(NetworkCmd),
}

#[derive(Parser, Debug)]
struct SweepCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    /// Override the data directory for snapshots and alerts
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PriceCmd {
    /// Token symbol or mint address (defaults to SOL)
    #[arg(value_name = "TOKEN", default_value = "SOL")]
    token: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,
}

#[derive(Parser, Debug)]
struct BalanceCmd {
    /// Wallet address
    #[arg(value_name = "ADDRESS")]
    address: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,
}

#[derive(Parser, Debug)]
struct QuoteCmd {
    /// Input token symbol or mint (e.g., SOL)
    #[arg(value_name = "FROM")]
    from: String,

    /// Output token symbol or mint (e.g., USDC)
    #[arg(value_name = "TO")]
    to: String,

    /// Amount of the input token
    #[arg(value_name = "AMOUNT")]
    amount: f64,

    /// Slippage tolerance in basis points
    #[arg(long, value_name = "BPS", default_value_t = DEFAULT_SLIPPAGE_BPS)]
    slippage: u16,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,
}

#[derive(Parser, Debug)]
struct NetworkCmd {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Secrets and env watchlists live in .env, not in config.toml
    dotenvy::dotenv().ok();

    let app = CliApp::parse();
    init_logging(app.verbose, app.debug);

    match app.command {
        Command::Sweep(cmd) => sweep_command(cmd).await,
        Command::Price(cmd) => price_command(cmd).await,
        Command::Balance(cmd) => balance_command(cmd).await,
        Command::Quote(cmd) => quote_command(cmd).await,
        Command::Network(cmd) => network_command(cmd).await,
    }
}

fn init_logging(verbose: bool, debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt().with_env_filter(filter).init();
}

async fn sweep_command(cmd: SweepCmd) -> Result<()> {
    let mut config = load_config(Some(&cmd.config)).context("Failed to load configuration")?;
    if let Some(dir) = cmd.data_dir {
        config.monitor.data_dir = dir.to_string_lossy().into_owned();
    }

    let runner = SweepRunner::from_config(&config).context("Failed to set up sweep")?;
    let outcome = runner.run().await.context("Sweep failed")?;

    tracing::info!(
        snapshot = %outcome.snapshot_path.display(),
        alerts = outcome.alerts.len(),
        "sweep complete"
    );

    println!("{}", outcome.report);
    Ok(())
}

async fn price_command(cmd: PriceCmd) -> Result<()> {
    let config = load_config(Some(&cmd.config)).context("Failed to load configuration")?;
    let queries = QueryService::from_config(&config).context("Failed to set up clients")?;

    println!("{}", queries.price(&cmd.token).await);
    Ok(())
}

async fn balance_command(cmd: BalanceCmd) -> Result<()> {
    let config = load_config(Some(&cmd.config)).context("Failed to load configuration")?;
    let queries = QueryService::from_config(&config).context("Failed to set up clients")?;

    println!("{}", queries.balance(&cmd.address).await);
    Ok(())
}

async fn quote_command(cmd: QuoteCmd) -> Result<()> {
    let config = load_config(Some(&cmd.config)).context("Failed to load configuration")?;
    let queries = QueryService::from_config(&config).context("Failed to set up clients")?;

    println!(
        "{}",
        queries
            .quote(&cmd.from, &cmd.to, cmd.amount, cmd.slippage)
            .await
    );
    Ok(())
}

async fn network_command(cmd: NetworkCmd) -> Result<()> {
    let config = load_config(Some(&cmd.config)).context("Failed to load configuration")?;
    let queries = QueryService::from_config(&config).context("Failed to set up clients")?;

    println!("{}", queries.network().await);
    Ok(())
}
