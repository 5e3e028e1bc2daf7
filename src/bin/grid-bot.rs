// Price Grid Bot - CLI entry point

use clap::{Parser, Subcommand};
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use price_grid_bot::{
    forward_shutdown_signal, BinanceTickerClient, Config, ConsoleReporter, GridAllocation, Ledger,
    TradingBot, TradingError, TradingResult,
};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Parser)]
#[command(name = "grid-bot")]
#[command(version)]
#[command(about = "Paper-trading grid bot driven by ticker price snapshots", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults apply when config.toml is absent)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the polling decision loop
    Run {
        /// Stop after this many cycles
        #[arg(long)]
        cycles: Option<u64>,
    },

    /// Fetch and print the currently tracked assets once
    Prices,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = execute(cli).await {
        error!(category = e.category(), "❌ {}", e);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn execute(cli: Cli) -> TradingResult<()> {
    if let Commands::Init { force } = cli.command {
        init_logging(cli.verbose, "info");
        let path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        return init_config(path, force);
    }

    let config = match cli.config.as_deref() {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(DEFAULT_CONFIG_PATH)?,
    };
    init_logging(cli.verbose, &config.logging.level);

    match cli.command {
        Commands::Run { cycles } => run_bot(&config, cycles).await,
        Commands::Prices => show_prices(&config).await,
        Commands::Init { .. } => Ok(()),
    }
}

fn init_logging(verbose: bool, level: &str) {
    let level = if verbose { "debug" } else { level };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn init_config(path: &str, force: bool) -> TradingResult<()> {
    if std::path::Path::new(path).exists() && !force {
        warn!("⚠️  {} already exists, skipping (use --force to overwrite)", path);
        return Ok(());
    }

    let default_config = include_str!("../../config.toml.example");
    std::fs::write(path, default_config).map_err(|e| TradingError::FileWrite(e.to_string()))?;
    info!("📝 Created {}", path);
    Ok(())
}

async fn run_bot(config: &Config, cycles: Option<u64>) -> TradingResult<()> {
    let allocation = GridAllocation::from(&config.grid);
    info!("🚀 Price Grid Bot (paper trading)");
    info!("📡 Feed: {} (suffix {}, top {})", config.feed.endpoint, config.feed.quote_suffix, config.feed.max_assets);
    info!(
        "💰 Capital: ${:.2} in {} partitions of ${:.2}",
        allocation.starting_capital,
        allocation.partitions,
        allocation.per_trade_allocation()
    );

    let feed = BinanceTickerClient::new(&config.feed);
    let mut bot = TradingBot::new(
        feed,
        ConsoleReporter::new(),
        Ledger::new(allocation),
        config.schedule.poll_interval(),
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(forward_shutdown_signal(tokio::signal::ctrl_c(), shutdown_tx));

    let reason = bot.run(shutdown_rx, cycles).await;
    info!(%reason, cycles = bot.state().cycle, "✅ Bot finished");
    Ok(())
}

async fn show_prices(config: &Config) -> TradingResult<()> {
    let client = BinanceTickerClient::new(&config.feed);
    let assets = client.try_fetch_top_assets().await?;

    if assets.is_empty() {
        warn!("⚠️  No {} pairs returned by {}", config.feed.quote_suffix, client.endpoint());
        return Ok(());
    }

    for asset in &assets {
        println!("{:<14} ${:.4}", asset.symbol, asset.price);
    }
    Ok(())
}
