//! Energy Ledger - Command Line Binary
//!
//! Seeds a ledger with sample data and runs one command against it.
//!
//! # Usage
//!
//! ```bash
//! # Show system statistics
//! cargo run --bin energy-ledger -- stats
//!
//! # Search Ontario customers named Smith
//! cargo run --bin energy-ledger -- search Smith --province Ontario
//!
//! # Write the monthly report as JSON
//! LEDGER_SEED=42 cargo run --bin energy-ledger -- report --json --output report.json
//! ```
//!
//! # Environment Variables
//!
//! * `LEDGER_SEED` - Sample data seed (default: 3400)
//! * `LEDGER_CUSTOMERS_PER_PROVINCE` - Customers per province (default: 100)
//! * `LEDGER_TRADE_COUNT` - Import/export trades (default: 30)
//! * `LEDGER_TIMEZONE` - IANA timezone for dates (default: America/Toronto)
//! * `LEDGER_REPORT_PATH` - Monthly report file (default: monthly_report.txt)
//! * `LEDGER_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `LEDGER_RATES__SOLAR` etc. - Per-category rate overrides

use anyhow::Context;
use clap::Parser;
use core_kernel::{Clock, SystemClock};
use interface_cli::{build_ledger, cli::Cli, config::LedgerConfig, run};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = LedgerConfig::from_env().context("failed to load configuration")?;
    cli.apply_to(&mut config);

    init_tracing(&config.log_level);

    let now = SystemClock.now();
    tracing::info!(
        seed = config.seed,
        customers_per_province = config.customers_per_province,
        timezone = %config.timezone,
        command = ?cli.command,
        "Starting energy ledger"
    );

    let mut ledger = build_ledger(&config, now)?;
    let stdout = std::io::stdout();
    run(&cli.command, &config, &mut ledger, now, &mut stdout.lock())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
