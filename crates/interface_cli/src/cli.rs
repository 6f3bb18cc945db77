//! Command line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use core_kernel::Timezone;

use crate::config::LedgerConfig;

/// Energy provider billing ledger.
/// Seeds a ledger with deterministic sample data and runs one operation on it.
#[derive(Parser, Debug)]
#[command(name = "energy-ledger", version, long_about)]
pub struct Cli {
    /// Seed for the sample data (overrides LEDGER_SEED)
    #[arg(long, global = true)]
    pub seed: Option<u64>,
    /// Customers generated per province (overrides LEDGER_CUSTOMERS_PER_PROVINCE)
    #[arg(long, global = true)]
    pub customers: Option<u32>,
    /// Trades generated (overrides LEDGER_TRADE_COUNT)
    #[arg(long, global = true)]
    pub trades: Option<u32>,
    /// IANA timezone for dates (overrides LEDGER_TIMEZONE)
    #[arg(long, global = true)]
    pub timezone: Option<Timezone>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Find customers by id, name or email
    Search {
        /// Text to look for; empty matches everyone
        #[arg(default_value = "")]
        query: String,
        /// Only show customers in this province
        #[arg(short, long)]
        province: Option<String>,
    },
    /// List customers with overdue bills
    Overdue,
    /// Send payment reminders to overdue customers
    Remind,
    /// Bill every customer with usage this period
    Bill,
    /// Show system statistics
    Stats,
    /// Write the monthly report
    Report {
        /// Output file (overrides LEDGER_REPORT_PATH)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Applies command line overrides to `config`
    pub fn apply_to(&self, config: &mut LedgerConfig) {
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(customers) = self.customers {
            config.customers_per_province = customers;
        }
        if let Some(trades) = self.trades {
            config.trade_count = trades;
        }
        if let Some(timezone) = self.timezone {
            config.timezone = timezone;
        }
        if let Command::Report { output: Some(path), .. } = &self.command {
            config.report_path = path.clone();
        }
    }
}
