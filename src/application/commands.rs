//! CLI commands and handlers
use clap::{Args, Parser, Subcommand};
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::info;

use crate::application::services::DashboardService;
use crate::config::Config;
use crate::domain::analytics::{pnl_chart_series, volume_chart_series, PnlRange};
use crate::domain::ledger::{QueryParams, QuerySpec};
use crate::shared::errors::AppError;
use crate::shared::utils::{bps_to_percent, format_number, format_usd, truncate_signature};

#[derive(Parser, Debug)]
#[command(name = "solswap")]
#[command(version, about = "SOL/USDC vault dashboard: PnL history, swap ledger and portfolio")]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// PRNG seed for the PnL history (overrides config)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// PRNG seed for the ledger (overrides config)
    #[arg(long, global = true)]
    pub transaction_seed: Option<u64>,

    /// Log filter, e.g. "debug" or "solswap=trace"
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// CLI flags take priority over file values
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.generator.seed = seed;
        }
        if let Some(seed) = self.transaction_seed {
            config.generator.transaction_seed = seed;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Daily PnL history
    History {
        /// "all" or a day count such as 30 or 7d
        #[arg(short, long)]
        range: Option<String>,
    },

    /// Filtered, sorted and paginated swap ledger
    Transactions {
        #[command(flatten)]
        query: LedgerArgs,

        /// 1-based page number
        #[arg(short, long)]
        page: Option<usize>,

        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Write the filtered ledger to a CSV file
    Export {
        #[command(flatten)]
        query: LedgerArgs,

        /// Directory the CSV file is written to
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
    },

    /// Weekly swap volume per direction
    Volume {
        /// Trailing window in days (overrides config)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Vault balances, fee pool and all-time PnL
    Portfolio {
        /// Value the SOL vault at this USD price instead of the configured one
        #[arg(long)]
        sol_price: Option<f64>,
    },
}

/// Ledger filter and sort flags shared by `transactions` and `export`
#[derive(Args, Debug, Clone, Default)]
pub struct LedgerArgs {
    /// all, sol_to_usdc or usdc_to_sol
    #[arg(long = "type")]
    pub filter_type: Option<String>,

    /// all, confirmed, pending or failed
    #[arg(long)]
    pub status: Option<String>,

    /// Inclusive start date, YYYY-MM-DD
    #[arg(long)]
    pub from: Option<String>,

    /// Inclusive end date, YYYY-MM-DD
    #[arg(long)]
    pub to: Option<String>,

    /// Sort field, e.g. date, amountIn, fee
    #[arg(long)]
    pub sort: Option<String>,

    /// asc or desc
    #[arg(long)]
    pub dir: Option<String>,
}

impl LedgerArgs {
    fn to_spec(&self, page: Option<usize>, page_size: Option<usize>) -> Result<QuerySpec, AppError> {
        let params = QueryParams {
            filter_type: self.filter_type.clone(),
            filter_status: self.status.clone(),
            date_from: self.from.clone(),
            date_to: self.to.clone(),
            sort_field: self.sort.clone(),
            sort_dir: self.dir.clone(),
            page,
            page_size,
        };
        Ok(QuerySpec::try_from(params)?)
    }
}

pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute the selected command
    pub fn execute(command: Commands, service: &DashboardService, json: bool) -> Result<(), AppError> {
        match command {
            Commands::History { range } => Self::execute_history_command(range, service, json),
            Commands::Transactions { query, page, page_size } => {
                let page_size = page_size.or(Some(service.config().ledger.page_size));
                let spec = query.to_spec(page, page_size)?;
                Self::execute_transactions_command(&spec, service, json)
            }
            Commands::Export { query, out } => {
                let spec = query.to_spec(None, None)?;
                Self::execute_export_command(&spec, out, service)
            }
            Commands::Volume { days } => Self::execute_volume_command(days, service, json),
            Commands::Portfolio { sol_price } => Self::execute_portfolio_command(sol_price, service, json),
        }
    }

    fn execute_history_command(range: Option<String>, service: &DashboardService, json: bool) -> Result<(), AppError> {
        let range = match range {
            Some(range) => range.parse::<PnlRange>()?,
            None => service
                .config()
                .pnl_range()
                .map_err(|e| AppError::ConfigError(format!("{:#}", e)))?,
        };
        let samples = service.pnl(range);
        info!("PnL history: {} of {} days ({})", samples.len(), service.history().len(), range);

        if json {
            return print_json(&pnl_chart_series(samples));
        }

        println!(
            "{:<12} {:>10} {:>12} {:>10} {:>12} {:>10} {:>12} {:>9}",
            "Date", "Daily", "Cumulative", "SOL", "SOL cum", "USDC", "USDC cum", "SOL/USD"
        );
        for s in samples {
            println!(
                "{:<12} {:>10} {:>12} {:>10.4} {:>12.4} {:>10} {:>12} {:>9}",
                s.date.format("%Y-%m-%d").to_string(),
                format_number(s.daily_pnl, 2),
                format_number(s.cumulative_pnl, 2),
                s.daily_sol_pnl,
                s.cumulative_sol_pnl,
                format_number(s.daily_usdc_pnl, 2),
                format_number(s.cumulative_usdc_pnl, 2),
                format_number(s.sol_price, 2),
            );
        }
        Ok(())
    }

    fn execute_transactions_command(spec: &QuerySpec, service: &DashboardService, json: bool) -> Result<(), AppError> {
        let page = service.page(spec);

        if json {
            return print_json(&page);
        }

        println!(
            "{:>4}  {:<20} {:<14} {:>12} {:>12} {:>9} {:>9} {:<10} {}",
            "ID", "Date", "Type", "Amount In", "Amount Out", "Slippage", "Fee", "Status", "Signature"
        );
        for tx in &page.records {
            println!(
                "{:>4}  {:<20} {:<14} {:>12} {:>12} {:>8}% {:>9} {:<10} {}",
                tx.id,
                tx.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                tx.direction.label(),
                format!("{} {}", format_number(tx.amount_in, tx.token_in().display_decimals()), tx.token_in()),
                format!("{} {}", format_number(tx.amount_out, tx.token_out().display_decimals()), tx.token_out()),
                bps_to_percent(tx.slippage_bps),
                tx.fee,
                tx.status,
                truncate_signature(&tx.signature),
            );
        }
        println!("{}  |  {}", page.info.summary(), page.info.indicator());
        Ok(())
    }

    fn execute_export_command(spec: &QuerySpec, out: PathBuf, service: &DashboardService) -> Result<(), AppError> {
        let csv = service.export_csv(spec)?;
        fs::create_dir_all(&out)?;
        let path = out.join(service.export_filename(Utc::now().date_naive()));
        fs::write(&path, csv)?;
        info!("CSV written to {}", path.display());
        println!("{}", path.display());
        Ok(())
    }

    fn execute_volume_command(days: Option<u32>, service: &DashboardService, json: bool) -> Result<(), AppError> {
        let buckets = service.weekly_volume(days);

        if json {
            return print_json(&volume_chart_series(&buckets));
        }

        println!("{:<12} {:>14} {:>14}", "Week of", "SOL -> USDC", "USDC -> SOL");
        for bucket in &buckets {
            println!(
                "{:<12} {:>14} {:>14}",
                bucket.week_start.format("%Y-%m-%d").to_string(),
                format_usd(bucket.sol_to_usdc as f64),
                format_usd(bucket.usdc_to_sol as f64),
            );
        }
        if buckets.is_empty() {
            println!("No swaps in the window");
        }
        Ok(())
    }

    fn execute_portfolio_command(sol_price: Option<f64>, service: &DashboardService, json: bool) -> Result<(), AppError> {
        let snapshot = service.portfolio(sol_price)?;

        if json {
            return print_json(&snapshot);
        }

        println!("Total value   {}", format_usd(snapshot.total_value_usd));
        println!(
            "SOL vault     {} SOL  ({}, {:.1}%)",
            format_number(snapshot.sol.balance, 4),
            format_usd(snapshot.sol.usd_value()),
            snapshot.allocation.sol_pct
        );
        println!(
            "USDC vault    {} USDC  ({}, {:.1}%)",
            format_number(snapshot.usdc.balance, 2),
            format_usd(snapshot.usdc.usd_value()),
            snapshot.allocation.usdc_pct
        );
        println!(
            "Fee pool      {} SOL  ({})  {}  [{:.0}% of target, min at {:.0}%]",
            format_number(snapshot.fee_pool.balance, 4),
            format_usd(snapshot.fee_pool_usd),
            snapshot.fee_pool_health.as_str(),
            snapshot.fee_pool.fill_pct(),
            snapshot.fee_pool.min_marker_pct()
        );
        println!("All-time PnL  {}", format_usd(snapshot.pnl.all_time_pnl));
        println!(
            "  SOL leg     {} SOL  ({:+.2}%)",
            format_number(snapshot.pnl.all_time_sol_pnl, 4),
            snapshot.pnl.sol_return_pct
        );
        println!(
            "  USDC leg    {} USDC  ({:+.2}%)",
            format_number(snapshot.pnl.all_time_usdc_pnl, 2),
            snapshot.pnl.usdc_return_pct
        );
        Ok(())
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::{Filter, SortDirection, SortField};
    use crate::shared::types::{Direction, TxStatus};

    #[test]
    fn test_cli_parses_transactions_flags() {
        let cli = Cli::try_parse_from([
            "solswap", "--seed", "7", "transactions", "--type", "usdc_to_sol", "--status", "failed", "--sort",
            "fee", "--dir", "asc", "--page", "2",
        ])
        .unwrap();
        assert_eq!(cli.seed, Some(7));

        let Commands::Transactions { query, page, page_size } = cli.command else {
            panic!("expected transactions command");
        };
        let spec = query.to_spec(page, page_size).unwrap();
        assert_eq!(spec.filter_direction, Filter::Only(Direction::UsdcToSol));
        assert_eq!(spec.filter_status, Filter::Only(TxStatus::Failed));
        assert_eq!(spec.sort_field, SortField::Fee);
        assert_eq!(spec.sort_direction, SortDirection::Asc);
        assert_eq!(spec.page, 2);
    }

    #[test]
    fn test_bad_query_flags_are_errors() {
        let args = LedgerArgs { sort: Some("price".to_string()), ..Default::default() };
        assert!(matches!(args.to_spec(None, None), Err(AppError::QueryError(_))));

        let args = LedgerArgs { from: Some("11/14/2025".to_string()), ..Default::default() };
        assert!(args.to_spec(None, None).is_err());
        assert!(LedgerArgs::default().to_spec(Some(0), None).is_err());
    }

    #[test]
    fn test_overrides_take_priority() {
        let cli = Cli::try_parse_from(["solswap", "portfolio", "--seed", "99", "--json"]).unwrap();
        let mut config = Config::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.generator.seed, 99);
        assert_eq!(config.generator.transaction_seed, 7);
        assert!(cli.json);
    }

    #[test]
    fn test_export_writes_file() {
        let service = DashboardService::from_config(Config::default()).unwrap();
        let out = std::env::temp_dir().join(format!("solswap-export-test-{}", std::process::id()));
        CommandExecutor::execute(Commands::Export { query: LedgerArgs::default(), out: out.clone() }, &service, false)
            .unwrap();

        let written: Vec<_> = fs::read_dir(&out).unwrap().collect();
        assert_eq!(written.len(), 1);
        let contents = fs::read_to_string(written[0].as_ref().unwrap().path()).unwrap();
        assert_eq!(contents.lines().count(), 56);
        fs::remove_dir_all(&out).unwrap();
    }
}
