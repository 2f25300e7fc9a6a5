use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use std::{fs, path::Path};

use crate::domain::analytics::{PnlRange, DEFAULT_VOLUME_WINDOW_DAYS};
use crate::domain::ledger::DEFAULT_PAGE_SIZE;
use crate::domain::portfolio::{FeePool, VaultBalance};
use crate::domain::synthetic::{HistoryWindow, TransactionProfile, DEFAULT_SEED, DEFAULT_TRANSACTION_COUNT, SERIES_END};
use crate::shared::utils::end_of_day;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneratorCfg {
    pub seed: u64,
    pub transaction_seed: u64,
    pub transaction_count: usize,
    pub history_start: NaiveDate,
    pub phase2_start: NaiveDate,
    pub phase3_start: NaiveDate,
    pub history_end: NaiveDate,
    pub reference_price: f64,
    pub price_spread: f64,
}

impl Default for GeneratorCfg {
    fn default() -> Self {
        let window = HistoryWindow::default();
        let profile = TransactionProfile::default();
        Self {
            seed: DEFAULT_SEED,
            transaction_seed: 7,
            transaction_count: DEFAULT_TRANSACTION_COUNT,
            history_start: window.start,
            phase2_start: window.phase2_start,
            phase3_start: window.phase3_start,
            history_end: window.end,
            reference_price: profile.reference_price,
            price_spread: profile.price_spread,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LedgerCfg {
    pub page_size: usize,
    pub export_prefix: String,
}

impl Default for LedgerCfg {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            export_prefix: "solswap".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalyticsCfg {
    pub volume_window_days: u32,
    /// Reference "today" for the volume window
    pub as_of: NaiveDate,
    /// "all" or a day count such as "30d"
    pub pnl_range: String,
}

impl Default for AnalyticsCfg {
    fn default() -> Self {
        Self {
            volume_window_days: DEFAULT_VOLUME_WINDOW_DAYS,
            as_of: SERIES_END,
            pnl_range: PnlRange::default().to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PortfolioCfg {
    pub sol_balance: f64,
    pub usdc_balance: f64,
    pub sol_price: f64,
    pub fee_pool_balance: f64,
    pub fee_pool_min: f64,
    pub fee_pool_target: f64,
    /// Starting capital the return percentages are measured against
    pub sol_base: f64,
    pub usdc_base: f64,
}

impl Default for PortfolioCfg {
    fn default() -> Self {
        Self {
            sol_balance: 24.5,
            usdc_balance: 3842.5,
            sol_price: 148.32,
            fee_pool_balance: 0.085,
            fee_pool_min: 0.05,
            fee_pool_target: 0.15,
            sol_base: 5.0,
            usdc_base: 1200.0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub generator: GeneratorCfg,
    pub ledger: LedgerCfg,
    pub analytics: AnalyticsCfg,
    pub portfolio: PortfolioCfg,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = fs::read_to_string(path.as_ref())
            .with_context(|| format!("read config file {}", path.as_ref().display()))?;
        let cfg: Self = toml::from_str(&s)
            .with_context(|| format!("parse config file {}", path.as_ref().display()))?;
        Ok(cfg)
    }

    /// File values when a path is given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn history_window(&self) -> HistoryWindow {
        HistoryWindow {
            start: self.generator.history_start,
            phase2_start: self.generator.phase2_start,
            phase3_start: self.generator.phase3_start,
            end: self.generator.history_end,
        }
    }

    /// Ledger spread over the same days as the PnL history
    pub fn transaction_profile(&self) -> TransactionProfile {
        let span_days = (self.history_window().total_days() + 1).max(1) as u32;
        TransactionProfile {
            start: self.generator.history_start,
            span_days,
            reference_price: self.generator.reference_price,
            price_spread: self.generator.price_spread,
        }
    }

    /// Last second of the as-of date
    pub fn as_of_instant(&self) -> DateTime<Utc> {
        end_of_day(self.analytics.as_of)
    }

    pub fn pnl_range(&self) -> Result<PnlRange> {
        self.analytics
            .pnl_range
            .parse()
            .with_context(|| format!("analytics.pnl_range '{}'", self.analytics.pnl_range))
    }

    pub fn vaults(&self) -> (VaultBalance, VaultBalance) {
        (
            VaultBalance::new(self.portfolio.sol_balance, self.portfolio.sol_price),
            VaultBalance::new(self.portfolio.usdc_balance, 1.0),
        )
    }

    pub fn fee_pool(&self) -> FeePool {
        FeePool {
            balance: self.portfolio.fee_pool_balance,
            min_threshold: self.portfolio.fee_pool_min,
            target_threshold: self.portfolio.fee_pool_target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_defaults_match_mock_dashboard() {
        let cfg = Config::default();
        assert_eq!(cfg.generator.seed, 42);
        assert_eq!(cfg.generator.transaction_count, 55);
        assert_eq!(cfg.history_window(), HistoryWindow::default());
        assert_eq!(cfg.transaction_profile(), TransactionProfile::default());
        assert_eq!(cfg.ledger.page_size, 25);
        assert_eq!(cfg.pnl_range().unwrap(), PnlRange::Days(90));
        assert_eq!(cfg.as_of_instant().to_rfc3339(), "2026-02-11T23:59:59+00:00");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            [generator]
            seed = 1234
            history_end = "2026-02-01"

            [analytics]
            pnl_range = "all"

            [portfolio]
            sol_price = 150.0
            "#,
        )
        .unwrap();

        assert_eq!(cfg.generator.seed, 1234);
        assert_eq!(cfg.generator.history_end, ymd(2026, 2, 1));
        assert_eq!(cfg.generator.history_start, ymd(2025, 11, 14));
        assert_eq!(cfg.generator.transaction_count, 55);
        assert_eq!(cfg.pnl_range().unwrap(), PnlRange::All);
        assert_eq!(cfg.vaults().0.usd_price, 150.0);
        assert_eq!(cfg.fee_pool().target_threshold, 0.15);
        assert_eq!(cfg.ledger.export_prefix, "solswap");
    }

    #[test]
    fn test_bad_pnl_range_is_reported() {
        let mut cfg = Config::default();
        cfg.analytics.pnl_range = "fortnight".to_string();
        assert!(cfg.pnl_range().is_err());
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let path = std::env::temp_dir().join(format!("solswap-bad-config-{}.toml", std::process::id()));
        fs::write(&path, "[generator]\nseed = \"not a number\"\n").unwrap();
        let err = Config::from_file(&path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert_eq!(err.to_string(), format!("parse config file {}", path.display()));
    }

    #[test]
    fn test_missing_file_errors() {
        assert!(Config::from_file("/nonexistent/Solswap.toml").is_err());
        assert!(Config::load(None).is_ok());
    }
}
