//! Application services and use cases

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::domain::analytics::{pnl_range, weekly_volume, PnlRange};
use crate::domain::ledger::{evaluate, export_filename, paginate, to_csv, PageInfo, QuerySpec, RecordStore};
use crate::domain::portfolio::{pnl_summary, PortfolioSnapshot};
use crate::domain::synthetic::{generate_history_with, generate_transactions_with, ParkMiller};
use crate::shared::errors::AppError;
use crate::shared::types::{PnlSample, TransactionRecord, VolumeBucket};
use crate::shared::utils::validate_amount;

/// One page of a ledger query, owned so it can outlive the service borrow
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerPage {
    pub records: Vec<TransactionRecord>,
    pub info: PageInfo,
}

/// Read-only dashboard over a generated PnL history and ledger
pub struct DashboardService {
    config: Config,
    history: Vec<PnlSample>,
    store: RecordStore,
}

impl DashboardService {
    /// Generate both series from the configured seeds
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        if config.ledger.page_size == 0 {
            return Err(AppError::ConfigError("ledger.page_size must be at least 1".to_string()));
        }
        validate_price_band(config.generator.reference_price, config.generator.price_spread)?;

        let mut history_rng = ParkMiller::new(config.generator.seed)?;
        let history = generate_history_with(&mut history_rng, &config.history_window())?;

        let mut ledger_rng = ParkMiller::new(config.generator.transaction_seed)?;
        let records = generate_transactions_with(
            &mut ledger_rng,
            config.generator.transaction_count,
            &config.transaction_profile(),
        );

        info!(
            "Dashboard ready: {} PnL days (seed {}), {} ledger records (seed {})",
            history.len(),
            config.generator.seed,
            records.len(),
            config.generator.transaction_seed
        );

        Ok(Self {
            config,
            history,
            store: RecordStore::new(records),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn history(&self) -> &[PnlSample] {
        &self.history
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Full filtered and sorted result, ignoring pagination
    pub fn query(&self, spec: &QuerySpec) -> Vec<TransactionRecord> {
        evaluate(self.store.records(), spec)
    }

    pub fn page(&self, spec: &QuerySpec) -> LedgerPage {
        let matched = self.query(spec);
        let page = paginate(&matched, spec.page, spec.page_size);
        debug!("{}, {}", page.info.summary(), page.info.indicator());
        LedgerPage {
            records: page.items.to_vec(),
            info: page.info,
        }
    }

    /// CSV of every record the query matches, in query order
    pub fn export_csv(&self, spec: &QuerySpec) -> Result<String, AppError> {
        let matched = self.query(spec);
        let csv = to_csv(&matched)?;
        info!("Exported {} records to CSV", matched.len());
        Ok(csv)
    }

    pub fn export_filename(&self, date: NaiveDate) -> String {
        export_filename(&self.config.ledger.export_prefix, date)
    }

    /// Weekly buckets over the configured trailing window
    pub fn weekly_volume(&self, window_days: Option<u32>) -> Vec<VolumeBucket> {
        let window_days = window_days.unwrap_or(self.config.analytics.volume_window_days);
        let buckets = weekly_volume(self.store.records(), window_days, self.config.as_of_instant());
        debug!("{} volume buckets over {} days", buckets.len(), window_days);
        buckets
    }

    pub fn pnl(&self, range: PnlRange) -> &[PnlSample] {
        pnl_range(&self.history, range)
    }

    /// Snapshot at the configured SOL price, or at `sol_price` when given
    pub fn portfolio(&self, sol_price: Option<f64>) -> Result<PortfolioSnapshot, AppError> {
        let (mut sol, usdc) = self.config.vaults();
        if let Some(price) = sol_price {
            sol.usd_price = validate_amount(price)?;
        }
        let pnl = pnl_summary(&self.history, self.config.portfolio.sol_base, self.config.portfolio.usdc_base);
        Ok(PortfolioSnapshot::new(sol, usdc, self.config.fee_pool(), pnl))
    }
}

/// Every generated swap price must stay strictly positive
fn validate_price_band(reference_price: f64, price_spread: f64) -> Result<(), AppError> {
    if !reference_price.is_finite() || reference_price <= 0.0 {
        return Err(AppError::ConfigError(format!(
            "generator.reference_price must be positive, got {}",
            reference_price
        )));
    }
    if !price_spread.is_finite() || price_spread < 0.0 || price_spread >= 2.0 * reference_price {
        return Err(AppError::ConfigError(format!(
            "generator.price_spread must be in [0, {}), got {}",
            2.0 * reference_price,
            price_spread
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::{Filter, SortDirection, SortField};
    use crate::shared::types::{Direction, TxStatus};

    fn create_test_service() -> DashboardService {
        DashboardService::from_config(Config::default()).unwrap()
    }

    #[test]
    fn test_service_generates_default_data() {
        let service = create_test_service();
        assert_eq!(service.history().len(), 90);
        assert_eq!(service.store().len(), 55);
    }

    #[test]
    fn test_same_config_same_data() {
        let a = create_test_service();
        let b = create_test_service();
        assert_eq!(a.history(), b.history());
        assert_eq!(a.store().records(), b.store().records());
    }

    #[test]
    fn test_default_page() {
        let service = create_test_service();
        let page = service.page(&QuerySpec::default());
        assert_eq!(page.records.len(), 25);
        assert_eq!(page.info.total_items, 55);
        assert_eq!(page.info.total_pages, 3);
        assert!(page.records.windows(2).all(|w| w[0].timestamp >= w[1].timestamp));
    }

    #[test]
    fn test_filtered_page_and_export_agree() {
        let service = create_test_service();
        let spec = QuerySpec::default()
            .with_direction(Filter::Only(Direction::SolToUsdc))
            .with_status(Filter::Only(TxStatus::Confirmed))
            .with_sort(SortField::AmountIn, SortDirection::Asc);

        let matched = service.query(&spec);
        assert!(matched
            .iter()
            .all(|tx| tx.direction == Direction::SolToUsdc && tx.status == TxStatus::Confirmed));

        let csv = service.export_csv(&spec).unwrap();
        assert_eq!(csv.lines().count(), matched.len() + 1);
    }

    #[test]
    fn test_export_ignores_pagination() {
        let service = create_test_service();
        let base = QuerySpec::default().with_direction(Filter::Only(Direction::UsdcToSol));
        let matched = service.query(&base);

        for spec in [base.clone().with_page(3, 7), base.clone().with_page(99, 25), base.clone().with_page(1, 1)] {
            let csv = service.export_csv(&spec).unwrap();
            assert_eq!(csv.lines().count(), matched.len() + 1);
            assert_eq!(csv, service.export_csv(&base).unwrap());
        }
    }

    #[test]
    fn test_rejects_price_band_reaching_zero() {
        let mut config = Config::default();
        config.generator.reference_price = 5.0;
        config.generator.price_spread = 20.0;
        assert!(matches!(DashboardService::from_config(config), Err(AppError::ConfigError(_))));

        let mut config = Config::default();
        config.generator.reference_price = 0.0;
        assert!(matches!(DashboardService::from_config(config), Err(AppError::ConfigError(_))));

        let mut config = Config::default();
        config.generator.price_spread = -1.0;
        assert!(matches!(DashboardService::from_config(config), Err(AppError::ConfigError(_))));
    }

    #[test]
    fn test_accepted_price_band_yields_positive_amounts() {
        let mut config = Config::default();
        config.generator.reference_price = 10.0;
        config.generator.price_spread = 19.0;
        let service = DashboardService::from_config(config).unwrap();
        assert!(service
            .store()
            .iter()
            .all(|tx| tx.amount_out.is_finite() && tx.amount_out > 0.0 && tx.fee >= 0.0));
    }

    #[test]
    fn test_volume_and_pnl() {
        let service = create_test_service();
        let buckets = service.weekly_volume(None);
        assert!(buckets.windows(2).all(|w| w[0].week_start < w[1].week_start));
        assert!(service.weekly_volume(Some(0)).len() <= 1);

        assert_eq!(service.pnl(PnlRange::Days(30)).len(), 30);
        assert_eq!(service.pnl(PnlRange::All).len(), 90);
    }

    #[test]
    fn test_portfolio_uses_last_history_sample() {
        let service = create_test_service();
        let snapshot = service.portfolio(None).unwrap();
        let last = service.history().last().unwrap();
        assert_eq!(snapshot.pnl.all_time_sol_pnl, last.cumulative_sol_pnl);
        assert_eq!(snapshot.pnl.all_time_usdc_pnl, last.cumulative_usdc_pnl);
        assert!((snapshot.total_value_usd - (24.5 * 148.32 + 3842.5)).abs() < 1e-9);
    }

    #[test]
    fn test_portfolio_price_override() {
        let service = create_test_service();
        let snapshot = service.portfolio(Some(200.0)).unwrap();
        assert_eq!(snapshot.sol.usd_value(), 24.5 * 200.0);
        assert!(matches!(service.portfolio(Some(-1.0)), Err(AppError::InvalidAmount(_))));
        assert!(service.portfolio(Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_export_filename_uses_prefix() {
        let service = create_test_service();
        let date = NaiveDate::from_ymd_opt(2026, 2, 11).unwrap();
        assert_eq!(service.export_filename(date), "solswap-transactions-2026-02-11.csv");
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let mut config = Config::default();
        config.ledger.page_size = 0;
        assert!(matches!(DashboardService::from_config(config), Err(AppError::ConfigError(_))));
    }
}
