//! Vault valuation and headline PnL metrics

use serde::{Deserialize, Serialize};

use crate::shared::types::PnlSample;

/// USD value of `balance` units priced at `usd_price`
pub fn usd_value(balance: f64, usd_price: f64) -> f64 {
    balance * usd_price
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultBalance {
    pub balance: f64,
    pub usd_price: f64,
}

impl VaultBalance {
    pub fn new(balance: f64, usd_price: f64) -> Self {
        Self { balance, usd_price }
    }

    pub fn usd_value(&self) -> f64 {
        usd_value(self.balance, self.usd_price)
    }
}

pub fn portfolio_total(sol: &VaultBalance, usdc: &VaultBalance) -> f64 {
    sol.usd_value() + usdc.usd_value()
}

/// Share of portfolio value held in each vault, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub sol_pct: f64,
    pub usdc_pct: f64,
}

pub fn allocation(sol: &VaultBalance, usdc: &VaultBalance) -> Allocation {
    let total = portfolio_total(sol, usdc);
    if total <= 0.0 {
        return Allocation { sol_pct: 0.0, usdc_pct: 0.0 };
    }
    Allocation {
        sol_pct: sol.usd_value() / total * 100.0,
        usdc_pct: usdc.usd_value() / total * 100.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeePoolHealth {
    Healthy,
    Low,
    Critical,
}

impl FeePoolHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeePoolHealth::Healthy => "Healthy",
            FeePoolHealth::Low => "Low",
            FeePoolHealth::Critical => "Critical",
        }
    }
}

/// SOL reserved for relayer fees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeePool {
    pub balance: f64,
    pub min_threshold: f64,
    pub target_threshold: f64,
}

impl FeePool {
    pub fn health(&self) -> FeePoolHealth {
        if self.balance >= self.target_threshold {
            FeePoolHealth::Healthy
        } else if self.balance >= self.min_threshold {
            FeePoolHealth::Low
        } else {
            FeePoolHealth::Critical
        }
    }

    /// Progress toward the target, capped at 100
    pub fn fill_pct(&self) -> f64 {
        if self.target_threshold <= 0.0 {
            return 100.0;
        }
        (self.balance / self.target_threshold * 100.0).min(100.0)
    }

    /// Where the minimum threshold sits on the progress bar
    pub fn min_marker_pct(&self) -> f64 {
        if self.target_threshold <= 0.0 {
            return 0.0;
        }
        self.min_threshold / self.target_threshold * 100.0
    }
}

/// All-time per-leg profit and return against the starting capital
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlSummary {
    pub all_time_pnl: f64,
    pub all_time_sol_pnl: f64,
    pub all_time_usdc_pnl: f64,
    pub sol_return_pct: f64,
    pub usdc_return_pct: f64,
}

pub fn pnl_summary(history: &[PnlSample], sol_base: f64, usdc_base: f64) -> PnlSummary {
    let (total, sol, usdc) = history
        .last()
        .map(|s| (s.cumulative_pnl, s.cumulative_sol_pnl, s.cumulative_usdc_pnl))
        .unwrap_or((0.0, 0.0, 0.0));

    PnlSummary {
        all_time_pnl: total,
        all_time_sol_pnl: sol,
        all_time_usdc_pnl: usdc,
        sol_return_pct: return_pct(sol, sol_base),
        usdc_return_pct: return_pct(usdc, usdc_base),
    }
}

fn return_pct(profit: f64, base: f64) -> f64 {
    if base == 0.0 {
        0.0
    } else {
        profit / base * 100.0
    }
}

/// Everything the dashboard header shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    pub sol: VaultBalance,
    pub usdc: VaultBalance,
    pub fee_pool: FeePool,
    pub fee_pool_health: FeePoolHealth,
    pub fee_pool_usd: f64,
    pub total_value_usd: f64,
    pub allocation: Allocation,
    pub pnl: PnlSummary,
}

impl PortfolioSnapshot {
    pub fn new(sol: VaultBalance, usdc: VaultBalance, fee_pool: FeePool, pnl: PnlSummary) -> Self {
        Self {
            fee_pool_health: fee_pool.health(),
            fee_pool_usd: usd_value(fee_pool.balance, sol.usd_price),
            total_value_usd: portfolio_total(&sol, &usdc),
            allocation: allocation(&sol, &usdc),
            sol,
            usdc,
            fee_pool,
            pnl,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_test_vaults() -> (VaultBalance, VaultBalance) {
        (VaultBalance::new(24.5, 148.32), VaultBalance::new(3842.5, 1.0))
    }

    fn sample(cumulative_sol_pnl: f64, cumulative_usdc_pnl: f64) -> PnlSample {
        PnlSample {
            date: NaiveDate::from_ymd_opt(2026, 2, 11).unwrap(),
            daily_pnl: 0.0,
            cumulative_pnl: 4281.75,
            daily_sol_pnl: 0.0,
            cumulative_sol_pnl,
            daily_usdc_pnl: 0.0,
            cumulative_usdc_pnl,
            sol_price: 148.32,
        }
    }

    #[test]
    fn test_usd_values() {
        let (sol, usdc) = create_test_vaults();
        assert!((sol.usd_value() - 3633.84).abs() < 1e-9);
        assert_eq!(usdc.usd_value(), 3842.5);
        assert!((portfolio_total(&sol, &usdc) - 7476.34).abs() < 1e-9);
    }

    #[test]
    fn test_usd_value_follows_price_input() {
        let mut sol = VaultBalance::new(2.0, 100.0);
        assert_eq!(sol.usd_value(), 200.0);
        sol.usd_price = 150.0;
        assert_eq!(sol.usd_value(), 300.0);
    }

    #[test]
    fn test_allocation() {
        let (sol, usdc) = create_test_vaults();
        let alloc = allocation(&sol, &usdc);
        assert!((alloc.sol_pct + alloc.usdc_pct - 100.0).abs() < 1e-9);
        assert!((alloc.sol_pct - 48.6).abs() < 0.1);

        let empty = VaultBalance::new(0.0, 148.32);
        assert_eq!(allocation(&empty, &VaultBalance::new(0.0, 1.0)), Allocation { sol_pct: 0.0, usdc_pct: 0.0 });
    }

    #[test]
    fn test_fee_pool_health() {
        let pool = |balance| FeePool { balance, min_threshold: 0.05, target_threshold: 0.15 };
        assert_eq!(pool(0.2).health(), FeePoolHealth::Healthy);
        assert_eq!(pool(0.15).health(), FeePoolHealth::Healthy);
        assert_eq!(pool(0.085).health(), FeePoolHealth::Low);
        assert_eq!(pool(0.01).health(), FeePoolHealth::Critical);

        assert_eq!(pool(0.3).fill_pct(), 100.0);
        assert!((pool(0.075).fill_pct() - 50.0).abs() < 1e-9);
        assert!((pool(0.0).min_marker_pct() - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_pnl_summary() {
        let summary = pnl_summary(&[sample(1.25, 300.0)], 5.0, 1200.0);
        assert_eq!(summary.all_time_pnl, 4281.75);
        assert_eq!(summary.all_time_sol_pnl, 1.25);
        assert_eq!(summary.sol_return_pct, 25.0);
        assert_eq!(summary.usdc_return_pct, 25.0);

        let empty = pnl_summary(&[], 5.0, 1200.0);
        assert_eq!(empty.all_time_sol_pnl, 0.0);
        assert_eq!(empty.usdc_return_pct, 0.0);
    }

    #[test]
    fn test_snapshot() {
        let (sol, usdc) = create_test_vaults();
        let fee_pool = FeePool { balance: 0.085, min_threshold: 0.05, target_threshold: 0.15 };
        let snapshot = PortfolioSnapshot::new(sol, usdc, fee_pool, pnl_summary(&[], 5.0, 1200.0));
        assert_eq!(snapshot.fee_pool_health, FeePoolHealth::Low);
        assert!((snapshot.fee_pool_usd - 0.085 * 148.32).abs() < 1e-9);
        assert!((snapshot.total_value_usd - 7476.34).abs() < 1e-9);
    }
}
