//! Portfolio domain - vault balances and derived values

mod valuation;

pub use valuation::{
    allocation, pnl_summary, portfolio_total, usd_value, Allocation, FeePool, FeePoolHealth, PnlSummary,
    PortfolioSnapshot, VaultBalance,
};
