//! Analytics domain - chart aggregation over the ledger and PnL history

pub mod volume;
pub mod pnl_range;

pub use volume::{volume_chart_series, week_start, weekly_volume, VolumeChartSeries, DEFAULT_VOLUME_WINDOW_DAYS};
pub use pnl_range::{pnl_chart_series, pnl_range, PnlChartSeries, PnlRange};
