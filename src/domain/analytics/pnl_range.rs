//! Ranged views over the PnL history

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::errors::QueryError;
use crate::shared::types::PnlSample;

/// Chart range toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PnlRange {
    /// Trailing number of days
    Days(usize),
    All,
}

impl Default for PnlRange {
    fn default() -> Self {
        PnlRange::Days(90)
    }
}

impl fmt::Display for PnlRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PnlRange::Days(days) => write!(f, "{}d", days),
            PnlRange::All => f.write_str("all"),
        }
    }
}

impl FromStr for PnlRange {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(PnlRange::All);
        }
        match s.trim_end_matches('d').parse::<usize>() {
            Ok(days) if days > 0 => Ok(PnlRange::Days(days)),
            _ => Err(QueryError::invalid(format!("unknown PnL range '{}'", s))),
        }
    }
}

/// Trailing slice of `history`. Cumulative values are the stored ones,
/// relative to the start of the full series.
pub fn pnl_range(history: &[PnlSample], range: PnlRange) -> &[PnlSample] {
    match range {
        PnlRange::All => history,
        PnlRange::Days(days) => &history[history.len().saturating_sub(days)..],
    }
}

/// Line chart feed: one label per day and the three cumulative lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlChartSeries {
    pub labels: Vec<String>,
    pub total_values: Vec<f64>,
    pub usdc_values: Vec<f64>,
    pub sol_values: Vec<f64>,
}

pub fn pnl_chart_series(samples: &[PnlSample]) -> PnlChartSeries {
    PnlChartSeries {
        labels: samples.iter().map(|s| s.date.format("%b %-d").to_string()).collect(),
        total_values: samples.iter().map(|s| s.cumulative_pnl).collect(),
        usdc_values: samples.iter().map(|s| s.cumulative_usdc_pnl).collect(),
        sol_values: samples.iter().map(|s| s.cumulative_sol_pnl).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::synthetic::generate_history;

    #[test]
    fn test_range_parsing() {
        assert_eq!("30".parse::<PnlRange>().unwrap(), PnlRange::Days(30));
        assert_eq!("7d".parse::<PnlRange>().unwrap(), PnlRange::Days(7));
        assert_eq!("ALL".parse::<PnlRange>().unwrap(), PnlRange::All);
        assert!("0".parse::<PnlRange>().is_err());
        assert!("week".parse::<PnlRange>().is_err());
    }

    #[test]
    fn test_slice_reuses_stored_cumulatives() {
        let history = generate_history(42).unwrap();
        let last_week = pnl_range(&history, PnlRange::Days(7));
        assert_eq!(last_week.len(), 7);
        assert_eq!(last_week, &history[83..]);
        // not rebased to zero at the slice start
        assert_eq!(last_week[0].cumulative_pnl, history[83].cumulative_pnl);
        assert!(last_week[0].cumulative_pnl > last_week[0].daily_pnl);
    }

    #[test]
    fn test_oversized_range_returns_everything() {
        let history = generate_history(42).unwrap();
        assert_eq!(pnl_range(&history, PnlRange::Days(365)).len(), history.len());
        assert_eq!(pnl_range(&history, PnlRange::All).len(), history.len());
        assert!(pnl_range(&[], PnlRange::Days(30)).is_empty());
    }

    #[test]
    fn test_chart_series() {
        let history = generate_history(42).unwrap();
        let series = pnl_chart_series(pnl_range(&history, PnlRange::Days(30)));
        assert_eq!(series.labels.len(), 30);
        assert_eq!(series.labels[29], "Feb 11");
        assert_eq!(series.total_values[29], history[89].cumulative_pnl);
        assert_eq!(series.sol_values[0], history[60].cumulative_sol_pnl);
        assert_eq!(series.usdc_values[0], history[60].cumulative_usdc_pnl);
    }
}
