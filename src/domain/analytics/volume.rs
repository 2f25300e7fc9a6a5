//! Weekly swap volume

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use crate::shared::types::{Direction, TransactionRecord, VolumeBucket};

pub const DEFAULT_VOLUME_WINDOW_DAYS: u32 = 30;

/// Sunday opening the week that contains `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// Sum volume per week over the trailing `window_days` ending at `as_of`,
/// both ends inclusive.
///
/// Each record counts its USD-like leg only: SOL→USDC adds `amount_out`,
/// USDC→SOL adds `amount_in`. Sums are rounded when emitted.
pub fn weekly_volume(records: &[TransactionRecord], window_days: u32, as_of: DateTime<Utc>) -> Vec<VolumeBucket> {
    let from = as_of - Duration::days(window_days as i64);
    let mut weeks: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();

    for tx in records.iter().filter(|tx| tx.timestamp >= from && tx.timestamp <= as_of) {
        let sums = weeks.entry(week_start(tx.timestamp.date_naive())).or_insert((0.0, 0.0));
        match tx.direction {
            Direction::SolToUsdc => sums.0 += tx.amount_out,
            Direction::UsdcToSol => sums.1 += tx.amount_in,
        }
    }

    debug!("Bucketed volume into {} weeks since {}", weeks.len(), from);

    weeks
        .into_iter()
        .map(|(week_start, (sol_to_usdc, usdc_to_sol))| VolumeBucket {
            week_start,
            sol_to_usdc: sol_to_usdc.round() as u64,
            usdc_to_sol: usdc_to_sol.round() as u64,
        })
        .collect()
}

/// Stacked bar chart feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeChartSeries {
    pub labels: Vec<String>,
    pub sol_to_usdc: Vec<u64>,
    pub usdc_to_sol: Vec<u64>,
}

pub fn volume_chart_series(buckets: &[VolumeBucket]) -> VolumeChartSeries {
    VolumeChartSeries {
        labels: buckets.iter().map(|b| b.week_start.format("%b %-d").to_string()).collect(),
        sol_to_usdc: buckets.iter().map(|b| b.sol_to_usdc).collect(),
        usdc_to_sol: buckets.iter().map(|b| b.usdc_to_sol).collect(),
    }
}
