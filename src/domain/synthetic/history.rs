//! Synthetic profit/loss history

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::prng::ParkMiller;
use crate::shared::errors::GeneratorError;
use crate::shared::types::PnlSample;
use crate::shared::utils::{const_date, round_to};

pub const DEFAULT_SEED: u64 = 42;

const SOL_PRICE_START: f64 = 95.0;
const SOL_PRICE_END: f64 = 148.32;
const SOL_PRICE_JITTER: f64 = 4.0;
/// Capital the daily return rates compound on, per leg
const USDC_BASE: f64 = 1200.0;
const SOL_BASE: f64 = 5.0;

/// Strategy regime in effect on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// USDC leg compounds, SOL leg is noise
    UsdcDominant,
    /// Both legs compound
    Balanced,
    /// SOL leg compounds, USDC leg is noise
    SolDominant,
}

pub const SERIES_START: NaiveDate = const_date(2025, 11, 14);
pub const PHASE2_START: NaiveDate = const_date(2025, 12, 16);
pub const PHASE3_START: NaiveDate = const_date(2026, 1, 16);
pub const SERIES_END: NaiveDate = const_date(2026, 2, 11);

/// Dates bounding the generated series, all inclusive
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryWindow {
    pub start: NaiveDate,
    pub phase2_start: NaiveDate,
    pub phase3_start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for HistoryWindow {
    fn default() -> Self {
        Self {
            start: SERIES_START,
            phase2_start: PHASE2_START,
            phase3_start: PHASE3_START,
            end: SERIES_END,
        }
    }
}

impl HistoryWindow {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.start <= self.phase2_start && self.phase2_start <= self.phase3_start && self.phase3_start <= self.end {
            Ok(())
        } else {
            Err(GeneratorError::InvalidWindow {
                start: self.start,
                phase2: self.phase2_start,
                phase3: self.phase3_start,
                end: self.end,
            })
        }
    }

    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn phase_of(&self, date: NaiveDate) -> Phase {
        if date < self.phase2_start {
            Phase::UsdcDominant
        } else if date < self.phase3_start {
            Phase::Balanced
        } else {
            Phase::SolDominant
        }
    }
}

/// Unrounded day as produced by the simulation
#[derive(Debug, Clone, Copy, PartialEq)]
struct RawDay {
    date: NaiveDate,
    daily_usd: f64,
    cumulative_usd: f64,
    daily_sol: f64,
    cumulative_sol: f64,
    daily_usdc: f64,
    cumulative_usdc: f64,
    sol_price: f64,
}

impl RawDay {
    /// USD and USDC at cents, SOL at 4 decimals
    fn rounded(&self) -> PnlSample {
        PnlSample {
            date: self.date,
            daily_pnl: round_to(self.daily_usd, 2),
            cumulative_pnl: round_to(self.cumulative_usd, 2),
            daily_sol_pnl: round_to(self.daily_sol, 4),
            cumulative_sol_pnl: round_to(self.cumulative_sol, 4),
            daily_usdc_pnl: round_to(self.daily_usdc, 2),
            cumulative_usdc_pnl: round_to(self.cumulative_usdc, 2),
            sol_price: round_to(self.sol_price, 2),
        }
    }
}

/// History over the default window from a fresh generator
pub fn generate_history(seed: u64) -> Result<Vec<PnlSample>, GeneratorError> {
    let mut rng = ParkMiller::new(seed)?;
    generate_history_with(&mut rng, &HistoryWindow::default())
}

/// History over `window`, drawing from the caller's generator
pub fn generate_history_with(rng: &mut ParkMiller, window: &HistoryWindow) -> Result<Vec<PnlSample>, GeneratorError> {
    let days = simulate(rng, window)?;
    debug!("Generated {} PnL samples from {} to {}", days.len(), window.start, window.end);
    Ok(days.iter().map(RawDay::rounded).collect())
}

fn simulate(rng: &mut ParkMiller, window: &HistoryWindow) -> Result<Vec<RawDay>, GeneratorError> {
    window.validate()?;

    let total_days = window.total_days();
    let mut days = Vec::with_capacity(total_days as usize + 1);

    let mut cumulative_usd = 0.0;
    let mut cumulative_sol = 0.0;
    let mut cumulative_usdc = 0.0;

    for day_index in 0..=total_days {
        let date = window.start + Duration::days(day_index);
        let progress = if total_days == 0 {
            0.0
        } else {
            day_index as f64 / total_days as f64
        };

        // price jitter is always the first draw of the day
        let sol_price = SOL_PRICE_START
            + (SOL_PRICE_END - SOL_PRICE_START) * progress
            + (rng.next_f64() - 0.5) * SOL_PRICE_JITTER;

        let (daily_usdc, daily_sol) = match window.phase_of(date) {
            Phase::UsdcDominant => {
                let usdc = (USDC_BASE + cumulative_usdc) * ((rng.next_f64() * 0.5 + 0.1) / 100.0);
                let sol = (rng.next_f64() - 0.45) * 0.002;
                (usdc, sol)
            }
            Phase::Balanced => {
                let usdc = (USDC_BASE + cumulative_usdc) * ((rng.next_f64() * 0.35 + 0.05) / 100.0);
                let sol = (SOL_BASE + cumulative_sol) * ((rng.next_f64() * 0.6 + 0.1) / 100.0);
                (usdc, sol)
            }
            Phase::SolDominant => {
                let usdc = (rng.next_f64() - 0.45) * 0.5;
                let sol = (SOL_BASE + cumulative_sol) * ((rng.next_f64() * 1.2 + 0.4) / 100.0);
                (usdc, sol)
            }
        };

        cumulative_sol += daily_sol;
        cumulative_usdc += daily_usdc;

        let daily_usd = daily_usdc + daily_sol * sol_price;
        cumulative_usd += daily_usd;

        days.push(RawDay {
            date,
            daily_usd,
            cumulative_usd,
            daily_sol,
            cumulative_sol,
            daily_usdc,
            cumulative_usdc,
            sol_price,
        });
    }

    Ok(days)
}
