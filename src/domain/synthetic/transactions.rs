//! Synthetic vault ledger

use chrono::{Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use rand::seq::SliceRandom;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::history::SERIES_START;
use super::prng::ParkMiller;
use crate::shared::types::{Direction, TransactionRecord, TxStatus};
use crate::shared::utils::round_to;

pub const DEFAULT_TRANSACTION_COUNT: usize = 55;

/// Status draw table: 80% confirmed, 10% pending, 10% failed
const STATUS_TABLE: [TxStatus; 10] = [
    TxStatus::Confirmed,
    TxStatus::Confirmed,
    TxStatus::Confirmed,
    TxStatus::Confirmed,
    TxStatus::Confirmed,
    TxStatus::Confirmed,
    TxStatus::Confirmed,
    TxStatus::Confirmed,
    TxStatus::Pending,
    TxStatus::Failed,
];

/// Raw signature length; base58 of 64 bytes is ~88 chars like a real one
const SIGNATURE_BYTES: usize = 64;
const PROTOCOL_FEE_RATE: f64 = 0.001;

/// Shape of the generated ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionProfile {
    pub start: NaiveDate,
    pub span_days: u32,
    pub reference_price: f64,
    /// Full width of the price band around `reference_price`
    pub price_spread: f64,
}

impl Default for TransactionProfile {
    fn default() -> Self {
        Self {
            start: SERIES_START,
            span_days: 90,
            reference_price: 148.32,
            price_spread: 20.0,
        }
    }
}

/// `count` records over the default profile
pub fn generate_transactions(rng: &mut ParkMiller, count: usize) -> Vec<TransactionRecord> {
    generate_transactions_with(rng, count, &TransactionProfile::default())
}

/// Generate `count` records with ids `1..=count`, returned newest first
pub fn generate_transactions_with(
    rng: &mut ParkMiller,
    count: usize,
    profile: &TransactionProfile,
) -> Vec<TransactionRecord> {
    let origin = Utc.from_utc_datetime(&profile.start.and_time(NaiveTime::default()));
    let mut records = Vec::with_capacity(count);

    for i in 0..count {
        let day_offset = (rng.next_f64() * profile.span_days as f64).floor() as i64;
        let second_of_day = (rng.next_f64() * 86_400.0).floor() as i64;
        let timestamp = origin + Duration::days(day_offset) + Duration::seconds(second_of_day);

        let direction = Direction::ALL.choose(rng).copied().unwrap_or(Direction::SolToUsdc);
        let status = STATUS_TABLE.choose(rng).copied().unwrap_or(TxStatus::Confirmed);
        let slippage_bps = 5 + (rng.next_f64() * 30.0).floor() as u32;

        let (amount_in, amount_out, fee) = match direction {
            Direction::SolToUsdc => {
                let amount_in = round_to(rng.next_f64() * 4.0 + 0.5, 3);
                let price = profile.reference_price + (rng.next_f64() - 0.5) * profile.price_spread;
                let amount_out = round_to(amount_in * price, 2);
                (amount_in, amount_out, round_to(amount_in * PROTOCOL_FEE_RATE, 5))
            }
            Direction::UsdcToSol => {
                let amount_in = round_to(rng.next_f64() * 600.0 + 50.0, 2);
                let price = profile.reference_price + (rng.next_f64() - 0.5) * profile.price_spread;
                let amount_out = round_to(amount_in / price, 3);
                (amount_in, amount_out, round_to(amount_out * PROTOCOL_FEE_RATE, 5))
            }
        };

        let mut sig_bytes = [0u8; SIGNATURE_BYTES];
        rng.fill_bytes(&mut sig_bytes);

        records.push(TransactionRecord {
            id: i as u32 + 1,
            timestamp,
            direction,
            amount_in,
            amount_out,
            slippage_bps,
            fee,
            status,
            signature: bs58::encode(sig_bytes).into_string(),
        });
    }

    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    debug!("Generated {} ledger records", records.len());
    records
}
