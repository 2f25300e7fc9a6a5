//! Common types used across the application

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::shared::errors::QueryError;

/// Vault token. SOL is leg A, USDC is leg B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    #[serde(rename = "SOL")]
    Sol,
    #[serde(rename = "USDC")]
    Usdc,
}

impl Token {
    pub fn as_str(&self) -> &'static str {
        match self {
            Token::Sol => "SOL",
            Token::Usdc => "USDC",
        }
    }

    /// Decimals used when an amount of this token is displayed
    pub fn display_decimals(&self) -> usize {
        match self {
            Token::Sol => 4,
            Token::Usdc => 2,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Swap direction of a ledger record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// A_TO_B
    #[serde(rename = "SOL_TO_USDC")]
    SolToUsdc,
    /// B_TO_A
    #[serde(rename = "USDC_TO_SOL")]
    UsdcToSol,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::SolToUsdc, Direction::UsdcToSol];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::SolToUsdc => "SOL_TO_USDC",
            Direction::UsdcToSol => "USDC_TO_SOL",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::SolToUsdc => "SOL \u{2192} USDC",
            Direction::UsdcToSol => "USDC \u{2192} SOL",
        }
    }

    pub fn token_in(&self) -> Token {
        match self {
            Direction::SolToUsdc => Token::Sol,
            Direction::UsdcToSol => Token::Usdc,
        }
    }

    pub fn token_out(&self) -> Token {
        match self {
            Direction::SolToUsdc => Token::Usdc,
            Direction::UsdcToSol => Token::Sol,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sol_to_usdc" | "a_to_b" => Ok(Direction::SolToUsdc),
            "usdc_to_sol" | "b_to_a" => Ok(Direction::UsdcToSol),
            _ => Err(QueryError::invalid(format!("unknown direction '{}'", s))),
        }
    }
}

/// Settlement status of a ledger record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Pending,
    Confirmed,
    Failed,
}

impl TxStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxStatus::Pending => "pending",
            TxStatus::Confirmed => "confirmed",
            TxStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TxStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxStatus {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(TxStatus::Pending),
            "confirmed" => Ok(TxStatus::Confirmed),
            "failed" => Ok(TxStatus::Failed),
            _ => Err(QueryError::invalid(format!("unknown status '{}'", s))),
        }
    }
}

/// One swap in the vault ledger.
///
/// Token legs are not stored: they follow from `direction`, see
/// [`TransactionRecord::token_in`] and [`TransactionRecord::token_out`].
/// They are still written to the wire as `tokenIn`/`tokenOut`, and must agree
/// with `type` when read back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "TransactionWire", try_from = "TransactionWire")]
pub struct TransactionRecord {
    pub id: u32,
    pub timestamp: DateTime<Utc>,
    pub direction: Direction,
    pub amount_in: f64,
    pub amount_out: f64,
    pub slippage_bps: u32,
    pub fee: f64,
    pub status: TxStatus,
    pub signature: String,
}

impl TransactionRecord {
    pub fn token_in(&self) -> Token {
        self.direction.token_in()
    }

    pub fn token_out(&self) -> Token {
        self.direction.token_out()
    }
}

/// Serialized form of [`TransactionRecord`] with the derived token legs
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionWire {
    id: u32,
    date: DateTime<Utc>,
    #[serde(rename = "type")]
    direction: Direction,
    amount_in: f64,
    token_in: Token,
    amount_out: f64,
    token_out: Token,
    slippage_bps: u32,
    fee: f64,
    status: TxStatus,
    signature: String,
}

impl From<TransactionRecord> for TransactionWire {
    fn from(tx: TransactionRecord) -> Self {
        Self {
            token_in: tx.token_in(),
            token_out: tx.token_out(),
            id: tx.id,
            date: tx.timestamp,
            direction: tx.direction,
            amount_in: tx.amount_in,
            amount_out: tx.amount_out,
            slippage_bps: tx.slippage_bps,
            fee: tx.fee,
            status: tx.status,
            signature: tx.signature,
        }
    }
}

impl TryFrom<TransactionWire> for TransactionRecord {
    type Error = String;

    fn try_from(wire: TransactionWire) -> Result<Self, Self::Error> {
        if wire.token_in != wire.direction.token_in() || wire.token_out != wire.direction.token_out() {
            return Err(format!(
                "record {}: tokens {} -> {} do not match type {}",
                wire.id,
                wire.token_in,
                wire.token_out,
                wire.direction.as_str()
            ));
        }
        Ok(Self {
            id: wire.id,
            timestamp: wire.date,
            direction: wire.direction,
            amount_in: wire.amount_in,
            amount_out: wire.amount_out,
            slippage_bps: wire.slippage_bps,
            fee: wire.fee,
            status: wire.status,
            signature: wire.signature,
        })
    }
}

/// One day of strategy profit/loss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlSample {
    pub date: NaiveDate,
    /// USD
    pub daily_pnl: f64,
    pub cumulative_pnl: f64,
    /// SOL
    pub daily_sol_pnl: f64,
    pub cumulative_sol_pnl: f64,
    /// USDC
    pub daily_usdc_pnl: f64,
    pub cumulative_usdc_pnl: f64,
    /// SOL/USD rate used to convert the SOL leg that day
    pub sol_price: f64,
}

/// Weekly swap volume, always in the USD-like leg
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeBucket {
    /// Sunday opening the week
    pub week_start: NaiveDate,
    pub sol_to_usdc: u64,
    pub usdc_to_sol: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_direction_determines_tokens() {
        assert_eq!(Direction::SolToUsdc.token_in(), Token::Sol);
        assert_eq!(Direction::SolToUsdc.token_out(), Token::Usdc);
        assert_eq!(Direction::UsdcToSol.token_in(), Token::Usdc);
        assert_eq!(Direction::UsdcToSol.token_out(), Token::Sol);
    }

    #[test]
    fn test_direction_parsing() {
        assert_eq!("SOL_TO_USDC".parse::<Direction>().unwrap(), Direction::SolToUsdc);
        assert_eq!("b_to_a".parse::<Direction>().unwrap(), Direction::UsdcToSol);
        assert!("SOL_TO_BTC".parse::<Direction>().is_err());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Confirmed".parse::<TxStatus>().unwrap(), TxStatus::Confirmed);
        assert!("settled".parse::<TxStatus>().is_err());
    }

    #[test]
    fn test_record_serialization_uses_wire_names() {
        let record = TransactionRecord {
            id: 7,
            timestamp: Utc.with_ymd_and_hms(2026, 1, 20, 14, 5, 0).unwrap(),
            direction: Direction::UsdcToSol,
            amount_in: 250.5,
            amount_out: 1.702,
            slippage_bps: 12,
            fee: 0.0017,
            status: TxStatus::Pending,
            signature: "5xSig".to_string(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "USDC_TO_SOL");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["amountIn"], 250.5);
        assert_eq!(json["slippageBps"], 12);
        assert_eq!(json["tokenIn"], "USDC");
        assert_eq!(json["tokenOut"], "SOL");
        assert_eq!(json["date"], "2026-01-20T14:05:00Z");

        let back: TransactionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
        assert_eq!(back.token_in(), Token::Usdc);
    }

    #[test]
    fn test_record_rejects_tokens_that_contradict_type() {
        let record = TransactionRecord {
            id: 3,
            timestamp: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
            direction: Direction::SolToUsdc,
            amount_in: 1.5,
            amount_out: 222.48,
            slippage_bps: 9,
            fee: 0.0015,
            status: TxStatus::Confirmed,
            signature: "3ySig".to_string(),
        };

        let mut json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["tokenIn"], "SOL");
        json["tokenIn"] = serde_json::json!("USDC");
        assert!(serde_json::from_value::<TransactionRecord>(json).is_err());
    }
}
