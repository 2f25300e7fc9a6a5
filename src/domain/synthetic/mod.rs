//! Synthetic data - seeded PnL history and ledger generation

pub mod prng;
pub mod history;
pub mod transactions;

pub use prng::ParkMiller;
pub use history::{
    generate_history, generate_history_with, HistoryWindow, Phase, DEFAULT_SEED, PHASE2_START, PHASE3_START, SERIES_END,
    SERIES_START,
};
pub use transactions::{
    generate_transactions, generate_transactions_with, TransactionProfile, DEFAULT_TRANSACTION_COUNT,
};
