//! Solswap - SOL/USDC vault dashboard core
//! Built with Domain-Driven Design principles

pub mod domain;
pub mod application;
pub mod shared;
pub mod config;

// Re-export main types for convenience
pub use application::DashboardService;
pub use config::Config;
pub use domain::ledger::{QuerySpec, RecordStore};
pub use domain::synthetic::ParkMiller;
pub use shared::errors::AppError;
