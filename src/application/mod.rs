//! Application layer - use cases and services

pub mod commands;
pub mod services;

pub use commands::{Cli, Commands, CommandExecutor, LedgerArgs};
pub use services::{DashboardService, LedgerPage};
