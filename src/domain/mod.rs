//! Domain layer - core business logic and entities

pub mod ledger;
pub mod synthetic;
pub mod analytics;
pub mod portfolio;
