//! Core domain types and logic.

pub mod daily_record;
pub mod config;
pub mod series;
pub mod state;
pub mod statistics;
pub mod baseline;
pub mod simulator;
pub mod comparison;
pub mod config_validation;
pub mod error;
