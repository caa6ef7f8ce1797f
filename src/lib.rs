//! # Poker Ledger
//!
//! Bookkeeping analytics for home-game poker tournaments.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (participation records, derived stats)
//! - **calculate**: Player/tournament aggregation and leaderboards
//! - **currency**: Currency symbols and money formatting
//! - **storage**: JSONL input and derived output files
//! - **config**: Configuration loading and validation

pub mod calculate;
pub mod config;
pub mod currency;
pub mod models;
pub mod storage;

pub use models::*;
