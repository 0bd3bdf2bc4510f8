//! Off-chain quoting and split routing for concentrated-liquidity pools.
//!
//! The math and quote layers are pure and synchronous; the router suspends
//! only at the [`router::Fetcher`] boundary.

pub mod byte_reader;
pub mod config;
pub mod error;
pub mod math;
pub mod quote;
pub mod router;
pub mod state;
pub mod state_math;
pub mod types;

pub use config::*;
pub use error::*;
pub use types::*;
