//! Trend indicators: moving averages and their crossovers

pub mod crossover;
pub mod ema;
pub mod sma;

pub use crossover::*;
pub use ema::*;
pub use sma::*;
