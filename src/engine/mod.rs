pub mod backtest;
pub mod benchmark;
pub mod simulator;

pub use backtest::BacktestEngine;
pub use benchmark::simulate_buy_and_hold;
pub use simulator::{simulate_signals, SimulationResult};

use crate::data::SeriesError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    InvalidInput(#[from] SeriesError),
    #[error("Insufficient data: {0} usable bars, need at least 2")]
    InsufficientData(usize),
}
