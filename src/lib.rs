//a Rust-based backtesting engine for signal-driven trading strategies

pub mod config;
pub mod data;
pub mod engine;
pub mod metrics;
pub mod portfolio;
pub mod report;

//prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, EngineConfig};
    pub use crate::data::{load_csv, Bar, BarError, Signal, SeriesError, TimeSeries};
    pub use crate::engine::{
        simulate_buy_and_hold, simulate_signals, BacktestEngine, EngineError, SimulationResult,
    };
    pub use crate::metrics::{
        build_equity_curve, max_drawdown, EquityPoint, StrategyMetrics, SummaryMetrics, TradeStats,
    };
    pub use crate::portfolio::{Position, Trade, TradeDirection};
    pub use crate::report::{
        BacktestReport, EquityComparisonPoint, SignalOverlay, TradePnlPoint,
    };
}
