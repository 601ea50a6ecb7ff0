pub mod summary;
pub mod timeseries;

pub use summary::{StrategyMetrics, SummaryMetrics, TradeStats};
pub use timeseries::{build_equity_curve, curve_returns, max_drawdown, EquityPoint};
