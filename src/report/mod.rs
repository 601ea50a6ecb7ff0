pub mod response;
pub mod visualization;

pub use response::BacktestReport;
pub use visualization::{
    normalized_equity_comparison, signal_overlay, trade_pnl_scatter, EquityComparisonPoint,
    SignalOverlay, TradePnlPoint,
};
