use crate::metrics::{StrategyMetrics, SummaryMetrics};
use crate::report::visualization::{EquityComparisonPoint, SignalOverlay, TradePnlPoint};
use serde::{Deserialize, Serialize};

//the complete backtest output handed to the transport layer
//
//field presence is fixed; numeric fields are percentages or ratios as
//computed by the metrics module. Option fields serialize as null
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    //buy-and-hold benchmark statistics (no trade fields)
    pub market_metrics: SummaryMetrics,

    //signal-driven strategy statistics including the trade fields
    pub strategy_metrics: StrategyMetrics,

    //normalized equity comparison, indexed by date
    pub equity_curve: Vec<EquityComparisonPoint>,

    //closed-trade scatter points
    pub pnl_graph: Vec<TradePnlPoint>,

    //price chart overlay with buy/sell markers
    pub trade_visualization: SignalOverlay,
}
