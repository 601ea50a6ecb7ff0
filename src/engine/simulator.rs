use crate::config::EngineConfig;
use crate::data::TimeSeries;
use crate::engine::EngineError;
use crate::metrics::{build_equity_curve, EquityPoint};
use crate::portfolio::{Position, Trade};
use tracing::debug;

//outcome of one signal-driven simulation pass
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub equity_curve: Vec<EquityPoint>,
    pub trades: Vec<Trade>,
    //a position still open at the final bar; it contributes mark-to-market
    //equity but never a ledger entry (only realized trades count toward
    //win rate and profit factor)
    pub open_position: Option<Position>,
    //bars spent in market, over the bars the curve covers
    pub bars_in_market: usize,
}

impl SimulationResult {
    //fraction of simulated bars spent in market
    pub fn exposure(&self) -> f64 {
        if self.equity_curve.is_empty() {
            return 0.0;
        }
        self.bars_in_market as f64 / self.equity_curve.len() as f64
    }
}

//walks the series in strictly increasing timestamp order, opening a
//position on BUY while flat and closing it on SELL while long, with the
//symmetric fee applied on each leg
//
//a single forward pass produces both the equity curve and the trade
//ledger; decisions at each bar use only that bar and prior state, never
//lookahead. HOLD, BUY-while-long and SELL-while-flat cause no transition
pub fn simulate_signals(
    series: &TimeSeries,
    config: &EngineConfig,
) -> Result<SimulationResult, EngineError> {
    let bars = series.bars();
    if bars.len() < 2 {
        return Err(EngineError::InsufficientData(bars.len()));
    }

    let mut cash = config.initial_capital;
    let mut position: Option<Position> = None;
    let mut trades: Vec<Trade> = Vec::new();
    let mut marks = Vec::with_capacity(bars.len() - 1);
    let mut bars_in_market = 0usize;

    for (index, bar) in bars.iter().enumerate() {
        position = match position.take() {
            None if bar.signal.is_buy() => {
                let opened = Position::open(bar.timestamp, bar.close, config.fee_rate, cash);
                debug!(timestamp = %bar.timestamp, close = bar.close, shares = opened.shares, "opened position");
                cash = 0.0;
                Some(opened)
            }
            Some(open) if bar.signal.is_sell() => {
                let trade = open.close(bar.timestamp, bar.close, config.fee_rate);
                cash = trade.shares * trade.exit_price;
                debug!(timestamp = %bar.timestamp, pnl = trade.pnl, "closed position");
                trades.push(trade);
                None
            }
            //hold, buy while long, sell while flat: no transition
            unchanged => unchanged,
        };

        //the first bar has no computable return; the curve starts at the
        //second bar, matching the benchmark curve timestamps
        if index > 0 {
            let equity = match &position {
                Some(open) => open.market_value(bar.close),
                None => cash,
            };
            if position.is_some() {
                bars_in_market += 1;
            }
            marks.push((bar.timestamp, equity));
        }
    }

    let equity_curve = build_equity_curve(&marks, config.initial_capital);
    debug!(
        trades = trades.len(),
        open = position.is_some(),
        "simulation pass complete"
    );

    Ok(SimulationResult {
        equity_curve,
        trades,
        open_position: position,
        bars_in_market,
    })
}
