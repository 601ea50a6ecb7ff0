use crate::config::EngineConfig;
use crate::data::TimeSeries;
use crate::engine::EngineError;
use crate::metrics::{build_equity_curve, EquityPoint};

//simulates holding one unit of exposure to the close price from the first
//bar onward, compounding per-bar simple returns with zero fees
//
//pure function of its inputs: the curve spans bars 1..n (the first bar
//has no computable return) and its first value equals the initial
//capital scaled by the first period return
pub fn simulate_buy_and_hold(
    series: &TimeSeries,
    config: &EngineConfig,
) -> Result<Vec<EquityPoint>, EngineError> {
    let bars = series.bars();
    if bars.len() < 2 {
        return Err(EngineError::InsufficientData(bars.len()));
    }

    let mut marks = Vec::with_capacity(bars.len() - 1);
    let mut equity = config.initial_capital;

    for pair in bars.windows(2) {
        let period_return = pair[1].close / pair[0].close - 1.0;
        equity *= 1.0 + period_return;
        marks.push((pair[1].timestamp, equity));
    }

    Ok(build_equity_curve(&marks, config.initial_capital))
}
