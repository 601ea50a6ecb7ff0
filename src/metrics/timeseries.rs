use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//a point in the equity curve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    pub equity: f64,
    pub drawdown: f64,
    pub returns: f64,
}

impl EquityPoint {
    pub fn new(timestamp: DateTime<Utc>, equity: f64, drawdown: f64, returns: f64) -> Self {
        EquityPoint {
            timestamp,
            equity,
            drawdown,
            returns,
        }
    }
}

//builds the equity curve with per-period returns and running drawdowns
//
//the first return is anchored at the configured initial capital, so a
//curve spanning bars 1..n carries exactly n-1 returns, matching the
//per-bar simple-return convention. the drawdown peak runs over curve
//values only
pub fn build_equity_curve(
    marks: &[(DateTime<Utc>, f64)],
    initial_capital: f64,
) -> Vec<EquityPoint> {
    let mut curve = Vec::with_capacity(marks.len());
    let mut peak = f64::MIN;
    let mut prev_equity = initial_capital;

    for &(timestamp, equity) in marks {
        //update peak
        if equity > peak {
            peak = equity;
        }

        //calculate drawdown
        let drawdown = if peak > 0.0 {
            (peak - equity) / peak
        } else {
            0.0
        };

        //calculate per-period return
        let returns = (equity - prev_equity) / prev_equity;

        curve.push(EquityPoint::new(timestamp, equity, drawdown, returns));
        prev_equity = equity;
    }

    curve
}

//calculates maximum drawdown (as a positive fraction) from the curve
pub fn max_drawdown(equity_curve: &[EquityPoint]) -> f64 {
    equity_curve
        .iter()
        .map(|point| point.drawdown)
        .fold(0.0, f64::max)
}

//collects the per-period returns carried on the curve
pub fn curve_returns(equity_curve: &[EquityPoint]) -> Vec<f64> {
    equity_curve.iter().map(|point| point.returns).collect()
}
