use crate::metrics::timeseries::{curve_returns, max_drawdown, EquityPoint};
use crate::portfolio::Trade;
use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

//risk/return statistics computed from an equity curve
//
//computed once per run from immutable inputs; every arithmetic edge case
//(zero variance, zero-year horizon) maps to an explicit sentinel instead
//of leaking NaN to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub initial_equity: f64,
    pub final_equity: f64,
    pub total_return_pct: f64,
    //None when the horizon is zero periods; serializes as null
    pub cagr_pct: Option<f64>,
    pub volatility_pct: f64,
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    pub max_drawdown_pct: f64,
}

impl SummaryMetrics {
    //calculates curve statistics; returns are read off the curve, which
    //anchors the first period at the configured initial capital
    pub fn from_equity_curve(equity_curve: &[EquityPoint], periods_per_year: u32) -> Self {
        let initial_equity = equity_curve.first().map(|p| p.equity).unwrap_or(0.0);
        let final_equity = equity_curve.last().map(|p| p.equity).unwrap_or(0.0);

        let total_return_pct = if initial_equity > 0.0 {
            (final_equity / initial_equity - 1.0) * 100.0
        } else {
            0.0
        };

        let returns = curve_returns(equity_curve);
        let periods = periods_per_year as f64;

        //compound annual growth rate over the simulated horizon
        let n_years = returns.len() as f64 / periods;
        let cagr_pct = if n_years > 0.0 && initial_equity > 0.0 {
            Some(((final_equity / initial_equity).powf(1.0 / n_years) - 1.0) * 100.0)
        } else {
            None
        };

        let volatility_pct = annualized_volatility(&returns, periods) * 100.0;
        let sharpe_ratio = calculate_sharpe_ratio(&returns, periods);
        let sortino_ratio = calculate_sortino_ratio(&returns, periods);
        let max_drawdown_pct = max_drawdown(equity_curve) * 100.0;

        SummaryMetrics {
            initial_equity,
            final_equity,
            total_return_pct,
            cagr_pct,
            volatility_pct,
            sharpe_ratio,
            sortino_ratio,
            max_drawdown_pct,
        }
    }

    //prints metrics in a formatted table
    pub fn pretty_print_table(&self) {
        let mut table = Table::new();

        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        table.add_row(Row::new(vec![
            Cell::new("Initial Equity"),
            Cell::new(&format!("${:.2}", self.initial_equity)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Final Equity"),
            Cell::new(&format!("${:.2}", self.final_equity)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Total Return"),
            Cell::new(&format!("{:.2}%", self.total_return_pct)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("CAGR"),
            Cell::new(&match self.cagr_pct {
                Some(cagr) => format!("{:.2}%", cagr),
                None => "N/A".to_string(),
            }),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Volatility (ann.)"),
            Cell::new(&format!("{:.2}%", self.volatility_pct)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Sharpe Ratio"),
            Cell::new(&format!("{:.3}", self.sharpe_ratio)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Sortino Ratio"),
            Cell::new(&format!("{:.3}", self.sortino_ratio)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Max Drawdown"),
            Cell::new(&format!("{:.2}%", self.max_drawdown_pct)),
        ]));

        table.printstd();
    }
}

//statistics over the closed-trade ledger
//
//an empty ledger is not an error: every field has a defined zero value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeStats {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    pub win_rate_pct: f64,
    pub avg_win: f64,
    pub avg_loss: f64,
    pub largest_win: f64,
    pub largest_loss: f64,
    //gross profit over gross loss; f64::INFINITY when there are winners
    //but no losers, 0.0 when there are no winners either
    pub profit_factor: f64,
}

impl TradeStats {
    pub fn from_ledger(trades: &[Trade]) -> Self {
        if trades.is_empty() {
            return TradeStats {
                total_trades: 0,
                winning_trades: 0,
                losing_trades: 0,
                win_rate_pct: 0.0,
                avg_win: 0.0,
                avg_loss: 0.0,
                largest_win: 0.0,
                largest_loss: 0.0,
                profit_factor: 0.0,
            };
        }

        let wins: Vec<f64> = trades
            .iter()
            .map(|t| t.pnl)
            .filter(|&pnl| pnl > 0.0)
            .collect();
        let losses: Vec<f64> = trades
            .iter()
            .map(|t| t.pnl)
            .filter(|&pnl| pnl < 0.0)
            .collect();

        let total = trades.len();
        let num_winning = wins.len();
        let num_losing = losses.len();

        let win_rate_pct = 100.0 * num_winning as f64 / total as f64;

        let avg_win = if num_winning > 0 {
            wins.iter().sum::<f64>() / num_winning as f64
        } else {
            0.0
        };

        let avg_loss = if num_losing > 0 {
            losses.iter().sum::<f64>() / num_losing as f64
        } else {
            0.0
        };

        let gross_profit: f64 = wins.iter().sum();
        let gross_loss: f64 = losses.iter().sum::<f64>().abs();

        let profit_factor = if gross_loss > 0.0 {
            gross_profit / gross_loss
        } else if gross_profit > 0.0 {
            f64::INFINITY
        } else {
            0.0
        };

        let largest_win = wins.iter().fold(0.0f64, |a, &b| a.max(b));
        let largest_loss = losses.iter().fold(0.0f64, |a, &b| a.min(b));

        TradeStats {
            total_trades: total,
            winning_trades: num_winning,
            losing_trades: num_losing,
            win_rate_pct,
            avg_win,
            avg_loss,
            largest_win,
            largest_loss,
            profit_factor,
        }
    }
}

//full statistics bundle for the signal-driven strategy run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyMetrics {
    #[serde(flatten)]
    pub summary: SummaryMetrics,
    #[serde(flatten)]
    pub trades: TradeStats,
    //fraction of simulated bars spent in market
    pub exposure: f64,
}

impl StrategyMetrics {
    //prints metrics in a formatted table
    pub fn pretty_print_table(&self) {
        let mut table = Table::new();

        table.add_row(Row::new(vec![Cell::new("Metric"), Cell::new("Value")]));

        table.add_row(Row::new(vec![
            Cell::new("Initial Equity"),
            Cell::new(&format!("${:.2}", self.summary.initial_equity)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Final Equity"),
            Cell::new(&format!("${:.2}", self.summary.final_equity)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Total Return"),
            Cell::new(&format!("{:.2}%", self.summary.total_return_pct)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("CAGR"),
            Cell::new(&match self.summary.cagr_pct {
                Some(cagr) => format!("{:.2}%", cagr),
                None => "N/A".to_string(),
            }),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Volatility (ann.)"),
            Cell::new(&format!("{:.2}%", self.summary.volatility_pct)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Sharpe Ratio"),
            Cell::new(&format!("{:.3}", self.summary.sharpe_ratio)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Sortino Ratio"),
            Cell::new(&format!("{:.3}", self.summary.sortino_ratio)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Max Drawdown"),
            Cell::new(&format!("{:.2}%", self.summary.max_drawdown_pct)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Number of Trades"),
            Cell::new(&format!("{}", self.trades.total_trades)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Win Rate"),
            Cell::new(&format!("{:.2}%", self.trades.win_rate_pct)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Avg Win"),
            Cell::new(&format!("${:.2}", self.trades.avg_win)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Avg Loss"),
            Cell::new(&format!("${:.2}", self.trades.avg_loss)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Largest Win"),
            Cell::new(&format!("${:.2}", self.trades.largest_win)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Largest Loss"),
            Cell::new(&format!("${:.2}", self.trades.largest_loss)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Profit Factor"),
            Cell::new(&format!("{:.3}", self.trades.profit_factor)),
        ]));

        table.add_row(Row::new(vec![
            Cell::new("Exposure"),
            Cell::new(&format!("{:.2}%", self.exposure * 100.0)),
        ]));

        table.printstd();
    }
}

fn annualized_volatility(returns: &[f64], periods_per_year: f64) -> f64 {
    //sample stdev needs at least two observations
    if returns.len() < 2 {
        return 0.0;
    }

    let std_dev = returns.std_dev();
    if !(std_dev > 0.0) {
        return 0.0;
    }

    std_dev * periods_per_year.sqrt()
}

fn calculate_sharpe_ratio(returns: &[f64], periods_per_year: f64) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }

    let mean = returns.mean();
    let std_dev = returns.std_dev();

    //zero-variance series has a defined sharpe of zero
    if !(std_dev > 0.0) {
        return 0.0;
    }

    (mean / std_dev) * periods_per_year.sqrt()
}

fn calculate_sortino_ratio(returns: &[f64], periods_per_year: f64) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }

    let mean = returns.mean();

    //downside deviation uses only negative returns
    let negative_returns: Vec<f64> = returns.iter().filter(|&&r| r < 0.0).copied().collect();

    if negative_returns.is_empty() {
        return if mean > 0.0 { f64::INFINITY } else { 0.0 };
    }

    if negative_returns.len() < 2 {
        return 0.0;
    }

    let downside_dev = negative_returns.std_dev();
    if !(downside_dev > 0.0) {
        return 0.0;
    }

    (mean / downside_dev) * periods_per_year.sqrt()
}
