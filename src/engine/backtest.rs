use crate::config::EngineConfig;
use crate::data::TimeSeries;
use crate::engine::benchmark::simulate_buy_and_hold;
use crate::engine::simulator::simulate_signals;
use crate::engine::EngineError;
use crate::metrics::{StrategyMetrics, SummaryMetrics, TradeStats};
use crate::report::{
    normalized_equity_comparison, signal_overlay, trade_pnl_scatter, BacktestReport,
};
use tracing::info;

//main backtest engine: runs the benchmark and the signal-driven
//simulation over one series and assembles the full report
//
//holds only the immutable configuration; every run is independent, so
//engines for different instruments may run in parallel without
//coordination
#[derive(Debug, Clone)]
pub struct BacktestEngine {
    config: EngineConfig,
}

impl BacktestEngine {
    //creates a new backtest engine
    pub fn new(config: EngineConfig) -> Self {
        BacktestEngine { config }
    }

    //returns a reference to the configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    //runs both simulations, computes metrics and reshapes everything for
    //the transport layer
    pub fn run(&self, series: &TimeSeries) -> Result<BacktestReport, EngineError> {
        info!(bars = series.len(), "running backtest");

        let market_curve = simulate_buy_and_hold(series, &self.config)?;
        let simulation = simulate_signals(series, &self.config)?;

        let periods = self.config.trading_periods_per_year;
        let market_metrics = SummaryMetrics::from_equity_curve(&market_curve, periods);
        let strategy_metrics = StrategyMetrics {
            summary: SummaryMetrics::from_equity_curve(&simulation.equity_curve, periods),
            trades: TradeStats::from_ledger(&simulation.trades),
            exposure: simulation.exposure(),
        };

        let equity_curve = normalized_equity_comparison(&market_curve, &simulation.equity_curve);
        let pnl_graph = trade_pnl_scatter(&simulation.trades);
        let trade_visualization = signal_overlay(series);

        info!(
            trades = strategy_metrics.trades.total_trades,
            open_position = simulation.open_position.is_some(),
            "backtest complete"
        );

        Ok(BacktestReport {
            market_metrics,
            strategy_metrics,
            equity_curve,
            pnl_graph,
            trade_visualization,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Bar, Signal};
    use chrono::{TimeZone, Utc};

    fn series(closes: &[f64], signals: &[Signal]) -> TimeSeries {
        let bars = closes
            .iter()
            .zip(signals.iter())
            .enumerate()
            .map(|(i, (&close, &signal))| {
                Bar::new_unchecked(
                    Utc.with_ymd_and_hms(2024, 1, 1 + i as u32, 0, 0, 0).unwrap(),
                    close,
                    close,
                    close,
                    close,
                    1000.0,
                    signal,
                )
            })
            .collect();
        TimeSeries::new(bars).unwrap()
    }

    #[test]
    fn test_report_has_aligned_curves_and_ledger() {
        let series = series(
            &[100.0, 110.0, 121.0, 115.0],
            &[Signal::Hold, Signal::Buy, Signal::Sell, Signal::Hold],
        );
        let engine = BacktestEngine::new(EngineConfig {
            initial_capital: 1000.0,
            fee_rate: 0.0,
            ..EngineConfig::default()
        });

        let report = engine.run(&series).unwrap();

        assert_eq!(report.equity_curve.len(), 3);
        assert_eq!(report.pnl_graph.len(), 1);
        assert_eq!(report.trade_visualization.dates.len(), 4);
        assert_eq!(report.trade_visualization.buy_dates.len(), 1);
        assert_eq!(report.trade_visualization.sell_dates.len(), 1);
        assert_eq!(report.strategy_metrics.trades.total_trades, 1);
        assert_eq!(report.strategy_metrics.trades.win_rate_pct, 100.0);

        //both comparison series start at 1.0
        assert!((report.equity_curve[0].market - 1.0).abs() < 1e-12);
        assert!((report.equity_curve[0].strategy - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_market_metrics_carry_no_trade_fields_in_json() {
        let series = series(
            &[100.0, 101.0, 102.0],
            &[Signal::Hold, Signal::Hold, Signal::Hold],
        );
        let engine = BacktestEngine::new(EngineConfig::default());
        let report = engine.run(&series).unwrap();

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["market_metrics"].get("total_trades").is_none());
        assert!(json["strategy_metrics"].get("total_trades").is_some());
        assert_eq!(json["strategy_metrics"]["total_trades"], 0);
    }

    #[test]
    fn test_insufficient_data_propagates() {
        let series = series(&[100.0], &[Signal::Hold]);
        let engine = BacktestEngine::new(EngineConfig::default());
        assert!(matches!(
            engine.run(&series),
            Err(EngineError::InsufficientData(1))
        ));
    }
}
