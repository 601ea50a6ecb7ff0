use crate::data::TimeSeries;
use crate::metrics::EquityPoint;
use crate::portfolio::{Trade, TradeDirection};
use serde::{Deserialize, Serialize};

//one point of the normalized equity comparison: market and strategy each
//divided by their own first curve value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityComparisonPoint {
    pub date: String,
    pub market: f64,
    pub strategy: f64,
}

//one closed trade reshaped for the pnl scatter chart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradePnlPoint {
    pub entry_date: String,
    pub exit_date: String,
    pub entry_price: f64,
    pub exit_price: f64,
    pub pnl: f64,
    pub return_pct: f64,
    pub direction: TradeDirection,
    pub is_profit: bool,
}

//price chart overlay: the full close series plus the dates where buy and
//sell signals occurred
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalOverlay {
    pub dates: Vec<String>,
    pub close: Vec<f64>,
    pub buy_dates: Vec<String>,
    pub sell_dates: Vec<String>,
}

//reshapes the two equity curves into the normalized comparison sequence
//
//both curves span bars 1..n by construction, so zipping by index pairs
//the same date on both sides
pub fn normalized_equity_comparison(
    market: &[EquityPoint],
    strategy: &[EquityPoint],
) -> Vec<EquityComparisonPoint> {
    let (Some(market_first), Some(strategy_first)) = (market.first(), strategy.first()) else {
        return Vec::new();
    };

    market
        .iter()
        .zip(strategy.iter())
        .map(|(m, s)| EquityComparisonPoint {
            date: m.timestamp.to_rfc3339(),
            market: m.equity / market_first.equity,
            strategy: s.equity / strategy_first.equity,
        })
        .collect()
}

//reshapes the trade ledger into scatter points
pub fn trade_pnl_scatter(trades: &[Trade]) -> Vec<TradePnlPoint> {
    trades
        .iter()
        .map(|trade| TradePnlPoint {
            entry_date: trade.entry_timestamp.to_rfc3339(),
            exit_date: trade.exit_timestamp.to_rfc3339(),
            entry_price: trade.entry_price,
            exit_price: trade.exit_price,
            pnl: trade.pnl,
            return_pct: trade.return_pct,
            direction: trade.direction,
            is_profit: trade.is_profit,
        })
        .collect()
}

//builds the chart overlay from the original series
pub fn signal_overlay(series: &TimeSeries) -> SignalOverlay {
    let mut dates = Vec::with_capacity(series.len());
    let mut close = Vec::with_capacity(series.len());
    let mut buy_dates = Vec::new();
    let mut sell_dates = Vec::new();

    for bar in series.iter() {
        let date = bar.timestamp.to_rfc3339();
        if bar.signal.is_buy() {
            buy_dates.push(date.clone());
        } else if bar.signal.is_sell() {
            sell_dates.push(date.clone());
        }
        dates.push(date);
        close.push(bar.close);
    }

    SignalOverlay {
        dates,
        close,
        buy_dates,
        sell_dates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Bar, Signal};
    use crate::metrics::build_equity_curve;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    fn curve(values: &[f64]) -> Vec<EquityPoint> {
        let marks: Vec<_> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (ts(1 + i as u32), v))
            .collect();
        build_equity_curve(&marks, values[0])
    }

    #[test]
    fn test_comparison_normalizes_each_side_by_its_own_first_value() {
        let market = curve(&[1000.0, 1100.0]);
        let strategy = curve(&[2000.0, 1900.0]);

        let points = normalized_equity_comparison(&market, &strategy);
        assert_eq!(points.len(), 2);
        assert!((points[0].market - 1.0).abs() < 1e-12);
        assert!((points[0].strategy - 1.0).abs() < 1e-12);
        assert!((points[1].market - 1.1).abs() < 1e-12);
        assert!((points[1].strategy - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_comparison_of_empty_curves_is_empty() {
        assert!(normalized_equity_comparison(&[], &[]).is_empty());
    }

    #[test]
    fn test_overlay_collects_signal_dates() {
        let closes = [100.0, 101.0, 102.0, 103.0];
        let signals = [Signal::Hold, Signal::Buy, Signal::Sell, Signal::Buy];
        let bars = closes
            .iter()
            .zip(signals.iter())
            .enumerate()
            .map(|(i, (&c, &s))| {
                Bar::new_unchecked(ts(1 + i as u32), c, c, c, c, 1000.0, s)
            })
            .collect();
        let series = TimeSeries::new(bars).unwrap();

        let overlay = signal_overlay(&series);
        assert_eq!(overlay.dates.len(), 4);
        assert_eq!(overlay.close, vec![100.0, 101.0, 102.0, 103.0]);
        assert_eq!(overlay.buy_dates.len(), 2);
        assert_eq!(overlay.sell_dates.len(), 1);
        assert_eq!(overlay.buy_dates[0], overlay.dates[1]);
        assert_eq!(overlay.sell_dates[0], overlay.dates[2]);
    }
}
