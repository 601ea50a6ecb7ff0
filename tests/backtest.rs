use pozole::prelude::*;
use std::io::Write;

const CSV_HEADER: &str = "Date,Open,High,Low,Close,Volume,Signal";

fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp csv");
    writeln!(file, "{CSV_HEADER}").unwrap();
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn loads_sorts_and_drops_incomplete_rows() {
    //rows arrive out of order with one incomplete row
    let file = write_csv(&[
        "2024-01-03,102,103,101,102.5,1200,0",
        "2024-01-02,101,102,100,101.5,,1",
        "2024-01-01,100,101,99,100.5,1000,0",
        "2024-01-04,103,104,102,103.5,1300,-1",
        "2024-01-02,101,102,100,101.5,1100,1",
    ]);

    let series = load_csv(file.path()).expect("load csv");

    assert_eq!(series.len(), 4);
    let timestamps: Vec<_> = series.iter().map(|b| b.timestamp).collect();
    let mut sorted = timestamps.clone();
    sorted.sort();
    assert_eq!(timestamps, sorted);
    assert_eq!(series.first().unwrap().signal, Signal::Hold);
}

#[test]
fn duplicate_timestamps_are_an_input_contract_violation() {
    let file = write_csv(&[
        "2024-01-01,100,101,99,100.5,1000,0",
        "2024-01-01,100,101,99,100.6,1000,0",
    ]);

    let result = load_csv(file.path());
    assert!(result.is_err());
    let chain = format!("{:#}", result.unwrap_err());
    assert!(chain.contains("Duplicate"));
}

#[test]
fn unknown_signal_values_are_rejected() {
    let file = write_csv(&["2024-01-01,100,101,99,100.5,1000,2"]);

    let result = load_csv(file.path());
    assert!(result.is_err());
    let chain = format!("{:#}", result.unwrap_err());
    assert!(chain.contains("Signal value 2"));
}

#[test]
fn day_first_dates_parse_like_the_signal_feed_export() {
    let file = write_csv(&[
        "01/02/2024,100,101,99,100.5,1000,0",
        "02/02/2024,101,102,100,101.5,1000,0",
    ]);

    let series = load_csv(file.path()).expect("load csv");
    assert_eq!(series.len(), 2);
    assert_eq!(
        series.first().unwrap().timestamp.to_rfc3339(),
        "2024-02-01T00:00:00+00:00"
    );
}

#[test]
fn full_pipeline_from_csv_to_report() {
    let file = write_csv(&[
        "2024-01-01,100,100,100,100,1000,0",
        "2024-01-02,110,110,110,110,1000,1",
        "2024-01-03,121,121,121,121,1000,-1",
        "2024-01-04,118,118,118,118,1000,0",
    ]);

    let series = load_csv(file.path()).expect("load csv");
    let config = EngineConfig::new(1000.0, 0.0, 252).unwrap();
    let report = BacktestEngine::new(config).run(&series).expect("run");

    //one closed round trip: buy at 110, sell at 121
    assert_eq!(report.pnl_graph.len(), 1);
    let trade = &report.pnl_graph[0];
    assert_eq!(trade.entry_price, 110.0);
    assert_eq!(trade.exit_price, 121.0);
    assert!(trade.is_profit);

    assert_eq!(report.strategy_metrics.trades.total_trades, 1);
    assert_eq!(report.strategy_metrics.trades.win_rate_pct, 100.0);
    assert!(report.strategy_metrics.trades.profit_factor.is_infinite());

    //curves cover bars 1..n and the comparison starts at parity
    assert_eq!(report.equity_curve.len(), 3);
    assert!((report.equity_curve[0].market - 1.0).abs() < 1e-12);
    assert!((report.equity_curve[0].strategy - 1.0).abs() < 1e-12);

    //overlay carries the full series plus the signal dates
    assert_eq!(report.trade_visualization.dates.len(), 4);
    assert_eq!(report.trade_visualization.buy_dates.len(), 1);
    assert_eq!(report.trade_visualization.sell_dates.len(), 1);

    //transport contract: fixed field presence in the serialized form
    let json = serde_json::to_value(&report).unwrap();
    for field in [
        "market_metrics",
        "strategy_metrics",
        "equity_curve",
        "pnl_graph",
        "trade_visualization",
    ] {
        assert!(json.get(field).is_some(), "missing field {field}");
    }
    //profit factor sentinel serializes as null rather than crashing
    assert!(json["strategy_metrics"]["profit_factor"].is_null());
}

#[test]
fn report_is_identical_across_runs() {
    let file = write_csv(&[
        "2024-01-01,100,100,100,100,1000,1",
        "2024-01-02,104,104,104,104,1000,0",
        "2024-01-03,98,98,98,98,1000,-1",
        "2024-01-04,99,99,99,99,1000,1",
        "2024-01-05,105,105,105,105,1000,0",
    ]);

    let series = load_csv(file.path()).expect("load csv");
    let engine = BacktestEngine::new(EngineConfig::default());

    let first = serde_json::to_string(&engine.run(&series).unwrap()).unwrap();
    let second = serde_json::to_string(&engine.run(&series).unwrap()).unwrap();
    assert_eq!(first, second);
}
