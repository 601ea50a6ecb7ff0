use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indexmap::IndexMap;
use pozole::prelude::*;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "pozole")]
#[command(about = "A Rust-based backtesting engine for signal-driven strategies", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    //run one backtest per input file
    Run {
        //path(s) to csv files with signal-annotated bars, one instrument each
        #[arg(long, required = true, num_args = 1..)]
        data: Vec<PathBuf>,

        //path to a json engine configuration (overrides the flags below)
        #[arg(long)]
        config: Option<PathBuf>,

        //starting cash balance
        #[arg(long, default_value = "1000000")]
        initial_capital: f64,

        //proportional fee per side (entry and exit)
        #[arg(long, default_value = "0.002")]
        fee_rate: f64,

        //trading periods per year used for annualization
        #[arg(long, default_value = "252")]
        periods_per_year: u32,

        //output path for the json report (single run: the report itself;
        //multiple runs: a map keyed by file stem)
        #[arg(long)]
        output_json: Option<PathBuf>,

        //output path for the normalized equity comparison csv
        #[arg(long)]
        output_equity_csv: Option<PathBuf>,

        //output path for the closed trades csv
        #[arg(long)]
        output_trades_csv: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            data,
            config,
            initial_capital,
            fee_rate,
            periods_per_year,
            output_json,
            output_equity_csv,
            output_trades_csv,
        } => {
            let engine_config = match config {
                Some(path) => EngineConfig::from_json_file(&path)
                    .context(format!("Failed to load config from {:?}", path))?,
                None => EngineConfig::new(initial_capital, fee_rate, periods_per_year)?,
            };

            run_backtests(
                data,
                engine_config,
                output_json,
                output_equity_csv,
                output_trades_csv,
            )?;
        }
    }

    Ok(())
}

fn run_backtests(
    data_paths: Vec<PathBuf>,
    config: EngineConfig,
    output_json: Option<PathBuf>,
    output_equity_csv: Option<PathBuf>,
    output_trades_csv: Option<PathBuf>,
) -> Result<()> {
    println!("Pozole Signal Backtesting Engine");
    println!("================================\n");
    println!("Initial capital: ${:.2}", config.initial_capital);
    println!("Fee rate: {:.4} per side", config.fee_rate);
    println!(
        "Trading periods/year: {}\n",
        config.trading_periods_per_year
    );

    if data_paths.len() > 1 && (output_equity_csv.is_some() || output_trades_csv.is_some()) {
        anyhow::bail!("CSV outputs are only supported for a single input file");
    }

    //independent runs share nothing, so they fan out across inputs
    let outcomes: Vec<(String, Result<BacktestReport>)> = data_paths
        .par_iter()
        .map(|path| (run_label(path), run_single(path, &config)))
        .collect();

    let mut reports: IndexMap<String, BacktestReport> = IndexMap::new();
    let mut failures = 0usize;

    for (label, outcome) in outcomes {
        match outcome {
            Ok(report) => {
                println!("Backtest Results: {label}");
                println!("========================\n");
                println!("Buy & Hold Benchmark");
                report.market_metrics.pretty_print_table();
                println!("\nSignal Strategy");
                report.strategy_metrics.pretty_print_table();
                println!();
                reports.insert(label, report);
            }
            Err(error) => {
                eprintln!("Backtest failed for {label}: {error:#}");
                failures += 1;
            }
        }
    }

    if let Some(json_path) = output_json {
        let json = if reports.len() == 1 {
            let (_, report) = reports.first().context("No successful run to export")?;
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string_pretty(&reports)?
        };
        std::fs::write(&json_path, json)?;
        println!("Report saved to {:?}", json_path);
    }

    if let Some((_, report)) = reports.first() {
        if let Some(equity_path) = output_equity_csv {
            save_equity_csv(&report.equity_curve, &equity_path)?;
            println!("Equity comparison saved to {:?}", equity_path);
        }

        if let Some(trades_path) = output_trades_csv {
            save_trades_csv(&report.pnl_graph, &trades_path)?;
            println!("Trades saved to {:?}", trades_path);
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} backtests failed", data_paths.len());
    }

    Ok(())
}

fn run_label(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn run_single(path: &Path, config: &EngineConfig) -> Result<BacktestReport> {
    let series = load_csv(path).context(format!("Failed to load data from {:?}", path))?;

    println!(
        "Loaded {} bars ({} to {})",
        series.len(),
        series
            .first()
            .map(|b| b.timestamp.to_rfc3339())
            .unwrap_or_else(|| "-".to_string()),
        series
            .last()
            .map(|b| b.timestamp.to_rfc3339())
            .unwrap_or_else(|| "-".to_string()),
    );

    let engine = BacktestEngine::new(*config);
    Ok(engine.run(&series)?)
}

fn save_equity_csv(equity_curve: &[EquityComparisonPoint], path: &PathBuf) -> Result<()> {
    use std::io::Write;

    let mut file = std::fs::File::create(path)?;
    writeln!(file, "date,market,strategy")?;

    for point in equity_curve {
        writeln!(file, "{},{},{}", point.date, point.market, point.strategy)?;
    }

    Ok(())
}

fn save_trades_csv(trades: &[TradePnlPoint], path: &PathBuf) -> Result<()> {
    use std::io::Write;

    let mut file = std::fs::File::create(path)?;
    writeln!(
        file,
        "entry_date,exit_date,entry_price,exit_price,pnl,return_pct,is_profit"
    )?;

    for trade in trades {
        writeln!(
            file,
            "{},{},{},{},{},{},{}",
            trade.entry_date,
            trade.exit_date,
            trade.entry_price,
            trade.exit_price,
            trade.pnl,
            trade.return_pct,
            trade.is_profit
        )?;
    }

    Ok(())
}
