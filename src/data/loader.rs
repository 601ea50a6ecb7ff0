use crate::data::bar::{Bar, Signal};
use crate::data::series::{SeriesError, TimeSeries};
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(alias = "Date", alias = "timestamp")]
    date: Option<String>,
    #[serde(alias = "Open")]
    open: Option<f64>,
    #[serde(alias = "High")]
    high: Option<f64>,
    #[serde(alias = "Low")]
    low: Option<f64>,
    #[serde(alias = "Close")]
    close: Option<f64>,
    #[serde(alias = "Volume")]
    volume: Option<f64>,
    #[serde(alias = "Signal")]
    signal: Option<i64>,
}

//parses a timestamp as rfc3339, falling back to the plain and
//day-first date formats the signal feed exports
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            let midnight = date
                .and_hms_opt(0, 0, 0)
                .context(format!("Invalid date '{raw}'"))?;
            return Ok(midnight.and_utc());
        }
    }

    anyhow::bail!("Unrecognized timestamp format: '{raw}'")
}

//loads a signal-annotated price series from a csv file
//
//rows with any missing field are dropped before the series is built;
//remaining rows are sorted chronologically. duplicate timestamps are an
//input-contract violation and surface as a SeriesError
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<TimeSeries> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context(format!("Failed to open CSV file: {:?}", path))?;

    let mut bars = Vec::new();
    let mut dropped = 0usize;

    for (index, result) in reader.deserialize().enumerate() {
        let line = index + 2;
        let record: CsvRecord =
            result.context(format!("Failed to parse CSV record at line {line}"))?;

        //drop incomplete rows, mirroring the upstream cleaning step
        let (date, open, high, low, close, volume, signal_value) = match (
            record.date,
            record.open,
            record.high,
            record.low,
            record.close,
            record.volume,
            record.signal,
        ) {
            (Some(d), Some(o), Some(h), Some(l), Some(c), Some(v), Some(s)) => {
                (d, o, h, l, c, v, s)
            }
            _ => {
                dropped += 1;
                continue;
            }
        };

        let timestamp = parse_timestamp(&date)
            .context(format!("Failed to parse timestamp at line {line}"))?;

        let signal = Signal::from_value(signal_value).ok_or(SeriesError::InvalidSignal {
            value: signal_value,
            record: line,
        })?;

        let bar = Bar::new(timestamp, open, high, low, close, volume, signal)
            .context(format!("Invalid bar at line {line}"))?;

        bars.push(bar);
    }

    if dropped > 0 {
        warn!(dropped, "dropped incomplete csv rows");
    }

    //sort by timestamp to ensure chronological order
    bars.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    debug!(bars = bars.len(), path = ?path, "loaded price series");

    Ok(TimeSeries::new(bars)?)
}
