use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BarError {
    #[error("Invalid OHLC values: high ({high}) < low ({low})")]
    InvalidHighLow { high: f64, low: f64 },
    #[error("Invalid OHLC values: close ({close}) outside high-low range [{low}, {high}]")]
    InvalidClose { close: f64, high: f64, low: f64 },
    #[error("Invalid OHLC values: open ({open}) outside high-low range [{low}, {high}]")]
    InvalidOpen { open: f64, high: f64, low: f64 },
    #[error("Non-positive {field} price: {value}")]
    NonPositivePrice { field: &'static str, value: f64 },
    #[error("Negative volume: {0}")]
    NegativeVolume(f64),
}

//per-bar trading signal from the upstream signal generator
//source encoding: +1 buy, -1 sell, 0 hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl Signal {
    //parses the numeric source encoding, rejecting anything outside {-1, 0, 1}
    pub fn from_value(value: i64) -> Option<Self> {
        match value {
            1 => Some(Signal::Buy),
            -1 => Some(Signal::Sell),
            0 => Some(Signal::Hold),
            _ => None,
        }
    }

    //converts back to the numeric source encoding
    pub fn to_value(self) -> i64 {
        match self {
            Signal::Buy => 1,
            Signal::Sell => -1,
            Signal::Hold => 0,
        }
    }

    pub fn is_buy(self) -> bool {
        self == Signal::Buy
    }

    pub fn is_sell(self) -> bool {
        self == Signal::Sell
    }
}

//represents a single ohlcv bar (candlestick) of market data plus its signal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub signal: Signal,
}

impl Bar {
    //creates a new Bar with validation
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        signal: Signal,
    ) -> Result<Self, BarError> {
        //validate prices are positive
        for (field, value) in [("open", open), ("high", high), ("low", low), ("close", close)] {
            if value <= 0.0 {
                return Err(BarError::NonPositivePrice { field, value });
            }
        }

        //validate high >= low
        if high < low {
            return Err(BarError::InvalidHighLow { high, low });
        }

        //validate close within [low, high]
        if close < low || close > high {
            return Err(BarError::InvalidClose { close, high, low });
        }

        //validate open within [low, high]
        if open < low || open > high {
            return Err(BarError::InvalidOpen { open, high, low });
        }

        //validate non-negative volume
        if volume < 0.0 {
            return Err(BarError::NegativeVolume(volume));
        }

        Ok(Bar {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            signal,
        })
    }

    //creates a Bar without validation
    pub fn new_unchecked(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
        signal: Signal,
    ) -> Self {
        Bar {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
            signal,
        }
    }

    //returns the typical price (HLC/3)
    pub fn typical_price(&self) -> f64 {
        (self.high + self.low + self.close) / 3.0
    }

    //returns the range (high - low)
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}
