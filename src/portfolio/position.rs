use crate::portfolio::trade::{Trade, TradeDirection};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//transient state for the single open long position during a simulation
//
//the simulator holds an Option<Position>: None is the FLAT state, Some is
//LONG. the position is discarded (converted into a closed Trade) the
//moment it closes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    //timestamp of the entry bar
    pub entry_timestamp: DateTime<Utc>,

    //fee-effective entry price: close * (1 + fee_rate)
    pub entry_price: f64,

    //shares bought with the whole cash balance (fully invested)
    pub shares: f64,
}

impl Position {
    //opens a position at the bar close, deploying the entire cash balance
    //net of the entry fee
    pub fn open(timestamp: DateTime<Utc>, close: f64, fee_rate: f64, cash: f64) -> Self {
        let entry_price = close * (1.0 + fee_rate);
        let shares = cash / entry_price;

        //a non-finite or non-positive size means the simulation state is
        //corrupt; halt with the offending bar rather than carry it forward
        assert!(
            shares.is_finite() && shares > 0.0,
            "invalid position size {shares} at {timestamp} (cash={cash}, entry_price={entry_price})"
        );

        Position {
            entry_timestamp: timestamp,
            entry_price,
            shares,
        }
    }

    //unrealized mark-to-market value at the current close, no fee applied
    pub fn market_value(&self, close: f64) -> f64 {
        self.shares * close
    }

    //closes the position at the bar close net of the exit fee, consuming
    //the position and producing the ledger entry
    pub fn close(self, timestamp: DateTime<Utc>, close: f64, fee_rate: f64) -> Trade {
        let exit_price = close * (1.0 - fee_rate);
        let pnl = (exit_price - self.entry_price) * self.shares;
        let return_pct = (exit_price / self.entry_price - 1.0) * 100.0;

        Trade {
            entry_timestamp: self.entry_timestamp,
            exit_timestamp: timestamp,
            entry_price: self.entry_price,
            exit_price,
            shares: self.shares,
            pnl,
            return_pct,
            direction: TradeDirection::Long,
            is_profit: pnl > 0.0,
        }
    }
}
