use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

//only long round trips exist under the current signal contract,
//but the field is kept explicit for downstream consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeDirection {
    Long,
}

//a closed round trip, appended to the trade ledger the moment the
//position closes; immutable afterward
//
//entry and exit prices are fee-effective: entry = close * (1 + fee_rate),
//exit = close * (1 - fee_rate), so pnl = (exit - entry) * shares holds
//exactly and is net of both fees
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub entry_timestamp: DateTime<Utc>,
    pub exit_timestamp: DateTime<Utc>,
    pub entry_price: f64,
    pub exit_price: f64,
    pub shares: f64,
    pub pnl: f64,
    pub return_pct: f64,
    pub direction: TradeDirection,
    pub is_profit: bool,
}
