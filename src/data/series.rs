use crate::data::bar::Bar;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

//violations of the input contract from the data collaborator
#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("Bars out of chronological order: {current} follows {previous}")]
    OutOfOrder {
        previous: DateTime<Utc>,
        current: DateTime<Utc>,
    },
    #[error("Duplicate bar timestamp: {0}")]
    DuplicateTimestamp(DateTime<Utc>),
    #[error("Signal value {value} outside {{-1, 0, 1}} at record {record}")]
    InvalidSignal { value: i64, record: usize },
}

//an ordered, de-duplicated sequence of daily bars with one signal per bar
//
//construction enforces strictly increasing timestamps; the minimum-length
//requirement is checked by the simulators, so an empty-but-well-formed
//series is constructible and only fails once simulated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeries {
    bars: Vec<Bar>,
}

impl TimeSeries {
    //creates a validated time series from bars already in ascending order
    pub fn new(bars: Vec<Bar>) -> Result<Self, SeriesError> {
        for pair in bars.windows(2) {
            if pair[1].timestamp == pair[0].timestamp {
                return Err(SeriesError::DuplicateTimestamp(pair[1].timestamp));
            }
            if pair[1].timestamp < pair[0].timestamp {
                return Err(SeriesError::OutOfOrder {
                    previous: pair[0].timestamp,
                    current: pair[1].timestamp,
                });
            }
        }

        Ok(TimeSeries { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars.iter()
    }
}
