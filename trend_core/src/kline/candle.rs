use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::common::error::TrendError;

/// One OHLC price sample. Immutable once read; its ordinal position within
/// a window or history carries meaning, the struct itself does not track it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Candle {
    /// Build a candle, rejecting rows whose low/high are not the extremes
    /// of the four prices.
    pub fn new(
        time: NaiveDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
    ) -> Result<Self, TrendError> {
        let min_price = low.min(open).min(high).min(close);
        let max_price = low.max(open).max(high).max(close);

        if low > min_price {
            return Err(TrendError::InvalidCandle {
                time,
                detail: format!(
                    "low={} is not min of [open={}, high={}, low={}, close={}]",
                    low, open, high, low, close
                ),
            });
        }
        if high < max_price {
            return Err(TrendError::InvalidCandle {
                time,
                detail: format!(
                    "high={} is not max of [open={}, high={}, low={}, close={}]",
                    high, open, high, low, close
                ),
            });
        }

        Ok(Self {
            time,
            open,
            high,
            low,
            close,
        })
    }
}
