use chrono::NaiveDateTime;
use thiserror::Error;

use super::enums::LineSide;

/// Errors surfaced by the fitting engine.
///
/// Each variant carries enough identity (side, pivot, timestamp) for a
/// caller to report which window could not be fit; retries are caller
/// policy, not handled here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrendError {
    /// Fewer samples than the operation can work with.
    #[error("need at least {min} samples, got {got}")]
    InsufficientData { got: usize, min: usize },

    /// Both minimal slope perturbations left the feasible region, so the
    /// search has no direction to move in. Per-window failure.
    #[error("{side} optimizer stalled at pivot {pivot}")]
    OptimizerStalled { side: LineSide, pivot: usize },

    /// The upstream history is empty for the requested symbol.
    #[error("no price data for {symbol}")]
    NoData { symbol: String },

    /// The unconstrained starting slope violated containment at the chosen
    /// pivot. The pivot is picked as the extremal residual, so this cannot
    /// happen on well-formed input; it indicates a programming error.
    #[error("{side} fit started from an infeasible slope at pivot {pivot}")]
    PivotViolation { side: LineSide, pivot: usize },

    /// An OHLC row whose low/high are not the extremes of its four prices.
    #[error("invalid candle at {time}: {detail}")]
    InvalidCandle { time: NaiveDateTime, detail: String },
}
