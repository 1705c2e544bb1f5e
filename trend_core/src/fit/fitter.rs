use serde::Serialize;

use crate::common::enums::LineSide;
use crate::common::error::TrendError;
use crate::config::fit_config::FitConfig;
use crate::kline::price_window::PriceWindow;
use crate::math::line_fit::{self, Line};

use super::{optimizer, pivot};

/// Support and resistance lines fitted over one window against one target
/// series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLinePair {
    pub support: Line,
    pub resistance: Line,
}

/// Runs the full pipeline for one window: unconstrained fit on closes,
/// pivot selection, then the constrained slope search once per side.
/// Purely computational; results are fresh per call.
#[derive(Debug, Clone)]
pub struct TrendLineFitter {
    config: FitConfig,
}

impl TrendLineFitter {
    pub fn new(config: FitConfig) -> Self {
        Self { config }
    }

    /// Robust fit: pivots picked against highs/lows, support optimized
    /// against the lows and resistance against the highs.
    pub fn fit_high_low(&self, window: &PriceWindow) -> Result<TrendLinePair, TrendError> {
        self.fit_series(&window.closes(), &window.highs(), &window.lows())
    }

    /// Secondary fit with the closes as both target series.
    pub fn fit_close_only(&self, window: &PriceWindow) -> Result<TrendLinePair, TrendError> {
        let closes = window.closes();
        self.fit_series(&closes, &closes, &closes)
    }

    fn fit_series(
        &self,
        closes: &[f64],
        highs: &[f64],
        lows: &[f64],
    ) -> Result<TrendLinePair, TrendError> {
        let base = line_fit::fit(closes)?;
        let (support_pivot, resist_pivot) = pivot::select(&base, highs, lows);

        let support = optimizer::optimize(
            LineSide::Support,
            support_pivot,
            base.slope,
            lows,
            &self.config,
        )?;
        let resistance = optimizer::optimize(
            LineSide::Resistance,
            resist_pivot,
            base.slope,
            highs,
            &self.config,
        )?;

        Ok(TrendLinePair {
            support,
            resistance,
        })
    }
}
