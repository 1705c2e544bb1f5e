use chrono::NaiveDateTime;
use serde::Serialize;

use crate::common::error::TrendError;
use crate::config::fit_config::FitConfig;
use crate::fit::fitter::TrendLineFitter;
use crate::kline::candle::Candle;
use crate::kline::price_window::PriceWindow;
use crate::math::line_fit::Line;

/// Per-position support/resistance slopes, aligned to the history index.
/// Entries before the first full window, and entries whose window could not
/// be fit, stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SlopeSeries {
    pub support_slope: Vec<Option<f64>>,
    pub resist_slope: Vec<Option<f64>>,
}

impl SlopeSeries {
    fn with_len(len: usize) -> Self {
        Self {
            support_slope: vec![None; len],
            resist_slope: vec![None; len],
        }
    }

    /// Number of positions carrying a fitted slope.
    pub fn fitted_count(&self) -> usize {
        self.support_slope.iter().filter(|s| s.is_some()).count()
    }
}

/// One point of a renderable line overlay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub time: NaiveDateTime,
    pub value: f64,
}

/// The four overlay lines for the most recent window: support/resistance
/// from the high-low fit and from the close-only fit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendChannels {
    pub support_hl: Vec<ChartPoint>,
    pub resist_hl: Vec<ChartPoint>,
    pub support_close: Vec<ChartPoint>,
    pub resist_close: Vec<ChartPoint>,
}

/// Slides the fitter across a whole history, window by window.
#[derive(Debug, Clone)]
pub struct RollingAnalyzer {
    fitter: TrendLineFitter,
    lookback: usize,
}

impl RollingAnalyzer {
    pub fn new(config: FitConfig) -> Self {
        let lookback = config.lookback;
        Self {
            fitter: TrendLineFitter::new(config),
            lookback,
        }
    }

    /// Fit every full window of the history and collect the slope series.
    ///
    /// A stalled optimizer fails only its own window (those positions stay
    /// `None`); every other error aborts the scan.
    pub fn analyze(&self, symbol: &str, history: &[Candle]) -> Result<SlopeSeries, TrendError> {
        if history.is_empty() {
            return Err(TrendError::NoData {
                symbol: symbol.to_string(),
            });
        }
        if self.lookback < PriceWindow::MIN_LEN {
            return Err(TrendError::InsufficientData {
                got: self.lookback,
                min: PriceWindow::MIN_LEN,
            });
        }

        let mut series = SlopeSeries::with_len(history.len());
        if history.len() < self.lookback {
            return Ok(series);
        }

        for i in (self.lookback - 1)..history.len() {
            let window = PriceWindow::new(&history[i + 1 - self.lookback..=i])?;
            match self.fitter.fit_high_low(&window) {
                Ok(pair) => {
                    series.support_slope[i] = Some(pair.support.slope);
                    series.resist_slope[i] = Some(pair.resistance.slope);
                }
                Err(TrendError::OptimizerStalled { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(series)
    }

    /// Fit the final window with both target-series variants and expand
    /// each line into `(timestamp, value)` points for overlay rendering.
    pub fn render_last(&self, symbol: &str, history: &[Candle]) -> Result<TrendChannels, TrendError> {
        if history.is_empty() {
            return Err(TrendError::NoData {
                symbol: symbol.to_string(),
            });
        }

        let start = history.len().saturating_sub(self.lookback);
        let window = PriceWindow::new(&history[start..])?;
        let hl = self.fitter.fit_high_low(&window)?;
        let close = self.fitter.fit_close_only(&window)?;

        Ok(TrendChannels {
            support_hl: project(&hl.support, &window),
            resist_hl: project(&hl.resistance, &window),
            support_close: project(&close.support, &window),
            resist_close: project(&close.resistance, &window),
        })
    }
}

fn project(line: &Line, window: &PriceWindow) -> Vec<ChartPoint> {
    window
        .candles()
        .iter()
        .enumerate()
        .map(|(i, c)| ChartPoint {
            time: c.time,
            value: line.value_at(i),
        })
        .collect()
}
