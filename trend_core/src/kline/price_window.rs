use crate::common::error::TrendError;

use super::candle::Candle;

/// Read-only view over one fixed-length stretch of a candle history.
/// Owns no state beyond the borrowed slice; windows produced by a rolling
/// driver may overlap freely.
#[derive(Debug, Clone, Copy)]
pub struct PriceWindow<'a> {
    candles: &'a [Candle],
}

impl<'a> PriceWindow<'a> {
    /// Shortest window the fitter can anchor a pivot in and still have
    /// residuals on both sides of it.
    pub const MIN_LEN: usize = 3;

    pub fn new(candles: &'a [Candle]) -> Result<Self, TrendError> {
        if candles.len() < Self::MIN_LEN {
            return Err(TrendError::InsufficientData {
                got: candles.len(),
                min: Self::MIN_LEN,
            });
        }
        Ok(Self { candles })
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        self.candles
    }

    pub fn highs(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.high).collect()
    }

    pub fn lows(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.low).collect()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn candles(n: usize) -> Vec<Candle> {
        (0..n)
            .map(|i| {
                let time = NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .and_hms_opt(i as u32, 0, 0)
                    .unwrap();
                let px = 10.0 + i as f64;
                Candle::new(time, px, px + 0.5, px - 0.5, px).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_window_too_short() {
        let cs = candles(2);
        let err = PriceWindow::new(&cs).unwrap_err();
        assert_eq!(err, TrendError::InsufficientData { got: 2, min: 3 });
    }

    #[test]
    fn test_window_series_extraction() {
        let cs = candles(4);
        let w = PriceWindow::new(&cs).unwrap();
        assert_eq!(w.len(), 4);
        assert_eq!(w.closes(), vec![10.0, 11.0, 12.0, 13.0]);
        assert_eq!(w.highs(), vec![10.5, 11.5, 12.5, 13.5]);
        assert_eq!(w.lows(), vec![9.5, 10.5, 11.5, 12.5]);
    }
}
