use serde::Serialize;

use crate::common::error::TrendError;

/// A straight line over window ordinals: `value(x) = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    pub fn value_at(&self, x: usize) -> f64 {
        self.slope * x as f64 + self.intercept
    }

    /// Line with the given slope passing exactly through `(pivot, y)`.
    pub fn through(pivot: usize, y: f64, slope: f64) -> Self {
        Self {
            slope,
            intercept: y - slope * pivot as f64,
        }
    }
}

/// Ordinary least-squares line through `(0, values[0]), (1, values[1]), ...`.
pub fn fit(values: &[f64]) -> Result<Line, TrendError> {
    let n = values.len();
    if n < 2 {
        return Err(TrendError::InsufficientData { got: n, min: 2 });
    }

    let x_mean = (n as f64 - 1.0) / 2.0;
    let y_mean = values.iter().sum::<f64>() / n as f64;

    let mut num = 0.0;
    let mut den = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dx = i as f64 - x_mean;
        num += dx * (y - y_mean);
        den += dx * dx;
    }

    let slope = num / den;
    Ok(Line {
        slope,
        intercept: y_mean - slope * x_mean,
    })
}

/// Signed residuals `line(i) - values[i]` for each index.
pub fn residuals(line: &Line, values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| line.value_at(i) - v)
        .collect()
}
