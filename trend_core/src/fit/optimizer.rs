use crate::common::enums::LineSide;
use crate::common::error::TrendError;
use crate::config::fit_config::FitConfig;
use crate::math::line_fit::Line;

/// Outcome of probing the error surface one minimal step away from the
/// current slope.
enum Probe {
    /// Signed direction, in slope units, along which the error decreases
    /// (or at worst stays level) while remaining feasible.
    Descend(f64),
    /// Both minimal perturbations leave the feasible region.
    Stalled,
}

/// Sum of squared residuals of the line through `(pivot, y[pivot])` with
/// the given slope, or `None` when the line breaks containment: a support
/// line rising above some target value, or a resistance line dipping below
/// one, by more than `tol`.
fn check_slope(side: LineSide, pivot: usize, slope: f64, y: &[f64], tol: f64) -> Option<f64> {
    let line = Line::through(pivot, y[pivot], slope);
    let mut err = 0.0;
    let mut worst = match side {
        LineSide::Support => f64::NEG_INFINITY,
        LineSide::Resistance => f64::INFINITY,
    };

    for (i, &v) in y.iter().enumerate() {
        let diff = line.value_at(i) - v;
        err += diff * diff;
        worst = match side {
            LineSide::Support => worst.max(diff),
            LineSide::Resistance => worst.min(diff),
        };
    }

    let feasible = match side {
        LineSide::Support => worst <= tol,
        LineSide::Resistance => worst >= -tol,
    };
    feasible.then_some(err)
}

/// Numerical-derivative estimate at `best_slope`: try the positive minimal
/// perturbation first, fall back to the negative one with the sign
/// convention flipped.
fn probe_direction(
    side: LineSide,
    pivot: usize,
    best_slope: f64,
    best_err: f64,
    y: &[f64],
    delta: f64,
    tol: f64,
) -> Probe {
    if let Some(err) = check_slope(side, pivot, best_slope + delta, y, tol) {
        let dir = if err > best_err { -1.0 } else { 1.0 };
        return Probe::Descend(dir);
    }
    if let Some(err) = check_slope(side, pivot, best_slope - delta, y, tol) {
        let dir = if err < best_err { -1.0 } else { 1.0 };
        return Probe::Descend(dir);
    }
    Probe::Stalled
}

/// Derivative-free local search for the slope of the line anchored at
/// `(pivot, y[pivot])` that minimizes the sum of squared residuals against
/// `y` while keeping one-sided containment.
///
/// 1-D coordinate descent with geometric step shrinkage: infeasible or
/// non-improving candidates halve the step, strict improvements reset the
/// descent direction. `best_err` is monotone non-increasing, and the loop
/// runs O(log(init_step / min_step)) step scales, so termination does not
/// depend on the data. Fully deterministic.
pub fn optimize(
    side: LineSide,
    pivot: usize,
    initial_slope: f64,
    y: &[f64],
    cfg: &FitConfig,
) -> Result<Line, TrendError> {
    let n = y.len();
    let (lo, hi) = y
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    // Characteristic scale of one unit of slope change across the window.
    let slope_unit = (hi - lo) / n as f64;

    let mut best_slope = initial_slope;
    let mut best_err = check_slope(side, pivot, best_slope, y, cfg.containment_tol)
        .ok_or(TrendError::PivotViolation { side, pivot })?;

    // Flat window: every candidate collapses onto the starting line.
    if slope_unit == 0.0 {
        return Ok(Line::through(pivot, y[pivot], best_slope));
    }

    let delta = slope_unit * cfg.min_step;
    let mut step = cfg.init_step;
    let mut direction: Option<f64> = None;

    while step > cfg.min_step {
        let dir = match direction {
            Some(d) => d,
            None => {
                match probe_direction(side, pivot, best_slope, best_err, y, delta, cfg.containment_tol)
                {
                    Probe::Descend(d) => {
                        direction = Some(d);
                        d
                    }
                    Probe::Stalled => return Err(TrendError::OptimizerStalled { side, pivot }),
                }
            }
        };

        let candidate = best_slope + dir * slope_unit * step;
        match check_slope(side, pivot, candidate, y, cfg.containment_tol) {
            Some(err) if err < best_err => {
                best_slope = candidate;
                best_err = err;
                // Re-estimate the derivative at the new point.
                direction = None;
            }
            // Infeasible or non-improving: same direction at finer scale.
            _ => step /= 2.0,
        }
    }

    Ok(Line::through(pivot, y[pivot], best_slope))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> FitConfig {
        FitConfig::default()
    }

    fn sse(line: &Line, y: &[f64]) -> f64 {
        y.iter()
            .enumerate()
            .map(|(i, &v)| (line.value_at(i) - v).powi(2))
            .sum()
    }

    #[test]
    fn test_already_optimal_slope_is_kept() {
        // Support line under a perfect ramp: zero error, nowhere to go.
        let y = [1.0, 2.0, 3.0, 4.0, 5.0];
        let line = optimize(LineSide::Support, 0, 1.0, &y, &cfg()).unwrap();
        assert!((line.slope - 1.0).abs() < 1e-12);
        assert!((line.value_at(0) - 1.0).abs() < 1e-12);
        assert!(sse(&line, &y) < 1e-18);
    }

    #[test]
    fn test_resistance_ramp_is_kept() {
        let y = [1.0, 2.0, 3.0, 4.0, 5.0];
        let line = optimize(LineSide::Resistance, 0, 1.0, &y, &cfg()).unwrap();
        assert!((line.slope - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_descends_to_constrained_optimum() {
        // Anchored at the outlier low, the least-squares slope through
        // (2, 3) against these lows is 0.3, reachable without breaking
        // containment.
        let y = [10.0, 9.0, 3.0, 10.0, 11.0];
        let start_err = sse(&Line::through(2, 3.0, 0.0), &y);
        let line = optimize(LineSide::Support, 2, 0.0, &y, &cfg()).unwrap();
        assert!((line.slope - 0.3).abs() < 1e-3);
        assert!((line.value_at(2) - 3.0).abs() < 1e-9);
        assert!(sse(&line, &y) < start_err);
    }

    #[test]
    fn test_containment_holds_at_result() {
        let y = [10.0, 9.0, 3.0, 10.0, 11.0];
        let line = optimize(LineSide::Support, 2, 0.0, &y, &cfg()).unwrap();
        for (i, &v) in y.iter().enumerate() {
            assert!(line.value_at(i) - v <= 1e-5);
        }
    }

    #[test]
    fn test_flat_window_terminates_immediately() {
        let y = [10.0, 10.0, 10.0, 10.0];
        let line = optimize(LineSide::Support, 0, 0.0, &y, &cfg()).unwrap();
        assert_eq!(line.slope, 0.0);
        assert_eq!(line.intercept, 10.0);
    }

    #[test]
    fn test_stalled_when_pinched_on_both_sides() {
        // The starting line already touches the lows on both sides of the
        // pivot; any minimal tilt lifts one end above a low.
        let y = [5.0, 4.0, 3.0];
        let err = optimize(LineSide::Support, 1, -1.0, &y, &cfg()).unwrap_err();
        assert!(matches!(err, TrendError::OptimizerStalled { pivot: 1, .. }));
    }

    #[test]
    fn test_infeasible_start_is_a_pivot_violation() {
        // A support line anchored at the window's high sits above the lows.
        let y = [5.0, 10.0, 5.0];
        let err = optimize(LineSide::Support, 1, 0.0, &y, &cfg()).unwrap_err();
        assert_eq!(
            err,
            TrendError::PivotViolation {
                side: LineSide::Support,
                pivot: 1
            }
        );
    }

    #[test]
    fn test_deterministic() {
        let y = [10.0, 9.0, 3.0, 10.0, 11.0];
        let a = optimize(LineSide::Support, 2, 0.0, &y, &cfg()).unwrap();
        let b = optimize(LineSide::Support, 2, 0.0, &y, &cfg()).unwrap();
        assert_eq!(a.slope.to_bits(), b.slope.to_bits());
        assert_eq!(a.intercept.to_bits(), b.intercept.to_bits());
    }
}
