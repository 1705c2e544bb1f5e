/// Numeric contract of the constrained slope search.
///
/// The tolerances are hand-tuned and part of the reproducibility contract:
/// changing them changes which slopes the search can reach, so `Default`
/// preserves them exactly.
#[derive(Debug, Clone)]
pub struct FitConfig {
    /// One-sided containment slack. A support line may exceed a low (and a
    /// resistance line undercut a high) by at most this much.
    pub containment_tol: f64,
    /// Step size, in slope-unit multiples, below which the search stops.
    pub min_step: f64,
    /// Starting step size in slope-unit multiples.
    pub init_step: f64,
    /// Window length used by the rolling driver.
    pub lookback: usize,
}

impl FitConfig {
    pub fn new(lookback: usize) -> Self {
        Self {
            lookback,
            ..Self::default()
        }
    }
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            containment_tol: 1e-5,
            min_step: 1e-4,
            init_step: 1.0,
            lookback: 30,
        }
    }
}
