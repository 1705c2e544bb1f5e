use crate::math::line_fit::Line;

/// Pick the anchor candles for the constrained searches: the index whose
/// low lies farthest below the fitted line (support pivot) and the index
/// whose high lies farthest above it (resistance pivot). Ties break to the
/// lowest index. For a close-only fit, pass the closes as both series.
pub fn select(line: &Line, highs: &[f64], lows: &[f64]) -> (usize, usize) {
    let mut support_pivot = 0;
    let mut support_res = lows[0] - line.value_at(0);
    let mut resist_pivot = 0;
    let mut resist_res = highs[0] - line.value_at(0);

    for i in 1..lows.len() {
        let fitted = line.value_at(i);
        let low_res = lows[i] - fitted;
        if low_res < support_res {
            support_res = low_res;
            support_pivot = i;
        }
        let high_res = highs[i] - fitted;
        if high_res > resist_res {
            resist_res = high_res;
            resist_pivot = i;
        }
    }

    (support_pivot, resist_pivot)
}
