//! Stacked, cumulative and stepped series geometry.

/// `(base, top)` of every value when `series` are stacked in order.
///
/// Series shorter than the longest one contribute nothing past their end.
pub fn stack(series: &[Vec<f64>]) -> Vec<Vec<(f64, f64)>> {
    let len = series.iter().map(Vec::len).max().unwrap_or(0);
    let mut level = vec![0.0; len];
    series
        .iter()
        .map(|values| {
            values
                .iter()
                .zip(level.iter_mut())
                .map(|(&v, base)| {
                    let span = (*base, *base + v);
                    *base += v;
                    span
                })
                .collect()
        })
        .collect()
}

/// Running `(start, end)` of every step followed by the closing total `(0, sum)`.
pub fn waterfall(deltas: &[f64]) -> Vec<(f64, f64)> {
    let mut running = 0.0;
    let mut out: Vec<(f64, f64)> = deltas
        .iter()
        .map(|&d| {
            let span = (running, running + d);
            running += d;
            span
        })
        .collect();
    out.push((0.0, running));
    out
}

/// Staircase through `points`: each value holds until the next x.
pub fn steps(points: &[[f64; 2]]) -> Vec<[f64; 2]> {
    let mut out = Vec::with_capacity(points.len() * 2);
    for pair in points.windows(2) {
        out.push(pair[0]);
        out.push([pair[1][0], pair[0][1]]);
    }
    if let Some(&last) = points.last() {
        out.push(last);
    }
    out
}
