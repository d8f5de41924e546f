use std::cmp::Ordering;

/// Returns the arithmetic mean, or NaN for an empty slice
pub fn mean(xs: &[f64]) -> f64 {
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Returns the 1-based rank of every element, ties sharing their average rank.
///
/// NaNs compare equal to everything, so callers should reject them first.
pub fn average_ranks(xs: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut order = (0..n).collect::<Vec<usize>>();
    order.sort_by(|&a, &b| xs[a].partial_cmp(&xs[b]).unwrap_or(Ordering::Equal));

    let mut ranks = vec![0.0; n];
    let mut start = 0;

    while start < n {
        let mut end = start + 1;
        while end < n && xs[order[end]] == xs[order[start]] {
            end += 1;
        }

        // Positions start..end hold ranks start+1..=end
        let rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }

        start = end;
    }

    ranks
}
