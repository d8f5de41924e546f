//! Binary comparison functions behind the named policies.

use std::collections::HashSet;
use std::hash::Hash;

use super::element::Element;
use crate::error::{PairwiseError, Result};
use crate::utils::{average_ranks, mean};

/// Jaccard index of two sets, `|A ∩ B| / |A ∪ B|`.
///
/// Fails when both sets are empty, since the union is then empty too.
pub fn jaccard_sets<K: Eq + Hash>(a: &HashSet<K>, b: &HashSet<K>) -> Result<f64> {
    // Iterate over the smaller set
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|k| large.contains(*k)).count();
    let union = a.len() + b.len() - intersection;

    if union == 0 {
        return Err(PairwiseError::degenerate("jaccard", "both sets are empty"));
    }

    Ok(intersection as f64 / union as f64)
}

/// Jaccard index of two items, duplicates within an item collapsing.
pub fn jaccard<E: Element>(a: &[E], b: &[E]) -> Result<f64> {
    jaccard_sets(&key_set(a), &key_set(b))
}

pub(crate) fn key_set<E: Element>(item: &[E]) -> HashSet<E::Key> {
    item.iter().map(E::key).collect()
}

/// Pearson product-moment correlation coefficient.
pub fn pearson(a: &[f64], b: &[f64]) -> Result<f64> {
    correlation("pearson", a, b)
}

/// Spearman rank correlation coefficient, ties ranked by their average.
pub fn spearman(a: &[f64], b: &[f64]) -> Result<f64> {
    check_sample("spearman", a, b)?;
    correlation("spearman", &average_ranks(a), &average_ranks(b))
}

fn check_sample(policy: &str, a: &[f64], b: &[f64]) -> Result<()> {
    if a.len() != b.len() {
        return Err(PairwiseError::LengthMismatch {
            policy: policy.to_string(),
            left: a.len(),
            right: b.len(),
        });
    }

    if a.len() < 2 {
        return Err(PairwiseError::degenerate(
            policy,
            format!("at least two observations required, got {}", a.len()),
        ));
    }

    if a.iter().chain(b).any(|x| !x.is_finite()) {
        return Err(PairwiseError::degenerate(policy, "non-finite value"));
    }

    Ok(())
}

fn correlation(policy: &str, a: &[f64], b: &[f64]) -> Result<f64> {
    check_sample(policy, a, b)?;

    // Correlation is scale invariant; bringing both sides into [-1, 1] keeps
    // the sums below from overflowing on large finite inputs
    let a = rescale(a);
    let b = rescale(b);

    let mean_a = mean(&a);
    let mean_b = mean(&b);

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;

    for (x, y) in a.iter().zip(&b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return Err(PairwiseError::degenerate(policy, "constant input has zero variance"));
    }

    let r = cov / (var_a.sqrt() * var_b.sqrt());
    if !r.is_finite() {
        return Err(PairwiseError::degenerate(policy, "coefficient is not finite"));
    }

    Ok(r.clamp(-1.0, 1.0))
}

fn rescale(xs: &[f64]) -> Vec<f64> {
    let max = xs.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    if max == 0.0 {
        return xs.to_vec();
    }
    xs.iter().map(|x| x / max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-10,
            "expected {}, got {}",
            expected,
            actual
        );
    }

    #[test]
    fn jaccard_partial_overlap() {
        // Intersection = {1, 3}, Union = {1, 2, 3, 4}
        assert_eq!(jaccard(&[1, 2, 3, 4], &[1, 3]).unwrap(), 0.5);
        assert_close(jaccard(&[1, 2, 3], &[1]).unwrap(), 1.0 / 3.0);
    }

    #[test]
    fn jaccard_collapses_duplicates() {
        assert_eq!(jaccard(&[1, 1, 1, 2], &[2, 2, 1]).unwrap(), 1.0);
    }

    #[test]
    fn jaccard_one_side_empty() {
        let empty: [i32; 0] = [];
        assert_eq!(jaccard(&empty, &[1, 2]).unwrap(), 0.0);
        assert_eq!(jaccard(&[1, 2], &empty).unwrap(), 0.0);
    }

    #[test]
    fn jaccard_both_empty_is_degenerate() {
        let empty: [&str; 0] = [];
        let err = jaccard(&empty, &empty).unwrap_err();
        assert!(matches!(err, PairwiseError::DegenerateInput { ref policy, .. } if policy == "jaccard"));
    }

    #[test]
    fn jaccard_on_strings() {
        assert_close(jaccard(&["a", "b"], &["b", "c"]).unwrap(), 1.0 / 3.0);
    }

    #[test]
    fn pearson_perfect_linear() {
        assert_close(pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]).unwrap(), 1.0);
        assert_close(pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap(), -1.0);
    }

    #[test]
    fn pearson_known_value() {
        // cov = 2, var_a = 2, var_b = 8 / 3
        let r = pearson(&[1.0, 2.0, 3.0], &[1.0, 3.0, 3.0]).unwrap();
        assert_close(r, 2.0 / (2.0_f64.sqrt() * (8.0_f64 / 3.0).sqrt()));
    }

    #[test]
    fn pearson_length_mismatch() {
        let err = pearson(&[1.0, 2.0, 3.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            PairwiseError::LengthMismatch { left: 3, right: 2, .. }
        ));
    }

    #[test]
    fn pearson_constant_is_degenerate() {
        let err = pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, PairwiseError::DegenerateInput { .. }));
    }

    #[test]
    fn pearson_needs_two_observations() {
        let err = pearson(&[1.0], &[2.0]).unwrap_err();
        assert!(matches!(err, PairwiseError::DegenerateInput { .. }));
    }

    #[test]
    fn pearson_rejects_nan() {
        let err = pearson(&[1.0, f64::NAN], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(err, PairwiseError::DegenerateInput { .. }));
    }

    #[test]
    fn pearson_large_finite_values() {
        let r = pearson(&[1e308, 1.7e308], &[1.0, 2.0]).unwrap();
        assert_close(r, 1.0);

        let r = pearson(&[1e308, -1.7e308, 1.5e308], &[3.0, 1.0, 2.0]).unwrap();
        assert!(r.is_finite() && (-1.0..=1.0).contains(&r));
    }

    #[test]
    fn pearson_is_scale_invariant() {
        let a = [0.5, 2.0, -1.0, 4.0];
        let b = [1.0, 3.0, 0.0, 2.0];
        let scaled = a.iter().map(|x| x * 1e300).collect::<Vec<_>>();
        assert_close(pearson(&a, &b).unwrap(), pearson(&scaled, &b).unwrap());
    }

    #[test]
    fn spearman_monotone_is_one() {
        // Monotone but non-linear
        assert_close(spearman(&[1.0, 2.0, 3.0, 4.0], &[1.0, 4.0, 9.0, 100.0]).unwrap(), 1.0);
        assert_close(spearman(&[1.0, 2.0, 3.0, 4.0], &[10.0, 5.0, 2.0, 1.0]).unwrap(), -1.0);
    }

    #[test]
    fn spearman_with_ties() {
        // ranks: a = [1, 2, 3, 4], b = [1, 2.5, 2.5, 4]
        let r = spearman(&[1.0, 2.0, 3.0, 4.0], &[5.0, 6.0, 6.0, 7.0]).unwrap();
        let expected = pearson(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.5, 2.5, 4.0]).unwrap();
        assert_close(r, expected);
    }

    #[test]
    fn spearman_reports_its_own_name() {
        let err = spearman(&[1.0, 2.0], &[1.0]).unwrap_err();
        assert!(matches!(err, PairwiseError::LengthMismatch { ref policy, .. } if policy == "spearman"));
    }
}
