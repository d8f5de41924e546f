use std::fmt;
use std::str::FromStr;

use log::debug;
use serde::{Deserialize, Serialize};

use super::element::Element;
use super::matrix::PairwiseMatrix;
use super::stats::{self, key_set};
use crate::error::{PairwiseError, Result};

/// Built-in comparison policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyName {
    /// Intersection over union of the items taken as sets.
    Jaccard,
    /// Linear correlation of the items taken as numeric vectors.
    Pearson,
    /// Rank correlation of the items taken as numeric vectors.
    Spearman,
}

impl PolicyName {
    pub const ALL: [PolicyName; 3] = [PolicyName::Jaccard, PolicyName::Pearson, PolicyName::Spearman];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyName::Jaccard => "jaccard",
            PolicyName::Pearson => "pearson",
            PolicyName::Spearman => "spearman",
        }
    }
}

impl fmt::Display for PolicyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyName {
    type Err = PairwiseError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_ascii_lowercase();
        PolicyName::ALL
            .iter()
            .copied()
            .find(|policy| policy.as_str() == name)
            .ok_or_else(|| PairwiseError::UnknownPolicy(s.to_string()))
    }
}

type CompareFn<'a, E> = dyn Fn(&[E], &[E]) -> Result<f64> + 'a;

/// How two items are compared: a built-in policy or a caller-supplied function.
pub enum Policy<'a, E> {
    Named(PolicyName),
    Custom(Box<CompareFn<'a, E>>),
}

impl<'a, E> Policy<'a, E> {
    /// Looks up a built-in policy by name.
    pub fn named(name: &str) -> Result<Self> {
        name.parse().map(Policy::Named)
    }

    /// Wraps an infallible comparison function.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&[E], &[E]) -> f64 + 'a,
    {
        Policy::Custom(Box::new(move |a: &[E], b: &[E]| Ok(f(a, b))))
    }

    /// Wraps a comparison function that can reject its inputs.
    pub fn try_custom<F>(f: F) -> Self
    where
        F: Fn(&[E], &[E]) -> Result<f64> + 'a,
    {
        Policy::Custom(Box::new(f))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Policy::Named(name) => name.as_str(),
            Policy::Custom(_) => "custom",
        }
    }
}

impl<'a, E> From<PolicyName> for Policy<'a, E> {
    fn from(name: PolicyName) -> Self {
        Policy::Named(name)
    }
}

impl<'a, E> fmt::Debug for Policy<'a, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Policy::Named(name) => f.debug_tuple("Named").field(name).finish(),
            Policy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Builds the `n x n` matrix of `policy(items[i], items[j])` over all ordered pairs.
///
/// Each item is converted once up front (to a set for `jaccard`, to a
/// numeric vector for the correlations) and the converted values are
/// compared pairwise. Any failing comparison fails the whole call.
pub fn build_pairwise_matrix<E, I>(items: &[I], policy: &Policy<'_, E>) -> Result<PairwiseMatrix<f64>>
where
    E: Element,
    I: AsRef<[E]>,
{
    if items.is_empty() {
        return Err(PairwiseError::EmptyInput(
            "at least one item is required to build a pairwise matrix".to_string(),
        ));
    }

    debug!("Building {0}x{0} matrix with policy {1}", items.len(), policy.name());

    superluminal_perf::begin_event("pairwise");
    let result = match policy {
        Policy::Named(PolicyName::Jaccard) => {
            let sets = items.iter().map(|item| key_set(item.as_ref())).collect::<Vec<_>>();
            PairwiseMatrix::from_items(&sets, |a, b| stats::jaccard_sets(a, b))
        }
        Policy::Named(PolicyName::Pearson) => numeric_vectors(items)
            .and_then(|vectors| PairwiseMatrix::from_items(&vectors, |a, b| stats::pearson(a, b))),
        Policy::Named(PolicyName::Spearman) => numeric_vectors(items)
            .and_then(|vectors| PairwiseMatrix::from_items(&vectors, |a, b| stats::spearman(a, b))),
        Policy::Custom(f) => PairwiseMatrix::from_items(items, |a, b| f(a.as_ref(), b.as_ref())),
    };
    superluminal_perf::end_event();

    if let Err(err) = &result {
        debug!("Pairwise build failed: {}", err);
    }

    result
}

fn numeric_vectors<E, I>(items: &[I]) -> Result<Vec<Vec<f64>>>
where
    E: Element,
    I: AsRef<[E]>,
{
    items
        .iter()
        .enumerate()
        .map(|(item, values)| {
            values
                .as_ref()
                .iter()
                .enumerate()
                .map(|(position, value)| {
                    value
                        .to_real()
                        .ok_or(PairwiseError::NonNumeric { item, position })
                })
                .collect()
        })
        .collect()
}
