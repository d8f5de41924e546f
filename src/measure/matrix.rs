use std::ops::Index;

use super::Measurable;
use crate::error::{PairwiseError, Result};
use crate::Float;

/// Dense square matrix of pairwise comparisons, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseMatrix<T: Float> {
    data: Vec<T>,
    n_elements: usize,
}

impl<T: Float> PairwiseMatrix<T> {
    /// Evaluates `f` on every ordered pair of `items`.
    ///
    /// All `n * n` pairs are visited, so `f` does not have to be symmetric.
    /// The first failing pair aborts the build and is reported with its position.
    pub fn from_items<I, F>(items: &[I], mut f: F) -> Result<Self>
    where
        F: FnMut(&I, &I) -> Result<T>,
    {
        let n_elements = items.len();
        let mut data = vec![T::zero(); n_elements.pow(2)];

        for (i, a) in items.iter().enumerate() {
            for (j, b) in items.iter().enumerate() {
                data[i * n_elements + j] =
                    f(a, b).map_err(|source| PairwiseError::Evaluation {
                        row: i,
                        col: j,
                        source: Box::new(source),
                    })?;
            }
        }

        Ok(Self { data, n_elements })
    }

    pub fn from_flat(data: &[T], n_elements: usize) -> Result<Self> {
        let expected = n_elements.pow(2);
        if data.len() != expected {
            return Err(PairwiseError::DimensionMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            data: data.to_owned(),
            n_elements,
        })
    }

    pub fn get(&self, i: usize, j: usize) -> Option<T> {
        if i < self.n_elements && j < self.n_elements {
            Some(self.data[i * self.n_elements + j])
        } else {
            None
        }
    }

    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.n_elements..(i + 1) * self.n_elements]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> + '_ {
        // chunks panics on a zero size, and an empty matrix has no rows anyway
        self.data.chunks(self.n_elements.max(1))
    }

    pub fn to_rows(&self) -> Vec<Vec<T>> {
        self.rows().map(<[T]>::to_vec).collect()
    }

    pub fn diagonal(&self) -> Vec<T> {
        (0..self.n_elements).map(|i| self[(i, i)]).collect()
    }

    pub fn transpose(&self) -> Self {
        let n = self.n_elements;
        let mut data = vec![T::zero(); self.data.len()];

        for i in 0..n {
            for j in 0..n {
                data[j * n + i] = self.data[i * n + j];
            }
        }

        Self { data, n_elements: n }
    }

    /// Checks `m[i][j] == m[j][i]` up to `tolerance`
    pub fn is_symmetric(&self, tolerance: T) -> bool {
        let n = self.n_elements;
        (0..n).all(|i| (i + 1..n).all(|j| (self[(i, j)] - self[(j, i)]).abs() <= tolerance))
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T: Float> Index<(usize, usize)> for PairwiseMatrix<T> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        assert!(i < self.n_elements && j < self.n_elements);
        &self.data[i * self.n_elements + j]
    }
}

impl<T: Float> Measurable<T> for PairwiseMatrix<T> {
    #[inline]
    fn measure(&self, i: usize, j: usize) -> T {
        self[(i, j)]
    }

    fn num_elements(&self) -> usize {
        self.n_elements
    }
}
