use crate::Float;

pub mod element;
pub mod matrix;
pub mod policy;
pub mod stats;

pub use self::element::{Atom, Element};
pub use self::matrix::PairwiseMatrix;
pub use self::policy::{build_pairwise_matrix, Policy, PolicyName};

pub trait Measurable<T: Float> {
    /// Measure the relation between two elements in the collection
    ///
    /// Note that the measure does not have to be symmetric. i.e `measure(i, j) != measure(j, i)` is possible
    fn measure(&self, i: usize, j: usize) -> T;

    /// Return the number of elements in the collection
    fn num_elements(&self) -> usize;
}
