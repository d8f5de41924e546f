use std::fmt::Debug;

pub trait Float : num_traits::Float + Debug {}

impl Float for f64 {}
impl Float for f32 {}

pub mod config;
pub mod error;
pub mod io;
pub mod measure;
pub mod utils;

pub use crate::config::{MatrixConfig, OutputFormat, PolicySpec};
pub use crate::error::{PairwiseError, Result};
pub use crate::measure::{
    build_pairwise_matrix, Atom, Element, Measurable, PairwiseMatrix, Policy, PolicyName,
};
