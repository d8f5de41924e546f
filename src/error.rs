//! Error types for pairwise matrix construction.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PairwiseError {
    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Unknown policy '{0}': expected one of jaccard, pearson, spearman")]
    UnknownPolicy(String),

    #[error("Invalid policy type: {0}")]
    InvalidPolicyType(String),

    /// The inputs of a single comparison are outside the domain of the policy.
    #[error("Degenerate input to {policy}: {reason}")]
    DegenerateInput { policy: String, reason: String },

    #[error("Length mismatch in {policy}: {left} != {right}")]
    LengthMismatch {
        policy: String,
        left: usize,
        right: usize,
    },

    #[error("Non-numeric element at position {position} of item {item}")]
    NonNumeric { item: usize, position: usize },

    /// A policy failed while comparing item `row` with item `col`.
    #[error("Policy evaluation failed for pair ({row}, {col}): {source}")]
    Evaluation {
        row: usize,
        col: usize,
        #[source]
        source: Box<PairwiseError>,
    },

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl PairwiseError {
    pub(crate) fn degenerate(policy: &str, reason: impl Into<String>) -> Self {
        PairwiseError::DegenerateInput {
            policy: policy.to_string(),
            reason: reason.into(),
        }
    }

    /// Strips `Evaluation` wrappers and returns the error raised by the policy itself.
    pub fn root(&self) -> &PairwiseError {
        match self {
            PairwiseError::Evaluation { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, PairwiseError>;
