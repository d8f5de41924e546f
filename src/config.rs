//! Run configuration: which policy to apply and how to lay out the result.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PairwiseError, Result};
use crate::measure::{Policy, PolicyName};

/// Policy as written in a configuration file.
///
/// Only names can be expressed in configuration; anything else is kept so
/// that it can be reported back verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PolicySpec {
    Name(String),
    Other(serde_json::Value),
}

impl PolicySpec {
    pub fn resolve<'a, E>(&self) -> Result<Policy<'a, E>> {
        match self {
            PolicySpec::Name(name) => Policy::named(name),
            PolicySpec::Other(value) => Err(PairwiseError::InvalidPolicyType(format!(
                "expected a policy name, got {}",
                value
            ))),
        }
    }
}

impl Default for PolicySpec {
    fn default() -> Self {
        PolicySpec::Name(PolicyName::Jaccard.as_str().to_string())
    }
}

impl From<PolicyName> for PolicySpec {
    fn from(name: PolicyName) -> Self {
        PolicySpec::Name(name.as_str().to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Csv
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatrixConfig {
    #[serde(default)]
    pub policy: PolicySpec,

    #[serde(default)]
    pub format: OutputFormat,

    /// Decimal places for CSV cells. Full precision when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<usize>,

    /// One label per item, used as row and column headers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

impl MatrixConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(PairwiseError::from)
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(PairwiseError::from)
    }

    /// Loads a YAML (or JSON, which is valid YAML) configuration file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }
}
