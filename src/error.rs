//! Error types for conversions and wrapped-model fitting.

use crate::adapter::Capability;
use crate::dataset::DatasetKind;

/// Boxed error raised by an external model implementation.
pub type ModelError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Schema and shape errors raised while building or converting datasets.
///
/// Structural errors abort the whole conversion; no partial dataset is
/// returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    #[error("target attribute '{name}' (column {column}) is neither numeric nor nominal")]
    UnsupportedTarget { column: usize, name: String },

    #[error("expected a {expected} dataset, got a {actual} dataset")]
    KindMismatch {
        expected: DatasetKind,
        actual: DatasetKind,
    },

    #[error("target column {index} is out of range for {n_columns} columns")]
    TargetOutOfRange { index: usize, n_columns: usize },

    #[error("categorical variable '{name}' must have at least one value")]
    InvalidCardinality { name: String },

    #[error("{got} option names given for a categorical variable of cardinality {cardinality}")]
    OptionNameCount { cardinality: usize, got: usize },

    #[error("categorical value {value} at position {position} is outside 0..{cardinality}")]
    CategoryOutOfRange {
        position: usize,
        value: i32,
        cardinality: usize,
    },

    #[error("class label {label} is outside 0..{cardinality}")]
    LabelOutOfRange { label: i32, cardinality: usize },

    #[error("record has {got} categorical values, schema declares {expected}")]
    CategoricalLenMismatch { expected: usize, got: usize },

    #[error("record has {got} numeric values, schema declares {expected}")]
    NumericLenMismatch { expected: usize, got: usize },

    #[error("instance weight must be finite and non-negative, got {0}")]
    InvalidWeight(f64),

    #[error("sparse index {index} is out of range for dimension {dim}")]
    SparseIndexOutOfRange { index: usize, dim: usize },

    #[error("sparse indices must be strictly increasing (index {index} follows {previous})")]
    UnsortedSparseIndices { previous: usize, index: usize },

    #[error("row has {got} values, table declares {expected} attributes")]
    RowWidthMismatch { expected: usize, got: usize },

    #[error("duplicate attribute name: {0}")]
    DuplicateAttribute(String),

    #[error("attribute index {index} is out of range for {n_attributes} attributes")]
    AttributeOutOfRange { index: usize, n_attributes: usize },

    #[error("failed to build thread pool: {0}")]
    ThreadPool(String),
}

/// Failure while fitting a wrapped model.
///
/// Every error raised while preparing data for, or running, an external
/// model surfaces through this single type.
#[derive(Debug, thiserror::Error)]
pub enum FitError {
    #[error("model does not support {0} tasks")]
    Unsupported(DatasetKind),

    #[error("model cannot handle {0}")]
    MissingCapability(Capability),

    #[error("model needs at least {required} training instances, got {got}")]
    TooFewInstances { required: usize, got: usize },

    #[error("failed to convert training data: {0}")]
    Conversion(#[from] CodecError),

    #[error("model failed to fit: {0}")]
    Model(#[source] ModelError),
}

impl FitError {
    /// Wrap an error raised by the external model.
    pub fn model(err: impl Into<ModelError>) -> Self {
        FitError::Model(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn unsupported_target_message_names_column() {
        let err = CodecError::UnsupportedTarget {
            column: 3,
            name: "comment".into(),
        };
        assert_eq!(
            err.to_string(),
            "target attribute 'comment' (column 3) is neither numeric nor nominal"
        );
    }

    #[test]
    fn fit_error_keeps_model_source() {
        let err = FitError::model("singular matrix");
        assert!(err.to_string().contains("singular matrix"));
        assert!(err.source().is_some());
    }

    #[test]
    fn fit_error_from_codec_error() {
        let err: FitError = CodecError::KindMismatch {
            expected: DatasetKind::Classification,
            actual: DatasetKind::Regression,
        }
        .into();
        assert!(matches!(err, FitError::Conversion(_)));
        assert_eq!(
            err.to_string(),
            "failed to convert training data: expected a classification dataset, got a regression dataset"
        );
    }
}
