//! Model seams on both sides of the bridge.

use super::capabilities::{Capabilities, Capability};
use super::results::CategoricalResults;
use crate::dataset::{ClassificationDataset, Dataset, Record, RegressionDataset};
use crate::error::{FitError, ModelError};
use crate::table::{Instance, Table};

// =============================================================================
// Canonical side
// =============================================================================

/// A classifier trained on canonical datasets.
pub trait Classifier {
    fn train(&mut self, data: &ClassificationDataset) -> Result<(), FitError>;

    /// Per-class scores for one record.
    fn classify(&self, record: &Record) -> CategoricalResults;

    /// Whether record weights affect training.
    fn supports_weighted_data(&self) -> bool {
        false
    }
}

/// A regressor trained on canonical datasets.
pub trait Regressor {
    fn train(&mut self, data: &RegressionDataset) -> Result<(), FitError>;

    fn regress(&self, record: &Record) -> f64;

    fn supports_weighted_data(&self) -> bool {
        false
    }
}

/// A clusterer over canonical datasets.
pub trait Clusterer {
    /// Cluster index of every record, in record order.
    fn cluster(&mut self, data: &Dataset) -> Result<Vec<usize>, FitError>;
}

// =============================================================================
// Table side
// =============================================================================

/// A classifier or regressor trained on tables.
///
/// Prediction rows are attached to a header-only copy of the training
/// table, so the class column can be resolved through the row.
pub trait TableModel {
    fn build(&mut self, table: &Table) -> Result<(), ModelError>;

    /// Class distribution for a nominal class, or a single predicted value
    /// for a numeric class.
    fn distribution_for_instance(&self, row: &Instance) -> Result<Vec<f64>, ModelError>;

    /// Predicted class index (as `f64`) or predicted value.
    ///
    /// The default derives the prediction from
    /// [`distribution_for_instance`](Self::distribution_for_instance): the
    /// single value for a numeric class, otherwise the best-scoring class,
    /// or `NaN` when every class scores zero.
    fn classify_instance(&self, row: &Instance) -> Result<f64, ModelError> {
        let dist = self.distribution_for_instance(row)?;
        let numeric_class = row
            .context()
            .and_then(|h| h.class_attribute())
            .is_some_and(|a| a.is_numeric());
        if numeric_class {
            return Ok(dist.first().copied().unwrap_or(f64::NAN));
        }
        let scores = CategoricalResults::from_probs(dist);
        Ok(match scores.most_likely() {
            Some(i) if scores.prob(i) > 0.0 => i as f64,
            _ => f64::NAN,
        })
    }

    fn capabilities(&self) -> Capabilities;

    /// Whether row weights affect training.
    fn handles_weights(&self) -> bool {
        false
    }

    fn supports(&self, capability: Capability) -> bool {
        self.capabilities().supports(capability)
    }
}

/// A clusterer trained on tables without a class column.
pub trait TableClusterer {
    fn build(&mut self, table: &Table) -> Result<(), ModelError>;

    fn cluster_instance(&self, row: &Instance) -> Result<usize, ModelError>;
}
