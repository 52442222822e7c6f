//! Typed canonical datasets.
//!
//! # Key Types
//!
//! - [`CategoricalSchema`]: Cardinality and labels of one nominal variable
//! - [`NumericVec`]: Dense (`ndarray`) or sparse numeric storage
//! - [`Record`]: One row (numeric + categorical + weight)
//! - [`Dataset`]: Plain, classification or regression dataset
//!
//! # Example
//!
//! ```
//! use tabular_bridge::dataset::{
//!     CategoricalSchema, ClassificationDataset, DatasetSchema, NumericVec, Record,
//! };
//!
//! let schema = DatasetSchema::new(vec![CategoricalSchema::new(3).unwrap()], 2);
//! let target = CategoricalSchema::with_labels(["no", "yes"]).unwrap();
//! let mut ds = ClassificationDataset::new(schema.clone(), target);
//!
//! let record = Record::new(
//!     NumericVec::dense(vec![0.5, 1.5]),
//!     vec![2],
//!     schema.categorical_shared().clone(),
//!     1.0,
//! )
//! .unwrap();
//! ds.push(record, 1).unwrap();
//!
//! assert_eq!(ds.len(), 1);
//! assert_eq!(ds.n_classes(), 2);
//! ```

#[allow(clippy::module_inception)]
mod dataset;
mod record;
mod schema;
mod vector;

pub use dataset::{ClassificationDataset, Dataset, DatasetKind, PlainDataset, RegressionDataset};
pub(crate) use record::check_weight;
pub use record::Record;
pub use schema::{CategoricalSchema, DatasetSchema, DEFAULT_CATEGORY_NAME};
pub use vector::{NumericStorage, NumericVec, SparseVec};
