//! tabular-bridge: lossless conversion between two tabular data models.
//!
//! - [`table`]: row-oriented tables of mixed attributes (numeric, nominal,
//!   text, date) with an optional class column
//! - [`dataset`]: canonical datasets of typed records (numeric vector,
//!   categorical indices, weight) in plain, classification and regression
//!   kinds
//!
//! # Key Types
//!
//! - [`DatasetCodec`] - Table ⇄ dataset conversion
//! - [`RecordCodec`] - Single-row conversion
//! - [`CodecConfig`] - Storage policy, column naming, threading
//! - [`adapter`] - Models of one side exposed as models of the other
//!
//! # Conversion
//!
//! Decoding picks the dataset kind from the table's class column: none
//! gives a plain dataset, a numeric class a regression dataset and a nominal
//! class a classification dataset. Text and date columns are dropped.
//! Encoding always places the target column last.

// Re-export approx traits for users who want to compare values
pub use approx;

pub mod adapter;
pub mod codec;
pub mod config;
pub mod dataset;
pub mod error;
pub mod table;
pub mod testing;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use codec::{AttributeSchemaBuilder, ColumnLayout, DatasetCodec, RecordCodec};
pub use config::{CodecConfig, ColumnNaming, ConfigError, StoragePolicy};
pub use dataset::{
    CategoricalSchema, ClassificationDataset, Dataset, DatasetKind, DatasetSchema, NumericVec,
    PlainDataset, Record, RegressionDataset,
};
pub use error::{CodecError, FitError, ModelError};
pub use table::{Attribute, AttributeKind, Instance, RowSet, Table, TableHeader, TableSource};
pub use utils::{run_with_threads, Parallelism};
