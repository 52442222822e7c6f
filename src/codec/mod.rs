//! Conversion between tables and canonical datasets.
//!
//! - [`ColumnLayout`] classifies table columns once per conversion
//! - [`RecordCodec`] converts single rows
//! - [`DatasetCodec`] converts whole datasets and picks the dataset kind
//! - [`AttributeSchemaBuilder`] synthesizes column descriptors for encoding

mod attribute;
mod dataset;
mod layout;
mod record;

pub use attribute::AttributeSchemaBuilder;
pub use dataset::DatasetCodec;
pub use layout::{ColumnLayout, ColumnRole};
pub use record::RecordCodec;
