//! Canonical dataset containers.
//!
//! A dataset is one of three closed variants, selected by the presence and
//! type of a target:
//!
//! - [`PlainDataset`]: no target
//! - [`ClassificationDataset`]: categorical target, one label per record
//! - [`RegressionDataset`]: numeric target, one value per record
//!
//! All variants are append-only. Every append validates the record against
//! the dataset schema, so a dataset is always internally consistent.

use std::fmt;

use super::record::Record;
use super::schema::{CategoricalSchema, DatasetSchema};
use crate::error::CodecError;

/// Which variant a [`Dataset`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Plain,
    Classification,
    Regression,
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetKind::Plain => write!(f, "plain"),
            DatasetKind::Classification => write!(f, "classification"),
            DatasetKind::Regression => write!(f, "regression"),
        }
    }
}

fn check_record(schema: &DatasetSchema, record: &Record) -> Result<(), CodecError> {
    let expected = schema.n_categorical();
    if record.categorical().len() != expected {
        return Err(CodecError::CategoricalLenMismatch {
            expected,
            got: record.categorical().len(),
        });
    }
    if record.numeric_count() != schema.numeric_count() {
        return Err(CodecError::NumericLenMismatch {
            expected: schema.numeric_count(),
            got: record.numeric_count(),
        });
    }
    for (position, (&value, cat)) in record
        .categorical()
        .iter()
        .zip(schema.categorical())
        .enumerate()
    {
        if !cat.contains(value) {
            return Err(CodecError::CategoryOutOfRange {
                position,
                value,
                cardinality: cat.cardinality(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// PlainDataset
// =============================================================================

/// Dataset without a target.
#[derive(Clone, Debug, PartialEq)]
pub struct PlainDataset {
    schema: DatasetSchema,
    records: Vec<Record>,
}

impl PlainDataset {
    pub fn new(schema: DatasetSchema) -> Self {
        Self::with_capacity(schema, 0)
    }

    pub fn with_capacity(schema: DatasetSchema, capacity: usize) -> Self {
        Self {
            schema,
            records: Vec::with_capacity(capacity),
        }
    }

    /// Append a record.
    pub fn push(&mut self, record: Record) -> Result<(), CodecError> {
        check_record(&self.schema, &record)?;
        self.records.push(record);
        Ok(())
    }

    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// =============================================================================
// ClassificationDataset
// =============================================================================

/// Dataset with a categorical target.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassificationDataset {
    schema: DatasetSchema,
    target: CategoricalSchema,
    records: Vec<Record>,
    labels: Vec<i32>,
}

impl ClassificationDataset {
    pub fn new(schema: DatasetSchema, target: CategoricalSchema) -> Self {
        Self::with_capacity(schema, target, 0)
    }

    pub fn with_capacity(schema: DatasetSchema, target: CategoricalSchema, capacity: usize) -> Self {
        Self {
            schema,
            target,
            records: Vec::with_capacity(capacity),
            labels: Vec::with_capacity(capacity),
        }
    }

    /// Append a record with its class label.
    pub fn push(&mut self, record: Record, label: i32) -> Result<(), CodecError> {
        if !self.target.contains(label) {
            return Err(CodecError::LabelOutOfRange {
                label,
                cardinality: self.target.cardinality(),
            });
        }
        check_record(&self.schema, &record)?;
        self.records.push(record);
        self.labels.push(label);
        Ok(())
    }

    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    /// Schema of the class variable.
    pub fn target_schema(&self) -> &CategoricalSchema {
        &self.target
    }

    /// Number of classes.
    pub fn n_classes(&self) -> usize {
        self.target.cardinality()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Class label per record.
    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    pub fn label(&self, index: usize) -> i32 {
        self.labels[index]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// =============================================================================
// RegressionDataset
// =============================================================================

/// Dataset with a numeric target.
#[derive(Clone, Debug, PartialEq)]
pub struct RegressionDataset {
    schema: DatasetSchema,
    records: Vec<Record>,
    targets: Vec<f64>,
}

impl RegressionDataset {
    pub fn new(schema: DatasetSchema) -> Self {
        Self::with_capacity(schema, 0)
    }

    pub fn with_capacity(schema: DatasetSchema, capacity: usize) -> Self {
        Self {
            schema,
            records: Vec::with_capacity(capacity),
            targets: Vec::with_capacity(capacity),
        }
    }

    /// Append a record with its target value.
    pub fn push(&mut self, record: Record, target: f64) -> Result<(), CodecError> {
        check_record(&self.schema, &record)?;
        self.records.push(record);
        self.targets.push(target);
        Ok(())
    }

    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Target value per record.
    pub fn targets(&self) -> &[f64] {
        &self.targets
    }

    pub fn target(&self, index: usize) -> f64 {
        self.targets[index]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// A canonical dataset of any kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Dataset {
    Plain(PlainDataset),
    Classification(ClassificationDataset),
    Regression(RegressionDataset),
}

impl Dataset {
    pub fn kind(&self) -> DatasetKind {
        match self {
            Dataset::Plain(_) => DatasetKind::Plain,
            Dataset::Classification(_) => DatasetKind::Classification,
            Dataset::Regression(_) => DatasetKind::Regression,
        }
    }

    pub fn schema(&self) -> &DatasetSchema {
        match self {
            Dataset::Plain(d) => d.schema(),
            Dataset::Classification(d) => d.schema(),
            Dataset::Regression(d) => d.schema(),
        }
    }

    pub fn records(&self) -> &[Record] {
        match self {
            Dataset::Plain(d) => d.records(),
            Dataset::Classification(d) => d.records(),
            Dataset::Regression(d) => d.records(),
        }
    }

    pub fn record(&self, index: usize) -> &Record {
        &self.records()[index]
    }

    pub fn n_records(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    pub fn numeric_count(&self) -> usize {
        self.schema().numeric_count()
    }

    pub fn categorical_schemas(&self) -> &[CategoricalSchema] {
        self.schema().categorical()
    }

    /// Class variable schema for classification datasets.
    pub fn target_schema(&self) -> Option<&CategoricalSchema> {
        match self {
            Dataset::Classification(d) => Some(d.target_schema()),
            Dataset::Plain(_) | Dataset::Regression(_) => None,
        }
    }

    pub fn has_target(&self) -> bool {
        !matches!(self, Dataset::Plain(_))
    }

    fn mismatch(&self, expected: DatasetKind) -> CodecError {
        CodecError::KindMismatch {
            expected,
            actual: self.kind(),
        }
    }

    pub fn into_plain(self) -> Result<PlainDataset, CodecError> {
        match self {
            Dataset::Plain(d) => Ok(d),
            other => Err(other.mismatch(DatasetKind::Plain)),
        }
    }

    pub fn into_classification(self) -> Result<ClassificationDataset, CodecError> {
        match self {
            Dataset::Classification(d) => Ok(d),
            other => Err(other.mismatch(DatasetKind::Classification)),
        }
    }

    pub fn into_regression(self) -> Result<RegressionDataset, CodecError> {
        match self {
            Dataset::Regression(d) => Ok(d),
            other => Err(other.mismatch(DatasetKind::Regression)),
        }
    }
}

impl From<PlainDataset> for Dataset {
    fn from(d: PlainDataset) -> Self {
        Dataset::Plain(d)
    }
}

impl From<ClassificationDataset> for Dataset {
    fn from(d: ClassificationDataset) -> Self {
        Dataset::Classification(d)
    }
}

impl From<RegressionDataset> for Dataset {
    fn from(d: RegressionDataset) -> Self {
        Dataset::Regression(d)
    }
}
