//! Whole-dataset conversion in both directions.

use std::sync::Arc;

use tracing::{debug, trace};

use super::attribute::AttributeSchemaBuilder;
use super::layout::{categorical_schema, ColumnLayout};
use super::record::RecordCodec;
use crate::config::CodecConfig;
use crate::dataset::{
    check_weight, ClassificationDataset, Dataset, DatasetKind, NumericStorage, PlainDataset, Record,
    RegressionDataset,
};
use crate::error::CodecError;
use crate::table::{Attribute, Instance, Table, TableHeader, TableSource};
use crate::utils::run_with_threads;

/// Sink kind chosen from the target column.
enum TargetKind {
    None,
    Numeric(usize),
    Nominal(usize),
}

/// Converts tables to canonical datasets and back.
///
/// Stateless apart from its configuration; one codec can serve any number
/// of concurrent conversions.
///
/// # Example
///
/// ```
/// use tabular_bridge::codec::DatasetCodec;
/// use tabular_bridge::dataset::DatasetKind;
/// use tabular_bridge::table::{Attribute, Instance, Table};
///
/// let mut table = Table::new(
///     "toy",
///     vec![Attribute::numeric("x"), Attribute::nominal("y", ["no", "yes"])],
///     Some(1),
/// )
/// .unwrap();
/// table.push(Instance::dense(vec![0.5, 1.0], 1.0)).unwrap();
///
/// let codec = DatasetCodec::default();
/// let dataset = codec.decode(&table).unwrap();
/// assert_eq!(dataset.kind(), DatasetKind::Classification);
///
/// let back = codec.encode(&dataset).unwrap();
/// assert_eq!(back.class_index(), Some(1));
/// ```
#[derive(Clone, Debug, Default)]
pub struct DatasetCodec {
    config: CodecConfig,
}

impl DatasetCodec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    // =========================================================================
    // Table -> Dataset
    // =========================================================================

    /// Decode a table into a canonical dataset.
    ///
    /// The dataset kind follows the source's target column: none gives a
    /// plain dataset, a numeric target a regression dataset and a nominal
    /// target a classification dataset. Text and date columns are dropped.
    /// Row order is preserved. A missing nominal class value decodes as
    /// label 0.
    ///
    /// # Errors
    ///
    /// - [`CodecError::UnsupportedTarget`] if the target column is neither
    ///   numeric nor nominal
    /// - [`CodecError::RowWidthMismatch`] if a row does not match the columns
    /// - [`CodecError::InvalidWeight`] if a row weight is negative or not finite
    /// - [`CodecError::CategoryOutOfRange`] / [`CodecError::LabelOutOfRange`]
    ///   for nominal values outside their column's labels
    pub fn decode<S: TableSource + ?Sized>(&self, source: &S) -> Result<Dataset, CodecError> {
        let attributes = source.attributes();
        let rows = source.rows();
        let target = source.target_index();
        let layout = ColumnLayout::classify(attributes, target)?;

        let target_kind = match target {
            None => TargetKind::None,
            Some(t) if attributes[t].is_numeric() => TargetKind::Numeric(t),
            Some(t) if attributes[t].is_nominal() => TargetKind::Nominal(t),
            Some(t) => {
                return Err(CodecError::UnsupportedTarget {
                    column: t,
                    name: attributes[t].name().to_string(),
                })
            }
        };

        if let Some(row) = rows.iter().find(|r| r.n_attributes() != layout.n_columns()) {
            return Err(CodecError::RowWidthMismatch {
                expected: layout.n_columns(),
                got: row.n_attributes(),
            });
        }

        for row in rows {
            check_weight(row.weight())?;
        }

        let storage = self.config.storage.resolve(rows.iter().any(Instance::is_sparse));
        let records = self.convert_rows(rows, &layout, storage)?;
        let schema = layout.schema().clone();

        let dataset = match target_kind {
            TargetKind::None => {
                let mut dataset = PlainDataset::with_capacity(schema, records.len());
                for record in records {
                    dataset.push(record)?;
                }
                Dataset::Plain(dataset)
            }
            TargetKind::Numeric(t) => {
                let mut dataset = RegressionDataset::with_capacity(schema, records.len());
                for (record, row) in records.into_iter().zip(rows) {
                    dataset.push(record, row.value(t))?;
                }
                Dataset::Regression(dataset)
            }
            TargetKind::Nominal(t) => {
                let target_schema = categorical_schema(&attributes[t])?;
                let mut dataset =
                    ClassificationDataset::with_capacity(schema, target_schema, records.len());
                let mut unlabeled = 0usize;
                for (record, row) in records.into_iter().zip(rows) {
                    let label = row.value(t);
                    if label.is_nan() {
                        unlabeled += 1;
                    }
                    dataset.push(record, label as i32)?;
                }
                if unlabeled > 0 {
                    debug!(unlabeled, "rows with a missing class value were labeled 0");
                }
                Dataset::Classification(dataset)
            }
        };

        debug!(
            kind = %dataset.kind(),
            rows = dataset.n_records(),
            numeric = layout.numeric_count(),
            categorical = layout.n_categorical(),
            dropped = layout.n_dropped(),
            sparse = matches!(storage, NumericStorage::Sparse),
            "decoded table"
        );
        Ok(dataset)
    }

    /// Decode a table that must have a nominal target.
    pub fn decode_classification<S: TableSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<ClassificationDataset, CodecError> {
        self.decode(source)?.into_classification()
    }

    /// Decode a table that must have a numeric target.
    pub fn decode_regression<S: TableSource + ?Sized>(
        &self,
        source: &S,
    ) -> Result<RegressionDataset, CodecError> {
        self.decode(source)?.into_regression()
    }

    fn convert_rows(
        &self,
        rows: &[Instance],
        layout: &ColumnLayout,
        storage: NumericStorage,
    ) -> Result<Vec<Record>, CodecError> {
        let chunk_rows = self.config.parallel_chunk_rows.max(1);
        if self.config.n_threads == 1 || rows.len() <= chunk_rows {
            return Ok(rows
                .iter()
                .map(|row| RecordCodec::to_record(row, layout, storage))
                .collect());
        }

        let chunks: Vec<&[Instance]> = rows.chunks(chunk_rows).collect();
        let converted = run_with_threads(self.config.n_threads, |parallelism| {
            parallelism.maybe_par_map(chunks, |chunk| {
                trace!(rows = chunk.len(), "converting chunk");
                chunk
                    .iter()
                    .map(|row| RecordCodec::to_record(row, layout, storage))
                    .collect::<Vec<_>>()
            })
        })?;
        Ok(converted.into_iter().flatten().collect())
    }

    // =========================================================================
    // Dataset -> Table
    // =========================================================================

    /// Column header for `dataset`: categorical columns, numeric columns,
    /// then the target column (if any) as class column.
    pub fn header_for(&self, dataset: &Dataset) -> Result<TableHeader, CodecError> {
        let attributes = AttributeSchemaBuilder::new(&self.config.naming).attributes_for(dataset);
        self.header(attributes, dataset.has_target())
    }

    fn header(&self, attributes: Vec<Attribute>, has_target: bool) -> Result<TableHeader, CodecError> {
        let class_index = has_target.then(|| attributes.len() - 1);
        TableHeader::new(self.config.naming.relation.clone(), attributes, class_index)
    }

    /// Encode a canonical dataset as a table.
    ///
    /// The target column, if any, is the last column and the class column.
    /// Weights are kept. Records with sparse numeric storage become sparse
    /// rows.
    pub fn encode(&self, dataset: &Dataset) -> Result<Table, CodecError> {
        match dataset {
            Dataset::Plain(d) => self.encode_plain(d),
            Dataset::Classification(d) => self.encode_classification(d),
            Dataset::Regression(d) => self.encode_regression(d),
        }
    }

    pub fn encode_plain(&self, dataset: &PlainDataset) -> Result<Table, CodecError> {
        let builder = AttributeSchemaBuilder::new(&self.config.naming);
        let schema = dataset.schema();
        let attributes = builder.columns(schema.categorical(), schema.numeric_count(), None);
        let header = self.header(attributes, false)?;
        self.encode_rows(DatasetKind::Plain, header, dataset.records(), |_| None)
    }

    pub fn encode_classification(
        &self,
        dataset: &ClassificationDataset,
    ) -> Result<Table, CodecError> {
        let builder = AttributeSchemaBuilder::new(&self.config.naming);
        let schema = dataset.schema();
        let target = builder.class_attribute(dataset.target_schema());
        let attributes = builder.columns(schema.categorical(), schema.numeric_count(), Some(target));
        let header = self.header(attributes, true)?;
        self.encode_rows(DatasetKind::Classification, header, dataset.records(), |i| {
            Some(f64::from(dataset.label(i)))
        })
    }

    pub fn encode_regression(&self, dataset: &RegressionDataset) -> Result<Table, CodecError> {
        let builder = AttributeSchemaBuilder::new(&self.config.naming);
        let schema = dataset.schema();
        let target = builder.regression_attribute();
        let attributes = builder.columns(schema.categorical(), schema.numeric_count(), Some(target));
        let header = self.header(attributes, true)?;
        self.encode_rows(DatasetKind::Regression, header, dataset.records(), |i| {
            Some(dataset.target(i))
        })
    }

    fn encode_rows(
        &self,
        kind: DatasetKind,
        header: TableHeader,
        records: &[Record],
        target: impl Fn(usize) -> Option<f64>,
    ) -> Result<Table, CodecError> {
        let width = header.n_attributes();
        let mut table = Table::with_header(header, records.len());

        for (i, record) in records.iter().enumerate() {
            let target = target(i);
            let row = if record.numeric().is_sparse() {
                let mut pairs = RecordCodec::from_record_sparse(record);
                if let Some(value) = target.filter(|&v| v != 0.0) {
                    pairs.push((width - 1, value));
                }
                Instance::sparse(width, pairs, record.weight())?
            } else {
                let mut values = RecordCodec::from_record(record, target.is_some());
                if let (Some(value), Some(slot)) = (target, values.last_mut()) {
                    *slot = value;
                }
                Instance::dense(values, record.weight())
            };
            table.push(row)?;
        }

        debug!(%kind, rows = table.n_rows(), columns = width, "encoded dataset");
        Ok(table)
    }

    /// Prediction row for `record`, attached to `header`, with the class
    /// column set to missing.
    pub fn record_to_instance(
        &self,
        record: &Record,
        header: &Arc<TableHeader>,
    ) -> Result<Instance, CodecError> {
        RecordCodec::to_instance(record, header)
    }
}
