//! Single-row conversion between table rows and canonical records.

use std::sync::Arc;

use super::layout::{ColumnLayout, ColumnRole};
use crate::dataset::{check_weight, NumericStorage, NumericVec, Record, SparseVec};
use crate::error::CodecError;
use crate::table::{Attribute, Instance, TableHeader};

/// Converts one row at a time. Holds no state.
///
/// Table-side row layout produced by [`from_record`](Self::from_record):
/// categorical values (as their index) first, then numeric values, then an
/// optional target slot that the caller fills.
#[derive(Clone, Copy, Debug, Default)]
pub struct RecordCodec;

impl RecordCodec {
    /// Convert a table row into a record.
    ///
    /// Columns are visited in declared order; the target column and
    /// unsupported columns are skipped. Nominal values are truncated to
    /// their integer index. Sparse storage visits only the row's stored
    /// entries, so zero-valued numeric slots are never materialized.
    ///
    /// The row must have `layout.n_columns()` attributes.
    pub fn to_record(row: &Instance, layout: &ColumnLayout, storage: NumericStorage) -> Record {
        debug_assert_eq!(row.n_attributes(), layout.n_columns());
        let roles = layout.roles();
        let schemas = Arc::clone(layout.schema().categorical_shared());
        let mut categorical = vec![0i32; schemas.len()];

        let numeric = match storage {
            NumericStorage::Dense => {
                let mut values = vec![0.0; layout.numeric_count()];
                for (col, value) in row.stored() {
                    match roles.get(col) {
                        Some(ColumnRole::Numeric(slot)) => values[*slot] = value,
                        Some(ColumnRole::Categorical(slot)) => categorical[*slot] = value as i32,
                        _ => {}
                    }
                }
                NumericVec::dense(values)
            }
            NumericStorage::Sparse => {
                let mut values = SparseVec::new(layout.numeric_count());
                // Numeric slots grow with the column index, so stored
                // entries arrive in slot order.
                for (col, value) in row.stored() {
                    match roles.get(col) {
                        Some(ColumnRole::Numeric(slot)) => values.push_unchecked(*slot, value),
                        Some(ColumnRole::Categorical(slot)) => categorical[*slot] = value as i32,
                        _ => {}
                    }
                }
                NumericVec::Sparse(values)
            }
        };

        Record::from_parts(numeric, categorical, schemas, row.weight())
    }

    /// Convert a stand-alone row given its column descriptors.
    ///
    /// The row's class column, if its table context resolves one, is
    /// excluded. Storage follows the row: sparse rows give sparse records.
    ///
    /// # Errors
    ///
    /// - [`CodecError::RowWidthMismatch`] if the row does not match `attributes`
    /// - [`CodecError::InvalidWeight`] if the row weight is negative or not finite
    pub fn instance_to_record(
        row: &Instance,
        attributes: &[Attribute],
    ) -> Result<Record, CodecError> {
        if row.n_attributes() != attributes.len() {
            return Err(CodecError::RowWidthMismatch {
                expected: attributes.len(),
                got: row.n_attributes(),
            });
        }
        check_weight(row.weight())?;
        let layout = ColumnLayout::classify(attributes, row.class_index())?;
        let storage = if row.is_sparse() {
            NumericStorage::Sparse
        } else {
            NumericStorage::Dense
        };
        Ok(Self::to_record(row, &layout, storage))
    }

    /// Flatten a record into table-row values.
    ///
    /// The buffer holds categorical values, then numeric values in dense
    /// order (unset sparse entries as `0.0`), then one `NaN` target slot if
    /// `with_target`.
    pub fn from_record(record: &Record, with_target: bool) -> Vec<f64> {
        let mut values = Vec::with_capacity(record.n_features() + usize::from(with_target));
        values.extend(record.categorical().iter().map(|&c| f64::from(c)));
        values.extend(record.numeric().iter());
        if with_target {
            values.push(f64::NAN);
        }
        values
    }

    /// Non-zero `(column, value)` pairs of a record in table-row layout.
    ///
    /// The target slot is not included.
    pub fn from_record_sparse(record: &Record) -> Vec<(usize, f64)> {
        let n_categorical = record.categorical().len();
        let mut pairs = Vec::with_capacity(n_categorical + record.numeric().nnz());
        pairs.extend(
            record
                .categorical()
                .iter()
                .enumerate()
                .filter(|&(_, &c)| c != 0)
                .map(|(i, &c)| (i, f64::from(c))),
        );
        pairs.extend(
            record
                .numeric()
                .iter_nonzero()
                .map(|(i, v)| (n_categorical + i, v)),
        );
        pairs
    }

    /// Build a table row for `record`, attached to `header`.
    ///
    /// Used for prediction: the class column, which the header places last,
    /// is set to missing.
    pub fn to_instance(record: &Record, header: &Arc<TableHeader>) -> Result<Instance, CodecError> {
        let with_target = header.class_index().is_some();
        let width = record.n_features() + usize::from(with_target);
        if width != header.n_attributes() {
            return Err(CodecError::RowWidthMismatch {
                expected: header.n_attributes(),
                got: width,
            });
        }
        let row = if record.numeric().is_sparse() {
            let mut pairs = Self::from_record_sparse(record);
            if let Some(class) = header.class_index() {
                pairs.push((class, f64::NAN));
                pairs.sort_by_key(|&(i, _)| i);
            }
            Instance::sparse(width, pairs, record.weight())?
        } else {
            let mut values = Self::from_record(record, with_target);
            if let Some(class) = header.class_index() {
                // The target slot is last; move it when the header differs.
                values[class..].rotate_right(1);
            }
            Instance::dense(values, record.weight())
        };
        Ok(row.with_context(Arc::clone(header)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CategoricalSchema;

    fn attrs() -> Vec<Attribute> {
        vec![
            Attribute::numeric("a"),
            Attribute::nominal("b", ["x", "y", "z"]),
            Attribute::text("note"),
            Attribute::numeric("c"),
        ]
    }

    #[test]
    fn dense_row_to_record() {
        let layout = ColumnLayout::classify(&attrs(), None).unwrap();
        let row = Instance::dense(vec![1.5, 2.0, 99.0, -3.0], 0.25);
        let rec = RecordCodec::to_record(&row, &layout, NumericStorage::Dense);
        assert_eq!(rec.categorical(), &[2]);
        assert_eq!(rec.numeric().iter().collect::<Vec<_>>(), vec![1.5, -3.0]);
        assert_eq!(rec.weight(), 0.25);
        assert!(!rec.numeric().is_sparse());
    }

    #[test]
    fn sparse_row_to_record_keeps_sparsity() {
        let layout = ColumnLayout::classify(&attrs(), None).unwrap();
        let row = Instance::sparse(4, [(1, 1.0), (3, 7.0)], 1.0).unwrap();
        let rec = RecordCodec::to_record(&row, &layout, NumericStorage::Sparse);
        match rec.numeric() {
            NumericVec::Sparse(v) => {
                assert_eq!(v.indices(), &[1]);
                assert_eq!(v.values(), &[7.0]);
                assert_eq!(v.dim(), 2);
            }
            NumericVec::Dense(_) => panic!("expected sparse storage"),
        }
        assert_eq!(rec.categorical(), &[1]);
    }

    #[test]
    fn nominal_values_are_truncated() {
        let layout = ColumnLayout::classify(&attrs(), None).unwrap();
        let row = Instance::dense(vec![0.0, 1.9, 0.0, 0.0], 1.0);
        let rec = RecordCodec::to_record(&row, &layout, NumericStorage::Dense);
        assert_eq!(rec.categorical(), &[1]);
    }

    #[test]
    fn instance_to_record_checks_width() {
        let row = Instance::dense(vec![1.0], 1.0);
        assert!(matches!(
            RecordCodec::instance_to_record(&row, &attrs()),
            Err(CodecError::RowWidthMismatch { .. })
        ));
    }

    #[test]
    fn instance_to_record_rejects_negative_weight() {
        let row = Instance::dense(vec![1.0, 0.0, 0.0, 2.0], -1.0);
        assert_eq!(
            RecordCodec::instance_to_record(&row, &attrs()),
            Err(CodecError::InvalidWeight(-1.0))
        );
    }

    #[test]
    fn from_record_layout() {
        let schemas: Arc<[CategoricalSchema]> = vec![
            CategoricalSchema::new(3).unwrap(),
            CategoricalSchema::new(2).unwrap(),
        ]
        .into();
        let rec = Record::new(
            NumericVec::Sparse(SparseVec::from_pairs(3, [(2, 4.0)]).unwrap()),
            vec![2, 1],
            schemas,
            3.0,
        )
        .unwrap();

        let values = RecordCodec::from_record(&rec, false);
        assert_eq!(values, vec![2.0, 1.0, 0.0, 0.0, 4.0]);

        let values = RecordCodec::from_record(&rec, true);
        assert_eq!(values.len(), 6);
        assert!(values[5].is_nan());

        let pairs = RecordCodec::from_record_sparse(&rec);
        assert_eq!(pairs, vec![(0, 2.0), (1, 1.0), (4, 4.0)]);
    }

    #[test]
    fn to_instance_sets_missing_class() {
        let header = Arc::new(
            TableHeader::new(
                "r",
                vec![
                    Attribute::numeric("x0"),
                    Attribute::numeric("x1"),
                    Attribute::nominal("class", ["a", "b"]),
                ],
                Some(2),
            )
            .unwrap(),
        );
        let rec = Record::numeric_only(NumericVec::dense(vec![1.0, 2.0]));
        let row = RecordCodec::to_instance(&rec, &header).unwrap();
        assert_eq!(row.value(0), 1.0);
        assert_eq!(row.value(1), 2.0);
        assert!(row.is_missing(2));
        assert_eq!(row.class_index(), Some(2));
    }

    #[test]
    fn to_instance_checks_width() {
        let header = Arc::new(TableHeader::new("r", vec![Attribute::numeric("x")], None).unwrap());
        let rec = Record::numeric_only(NumericVec::dense(vec![1.0, 2.0]));
        assert!(matches!(
            RecordCodec::to_instance(&rec, &header),
            Err(CodecError::RowWidthMismatch { expected: 1, got: 2 })
        ));
    }
}
