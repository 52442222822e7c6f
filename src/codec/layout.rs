//! Column classification of a table schema.

use crate::dataset::{CategoricalSchema, DatasetSchema};
use crate::error::CodecError;
use crate::table::Attribute;

/// Role of one table column in the canonical record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnRole {
    /// Numeric column written to numeric slot `n`.
    Numeric(usize),
    /// Nominal column written to categorical slot `n`.
    Categorical(usize),
    /// The designated target column.
    Target,
    /// Unsupported column type; not carried over.
    Dropped,
}

/// Mapping from table columns to record slots.
///
/// Depends only on the column descriptors and the target index, never on
/// row data.
#[derive(Clone, Debug, PartialEq)]
pub struct ColumnLayout {
    roles: Vec<ColumnRole>,
    schema: DatasetSchema,
    target: Option<usize>,
}

impl ColumnLayout {
    /// Classify `attributes`, excluding the `target` column.
    ///
    /// The first pass counts numeric and categorical columns; the second
    /// assigns slots and builds the categorical schemas in column order.
    /// Each schema keeps the attribute name and labels.
    ///
    /// # Errors
    ///
    /// - [`CodecError::TargetOutOfRange`] if `target` is not a column
    /// - [`CodecError::InvalidCardinality`] for a nominal column without labels
    pub fn classify(attributes: &[Attribute], target: Option<usize>) -> Result<Self, CodecError> {
        if let Some(index) = target {
            if index >= attributes.len() {
                return Err(CodecError::TargetOutOfRange {
                    index,
                    n_columns: attributes.len(),
                });
            }
        }

        let is_target = |i: usize| target == Some(i);

        let mut n_numeric = 0usize;
        let mut n_categorical = 0usize;
        for (i, attr) in attributes.iter().enumerate() {
            if is_target(i) {
                continue;
            } else if attr.is_numeric() {
                n_numeric += 1;
            } else if attr.is_nominal() {
                n_categorical += 1;
            }
        }

        let mut roles = Vec::with_capacity(attributes.len());
        let mut categorical = Vec::with_capacity(n_categorical);
        let mut numeric_pos = 0usize;
        for (i, attr) in attributes.iter().enumerate() {
            let role = if is_target(i) {
                ColumnRole::Target
            } else if attr.is_numeric() {
                numeric_pos += 1;
                ColumnRole::Numeric(numeric_pos - 1)
            } else if attr.is_nominal() {
                categorical.push(categorical_schema(attr)?);
                ColumnRole::Categorical(categorical.len() - 1)
            } else {
                ColumnRole::Dropped
            };
            roles.push(role);
        }
        debug_assert_eq!(numeric_pos, n_numeric);

        Ok(Self {
            roles,
            schema: DatasetSchema::new(categorical, n_numeric),
            target,
        })
    }

    /// Role of each column, in column order.
    pub fn roles(&self) -> &[ColumnRole] {
        &self.roles
    }

    /// Shape of the records this layout produces.
    pub fn schema(&self) -> &DatasetSchema {
        &self.schema
    }

    pub fn numeric_count(&self) -> usize {
        self.schema.numeric_count()
    }

    pub fn n_categorical(&self) -> usize {
        self.schema.n_categorical()
    }

    pub fn target(&self) -> Option<usize> {
        self.target
    }

    /// Number of source columns.
    pub fn n_columns(&self) -> usize {
        self.roles.len()
    }

    /// Number of dropped (unsupported) columns.
    pub fn n_dropped(&self) -> usize {
        self.roles
            .iter()
            .filter(|r| matches!(r, ColumnRole::Dropped))
            .count()
    }
}

/// Categorical schema for a nominal attribute.
pub(crate) fn categorical_schema(attr: &Attribute) -> Result<CategoricalSchema, CodecError> {
    let labels = attr.values().unwrap_or_default();
    if labels.is_empty() {
        return Err(CodecError::InvalidCardinality {
            name: attr.name().to_string(),
        });
    }
    Ok(CategoricalSchema::with_labels(labels.iter().cloned())?.with_display_name(attr.name()))
}
