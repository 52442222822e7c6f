//! A single table row.

use std::sync::Arc;

use super::attribute::Attribute;
use super::table::TableHeader;
use crate::error::CodecError;

/// Row values in dense or sparse storage.
///
/// Sparse rows store `(attribute index, value)` pairs in increasing index
/// order; unset attributes read as `0.0`.
#[derive(Clone, Debug, PartialEq)]
pub enum InstanceValues {
    Dense(Vec<f64>),
    Sparse {
        n_attributes: usize,
        indices: Vec<usize>,
        values: Vec<f64>,
    },
}

/// One row of a [`Table`](super::Table).
///
/// A row may be attached to a table header, which gives it access to the
/// column descriptors and the class column. Rows built on their own are
/// detached until pushed into a table.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    values: InstanceValues,
    weight: f64,
    context: Option<Arc<TableHeader>>,
}

impl Instance {
    /// Dense row.
    pub fn dense(values: Vec<f64>, weight: f64) -> Self {
        Self {
            values: InstanceValues::Dense(values),
            weight,
            context: None,
        }
    }

    /// Sparse row from `(attribute index, value)` pairs sorted by index.
    pub fn sparse<I>(n_attributes: usize, pairs: I, weight: f64) -> Result<Self, CodecError>
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        let mut indices = Vec::new();
        let mut values = Vec::new();
        for (index, value) in pairs {
            if index >= n_attributes {
                return Err(CodecError::AttributeOutOfRange {
                    index,
                    n_attributes,
                });
            }
            if let Some(&previous) = indices.last() {
                if index <= previous {
                    return Err(CodecError::UnsortedSparseIndices { previous, index });
                }
            }
            indices.push(index);
            values.push(value);
        }
        Ok(Self {
            values: InstanceValues::Sparse {
                n_attributes,
                indices,
                values,
            },
            weight,
            context: None,
        })
    }

    /// Number of values (attributes) in this row.
    pub fn n_attributes(&self) -> usize {
        match &self.values {
            InstanceValues::Dense(v) => v.len(),
            InstanceValues::Sparse { n_attributes, .. } => *n_attributes,
        }
    }

    /// Value of attribute `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= n_attributes()` for a dense row.
    pub fn value(&self, index: usize) -> f64 {
        match &self.values {
            InstanceValues::Dense(v) => v[index],
            InstanceValues::Sparse {
                indices, values, ..
            } => match indices.binary_search(&index) {
                Ok(pos) => values[pos],
                Err(_) => 0.0,
            },
        }
    }

    /// Whether attribute `index` holds the missing marker (`NaN`).
    pub fn is_missing(&self, index: usize) -> bool {
        self.value(index).is_nan()
    }

    pub fn is_sparse(&self) -> bool {
        matches!(self.values, InstanceValues::Sparse { .. })
    }

    pub fn values(&self) -> &InstanceValues {
        &self.values
    }

    /// Iterate over stored `(attribute index, value)` pairs.
    ///
    /// Dense rows yield every attribute; sparse rows only the stored ones.
    pub fn stored(&self) -> Box<dyn Iterator<Item = (usize, f64)> + '_> {
        match &self.values {
            InstanceValues::Dense(v) => Box::new(v.iter().copied().enumerate()),
            InstanceValues::Sparse {
                indices, values, ..
            } => Box::new(indices.iter().copied().zip(values.iter().copied())),
        }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn set_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    /// Header of the table this row belongs to, if attached.
    pub fn context(&self) -> Option<&TableHeader> {
        self.context.as_deref()
    }

    /// Attach this row to a table header.
    pub fn with_context(mut self, header: Arc<TableHeader>) -> Self {
        self.context = Some(header);
        self
    }

    pub(crate) fn set_context(&mut self, header: Arc<TableHeader>) {
        self.context = Some(header);
    }

    /// Drop the table context.
    pub fn detach(&mut self) {
        self.context = None;
    }

    /// Class column of the attached table.
    ///
    /// `None` when the table has no class column, and also when the row is
    /// detached: without a table there is no class to resolve.
    pub fn class_index(&self) -> Option<usize> {
        self.context.as_ref().and_then(|h| h.class_index())
    }

    /// Descriptor of attribute `index` from the attached table.
    pub fn attribute(&self, index: usize) -> Option<&Attribute> {
        self.context.as_ref().and_then(|h| h.attributes().get(index))
    }

    /// Copy of this row with attribute `index` removed.
    pub(crate) fn without_attribute(&self, index: usize) -> Self {
        let values = match &self.values {
            InstanceValues::Dense(v) => {
                let mut v = v.clone();
                v.remove(index);
                InstanceValues::Dense(v)
            }
            InstanceValues::Sparse {
                n_attributes,
                indices,
                values,
            } => {
                let (indices, values) = indices
                    .iter()
                    .zip(values)
                    .filter(|&(&i, _)| i != index)
                    .map(|(&i, &v)| (if i > index { i - 1 } else { i }, v))
                    .unzip();
                InstanceValues::Sparse {
                    n_attributes: n_attributes - 1,
                    indices,
                    values,
                }
            }
        };
        Self {
            values,
            weight: self.weight,
            context: None,
        }
    }
}
