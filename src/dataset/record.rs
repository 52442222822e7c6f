//! Canonical record: numeric vector + categorical indices + weight.

use std::sync::Arc;

use super::schema::CategoricalSchema;
use super::vector::NumericVec;
use crate::error::CodecError;

/// One canonical row.
///
/// The categorical schemas are shared with every other record of the same
/// dataset; a record never references the representation it was built from.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    numeric: NumericVec,
    categorical: Vec<i32>,
    schemas: Arc<[CategoricalSchema]>,
    weight: f64,
}

/// Reject weights that are negative or not finite.
pub(crate) fn check_weight(weight: f64) -> Result<(), CodecError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(CodecError::InvalidWeight(weight))
    }
}

impl Record {
    /// Create a validated record.
    ///
    /// # Errors
    ///
    /// - [`CodecError::CategoricalLenMismatch`] if `categorical` and `schemas`
    ///   differ in length
    /// - [`CodecError::CategoryOutOfRange`] if a value is outside its schema
    /// - [`CodecError::InvalidWeight`] if `weight` is negative or not finite
    pub fn new(
        numeric: NumericVec,
        categorical: Vec<i32>,
        schemas: Arc<[CategoricalSchema]>,
        weight: f64,
    ) -> Result<Self, CodecError> {
        if categorical.len() != schemas.len() {
            return Err(CodecError::CategoricalLenMismatch {
                expected: schemas.len(),
                got: categorical.len(),
            });
        }
        for (position, (&value, schema)) in categorical.iter().zip(schemas.iter()).enumerate() {
            if !schema.contains(value) {
                return Err(CodecError::CategoryOutOfRange {
                    position,
                    value,
                    cardinality: schema.cardinality(),
                });
            }
        }
        check_weight(weight)?;
        Ok(Self::from_parts(numeric, categorical, schemas, weight))
    }

    /// Create a record with weight 1.0 and no categorical values.
    pub fn numeric_only(numeric: NumericVec) -> Self {
        Self::from_parts(numeric, Vec::new(), Arc::from(Vec::new()), 1.0)
    }

    /// Assemble without validation. Callers guarantee the invariants.
    #[inline]
    pub(crate) fn from_parts(
        numeric: NumericVec,
        categorical: Vec<i32>,
        schemas: Arc<[CategoricalSchema]>,
        weight: f64,
    ) -> Self {
        debug_assert_eq!(categorical.len(), schemas.len());
        Self {
            numeric,
            categorical,
            schemas,
            weight,
        }
    }

    /// Numeric values.
    #[inline]
    pub fn numeric(&self) -> &NumericVec {
        &self.numeric
    }

    /// Selected option index per categorical variable.
    #[inline]
    pub fn categorical(&self) -> &[i32] {
        &self.categorical
    }

    /// Schemas of the categorical variables.
    #[inline]
    pub fn categorical_schemas(&self) -> &[CategoricalSchema] {
        &self.schemas
    }

    /// Shared handle to the categorical schemas.
    #[inline]
    pub fn schemas_shared(&self) -> &Arc<[CategoricalSchema]> {
        &self.schemas
    }

    /// Importance weight.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Number of numeric dimensions.
    #[inline]
    pub fn numeric_count(&self) -> usize {
        self.numeric.len()
    }

    /// Number of feature columns (categorical + numeric).
    #[inline]
    pub fn n_features(&self) -> usize {
        self.categorical.len() + self.numeric.len()
    }
}
