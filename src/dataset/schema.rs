//! Categorical variable and dataset schema definitions.
//!
//! This module defines the schema types that describe dataset structure.

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::CodecError;

/// Base name used when a categorical variable carries no display name.
pub const DEFAULT_CATEGORY_NAME: &str = "category";

/// Metadata for one categorical (nominal) variable.
///
/// Values of the variable are integer option indices in `0..cardinality`.
/// The cardinality is fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoricalSchema {
    cardinality: usize,

    /// Human-readable option labels, `len == cardinality` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    option_names: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    display_name: Option<String>,
}

impl CategoricalSchema {
    /// Create a schema with `cardinality` anonymous options.
    pub fn new(cardinality: usize) -> Result<Self, CodecError> {
        if cardinality == 0 {
            return Err(CodecError::InvalidCardinality {
                name: DEFAULT_CATEGORY_NAME.to_string(),
            });
        }
        Ok(Self {
            cardinality,
            option_names: None,
            display_name: None,
        })
    }

    /// Create a schema whose cardinality is the number of labels given.
    pub fn with_labels<I, S>(labels: I) -> Result<Self, CodecError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = labels.into_iter().map(Into::into).collect();
        Self::new(names.len())?.with_option_names(names)
    }

    /// Attach option labels.
    pub fn with_option_names(mut self, names: Vec<String>) -> Result<Self, CodecError> {
        if names.len() != self.cardinality {
            return Err(CodecError::OptionNameCount {
                cardinality: self.cardinality,
                got: names.len(),
            });
        }
        self.option_names = Some(names);
        Ok(self)
    }

    /// Set the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Number of options.
    #[inline]
    pub fn cardinality(&self) -> usize {
        self.cardinality
    }

    /// Explicit option labels, if any.
    pub fn option_names(&self) -> Option<&[String]> {
        self.option_names.as_deref()
    }

    /// Label for option `index`.
    ///
    /// Falls back to the stringified index when no labels were given.
    pub fn option_name(&self, index: usize) -> Cow<'_, str> {
        match self.option_names.as_ref().and_then(|names| names.get(index)) {
            Some(name) => Cow::Borrowed(name.as_str()),
            None => Cow::Owned(index.to_string()),
        }
    }

    /// Display name, or [`DEFAULT_CATEGORY_NAME`] when unset.
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(DEFAULT_CATEGORY_NAME)
    }

    /// Whether a display name was set explicitly.
    pub fn has_display_name(&self) -> bool {
        self.display_name.is_some()
    }

    /// Returns true if `value` is a valid option index.
    #[inline]
    pub fn contains(&self, value: i32) -> bool {
        value >= 0 && (value as usize) < self.cardinality
    }
}

/// Shape shared by every record of a dataset.
///
/// The categorical schemas are reference counted so that all records of a
/// dataset point at the same immutable array.
#[derive(Clone, Debug, PartialEq)]
pub struct DatasetSchema {
    categorical: Arc<[CategoricalSchema]>,
    numeric_count: usize,
}

impl DatasetSchema {
    /// Create a schema from categorical variable metadata and a numeric width.
    pub fn new(categorical: Vec<CategoricalSchema>, numeric_count: usize) -> Self {
        Self {
            categorical: categorical.into(),
            numeric_count,
        }
    }

    /// Create a schema where all variables are numeric.
    pub fn all_numeric(numeric_count: usize) -> Self {
        Self::new(Vec::new(), numeric_count)
    }

    /// Categorical variable metadata, in column order.
    #[inline]
    pub fn categorical(&self) -> &[CategoricalSchema] {
        &self.categorical
    }

    /// Shared handle to the categorical metadata.
    #[inline]
    pub fn categorical_shared(&self) -> &Arc<[CategoricalSchema]> {
        &self.categorical
    }

    /// Number of categorical variables.
    #[inline]
    pub fn n_categorical(&self) -> usize {
        self.categorical.len()
    }

    /// Number of numeric dimensions.
    #[inline]
    pub fn numeric_count(&self) -> usize {
        self.numeric_count
    }

    /// Total number of feature columns (categorical + numeric).
    #[inline]
    pub fn n_features(&self) -> usize {
        self.categorical.len() + self.numeric_count
    }
}
