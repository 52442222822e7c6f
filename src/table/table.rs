//! Row-oriented table with an explicit column header.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use super::attribute::Attribute;
use super::instance::Instance;
use crate::error::CodecError;

/// Relation name, column descriptors and optional class column.
#[derive(Clone, Debug, PartialEq)]
pub struct TableHeader {
    relation: String,
    attributes: Vec<Attribute>,
    class_index: Option<usize>,
}

impl TableHeader {
    /// Create a header.
    ///
    /// # Errors
    ///
    /// - [`CodecError::DuplicateAttribute`] if two attributes share a name
    /// - [`CodecError::TargetOutOfRange`] if `class_index` is not a column
    pub fn new(
        relation: impl Into<String>,
        attributes: Vec<Attribute>,
        class_index: Option<usize>,
    ) -> Result<Self, CodecError> {
        let mut seen = HashSet::with_capacity(attributes.len());
        for attr in &attributes {
            if !seen.insert(attr.name()) {
                return Err(CodecError::DuplicateAttribute(attr.name().to_string()));
            }
        }
        if let Some(index) = class_index {
            if index >= attributes.len() {
                return Err(CodecError::TargetOutOfRange {
                    index,
                    n_columns: attributes.len(),
                });
            }
        }
        Ok(Self {
            relation: relation.into(),
            attributes,
            class_index,
        })
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn n_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn class_index(&self) -> Option<usize> {
        self.class_index
    }

    /// Descriptor of the class column.
    pub fn class_attribute(&self) -> Option<&Attribute> {
        self.class_index.map(|i| &self.attributes[i])
    }

    /// Index of the attribute called `name`.
    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a.name() == name)
    }
}

/// A table: header plus rows.
///
/// Every row pushed into the table is attached to the shared header.
#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    header: Arc<TableHeader>,
    rows: Vec<Instance>,
}

impl Table {
    /// Create an empty table.
    pub fn new(
        relation: impl Into<String>,
        attributes: Vec<Attribute>,
        class_index: Option<usize>,
    ) -> Result<Self, CodecError> {
        Ok(Self::with_header(TableHeader::new(relation, attributes, class_index)?, 0))
    }

    /// Create an empty table from a header.
    pub fn with_header(header: TableHeader, capacity: usize) -> Self {
        Self {
            header: Arc::new(header),
            rows: Vec::with_capacity(capacity),
        }
    }

    pub fn header(&self) -> &TableHeader {
        &self.header
    }

    /// Shared handle to the header, for attaching prediction rows.
    pub fn header_shared(&self) -> &Arc<TableHeader> {
        &self.header
    }

    pub fn attributes(&self) -> &[Attribute] {
        self.header.attributes()
    }

    pub fn attribute(&self, index: usize) -> &Attribute {
        &self.header.attributes()[index]
    }

    pub fn n_attributes(&self) -> usize {
        self.header.n_attributes()
    }

    pub fn class_index(&self) -> Option<usize> {
        self.header.class_index()
    }

    pub fn class_attribute(&self) -> Option<&Attribute> {
        self.header.class_attribute()
    }

    /// Change the class column and re-attach every row.
    pub fn set_class_index(&mut self, class_index: Option<usize>) -> Result<(), CodecError> {
        let header = TableHeader::new(
            self.header.relation.clone(),
            self.header.attributes.clone(),
            class_index,
        )?;
        self.header = Arc::new(header);
        for row in &mut self.rows {
            row.set_context(Arc::clone(&self.header));
        }
        Ok(())
    }

    /// Append a row, attaching it to this table.
    pub fn push(&mut self, mut row: Instance) -> Result<(), CodecError> {
        if row.n_attributes() != self.n_attributes() {
            return Err(CodecError::RowWidthMismatch {
                expected: self.n_attributes(),
                got: row.n_attributes(),
            });
        }
        row.set_context(Arc::clone(&self.header));
        self.rows.push(row);
        Ok(())
    }

    pub fn rows(&self) -> &[Instance] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> &Instance {
        &self.rows[index]
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Header-only copy (no rows).
    pub fn empty_like(&self) -> Self {
        Self {
            header: Arc::clone(&self.header),
            rows: Vec::new(),
        }
    }

    /// Copy with attribute `index` removed.
    ///
    /// The class column shifts with the removal; removing the class column
    /// leaves the table without one.
    pub fn without_attribute(&self, index: usize) -> Result<Self, CodecError> {
        if index >= self.n_attributes() {
            return Err(CodecError::AttributeOutOfRange {
                index,
                n_attributes: self.n_attributes(),
            });
        }
        let mut attributes = self.header.attributes.clone();
        attributes.remove(index);
        let class_index = match self.class_index() {
            Some(c) if c == index => None,
            Some(c) if c > index => Some(c - 1),
            other => other,
        };
        let header = TableHeader::new(self.header.relation.clone(), attributes, class_index)?;
        let mut table = Self::with_header(header, self.rows.len());
        for row in &self.rows {
            table.push(row.without_attribute(index))?;
        }
        Ok(table)
    }
}

// =============================================================================
// Source access
// =============================================================================

/// Read access to a table-shaped data source.
pub trait TableSource {
    /// Column descriptors.
    fn attributes(&self) -> &[Attribute];

    /// Rows, in order.
    fn rows(&self) -> &[Instance];

    /// The designated target column, or `None`.
    ///
    /// Sources that cannot resolve a target report `None` rather than fail.
    fn target_index(&self) -> Option<usize>;
}

impl TableSource for Table {
    fn attributes(&self) -> &[Attribute] {
        self.header.attributes()
    }

    fn rows(&self) -> &[Instance] {
        &self.rows
    }

    fn target_index(&self) -> Option<usize> {
        self.class_index()
    }
}

/// Borrowed column descriptors plus rows that may not belong to a table.
///
/// The target column is taken from the first row's table context. Rows
/// without a context leave the source target-less.
#[derive(Clone, Copy, Debug)]
pub struct RowSet<'a> {
    attributes: &'a [Attribute],
    rows: &'a [Instance],
}

impl<'a> RowSet<'a> {
    pub fn new(attributes: &'a [Attribute], rows: &'a [Instance]) -> Self {
        Self { attributes, rows }
    }
}

impl TableSource for RowSet<'_> {
    fn attributes(&self) -> &[Attribute] {
        self.attributes
    }

    fn rows(&self) -> &[Instance] {
        self.rows
    }

    fn target_index(&self) -> Option<usize> {
        let first = self.rows.first()?;
        if first.context().is_none() {
            debug!("first row has no table context; treating rows as target-less");
            return None;
        }
        first.class_index()
    }
}
