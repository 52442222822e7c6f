//! Column descriptors synthesized from canonical schemas.

use std::collections::HashSet;

use crate::config::ColumnNaming;
use crate::dataset::{CategoricalSchema, Dataset};
use crate::table::Attribute;

/// Builds table-side column descriptors for a canonical dataset.
#[derive(Clone, Copy, Debug)]
pub struct AttributeSchemaBuilder<'a> {
    naming: &'a ColumnNaming,
}

impl<'a> AttributeSchemaBuilder<'a> {
    pub fn new(naming: &'a ColumnNaming) -> Self {
        Self { naming }
    }

    /// Nominal descriptor named `name`, listing the schema's option names.
    ///
    /// Schemas without option names get their stringified indices, so the
    /// value list is never empty.
    pub fn categorical_attribute(schema: &CategoricalSchema, name: impl Into<String>) -> Attribute {
        let labels = (0..schema.cardinality()).map(|i| schema.option_name(i).into_owned());
        Attribute::nominal(name, labels)
    }

    /// Name of categorical column `ordinal`: the schema's display name (or
    /// the configured base) followed by the ordinal.
    pub fn categorical_name(&self, schema: &CategoricalSchema, ordinal: usize) -> String {
        let base = if schema.has_display_name() {
            schema.display_name()
        } else {
            &self.naming.category_base
        };
        format!("{base}{ordinal}")
    }

    /// Feature descriptors: categorical columns, then numeric columns.
    ///
    /// Names are unique; see [`columns`](Self::columns).
    pub fn feature_attributes(&self, categorical: &[CategoricalSchema], numeric_count: usize) -> Vec<Attribute> {
        self.columns(categorical, numeric_count, None)
    }

    /// Full column list: categorical columns, numeric columns, then `target`.
    ///
    /// Names are claimed in order target, numeric, categorical; a name
    /// already taken gets a `_<n>` suffix with the smallest free `n`.
    pub fn columns(
        &self,
        categorical: &[CategoricalSchema],
        numeric_count: usize,
        target: Option<Attribute>,
    ) -> Vec<Attribute> {
        let mut used: HashSet<String> = HashSet::with_capacity(categorical.len() + numeric_count + 1);
        if let Some(target) = &target {
            used.insert(target.name().to_string());
        }
        let numeric: Vec<String> = (0..numeric_count)
            .map(|i| claim(&mut used, self.naming.numeric(i)))
            .collect();

        let mut attributes = Vec::with_capacity(categorical.len() + numeric_count + 1);
        for (i, schema) in categorical.iter().enumerate() {
            let name = claim(&mut used, self.categorical_name(schema, i));
            attributes.push(Self::categorical_attribute(schema, name));
        }
        attributes.extend(numeric.into_iter().map(Attribute::numeric));
        attributes.extend(target);
        attributes
    }

    /// Nominal target descriptor for a classification dataset.
    pub fn class_attribute(&self, target: &CategoricalSchema) -> Attribute {
        Self::categorical_attribute(target, self.naming.class_target.clone())
    }

    /// Numeric target descriptor for a regression dataset.
    pub fn regression_attribute(&self) -> Attribute {
        Attribute::numeric(self.naming.regression_target.clone())
    }

    /// Descriptors for every column of `dataset`; a target column, if any,
    /// comes last.
    pub fn attributes_for(&self, dataset: &Dataset) -> Vec<Attribute> {
        let target = match dataset {
            Dataset::Plain(_) => None,
            Dataset::Classification(d) => Some(self.class_attribute(d.target_schema())),
            Dataset::Regression(_) => Some(self.regression_attribute()),
        };
        self.columns(dataset.categorical_schemas(), dataset.numeric_count(), target)
    }
}

/// Reserve `candidate`, or the first free `candidate_<n>`.
fn claim(used: &mut HashSet<String>, candidate: String) -> String {
    let mut name = candidate.clone();
    let mut n = 0usize;
    while used.contains(&name) {
        n += 1;
        name = format!("{candidate}_{n}");
    }
    used.insert(name.clone());
    name
}
