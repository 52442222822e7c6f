//! Declared abilities of a table-side model.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FitError;
use crate::table::{Table, TableSource};

/// One thing a model can handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    NominalAttributes,
    NumericAttributes,
    NominalClass,
    NumericClass,
    /// Tables without a class column.
    NoClass,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Capability::NominalAttributes => "nominal attributes",
            Capability::NumericAttributes => "numeric attributes",
            Capability::NominalClass => "nominal class",
            Capability::NumericClass => "numeric class",
            Capability::NoClass => "no class",
        };
        f.write_str(s)
    }
}

/// Set of [`Capability`] values plus a minimum training-set size.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    enabled: BTreeSet<Capability>,
    min_instances: usize,
}

impl Capabilities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `capability`.
    pub fn with(mut self, capability: Capability) -> Self {
        self.enabled.insert(capability);
        self
    }

    pub fn with_min_instances(mut self, min_instances: usize) -> Self {
        self.min_instances = min_instances;
        self
    }

    pub fn enable(&mut self, capability: Capability) {
        self.enabled.insert(capability);
    }

    pub fn disable(&mut self, capability: Capability) {
        self.enabled.remove(&capability);
    }

    pub fn supports(&self, capability: Capability) -> bool {
        self.enabled.contains(&capability)
    }

    pub fn min_instances(&self) -> usize {
        self.min_instances
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.enabled.iter().copied()
    }

    /// Check that a training table fits these capabilities.
    ///
    /// Text and date columns are ignored, matching what the codec keeps.
    pub fn check(&self, table: &Table) -> Result<(), FitError> {
        let class = table.class_index();
        for (i, attr) in table.attributes().iter().enumerate() {
            let needed = match (Some(i) == class, attr.is_numeric(), attr.is_nominal()) {
                (true, true, _) => Capability::NumericClass,
                (true, _, true) => Capability::NominalClass,
                (false, true, _) => Capability::NumericAttributes,
                (false, _, true) => Capability::NominalAttributes,
                _ => continue,
            };
            if !self.supports(needed) {
                return Err(FitError::MissingCapability(needed));
            }
        }
        if class.is_none() && !self.supports(Capability::NoClass) {
            return Err(FitError::MissingCapability(Capability::NoClass));
        }
        if table.rows().len() < self.min_instances {
            return Err(FitError::TooFewInstances {
                required: self.min_instances,
                got: table.rows().len(),
            });
        }
        Ok(())
    }
}

impl FromIterator<Capability> for Capabilities {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self {
            enabled: iter.into_iter().collect(),
            min_instances: 0,
        }
    }
}
