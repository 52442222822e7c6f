//! Column descriptors of a row-oriented table.

use serde::{Deserialize, Serialize};

/// Declared type of a table column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AttributeKind {
    /// Real-valued column.
    Numeric,

    /// Column taking one of a fixed list of labels.
    ///
    /// Values are stored as the label's index, cast to `f64`.
    Nominal { values: Vec<String> },

    /// Free text. Not representable in a canonical dataset.
    Text,

    /// Timestamp with a display format. Not representable in a canonical
    /// dataset.
    Date {
        #[serde(default)]
        format: String,
    },
}

/// A named column descriptor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    #[serde(flatten)]
    kind: AttributeKind,
}

impl Attribute {
    pub fn new(name: impl Into<String>, kind: AttributeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::Numeric)
    }

    pub fn nominal<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(
            name,
            AttributeKind::Nominal {
                values: values.into_iter().map(Into::into).collect(),
            },
        )
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, AttributeKind::Text)
    }

    pub fn date(name: impl Into<String>, format: impl Into<String>) -> Self {
        Self::new(
            name,
            AttributeKind::Date {
                format: format.into(),
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &AttributeKind {
        &self.kind
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self.kind, AttributeKind::Numeric)
    }

    #[inline]
    pub fn is_nominal(&self) -> bool {
        matches!(self.kind, AttributeKind::Nominal { .. })
    }

    /// Number of declared labels for nominal columns, 0 otherwise.
    pub fn num_values(&self) -> usize {
        match &self.kind {
            AttributeKind::Nominal { values } => values.len(),
            _ => 0,
        }
    }

    /// Declared labels for nominal columns.
    pub fn values(&self) -> Option<&[String]> {
        match &self.kind {
            AttributeKind::Nominal { values } => Some(values),
            _ => None,
        }
    }

    /// Index of a label in a nominal column.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.values()?.iter().position(|v| v == label)
    }
}
