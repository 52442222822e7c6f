//! Declared, typed parameters of wrapped models.
//!
//! A model lists its tunable settings once as a static table of
//! [`ParamSpec`] entries (name, kind, getter, setter). Adapters forward
//! parameter access to the wrapped model through that table.
//!
//! ```
//! use tabular_bridge::adapter::{ParamKind, ParamSpec, ParamValue, Parameterized};
//!
//! #[derive(Default)]
//! struct Knn {
//!     k: i64,
//! }
//!
//! impl Parameterized for Knn {
//!     const PARAMETERS: &'static [ParamSpec<Self>] = &[ParamSpec::new(
//!         "k",
//!         ParamKind::Int,
//!         "number of neighbours",
//!         |m: &Knn| ParamValue::Int(m.k),
//!         |m: &mut Knn, v: &ParamValue| {
//!             m.k = v.as_int()?;
//!             Ok(())
//!         },
//!     )];
//! }
//!
//! let mut knn = Knn::default();
//! knn.set_parameter("k", ParamValue::Int(5)).unwrap();
//! assert_eq!(knn.parameter("k").unwrap(), ParamValue::Int(5));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type of a parameter value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    Bool,
    Int,
    Float,
    Text,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParamKind::Bool => "bool",
            ParamKind::Int => "int",
            ParamKind::Float => "float",
            ParamKind::Text => "text",
        };
        f.write_str(s)
    }
}

/// A parameter value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Text(_) => ParamKind::Text,
        }
    }

    fn wrong(&self, expected: ParamKind) -> ParamError {
        ParamError::WrongKind {
            expected,
            got: self.kind(),
        }
    }

    pub fn as_bool(&self) -> Result<bool, ParamError> {
        match self {
            ParamValue::Bool(v) => Ok(*v),
            other => Err(other.wrong(ParamKind::Bool)),
        }
    }

    pub fn as_int(&self) -> Result<i64, ParamError> {
        match self {
            ParamValue::Int(v) => Ok(*v),
            other => Err(other.wrong(ParamKind::Int)),
        }
    }

    /// Float value; integers are widened.
    pub fn as_float(&self) -> Result<f64, ParamError> {
        match self {
            ParamValue::Float(v) => Ok(*v),
            ParamValue::Int(v) => Ok(*v as f64),
            other => Err(other.wrong(ParamKind::Float)),
        }
    }

    pub fn as_text(&self) -> Result<&str, ParamError> {
        match self {
            ParamValue::Text(v) => Ok(v),
            other => Err(other.wrong(ParamKind::Text)),
        }
    }
}

/// Errors raised by parameter access.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamError {
    #[error("unknown parameter '{0}'")]
    Unknown(String),

    #[error("expected a {expected} value, got {got}")]
    WrongKind { expected: ParamKind, got: ParamKind },

    #[error("invalid value for '{name}': {reason}")]
    Invalid { name: String, reason: String },
}

/// Declaration of one parameter of model type `M`.
pub struct ParamSpec<M> {
    name: &'static str,
    kind: ParamKind,
    description: &'static str,
    get: fn(&M) -> ParamValue,
    set: fn(&mut M, &ParamValue) -> Result<(), ParamError>,
}

impl<M> ParamSpec<M> {
    pub const fn new(
        name: &'static str,
        kind: ParamKind,
        description: &'static str,
        get: fn(&M) -> ParamValue,
        set: fn(&mut M, &ParamValue) -> Result<(), ParamError>,
    ) -> Self {
        Self {
            name,
            kind,
            description,
            get,
            set,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn get(&self, model: &M) -> ParamValue {
        (self.get)(model)
    }

    pub fn set(&self, model: &mut M, value: &ParamValue) -> Result<(), ParamError> {
        (self.set)(model, value)
    }
}

impl<M> Clone for ParamSpec<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for ParamSpec<M> {}

impl<M> fmt::Debug for ParamSpec<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamSpec")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .finish()
    }
}

/// A model with a declared parameter list.
pub trait Parameterized: Sized + 'static {
    const PARAMETERS: &'static [ParamSpec<Self>];

    fn parameter_spec(name: &str) -> Result<&'static ParamSpec<Self>, ParamError> {
        Self::PARAMETERS
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ParamError::Unknown(name.to_string()))
    }

    /// Current value of every declared parameter, in declaration order.
    fn parameters(&self) -> Vec<(&'static str, ParamValue)> {
        Self::PARAMETERS
            .iter()
            .map(|p| (p.name, p.get(self)))
            .collect()
    }

    fn parameter(&self, name: &str) -> Result<ParamValue, ParamError> {
        Ok(Self::parameter_spec(name)?.get(self))
    }

    fn set_parameter(&mut self, name: &str, value: ParamValue) -> Result<(), ParamError> {
        Self::parameter_spec(name)?.set(self, &value)
    }
}
