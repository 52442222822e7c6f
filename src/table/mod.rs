//! Row-oriented attribute tables.
//!
//! A [`Table`] is a list of [`Instance`] rows sharing a [`TableHeader`]:
//! an ordered list of [`Attribute`] descriptors and an optional class
//! column. Every value is an `f64`; nominal values are stored as the index
//! of their label and missing values as `NaN`.
//!
//! Text and date attributes can be declared but have no counterpart in the
//! canonical dataset model; the codec drops them.

mod attribute;
mod instance;
#[allow(clippy::module_inception)]
mod table;

pub use attribute::{Attribute, AttributeKind};
pub use instance::{Instance, InstanceValues};
pub use table::{RowSet, Table, TableHeader, TableSource};
