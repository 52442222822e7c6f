//! Testing utilities for tabular-bridge.
//!
//! Assertion helpers and deterministic table fixtures shared by unit tests,
//! integration tests and benchmarks.
//!
//! ```
//! use tabular_bridge::testing::{synthetic_table, FixtureTarget};
//!
//! let table = synthetic_table(10, 3, 2, 4, FixtureTarget::Nominal(3), false).unwrap();
//! assert_eq!(table.n_rows(), 10);
//! assert_eq!(table.class_index(), Some(5));
//! ```

use approx::AbsDiffEq;

use crate::dataset::Record;
use crate::error::CodecError;
use crate::table::{Attribute, Instance, Table};

// =============================================================================
// Constants
// =============================================================================

/// Default tolerance for floating point comparisons.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

// =============================================================================
// Floating Point Assertions
// =============================================================================

/// Assert that two f64 values are approximately equal.
///
/// Uses absolute difference comparison with the given tolerance.
///
/// # Examples
///
/// ```
/// # use tabular_bridge::assert_approx_eq;
/// assert_approx_eq!(1.0, 1.0001, 0.001);
/// ```
///
/// # Panics
///
/// Panics if the absolute difference exceeds tolerance.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let diff = (left_val - right_val).abs();
        if !(diff <= tol) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                left_val, right_val, diff, tol
            );
        }
    }};
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {{
        let left_val: f64 = $left;
        let right_val: f64 = $right;
        let tol: f64 = $tolerance;
        let diff = (left_val - right_val).abs();
        if !(diff <= tol) {
            panic!(
                "assertion failed: `(left ≈ right)` - {}\n  left: `{:?}`\n right: `{:?}`\n  diff: `{:?}` > tolerance `{:?}`",
                format_args!($($arg)+), left_val, right_val, diff, tol
            );
        }
    }};
}

/// Assert that two slices are approximately equal element-wise.
///
/// # Panics
///
/// Panics if lengths differ or any element differs by more than tolerance.
pub fn assert_slice_approx_eq(actual: &[f64], expected: &[f64], tolerance: f64, context: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{context}: length mismatch - got {}, expected {}",
        actual.len(),
        expected.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            a.abs_diff_eq(e, tolerance),
            "{context}[{i}]: {a} ≠ {e} (diff={}, tolerance={tolerance})",
            (a - e).abs()
        );
    }
}

// =============================================================================
// Record Assertions
// =============================================================================

/// Dense numeric values of a record (unset sparse entries as `0.0`).
pub fn numeric_values(record: &Record) -> Vec<f64> {
    record.numeric().iter().collect()
}

fn record_differs(actual: &Record, expected: &Record, epsilon: f64) -> bool {
    if actual.categorical() != expected.categorical()
        || actual.numeric_count() != expected.numeric_count()
        || actual.weight() != expected.weight()
    {
        return true;
    }
    actual
        .numeric()
        .iter()
        .zip(expected.numeric().iter())
        .any(|(a, e)| !(a.abs_diff_eq(&e, epsilon) || (a.is_nan() && e.is_nan())))
}

/// Assert that two record lists carry the same values.
///
/// Compares categorical values, dense numeric values (within `DEFAULT_TOLERANCE`,
/// with `NaN` matching `NaN`) and weights. Schemas and storage modes are not compared. On failure,
/// shows a git-style diff of the differing records.
///
/// # Panics
///
/// Panics if lengths differ or any record differs.
pub fn assert_records_match(actual: &[Record], expected: &[Record], context: &str) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "{context}: record count mismatch - got {}, expected {}",
        actual.len(),
        expected.len()
    );

    let mut diff = String::new();
    let mut n_diff = 0usize;
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        if record_differs(a, e, DEFAULT_TOLERANCE) {
            n_diff += 1;
            diff.push_str(&format!(
                "[{i:3}] - cat={:?} num={:?} w={}  (expected)\n",
                e.categorical(),
                numeric_values(e),
                e.weight()
            ));
            diff.push_str(&format!(
                "      + cat={:?} num={:?} w={}  (actual)\n",
                a.categorical(),
                numeric_values(a),
                a.weight()
            ));
        }
    }
    if n_diff > 0 {
        panic!(
            "\n{context}: {n_diff}/{} records differ\n\n{diff}",
            actual.len()
        );
    }
}

// =============================================================================
// Fixtures
// =============================================================================

/// Target column of a [`synthetic_table`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FixtureTarget {
    None,
    Numeric,
    /// Nominal target with the given number of classes.
    Nominal(usize),
}

fn numeric_value(row: usize, col: usize, sparse: bool) -> f64 {
    if sparse && (row + col) % 3 != 0 {
        return 0.0;
    }
    ((row * 31 + col * 17) % 97) as f64 / 8.0 - 4.0
}

/// Deterministic table with interleaved numeric and nominal columns.
///
/// Nominal columns have `cardinality` labels. The target column, if any,
/// is last. Weights cycle through `1.0, 1.25, 1.5, 1.75`. With `sparse`,
/// two out of three numeric values are zero and rows use sparse storage.
pub fn synthetic_table(
    n_rows: usize,
    n_numeric: usize,
    n_nominal: usize,
    cardinality: usize,
    target: FixtureTarget,
    sparse: bool,
) -> Result<Table, CodecError> {
    let mut attributes = Vec::with_capacity(n_numeric + n_nominal + 1);
    let (mut numeric, mut nominal) = (0, 0);
    while numeric < n_numeric || nominal < n_nominal {
        if numeric < n_numeric {
            attributes.push(Attribute::numeric(format!("num{numeric}")));
            numeric += 1;
        }
        if nominal < n_nominal {
            let labels = (0..cardinality).map(|v| format!("v{v}"));
            attributes.push(Attribute::nominal(format!("nom{nominal}"), labels));
            nominal += 1;
        }
    }
    let class_index = match target {
        FixtureTarget::None => None,
        FixtureTarget::Numeric => {
            attributes.push(Attribute::numeric("target"));
            Some(attributes.len() - 1)
        }
        FixtureTarget::Nominal(k) => {
            attributes.push(Attribute::nominal(
                "target",
                (0..k).map(|c| format!("class{c}")),
            ));
            Some(attributes.len() - 1)
        }
    };

    let n_columns = attributes.len();
    let mut table = Table::new("synthetic", attributes, class_index)?;
    for row in 0..n_rows {
        let values: Vec<f64> = (0..n_columns)
            .map(|col| {
                let attr = table.attribute(col);
                if Some(col) == class_index {
                    match target {
                        FixtureTarget::Nominal(k) => (row % k.max(1)) as f64,
                        _ => row as f64 * 0.5 - 1.0,
                    }
                } else if attr.is_nominal() {
                    ((row * 7 + col * 3) % cardinality.max(1)) as f64
                } else {
                    numeric_value(row, col, sparse)
                }
            })
            .collect();
        let weight = 1.0 + (row % 4) as f64 * 0.25;
        let instance = if sparse {
            let pairs = values
                .into_iter()
                .enumerate()
                .filter(|&(_, v)| v != 0.0);
            Instance::sparse(n_columns, pairs, weight)?
        } else {
            Instance::dense(values, weight)
        };
        table.push(instance)?;
    }
    Ok(table)
}
