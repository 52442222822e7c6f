//! Test case loading utilities for integration tests.
//!
//! Table fixtures live in `tests/test-cases/tables/*.json`.
//! For assertion helpers, use `tabular_bridge::testing`.

#![allow(dead_code)]

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Deserialize;

use tabular_bridge::table::{Attribute, Instance, Table};

// Re-export testing utilities for convenience
#[allow(unused_imports)]
pub use tabular_bridge::assert_approx_eq;
#[allow(unused_imports)]
pub use tabular_bridge::testing::{
    assert_records_match, assert_slice_approx_eq, numeric_values, synthetic_table,
    FixtureTarget, DEFAULT_TOLERANCE,
};

// =============================================================================
// Test Case Loading
// =============================================================================

/// Base directory for test cases.
pub fn test_cases_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/test-cases")
}

/// Directory for table fixtures.
pub fn tables_dir() -> PathBuf {
    test_cases_dir().join("tables")
}

/// Load a JSON file and deserialize it.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> T {
    let file =
        File::open(path).unwrap_or_else(|e| panic!("Failed to open {}: {e}", path.display()));
    serde_json::from_reader(file)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {e}", path.display()))
}

/// Install a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Table Fixtures
// =============================================================================

/// One fixture row: dense values (`null` = missing) or sparse pairs.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RowCase {
    Dense {
        values: Vec<Option<f64>>,
        #[serde(default = "default_weight")]
        weight: f64,
    },
    Sparse {
        sparse: Vec<(usize, f64)>,
        #[serde(default = "default_weight")]
        weight: f64,
    },
}

fn default_weight() -> f64 {
    1.0
}

/// A table fixture.
#[derive(Debug, Deserialize)]
pub struct TableCase {
    pub relation: String,
    pub attributes: Vec<Attribute>,
    #[serde(default)]
    pub class_index: Option<usize>,
    pub rows: Vec<RowCase>,
}

impl TableCase {
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(
            self.relation.clone(),
            self.attributes.clone(),
            self.class_index,
        )
        .expect("fixture header is valid");
        for row in &self.rows {
            let instance = match row {
                RowCase::Dense { values, weight } => Instance::dense(
                    values.iter().map(|v| v.unwrap_or(f64::NAN)).collect(),
                    *weight,
                ),
                RowCase::Sparse { sparse, weight } => {
                    Instance::sparse(self.attributes.len(), sparse.iter().copied(), *weight)
                        .expect("fixture sparse row is valid")
                }
            };
            table.push(instance).expect("fixture row width matches");
        }
        table
    }
}

/// Load `tests/test-cases/tables/<name>.json` as a table.
pub fn load_table(name: &str) -> Table {
    let case: TableCase = load_json(&tables_dir().join(format!("{name}.json")));
    case.to_table()
}
