//! Codec configuration with builder pattern.
//!
//! [`CodecConfig`] controls numeric storage, column naming on the table side,
//! and threading. It uses the `bon` crate for builder generation with
//! validation at build time.
//!
//! # Example
//!
//! ```
//! use tabular_bridge::config::{CodecConfig, StoragePolicy};
//!
//! // All defaults
//! let config = CodecConfig::builder().build().unwrap();
//!
//! // Always produce sparse records, single threaded
//! let config = CodecConfig::builder()
//!     .storage(StoragePolicy::Sparse)
//!     .n_threads(1)
//!     .build()
//!     .unwrap();
//! ```

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::dataset::{NumericStorage, DEFAULT_CATEGORY_NAME};

// =============================================================================
// ConfigError
// =============================================================================

/// Errors that can occur during configuration validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A column or relation name is empty.
    EmptyName(&'static str),
    /// The class and regression target columns share a name.
    ClashingTargetNames(String),
    /// Parallel chunk size must be at least 1.
    InvalidChunkRows,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName(field) => write!(f, "{} must not be empty", field),
            Self::ClashingTargetNames(name) => {
                write!(f, "class and regression targets are both named '{}'", name)
            }
            Self::InvalidChunkRows => write!(f, "parallel_chunk_rows must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// StoragePolicy
// =============================================================================

/// How decoded records store their numeric values.
///
/// The mode is decided once per dataset so that all records of a dataset
/// share it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoragePolicy {
    /// Sparse if any source row is sparse, dense otherwise.
    #[default]
    FollowSource,
    Dense,
    Sparse,
}

impl StoragePolicy {
    /// Resolve the storage mode for a set of rows, given whether any is sparse.
    pub fn resolve(self, any_sparse: bool) -> NumericStorage {
        match self {
            StoragePolicy::FollowSource if any_sparse => NumericStorage::Sparse,
            StoragePolicy::FollowSource => NumericStorage::Dense,
            StoragePolicy::Dense => NumericStorage::Dense,
            StoragePolicy::Sparse => NumericStorage::Sparse,
        }
    }
}

// =============================================================================
// ColumnNaming
// =============================================================================

/// Names given to synthesized table columns.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNaming {
    /// Relation name of encoded tables.
    pub relation: String,
    /// Base name of categorical columns whose schema has no display name.
    pub category_base: String,
    /// Prefix of numeric columns, followed by the numeric ordinal.
    pub numeric_prefix: String,
    /// Name of the numeric target column.
    pub regression_target: String,
    /// Name of the nominal target column.
    pub class_target: String,
}

impl Default for ColumnNaming {
    fn default() -> Self {
        Self {
            relation: "bridged-dataset".to_string(),
            category_base: DEFAULT_CATEGORY_NAME.to_string(),
            numeric_prefix: "numericAttr".to_string(),
            regression_target: "regressionTarget".to_string(),
            class_target: "classTarget".to_string(),
        }
    }
}

impl ColumnNaming {
    /// Name of numeric column `ordinal`.
    pub fn numeric(&self, ordinal: usize) -> String {
        format!("{}{}", self.numeric_prefix, ordinal)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("relation", &self.relation),
            ("category_base", &self.category_base),
            ("numeric_prefix", &self.numeric_prefix),
            ("regression_target", &self.regression_target),
            ("class_target", &self.class_target),
        ] {
            if value.is_empty() {
                return Err(ConfigError::EmptyName(field));
            }
        }
        if self.regression_target == self.class_target {
            return Err(ConfigError::ClashingTargetNames(self.class_target.clone()));
        }
        Ok(())
    }
}

// =============================================================================
// CodecConfig
// =============================================================================

/// Configuration for [`DatasetCodec`](crate::codec::DatasetCodec).
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(
    derive(Clone, Debug),
    finish_fn(vis = "", name = __build_internal)
)]
#[serde(default)]
pub struct CodecConfig {
    /// Numeric storage of decoded records. Default: `FollowSource`.
    #[builder(default)]
    pub storage: StoragePolicy,

    /// Column names of encoded tables.
    #[builder(default)]
    pub naming: ColumnNaming,

    /// Number of threads for decoding. 0 = auto, 1 = sequential. Default: 1.
    #[builder(default = 1)]
    pub n_threads: usize,

    /// Rows per parallel decode chunk. Tables with fewer rows are decoded
    /// sequentially. Default: 4096.
    #[builder(default = 4096)]
    pub parallel_chunk_rows: usize,
}

/// Custom finishing function that validates the config.
impl<S: codec_config_builder::IsComplete> CodecConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if any name is empty, both target columns
    /// share a name, or `parallel_chunk_rows == 0`.
    pub fn build(self) -> Result<CodecConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl CodecConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.naming.validate()?;
        if self.parallel_chunk_rows == 0 {
            return Err(ConfigError::InvalidChunkRows);
        }
        Ok(())
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self::builder().__build_internal()
    }
}

// =============================================================================
// Tests
// =============================================================================
