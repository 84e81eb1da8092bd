//! Engine configuration

use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ConfigError;

/// Which values free-text search looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Only the values of the declared columns (as their accessors see them).
    ///
    /// A table with no declared columns searches every field instead.
    #[default]
    Columns,
    /// Every field of the row, declared or not.
    AllFields,
}

/// Configuration shared by the tables of one dashboard.
///
/// # Example
///
/// ```
/// use cfadmin_lib::config::{EngineConfig, SearchScope};
///
/// let config = EngineConfig::default()
///     .with_page_size(25)
///     .with_search_scope(SearchScope::AllFields);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Rows per page when a table mounts.
    ///
    /// Default: 10
    pub page_size: usize,

    /// Page sizes offered by the page-size selector. An empty list offers
    /// any positive size.
    ///
    /// Default: 10, 25, 50, 100
    pub page_size_options: Vec<usize>,

    /// Values considered by free-text search.
    ///
    /// Default: [`SearchScope::Columns`]
    pub search_scope: SearchScope,

    /// Field holding the row identifier forwarded to delete/toggle sinks.
    ///
    /// Default: `id`
    pub id_field: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            page_size_options: vec![10, 25, 50, 100],
            search_scope: SearchScope::Columns,
            id_field: "id".to_string(),
        }
    }
}

impl EngineConfig {
    /// Creates a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the page sizes offered to the user.
    pub fn with_page_size_options(mut self, options: impl Into<Vec<usize>>) -> Self {
        self.page_size_options = options.into();
        self
    }

    /// Sets the search scope.
    pub fn with_search_scope(mut self, scope: SearchScope) -> Self {
        self.search_scope = scope;
        self
    }

    /// Sets the identifier field.
    pub fn with_id_field(mut self, field: impl Into<String>) -> Self {
        self.id_field = field.into();
        self
    }

    /// Checks the values an engine cannot work with.
    ///
    /// Zero entries in `page_size_options` are not an error; they are
    /// dropped by [`EngineConfig::normalized`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.id_field.is_empty() {
            return Err(ConfigError::EmptyIdField);
        }
        Ok(())
    }

    /// Returns a copy with zero and duplicate page size options removed and
    /// the options sorted.
    pub fn normalized(mut self) -> Self {
        self.page_size_options.retain(|n| *n > 0);
        self.page_size_options.sort_unstable();
        self.page_size_options.dedup();
        self
    }

    /// Parses and validates a JSON config document.
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config.normalized())
    }

    /// Reads a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_json_str(&input)
    }
}
