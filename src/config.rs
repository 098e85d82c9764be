//! Configuration for building a mapping registry.

use crate::tables::{hkscs_revisions, TableDescriptor};
use std::path::{Path, PathBuf};

/// Default directory holding the table files.
pub const DEFAULT_DATA_DIR: &str = "data/hkscs";

/// Registry loading configuration.
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Directory containing `<name>.tsv` / `<name>.json` table files.
    pub data_dir: PathBuf,

    /// Load and normalize each table on its own thread.
    pub parallel_load: bool,

    /// Tables to load, in resolution order.
    pub tables: Vec<TableDescriptor>,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ConverterConfig {
    /// Create new configuration with defaults: the HKSCS revision chain read
    /// from [`DEFAULT_DATA_DIR`], loaded in parallel.
    pub fn new() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            parallel_load: true,
            tables: hkscs_revisions(),
        }
    }

    /// Set the data directory.
    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Self {
        self.data_dir = data_dir.as_ref().to_path_buf();
        self
    }

    /// Enable per-table parallel loading.
    pub fn with_parallel_load(mut self, enable: bool) -> Self {
        self.parallel_load = enable;
        self
    }

    /// Replace the table list. Order is resolution order.
    pub fn with_tables(mut self, tables: Vec<TableDescriptor>) -> Self {
        self.tables = tables;
        self
    }
}
