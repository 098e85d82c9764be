//! Mapping registry.
//!
//! The ordered list of normalized mappings, one per revision. A registry is
//! built completely before it is returned and is never modified afterwards,
//! so it can be shared freely between threads for lookups.

use crate::config::ConverterConfig;
use crate::error::Result;
use crate::tables::{build_mapping, load_records, NormalizedMapping, TableDescriptor};
use std::path::Path;

/// Ordered, immutable sequence of normalized mappings.
#[derive(Debug, Clone, Default)]
pub struct MappingRegistry {
    tables: Vec<(String, NormalizedMapping)>,
}

impl MappingRegistry {
    /// Load and normalize every table in `config`, in declared order.
    ///
    /// Fails on the first table that cannot be read or parsed; no registry is
    /// produced from a partial table set.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use hkscs_convert::{ConverterConfig, MappingRegistry};
    ///
    /// let registry = MappingRegistry::load(&ConverterConfig::new()).unwrap();
    /// assert_eq!(registry.len(), 7);
    /// ```
    pub fn load(config: &ConverterConfig) -> Result<Self> {
        let mappings = if config.parallel_load {
            load_parallel(&config.tables, &config.data_dir)?
        } else {
            config
                .tables
                .iter()
                .map(|descriptor| load_table(descriptor, &config.data_dir))
                .collect::<Result<Vec<_>>>()?
        };

        let tables: Vec<(String, NormalizedMapping)> = config
            .tables
            .iter()
            .map(|descriptor| descriptor.name.clone())
            .zip(mappings)
            .collect();

        let registry = Self { tables };
        log::info!(
            "Mapping registry ready: {} tables, {} entries",
            registry.len(),
            registry.entry_count()
        );
        Ok(registry)
    }

    /// Build a registry from already normalized tables, in resolution order.
    pub fn from_tables(tables: Vec<(String, NormalizedMapping)>) -> Self {
        Self { tables }
    }

    /// Tables in resolution order.
    pub fn tables(&self) -> impl Iterator<Item = (&str, &NormalizedMapping)> {
        self.tables.iter().map(|(name, mapping)| (name.as_str(), mapping))
    }

    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&NormalizedMapping> {
        self.tables
            .iter()
            .find(|(table_name, _)| table_name == name)
            .map(|(_, mapping)| mapping)
    }

    /// Number of tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// True if the registry holds no tables.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Total number of entries across all tables.
    pub fn entry_count(&self) -> usize {
        self.tables.iter().map(|(_, mapping)| mapping.len()).sum()
    }
}

fn load_table(descriptor: &TableDescriptor, data_dir: &Path) -> Result<NormalizedMapping> {
    let records = load_records(descriptor, data_dir)?;
    let mapping = build_mapping(&descriptor.name, &records, &descriptor.rule);
    log::debug!("{}: {} records -> {} entries", descriptor.name, records.len(), mapping.len());
    Ok(mapping)
}

/// Load every table on its own scoped thread; results keep declared order.
fn load_parallel(tables: &[TableDescriptor], data_dir: &Path) -> Result<Vec<NormalizedMapping>> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = tables
            .iter()
            .map(|descriptor| scope.spawn(move || load_table(descriptor, data_dir)))
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    })
}
