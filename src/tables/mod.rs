//! Mapping source tables.
//!
//! Descriptors declare each revision's shape, the loader reads raw records,
//! and the normalizer flattens them into key to value dictionaries.

pub mod descriptor;
pub mod loader;
pub mod normalizer;

pub use descriptor::{hkscs_revisions, parse_manifest, NormalizationRule, SourceFormat, TableDescriptor};
pub use loader::{load_records, parse_records, RawRecord};
pub use normalizer::{build_mapping, normalize_pair, NormalizedMapping};
