// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # HKSCS Convert
//!
//! Resolves legacy Hong Kong Supplementary Character Set codepoints (GCCS,
//! HKSCS-1999 through HKSCS-2016, and their Big5 ↔ Unicode tables) to the
//! Unicode character preferred today.
//!
//! ## How it works
//!
//! - **Tables**: each historical revision is declared as a
//!   [`TableDescriptor`](tables::TableDescriptor), loaded from tab-separated
//!   or JSON data, and flattened into a codepoint → replacement dictionary.
//! - **Registry**: the dictionaries in revision order, built once and
//!   immutable afterwards.
//! - **Resolution**: a character's hex codepoint is rewritten by each table
//!   that knows it, oldest revision first, so a 1999 variant follows every
//!   later remapping. Targets may be combining sequences such as
//!   `<00CA,0304>` (Ê̄), returned as multi-codepoint strings.
//!
//! ## Quick Start
//!
//! ```no_run
//! use hkscs_convert::{ConverterConfig, MappingRegistry, Resolver};
//!
//! # fn main() -> hkscs_convert::error::Result<()> {
//! let registry = MappingRegistry::load(&ConverterConfig::new().with_data_dir("data/hkscs"))?;
//! let resolver = Resolver::new(&registry);
//!
//! println!("{}", resolver.resolve_string("\u{F442},\u{ECD4}")); // 𥄫,𨋢
//! # Ok(())
//! # }
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Mapping tables
pub mod tables;

// Registry and resolution
pub mod registry;
pub mod resolver;

pub use config::ConverterConfig;
pub use error::{Error, Result};
pub use registry::MappingRegistry;
pub use resolver::{resolve_character, resolve_string, ChainStep, Resolver};
