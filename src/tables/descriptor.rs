//! Declarative descriptions of the mapping source tables.
//!
//! Each historical revision is described as data: where it lives, how it is
//! stored, and which columns supply lookup keys versus the replacement value.
//! One generic loader and one generic normalizer consume these descriptors.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Storage shape of a source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Tab-separated rows zipped against a declared header
    Tsv,
    /// JSON array of flat objects, already one record per element
    Json,
}

impl SourceFormat {
    /// File extension used for tables of this format.
    pub fn extension(self) -> &'static str {
        match self {
            SourceFormat::Tsv => "tsv",
            SourceFormat::Json => "json",
        }
    }

    /// Parse a format name (`tsv` / `json`, case-insensitive).
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "tsv" => Ok(SourceFormat::Tsv),
            "json" => Ok(SourceFormat::Json),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Which columns of a table become keys, and which column becomes the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizationRule {
    /// Columns scanned for lookup keys, in order. Later columns overwrite
    /// earlier ones when they produce the same key.
    pub from_columns: Vec<String>,
    /// Column supplying the replacement value
    pub to_column: String,
}

impl NormalizationRule {
    /// Create a rule from column names.
    pub fn new(from_columns: &[&str], to_column: &str) -> Self {
        Self {
            from_columns: from_columns.iter().map(|c| c.to_string()).collect(),
            to_column: to_column.to_string(),
        }
    }
}

/// Static configuration for one source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDescriptor {
    /// Table name, also the file stem on disk
    pub name: String,
    /// Storage shape
    pub format: SourceFormat,
    /// Authoritative column header for row-oriented tables
    #[serde(default)]
    pub header: Vec<String>,
    /// Key/value column selection
    pub rule: NormalizationRule,
}

impl TableDescriptor {
    /// Describe a tab-separated table.
    pub fn tsv(name: &str, header: &[&str], from_columns: &[&str], to_column: &str) -> Self {
        Self {
            name: name.to_string(),
            format: SourceFormat::Tsv,
            header: header.iter().map(|h| h.to_string()).collect(),
            rule: NormalizationRule::new(from_columns, to_column),
        }
    }

    /// Describe a JSON table.
    pub fn json(name: &str, from_columns: &[&str], to_column: &str) -> Self {
        Self {
            name: name.to_string(),
            format: SourceFormat::Json,
            header: Vec::new(),
            rule: NormalizationRule::new(from_columns, to_column),
        }
    }

    /// File name of the table inside the data directory.
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.format.extension())
    }
}

const ISO_1993: &str = "ISO/IEC_10646-1:1993";
const ISO_2000: &str = "ISO/IEC_10646-1:2000";
const ISO_2001: &str = "ISO/IEC_10646-2:2001";
const ISO_2003_AMENDMENT: &str = "ISO/IEC_10646:2003_Amendment";

const GCCS_HEADER: [&str; 4] = ["Big5", "Unicode", "Big5Alternate", "UnicodeName"];
const HKSCS_1999_HEADER: [&str; 4] = ["Big5", "Unicode", "UnicodeAlternate", "UnicodeName"];
const HKSCS_2001_2_HEADER: [&str; 4] = ["BIG-5", ISO_1993, ISO_2000, ISO_2001];
const HKSCS_2004_HEADER: [&str; 4] = ["BIG-5", ISO_1993, ISO_2000, ISO_2003_AMENDMENT];

/// The HKSCS revision chain, oldest first.
///
/// Order is resolution priority: the output of one table is the lookup key
/// for the next.
pub fn hkscs_revisions() -> Vec<TableDescriptor> {
    vec![
        TableDescriptor::tsv("gccs", &GCCS_HEADER, &["Big5Alternate"], "Unicode"),
        TableDescriptor::tsv("hkscs1999", &HKSCS_1999_HEADER, &["UnicodeAlternate"], "Unicode"),
        TableDescriptor::tsv("hkscs2001", &HKSCS_1999_HEADER, &["UnicodeAlternate"], "Unicode"),
        TableDescriptor::tsv("hkscs2001_2", &HKSCS_2001_2_HEADER, &[ISO_1993, ISO_2000], ISO_2001),
        TableDescriptor::tsv("hkscs2004", &HKSCS_2004_HEADER, &[ISO_1993, ISO_2000], ISO_2003_AMENDMENT),
        TableDescriptor::tsv("hkscs2008", &HKSCS_2004_HEADER, &[ISO_1993, ISO_2000], ISO_2003_AMENDMENT),
        TableDescriptor::json("hkscs2016", &["codepoint"], "char"),
    ]
}

/// One manifest entry as written; `format` is checked by [`SourceFormat::from_name`].
#[derive(Deserialize)]
struct ManifestEntry {
    name: String,
    format: String,
    #[serde(default)]
    header: Vec<String>,
    rule: NormalizationRule,
}

/// Parse a JSON manifest of table descriptors.
///
/// The manifest is an array of objects with `name`, `format`, optional
/// `header`, and `rule: { from_columns, to_column }`.
pub fn parse_manifest(text: &str) -> Result<Vec<TableDescriptor>> {
    let entries: Vec<ManifestEntry> =
        serde_json::from_str(text).map_err(|e| Error::InvalidManifest(e.to_string()))?;

    entries
        .into_iter()
        .map(|entry| {
            let format = SourceFormat::from_name(&entry.format)?;
            if format == SourceFormat::Tsv && entry.header.is_empty() {
                return Err(Error::MissingHeader { table: entry.name });
            }

            Ok(TableDescriptor {
                name: entry.name,
                format,
                header: entry.header,
                rule: entry.rule,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revision_order() {
        let names: Vec<String> = hkscs_revisions().into_iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec!["gccs", "hkscs1999", "hkscs2001", "hkscs2001_2", "hkscs2004", "hkscs2008", "hkscs2016"]
        );
    }

    #[test]
    fn test_file_names() {
        let revisions = hkscs_revisions();
        assert_eq!(revisions[0].file_name(), "gccs.tsv");
        assert_eq!(revisions[6].file_name(), "hkscs2016.json");
    }

    #[test]
    fn test_every_rule_column_is_declared() {
        for descriptor in hkscs_revisions() {
            if descriptor.format != SourceFormat::Tsv {
                continue;
            }
            assert!(descriptor.header.contains(&descriptor.rule.to_column), "{}", descriptor.name);
            for column in &descriptor.rule.from_columns {
                assert!(descriptor.header.contains(column), "{}: {}", descriptor.name, column);
            }
        }
    }

    #[test]
    fn test_multi_column_rule() {
        let hkscs2004 = &hkscs_revisions()[4];
        assert_eq!(hkscs2004.rule.from_columns, vec![ISO_1993, ISO_2000]);
        assert_eq!(hkscs2004.rule.to_column, ISO_2003_AMENDMENT);
    }

    #[test]
    fn test_format_from_name() {
        assert_eq!(SourceFormat::from_name("TSV").unwrap(), SourceFormat::Tsv);
        assert_eq!(SourceFormat::from_name("json").unwrap(), SourceFormat::Json);
        assert!(matches!(SourceFormat::from_name("csv"), Err(Error::UnsupportedFormat(_))));
    }

    #[test]
    fn test_parse_manifest() {
        let manifest = r#"[
            {"name": "a", "format": "tsv", "header": ["From", "To"],
             "rule": {"from_columns": ["From"], "to_column": "To"}},
            {"name": "b", "format": "json",
             "rule": {"from_columns": ["codepoint"], "to_column": "char"}}
        ]"#;
        let descriptors = parse_manifest(manifest).unwrap();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0], TableDescriptor::tsv("a", &["From", "To"], &["From"], "To"));
        assert_eq!(descriptors[1], TableDescriptor::json("b", &["codepoint"], "char"));
    }

    #[test]
    fn test_parse_manifest_rejects_headerless_tsv() {
        let manifest = r#"[{"name": "a", "format": "tsv",
            "rule": {"from_columns": ["From"], "to_column": "To"}}]"#;
        assert!(matches!(parse_manifest(manifest), Err(Error::MissingHeader { .. })));
    }

    #[test]
    fn test_parse_manifest_unknown_format() {
        let manifest = r#"[{"name": "a", "format": "csv", "header": ["From", "To"],
            "rule": {"from_columns": ["From"], "to_column": "To"}}]"#;
        match parse_manifest(manifest) {
            Err(Error::UnsupportedFormat(name)) => assert_eq!(name, "csv"),
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_manifest_format_is_case_insensitive() {
        let manifest = r#"[{"name": "b", "format": "JSON",
            "rule": {"from_columns": ["codepoint"], "to_column": "char"}}]"#;
        assert_eq!(parse_manifest(manifest).unwrap()[0].format, SourceFormat::Json);
    }

    #[test]
    fn test_parse_manifest_invalid_json() {
        assert!(matches!(parse_manifest("{"), Err(Error::InvalidManifest(_))));
    }
}
