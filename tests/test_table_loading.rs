//! Table loading failures and schema handling.
//!
//! A table that cannot be read or parsed aborts registry construction; these
//! tests write small tables to a temporary directory to exercise each case.

use hkscs_convert::tables::{parse_manifest, TableDescriptor};
use hkscs_convert::{ConverterConfig, Error, MappingRegistry, Resolver};
use std::fs;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).unwrap();
}

fn two_table_config(dir: &TempDir) -> ConverterConfig {
    ConverterConfig::new().with_data_dir(dir.path()).with_tables(vec![
        TableDescriptor::tsv("old", &["Big5", "Old", "New"], &["Old"], "New"),
        TableDescriptor::json("new", &["codepoint"], "char"),
    ])
}

#[test]
fn test_missing_table_is_fatal() {
    let dir = TempDir::new().unwrap();
    write(&dir, "old.tsv", "Big5\tOld\tNew\n8862\tE000\tF000\n");

    let result = MappingRegistry::load(&two_table_config(&dir));
    match result {
        Err(Error::Io { path, .. }) => assert!(path.ends_with("new.json")),
        other => panic!("expected Io error, got {:?}", other),
    }
}

#[test]
fn test_malformed_json_is_fatal() {
    let dir = TempDir::new().unwrap();
    write(&dir, "old.tsv", "Big5\tOld\tNew\n8862\tE000\tF000\n");
    write(&dir, "new.json", r#"[{"codepoint": "F000", "char": "一""#);

    for parallel in [true, false] {
        let config = two_table_config(&dir).with_parallel_load(parallel);
        assert!(matches!(MappingRegistry::load(&config), Err(Error::Json { .. })));
    }
}

#[test]
fn test_json_with_wrong_shape_is_fatal() {
    let dir = TempDir::new().unwrap();
    write(&dir, "old.tsv", "Big5\tOld\tNew\n");
    write(&dir, "new.json", r#"{"F000": "一"}"#);

    let result = MappingRegistry::load(&two_table_config(&dir));
    assert!(matches!(result, Err(Error::InvalidTableShape { .. })));
}

#[test]
fn test_chain_from_disk() {
    let dir = TempDir::new().unwrap();
    write(&dir, "old.tsv", "Big5\tOld\tNew\n8862\tE000\tF000\n8863\tE001\t4E8C\n");
    write(&dir, "new.json", r#"[{"codepoint": "F000", "char": "一"}]"#);

    let registry = MappingRegistry::load(&two_table_config(&dir)).unwrap();
    let resolver = Resolver::new(&registry);
    assert_eq!(resolver.resolve_character("\u{E000}"), "一");
    assert_eq!(resolver.resolve_character("\u{E001}"), "二");
}

#[test]
fn test_drifted_header_uses_declared_columns() {
    let dir = TempDir::new().unwrap();
    // File renamed "New" to "Preferred"; the declared header still applies
    write(&dir, "old.tsv", "Big5\tOld\tPreferred\n8862\tE000\t4E00\n");
    write(&dir, "new.json", "[]");

    let registry = MappingRegistry::load(&two_table_config(&dir)).unwrap();
    assert_eq!(registry.table("old").unwrap().get("E000"), Some("4E00"));
    assert_eq!(registry.entry_count(), 1);
}

#[test]
fn test_renamed_header_does_not_become_an_entry() {
    let dir = TempDir::new().unwrap();
    // "B" and "C" read as hex, but the first line is still the file header
    write(&dir, "old.tsv", "A\tB\tC\n8862\tE000\t4E00\n");
    write(&dir, "new.json", "[]");

    let registry = MappingRegistry::load(&two_table_config(&dir)).unwrap();
    assert_eq!(registry.table("old").unwrap().len(), 1);

    let resolver = Resolver::new(&registry);
    assert_eq!(resolver.resolve_character("\u{000B}"), "\u{000B}");
    assert_eq!(resolver.resolve_character("\u{E000}"), "一");
}

#[test]
fn test_manifest_driven_tables() {
    let dir = TempDir::new().unwrap();
    write(&dir, "legacy.tsv", "Code\tAlt\tTarget\n1\tU+E000\tU+<00CA,0304>\n");

    let manifest = r#"[{"name": "legacy", "format": "tsv", "header": ["Code", "Alt", "Target"],
        "rule": {"from_columns": ["Alt"], "to_column": "Target"}}]"#;
    let config = ConverterConfig::new()
        .with_data_dir(dir.path())
        .with_tables(parse_manifest(manifest).unwrap());

    let registry = MappingRegistry::load(&config).unwrap();
    assert_eq!(Resolver::new(&registry).resolve_character("\u{E000}"), "\u{00CA}\u{0304}");
}
