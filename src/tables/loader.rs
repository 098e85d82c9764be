//! Table loader.
//!
//! Turns a table source (tab-separated rows or a JSON array of objects) into
//! a sequence of [`RawRecord`]s. Any failure here is fatal for the table:
//! there is no partial-table recovery.

use super::descriptor::{SourceFormat, TableDescriptor};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;

/// One row of a source table: column name to cell value, in column order.
pub type RawRecord = IndexMap<String, String>;

/// Field separator of row-oriented tables.
const FIELD_SEPARATOR: char = '\t';

/// Read a table from `data_dir` and parse it into records.
pub fn load_records(descriptor: &TableDescriptor, data_dir: &Path) -> Result<Vec<RawRecord>> {
    let path = data_dir.join(descriptor.file_name());
    let content = std::fs::read_to_string(&path).map_err(|source| Error::Io {
        path: path.clone(),
        source,
    })?;

    let records = parse_records(descriptor, &content)?;
    log::debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Parse in-memory table text according to the descriptor's format.
pub fn parse_records(descriptor: &TableDescriptor, content: &str) -> Result<Vec<RawRecord>> {
    match descriptor.format {
        SourceFormat::Tsv => parse_tsv(descriptor, content),
        SourceFormat::Json => parse_json(descriptor, content),
    }
}

/// Parse tab-separated rows, zipping each against the declared header.
///
/// The file's first line is always its own header and is dropped; the
/// declared header is authoritative, so a drifted file header is only logged.
fn parse_tsv(descriptor: &TableDescriptor, content: &str) -> Result<Vec<RawRecord>> {
    if descriptor.header.is_empty() {
        return Err(Error::MissingHeader {
            table: descriptor.name.clone(),
        });
    }

    let mut lines = content.split('\n').map(|line| line.trim_end_matches('\r'));

    if let Some(file_header) = lines.next() {
        let cells: Vec<&str> = file_header.split(FIELD_SEPARATOR).map(str::trim).collect();
        if cells != descriptor.header {
            log::warn!(
                "{}: file header {:?} differs from declared {:?}",
                descriptor.name,
                cells,
                descriptor.header
            );
        }
    }

    let mut records = Vec::new();
    for (index, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let cells: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if cells.len() != descriptor.header.len() {
            log::debug!(
                "{}: row {} has {} fields, header declares {}",
                descriptor.name,
                index + 1,
                cells.len(),
                descriptor.header.len()
            );
        }

        let record: RawRecord = descriptor
            .header
            .iter()
            .zip(cells)
            .map(|(column, cell)| (column.clone(), cell.to_string()))
            .collect();
        records.push(record);
    }

    Ok(records)
}

/// Parse a JSON array of flat objects.
///
/// Only string-valued fields become cells; anything else is left out of the
/// record, so the normalizer treats it as missing.
fn parse_json(descriptor: &TableDescriptor, content: &str) -> Result<Vec<RawRecord>> {
    let root: Value = serde_json::from_str(content).map_err(|source| Error::Json {
        table: descriptor.name.clone(),
        source,
    })?;

    let elements = match root {
        Value::Array(elements) => elements,
        _ => {
            return Err(Error::InvalidTableShape {
                table: descriptor.name.clone(),
                reason: "root is not an array".to_string(),
            })
        },
    };

    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| match element {
            Value::Object(fields) => Ok(fields
                .into_iter()
                .filter_map(|(column, value)| match value {
                    Value::String(cell) => Some((column, cell)),
                    _ => None,
                })
                .collect()),
            _ => Err(Error::InvalidTableShape {
                table: descriptor.name.clone(),
                reason: format!("element {} is not an object", index),
            }),
        })
        .collect()
}
