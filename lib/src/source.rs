//! Defines data source descriptors and the reference (schema) extraction
//! that derives them from CSV and JSON content.

use crate::errors::{RdfMapError, RdfMapResult};
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// The kind of file a source maps over.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Csv,
    Json,
}

/// A data source descriptor. `references` are the field names offered to the
/// mapping editor (CSV column names, or dotted value paths for JSON);
/// `file_uuid` names the stored file the source maps over.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Source {
    pub uuid: String,
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub references: Vec<String>,
    pub file_uuid: String,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

impl Source {
    /// Builds a source descriptor from raw file content, extracting its
    /// references. JSON sources must carry a `json_path` entry in `extra`
    /// naming the record array to map over.
    pub fn create(
        source_type: SourceType,
        content: &[u8],
        file_uuid: impl Into<String>,
        extra: BTreeMap<String, String>,
    ) -> RdfMapResult<Source> {
        let references = extract_references(
            source_type,
            content,
            extra.get("json_path").map(|s| s.as_str()),
        )?;
        info!("Extracted references: {:?}", references);
        Ok(Source {
            uuid: Uuid::new_v4().to_string(),
            source_type,
            references,
            file_uuid: file_uuid.into(),
            extra,
        })
    }

    pub fn from_json(s: &str) -> RdfMapResult<Self> {
        serde_json::from_str(s).map_err(|e| RdfMapError::MalformedDocument(e.to_string()))
    }

    pub fn to_json(&self) -> RdfMapResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RdfMapError::MalformedDocument(e.to_string()))
    }

    pub fn json_path(&self) -> Option<&str> {
        self.extra.get("json_path").map(|s| s.as_str())
    }
}

/// Extracts the reference names a mapping can use from raw source content.
/// CSV sources yield their header record; JSON sources yield the sorted
/// union of dotted leaf paths across the records selected by `json_path`.
pub fn extract_references(
    source_type: SourceType,
    content: &[u8],
    json_path: Option<&str>,
) -> RdfMapResult<Vec<String>> {
    match source_type {
        SourceType::Csv => csv_references(content),
        SourceType::Json => {
            let path = json_path.ok_or(RdfMapError::JsonPathMissing)?;
            json_references(content, path)
        }
    }
}

fn csv_references(content: &[u8]) -> RdfMapResult<Vec<String>> {
    let mut reader = csv::Reader::from_reader(content);
    let headers = reader
        .headers()
        .map_err(|e| RdfMapError::MalformedDocument(e.to_string()))?;
    Ok(headers.iter().map(|h| h.to_string()).collect())
}

fn json_references(content: &[u8], json_path: &str) -> RdfMapResult<Vec<String>> {
    let document: Value = serde_json::from_slice(content)
        .map_err(|e| RdfMapError::MalformedDocument(e.to_string()))?;
    let records = select_records(&document, json_path)?;
    let mut paths = BTreeSet::new();
    for record in records {
        collect_paths(record, "", &mut paths);
    }
    Ok(paths.into_iter().collect())
}

/// Narrows a JSON document to the records named by `json_path` and returns
/// them as a list, wrapping a single selected object. An empty selection is
/// an error: the path is expected to name the data to map over.
pub fn select_records<'a>(document: &'a Value, json_path: &str) -> RdfMapResult<Vec<&'a Value>> {
    let selected = eval_json_path(document, json_path)
        .ok_or_else(|| RdfMapError::JsonPathNoMatch(json_path.to_string()))?;
    match selected {
        Value::Array(items) => Ok(items.iter().collect()),
        other => Ok(vec![other]),
    }
}

// Path grammar: optional leading `$`, dot-separated keys, `[n]` indexes and
// a `[*]` wildcard. The wildcard selects the first element of an array (the
// first match); point the path at the array itself to select all records.
fn eval_json_path<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = document;
    let trimmed = path.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    for raw in trimmed.split('.') {
        let mut seg = raw.trim();
        while !seg.is_empty() {
            if let Some(rest) = seg.strip_prefix('[') {
                let close = rest.find(']')?;
                let index = rest[..close].trim();
                if index == "*" {
                    current = current.as_array()?.first()?;
                } else {
                    let i: usize = index.parse().ok()?;
                    current = current.get(i)?;
                }
                seg = &rest[close + 1..];
            } else {
                let end = seg.find('[').unwrap_or(seg.len());
                current = current.get(&seg[..end])?;
                seg = &seg[end..];
            }
        }
    }
    Some(current)
}

fn collect_paths(value: &Value, prefix: &str, out: &mut BTreeSet<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                collect_paths(child, &format!("{}.{}", prefix, key), out);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                collect_paths(child, &format!("{}[{}]", prefix, i), out);
            }
        }
        _ => {
            let path = prefix.strip_prefix('.').unwrap_or(prefix);
            out.insert(path.to_string());
        }
    }
}
