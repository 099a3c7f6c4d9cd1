//! Compiles a mapping graph over a data source into a YARRRML document.

use crate::errors::{RdfMapError, RdfMapResult};
use crate::mapping::{MappingGraph, MappingNode};
use crate::source::{Source, SourceType};
use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Resolves a stored file uuid to the physical path of its content. The
/// surrounding application decides where files live; the compiler only
/// needs the path it can write into the document's `access` key.
pub trait FileResolver {
    fn file_path(&self, file_uuid: &str) -> RdfMapResult<PathBuf>;
}

/// Resolves uuids against a flat directory: either an exact file name match
/// or any file whose stem equals the uuid. Returned paths are absolute.
pub struct DirectoryFileResolver {
    root: PathBuf,
}

impl DirectoryFileResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryFileResolver { root: root.into() }
    }
}

impl FileResolver for DirectoryFileResolver {
    fn file_path(&self, file_uuid: &str) -> RdfMapResult<PathBuf> {
        let direct = self.root.join(file_uuid);
        if direct.is_file() {
            return absolute(direct);
        }
        if self.root.is_dir() {
            for entry in std::fs::read_dir(&self.root)? {
                let path = entry?.path();
                if path.is_file()
                    && path.file_stem().and_then(|s| s.to_str()) == Some(file_uuid)
                {
                    return absolute(path);
                }
            }
        }
        Err(RdfMapError::FileNotFound(file_uuid.to_string()))
    }
}

fn absolute(path: PathBuf) -> RdfMapResult<PathBuf> {
    if path.is_absolute() {
        Ok(path)
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// A YARRRML document. Field order is emission order; maps are sorted by
/// key, so serializing the same inputs always yields the same text.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct YarrrmlDocument {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub prefixes: BTreeMap<String, String>,
    pub sources: BTreeMap<String, SourceEntry>,
    pub mappings: BTreeMap<String, MappingEntry>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SourceEntry {
    pub access: String,
    #[serde(rename = "referenceFormulation")]
    pub reference_formulation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterator: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MappingEntry {
    pub source: String,
    pub s: String,
    pub po: Vec<PredicateObject>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PredicateObject {
    pub predicate: String,
    pub object: ObjectTerm,
}

/// An object term in a `po` entry: a bare IRI string for rdf:type rows, a
/// literal template with datatype, or a URI template marked `type: iri`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum ObjectTerm {
    Iri(String),
    Literal {
        value: String,
        datatype: String,
    },
    Reference {
        value: String,
        #[serde(rename = "type")]
        kind: String,
    },
}

/// Compiles mapping graphs to YARRRML text. A copy of each compiled
/// document is dropped into `temp_dir` for inspection; the returned string
/// is the contract.
pub struct YarrrmlCompiler {
    temp_dir: PathBuf,
}

impl YarrrmlCompiler {
    pub fn new(temp_dir: impl Into<PathBuf>) -> Self {
        YarrrmlCompiler {
            temp_dir: temp_dir.into(),
        }
    }

    pub fn compile(
        &self,
        prefixes: &BTreeMap<String, String>,
        source: &Source,
        graph: &MappingGraph,
        resolver: &dyn FileResolver,
    ) -> RdfMapResult<String> {
        let document = build_document(prefixes, source, graph, resolver)?;
        let text = serde_yaml::to_string(&document)
            .map_err(|e| RdfMapError::MalformedDocument(e.to_string()))?;

        std::fs::create_dir_all(&self.temp_dir)?;
        let file_name = format!("yarrrml-{}-{}.yml", graph.name, Utc::now().to_rfc3339());
        let temp_file = self.temp_dir.join(file_name);
        std::fs::write(&temp_file, &text)?;
        info!(
            "Compiled mapping \"{}\" to YARRRML at {:?}",
            graph.name, temp_file
        );

        Ok(text)
    }
}

fn build_document(
    prefixes: &BTreeMap<String, String>,
    source: &Source,
    graph: &MappingGraph,
    resolver: &dyn FileResolver,
) -> RdfMapResult<YarrrmlDocument> {
    let access = resolver
        .file_path(&source.file_uuid)?
        .to_string_lossy()
        .into_owned();
    let source_entry = match source.source_type {
        SourceType::Csv => SourceEntry {
            access,
            reference_formulation: "csv".to_string(),
            iterator: None,
        },
        SourceType::Json => {
            let iterator = source
                .json_path()
                .ok_or(RdfMapError::JsonPathMissing)?
                .to_string();
            SourceEntry {
                access,
                reference_formulation: "jsonpath".to_string(),
                iterator: Some(iterator),
            }
        }
    };
    let mut sources = BTreeMap::new();
    sources.insert("data".to_string(), source_entry);

    // every edge target must resolve, including edges no entity reaches
    for edge in &graph.edges {
        if graph.node_by_id(&edge.target).is_none() {
            return Err(RdfMapError::DanglingEdgeTarget {
                edge: edge.id.clone(),
                target: edge.target.clone(),
            });
        }
    }

    let mut mappings = BTreeMap::new();
    for node in &graph.nodes {
        let MappingNode::Entity {
            id,
            label,
            uri_pattern,
            rdf_type,
            ..
        } = node
        else {
            continue;
        };
        if uri_pattern.is_empty() {
            return Err(RdfMapError::EntityUriPatternMissing(label.clone()));
        }
        let mut po: Vec<PredicateObject> = rdf_type
            .iter()
            .map(|t| PredicateObject {
                predicate: "a".to_string(),
                object: ObjectTerm::Iri(t.clone()),
            })
            .collect();
        for edge in graph.outgoing_edges(id) {
            let target = graph.node_by_id(&edge.target).ok_or_else(|| {
                RdfMapError::DanglingEdgeTarget {
                    edge: edge.id.clone(),
                    target: edge.target.clone(),
                }
            })?;
            let object = match target {
                MappingNode::Literal {
                    id: target_id,
                    value,
                    literal_type,
                    ..
                } => {
                    if value.is_empty() {
                        return Err(RdfMapError::LiteralValueMissing(target_id.clone()));
                    }
                    ObjectTerm::Literal {
                        value: value.clone(),
                        datatype: literal_type.clone(),
                    }
                }
                MappingNode::UriRef {
                    id: target_id,
                    uri_pattern,
                } => {
                    if uri_pattern.is_empty() {
                        return Err(RdfMapError::UriPatternMissing(target_id.clone()));
                    }
                    ObjectTerm::Reference {
                        value: uri_pattern.clone(),
                        kind: "iri".to_string(),
                    }
                }
                MappingNode::Entity {
                    id: target_id,
                    uri_pattern,
                    ..
                } => {
                    if uri_pattern.is_empty() {
                        return Err(RdfMapError::UriPatternMissing(target_id.clone()));
                    }
                    ObjectTerm::Reference {
                        value: uri_pattern.clone(),
                        kind: "iri".to_string(),
                    }
                }
            };
            po.push(PredicateObject {
                predicate: edge.source_handle.clone(),
                object,
            });
        }
        mappings.insert(
            id.clone(),
            MappingEntry {
                source: "data".to_string(),
                s: uri_pattern.clone(),
                po,
            },
        );
    }

    Ok(YarrrmlDocument {
        prefixes: prefixes.clone(),
        sources,
        mappings,
    })
}
