//! Defines the visual mapping graph model: typed nodes, edges between their
//! handles, and the graph document that carries them.

use crate::errors::{RdfMapError, RdfMapResult};
use serde::{Deserialize, Serialize};

/// A node in a mapping graph. The serialized `type` tag selects the variant;
/// a document with an unknown or missing tag does not deserialize. Editor
/// fields outside the model (such as canvas positions) are ignored.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum MappingNode {
    /// A subject with a URI pattern, rdf:type assertions and the ontology
    /// properties offered for its outgoing edges.
    #[serde(rename = "entity")]
    Entity {
        id: String,
        label: String,
        uri_pattern: String,
        #[serde(default)]
        rdf_type: Vec<String>,
        #[serde(default)]
        properties: Vec<String>,
    },
    /// A literal object with a value template and datatype.
    #[serde(rename = "literal")]
    Literal {
        id: String,
        label: String,
        value: String,
        literal_type: String,
    },
    /// A URI-valued object with a URI pattern.
    #[serde(rename = "uri_ref")]
    UriRef { id: String, uri_pattern: String },
}

impl MappingNode {
    pub fn id(&self) -> &str {
        match self {
            MappingNode::Entity { id, .. } => id,
            MappingNode::Literal { id, .. } => id,
            MappingNode::UriRef { id, .. } => id,
        }
    }
}

/// A directed edge between two node handles. `source_handle` carries the
/// predicate URI the edge asserts.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MappingEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub source_handle: String,
    pub target_handle: String,
}

/// A mapping graph document: nodes, edges and the source they map over.
/// Graphs are replaced wholesale; endpoint resolution is checked when the
/// graph is compiled, not when it is edited.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct MappingGraph {
    pub uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub source_id: String,
    pub nodes: Vec<MappingNode>,
    pub edges: Vec<MappingEdge>,
}

impl MappingGraph {
    pub fn from_json(s: &str) -> RdfMapResult<Self> {
        serde_json::from_str(s).map_err(|e| RdfMapError::MalformedDocument(e.to_string()))
    }

    pub fn to_json(&self) -> RdfMapResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RdfMapError::MalformedDocument(e.to_string()))
    }

    pub fn node_by_id(&self, id: &str) -> Option<&MappingNode> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// Edges leaving the given node, in document order.
    pub fn outgoing_edges(&self, node_id: &str) -> Vec<&MappingEdge> {
        self.edges.iter().filter(|e| e.source == node_id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_graph() -> MappingGraph {
        MappingGraph {
            uuid: "g-1".to_string(),
            name: "people".to_string(),
            description: String::new(),
            source_id: "s-1".to_string(),
            nodes: vec![
                MappingNode::Entity {
                    id: "n-1".to_string(),
                    label: "Person".to_string(),
                    uri_pattern: "ex:person/{id}".to_string(),
                    rdf_type: vec!["ex:Person".to_string()],
                    properties: vec![],
                },
                MappingNode::Literal {
                    id: "n-2".to_string(),
                    label: "name".to_string(),
                    value: "{name}".to_string(),
                    literal_type: "xsd:string".to_string(),
                },
            ],
            edges: vec![MappingEdge {
                id: "e-1".to_string(),
                source: "n-1".to_string(),
                target: "n-2".to_string(),
                source_handle: "ex:name".to_string(),
                target_handle: "n-2-in".to_string(),
            }],
        }
    }

    #[test]
    fn test_graph_round_trip() {
        let graph = sample_graph();
        let text = graph.to_json().unwrap();
        let back = MappingGraph::from_json(&text).unwrap();
        assert_eq!(graph, back);
    }

    #[test]
    fn test_node_tag_dispatch() {
        let doc = r#"{"type": "uri_ref", "id": "n-9", "uri_pattern": "ex:thing/{id}"}"#;
        let node: MappingNode = serde_json::from_str(doc).unwrap();
        assert!(matches!(node, MappingNode::UriRef { .. }));
        assert_eq!(node.id(), "n-9");
    }

    #[test]
    fn test_editor_fields_ignored() {
        let doc = r#"{
            "type": "literal",
            "id": "n-2",
            "label": "name",
            "value": "{name}",
            "literal_type": "xsd:string",
            "position": {"x": 120, "y": 40}
        }"#;
        let node: MappingNode = serde_json::from_str(doc).unwrap();
        assert!(matches!(node, MappingNode::Literal { .. }));
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let doc = r#"{"type": "entity", "id": "n-1", "label": "Person"}"#;
        assert!(serde_json::from_str::<MappingNode>(doc).is_err());
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let doc = r#"{"type": "circle", "id": "n-1"}"#;
        assert!(serde_json::from_str::<MappingNode>(doc).is_err());
    }

    #[test]
    fn test_node_by_id_and_outgoing_edges() {
        let graph = sample_graph();
        assert!(graph.node_by_id("n-2").is_some());
        assert!(graph.node_by_id("n-404").is_none());
        let edges = graph.outgoing_edges("n-1");
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].source_handle, "ex:name");
        assert!(graph.outgoing_edges("n-2").is_empty());
    }

    #[test]
    fn test_malformed_graph_document() {
        let err = MappingGraph::from_json("{\"uuid\": \"g\"}").unwrap_err();
        assert!(matches!(err, RdfMapError::MalformedDocument(_)));
    }
}
