//! Error types for ontology indexing, mapping compilation and RML execution.

use thiserror::Error;

/// Errors produced by the rdfmap library
#[derive(Debug, Error)]
pub enum RdfMapError {
    /// The document bytes could not be parsed in any supported RDF format
    #[error("Failed to parse RDF document in any supported format")]
    ParseFailure,

    /// Lookup of an ontology, or of a term within one, came up empty
    #[error("Ontology not found: {0}")]
    OntologyNotFound(String),

    /// A property is asserted with a class outside the supported OWL set
    #[error("Property {property} has unsupported type {asserted}")]
    UnsupportedPropertyAssertion { property: String, asserted: String },

    /// An entity node has no subject URI pattern
    #[error("Entity node \"{0}\" has no URI pattern")]
    EntityUriPatternMissing(String),

    /// A literal node used as an object has no value
    #[error("Literal node \"{0}\" has no value")]
    LiteralValueMissing(String),

    /// A node used as an IRI object has no URI pattern
    #[error("Node \"{0}\" has no URI pattern")]
    UriPatternMissing(String),

    /// An edge references a target node id absent from the graph
    #[error("Edge \"{edge}\" targets unknown node \"{target}\"")]
    DanglingEdgeTarget { edge: String, target: String },

    /// A JSON source descriptor carries no json_path entry
    #[error("JSON source has no json_path")]
    JsonPathMissing,

    /// The json_path selected nothing from the document
    #[error("json_path \"{0}\" selected no data")]
    JsonPathNoMatch(String),

    /// An external tool required for execution could not be found
    #[error("Runtime not available: {0}")]
    RuntimeNotAvailable(String),

    /// The RML processor exited nonzero; payload is its stderr
    #[error("RML mapping execution failed: {stderr}")]
    MappingExecutionFailure { stderr: String },

    /// The YARRRML-to-RML translator exited nonzero; payload is its stderr
    #[error("YARRRML translation failed: {stderr}")]
    TranslationFailure { stderr: String },

    /// A model document failed to (de)serialize
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// The SPARQL engine rejected or failed a query
    #[error("Query failed: {0}")]
    Query(String),

    /// No file is known for the given uuid
    #[error("No file found for uuid {0}")]
    FileNotFound(String),

    #[error(transparent)]
    Store(#[from] oxigraph::store::StorageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for rdfmap operations
pub type RdfMapResult<T> = Result<T, RdfMapError>;
