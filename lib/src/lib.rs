pub mod compiler;
pub mod config;
pub mod consts;
pub mod errors;
pub mod executor;
pub mod indexer;
pub mod loader;
pub mod mapping;
pub mod ontology;
pub mod source;

pub use compiler::{DirectoryFileResolver, FileResolver, YarrrmlCompiler};
pub use config::{Config, ConfigBuilder};
pub use errors::{RdfMapError, RdfMapResult};
pub use executor::{MaterializedMapping, RmlMapper};
pub use loader::{format_from_path, load_rdf_bytes};
pub use mapping::{MappingEdge, MappingGraph, MappingNode};
pub use ontology::{find_ontology, Class, Individual, Literal, Ontology, Property, PropertyType};
pub use source::{Source, SourceType};

/// Initializes logging for the rdfmap library.
///
/// This function checks for the `RDFMAP_LOG` environment variable. If it is set,
/// `RUST_LOG` is set to its value. `RDFMAP_LOG` takes precedence over `RUST_LOG`.
/// The logger initialization (e.g., `env_logger::init()`) must be called after
/// this function for the log level to take effect.
pub fn init_logging() {
    if let Ok(log_level) = std::env::var("RDFMAP_LOG") {
        std::env::set_var("RUST_LOG", log_level);
    }
}
