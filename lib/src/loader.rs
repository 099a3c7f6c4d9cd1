//! Loads RDF documents of unknown serialization into an in-memory store.

use crate::errors::{RdfMapError, RdfMapResult};
use log::{debug, warn};
use oxigraph::io::{JsonLdProfileSet, RdfFormat, RdfParser};
use oxigraph::store::Store;
use std::path::Path;

/// Formats attempted against an unknown document, in order. Turtle is the
/// primary guess; the rest are the other serializations the store can parse.
fn format_candidates() -> Vec<RdfFormat> {
    vec![
        RdfFormat::Turtle,
        RdfFormat::JsonLd {
            profile: JsonLdProfileSet::default(),
        },
        RdfFormat::N3,
        RdfFormat::NQuads,
        RdfFormat::NTriples,
        RdfFormat::TriG,
        RdfFormat::RdfXml,
    ]
}

/// Guesses a parse format from a file extension, for use as the preferred
/// candidate when the bytes came from a named file.
pub fn format_from_path(path: &Path) -> Option<RdfFormat> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("ttl") | Some("turtle") => Some(RdfFormat::Turtle),
        Some("jsonld") => Some(RdfFormat::JsonLd {
            profile: JsonLdProfileSet::default(),
        }),
        Some("n3") => Some(RdfFormat::N3),
        Some("nq") => Some(RdfFormat::NQuads),
        Some("nt") => Some(RdfFormat::NTriples),
        Some("trig") => Some(RdfFormat::TriG),
        Some("xml") | Some("rdf") | Some("owl") => Some(RdfFormat::RdfXml),
        _ => None,
    }
}

/// Parses `bytes` into the default graph of a fresh in-memory store.
///
/// Candidates are attempted in a fixed order (preferred format first when
/// given); the first successful parse wins and later candidates are never
/// consulted. If every candidate fails the document is rejected.
pub fn load_rdf_bytes(bytes: &[u8], preferred: Option<RdfFormat>) -> RdfMapResult<Store> {
    let mut candidates = format_candidates();
    if let Some(p) = preferred {
        candidates.retain(|f| *f != p);
        candidates.insert(0, p);
    }
    let store = Store::new()?;
    for fmt in candidates {
        debug!("Attempting to parse document as {:?}", fmt);
        // Named graphs are rejected so a quad-bearing document falls
        // through to the next candidate instead of loading partially.
        let parser = RdfParser::from_format(fmt).without_named_graphs();
        let mut loader = store.bulk_loader();
        match loader.load_from_reader(parser, std::io::Cursor::new(bytes)) {
            Ok(_) => {
                loader.commit()?;
                return Ok(store);
            }
            Err(_) => continue,
        }
    }
    warn!("Document does not parse in any supported RDF format");
    Err(RdfMapError::ParseFailure)
}
