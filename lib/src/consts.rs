//! Defines constant NamedNodeRefs for commonly used OWL, RDF, RDFS and XSD
//! terms, plus the fixed SPARQL queries that drive ontology indexing.

use oxigraph::model::NamedNodeRef;

// owl
pub const OWL_CLASS: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Class");
pub const OBJECT_PROPERTY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#ObjectProperty");
pub const DATATYPE_PROPERTY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#DatatypeProperty");
pub const ANNOTATION_PROPERTY: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#AnnotationProperty");
pub const NAMED_INDIVIDUAL: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#NamedIndividual");
pub const DEPRECATED: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#deprecated");
// rdf
pub const TYPE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#type");
pub const LANG_STRING: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/1999/02/22-rdf-syntax-ns#langString");
// rdfs
pub const RDFS_CLASS: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#Class");
pub const LABEL: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#label");
pub const COMMENT: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#comment");
pub const SUB_CLASS_OF: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#subClassOf");
pub const RANGE: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#range");
pub const DOMAIN: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2000/01/rdf-schema#domain");
// xsd
pub const XSD_STRING: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#string");
pub const XSD_BOOLEAN: NamedNodeRef<'_> =
    NamedNodeRef::new_unchecked("http://www.w3.org/2001/XMLSchema#boolean");

// placeholders substituted into the parametrized queries below
pub const CLASS_URI_MARKER: &str = "___class_uri___";
pub const PROPERTY_URI_MARKER: &str = "___property_uri___";

pub const QUERY_CLASSES: &str = "
PREFIX owl: <http://www.w3.org/2002/07/owl#>
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>

SELECT DISTINCT ?class ?label ?description ?isDeprecated
WHERE {
    ?class a ?type .
    FILTER (?type = owl:Class || ?type = rdfs:Class)
    FILTER (!isBlank(?class))
    OPTIONAL { ?class rdfs:label ?label }
    OPTIONAL { ?class rdfs:comment ?description }
    OPTIONAL { ?class owl:deprecated ?isDeprecated }
}
";

pub const QUERY_SUPER_CLASSES: &str = "
PREFIX owl: <http://www.w3.org/2002/07/owl#>
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>

SELECT DISTINCT ?superClass
WHERE {
    <___class_uri___> rdfs:subClassOf* ?superClass .
    FILTER (!isBlank(?superClass)) .
}
";

pub const QUERY_PROPERTIES: &str = "
PREFIX owl: <http://www.w3.org/2002/07/owl#>
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>

SELECT DISTINCT ?property ?label ?description ?isDeprecated ?propertyType
WHERE {
    ?property a ?propertyType .
    FILTER (?propertyType = owl:ObjectProperty || ?propertyType = owl:DatatypeProperty || ?propertyType = owl:AnnotationProperty)
    FILTER (!isBlank(?property))
    OPTIONAL { ?property rdfs:label ?label }
    OPTIONAL { ?property rdfs:comment ?description }
    OPTIONAL { ?property owl:deprecated ?isDeprecated }
}
";

pub const QUERY_PROPERTY_RANGE: &str = "
PREFIX owl: <http://www.w3.org/2002/07/owl#>
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>

SELECT DISTINCT ?range
WHERE {
    <___property_uri___> rdfs:range ?range .
    FILTER (!isBlank(?range)) .
}
";

pub const QUERY_PROPERTY_DOMAIN: &str = "
PREFIX owl: <http://www.w3.org/2002/07/owl#>
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>

SELECT DISTINCT ?domain
WHERE {
    <___property_uri___> rdfs:domain ?domain .
    FILTER (!isBlank(?domain)) .
}
";

pub const QUERY_INDIVIDUALS: &str = "
PREFIX owl: <http://www.w3.org/2002/07/owl#>
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>

SELECT DISTINCT ?individual ?label ?description ?isDeprecated
WHERE {
    ?individual a owl:NamedIndividual .
    FILTER (!isBlank(?individual))
    OPTIONAL { ?individual rdfs:label ?label }
    OPTIONAL { ?individual rdfs:comment ?description }
    OPTIONAL { ?individual owl:deprecated ?isDeprecated }
}
";
