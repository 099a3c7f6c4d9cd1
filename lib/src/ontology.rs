//! Defines the data structures produced by ontology indexing: literals,
//! classes, properties, individuals and the `Ontology` record that groups them.

use crate::consts;
use crate::errors::{RdfMapError, RdfMapResult};
use oxigraph::model::Literal as OxLiteral;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

fn default_language() -> String {
    "en".to_string()
}

/// A literal captured from the ontology graph. The language tag defaults to
/// "en"; the datatype is carried only when the literal asserts one beyond
/// plain or language-tagged strings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Literal {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Literal {
    pub fn new(value: impl Into<String>) -> Self {
        Literal {
            value: value.into(),
            datatype: None,
            language: default_language(),
        }
    }

    /// Converts an oxigraph literal term. Language-tagged literals keep
    /// their tag; string-typed literals carry no datatype.
    pub fn from_term(lit: &OxLiteral) -> Self {
        let language = lit.language().unwrap_or("en").to_string();
        let datatype = match lit.datatype() {
            dt if dt == consts::XSD_STRING || dt == consts::LANG_STRING => None,
            dt => Some(dt.as_str().to_string()),
        };
        Literal {
            value: lit.value().to_string(),
            datatype,
            language,
        }
    }
}

/// The kind tag carried by every indexed term document.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NamedNodeType {
    Class,
    Property,
    Individual,
}

/// The asserted OWL property class. Closed set; anything else observed in
/// the graph is rejected during indexing.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Object,
    Datatype,
    Annotation,
}

// type-tag validators: a document whose tag disagrees with the struct it is
// being read into is malformed
fn class_tag_de<'de, D>(deserializer: D) -> Result<NamedNodeType, D::Error>
where
    D: Deserializer<'de>,
{
    match NamedNodeType::deserialize(deserializer)? {
        NamedNodeType::Class => Ok(NamedNodeType::Class),
        other => Err(serde::de::Error::custom(format!(
            "expected type tag \"class\", got {:?}",
            other
        ))),
    }
}

fn property_tag_de<'de, D>(deserializer: D) -> Result<NamedNodeType, D::Error>
where
    D: Deserializer<'de>,
{
    match NamedNodeType::deserialize(deserializer)? {
        NamedNodeType::Property => Ok(NamedNodeType::Property),
        other => Err(serde::de::Error::custom(format!(
            "expected type tag \"property\", got {:?}",
            other
        ))),
    }
}

fn individual_tag_de<'de, D>(deserializer: D) -> Result<NamedNodeType, D::Error>
where
    D: Deserializer<'de>,
{
    match NamedNodeType::deserialize(deserializer)? {
        NamedNodeType::Individual => Ok(NamedNodeType::Individual),
        other => Err(serde::de::Error::custom(format!(
            "expected type tag \"individual\", got {:?}",
            other
        ))),
    }
}

/// A class indexed from an ontology, with its full transitive superclass
/// closure (the class itself excluded).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Class {
    pub belongs_to: String,
    #[serde(rename = "type", deserialize_with = "class_tag_de")]
    node_type: NamedNodeType,
    pub full_uri: String,
    #[serde(default)]
    pub label: Vec<Literal>,
    #[serde(default)]
    pub description: Vec<Literal>,
    #[serde(default)]
    pub super_classes: Vec<String>,
    #[serde(default)]
    pub is_deprecated: bool,
}

impl Class {
    pub fn new(belongs_to: impl Into<String>, full_uri: impl Into<String>) -> Self {
        Class {
            belongs_to: belongs_to.into(),
            node_type: NamedNodeType::Class,
            full_uri: full_uri.into(),
            label: vec![],
            description: vec![],
            super_classes: vec![],
            is_deprecated: false,
        }
    }

    pub fn node_type(&self) -> NamedNodeType {
        self.node_type
    }
}

/// A property indexed from an ontology, with its asserted kind and the
/// distinct range/domain class URIs.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Property {
    pub belongs_to: String,
    #[serde(rename = "type", deserialize_with = "property_tag_de")]
    node_type: NamedNodeType,
    pub full_uri: String,
    #[serde(default)]
    pub label: Vec<Literal>,
    #[serde(default)]
    pub description: Vec<Literal>,
    pub property_type: PropertyType,
    #[serde(default)]
    pub range: Vec<String>,
    #[serde(default)]
    pub domain: Vec<String>,
    #[serde(default)]
    pub is_deprecated: bool,
}

impl Property {
    pub fn new(
        belongs_to: impl Into<String>,
        full_uri: impl Into<String>,
        property_type: PropertyType,
    ) -> Self {
        Property {
            belongs_to: belongs_to.into(),
            node_type: NamedNodeType::Property,
            full_uri: full_uri.into(),
            label: vec![],
            description: vec![],
            property_type,
            range: vec![],
            domain: vec![],
            is_deprecated: false,
        }
    }

    pub fn node_type(&self) -> NamedNodeType {
        self.node_type
    }
}

/// A named individual indexed from an ontology.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Individual {
    pub belongs_to: String,
    #[serde(rename = "type", deserialize_with = "individual_tag_de")]
    node_type: NamedNodeType,
    pub full_uri: String,
    #[serde(default)]
    pub label: Vec<Literal>,
    #[serde(default)]
    pub description: Vec<Literal>,
    #[serde(default)]
    pub is_deprecated: bool,
}

impl Individual {
    pub fn new(belongs_to: impl Into<String>, full_uri: impl Into<String>) -> Self {
        Individual {
            belongs_to: belongs_to.into(),
            node_type: NamedNodeType::Individual,
            full_uri: full_uri.into(),
            label: vec![],
            description: vec![],
            is_deprecated: false,
        }
    }

    pub fn node_type(&self) -> NamedNodeType {
        self.node_type
    }
}

/// The indexed form of one ontology document. The member lists are derived
/// from the RDF graph by the indexer and are recomputed, never hand-edited.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Ontology {
    pub uuid: String,
    pub file_uuid: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_uri: String,
    #[serde(default)]
    pub classes: Vec<Class>,
    #[serde(default)]
    pub individuals: Vec<Individual>,
    #[serde(default)]
    pub properties: Vec<Property>,
}

impl std::fmt::Display for Ontology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Ontology: {} <{}>", self.name, self.base_uri)?;
        if !self.description.is_empty() {
            writeln!(f, "  {}", self.description)?;
        }
        writeln!(f, "  classes: {}", self.classes.len())?;
        writeln!(f, "  properties: {}", self.properties.len())?;
        write!(f, "  individuals: {}", self.individuals.len())
    }
}

impl Ontology {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        base_uri: impl Into<String>,
        file_uuid: impl Into<String>,
    ) -> Self {
        Ontology {
            uuid: Uuid::new_v4().to_string(),
            file_uuid: file_uuid.into(),
            name: name.into(),
            description: description.into(),
            base_uri: base_uri.into(),
            classes: vec![],
            individuals: vec![],
            properties: vec![],
        }
    }

    pub fn from_json(s: &str) -> RdfMapResult<Self> {
        serde_json::from_str(s).map_err(|e| RdfMapError::MalformedDocument(e.to_string()))
    }

    pub fn to_json(&self) -> RdfMapResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| RdfMapError::MalformedDocument(e.to_string()))
    }

    pub fn find_class(&self, uri: &str) -> Option<&Class> {
        self.classes.iter().find(|c| c.full_uri == uri)
    }

    pub fn find_property(&self, uri: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.full_uri == uri)
    }

    pub fn find_individual(&self, uri: &str) -> Option<&Individual> {
        self.individuals.iter().find(|i| i.full_uri == uri)
    }
}

/// Looks an ontology up by name, base URI or uuid within a loaded catalog.
pub fn find_ontology<'a>(catalog: &'a [Ontology], key: &str) -> RdfMapResult<&'a Ontology> {
    catalog
        .iter()
        .find(|o| o.name == key || o.base_uri == key || o.uuid == key)
        .ok_or_else(|| RdfMapError::OntologyNotFound(key.to_string()))
}
