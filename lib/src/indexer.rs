//! Indexes an RDF ontology graph into class, property and individual models
//! by running a fixed set of SPARQL queries against an oxigraph store.

use crate::consts::{
    ANNOTATION_PROPERTY, CLASS_URI_MARKER, DATATYPE_PROPERTY, OBJECT_PROPERTY,
    PROPERTY_URI_MARKER, QUERY_CLASSES, QUERY_INDIVIDUALS, QUERY_PROPERTIES,
    QUERY_PROPERTY_DOMAIN, QUERY_PROPERTY_RANGE, QUERY_SUPER_CLASSES,
};
use crate::errors::{RdfMapError, RdfMapResult};
use crate::ontology::{Class, Individual, Literal, Ontology, Property, PropertyType};
use log::{debug, info};
use oxigraph::model::Term;
use oxigraph::sparql::{QueryResults, QuerySolution, SparqlEvaluator};
use oxigraph::store::Store;
use std::collections::HashMap;

fn run_select(store: &Store, query: &str) -> RdfMapResult<Vec<QuerySolution>> {
    let prepared = SparqlEvaluator::new()
        .parse_query(query)
        .map_err(|e| RdfMapError::Query(e.to_string()))?;
    match prepared.on_store(store).execute() {
        Ok(QueryResults::Solutions(solutions)) => solutions
            .map(|row| row.map_err(|e| RdfMapError::Query(e.to_string())))
            .collect(),
        Ok(_) => Err(RdfMapError::Query(
            "query did not produce a SELECT result".to_string(),
        )),
        Err(e) => Err(RdfMapError::Query(e.to_string())),
    }
}

fn named_node_binding(row: &QuerySolution, name: &str) -> Option<String> {
    match row.get(name) {
        Some(Term::NamedNode(node)) => Some(node.as_str().to_string()),
        _ => None,
    }
}

fn literal_binding(row: &QuerySolution, name: &str) -> Option<Literal> {
    match row.get(name) {
        Some(Term::Literal(lit)) => Some(Literal::from_term(lit)),
        _ => None,
    }
}

// owl:deprecated is usually an xsd:boolean literal; plain "true"/"1" strings
// count as well
fn deprecated_binding(row: &QuerySolution) -> Option<bool> {
    match row.get("isDeprecated") {
        Some(Term::Literal(lit)) => Some(matches!(lit.value(), "true" | "1")),
        _ => None,
    }
}

fn super_classes_of(store: &Store, class_uri: &str) -> RdfMapResult<Vec<String>> {
    let query = QUERY_SUPER_CLASSES.replace(CLASS_URI_MARKER, class_uri);
    let rows = run_select(store, &query)?;
    let mut super_classes: Vec<String> = rows
        .iter()
        .filter_map(|row| named_node_binding(row, "superClass"))
        .collect();
    // rdfs:subClassOf* always reaches the class itself
    if let Some(position) = super_classes.iter().position(|uri| uri == class_uri) {
        super_classes.remove(position);
    }
    Ok(super_classes)
}

fn property_values_of(
    store: &Store,
    template: &str,
    property_uri: &str,
    variable: &str,
) -> RdfMapResult<Vec<String>> {
    let query = template.replace(PROPERTY_URI_MARKER, property_uri);
    let rows = run_select(store, &query)?;
    Ok(rows
        .iter()
        .filter_map(|row| named_node_binding(row, variable))
        .collect())
}

fn asserted_property_type(row: &QuerySolution, property_uri: &str) -> RdfMapResult<PropertyType> {
    let asserted = named_node_binding(row, "propertyType").unwrap_or_default();
    if asserted == OBJECT_PROPERTY.as_str() {
        Ok(PropertyType::Object)
    } else if asserted == DATATYPE_PROPERTY.as_str() {
        Ok(PropertyType::Datatype)
    } else if asserted == ANNOTATION_PROPERTY.as_str() {
        Ok(PropertyType::Annotation)
    } else {
        Err(RdfMapError::UnsupportedPropertyAssertion {
            property: property_uri.to_string(),
            asserted,
        })
    }
}

/// Collects every `owl:Class` / `rdfs:Class` subject in the graph together
/// with its labels, comments, transitive superclasses and deprecation flag.
/// A subject with several labels or comments yields one query row per
/// combination; every bound literal is appended to the model in row order,
/// duplicates included.
pub fn index_classes(store: &Store, ontology_uri: &str) -> RdfMapResult<Vec<Class>> {
    let rows = run_select(store, QUERY_CLASSES)?;
    let mut classes: HashMap<String, Class> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for row in &rows {
        let Some(class_uri) = named_node_binding(row, "class") else {
            continue;
        };
        if !classes.contains_key(&class_uri) {
            let mut class = Class::new(ontology_uri, &class_uri);
            class.super_classes = super_classes_of(store, &class_uri)?;
            classes.insert(class_uri.clone(), class);
            order.push(class_uri.clone());
        }
        let Some(class) = classes.get_mut(&class_uri) else {
            continue;
        };
        if let Some(label) = literal_binding(row, "label") {
            class.label.push(label);
        }
        if let Some(description) = literal_binding(row, "description") {
            class.description.push(description);
        }
        if let Some(deprecated) = deprecated_binding(row) {
            class.is_deprecated = deprecated;
        }
    }
    debug!("Indexed {} classes for {}", order.len(), ontology_uri);
    Ok(order
        .into_iter()
        .filter_map(|uri| classes.remove(&uri))
        .collect())
}

/// Collects every `owl:ObjectProperty`, `owl:DatatypeProperty` and
/// `owl:AnnotationProperty` subject, running the parametrized range and
/// domain queries once per property.
pub fn index_properties(store: &Store, ontology_uri: &str) -> RdfMapResult<Vec<Property>> {
    let rows = run_select(store, QUERY_PROPERTIES)?;
    let mut properties: HashMap<String, Property> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for row in &rows {
        let Some(property_uri) = named_node_binding(row, "property") else {
            continue;
        };
        if !properties.contains_key(&property_uri) {
            let property_type = asserted_property_type(row, &property_uri)?;
            let mut property = Property::new(ontology_uri, &property_uri, property_type);
            property.range =
                property_values_of(store, QUERY_PROPERTY_RANGE, &property_uri, "range")?;
            property.domain =
                property_values_of(store, QUERY_PROPERTY_DOMAIN, &property_uri, "domain")?;
            properties.insert(property_uri.clone(), property);
            order.push(property_uri.clone());
        }
        let Some(property) = properties.get_mut(&property_uri) else {
            continue;
        };
        if let Some(label) = literal_binding(row, "label") {
            property.label.push(label);
        }
        if let Some(description) = literal_binding(row, "description") {
            property.description.push(description);
        }
        if let Some(deprecated) = deprecated_binding(row) {
            property.is_deprecated = deprecated;
        }
    }
    debug!("Indexed {} properties for {}", order.len(), ontology_uri);
    Ok(order
        .into_iter()
        .filter_map(|uri| properties.remove(&uri))
        .collect())
}

/// Collects every `owl:NamedIndividual` subject with its labels, comments and
/// deprecation flag.
pub fn index_individuals(store: &Store, ontology_uri: &str) -> RdfMapResult<Vec<Individual>> {
    let rows = run_select(store, QUERY_INDIVIDUALS)?;
    let mut individuals: HashMap<String, Individual> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for row in &rows {
        let Some(individual_uri) = named_node_binding(row, "individual") else {
            continue;
        };
        if !individuals.contains_key(&individual_uri) {
            individuals.insert(
                individual_uri.clone(),
                Individual::new(ontology_uri, &individual_uri),
            );
            order.push(individual_uri.clone());
        }
        let Some(individual) = individuals.get_mut(&individual_uri) else {
            continue;
        };
        if let Some(label) = literal_binding(row, "label") {
            individual.label.push(label);
        }
        if let Some(description) = literal_binding(row, "description") {
            individual.description.push(description);
        }
        if let Some(deprecated) = deprecated_binding(row) {
            individual.is_deprecated = deprecated;
        }
    }
    debug!("Indexed {} individuals for {}", order.len(), ontology_uri);
    Ok(order
        .into_iter()
        .filter_map(|uri| individuals.remove(&uri))
        .collect())
}

/// Runs all three category indexes against the graph and fills the given
/// ontology's class, property and individual lists. Models are keyed to the
/// ontology by its base URI.
pub fn index_ontology(store: &Store, ontology: &mut Ontology) -> RdfMapResult<()> {
    ontology.classes = index_classes(store, &ontology.base_uri)?;
    ontology.properties = index_properties(store, &ontology.base_uri)?;
    ontology.individuals = index_individuals(store, &ontology.base_uri)?;
    info!(
        "Indexed ontology {}: {} classes, {} properties, {} individuals",
        ontology.name,
        ontology.classes.len(),
        ontology.properties.len(),
        ontology.individuals.len()
    );
    Ok(())
}
