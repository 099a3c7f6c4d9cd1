use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn rdfmap_bin() -> PathBuf {
    let mut p = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("target")
        .join("debug")
        .join(if cfg!(windows) { "rdfmap.exe" } else { "rdfmap" });
    if !p.exists() {
        p = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("target")
            .join("release")
            .join(if cfg!(windows) { "rdfmap.exe" } else { "rdfmap" });
    }
    assert!(p.exists(), "rdfmap binary not found at {:?}", p);
    p
}

fn tmp_dir(name: &str) -> PathBuf {
    let mut base = std::env::temp_dir();
    base.push(format!("rdfmap-cli-{}-{}", name, std::process::id()));
    if base.exists() {
        let _ = fs::remove_dir_all(&base);
    }
    fs::create_dir_all(&base).unwrap();
    base
}

const ONTOLOGY_TTL: &str = r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix ex: <http://example.com/ontology#> .

ex:Person a owl:Class ;
    rdfs:subClassOf ex:LivingThing ;
    rdfs:label "Person" .

ex:LivingThing a owl:Class .

ex:hasName a owl:DatatypeProperty ;
    rdfs:domain ex:Person .
"#;

#[test]
fn version_prints_package_version() {
    let out = Command::new(rdfmap_bin())
        .arg("version")
        .output()
        .expect("run version");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.starts_with("rdfmap "),
        "unexpected version output: {}",
        stdout
    );
}

#[test]
fn no_subcommand_is_an_error() {
    let out = Command::new(rdfmap_bin()).output().expect("run bare");
    assert!(!out.status.success(), "expected failure without subcommand");
}

#[test]
fn index_writes_json_catalog_entry() {
    let root = tmp_dir("index");
    let ttl = root.join("people.ttl");
    fs::write(&ttl, ONTOLOGY_TTL).unwrap();
    let out_file = root.join("index.json");

    let out = Command::new(rdfmap_bin())
        .arg("index")
        .arg(&ttl)
        .arg("--base-uri")
        .arg("http://example.com/ontology#")
        .arg("-o")
        .arg(&out_file)
        .output()
        .expect("run index");
    assert!(
        out.status.success(),
        "index failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let json = fs::read_to_string(&out_file).unwrap();
    // the ontology name defaults to the file stem
    assert!(json.contains("\"name\": \"people\""), "got: {}", json);
    assert!(json.contains("http://example.com/ontology#Person"));
    assert!(json.contains("http://example.com/ontology#hasName"));
    assert!(json.contains("\"belongs_to\""));
}

#[test]
fn index_to_stdout_without_output_flag() {
    let root = tmp_dir("index_stdout");
    let ttl = root.join("things.ttl");
    fs::write(&ttl, ONTOLOGY_TTL).unwrap();

    let out = Command::new(rdfmap_bin())
        .arg("index")
        .arg(&ttl)
        .arg("--base-uri")
        .arg("http://example.com/ontology#")
        .arg("--name")
        .arg("things")
        .output()
        .expect("run index");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("\"name\": \"things\""));
    assert!(stdout.contains("http://example.com/ontology#Person"));
}

#[test]
fn index_missing_file_fails() {
    let root = tmp_dir("index_missing");
    let out = Command::new(rdfmap_bin())
        .arg("index")
        .arg(root.join("no_such_file.ttl"))
        .arg("--base-uri")
        .arg("http://example.com/ontology#")
        .output()
        .expect("run index");
    assert!(!out.status.success(), "expected failure for missing file");
}

#[test]
fn compile_emits_yarrrml() {
    let root = tmp_dir("compile");
    fs::write(root.join("people.csv"), "id,name\n1,John\n").unwrap();

    let source_json = r#"{
        "uuid": "s-1",
        "type": "csv",
        "references": ["id", "name"],
        "file_uuid": "people"
    }"#;
    let graph_json = r#"{
        "uuid": "g-1",
        "name": "people",
        "source_id": "s-1",
        "nodes": [
            {
                "type": "entity",
                "id": "person",
                "label": "Person",
                "uri_pattern": "ex:person/{id}",
                "rdf_type": ["ex:Person"],
                "properties": []
            },
            {
                "type": "literal",
                "id": "name",
                "label": "name",
                "value": "{name}",
                "literal_type": "xsd:string"
            }
        ],
        "edges": [
            {
                "id": "e-1",
                "source": "person",
                "target": "name",
                "source_handle": "ex:name",
                "target_handle": "name-in"
            }
        ]
    }"#;
    let source_file = root.join("source.json");
    let graph_file = root.join("graph.json");
    fs::write(&source_file, source_json).unwrap();
    fs::write(&graph_file, graph_json).unwrap();
    let out_file = root.join("mapping.yml");

    let out = Command::new(rdfmap_bin())
        .arg("--temp-dir")
        .arg(root.join("temp"))
        .arg("compile")
        .arg(&graph_file)
        .arg(&source_file)
        .arg("--data-dir")
        .arg(&root)
        .arg("--prefix")
        .arg("ex=http://example.com/ns#")
        .arg("--prefix")
        .arg("xsd=http://www.w3.org/2001/XMLSchema#")
        .arg("-o")
        .arg(&out_file)
        .output()
        .expect("run compile");
    assert!(
        out.status.success(),
        "compile failed: {}",
        String::from_utf8_lossy(&out.stderr)
    );

    let yaml = fs::read_to_string(&out_file).unwrap();
    assert!(yaml.contains("referenceFormulation: csv"));
    assert!(yaml.contains("ex: http://example.com/ns#"));
    assert!(yaml.contains("s: ex:person/{id}"));
    assert!(yaml.contains("predicate: ex:name"));
}

#[test]
fn compile_rejects_malformed_prefix() {
    let root = tmp_dir("compile_prefix");
    fs::write(root.join("people.csv"), "id\n1\n").unwrap();
    let source_file = root.join("source.json");
    let graph_file = root.join("graph.json");
    fs::write(
        &source_file,
        r#"{"uuid": "s-1", "type": "csv", "references": ["id"], "file_uuid": "people"}"#,
    )
    .unwrap();
    fs::write(
        &graph_file,
        r#"{"uuid": "g-1", "name": "g", "source_id": "s-1", "nodes": [], "edges": []}"#,
    )
    .unwrap();

    let out = Command::new(rdfmap_bin())
        .arg("compile")
        .arg(&graph_file)
        .arg(&source_file)
        .arg("--data-dir")
        .arg(&root)
        .arg("--prefix")
        .arg("ex-has-no-equals-sign")
        .output()
        .expect("run compile");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("prefix"),
        "stderr should mention the prefix: {}",
        stderr
    );
}

#[test]
fn compile_reports_dangling_edge() {
    let root = tmp_dir("compile_dangling");
    fs::write(root.join("people.csv"), "id\n1\n").unwrap();
    let source_file = root.join("source.json");
    let graph_file = root.join("graph.json");
    fs::write(
        &source_file,
        r#"{"uuid": "s-1", "type": "csv", "references": ["id"], "file_uuid": "people"}"#,
    )
    .unwrap();
    fs::write(
        &graph_file,
        r#"{
            "uuid": "g-1",
            "name": "g",
            "source_id": "s-1",
            "nodes": [
                {
                    "type": "entity",
                    "id": "person",
                    "label": "Person",
                    "uri_pattern": "ex:person/{id}",
                    "rdf_type": [],
                    "properties": []
                }
            ],
            "edges": [
                {
                    "id": "e-1",
                    "source": "person",
                    "target": "missing",
                    "source_handle": "ex:p",
                    "target_handle": "in"
                }
            ]
        }"#,
    )
    .unwrap();

    let out = Command::new(rdfmap_bin())
        .arg("compile")
        .arg(&graph_file)
        .arg(&source_file)
        .arg("--data-dir")
        .arg(&root)
        .output()
        .expect("run compile");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("e-1"),
        "stderr should name the dangling edge: {}",
        stderr
    );
}
