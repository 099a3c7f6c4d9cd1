//! Runs the external RML toolchain: the YARRRML-to-RML translator and the
//! Java RML processor that materializes RDF from a mapping document.

use crate::config::Config;
use crate::errors::{RdfMapError, RdfMapResult};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Command;
use uuid::Uuid;

/// The two documents produced by a full materialization run: the intermediate
/// RML and the RDF generated from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterializedMapping {
    pub rml: String,
    pub rdf: String,
}

/// Drives the external RML processor. Construction probes for a Java runtime
/// once; without one the mapper stays constructable but every execution
/// request fails with [`RdfMapError::RuntimeNotAvailable`].
pub struct RmlMapper {
    temp_dir: PathBuf,
    mapper_jar: PathBuf,
    yarrrml_parser: PathBuf,
    java_memory: String,
    java_path: Option<PathBuf>,
}

// a runtime is usable when `<path> -version` exits 0
fn probe_java(path: &Path) -> bool {
    Command::new(path)
        .arg("-version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

impl RmlMapper {
    pub fn new(config: &Config) -> Self {
        info!("Checking for a usable Java runtime");
        let mut java_path = None;
        if let Some(custom) = &config.java_path {
            if probe_java(custom) {
                info!("Using Java runtime at {:?}", custom);
                java_path = Some(custom.clone());
            } else {
                warn!(
                    "Java runtime at {:?} is not usable, falling back to the system java",
                    custom
                );
            }
        }
        if java_path.is_none() && probe_java(Path::new("java")) {
            info!("Using the system java");
            java_path = Some(PathBuf::from("java"));
        }
        if java_path.is_none() {
            error!("No Java runtime found, RML mappings cannot be executed");
        } else if !config.mapper_jar.exists() {
            error!("RML mapper jar not found at {:?}", config.mapper_jar);
        }
        RmlMapper {
            temp_dir: config.temp_dir.clone(),
            mapper_jar: config.mapper_jar.clone(),
            yarrrml_parser: config.yarrrml_parser.clone(),
            java_memory: config.java_memory.clone(),
            java_path,
        }
    }

    /// Runs an RML document through the external processor and returns the
    /// materialized RDF as Turtle text. Temp files from failed runs are left
    /// in place so the mapping can be inspected.
    pub fn execute(&self, rml: &str) -> RdfMapResult<String> {
        let java = self
            .java_path
            .as_ref()
            .ok_or_else(|| RdfMapError::RuntimeNotAvailable("java".to_string()))?;
        std::fs::create_dir_all(&self.temp_dir)?;
        let run_id = Uuid::new_v4().simple().to_string();
        let rml_file = self.temp_dir.join(format!("rml_{}.ttl", run_id));
        std::fs::write(&rml_file, rml)?;
        let output_file = self.temp_dir.join(format!("rdf_{}.ttl", run_id));

        info!("Executing RML mapping {:?}", rml_file);
        let output = Command::new(java)
            .arg(format!("-Xmx{}", self.java_memory))
            .arg("-jar")
            .arg(&self.mapper_jar)
            .arg("-m")
            .arg(&rml_file)
            .arg("-o")
            .arg(&output_file)
            .arg("-s")
            .arg("turtle")
            .output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            error!("RML mapping failed: {}", stderr);
            return Err(RdfMapError::MappingExecutionFailure { stderr });
        }
        info!("RML mapping executed successfully");
        Ok(std::fs::read_to_string(&output_file)?)
    }

    /// Translates a YARRRML document to RML with the external translator and
    /// feeds the result through [`RmlMapper::execute`], returning both
    /// documents.
    pub fn materialize(&self, yarrrml: &str) -> RdfMapResult<MaterializedMapping> {
        std::fs::create_dir_all(&self.temp_dir)?;
        let run_id = Uuid::new_v4().simple().to_string();
        let yarrrml_file = self.temp_dir.join(format!("yarrrml_{}.yml", run_id));
        std::fs::write(&yarrrml_file, yarrrml)?;
        let rml_file = self.temp_dir.join(format!("rml_{}.ttl", run_id));

        info!("Translating YARRRML document {:?}", yarrrml_file);
        let output = Command::new(&self.yarrrml_parser)
            .arg("-i")
            .arg(&yarrrml_file)
            .arg("-o")
            .arg(&rml_file)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RdfMapError::RuntimeNotAvailable(self.yarrrml_parser.display().to_string())
                } else {
                    RdfMapError::Io(e)
                }
            })?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            error!("YARRRML translation failed: {}", stderr);
            return Err(RdfMapError::TranslationFailure { stderr });
        }
        let rml = std::fs::read_to_string(&rml_file)?;
        let rdf = self.execute(&rml)?;
        Ok(MaterializedMapping { rml, rdf })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper_without_java(temp_dir: &Path) -> RmlMapper {
        RmlMapper {
            temp_dir: temp_dir.to_path_buf(),
            mapper_jar: PathBuf::from("mapper.jar"),
            yarrrml_parser: PathBuf::from("yarrrml-parser-missing-for-test"),
            java_memory: "1G".to_string(),
            java_path: None,
        }
    }

    #[test]
    fn test_execute_without_runtime() {
        let dir = tempfile::tempdir().unwrap();
        let mapper = mapper_without_java(dir.path());
        let err = mapper.execute("<urn:s> <urn:p> <urn:o> .").unwrap_err();
        assert!(matches!(err, RdfMapError::RuntimeNotAvailable(ref name) if name == "java"));
        // the runtime check happens before any temp file is written
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_probe_missing_java() {
        assert!(!probe_java(Path::new("/nonexistent/java-for-test")));
    }

    #[test]
    fn test_missing_translator() {
        let dir = tempfile::tempdir().unwrap();
        let mapper = mapper_without_java(dir.path());
        let err = mapper.materialize("prefixes: {}\n").unwrap_err();
        assert!(matches!(
            err,
            RdfMapError::RuntimeNotAvailable(ref name) if name == "yarrrml-parser-missing-for-test"
        ));
    }
}
