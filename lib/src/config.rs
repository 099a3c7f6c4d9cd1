//! Defines the configuration for external tooling: where temporary files go,
//! which Java runtime and RML mapper jar to use, and how the YARRRML
//! translator is invoked.

use crate::errors::{RdfMapError, RdfMapResult};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

fn default_temp_dir() -> PathBuf {
    std::env::temp_dir()
}

fn default_java_memory() -> String {
    "1G".to_string()
}

fn default_mapper_jar() -> PathBuf {
    PathBuf::from("mapper.jar")
}

fn default_yarrrml_parser() -> PathBuf {
    PathBuf::from("yarrrml-parser")
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Builder)]
#[builder(pattern = "owned", setter(into), default)]
pub struct Config {
    // where intermediate mapping documents and materialized output land
    #[serde(default = "default_temp_dir")]
    pub temp_dir: PathBuf,
    // explicit Java runtime; when unset the system `java` is probed
    #[serde(default)]
    #[builder(setter(strip_option))]
    pub java_path: Option<PathBuf>,
    // maximum heap handed to the mapper process
    #[serde(default = "default_java_memory")]
    pub java_memory: String,
    #[serde(default = "default_mapper_jar")]
    pub mapper_jar: PathBuf,
    #[serde(default = "default_yarrrml_parser")]
    pub yarrrml_parser: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            temp_dir: default_temp_dir(),
            java_path: None,
            java_memory: default_java_memory(),
            mapper_jar: default_mapper_jar(),
            yarrrml_parser: default_yarrrml_parser(),
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn save_to_file(&self, file: &Path) -> RdfMapResult<()> {
        let config_str = serde_json::to_string_pretty(&self)
            .map_err(|e| RdfMapError::MalformedDocument(e.to_string()))?;
        let mut file = std::fs::File::create(file)?;
        file.write_all(config_str.as_bytes())?;
        Ok(())
    }

    pub fn from_file(file: &Path) -> RdfMapResult<Self> {
        let file = std::fs::File::open(file)?;
        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .map_err(|e| RdfMapError::MalformedDocument(e.to_string()))?;
        Ok(config)
    }

    /// Prints out the current Config in a clear and readable way for command line output.
    pub fn print(&self) {
        println!("Configuration:");
        println!("  Temp Dir: {}", self.temp_dir.display());
        match &self.java_path {
            Some(path) => println!("  Java Path: {}", path.display()),
            None => println!("  Java Path: (probe system java)"),
        }
        println!("  Java Memory: {}", self.java_memory);
        println!("  Mapper Jar: {}", self.mapper_jar.display());
        println!("  YARRRML Parser: {}", self.yarrrml_parser.display());
    }
}
