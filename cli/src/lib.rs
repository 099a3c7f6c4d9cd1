use anyhow::{Error, Result};
use clap::{Parser, Subcommand};
use log::info;
use rdfmap::compiler::{DirectoryFileResolver, YarrrmlCompiler};
use rdfmap::config::Config;
use rdfmap::executor::RmlMapper;
use rdfmap::indexer::index_ontology;
use rdfmap::loader::{format_from_path, load_rdf_bytes};
use rdfmap::mapping::MappingGraph;
use rdfmap::ontology::Ontology;
use rdfmap::source::Source;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "rdfmap")]
#[command(about = "Compile RDF mapping graphs to YARRRML and materialize RDF")]
#[command(arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Verbose mode - sets the RUST_LOG level to info, defaults to warning level
    #[clap(long, short, action, default_value = "false", global = true)]
    verbose: bool,
    /// Debug mode - sets the RUST_LOG level to debug, defaults to warning level
    #[clap(long, action, default_value = "false", global = true)]
    debug: bool,
    /// Path to a JSON configuration file; command line flags override its values
    #[clap(long, short, global = true)]
    config: Option<PathBuf>,
    /// Directory for intermediate mapping documents, defaults to the system temp directory
    #[clap(long, global = true)]
    temp_dir: Option<PathBuf>,
    /// Path to the java executable used to run the RML mapper
    #[clap(long, global = true)]
    java_path: Option<PathBuf>,
    /// Maximum JVM heap size, e.g. '1G' or '512M'
    #[clap(long, global = true)]
    java_memory: Option<String>,
    /// Path to the RML mapper jar
    #[clap(long, global = true)]
    mapper_jar: Option<PathBuf>,
    /// Path to the yarrrml-parser executable
    #[clap(long, global = true)]
    yarrrml_parser: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Index the classes, properties and individuals of an ontology file
    Index {
        /// The RDF file to index (Turtle, RDF/XML, JSON-LD, N3 or NTriples)
        file: PathBuf,
        /// The base URI of the ontology, e.g. 'http://example.com/ontology#'
        #[clap(long, short)]
        base_uri: String,
        /// Name of the ontology, defaults to the file stem
        #[clap(long, short)]
        name: Option<String>,
        /// Human-readable description of the ontology
        #[clap(long, default_value = "")]
        description: String,
        /// Write the JSON index to this file instead of stdout
        #[clap(long, short)]
        output: Option<PathBuf>,
    },
    /// Compile a mapping graph and a data source into a YARRRML document
    Compile {
        /// JSON file holding the mapping graph
        graph: PathBuf,
        /// JSON file holding the data source description
        source: PathBuf,
        /// Directory where the source data files live
        #[clap(long, short, default_value = ".")]
        data_dir: PathBuf,
        /// Namespace prefixes as 'prefix=uri' pairs
        #[clap(long, short, num_args = 1..)]
        prefix: Vec<String>,
        /// Write the YARRRML document to this file instead of stdout
        #[clap(long, short)]
        output: Option<PathBuf>,
    },
    /// Translate a YARRRML document to RML and run the RML mapper over it
    Materialize {
        /// The YARRRML file to materialize
        yarrrml: PathBuf,
        /// Write the materialized RDF to this file instead of stdout
        #[clap(long, short)]
        output: Option<PathBuf>,
        /// Also write the intermediate RML document to this file
        #[clap(long)]
        rml_output: Option<PathBuf>,
    },
    /// Run the RML mapper over an existing RML document
    Execute {
        /// The RML file to execute
        rml: PathBuf,
        /// Write the materialized RDF to this file instead of stdout
        #[clap(long, short)]
        output: Option<PathBuf>,
    },
    /// Prints the version of the rdfmap binary
    Version,
}

fn write_output(content: &str, destination: Option<&Path>) -> Result<()> {
    match destination {
        Some(path) => {
            std::fs::write(path, content)?;
            info!("Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn parse_prefixes(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    let mut prefixes = BTreeMap::new();
    for pair in pairs {
        let (label, uri) = pair.split_once('=').ok_or_else(|| {
            anyhow::anyhow!("Invalid prefix declaration '{}', expected 'prefix=uri'", pair)
        })?;
        prefixes.insert(label.to_string(), uri.to_string());
    }
    Ok(prefixes)
}

pub fn run() -> Result<()> {
    rdfmap::init_logging();
    let cmd = Cli::parse();
    execute(cmd)
}

pub fn run_from_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    rdfmap::init_logging();
    let cmd = Cli::try_parse_from(args).map_err(Error::from)?;
    execute(cmd)
}

fn execute(cmd: Cli) -> Result<()> {
    // The RUST_LOG env var is set by `init_logging` if RDFMAP_LOG is present.
    // CLI flags for verbosity take precedence. If nothing is set, we default to "warn".
    if cmd.debug {
        std::env::set_var("RUST_LOG", "debug");
    } else if cmd.verbose {
        std::env::set_var("RUST_LOG", "info");
    } else if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "warn");
    }
    let _ = env_logger::try_init();

    // start from the config file when one is given, then let flags override
    let base = match &cmd.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    let mut builder = Config::builder()
        .temp_dir(cmd.temp_dir.unwrap_or(base.temp_dir))
        .java_memory(cmd.java_memory.unwrap_or(base.java_memory))
        .mapper_jar(cmd.mapper_jar.unwrap_or(base.mapper_jar))
        .yarrrml_parser(cmd.yarrrml_parser.unwrap_or(base.yarrrml_parser));
    if let Some(path) = cmd.java_path.or(base.java_path) {
        builder = builder.java_path(path);
    }
    let config: Config = builder.build()?;

    if cmd.verbose || cmd.debug {
        config.print();
    }

    match cmd.command {
        Commands::Index {
            file,
            base_uri,
            name,
            description,
            output,
        } => {
            let bytes = std::fs::read(&file)?;
            let store = load_rdf_bytes(&bytes, format_from_path(&file))?;
            let name = name.unwrap_or_else(|| {
                file.file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default()
            });
            let file_name = file
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let mut ontology = Ontology::new(name, description, base_uri, file_name);
            index_ontology(&store, &mut ontology)?;
            write_output(&ontology.to_json()?, output.as_deref())?;
        }
        Commands::Compile {
            graph,
            source,
            data_dir,
            prefix,
            output,
        } => {
            let graph = MappingGraph::from_json(&std::fs::read_to_string(&graph)?)?;
            let source = Source::from_json(&std::fs::read_to_string(&source)?)?;
            let prefixes = parse_prefixes(&prefix)?;
            let resolver = DirectoryFileResolver::new(data_dir);
            let compiler = YarrrmlCompiler::new(&config.temp_dir);
            let yarrrml = compiler.compile(&prefixes, &source, &graph, &resolver)?;
            write_output(&yarrrml, output.as_deref())?;
        }
        Commands::Materialize {
            yarrrml,
            output,
            rml_output,
        } => {
            let yarrrml = std::fs::read_to_string(&yarrrml)?;
            let mapper = RmlMapper::new(&config);
            let materialized = mapper.materialize(&yarrrml)?;
            if let Some(path) = rml_output {
                std::fs::write(&path, &materialized.rml)?;
                info!("Wrote {}", path.display());
            }
            write_output(&materialized.rdf, output.as_deref())?;
        }
        Commands::Execute { rml, output } => {
            let rml = std::fs::read_to_string(&rml)?;
            let mapper = RmlMapper::new(&config);
            let rdf = mapper.execute(&rml)?;
            write_output(&rdf, output.as_deref())?;
        }
        Commands::Version => {
            println!("rdfmap {}", env!("CARGO_PKG_VERSION"));
        }
    }
    Ok(())
}
