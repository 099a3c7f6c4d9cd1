use anyhow::Result;

fn main() -> Result<()> {
    rdfmap_cli::run()
}
