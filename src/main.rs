use anyhow::Context;
use clap::Parser;

use modelgen::{
    cli::Cli,
    codegen::{IdentifierNormalizer, ModelAssembler},
    config::{AppConfig, EnvConfig, defaults},
    db::{InformationSchemaSource, connection},
    generator::Generator,
    logging::init_tracing,
    render::{Gofmt, ModelWriter, Passthrough, SourceFormatter},
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // The subscriber may not be installed yet when config loading fails.
        eprintln!("modelgen: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut cfg = AppConfig::load()?;
    cli.apply(&mut cfg);
    if cli.verbose {
        cfg.logging.rust_log = defaults::DEFAULT_VERBOSE_RUST_LOG.to_string();
    }
    init_tracing(&cfg.logging.rust_log);
    cfg.validate()?;

    let db = connection::connect(&cfg.database).await?;
    let source = InformationSchemaSource::new(db, cfg.database.schema.clone());

    let assembler = ModelAssembler::new(IdentifierNormalizer::new(cfg.initialisms()), cfg.model);
    let formatter: Box<dyn SourceFormatter> = if cfg.output.gofmt {
        Box::new(Gofmt::new(cfg.output.gofmt_path.clone()))
    } else {
        Box::new(Passthrough)
    };
    let writer = ModelWriter::new(cfg.package_dir());
    let generator = Generator::new(source, assembler, formatter, writer, cfg.output.package.clone());

    let report = generator
        .run(&cfg.database.tables)
        .await
        .context("failed to generate models")?;
    for path in &report.written {
        println!("{}", path.display());
    }
    if !report.is_success() {
        let failed: Vec<&str> = report
            .failures
            .iter()
            .map(|(table, _)| table.as_str())
            .collect();
        anyhow::bail!("{} table(s) failed: {}", failed.len(), failed.join(", "));
    }
    Ok(())
}
