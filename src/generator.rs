use std::path::PathBuf;

use tracing::{error, info, instrument};

use crate::{
    codegen::ModelAssembler,
    db::ColumnSource,
    error::{GenError, GenResult},
    render::{self, ModelWriter, SourceFormatter},
};

/// Outcome of one generation run. Tables fail independently.
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<(String, GenError)>,
}

impl GenerationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives fetch, assemble, render, format and write for every requested table.
pub struct Generator<S> {
    source: S,
    assembler: ModelAssembler,
    formatter: Box<dyn SourceFormatter>,
    writer: ModelWriter,
    package: String,
}

impl<S: ColumnSource> Generator<S> {
    pub fn new(
        source: S,
        assembler: ModelAssembler,
        formatter: Box<dyn SourceFormatter>,
        writer: ModelWriter,
        package: impl Into<String>,
    ) -> Self {
        Self {
            source,
            assembler,
            formatter,
            writer,
            package: package.into(),
        }
    }

    /// Generates `tables`, or every base table of the source when empty.
    /// Only listing tables and creating the output directory abort the run.
    pub async fn run(&self, tables: &[String]) -> GenResult<GenerationReport> {
        let tables = if tables.is_empty() {
            self.source.table_names().await?
        } else {
            tables.to_vec()
        };
        self.writer.prepare()?;
        info!(
            tables = tables.len(),
            dir = %self.writer.dir().display(),
            "generating models"
        );

        let mut report = GenerationReport::default();
        for table in tables {
            match self.generate_table(&table).await {
                Ok(path) => report.written.push(path),
                Err(err) => {
                    error!(table = %table, error = %err, "failed to generate model");
                    report.failures.push((table, err));
                }
            }
        }

        info!(
            written = report.written.len(),
            failed = report.failures.len(),
            "generation finished"
        );
        Ok(report)
    }

    #[instrument(skip(self))]
    async fn generate_table(&self, table: &str) -> GenResult<PathBuf> {
        let columns = self.source.columns(table).await?;
        let struct_name = self.assembler.normalizer().normalize(table);
        let model = self
            .assembler
            .assemble(table, &struct_name, &self.package, &columns);
        let source = render::render_model(&model)?;
        let source = self.formatter.format(table, source)?;
        self.writer.write(table, &source)
    }
}
