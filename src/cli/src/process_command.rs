use crate::commands::Cli;
use crate::config::{Config, ConfigLoader};
use crate::export::{
    ArtifactWriter, TableExport, RUNTIME_VIEWS_FILE, SUMMARY_FILE, SUPER_MODULE_FILE, TABLE_FILE,
};
use crate::formatter::ReportFormatter;
use crate::logging::setup_logging;
use anyhow::{Context, Result};
use clap::Parser;
use projstats_common::registry::SchemaRegistry;
use projstats_extracts::fs::SummaryFileFinder;
use projstats_extracts::ingest::RecordIngestor;
use projstats_extracts::parser::JsonSummaryParser;
use projstats_report::aggregate::{runtime_views, super_module_series};
use projstats_report::{
    AggregationReporter, BatchSummary, ColumnExpander, NormalizedTable, SubsetFilter,
};
use std::path::{Path, PathBuf};
use tracing::info;

const REPORT_WIDTH: usize = 80;

/// What a batch run produced.
#[derive(Debug)]
pub struct BatchOutcome {
    pub summary: BatchSummary,
    pub table: NormalizedTable,
    pub artifacts: Vec<PathBuf>,
}

pub fn process_cli() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ConfigLoader::load_config(cli.config.as_deref())?;
    config.apply_cli(&cli);

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;
    setup_logging(&config.output_dir, cli.verbose)?;

    let outcome = run_batch(&cli.dir, &config)?;

    let mut formatter = ReportFormatter::new(REPORT_WIDTH);
    formatter.print_summary(&outcome.summary)?;
    formatter.print_artifacts(&outcome.artifacts)?;
    println!("{}", formatter.get_output());
    Ok(())
}

pub fn load_registry(config: &Config) -> Result<SchemaRegistry> {
    let registry = match &config.registry_path {
        Some(path) => SchemaRegistry::from_file(path)
            .with_context(|| format!("Failed to load registry {}", path.display()))?,
        None => SchemaRegistry::embedded().context("Failed to load built-in registry")?,
    };
    info!(
        "Using process registry {} ({} processes)",
        registry.version(),
        registry.len()
    );
    Ok(registry)
}

/// Ingests `dir`, builds the table and writes every artifact into the output directory.
///
/// Nothing is written when the batch fails to normalize.
pub fn run_batch(dir: &Path, config: &Config) -> Result<BatchOutcome> {
    let registry = load_registry(config)?;

    let files = SummaryFileFinder::default()
        .list(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?;
    let batch = RecordIngestor::new(JsonSummaryParser)
        .ingest_all(&files)
        .context("Failed to ingest run summaries")?;

    let table = ColumnExpander::new(&registry)
        .with_policy(config.unknown_identifier_policy)
        .expand(&batch.records)
        .context("Failed to normalize run summaries")?;
    let summary = BatchSummary::new(&table, &batch.skipped);

    let subset = SubsetFilter::tickets(config.tickets.iter().cloned()).apply(&table);
    if !config.tickets.is_empty() {
        info!(
            "Reporting {} of {} runs for tickets {:?}",
            subset.row_count(),
            table.row_count(),
            config.tickets
        );
    }

    let reports = AggregationReporter::new(&registry)
        .with_distribution_max(config.distribution_max)
        .reports(&subset);

    let mut writer = ArtifactWriter::new(&config.output_dir)?;
    writer.write_json(TABLE_FILE, &TableExport::from(&table))?;
    for report in &reports {
        writer.write_json(
            &format!("{}_{}.json", report.subworkflow, report.scope),
            report,
        )?;
    }
    writer.write_json(
        SUPER_MODULE_FILE,
        &super_module_series(&subset, &config.super_module_process),
    )?;
    writer.write_json(RUNTIME_VIEWS_FILE, &runtime_views(&subset))?;
    writer.write_text(SUMMARY_FILE, &summary.render())?;

    info!(
        "Wrote {} artifacts to {}",
        writer.written().len(),
        config.output_dir.display()
    );

    Ok(BatchOutcome {
        summary,
        artifacts: writer.written().to_vec(),
        table,
    })
}
