//! Turns summary files into [`RunRecord`]s, one file at a time.

use crate::fs::{ListedAs, SummaryFile};
use crate::parser::{ParsedSummary, SummaryParser};
use projstats_common::types::{ProcessMetrics, RunRecord, SkippedFile};
use projstats_common::{Result, StatsError};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Every file of an input directory is accounted for exactly once: either as a
/// record or as a skipped file.
#[derive(Debug, Clone, Default)]
pub struct IngestedBatch {
    pub records: Vec<RunRecord>,
    pub skipped: Vec<SkippedFile>,
}

impl IngestedBatch {
    pub fn file_count(&self) -> usize {
        self.records.len() + self.skipped.len()
    }

    pub fn empty_files(&self) -> impl Iterator<Item = &SkippedFile> {
        self.skipped.iter().filter(|skipped| skipped.is_empty_file())
    }
}

pub struct RecordIngestor<P: SummaryParser> {
    parser: P,
    skipped: Vec<SkippedFile>,
}

impl<P: SummaryParser> RecordIngestor<P> {
    pub fn new(parser: P) -> Self {
        Self {
            parser,
            skipped: Vec::new(),
        }
    }

    /// Ingests one file. Ignored, empty and unparseable files are recorded in
    /// the skip list and yield `Ok(None)`; a malformed execution log is an error.
    pub fn ingest(&mut self, file: &SummaryFile) -> Result<Option<RunRecord>> {
        match &file.listed_as {
            ListedAs::Candidate => {}
            ListedAs::Ignored(rule) => {
                debug!("Ignoring {} ({})", file.name, rule);
                self.skipped.push(SkippedFile::ignored(&file.name, rule));
                return Ok(None);
            }
            ListedAs::Broken(reason) => {
                warn!("Skipping unresolvable entry {}: {}", file.name, reason);
                self.skipped.push(SkippedFile::unreadable(&file.name, reason));
                return Ok(None);
            }
        }

        if file.size == 0 {
            warn!("Skipping empty summary file {}", file.name);
            self.skipped.push(SkippedFile::empty(&file.name));
            return Ok(None);
        }

        let parsed = match self.parser.parse(&file.path) {
            Ok(parsed) => parsed,
            Err(e) if e.is_structural() => return Err(e),
            Err(e) => {
                warn!("Skipping unreadable summary file {}: {}", file.name, e);
                self.skipped.push(SkippedFile::unreadable(&file.name, e.to_string()));
                return Ok(None);
            }
        };

        let record = build_record(&file.name, parsed)?;
        debug!(
            "Ingested {} ({}, {} processes)",
            file.name,
            record.entry_point(),
            record.process_count()
        );
        Ok(Some(record))
    }

    /// Ingests `files` in order. Stops at the first structural error.
    pub fn ingest_all(mut self, files: &[SummaryFile]) -> Result<IngestedBatch> {
        let mut records = Vec::with_capacity(files.len());
        for file in files {
            if let Some(record) = self.ingest(file)? {
                records.push(record);
            }
        }
        info!(
            "Ingested {} runs, skipped {} of {} files",
            records.len(),
            self.skipped.len(),
            files.len()
        );
        Ok(IngestedBatch {
            records,
            skipped: self.skipped,
        })
    }

    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }
}

/// Pairs each execution-log name with its metric list positionally.
pub fn build_record(file: &str, parsed: ParsedSummary) -> Result<RunRecord> {
    let ParsedSummary {
        header,
        execution_headers,
        execution_values,
    } = parsed;

    if execution_headers.len() != execution_values.len() {
        return Err(StatsError::SchemaMismatch {
            file: file.to_string(),
            names: execution_headers.len(),
            values: execution_values.len(),
        });
    }

    let mut process_metrics = BTreeMap::new();
    for (identifier, values) in execution_headers.into_iter().zip(execution_values) {
        let metrics = ProcessMetrics::try_from(values).map_err(|len| StatsError::MetricArity {
            file: file.to_string(),
            identifier: identifier.clone(),
            len,
        })?;
        if process_metrics.contains_key(&identifier) {
            return Err(StatsError::DuplicateProcess {
                file: file.to_string(),
                identifier,
            });
        }
        process_metrics.insert(identifier, metrics);
    }

    Ok(RunRecord::new(file, header, process_metrics))
}
