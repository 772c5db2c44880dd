use crate::types::entry_point::EntryPoint;
use crate::types::metrics::ProcessMetrics;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Scalar header fields of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunHeader {
    pub unique_name: String,
    pub entry_point: EntryPoint,
    pub pipeline_version: String,
    pub duration_hours: f64,
    pub clade: String,
    /// Ticket/family grouping key.
    pub prefix: String,
    pub ticket: String,
    pub fasta_size_mb: f64,
    pub longread_avg_gb: f64,
    pub hic_avg_gb: f64,
    pub longread_total_gb: f64,
    pub hic_total_gb: f64,
}

/// One ingested summary file. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRecord {
    source_file: String,
    header: RunHeader,
    process_metrics: BTreeMap<String, ProcessMetrics>,
}

impl RunRecord {
    pub fn new(
        source_file: impl Into<String>,
        header: RunHeader,
        process_metrics: BTreeMap<String, ProcessMetrics>,
    ) -> Self {
        Self {
            source_file: source_file.into(),
            header,
            process_metrics,
        }
    }

    /// Name of the file this run was read from.
    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    pub fn header(&self) -> &RunHeader {
        &self.header
    }

    pub fn unique_name(&self) -> &str {
        &self.header.unique_name
    }

    pub fn entry_point(&self) -> EntryPoint {
        self.header.entry_point
    }

    pub fn metrics_for(&self, identifier: &str) -> Option<&ProcessMetrics> {
        self.process_metrics.get(identifier)
    }

    pub fn process_identifiers(&self) -> impl Iterator<Item = &str> {
        self.process_metrics.keys().map(String::as_str)
    }

    pub fn process_count(&self) -> usize {
        self.process_metrics.len()
    }
}
