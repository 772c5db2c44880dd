use super::{ParsedSummary, SummaryParser};
use projstats_common::types::{EntryPoint, RawMetric, RunHeader};
use projstats_common::{Result, StatsError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Reads summary files serialized as JSON documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSummaryParser;

#[derive(Debug, Deserialize)]
struct SummaryDocument {
    unique_name: String,
    entry_point: String,
    pipeline_version: String,
    duration: Duration,
    clade: String,
    prefix: String,
    ticket: String,
    fasta_mb: f64,
    longread_avg_gb: f64,
    hic_avg_gb: f64,
    longread_total_gb: f64,
    hic_total_gb: f64,
    execution: ExecutionLog,
}

#[derive(Debug, Deserialize)]
struct Duration {
    h: f64,
}

#[derive(Debug, Deserialize)]
struct ExecutionLog {
    headers: Vec<String>,
    values: Vec<Vec<RawMetric>>,
}

impl JsonSummaryParser {
    pub fn parse_str(&self, file: &str, content: &str) -> Result<ParsedSummary> {
        let document: SummaryDocument =
            serde_json::from_str(content).map_err(|e| StatsError::Parse {
                file: file.to_string(),
                reason: e.to_string(),
            })?;

        for (field, value) in [
            ("duration.h", document.duration.h),
            ("fasta_mb", document.fasta_mb),
            ("longread_avg_gb", document.longread_avg_gb),
            ("hic_avg_gb", document.hic_avg_gb),
            ("longread_total_gb", document.longread_total_gb),
            ("hic_total_gb", document.hic_total_gb),
        ] {
            if value < 0.0 {
                return Err(StatsError::Parse {
                    file: file.to_string(),
                    reason: format!("{} must not be negative, got {}", field, value),
                });
            }
        }

        let entry_point: EntryPoint =
            document
                .entry_point
                .parse()
                .map_err(|reason| StatsError::Parse {
                    file: file.to_string(),
                    reason,
                })?;

        Ok(ParsedSummary {
            header: RunHeader {
                unique_name: document.unique_name,
                entry_point,
                pipeline_version: document.pipeline_version,
                duration_hours: document.duration.h,
                clade: document.clade,
                prefix: document.prefix,
                ticket: document.ticket,
                fasta_size_mb: document.fasta_mb,
                longread_avg_gb: document.longread_avg_gb,
                hic_avg_gb: document.hic_avg_gb,
                longread_total_gb: document.longread_total_gb,
                hic_total_gb: document.hic_total_gb,
            },
            execution_headers: document.execution.headers,
            execution_values: document.execution.values,
        })
    }
}

impl SummaryParser for JsonSummaryParser {
    fn parse(&self, path: &Path) -> Result<ParsedSummary> {
        let content = fs::read_to_string(path).map_err(|source| StatsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.parse_str(&file, &content)
    }
}
