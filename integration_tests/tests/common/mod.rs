#![allow(dead_code)]

use projstats_common::registry::SchemaRegistry;
use projstats_common::types::SkippedFile;
use projstats_extracts::fs::SummaryFileFinder;
use projstats_extracts::ingest::{IngestedBatch, RecordIngestor};
use projstats_extracts::parser::JsonSummaryParser;
use projstats_report::{ColumnExpander, NormalizedTable, UnknownIdentifierPolicy};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// One process entry of a summary file: identifier and its six raw metrics.
pub type Process = (&'static str, Value);

pub fn metrics(cpu: f64, p_mem: f64, peak: f64) -> Value {
    json!([cpu, 1024, 60, 100.0, p_mem, peak])
}

pub struct SummaryBuilder {
    document: Value,
}

impl SummaryBuilder {
    pub fn new(name: &str, entry_point: &str) -> Self {
        Self {
            document: json!({
                "unique_name": name,
                "entry_point": entry_point,
                "pipeline_version": "1.1.0",
                "duration": {"h": 4.0},
                "clade": "insects",
                "prefix": name,
                "ticket": "TOLA-1",
                "fasta_mb": 500.0,
                "longread_avg_gb": 1.5,
                "hic_avg_gb": 2.5,
                "longread_total_gb": 15.0,
                "hic_total_gb": 25.0,
                "execution": {"headers": [], "values": []}
            }),
        }
    }

    pub fn set(mut self, key: &str, value: Value) -> Self {
        self.document[key] = value;
        self
    }

    pub fn hours(self, hours: f64) -> Self {
        self.set("duration", json!({ "h": hours }))
    }

    pub fn processes(mut self, processes: Vec<Process>) -> Self {
        let (headers, values): (Vec<&str>, Vec<Value>) = processes.into_iter().unzip();
        self.document["execution"] = json!({"headers": headers, "values": values});
        self
    }

    pub fn build(&self) -> String {
        self.document.to_string()
    }
}

pub struct RunsDir {
    pub dir: TempDir,
}

impl RunsDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn write(&self, name: &str, content: &str) -> &Self {
        fs::write(self.dir.path().join(name), content).unwrap();
        self
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn ingest(&self) -> IngestedBatch {
        let files = SummaryFileFinder::default().list(self.path()).unwrap();
        RecordIngestor::new(JsonSummaryParser)
            .ingest_all(&files)
            .unwrap()
    }

    pub fn file_count(&self) -> usize {
        fs::read_dir(self.path()).unwrap().count()
    }
}

pub fn registry() -> SchemaRegistry {
    SchemaRegistry::embedded().unwrap()
}

pub fn normalize(
    registry: &SchemaRegistry,
    batch: &IngestedBatch,
    policy: UnknownIdentifierPolicy,
) -> projstats_common::Result<NormalizedTable> {
    ColumnExpander::new(registry)
        .with_policy(policy)
        .expand(&batch.records)
}

pub fn skipped_names(skipped: &[SkippedFile]) -> Vec<&str> {
    skipped.iter().map(|file| file.name.as_str()).collect()
}
