//! The seam between a raw summary file and the ingestor.

mod json;

pub use json::JsonSummaryParser;

use projstats_common::types::{RawMetric, RunHeader};
use projstats_common::Result;
use std::path::Path;

/// One summary file as understood by a parser: the header scalars plus the
/// execution log as two co-indexed sequences.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSummary {
    pub header: RunHeader,
    pub execution_headers: Vec<String>,
    pub execution_values: Vec<Vec<RawMetric>>,
}

pub trait SummaryParser {
    fn parse(&self, path: &Path) -> Result<ParsedSummary>;
}
