use super::{MetricColumn, NormalizedRow, NormalizedTable};
use crate::diagnostics::Diagnostic;
use projstats_common::registry::SchemaRegistry;
use projstats_common::types::{Coercion, MetricKind, RawMetric, RunRecord};
use projstats_common::{Result, StatsError};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use tracing::{debug, warn};

/// What to do with a process that a run reports but the registry does not declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownIdentifierPolicy {
    /// Refuse to build the table.
    #[default]
    Abort,
    /// Drop the process and record a diagnostic.
    Warn,
}

/// Expands per-run process metrics into registry-ordered metric columns.
pub struct ColumnExpander<'a> {
    registry: &'a SchemaRegistry,
    policy: UnknownIdentifierPolicy,
}

impl<'a> ColumnExpander<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            policy: UnknownIdentifierPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: UnknownIdentifierPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn columns(&self) -> Vec<MetricColumn> {
        self.registry
            .processes()
            .iter()
            .flat_map(|identifier| {
                MetricKind::ALL.into_iter().map(move |kind| MetricColumn {
                    name: kind.column_name(identifier),
                    identifier: identifier.clone(),
                    kind,
                })
            })
            .collect()
    }

    pub fn expand(&self, records: &[RunRecord]) -> Result<NormalizedTable> {
        let columns = self.columns();
        let mut diagnostics = Vec::new();
        let mut rows = Vec::with_capacity(records.len());
        let mut seen: HashMap<&str, &str> = HashMap::new();

        for record in records {
            self.check_identifiers(record, &mut diagnostics)?;
            match seen.entry(record.unique_name()) {
                Entry::Vacant(entry) => {
                    entry.insert(record.source_file());
                }
                Entry::Occupied(entry) => {
                    let first_file = *entry.get();
                    warn!(
                        "{}: run {} was already read from {}, it is counted twice",
                        record.source_file(),
                        record.unique_name(),
                        first_file
                    );
                    diagnostics.push(Diagnostic::DuplicateRun {
                        file: record.source_file().to_string(),
                        unique_name: record.unique_name().to_string(),
                        first_file: first_file.to_string(),
                    });
                }
            }
            rows.push(self.expand_record(record, &columns, &mut diagnostics));
        }

        debug!(
            "Normalized {} runs into {} metric columns ({} diagnostics)",
            rows.len(),
            columns.len(),
            diagnostics.len()
        );
        Ok(NormalizedTable::new(columns, rows, diagnostics))
    }

    fn check_identifiers(
        &self,
        record: &RunRecord,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<()> {
        for identifier in record.process_identifiers() {
            if self.registry.contains(identifier) {
                continue;
            }
            match self.policy {
                UnknownIdentifierPolicy::Abort => {
                    return Err(StatsError::UnknownProcessIdentifier {
                        file: record.source_file().to_string(),
                        identifier: identifier.to_string(),
                        registry_version: self.registry.version().to_string(),
                    });
                }
                UnknownIdentifierPolicy::Warn => {
                    warn!(
                        "{}: process {} is not in registry {}, its metrics are dropped",
                        record.source_file(),
                        identifier,
                        self.registry.version()
                    );
                    diagnostics.push(Diagnostic::UnknownProcess {
                        file: record.source_file().to_string(),
                        identifier: identifier.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn expand_record(
        &self,
        record: &RunRecord,
        columns: &[MetricColumn],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> NormalizedRow {
        let mut metrics = vec![None; columns.len()];

        for (position, identifier) in self.registry.processes().iter().enumerate() {
            let Some(process) = record.metrics_for(identifier) else {
                continue;
            };
            for (kind, raw) in process.iter() {
                let index = position * MetricKind::ALL.len() + kind.index();
                metrics[index] = match raw.coerce() {
                    Coercion::Value(value) => Some(value),
                    Coercion::Missing => None,
                    Coercion::Failed => {
                        let column = &columns[index].name;
                        warn!(
                            "{}: {} is not numeric ({:?}), treating as missing",
                            record.source_file(),
                            column,
                            raw
                        );
                        diagnostics.push(Diagnostic::CoercionFailure {
                            file: record.source_file().to_string(),
                            column: column.clone(),
                            raw: raw_text(raw),
                        });
                        None
                    }
                };
            }
        }

        NormalizedRow {
            source_file: record.source_file().to_string(),
            header: record.header().clone(),
            metrics,
        }
    }
}

fn raw_text(raw: &RawMetric) -> String {
    match raw {
        RawMetric::Number(value) => value.to_string(),
        RawMetric::Text(text) => text.clone(),
        RawMetric::Missing => String::new(),
        RawMetric::Other(value) => value.to_string(),
    }
}
