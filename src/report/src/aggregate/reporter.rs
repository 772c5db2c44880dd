use super::distribution::{peak, BoxStats};
use crate::table::{NormalizedTable, SubsetFilter};
use projstats_common::constants::EXCLUDED_SUBWORKFLOWS;
use projstats_common::process_id::collapse;
use projstats_common::registry::SchemaRegistry;
use projstats_common::types::{EntryScope, MetricKind};
use serde::Serialize;
use tracing::debug;

pub const DEFAULT_DISTRIBUTION_MAX: f64 = 110.0;

/// Memory utilization and peak memory of every process shown under one display label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelDistribution {
    pub label: String,
    /// Registry identifiers combined under this label, in registry order.
    pub identifiers: Vec<String>,
    /// Every recorded `AVERAGE_P_MEM` value of those identifiers.
    pub values: Vec<f64>,
    pub stats: Option<BoxStats>,
    /// Largest `AVERAGE_PEAK_MEMORY` over all rows and identifiers.
    pub peak: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubworkflowReport {
    pub subworkflow: String,
    pub scope: EntryScope,
    pub row_count: usize,
    pub display_range: (f64, f64),
    pub labels: Vec<LabelDistribution>,
}

impl SubworkflowReport {
    /// Name of the box plot rendered from this report.
    pub fn artifact_name(&self) -> String {
        format!("{}_{}.png", self.subworkflow, self.scope)
    }

    pub fn label(&self, label: &str) -> Option<&LabelDistribution> {
        self.labels.iter().find(|l| l.label == label)
    }

    /// One peak value per label, in label order.
    pub fn peak_overlay(&self) -> Vec<(&str, Option<f64>)> {
        self.labels
            .iter()
            .map(|l| (l.label.as_str(), l.peak))
            .collect()
    }
}

/// Builds the per-subworkflow, per-entry-point distribution reports.
pub struct AggregationReporter<'a> {
    registry: &'a SchemaRegistry,
    distribution_max: f64,
}

impl<'a> AggregationReporter<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            distribution_max: DEFAULT_DISTRIBUTION_MAX,
        }
    }

    pub fn with_distribution_max(mut self, distribution_max: f64) -> Self {
        self.distribution_max = distribution_max;
        self
    }

    /// Registry subworkflows minus the fixed exclusions, in registry order.
    pub fn reportable_subworkflows(&self) -> Vec<&str> {
        self.registry
            .subworkflows()
            .iter()
            .map(String::as_str)
            .filter(|name| !EXCLUDED_SUBWORKFLOWS.contains(name))
            .collect()
    }

    pub fn report(
        &self,
        table: &NormalizedTable,
        subworkflow: &str,
        scope: EntryScope,
    ) -> SubworkflowReport {
        let view = SubsetFilter::default()
            .with_entry_point(scope.entry_point())
            .apply(table);

        let mut labels: Vec<LabelDistribution> = Vec::new();
        for identifier in self.registry.group(subworkflow) {
            let label = collapse(identifier);
            let values = recorded(&view, identifier, MetricKind::PercentMemory);
            let peaks = recorded(&view, identifier, MetricKind::PeakMemory);

            let entry = match labels.iter().position(|l| l.label == label) {
                Some(index) => &mut labels[index],
                None => {
                    labels.push(LabelDistribution {
                        label,
                        identifiers: Vec::new(),
                        values: Vec::new(),
                        stats: None,
                        peak: None,
                    });
                    let last = labels.len() - 1;
                    &mut labels[last]
                }
            };
            entry.identifiers.push(identifier.to_string());
            entry.values.extend(values);
            entry.peak = peak(entry.peak.into_iter().chain(peaks));
        }

        for label in &mut labels {
            label.stats = BoxStats::from_values(&label.values);
        }

        debug!(
            "{} {}: {} rows, {} labels",
            subworkflow,
            scope,
            view.row_count(),
            labels.len()
        );

        SubworkflowReport {
            subworkflow: subworkflow.to_string(),
            scope,
            row_count: view.row_count(),
            display_range: (0.0, self.distribution_max),
            labels,
        }
    }

    /// Every reportable subworkflow under every scope.
    pub fn reports(&self, table: &NormalizedTable) -> Vec<SubworkflowReport> {
        self.reportable_subworkflows()
            .into_iter()
            .flat_map(|subworkflow| {
                EntryScope::REPORT_ORDER
                    .into_iter()
                    .map(move |scope| self.report(table, subworkflow, scope))
            })
            .collect()
    }
}

fn recorded(table: &NormalizedTable, identifier: &str, kind: MetricKind) -> Vec<f64> {
    table
        .process_metric(identifier, kind)
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .collect()
}
