//! Per-run scatter series of the HiC alignment super module, coloured by genome size.

use crate::table::NormalizedTable;
use projstats_common::types::MetricKind;
use serde::Serialize;
use tracing::warn;

pub const DEFAULT_SUPER_MODULE_PROCESS: &str = "HIC_MAPPING:CRAM_FILTER_ALIGN_BWAMEM2_FIXMATE_SORT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuperModuleMetric {
    Memory,
    Cpu,
}

impl SuperModuleMetric {
    pub const ALL: [SuperModuleMetric; 2] = [SuperModuleMetric::Memory, SuperModuleMetric::Cpu];

    pub fn kind(&self) -> MetricKind {
        match self {
            SuperModuleMetric::Memory => MetricKind::PercentMemory,
            SuperModuleMetric::Cpu => MetricKind::PercentCpu,
        }
    }

    pub fn artifact_name(&self) -> &'static str {
        match self {
            SuperModuleMetric::Memory => "HIC_super_module_average_mem.png",
            SuperModuleMetric::Cpu => "HIC_super_module_average_cpu.png",
        }
    }

    pub fn y_range(&self) -> (f64, f64) {
        match self {
            SuperModuleMetric::Memory => (0.0, 100.0),
            SuperModuleMetric::Cpu => (0.0, 1600.0),
        }
    }

    pub fn axis_label(&self) -> &'static str {
        match self {
            SuperModuleMetric::Memory => "Memory Utilisation (%)",
            SuperModuleMetric::Cpu => "CPU Utilisation (%)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub unique_name: String,
    pub value: f64,
    pub fasta_mb: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuperModuleSeries {
    pub column: String,
    pub metric: SuperModuleMetric,
    pub artifact_name: String,
    pub y_label: String,
    pub y_range: (f64, f64),
    pub points: Vec<ScatterPoint>,
}

/// Memory and CPU series for `process`. Runs without a value are left out.
pub fn super_module_series(table: &NormalizedTable, process: &str) -> Vec<SuperModuleSeries> {
    SuperModuleMetric::ALL
        .into_iter()
        .map(|metric| {
            let column = metric.kind().column_name(process);
            let points = match table.column_index(&column) {
                Some(index) => table
                    .rows()
                    .filter_map(|row| {
                        row.metrics[index].map(|value| ScatterPoint {
                            unique_name: row.header.unique_name.clone(),
                            value,
                            fasta_mb: row.header.fasta_size_mb,
                        })
                    })
                    .collect(),
                None => {
                    warn!("Super module column {} is not in the table", column);
                    Vec::new()
                }
            };
            SuperModuleSeries {
                column,
                metric,
                artifact_name: metric.artifact_name().to_string(),
                y_label: metric.axis_label().to_string(),
                y_range: metric.y_range(),
                points,
            }
        })
        .collect()
}
