use crate::constants::{METRICS_PER_PROCESS, MISSING_VALUE_MARKER};
use serde::{Deserialize, Serialize};

/// A single metric as written in the execution log, before numeric coercion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawMetric {
    Number(f64),
    Text(String),
    Missing,
    /// Any other JSON token (boolean, list, object); never numeric.
    Other(serde_json::Value),
}

/// Outcome of coercing a [`RawMetric`] into a number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coercion {
    Value(f64),
    /// Explicitly not recorded (`NA`, blank or null).
    Missing,
    /// Present but not numeric; treated as missing by callers.
    Failed,
}

impl Coercion {
    pub fn value(self) -> Option<f64> {
        match self {
            Coercion::Value(value) => Some(value),
            Coercion::Missing | Coercion::Failed => None,
        }
    }
}

impl RawMetric {
    pub fn coerce(&self) -> Coercion {
        match self {
            RawMetric::Number(value) if value.is_finite() => Coercion::Value(*value),
            RawMetric::Number(_) | RawMetric::Missing => Coercion::Missing,
            RawMetric::Text(text) => {
                let text = text.trim();
                if text.is_empty() || text.eq_ignore_ascii_case(MISSING_VALUE_MARKER) {
                    return Coercion::Missing;
                }
                match text.parse::<f64>() {
                    Ok(value) if value.is_finite() => Coercion::Value(value),
                    _ => Coercion::Failed,
                }
            }
            RawMetric::Other(_) => Coercion::Failed,
        }
    }
}

impl From<f64> for RawMetric {
    fn from(value: f64) -> Self {
        RawMetric::Number(value)
    }
}

impl From<&str> for RawMetric {
    fn from(value: &str) -> Self {
        RawMetric::Text(value.to_string())
    }
}

/// The six per-process metrics, in execution-log order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    Cpu,
    Memory,
    Realtime,
    PercentCpu,
    PercentMemory,
    PeakMemory,
}

impl MetricKind {
    pub const ALL: [MetricKind; METRICS_PER_PROCESS] = [
        MetricKind::Cpu,
        MetricKind::Memory,
        MetricKind::Realtime,
        MetricKind::PercentCpu,
        MetricKind::PercentMemory,
        MetricKind::PeakMemory,
    ];

    pub fn suffix(&self) -> &'static str {
        match self {
            MetricKind::Cpu => "AVERAGE_CPU",
            MetricKind::Memory => "AVERAGE_MEMORY",
            MetricKind::Realtime => "AVERAGE_REALTIME",
            MetricKind::PercentCpu => "AVERAGE_P_CPU",
            MetricKind::PercentMemory => "AVERAGE_P_MEM",
            MetricKind::PeakMemory => "AVERAGE_PEAK_MEMORY",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Column name of this metric for `identifier`, e.g. `HIC_MAPPING:BWAMEM2_INDEX-AVERAGE_P_MEM`.
    pub fn column_name(&self, identifier: &str) -> String {
        format!("{}-{}", identifier, self.suffix())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessMetrics([RawMetric; METRICS_PER_PROCESS]);

impl ProcessMetrics {
    pub fn new(metrics: [RawMetric; METRICS_PER_PROCESS]) -> Self {
        Self(metrics)
    }

    pub fn get(&self, kind: MetricKind) -> &RawMetric {
        &self.0[kind.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricKind, &RawMetric)> {
        MetricKind::ALL.into_iter().zip(self.0.iter())
    }
}

impl TryFrom<Vec<RawMetric>> for ProcessMetrics {
    /// The length of the rejected list.
    type Error = usize;

    fn try_from(metrics: Vec<RawMetric>) -> Result<Self, Self::Error> {
        let len = metrics.len();
        <[RawMetric; METRICS_PER_PROCESS]>::try_from(metrics)
            .map(Self)
            .map_err(|_| len)
    }
}
