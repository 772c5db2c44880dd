//! Scatter views of run duration against genome size, taxonomy and input volume.
//!
//! Duration is always the runtime axis. Numeric views carry a least-squares
//! trend of the other value against `ln(duration)`.

use crate::table::{NormalizedRow, NormalizedTable, SubsetFilter};
use projstats_common::types::EntryScope;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeAxis {
    GenomeSize,
    Clade,
    Prefix,
    LongreadTotal,
    HicTotal,
}

impl RuntimeAxis {
    pub const ALL: [RuntimeAxis; 5] = [
        RuntimeAxis::GenomeSize,
        RuntimeAxis::Clade,
        RuntimeAxis::Prefix,
        RuntimeAxis::LongreadTotal,
        RuntimeAxis::HicTotal,
    ];

    /// Header column plotted against duration.
    pub fn column(&self) -> &'static str {
        match self {
            RuntimeAxis::GenomeSize => "Fasta_(mb)",
            RuntimeAxis::Clade => "Clade",
            RuntimeAxis::Prefix => "Prefix",
            RuntimeAxis::LongreadTotal => "Longread_(TOTAL_GB)",
            RuntimeAxis::HicTotal => "HiC_(TOTAL_GB)",
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, RuntimeAxis::Clade | RuntimeAxis::Prefix)
    }

    fn value(&self, row: &NormalizedRow) -> AxisValue {
        let h = &row.header;
        match self {
            RuntimeAxis::GenomeSize => AxisValue::Number(h.fasta_size_mb),
            RuntimeAxis::Clade => AxisValue::Label(h.clade.clone()),
            RuntimeAxis::Prefix => AxisValue::Label(h.prefix.clone()),
            RuntimeAxis::LongreadTotal => AxisValue::Number(h.longread_total_gb),
            RuntimeAxis::HicTotal => AxisValue::Number(h.hic_total_gb),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AxisValue {
    Number(f64),
    Label(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimePoint {
    pub unique_name: String,
    pub clade: String,
    pub duration_hours: f64,
    pub value: AxisValue,
}

/// `value = intercept + slope * ln(duration)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    /// Ordinary least squares over points with a positive `x`.
    pub fn fit_log_x(points: impl IntoIterator<Item = (f64, f64)>) -> Option<Self> {
        let points: Vec<(f64, f64)> = points
            .into_iter()
            .filter(|(x, y)| *x > 0.0 && y.is_finite())
            .map(|(x, y)| (x.ln(), y))
            .collect();
        if points.len() < 2 {
            return None;
        }

        let n = points.len() as f64;
        let mean_x = points.iter().map(|(x, _)| x).sum::<f64>() / n;
        let mean_y = points.iter().map(|(_, y)| y).sum::<f64>() / n;
        let sxx: f64 = points.iter().map(|(x, _)| (x - mean_x).powi(2)).sum();
        let sxy: f64 = points
            .iter()
            .map(|(x, y)| (x - mean_x) * (y - mean_y))
            .sum();
        if sxx <= f64::EPSILON {
            return None;
        }

        let slope = sxy / sxx;
        Some(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x.ln()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuntimeView {
    pub axis: RuntimeAxis,
    pub scope: EntryScope,
    pub points: Vec<RuntimePoint>,
    pub trend: Option<TrendLine>,
}

impl RuntimeView {
    pub fn build(table: &NormalizedTable, axis: RuntimeAxis, scope: EntryScope) -> Self {
        let view = SubsetFilter::default()
            .with_entry_point(scope.entry_point())
            .apply(table);
        let points: Vec<RuntimePoint> = view
            .rows()
            .map(|row| RuntimePoint {
                unique_name: row.header.unique_name.clone(),
                clade: row.header.clade.clone(),
                duration_hours: row.header.duration_hours,
                value: axis.value(row),
            })
            .collect();

        let trend = if axis.is_numeric() {
            TrendLine::fit_log_x(points.iter().filter_map(|p| match p.value {
                AxisValue::Number(value) => Some((p.duration_hours, value)),
                AxisValue::Label(_) => None,
            }))
        } else {
            None
        };

        Self {
            axis,
            scope,
            points,
            trend,
        }
    }
}

/// Scope order used by the runtime views.
pub const RUNTIME_SCOPES: [EntryScope; 3] = [EntryScope::All, EntryScope::Full, EntryScope::Rapid];

/// Every axis under every scope, grouped by axis.
pub fn runtime_views(table: &NormalizedTable) -> Vec<RuntimeView> {
    RuntimeAxis::ALL
        .into_iter()
        .flat_map(|axis| {
            RUNTIME_SCOPES
                .into_iter()
                .map(move |scope| RuntimeView::build(table, axis, scope))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnExpander;
    use crate::test_utils::{header, record_with, registry};
    use pretty_assertions_sorted::assert_eq;
    use projstats_common::types::EntryPoint;

    fn run(name: &str, entry_point: EntryPoint, hours: f64, fasta: f64) -> projstats_common::types::RunRecord {
        let mut header = header(name, entry_point);
        header.duration_hours = hours;
        header.fasta_size_mb = fasta;
        record_with(header, vec![])
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_fit_recovers_log_relation() {
        let points = [1.0, 2.0, 4.0, 8.0].map(|x: f64| (x, 3.0 + 2.0 * x.ln()));
        let trend = TrendLine::fit_log_x(points).unwrap();
        assert!(close(trend.slope, 2.0));
        assert!(close(trend.intercept, 3.0));
        assert!(close(trend.at(std::f64::consts::E), 5.0));
    }

    #[test]
    fn test_fit_needs_spread() {
        assert_eq!(TrendLine::fit_log_x([(2.0, 1.0)]), None);
        assert_eq!(TrendLine::fit_log_x([(2.0, 1.0), (2.0, 5.0)]), None);
        assert_eq!(TrendLine::fit_log_x([(0.0, 1.0), (-1.0, 5.0)]), None);
    }

    #[test]
    fn test_views_per_scope() {
        let registry = registry();
        let records = vec![
            run("a", EntryPoint::Full, 1.0, 100.0),
            run("b", EntryPoint::Full, 10.0, 900.0),
            run("c", EntryPoint::Rapid, 3.0, 400.0),
        ];
        let table = ColumnExpander::new(&registry).expand(&records).unwrap();
        let views = runtime_views(&table);

        assert_eq!(views.len(), 15);
        let genome: Vec<(EntryScope, usize, bool)> = views
            .iter()
            .filter(|v| v.axis == RuntimeAxis::GenomeSize)
            .map(|v| (v.scope, v.points.len(), v.trend.is_some()))
            .collect();
        assert_eq!(
            genome,
            vec![
                (EntryScope::All, 3, true),
                (EntryScope::Full, 2, true),
                (EntryScope::Rapid, 1, false),
            ]
        );
    }

    #[test]
    fn test_categorical_views_have_no_trend() {
        let registry = registry();
        let records = vec![
            run("a", EntryPoint::Full, 1.0, 100.0),
            run("b", EntryPoint::Full, 10.0, 900.0),
        ];
        let table = ColumnExpander::new(&registry).expand(&records).unwrap();
        let view = RuntimeView::build(&table, RuntimeAxis::Prefix, EntryScope::All);

        assert_eq!(view.trend, None);
        assert_eq!(view.points[1].value, AxisValue::Label("b_prefix".to_string()));
        assert_eq!(view.axis.column(), "Prefix");
    }
}
