//! The rectangular batch table: header columns plus six metric columns for
//! every registered process, whether or not a run executed it.

mod expander;
mod subset;

pub use expander::{ColumnExpander, UnknownIdentifierPolicy};
pub use subset::SubsetFilter;

use crate::diagnostics::Diagnostic;
use projstats_common::constants::HEADER_COLUMNS;
use projstats_common::types::{MetricKind, RunHeader};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricColumn {
    pub name: String,
    pub identifier: String,
    pub kind: MetricKind,
}

/// A single table value. Missing metrics are `Number(None)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(Option<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRow {
    pub source_file: String,
    pub header: RunHeader,
    /// One value per metric column, in column order.
    pub metrics: Vec<Option<f64>>,
}

impl NormalizedRow {
    pub fn header_cells(&self) -> [Cell; HEADER_COLUMNS.len()] {
        let h = &self.header;
        [
            Cell::Text(h.unique_name.clone()),
            Cell::Text(h.entry_point.to_string()),
            Cell::Text(h.pipeline_version.clone()),
            Cell::Number(Some(h.duration_hours)),
            Cell::Text(h.clade.clone()),
            Cell::Text(h.prefix.clone()),
            Cell::Number(Some(h.fasta_size_mb)),
            Cell::Text(h.ticket.clone()),
            Cell::Number(Some(h.longread_avg_gb)),
            Cell::Number(Some(h.hic_avg_gb)),
            Cell::Number(Some(h.longread_total_gb)),
            Cell::Number(Some(h.hic_total_gb)),
        ]
    }
}

/// Metric column layout shared by a table and every view derived from it.
#[derive(Debug)]
struct Schema {
    columns: Vec<MetricColumn>,
    by_name: HashMap<String, usize>,
}

/// Rows are shared between a table and its views and copied on first write,
/// so a view can be modified without the change showing up anywhere else.
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    schema: Arc<Schema>,
    rows: Vec<Arc<NormalizedRow>>,
    diagnostics: Arc<[Diagnostic]>,
}

impl NormalizedTable {
    pub(crate) fn new(
        columns: Vec<MetricColumn>,
        rows: Vec<NormalizedRow>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        let by_name = columns
            .iter()
            .enumerate()
            .map(|(index, column)| (column.name.clone(), index))
            .collect();
        Self {
            schema: Arc::new(Schema { columns, by_name }),
            rows: rows.into_iter().map(Arc::new).collect(),
            diagnostics: diagnostics.into(),
        }
    }

    fn with_rows(&self, rows: Vec<Arc<NormalizedRow>>) -> Self {
        Self {
            schema: Arc::clone(&self.schema),
            rows,
            diagnostics: Arc::clone(&self.diagnostics),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        HEADER_COLUMNS.len() + self.schema.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        HEADER_COLUMNS
            .iter()
            .copied()
            .chain(self.schema.columns.iter().map(|c| c.name.as_str()))
            .collect()
    }

    pub fn metric_columns(&self) -> &[MetricColumn] {
        &self.schema.columns
    }

    pub fn rows(&self) -> impl Iterator<Item = &NormalizedRow> {
        self.rows.iter().map(|row| row.as_ref())
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.schema.by_name.get(name).copied()
    }

    /// Value of metric column `name` in `row`; `None` for an unknown column or row.
    pub fn metric(&self, row: usize, name: &str) -> Option<Option<f64>> {
        let index = self.column_index(name)?;
        self.rows.get(row).map(|row| row.metrics[index])
    }

    /// All values of metric column `name`, in row order.
    pub fn metric_column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row.metrics[index]).collect())
    }

    pub fn process_metric(&self, identifier: &str, kind: MetricKind) -> Option<Vec<Option<f64>>> {
        self.metric_column(&kind.column_name(identifier))
    }

    /// Overwrites one metric value. Returns `false` when the row or column does not exist.
    pub fn set_metric(&mut self, row: usize, name: &str, value: Option<f64>) -> bool {
        let Some(index) = self.column_index(name) else {
            return false;
        };
        match self.rows.get_mut(row) {
            Some(row) => {
                Arc::make_mut(row).metrics[index] = value;
                true
            }
            None => false,
        }
    }

    /// Every row as cells, header columns first.
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        self.rows
            .iter()
            .map(|row| {
                row.header_cells()
                    .into_iter()
                    .chain(row.metrics.iter().map(|value| Cell::Number(*value)))
                    .collect()
            })
            .collect()
    }
}
