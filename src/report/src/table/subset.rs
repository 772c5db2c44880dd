use super::NormalizedTable;
use projstats_common::types::EntryPoint;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Selects the rows of a table by ticket and entry point.
///
/// An empty ticket list keeps every ticket. The returned view shares rows with
/// its source until one side writes to them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsetFilter {
    pub tickets: Vec<String>,
    pub entry_point: Option<EntryPoint>,
}

impl SubsetFilter {
    pub fn tickets<I, S>(tickets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tickets: tickets.into_iter().map(Into::into).collect(),
            entry_point: None,
        }
    }

    pub fn with_entry_point(mut self, entry_point: Option<EntryPoint>) -> Self {
        self.entry_point = entry_point;
        self
    }

    pub fn is_identity(&self) -> bool {
        self.tickets.is_empty() && self.entry_point.is_none()
    }

    pub fn apply(&self, table: &NormalizedTable) -> NormalizedTable {
        let rows = table
            .rows
            .iter()
            .filter(|row| {
                let ticket_ok =
                    self.tickets.is_empty() || self.tickets.iter().any(|t| *t == row.header.ticket);
                let entry_ok = self
                    .entry_point
                    .map_or(true, |entry_point| entry_point == row.header.entry_point);
                ticket_ok && entry_ok
            })
            .map(Arc::clone)
            .collect();
        table.with_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::ColumnExpander;
    use crate::test_utils::{header, record_with, registry};
    use pretty_assertions_sorted::assert_eq;
    use projstats_common::types::RunRecord;

    const COLUMN: &str = "KMER:FASTK_FASTK-AVERAGE_P_MEM";

    fn ticketed(name: &str, entry_point: EntryPoint, ticket: &str, value: f64) -> RunRecord {
        let mut header = header(name, entry_point);
        header.ticket = ticket.to_string();
        record_with(
            header,
            vec![(
                "KMER:FASTK_FASTK",
                std::array::from_fn(|_| value.into()),
            )],
        )
    }

    fn table() -> NormalizedTable {
        let registry = registry();
        ColumnExpander::new(&registry)
            .expand(&[
                ticketed("a", EntryPoint::Full, "TOLA-1", 10.0),
                ticketed("b", EntryPoint::Rapid, "TOLA-2", 20.0),
                ticketed("c", EntryPoint::Full, "TOLA-2", 30.0),
            ])
            .unwrap()
    }

    fn names(table: &NormalizedTable) -> Vec<String> {
        table
            .rows()
            .map(|row| row.header.unique_name.clone())
            .collect()
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let source = table();
        let view = SubsetFilter::default().apply(&source);
        assert!(SubsetFilter::default().is_identity());
        assert_eq!(names(&view), names(&source));
        assert_eq!(view.column_count(), source.column_count());
    }

    #[test]
    fn test_filter_by_ticket_and_entry_point() {
        let source = table();

        let by_ticket = SubsetFilter::tickets(["TOLA-2"]).apply(&source);
        assert_eq!(names(&by_ticket), vec!["b", "c"]);

        let both = SubsetFilter::tickets(["TOLA-2"])
            .with_entry_point(Some(EntryPoint::Full))
            .apply(&source);
        assert_eq!(names(&both), vec!["c"]);

        let none = SubsetFilter::tickets(["TOLA-9"]).apply(&source);
        assert!(none.is_empty());
        assert_eq!(none.column_count(), source.column_count());
    }

    #[test]
    fn test_views_do_not_alias() {
        let source = table();
        let filter = SubsetFilter::default().with_entry_point(Some(EntryPoint::Full));
        let mut first = filter.apply(&source);
        let second = filter.apply(&source);

        assert!(first.set_metric(0, COLUMN, None));
        assert!(first.set_metric(1, COLUMN, Some(99.0)));

        assert_eq!(first.metric_column(COLUMN), Some(vec![None, Some(99.0)]));
        assert_eq!(second.metric_column(COLUMN), Some(vec![Some(10.0), Some(30.0)]));
        assert_eq!(
            source.metric_column(COLUMN),
            Some(vec![Some(10.0), Some(20.0), Some(30.0)])
        );
    }

    #[test]
    fn test_writes_to_source_do_not_reach_views() {
        let mut source = table();
        let view = SubsetFilter::default().apply(&source);
        assert!(source.set_metric(0, COLUMN, Some(-1.0)));
        assert_eq!(view.metric(0, COLUMN), Some(Some(10.0)));
    }
}
