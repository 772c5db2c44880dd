//! Whole-batch audit: how many runs there are, how they split by clade,
//! entry point and ticket, and which inputs never made it into the table.

use crate::diagnostics::Diagnostic;
use crate::table::NormalizedTable;
use itertools::Itertools;
use projstats_common::types::{SkipReason, SkippedFile};
use serde::Serialize;
use std::fmt;

const SEPARATOR_WIDTH: usize = 50;
pub const SUMMARY_TITLE: &str = "TreeVal Project.Summary Stats!";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub clades: Vec<(String, usize)>,
    pub entry_points: Vec<(String, usize)>,
    pub tickets: Vec<(String, usize)>,
    pub empty_files: Vec<String>,
    /// `(file, reason)` for files the parser could not read.
    pub unreadable_files: Vec<(String, String)>,
    /// `(file, rule)` for files the directory scan excluded.
    pub ignored_files: Vec<(String, String)>,
    pub unknown_processes: usize,
    pub coercion_failures: usize,
    pub duplicate_runs: usize,
}

impl BatchSummary {
    /// Build from the unfiltered table.
    pub fn new(table: &NormalizedTable, skipped: &[SkippedFile]) -> Self {
        let empty_files = skipped
            .iter()
            .filter(|file| file.is_empty_file())
            .map(|file| file.name.clone())
            .collect();
        let unreadable_files = skipped
            .iter()
            .filter_map(|file| match &file.reason {
                SkipReason::Unreadable(reason) => Some((file.name.clone(), reason.clone())),
                _ => None,
            })
            .collect();
        let ignored_files = skipped
            .iter()
            .filter_map(|file| match &file.reason {
                SkipReason::Ignored(rule) => Some((file.name.clone(), rule.clone())),
                _ => None,
            })
            .collect();

        let (mut unknown_processes, mut coercion_failures, mut duplicate_runs) = (0, 0, 0);
        for diagnostic in table.diagnostics().iter() {
            match diagnostic {
                Diagnostic::UnknownProcess { .. } => unknown_processes += 1,
                Diagnostic::CoercionFailure { .. } => coercion_failures += 1,
                Diagnostic::DuplicateRun { .. } => duplicate_runs += 1,
            }
        }

        Self {
            total: table.row_count(),
            clades: value_counts(table.rows().map(|row| row.header.clade.clone())),
            entry_points: value_counts(table.rows().map(|row| row.header.entry_point.to_string())),
            tickets: value_counts(table.rows().map(|row| row.header.ticket.clone())),
            empty_files,
            unreadable_files,
            ignored_files,
            unknown_processes,
            coercion_failures,
            duplicate_runs,
        }
    }

    pub fn count(counts: &[(String, usize)], label: &str) -> usize {
        counts
            .iter()
            .find(|(l, _)| l == label)
            .map_or(0, |(_, count)| *count)
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

/// Counts by label, most frequent first, ties by label.
fn value_counts(values: impl Iterator<Item = String>) -> Vec<(String, usize)> {
    values
        .counts()
        .into_iter()
        .sorted_by(|(a, a_count), (b, b_count)| b_count.cmp(a_count).then_with(|| a.cmp(b)))
        .collect()
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let separator = "-".repeat(SEPARATOR_WIDTH);
        writeln!(f, "{}", separator)?;
        writeln!(f, "{}", SUMMARY_TITLE)?;
        writeln!(f, "{}", separator)?;
        writeln!(f, "Total data points: {}", self.total)?;
        writeln!(f, "{}", separator)?;

        for (title, counts) in [
            ("Unique CLADE count:", &self.clades),
            ("Run Type Count:", &self.entry_points),
            ("Ticket Type Count:", &self.tickets),
        ] {
            writeln!(f, "{}", title)?;
            for (label, count) in counts {
                writeln!(f, "{} {}", label, count)?;
            }
            writeln!(f, "{}", separator)?;
        }

        if !self.empty_files.is_empty() {
            writeln!(f, "Empty Files!: [{}]", self.empty_files.join(", "))?;
            writeln!(f, "{}", separator)?;
        }

        if !self.unreadable_files.is_empty() {
            writeln!(f, "Unreadable Files!:")?;
            for (name, reason) in &self.unreadable_files {
                writeln!(f, "{}: {}", name, reason)?;
            }
            writeln!(f, "{}", separator)?;
        }

        if !self.ignored_files.is_empty() {
            writeln!(f, "Ignored Files!:")?;
            for (name, rule) in &self.ignored_files {
                writeln!(f, "{}: {}", name, rule)?;
            }
            writeln!(f, "{}", separator)?;
        }

        if self.duplicate_runs > 0 {
            writeln!(f, "Duplicate Runs!: {}", self.duplicate_runs)?;
            writeln!(f, "{}", separator)?;
        }

        if self.unknown_processes > 0 || self.coercion_failures > 0 {
            writeln!(f, "Unknown Processes!: {}", self.unknown_processes)?;
            writeln!(f, "Coercion Failures: {}", self.coercion_failures)?;
            writeln!(f, "{}", separator)?;
        }

        Ok(())
    }
}
