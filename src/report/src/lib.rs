pub mod aggregate;
pub mod diagnostics;
pub mod summary;
pub mod table;

#[cfg(test)]
pub(crate) mod test_utils;

pub use aggregate::AggregationReporter;
pub use diagnostics::Diagnostic;
pub use summary::BatchSummary;
pub use table::{ColumnExpander, NormalizedTable, SubsetFilter, UnknownIdentifierPolicy};
