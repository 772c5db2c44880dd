mod summary_finder;

pub use summary_finder::{ListedAs, SummaryFile, SummaryFileFinder, SummarySearchConfig};
