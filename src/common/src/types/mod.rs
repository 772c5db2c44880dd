pub mod entry_point;
pub mod metrics;
pub mod run_record;
pub mod skipped;

pub use entry_point::{EntryPoint, EntryScope};
pub use metrics::{Coercion, MetricKind, ProcessMetrics, RawMetric};
pub use run_record::{RunHeader, RunRecord};
pub use skipped::{SkipReason, SkippedFile};
