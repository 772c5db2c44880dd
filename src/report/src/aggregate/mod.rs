//! Derived, stateless report data consumed by the renderers.

pub mod distribution;
mod reporter;
pub mod runtime;
pub mod super_module;

pub use distribution::BoxStats;
pub use reporter::{
    AggregationReporter, LabelDistribution, SubworkflowReport, DEFAULT_DISTRIBUTION_MAX,
};
pub use runtime::{runtime_views, RuntimeAxis, RuntimeView, TrendLine};
pub use super_module::{super_module_series, SuperModuleSeries, DEFAULT_SUPER_MODULE_PROCESS};
