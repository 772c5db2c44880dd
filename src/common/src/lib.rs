pub mod constants;
pub mod errors;
pub mod process_id;
pub mod registry;
pub mod types;
pub mod yaml;

pub use errors::{Result, StatsError};
