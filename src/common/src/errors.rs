use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = StatsError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum StatsError {
    /// The parser returned process names and metric lists of different lengths.
    #[error("{file}: execution log has {names} process names but {values} metric lists")]
    SchemaMismatch {
        file: String,
        names: usize,
        values: usize,
    },

    #[error("{file}: process {identifier} has {len} metrics, expected 6")]
    MetricArity {
        file: String,
        identifier: String,
        len: usize,
    },

    #[error("{file}: process {identifier} appears more than once in the execution log")]
    DuplicateProcess { file: String, identifier: String },

    #[error("{file}: process {identifier} is not declared in registry version {registry_version}")]
    UnknownProcessIdentifier {
        file: String,
        identifier: String,
        registry_version: String,
    },

    #[error("invalid process registry: {0}")]
    Registry(String),

    #[error("failed to parse {file}: {reason}")]
    Parse { file: String, reason: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StatsError {
    /// Structural errors invalidate the whole batch rather than a single file.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            StatsError::SchemaMismatch { .. }
                | StatsError::MetricArity { .. }
                | StatsError::DuplicateProcess { .. }
                | StatsError::UnknownProcessIdentifier { .. }
        )
    }
}
