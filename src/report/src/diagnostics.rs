use serde::Serialize;
use std::fmt;

/// A recoverable problem found while normalizing a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A run reported a process the registry does not declare.
    UnknownProcess { file: String, identifier: String },
    /// A metric could not be read as a number and was treated as missing.
    CoercionFailure {
        file: String,
        column: String,
        raw: String,
    },
    /// Two files describe runs with the same unique name.
    DuplicateRun {
        file: String,
        unique_name: String,
        first_file: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Diagnostic::UnknownProcess { file, identifier } => {
                write!(f, "{}: unknown process {}", file, identifier)
            }
            Diagnostic::CoercionFailure { file, column, raw } => {
                write!(f, "{}: {} is not numeric ({:?})", file, column, raw)
            }
            Diagnostic::DuplicateRun {
                file,
                unique_name,
                first_file,
            } => write!(f, "{}: run {} duplicates {}", file, unique_name, first_file),
        }
    }
}
