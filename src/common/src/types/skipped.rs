use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a file in the input directory produced no run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    Empty,
    Unreadable(String),
    /// Listed but excluded by a finder rule (hidden file or skip pattern).
    Ignored(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedFile {
    pub name: String,
    pub reason: SkipReason,
}

impl SkippedFile {
    pub fn empty(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: SkipReason::Empty,
        }
    }

    pub fn unreadable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: SkipReason::Unreadable(reason.into()),
        }
    }

    pub fn ignored(name: impl Into<String>, rule: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reason: SkipReason::Ignored(rule.into()),
        }
    }

    pub fn is_empty_file(&self) -> bool {
        self.reason == SkipReason::Empty
    }
}

impl fmt::Display for SkippedFile {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.reason {
            SkipReason::Empty => write!(f, "{} (empty)", self.name),
            SkipReason::Unreadable(reason) => write!(f, "{} ({})", self.name, reason),
            SkipReason::Ignored(rule) => write!(f, "{} (ignored: {})", self.name, rule),
        }
    }
}
