use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a pipeline run was launched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryPoint {
    Full,
    Rapid,
}

impl EntryPoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryPoint::Full => "FULL",
            EntryPoint::Rapid => "RAPID",
        }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryPoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FULL" => Ok(EntryPoint::Full),
            "RAPID" => Ok(EntryPoint::Rapid),
            _ => Err(format!("unknown entry point '{}'", s.trim())),
        }
    }
}

/// Row selection used by the per-entry-point reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntryScope {
    Full,
    Rapid,
    All,
}

impl EntryScope {
    /// Report order used for every subworkflow.
    pub const REPORT_ORDER: [EntryScope; 3] =
        [EntryScope::Full, EntryScope::Rapid, EntryScope::All];

    pub fn entry_point(&self) -> Option<EntryPoint> {
        match self {
            EntryScope::Full => Some(EntryPoint::Full),
            EntryScope::Rapid => Some(EntryPoint::Rapid),
            EntryScope::All => None,
        }
    }

    pub fn matches(&self, entry_point: EntryPoint) -> bool {
        self.entry_point()
            .map_or(true, |scoped| scoped == entry_point)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryScope::Full => "FULL",
            EntryScope::Rapid => "RAPID",
            EntryScope::All => "ALL",
        }
    }
}

impl fmt::Display for EntryScope {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
