use projstats_common::{Result, StatsError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const HIDDEN_FILE_RULE: &str = "hidden file";

#[derive(Debug, Clone)]
pub struct SummarySearchConfig {
    /// File name patterns to ignore, matched case-insensitively as substrings.
    skip_patterns: Vec<String>,

    /// Whether dot-files (editor swap files, `.DS_Store`, ...) are candidates.
    include_hidden: bool,
}

impl Default for SummarySearchConfig {
    fn default() -> Self {
        Self {
            skip_patterns: vec![],
            include_hidden: false,
        }
    }
}

impl SummarySearchConfig {
    pub fn with_skip_patterns(mut self, patterns: Vec<String>) -> Self {
        self.skip_patterns = patterns.into_iter().map(|p| p.to_lowercase()).collect();
        self
    }

    pub fn with_hidden_files(mut self, include_hidden: bool) -> Self {
        self.include_hidden = include_hidden;
        self
    }
}

/// How the ingestor should treat a listed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListedAs {
    Candidate,
    /// Excluded by a finder rule; the rule is kept for the skip list.
    Ignored(String),
    /// The entry could not be resolved, e.g. a dangling symlink.
    Broken(String),
}

/// A file of the input directory and its size on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryFile {
    pub path: PathBuf,
    pub name: String,
    pub size: u64,
    pub listed_as: ListedAs,
}

impl SummaryFile {
    pub fn candidate(path: impl Into<PathBuf>, name: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            size,
            listed_as: ListedAs::Candidate,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SummaryFileFinder {
    config: SummarySearchConfig,
}

impl SummaryFileFinder {
    pub fn new(config: SummarySearchConfig) -> Self {
        Self { config }
    }

    /// The rule that excludes `name`, if any.
    pub fn ignore_rule(&self, name: &str) -> Option<String> {
        if !self.config.include_hidden && name.starts_with('.') {
            return Some(HIDDEN_FILE_RULE.to_string());
        }
        let lowered = name.to_lowercase();
        self.config
            .skip_patterns
            .iter()
            .find(|pattern| lowered.contains(pattern.as_str()))
            .map(|pattern| format!("matches '{}'", pattern))
    }

    /// Every file directly under `dir`, sorted by file name so row order is
    /// reproducible. Symlinks are resolved; ignored and dangling entries are
    /// still listed so that the caller can account for them.
    pub fn list(&self, dir: &Path) -> Result<Vec<SummaryFile>> {
        if !dir.is_dir() {
            return Err(StatsError::Io {
                path: dir.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "input directory does not exist",
                ),
            });
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let broken = e
                        .path()
                        .filter(|_| e.depth() > 0)
                        .map(|path| broken_entry(path, &e.to_string()));
                    match broken {
                        Some(file) => {
                            files.push(file);
                            continue;
                        }
                        None => {
                            return Err(StatsError::Io {
                                path: dir.to_path_buf(),
                                source: e.into(),
                            })
                        }
                    }
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(e) => {
                    files.push(broken_entry(entry.path(), &e.to_string()));
                    continue;
                }
            };
            let listed_as = match self.ignore_rule(&name) {
                Some(rule) => ListedAs::Ignored(rule),
                None => ListedAs::Candidate,
            };
            files.push(SummaryFile {
                path: entry.into_path(),
                name,
                size,
                listed_as,
            });
        }
        Ok(files)
    }
}

fn broken_entry(path: &Path, reason: &str) -> SummaryFile {
    SummaryFile {
        path: path.to_path_buf(),
        name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string()),
        size: 0,
        listed_as: ListedAs::Broken(reason.to_string()),
    }
}
