//! The catalogue of canonical process identifiers and the subworkflows they
//! are grouped under. Loaded once and passed explicitly to every stage of a batch.

use crate::constants::DEFAULT_REGISTRY_YAML;
use crate::errors::{Result, StatsError};
use crate::process_id::{self, is_within};
use crate::yaml::{load_section_from_file, load_section_from_str, Yaml, YamlExt};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::debug;

const REGISTRY_KEY: &str = "registry";

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaRegistry {
    version: String,
    subworkflows: Vec<String>,
    processes: Vec<String>,
    positions: HashMap<String, usize>,
}

impl SchemaRegistry {
    pub fn new(
        version: impl Into<String>,
        subworkflows: Vec<String>,
        processes: Vec<String>,
    ) -> Result<Self> {
        let version = version.into();
        let declared: HashSet<&str> = subworkflows.iter().map(String::as_str).collect();
        if declared.len() != subworkflows.len() {
            return Err(StatsError::Registry(
                "subworkflow names must be unique".to_string(),
            ));
        }

        let mut positions = HashMap::with_capacity(processes.len());
        for (position, identifier) in processes.iter().enumerate() {
            if process_id::segments(identifier).any(str::is_empty) {
                return Err(StatsError::Registry(format!(
                    "process identifier '{}' has an empty segment",
                    identifier
                )));
            }
            let root = process_id::segments(identifier).next().unwrap_or_default();
            if !declared.contains(root) {
                return Err(StatsError::Registry(format!(
                    "process '{}' does not belong to a declared subworkflow",
                    identifier
                )));
            }
            if positions.insert(identifier.clone(), position).is_some() {
                return Err(StatsError::Registry(format!(
                    "process '{}' is declared more than once",
                    identifier
                )));
            }
        }

        debug!(
            "Loaded process registry {} with {} subworkflows and {} processes",
            version,
            subworkflows.len(),
            processes.len()
        );

        Ok(Self {
            version,
            subworkflows,
            processes,
            positions,
        })
    }

    /// The registry compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_yaml_str(DEFAULT_REGISTRY_YAML)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let raw: RawRegistry = load_section_from_str(yaml, REGISTRY_KEY)
            .map_err(|e| StatsError::Registry(format!("{:#}", e)))?;
        raw.build()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw: RawRegistry = load_section_from_file(path, REGISTRY_KEY)
            .map_err(|e| StatsError::Registry(format!("{}: {:#}", path.display(), e)))?;
        raw.build()
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Canonical process identifiers in column order.
    pub fn processes(&self) -> &[String] {
        &self.processes
    }

    pub fn subworkflows(&self) -> &[String] {
        &self.subworkflows
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.positions.contains_key(identifier)
    }

    pub fn position(&self, identifier: &str) -> Option<usize> {
        self.positions.get(identifier).copied()
    }

    /// Processes under `subworkflow`, in registry order.
    pub fn group(&self, subworkflow: &str) -> Vec<&str> {
        self.processes
            .iter()
            .map(String::as_str)
            .filter(|identifier| is_within(identifier, subworkflow))
            .collect()
    }
}

/// Registry as read from YAML, before validation.
struct RawRegistry {
    version: String,
    subworkflows: Vec<String>,
    processes: Vec<String>,
}

impl RawRegistry {
    fn build(self) -> Result<SchemaRegistry> {
        SchemaRegistry::new(self.version, self.subworkflows, self.processes)
    }
}

impl TryFrom<Yaml> for RawRegistry {
    type Error = anyhow::Error;

    fn try_from(yaml: Yaml) -> anyhow::Result<Self> {
        let version = yaml.required_string("version")?;
        let subworkflows = yaml
            .required_vec("subworkflows")?
            .iter()
            .map(|name| name.expect_string())
            .collect::<anyhow::Result<Vec<_>>>()?;
        let processes = yaml
            .required_vec("processes")?
            .iter()
            .map(|identifier| identifier.expect_string())
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(RawRegistry {
            version,
            subworkflows,
            processes,
        })
    }
}
