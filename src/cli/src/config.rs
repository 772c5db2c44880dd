use crate::commands::Cli;
use anyhow::{Context, Result};
use config::{Config as RConfig, Environment, File, FileFormat};
use projstats_report::aggregate::{DEFAULT_DISTRIBUTION_MAX, DEFAULT_SUPER_MODULE_PROCESS};
use projstats_report::UnknownIdentifierPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT_DIR: &str = "./StatGraphs/";
pub const ENV_PREFIX: &str = "PROJSTATS";
const CONFIG_FILE_FROM_CONFIG_DIR: &str = "projstats/config.toml";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Config {
    pub output_dir: PathBuf,
    /// Embedded registry when unset.
    pub registry_path: Option<PathBuf>,
    /// Empty means every ticket.
    pub tickets: Vec<String>,
    pub unknown_identifier_policy: UnknownIdentifierPolicy,
    pub distribution_max: f64,
    pub super_module_process: String,
}

impl Config {
    /// Command line flags win over every other source.
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(output) = &cli.output {
            self.output_dir = output.clone();
        }
        if !cli.tickets.is_empty() {
            self.tickets = cli.tickets.clone();
        }
        if let Some(registry) = &cli.registry {
            self.registry_path = Some(registry.clone());
        }
        if let Some(policy) = cli.unknown_processes {
            self.unknown_identifier_policy = policy.into();
        }
    }
}

pub struct ConfigLoader;

impl ConfigLoader {
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_FILE_FROM_CONFIG_DIR))
    }

    /// Defaults, then the config file, then `PROJSTATS_*` environment variables.
    ///
    /// An explicit `path` must exist; the user config file is optional.
    pub fn load_config(path: Option<&Path>) -> Result<Config> {
        let mut builder = RConfig::builder()
            .set_default("output_dir", DEFAULT_OUTPUT_DIR)?
            .set_default("registry_path", None::<String>)?
            .set_default::<&str, Vec<&str>>("tickets", vec![])?
            .set_default("unknown_identifier_policy", "abort")?
            .set_default("distribution_max", DEFAULT_DISTRIBUTION_MAX)?
            .set_default("super_module_process", DEFAULT_SUPER_MODULE_PROCESS)?;

        match path {
            Some(path) => {
                builder = builder.add_source(File::from(path).format(FileFormat::Toml));
            }
            None => {
                if let Some(default_path) = Self::default_config_path() {
                    builder = builder.add_source(
                        File::from(default_path)
                            .format(FileFormat::Toml)
                            .required(false),
                    );
                }
            }
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("tickets"),
        );

        builder
            .build()?
            .try_deserialize()
            .context("failed to parse config file")
    }
}
