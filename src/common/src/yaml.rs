use anyhow::{anyhow, bail, Result};
use std::fs;
use std::path::Path;
use yaml_rust2::YamlLoader;
// re-export Yaml for convenience
pub use yaml_rust2::Yaml;

/// Loads the value under top-level `key` of the first document in `path`.
pub fn load_section_from_file<P: AsRef<Path>, T: TryFrom<Yaml, Error = anyhow::Error>>(
    path: P,
    key: &str,
) -> Result<T> {
    let yaml_str = fs::read_to_string(path.as_ref())?;
    load_section_from_str(&yaml_str, key)
}

pub fn load_section_from_str<T: TryFrom<Yaml, Error = anyhow::Error>>(
    yaml_str: &str,
    key: &str,
) -> Result<T> {
    let docs = YamlLoader::load_from_str(yaml_str)?;
    docs.into_iter()
        .next()
        .ok_or(anyhow!("Empty yaml file"))?
        .into_hash()
        .ok_or(anyhow!("Expected top-level element to be a hash"))?
        .remove(&Yaml::String(key.into()))
        .ok_or(anyhow!("Missing top-level key {}", key))?
        .try_into()
}

pub trait YamlExt: Sized {
    fn required_string(&self, key: &'static str) -> Result<String>;

    fn optional_string(&self, key: &'static str) -> Result<Option<String>>;

    fn required_vec(&self, key: &'static str) -> Result<&Vec<Self>>;

    fn expect_string(&self) -> Result<String>;
}

impl YamlExt for Yaml {
    /// Version numbers such as `1.1` are parsed as reals, so scalars are accepted too.
    fn required_string(&self, key: &'static str) -> Result<String> {
        match &self[key] {
            Yaml::String(s) | Yaml::Real(s) => Ok(s.clone()),
            Yaml::Integer(i) => Ok(i.to_string()),
            Yaml::BadValue => bail!("Missing key {}", key),
            _ => bail!("Expected {} to be a string", key),
        }
    }

    fn optional_string(&self, key: &'static str) -> Result<Option<String>> {
        match &self[key] {
            Yaml::String(s) | Yaml::Real(s) => Ok(Some(s.clone())),
            Yaml::Integer(i) => Ok(Some(i.to_string())),
            Yaml::BadValue => Ok(None),
            _ => bail!("Expected {} to be a string", key),
        }
    }

    fn required_vec(&self, key: &'static str) -> Result<&Vec<Self>> {
        match &self[key] {
            Yaml::Array(v) => Ok(v),
            Yaml::BadValue => bail!("Missing key {}", key),
            _ => bail!("Expected {} to be an array", key),
        }
    }

    fn expect_string(&self) -> Result<String> {
        match self {
            Yaml::String(s) => Ok(s.clone()),
            _ => bail!("Expected a string, got {:?}", self),
        }
    }
}
