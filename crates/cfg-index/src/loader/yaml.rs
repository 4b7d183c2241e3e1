use std::path::{Path, PathBuf};

use anyhow::Context as _;

use super::{Format, Loader, read_file};
use crate::{error::LoadError, path};

fn decode(origin: String, bytes: &[u8]) -> Result<serde_json::Value, LoadError> {
    let decoded = serde_yaml::from_slice(bytes)
        .map_err(anyhow::Error::from)
        .and_then(|value| map_value(value, ""));
    decoded.map_err(|source| LoadError::Decode {
        origin,
        format: Format::Yaml,
        source,
    })
}

fn map_key(key: serde_yaml::Value, parent_path: &str) -> anyhow::Result<String> {
    Ok(match key {
        serde_yaml::Value::String(value) => value,
        serde_yaml::Value::Number(value) => value.to_string(),
        serde_yaml::Value::Bool(value) => value.to_string(),
        serde_yaml::Value::Null => "null".into(),
        _ => anyhow::bail!(
            "unsupported key type at {parent_path:?}: {key:?}; only primitive value types are supported as keys"
        ),
    })
}

fn map_number(number: &serde_yaml::Number, path: &str) -> anyhow::Result<serde_json::Number> {
    Ok(if let Some(number) = number.as_u64() {
        number.into()
    } else if let Some(number) = number.as_i64() {
        number.into()
    } else if let Some(number) = number.as_f64() {
        serde_json::Number::from_f64(number)
            .with_context(|| format!("unsupported number at {path:?}: {number:?}"))?
    } else {
        anyhow::bail!("unsupported number at {path:?}: {number:?}")
    })
}

/// Converts a YAML value to the JSON object model. Paths are only used in error messages.
fn map_value(value: serde_yaml::Value, path: &str) -> anyhow::Result<serde_json::Value> {
    Ok(match value {
        serde_yaml::Value::Null => serde_json::Value::Null,
        serde_yaml::Value::Bool(value) => value.into(),
        serde_yaml::Value::Number(value) => serde_json::Value::Number(map_number(&value, path)?),
        serde_yaml::Value::String(value) => value.into(),
        serde_yaml::Value::Sequence(items) => serde_json::Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, value)| map_value(value, &path::join_index(path, i)))
                .collect::<anyhow::Result<_>>()?,
        ),
        serde_yaml::Value::Mapping(items) => serde_json::Value::Object(
            items
                .into_iter()
                .map(|(key, value)| {
                    let key = map_key(key, path)?;
                    let value = map_value(value, &path::join_field(path, &key))?;
                    anyhow::Ok((key, value))
                })
                .collect::<anyhow::Result<_>>()?,
        ),
        serde_yaml::Value::Tagged(tagged) => map_value(tagged.value, path)?,
    })
}

/// Inline YAML source.
#[derive(Debug, Clone)]
pub struct YamlStr {
    content: String,
}

impl YamlStr {
    /// Creates a source with the specified contents.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl Loader for YamlStr {
    fn origin(&self) -> String {
        "inline YAML".to_owned()
    }

    fn read(&self) -> Result<serde_json::Value, LoadError> {
        decode(self.origin(), self.content.as_bytes())
    }
}

/// YAML file source. The file is read on each load.
#[derive(Debug, Clone)]
pub struct YamlFile {
    path: PathBuf,
}

impl YamlFile {
    /// Creates a source reading from the specified path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Loader for YamlFile {
    fn origin(&self) -> String {
        format!("YAML file `{}`", self.path.display())
    }

    fn read(&self) -> Result<serde_json::Value, LoadError> {
        let bytes = read_file(&self.path)?;
        decode(self.origin(), &bytes)
    }
}
