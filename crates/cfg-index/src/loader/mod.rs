//! Loaders populating templates from JSON and YAML sources.

use std::{fmt, fs, path::Path};

use serde::{Serialize, de::DeserializeOwned};

pub use self::{
    json::{JsonFile, JsonStr},
    projection::Projection,
    yaml::{YamlFile, YamlStr},
};
use crate::{DescribeTemplate, error::LoadError};

mod json;
mod projection;
#[cfg(test)]
mod tests;
mod yaml;

/// Configuration template: a type that can be populated by [`Loader`]s and [indexed](crate::index).
///
/// This trait is automatically implemented for all types satisfying its bounds. Since loaders populate templates
/// incrementally, template structs should usually be marked with `#[serde(default)]`.
pub trait Template: DescribeTemplate + Serialize + DeserializeOwned {}

impl<T: DescribeTemplate + Serialize + DeserializeOwned> Template for T {}

/// Format of a configuration source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Format {
    /// JSON.
    Json,
    /// YAML.
    Yaml,
}

impl fmt::Display for Format {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Json => "JSON",
            Self::Yaml => "YAML",
        })
    }
}

/// Source of configuration contents that can populate a [`Template`].
pub trait Loader: fmt::Debug {
    /// Returns a human-readable description of the source, such as a file path.
    fn origin(&self) -> String;

    /// Reads and decodes the source contents into the JSON object model.
    ///
    /// # Errors
    ///
    /// Should return an error if the source cannot be read or decoded.
    fn read(&self) -> Result<serde_json::Value, LoadError>;

    /// Populates the template from this source. See [`populate()`] for details.
    ///
    /// # Errors
    ///
    /// Propagates errors reading or decoding the source, and returns an error if the contents do not fit the template.
    fn populate<T: Template>(&self, template: &mut T) -> Result<(), LoadError>
    where
        Self: Sized,
    {
        populate(self, template)
    }
}

/// Populates a template from the specified loader.
///
/// Contents are merged into the current state of the template on the field level: objects are merged recursively,
/// other values (including arrays) are replaced, and `null`s remove the corresponding field, so that it is reset
/// to its default value. On error, the template is left untouched.
///
/// Note that a `null` resets non-optional fields as well (e.g., `"port": null` resets an integer `port` to 0
/// for a template with `#[serde(default)]`). To keep the current value of a field, omit it from the source.
///
/// Top-level keys not present in the serialized template are ignored (unless the template denies unknown fields)
/// and are logged as a warning.
///
/// # Errors
///
/// Propagates errors reading or decoding the source, and returns an error if the contents do not fit the template.
#[tracing::instrument(level = "debug", skip_all, fields(origin = %loader.origin()))]
pub fn populate<L, T>(loader: &L, template: &mut T) -> Result<(), LoadError>
where
    L: Loader + ?Sized,
    T: Template,
{
    let contents = loader.read()?;
    if contents.is_null() {
        tracing::debug!("source is empty");
        return Ok(());
    }

    let populate_err = |source| LoadError::Populate {
        origin: loader.origin(),
        source,
    };
    let mut merged = serde_json::to_value(&*template).map_err(populate_err)?;
    if let (serde_json::Value::Object(known), serde_json::Value::Object(source)) = (&merged, &contents) {
        let unknown_keys: Vec<_> = source
            .keys()
            .filter(|key| !known.contains_key(key.as_str()))
            .collect();
        if !unknown_keys.is_empty() {
            tracing::warn!(?unknown_keys, "source contains keys not present in the template");
        }
    }
    merge(&mut merged, contents);
    *template = serde_json::from_value(merged).map_err(populate_err)?;
    Ok(())
}

fn merge(target: &mut serde_json::Value, contents: serde_json::Value) {
    match (target, contents) {
        (serde_json::Value::Object(target), serde_json::Value::Object(contents)) => {
            for (key, value) in contents {
                if value.is_null() {
                    target.remove(&key);
                } else if let Some(existing_value) = target.get_mut(&key) {
                    merge(existing_value, value);
                } else {
                    target.insert(key, value);
                }
            }
        }
        (target, contents) => {
            *target = contents;
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, LoadError> {
    fs::read(path).map_err(|source| LoadError::Read {
        path: path.to_owned(),
        source,
    })
}
