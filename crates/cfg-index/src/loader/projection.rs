use serde::Serialize;

use super::{Loader, Template};
use crate::{IndexedConfig, error::LoadError, index::ConfigIndex, node::Node};

/// Source projecting already loaded configuration into another template.
///
/// Contents are captured on creation by serializing the source value to the JSON object model, and are re-decoded
/// into the target template on load. The source can be a template, a whole-value entry in a [`ConfigIndex`], or a [`Node`].
///
/// [`Node`]s (and thus index entries) serialize structure fields under their [`serde` names](crate::node::Field::serde_name()),
/// so a captured entry can populate a template of the same type.
#[derive(Debug, Clone)]
pub struct Projection {
    origin: String,
    contents: serde_json::Value,
}

impl Projection {
    /// Captures the current state of a serializable value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized to the JSON object model.
    pub fn new<T: Serialize + ?Sized>(
        origin: impl Into<String>,
        value: &T,
    ) -> Result<Self, LoadError> {
        let origin = origin.into();
        match serde_json::to_value(value) {
            Ok(contents) => Ok(Self { origin, contents }),
            Err(source) => Err(LoadError::Populate { origin, source }),
        }
    }

    /// Captures the template backing the specified config.
    ///
    /// # Errors
    ///
    /// Returns an error if the template cannot be serialized to the JSON object model.
    pub fn of<T: Template>(config: &IndexedConfig<T>) -> Result<Self, LoadError> {
        Self::new(
            format!("template `{}`", std::any::type_name::<T>()),
            config.template(),
        )
    }

    /// Captures a whole-value entry (a structure, sequence or mapping) at the specified path in the index.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no composite entry at `path`, or if the entry cannot be serialized.
    pub fn entry(index: &ConfigIndex, path: &str) -> Result<Self, LoadError> {
        let node = index
            .structure(path)
            .or_else(|| index.sequence(path))
            .or_else(|| index.mapping(path))
            .ok_or_else(|| LoadError::MissingEntry {
                path: path.to_owned(),
            })?;
        Self::node(format!("index entry `{path}`"), node)
    }

    /// Captures a node.
    ///
    /// # Errors
    ///
    /// Returns an error if the node contains unsupported values.
    pub fn node(origin: impl Into<String>, node: &Node) -> Result<Self, LoadError> {
        Self::new(origin, node)
    }
}

impl Loader for Projection {
    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn read(&self) -> Result<serde_json::Value, LoadError> {
        Ok(self.contents.clone())
    }
}
