use std::path::{Path, PathBuf};

use super::{Format, Loader, read_file};
use crate::error::LoadError;

fn decode(origin: String, bytes: &[u8]) -> Result<serde_json::Value, LoadError> {
    serde_json::from_slice(bytes).map_err(|err| LoadError::Decode {
        origin,
        format: Format::Json,
        source: err.into(),
    })
}

/// Inline JSON source.
#[derive(Debug, Clone)]
pub struct JsonStr {
    content: String,
}

impl JsonStr {
    /// Creates a source with the specified contents.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl Loader for JsonStr {
    fn origin(&self) -> String {
        "inline JSON".to_owned()
    }

    fn read(&self) -> Result<serde_json::Value, LoadError> {
        decode(self.origin(), self.content.as_bytes())
    }
}

/// JSON file source. The file is read on each load.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    /// Creates a source reading from the specified path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Loader for JsonFile {
    fn origin(&self) -> String {
        format!("JSON file `{}`", self.path.display())
    }

    fn read(&self) -> Result<serde_json::Value, LoadError> {
        let bytes = read_file(&self.path)?;
        decode(self.origin(), &bytes)
    }
}
