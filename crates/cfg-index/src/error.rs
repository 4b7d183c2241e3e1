//! Indexing and loading errors.

use std::{fmt, io, path::PathBuf};

use crate::{loader::Format, node::NodeKind};

/// Error traversing a template tree.
///
/// A failed traversal aborts immediately. Index entries written for the nodes visited before the failure are retained.
#[derive(Debug)]
#[non_exhaustive]
pub enum IndexError {
    /// Env variable for a field marked with `env` and `required` is not set.
    MissingEnvVar {
        /// Canonical path of the field.
        path: String,
        /// Name of the env variable.
        var: String,
    },
    /// Node has a kind that cannot be indexed.
    UnsupportedKind {
        /// Canonical path of the node.
        path: String,
        /// Kind of the node.
        kind: NodeKind,
    },
    /// Field marked with `env` is not a string.
    EnvOnNonString {
        /// Canonical path of the field.
        path: String,
        /// Kind of the field value.
        kind: NodeKind,
    },
}

impl IndexError {
    /// Returns the canonical path of the node this error concerns.
    pub fn path(&self) -> &str {
        match self {
            Self::MissingEnvVar { path, .. }
            | Self::UnsupportedKind { path, .. }
            | Self::EnvOnNonString { path, .. } => path,
        }
    }
}

impl fmt::Display for IndexError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEnvVar { path, var } => write!(
                formatter,
                "missing required environment variable `{var}` for field `{path}`"
            ),
            Self::UnsupportedKind { path, kind } => {
                write!(formatter, "value at `{path}` has unsupported kind `{kind}`")
            }
            Self::EnvOnNonString { path, kind } => write!(
                formatter,
                "field `{path}` is resolved from environment, but has non-string kind `{kind}`"
            ),
        }
    }
}

impl std::error::Error for IndexError {}

/// Error loading configuration into a template.
#[derive(Debug)]
#[non_exhaustive]
pub enum LoadError {
    /// Error reading a configuration file.
    Read {
        /// Path to the file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Error decoding configuration contents.
    Decode {
        /// Origin of the decoded contents.
        origin: String,
        /// Format of the contents.
        format: Format,
        /// Underlying error.
        source: anyhow::Error,
    },
    /// Decoded contents don't match the template shape.
    Populate {
        /// Origin of the decoded contents.
        origin: String,
        /// Underlying error.
        source: serde_json::Error,
    },
    /// No composite entry is present in an index at the specified path.
    MissingEntry {
        /// Requested path.
        path: String,
    },
    /// Error indexing the populated template.
    Index(IndexError),
}

impl fmt::Display for LoadError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(formatter, "failed reading `{}`: {source}", path.display())
            }
            Self::Decode {
                origin,
                format,
                source,
            } => write!(formatter, "failed decoding {format} from {origin}: {source:#}"),
            Self::Populate { origin, source } => {
                write!(formatter, "failed populating template from {origin}: {source}")
            }
            Self::MissingEntry { path } => {
                write!(formatter, "index has no composite entry at `{path}`")
            }
            Self::Index(err) => fmt::Display::fmt(err, formatter),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(&**source),
            Self::Populate { source, .. } => Some(source),
            Self::MissingEntry { .. } => None,
            Self::Index(err) => Some(err),
        }
    }
}

impl From<IndexError> for LoadError {
    fn from(err: IndexError) -> Self {
        Self::Index(err)
    }
}
