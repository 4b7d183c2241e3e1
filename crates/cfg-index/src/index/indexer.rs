//! Breadth-first traversal of template trees.

use std::collections::VecDeque;

use super::ConfigIndex;
use crate::{
    env::Environment,
    error::IndexError,
    node::{FieldOptions, Node},
    path,
};

/// Options for [`Indexer`].
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Namespace for synthetic env paths. With the default `ENV` namespace, a field `password` marked with `env`
    /// will be recorded under `ENV.PASSWORD`.
    pub env_namespace: String,
    /// Whether to store resolved env values at the structural path of the field as well.
    /// If set to `false`, the structural path retains the configured value.
    pub propagate_env: bool,
    /// Source of env variables.
    pub environment: Environment,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            env_namespace: "ENV".to_owned(),
            propagate_env: true,
            environment: Environment::process(),
        }
    }
}

impl IndexOptions {
    /// Sets the source of env variables.
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct FieldRef<'a> {
    name: &'a str,
    options: FieldOptions,
}

#[derive(Debug)]
struct QueueItem<'a> {
    node: &'a Node,
    path: String,
    /// Field the node was reached through. Not set for the root and sequence elements.
    field: Option<FieldRef<'a>>,
}

/// Indexer populating a [`ConfigIndex`] from a [`Node`] tree.
#[derive(Debug)]
pub struct Indexer<'a> {
    options: &'a IndexOptions,
}

impl<'a> Indexer<'a> {
    /// Creates an indexer with the specified options.
    pub fn new(options: &'a IndexOptions) -> Self {
        Self { options }
    }

    /// Traverses the tree starting from `root` and records all encountered values into `index`.
    /// Existing entries at the same paths are overwritten; other entries are retained.
    ///
    /// # Errors
    ///
    /// Returns an error if the tree contains an unsupported node, or if an env variable marked as required
    /// is not set. In this case, entries for nodes visited before the error are retained in `index`.
    #[tracing::instrument(level = "debug", name = "Indexer::index", skip_all)]
    pub fn index(&self, root: &Node, index: &mut ConfigIndex) -> Result<(), IndexError> {
        let mut queue = VecDeque::from([QueueItem {
            node: root,
            path: String::new(),
            field: None,
        }]);
        let mut visited_count = 0_usize;
        while let Some(item) = queue.pop_front() {
            visited_count += 1;
            self.visit(item, index, &mut queue)?;
        }
        tracing::debug!(visited_count, entry_count = index.len(), "indexed template");
        Ok(())
    }

    fn visit<'n>(
        &self,
        item: QueueItem<'n>,
        index: &mut ConfigIndex,
        queue: &mut VecDeque<QueueItem<'n>>,
    ) -> Result<(), IndexError> {
        let QueueItem { node, path, field } = item;
        if let Some(field) = field.filter(|field| field.options.is_env()) {
            return match node {
                Node::Optional(Some(inner)) => {
                    queue.push_back(QueueItem {
                        node: inner,
                        path,
                        field: Some(field),
                    });
                    Ok(())
                }
                Node::String(value) => self.resolve_env(path, field, Some(value.as_str()), index),
                Node::Null | Node::Optional(None) => self.resolve_env(path, field, None, index),
                _ => Err(IndexError::EnvOnNonString {
                    path,
                    kind: node.kind(),
                }),
            };
        }

        match node {
            Node::Null | Node::Optional(None) => {
                tracing::trace!(%path, "skipped absent value");
            }
            Node::Bool(value) => {
                index.bools.insert(path, *value);
            }
            Node::Integer(value) => {
                index.integers.insert(path, *value);
            }
            Node::Float(value) => {
                index.floats.insert(path, *value);
            }
            Node::String(value) => {
                index.strings.insert(path, value.clone());
            }
            Node::Sequence(items) => {
                for (i, item) in items.iter().enumerate() {
                    queue.push_back(QueueItem {
                        node: item,
                        path: path::join_index(&path, i),
                        field: None,
                    });
                }
                index.sequences.insert(path, node.clone());
            }
            Node::Mapping(_) => {
                index.mappings.insert(path, node.clone());
            }
            Node::Structure(structure) => {
                for child in structure.fields() {
                    queue.push_back(QueueItem {
                        node: child.value(),
                        path: path::join_field(&path, child.name()),
                        field: Some(FieldRef {
                            name: child.name(),
                            options: child.options(),
                        }),
                    });
                }
                index.structures.insert(path, node.clone());
            }
            Node::Optional(Some(inner)) => {
                // Optionals don't contribute a path segment.
                queue.push_back(QueueItem {
                    node: inner,
                    path,
                    field,
                });
            }
            Node::Unsupported(_) => {
                return Err(IndexError::UnsupportedKind {
                    path,
                    kind: node.kind(),
                });
            }
        }
        Ok(())
    }

    fn resolve_env(
        &self,
        path: String,
        field: FieldRef<'_>,
        configured_value: Option<&str>,
        index: &mut ConfigIndex,
    ) -> Result<(), IndexError> {
        let var = path::env_var_name(field.name);
        let env_path = path::env_path(&self.options.env_namespace, &var);

        let Some(value) = self.options.environment.var(&var) else {
            if field.options.is_required() {
                return Err(IndexError::MissingEnvVar { path, var });
            }
            tracing::warn!(%path, %var, "environment variable is not set");
            if let Some(configured_value) = configured_value {
                index.strings.insert(path, configured_value.to_owned());
            }
            index.strings.insert(env_path, String::new());
            return Ok(());
        };

        if self.options.propagate_env {
            index.strings.insert(path, value.clone());
        } else if let Some(configured_value) = configured_value {
            index.strings.insert(path, configured_value.to_owned());
        }
        index.strings.insert(env_path, value);
        Ok(())
    }
}
