//! `cfg-index` – typed configuration templates with a flat path-keyed lookup index.
//!
//! # Overview
//!
//! A *template* is a caller-defined struct describing the expected shape of configuration. [Loaders](loader::Loader)
//! populate the template from JSON or YAML sources. After each load, the template is walked breadth-first,
//! and each node is recorded into a [`ConfigIndex`] under its *canonical path*:
//!
//! - A field `port` of the root struct has path `port`.
//! - A field `port` of a struct at path `api.http` has path `api.http.port`.
//! - The second element of a sequence at path `upstreams` has path `upstreams[1]`.
//!
//! Scalar values (booleans, integers, floats and strings) are indexed individually. Sequences and structures
//! are indexed as a whole *and* recursed into; mappings are indexed only as a whole. This allows to retrieve
//! any nested value either from the typed template, or via an ad-hoc path string.
//!
//! Conversion of templates into a dynamically typed [tree](node::Node) is performed by the [`DescribeTemplate`]
//! trait, which can be derived for structs.
//!
//! # Environment variables
//!
//! A string field can be marked with `#[template(env)]`. Such a field is resolved from the env variable named
//! after the uppercased field name (e.g., `API_KEY` for an `api_key` field). The resolved value is recorded
//! both at the field path and at the synthetic path `ENV.API_KEY`. If the variable is not set, the synthetic path
//! gets an empty string, unless the field is also marked with `required`, in which case loading fails.
//!
//! # Examples
//!
//! ```
//! use cfg_index::{DescribeTemplate, IndexedConfig, JsonStr, YamlStr};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize, DescribeTemplate)]
//! #[serde(default)]
//! struct AppConfig {
//!     port: u16,
//!     upstreams: Vec<Upstream>,
//! }
//!
//! #[derive(Debug, Default, Serialize, Deserialize, DescribeTemplate)]
//! #[serde(default)]
//! struct Upstream {
//!     url: String,
//!     weight: f64,
//! }
//!
//! let mut config = IndexedConfig::<AppConfig>::default();
//! let json = JsonStr::new(r#"{
//!     "port": 8080,
//!     "upstreams": [{ "url": "http://a.local", "weight": 0.5 }]
//! }"#);
//! // Later sources override earlier ones.
//! let yaml = YamlStr::new("port: 9000");
//! config.load_all(&[&json, &yaml])?;
//!
//! assert_eq!(config.template().port, 9000);
//! let index = config.index();
//! assert_eq!(index.integer("port"), Some(9000));
//! assert_eq!(index.string("upstreams[0].url"), Some("http://a.local"));
//! assert_eq!(index.float_or("upstreams[1].weight", 1.0), 1.0);
//! assert!(index.sequence("upstreams").is_some());
//! # anyhow::Ok(())
//! ```
//!
//! ## Env variables
//!
//! ```
//! use cfg_index::{DescribeTemplate, Environment, IndexOptions, IndexedConfig, JsonStr};
//! # use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Default, Serialize, Deserialize, DescribeTemplate)]
//! #[serde(default)]
//! struct DbConfig {
//!     host: String,
//!     #[template(env, required)]
//!     db_password: String,
//! }
//!
//! let env = Environment::from_iter([("DB_PASSWORD", "hunter2")]);
//! let mut config = IndexedConfig::<DbConfig>::default()
//!     .with_options(IndexOptions::default().with_environment(env));
//! config.load(&JsonStr::new(r#"{ "host": "localhost" }"#))?;
//!
//! let index = config.index();
//! assert_eq!(index.string("db_password"), Some("hunter2"));
//! assert_eq!(index.string("ENV.DB_PASSWORD"), Some("hunter2"));
//! # anyhow::Ok(())
//! ```

// Linter settings
#![warn(missing_docs)]

/// Derives the [`DescribeTemplate`](trait@DescribeTemplate) trait for a struct with named fields.
///
/// Each field is described with its Rust name, which becomes a segment of canonical paths.
///
/// # Container attributes
///
/// ## `crate`
///
/// **Type:** path
///
/// Path to the `cfg_index` crate. Useful if the crate is re-exported.
///
/// # Field attributes
///
/// ## `env`
///
/// Resolves the field from the env variable named after the uppercased field name. Only allowed on `String`
/// and `Option<String>` fields.
///
/// ## `required`
///
/// Fails loading if the env variable is not set. Requires `env`.
///
/// ## `rename`
///
/// **Type:** string
///
/// Overrides the field name used in paths and for the env variable.
///
/// ## `skip`
///
/// Excludes the field from the template tree.
///
/// # Examples
///
/// ```
/// use cfg_index::{node::Node, DescribeTemplate};
///
/// #[derive(DescribeTemplate)]
/// struct TestConfig {
///     #[template(rename = "Port")]
///     port: u16,
///     #[template(env)]
///     token: Option<String>,
///     #[template(skip)]
///     _cache: Vec<u8>,
/// }
///
/// let config = TestConfig { port: 80, token: None, _cache: vec![] };
/// let Node::Structure(structure) = config.describe() else { unreachable!() };
/// assert_eq!(structure.fields().len(), 2);
/// assert_eq!(*structure.field("Port").unwrap().value(), Node::Integer(80));
/// assert!(structure.field("token").unwrap().options().is_env());
/// ```
pub use cfg_index_derive::DescribeTemplate;

pub use self::{
    config::IndexedConfig,
    describe::DescribeTemplate,
    env::Environment,
    error::{IndexError, LoadError},
    index::{ConfigIndex, IndexOptions, Indexer},
    loader::{JsonFile, JsonStr, Loader, Projection, Template, YamlFile, YamlStr},
};

mod config;
mod describe;
mod env;
mod error;
pub mod index;
pub mod loader;
pub mod node;
pub mod path;
#[cfg(test)]
mod testonly;
