//! Example CLI app loading configuration from JSON / YAML files and printing the resulting index.
//!
//! Run with `cargo run --example cli -- --json config.json --yaml overrides.yml`.

use std::{collections::BTreeMap, path::PathBuf, process};

use anyhow::Context as _;
use cfg_index::{DescribeTemplate, IndexedConfig, JsonFile, JsonStr, Loader, YamlFile};
use cfg_index_commands::Printer;
use clap::Parser;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Default, Serialize, Deserialize, DescribeTemplate)]
#[serde(default)]
struct AppConfig {
    app_name: String,
    port: u16,
    /// Resolved from the `DATABASE_URL` env var.
    #[template(env)]
    database_url: String,
    upstreams: Vec<Upstream>,
    fallback: Option<Box<Upstream>>,
    extra: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Default, Serialize, Deserialize, DescribeTemplate)]
#[serde(default)]
struct Upstream {
    url: String,
    weight: f64,
    children: Vec<Upstream>,
}

const DEFAULTS: &str = r#"{
    "app_name": "example",
    "port": 8080,
    "upstreams": [{ "url": "http://localhost:3000", "weight": 1.0 }]
}"#;

#[derive(Debug, Parser)]
struct Cli {
    /// JSON files to load, in order.
    #[arg(long)]
    json: Vec<PathBuf>,
    /// YAML files to load after JSON files, in order.
    #[arg(long)]
    yaml: Vec<PathBuf>,
    /// Only print entries with paths starting with this prefix.
    #[arg(long)]
    filter: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let defaults = JsonStr::new(DEFAULTS);
    let json_files: Vec<_> = cli.json.into_iter().map(JsonFile::new).collect();
    let yaml_files: Vec<_> = cli.yaml.into_iter().map(YamlFile::new).collect();
    let loaders: Vec<&dyn Loader> = [&defaults as &dyn Loader]
        .into_iter()
        .chain(json_files.iter().map(|loader| loader as &dyn Loader))
        .chain(yaml_files.iter().map(|loader| loader as &dyn Loader))
        .collect();

    let mut config = IndexedConfig::<AppConfig>::default();
    if let Err(err) = config.load_all(&loaders) {
        eprintln!("Failed loading configuration: {err}");
        process::exit(1);
    }

    let prefix = cli.filter.unwrap_or_default();
    Printer::stdout()
        .print_index(config.index(), |path| path.starts_with(&prefix))
        .context("failed printing index")?;
    Ok(())
}
