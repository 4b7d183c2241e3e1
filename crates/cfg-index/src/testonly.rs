//! Test-only functionality shared among multiple test modules.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::DescribeTemplate;

/// Self-referential config covering all scalar kinds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, DescribeTemplate)]
#[serde(default, rename_all = "camelCase")]
#[template(crate = crate)]
pub(crate) struct TestConfig {
    pub bool_val: bool,
    pub int_val: i64,
    pub float_val: f64,
    pub string_val: String,
    pub slice_val: Vec<Box<TestConfig>>,
    pub struct_val: Option<Box<TestConfig>>,
}

/// Config with path segments differing from both Rust and `serde` field names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, DescribeTemplate)]
#[serde(default, rename_all = "camelCase")]
#[template(crate = crate)]
pub(crate) struct ScenarioConfig {
    #[template(rename = "BoolVal")]
    pub bool_val: bool,
    #[template(rename = "IntVal")]
    pub int_val: i64,
    #[template(rename = "StringVal")]
    pub string_val: String,
    #[template(rename = "SliceVal")]
    pub slice_val: Vec<ScenarioConfig>,
    #[template(rename = "StructVal")]
    pub struct_val: Option<Box<ScenarioConfig>>,
}

#[derive(Debug, Default, Serialize, Deserialize, DescribeTemplate)]
#[serde(default)]
#[template(crate = crate)]
pub(crate) struct EnvConfig {
    pub name: String,
    #[template(env)]
    pub api_key: String,
    #[template(env, required)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, DescribeTemplate)]
#[serde(default)]
#[template(crate = crate)]
pub(crate) struct ServerConfig {
    pub port: u16,
    #[template(rename = "Host")]
    pub host: String,
    pub labels: HashMap<String, String>,
    pub upstreams: Vec<Upstream>,
    pub tls: Option<Tls>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, DescribeTemplate)]
#[serde(default)]
#[template(crate = crate)]
pub(crate) struct Upstream {
    pub url: String,
    pub weights: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, DescribeTemplate)]
#[serde(default)]
#[template(crate = crate)]
pub(crate) struct Tls {
    pub cert_path: String,
    #[template(skip)]
    pub cached_cert: Vec<u8>,
}
