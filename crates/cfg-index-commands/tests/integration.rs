//! Integration tests for `cfg-index-commands`.

use std::collections::BTreeMap;

use anstream::AutoStream;
use cfg_index::{ConfigIndex, DescribeTemplate, IndexedConfig, JsonStr, node::Node};
use cfg_index_commands::Printer;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, DescribeTemplate)]
#[serde(default)]
struct TestConfig {
    port: u16,
    name: String,
    ratio: f64,
    enabled: bool,
    tags: Vec<String>,
    labels: BTreeMap<String, u32>,
}

const JSON: &str = r#"{
    "port": 8080,
    "name": "app",
    "ratio": 0.5,
    "enabled": true,
    "tags": ["a", "b"],
    "labels": { "x": 1, "y": 2 }
}"#;

fn print(index: &ConfigIndex, filter: impl FnMut(&str) -> bool) -> String {
    let mut buffer = vec![];
    Printer::custom(AutoStream::never(&mut buffer))
        .print_index(index, filter)
        .unwrap();
    String::from_utf8(buffer).unwrap()
}

fn test_index() -> ConfigIndex {
    let mut config = IndexedConfig::<TestConfig>::default();
    config.load(&JsonStr::new(JSON)).unwrap();
    config.into_parts().1
}

#[test]
fn printing_full_index() {
    let output = print(&test_index(), |_| true);
    let expected = r#"Index entries:
(root) [structure] = TestConfig { 6 fields }
enabled [bool] = true
labels [mapping] = {
  "x": 1,
  "y": 2,
}
name [string] = "app"
port [integer] = 8080
ratio [float] = 0.5
tags [sequence] = [2 items]
tags[0] [string] = "a"
tags[1] [string] = "b"
"#;
    assert_eq!(output, expected);
}

#[test]
fn printing_filtered_index() {
    let output = print(&test_index(), |path| path.starts_with("tags"));
    let expected = r#"Index entries:
tags [sequence] = [2 items]
tags[0] [string] = "a"
tags[1] [string] = "b"
"#;
    assert_eq!(output, expected);
}

#[test]
fn printing_empty_index() {
    let output = print(&ConfigIndex::new(), |_| true);
    assert_eq!(output, "index is empty\n");
}

#[test]
fn printing_overrides() {
    let mut index = ConfigIndex::new();
    index.set_float("scale", 2.0);
    index.set_sequence("items", Node::Sequence(vec![Node::Integer(1)]));
    index.set_mapping(
        "nested",
        Node::Mapping(BTreeMap::from([(
            "list".to_owned(),
            Node::Sequence(vec![Node::Null, Node::String("s".into())]),
        )])),
    );

    let output = print(&index, |_| true);
    let expected = r#"Index entries:
items [sequence] = [1 item]
nested [mapping] = {
  "list": [
    null,
    "s",
  ],
}
scale [float] = 2.0
"#;
    assert_eq!(output, expected);
}
