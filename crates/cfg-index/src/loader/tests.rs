use std::{error::Error as _, io::Write as _};

use assert_matches::assert_matches;
use tempfile::NamedTempFile;

use super::*;
use crate::{
    ConfigIndex, IndexOptions,
    testonly::{ServerConfig, TestConfig, Upstream},
};

fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn reading_inline_json() {
    let loader = JsonStr::new(r#"{ "intVal": 5, "stringVal": "test" }"#);
    assert_eq!(loader.origin(), "inline JSON");
    let mut config = TestConfig::default();
    loader.populate(&mut config).unwrap();
    assert_eq!(config.int_val, 5);
    assert_eq!(config.string_val, "test");
}

#[test]
fn reading_inline_yaml() {
    let yaml = r"
boolVal: true
floatVal: 0.25
sliceVal:
  - intVal: 1
  - stringVal: second
structVal:
  intVal: -3
";
    let mut config = TestConfig::default();
    YamlStr::new(yaml).populate(&mut config).unwrap();

    assert!(config.bool_val);
    assert_eq!(config.float_val, 0.25);
    assert_eq!(config.slice_val.len(), 2);
    assert_eq!(config.slice_val[0].int_val, 1);
    assert_eq!(config.slice_val[1].string_val, "second");
    assert_eq!(config.struct_val.unwrap().int_val, -3);
}

#[test]
fn yaml_keys_are_stringified() {
    let yaml = r"
labels:
  1: one
  true: yes
  region: eu
";
    let mut config = ServerConfig::default();
    YamlStr::new(yaml).populate(&mut config).unwrap();
    assert_eq!(config.labels["1"], "one");
    assert_eq!(config.labels["true"], "yes");
    assert_eq!(config.labels["region"], "eu");
}

#[test]
fn unsupported_yaml_key() {
    let yaml = r"
upstreams:
  - [12, 34]: bogus
";
    let err = YamlStr::new(yaml).read().unwrap_err();
    assert_matches!(&err, LoadError::Decode { format: Format::Yaml, .. });
    let err = err.to_string();
    assert!(err.contains("unsupported key type"), "{err}");
    assert!(err.contains("upstreams[0]"), "{err}");
}

#[test]
fn reading_files() {
    let json_file = temp_file(r#"{ "port": 8080, "upstreams": [{ "url": "http://a.local" }] }"#);
    let yaml_file = temp_file("Host: ignored\nport: 9090\n");

    let json = JsonFile::new(json_file.path());
    assert_eq!(json.path(), json_file.path());
    assert!(json.origin().starts_with("JSON file"), "{}", json.origin());
    let yaml = YamlFile::new(yaml_file.path());
    assert!(yaml.origin().starts_with("YAML file"), "{}", yaml.origin());

    let mut config = ServerConfig::default();
    json.populate(&mut config).unwrap();
    assert_eq!(config.port, 8080);
    yaml.populate(&mut config).unwrap();
    assert_eq!(config.port, 9090);
    // Unknown fields are ignored; `Host` is a template-only name.
    assert_eq!(config.host, "");
    assert_eq!(config.upstreams[0].url, "http://a.local");
}

#[test]
fn files_are_read_on_each_load() {
    let file = temp_file(r#"{ "port": 1 }"#);
    let loader = JsonFile::new(file.path());
    let mut config = ServerConfig::default();
    loader.populate(&mut config).unwrap();
    assert_eq!(config.port, 1);

    std::fs::write(file.path(), r#"{ "port": 2 }"#).unwrap();
    loader.populate(&mut config).unwrap();
    assert_eq!(config.port, 2);
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yml");
    let mut config = ServerConfig::default();
    let err = YamlFile::new(&path).populate(&mut config).unwrap_err();

    assert_matches!(&err, LoadError::Read { path: err_path, .. } if *err_path == path);
    assert!(err.source().is_some());
    assert!(err.to_string().contains("missing.yml"), "{err}");
}

#[test]
fn decoding_errors() {
    let file = temp_file("{ \"port\": ");
    let err = JsonFile::new(file.path()).read().unwrap_err();
    assert_matches!(
        &err,
        LoadError::Decode { format: Format::Json, origin, .. } if origin.starts_with("JSON file")
    );
    assert!(err.source().is_some());

    let err = YamlStr::new("port: [1, 2").read().unwrap_err();
    assert_matches!(err, LoadError::Decode { format: Format::Yaml, .. });
}

#[test]
fn populate_errors_leave_template_untouched() {
    let mut config = ServerConfig {
        port: 80,
        ..ServerConfig::default()
    };
    let err = JsonStr::new(r#"{ "port": 65536 }"#)
        .populate(&mut config)
        .unwrap_err();
    assert_matches!(&err, LoadError::Populate { origin, .. } if origin == "inline JSON");
    assert_eq!(config.port, 80);

    let err = YamlStr::new("upstreams: not a list")
        .populate(&mut config)
        .unwrap_err();
    assert_matches!(err, LoadError::Populate { .. });
    assert_eq!(config.port, 80);
}

#[test]
fn merging_on_field_level() {
    let mut config = TestConfig::default();
    JsonStr::new(r#"{ "intVal": 1, "structVal": { "intVal": 2, "stringVal": "a" } }"#)
        .populate(&mut config)
        .unwrap();
    JsonStr::new(r#"{ "boolVal": true, "structVal": { "stringVal": "b" } }"#)
        .populate(&mut config)
        .unwrap();

    assert!(config.bool_val);
    assert_eq!(config.int_val, 1);
    let inner = config.struct_val.as_deref().unwrap();
    assert_eq!(inner.int_val, 2);
    assert_eq!(inner.string_val, "b");
}

#[test]
fn arrays_are_replaced() {
    let mut config = ServerConfig::default();
    JsonStr::new(r#"{ "upstreams": [{ "url": "a", "weights": [1.0] }, { "url": "b" }] }"#)
        .populate(&mut config)
        .unwrap();
    YamlStr::new("upstreams:\n  - weights: [2.0]")
        .populate(&mut config)
        .unwrap();

    assert_eq!(
        config.upstreams,
        [Upstream {
            url: String::new(),
            weights: vec![2.0],
        }]
    );
}

#[test]
fn nulls_reset_fields_to_defaults() {
    let mut config = TestConfig::default();
    JsonStr::new(r#"{ "intVal": 3, "structVal": { "intVal": 4 } }"#)
        .populate(&mut config)
        .unwrap();
    assert!(config.struct_val.is_some());

    YamlStr::new("intVal: ~\nstructVal: null")
        .populate(&mut config)
        .unwrap();
    assert_eq!(config.int_val, 0);
    assert_eq!(config.struct_val, None);
}

#[test]
fn null_document_is_noop() {
    let mut config = TestConfig {
        int_val: 7,
        ..TestConfig::default()
    };
    JsonStr::new("null").populate(&mut config).unwrap();
    YamlStr::new("~").populate(&mut config).unwrap();
    assert_eq!(config.int_val, 7);
}

#[test]
fn populating_via_trait_objects() {
    let loaders: [&dyn Loader; 2] = [
        &JsonStr::new(r#"{ "port": 1, "Host": "ignored" }"#),
        &YamlStr::new("port: 2"),
    ];
    let mut config = ServerConfig::default();
    for loader in loaders {
        populate(loader, &mut config).unwrap();
    }
    assert_eq!(config.port, 2);
}

#[test]
fn projecting_index_entries() {
    let config = ServerConfig {
        labels: [("a".to_owned(), "b".to_owned())].into(),
        upstreams: vec![Upstream {
            url: "http://a.local".into(),
            weights: vec![1.5],
        }],
        ..ServerConfig::default()
    };
    let index = ConfigIndex::build(&config, &IndexOptions::default()).unwrap();

    let mut upstreams = Vec::<Upstream>::new();
    Projection::entry(&index, "upstreams")
        .unwrap()
        .populate(&mut upstreams)
        .unwrap();
    assert_eq!(upstreams, config.upstreams);

    let projection = Projection::entry(&index, "labels").unwrap();
    assert_eq!(projection.origin(), "index entry `labels`");
    assert_eq!(projection.read().unwrap(), serde_json::json!({ "a": "b" }));

    let err = Projection::entry(&index, "port").unwrap_err();
    assert_matches!(err, LoadError::MissingEntry { path } if path == "port");
    let err = Projection::entry(&index, "tls").unwrap_err();
    assert_matches!(err, LoadError::MissingEntry { .. });
}

#[test]
fn projecting_entries_with_serde_renames() {
    let mut config = TestConfig::default();
    JsonStr::new(r#"{ "structVal": { "intVal": 2, "stringVal": "x", "sliceVal": [{ "boolVal": true }] } }"#)
        .populate(&mut config)
        .unwrap();
    let index = ConfigIndex::build(&config, &IndexOptions::default()).unwrap();

    let projection = Projection::entry(&index, "struct_val").unwrap();
    let value = projection.read().unwrap();
    assert_eq!(value["intVal"], 2);
    assert!(value.get("int_val").is_none(), "{value}");

    let mut nested = TestConfig::default();
    projection.populate(&mut nested).unwrap();
    assert_eq!(nested.int_val, 2);
    assert_eq!(nested.string_val, "x");
    assert!(nested.slice_val[0].bool_val);
    assert_eq!(Some(&nested), config.struct_val.as_deref());
}

#[test]
fn projecting_unsupported_nodes() {
    let node = crate::node::Node::Sequence(vec![crate::node::Node::Unsupported("char")]);
    let err = Projection::node("test", &node).unwrap_err();
    assert_matches!(err, LoadError::Populate { origin, .. } if origin == "test");
}
