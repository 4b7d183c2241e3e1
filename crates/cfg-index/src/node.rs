//! Template tree model.
//!
//! A [`Node`] is a dynamically typed snapshot of a configuration template. Typed templates are converted
//! to nodes via [`DescribeTemplate`](crate::DescribeTemplate); the [indexer](crate::index::Indexer)
//! then walks the resulting tree.

use std::{borrow::Cow, collections::BTreeMap, fmt};

use serde::ser::{self, Serialize, SerializeMap, SerializeSeq, Serializer};

/// Node in a configuration template tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    /// Absent value (e.g., a zero placeholder). Skipped during indexing.
    #[default]
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Integer(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    String(String),
    /// Sequence of values. Elements are indexed individually, and the sequence is also indexed as a whole.
    Sequence(Vec<Node>),
    /// Mapping from string keys to values. Mappings are opaque: they are indexed only as a whole.
    Mapping(BTreeMap<String, Node>),
    /// Structure with named fields.
    Structure(Structure),
    /// Optional value. `Some(_)` is transparent for path naming.
    Optional(Option<Box<Node>>),
    /// Value of a kind that cannot be indexed, such as `char` or `()`. The enclosed string names the kind.
    Unsupported(&'static str),
}

impl Node {
    /// Wraps an optional value.
    pub fn optional(value: Option<Self>) -> Self {
        Self::Optional(value.map(Box::new))
    }

    /// Returns the kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Null => NodeKind::Null,
            Self::Bool(_) => NodeKind::Bool,
            Self::Integer(_) => NodeKind::Integer,
            Self::Float(_) => NodeKind::Float,
            Self::String(_) => NodeKind::String,
            Self::Sequence(_) => NodeKind::Sequence,
            Self::Mapping(_) => NodeKind::Mapping,
            Self::Structure(_) => NodeKind::Structure,
            Self::Optional(_) => NodeKind::Optional,
            Self::Unsupported(name) => NodeKind::Unsupported(name),
        }
    }

    /// Checks whether this node is absent, i.e., is [`Self::Null`] or an empty [`Self::Optional`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Null | Self::Optional(None))
    }

    /// Attempts to convert this node to a structure, looking through non-empty optionals.
    pub fn as_structure(&self) -> Option<&Structure> {
        match self {
            Self::Structure(structure) => Some(structure),
            Self::Optional(Some(inner)) => inner.as_structure(),
            _ => None,
        }
    }
}

/// Kind of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum NodeKind {
    /// Absent value.
    Null,
    /// Boolean value.
    Bool,
    /// Integer value.
    Integer,
    /// Floating-point value.
    Float,
    /// String value.
    String,
    /// Sequence of values.
    Sequence,
    /// Opaque mapping.
    Mapping,
    /// Structure with named fields.
    Structure,
    /// Optional value.
    Optional,
    /// Unsupported kind with the specified name.
    Unsupported(&'static str),
}

impl fmt::Display for NodeKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
            Self::Structure => "structure",
            Self::Optional => "optional",
            Self::Unsupported(name) => name,
        })
    }
}

/// Directives attached to a structure field.
///
/// Usually specified with `#[template(_)]` attributes of the [`DescribeTemplate`](macro@crate::DescribeTemplate)
/// derive macro.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FieldOptions {
    env: bool,
    required: bool,
}

impl FieldOptions {
    /// Creates options without any directives.
    pub const fn new() -> Self {
        Self {
            env: false,
            required: false,
        }
    }

    /// Marks the field as resolved from an env variable named after the field.
    #[must_use]
    pub const fn env(mut self) -> Self {
        self.env = true;
        self
    }

    /// Marks the env variable for the field as required. Has no effect unless [`Self::env()`] is set as well.
    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Checks whether the field is resolved from an env variable.
    pub const fn is_env(&self) -> bool {
        self.env
    }

    /// Checks whether the field is a required env variable.
    pub const fn is_required(&self) -> bool {
        self.env && self.required
    }
}

/// Named field of a [`Structure`].
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: Cow<'static, str>,
    serde_name: Option<Cow<'static, str>>,
    options: FieldOptions,
    value: Node,
}

impl Field {
    /// Creates a new field.
    pub fn new(name: impl Into<Cow<'static, str>>, options: FieldOptions, value: Node) -> Self {
        Self {
            name: name.into(),
            serde_name: None,
            options,
            value,
        }
    }

    /// Sets the name of the field in serialized templates if it differs from [`Self::name()`].
    #[must_use]
    pub fn with_serde_name(mut self, serde_name: impl Into<Cow<'static, str>>) -> Self {
        self.serde_name = Some(serde_name.into());
        self
    }

    /// Returns the field name. The name is used as a path segment, and (uppercased) as the env variable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the field name in serialized templates, e.g. `intVal` for a field `int_val`
    /// in a struct with `#[serde(rename_all = "camelCase")]`.
    pub fn serde_name(&self) -> &str {
        self.serde_name.as_deref().unwrap_or(&self.name)
    }

    /// Returns directives for this field.
    pub fn options(&self) -> FieldOptions {
        self.options
    }

    /// Returns the field value.
    pub fn value(&self) -> &Node {
        &self.value
    }
}

/// Structure with named fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    type_name: &'static str,
    fields: Vec<Field>,
}

impl Structure {
    /// Creates a structure.
    pub fn new(type_name: &'static str, fields: Vec<Field>) -> Self {
        Self { type_name, fields }
    }

    /// Returns the name of the Rust type this structure was produced from.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns fields in the declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// Serializes a node to the JSON object model. Structures are serialized as objects keyed by
/// [serde names](Field::serde_name()) of their fields, so that the output can be decoded back into the template.
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null | Self::Optional(None) => serializer.serialize_none(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Integer(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::String(value) => serializer.serialize_str(value),
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Structure(structure) => {
                let mut map = serializer.serialize_map(Some(structure.fields.len()))?;
                for field in &structure.fields {
                    map.serialize_entry(field.serde_name(), &field.value)?;
                }
                map.end()
            }
            Self::Optional(Some(inner)) => inner.serialize(serializer),
            Self::Unsupported(kind) => Err(ser::Error::custom(format_args!(
                "cannot serialize value of unsupported kind `{kind}`"
            ))),
        }
    }
}
