//! Flat path-keyed index over a template.

use std::collections::HashMap;

pub use self::indexer::{IndexOptions, Indexer};
use crate::{DescribeTemplate, error::IndexError, node::Node};

mod indexer;

/// Generates accessors for a `Copy` scalar map.
macro_rules! scalar_accessors {
    (
        $map:ident: $ty:ty, $kind:literal,
        $get:ident, $get_or:ident, $get_or_zero:ident, $set:ident
    ) => {
        #[doc = concat!("Returns the ", $kind, " value at `key`, or `None` if there is no such entry.")]
        pub fn $get(&self, key: &str) -> Option<$ty> {
            self.$map.get(key).copied()
        }

        #[doc = concat!("Returns the ", $kind, " value at `key`, or `default` if there is no such entry.")]
        pub fn $get_or(&self, key: &str, default: $ty) -> $ty {
            self.$get(key).unwrap_or(default)
        }

        #[doc = concat!("Returns the ", $kind, " value at `key`, or the zero value if there is no such entry.")]
        pub fn $get_or_zero(&self, key: &str) -> $ty {
            self.$get(key).unwrap_or_default()
        }

        #[doc = concat!("Sets the ", $kind, " value at `key`, overwriting the existing value if any.")]
        pub fn $set(&mut self, key: impl Into<String>, value: $ty) {
            self.$map.insert(key.into(), value);
        }
    };
}

/// Generates accessors for a map of composite nodes.
macro_rules! composite_accessors {
    ($map:ident, $kind:literal, $get:ident, $set:ident) => {
        #[doc = concat!("Returns the whole ", $kind, " at `key`, or `None` if there is no such entry.")]
        pub fn $get(&self, key: &str) -> Option<&Node> {
            self.$map.get(key)
        }

        #[doc = concat!("Sets the ", $kind, " at `key`, overwriting the existing value if any.")]
        pub fn $set(&mut self, key: impl Into<String>, value: Node) {
            self.$map.insert(key.into(), value);
        }
    };
}

/// Entry in a [`ConfigIndex`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Entry<'a> {
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Integer(i64),
    /// Floating-point value.
    Float(f64),
    /// String value.
    String(&'a str),
    /// Whole mapping.
    Mapping(&'a Node),
    /// Whole sequence.
    Sequence(&'a Node),
    /// Whole structure.
    Structure(&'a Node),
}

impl Entry<'_> {
    /// Returns a human-readable name of the entry kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Mapping(_) => "mapping",
            Self::Sequence(_) => "sequence",
            Self::Structure(_) => "structure",
        }
    }
}

/// Flat index of a configuration template, mapping canonical paths to values.
///
/// The index consists of seven disjoint maps: four for scalar values (booleans, integers, floats and strings),
/// and three for composite values (mappings, sequences and structures). A path appears in at most one scalar map;
/// composite maps store the entire sub-tree at the path.
///
/// For each scalar kind, there are three getters (e.g., [`Self::integer()`], [`Self::integer_or()`]
/// and [`Self::integer_or_zero()`]) and a setter ([`Self::set_integer()`]).
/// Setters allow overriding values programmatically; such overrides are discarded on the next full rebuild.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigIndex {
    pub(crate) bools: HashMap<String, bool>,
    pub(crate) integers: HashMap<String, i64>,
    pub(crate) floats: HashMap<String, f64>,
    pub(crate) strings: HashMap<String, String>,
    pub(crate) mappings: HashMap<String, Node>,
    pub(crate) sequences: HashMap<String, Node>,
    pub(crate) structures: HashMap<String, Node>,
}

impl ConfigIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index for the provided template from scratch.
    ///
    /// # Errors
    ///
    /// Propagates traversal errors.
    pub fn build<T>(template: &T, options: &IndexOptions) -> Result<Self, IndexError>
    where
        T: DescribeTemplate + ?Sized,
    {
        let mut index = Self::new();
        Indexer::new(options).index(&template.describe(), &mut index)?;
        Ok(index)
    }

    /// Returns the total number of entries in all maps.
    pub fn len(&self) -> usize {
        self.bools.len()
            + self.integers.len()
            + self.floats.len()
            + self.strings.len()
            + self.mappings.len()
            + self.sequences.len()
            + self.structures.len()
    }

    /// Checks whether this index is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all entries from this index.
    pub fn clear(&mut self) {
        self.bools.clear();
        self.integers.clear();
        self.floats.clear();
        self.strings.clear();
        self.mappings.clear();
        self.sequences.clear();
        self.structures.clear();
    }

    /// Iterates over all entries sorted by path. Entries with the same path are ordered by kind,
    /// scalars before composites.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Entry<'_>)> + '_ {
        let bools = self.bools.iter().map(|(k, v)| (k, Entry::Bool(*v)));
        let integers = self.integers.iter().map(|(k, v)| (k, Entry::Integer(*v)));
        let floats = self.floats.iter().map(|(k, v)| (k, Entry::Float(*v)));
        let strings = self.strings.iter().map(|(k, v)| (k, Entry::String(v)));
        let mappings = self.mappings.iter().map(|(k, v)| (k, Entry::Mapping(v)));
        let sequences = self.sequences.iter().map(|(k, v)| (k, Entry::Sequence(v)));
        let structures = self.structures.iter().map(|(k, v)| (k, Entry::Structure(v)));

        let mut entries: Vec<_> = bools
            .chain(integers)
            .chain(floats)
            .chain(strings)
            .chain(mappings)
            .chain(sequences)
            .chain(structures)
            .map(|(key, entry)| (key.as_str(), entry))
            .collect();
        // Stable sorting keeps the kind order from the chain above.
        entries.sort_by(|(x, _), (y, _)| x.cmp(y));
        entries.into_iter()
    }

    scalar_accessors!(bools: bool, "boolean", bool, bool_or, bool_or_zero, set_bool);
    scalar_accessors!(integers: i64, "integer", integer, integer_or, integer_or_zero, set_integer);
    scalar_accessors!(floats: f64, "float", float, float_or, float_or_zero, set_float);

    /// Returns the string value at `key`, or `None` if there is no such entry.
    pub fn string(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    /// Returns the string value at `key`, or `default` if there is no such entry.
    pub fn string_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.string(key).unwrap_or(default)
    }

    /// Returns the string value at `key`, or an empty string if there is no such entry.
    pub fn string_or_zero(&self, key: &str) -> &str {
        self.string(key).unwrap_or_default()
    }

    /// Sets the string value at `key`, overwriting the existing value if any.
    pub fn set_string(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    composite_accessors!(mappings, "mapping", mapping, set_mapping);
    composite_accessors!(sequences, "sequence", sequence, set_sequence);
    composite_accessors!(structures, "structure", structure, set_structure);
}
