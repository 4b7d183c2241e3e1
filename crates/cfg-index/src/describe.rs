//! Conversion of typed templates into [`Node`] trees.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque},
    fmt,
    hash::BuildHasher,
    path::{Path, PathBuf},
    rc::Rc,
    sync::Arc,
};

use crate::node::Node;

/// Configuration template that can be described as a [`Node`] tree.
///
/// This trait is implemented for primitive types, strings, standard collections and smart pointers.
/// For structs, it should be derived via [`derive(DescribeTemplate)`](macro@crate::DescribeTemplate).
pub trait DescribeTemplate {
    /// Describes the current state of this value.
    fn describe(&self) -> Node;
}

impl<T: DescribeTemplate + ?Sized> DescribeTemplate for &T {
    fn describe(&self) -> Node {
        (**self).describe()
    }
}

impl DescribeTemplate for Node {
    fn describe(&self) -> Node {
        self.clone()
    }
}

impl DescribeTemplate for bool {
    fn describe(&self) -> Node {
        Node::Bool(*self)
    }
}

macro_rules! impl_describe_for_integers {
    ($($int:ty),+) => {
        $(
        impl DescribeTemplate for $int {
            fn describe(&self) -> Node {
                i64::try_from(*self).map_or(Node::Unsupported(stringify!($int)), Node::Integer)
            }
        }
        )+
    };
}

impl_describe_for_integers!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, usize, isize);

impl DescribeTemplate for f32 {
    fn describe(&self) -> Node {
        Node::Float((*self).into())
    }
}

impl DescribeTemplate for f64 {
    fn describe(&self) -> Node {
        Node::Float(*self)
    }
}

impl DescribeTemplate for str {
    fn describe(&self) -> Node {
        Node::String(self.to_owned())
    }
}

impl DescribeTemplate for String {
    fn describe(&self) -> Node {
        Node::String(self.clone())
    }
}

impl DescribeTemplate for Cow<'_, str> {
    fn describe(&self) -> Node {
        Node::String(self.as_ref().to_owned())
    }
}

impl DescribeTemplate for Path {
    fn describe(&self) -> Node {
        Node::String(self.to_string_lossy().into_owned())
    }
}

impl DescribeTemplate for PathBuf {
    fn describe(&self) -> Node {
        self.as_path().describe()
    }
}

impl DescribeTemplate for char {
    fn describe(&self) -> Node {
        Node::Unsupported("char")
    }
}

impl DescribeTemplate for () {
    fn describe(&self) -> Node {
        Node::Unsupported("()")
    }
}

impl<T: DescribeTemplate> DescribeTemplate for Option<T> {
    fn describe(&self) -> Node {
        Node::optional(self.as_ref().map(T::describe))
    }
}

impl<T: DescribeTemplate + ?Sized> DescribeTemplate for Box<T> {
    fn describe(&self) -> Node {
        (**self).describe()
    }
}

impl<T: DescribeTemplate + ?Sized> DescribeTemplate for Rc<T> {
    fn describe(&self) -> Node {
        (**self).describe()
    }
}

impl<T: DescribeTemplate + ?Sized> DescribeTemplate for Arc<T> {
    fn describe(&self) -> Node {
        (**self).describe()
    }
}

fn describe_items<'a, T: DescribeTemplate + 'a>(items: impl Iterator<Item = &'a T>) -> Node {
    Node::Sequence(items.map(T::describe).collect())
}

impl<T: DescribeTemplate> DescribeTemplate for [T] {
    fn describe(&self) -> Node {
        describe_items(self.iter())
    }
}

impl<T: DescribeTemplate, const N: usize> DescribeTemplate for [T; N] {
    fn describe(&self) -> Node {
        describe_items(self.iter())
    }
}

impl<T: DescribeTemplate> DescribeTemplate for Vec<T> {
    fn describe(&self) -> Node {
        describe_items(self.iter())
    }
}

impl<T: DescribeTemplate> DescribeTemplate for VecDeque<T> {
    fn describe(&self) -> Node {
        describe_items(self.iter())
    }
}

/// Element order follows the set iteration order, which is unspecified.
impl<T: DescribeTemplate, S: BuildHasher> DescribeTemplate for HashSet<T, S> {
    fn describe(&self) -> Node {
        describe_items(self.iter())
    }
}

impl<T: DescribeTemplate> DescribeTemplate for BTreeSet<T> {
    fn describe(&self) -> Node {
        describe_items(self.iter())
    }
}

fn describe_entries<'a, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> Node
where
    K: fmt::Display + 'a,
    V: DescribeTemplate + 'a,
{
    let entries = entries.map(|(key, value)| (key.to_string(), value.describe()));
    Node::Mapping(entries.collect())
}

impl<K, V, S> DescribeTemplate for HashMap<K, V, S>
where
    K: fmt::Display,
    V: DescribeTemplate,
    S: BuildHasher,
{
    fn describe(&self) -> Node {
        describe_entries(self.iter())
    }
}

impl<K: fmt::Display, V: DescribeTemplate> DescribeTemplate for BTreeMap<K, V> {
    fn describe(&self) -> Node {
        describe_entries(self.iter())
    }
}

/// Allows embedding free-form JSON into templates. JSON objects are described as opaque mappings.
impl DescribeTemplate for serde_json::Value {
    fn describe(&self) -> Node {
        match self {
            Self::Null => Node::Null,
            Self::Bool(value) => Node::Bool(*value),
            Self::Number(number) => {
                if let Some(value) = number.as_i64() {
                    Node::Integer(value)
                } else if let Some(value) = number.as_f64() {
                    Node::Float(value)
                } else {
                    Node::Unsupported("number")
                }
            }
            Self::String(value) => Node::String(value.clone()),
            Self::Array(items) => describe_items(items.iter()),
            Self::Object(map) => describe_entries(map.iter()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describing_primitives() {
        assert_eq!(true.describe(), Node::Bool(true));
        assert_eq!(42_u8.describe(), Node::Integer(42));
        assert_eq!((-3_i32).describe(), Node::Integer(-3));
        assert_eq!(u64::from(u32::MAX).describe(), Node::Integer(u32::MAX.into()));
        assert_eq!(u64::MAX.describe(), Node::Unsupported("u64"));
        assert_eq!(1.5_f32.describe(), Node::Float(1.5));
        assert_eq!("test".describe(), Node::String("test".into()));
        assert_eq!(
            PathBuf::from("/tmp").describe(),
            Node::String("/tmp".into())
        );
        assert_eq!('c'.describe(), Node::Unsupported("char"));
    }

    #[test]
    fn describing_wrappers() {
        assert_eq!(None::<u32>.describe(), Node::Optional(None));
        assert_eq!(
            Some(Box::new(5_u32)).describe(),
            Node::optional(Some(Node::Integer(5)))
        );
        assert_eq!(Arc::new(false).describe(), Node::Bool(false));
        assert_eq!(Rc::<str>::from("rc").describe(), Node::String("rc".into()));
    }

    #[test]
    fn describing_collections() {
        assert_eq!(
            vec![1_u16, 2].describe(),
            Node::Sequence(vec![Node::Integer(1), Node::Integer(2)])
        );
        assert_eq!([0.5_f64].describe(), Node::Sequence(vec![Node::Float(0.5)]));
        assert_eq!(
            BTreeSet::from(["b", "a"]).describe(),
            Node::Sequence(vec![Node::String("a".into()), Node::String("b".into())])
        );

        let map = HashMap::from([(1_u32, "one"), (2, "two")]);
        let Node::Mapping(entries) = map.describe() else {
            panic!("unexpected node");
        };
        assert_eq!(entries.len(), 2);
        assert_eq!(entries["1"], Node::String("one".into()));
        assert_eq!(entries["2"], Node::String("two".into()));
    }

    #[test]
    fn describing_json() {
        let json = serde_json::json!({
            "int": -1,
            "float": 2.5,
            "array": [true, null],
        });
        let Node::Mapping(entries) = json.describe() else {
            panic!("unexpected node");
        };
        assert_eq!(entries["int"], Node::Integer(-1));
        assert_eq!(entries["float"], Node::Float(2.5));
        assert_eq!(
            entries["array"],
            Node::Sequence(vec![Node::Bool(true), Node::Null])
        );
    }
}
