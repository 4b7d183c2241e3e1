//! Canonical paths of template nodes.
//!
//! The root node has the empty path. A structure field `field` nested in a node with path `parent`
//! has path `parent.field`, and a sequence element with index `i` has path `parent[i]`.
//! If the parent path is empty, the separator is omitted (i.e., the paths are `field` and `i`, respectively).

/// Returns the path of a structure field.
pub fn join_field(parent: &str, field: &str) -> String {
    if parent.is_empty() {
        field.to_owned()
    } else {
        format!("{parent}.{field}")
    }
}

/// Returns the path of a sequence element.
pub fn join_index(parent: &str, index: usize) -> String {
    if parent.is_empty() {
        index.to_string()
    } else {
        format!("{parent}[{index}]")
    }
}

/// Returns the name of the env variable corresponding to a field.
pub fn env_var_name(field: &str) -> String {
    field.to_uppercase()
}

/// Returns the synthetic path for an env variable, e.g. `ENV.DATABASE_URL`.
pub fn env_path(namespace: &str, var_name: &str) -> String {
    join_field(namespace, var_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joining_fields() {
        assert_eq!(join_field("", "test"), "test");
        assert_eq!(join_field("test", "other"), "test.other");
        assert_eq!(join_field("a[0]", "b"), "a[0].b");
        // Short parent paths still get a separator.
        assert_eq!(join_field("a", "b"), "a.b");
    }

    #[test]
    fn joining_indices() {
        assert_eq!(join_index("", 0), "0");
        assert_eq!(join_index("items", 1), "items[1]");
        assert_eq!(join_index("items[1]", 2), "items[1][2]");
        assert_eq!(join_index("0", 3), "0[3]");
    }

    #[test]
    fn env_paths() {
        assert_eq!(env_var_name("database_url"), "DATABASE_URL");
        assert_eq!(env_var_name("DbUrl"), "DBURL");
        assert_eq!(env_path("ENV", "DATABASE_URL"), "ENV.DATABASE_URL");
        assert_eq!(env_path("", "DATABASE_URL"), "DATABASE_URL");
    }
}
