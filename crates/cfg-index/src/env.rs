//! Environment variables used to resolve `env` fields.

use std::{collections::HashMap, env};

#[derive(Debug, Clone, Default)]
enum Vars {
    #[default]
    Process,
    Fixed(HashMap<String, String>),
}

/// Source of environment variables.
///
/// By default, variables are read from the process environment at the time of indexing. A fixed set of variables
/// can be supplied with [`Self::from_iter()`] instead, e.g. for testing.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    vars: Vars,
}

impl Environment {
    /// Reads variables from the process environment.
    pub fn process() -> Self {
        Self::default()
    }

    /// Creates a fixed environment.
    #[allow(clippy::should_implement_trait)]
    pub fn from_iter<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()));
        Self {
            vars: Vars::Fixed(vars.collect()),
        }
    }

    /// Looks up a variable. Variables with non-UTF-8 values are treated as unset.
    pub fn var(&self, name: &str) -> Option<String> {
        match &self.vars {
            Vars::Process => env::var_os(name)?.into_string().ok(),
            Vars::Fixed(map) => map.get(name).cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_environment() {
        let env = Environment::from_iter([("APP_PORT", "8080"), ("EMPTY", "")]);
        assert_eq!(env.var("APP_PORT").as_deref(), Some("8080"));
        assert_eq!(env.var("EMPTY").as_deref(), Some(""));
        assert_eq!(env.var("app_port"), None);
        assert_eq!(env.var("OTHER"), None);
    }

    #[test]
    fn process_environment() {
        let env = Environment::process();
        assert_eq!(env.var("PATH"), std::env::var("PATH").ok());
        assert_eq!(env.var("CFG_INDEX_SURELY_UNSET_VARIABLE"), None);
    }
}
