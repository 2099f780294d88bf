//! Environment-backed deserializer

use std::collections::HashMap;
use std::env;

use crate::de::Deserializer;
use crate::field::Field;

/// Deserializer reading raw values from environment variables.
///
/// The environment is captured once, when the deserializer is created. Lookups
/// are flat: sections declared in the schema are ignored.
#[derive(Debug, Clone, Default)]
pub struct EnvDeserializer {
    vars: HashMap<String, String>,
    prefix: String,
}

impl EnvDeserializer {
    /// Snapshot of the current process environment.
    ///
    /// Variables whose name or value is not valid unicode are skipped.
    pub fn from_env() -> Self {
        Self::from_vars(env::vars_os().filter_map(|(name, value)| {
            Some((name.into_string().ok()?, value.into_string().ok()?))
        }))
    }

    /// Deserializer over an explicit set of variables.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        tracing::debug!(vars = vars.len(), "captured environment");
        Self {
            vars,
            prefix: String::new(),
        }
    }

    /// Prepend `prefix` to every lookup key, e.g. `APP_` turns `port` into
    /// `APP_port`.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        if self.prefix.is_empty() {
            return self.vars.get(key).map(String::as_str);
        }
        self.vars
            .get(&format!("{}{}", self.prefix, key))
            .map(String::as_str)
    }
}

impl Deserializer for EnvDeserializer {
    fn raw_value(&self, _field: &Field, key: &str) -> Option<&str> {
        self.get(key)
    }
}
