//! Recursive configuration value model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The mapping type used at every level of the configuration tree.
pub type ConfigObject = BTreeMap<String, ConfigValue>;

/// A single configuration value.
///
/// This is a closed recursive type covering everything a configuration script
/// can produce, so merge and equality logic can match exhaustively. The serde
/// representation is untagged: a `ConfigValue` reads and writes as plain JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<ConfigValue>),
    Object(ConfigObject),
}

impl ConfigValue {
    /// Borrow the inner mapping when this value is an object.
    pub fn as_object(&self) -> Option<&ConfigObject> {
        match self {
            ConfigValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the inner string when this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Default for ConfigValue {
    fn default() -> Self {
        ConfigValue::Null
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Number(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Number(value as f64)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(items: Vec<ConfigValue>) -> Self {
        ConfigValue::Array(items)
    }
}

impl From<ConfigObject> for ConfigValue {
    fn from(map: ConfigObject) -> Self {
        ConfigValue::Object(map)
    }
}
