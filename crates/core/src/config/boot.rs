//! The immutable boot configuration snapshot.

use serde::de::DeserializeOwned;

use super::merge::value_at;
use super::value::{ConfigObject, ConfigValue};
use crate::script::EvalFailure;

/// How a [`BootConfig`] came to be.
///
/// Distinguishes the trivial empty configuration (no script on the page)
/// from the recovered one (script present but failed): both can yield an
/// empty mapping, but only the latter is worth a diagnostic.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    /// The page contained no configuration script.
    NoScript,
    /// The script ran to completion.
    Loaded,
    /// The script failed; the mapping holds whatever had accumulated.
    Recovered(EvalFailure),
}

impl LoadOutcome {
    /// Whether this load recovered from a script failure.
    pub fn is_recovered(&self) -> bool {
        matches!(self, LoadOutcome::Recovered(_))
    }
}

/// The merged configuration snapshot produced by one load.
///
/// Immutable once constructed: reloading configuration replaces the whole
/// snapshot rather than mutating it. The root is always a well-formed
/// mapping, possibly empty but never absent, so callers need no null checks.
#[derive(Debug, Clone)]
pub struct BootConfig {
    values: ConfigObject,
    outcome: LoadOutcome,
}

impl BootConfig {
    pub(crate) fn new(values: ConfigObject, outcome: LoadOutcome) -> Self {
        Self { values, outcome }
    }

    /// The root configuration mapping.
    pub fn values(&self) -> &ConfigObject {
        &self.values
    }

    /// How this snapshot was produced.
    pub fn outcome(&self) -> &LoadOutcome {
        &self.outcome
    }

    /// Whether the mapping holds no options at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The value at a dot-delimited path, if any.
    pub fn value_at(&self, path: &str) -> Option<&ConfigValue> {
        value_at(&self.values, path)
    }

    /// Typed lookup with a caller-supplied default.
    ///
    /// Returns `default` when the path is absent or the value there does not
    /// deserialize into `T`.
    pub fn get_or<T: DeserializeOwned>(&self, path: &str, default: T) -> T {
        self.value_at(path)
            .and_then(|value| serde_json::to_value(value).ok())
            .and_then(|json| serde_json::from_value(json).ok())
            .unwrap_or(default)
    }
}
