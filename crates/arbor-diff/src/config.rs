use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DiffResult;

type IgnoreFn = dyn Fn(&str, &str) -> bool + Send + Sync;

/// Runtime options for a diff.
///
/// The ignore predicate receives the current path and a child or attribute
/// key. Returning `true` silences the presence or attribute finding for that
/// key; recursion into shared children is never affected.
#[derive(Default)]
pub struct DiffOptions {
    ignore: Option<Box<IgnoreFn>>,
}

impl DiffOptions {
    /// Options with no suppression.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a suppression predicate.
    pub fn ignore<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&str, &str) -> bool + Send + Sync + 'static,
    {
        self.ignore = Some(Box::new(predicate));
        self
    }

    pub(crate) fn is_ignored(&self, path: &str, key: &str) -> bool {
        self.ignore.as_ref().is_some_and(|f| f(path, key))
    }
}

impl fmt::Debug for DiffOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiffOptions")
            .field("ignore", &self.ignore.is_some())
            .finish()
    }
}

/// Declarative diff configuration, loadable from TOML.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Display name of the first tree.
    pub left_name: String,
    /// Display name of the second tree.
    pub right_name: String,
    /// Child and attribute keys whose findings are suppressed everywhere.
    pub ignore_keys: Vec<String>,
    /// Suppress findings whose full path (`<path><key>`) starts with any of these.
    pub ignore_paths: Vec<String>,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            left_name: "a".to_string(),
            right_name: "b".to_string(),
            ignore_keys: Vec::new(),
            ignore_paths: Vec::new(),
        }
    }
}

impl DiffConfig {
    /// Parse a configuration from TOML. Missing fields take their defaults.
    pub fn from_toml(text: &str) -> DiffResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Build runtime options from this configuration.
    pub fn options(&self) -> DiffOptions {
        if self.ignore_keys.is_empty() && self.ignore_paths.is_empty() {
            return DiffOptions::new();
        }
        let keys: BTreeSet<String> = self.ignore_keys.iter().cloned().collect();
        let prefixes = self.ignore_paths.clone();
        DiffOptions::new().ignore(move |path, key| {
            keys.contains(key) || {
                let full = format!("{path}{key}");
                prefixes.iter().any(|p| full.starts_with(p.as_str()))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = DiffConfig::default();
        assert_eq!(c.left_name, "a");
        assert_eq!(c.right_name, "b");
        assert!(c.ignore_keys.is_empty());
        assert!(!c.options().is_ignored("/", "anything"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = DiffConfig::from_toml(
            r#"
            left_name = "expected"
            ignore_keys = ["created_at"]
            "#,
        )
        .unwrap();
        assert_eq!(c.left_name, "expected");
        assert_eq!(c.right_name, "b");
        assert_eq!(c.ignore_keys, vec!["created_at"]);
    }

    #[test]
    fn malformed_toml_is_rejected() {
        assert!(DiffConfig::from_toml("ignore_keys = 3").is_err());
    }

    #[test]
    fn options_match_keys_and_path_prefixes() {
        let c = DiffConfig {
            ignore_keys: vec!["stamp".into()],
            ignore_paths: vec!["/scratch".into()],
            ..Default::default()
        };
        let options = c.options();
        assert!(options.is_ignored("/deep/er/", "stamp"));
        assert!(options.is_ignored("/", "scratch"));
        assert!(options.is_ignored("/scratch/", "x"));
        assert!(!options.is_ignored("/", "data"));
    }
}
