//! Namespaced registry keys and the sequential identifier registry.
//!
//! Registry keys are stable string identifiers shared by the network protocol
//! and the persistent tag format (e.g., `minecraft:custom_data`). An
//! [`IdRegistry`] pairs every key with a protocol id equal to its registration
//! position, so the order of registration *is* the wire format.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::trace;

/// Default namespace used when a key omits an explicit namespace.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// Errors raised while building a registry.
///
/// Both variants indicate a broken build rather than bad input from a peer, so
/// callers are expected to abort startup when they see one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The key text is not a valid `namespace:path` identifier.
    #[error("invalid registry key `{input}`: {reason}")]
    InvalidKey {
        /// Offending input.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },
    /// Two declarations share the same key.
    #[error("duplicate registration of `{key}` (already id {existing})")]
    DuplicateRegistration {
        /// The key registered twice.
        key: RegistryKey,
        /// Id of the first registration.
        existing: i32,
    },
}

/// A namespaced key of the form `namespace:path`.
///
/// Ordering is lexical by `(namespace, path)` and is stable across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RegistryKey {
    namespace: String,
    path: String,
}

impl RegistryKey {
    /// Parse a registry key.
    ///
    /// Accepts either:
    /// - `namespace:path`
    /// - `path` (uses [`DEFAULT_NAMESPACE`])
    pub fn parse(input: &str) -> Result<Self, RegistryError> {
        Self::parse_with_default_namespace(input, DEFAULT_NAMESPACE)
    }

    /// Parse a registry key using a caller-provided default namespace.
    pub fn parse_with_default_namespace(
        input: &str,
        default_namespace: &str,
    ) -> Result<Self, RegistryError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(invalid(input, "key cannot be empty"));
        }

        let (namespace, path) = match trimmed.split_once(':') {
            Some((ns, p)) => (ns, p),
            None => (default_namespace, trimmed),
        };

        validate_namespace(namespace).map_err(|reason| invalid(input, reason))?;
        validate_path(path).map_err(|reason| invalid(input, reason))?;

        Ok(Self {
            namespace: namespace.to_string(),
            path: path.to_string(),
        })
    }

    /// Key in the `minecraft` namespace.
    ///
    /// Intended for literals baked into declaration tables; the path is checked
    /// in debug builds only.
    pub fn minecraft(path: &str) -> Self {
        debug_assert!(validate_path(path).is_ok(), "invalid literal path {path}");
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            path: path.to_string(),
        }
    }

    /// Registry key namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Registry key path.
    pub fn path(&self) -> &str {
        &self.path
    }
}

fn invalid(input: &str, reason: &'static str) -> RegistryError {
    RegistryError::InvalidKey {
        input: input.to_string(),
        reason,
    }
}

impl fmt::Display for RegistryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for RegistryKey {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RegistryKey {
    type Error = RegistryError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RegistryKey> for String {
    fn from(key: RegistryKey) -> Self {
        key.to_string()
    }
}

fn validate_namespace(ns: &str) -> Result<(), &'static str> {
    if ns.is_empty() {
        return Err("namespace cannot be empty");
    }
    if ns.len() > 64 {
        return Err("namespace too long (max 64)");
    }
    if !ns
        .chars()
        .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.'))
    {
        return Err("namespace has invalid characters (allowed: a-z0-9_.-)");
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<(), &'static str> {
    if path.is_empty() {
        return Err("path cannot be empty");
    }
    if path.len() > 128 {
        return Err("path too long (max 128)");
    }
    if !path
        .chars()
        .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.' | '/'))
    {
        return Err("path has invalid characters (allowed: a-z0-9_./-)");
    }
    Ok(())
}

/// Bidirectional key/id table with insertion-order id assignment.
///
/// Ids are `0..len()` with no gaps. The registry only grows through
/// [`IdRegistry::register_with`]; once a catalog has finished declaring its
/// entries it hands out shared references only, which makes concurrent lookups
/// lock-free.
#[derive(Debug, Clone)]
pub struct IdRegistry<K> {
    entries: Vec<(RegistryKey, K)>,
    by_key: HashMap<RegistryKey, usize>,
}

impl<K> Default for IdRegistry<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            by_key: HashMap::new(),
        }
    }
}

impl<K> IdRegistry<K> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `key`, building the value from the id it is assigned.
    ///
    /// The id is the number of entries registered before this one.
    pub fn register_with<F>(&mut self, key: RegistryKey, make: F) -> Result<&K, RegistryError>
    where
        F: FnOnce(i32) -> K,
    {
        if let Some(&existing) = self.by_key.get(&key) {
            return Err(RegistryError::DuplicateRegistration {
                key,
                existing: existing as i32,
            });
        }
        let index = self.entries.len();
        let id = index as i32;
        trace!(name = %key, id, "registered");
        self.by_key.insert(key.clone(), index);
        self.entries.push((key, make(id)));
        Ok(&self.entries[index].1)
    }

    /// Look up by parsed key.
    pub fn by_key(&self, key: &RegistryKey) -> Option<&K> {
        self.by_key.get(key).map(|&index| &self.entries[index].1)
    }

    /// Look up by key text; a bare path is resolved in the `minecraft` namespace.
    ///
    /// Unparsable names are simply unknown.
    pub fn by_name(&self, name: &str) -> Option<&K> {
        let key = RegistryKey::parse(name).ok()?;
        self.by_key(&key)
    }

    /// Look up by protocol id.
    pub fn by_id(&self, id: i32) -> Option<&K> {
        let index = usize::try_from(id).ok()?;
        self.entries.get(index).map(|(_, value)| value)
    }

    /// Protocol id assigned to `name`, if registered.
    pub fn id_of(&self, name: &str) -> Option<i32> {
        let key = RegistryKey::parse(name).ok()?;
        self.by_key.get(&key).map(|&index| index as i32)
    }

    /// Key registered under `id`.
    pub fn key_of(&self, id: i32) -> Option<&RegistryKey> {
        let index = usize::try_from(id).ok()?;
        self.entries.get(index).map(|(key, _)| key)
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(id, key, value)` in id order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, &RegistryKey, &K)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(index, (key, value))| (index as i32, key, value))
    }

    /// Iterate keys in id order.
    pub fn keys(&self) -> impl Iterator<Item = &RegistryKey> {
        self.entries.iter().map(|(key, _)| key)
    }
}
