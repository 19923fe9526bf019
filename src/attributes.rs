use crate::error::{FrodoError, Result};
use dashmap::DashMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::env;
use std::ffi::OsString;
use std::sync::Arc;

/// Attribute bag carried by every controller.
///
/// Clones share the same storage, so a controller registered under several
/// routes sees a single set of attributes.
///
/// # Example
/// ```
/// use frodo::Attributes;
///
/// let attributes = Attributes::new();
/// attributes.set("per_page", 25).unwrap();
///
/// let per_page: Option<u32> = attributes.get_as("per_page").unwrap();
/// assert_eq!(per_page, Some(25));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    values: Arc<DashMap<String, Value>>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every environment variable starting with `prefix`.
    ///
    /// `FRODO_PER_PAGE=25` loaded with the prefix `FRODO_` becomes the
    /// attribute `per_page` holding the number `25`.
    pub fn from_env(prefix: &str) -> Self {
        Self::from_os_vars(prefix, env::vars_os())
    }

    /// Like [`Attributes::from_vars`], skipping entries that are not valid UTF-8.
    pub fn from_os_vars<I>(prefix: &str, vars: I) -> Self
    where
        I: IntoIterator<Item = (OsString, OsString)>,
    {
        let vars = vars.into_iter().filter_map(|(key, value)| {
            Some((key.into_string().ok()?, value.into_string().ok()?))
        });
        Self::from_vars(prefix, vars)
    }

    /// Keys are lowercased after the prefix is stripped. When two variables
    /// collapse onto the same key, the first one seen wins.
    pub fn from_vars<I, K, V>(prefix: &str, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let attributes = Self::new();
        for (key, raw) in vars {
            let Some(name) = key.as_ref().strip_prefix(prefix) else {
                continue;
            };
            let name = name.to_lowercase();
            if name.is_empty() || attributes.contains(&name) {
                continue;
            }
            let raw = raw.as_ref();
            let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
            attributes.set_value(name, value);
        }
        attributes
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.values.get(key).map(|v| v.clone())
    }

    /// Decode the attribute stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        serde_json::from_value(value)
            .map(Some)
            .map_err(|source| FrodoError::AttributeDecode {
                key: key.to_string(),
                source,
            })
    }

    pub fn set<T: Serialize>(&self, key: impl Into<String>, value: T) -> Result<()> {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|source| FrodoError::AttributeEncode {
            key: key.clone(),
            source,
        })?;
        self.set_value(key, value);
        Ok(())
    }

    pub fn set_value(&self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.values.remove(key).map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        self.values.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
