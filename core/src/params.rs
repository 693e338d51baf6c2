//! Query parameters shared by both APIs.
//!
//! # Design
//! `Params` is a sorted map so every key appears exactly once and the encoded
//! form is deterministic. Values are stored already stringified; collections of
//! identifiers are flattened into a single space-delimited string when they
//! are converted into a `ParamValue`.

use std::collections::BTreeMap;

use crate::error::ApiError;

/// A single parameter value, already rendered as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamValue(String);

impl ParamValue {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn joined<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parts: Vec<String> = items.into_iter().map(|s| s.as_ref().to_string()).collect();
        ParamValue(parts.join(" "))
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue(value.to_string())
    }
}

macro_rules! param_value_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    ParamValue(value.to_string())
                }
            }
        )*
    };
}

param_value_from_int!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl From<Vec<String>> for ParamValue {
    fn from(value: Vec<String>) -> Self {
        ParamValue::joined(value)
    }
}

impl From<Vec<&str>> for ParamValue {
    fn from(value: Vec<&str>) -> Self {
        ParamValue::joined(value)
    }
}

impl From<&[&str]> for ParamValue {
    fn from(value: &[&str]) -> Self {
        ParamValue::joined(value.iter().copied())
    }
}

impl From<&[String]> for ParamValue {
    fn from(value: &[String]) -> Self {
        ParamValue::joined(value)
    }
}

impl<const N: usize> From<[&str; N]> for ParamValue {
    fn from(value: [&str; N]) -> Self {
        ParamValue::joined(value)
    }
}

/// Parameter name → value mapping sent with a request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: BTreeMap<String, ParamValue>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: &str, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace `key`. Returns the previous value, if any.
    pub fn insert(&mut self, key: &str, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.entries.insert(key.to_string(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(ParamValue::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<ParamValue> {
        self.entries.remove(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Fail with `MissingParameter` unless `key` is present.
    pub fn require(&self, key: &str) -> Result<(), ApiError> {
        if self.contains(key) {
            Ok(())
        } else {
            Err(ApiError::MissingParameter(key.to_string()))
        }
    }

    /// Percent-encode every key and value and join them as `k=v&k=v`.
    pub fn encode(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v.as_str())))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: AsRef<str>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        params.extend(iter);
        params
    }
}

impl<K, V> Extend<(K, V)> for Params
where
    K: AsRef<str>,
    V: Into<ParamValue>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k.as_ref(), v);
        }
    }
}
