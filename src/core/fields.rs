//! Structured key/value fields
//!
//! This module provides:
//! - `FieldValue`: the closed set of value kinds a field can carry
//! - `Fields`: a key-sorted field mapping
//! - `Fielder`: the capability letting any value describe itself as fields

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::{Duration, SystemTime};

/// Reserved key used by `with_error` and by failed traces
pub const ERROR_KEY: &str = "error";

/// Key carrying the elapsed time of a stopped trace
pub const DURATION_KEY: &str = "duration";

/// Value type for structured logging fields
///
/// Values are resolved when they are attached, so handlers never need to
/// inspect arbitrary caller types.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Uint(u64),
    Float(f64),
    Bool(bool),
    Duration(Duration),
    Time(DateTime<Utc>),
    /// Text of an error, captured at attach time
    Error(String),
    Map(Fields),
    Null,
}

impl FieldValue {
    /// Capture any `Display` value as a string field
    pub fn display(value: &impl fmt::Display) -> Self {
        FieldValue::String(value.to_string())
    }

    /// Capture the text of an error
    pub fn error(err: &(dyn std::error::Error + '_)) -> Self {
        FieldValue::Error(err.to_string())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) | FieldValue::Error(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            FieldValue::Duration(d) => Some(*d),
            _ => None,
        }
    }

    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) | FieldValue::Error(s) => f.write_str(s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Uint(u) => write!(f, "{}", u),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Duration(d) => write!(f, "{:?}", d),
            FieldValue::Time(t) => f.write_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            FieldValue::Map(m) => write!(f, "{{{}}}", m),
            FieldValue::Null => f.write_str("null"),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::String(s) | FieldValue::Error(s) => serializer.serialize_str(s),
            FieldValue::Int(i) => serializer.serialize_i64(*i),
            FieldValue::Uint(u) => serializer.serialize_u64(*u),
            FieldValue::Float(fl) => serializer.serialize_f64(*fl),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            // same text as Display: "1.5s", "2µs"
            FieldValue::Duration(d) => serializer.collect_str(&format_args!("{:?}", d)),
            FieldValue::Time(t) => {
                serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            FieldValue::Map(m) => m.serialize(serializer),
            FieldValue::Null => serializer.serialize_unit(),
        }
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(value: $t) -> Self {
                FieldValue::Int(value as i64)
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for FieldValue {
            fn from(value: $t) -> Self {
                FieldValue::Uint(value as u64)
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64, isize);
impl_from_unsigned!(u8, u16, u32, u64, usize);

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f as f64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<Duration> for FieldValue {
    fn from(d: Duration) -> Self {
        FieldValue::Duration(d)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(t: DateTime<Utc>) -> Self {
        FieldValue::Time(t)
    }
}

impl From<SystemTime> for FieldValue {
    fn from(t: SystemTime) -> Self {
        FieldValue::Time(t.into())
    }
}

impl From<Fields> for FieldValue {
    fn from(m: Fields) -> Self {
        FieldValue::Map(m)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Key-sorted mapping from field name to value
///
/// Iteration, `Display` and serialization are all in key order, so textual
/// output is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Fields {
    fields: BTreeMap<String, FieldValue>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field, replacing any previous value under the same key
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.insert(key, value);
        self
    }

    pub fn insert<K, V>(&mut self, key: K, value: V) -> Option<FieldValue>
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into())
    }

    /// Overlay `other` onto `self`; keys from `other` win.
    pub fn merge(&mut self, other: Fields) {
        self.fields.extend(other.fields);
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Format fields as key=value pairs
    pub fn format_fields(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_fields())
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<FieldValue>> Extend<(K, V)> for Fields {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = (&'a String, &'a FieldValue);
    type IntoIter = std::collections::btree_map::Iter<'a, String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// A value that can describe itself as a set of fields
///
/// # Example
///
/// ```
/// use rust_slog::{Fielder, Fields};
///
/// struct Pet {
///     name: String,
///     age: u32,
/// }
///
/// impl Fielder for Pet {
///     fn fields(&self) -> Fields {
///         Fields::new()
///             .with_field("name", self.name.as_str())
///             .with_field("age", self.age)
///     }
/// }
///
/// let pet = Pet { name: "Tobi".into(), age: 3 };
/// assert_eq!(pet.fields().len(), 2);
/// ```
pub trait Fielder {
    fn fields(&self) -> Fields;
}

impl Fielder for Fields {
    fn fields(&self) -> Fields {
        self.clone()
    }
}

impl<T: Fielder + ?Sized> Fielder for &T {
    fn fields(&self) -> Fields {
        (**self).fields()
    }
}

impl<K, V, S> Fielder for HashMap<K, V, S>
where
    K: AsRef<str>,
    V: Clone + Into<FieldValue>,
{
    fn fields(&self) -> Fields {
        self.iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.clone()))
            .collect()
    }
}

impl<K, V> Fielder for BTreeMap<K, V>
where
    K: AsRef<str>,
    V: Clone + Into<FieldValue>,
{
    fn fields(&self) -> Fields {
        self.iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.clone()))
            .collect()
    }
}

impl<K, V> Fielder for [(K, V)]
where
    K: AsRef<str>,
    V: Clone + Into<FieldValue>,
{
    fn fields(&self) -> Fields {
        self.iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.clone()))
            .collect()
    }
}

impl<K, V, const N: usize> Fielder for [(K, V); N]
where
    K: AsRef<str>,
    V: Clone + Into<FieldValue>,
{
    fn fields(&self) -> Fields {
        self.as_slice().fields()
    }
}
