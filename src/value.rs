//! Conversion of leaf values into attribute [`Value`]s.
//!
//! Every type that can sit on the right-hand side of `key = value` implements
//! [`Marshal`]. Special-cased types (elapsed time, calendar time, text- and
//! JSON-rendering types) get dedicated impls; the rest follow their kind: strings,
//! sequences, maps, numbers and booleans.

use crate::ast::{MapEntry, Value};
use crate::error::{BoxError, ConvertError};
use crate::number::Number;
use crate::utils::format_duration;
use chrono::{DateTime, SecondsFormat, TimeZone};
use serde::Serialize;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::fmt::Display;
use std::hash::BuildHasher;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// A leaf value that can be marshalled as an attribute.
pub trait Marshal {
    /// Converts the current value.
    fn to_value(&self) -> Result<Value, ConvertError>;

    /// Whether this is the type's zero value. Zero-valued optional attributes are
    /// left out of data output.
    fn is_zero(&self) -> bool;

    /// Placeholder standing in for this type in schema output. It always has the
    /// same variant [`to_value`](Marshal::to_value) produces.
    fn schema() -> Value
    where
        Self: Sized;
}

/// Types that render themselves as text, possibly failing.
///
/// Use [`impl_marshal_text!`](crate::impl_marshal_text) to make such a type usable
/// as an attribute.
pub trait MarshalText {
    fn marshal_text(&self) -> Result<String, BoxError>;

    /// Whether the value counts as unset for optional attributes.
    fn is_unset(&self) -> bool {
        false
    }
}

/// Implements [`Marshal`] for types that implement [`MarshalText`].
#[macro_export]
macro_rules! impl_marshal_text {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::value::Marshal for $ty {
                fn to_value(&self) -> Result<$crate::ast::Value, $crate::error::ConvertError> {
                    $crate::value::MarshalText::marshal_text(self)
                        .map($crate::ast::Value::String)
                        .map_err($crate::error::ConvertError::Text)
                }

                fn is_zero(&self) -> bool {
                    $crate::value::MarshalText::is_unset(self)
                }

                fn schema() -> $crate::ast::Value {
                    $crate::ast::Value::String(String::new())
                }
            }
        )+
    };
}

/// Marshals the wrapped value as its raw JSON document, e.g. `"{\"a\":1}"`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Json<T>(pub T);

// --- Special-cased types ---

impl Marshal for Duration {
    fn to_value(&self) -> Result<Value, ConvertError> {
        Ok(Value::String(format_duration(*self)))
    }

    fn is_zero(&self) -> bool {
        *self == Duration::ZERO
    }

    fn schema() -> Value {
        Value::String(format_duration(Duration::ZERO))
    }
}

impl MarshalText for IpAddr {
    fn marshal_text(&self) -> Result<String, BoxError> {
        Ok(self.to_string())
    }

    fn is_unset(&self) -> bool {
        self.is_unspecified()
    }
}

impl MarshalText for Ipv4Addr {
    fn marshal_text(&self) -> Result<String, BoxError> {
        Ok(self.to_string())
    }

    fn is_unset(&self) -> bool {
        self.is_unspecified()
    }
}

impl MarshalText for Ipv6Addr {
    fn marshal_text(&self) -> Result<String, BoxError> {
        Ok(self.to_string())
    }

    fn is_unset(&self) -> bool {
        self.is_unspecified()
    }
}

impl MarshalText for SocketAddr {
    fn marshal_text(&self) -> Result<String, BoxError> {
        Ok(self.to_string())
    }
}

impl MarshalText for PathBuf {
    fn marshal_text(&self) -> Result<String, BoxError> {
        match self.to_str() {
            Some(s) => Ok(s.to_string()),
            None => Err(format!("path {} is not valid UTF-8", self.display()).into()),
        }
    }

    fn is_unset(&self) -> bool {
        self.as_os_str().is_empty()
    }
}

impl_marshal_text!(IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, PathBuf);

impl<T: Serialize> Marshal for Json<T> {
    fn to_value(&self) -> Result<Value, ConvertError> {
        Ok(Value::String(serde_json::to_string(&self.0)?))
    }

    /// Scalar zeros (`null`, `false`, `0`, `""`) count as unset. Arrays and objects never do,
    /// the same as `Vec` and the map types.
    fn is_zero(&self) -> bool {
        serde_json::to_value(&self.0).is_ok_and(|doc| json_is_zero(&doc))
    }

    fn schema() -> Value {
        Value::String(String::new())
    }
}

fn json_is_zero(doc: &serde_json::Value) -> bool {
    match doc {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(b) => !b,
        serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
        serde_json::Value::String(s) => s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => false,
    }
}

impl Marshal for serde_json::Value {
    fn to_value(&self) -> Result<Value, ConvertError> {
        Ok(Value::String(serde_json::to_string(self)?))
    }

    fn is_zero(&self) -> bool {
        json_is_zero(self)
    }

    fn schema() -> Value {
        Value::String(String::new())
    }
}

// --- Strings ---

impl Marshal for String {
    fn to_value(&self) -> Result<Value, ConvertError> {
        Ok(Value::String(self.clone()))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn schema() -> Value {
        Value::String(String::new())
    }
}

impl Marshal for &str {
    fn to_value(&self) -> Result<Value, ConvertError> {
        Ok(Value::String((*self).to_string()))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn schema() -> Value {
        Value::String(String::new())
    }
}

impl Marshal for Cow<'_, str> {
    fn to_value(&self) -> Result<Value, ConvertError> {
        Ok(Value::String(self.to_string()))
    }

    fn is_zero(&self) -> bool {
        self.is_empty()
    }

    fn schema() -> Value {
        Value::String(String::new())
    }
}

impl Marshal for char {
    fn to_value(&self) -> Result<Value, ConvertError> {
        Ok(Value::String(self.to_string()))
    }

    fn is_zero(&self) -> bool {
        *self == '\0'
    }

    fn schema() -> Value {
        Value::String(String::new())
    }
}

// --- Sequences ---

fn list<'a, T: Marshal + 'a>(items: impl Iterator<Item = &'a T>) -> Result<Value, ConvertError> {
    let values: Result<Vec<_>, _> = items.map(Marshal::to_value).collect();
    Ok(Value::List(values?))
}

impl<T: Marshal> Marshal for Vec<T> {
    fn to_value(&self) -> Result<Value, ConvertError> {
        list(self.iter())
    }

    /// An empty vector is an explicit empty list; use `Option<Vec<T>>` for "unset".
    fn is_zero(&self) -> bool {
        false
    }

    fn schema() -> Value {
        Value::List(Vec::new())
    }
}

impl<T: Marshal> Marshal for VecDeque<T> {
    fn to_value(&self) -> Result<Value, ConvertError> {
        list(self.iter())
    }

    fn is_zero(&self) -> bool {
        false
    }

    fn schema() -> Value {
        Value::List(Vec::new())
    }
}

impl<T: Marshal, const N: usize> Marshal for [T; N] {
    fn to_value(&self) -> Result<Value, ConvertError> {
        list(self.iter())
    }

    fn is_zero(&self) -> bool {
        self.iter().all(Marshal::is_zero)
    }

    fn schema() -> Value {
        Value::List(Vec::new())
    }
}

// --- Maps ---

fn map<'a, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> Result<Value, ConvertError>
where
    K: Display + 'a,
    V: Marshal + 'a,
{
    let mut sorted: Vec<(String, &V)> = entries.map(|(k, v)| (k.to_string(), v)).collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));
    let mut out = Vec::with_capacity(sorted.len());
    for (key, value) in sorted {
        out.push(MapEntry {
            key: Value::String(key),
            value: value.to_value()?,
            comments: Vec::new(),
        });
    }
    Ok(Value::Map(out))
}

impl<K: Display, V: Marshal, S: BuildHasher> Marshal for HashMap<K, V, S> {
    fn to_value(&self) -> Result<Value, ConvertError> {
        map(self.iter())
    }

    fn is_zero(&self) -> bool {
        false
    }

    fn schema() -> Value {
        Value::Map(Vec::new())
    }
}

impl<K: Display, V: Marshal> Marshal for BTreeMap<K, V> {
    fn to_value(&self) -> Result<Value, ConvertError> {
        map(self.iter())
    }

    fn is_zero(&self) -> bool {
        false
    }

    fn schema() -> Value {
        Value::Map(Vec::new())
    }
}

// --- Numbers ---

impl Marshal for f64 {
    fn to_value(&self) -> Result<Value, ConvertError> {
        Number::from_f64(*self)
            .map(Value::Number)
            .ok_or(ConvertError::NonFinite(*self))
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn schema() -> Value {
        Value::Number(Number::zero())
    }
}

impl Marshal for f32 {
    fn to_value(&self) -> Result<Value, ConvertError> {
        Number::from_f32(*self)
            .map(Value::Number)
            .ok_or(ConvertError::NonFinite(f64::from(*self)))
    }

    fn is_zero(&self) -> bool {
        *self == 0.0
    }

    fn schema() -> Value {
        Value::Number(Number::zero())
    }
}

macro_rules! impl_marshal_int {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Marshal for $ty {
                fn to_value(&self) -> Result<Value, ConvertError> {
                    Ok(Value::Number(Number::from(*self)))
                }

                fn is_zero(&self) -> bool {
                    *self == 0
                }

                fn schema() -> Value {
                    Value::Number(Number::zero())
                }
            }
        )+
    };
}

impl_marshal_int! {
    i8, i16, i32, i64, i128, isize,
    u8, u16, u32, u64, u128, usize,
}

impl Marshal for bool {
    fn to_value(&self) -> Result<Value, ConvertError> {
        Ok(Value::Bool(*self))
    }

    fn is_zero(&self) -> bool {
        !*self
    }

    fn schema() -> Value {
        Value::Bool(false)
    }
}

// --- Calendar time ---

impl<Tz> Marshal for DateTime<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn to_value(&self) -> Result<Value, ConvertError> {
        Ok(Value::String(self.to_rfc3339_opts(SecondsFormat::Secs, true)))
    }

    /// The Unix epoch is `DateTime::default()`, so it stands in as the unset instant.
    fn is_zero(&self) -> bool {
        self.timestamp() == 0 && self.timestamp_subsec_nanos() == 0
    }

    fn schema() -> Value {
        Value::String(String::new())
    }
}

// --- Wrappers ---

impl<T: Marshal> Marshal for Option<T> {
    fn to_value(&self) -> Result<Value, ConvertError> {
        match self {
            Some(value) => value.to_value(),
            None => Err(ConvertError::Absent),
        }
    }

    fn is_zero(&self) -> bool {
        self.is_none()
    }

    fn schema() -> Value {
        T::schema()
    }
}

impl<T: Marshal> Marshal for Box<T> {
    fn to_value(&self) -> Result<Value, ConvertError> {
        (**self).to_value()
    }

    fn is_zero(&self) -> bool {
        (**self).is_zero()
    }

    fn schema() -> Value {
        T::schema()
    }
}
