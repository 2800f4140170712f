//! Tolerant deserializers for loosely-typed upstream JSON.
//!
//! Upstream fields drift between strings and numbers, lists arrive bare or
//! wrapped under one of several keys, and individual list entries are
//! sometimes `null`. Nothing here fails on such drift: unparsable scalars
//! become `None` or zero and malformed entries are skipped.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A string, or a number rendered as a string.
pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// A non-negative count, parsed from a number or numeric string, else 0.
pub fn count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    Ok(number_of(&Value::deserialize(d)?)
        .filter(|n| *n >= 0.0)
        .map(|n| n as u32)
        .unwrap_or(0))
}

/// A float parsed from a number or numeric string, else 0.0.
pub fn number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(number_of(&Value::deserialize(d)?).unwrap_or(0.0))
}

fn number_of(value: &Value) -> Option<f64> {
    let n: Option<f64> = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

/// First candidate that is present and not blank.
pub fn pick<I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|s| !s.trim().is_empty())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Entry<T> {
    Item(T),
    Junk(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Many<T> {
    List(Vec<Entry<T>>),
    Other(IgnoredAny),
}

fn keep<T>(entries: Vec<Entry<T>>) -> Vec<T> {
    entries
        .into_iter()
        .filter_map(|e| match e {
            Entry::Item(t) => Some(t),
            Entry::Junk(_) => None,
        })
        .collect()
}

/// A list field. Anything that is not a list is empty; entries that do not
/// parse are skipped.
pub fn items<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Many::<T>::deserialize(d)? {
        Many::List(entries) => keep(entries),
        Many::Other(_) => Vec::new(),
    })
}

/// A list that must be a JSON array; entries that do not parse are skipped.
fn array<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Vec::<Entry<T>>::deserialize(d).map(keep)
}

/// A list payload, either bare or wrapped under a well-known key.
#[derive(Debug, Deserialize)]
#[serde(untagged, bound(deserialize = "T: Deserialize<'de>"))]
pub enum Listing<T> {
    Bare(#[serde(deserialize_with = "array")] Vec<T>),
    Wrapped(Wrapped<T>),
}

#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Wrapped<T> {
    #[serde(default, deserialize_with = "items")]
    pub data: Vec<T>,
    #[serde(default, deserialize_with = "items")]
    pub results: Vec<T>,
    #[serde(default, deserialize_with = "items")]
    pub books: Vec<T>,
    #[serde(default, deserialize_with = "items")]
    pub list: Vec<T>,
    #[serde(default, deserialize_with = "items")]
    pub items: Vec<T>,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self::Bare(Vec::new())
    }
}

impl<T> Listing<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(v) => v,
            Self::Wrapped(w) => [w.data, w.results, w.books, w.list, w.items]
                .into_iter()
                .find(|v| !v.is_empty())
                .unwrap_or_default(),
        }
    }
}
