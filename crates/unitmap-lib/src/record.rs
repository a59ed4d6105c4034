//! Loosely typed records as produced by document parsers.
//!
//! XML-to-tree converters wrap every child element in a list, even when it
//! occurs once, and may split a single logical value across repeated
//! elements. [`RawValue`] models that tree without committing to any particular
//! wrapping so the normaliser can peel it back to scalars.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One node of a raw parsed record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
    List(Vec<RawValue>),
    Map(BTreeMap<String, RawValue>),
}

/// Key under which a map carries the text content of its element.
pub const TEXT_KEY: &str = "_";

/// A raw unit record; expected to be `Map`-shaped.
pub type RawRecord = RawValue;

impl RawValue {
    pub fn text(value: impl Into<String>) -> Self {
        RawValue::Text(value.into())
    }

    /// Wrap a value in a single-element list.
    pub fn singleton(value: RawValue) -> Self {
        RawValue::List(vec![value])
    }

    /// Build a map from `(key, value)` pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, RawValue)>,
    {
        RawValue::Map(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Strip any number of nested single-element list wrappers.
    pub fn unwrap_singleton(&self) -> &RawValue {
        let mut current = self;
        while let RawValue::List(items) = current {
            match items.as_slice() {
                [only] => current = only,
                _ => break,
            }
        }
        current
    }

    /// Look up a child by any of the given keys, ignoring ASCII case.
    ///
    /// Singleton wrappers around `self` are removed first; the returned child
    /// is left wrapped.
    pub fn field(&self, keys: &[&str]) -> Option<&RawValue> {
        let RawValue::Map(entries) = self.unwrap_singleton() else {
            return None;
        };
        keys.iter().find_map(|key| {
            entries
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(key))
                .map(|(_, value)| value)
        })
    }

    /// The scalar at the bottom of any wrapping, if there is one.
    ///
    /// Looks through singleton lists and through maps that carry their text
    /// under [`TEXT_KEY`] (leaf elements that also have attributes).
    pub fn scalar(&self) -> Option<&RawValue> {
        match self.unwrap_singleton() {
            scalar @ (RawValue::Text(_) | RawValue::Number(_)) => Some(scalar),
            RawValue::Map(entries) => entries.get(TEXT_KEY).and_then(RawValue::scalar),
            RawValue::List(_) => None,
        }
    }

    /// Scalar text of this value.
    ///
    /// A list whose items are all scalars is treated as a fragmented value and
    /// joined without separators. Maps yield their [`TEXT_KEY`] child.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        if let Some(scalar) = self.scalar() {
            return Some(scalar_text(scalar));
        }
        let RawValue::List(items) = self.unwrap_singleton() else {
            return None;
        };
        let mut joined = String::new();
        for item in items {
            joined.push_str(&scalar_text(item.scalar()?));
        }
        Some(Cow::Owned(joined))
    }

    /// Numeric value of a scalar, parsing text if necessary.
    ///
    /// Maps yield the value of their [`TEXT_KEY`] child. Returns `None` for
    /// lists of more than one item and for unparsable text.
    pub fn as_f64(&self) -> Option<f64> {
        match self.scalar()? {
            RawValue::Number(n) => Some(*n),
            RawValue::Text(text) => text.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Two numeric items, as in a location split into `[lat, lon]`.
    pub fn as_f64_pair(&self) -> Option<(f64, f64)> {
        match self.unwrap_singleton() {
            RawValue::List(items) => match items.as_slice() {
                [first, second] => Some((first.as_f64()?, second.as_f64()?)),
                _ => None,
            },
            _ => None,
        }
    }
}

fn scalar_text(scalar: &RawValue) -> Cow<'_, str> {
    match scalar {
        RawValue::Text(text) => Cow::Borrowed(text.as_str()),
        RawValue::Number(n) => Cow::Owned(n.to_string()),
        _ => Cow::Borrowed(""),
    }
}
