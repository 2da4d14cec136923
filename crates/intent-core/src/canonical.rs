//! # Canonical Output Encoding
//!
//! Every file the pipeline writes is produced through [`CanonicalJson::new`],
//! so CI can diff outputs between runs and a byte difference always means an
//! intent difference.
//!
//! ## Encoding Rules
//!
//! 1. Two-space indentation.
//! 2. One trailing newline.
//! 3. Struct fields keep declaration order (the report shape is fixed).
//! 4. Free-form intent mappings are emitted with keys sorted, via
//!    [`SortedKeys`], independent of how `serde_json::Map` orders entries
//!    under the feature flags active in the build.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// UTF-8 bytes of a value in canonical pretty form.
///
/// The inner buffer is private; [`CanonicalJson::new`] is the only way to
/// produce one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CanonicalJson(Vec<u8>);

impl CanonicalJson {
    /// Encode any serializable value.
    pub fn new(value: &impl Serialize) -> Result<Self, serde_json::Error> {
        let mut bytes = serde_json::to_vec_pretty(value)?;
        bytes.push(b'\n');
        Ok(Self(bytes))
    }

    /// The encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The encoded text.
    pub fn as_str(&self) -> &str {
        // serde_json only ever emits UTF-8.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for an empty encoding (never produced by `new`).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<[u8]> for CanonicalJson {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Serialize a JSON value with every nested mapping in key order.
#[derive(Debug, Clone, Copy)]
pub struct SortedKeys<'a>(pub &'a Value);

impl Serialize for SortedKeys<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Object(map) => serialize_sorted_map(map, serializer),
            Value::Array(items) => serializer.collect_seq(items.iter().map(SortedKeys)),
            scalar => scalar.serialize(serializer),
        }
    }
}

fn serialize_sorted_map<S: Serializer>(
    map: &Map<String, Value>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    let mut out = serializer.serialize_map(Some(entries.len()))?;
    for (key, value) in entries {
        out.serialize_entry(key, &SortedKeys(value))?;
    }
    out.end()
}

/// `serialize_with` adapter for a sequence of free-form values.
pub fn sorted_values<S: Serializer>(values: &[Value], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().map(SortedKeys))
}

/// `serialize_with` adapter for a sequence of mappings.
pub fn sorted_maps<S: Serializer>(
    maps: &[Map<String, Value>],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    struct SortedMap<'a>(&'a Map<String, Value>);

    impl Serialize for SortedMap<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serialize_sorted_map(self.0, serializer)
        }
    }

    serializer.collect_seq(maps.iter().map(SortedMap))
}
