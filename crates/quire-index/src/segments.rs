//! The exported form of the search index.
//!
//! An exported index is an ordered map of segment name to string payload. Order matters:
//! import replays the segments in the order they were written, so the map keeps insertion
//! order through serialization rather than sorting its keys.

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

/// Ordered map of segment name to opaque payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentMap {
    /// Segments in export order.
    entries: Vec<(String, String)>,
}

impl SegmentMap {
    /// Creates an empty segment map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a segment, or replaces the payload of an existing one in place.
    pub fn insert(&mut self, name: impl Into<String>, payload: impl Into<String>) {
        let name = name.into();
        let payload = payload.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = payload,
            None => self.entries.push((name, payload)),
        }
    }

    /// Returns the payload of the named segment.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, p)| p.as_str())
    }

    /// Iterates over `(name, payload)` pairs in export order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p.as_str()))
    }

    /// Returns the segment names in export order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no segments.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SegmentMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, payload) in &self.entries {
            map.serialize_entry(name, payload)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SegmentMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        /// Visitor that collects map entries in the order they appear.
        struct SegmentMapVisitor;

        impl<'de> Visitor<'de> for SegmentMapVisitor {
            type Value = SegmentMap;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of segment names to string payloads")
            }

            fn visit_map<A>(self, mut access: A) -> Result<SegmentMap, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut segments = SegmentMap::new();
                while let Some((name, payload)) = access.next_entry::<String, String>()? {
                    segments.insert(name, payload);
                }
                Ok(segments)
            }
        }

        deserializer.deserialize_map(SegmentMapVisitor)
    }
}
