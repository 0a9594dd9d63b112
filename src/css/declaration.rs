//! `property:value` declaration lists.

use std::fmt;

use log::trace;

/// Ordered `property -> value` map.
///
/// Inserting an existing property replaces its value but keeps its original
/// position, so the first occurrence fixes the order and the last one fixes
/// the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationMap {
    entries: Vec<(String, String)>,
}

impl DeclarationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse declaration text such as `fill:red; stroke : blue`.
    ///
    /// Fragments are separated by `;` and split at their first `:`. A
    /// fragment without a colon, with an empty property or with an empty
    /// value is dropped without error.
    pub fn parse(text: &str) -> Self {
        let mut map = Self::new();
        for fragment in text.split(';') {
            match split_declaration(fragment) {
                Some((property, value)) => map.insert(property, value),
                None => {
                    if !fragment.trim().is_empty() {
                        trace!("dropping malformed declaration {fragment:?}");
                    }
                }
            }
        }
        map
    }

    /// Set a property, overwriting any previous value in place.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) {
        let property = property.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(p, _)| *p == property) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((property, value)),
        }
    }

    /// Apply every entry of `other` on top of this map, in `other`'s order.
    pub fn merge(&mut self, other: &DeclarationMap) {
        for (property, value) in other.iter() {
            self.insert(property, value);
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(p, v)| (p.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split one fragment into trimmed `(property, value)`.
fn split_declaration(fragment: &str) -> Option<(&str, &str)> {
    let colon = fragment.find(':')?;
    if colon == 0 {
        return None;
    }
    let property = fragment[..colon].trim();
    let value = fragment[colon + 1..].trim();
    if property.is_empty() || value.is_empty() {
        return None;
    }
    Some((property, value))
}

/// Renders as inline style text: `prop:value;prop:value`.
impl fmt::Display for DeclarationMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{property}:{value}")?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DeclarationMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (property, value) in iter {
            map.insert(property, value);
        }
        map
    }
}

#[cfg(feature = "cli")]
impl serde::Serialize for DeclarationMap {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (property, value) in &self.entries {
            map.serialize_entry(property, value)?;
        }
        map.end()
    }
}
