use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// String identifier carried by every geometry, material and node.
///
/// Comparison and hashing are ASCII case-insensitive, so `"AB-12"` and
/// `"ab-12"` name the same entity. An empty or absent identifier is replaced
/// by a freshly generated v4 UUID.
#[derive(Clone)]
pub struct EntityId(String);

impl EntityId {
    /// Generates a new random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Wraps a caller-supplied identifier, generating one if it is blank.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        if id.trim().is_empty() {
            Self::generate()
        } else {
            Self(id)
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Normalized form used as a lookup key.
    pub(crate) fn key_of(id: &str) -> String {
        id.to_ascii_lowercase()
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::generate()
    }
}

impl PartialEq for EntityId {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for EntityId {}

impl PartialEq<str> for EntityId {
    fn eq(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl PartialEq<&str> for EntityId {
    fn eq(&self, other: &&str) -> bool {
        self.0.eq_ignore_ascii_case(other)
    }
}

impl Hash for EntityId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for b in self.0.bytes() {
            state.write_u8(b.to_ascii_lowercase());
        }
        state.write_u8(0xff);
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityId({:?})", self.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl Serialize for EntityId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for EntityId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map_or_else(Self::generate, Self::new))
    }
}

/// Anything stored in an [`EntityMap`].
pub trait Identified {
    fn uuid(&self) -> &EntityId;
}

/// Insertion-ordered collection keyed by [`EntityId`].
///
/// Mirrors the flat `geometries` / `materials` arrays of the wire format
/// while keeping O(1) lookup by uuid.
#[derive(Debug, Clone)]
pub struct EntityMap<T> {
    entries: Vec<T>,
    lookup: FxHashMap<String, usize>,
}

impl<T> Default for EntityMap<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            lookup: FxHashMap::default(),
        }
    }
}

impl<T: Identified> EntityMap<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, uuid: &str) -> bool {
        self.lookup.contains_key(&EntityId::key_of(uuid))
    }

    #[must_use]
    pub fn get(&self, uuid: &str) -> Option<&T> {
        let index = *self.lookup.get(&EntityId::key_of(uuid))?;
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, uuid: &str) -> Option<&mut T> {
        let index = *self.lookup.get(&EntityId::key_of(uuid))?;
        self.entries.get_mut(index)
    }

    /// Appends `entry` unless its uuid is already present.
    ///
    /// Returns `false` (leaving the stored entry untouched) on a repeat uuid.
    pub fn insert(&mut self, entry: T) -> bool {
        let key = EntityId::key_of(entry.uuid().as_str());
        if self.lookup.contains_key(&key) {
            return false;
        }
        self.lookup.insert(key, self.entries.len());
        self.entries.push(entry);
        true
    }

    /// Stores `entry`, replacing any entry with the same uuid in place.
    ///
    /// Returns the displaced entry, if there was one.
    pub fn upsert(&mut self, entry: T) -> Option<T> {
        let key = EntityId::key_of(entry.uuid().as_str());
        if let Some(&index) = self.lookup.get(&key) {
            return Some(std::mem::replace(&mut self.entries[index], entry));
        }
        self.lookup.insert(key, self.entries.len());
        self.entries.push(entry);
        None
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// Mutable iteration. Identifiers are immutable on every stored type, so
    /// the lookup index cannot go stale.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.entries.iter_mut()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.entries
    }
}

impl<T> IntoIterator for EntityMap<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a EntityMap<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<T: Serialize> Serialize for EntityMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.entries)
    }
}
