//! Containers keyed by IRC-casemapped strings.
//!
//! Both [`IrcDict`] and [`IrcSet`] canonicalize every key with
//! [`irc_to_lower`] at the container boundary and store the original
//! spelling next to the entry, so `#FOO`, `#Foo` and `#foo` address the same
//! slot while iteration still shows how the key was written.
//!
//! Neither type synchronizes internally; wrap it in a lock to share it.

use std::collections::hash_map::{self, HashMap};
use std::fmt;
use std::ops::Index;

use crate::casemap::irc_to_lower;
use crate::error::CollectionError;
use crate::ircstr::IrcString;

/// A map from IRC-casemapped keys to values.
///
/// ```
/// use slirc_utils::IrcDict;
///
/// let mut d = IrcDict::new();
/// d.insert("#FOO", "bar");
/// assert_eq!(d.get("#foo"), Some(&"bar"));
/// assert_eq!(d["#Foo"], "bar");
/// assert!(d.remove("#fOO").is_some());
/// assert!(d.is_empty());
/// ```
#[derive(Clone)]
pub struct IrcDict<V> {
    // folded key -> (spelling of the last insert, value)
    map: HashMap<String, (String, V)>,
}

impl<V> IrcDict<V> {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        IrcDict {
            map: HashMap::new(),
        }
    }

    /// Create an empty dictionary with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        IrcDict {
            map: HashMap::with_capacity(capacity),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Insert a value, returning the previous value of the key's class.
    ///
    /// The stored spelling becomes `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        self.map
            .insert(irc_to_lower(&key), (key, value))
            .map(|(_, old)| old)
    }

    /// Look up a value by any casing of its key.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.map.get(&irc_to_lower(key)).map(|(_, v)| v)
    }

    /// Mutable lookup by any casing of the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.map.get_mut(&irc_to_lower(key)).map(|(_, v)| v)
    }

    /// Look up the stored spelling and value for a key.
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &V)> {
        self.map
            .get(&irc_to_lower(key))
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a value, failing with [`CollectionError::KeyNotFound`].
    pub fn try_get(&self, key: &str) -> Result<&V, CollectionError> {
        self.get(key)
            .ok_or_else(|| CollectionError::KeyNotFound(key.to_string()))
    }

    /// Returns `true` if the key's class has an entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(&irc_to_lower(key))
    }

    /// Remove an entry by any casing of its key.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.map.remove(&irc_to_lower(key)).map(|(_, v)| v)
    }

    /// Remove an entry, failing with [`CollectionError::KeyNotFound`].
    pub fn try_remove(&mut self, key: &str) -> Result<V, CollectionError> {
        self.remove(key)
            .ok_or_else(|| CollectionError::KeyNotFound(key.to_string()))
    }

    /// Get the entry for a key for in-place manipulation.
    ///
    /// A vacant entry remembers `key` as the spelling to store.
    pub fn entry(&mut self, key: impl Into<String>) -> Entry<'_, V> {
        let key = key.into();
        Entry {
            inner: self.map.entry(irc_to_lower(&key)),
            key,
        }
    }

    /// Keep only the entries for which `f` returns `true`.
    pub fn retain(&mut self, mut f: impl FnMut(&str, &mut V) -> bool) {
        self.map.retain(|_, (k, v)| f(k, v));
    }

    /// Stored key spellings, in unspecified order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.map.values().map(|(k, _)| k.as_str())
    }

    /// Values, in unspecified order.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.map.values().map(|(_, v)| v)
    }

    /// Mutable values, in unspecified order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> + '_ {
        self.map.values_mut().map(|(_, v)| v)
    }

    /// `(spelling, value)` pairs, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.map.values().map(|(k, v)| (k.as_str(), v))
    }
}

impl<V> Default for IrcDict<V> {
    fn default() -> Self {
        IrcDict::new()
    }
}

impl<V: PartialEq> PartialEq for IrcDict<V> {
    fn eq(&self, other: &Self) -> bool {
        self.map.len() == other.map.len()
            && self
                .map
                .iter()
                .all(|(folded, (_, v))| other.map.get(folded).map_or(false, |(_, w)| v == w))
    }
}

impl<V: Eq> Eq for IrcDict<V> {}

impl<V: fmt::Debug> fmt::Debug for IrcDict<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V> Index<&str> for IrcDict<V> {
    type Output = V;

    /// Panics if the key has no entry.
    fn index(&self, key: &str) -> &V {
        match self.get(key) {
            Some(v) => v,
            None => panic!("key not found: {:?}", key),
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for IrcDict<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut dict = IrcDict::new();
        dict.extend(iter);
        dict
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for IrcDict<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<V> IntoIterator for IrcDict<V> {
    type Item = (IrcString, V);
    type IntoIter = std::iter::Map<
        hash_map::IntoValues<String, (String, V)>,
        fn((String, V)) -> (IrcString, V),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.map
            .into_values()
            .map(spelled_pair::<V> as fn((String, V)) -> (IrcString, V))
    }
}

fn spelled_pair<V>((k, v): (String, V)) -> (IrcString, V) {
    (IrcString::from(k), v)
}

/// A view into a single entry of an [`IrcDict`].
pub struct Entry<'a, V> {
    inner: hash_map::Entry<'a, String, (String, V)>,
    key: String,
}

impl<'a, V> Entry<'a, V> {
    /// Insert `default` if vacant; return the value either way.
    pub fn or_insert(self, default: V) -> &'a mut V {
        self.or_insert_with(|| default)
    }

    /// Insert the result of `f` if vacant; return the value either way.
    pub fn or_insert_with(self, f: impl FnOnce() -> V) -> &'a mut V {
        match self.inner {
            hash_map::Entry::Occupied(e) => &mut e.into_mut().1,
            hash_map::Entry::Vacant(e) => &mut e.insert((self.key, f())).1,
        }
    }

    /// Modify the value in place if the entry is occupied.
    pub fn and_modify(mut self, f: impl FnOnce(&mut V)) -> Self {
        if let hash_map::Entry::Occupied(ref mut e) = self.inner {
            f(&mut e.get_mut().1);
        }
        self
    }

    /// The spelling this entry was requested with.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<'a, V: Default> Entry<'a, V> {
    /// Insert `V::default()` if vacant; return the value either way.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(V::default)
    }
}

/// A set of IRC-casemapped strings.
///
/// ```
/// use slirc_utils::IrcSet;
///
/// let mut s = IrcSet::new();
/// s.insert("foo");
/// assert!(s.contains("FOO"));
/// assert!(!s.discard("alfkj"));
/// assert!(s.remove("FOo").is_ok());
/// assert!(!s.contains("foo"));
/// ```
#[derive(Clone, Default)]
pub struct IrcSet {
    // folded -> spelling of the first insert
    map: HashMap<String, String>,
}

impl IrcSet {
    /// Create an empty set.
    pub fn new() -> Self {
        IrcSet {
            map: HashMap::new(),
        }
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Remove every member.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Add a member. Returns `false` if its class was already present,
    /// in which case the stored spelling is left alone.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        match self.map.entry(irc_to_lower(&value)) {
            hash_map::Entry::Occupied(_) => false,
            hash_map::Entry::Vacant(e) => {
                e.insert(value);
                true
            }
        }
    }

    /// Membership test under IRC casemapping.
    pub fn contains(&self, value: &str) -> bool {
        self.map.contains_key(&irc_to_lower(value))
    }

    /// The stored spelling of a member.
    pub fn get(&self, value: &str) -> Option<&str> {
        self.map.get(&irc_to_lower(value)).map(String::as_str)
    }

    /// Remove a member, failing with [`CollectionError::KeyNotFound`]
    /// if it is absent. Returns the stored spelling.
    pub fn remove(&mut self, value: &str) -> Result<IrcString, CollectionError> {
        self.map
            .remove(&irc_to_lower(value))
            .map(IrcString::new)
            .ok_or_else(|| CollectionError::KeyNotFound(value.to_string()))
    }

    /// Remove a member if present. Returns whether anything was removed.
    pub fn discard(&mut self, value: &str) -> bool {
        self.map.remove(&irc_to_lower(value)).is_some()
    }

    /// Keep only the members for which `f` returns `true`.
    pub fn retain(&mut self, mut f: impl FnMut(&str) -> bool) {
        self.map.retain(|_, v| f(v));
    }

    /// Stored spellings, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.map.values().map(String::as_str)
    }

    /// Returns `true` if every member of `self` is in `other`.
    pub fn is_subset(&self, other: &IrcSet) -> bool {
        self.map.keys().all(|k| other.map.contains_key(k))
    }
}

impl PartialEq for IrcSet {
    fn eq(&self, other: &Self) -> bool {
        self.map.len() == other.map.len() && self.is_subset(other)
    }
}

impl Eq for IrcSet {}

impl fmt::Debug for IrcSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Into<String>> FromIterator<T> for IrcSet {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = IrcSet::new();
        set.extend(iter);
        set
    }
}

impl<T: Into<String>> Extend<T> for IrcSet {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for v in iter {
            self.insert(v);
        }
    }
}

impl IntoIterator for IrcSet {
    type Item = IrcString;
    type IntoIter = std::iter::Map<hash_map::IntoValues<String, String>, fn(String) -> IrcString>;

    fn into_iter(self) -> Self::IntoIter {
        self.map
            .into_values()
            .map(IrcString::from as fn(String) -> IrcString)
    }
}
