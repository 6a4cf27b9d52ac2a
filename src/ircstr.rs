//! Casemapped string type.
//!
//! [`IrcString`] keeps the spelling it was created with for display, and
//! compares and hashes by its [`irc_to_lower`] image. Two values that differ
//! only in IRC case are the same key in a `HashMap` or `HashSet`.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::casemap::{irc_eq, irc_to_lower};

/// A string whose equality and hash follow IRC casemapping.
///
/// ```
/// use slirc_utils::IrcString;
///
/// let a = IrcString::new("#Rust[dev]");
/// assert_eq!(a, "#rust{dev}");
/// assert_eq!(a.as_str(), "#Rust[dev]");
/// assert_eq!(a.folded(), "#rust{dev}");
/// ```
#[derive(Clone, Default)]
pub struct IrcString {
    original: String,
    folded: String,
}

impl IrcString {
    /// Create a new `IrcString`. Any string is accepted.
    pub fn new(s: impl Into<String>) -> Self {
        let original = s.into();
        let folded = irc_to_lower(&original);
        IrcString { original, folded }
    }

    /// Create an `IrcString` from raw bytes read off the wire.
    ///
    /// Valid UTF-8 is taken as is. With the `encoding` feature, anything else
    /// is decoded as Windows-1252 (the usual fallback of IRC clients);
    /// without it, invalid sequences become U+FFFD.
    pub fn from_bytes_lossy(bytes: &[u8]) -> Self {
        Self::new(decode_lossy(bytes).into_owned())
    }

    /// The original spelling.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// The casemapped form used for comparison and hashing.
    #[inline]
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Consume the value, returning the original spelling.
    pub fn into_string(self) -> String {
        self.original
    }

    /// Length of the original spelling in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.original.len()
    }

    /// Returns `true` if the string is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.original.is_empty()
    }
}

#[cfg(feature = "encoding")]
fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    match encoding::UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(s) => s,
        None => encoding::WINDOWS_1252.decode_without_bom_handling(bytes).0,
    }
}

#[cfg(not(feature = "encoding"))]
fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

impl PartialEq for IrcString {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for IrcString {}

impl Hash for IrcString {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl PartialOrd for IrcString {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for IrcString {
    fn cmp(&self, other: &Self) -> Ordering {
        self.folded.cmp(&other.folded)
    }
}

impl PartialEq<str> for IrcString {
    fn eq(&self, other: &str) -> bool {
        irc_eq(&self.folded, other)
    }
}

impl PartialEq<&str> for IrcString {
    fn eq(&self, other: &&str) -> bool {
        irc_eq(&self.folded, other)
    }
}

impl PartialEq<String> for IrcString {
    fn eq(&self, other: &String) -> bool {
        irc_eq(&self.folded, other)
    }
}

impl PartialEq<IrcString> for str {
    fn eq(&self, other: &IrcString) -> bool {
        other == self
    }
}

impl PartialEq<IrcString> for &str {
    fn eq(&self, other: &IrcString) -> bool {
        other == *self
    }
}

impl PartialEq<IrcString> for String {
    fn eq(&self, other: &IrcString) -> bool {
        other == self
    }
}

impl fmt::Display for IrcString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl fmt::Debug for IrcString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IrcString").field(&self.original).finish()
    }
}

impl AsRef<str> for IrcString {
    fn as_ref(&self) -> &str {
        &self.original
    }
}

impl From<&str> for IrcString {
    fn from(s: &str) -> Self {
        IrcString::new(s)
    }
}

impl From<String> for IrcString {
    fn from(s: String) -> Self {
        IrcString::new(s)
    }
}

impl From<IrcString> for String {
    fn from(s: IrcString) -> Self {
        s.original
    }
}

impl FromStr for IrcString {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(IrcString::new(s))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for IrcString {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for IrcString {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(IrcString::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;
    use std::collections::HashSet;

    fn hash_of(s: &IrcString) -> u64 {
        let mut h = DefaultHasher::new();
        s.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_equality() {
        assert_eq!("#foo", IrcString::new("#foo"));
        assert_eq!("#foo", IrcString::new("#FOO"));
        assert_eq!("#FOO", IrcString::new("#foo"));
        assert_eq!("#FOO", IrcString::new("#FOO"));
        assert_eq!(IrcString::new("jemfinch[]"), IrcString::new("JEMFINCH{}"));
    }

    #[test]
    fn test_hash_follows_equality() {
        assert_eq!(
            hash_of(&IrcString::new("#FOO")),
            hash_of(&IrcString::new("#foo"))
        );
        assert_eq!(
            hash_of(&IrcString::new("a[b]\\c~")),
            hash_of(&IrcString::new("A{B}|C^"))
        );

        let set: HashSet<IrcString> = ["Nick", "NICK", "nick"]
            .into_iter()
            .map(IrcString::from)
            .collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_inequality() {
        let s1 = "supybot";
        let s2 = IrcString::new("Supybot");
        assert!(s1 == s2);
        assert!(!(s1 != s2));
        assert_ne!(IrcString::new("foo"), IrcString::new("bar"));
    }

    #[test]
    fn test_preserves_original_spelling() {
        let s = IrcString::new("JemFinch[]");
        assert_eq!(s.to_string(), "JemFinch[]");
        assert_eq!(format!("{:?}", s), "IrcString(\"JemFinch[]\")");
        assert_eq!(s.len(), 10);
        assert_eq!(String::from(s), "JemFinch[]");
    }

    #[test]
    fn test_ordering_uses_folded_form() {
        let mut v = vec![IrcString::new("b"), IrcString::new("A"), IrcString::new("[")];
        v.sort();
        let spelled: Vec<&str> = v.iter().map(IrcString::as_str).collect();
        assert_eq!(spelled, vec!["A", "b", "["]);
    }

    #[test]
    fn test_from_bytes_lossy() {
        assert_eq!(IrcString::from_bytes_lossy(b"#Chan"), "#chan");
        let s = IrcString::from_bytes_lossy(b"caf\xe9");
        assert!(s.as_str().starts_with("caf"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_keeps_spelling() {
        let s = IrcString::new("#Rust[dev]");
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "\"#Rust[dev]\"");
        let back: IrcString = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), "#Rust[dev]");
        assert_eq!(back, "#rust{dev}");
    }
}
