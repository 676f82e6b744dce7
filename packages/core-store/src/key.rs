//! Keys and dotted key paths.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors related to key path parsing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// A dotted path contained an empty component (`a..b`, `.a`, `a.`).
    #[error("invalid key path '{path}': empty component at position {position}")]
    EmptyComponent { path: String, position: usize },
}

/// The name of a setting within one [`Node`](crate::Node).
///
/// Every string-like representation of the same text names the same key:
/// `&str`, `String` and `Key` convert into each other, and because `Key`
/// borrows as `str`, lookups never need an allocation.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(String);

impl Key {
    /// Create a key from anything string-like.
    pub fn new(name: impl Into<String>) -> Self {
        Key(name.into())
    }

    /// The key's text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Key {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Key {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key(s)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key(s.clone())
    }
}

impl From<&Key> for Key {
    fn from(k: &Key) -> Self {
        k.clone()
    }
}

impl PartialEq<str> for Key {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A dotted path of keys, e.g. `letters.a`.
///
/// The empty path addresses the node it is applied to.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct KeyPath {
    pub components: Vec<Key>,
}

impl KeyPath {
    /// Parse a dotted path string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use configtree_core_store::KeyPath;
    ///
    /// let path = KeyPath::parse("database.primary.host").unwrap();
    /// assert_eq!(path.len(), 3);
    /// assert!(KeyPath::parse("").unwrap().is_empty());
    /// assert!(KeyPath::parse("a..b").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, PathError> {
        if s.is_empty() {
            return Ok(KeyPath::root());
        }

        let mut components = Vec::new();
        for (position, component) in s.split('.').enumerate() {
            if component.is_empty() {
                return Err(PathError::EmptyComponent {
                    path: s.to_string(),
                    position,
                });
            }
            components.push(Key::from(component));
        }

        Ok(KeyPath { components })
    }

    /// The empty path.
    pub fn root() -> Self {
        KeyPath {
            components: Vec::new(),
        }
    }

    /// Build a path from keys without parsing; keys may contain dots.
    pub fn from_keys<K: Into<Key>>(keys: impl IntoIterator<Item = K>) -> Self {
        KeyPath {
            components: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if this is the empty (root) path.
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Get the number of components.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Iterate over components.
    pub fn iter(&self) -> impl Iterator<Item = &Key> {
        self.components.iter()
    }

    /// Join this path with another.
    #[must_use]
    pub fn join(&self, other: &KeyPath) -> KeyPath {
        let mut components = self.components.clone();
        components.extend(other.components.iter().cloned());
        KeyPath { components }
    }

    /// Append a single key.
    #[must_use]
    pub fn child(&self, key: impl Into<Key>) -> KeyPath {
        let mut components = self.components.clone();
        components.push(key.into());
        KeyPath { components }
    }

    /// Split into the parent path and the last key.
    ///
    /// Returns `None` for the empty path.
    pub fn split_last(&self) -> Option<(KeyPath, &Key)> {
        let (last, parent) = self.components.split_last()?;
        Some((
            KeyPath {
                components: parent.to_vec(),
            },
            last,
        ))
    }

    /// Get a slice of components as a new path.
    pub fn slice(&self, start: usize, end: usize) -> KeyPath {
        KeyPath {
            components: self.components[start..end].to_vec(),
        }
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.components.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(component.as_str())?;
        }
        Ok(())
    }
}

impl std::ops::Index<usize> for KeyPath {
    type Output = Key;

    fn index(&self, i: usize) -> &Self::Output {
        &self.components[i]
    }
}

impl std::str::FromStr for KeyPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyPath::parse(s)
    }
}

/// Macro for creating key paths from literals.
///
/// # Example
///
/// ```rust
/// use configtree_core_store::keypath;
///
/// let p = keypath!("letters.a");
/// assert_eq!(p.len(), 2);
/// ```
#[macro_export]
macro_rules! keypath {
    ($s:expr) => {
        $crate::KeyPath::parse($s).expect("invalid key path literal")
    };
}
