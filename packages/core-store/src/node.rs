//! The Node type - an auto-vivifying namespace.
//!
//! A `Node` is a handle: cloning it yields another reference to the same
//! namespace, so a child returned by [`Node::get`] can be mutated and the
//! change is visible through its parent.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::merge;
use crate::value::fmt_entries;
use crate::{json_to_value, Error, Key, KeyPath, Mapping, Value};

/// A namespace in the configuration tree.
///
/// Reading a key that is not set creates an empty child namespace under that
/// key and returns it, so chained reads never fail:
///
/// ```rust
/// use configtree_core_store::{Node, Value};
///
/// let store = Node::new();
/// let friends = store.namespace("friends");
/// friends.set("rachel", "Rachel Green");
///
/// assert!(store.contains_key("friends"));
/// assert_eq!(store.get("friends").as_node().unwrap().get("rachel"), "Rachel Green");
/// ```
#[derive(Clone, Default)]
pub struct Node {
    entries: Rc<RefCell<Mapping>>,
}

impl Node {
    /// Create a new empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a namespace populated from a nested mapping.
    pub fn from_mapping(mapping: &Mapping) -> Self {
        let node = Self::new();
        node.configure(mapping);
        node
    }

    /// Merge a nested mapping into this namespace.
    ///
    /// Nested mappings merge into existing child namespaces; everything else
    /// overwrites. See [`merge`](crate::merge()).
    pub fn configure(&self, mapping: &Mapping) {
        merge::merge(self, mapping);
    }

    /// Merge a value that should hold a mapping.
    ///
    /// `Null` is treated as an empty mapping, and a `Node` is merged by its
    /// flattened contents.
    pub fn configure_value(&self, value: Value) -> Result<(), Error> {
        merge::merge_value(self, value)
    }

    /// Merge a JSON object.
    pub fn configure_json(&self, json: serde_json::Value) -> Result<(), Error> {
        self.configure_value(json_to_value(json))
    }

    /// Read a key, creating an empty child namespace if it is not set.
    ///
    /// Scalars are returned by value; namespaces are returned as handles to
    /// the stored child, not copies.
    pub fn get(&self, key: impl Into<Key>) -> Value {
        let key = key.into();
        let existing = self.entries.borrow().get(&key).cloned();
        match existing {
            Some(value) => value,
            None => Value::Node(self.namespace(key)),
        }
    }

    /// Get the child namespace at `key`, creating it if needed.
    ///
    /// A scalar stored at `key` is replaced by a fresh empty namespace.
    pub fn namespace(&self, key: impl Into<Key>) -> Node {
        let key = key.into();
        let existing = self.entries.borrow().get(&key).cloned();
        match existing {
            Some(Value::Node(child)) => child,
            previous => {
                if let Some(previous) = previous {
                    log::trace!(
                        "replacing {} at '{}' with a namespace",
                        previous.type_name(),
                        key
                    );
                }
                let child = Node::new();
                self.insert(key, Value::Node(child.clone()));
                child
            }
        }
    }

    /// Assign a value to a key.
    ///
    /// A `Value::Map` is merged into the child namespace at `key`; any other
    /// value replaces whatever was stored there.
    pub fn set(&self, key: impl Into<Key>, value: impl Into<Value>) {
        let key = key.into();
        match value.into() {
            Value::Map(mapping) => merge::merge(&self.namespace(key), &mapping),
            other => self.insert(key, other),
        }
    }

    /// Look up a key without creating anything.
    ///
    /// `Null` and `false` are reported as not set.
    pub fn retrieve(&self, key: impl AsRef<str>) -> Option<Value> {
        self.entries
            .borrow()
            .get(key.as_ref())
            .filter(|value| !value.is_falsy())
            .cloned()
    }

    /// Look up a key, falling back to `default` when it is not set.
    pub fn retrieve_or(&self, key: impl AsRef<str>, default: impl Into<Value>) -> Value {
        self.retrieve(key).unwrap_or_else(|| default.into())
    }

    /// Remove a key and everything beneath it, returning the old value.
    pub fn remove(&self, key: impl AsRef<str>) -> Option<Value> {
        self.entries.borrow_mut().remove(key.as_ref())
    }

    /// Set `key` only if it is not already present.
    ///
    /// A present key is kept even when its value is falsy.
    pub fn set_default(&self, key: impl Into<Key>, value: impl Into<Value>) {
        let key = key.into();
        if !self.contains_key(&key) {
            self.set(key, value);
        }
    }

    /// Check whether a key is present.
    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.entries.borrow().contains_key(key.as_ref())
    }

    /// True iff there are no top-level keys.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Top-level keys in sorted order.
    pub fn keys(&self) -> Vec<Key> {
        self.entries.borrow().keys().cloned().collect()
    }

    /// Remove every key, keeping this handle (and every other handle to the
    /// same namespace) valid.
    pub fn reset(&self) {
        self.entries.borrow_mut().clear();
    }

    /// A shallow copy of the entries.
    ///
    /// Nested namespaces appear as handles; they compare equal to plain
    /// mappings with the same contents.
    pub fn to_mapping(&self) -> Mapping {
        self.entries.borrow().clone()
    }

    /// The whole tree flattened into plain `Value::Map`s.
    ///
    /// Does not terminate on cyclic trees.
    pub fn to_value(&self) -> Value {
        fn flatten(value: &Value) -> Value {
            match value {
                Value::Node(node) => node.to_value(),
                Value::Array(items) => Value::Array(items.iter().map(flatten).collect()),
                Value::Map(map) => Value::Map(
                    map.iter()
                        .map(|(k, v)| (k.clone(), flatten(v)))
                        .collect(),
                ),
                other => other.clone(),
            }
        }

        Value::Map(
            self.entries
                .borrow()
                .iter()
                .map(|(k, v)| (k.clone(), flatten(v)))
                .collect(),
        )
    }

    /// Check whether two handles refer to the same namespace.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }

    // ==================== dotted paths ====================

    /// Read a dotted path, auto-vivifying every missing namespace on the way.
    ///
    /// The empty path returns this node.
    pub fn get_path(&self, path: &KeyPath) -> Result<Value, Error> {
        match path.split_last() {
            None => Ok(Value::Node(self.clone())),
            Some((parent, last)) => Ok(self.descend(&parent)?.get(last)),
        }
    }

    /// Assign a dotted path, auto-vivifying intermediate namespaces.
    ///
    /// Assigning a mapping to the empty path merges it into this node.
    pub fn set_path(&self, path: &KeyPath, value: impl Into<Value>) -> Result<(), Error> {
        let value = value.into();
        match path.split_last() {
            None => match value {
                Value::Map(mapping) => {
                    self.configure(&mapping);
                    Ok(())
                }
                other => Err(Error::InvalidPath {
                    message: format!("cannot assign {} to the root path", other.type_name()),
                }),
            },
            Some((parent, last)) => {
                self.descend(&parent)?.set(last, value);
                Ok(())
            }
        }
    }

    /// Read a dotted path without creating anything.
    pub fn lookup_path(&self, path: &KeyPath) -> Option<Value> {
        let mut current = Value::Node(self.clone());
        for key in path.iter() {
            let next = current.as_node()?.entries.borrow().get(key).cloned()?;
            current = next;
        }
        Some(current)
    }

    /// Remove the value at a dotted path.
    ///
    /// Missing intermediate namespaces are not created.
    pub fn remove_path(&self, path: &KeyPath) -> Result<Option<Value>, Error> {
        let (parent, last) = path.split_last().ok_or_else(|| Error::InvalidPath {
            message: "cannot remove the root path; use reset".to_string(),
        })?;

        match self.lookup_path(&parent) {
            None => Ok(None),
            Some(Value::Node(node)) => Ok(node.remove(last)),
            Some(other) => Err(Error::NotANamespace {
                path: parent,
                found: other.type_name(),
            }),
        }
    }

    fn descend(&self, path: &KeyPath) -> Result<Node, Error> {
        let mut current = self.clone();
        for (i, key) in path.iter().enumerate() {
            current = match current.get(key) {
                Value::Node(child) => child,
                other => {
                    return Err(Error::NotANamespace {
                        path: path.slice(0, i + 1),
                        found: other.type_name(),
                    })
                }
            };
        }
        Ok(current)
    }

    // ==================== crate internals ====================

    pub(crate) fn insert(&self, key: Key, value: Value) {
        self.entries.borrow_mut().insert(key, value);
    }

    pub(crate) fn replace_entries(&self, entries: Mapping) -> Mapping {
        std::mem::replace(&mut *self.entries.borrow_mut(), entries)
    }

    pub(crate) fn id(&self) -> *const () {
        Rc::as_ptr(&self.entries) as *const ()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Node) -> bool {
        self.ptr_eq(other) || *self.entries.borrow() == *other.entries.borrow()
    }
}

impl PartialEq<Mapping> for Node {
    fn eq(&self, other: &Mapping) -> bool {
        *self.entries.borrow() == *other
    }
}

impl PartialEq<Value> for Node {
    fn eq(&self, other: &Value) -> bool {
        match other {
            Value::Node(node) => self == node,
            Value::Map(map) => self == map,
            _ => false,
        }
    }
}

impl PartialEq<Node> for Mapping {
    fn eq(&self, other: &Node) -> bool {
        other == self
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_entries(f, self.entries.borrow().iter())
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.borrow().iter()).finish()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = self.entries.borrow();
        let mut out = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in entries.iter() {
            out.serialize_entry(key, value)?;
        }
        out.end()
    }
}
