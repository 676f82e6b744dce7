//! Structural merge of nested mappings into a [`Node`].

use crate::{Error, Mapping, Node, Value};

/// Merge `source` into `target`.
///
/// For every entry of `source`:
///
/// - a nested mapping is merged into the child namespace at that key, which
///   is created when missing (and replaces a scalar stored there). Keys of the
///   child that `source` does not mention are left alone;
/// - anything else overwrites the key.
///
/// ```rust
/// use configtree_core_store::{merge, Key, Mapping, Node, Value};
///
/// let store = Node::new();
/// let first: Mapping = [(Key::from("a"), Value::Map([(Key::from("x"), Value::from(1))].into()))].into();
/// let second: Mapping = [(Key::from("a"), Value::Map([(Key::from("y"), Value::from(2))].into()))].into();
/// merge(&store, &first);
/// merge(&store, &second);
///
/// let a = store.get("a");
/// assert_eq!(a.as_node().unwrap().get("x"), 1);
/// assert_eq!(a.as_node().unwrap().get("y"), 2);
/// ```
pub fn merge(target: &Node, source: &Mapping) {
    log::trace!("merging {} entries", source.len());
    for (key, value) in source {
        match value {
            Value::Map(nested) => merge(&target.namespace(key), nested),
            other => target.insert(key.clone(), other.clone()),
        }
    }
}

/// Merge a value that is expected to hold a mapping.
pub fn merge_value(target: &Node, source: Value) -> Result<(), Error> {
    match source {
        Value::Null => Ok(()),
        Value::Map(mapping) => {
            merge(target, &mapping);
            Ok(())
        }
        Value::Node(node) if node.ptr_eq(target) => Ok(()),
        Value::Node(node) => merge_value(target, node.to_value()),
        other => Err(Error::NotAMapping {
            found: other.type_name(),
        }),
    }
}
