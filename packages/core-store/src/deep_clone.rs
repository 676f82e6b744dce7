//! Cycle-safe deep copy of value graphs.

use std::collections::HashMap;

use crate::{Mapping, Node, Value};

/// Deep copies values while remembering what it has already copied.
///
/// Identity-bearing values (namespaces and opaque values) are looked up in a
/// cache keyed by the original's address before they are copied. A namespace
/// is registered before its children are visited, so a tree that refers back
/// to itself or to an ancestor yields a copy with the same shape instead of
/// recursing forever. A namespace reachable along two paths is copied once and
/// the copy is shared the same way.
///
/// Opaque values have no copy semantics; they are registered as their own
/// copy and returned unchanged.
#[derive(Default)]
pub struct DeepCloner {
    seen: HashMap<*const (), Value>,
}

impl DeepCloner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the cache so that `original` resolves to `copy`.
    pub fn register(&mut self, original: &Node, copy: &Node) {
        self.seen.insert(original.id(), Value::Node(copy.clone()));
    }

    /// Deep copy any value.
    pub fn clone_value(&mut self, value: &Value) -> Value {
        match value {
            Value::Node(node) => Value::Node(self.clone_node(node)),
            Value::Map(map) => Value::Map(self.clone_mapping(map)),
            Value::Array(items) => {
                Value::Array(items.iter().map(|item| self.clone_value(item)).collect())
            }
            Value::Opaque(opaque) => self
                .seen
                .entry(opaque.id())
                .or_insert_with(|| Value::Opaque(opaque.clone()))
                .clone(),
            scalar => scalar.clone(),
        }
    }

    /// Deep copy a namespace.
    pub fn clone_node(&mut self, node: &Node) -> Node {
        if let Some(Value::Node(copy)) = self.seen.get(&node.id()) {
            return copy.clone();
        }

        let copy = Node::new();
        self.register(node, &copy);
        for (key, value) in node.to_mapping() {
            let value = self.clone_value(&value);
            copy.insert(key, value);
        }
        copy
    }

    /// Deep copy every value of a mapping.
    pub fn clone_mapping(&mut self, mapping: &Mapping) -> Mapping {
        mapping
            .iter()
            .map(|(key, value)| (key.clone(), self.clone_value(value)))
            .collect()
    }
}

/// Deep copy a value with a fresh cache.
pub fn deep_clone(value: &Value) -> Value {
    DeepCloner::new().clone_value(value)
}
