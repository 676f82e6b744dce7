//! Scoped overrides: save, apply, run, restore.

use crate::{DeepCloner, Mapping, Node};

/// A deep copy of a namespace's entries that can be written back into it.
pub struct Snapshot {
    node: Node,
    entries: Mapping,
}

impl Snapshot {
    /// Deep copy the current contents of `node`.
    ///
    /// References from inside the tree back to `node` itself keep pointing at
    /// the live node, so they stay attached after a restore.
    pub fn capture(node: &Node) -> Self {
        let mut cloner = DeepCloner::new();
        cloner.register(node, node);
        let entries = cloner.clone_mapping(&node.to_mapping());
        Snapshot {
            node: node.clone(),
            entries,
        }
    }

    /// The namespace this snapshot belongs to.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Replace the namespace's contents with the captured ones, in place.
    pub fn restore(self) {
        self.node.replace_entries(self.entries);
    }
}

/// Guard for a temporary override. Dropping it restores the namespace to the
/// state it had when the guard was created, including during a panic unwind.
///
/// ```rust
/// use configtree_core_store::{Key, Mapping, Node, Value};
///
/// let store = Node::new();
/// store.set("mode", "production");
///
/// let overrides: Mapping = [(Key::from("mode"), Value::from("test"))].into();
/// {
///     let _guard = store.override_with(&overrides);
///     assert_eq!(store.get("mode"), "test");
/// }
/// assert_eq!(store.get("mode"), "production");
/// ```
#[must_use = "the override is reverted as soon as the guard is dropped"]
pub struct ScopedOverride {
    node: Node,
    snapshot: Option<Snapshot>,
}

impl ScopedOverride {
    /// Capture `node`, then merge `overrides` into it.
    pub fn new(node: &Node, overrides: &Mapping) -> Self {
        let snapshot = Snapshot::capture(node);
        if !overrides.is_empty() {
            node.configure(overrides);
        }
        log::trace!("entered scoped override ({} overrides)", overrides.len());
        ScopedOverride {
            node: node.clone(),
            snapshot: Some(snapshot),
        }
    }

    /// The namespace being overridden.
    pub fn node(&self) -> &Node {
        &self.node
    }
}

impl Drop for ScopedOverride {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            snapshot.restore();
            log::trace!("restored scoped override");
        }
    }
}

impl Node {
    /// Start a temporary override; see [`ScopedOverride`].
    pub fn override_with(&self, overrides: &Mapping) -> ScopedOverride {
        ScopedOverride::new(self, overrides)
    }

    /// Run `action` with `overrides` merged in, then restore the previous
    /// contents.
    ///
    /// Restoration happens whether `action` returns or panics; a panic keeps
    /// unwinding afterwards. Everything `action` changes is rolled back,
    /// including keys it created.
    pub fn scoped<T>(&self, overrides: &Mapping, action: impl FnOnce(&Node) -> T) -> T {
        let guard = self.override_with(overrides);
        let result = action(guard.node());
        drop(guard);
        result
    }

    /// [`scoped`](Node::scoped) without overrides.
    pub fn temp<T>(&self, action: impl FnOnce(&Node) -> T) -> T {
        self.scoped(&Mapping::new(), action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{keypath, Key, Value};
    use collection_literals::btree;
    use std::panic::{self, AssertUnwindSafe};

    fn letters() -> Node {
        let store = Node::new();
        store.set("one", 1);
        store.set_path(&keypath!("letters.a"), "A").unwrap();
        store.set_path(&keypath!("letters.b"), "B").unwrap();
        store
    }

    fn assert_restored(store: &Node) {
        assert_eq!(store.get("one"), 1);
        assert_eq!(store.get_path(&keypath!("letters.a")).unwrap(), "A");
        assert_eq!(store.get_path(&keypath!("letters.b")).unwrap(), "B");
        assert_eq!(store.lookup_path(&keypath!("letters.c")), None);
    }

    #[test]
    fn temp_reverts_changes() {
        let store = letters();

        store.temp(|store| {
            store.set_path(&keypath!("letters.b"), "bb").unwrap();
            store.set_path(&keypath!("letters.c"), "c").unwrap();
            assert_eq!(store.get("one"), 1);
            assert_eq!(store.get_path(&keypath!("letters.a")).unwrap(), "A");
            assert_eq!(store.get_path(&keypath!("letters.b")).unwrap(), "bb");
            assert_eq!(store.get_path(&keypath!("letters.c")).unwrap(), "c");
        });

        assert_restored(&store);
    }

    #[test]
    fn scoped_applies_overrides_first() {
        let store = letters();
        let overrides: Mapping = btree! {
            Key::from("letters") => Value::Map(btree! {
                Key::from("b") => Value::from("bb"),
                Key::from("c") => Value::from("c"),
            }),
        };

        store.scoped(&overrides, |store| {
            assert_eq!(store.get("one"), 1);
            assert_eq!(store.get_path(&keypath!("letters.a")).unwrap(), "A");
            assert_eq!(store.get_path(&keypath!("letters.b")).unwrap(), "bb");
            assert_eq!(store.get_path(&keypath!("letters.c")).unwrap(), "c");
        });

        assert_restored(&store);
    }

    #[test]
    fn scoped_returns_action_result() {
        let store = letters();
        let answer = store.temp(|store| {
            store.set("one", 100);
            store.get("one").as_i64()
        });
        assert_eq!(answer, Some(100));
        assert_eq!(store.get("one"), 1);
    }

    #[test]
    fn scoped_passes_errors_through() {
        let store = letters();
        let result: Result<(), String> = store.temp(|store| {
            store.set("one", 2);
            Err("boom".to_string())
        });
        assert_eq!(result, Err("boom".to_string()));
        assert_eq!(store.get("one"), 1);
    }

    #[test]
    fn scoped_restores_after_panic() {
        let store = letters();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            store.temp(|store| {
                store.set_path(&keypath!("letters.c"), "c").unwrap();
                panic!("action failed");
            })
        }));

        assert!(outcome.is_err());
        assert_restored(&store);
    }

    #[test]
    fn restore_keeps_identity() {
        let store = letters();
        let alias = store.clone();

        store.temp(|store| store.reset());

        assert!(alias.ptr_eq(&store));
        assert_restored(&alias);
    }

    #[test]
    fn guard_restores_on_drop() {
        let store = letters();
        let guard = store.override_with(&btree! { Key::from("one") => Value::from(11) });
        assert_eq!(store.get("one"), 11);
        assert!(guard.node().ptr_eq(&store));
        drop(guard);
        assert_eq!(store.get("one"), 1);
    }

    #[test]
    fn nested_overrides_unwind_in_order() {
        let store = letters();
        store.scoped(&btree! { Key::from("one") => Value::from(2) }, |outer| {
            outer.scoped(&btree! { Key::from("one") => Value::from(3) }, |inner| {
                assert_eq!(inner.get("one"), 3);
            });
            assert_eq!(outer.get("one"), 2);
        });
        assert_eq!(store.get("one"), 1);
    }

    #[test]
    fn snapshot_round_trip() {
        let store = letters();
        let snapshot = Snapshot::capture(&store);
        store.remove("letters");
        store.set("two", 2);

        snapshot.restore();
        assert_restored(&store);
        assert!(!store.contains_key("two"));
    }

    #[test]
    fn self_reference_survives_restore() {
        let store = letters();
        store.set("me", &store);

        store.temp(|store| store.set("one", 5));

        let me = store.get("me").into_node().unwrap();
        assert!(me.ptr_eq(&store));
        store.remove("me");
    }
}
