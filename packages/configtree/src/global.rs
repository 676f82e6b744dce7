//! The per-thread default store.
//!
//! Stores are `Rc`-based handles, so "global" means one store per thread.
//! It is created on first use and lives until the thread exits.

use std::path::Path;

use configtree_core_store::Node;
use configtree_file_source::{configure_from_file, SourceError};

thread_local! {
    static GLOBAL: Node = {
        log::trace!("creating global store");
        Node::new()
    };
}

/// The calling thread's global store.
///
/// Every call on the same thread returns a handle to the same namespace.
pub fn global() -> Node {
    GLOBAL.with(Node::clone)
}

/// Clear the global store in place.
///
/// Handles obtained from [`global`] stay valid and see the empty store.
pub fn reset_global() {
    GLOBAL.with(Node::reset)
}

/// Run `f` against the global store.
pub fn with_global<T>(f: impl FnOnce(&Node) -> T) -> T {
    GLOBAL.with(f)
}

/// Merge a JSON or YAML file into the global store. A missing file is a
/// no-op.
pub fn configure_global_from_file(path: impl AsRef<Path>) -> Result<(), SourceError> {
    with_global(|store| configure_from_file(store, path))
}
