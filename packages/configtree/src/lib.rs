//! configtree: a hierarchical, auto-vivifying configuration store.
//!
//! Settings live in nested [`Node`]s. Reading a key that is not set creates
//! an empty namespace there, so `store.get_path(&keypath!("a.b.c"))` never
//! fails on a missing parent. Mappings merge into the tree instead of
//! replacing it, and [`Node::temp`]/[`Node::scoped`] run a block against
//! temporary overrides that are reverted afterwards, even on panic.
//!
//! ```rust
//! use configtree::{global, keypath, Value};
//! use collection_literals::btree;
//!
//! let config = global();
//! config.set_path(&keypath!("friends.rachel"), "Rachel Green").unwrap();
//! config.configure(&btree! {
//!     "friends".into() => Value::Map(btree! { "ross".into() => "Ross Gellar".into() }),
//! });
//!
//! assert_eq!(config.get_path(&keypath!("friends.rachel")).unwrap(), "Rachel Green");
//! assert_eq!(config.get_path(&keypath!("friends.ross")).unwrap(), "Ross Gellar");
//! ```
//!
//! The crates underneath:
//!
//! - `configtree-core-store`: [`Node`], [`Value`], merge, deep clone, scoped
//!   overrides
//! - `configtree-file-source`: JSON/YAML file loading

mod global;

pub use configtree_core_store::{
    deep_clone, json_to_value, keypath, merge, merge_value, value_to_json, DeepCloner, Error, Key,
    KeyPath, Mapping, Node, Opaque, PathError, ScopedOverride, Snapshot, Value,
};
pub use configtree_file_source::{
    configure_from_file, configure_from_source, load_mapping, load_mapping_str, FileSource,
    Format, Source, SourceError,
};
pub use global::{configure_global_from_file, global, reset_global, with_global};
