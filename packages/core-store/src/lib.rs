//! Core configtree: the store engine
//!
//! - `Node`: an auto-vivifying namespace; reading an unset key creates it
//! - `Value`: scalars, plain nested mappings, and handles to nested nodes
//! - `merge`: additive structural merge used by every mutation path
//! - `DeepCloner`: cycle-safe deep copy
//! - `ScopedOverride`: temporary overrides that revert on drop
//! - `KeyPath`: dotted paths (`letters.a`) for addressing nested settings
//!
//! # Example
//!
//! ```rust
//! use configtree_core_store::{keypath, Node};
//!
//! let store = Node::new();
//! store.set("one", 1);
//! store.set_path(&keypath!("letters.a"), "A").unwrap();
//!
//! store.temp(|store| {
//!     store.set_path(&keypath!("letters.a"), "changed").unwrap();
//! });
//!
//! assert_eq!(store.get_path(&keypath!("letters.a")).unwrap(), "A");
//! ```
//!
//! Nodes are reference-counted handles and are not `Send`; a store belongs
//! to one thread.

mod convert;
mod deep_clone;
mod error;
mod key;
mod merge;
mod node;
mod scoped;
mod value;

pub use convert::{json_to_value, value_to_json};
pub use deep_clone::{deep_clone, DeepCloner};
pub use error::Error;
pub use key::{Key, KeyPath, PathError};
pub use merge::{merge, merge_value};
pub use node::Node;
pub use scoped::{ScopedOverride, Snapshot};
pub use value::{Mapping, Opaque, Value};
