//! File sources for configtree stores.
//!
//! Parses JSON or YAML files into nested mappings and merges them into a
//! [`Node`](configtree_core_store::Node). A missing file is logged and
//! skipped; parse and I/O failures are returned.
//!
//! ```rust,no_run
//! use configtree_core_store::Node;
//! use configtree_file_source::configure_from_file;
//!
//! let store = Node::new();
//! configure_from_file(&store, "config/settings.yml").unwrap();
//! ```

mod error;
mod format;
mod source;

pub use error::SourceError;
pub use format::Format;
pub use source::{
    configure_from_file, configure_from_source, load_mapping, load_mapping_str, FileSource, Source,
};
