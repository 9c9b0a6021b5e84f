//! Map archive access for the waygraph pathfinding engine.
//!
//! Maps live as one compressed JSON record each inside a single read-only
//! zip-compatible archive. This crate provides the three layers between that
//! file and a parsed [`waygraph_core::MapData`]:
//!
//! - [`ArchiveReader`] — entry enumeration and per-map extraction,
//! - [`BlobCache`] — a bounded LRU over raw (pre-parse) records,
//! - [`MapStore`] — lazy load-and-parse combining the two.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cache;
pub mod error;
pub mod reader;
pub mod store;

pub use cache::BlobCache;
pub use error::{ArchiveError, StoreError};
pub use reader::ArchiveReader;
pub use store::MapStore;
