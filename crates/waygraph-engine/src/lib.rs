//! The waygraph engine: one handle owning archive access, parsed maps, and
//! query serving.
//!
//! A [`PathEngine`] is an explicit value owned by the host — nothing in this
//! crate is process-global. The C ABI crate layers a default process-wide
//! instance on top for hosts that want one.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod engine;
pub mod error;

pub use config::{ConfigError, EngineConfig};
pub use engine::PathEngine;
pub use error::EngineError;

// The query types a host needs alongside the engine.
pub use waygraph_core::{MapStatistics, ObstacleZone, PathNode, Vec2};
pub use waygraph_search::{FoundPath, SearchError};
