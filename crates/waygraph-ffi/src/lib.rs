//! C FFI bindings for the waygraph pathfinding engine.
//!
//! Exposes the stable host-facing ABI. This is the only waygraph crate
//! permitted to contain `unsafe` code, and every entry point catches panics
//! so no unwind ever crosses the C boundary.
//!
//! The exported function names (`Initialize`, `FindPath`, ...) follow the
//! host ABI contract rather than Rust naming conventions.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]
#![allow(non_snake_case)]

pub mod instance;
pub mod maps;
pub mod query;
pub mod result;
pub mod status;

pub use instance::{GetPathfinderVersion, Initialize, InitializeWithArchive, Shutdown};
pub use maps::{FreeMapList, GetAvailableMaps, GetMapStats, IsMapAvailable, LoadMapFromFile};
pub use query::{FindPath, FindPathWithObstacles};
pub use result::{FreeMapStats, FreePathResult, MapStats, ObstacleZone, PathPoint, PathResult};
pub use status::PathStatus;
