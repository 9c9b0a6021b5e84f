//! Core types for the waygraph pathfinding engine.
//!
//! This is the leaf crate with zero internal waygraph dependencies. It defines
//! the geometry primitives, the parsed map data model and its invariants, and
//! the decoder for the textual per-map record format.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod geometry;
pub mod model;
pub mod record;

// Re-export core types at crate root for convenience.
pub use error::RecordError;
pub use geometry::{ObstacleZone, Trapezoid, Vec2};
pub use model::{
    EnterTravel, MapData, MapStatistics, NpcTravel, PathNode, Point, PortalConnection, Teleporter,
    TeleporterDirection, TravelPortal, VisibilityEdge,
};
pub use record::parse_map_record;
