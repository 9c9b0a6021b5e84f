//! Waygraph: an embedded 2-D visibility-graph pathfinding engine for game
//! worlds.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! waygraph sub-crates. For most hosts, adding `waygraph` as a single
//! dependency is sufficient; the C ABI lives in the separate `waygraph-ffi`
//! crate.
//!
//! # Quick start
//!
//! ```rust
//! use waygraph::prelude::*;
//!
//! // A three-point corridor along the x axis.
//! let points: Vec<Point> = [(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]
//!     .iter()
//!     .enumerate()
//!     .map(|(id, &(x, y))| Point { id: id as i32, pos: Vec2::new(x, y), layer: 0 })
//!     .collect();
//! let mut vis_graph = vec![Vec::new(); points.len()];
//! for (a, b) in [(0usize, 1usize), (1, 2)] {
//!     let dist = points[a].pos.dist(points[b].pos);
//!     vis_graph[a].push(VisibilityEdge::new(b as i32, dist));
//!     vis_graph[b].push(VisibilityEdge::new(a as i32, dist));
//! }
//! let map = MapData {
//!     map_id: 1,
//!     points,
//!     visibility_graph: vis_graph,
//!     ..MapData::default()
//! };
//!
//! let found = find_path(
//!     &map,
//!     Vec2::new(0.0, 0.0),
//!     Vec2::new(20.0, 0.0),
//!     &[],
//!     &SearchOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(found.total_cost, 20.0);
//! assert_eq!(found.nodes.len(), 3);
//! ```
//!
//! Production hosts normally go through [`engine::PathEngine`], which owns
//! the map archive and keeps parsed maps resident:
//!
//! ```rust,no_run
//! use waygraph::engine::{EngineConfig, PathEngine};
//! use waygraph::types::Vec2;
//!
//! let engine = PathEngine::open(EngineConfig::with_archive("maps.zip"))?;
//! let path = engine.find_path(100, Vec2::new(0.0, 0.0), Vec2::new(250.0, 80.0), 24.0)?;
//! # Ok::<(), waygraph::engine::EngineError>(())
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `waygraph-core` | Geometry, the map data model, the record parser |
//! | [`archive`] | `waygraph-archive` | Archive reader, blob LRU cache, lazy map store |
//! | [`search`] | `waygraph-search` | A*, heuristics, path simplification |
//! | [`engine`] | `waygraph-engine` | The engine handle, configuration, errors |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Geometry, the map data model, and the record parser (`waygraph-core`).
pub use waygraph_core as types;

/// Archive reader, blob LRU cache, and the lazy map store
/// (`waygraph-archive`).
pub use waygraph_archive as archive;

/// A* search, heuristics, and path simplification (`waygraph-search`).
pub use waygraph_search as search;

/// The engine handle, its configuration, and error taxonomy
/// (`waygraph-engine`).
pub use waygraph_engine as engine;

/// Common imports for typical waygraph usage.
///
/// ```rust
/// use waygraph::prelude::*;
/// ```
pub mod prelude {
    // Core model and geometry
    pub use waygraph_core::{
        MapData, MapStatistics, ObstacleZone, PathNode, Point, Teleporter, Trapezoid, Vec2,
        VisibilityEdge,
    };

    // Errors
    pub use waygraph_archive::{ArchiveError, StoreError};
    pub use waygraph_core::RecordError;
    pub use waygraph_engine::EngineError;
    pub use waygraph_search::SearchError;

    // Search
    pub use waygraph_search::{find_path, simplify, FoundPath, SearchOptions};

    // Engine
    pub use waygraph_engine::{EngineConfig, PathEngine};
}
