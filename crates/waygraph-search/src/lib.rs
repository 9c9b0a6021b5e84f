//! A* search over waygraph visibility graphs.
//!
//! The search runs entirely on an immutable [`waygraph_core::MapData`]
//! snapshot: anchor selection picks the closest graph points to the caller's
//! world positions, A* relaxes visibility edges toward the goal, and the
//! reconstructed point chain is anchored back to the caller's exact
//! endpoints and optionally decimated by a minimum waypoint spacing.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod astar;
mod heuristic;
mod path;
mod query;

pub mod error;

pub use astar::{closest_point, closest_point_avoiding};
pub use error::SearchError;
pub use path::{simplify, total_cost};
pub use query::{find_path, FoundPath, SearchOptions};
