//! Error types for the search engine.

use std::error::Error;
use std::fmt;

/// Errors from a path query on a single map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// No usable navigation point exists for an endpoint: the map has no
    /// points, or every candidate lies inside an obstacle zone.
    NoAnchorPoint,
    /// A* exhausted the open set without reaching the goal.
    NoPath,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAnchorPoint => write!(f, "no usable navigation point near query position"),
            Self::NoPath => write!(f, "no path found"),
        }
    }
}

impl Error for SearchError {}
