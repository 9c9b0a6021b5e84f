//! Error types for map-record decoding.

use std::error::Error;
use std::fmt;

/// Errors from decoding a per-map record.
///
/// A record is rejected atomically: on any error the caller receives no
/// partial [`MapData`](crate::MapData).
#[derive(Debug)]
pub enum RecordError {
    /// The record is not syntactically valid JSON.
    Json(serde_json::Error),
    /// The top-level value is not an object.
    NotAnObject,
    /// A required section (`points`, `vis_graph`) is missing or has the
    /// wrong top-level type.
    MissingSection {
        /// Name of the missing section.
        section: &'static str,
    },
    /// An element inside a section has the wrong JSON type.
    TypeMismatch {
        /// Name of the section containing the offending element.
        section: &'static str,
    },
    /// A point's `id` does not equal its index in the point list.
    PointIdMismatch {
        /// Index of the offending point.
        index: usize,
        /// The id the record carried.
        found: i32,
    },
    /// The decoded map failed the final structural validity gate.
    InvalidMap,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "malformed JSON: {e}"),
            Self::NotAnObject => write!(f, "record root is not a JSON object"),
            Self::MissingSection { section } => {
                write!(f, "required section '{section}' is missing or not an array")
            }
            Self::TypeMismatch { section } => {
                write!(f, "type mismatch in section '{section}'")
            }
            Self::PointIdMismatch { index, found } => {
                write!(f, "point at index {index} carries id {found}")
            }
            Self::InvalidMap => write!(f, "decoded map failed structural validation"),
        }
    }
}

impl Error for RecordError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
