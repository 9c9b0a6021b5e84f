//! C-compatible status codes for the result envelopes.

use waygraph_engine::EngineError;

/// Status embedded in every envelope returned across the C boundary.
///
/// `Ok` = 0; positive values are expected per-query failures, negative
/// values are engine-level failures. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathStatus {
    /// Success.
    Ok = 0,
    /// The map is not in the archive, or its record could not be loaded.
    MapUnavailable = 1,
    /// No path exists between the requested endpoints.
    NoPath = 2,
    /// The engine could not be initialised.
    InitFailed = -1,
    /// A recoverable internal failure; the message carries detail.
    Internal = -2,
    /// An unclassified failure (including a caught panic).
    Unknown = -3,
}

impl From<&EngineError> for PathStatus {
    fn from(e: &EngineError) -> Self {
        match e {
            EngineError::Config(_) => PathStatus::InitFailed,
            EngineError::MapUnavailable { .. } | EngineError::MapRejected { .. } => {
                PathStatus::MapUnavailable
            }
            // Both search failures — no anchor point and no route — surface
            // as "no path found" to the host.
            EngineError::Search(_) => PathStatus::NoPath,
            EngineError::Archive(_) | EngineError::Io { .. } => PathStatus::Internal,
        }
    }
}
