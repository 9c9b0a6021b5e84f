//! The process-wide engine instance behind the C ABI.
//!
//! The core crates only know explicit [`PathEngine`] handles; the default
//! process-wide instance lives here, at the boundary, for hosts that load
//! the library and expect it to manage its own lifetime. Initialisation is
//! double-checked under a mutex and idempotent; queries auto-initialise with
//! the default archive path.

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use waygraph_engine::{EngineConfig, PathEngine};

use crate::status::PathStatus;

static ENGINE: Mutex<Option<Arc<PathEngine>>> = Mutex::new(None);

/// NUL-terminated version string handed to `GetPathfinderVersion`.
const VERSION: &str = concat!("waygraph ", env!("CARGO_PKG_VERSION"), "\0");

/// The current engine, initialising with the default archive path on first
/// use.
pub(crate) fn ensure_engine() -> Result<Arc<PathEngine>, PathStatus> {
    let mut slot = ENGINE.lock().unwrap();
    if let Some(engine) = slot.as_ref() {
        return Ok(Arc::clone(engine));
    }
    let engine = PathEngine::open(EngineConfig::default()).map_err(|_| PathStatus::InitFailed)?;
    let engine = Arc::new(engine);
    *slot = Some(Arc::clone(&engine));
    Ok(engine)
}

fn initialize_with(config: EngineConfig) -> i32 {
    let mut slot = ENGINE.lock().unwrap();
    if slot.is_some() {
        return 1;
    }
    match PathEngine::open(config) {
        Ok(engine) => {
            *slot = Some(Arc::new(engine));
            1
        }
        Err(_) => 0,
    }
}

/// Initialise the engine with the default archive path (`maps.zip` next to
/// the running binary).
///
/// Returns 1 on success, 0 on failure. Idempotent: once initialised, later
/// calls return 1 without touching the archive.
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn Initialize() -> i32 {
    catch_unwind(|| initialize_with(EngineConfig::default())).unwrap_or(0)
}

/// Initialise the engine with an explicit archive path.
///
/// Returns 1 on success, 0 on failure (including a null or non-UTF-8 path).
/// Idempotent like [`Initialize`].
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn InitializeWithArchive(archive_path: *const c_char) -> i32 {
    if archive_path.is_null() {
        return 0;
    }
    // SAFETY: archive_path is a NUL-terminated C string per caller contract.
    let path = match unsafe { CStr::from_ptr(archive_path) }.to_str() {
        Ok(path) => path,
        Err(_) => return 0,
    };
    let config = EngineConfig::with_archive(path);
    catch_unwind(AssertUnwindSafe(|| initialize_with(config))).unwrap_or(0)
}

/// Tear down the process-wide engine, dropping all resident maps and cached
/// blobs. A later query re-initialises from scratch.
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn Shutdown() {
    let _ = catch_unwind(|| {
        *ENGINE.lock().unwrap() = None;
    });
}

/// Version string of the library. Static storage — do not free.
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn GetPathfinderVersion() -> *const c_char {
    VERSION.as_ptr() as *const c_char
}
