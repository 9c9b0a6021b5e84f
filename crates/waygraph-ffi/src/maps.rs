//! Map availability, listing, statistics, and external loading.

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::instance::ensure_engine;
use crate::result::MapStats;
use crate::status::PathStatus;

/// Whether the archive carries a record for `map_id`. Returns 1 or 0.
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn IsMapAvailable(map_id: i32) -> i32 {
    catch_unwind(|| match ensure_engine() {
        Ok(engine) => i32::from(engine.has_map(map_id)),
        Err(_) => 0,
    })
    .unwrap_or(0)
}

/// All map ids in the archive, sorted ascending.
///
/// Writes the list length to `count` and returns a host-owned array that
/// must be released with `FreeMapList`. Returns null (with `count` = 0) when
/// the engine cannot initialise or the archive is empty.
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn GetAvailableMaps(count: *mut i32) -> *mut i32 {
    if count.is_null() {
        return std::ptr::null_mut();
    }

    let ids = catch_unwind(|| ensure_engine().map(|engine| engine.available_map_ids().to_vec()))
        .unwrap_or(Err(PathStatus::Unknown));

    let ids = match ids {
        Ok(ids) => ids,
        Err(_) => {
            // SAFETY: count is non-null per the check above.
            unsafe { *count = 0 };
            return std::ptr::null_mut();
        }
    };

    // SAFETY: count is non-null per the check above.
    unsafe { *count = ids.len() as i32 };
    if ids.is_empty() {
        return std::ptr::null_mut();
    }

    // Layout: one hidden length slot precedes the ids handed to the host,
    // so FreeMapList can reconstruct the allocation from the pointer alone.
    let mut block = Vec::with_capacity(ids.len() + 1);
    block.push(ids.len() as i32);
    block.extend_from_slice(&ids);
    let base = Box::into_raw(block.into_boxed_slice()) as *mut i32;
    // SAFETY: base points to len + 1 i32 slots; slot 0 is the hidden length.
    unsafe { base.add(1) }
}

/// Release a list returned by `GetAvailableMaps`. Accepts null.
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn FreeMapList(map_list: *mut i32) {
    if map_list.is_null() {
        return;
    }
    // SAFETY: map_list came from GetAvailableMaps, which allocated a boxed
    // slice of len + 1 slots and returned a pointer one slot past the start;
    // the hidden slot 0 holds len.
    unsafe {
        let base = map_list.sub(1);
        let len = *base as usize;
        let slice = std::ptr::slice_from_raw_parts_mut(base, len + 1);
        drop(Box::from_raw(slice));
    }
}

/// Statistics for `map_id`, loading the map from the archive on demand.
///
/// The result must be released with `FreeMapStats`. Never returns null.
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn GetMapStats(map_id: i32) -> *mut MapStats {
    catch_unwind(|| {
        let engine = match ensure_engine() {
            Ok(engine) => engine,
            Err(status) => return MapStats::failure(status, "failed to initialize pathfinder"),
        };
        match engine.map_statistics(map_id) {
            Ok(stats) => MapStats::success(&stats),
            Err(e) => MapStats::failure(PathStatus::from(&e), &e.to_string()),
        }
    })
    .unwrap_or_else(|_| MapStats::failure(PathStatus::Unknown, "panic in GetMapStats"))
}

/// Load a map record from an external JSON file under `map_id`, bypassing
/// the archive. Returns 1 on success, 0 on failure.
#[unsafe(no_mangle)]
#[allow(unsafe_code)]
pub extern "C" fn LoadMapFromFile(map_id: i32, file_path: *const c_char) -> i32 {
    if file_path.is_null() {
        return 0;
    }
    // SAFETY: file_path is a NUL-terminated C string per caller contract.
    let path = match unsafe { CStr::from_ptr(file_path) }.to_str() {
        Ok(path) => path.to_owned(),
        Err(_) => return 0,
    };

    catch_unwind(AssertUnwindSafe(move || {
        let engine = match ensure_engine() {
            Ok(engine) => engine,
            Err(_) => return 0,
        };
        match engine.load_map_from_file(map_id, &path) {
            Ok(()) => 1,
            Err(_) => 0,
        }
    }))
    .unwrap_or(0)
}
