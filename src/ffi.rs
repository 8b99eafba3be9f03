//! FFI bindings for wearscore
//!
//! C-compatible functions for calling the scorers from other languages.
//! All functions take null-terminated C strings and return allocated memory
//! that must be freed by the caller using `wearscore_free_string`.

use std::cell::RefCell;
use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use crate::config::ScoringConfig;
use crate::error::ScoreError;
use crate::pipeline::{fitbit_to_daily_report, fitbit_to_daily_report_with_config, DailyReport};
use crate::trends::WeeklySummary;

// Thread-local storage for the last error message
thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(msg: &str) {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = CString::new(msg).ok();
    });
}

fn clear_last_error() {
    LAST_ERROR.with(|e| {
        *e.borrow_mut() = None;
    });
}

/// Helper to convert C string to Rust string
unsafe fn cstr_to_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok().map(|s| s.to_string())
}

/// Helper to convert Rust string to C string (caller must free)
fn string_to_cstr(s: &str) -> *mut c_char {
    match CString::new(s) {
        Ok(cstr) => cstr.into_raw(),
        Err(_) => ptr::null_mut(),
    }
}

/// Hand a result back across the boundary, recording the error on failure
fn into_c_result(result: Result<String, ScoreError>) -> *mut c_char {
    match result {
        Ok(json) => string_to_cstr(&json),
        Err(e) => {
            set_last_error(&e.to_string());
            ptr::null_mut()
        }
    }
}

// ============================================================================
// Scoring API
// ============================================================================

/// Score a Fitbit bundle and return the daily report JSON.
///
/// # Safety
/// - `json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `wearscore_free_string`.
/// - Returns NULL on error; call `wearscore_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn wearscore_fitbit_daily_report(json: *const c_char) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    into_c_result(fitbit_to_daily_report(json_str))
}

/// Score a Fitbit bundle with a JSON scoring configuration.
///
/// Keys missing from `config_json` keep their defaults.
///
/// # Safety
/// - `json` and `config_json` must be valid null-terminated C strings.
/// - Returns a newly allocated string that must be freed with `wearscore_free_string`.
/// - Returns NULL on error; call `wearscore_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn wearscore_fitbit_daily_report_with_config(
    json: *const c_char,
    config_json: *const c_char,
) -> *mut c_char {
    clear_last_error();

    let json_str = match cstr_to_string(json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    let config_str = match cstr_to_string(config_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid config string pointer");
            return ptr::null_mut();
        }
    };

    let result = ScoringConfig::from_json(&config_str)
        .and_then(|config| fitbit_to_daily_report_with_config(json_str, &config));
    into_c_result(result)
}

/// Summarize a JSON array of daily reports.
///
/// # Safety
/// - `reports_json` must be a valid null-terminated C string.
/// - Returns a newly allocated string that must be freed with `wearscore_free_string`.
/// - Returns NULL on error; call `wearscore_last_error` to get the error message.
#[no_mangle]
pub unsafe extern "C" fn wearscore_weekly_summary(reports_json: *const c_char) -> *mut c_char {
    clear_last_error();

    let reports_str = match cstr_to_string(reports_json) {
        Some(s) => s,
        None => {
            set_last_error("Invalid JSON string pointer");
            return ptr::null_mut();
        }
    };

    let result = serde_json::from_str::<Vec<DailyReport>>(&reports_str)
        .map_err(ScoreError::from)
        .and_then(|reports| {
            serde_json::to_string(&WeeklySummary::from_reports(&reports))
                .map_err(|e| ScoreError::EncodingError(e.to_string()))
        });
    into_c_result(result)
}

/// Return the default scoring configuration as JSON.
///
/// # Safety
/// - Returns a newly allocated string that must be freed with `wearscore_free_string`.
#[no_mangle]
pub unsafe extern "C" fn wearscore_default_config() -> *mut c_char {
    clear_last_error();
    into_c_result(ScoringConfig::default().to_json())
}

// ============================================================================
// Memory Management
// ============================================================================

/// Free a string returned by wearscore functions.
///
/// # Safety
/// - `ptr` must be a valid pointer returned by a wearscore function, or NULL.
/// - After calling this function, the pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn wearscore_free_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(CString::from_raw(ptr));
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Get the last error message.
///
/// # Safety
/// - Returns a pointer to a thread-local error string.
/// - The returned pointer is valid until the next wearscore call on this thread.
/// - Do NOT free the returned pointer.
/// - Returns NULL if no error occurred.
#[no_mangle]
pub unsafe extern "C" fn wearscore_last_error() -> *const c_char {
    LAST_ERROR.with(|e| match &*e.borrow() {
        Some(cstr) => cstr.as_ptr(),
        None => ptr::null(),
    })
}

/// Get the library version.
///
/// # Safety
/// - Returns a pointer to a static string. Do NOT free.
#[no_mangle]
pub unsafe extern "C" fn wearscore_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
