/*  ************************************************************

    PayQR: QR Code encoder for payment payloads

    Copyright (C) 2011-2018 Henrik Kaare Poulsen

    Licensed under the Apache License, Version 2.0 (the "License");
    you may not use this file except in compliance with the License.
    You may obtain a copy of the License at

     http://www.apache.org/licenses/LICENSE-2.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.

    ************************************************************ */


//  ************************************************************
//! Leveled logging to the browser console (wasm32) or stdout (native)
//  ************************************************************

//!
//! | LOG_LEVEL | Emitted by |
//! | --------- | ---------- |
//! | always    | `error!`, `warn!` |
//! | 1         | `log!` (encode begin/done) |
//! | 2         | `debug!` (version, level, mask, capacities) |
//! | 3         | `trace!` (penalties per mask, block layout) |
//! | 4         | `insane!` (codeword level detail) |
//!
//! A message is emitted when its level is at most the runtime `LOG_LEVEL`
//! *and* at most the compile time `MAX_LOG_LEVEL`.

use std::sync::atomic::{AtomicUsize, Ordering};


//  ************************************************************
/// Runtime logging level
//  ************************************************************

static LOG_LEVEL: AtomicUsize = AtomicUsize::new(2);


//  ************************************************************
/// Static maximal logging level (less logging in release builds)
//  ************************************************************

#[cfg(debug_assertions)]
pub const MAX_LOG_LEVEL: usize = 5;

#[cfg(not(debug_assertions))]
pub const MAX_LOG_LEVEL: usize = 2;


//  ************************************************************
/// Set runtime logging level
//  ************************************************************

pub fn set_loglevel(lvl: usize) {
    LOG_LEVEL.store(lvl, Ordering::Relaxed);
}


//  ************************************************************
/// Current runtime logging level
//  ************************************************************

pub fn loglevel() -> usize {
    LOG_LEVEL.load(Ordering::Relaxed)
}


//  ************************************************************
/// Return true if `lvl` should be logged
//  ************************************************************

pub fn shall_log(lvl: usize) -> bool {
    lvl <= MAX_LOG_LEVEL && lvl <= loglevel()
}


/* ============================================================
 * Logging in browser
 * ============================================================
 */

#[cfg(all(target_arch = "wasm32", not(target_os = "emscripten")))]
#[macro_export]
macro_rules! error {
    ($($t:tt)*) => ($crate::web_sys_fallback::console::error_with_str(&format!($($t)*)))
}

#[cfg(all(target_arch = "wasm32", not(target_os = "emscripten")))]
#[macro_export]
macro_rules! warn {
    ($($t:tt)*) => ($crate::web_sys_fallback::console::warn_with_str(&format!($($t)*)))
}

#[cfg(all(target_arch = "wasm32", not(target_os = "emscripten")))]
#[macro_export]
macro_rules! log {
    ($($t:tt)*) => (if $crate::logging::shall_log(1) {
        $crate::web_sys_fallback::console::log_with_str(&format!($($t)*))
    })
}

#[cfg(all(target_arch = "wasm32", not(target_os = "emscripten")))]
#[macro_export]
macro_rules! debug {
    ($($t:tt)*) => (if $crate::logging::shall_log(2) {
        $crate::web_sys_fallback::console::log_with_str(&format!($($t)*))
    })
}

#[cfg(all(target_arch = "wasm32", not(target_os = "emscripten")))]
#[macro_export]
macro_rules! trace {
    ($($t:tt)*) => (if $crate::logging::shall_log(3) {
        $crate::web_sys_fallback::console::log_with_str(&format!($($t)*))
    })
}

#[cfg(all(target_arch = "wasm32", not(target_os = "emscripten")))]
#[macro_export]
macro_rules! insane {
    ($($t:tt)*) => (if $crate::logging::shall_log(4) {
        $crate::web_sys_fallback::console::log_with_str(&format!($($t)*))
    })
}


/* ============================================================
 * Logging locally
 * ============================================================
 */

/// Unconditionally log an error
#[cfg(not(all(target_arch = "wasm32", not(target_os = "emscripten"))))]
#[macro_export]
macro_rules! error {
    ($($t:tt)*) => (println!($($t)*))
}

/// Unconditionally log a warning
#[cfg(not(all(target_arch = "wasm32", not(target_os = "emscripten"))))]
#[macro_export]
macro_rules! warn {
    ($($t:tt)*) => (println!($($t)*))
}

/// Log if `LOG_LEVEL` >= 1
#[cfg(not(all(target_arch = "wasm32", not(target_os = "emscripten"))))]
#[macro_export]
macro_rules! log {
    ($($t:tt)*) => (if $crate::logging::shall_log(1) { println!($($t)*) })
}

/// Log if `LOG_LEVEL` >= 2
#[cfg(not(all(target_arch = "wasm32", not(target_os = "emscripten"))))]
#[macro_export]
macro_rules! debug {
    ($($t:tt)*) => (if $crate::logging::shall_log(2) { println!($($t)*) })
}

/// Log if `LOG_LEVEL` >= 3
#[cfg(not(all(target_arch = "wasm32", not(target_os = "emscripten"))))]
#[macro_export]
macro_rules! trace {
    ($($t:tt)*) => (if $crate::logging::shall_log(3) { println!($($t)*) })
}

/// Log if `LOG_LEVEL` >= 4
#[cfg(not(all(target_arch = "wasm32", not(target_os = "emscripten"))))]
#[macro_export]
macro_rules! insane {
    ($($t:tt)*) => (if $crate::logging::shall_log(4) { println!($($t)*) })
}
