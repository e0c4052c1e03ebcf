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
//! Web Assembly (wasm) interface for PayQR
//  ************************************************************
//!
//! Encodes payment payloads (links, EMV merchant strings) into QR codes of
//! versions 1-10 in 8 bit byte mode with error correction level L or M.
//!
//! ```
//! use payqr_wasm::{encode, EncodeOptions};
//!
//! let code = encode(b"https://pay.example/o/4711", &EncodeOptions::default()).unwrap();
//! assert_eq!(code.size(), 25);
//! assert!(code.is_dark(0, 0));
//! ```

use js_sys::{Object, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;

#[macro_use]
pub mod logging;
pub mod bch;
pub mod bitstream;
pub mod capacity;
pub mod error;
pub mod galois;
pub mod mask;
pub mod poly;
pub mod prng;
pub mod reedsolomon;
pub mod render;
pub mod symbol;
pub mod web_sys_fallback;

pub use error::QrError;
pub use symbol::{encode, EncodeOptions, QrCode, SymbolBuilder};
use web_sys_fallback::CanvasRenderingContext2D;


//  ************************************************************
/// Error Correction Level (L/M) as defined by ISO 18004
//  ************************************************************
///
/// The discriminants are the 2 bit values carried in the format information.
///
/// # Note
///
/// ISO 18004 also defines Q and H, which are not implemented

#[wasm_bindgen]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCorrectionLevel {
    /// ~ 7% error correction capability
    L = 1,
    /// ~ 15% error correction capability
    M = 0,
}

impl Default for ErrorCorrectionLevel {
    fn default() -> Self {
        ErrorCorrectionLevel::M
    }
}


//  ************************************************************
/// Set logging level
//  ************************************************************

#[wasm_bindgen]
pub fn set_loglevel(lvl: usize) {
    logging::set_loglevel(lvl);
}


//  ************************************************************
/// Get QR code `version` from text length
//  ************************************************************

#[wasm_bindgen]
pub fn version_from_length(len: usize, ec: &str) -> Result<u8, JsValue> {
    Ok(capacity::version_from_length(len, parse_ec(ec)?)?)
}


//  ************************************************************
/// Encode text to canvas
///
/// `version` 0 picks the smallest version holding `txt`.
//  ************************************************************

#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn encode_to_canvas(
    txt: &str,
    version: u8,
    ec: &str,
    ctx: &CanvasRenderingContext2D,
    bg_color_str: &str,
    module_color_str: &str,
    pix_per_module: f64,
) -> Result<(), JsValue> {
    let code = encode(txt.as_bytes(), &options(version, ec)?)?;
    render::onto_context(&code, ctx, bg_color_str, module_color_str, pix_per_module);
    Ok(())
}


//  ************************************************************
/// Encode text at level M and fill a `size_px` square canvas with it
///
/// Empty text leaves the canvas untouched.
//  ************************************************************

#[wasm_bindgen]
pub fn render_qr_to_canvas(ctx: &CanvasRenderingContext2D, txt: &str, size_px: u32) -> Result<(), JsValue> {
    if txt.is_empty() {
        return Ok(());
    }
    let code = encode(txt.as_bytes(), &EncodeOptions::default())?;
    render::onto_context_sized(&code, ctx, size_px);
    Ok(())
}


//  ************************************************************
/// Encode text to dark (1) / light (0) flags, row major
//  ************************************************************

#[wasm_bindgen]
pub fn encode_to_modules(txt: &str, version: u8, ec: &str) -> Result<Vec<u8>, JsValue> {
    let code = encode(txt.as_bytes(), &options(version, ec)?)?;
    Ok(render::to_modules(&code))
}


//  ************************************************************
/// Encode text to an object with `size`, `version`, `ec`, `mask` and `modules`
//  ************************************************************

#[wasm_bindgen]
pub fn encode_to_object(txt: &str, version: u8, ec: &str) -> Result<Object, JsValue> {
    let code = encode(txt.as_bytes(), &options(version, ec)?)?;
    let result = Object::new();
    set_value(&result, "size", code.size() as u32)?;
    set_value(&result, "version", code.version())?;
    set_value(&result, "ec", format!("{:?}", code.ec()))?;
    set_value(&result, "mask", code.mask())?;
    set_value(&result, "modules", Uint8Array::from(&render::to_modules(&code)[..]))?;
    Ok(result)
}


//  ************************************************************
fn parse_ec(ec: &str) -> Result<ErrorCorrectionLevel, JsValue> {
    ec.parse::<ErrorCorrectionLevel>().map_err(|e| JsValue::from_str(&e))
}


//  ************************************************************
fn options(version: u8, ec: &str) -> Result<EncodeOptions, JsValue> {
    let options = EncodeOptions::default().with_ec(parse_ec(ec)?);
    Ok(if version == 0 { options } else { options.with_version(version) })
}


//  ************************************************************
/// Helper function to assign a value to a field in a JsValue object
//  ************************************************************

fn set_value<F: Into<JsValue>>(object: &JsValue, field: &str, value: F) -> Result<(), JsValue> {
    Reflect::set(object, &JsValue::from(field), &value.into())?;
    Ok(())
}
