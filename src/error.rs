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
//! Errors reported by the encoder
//  ************************************************************

use thiserror::Error;
use wasm_bindgen::JsValue;

use super::ErrorCorrectionLevel;


//  ************************************************************
/// Everything that can make an encode fail
///
/// All errors are raised before any module of the matrix is placed;
/// a failed encode never hands out a partial symbol.
//  ************************************************************

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum QrError {
    /// The payload (plus mode and count headers) does not fit
    #[error("payload of {length} bytes exceeds capacity of {capacity} bytes")]
    CapacityExceeded { length: usize, capacity: usize },

    /// No block layout exists for the requested version and level
    #[error("unsupported configuration: version {version} with error correction level {ec:?}")]
    UnsupportedConfiguration { version: u8, ec: ErrorCorrectionLevel },

    /// Logarithm of zero requested in GF(256); an internal invariant is broken
    #[error("invalid GF(256) operand {0} for logarithm")]
    InvalidFieldOperand(u8),
}


pub type Result<T> = std::result::Result<T, QrError>;


//  ************************************************************
impl From<QrError> for JsValue {
    fn from(e: QrError) -> JsValue {
        JsValue::from_str(&e.to_string())
    }
}
