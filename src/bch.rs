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
//! BCH codes protecting format and version information
//  ************************************************************

use super::ErrorCorrectionLevel;


//  ************************************************************

/// Generator of the (15,5) format code: x^10+x^8+x^5+x^4+x^2+x+1
pub const G15: u32 = 0x537;

/// Generator of the (18,6) version code: x^12+x^11+x^10+x^9+x^8+x^5+x^2+1
pub const G18: u32 = 0x1F25;

/// XOR mask applied to format information
pub const G15_MASK: u32 = 0x5412;

pub const N_FORMAT_BITS: usize = 15;
pub const N_VERSION_BITS: usize = 18;


//  ************************************************************
/// Position of the most significant set bit, counted from 1 (0 for 0)
//  ************************************************************

pub fn bch_digit(data: u32) -> u32 {
    32 - data.leading_zeros()
}


//  ************************************************************
/// Remainder of `data` divided by `generator` over GF(2)
//  ************************************************************

fn bch_remainder(data: u32, generator: u32) -> u32 {
    let mut d = data;
    while bch_digit(d) >= bch_digit(generator) {
        d ^= generator << (bch_digit(d) - bch_digit(generator));
    }
    d
}


//  ************************************************************
/// 15 format bits for `ec` and `mask`, masked with `G15_MASK`
//  ************************************************************

pub fn format_bits(ec: ErrorCorrectionLevel, mask: u8) -> u32 {
    let data = ((ec as u32) << 3) | u32::from(mask);
    (((data << 10) | bch_remainder(data << 10, G15)) ^ G15_MASK) & 0x7FFF
}


//  ************************************************************
/// 18 version bits (only placed for versions 7 and up)
//  ************************************************************

pub fn version_bits(version: u8) -> u32 {
    let data = u32::from(version);
    (data << 12) | bch_remainder(data << 12, G18)
}
