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
//! Symbol capacities and error correction block layout
//!
//! Only versions 1-10 and levels L and M are supported.
//!
//! # References
//!
//! * [ISO 18004:2015](https://www.iso.org/standard/62021.html), tables 7 and 9
//  ************************************************************

use super::error::{QrError, Result};
use super::ErrorCorrectionLevel;


//  ************************************************************

pub const VERSION_MIN: u8 = 1;
pub const VERSION_MAX: u8 = 10;

pub const MODULES_MIN: usize = 17 + 4 * (VERSION_MIN as usize);
pub const MODULES_MAX: usize = 17 + 4 * (VERSION_MAX as usize);

/// Mode indicator for 8 bit byte mode
pub const MODE_EIGHT_BIT: u32 = 0b0100;

pub const N_MODE_BITS: usize = 4;


//  ************************************************************

pub fn n_modules_from_version(version: u8) -> usize {
    17 + 4 * version as usize
}


//  ************************************************************
/// Width of the byte mode character count indicator
//  ************************************************************

pub fn n_count_bits(version: u8) -> usize {
    if version < 10 {
        8
    } else {
        16
    }
}


//  ************************************************************
/// Total number of codewords (data + error correction) in a symbol
//  ************************************************************

pub fn n_codewords(version: u8) -> usize {
    [26, 44, 70, 100, 134, 172, 196, 242, 292, 346][version as usize - 1]
}


//  ************************************************************
/// Data modules left over after the last full codeword
//  ************************************************************

pub fn n_remainder_bits(version: u8) -> usize {
    [0, 7, 7, 7, 7, 7, 0, 0, 0, 0][version as usize - 1]
}


//  ************************************************************
/// A group of `n` identical blocks, each of `total` codewords of which `data` carry data
//  ************************************************************

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EcBlock {
    pub n: usize,
    pub total: usize,
    pub data: usize,
}

const fn ecb(n: usize, total: usize, data: usize) -> EcBlock {
    EcBlock { n, total, data }
}


//  ************************************************************
/// One Reed Solomon block of a symbol
//  ************************************************************

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockDescriptor {
    pub total_count: usize,
    pub data_count: usize,
}

impl BlockDescriptor {
    pub fn ec_count(&self) -> usize {
        self.total_count - self.data_count
    }
}


//  ************************************************************
//  Indexed by [version - 1][ec as usize], i.e. M before L

#[rustfmt::skip]
static EC_BLOCKS: [[&[EcBlock]; 2]; 10] = [
    [&[ecb(1, 26, 16)],                    &[ecb(1, 26, 19)]],                     // 1
    [&[ecb(1, 44, 28)],                    &[ecb(1, 44, 34)]],                     // 2
    [&[ecb(1, 70, 44)],                    &[ecb(1, 70, 55)]],                     // 3
    [&[ecb(2, 50, 32)],                    &[ecb(1, 100, 80)]],                    // 4
    [&[ecb(2, 67, 43)],                    &[ecb(1, 134, 108)]],                   // 5
    [&[ecb(4, 43, 27)],                    &[ecb(2, 86, 68)]],                     // 6
    [&[ecb(4, 49, 31)],                    &[ecb(2, 98, 78)]],                     // 7
    [&[ecb(2, 60, 38), ecb(2, 61, 39)],    &[ecb(2, 121, 97)]],                    // 8
    [&[ecb(3, 58, 36), ecb(2, 59, 37)],    &[ecb(2, 146, 116)]],                   // 9
    [&[ecb(4, 69, 43), ecb(1, 70, 44)],    &[ecb(2, 86, 68), ecb(2, 87, 69)]],     // 10
];


//  ************************************************************
/// Fail unless `version` and `ec` have a block layout
//  ************************************************************

pub fn check_version(version: u8, ec: ErrorCorrectionLevel) -> Result<()> {
    if (VERSION_MIN..=VERSION_MAX).contains(&version) {
        Ok(())
    } else {
        Err(QrError::UnsupportedConfiguration { version, ec })
    }
}


//  ************************************************************
/// Block groups in interleave order
//  ************************************************************

pub fn ec_blocks(version: u8, ec: ErrorCorrectionLevel) -> Result<&'static [EcBlock]> {
    check_version(version, ec)?;
    Ok(EC_BLOCKS[version as usize - 1][ec as usize])
}


//  ************************************************************
/// One descriptor per block, groups expanded, order preserved
//  ************************************************************

pub fn block_descriptors(version: u8, ec: ErrorCorrectionLevel) -> Result<Vec<BlockDescriptor>> {
    let groups = ec_blocks(version, ec)?;
    let blocks: Vec<BlockDescriptor> = groups
        .iter()
        .flat_map(|g| std::iter::repeat(BlockDescriptor { total_count: g.total, data_count: g.data }).take(g.n))
        .collect();
    trace!("block_descriptors: version={} ec={:?} blocks={:?}", version, ec, blocks);
    Ok(blocks)
}


//  ************************************************************
/// Number of data codewords in a symbol
//  ************************************************************

pub fn n_data_codewords(version: u8, ec: ErrorCorrectionLevel) -> Result<usize> {
    Ok(ec_blocks(version, ec)?.iter().map(|g| g.n * g.data).sum())
}


//  ************************************************************
/// Number of payload bytes a single byte mode segment can hold
//  ************************************************************

pub fn data_capacity(version: u8, ec: ErrorCorrectionLevel) -> Result<usize> {
    let bits = 8 * n_data_codewords(version, ec)? - N_MODE_BITS - n_count_bits(version);
    Ok(bits / 8)
}


//  ************************************************************
/// Smallest version holding `len` payload bytes in one byte mode segment
//  ************************************************************

#[rustfmt::skip]
pub fn version_from_length(len: usize, ec: ErrorCorrectionLevel) -> Result<u8> {
    let version_ec_eight_bit: [[usize; 10]; 2] = [
        // EightBit M
        [ 14,  26,  42,  62,  84, 106, 122, 152, 180, 213],
        // EightBit L
        [ 17,  32,  53,  78, 106, 134, 154, 192, 230, 271],
    ];
    let vv = &version_ec_eight_bit[ec as usize];
    let v = match vv.binary_search(&len) {
        Ok(v) => v,
        Err(v) if v < vv.len() => v,
        Err(_) => {
            return Err(QrError::CapacityExceeded { length: len, capacity: vv[vv.len() - 1] });
        }
    };
    let version = (v + 1) as u8;
    debug!("version_from_length: length={} ec={:?} version={}", len, ec, version);
    Ok(version)
}


//  ************************************************************
/// Row/column centers of the alignment patterns
//  ************************************************************

pub fn alignment_patterns(version: u8) -> &'static [usize] {
    match version {
        2 => &[6, 18],
        3 => &[6, 22],
        4 => &[6, 26],
        5 => &[6, 30],
        6 => &[6, 34],
        7 => &[6, 22, 38],
        8 => &[6, 24, 42],
        9 => &[6, 26, 46],
        10 => &[6, 28, 50],
        _ => &[],
    }
}
