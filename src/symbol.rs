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
//! Build a QR code symbol from byte mode segments
//  ************************************************************

//!
//! A build runs strictly forward:
//! codewords are created once, then the matrix is laid out eight times
//! with placeholder format bits (one trial per mask), the trials are scored,
//! and the matrix is laid out a last time with the winning mask and the real
//! format and version information.

use std::str::FromStr;

use super::bch;
use super::bitstream::BitStream;
use super::capacity;
use super::error::{QrError, Result};
use super::mask;
use super::reedsolomon::ReedSolomonEncoder;
use super::ErrorCorrectionLevel;


/* note
 * (row, col) everywhere; row 0 is the top, col 0 the left edge
*/


//  ************************************************************
/// State of a single module during layout
//  ************************************************************

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Module {
    Unset,
    Light,
    Dark,
}


//  ************************************************************
/// Square matrix of modules
///
/// Unset modules read as light.
//  ************************************************************

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    dim: usize,
    data: Vec<Module>,
}

//  ************************************************************
impl Matrix {
    pub fn new(dim: usize) -> Self {
        Matrix { dim, data: vec![Module::Unset; dim * dim] }
    }
    pub fn get_dim(&self) -> usize {
        self.dim
    }
    pub fn get(&self, row: usize, col: usize) -> Module {
        self.data[row * self.dim + col]
    }
    pub fn set(&mut self, row: usize, col: usize, dark: bool) {
        self.data[row * self.dim + col] = if dark { Module::Dark } else { Module::Light };
    }
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        self.get(row, col) != Module::Unset
    }
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == Module::Dark
    }
    /// True when no module is left unset
    pub fn is_complete(&self) -> bool {
        self.data.iter().all(|&m| m != Module::Unset)
    }
    pub fn n_dark(&self) -> usize {
        self.data.iter().filter(|&&m| m == Module::Dark).count()
    }
}


//  ************************************************************
/// A finished QR code symbol
//  ************************************************************

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrCode {
    version: u8,
    ec: ErrorCorrectionLevel,
    mask: u8,
    matrix: Matrix,
}

//  ************************************************************
impl QrCode {
    /// Number of modules along each side
    pub fn size(&self) -> usize {
        self.matrix.get_dim()
    }
    pub fn is_dark(&self, row: usize, col: usize) -> bool {
        self.matrix.is_dark(row, col)
    }
    pub fn version(&self) -> u8 {
        self.version
    }
    pub fn ec(&self) -> ErrorCorrectionLevel {
        self.ec
    }
    pub fn mask(&self) -> u8 {
        self.mask
    }
    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }
}


//  ************************************************************
/// Caller's choices for an encode
//  ************************************************************

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Fixed version, or `None` for the smallest version that fits
    pub version: Option<u8>,
    pub ec: ErrorCorrectionLevel,
}

impl EncodeOptions {
    pub fn with_version(mut self, version: u8) -> Self {
        self.version = Some(version);
        self
    }
    pub fn with_ec(mut self, ec: ErrorCorrectionLevel) -> Self {
        self.ec = ec;
        self
    }
}


//  ************************************************************
impl FromStr for ErrorCorrectionLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "L" | "l" => Ok(ErrorCorrectionLevel::L),
            "M" | "m" => Ok(ErrorCorrectionLevel::M),
            _ => Err(format!("unknown error correction level '{}'; expected L or M", s)),
        }
    }
}


//  ************************************************************
/// Collects byte mode segments and builds the symbol
//  ************************************************************

#[derive(Clone, Debug, Default)]
pub struct SymbolBuilder {
    options: EncodeOptions,
    segments: Vec<Vec<u8>>,
}

//  ************************************************************
impl SymbolBuilder {
    //  ************************************************************
    pub fn new(options: EncodeOptions) -> Self {
        SymbolBuilder { options, segments: Vec::new() }
    }

    //  ************************************************************
    /// Append a byte mode segment
    pub fn add_data(&mut self, data: &[u8]) -> &mut Self {
        self.segments.push(data.to_vec());
        self
    }

    //  ************************************************************
    /// Number of payload bytes over all segments
    pub fn payload_len(&self) -> usize {
        self.segments.iter().map(|s| s.len()).sum()
    }

    //  ************************************************************
    pub fn build(&self) -> Result<QrCode> {
        log!("SymbolBuilder::build: begin encoding qr code");
        let ec = self.options.ec;
        let version = match self.options.version {
            Some(v) => {
                capacity::check_version(v, ec)?;
                v
            }
            None => self.select_version()?,
        };
        let codewords = create_codewords(&self.segments, version, ec)?;
        debug!("SymbolBuilder::build: version={} ec={:?} codewords.len={}", version, ec, codewords.len());

        let (mask_id, penalty) = mask::select_best(|m| make_matrix(version, ec, &codewords, true, m));
        debug!("SymbolBuilder::build: mask={} penalty={}", mask_id, penalty);

        let matrix = make_matrix(version, ec, &codewords, false, mask_id);
        log!("SymbolBuilder::build: done encoding qr code");
        Ok(QrCode { version, ec, mask: mask_id, matrix })
    }

    //  ************************************************************
    /// Smallest version whose data codewords hold every segment with its headers
    fn select_version(&self) -> Result<u8> {
        let ec = self.options.ec;
        if self.segments.len() == 1 {
            return capacity::version_from_length(self.segments[0].len(), ec);
        }
        for version in capacity::VERSION_MIN..=capacity::VERSION_MAX {
            if n_segment_bits(&self.segments, version) <= 8 * capacity::n_data_codewords(version, ec)? {
                debug!("SymbolBuilder::select_version: segments={} version={}", self.segments.len(), version);
                return Ok(version);
            }
        }
        Err(QrError::CapacityExceeded {
            length: self.payload_len(),
            capacity: capacity::data_capacity(capacity::VERSION_MAX, ec)?,
        })
    }
}


//  ************************************************************
/// Encode `payload` as a single byte mode segment
//  ************************************************************

pub fn encode(payload: &[u8], options: &EncodeOptions) -> Result<QrCode> {
    SymbolBuilder::new(*options).add_data(payload).build()
}


//  ************************************************************
/// Bits taken by mode indicators, count fields and payload of all segments
//  ************************************************************

fn n_segment_bits(segments: &[Vec<u8>], version: u8) -> usize {
    let header = capacity::N_MODE_BITS + capacity::n_count_bits(version);
    segments.iter().map(|s| header + 8 * s.len()).sum()
}


//  ************************************************************
/// Serialize segments, terminate and pad to the data codeword count
//  ************************************************************

fn create_data(segments: &[Vec<u8>], version: u8, ec: ErrorCorrectionLevel) -> Result<Vec<u8>> {
    let n_data_codewords = capacity::n_data_codewords(version, ec)?;
    let n_data_bits = 8 * n_data_codewords;
    let n_count_bits = capacity::n_count_bits(version);

    let mut bits = BitStream::new();
    for segment in segments.iter() {
        bits.put(capacity::MODE_EIGHT_BIT, capacity::N_MODE_BITS);
        bits.put(segment.len() as u32, n_count_bits);
        for &b in segment.iter() {
            bits.put(u32::from(b), 8);
        }
    }
    trace!("create_data: version={} ec={:?} bits.len={} n_data_bits={}", version, ec, bits.len(), n_data_bits);
    if bits.len() > n_data_bits {
        return Err(QrError::CapacityExceeded {
            length: segments.iter().map(|s| s.len()).sum(),
            capacity: capacity::data_capacity(version, ec)?,
        });
    }

    // terminator
    if bits.len() + 4 <= n_data_bits {
        bits.put(0, 4);
    }
    while bits.len() % 8 != 0 {
        bits.put_bit(false);
    }

    let mut data = bits.into_bytes();
    let pad: [u8; 2] = [0xEC, 0x11];
    let mut pi = 0;
    while data.len() < n_data_codewords {
        data.push(pad[pi]);
        pi = 1 - pi;
    }
    insane!("create_data: data={:?}", data);
    Ok(data)
}


//  ************************************************************
/// Data and error correction codewords, interleaved in placement order
//  ************************************************************

pub fn create_codewords(segments: &[Vec<u8>], version: u8, ec: ErrorCorrectionLevel) -> Result<Vec<u8>> {
    let blocks = capacity::block_descriptors(version, ec)?;
    let data = create_data(segments, version, ec)?;

    let mut dc_blocks = Vec::<&[u8]>::with_capacity(blocks.len());
    let mut ec_blocks = Vec::<Vec<u8>>::with_capacity(blocks.len());
    let mut rs = ReedSolomonEncoder::new(blocks.first().map_or(0, |b| b.ec_count()));
    let mut offset = 0;
    for b in blocks.iter() {
        let dc = &data[offset..offset + b.data_count];
        offset += b.data_count;
        if rs.n_ec_bytes() != b.ec_count() {
            rs = ReedSolomonEncoder::new(b.ec_count());
        }
        ec_blocks.push(rs.encode(dc)?);
        dc_blocks.push(dc);
    }

    let max_dc = blocks.iter().map(|b| b.data_count).max().unwrap_or(0);
    let max_ec = blocks.iter().map(|b| b.ec_count()).max().unwrap_or(0);
    let mut codewords = Vec::<u8>::with_capacity(capacity::n_codewords(version));
    for i in 0..max_dc {
        codewords.extend(dc_blocks.iter().filter_map(|dc| dc.get(i)));
    }
    for i in 0..max_ec {
        codewords.extend(ec_blocks.iter().filter_map(|e| e.get(i)));
    }
    debug_assert_eq!(codewords.len(), capacity::n_codewords(version), "INCONSISTENT NUMBER OF CODEWORDS");
    trace!("create_codewords: blocks={} codewords={:X?}", blocks.len(), codewords);
    Ok(codewords)
}


//  ************************************************************
/// Lay out one complete matrix
///
/// With `test` set, format and version information are placeholders (all light),
/// which is what the mask trials are scored on.
//  ************************************************************

pub fn make_matrix(version: u8, ec: ErrorCorrectionLevel, codewords: &[u8], test: bool, mask_id: u8) -> Matrix {
    let n = capacity::n_modules_from_version(version);
    let mut matrix = Matrix::new(n);

    set_finder_pattern(&mut matrix, 0, 0);
    set_finder_pattern(&mut matrix, n - 7, 0);
    set_finder_pattern(&mut matrix, 0, n - 7);
    set_alignment_patterns(&mut matrix, version);
    set_timing_patterns(&mut matrix);
    set_format(&mut matrix, ec, mask_id, test);
    if version >= 7 {
        set_version(&mut matrix, version, test);
    }
    set_data_zigzag(&mut matrix, codewords, mask_id, version);
    matrix
}


//  ************************************************************
/// Finder pattern with its separator, clipped at the symbol edge
//  ************************************************************

fn set_finder_pattern(matrix: &mut Matrix, row: usize, col: usize) {
    let n = matrix.get_dim() as isize;
    for r in -1..=7isize {
        let rr = row as isize + r;
        if rr < 0 || rr >= n {
            continue;
        }
        for c in -1..=7isize {
            let cc = col as isize + c;
            if cc < 0 || cc >= n {
                continue;
            }
            let dark = ((0..=6).contains(&r) && (c == 0 || c == 6))
                || ((0..=6).contains(&c) && (r == 0 || r == 6))
                || ((2..=4).contains(&r) && (2..=4).contains(&c));
            matrix.set(rr as usize, cc as usize, dark);
        }
    }
}


//  ************************************************************
fn set_alignment_patterns(matrix: &mut Matrix, version: u8) {
    let pos = capacity::alignment_patterns(version);
    for &row in pos.iter() {
        for &col in pos.iter() {
            // overlaps a finder pattern
            if matrix.is_set(row, col) {
                continue;
            }
            for r in 0..5 {
                for c in 0..5 {
                    let dark = r == 0 || r == 4 || c == 0 || c == 4 || (r == 2 && c == 2);
                    matrix.set(row - 2 + r, col - 2 + c, dark);
                }
            }
        }
    }
}


//  ************************************************************
fn set_timing_patterns(matrix: &mut Matrix) {
    let n = matrix.get_dim();
    for i in 8..n - 8 {
        if !matrix.is_set(i, 6) {
            matrix.set(i, 6, i % 2 == 0);
        }
        if !matrix.is_set(6, i) {
            matrix.set(6, i, i % 2 == 0);
        }
    }
}


//  ************************************************************
/// Both copies of the format information, plus the dark module
//  ************************************************************

fn set_format(matrix: &mut Matrix, ec: ErrorCorrectionLevel, mask_id: u8, test: bool) {
    let n = matrix.get_dim();
    let bits = bch::format_bits(ec, mask_id);
    trace!("set_format: ec={:?} mask={} bits={:#06X} test={}", ec, mask_id, bits, test);
    for i in 0..bch::N_FORMAT_BITS {
        let dark = !test && (bits >> i) & 1 == 1;
        // vertical, along column 8
        let row = if i < 6 {
            i
        } else if i < 8 {
            i + 1
        } else {
            n - 15 + i
        };
        matrix.set(row, 8, dark);
        // horizontal, along row 8
        let col = if i < 8 {
            n - i - 1
        } else if i < 9 {
            15 - i
        } else {
            15 - i - 1
        };
        matrix.set(8, col, dark);
    }
    matrix.set(n - 8, 8, !test);
}


//  ************************************************************
/// Both 6x3 copies of the version information
//  ************************************************************

fn set_version(matrix: &mut Matrix, version: u8, test: bool) {
    let n = matrix.get_dim();
    let bits = bch::version_bits(version);
    for i in 0..bch::N_VERSION_BITS {
        let dark = !test && (bits >> i) & 1 == 1;
        matrix.set(i / 3, i % 3 + n - 11, dark);
        matrix.set(i % 3 + n - 11, i / 3, dark);
    }
}


//  ************************************************************
/// Place codeword bits, most significant first, into every unset module
//  ************************************************************

fn set_data_zigzag(matrix: &mut Matrix, codewords: &[u8], mask_id: u8, version: u8) {
    let mut bits = codewords.iter().flat_map(|&b| (0..8).rev().map(move |i| (b >> i) & 1 == 1));
    let mut rem_bits = 0;
    for (row, col) in ZigZagIterator::new(matrix.get_dim()) {
        if matrix.is_set(row, col) {
            continue;
        }
        let bit = match bits.next() {
            Some(b) => b,
            None => {
                rem_bits += 1;
                false
            }
        };
        matrix.set(row, col, bit ^ mask::mask(mask_id, row, col));
    }
    debug_assert_eq!(rem_bits, capacity::n_remainder_bits(version), "WRONG NUMBER OF REMAINDER BITS");
    let n_leftover = bits.count();
    debug_assert_eq!(n_leftover, 0, "TOO MUCH DATA FOR MATRIX");
}


//  ************************************************************
/// Every module position in placement order
///
/// Two column strips from the right edge, moving up through the first strip,
/// down through the next, and so on. Column 6 (vertical timing) is never a
/// strip column.
//  ************************************************************

pub struct ZigZagIterator {
    n_modules: usize,
    col: usize,
    row: usize,
    dx: usize,
    up: bool,
    done: bool,
}

//  ************************************************************
impl ZigZagIterator {
    pub fn new(n_modules: usize) -> Self {
        ZigZagIterator { n_modules, col: n_modules - 1, row: n_modules - 1, dx: 0, up: true, done: false }
    }

    fn advance(&mut self) {
        if self.dx == 0 {
            self.dx = 1;
            return;
        }
        self.dx = 0;
        if self.up && self.row > 0 {
            self.row -= 1;
            return;
        }
        if !self.up && self.row < self.n_modules - 1 {
            self.row += 1;
            return;
        }
        // turn into the next strip
        self.up = !self.up;
        if self.col < 3 {
            self.done = true;
            return;
        }
        self.col -= 2;
        if self.col == 6 {
            self.col = 5;
        }
    }
}

//  ************************************************************
impl Iterator for ZigZagIterator {
    type Item = (usize, usize);
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = (self.row, self.col - self.dx);
        self.advance();
        Some(item)
    }
}
