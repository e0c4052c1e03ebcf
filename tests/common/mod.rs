/*  ************************************************************

    PayQR: QR Code encoder for payment payloads

    Copyright (C) 2018 Henrik Kaare Poulsen

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
//! Reference reader for module matrices
//!
//! Reads a symbol back from its modules using only ISO 18004 tables kept in
//! this file, so the encoder is checked against something it does not share code with.
//  ************************************************************

#![allow(dead_code)]

use payqr_wasm::ErrorCorrectionLevel;


//  ************************************************************

#[rustfmt::skip]
const FORMAT_INFO: [u32; 16] = [
    // M, masks 0-7
    0x5412, 0x5125, 0x5E7C, 0x5B4B, 0x45F9, 0x40CE, 0x4F97, 0x4AA0,
    // L, masks 0-7
    0x77C4, 0x72F3, 0x7DAA, 0x789D, 0x662F, 0x6318, 0x6C41, 0x6976,
];

const VERSION_INFO: [u32; 4] = [0x07C94, 0x085BC, 0x09A99, 0x0A4D3];

#[rustfmt::skip]
const ALIGNMENT: [&[usize]; 10] = [
    &[], &[6, 18], &[6, 22], &[6, 26], &[6, 30], &[6, 34],
    &[6, 22, 38], &[6, 24, 42], &[6, 26, 46], &[6, 28, 50],
];

// (blocks, total, data) per group; [version - 1][0 = L, 1 = M]
#[rustfmt::skip]
const BLOCKS: [[&[(usize, usize, usize)]; 2]; 10] = [
    [&[(1, 26, 19)],                &[(1, 26, 16)]],
    [&[(1, 44, 34)],                &[(1, 44, 28)]],
    [&[(1, 70, 55)],                &[(1, 70, 44)]],
    [&[(1, 100, 80)],               &[(2, 50, 32)]],
    [&[(1, 134, 108)],              &[(2, 67, 43)]],
    [&[(2, 86, 68)],                &[(4, 43, 27)]],
    [&[(2, 98, 78)],                &[(4, 49, 31)]],
    [&[(2, 121, 97)],               &[(2, 60, 38), (2, 61, 39)]],
    [&[(2, 146, 116)],              &[(3, 58, 36), (2, 59, 37)]],
    [&[(2, 86, 68), (2, 87, 69)],   &[(4, 69, 43), (1, 70, 44)]],
];


//  ************************************************************
/// What the reader found in a symbol
//  ************************************************************

#[derive(Debug, PartialEq, Eq)]
pub struct Decoded {
    pub version: u8,
    pub ec: ErrorCorrectionLevel,
    pub mask: u8,
    pub segments: Vec<Vec<u8>>,
}


//  ************************************************************
/// Read the symbol of side `n`, where `is_dark(row, col)` gives each module
//  ************************************************************

pub fn read_symbol<F: Fn(usize, usize) -> bool>(n: usize, is_dark: F) -> Result<Decoded, String> {
    if n < 21 || (n - 17) % 4 != 0 || n > 57 {
        return Err(format!("invalid symbol size {}", n));
    }
    let version = ((n - 17) / 4) as u8;

    // format information, both copies
    let mut f_vert = 0u32;
    let mut f_horz = 0u32;
    for i in 0..15 {
        let row = if i < 6 { i } else if i < 8 { i + 1 } else { n - 15 + i };
        let col = if i < 8 { n - 1 - i } else if i == 8 { 7 } else { 14 - i };
        f_vert |= (is_dark(row, 8) as u32) << i;
        f_horz |= (is_dark(8, col) as u32) << i;
    }
    if f_vert != f_horz {
        return Err(format!("format copies differ: {:#06X} {:#06X}", f_vert, f_horz));
    }
    let idx = FORMAT_INFO.iter().position(|&f| f == f_vert).ok_or_else(|| format!("unknown format {:#06X}", f_vert))?;
    let ec = if idx < 8 { ErrorCorrectionLevel::M } else { ErrorCorrectionLevel::L };
    let mask = (idx % 8) as u8;
    if !is_dark(n - 8, 8) {
        return Err("dark module is light".to_string());
    }

    // version information
    if version >= 7 {
        let mut v_ur = 0u32;
        let mut v_ll = 0u32;
        for i in 0..18 {
            v_ur |= (is_dark(i / 3, n - 11 + i % 3) as u32) << i;
            v_ll |= (is_dark(n - 11 + i % 3, i / 3) as u32) << i;
        }
        let expected = VERSION_INFO[version as usize - 7];
        if v_ur != expected || v_ll != expected {
            return Err(format!("bad version info {:#07X} {:#07X}; expected {:#07X}", v_ur, v_ll, expected));
        }
    }

    let bits = read_data_bits(n, version, mask, &is_dark);
    let groups = BLOCKS[version as usize - 1][if ec == ErrorCorrectionLevel::L { 0 } else { 1 }];
    let data = deinterleave_and_check(&bits, groups)?;
    let segments = parse_segments(&data, version)?;
    Ok(Decoded { version, ec, mask, segments })
}


//  ************************************************************
/// Function pattern marks, true where no data may be placed
//  ************************************************************

pub fn function_marks(n: usize, version: u8) -> Vec<bool> {
    let mut marks = vec![false; n * n];
    let mut mark_rect = |r0: usize, c0: usize, h: usize, w: usize| {
        for r in r0..r0 + h {
            for c in c0..c0 + w {
                marks[r * n + c] = true;
            }
        }
    };
    // finders, separators and format information
    mark_rect(0, 0, 9, 9);
    mark_rect(0, n - 8, 9, 8);
    mark_rect(n - 8, 0, 8, 9);
    // timing
    mark_rect(6, 8, 1, n - 16);
    mark_rect(8, 6, n - 16, 1);
    if version >= 7 {
        mark_rect(0, n - 11, 6, 3);
        mark_rect(n - 11, 0, 3, 6);
    }
    let pos = ALIGNMENT[version as usize - 1];
    let k = pos.len();
    for i in 0..k {
        for j in 0..k {
            if (i == 0 && j == 0) || (i == 0 && j == k - 1) || (i == k - 1 && j == 0) {
                continue;
            }
            mark_rect(pos[i] - 2, pos[j] - 2, 5, 5);
        }
    }
    marks
}


//  ************************************************************
fn mask_bit(mask: u8, i: usize, j: usize) -> bool {
    match mask {
        0 => (i + j) % 2 == 0,
        1 => i % 2 == 0,
        2 => j % 3 == 0,
        3 => (i + j) % 3 == 0,
        4 => (i / 2 + j / 3) % 2 == 0,
        5 => (i * j) % 2 + (i * j) % 3 == 0,
        6 => ((i * j) % 2 + (i * j) % 3) % 2 == 0,
        _ => ((i + j) % 2 + (i * j) % 3) % 2 == 0,
    }
}


//  ************************************************************
/// Unmasked data bits in snake order
//  ************************************************************

fn read_data_bits<F: Fn(usize, usize) -> bool>(n: usize, version: u8, mask: u8, is_dark: &F) -> Vec<bool> {
    let marks = function_marks(n, version);
    let mut bits = Vec::with_capacity(n * n);
    let mut up = true;
    let mut x = n as isize - 1;
    while x > 0 {
        if x == 6 {
            x -= 1;
        }
        let col = x as usize;
        for k in 0..n {
            let row = if up { n - 1 - k } else { k };
            for dx in 0..2 {
                let c = col - dx;
                if !marks[row * n + c] {
                    bits.push(is_dark(row, c) ^ mask_bit(mask, row, c));
                }
            }
        }
        up = !up;
        x -= 2;
    }
    bits
}


//  ************************************************************
/// Multiply in GF(256) with x^8+x^4+x^3+x^2+1, by shift and xor
//  ************************************************************

pub fn gf_mul(a: u8, b: u8) -> u8 {
    let (mut a, mut b) = (a as u16, b);
    let mut r = 0u16;
    while b > 0 {
        if b & 1 == 1 {
            r ^= a;
        }
        a <<= 1;
        if a & 0x100 != 0 {
            a ^= 0x11D;
        }
        b >>= 1;
    }
    r as u8
}


//  ************************************************************
/// True if all syndromes of `codeword` (data then parity) vanish
//  ************************************************************

pub fn syndromes_vanish(codeword: &[u8], n_ec: usize) -> bool {
    let mut alpha = 1u8;
    for _ in 0..n_ec {
        let s = codeword.iter().fold(0u8, |s, &c| gf_mul(s, alpha) ^ c);
        if s != 0 {
            return false;
        }
        alpha = gf_mul(alpha, 2);
    }
    true
}


//  ************************************************************
fn deinterleave_and_check(bits: &[bool], groups: &[(usize, usize, usize)]) -> Result<Vec<u8>, String> {
    let blocks: Vec<(usize, usize)> =
        groups.iter().flat_map(|&(count, total, data)| std::iter::repeat((total, data)).take(count)).collect();
    let n_total: usize = blocks.iter().map(|b| b.0).sum();
    if bits.len() < 8 * n_total {
        return Err(format!("only {} data bits for {} codewords", bits.len(), n_total));
    }
    let remainder = &bits[8 * n_total..];
    if remainder.len() > 7 {
        return Err(format!("{} remainder bits", remainder.len()));
    }
    let mut codewords = bits[..8 * n_total].chunks(8).map(|c| c.iter().fold(0u8, |b, &bit| (b << 1) | bit as u8));

    let mut dc: Vec<Vec<u8>> = vec![Vec::new(); blocks.len()];
    let mut ecw: Vec<Vec<u8>> = vec![Vec::new(); blocks.len()];
    let max_data = blocks.iter().map(|b| b.1).max().unwrap_or(0);
    let max_ec = blocks.iter().map(|b| b.0 - b.1).max().unwrap_or(0);
    for i in 0..max_data {
        for (j, b) in blocks.iter().enumerate() {
            if i < b.1 {
                dc[j].extend(codewords.next());
            }
        }
    }
    for i in 0..max_ec {
        for (j, b) in blocks.iter().enumerate() {
            if i < b.0 - b.1 {
                ecw[j].extend(codewords.next());
            }
        }
    }
    for (j, b) in blocks.iter().enumerate() {
        let mut cw = dc[j].clone();
        cw.extend(ecw[j].iter());
        if !syndromes_vanish(&cw, b.0 - b.1) {
            return Err(format!("block {} has errors", j));
        }
    }
    Ok(dc.concat())
}


//  ************************************************************
/// Byte mode segments up to the terminator; checks the pad codewords after it
//  ************************************************************

fn parse_segments(data: &[u8], version: u8) -> Result<Vec<Vec<u8>>, String> {
    let n_bits = 8 * data.len();
    let bit = |i: usize| (data[i / 8] >> (7 - i % 8)) & 1 == 1;
    let read = |pos: &mut usize, width: usize| {
        let mut v = 0usize;
        for _ in 0..width {
            v = (v << 1) | bit(*pos) as usize;
            *pos += 1;
        }
        v
    };
    let count_bits = if version < 10 { 8 } else { 16 };
    let mut segments = Vec::new();
    let mut pos = 0;
    while pos + 4 <= n_bits {
        let mode = read(&mut pos, 4);
        if mode == 0 {
            break;
        }
        if mode != 0b0100 {
            return Err(format!("unexpected mode {:#06b} at bit {}", mode, pos - 4));
        }
        if pos + count_bits > n_bits {
            return Err("count field truncated".to_string());
        }
        let count = read(&mut pos, count_bits);
        if pos + 8 * count > n_bits {
            return Err(format!("segment of {} bytes overruns data", count));
        }
        segments.push((0..count).map(|_| read(&mut pos, 8) as u8).collect());
    }
    // zero bits up to the byte boundary, then 0xEC 0x11 ...
    let start = (pos + 7) / 8;
    for (k, &b) in data[start.min(data.len())..].iter().enumerate() {
        let expected = if k % 2 == 0 { 0xEC } else { 0x11 };
        if b != expected {
            return Err(format!("pad codeword {} is {:#04X}", k, b));
        }
    }
    Ok(segments)
}
