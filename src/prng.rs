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
//! Pseudo random number generator
//  ************************************************************


//  ************************************************************
/// Very simple XORSHIFT pseudo random number generator
///
/// # References
///
/// - <https://en.wikipedia.org/wiki/Xorshift>
/// - <http://www.jstatsoft.org/v08/i14/paper>
///
/// The `Rng` is only used for generating testdata
//  ************************************************************

pub struct Rng {
    state: u32,
}

impl Rng {
    /// A zero seed would stick at zero, so it is replaced
    pub fn new(seed: u32) -> Self {
        Rng { state: if seed == 0 { 0x9E37_79B9 } else { seed } }
    }
    pub fn get_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }
    pub fn get_u8(&mut self) -> u8 {
        self.get_u32() as u8
    }
    pub fn get_u8_vec(&mut self, len: usize) -> Vec<u8> {
        (0..len).map(|_| self.get_u8()).collect()
    }
    /// Value in `min..max`, or `min` for an empty range
    pub fn get_usize_clamped(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            min
        } else {
            min + (self.get_u32() as usize) % (max - min)
        }
    }
    /// Printable ASCII, as found in payment links and merchant names
    pub fn get_printable_vec(&mut self, len: usize) -> Vec<u8> {
        (0..len).map(|_| 0x20 + (self.get_u32() % 95) as u8).collect()
    }

    //  ************************************************************
    /// Payload shaped like an EMV merchant presented QR: `id len value` fields, ended by a CRC field
    ///
    /// The result is exactly `len` bytes long when `len` is at least 8.
    pub fn get_tlv_payload(&mut self, len: usize) -> Vec<u8> {
        let mut out = b"000201".to_vec();
        // room for the closing "6304" + 4 hex digits
        let body = len.saturating_sub(8);
        while out.len() + 4 < body {
            let n = self.get_usize_clamped(1, 100).min(body - out.len() - 4);
            let id = self.get_usize_clamped(26, 63);
            out.extend(format!("{:02}{:02}", id, n).bytes());
            for _ in 0..n {
                out.push(b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz.-/"[self.get_usize_clamped(0, 65)]);
            }
        }
        while out.len() < body {
            out.push(b'0');
        }
        out.truncate(body);
        out.extend(format!("6304{:04X}", self.get_u32() & 0xFFFF).bytes());
        out.truncate(len);
        out
    }
}
