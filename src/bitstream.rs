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
//! Append-only sequence of bits stored in a byte vector
//  ************************************************************


//  ************************************************************
/// Append-only bit buffer, most significant bit of each byte first
//  ************************************************************

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BitStream {
    data: Vec<u8>,
    len: usize,
}

//  ************************************************************
impl BitStream {
    //  ************************************************************
    pub fn new() -> Self {
        BitStream { data: Vec::new(), len: 0 }
    }

    //  ************************************************************
    /// Number of bits written so far
    pub fn len(&self) -> usize {
        self.len
    }

    //  ************************************************************
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    //  ************************************************************
    /// Append the `n_bits` low bits of `value`, most significant first
    pub fn put(&mut self, value: u32, n_bits: usize) {
        for i in 0..n_bits {
            self.put_bit((value >> (n_bits - i - 1)) & 1 == 1);
        }
    }

    //  ************************************************************
    pub fn put_bit(&mut self, set: bool) {
        let byte = self.len / 8;
        if self.data.len() <= byte {
            self.data.push(0);
        }
        if set {
            self.data[byte] |= 0x80 >> (self.len % 8);
        }
        self.len += 1;
    }

    //  ************************************************************
    pub fn get(&self, idx: usize) -> bool {
        (self.data[idx / 8] >> (7 - idx % 8)) & 1 == 1
    }

    //  ************************************************************
    /// Bytes written so far; a partial last byte is zero filled
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    //  ************************************************************
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}
