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
//! Arithmetic in GF(256) with primitive polynomial x^8+x^4+x^3+x^2+1
//  ************************************************************

//!
//! The exponent and logarithm tables are evaluated at compile time and
//! live in read-only memory, so any number of concurrent encodes may share them.

use std::ops::{Add, AddAssign, Mul};

use super::error::{QrError, Result};


//  ************************************************************

struct Tables {
    exp: [u8; 256],
    log: [u8; 256],
}

const fn build_tables() -> Tables {
    let mut exp = [0u8; 256];
    let mut log = [0u8; 256];
    let mut i = 0;
    while i < 8 {
        exp[i] = 1 << i;
        i += 1;
    }
    while i < 256 {
        exp[i] = exp[i - 4] ^ exp[i - 5] ^ exp[i - 6] ^ exp[i - 8];
        i += 1;
    }
    i = 0;
    while i < 255 {
        log[exp[i] as usize] = i as u8;
        i += 1;
    }
    Tables { exp, log }
}

static TABLES: Tables = build_tables();


//  ************************************************************
/// Exponentiation of the generator; `n` is taken modulo 255 (also when negative)
//  ************************************************************

pub fn exp(n: i32) -> G {
    G(TABLES.exp[n.rem_euclid(255) as usize])
}


//  ************************************************************
/// Discrete logarithm of a non-zero element
//  ************************************************************

pub fn log(x: u8) -> Result<i32> {
    if x < 1 {
        return Err(QrError::InvalidFieldOperand(x));
    }
    Ok(i32::from(TABLES.log[x as usize]))
}


//  ************************************************************
/// Element in Galois Field
//  ************************************************************

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct G(pub u8);

impl G {
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn log(self) -> Result<i32> {
        log(self.0)
    }
}

//  ************************************************************
impl From<G> for u8 {
    fn from(g: G) -> u8 {
        g.0
    }
}

//  ************************************************************
impl Add for G {
    type Output = G;
    fn add(self, other: G) -> G {
        G(self.0 ^ other.0)
    }
}

//  ************************************************************
impl AddAssign for G {
    fn add_assign(&mut self, other: G) {
        self.0 ^= other.0;
    }
}

//  ************************************************************
impl Mul for G {
    type Output = G;

    fn mul(self, other: G) -> G {
        if self.is_zero() || other.is_zero() {
            return G(0);
        }
        let i = i32::from(TABLES.log[self.0 as usize]);
        let j = i32::from(TABLES.log[other.0 as usize]);
        exp(i + j)
    }
}
