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
//! Polynomials over GF(256)
//  ************************************************************

use std::fmt;
use std::ops::Mul;

use super::error::{QrError, Result};
use super::galois::{exp, G};


//  ************************************************************
/// Polynomial over finite field
///
/// Coefficients are stored highest degree first and never carry leading zeros,
/// so `c[0]` is always non-zero for a non-empty polynomial.
//  ************************************************************

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poly {
    c: Vec<G>,
}

//  ************************************************************
impl Poly {
    //  ************************************************************
    /// Polynomial from `coefs` (highest degree first) multiplied by x^`shift`
    pub fn new(coefs: &[u8], shift: usize) -> Self {
        let offset = coefs.iter().take_while(|&&b| b == 0).count();
        if offset == coefs.len() {
            return Poly { c: Vec::new() };
        }
        let mut c = Vec::with_capacity(coefs.len() - offset + shift);
        c.extend(coefs[offset..].iter().map(|&b| G(b)));
        c.resize(coefs.len() - offset + shift, G(0));
        Poly { c }
    }

    //  ************************************************************
    fn from_elems(mut c: Vec<G>) -> Self {
        let offset = c.iter().take_while(|g| g.is_zero()).count();
        c.drain(..offset);
        Poly { c }
    }

    //  ************************************************************
    pub fn len(&self) -> usize {
        self.c.len()
    }

    //  ************************************************************
    pub fn is_empty(&self) -> bool {
        self.c.is_empty()
    }

    //  ************************************************************
    pub fn get(&self, i: usize) -> u8 {
        self.c[i].0
    }

    //  ************************************************************
    pub fn coefficients(&self) -> Vec<u8> {
        self.c.iter().map(|&g| g.into()).collect()
    }

    //  ************************************************************
    /// Coefficients as powers of the generator; fails on a zero coefficient
    pub fn log_coefficients(&self) -> Result<Vec<i32>> {
        self.c.iter().map(|g| g.log()).collect()
    }

    //  ************************************************************
    /// Full product; zero terms contribute nothing and never reach `log`
    pub fn multiply(&self, other: &Poly) -> Poly {
        if self.is_empty() || other.is_empty() {
            return Poly { c: Vec::new() };
        }
        let mut dst = vec![G(0); self.len() + other.len() - 1];
        for (i, &a) in self.c.iter().enumerate() {
            for (j, &b) in other.c.iter().enumerate() {
                dst[i + j] += a * b;
            }
        }
        insane!("Poly::multiply {} * {} = {:?}", self, other, dst);
        Poly::from_elems(dst)
    }

    //  ************************************************************
    /// Remainder of the long division by `divisor`
    pub fn rem(&self, divisor: &Poly) -> Result<Poly> {
        if divisor.is_empty() {
            return Err(QrError::InvalidFieldOperand(0));
        }
        let lead = divisor.c[0].log()?;
        let mut rem = self.clone();
        while rem.len() >= divisor.len() {
            let ratio = rem.c[0].log()? - lead;
            for (r, d) in rem.c.iter_mut().zip(divisor.c.iter()) {
                if !d.is_zero() {
                    *r += exp(d.log()? + ratio);
                }
            }
            // leading term cancelled; strip it (and any zeros behind it)
            rem = Poly::from_elems(rem.c);
        }
        insane!("Poly::rem {} mod {} = {}", self, divisor, rem);
        Ok(rem)
    }
}

//  ************************************************************
impl fmt::Display for Poly {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(&self.coefficients(), f)
    }
}

//  ************************************************************
impl<'a> Mul for &'a Poly {
    type Output = Poly;

    fn mul(self, other: &Poly) -> Poly {
        self.multiply(other)
    }
}
