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
//! Reed Solomon error correction coding
//  ************************************************************

use super::error::Result;
use super::galois::exp;
use super::poly::Poly;


//  ************************************************************
/// Reed Solomon encoder for a fixed number of parity bytes
//  ************************************************************

#[derive(Clone, Debug)]
pub struct ReedSolomonEncoder {
    n_ec_bytes: usize,
    gen_poly: Poly,
}

impl ReedSolomonEncoder {
    //  ************************************************************
    pub fn new(n_ec_bytes: usize) -> Self {
        let gen_poly = generator(n_ec_bytes);
        ReedSolomonEncoder { n_ec_bytes, gen_poly }
    }

    //  ************************************************************
    pub fn n_ec_bytes(&self) -> usize {
        self.n_ec_bytes
    }

    //  ************************************************************
    pub fn generator(&self) -> &Poly {
        &self.gen_poly
    }

    //  ************************************************************
    /// Parity bytes for `msg`, highest degree first, always `n_ec_bytes` long
    pub fn encode(&self, msg: &[u8]) -> Result<Vec<u8>> {
        let n = self.n_ec_bytes;
        trace!("ReedSolomonEncoder::encode begin; n={} msg.len={}", n, msg.len());
        let raw = Poly::new(msg, n);
        let rem = raw.rem(&self.gen_poly)?;
        let mut parity = vec![0u8; n - rem.len()];
        parity.extend(rem.coefficients());
        trace!("ReedSolomonEncoder::encode done; n={}, parity={:?}", n, parity);
        Ok(parity)
    }
}


//  ************************************************************
/// Generator polynomial (x - a^0)(x - a^1)...(x - a^(n-1))
//  ************************************************************

pub fn generator(n_ec_bytes: usize) -> Poly {
    let mut genpoly = Poly::new(&[1], 0);
    for i in 0..n_ec_bytes {
        genpoly = &genpoly * &Poly::new(&[1, exp(i as i32).0], 0);
    }
    trace!("generator: n={} genpoly={}", n_ec_bytes, genpoly);
    genpoly
}
