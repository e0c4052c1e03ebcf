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
//! Turn a finished symbol into pixels
//  ************************************************************

use super::symbol::QrCode;
use super::web_sys_fallback::CanvasRenderingContext2D;


//  ************************************************************

/// Light modules required around the symbol
pub const QUIET_ZONE: usize = 4;

pub const DARK: u8 = 0x00;
pub const LIGHT: u8 = 0xFF;


//  ************************************************************
/// Square 8 bit grayscale raster, row major
//  ************************************************************

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    dim: usize,
    pixels: Vec<u8>,
}

//  ************************************************************
impl Raster {
    pub fn new(dim: usize) -> Self {
        Raster { dim, pixels: vec![LIGHT; dim * dim] }
    }
    pub fn get_dim(&self) -> usize {
        self.dim
    }
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.pixels[x + y * self.dim]
    }
    pub fn set(&mut self, x: usize, y: usize, v: u8) {
        self.pixels[x + y * self.dim] = v;
    }
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}


//  ************************************************************
/// Raster with `pix_per_module` pixels per module and `quiet_zone` light modules of border
//  ************************************************************

pub fn to_luma(code: &QrCode, pix_per_module: usize, quiet_zone: usize) -> Raster {
    let n = code.size();
    let dim = pix_per_module * (n + 2 * quiet_zone);
    debug!("to_luma: n={} pix_per_module={} quiet_zone={} dim={}", n, pix_per_module, quiet_zone, dim);
    let mut raster = Raster::new(dim);
    for row in 0..n {
        for col in 0..n {
            if !code.is_dark(row, col) {
                continue;
            }
            let x0 = (quiet_zone + col) * pix_per_module;
            let y0 = (quiet_zone + row) * pix_per_module;
            for y in y0..y0 + pix_per_module {
                for x in x0..x0 + pix_per_module {
                    raster.set(x, y, DARK);
                }
            }
        }
    }
    raster
}


//  ************************************************************
/// Raster of exactly `size_px` pixels, each pixel taking the color of the module under it
//  ************************************************************

pub fn sample(code: &QrCode, size_px: usize) -> Raster {
    let n = code.size();
    let mut raster = Raster::new(size_px);
    for y in 0..size_px {
        let row = y * n / size_px;
        for x in 0..size_px {
            let col = x * n / size_px;
            if code.is_dark(row, col) {
                raster.set(x, y, DARK);
            }
        }
    }
    raster
}


//  ************************************************************
/// One byte per module, row major, 1 for dark and 0 for light
//  ************************************************************

pub fn to_modules(code: &QrCode) -> Vec<u8> {
    let n = code.size();
    (0..n * n).map(|i| code.is_dark(i / n, i % n) as u8).collect()
}


//  ************************************************************
/// One line per row, `@` for dark and `.` for light
//  ************************************************************

pub fn to_text(code: &QrCode) -> String {
    let n = code.size();
    let mut s = String::with_capacity(n * (n + 1));
    for row in 0..n {
        for col in 0..n {
            s.push(if code.is_dark(row, col) { '@' } else { '.' });
        }
        s.push('\n');
    }
    s
}


//  ************************************************************
/// Paint `code` onto the given browser 2D rendering context, quiet zone included
//  ************************************************************

pub fn onto_context(
    code: &QrCode,
    ctx: &CanvasRenderingContext2D,
    bg_color_str: &str,
    module_color_str: &str,
    pix_per_module: f64,
) {
    log!("onto_context: begin transfer qr bitmap onto context");
    let n = code.size();
    let dim = f64::ceil(pix_per_module * ((2 * QUIET_ZONE + n) as f64)) as u32;
    let canvas = ctx.canvas();
    canvas.set_height(dim);
    canvas.set_width(dim);
    ctx.save();
    ctx.set_fill_style_with_str(bg_color_str);
    ctx.fill_rect(0.0, 0.0, canvas.width().into(), canvas.height().into());
    ctx.scale(pix_per_module, pix_per_module);
    ctx.set_fill_style_with_str(module_color_str);
    for row in 0..n {
        for col in 0..n {
            if code.is_dark(row, col) {
                ctx.fill_rect((QUIET_ZONE + col) as f64, (QUIET_ZONE + row) as f64, 1.0, 1.0);
            }
        }
    }
    ctx.restore();
    log!("onto_context: done transfer qr bitmap onto context");
}


//  ************************************************************
/// Paint `code` over a `size_px` square canvas, tiles snapped to whole pixels
//  ************************************************************

pub fn onto_context_sized(code: &QrCode, ctx: &CanvasRenderingContext2D, size_px: u32) {
    let n = code.size();
    let canvas = ctx.canvas();
    canvas.set_width(size_px);
    canvas.set_height(size_px);
    ctx.set_fill_style_with_str("#FFFFFF");
    ctx.fill_rect(0.0, 0.0, size_px.into(), size_px.into());
    let tile = f64::from(size_px) / n as f64;
    ctx.set_fill_style_with_str("#000000");
    for row in 0..n {
        for col in 0..n {
            if code.is_dark(row, col) {
                let (x, y) = (col as f64 * tile, row as f64 * tile);
                let w = ((col + 1) as f64 * tile).ceil() - x.floor();
                let h = ((row + 1) as f64 * tile).ceil() - y.floor();
                ctx.fill_rect(x.round(), y.round(), w, h);
            }
        }
    }
}
