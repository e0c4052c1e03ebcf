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
//! Fallback bindings for Web APIs
//  ************************************************************
//!
//! Stand-ins for the few
//! [web-sys](https://github.com/rustwasm/wasm-bindgen/tree/master/crates/web-sys)
//! items the encoder paints and logs with.
//!
//  ************************************************************


use wasm_bindgen::prelude::*;


#[wasm_bindgen]
extern "C" {

    //  ************************************************************
    //  HTMLCanvasElement
    //  ************************************************************
    ///
    /// The `HTMLCanvasElement` interface provides properties and methods
    /// for manipulating the layout and presentation of canvas elements.
    ///
    /// * <https://developer.mozilla.org/en-US/docs/Web/API/HTMLCanvasElement>
    /// * <https://html.spec.whatwg.org/multipage/canvas.html#htmlcanvaselement>
    ///
    //  ************************************************************
    pub type HTMLCanvasElement;

    #[wasm_bindgen(method, getter)]
    pub fn width(this: &HTMLCanvasElement) -> u32;

    #[wasm_bindgen(method, setter)]
    pub fn set_width(this: &HTMLCanvasElement, width: u32);

    #[wasm_bindgen(method, getter)]
    pub fn height(this: &HTMLCanvasElement) -> u32;

    #[wasm_bindgen(method, setter)]
    pub fn set_height(this: &HTMLCanvasElement, height: u32);
}


#[wasm_bindgen]
extern "C" {

    //  ************************************************************
    //  CanvasRenderingContext2D
    //  ************************************************************
    ///
    /// The `CanvasRenderingContext2D` interface is used for drawing rectangles, text, images and other objects
    /// onto the `canvas` element.
    ///
    /// * <https://developer.mozilla.org/en-US/docs/Web/API/CanvasRenderingContext2D>
    /// * <https://html.spec.whatwg.org/multipage/canvas.html#2dcontext>
    ///
    //  ************************************************************
    pub type CanvasRenderingContext2D;

    #[wasm_bindgen(method, getter)]
    pub fn canvas(this: &CanvasRenderingContext2D) -> HTMLCanvasElement;

    #[wasm_bindgen(method)]
    pub fn save(this: &CanvasRenderingContext2D);

    #[wasm_bindgen(method)]
    pub fn restore(this: &CanvasRenderingContext2D);

    #[wasm_bindgen(method)]
    pub fn scale(this: &CanvasRenderingContext2D, x: f64, y: f64);

    #[wasm_bindgen(method, setter = fillStyle)]
    pub fn set_fill_style_with_str(this: &CanvasRenderingContext2D, style: &str);

    #[wasm_bindgen(method, js_name = fillRect)]
    pub fn fill_rect(this: &CanvasRenderingContext2D, x: f64, y: f64, w: f64, h: f64);
}


//  ************************************************************
//  console
//  ************************************************************
///
/// The `console` object provides access to the browser's debugging console.
///
/// * <https://developer.mozilla.org/en-US/docs/Web/API/Console>
/// * <https://console.spec.whatwg.org/>
///
//  ************************************************************

pub mod console {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {

        #[wasm_bindgen(js_namespace = console, js_name = error)]
        pub fn error_with_str(s: &str);

        #[wasm_bindgen(js_namespace = console, js_name = log)]
        pub fn log_with_str(s: &str);

        #[wasm_bindgen(js_namespace = console, js_name = warn)]
        pub fn warn_with_str(s: &str);
    }
}
