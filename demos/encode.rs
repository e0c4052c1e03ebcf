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

use clap::{App, Arg, Error, ErrorKind};
use payqr_wasm::capacity::{VERSION_MAX, VERSION_MIN};
use payqr_wasm::render::{self, QUIET_ZONE};
use payqr_wasm::{encode, logging, EncodeOptions, ErrorCorrectionLevel, QrCode};
use std::io::{self, Write};


//  ************************************************************

const ABOUT: &str = "Encode a payment payload into a QR Code

The <DATA> provided is encoded in 8 bit byte mode into a QR Code of version 1-10.

By default the QR Code is output as text to stdout.
By specifying --ansi the output to stdout uses ANSI escape codes on stdout.
By specifying --file <FILE> the output will be written to the <FILE> specified.
The file type (eg .png, or .jpg) determines the format of the <FILE>.
";


//  ************************************************************

const ARG_DEBUG: &str = "DEBUG";
const ARG_EC: &str = "EC";
const ARG_VERSION: &str = "VERSION";
const ARG_ANSI: &str = "ANSI";
const ARG_PPM: &str = "PPM";
const ARG_FILE: &str = "FILE";
const ARG_DATA: &str = "DATA";


//  ************************************************************

fn main() {
    let matches = App::new("PayQR encoder")
        .version("0.1")
        .author("Henrik <henrik@kaarposoft.dk>")
        .about(ABOUT)
        .arg(
            Arg::with_name(ARG_DEBUG)
                .short("d")
                .long("debug")
                .help("Specify -d/--debug one or more times to increase debug level")
                .multiple(true),
        )
        .arg(
            Arg::with_name(ARG_VERSION)
                .short("v")
                .long("version")
                .help("QR Code version [possible values: 1-10; default: smallest that fits]")
                .value_name(ARG_VERSION)
                .takes_value(true),
        )
        .arg(
            Arg::with_name(ARG_EC)
                .short("e")
                .long("error-correction-level")
                .help("Error correction level")
                .value_name(ARG_EC)
                .possible_values(&["L", "l", "M", "m"]),
        )
        .arg(Arg::with_name(ARG_ANSI).short("a").long("ansi").help("Output ansi control codes (when encoding to stdout)"))
        .arg(
            Arg::with_name(ARG_PPM)
                .short("p")
                .long("pixels-per-module")
                .help("Image pixels per QR Code module (when encoding to file) [possible values: 1-16]")
                .takes_value(true)
                .requires(ARG_FILE),
        )
        .arg(
            Arg::with_name(ARG_FILE)
                .short("f")
                .long("file")
                .help("File (path) to write QR Code image to")
                .value_name(ARG_FILE)
                .takes_value(true)
                .conflicts_with(ARG_ANSI),
        )
        .arg(Arg::with_name(ARG_DATA).value_name("DATA").help("Data to be encoded").required(true))
        .get_matches();

    let debug_level = matches.occurrences_of(ARG_DEBUG);
    logging::set_loglevel(debug_level as usize);

    let data = matches.value_of(ARG_DATA).unwrap();

    let ec = match matches.value_of(ARG_EC) {
        None => ErrorCorrectionLevel::M,
        Some(e) => match e.parse::<ErrorCorrectionLevel>() {
            Ok(ec) => ec,
            Err(msg) => invalid_exit(&msg),
        },
    };

    let mut options = EncodeOptions::default().with_ec(ec);
    if let Some(v) = matches.value_of(ARG_VERSION) {
        match v.parse::<u8>() {
            Ok(v) if (VERSION_MIN..=VERSION_MAX).contains(&v) => options = options.with_version(v),
            _ => invalid_exit("invalid version [possible values 1-10]"),
        }
    }

    let ppm = match matches.value_of(ARG_PPM) {
        Some(p) => match p.parse::<usize>() {
            Ok(p) if (1..=16).contains(&p) => p,
            _ => invalid_exit("invalid pixels-per-module [possible values 1-16]"),
        },
        None => 4,
    };

    let code = match encode(data.as_bytes(), &options) {
        Ok(code) => code,
        Err(e) => invalid_exit(&e.to_string()),
    };
    eprintln!("version={} ec={:?} mask={}", code.version(), code.ec(), code.mask());

    match matches.value_of(ARG_FILE) {
        None => {
            if matches.is_present(ARG_ANSI) {
                write_to_stdout_ansi(&code);
            } else {
                io::stdout().write_all(render::to_text(&code).as_bytes()).unwrap();
            }
        }
        Some(f) => write_to_path(&code, ppm, f),
    }
}


//  ************************************************************

fn write_to_stdout_ansi(code: &QrCode) {
    let n = code.size();
    let border_lines = "\n".repeat(QUIET_ZONE / 2);
    let mut out = border_lines.clone();
    for row in 0..n {
        out.push_str(&" ".repeat(QUIET_ZONE));
        for col in 0..n {
            if code.is_dark(row, col) {
                out.push_str("\x1B[40m  ");
            } else {
                out.push_str("\x1B[107m  ");
            }
        }
        out.push_str("\x1B[0m\n");
    }
    out.push_str(&border_lines);
    io::stdout().write_all(out.as_bytes()).unwrap();
}


//  ************************************************************

fn write_to_path(code: &QrCode, ppm: usize, path: &str) {
    let raster = render::to_luma(code, ppm, QUIET_ZONE);
    let dim = raster.get_dim() as u32;
    image::save_buffer(path, raster.pixels(), dim, dim, image::ColorType::L8).unwrap()
}


//  ************************************************************

fn invalid_exit(msg: &str) -> ! {
    let err = Error::with_description(msg, ErrorKind::InvalidValue);
    err.exit()
}
