//! WebAssembly bindings for drawpad-core.
//!
//! Exposes the color conversions to JavaScript for hosts that build their
//! own pickers.

use wasm_bindgen::prelude::*;

use crate::{Hsv, Rgb};

/// Convert HSV (each in `[0, 1]`) to a `#rrggbb` string.
#[wasm_bindgen(js_name = hsvToHex)]
#[must_use]
pub fn hsv_to_hex(h: f64, s: f64, v: f64) -> String {
    Hsv::new(h, s, v).to_rgb().to_hex()
}

/// Convert a color string to `[h, s, v]`.
///
/// # Errors
///
/// Returns an error string if the color does not parse.
#[wasm_bindgen(js_name = colorToHsv)]
pub fn color_to_hsv(color: &str) -> Result<Vec<f64>, String> {
    let rgb: Rgb = color.parse().map_err(|e: crate::PadError| e.to_string())?;
    let hsv = rgb.to_hsv();
    Ok(vec![hsv.h, hsv.s, hsv.v])
}

/// Normalise a color string to `#rrggbb`.
///
/// # Errors
///
/// Returns an error string if the color does not parse.
#[wasm_bindgen(js_name = normalizeColor)]
pub fn normalize_color(color: &str) -> Result<String, String> {
    crate::normalize_color(color).map_err(|e| e.to_string())
}
