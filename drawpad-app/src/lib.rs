//! # Drawpad WASM Widget
//!
//! Browser shell for the drawing pad: builds the DOM, binds the page's
//! `CanvasDrawer` engine, and routes DOM and engine events into
//! [`drawpad_core::DrawPad`].
//!
//! ## Usage
//!
//! Build for WASM:
//! ```bash
//! wasm-pack build --target web drawpad-app
//! ```
//!
//! Then, with the `CanvasDrawer` script loaded on the page:
//! ```javascript
//! import init, { PadStyleSheet, DrawPadWidget } from './pkg/drawpad_app.js';
//!
//! await init();
//! const styles = new PadStyleSheet();
//! const pad = new DrawPadWidget(styles, JSON.stringify({ layer_count: 4 }));
//! document.getElementById('host').appendChild(pad.generate());
//! pad.refreshLocation();
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod builder;
mod dom;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod listeners;
pub mod overlay;
pub mod view;
pub mod widget;

pub use engine::{ActionBits, CanvasDrawer, EngineHooks, JsEngine};
pub use error::{AppError, AppResult};
pub use widget::{DrawPadWidget, PadStyleSheet};

use wasm_bindgen::prelude::*;

/// Initialize the WASM module: panic reporting and console logging.
#[wasm_bindgen(start)]
pub fn init_wasm() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    tracing::info!("Drawpad WASM initialized");
}
