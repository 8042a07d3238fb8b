//! # Drawpad Core
//!
//! Target-independent logic for an embeddable layered drawing pad.
//! Compiles to WASM; the browser shell lives in `drawpad-app`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                  DrawPad                    │
//! ├──────────────────────┬──────────────────────┤
//! │  Navigation          │  Layer Panel         │
//! │  - Pan offset        │  - Canvas order      │
//! │  - Zoom 2^n          │  - Selection         │
//! │  - Anchored zoom     │  - Swap / shift      │
//! ├──────────────────────┼──────────────────────┤
//! │  Tools & Shortcuts   │  Colors              │
//! │  - Exclusive groups  │  - Hex / rgb()       │
//! │  - Ctrl dropper      │  - HSV picker        │
//! ├──────────────────────┴──────────────────────┤
//! │  DrawingEngine trait  │  PadView trait      │
//! └─────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod keys;
pub mod layers;
pub mod message;
pub mod navigation;
pub mod pad;
pub mod picker;
pub mod selection;
pub mod styles;
pub mod tool;
pub mod view;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use color::{normalize_color, Hsv, Rgb};
pub use config::{PadConfig, MAX_LINE_WIDTH, MIN_LINE_WIDTH};
pub use engine::{ActionData, DrawingEngine, EngineEvent, PointerAction};
pub use error::{PadError, PadResult};
pub use export::{export_file_name, unix_seconds_from_millis, PNG_MIME};
pub use keys::{KeyTarget, Shortcut, HELP_TEXT};
pub use layers::{
    layer_title, parse_layer_tag, LayerId, LayerPanel, LAYER_ATTRIBUTE, SELECTED_ATTRIBUTE,
};
pub use message::{IncomingMessage, OutgoingMessage};
pub use navigation::{Navigation, Placement, Point, Size};
pub use pad::{DrawPad, PadId};
pub use picker::{ColorPicker, HsvChannel, SLIDER_STEP};
pub use selection::ExclusiveGroup;
pub use styles::PadStyles;
pub use tool::{LineShape, Tool, ToolSwitcher};
pub use view::PadView;

/// Drawpad core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
