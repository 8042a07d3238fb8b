//! The drawing engine collaborator.
//!
//! The engine owns the pixel buffers, the undo stack, and the active drawing
//! parameters. The pad drives it through [`DrawingEngine`] and listens to it
//! through [`EngineEvent`]s.

use serde::{Deserialize, Serialize};

use crate::{LineShape, Point, Tool};

/// Operations the pad needs from a drawing engine.
pub trait DrawingEngine {
    /// Composite all layers into the visible canvas.
    fn redraw(&mut self);

    /// Step back one undo state.
    fn undo(&mut self);

    /// Step forward one undo state.
    fn redo(&mut self);

    /// Whether an undo step is available.
    fn can_undo(&self) -> bool;

    /// Whether a redo step is available.
    fn can_redo(&self) -> bool;

    /// Clear the current layer.
    fn clear_layer(&mut self);

    /// Number of layer buffers.
    fn layer_count(&self) -> usize;

    /// Index of the layer strokes go to.
    fn current_layer_index(&self) -> usize;

    /// Make `index` the layer strokes go to.
    fn set_current_layer_index(&mut self, index: usize);

    /// Opacity of the current layer, in `[0, 1]`.
    fn current_layer_opacity(&self) -> f64;

    /// Set the current layer's opacity.
    fn set_current_layer_opacity(&mut self, opacity: f64);

    /// Exchange the buffers (pixels and opacity) at `a` and `b`.
    fn swap_buffers(&mut self, a: usize, b: usize);

    /// Active tool.
    fn current_tool(&self) -> Tool;

    /// Change the active tool.
    fn set_current_tool(&mut self, tool: Tool);

    /// Active color as the engine reports it (hex or `rgb()`).
    fn color(&self) -> String;

    /// Change the active color.
    fn set_color(&mut self, color: &str);

    /// Active brush width.
    fn line_width(&self) -> u32;

    /// Change the brush width.
    fn set_line_width(&mut self, width: u32);

    /// Change the brush shape.
    fn set_line_shape(&mut self, shape: LineShape);

    /// The composited canvas as a PNG data URL, if it can be encoded.
    fn png_data_url(&self) -> Option<String>;
}

/// What a pointer action asks the pad to do with the view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointerAction {
    /// A pan drag began.
    PanStart,
    /// A pan drag moved.
    Pan,
    /// Zoom by `delta` levels around the pointer.
    Zoom {
        /// Zoom level change.
        delta: i32,
    },
    /// Drawing or anything else the view does not react to.
    Other,
}

/// A pointer action reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionData {
    /// What happened.
    pub action: PointerAction,
    /// Pointer position in canvas pixels.
    pub canvas: Point,
    /// Pointer position relative to the easel, unaffected by zoom.
    pub real: Point,
}

/// Notifications from the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EngineEvent {
    /// Undo or redo availability may have changed.
    UndoStateChanged,
    /// The engine switched to another layer.
    LayerChanged {
        /// New layer index.
        layer: usize,
    },
    /// The engine's color changed (for example via the dropper).
    ColorChanged {
        /// Color as the engine reports it.
        color: String,
    },
    /// A pointer action happened on the canvas.
    Action(ActionData),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_tagged() {
        let event = EngineEvent::LayerChanged { layer: 2 };
        let json = serde_json::to_string(&event).expect("serialize");
        assert_eq!(json, r#"{"event":"layer_changed","layer":2}"#);
    }

    #[test]
    fn zoom_action_carries_delta() {
        let action = PointerAction::Zoom { delta: -1 };
        let json = serde_json::to_string(&action).expect("serialize");
        assert_eq!(json, r#"{"kind":"zoom","delta":-1}"#);
        let back: PointerAction = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, action);
    }
}
