//! Binding to the page's JavaScript `CanvasDrawer` engine.
//!
//! The engine owns pixel buffers, the undo stack and pointer handling. We
//! import it through `wasm-bindgen`, wrap it as a [`DrawingEngine`], and turn
//! its callbacks into [`EngineEvent`]s.

use drawpad_core::config::clamp_line_width;
use drawpad_core::{
    ActionData, DrawingEngine, EngineEvent, LineShape, Point, PointerAction, Tool, PNG_MIME,
};
use js_sys::{Array, Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

use crate::error::{AppError, AppResult};

#[wasm_bindgen]
extern "C" {
    /// The external drawing engine.
    #[derive(Debug, Clone)]
    pub type CanvasDrawer;

    #[wasm_bindgen(catch, constructor, js_class = "CanvasDrawer")]
    fn new() -> Result<CanvasDrawer, JsValue>;

    #[wasm_bindgen(method, js_name = Attach)]
    fn attach(this: &CanvasDrawer, canvas: &HtmlCanvasElement, layers: &Array, max_undos: u32);

    #[wasm_bindgen(method, js_name = Redraw)]
    fn redraw(this: &CanvasDrawer);

    #[wasm_bindgen(method, js_name = Undo)]
    fn undo(this: &CanvasDrawer);

    #[wasm_bindgen(method, js_name = Redo)]
    fn redo(this: &CanvasDrawer);

    #[wasm_bindgen(method, js_name = CanUndo)]
    fn can_undo(this: &CanvasDrawer) -> bool;

    #[wasm_bindgen(method, js_name = CanRedo)]
    fn can_redo(this: &CanvasDrawer) -> bool;

    #[wasm_bindgen(method, js_name = ClearLayer)]
    fn clear_layer(this: &CanvasDrawer);

    #[wasm_bindgen(method, js_name = CurrentLayerIndex)]
    fn current_layer_index(this: &CanvasDrawer) -> f64;

    #[wasm_bindgen(method, js_name = GetCurrentLayer)]
    fn get_current_layer(this: &CanvasDrawer) -> JsValue;

    #[wasm_bindgen(method, getter)]
    fn buffers(this: &CanvasDrawer) -> Array;

    #[wasm_bindgen(method, setter = currentLayer)]
    fn set_current_layer(this: &CanvasDrawer, index: f64);

    #[wasm_bindgen(method, getter = currentTool)]
    fn current_tool(this: &CanvasDrawer) -> String;

    #[wasm_bindgen(method, setter = currentTool)]
    fn set_current_tool(this: &CanvasDrawer, tool: &str);

    #[wasm_bindgen(method, getter)]
    fn color(this: &CanvasDrawer) -> String;

    #[wasm_bindgen(method, setter)]
    fn set_color(this: &CanvasDrawer, color: &str);

    #[wasm_bindgen(method, getter = lineWidth)]
    fn line_width(this: &CanvasDrawer) -> f64;

    #[wasm_bindgen(method, setter = lineWidth)]
    fn set_line_width(this: &CanvasDrawer, width: f64);

    #[wasm_bindgen(method, setter = lineShape)]
    fn set_line_shape(this: &CanvasDrawer, shape: &str);

    #[wasm_bindgen(method, setter = WheelZoom)]
    fn set_wheel_zoom(this: &CanvasDrawer, zoom: f64);

    #[wasm_bindgen(method, setter = OnUndoStateChange)]
    fn set_on_undo_state_change(this: &CanvasDrawer, hook: &Function);

    #[wasm_bindgen(method, setter = OnLayerChange)]
    fn set_on_layer_change(this: &CanvasDrawer, hook: &Function);

    #[wasm_bindgen(method, setter = OnColorChange)]
    fn set_on_color_change(this: &CanvasDrawer, hook: &Function);

    #[wasm_bindgen(method, getter = OnAction)]
    fn on_action(this: &CanvasDrawer) -> JsValue;

    #[wasm_bindgen(method, setter = OnAction)]
    fn set_on_action(this: &CanvasDrawer, hook: &JsValue);
}

/// Convert a JavaScript index to `usize`; negative or non-finite values map to 0.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn js_index(value: f64) -> usize {
    if value.is_finite() && value > 0.0 {
        value as usize
    } else {
        0
    }
}

/// A layer index reported by the engine, if it is a whole non-negative number.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn checked_layer_index(value: f64) -> Option<usize> {
    (value.is_finite() && value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX))
        .then(|| value as usize)
}

/// Convert a `usize` to a JavaScript number.
#[allow(clippy::cast_precision_loss)]
fn js_number(value: usize) -> f64 {
    value as f64
}

/// Numeric field of a JavaScript object; numeric strings are accepted.
fn number_field(object: &JsValue, field: &str) -> Option<f64> {
    let value = Reflect::get(object, &JsValue::from_str(field)).ok()?;
    value
        .as_f64()
        .or_else(|| value.as_string().and_then(|s| s.trim().parse().ok()))
}

/// A `CanvasDrawer` attached to a pad's canvas and layer canvases.
#[derive(Debug, Clone)]
pub struct JsEngine {
    drawer: CanvasDrawer,
    canvas: HtmlCanvasElement,
    layer_count: usize,
}

impl JsEngine {
    /// Create an engine and attach it to `canvas` drawing into `layers`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::EngineMissing`] when `CanvasDrawer` is not defined.
    pub fn attach(
        canvas: &HtmlCanvasElement,
        layers: &[HtmlCanvasElement],
        max_undos: u32,
        wheel_zoom: i32,
    ) -> AppResult<Self> {
        let drawer = CanvasDrawer::new().map_err(|e| {
            tracing::error!("Could not create CanvasDrawer: {:?}", e);
            AppError::EngineMissing
        })?;
        drawer.set_wheel_zoom(f64::from(wheel_zoom));

        let handles: Array = layers.iter().collect();
        drawer.attach(canvas, &handles, max_undos);
        tracing::debug!("Attached CanvasDrawer to {} layers", layers.len());

        Ok(Self {
            drawer,
            canvas: canvas.clone(),
            layer_count: layers.len(),
        })
    }

    /// The underlying JavaScript engine.
    #[must_use]
    pub fn drawer(&self) -> &CanvasDrawer {
        &self.drawer
    }
}

impl DrawingEngine for JsEngine {
    fn redraw(&mut self) {
        self.drawer.redraw();
    }

    fn undo(&mut self) {
        self.drawer.undo();
    }

    fn redo(&mut self) {
        self.drawer.redo();
    }

    fn can_undo(&self) -> bool {
        self.drawer.can_undo()
    }

    fn can_redo(&self) -> bool {
        self.drawer.can_redo()
    }

    fn clear_layer(&mut self) {
        self.drawer.clear_layer();
    }

    fn layer_count(&self) -> usize {
        self.layer_count
    }

    fn current_layer_index(&self) -> usize {
        js_index(self.drawer.current_layer_index())
    }

    fn set_current_layer_index(&mut self, index: usize) {
        self.drawer.set_current_layer(js_number(index));
    }

    fn current_layer_opacity(&self) -> f64 {
        number_field(&self.drawer.get_current_layer(), "opacity").unwrap_or(1.0)
    }

    fn set_current_layer_opacity(&mut self, opacity: f64) {
        let layer = self.drawer.get_current_layer();
        if let Err(e) = Reflect::set(&layer, &"opacity".into(), &opacity.into()) {
            tracing::warn!("Failed to set layer opacity: {:?}", e);
        }
    }

    fn swap_buffers(&mut self, a: usize, b: usize) {
        let (Ok(a), Ok(b)) = (u32::try_from(a), u32::try_from(b)) else {
            return;
        };
        let buffers = self.drawer.buffers();
        let first = buffers.get(a);
        buffers.set(a, buffers.get(b));
        buffers.set(b, first);
    }

    fn current_tool(&self) -> Tool {
        let id = self.drawer.current_tool();
        id.parse().unwrap_or_else(|err| {
            tracing::warn!("Engine reports {err}, assuming freehand");
            Tool::Freehand
        })
    }

    fn set_current_tool(&mut self, tool: Tool) {
        self.drawer.set_current_tool(tool.id());
    }

    fn color(&self) -> String {
        self.drawer.color()
    }

    fn set_color(&mut self, color: &str) {
        self.drawer.set_color(color);
    }

    #[allow(clippy::cast_possible_truncation)]
    fn line_width(&self) -> u32 {
        let width = self.drawer.line_width();
        if width.is_finite() {
            clamp_line_width(width.round() as i64)
        } else {
            clamp_line_width(0)
        }
    }

    fn set_line_width(&mut self, width: u32) {
        self.drawer.set_line_width(f64::from(width));
    }

    fn set_line_shape(&mut self, shape: LineShape) {
        self.drawer.set_line_shape(shape.id());
    }

    fn png_data_url(&self) -> Option<String> {
        match self.canvas.to_data_url_with_type(PNG_MIME) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!("Failed to encode canvas: {:?}", e);
                None
            }
        }
    }
}

// ============================================================================
// Pointer actions
// ============================================================================

/// Bit values of the engine's `CursorActions` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionBits {
    /// First event of a drag.
    pub start: u32,
    /// Pan drag.
    pub pan: u32,
    /// Wheel or pinch zoom.
    pub zoom: u32,
}

impl Default for ActionBits {
    fn default() -> Self {
        Self {
            start: 1,
            pan: 2,
            zoom: 4,
        }
    }
}

impl ActionBits {
    /// Read the flags from the page's global `CursorActions`, falling back to
    /// the defaults for anything missing.
    #[must_use]
    pub fn from_global() -> Self {
        let defaults = Self::default();
        let Ok(flags) = Reflect::get(&js_sys::global(), &"CursorActions".into()) else {
            return defaults;
        };
        if flags.is_undefined() || flags.is_null() {
            tracing::debug!("No global CursorActions, using default action bits");
            return defaults;
        }
        let read = |name: &str, fallback: u32| {
            number_field(&flags, name)
                .and_then(|v| u32::try_from(js_index(v)).ok())
                .unwrap_or(fallback)
        };
        Self {
            start: read("Start", defaults.start),
            pan: read("Pan", defaults.pan),
            zoom: read("Zoom", defaults.zoom),
        }
    }

    /// Classify an action bitmask. The pan and zoom bits are independent, so
    /// one payload may carry both; the pan comes first.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn decode(self, action: u32, zoom_delta: f64) -> Vec<PointerAction> {
        let mut actions = Vec::with_capacity(2);
        if action & self.pan != 0 {
            actions.push(if action & self.start != 0 {
                PointerAction::PanStart
            } else {
                PointerAction::Pan
            });
        }
        if action & self.zoom != 0 {
            let delta = if zoom_delta.is_finite() {
                zoom_delta.round().clamp(-64.0, 64.0) as i32
            } else {
                0
            };
            actions.push(PointerAction::Zoom { delta });
        }
        if actions.is_empty() {
            actions.push(PointerAction::Other);
        }
        actions
    }

    /// Read an engine action payload (`action`, `x`, `y`, `realX`, `realY`, `zoomDelta`).
    #[must_use]
    pub fn read(self, data: &JsValue) -> Vec<ActionData> {
        let field = |name: &str| number_field(data, name).unwrap_or(0.0);
        let action = u32::try_from(js_index(field("action"))).unwrap_or(0);
        let canvas = Point::new(field("x"), field("y"));
        let real = Point::new(field("realX"), field("realY"));
        self.decode(action, field("zoomDelta"))
            .into_iter()
            .map(|action| ActionData {
                action,
                canvas,
                real,
            })
            .collect()
    }
}

// ============================================================================
// Hooks
// ============================================================================

/// Engine callbacks installed for one pad. Dropping restores the engine's
/// previous action handler and silences the rest.
pub struct EngineHooks {
    drawer: CanvasDrawer,
    previous_action: JsValue,
    _undo_state: Closure<dyn FnMut()>,
    _layer: Closure<dyn FnMut(JsValue)>,
    _color: Closure<dyn FnMut(JsValue)>,
    _action: Closure<dyn FnMut(JsValue, JsValue)>,
}

impl EngineHooks {
    /// Route the engine's callbacks to `sink`.
    ///
    /// The engine's existing action handler keeps running after ours.
    pub fn install<S>(engine: &JsEngine, bits: ActionBits, sink: S) -> Self
    where
        S: Fn(EngineEvent) + Clone + 'static,
    {
        let drawer = engine.drawer().clone();

        let emit = sink.clone();
        let undo_state = Closure::<dyn FnMut()>::new(move || emit(EngineEvent::UndoStateChanged));
        drawer.set_on_undo_state_change(undo_state.as_ref().unchecked_ref());

        let emit = sink.clone();
        let layer = Closure::<dyn FnMut(JsValue)>::new(move |index: JsValue| {
            match index.as_f64().and_then(checked_layer_index) {
                Some(layer) => emit(EngineEvent::LayerChanged { layer }),
                None => tracing::warn!("Ignoring malformed layer index from engine: {:?}", index),
            }
        });
        drawer.set_on_layer_change(layer.as_ref().unchecked_ref());

        let emit = sink.clone();
        let color = Closure::<dyn FnMut(JsValue)>::new(move |color: JsValue| {
            if let Some(color) = color.as_string() {
                emit(EngineEvent::ColorChanged { color });
            }
        });
        drawer.set_on_color_change(color.as_ref().unchecked_ref());

        let previous_action = drawer.on_action();
        let previous = previous_action.dyn_ref::<Function>().cloned();
        let action = Closure::<dyn FnMut(JsValue, JsValue)>::new(
            move |data: JsValue, context: JsValue| {
                for action in bits.read(&data) {
                    sink(EngineEvent::Action(action));
                }
                if let Some(previous) = &previous {
                    if let Err(e) = previous.call2(&JsValue::NULL, &data, &context) {
                        tracing::warn!("Previous action handler failed: {:?}", e);
                    }
                }
            },
        );
        drawer.set_on_action(action.as_ref());

        Self {
            drawer,
            previous_action,
            _undo_state: undo_state,
            _layer: layer,
            _color: color,
            _action: action,
        }
    }
}

impl Drop for EngineHooks {
    fn drop(&mut self) {
        let noop = Function::new_no_args("");
        self.drawer.set_on_undo_state_change(&noop);
        self.drawer.set_on_layer_change(&noop);
        self.drawer.set_on_color_change(&noop);
        self.drawer.set_on_action(&self.previous_action);
    }
}

impl std::fmt::Debug for EngineHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineHooks").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pan_start_and_continue() {
        let bits = ActionBits::default();
        assert_eq!(
            bits.decode(bits.pan | bits.start, 0.0),
            vec![PointerAction::PanStart]
        );
        assert_eq!(bits.decode(bits.pan, 0.0), vec![PointerAction::Pan]);
    }

    #[test]
    fn zoom_carries_rounded_delta() {
        let bits = ActionBits::default();
        assert_eq!(
            bits.decode(bits.zoom, -1.0),
            vec![PointerAction::Zoom { delta: -1 }]
        );
        assert_eq!(
            bits.decode(bits.zoom, 2.4),
            vec![PointerAction::Zoom { delta: 2 }]
        );
        assert_eq!(
            bits.decode(bits.zoom, f64::NAN),
            vec![PointerAction::Zoom { delta: 0 }]
        );
    }

    #[test]
    fn pan_and_zoom_both_apply() {
        let bits = ActionBits::default();
        assert_eq!(
            bits.decode(bits.pan | bits.zoom, 1.0),
            vec![PointerAction::Pan, PointerAction::Zoom { delta: 1 }]
        );
    }

    #[test]
    fn drawing_actions_are_other() {
        let bits = ActionBits::default();
        assert_eq!(bits.decode(0, 0.0), vec![PointerAction::Other]);
        assert_eq!(bits.decode(bits.start, 0.0), vec![PointerAction::Other]);
    }

    #[test]
    fn custom_bit_layout() {
        let bits = ActionBits {
            start: 16,
            pan: 1,
            zoom: 8,
        };
        assert_eq!(bits.decode(17, 0.0), vec![PointerAction::PanStart]);
        assert_eq!(bits.decode(8, 3.0), vec![PointerAction::Zoom { delta: 3 }]);
        assert_eq!(bits.decode(2, 0.0), vec![PointerAction::Other]);
    }

    #[test]
    fn layer_index_must_be_whole_and_non_negative() {
        assert_eq!(checked_layer_index(0.0), Some(0));
        assert_eq!(checked_layer_index(3.0), Some(3));
        assert_eq!(checked_layer_index(-1.0), None);
        assert_eq!(checked_layer_index(1.5), None);
        assert_eq!(checked_layer_index(f64::NAN), None);
        assert_eq!(checked_layer_index(f64::INFINITY), None);
    }

    #[test]
    fn js_index_rejects_negative_and_nan() {
        assert_eq!(js_index(3.0), 3);
        assert_eq!(js_index(-1.0), 0);
        assert_eq!(js_index(f64::NAN), 0);
    }
}
