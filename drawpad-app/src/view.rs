//! [`PadView`] over the widget's DOM.

use std::cell::RefCell;
use std::rc::Rc;

use drawpad_core::{
    LineShape, PadView, Placement, Size, Tool, LAYER_ATTRIBUTE, SELECTED_ATTRIBUTE,
};
use js_sys::Function;
use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::builder::PadElements;
use crate::dom::{px, set_flag, set_style, swap_siblings};

/// Shared slot for the host's tool-styling callback.
pub type StylingHook = Rc<RefCell<Option<Function>>>;

/// The widget's DOM, driven by the pad.
#[derive(Debug)]
pub struct DomView {
    document: Document,
    elements: PadElements,
    styling_hook: StylingHook,
}

impl DomView {
    /// Wrap built elements.
    #[must_use]
    pub fn new(document: Document, elements: PadElements, styling_hook: StylingHook) -> Self {
        Self {
            document,
            elements,
            styling_hook,
        }
    }

    /// The elements this view drives.
    #[must_use]
    pub fn elements(&self) -> &PadElements {
        &self.elements
    }
}

impl PadView for DomView {
    fn easel_size(&self) -> Size {
        let rect = self.elements.easel.get_bounding_client_rect();
        Size::new(rect.width(), rect.height())
    }

    fn apply_placement(&mut self, placement: &Placement) {
        let e = &self.elements;
        let width = px(placement.container.width);
        let height = px(placement.container.height);

        set_style(&e.canvas, "width", &width);
        set_style(&e.canvas, "height", &height);
        set_style(&e.canvas_container, "width", &width);
        set_style(&e.canvas_container, "height", &height);
        set_style(&e.canvas_container, "left", &px(placement.left));
        set_style(&e.canvas_container, "top", &px(placement.top));
    }

    fn show_tool(&mut self, tool: Tool) {
        for (t, button) in &self.elements.tool_buttons {
            set_flag(button, SELECTED_ATTRIBUTE, *t == tool);
        }
    }

    fn show_shape(&mut self, shape: LineShape) {
        for (s, button) in &self.elements.shape_buttons {
            set_flag(button, SELECTED_ATTRIBUTE, *s == shape);
        }
    }

    fn show_layer(&mut self, position: usize) {
        for (i, layer) in self.elements.layers.iter().enumerate() {
            set_flag(&layer.container, SELECTED_ATTRIBUTE, i == position);
        }
    }

    fn swap_layers(&mut self, a: usize, b: usize) {
        let layers = &mut self.elements.layers;
        let (Some(first), Some(second)) = (layers.get(a), layers.get(b)) else {
            tracing::warn!("Cannot swap layer nodes {} and {}", a, b);
            return;
        };
        if let Err(err) = swap_siblings(&self.document, &first.container, &second.container) {
            tracing::warn!("Failed to swap layer nodes: {err}");
            return;
        }
        layers.swap(a, b);

        for (position, layer) in layers.iter().enumerate() {
            if let Err(e) = layer
                .canvas
                .set_attribute(LAYER_ATTRIBUTE, &position.to_string())
            {
                tracing::warn!("Failed to retag layer {}: {:?}", position, e);
            }
        }
    }

    fn show_opacity(&mut self, opacity: f64) {
        self.elements.opacity.set_value(&opacity.to_string());
    }

    fn show_undo_state(&mut self, can_undo: bool, can_redo: bool) {
        self.elements.undo_button.set_disabled(!can_undo);
        self.elements.redo_button.set_disabled(!can_redo);
    }

    fn show_line_width(&mut self, width: u32) {
        self.elements.width_input.set_value(&width.to_string());
    }

    fn show_color(&mut self, hex: &str) {
        self.elements.color_input.set_value(hex);
    }

    fn show_cursor(&mut self, x: i64, y: i64) {
        self.elements
            .cursor_position
            .set_text_content(Some(&format!("{x},{y}")));
    }

    fn show_info(&mut self, visible: bool) {
        set_style(&self.elements.info, "display", if visible { "" } else { "none" });
    }

    fn styling_changed(&mut self) {
        let hook = self.styling_hook.borrow().clone();
        if let Some(hook) = hook {
            if let Err(e) = hook.call0(&JsValue::NULL) {
                tracing::warn!("Tool styling callback failed: {:?}", e);
            }
        }
    }
}
