//! Shared pad state and the DOM event handlers that drive it.
//!
//! Engine callbacks may fire while a handler still holds the pad, so engine
//! events go through a queue that is drained once the pad is free again.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use drawpad_core::{
    export_file_name, unix_seconds_from_millis, DrawPad, DrawingEngine, EngineEvent,
    IncomingMessage, KeyTarget, PadStyles, HELP_TEXT,
};
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlElement, KeyboardEvent, MessageEvent, Window,
};

use crate::builder::PadElements;
use crate::engine::JsEngine;
use crate::error::AppResult;
use crate::listeners::ListenerSet;
use crate::overlay;
use crate::view::DomView;

/// A pad bound to the browser.
pub type Pad = DrawPad<JsEngine, DomView>;

/// The pad plus engine events waiting to be delivered to it.
pub struct PadCell {
    pad: RefCell<Pad>,
    events: RefCell<VecDeque<EngineEvent>>,
}

impl PadCell {
    /// Share `pad`.
    #[must_use]
    pub fn new(pad: Pad) -> Rc<Self> {
        Rc::new(Self {
            pad: RefCell::new(pad),
            events: RefCell::new(VecDeque::new()),
        })
    }

    /// Run `f` on the pad, then deliver any engine events it caused.
    ///
    /// Returns `None` when another handler holds the pad.
    pub fn with<R>(&self, f: impl FnOnce(&mut Pad) -> R) -> Option<R> {
        let result = {
            let Ok(mut pad) = self.pad.try_borrow_mut() else {
                tracing::warn!("Drawing pad is busy, ignoring re-entrant call");
                return None;
            };
            f(&mut pad)
        };
        self.drain();
        Some(result)
    }

    /// Queue an engine event and deliver it if the pad is free.
    pub fn push(&self, event: EngineEvent) {
        self.events.borrow_mut().push_back(event);
        self.drain();
    }

    fn drain(&self) {
        loop {
            let Ok(mut pad) = self.pad.try_borrow_mut() else {
                return;
            };
            let Some(event) = self.events.borrow_mut().pop_front() else {
                return;
            };
            tracing::trace!("Delivering engine event {:?}", event);
            pad.handle_engine_event(event);
        }
    }
}

impl std::fmt::Debug for PadCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PadCell")
            .field("pending", &self.events.borrow().len())
            .finish_non_exhaustive()
    }
}

fn run<R>(cell: &Weak<PadCell>, f: impl FnOnce(&mut Pad) -> R) -> Option<R> {
    cell.upgrade()?.with(f)
}

/// Install every DOM listener the pad needs.
///
/// # Errors
///
/// Returns an error if a listener cannot be installed.
#[allow(clippy::too_many_lines)]
pub fn wire(
    cell: &Rc<PadCell>,
    window: &Window,
    document: &Document,
    e: &PadElements,
    styles: &PadStyles,
) -> AppResult<ListenerSet> {
    let mut set = ListenerSet::new();
    let weak = Rc::downgrade(cell);

    set.on(&e.easel, "contextmenu", |event: Event| event.prevent_default())?;

    // Color
    {
        let cell = weak.clone();
        let input = e.color_input.clone();
        set.on(&e.color_input, "change", move |_| {
            let value = input.value();
            if let Some(Err(err)) = run(&cell, |pad| pad.set_color(&value)) {
                tracing::warn!("Ignoring color input: {err}");
            }
        })?;
    }
    {
        let cell = weak.clone();
        let input = e.color_input.clone();
        let document = document.clone();
        set.on(&e.hsv_button, "click", move |_| {
            let cell = cell.clone();
            let picked = overlay::color_picker(&document, &input, move |hex| {
                if let Some(Err(err)) = run(&cell, |pad| pad.set_color(hex)) {
                    tracing::warn!("Ignoring picked color: {err}");
                }
            });
            if let Err(err) = picked {
                tracing::warn!("Could not open color picker: {err}");
            }
        })?;
    }

    // Width
    {
        let cell = weak.clone();
        let input = e.width_input.clone();
        set.on(&e.width_input, "change", move |_| {
            let width = input.value().trim().parse::<f64>().ok().filter(|w| w.is_finite());
            run(&cell, |pad| match width {
                #[allow(clippy::cast_possible_truncation)]
                Some(width) => pad.set_line_width(width.round() as i64),
                None => pad.step_line_width(0),
            });
        })?;
    }
    for (button, delta) in [(&e.width_down, -1), (&e.width_up, 1)] {
        let cell = weak.clone();
        set.on(button, "click", move |_| {
            run(&cell, |pad| pad.step_line_width(delta));
        })?;
    }

    // Shapes and tools
    for (shape, button) in &e.shape_buttons {
        let cell = weak.clone();
        let shape = *shape;
        set.on(button, "click", move |_| {
            run(&cell, |pad| pad.select_shape(shape));
        })?;
    }
    for (tool, button) in &e.tool_buttons {
        let cell = weak.clone();
        let tool = *tool;
        set.on(button, "click", move |_| {
            run(&cell, |pad| pad.select_tool(tool));
        })?;
    }
    {
        let cell = weak.clone();
        set.on(&e.clear_button, "click", move |_| {
            run(&cell, Pad::clear_layer);
        })?;
    }

    // Actions
    let simple: [(&HtmlButtonElement, fn(&mut Pad)); 5] = [
        (&e.undo_button, Pad::undo),
        (&e.redo_button, Pad::redo),
        (&e.zoom_out_button, |pad| {
            pad.update_zoom(-1, None);
        }),
        (&e.zoom_in_button, |pad| {
            pad.update_zoom(1, None);
        }),
        (&e.recenter_button, Pad::reset_navigation),
    ];
    for (button, action) in simple {
        let cell = weak.clone();
        set.on(button, "click", move |_| {
            run(&cell, action);
        })?;
    }
    {
        let document = document.clone();
        let container = e.container.clone();
        set.on(&e.fullscreen_button, "click", move |_| {
            toggle_fullscreen(&document, &container);
        })?;
    }

    // Layers
    for layer in &e.layers {
        let cell = weak.clone();
        let canvas = layer.canvas.clone();
        set.on(&layer.canvas, "click", move |_| {
            let tag = canvas.get_attribute(drawpad_core::LAYER_ATTRIBUTE);
            // Failures are logged by the pad
            let _ = run(&cell, |pad| pad.select_layer(tag.as_deref()));
        })?;
    }
    for (button, left) in [(&e.shift_left, true), (&e.shift_right, false)] {
        let cell = weak.clone();
        set.on(button, "click", move |_| {
            let shifted = run(&cell, |pad| {
                if left {
                    pad.shift_layer_left()
                } else {
                    pad.shift_layer_right()
                }
            });
            if let Some(Err(err)) = shifted {
                tracing::warn!("Could not shift layer: {err}");
            }
        })?;
    }
    {
        let cell = weak.clone();
        let input = e.opacity.clone();
        set.on(&e.opacity, "input", move |_| {
            if let Ok(opacity) = input.value().parse::<f64>() {
                run(&cell, |pad| pad.set_layer_opacity(opacity));
            }
        })?;
    }

    // Links
    {
        let cell = weak.clone();
        let link = e.download.clone();
        set.on(&e.download, "click", move |_| {
            let Some(Some(url)) = run(&cell, |pad| pad.engine().png_data_url()) else {
                return;
            };
            link.set_href(&url);
            link.set_download(&export_file_name(unix_seconds_from_millis(
                js_sys::Date::now(),
            )));
        })?;
    }
    {
        let document = document.clone();
        set.on(&e.help, "click", move |event: Event| {
            event.prevent_default();
            if let Err(err) = overlay::alert_text(&document, HELP_TEXT) {
                tracing::warn!("Could not show help: {err}");
            }
        })?;
    }

    // Keyboard
    {
        let cell = weak.clone();
        set.on(&e.container, "keydown", move |event: Event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                let ctrl = key.ctrl_key();
                run(&cell, |pad| pad.handle_key_down(ctrl));
            }
        })?;
    }
    {
        let cell = weak.clone();
        set.on(&e.container, "keyup", move |_| {
            run(&cell, Pad::handle_key_up);
        })?;
    }
    {
        let cell = weak.clone();
        let controls = format!(".{}", styles.controls);
        set.on(&e.container, "keypress", move |event: Event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let target = key_target(&event, &controls);
            let typed = key.key();
            tracing::debug!("Drawing pad keypress: {}", typed);
            if run(&cell, |pad| pad.handle_shortcut(&typed, target)) == Some(true) {
                event.prevent_default();
            }
        })?;
    }

    // Window
    {
        let cell = weak.clone();
        set.on(window, "resize", move |_| {
            run(&cell, Pad::refresh_location);
        })?;
    }
    {
        let cell = weak;
        set.on(window, "message", move |event: Event| {
            if let Some(message) = event.dyn_ref::<MessageEvent>() {
                answer_message(&cell, message);
            }
        })?;
    }

    tracing::debug!("Installed {} listeners", set.len());
    Ok(set)
}

fn key_target(event: &Event, controls: &str) -> KeyTarget {
    let Some(element) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return KeyTarget::default();
    };
    KeyTarget {
        inside_controls: matches!(element.closest(controls), Ok(Some(_))),
        is_input: element.tag_name().eq_ignore_ascii_case("input"),
    }
}

fn answer_message(cell: &Weak<PadCell>, event: &MessageEvent) {
    let Some(json) = js_sys::JSON::stringify(&event.data())
        .ok()
        .and_then(|s| s.as_string())
    else {
        return;
    };
    let Some(message) = IncomingMessage::from_json(&json) else {
        return;
    };
    let Some(reply) = run(cell, |pad| pad.handle_message(message)).flatten() else {
        return;
    };

    let Some(source) = event.source().and_then(|s| s.dyn_into::<Window>().ok()) else {
        tracing::warn!("Message has no window to reply to");
        return;
    };
    let payload = match serde_json::to_string(&reply) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!("Failed to serialize reply: {err}");
            return;
        }
    };
    let posted = js_sys::JSON::parse(&payload).and_then(|value| source.post_message(&value, "*"));
    if let Err(e) = posted {
        tracing::warn!("Failed to post reply: {:?}", e);
    }
}

fn toggle_fullscreen(document: &Document, container: &HtmlElement) {
    if document.fullscreen_element().is_some() {
        document.exit_fullscreen();
    } else if let Err(e) = container.request_fullscreen() {
        tracing::warn!("Fullscreen request failed: {:?}", e);
    }
}
