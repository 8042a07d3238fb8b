//! Modal overlays: the help alert and the HSV color picker.

use std::cell::RefCell;
use std::rc::Rc;

use drawpad_core::{ColorPicker, HsvChannel, SLIDER_STEP};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement};

use crate::dom::{append, button, create, set_style};
use crate::error::{AppError, AppResult};
use crate::listeners::ListenerSet;

/// Show `content` in a modal box with an OK button.
///
/// `keep_alive` holds listeners owned by the content; they are released
/// together with the modal.
///
/// # Errors
///
/// Returns an error if the document has no body or a node cannot be created.
pub fn alert(document: &Document, content: &Element, keep_alive: ListenerSet) -> AppResult<()> {
    let body = document.body().ok_or(AppError::NoDocument)?;

    let backdrop: HtmlElement = create(document, "div")?;
    for (property, value) in [
        ("position", "fixed"),
        ("inset", "0"),
        ("background-color", "rgba(0,0,0,0.3)"),
        ("display", "flex"),
        ("align-items", "center"),
        ("justify-content", "center"),
        ("z-index", "1000"),
    ] {
        set_style(&backdrop, property, value);
    }

    let dialog: HtmlElement = create(document, "div")?;
    for (property, value) in [
        ("background-color", "#FFF"),
        ("padding", "1em"),
        ("max-width", "80%"),
        ("white-space", "pre-wrap"),
        ("font-family", "sans-serif"),
        ("text-align", "center"),
    ] {
        set_style(&dialog, property, value);
    }

    let ok = button(document, "OK", None)?;
    set_style(&ok, "display", "block");
    set_style(&ok, "margin", "1em auto 0");

    append(&dialog, content)?;
    append(&dialog, &ok)?;
    append(&backdrop, &dialog)?;
    append(&body, &backdrop)?;

    let dismiss_target = backdrop.clone();
    let dismiss = Closure::once_into_js(move || {
        drop(keep_alive);
        dismiss_target.remove();
    });
    ok.set_onclick(Some(dismiss.unchecked_ref()));
    if let Err(e) = ok.focus() {
        tracing::trace!("Could not focus alert button: {:?}", e);
    }
    Ok(())
}

/// Show a text message.
///
/// # Errors
///
/// See [`alert`].
pub fn alert_text(document: &Document, text: &str) -> AppResult<()> {
    let content: HtmlElement = create(document, "div")?;
    content.set_text_content(Some(text));
    alert(document, &content, ListenerSet::new())
}

/// Show the HSV picker for `input`.
///
/// Every slider move writes the picked hex into `input` and passes it to
/// `on_pick`. An unparsable input value opens the picker on black.
///
/// # Errors
///
/// Returns an error if the overlay cannot be built.
pub fn color_picker<F>(document: &Document, input: &HtmlInputElement, on_pick: F) -> AppResult<()>
where
    F: Fn(&str) + 'static,
{
    let picker = match ColorPicker::open(&input.value()) {
        Ok(picker) => picker,
        Err(err) => {
            tracing::warn!("Color input holds {err}, opening picker on black");
            ColorPicker::open("#000000")?
        }
    };
    let picker = Rc::new(RefCell::new(picker));
    let on_pick = Rc::new(on_pick);

    let swatch: HtmlElement = create(document, "div")?;
    set_style(&swatch, "width", "2em");
    set_style(&swatch, "height", "2em");
    set_style(&swatch, "margin", "auto");

    let container: HtmlElement = create(document, "div")?;
    append(&container, &swatch)?;

    let mut listeners = ListenerSet::new();
    for channel in HsvChannel::ALL {
        let label: HtmlElement = create(document, "div")?;
        label.set_text_content(Some(channel.label()));

        let slider: HtmlInputElement = create(document, "input")?;
        slider.set_type("range");
        slider.set_min("0");
        slider.set_max("1");
        slider.set_step(&SLIDER_STEP.to_string());
        slider.set_value(&picker.borrow().get(channel).to_string());

        append(&container, &label)?;
        append(&container, &slider)?;

        let picker = Rc::clone(&picker);
        let swatch = swatch.clone();
        let input = input.clone();
        let on_pick = Rc::clone(&on_pick);
        let source = slider.clone();
        listeners.on(&slider, "input", move |_| {
            let Ok(value) = source.value().parse::<f64>() else {
                return;
            };
            let hex = {
                let mut picker = picker.borrow_mut();
                picker.set(channel, value);
                picker.hex()
            };
            set_style(&swatch, "background-color", &hex);
            input.set_value(&hex);
            (*on_pick)(&hex);
        })?;
    }

    set_style(&swatch, "background-color", &picker.borrow().hex());
    alert(document, &container, listeners)
}
