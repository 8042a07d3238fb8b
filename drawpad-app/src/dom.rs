//! Small DOM helpers shared by the builder, the view and the overlays.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, Window};

use crate::error::{AppError, AppResult};

/// The global window.
pub(crate) fn window() -> AppResult<Window> {
    web_sys::window().ok_or(AppError::NoWindow)
}

/// The window's document.
pub(crate) fn document() -> AppResult<Document> {
    window()?.document().ok_or(AppError::NoDocument)
}

/// Create an element and cast it to its concrete type.
pub(crate) fn create<T: JsCast>(document: &Document, tag: &'static str) -> AppResult<T> {
    document
        .create_element(tag)
        .map_err(|e| AppError::dom(&e))?
        .dyn_into::<T>()
        .map_err(|_| AppError::WrongElement(tag))
}

/// Create an element carrying `class`.
pub(crate) fn create_with_class<T: JsCast>(
    document: &Document,
    tag: &'static str,
    class: &str,
) -> AppResult<T> {
    let element: Element = create(document, tag)?;
    element.set_class_name(class);
    element.dyn_into::<T>().map_err(|_| AppError::WrongElement(tag))
}

/// A button that never submits an enclosing form.
pub(crate) fn button(
    document: &Document,
    text: &str,
    title: Option<&str>,
) -> AppResult<HtmlButtonElement> {
    let button: HtmlButtonElement = create(document, "button")?;
    button.set_type("button");
    button.set_text_content(Some(text));
    if let Some(title) = title {
        button.set_title(title);
    }
    Ok(button)
}

/// Append `child` to `parent`.
pub(crate) fn append(parent: &Element, child: &Element) -> AppResult<()> {
    parent.append_child(child).map_err(|e| AppError::dom(&e))?;
    Ok(())
}

/// Set an attribute.
pub(crate) fn set_attribute(element: &Element, name: &str, value: &str) -> AppResult<()> {
    element
        .set_attribute(name, value)
        .map_err(|e| AppError::dom(&e))
}

/// Set one inline style property.
pub(crate) fn set_style(element: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = element.style().set_property(property, value) {
        tracing::warn!("Failed to set style {}: {:?}", property, e);
    }
}

/// Mark or unmark an element with a presence attribute such as `data-selected`.
pub(crate) fn set_flag(element: &Element, attribute: &str, on: bool) {
    let result = if on {
        element.set_attribute(attribute, "")
    } else {
        element.remove_attribute(attribute)
    };
    if let Err(e) = result {
        tracing::warn!("Failed to toggle {}: {:?}", attribute, e);
    }
}

/// Exchange the positions of two siblings.
pub(crate) fn swap_siblings(document: &Document, a: &Element, b: &Element) -> AppResult<()> {
    if a == b {
        return Ok(());
    }
    let parent = a.parent_node().ok_or(AppError::Dom("element is detached".into()))?;
    let marker: Element = create(document, "span")?;
    let dom = |e: wasm_bindgen::JsValue| AppError::dom(&e);

    parent.replace_child(&marker, a).map_err(dom)?;
    parent.replace_child(a, b).map_err(dom)?;
    parent.replace_child(b, &marker).map_err(dom)?;
    Ok(())
}

/// CSS pixel length.
pub(crate) fn px(value: f64) -> String {
    format!("{value}px")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn px_formats_lengths() {
        assert_eq!(px(200.0), "200px");
        assert_eq!(px(-12.5), "-12.5px");
    }
}
