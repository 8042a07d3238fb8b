//! Builds the widget's DOM tree.

use drawpad_core::{layer_title, LineShape, PadConfig, PadStyles, Tool, LAYER_ATTRIBUTE};
use wasm_bindgen::JsCast;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlAnchorElement, HtmlButtonElement,
    HtmlCanvasElement, HtmlElement, HtmlInputElement,
};

use crate::dom::{append, button, create, create_with_class, set_attribute};
use crate::error::{AppError, AppResult};

/// Attribute naming a tool button's tool.
pub const TOOL_ATTRIBUTE: &str = "data-tool";
/// Attribute naming a shape button's shape.
pub const SHAPE_ATTRIBUTE: &str = "data-shape";
/// Attribute naming an action button's action.
pub const ACTION_ATTRIBUTE: &str = "data-action";
/// Attribute carrying the pad's id on the container.
pub const PAD_ATTRIBUTE: &str = "data-pad";

/// One layer thumbnail: its container in the layer box and the canvas the
/// engine draws into.
#[derive(Debug, Clone)]
pub struct LayerNode {
    /// Wrapper moved around when layers swap.
    pub container: HtmlElement,
    /// Layer canvas, tagged with `data-layer`.
    pub canvas: HtmlCanvasElement,
}

/// Handles to every node the widget wires up.
#[derive(Debug, Clone)]
pub struct PadElements {
    /// Outer container returned to the host.
    pub container: HtmlElement,
    /// Controls strip.
    pub controls: HtmlElement,
    /// Viewport the canvas moves around in.
    pub easel: HtmlElement,
    /// Positioned wrapper around the canvas.
    pub canvas_container: HtmlElement,
    /// Composited canvas.
    pub canvas: HtmlCanvasElement,
    /// Native color input.
    pub color_input: HtmlInputElement,
    /// Opens the HSV overlay.
    pub hsv_button: HtmlButtonElement,
    /// Brush width input.
    pub width_input: HtmlInputElement,
    /// Width decrement.
    pub width_down: HtmlButtonElement,
    /// Width increment.
    pub width_up: HtmlButtonElement,
    /// Shape radio buttons.
    pub shape_buttons: Vec<(LineShape, HtmlButtonElement)>,
    /// Tool radio buttons.
    pub tool_buttons: Vec<(Tool, HtmlButtonElement)>,
    /// Clears the current layer.
    pub clear_button: HtmlButtonElement,
    /// Undo action.
    pub undo_button: HtmlButtonElement,
    /// Redo action.
    pub redo_button: HtmlButtonElement,
    /// Zoom out action.
    pub zoom_out_button: HtmlButtonElement,
    /// Zoom in action.
    pub zoom_in_button: HtmlButtonElement,
    /// Reset pan and zoom.
    pub recenter_button: HtmlButtonElement,
    /// Fullscreen toggle.
    pub fullscreen_button: HtmlButtonElement,
    /// Layer thumbnails in panel order.
    pub layers: Vec<LayerNode>,
    /// Shift current layer left.
    pub shift_left: HtmlButtonElement,
    /// Shift current layer right.
    pub shift_right: HtmlButtonElement,
    /// Current layer opacity slider.
    pub opacity: HtmlInputElement,
    /// PNG download link.
    pub download: HtmlAnchorElement,
    /// Help link.
    pub help: HtmlAnchorElement,
    /// Info bar.
    pub info: HtmlElement,
    /// Cursor position readout.
    pub cursor_position: HtmlElement,
}

/// Build the widget's DOM for `config`, classed with `styles`.
///
/// # Errors
///
/// Returns an error if any node cannot be created.
#[allow(clippy::too_many_lines)]
pub fn build(
    document: &Document,
    config: &PadConfig,
    styles: &PadStyles,
) -> AppResult<PadElements> {
    // Easel and canvas
    let easel: HtmlElement = create_with_class(document, "div", &styles.easel)?;
    let canvas_container: HtmlElement =
        create_with_class(document, "div", &styles.canvas_container)?;
    let canvas: HtmlCanvasElement = create_with_class(document, "canvas", &styles.canvas)?;
    canvas.set_width(config.width);
    canvas.set_height(config.height);
    append(&canvas_container, &canvas)?;
    append(&easel, &canvas_container)?;

    // Toolbox
    let tools: HtmlElement = create_with_class(document, "div", &styles.toolbox)?;
    let tool_options: HtmlElement = create_with_class(document, "div", &styles.tool_options)?;
    let tool_holder: HtmlElement = create_with_class(document, "div", &styles.draw_tools)?;

    let color_input: HtmlInputElement = create_with_class(document, "input", &styles.color_picker)?;
    color_input.set_type("color");
    color_input.set_title("Tool Color");
    append(&tool_options, &color_input)?;

    let hsv_button = button(document, "COL", Some("HSV Color"))?;
    append(&tool_options, &hsv_button)?;

    let width_box: HtmlElement = create_with_class(document, "div", &styles.width_picker)?;
    let width_down = button(document, "<", None)?;
    let width_up = button(document, ">", None)?;
    let width_input: HtmlInputElement = create(document, "input")?;
    width_input.set_title("Tool Width");
    width_input.set_min(&drawpad_core::MIN_LINE_WIDTH.to_string());
    width_input.set_max(&drawpad_core::MAX_LINE_WIDTH.to_string());
    append(&width_box, &width_down)?;
    append(&width_box, &width_input)?;
    append(&width_box, &width_up)?;
    append(&tool_options, &width_box)?;

    let mut shape_buttons = Vec::with_capacity(LineShape::ALL.len());
    for shape in LineShape::ALL {
        let b = button(document, shape.glyph(), None)?;
        set_attribute(&b, SHAPE_ATTRIBUTE, shape.id())?;
        append(&tool_options, &b)?;
        shape_buttons.push((shape, b));
    }
    append(&tools, &tool_options)?;

    let mut tool_buttons = Vec::with_capacity(Tool::ALL.len());
    for tool in Tool::ALL {
        let b = button(document, tool.glyph(), Some(tool.title()))?;
        set_attribute(&b, TOOL_ATTRIBUTE, tool.id())?;
        append(&tool_holder, &b)?;
        tool_buttons.push((tool, b));
    }
    append(&tools, &tool_holder)?;

    let clear_button = button(document, "✖", Some("Layer Clear"))?;
    append(&tools, &clear_button)?;

    // Actions
    let actions: HtmlElement = create_with_class(document, "div", &styles.actions)?;
    let action = |glyph: &str, title: &str, name: &str| -> AppResult<HtmlButtonElement> {
        let b = button(document, glyph, Some(title))?;
        set_attribute(&b, ACTION_ATTRIBUTE, name)?;
        append(&actions, &b)?;
        Ok(b)
    };
    let undo_button = action("↶", "Undo", "undo")?;
    let redo_button = action("↷", "Redo", "redo")?;
    let zoom_out_button = action("-", "Zoom Out", "scaledown")?;
    let zoom_in_button = action("+", "Zoom In", "scaleup")?;
    let recenter_button = action("👁", "Reset Zoom", "recenter")?;
    let fullscreen_button = action("◰", "Fullscreen Toggle", "fullscreen")?;

    // Layers
    let layer_box: HtmlElement = create_with_class(document, "div", &styles.layers)?;
    let mut layers = Vec::with_capacity(config.layer_count);
    for position in 0..config.layer_count {
        let node = layer_node(document, config, styles, position)?;
        append(&layer_box, &node.container)?;
        layers.push(node);
    }

    let layer_controls: HtmlElement = create_with_class(document, "div", &styles.layer_controls)?;
    let shift_left = button(document, "<", Some("Shift Layer Left"))?;
    let shift_right = button(document, ">", Some("Shift Layer Right"))?;
    let opacity: HtmlInputElement = create(document, "input")?;
    opacity.set_type("range");
    opacity.set_min("0");
    opacity.set_max("1");
    opacity.set_step("0.05");
    opacity.set_title("Current Layer Opacity");
    append(&layer_controls, &shift_left)?;
    append(&layer_controls, &opacity)?;
    append(&layer_controls, &shift_right)?;
    append(&layer_box, &layer_controls)?;

    // Links
    let links: HtmlElement = create_with_class(document, "div", &styles.links)?;
    let download: HtmlAnchorElement = create_with_class(document, "a", "download")?;
    download.set_href("#");
    download.set_text_content(Some("Download"));
    let help: HtmlAnchorElement = create_with_class(document, "a", "help")?;
    help.set_href("#");
    help.set_text_content(Some("Help"));
    append(&links, &download)?;
    append(&links, &help)?;

    // Info
    let info: HtmlElement = create_with_class(document, "div", &styles.info)?;
    let cursor_position: HtmlElement =
        create_with_class(document, "span", &styles.cursor_position)?;
    append(&info, &cursor_position)?;

    // Container
    let container: HtmlElement = create_with_class(document, "div", &styles.container)?;
    let controls: HtmlElement = create_with_class(document, "div", &styles.controls)?;
    append(&controls, &tools)?;
    append(&controls, &actions)?;
    append(&controls, &layer_box)?;
    append(&container, &controls)?;
    append(&container, &easel)?;
    append(&container, &info)?;
    append(&container, &links)?;
    container.set_tab_index(-1);

    Ok(PadElements {
        container,
        controls,
        easel,
        canvas_container,
        canvas,
        color_input,
        hsv_button,
        width_input,
        width_down,
        width_up,
        shape_buttons,
        tool_buttons,
        clear_button,
        undo_button,
        redo_button,
        zoom_out_button,
        zoom_in_button,
        recenter_button,
        fullscreen_button,
        layers,
        shift_left,
        shift_right,
        opacity,
        download,
        help,
        info,
        cursor_position,
    })
}

/// One layer canvas in its container. Layer 0 starts opaque white.
fn layer_node(
    document: &Document,
    config: &PadConfig,
    styles: &PadStyles,
    position: usize,
) -> AppResult<LayerNode> {
    let container: HtmlElement = create_with_class(document, "div", &styles.layer)?;
    let canvas: HtmlCanvasElement = create(document, "canvas")?;
    canvas.set_width(config.width);
    canvas.set_height(config.height);
    canvas.set_title(&layer_title(position));
    set_attribute(&canvas, LAYER_ATTRIBUTE, &position.to_string())?;

    if position == 0 {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| AppError::dom(&e))?
            .ok_or_else(|| AppError::Dom("2D context not available".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AppError::WrongElement("2D context"))?;
        ctx.set_fill_style_str("#FFFFFF");
        ctx.fill_rect(0.0, 0.0, f64::from(config.width), f64::from(config.height));
    }

    append(&container, &canvas)?;
    Ok(LayerNode { container, canvas })
}
