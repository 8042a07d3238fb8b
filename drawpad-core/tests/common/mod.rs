//! Recording fakes for the drawing engine and the view.

#![allow(dead_code)]

use drawpad_core::{
    DrawPad, DrawingEngine, LineShape, PadConfig, PadView, Placement, Size, Tool,
};

/// One engine layer: an identity tag standing in for pixels, plus opacity.
#[derive(Debug, Clone, PartialEq)]
pub struct FakeBuffer {
    pub tag: usize,
    pub opacity: f64,
}

/// In-memory engine that records what the pad asked of it.
#[derive(Debug)]
pub struct FakeEngine {
    pub buffers: Vec<FakeBuffer>,
    pub current_layer: usize,
    pub tool: Tool,
    pub color: String,
    pub line_width: u32,
    pub line_shape: Option<LineShape>,
    pub undo_steps: usize,
    pub redo_steps: usize,
    pub redraws: usize,
    pub clears: usize,
    pub image: Option<String>,
}

impl FakeEngine {
    pub fn new(layers: usize) -> Self {
        Self {
            buffers: (0..layers)
                .map(|tag| FakeBuffer { tag, opacity: 1.0 })
                .collect(),
            current_layer: 0,
            tool: Tool::Freehand,
            color: "#000000".to_string(),
            line_width: 2,
            line_shape: None,
            undo_steps: 0,
            redo_steps: 0,
            redraws: 0,
            clears: 0,
            image: Some("data:image/png;base64,iVBORw0KGgo=".to_string()),
        }
    }

    pub fn buffer_tags(&self) -> Vec<usize> {
        self.buffers.iter().map(|b| b.tag).collect()
    }
}

impl DrawingEngine for FakeEngine {
    fn redraw(&mut self) {
        self.redraws += 1;
    }

    fn undo(&mut self) {
        if self.undo_steps > 0 {
            self.undo_steps -= 1;
            self.redo_steps += 1;
        }
    }

    fn redo(&mut self) {
        if self.redo_steps > 0 {
            self.redo_steps -= 1;
            self.undo_steps += 1;
        }
    }

    fn can_undo(&self) -> bool {
        self.undo_steps > 0
    }

    fn can_redo(&self) -> bool {
        self.redo_steps > 0
    }

    fn clear_layer(&mut self) {
        self.clears += 1;
        self.undo_steps += 1;
        self.redo_steps = 0;
    }

    fn layer_count(&self) -> usize {
        self.buffers.len()
    }

    fn current_layer_index(&self) -> usize {
        self.current_layer
    }

    fn set_current_layer_index(&mut self, index: usize) {
        self.current_layer = index;
    }

    fn current_layer_opacity(&self) -> f64 {
        self.buffers[self.current_layer].opacity
    }

    fn set_current_layer_opacity(&mut self, opacity: f64) {
        self.buffers[self.current_layer].opacity = opacity;
    }

    fn swap_buffers(&mut self, a: usize, b: usize) {
        self.buffers.swap(a, b);
    }

    fn current_tool(&self) -> Tool {
        self.tool
    }

    fn set_current_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    fn color(&self) -> String {
        self.color.clone()
    }

    fn set_color(&mut self, color: &str) {
        self.color = color.to_string();
    }

    fn line_width(&self) -> u32 {
        self.line_width
    }

    fn set_line_width(&mut self, width: u32) {
        self.line_width = width;
    }

    fn set_line_shape(&mut self, shape: LineShape) {
        self.line_shape = Some(shape);
    }

    fn png_data_url(&self) -> Option<String> {
        self.image.clone()
    }
}

/// View that mirrors DOM state in plain fields.
#[derive(Debug)]
pub struct FakeView {
    pub easel: Size,
    pub placements: Vec<Placement>,
    pub tool_marks: Vec<Tool>,
    pub shape_marks: Vec<LineShape>,
    pub layer_marks: Vec<bool>,
    /// Creation tag of the canvas at each DOM position.
    pub dom_order: Vec<usize>,
    pub opacity: Option<f64>,
    pub undo_enabled: bool,
    pub redo_enabled: bool,
    pub line_width: Option<u32>,
    pub color: Option<String>,
    pub cursor: Option<(i64, i64)>,
    pub info_visible: Option<bool>,
    pub styling_refreshes: usize,
}

impl FakeView {
    pub fn new(layers: usize) -> Self {
        Self {
            easel: Size::new(400.0, 300.0),
            placements: Vec::new(),
            tool_marks: Vec::new(),
            shape_marks: Vec::new(),
            layer_marks: vec![false; layers],
            dom_order: (0..layers).collect(),
            opacity: None,
            undo_enabled: true,
            redo_enabled: true,
            line_width: None,
            color: None,
            cursor: None,
            info_visible: None,
            styling_refreshes: 0,
        }
    }

    pub fn last_placement(&self) -> Placement {
        *self.placements.last().expect("a placement was applied")
    }

    pub fn selected_layers(&self) -> Vec<usize> {
        self.layer_marks
            .iter()
            .enumerate()
            .filter_map(|(i, on)| on.then_some(i))
            .collect()
    }
}

impl PadView for FakeView {
    fn easel_size(&self) -> Size {
        self.easel
    }

    fn apply_placement(&mut self, placement: &Placement) {
        self.placements.push(*placement);
    }

    fn show_tool(&mut self, tool: Tool) {
        self.tool_marks = vec![tool];
    }

    fn show_shape(&mut self, shape: LineShape) {
        self.shape_marks = vec![shape];
    }

    fn show_layer(&mut self, position: usize) {
        for (i, mark) in self.layer_marks.iter_mut().enumerate() {
            *mark = i == position;
        }
    }

    fn swap_layers(&mut self, a: usize, b: usize) {
        self.dom_order.swap(a, b);
        self.layer_marks.swap(a, b);
    }

    fn show_opacity(&mut self, opacity: f64) {
        self.opacity = Some(opacity);
    }

    fn show_undo_state(&mut self, can_undo: bool, can_redo: bool) {
        self.undo_enabled = can_undo;
        self.redo_enabled = can_redo;
    }

    fn show_line_width(&mut self, width: u32) {
        self.line_width = Some(width);
    }

    fn show_color(&mut self, hex: &str) {
        self.color = Some(hex.to_string());
    }

    fn show_cursor(&mut self, x: i64, y: i64) {
        self.cursor = Some((x, y));
    }

    fn show_info(&mut self, visible: bool) {
        self.info_visible = Some(visible);
    }

    fn styling_changed(&mut self) {
        self.styling_refreshes += 1;
    }
}

/// A generated pad with default configuration.
pub fn generated_pad() -> DrawPad<FakeEngine, FakeView> {
    pad_with(PadConfig::default())
}

/// A generated pad with the given configuration.
pub fn pad_with(config: PadConfig) -> DrawPad<FakeEngine, FakeView> {
    let layers = config.layer_count;
    let mut pad = DrawPad::new(config, FakeEngine::new(layers), FakeView::new(layers))
        .expect("valid configuration");
    pad.generate().expect("first generation");
    pad
}
