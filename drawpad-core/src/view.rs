//! The pad's presentation surface.

use crate::{LineShape, Placement, Size, Tool};

/// Everything the pad shows. Implemented over real DOM nodes by the app.
///
/// Calls arrive synchronously after the state change they reflect.
pub trait PadView {
    /// Post-layout size of the easel.
    fn easel_size(&self) -> Size;

    /// Scale the canvas and move its container.
    fn apply_placement(&mut self, placement: &Placement);

    /// Mark `tool` as the selected tool button.
    fn show_tool(&mut self, tool: Tool);

    /// Mark `shape` as the selected shape button.
    fn show_shape(&mut self, shape: LineShape);

    /// Highlight the layer at panel `position`.
    fn show_layer(&mut self, position: usize);

    /// Exchange the layer containers at positions `a` and `b` and retag
    /// their canvases with their new positions.
    fn swap_layers(&mut self, a: usize, b: usize);

    /// Move the opacity slider.
    fn show_opacity(&mut self, opacity: f64);

    /// Enable or disable the undo and redo buttons.
    fn show_undo_state(&mut self, can_undo: bool, can_redo: bool);

    /// Show the brush width.
    fn show_line_width(&mut self, width: u32);

    /// Show the active color as `#rrggbb`.
    fn show_color(&mut self, hex: &str);

    /// Show the pointer position in canvas pixels.
    fn show_cursor(&mut self, x: i64, y: i64);

    /// Show or hide the info bar.
    fn show_info(&mut self, visible: bool);

    /// Overlays positioned against the canvas may need to move.
    fn styling_changed(&mut self) {}
}
