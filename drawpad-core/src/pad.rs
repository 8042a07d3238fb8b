//! The widget shell: one drawing pad coordinating its engine and its view.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::clamp_line_width;
use crate::{
    normalize_color, ActionData, DrawingEngine, EngineEvent, ExclusiveGroup, IncomingMessage,
    KeyTarget, LayerPanel, LineShape, Navigation, OutgoingMessage, PadConfig, PadError, PadResult,
    PadView, Point, PointerAction, Shortcut, Size, Tool, ToolSwitcher,
};

/// Unique identifier for a pad instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PadId(Uuid);

impl PadId {
    /// Create a new unique pad ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PadId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A drawing pad.
///
/// All handlers run to completion on the caller's thread. Anything the view
/// shows is refreshed before the handler returns.
pub struct DrawPad<E, V> {
    id: PadId,
    config: PadConfig,
    engine: E,
    view: V,
    navigation: Navigation,
    layers: LayerPanel,
    tools: ExclusiveGroup<Tool>,
    shapes: ExclusiveGroup<LineShape>,
    switcher: ToolSwitcher,
    show_info: bool,
    generated: bool,
}

impl<E: DrawingEngine, V: PadView> DrawPad<E, V> {
    /// Wrap an attached engine and a built view.
    ///
    /// # Errors
    ///
    /// Returns [`PadError::InvalidConfig`] when the configuration is invalid or
    /// the engine's layer count disagrees with it.
    pub fn new(config: PadConfig, engine: E, view: V) -> PadResult<Self> {
        config.validate()?;
        if engine.layer_count() != config.layer_count {
            return Err(PadError::InvalidConfig(format!(
                "engine has {} layers, configuration asks for {}",
                engine.layer_count(),
                config.layer_count
            )));
        }

        let canvas = Size::new(f64::from(config.width), f64::from(config.height));
        let tools = ExclusiveGroup::new(Tool::ALL)
            .ok_or_else(|| PadError::InvalidConfig("no tools".to_string()))?;
        let shapes = ExclusiveGroup::new(LineShape::ALL)
            .ok_or_else(|| PadError::InvalidConfig("no line shapes".to_string()))?;

        Ok(Self {
            id: PadId::new(),
            navigation: Navigation::new(canvas, config.min_zoom, config.max_zoom),
            layers: LayerPanel::new(config.layer_count)?,
            show_info: config.show_info,
            config,
            engine,
            view,
            tools,
            shapes,
            switcher: ToolSwitcher::new(),
            generated: false,
        })
    }

    /// Bring the view in line with the engine. Allowed exactly once.
    ///
    /// # Errors
    ///
    /// Returns [`PadError::AlreadyGenerated`] on the second call.
    pub fn generate(&mut self) -> PadResult<()> {
        if self.generated {
            tracing::warn!(pad = %self.id, "Tried to generate drawing pad again");
            return Err(PadError::AlreadyGenerated);
        }

        tracing::debug!(
            pad = %self.id,
            "Generating drawing pad, w: {} h: {}, l: {}, u: {}",
            self.config.width,
            self.config.height,
            self.config.layer_count,
            self.config.max_undos
        );

        self.engine.redraw();
        self.sync_undo_state();

        let color = self.engine.color();
        self.show_engine_color(&color);
        self.view.show_line_width(self.engine.line_width());

        self.select_tool(Tool::Freehand);
        self.select_shape(LineShape::HardCircle);
        self.select_layer_at(self.config.initial_layer())?;
        self.view.show_info(self.show_info);

        let placement = self.navigation.refresh_location(self.view.easel_size());
        self.view.apply_placement(&placement);
        self.view.styling_changed();

        self.generated = true;
        tracing::info!(pad = %self.id, "Drawing pad generated");
        Ok(())
    }

    /// Unique pad identifier.
    #[must_use]
    pub fn id(&self) -> PadId {
        self.id
    }

    /// Configuration the pad was built with.
    #[must_use]
    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    /// Whether [`Self::generate`] succeeded.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.generated
    }

    /// The drawing engine.
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the drawing engine.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// The view.
    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Pan/zoom state.
    #[must_use]
    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    /// Layer panel state.
    #[must_use]
    pub fn layers(&self) -> &LayerPanel {
        &self.layers
    }

    /// Whether the info bar is shown.
    #[must_use]
    pub fn info_displayed(&self) -> bool {
        self.show_info
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Zoom by `delta` levels around `anchor` (easel coordinates, centre when `None`).
    ///
    /// Returns `false` when the zoom would leave the configured bounds.
    pub fn update_zoom(&mut self, delta: i32, anchor: Option<Point>) -> bool {
        let easel = self.view.easel_size();
        match self.navigation.update_zoom(delta, anchor, easel) {
            Some(placement) => {
                self.view.apply_placement(&placement);
                self.view.styling_changed();
                true
            }
            None => false,
        }
    }

    /// Back to the origin at minimum zoom.
    pub fn reset_navigation(&mut self) {
        let placement = self.navigation.reset(self.view.easel_size());
        self.view.apply_placement(&placement);
        self.view.styling_changed();
    }

    /// Reposition the canvas after the easel changed size.
    pub fn refresh_location(&mut self) {
        let placement = self.navigation.refresh_location(self.view.easel_size());
        tracing::trace!(
            "Refreshing location. x: {}, y: {}, left: {}, top: {}",
            self.navigation.offset().x,
            self.navigation.offset().y,
            placement.left,
            placement.top
        );
        self.view.apply_placement(&placement);
        self.view.styling_changed();
    }

    // ------------------------------------------------------------------
    // Tools
    // ------------------------------------------------------------------

    /// Make `tool` the active tool.
    pub fn select_tool(&mut self, tool: Tool) {
        self.tools.select(tool);
        self.engine.set_current_tool(tool);
        self.view.show_tool(tool);
    }

    /// The selected tool.
    #[must_use]
    pub fn selected_tool(&self) -> Tool {
        self.tools.selected()
    }

    /// Make `shape` the active brush shape.
    pub fn select_shape(&mut self, shape: LineShape) {
        self.shapes.select(shape);
        self.engine.set_line_shape(shape);
        self.view.show_shape(shape);
    }

    /// The selected brush shape.
    #[must_use]
    pub fn selected_shape(&self) -> LineShape {
        self.shapes.selected()
    }

    /// Set the brush width, clamped to the accepted range.
    pub fn set_line_width(&mut self, width: i64) {
        self.engine.set_line_width(clamp_line_width(width));
        self.view.show_line_width(self.engine.line_width());
    }

    /// Grow or shrink the brush by `delta`.
    pub fn step_line_width(&mut self, delta: i64) {
        let width = i64::from(self.engine.line_width()) + delta;
        self.set_line_width(width);
    }

    /// Set the drawing color from the color input or the picker overlay.
    ///
    /// # Errors
    ///
    /// Returns [`PadError::InvalidColor`] when `color` does not parse.
    pub fn set_color(&mut self, color: &str) -> PadResult<()> {
        let hex = normalize_color(color)?;
        self.engine.set_color(&hex);
        self.view.show_color(&hex);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Layers
    // ------------------------------------------------------------------

    /// Select the layer whose canvas carries `tag` as its `data-layer` value.
    ///
    /// A missing or malformed tag is logged and nothing changes.
    ///
    /// # Errors
    ///
    /// Returns the tag or range error that aborted the selection.
    pub fn select_layer(&mut self, tag: Option<&str>) -> PadResult<()> {
        let position = crate::parse_layer_tag(tag).map_err(|err| {
            tracing::warn!(pad = %self.id, "Could not select layer: {err}");
            err
        })?;
        self.select_layer_at(position)
    }

    /// Select the layer at panel `position`.
    ///
    /// # Errors
    ///
    /// Returns [`PadError::LayerOutOfRange`] for a position outside the panel.
    pub fn select_layer_at(&mut self, position: usize) -> PadResult<()> {
        self.layers.select(position).map_err(|err| {
            tracing::warn!(pad = %self.id, "Could not select layer: {err}");
            err
        })?;
        self.engine.set_current_layer_index(position);
        self.view.show_layer(position);
        self.view.show_opacity(self.engine.current_layer_opacity());
        tracing::debug!(pad = %self.id, "Selected layer {position}");
        Ok(())
    }

    /// Exchange the layers at `a` and `b`, buffers and panel entries together.
    ///
    /// # Errors
    ///
    /// Returns [`PadError::LayerOutOfRange`] if either position is outside the panel.
    pub fn swap_layers(&mut self, a: usize, b: usize) -> PadResult<()> {
        self.layers.swap(a, b)?;
        self.engine.swap_buffers(a, b);
        self.view.swap_layers(a, b);

        let selected = self.layers.selected();
        if self.engine.current_layer_index() != selected {
            self.engine.set_current_layer_index(selected);
        }
        self.view.show_layer(selected);
        self.engine.redraw();
        tracing::debug!(pad = %self.id, "Swapped layers {a} and {b}");
        Ok(())
    }

    /// Move the current layer one position left, wrapping around.
    ///
    /// # Errors
    ///
    /// Returns [`PadError::LayerOutOfRange`] if the engine's layer is outside the panel.
    pub fn shift_layer_left(&mut self) -> PadResult<()> {
        let current = self.current_layer()?;
        self.swap_layers(current, self.layers.left_of(current))
    }

    /// Move the current layer one position right, wrapping around.
    ///
    /// # Errors
    ///
    /// Returns [`PadError::LayerOutOfRange`] if the engine's layer is outside the panel.
    pub fn shift_layer_right(&mut self) -> PadResult<()> {
        let current = self.current_layer()?;
        self.swap_layers(current, self.layers.right_of(current))
    }

    fn current_layer(&mut self) -> PadResult<usize> {
        let current = self.engine.current_layer_index();
        self.layers.select(current)?;
        Ok(current)
    }

    /// Set the current layer's opacity (clamped to `[0, 1]`) and redraw.
    pub fn set_layer_opacity(&mut self, opacity: f64) {
        if opacity.is_nan() {
            return;
        }
        self.engine.set_current_layer_opacity(opacity.clamp(0.0, 1.0));
        self.engine.redraw();
    }

    /// Clear the current layer.
    pub fn clear_layer(&mut self) {
        self.engine.clear_layer();
        self.sync_undo_state();
    }

    // ------------------------------------------------------------------
    // Undo
    // ------------------------------------------------------------------

    /// Undo one step.
    pub fn undo(&mut self) {
        self.engine.undo();
        self.sync_undo_state();
    }

    /// Redo one step.
    pub fn redo(&mut self) {
        self.engine.redo();
        self.sync_undo_state();
    }

    fn sync_undo_state(&mut self) {
        self.view
            .show_undo_state(self.engine.can_undo(), self.engine.can_redo());
    }

    // ------------------------------------------------------------------
    // Info bar
    // ------------------------------------------------------------------

    /// Show or hide the cursor position bar.
    pub fn set_info_displayed(&mut self, displayed: bool) {
        tracing::debug!(pad = %self.id, "Info display set to {displayed}");
        self.show_info = displayed;
        self.view.show_info(displayed);
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// A key went down inside the pad.
    pub fn handle_key_down(&mut self, ctrl_held: bool) {
        let current = self.engine.current_tool();
        if let Some(tool) = self.switcher.key_down(ctrl_held, current) {
            self.select_tool(tool);
        }
    }

    /// A key went up inside the pad.
    pub fn handle_key_up(&mut self) {
        if let Some(tool) = self.switcher.key_up() {
            self.select_tool(tool);
        }
    }

    /// A character was typed inside the pad.
    ///
    /// Returns `true` when a shortcut ran and the default action should be suppressed.
    pub fn handle_shortcut(&mut self, key: &str, target: KeyTarget) -> bool {
        if !target.accepts_shortcuts() {
            return false;
        }
        let Some(shortcut) = Shortcut::from_key(key) else {
            return false;
        };
        tracing::debug!(pad = %self.id, "Shortcut {shortcut:?}");

        match shortcut {
            Shortcut::ZoomIn => {
                self.update_zoom(1, None);
            }
            Shortcut::ZoomOut => {
                self.update_zoom(-1, None);
            }
            Shortcut::Undo => self.undo(),
            Shortcut::Redo => self.redo(),
            Shortcut::WidthUp => self.step_line_width(1),
            Shortcut::WidthDown => self.step_line_width(-1),
            Shortcut::ToggleEraser => {
                let current = self.engine.current_tool();
                if let Some(tool) = self.switcher.toggle_eraser(current) {
                    self.select_tool(tool);
                }
            }
        }
        true
    }

    /// React to a notification from the engine.
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::UndoStateChanged => self.sync_undo_state(),
            EngineEvent::LayerChanged { layer } => {
                // Errors are already logged by the selection
                let _ = self.select_layer_at(layer);
            }
            EngineEvent::ColorChanged { color } => self.show_engine_color(&color),
            EngineEvent::Action(data) => self.handle_action(data),
        }
    }

    fn handle_action(&mut self, data: ActionData) {
        if self.show_info {
            #[allow(clippy::cast_possible_truncation)]
            let (x, y) = (data.canvas.x.floor() as i64, data.canvas.y.floor() as i64);
            self.view.show_cursor(x, y);
        }

        match data.action {
            PointerAction::PanStart => self.navigation.pan_start(data.real),
            PointerAction::Pan => {
                let easel = self.view.easel_size();
                if let Some(placement) = self.navigation.pan_to(data.real, easel) {
                    self.view.apply_placement(&placement);
                    self.view.styling_changed();
                }
            }
            PointerAction::Zoom { delta } => {
                self.update_zoom(delta, Some(data.real));
            }
            PointerAction::Other => {}
        }
    }

    fn show_engine_color(&mut self, color: &str) {
        match normalize_color(color) {
            Ok(hex) => self.view.show_color(&hex),
            Err(err) => tracing::warn!(pad = %self.id, "Ignoring engine color: {err}"),
        }
    }

    /// Answer a cross-frame message. Returns the reply to post, if any.
    pub fn handle_message(&mut self, message: IncomingMessage) -> Option<OutgoingMessage> {
        match message {
            IncomingMessage::GetImage => {
                let image = self.engine.png_data_url();
                if image.is_none() {
                    tracing::warn!(pad = %self.id, "Canvas could not be encoded for getImage");
                }
                image.map(|image| OutgoingMessage::Image { image })
            }
            IncomingMessage::Recenter => {
                tracing::debug!(pad = %self.id, "An outside member requested a recenter");
                self.reset_navigation();
                None
            }
        }
    }
}

impl<E, V> fmt::Debug for DrawPad<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrawPad")
            .field("id", &self.id)
            .field("generated", &self.generated)
            .field("navigation", &self.navigation)
            .field("layers", &self.layers)
            .finish_non_exhaustive()
    }
}
