//! Drawing tools, brush shapes, and the keyboard tool-switching state machine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PadError;

/// The active drawing operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Erase to transparency.
    Eraser,
    /// Freehand stroke.
    #[default]
    Freehand,
    /// Slow, smoothed stroke.
    Slow,
    /// Spray paint.
    Spray,
    /// Straight line.
    Line,
    /// Square outline.
    Square,
    /// Bucket fill.
    Fill,
    /// Fill the whole layer.
    Clear,
    /// Pick a color from the canvas.
    Dropper,
    /// Move the layer contents.
    Mover,
}

impl Tool {
    /// Every tool, in toolbox order.
    pub const ALL: [Self; 10] = [
        Self::Eraser,
        Self::Freehand,
        Self::Slow,
        Self::Spray,
        Self::Line,
        Self::Square,
        Self::Fill,
        Self::Clear,
        Self::Dropper,
        Self::Mover,
    ];

    /// Identifier shared with the drawing engine.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Eraser => "eraser",
            Self::Freehand => "freehand",
            Self::Slow => "slow",
            Self::Spray => "spray",
            Self::Line => "line",
            Self::Square => "square",
            Self::Fill => "fill",
            Self::Clear => "clear",
            Self::Dropper => "dropper",
            Self::Mover => "mover",
        }
    }

    /// Glyph shown on the tool button.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Eraser => "⛶",
            Self::Freehand => "✏",
            Self::Slow => "✒",
            Self::Spray => "⚟",
            Self::Line => "▬",
            Self::Square => "◻",
            Self::Fill => "◩",
            Self::Clear => "◼",
            Self::Dropper => "⚗",
            Self::Mover => "⤨",
        }
    }

    /// Button tooltip.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Eraser => "Eraser",
            Self::Freehand => "Freehand",
            Self::Slow => "Slow/Smooth",
            Self::Spray => "Spray",
            Self::Line => "Straight Line",
            Self::Square => "Square Outline",
            Self::Fill => "Bucket Fill",
            Self::Clear => "Full Fill",
            Self::Dropper => "Color Select",
            Self::Mover => "Layer Mover",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Tool {
    type Err = PadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.id() == s)
            .ok_or_else(|| PadError::UnknownTool(s.to_string()))
    }
}

/// Brush tip shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineShape {
    /// Aliased round tip.
    #[default]
    HardCircle,
    /// Aliased square tip.
    HardSquare,
    /// Anti-aliased round tip.
    NormalCircle,
    /// Anti-aliased square tip.
    NormalSquare,
}

impl LineShape {
    /// Every shape, in toolbox order.
    pub const ALL: [Self; 4] = [
        Self::HardCircle,
        Self::HardSquare,
        Self::NormalCircle,
        Self::NormalSquare,
    ];

    /// Identifier shared with the drawing engine.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::HardCircle => "hardcircle",
            Self::HardSquare => "hardsquare",
            Self::NormalCircle => "normalcircle",
            Self::NormalSquare => "normalsquare",
        }
    }

    /// Glyph shown on the shape button.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::HardCircle => "●",
            Self::HardSquare => "■",
            Self::NormalCircle => "◉",
            Self::NormalSquare => "▣",
        }
    }
}

impl fmt::Display for LineShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for LineShape {
    type Err = PadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.id() == s)
            .ok_or_else(|| PadError::UnknownShape(s.to_string()))
    }
}

/// Temporary tool overrides driven by the keyboard.
///
/// Holding the modifier swaps to the dropper until the next key release.
/// The eraser key flips between the eraser and the last non-eraser tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolSwitcher {
    ctrl_tool: Option<Tool>,
    eraser_return: Option<Tool>,
}

impl ToolSwitcher {
    /// Create a switcher with no override active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A key went down. Returns the tool to select, if any.
    pub fn key_down(&mut self, ctrl_held: bool, current: Tool) -> Option<Tool> {
        if self.ctrl_tool.is_none() && ctrl_held {
            self.ctrl_tool = Some(current);
            return Some(Tool::Dropper);
        }
        None
    }

    /// A key went up. Returns the tool to restore, if an override was active.
    ///
    /// An eraser held before the override comes back as freehand.
    pub fn key_up(&mut self) -> Option<Tool> {
        self.ctrl_tool.take().map(|tool| match tool {
            Tool::Eraser => Tool::Freehand,
            other => other,
        })
    }

    /// The eraser toggle key was pressed. Returns the tool to select, if any.
    pub fn toggle_eraser(&mut self, current: Tool) -> Option<Tool> {
        match (self.eraser_return, current) {
            (Some(previous), Tool::Eraser) => {
                self.eraser_return = None;
                Some(previous)
            }
            (_, Tool::Eraser) => {
                self.eraser_return = None;
                None
            }
            (_, other) => {
                self.eraser_return = Some(other);
                Some(Tool::Eraser)
            }
        }
    }

    /// Whether the modifier override is holding a tool.
    #[must_use]
    pub fn override_active(&self) -> bool {
        self.ctrl_tool.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_ids_roundtrip() {
        for tool in Tool::ALL {
            assert_eq!(tool.id().parse::<Tool>().expect("known id"), tool);
        }
        assert!("brush".parse::<Tool>().is_err());
    }

    #[test]
    fn shape_ids_roundtrip() {
        for shape in LineShape::ALL {
            assert_eq!(shape.id().parse::<LineShape>().expect("known id"), shape);
        }
        assert!("triangle".parse::<LineShape>().is_err());
    }

    #[test]
    fn tool_serializes_as_engine_identifier() {
        let json = serde_json::to_string(&Tool::Dropper).expect("serialize");
        assert_eq!(json, "\"dropper\"");
        let shape = serde_json::to_string(&LineShape::NormalSquare).expect("serialize");
        assert_eq!(shape, "\"normalsquare\"");
    }

    #[test]
    fn ctrl_overrides_to_dropper_and_restores() {
        let mut switcher = ToolSwitcher::new();
        assert_eq!(switcher.key_down(true, Tool::Spray), Some(Tool::Dropper));
        assert!(switcher.override_active());
        // Repeated keydown while held does nothing
        assert_eq!(switcher.key_down(true, Tool::Dropper), None);
        assert_eq!(switcher.key_up(), Some(Tool::Spray));
        assert!(!switcher.override_active());
        assert_eq!(switcher.key_up(), None);
    }

    #[test]
    fn keydown_without_ctrl_is_ignored() {
        let mut switcher = ToolSwitcher::new();
        assert_eq!(switcher.key_down(false, Tool::Line), None);
        assert_eq!(switcher.key_up(), None);
    }

    #[test]
    fn ctrl_restore_from_eraser_falls_back_to_freehand() {
        let mut switcher = ToolSwitcher::new();
        assert_eq!(switcher.key_down(true, Tool::Eraser), Some(Tool::Dropper));
        assert_eq!(switcher.key_up(), Some(Tool::Freehand));
    }

    #[test]
    fn eraser_toggle_flips_back_and_forth() {
        let mut switcher = ToolSwitcher::new();
        assert_eq!(switcher.toggle_eraser(Tool::Fill), Some(Tool::Eraser));
        assert_eq!(switcher.toggle_eraser(Tool::Eraser), Some(Tool::Fill));
        assert_eq!(switcher.toggle_eraser(Tool::Line), Some(Tool::Eraser));
        assert_eq!(switcher.toggle_eraser(Tool::Eraser), Some(Tool::Line));
    }

    #[test]
    fn eraser_toggle_without_memory_stays_on_eraser() {
        let mut switcher = ToolSwitcher::new();
        assert_eq!(switcher.toggle_eraser(Tool::Eraser), None);
    }

    #[test]
    fn eraser_toggle_after_manual_tool_change_remembers_latest() {
        let mut switcher = ToolSwitcher::new();
        assert_eq!(switcher.toggle_eraser(Tool::Fill), Some(Tool::Eraser));
        // User clicked spray by hand, then toggles again
        assert_eq!(switcher.toggle_eraser(Tool::Spray), Some(Tool::Eraser));
        assert_eq!(switcher.toggle_eraser(Tool::Eraser), Some(Tool::Spray));
    }
}
