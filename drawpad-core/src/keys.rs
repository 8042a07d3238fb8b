//! Keyboard shortcuts.

use serde::{Deserialize, Serialize};

/// Text shown by the help link.
pub const HELP_TEXT: &str = "A simple drawing application with layers and simple tools.\n\n\
E : toggle eraser\n\
Z : undo\n\
Y : redo\n\
M : increase brush size\n\
N : decrease brush size\n\
+ : zoom in\n\
- : zoom out\n\
CTRL (hold) : dropper";

/// A single-character shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shortcut {
    /// `+`
    ZoomIn,
    /// `-`
    ZoomOut,
    /// `z`
    Undo,
    /// `y`
    Redo,
    /// `m`
    WidthUp,
    /// `n`
    WidthDown,
    /// `e`
    ToggleEraser,
}

impl Shortcut {
    /// Map a typed key to its shortcut. Case sensitive, like typed characters.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "+" => Some(Self::ZoomIn),
            "-" => Some(Self::ZoomOut),
            "z" => Some(Self::Undo),
            "y" => Some(Self::Redo),
            "m" => Some(Self::WidthUp),
            "n" => Some(Self::WidthDown),
            "e" => Some(Self::ToggleEraser),
            _ => None,
        }
    }
}

/// Where a key event originated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyTarget {
    /// The target is inside the pad's controls.
    pub inside_controls: bool,
    /// The target is an `<input>`.
    pub is_input: bool,
}

impl KeyTarget {
    /// Shortcuts are ignored while typing into inputs outside the controls.
    #[must_use]
    pub fn accepts_shortcuts(self) -> bool {
        self.inside_controls || !self.is_input
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_documented_key_maps() {
        let keys = ["+", "-", "z", "y", "m", "n", "e"];
        for key in keys {
            assert!(Shortcut::from_key(key).is_some(), "{key} unmapped");
            assert!(HELP_TEXT.contains(&key.to_uppercase()) || HELP_TEXT.contains(key));
        }
    }

    #[test]
    fn unknown_and_uppercase_keys_ignored() {
        assert_eq!(Shortcut::from_key("Z"), None);
        assert_eq!(Shortcut::from_key("q"), None);
        assert_eq!(Shortcut::from_key("Control"), None);
    }

    #[test]
    fn inputs_outside_controls_swallow_shortcuts() {
        let typing = KeyTarget {
            inside_controls: false,
            is_input: true,
        };
        assert!(!typing.accepts_shortcuts());

        let width_box = KeyTarget {
            inside_controls: true,
            is_input: true,
        };
        assert!(width_box.accepts_shortcuts());
        assert!(KeyTarget::default().accepts_shortcuts());
    }
}
