//! Layer panel bookkeeping.
//!
//! The drawing engine owns pixel data and opacity. The panel only tracks
//! which layer canvas sits at which position and which position is selected.
//! Position 0 is the background layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{PadError, PadResult};

/// Attribute carrying a layer canvas's panel position.
pub const LAYER_ATTRIBUTE: &str = "data-layer";

/// Attribute marking the selected item of an exclusive group.
pub const SELECTED_ATTRIBUTE: &str = "data-selected";

/// Stable identity of a layer canvas, assigned at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub usize);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a `data-layer` attribute value.
///
/// # Errors
///
/// [`PadError::MissingLayerTag`] when absent or empty,
/// [`PadError::InvalidLayerTag`] when not a non-negative integer.
pub fn parse_layer_tag(tag: Option<&str>) -> PadResult<usize> {
    let tag = tag.map(str::trim).filter(|t| !t.is_empty());
    let Some(tag) = tag else {
        return Err(PadError::MissingLayerTag);
    };
    tag.parse::<usize>()
        .map_err(|_| PadError::InvalidLayerTag(tag.to_string()))
}

/// Tooltip for the layer canvas at `position`.
#[must_use]
pub fn layer_title(position: usize) -> String {
    format!("Layer {}", position + 1)
}

/// Which layer canvas is displayed at each panel position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerPanel {
    slots: Vec<LayerId>,
    selected: usize,
}

impl LayerPanel {
    /// A panel of `count` layers in creation order, selecting the background.
    ///
    /// # Errors
    ///
    /// Returns [`PadError::InvalidConfig`] for an empty panel.
    pub fn new(count: usize) -> PadResult<Self> {
        if count == 0 {
            return Err(PadError::InvalidConfig(
                "layer panel needs at least one layer".to_string(),
            ));
        }
        Ok(Self {
            slots: (0..count).map(LayerId).collect(),
            selected: 0,
        })
    }

    /// Number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false`: a panel cannot be built empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Selected position.
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Layer canvases in panel order.
    #[must_use]
    pub fn order(&self) -> &[LayerId] {
        &self.slots
    }

    /// Layer canvas at `position`.
    #[must_use]
    pub fn id_at(&self, position: usize) -> Option<LayerId> {
        self.slots.get(position).copied()
    }

    /// Position of a layer canvas.
    #[must_use]
    pub fn position_of(&self, id: LayerId) -> Option<usize> {
        self.slots.iter().position(|slot| *slot == id)
    }

    /// Whether `position` is in the panel.
    ///
    /// # Errors
    ///
    /// Returns [`PadError::LayerOutOfRange`] otherwise.
    pub fn check(&self, position: usize) -> PadResult<()> {
        if position < self.slots.len() {
            Ok(())
        } else {
            Err(PadError::LayerOutOfRange {
                index: position,
                count: self.slots.len(),
            })
        }
    }

    /// Select the layer at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`PadError::LayerOutOfRange`] for a position outside the panel.
    pub fn select(&mut self, position: usize) -> PadResult<()> {
        self.check(position)?;
        self.selected = position;
        Ok(())
    }

    /// Exchange the canvases at `a` and `b`. A selected layer moves with its canvas.
    ///
    /// # Errors
    ///
    /// Returns [`PadError::LayerOutOfRange`] if either position is outside the panel.
    pub fn swap(&mut self, a: usize, b: usize) -> PadResult<()> {
        self.check(a)?;
        self.check(b)?;
        self.slots.swap(a, b);
        if self.selected == a {
            self.selected = b;
        } else if self.selected == b {
            self.selected = a;
        }
        Ok(())
    }

    /// Left neighbour of `position`, wrapping to the last layer.
    #[must_use]
    pub fn left_of(&self, position: usize) -> usize {
        let n = self.slots.len();
        (position % n + n - 1) % n
    }

    /// Right neighbour of `position`, wrapping to the background.
    #[must_use]
    pub fn right_of(&self, position: usize) -> usize {
        (position + 1) % self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_parsing() {
        assert_eq!(parse_layer_tag(Some("2")).expect("valid"), 2);
        assert_eq!(parse_layer_tag(Some(" 0 ")).expect("valid"), 0);
        assert!(matches!(parse_layer_tag(None), Err(PadError::MissingLayerTag)));
        assert!(matches!(parse_layer_tag(Some("")), Err(PadError::MissingLayerTag)));
        assert!(matches!(
            parse_layer_tag(Some("-1")),
            Err(PadError::InvalidLayerTag(_))
        ));
        assert!(matches!(
            parse_layer_tag(Some("two")),
            Err(PadError::InvalidLayerTag(_))
        ));
    }

    #[test]
    fn titles_are_one_based() {
        assert_eq!(layer_title(0), "Layer 1");
        assert_eq!(layer_title(3), "Layer 4");
    }

    #[test]
    fn empty_panel_is_rejected() {
        assert!(LayerPanel::new(0).is_err());
    }

    #[test]
    fn select_out_of_range_fails() {
        let mut panel = LayerPanel::new(4).expect("valid");
        assert!(panel.select(3).is_ok());
        assert!(matches!(
            panel.select(4),
            Err(PadError::LayerOutOfRange { index: 4, count: 4 })
        ));
        assert_eq!(panel.selected(), 3);
    }

    #[test]
    fn selection_follows_swapped_layer() {
        let mut panel = LayerPanel::new(4).expect("valid");
        panel.select(2).expect("in range");
        panel.swap(2, 1).expect("in range");
        assert_eq!(panel.selected(), 1);
        assert_eq!(panel.id_at(1), Some(LayerId(2)));
        assert_eq!(panel.position_of(LayerId(1)), Some(2));

        // Swapping two other layers leaves selection alone
        panel.swap(0, 3).expect("in range");
        assert_eq!(panel.selected(), 1);
    }

    #[test]
    fn neighbours_wrap() {
        let panel = LayerPanel::new(4).expect("valid");
        assert_eq!(panel.left_of(0), 3);
        assert_eq!(panel.left_of(2), 1);
        assert_eq!(panel.right_of(3), 0);
        assert_eq!(panel.right_of(1), 2);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_double_swap_is_identity(
                count in 1usize..8,
                a in 0usize..8,
                b in 0usize..8,
                selected in 0usize..8,
            ) {
                let mut panel = LayerPanel::new(count).expect("non-empty");
                let (a, b, selected) = (a % count, b % count, selected % count);
                panel.select(selected).expect("in range");
                let before = panel.clone();

                panel.swap(a, b).expect("in range");
                prop_assert_eq!(panel.len(), count);
                panel.swap(a, b).expect("in range");
                prop_assert_eq!(panel, before);
            }
        }
    }
}
