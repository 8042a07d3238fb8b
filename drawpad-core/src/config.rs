//! Pad configuration supplied by the hosting page.

use serde::{Deserialize, Serialize};

use crate::{PadError, PadResult};

/// Smallest brush width.
pub const MIN_LINE_WIDTH: u32 = 1;
/// Largest brush width.
pub const MAX_LINE_WIDTH: u32 = 99;
/// Highest zoom level accepted by validation (scale 2^16).
pub const ZOOM_LIMIT: u32 = 16;

/// Construction options for a drawing pad.
///
/// Every field has a default, so hosts may pass partial JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Number of drawing layers, including the background.
    pub layer_count: usize,
    /// Undo steps kept by the engine.
    pub max_undos: u32,
    /// Lowest zoom level.
    pub min_zoom: u32,
    /// Highest zoom level.
    pub max_zoom: u32,
    /// Layer selected after generation.
    pub initial_layer: usize,
    /// Whether the cursor position bar is shown.
    pub show_info: bool,
    /// Zoom steps per mouse wheel notch, handed to the engine.
    pub wheel_zoom: i32,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            layer_count: 4,
            max_undos: 10,
            min_zoom: 0,
            max_zoom: 7,
            initial_layer: 1,
            show_info: true,
            wheel_zoom: 1,
        }
    }
}

impl PadConfig {
    /// Parse host JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or validation fails.
    pub fn from_json(json: &str) -> PadResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations the pad cannot honour.
    ///
    /// # Errors
    ///
    /// Returns [`PadError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> PadResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PadError::InvalidConfig(format!(
                "canvas size {}x{} must be non-zero",
                self.width, self.height
            )));
        }
        if self.layer_count == 0 {
            return Err(PadError::InvalidConfig(
                "at least one layer is required".to_string(),
            ));
        }
        if self.max_undos == 0 {
            return Err(PadError::InvalidConfig(
                "max_undos must be at least 1".to_string(),
            ));
        }
        if self.min_zoom > self.max_zoom {
            return Err(PadError::InvalidConfig(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if self.max_zoom > ZOOM_LIMIT {
            return Err(PadError::InvalidConfig(format!(
                "max_zoom {} exceeds {ZOOM_LIMIT}",
                self.max_zoom
            )));
        }
        Ok(())
    }

    /// The initially selected layer, clamped into the panel.
    #[must_use]
    pub fn initial_layer(&self) -> usize {
        self.initial_layer.min(self.layer_count.saturating_sub(1))
    }
}

/// Clamp a requested brush width into the accepted range.
#[must_use]
pub fn clamp_line_width(width: i64) -> u32 {
    let clamped = width.clamp(i64::from(MIN_LINE_WIDTH), i64::from(MAX_LINE_WIDTH));
    u32::try_from(clamped).unwrap_or(MIN_LINE_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = PadConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width, 200);
        assert_eq!(config.layer_count, 4);
        assert_eq!(config.max_undos, 10);
        assert_eq!((config.min_zoom, config.max_zoom), (0, 7));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = PadConfig::from_json(r#"{"width": 640, "layer_count": 2}"#).expect("valid");
        assert_eq!(config.width, 640);
        assert_eq!(config.height, 200);
        assert_eq!(config.layer_count, 2);
        assert_eq!(config.initial_layer(), 1);
    }

    #[test]
    fn single_layer_selects_background() {
        let config = PadConfig {
            layer_count: 1,
            ..PadConfig::default()
        };
        assert_eq!(config.initial_layer(), 0);
    }

    #[test]
    fn invalid_configs_rejected() {
        let cases = [
            r#"{"width": 0}"#,
            r#"{"layer_count": 0}"#,
            r#"{"max_undos": 0}"#,
            r#"{"min_zoom": 5, "max_zoom": 2}"#,
            r#"{"max_zoom": 40}"#,
        ];
        for json in cases {
            assert!(
                matches!(PadConfig::from_json(json), Err(PadError::InvalidConfig(_))),
                "{json} accepted"
            );
        }
        assert!(matches!(
            PadConfig::from_json("{nope"),
            Err(PadError::Serialization(_))
        ));
    }

    #[test]
    fn line_width_clamps() {
        assert_eq!(clamp_line_width(0), 1);
        assert_eq!(clamp_line_width(-5), 1);
        assert_eq!(clamp_line_width(42), 42);
        assert_eq!(clamp_line_width(1000), 99);
    }
}
