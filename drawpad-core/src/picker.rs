//! HSV slider model behind the color picker overlay.

use crate::{Hsv, PadResult, Rgb};

/// Slider granularity.
pub const SLIDER_STEP: f64 = 0.01;

/// One of the three HSV sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HsvChannel {
    /// Hue slider.
    Hue,
    /// Saturation slider.
    Saturation,
    /// Value slider.
    Value,
}

impl HsvChannel {
    /// Sliders in display order.
    pub const ALL: [Self; 3] = [Self::Hue, Self::Saturation, Self::Value];

    /// Label shown above the slider.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Hue => "Hue:",
            Self::Saturation => "Saturation:",
            Self::Value => "Value:",
        }
    }
}

/// Picker state seeded from the color input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorPicker {
    hsv: Hsv,
}

impl ColorPicker {
    /// Open the picker on the color input's current value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::PadError::InvalidColor`] when the value does not parse.
    pub fn open(color: &str) -> PadResult<Self> {
        let rgb: Rgb = color.parse()?;
        Ok(Self { hsv: rgb.to_hsv() })
    }

    /// Current slider position of `channel`.
    #[must_use]
    pub fn get(&self, channel: HsvChannel) -> f64 {
        match channel {
            HsvChannel::Hue => self.hsv.h,
            HsvChannel::Saturation => self.hsv.s,
            HsvChannel::Value => self.hsv.v,
        }
    }

    /// Move a slider. Values are clamped to `[0, 1]`; NaN is ignored.
    pub fn set(&mut self, channel: HsvChannel, value: f64) {
        if value.is_nan() {
            return;
        }
        let value = value.clamp(0.0, 1.0);
        match channel {
            HsvChannel::Hue => self.hsv.h = value,
            HsvChannel::Saturation => self.hsv.s = value,
            HsvChannel::Value => self.hsv.v = value,
        }
    }

    /// The picked color.
    #[must_use]
    pub fn rgb(&self) -> Rgb {
        self.hsv.to_rgb()
    }

    /// The picked color as `#rrggbb`.
    #[must_use]
    pub fn hex(&self) -> String {
        self.rgb().to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_preserves_color() {
        let picker = ColorPicker::open("#3366cc").expect("valid");
        assert_eq!(picker.hex(), "#3366cc");
    }

    #[test]
    fn sliders_drive_color() {
        let mut picker = ColorPicker::open("#000000").expect("valid");
        assert!((picker.get(HsvChannel::Value)).abs() < f64::EPSILON);
        picker.set(HsvChannel::Value, 1.0);
        assert_eq!(picker.hex(), "#ffffff");
        picker.set(HsvChannel::Saturation, 1.0);
        assert_eq!(picker.hex(), "#ff0000");
        picker.set(HsvChannel::Hue, 2.0 / 3.0);
        assert_eq!(picker.hex(), "#0000ff");
    }

    #[test]
    fn out_of_range_values_clamp() {
        let mut picker = ColorPicker::open("#808080").expect("valid");
        picker.set(HsvChannel::Saturation, 4.0);
        assert!((picker.get(HsvChannel::Saturation) - 1.0).abs() < f64::EPSILON);
        picker.set(HsvChannel::Hue, -1.0);
        assert!(picker.get(HsvChannel::Hue).abs() < f64::EPSILON);
        picker.set(HsvChannel::Value, f64::NAN);
        assert!((picker.get(HsvChannel::Value) - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn invalid_input_value_fails() {
        assert!(ColorPicker::open("chartreuse").is_err());
    }

    #[test]
    fn labels() {
        let labels: Vec<&str> = HsvChannel::ALL.iter().map(|c| c.label()).collect();
        assert_eq!(labels, ["Hue:", "Saturation:", "Value:"]);
    }
}
