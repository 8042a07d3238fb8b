//! Colors: RGB triples, HSV, and the hex strings the native color input uses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{PadError, PadResult};

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

/// A color in HSV space, every component in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsv {
    /// Hue, as a fraction of a full turn.
    pub h: f64,
    /// Saturation.
    pub s: f64,
    /// Value (brightness).
    pub v: f64,
}

impl Rgb {
    /// Opaque white, the background layer fill.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`, the format `<input type="color">` accepts.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Parse `#rgb` or `#rrggbb` (the leading `#` is optional).
    ///
    /// # Errors
    ///
    /// Returns [`PadError::InvalidColor`] for anything else.
    pub fn from_hex(hex: &str) -> PadResult<Self> {
        let invalid = || PadError::InvalidColor(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                let mut out = [0u8; 3];
                for (slot, c) in out.iter_mut().zip(digits.chars()) {
                    let nibble = channel(&c.to_string())?;
                    *slot = nibble * 17;
                }
                Ok(Self::new(out[0], out[1], out[2]))
            }
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Parse `rgb(r, g, b)` or `rgba(r, g, b, a)`; alpha is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PadError::InvalidColor`] when the function syntax or a channel is bad.
    pub fn from_css_function(css: &str) -> PadResult<Self> {
        let invalid = || PadError::InvalidColor(css.to_string());
        let trimmed = css.trim();
        let body = trimmed
            .strip_prefix("rgba(")
            .or_else(|| trimmed.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(invalid());
        }

        let mut channels = [0u8; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            let value: f64 = part.parse().map_err(|_| invalid())?;
            if !(0.0..=255.0).contains(&value) {
                return Err(invalid());
            }
            *slot = unit_to_channel(value / 255.0);
        }
        Ok(Self::new(channels[0], channels[1], channels[2]))
    }

    /// Convert to HSV.
    ///
    /// Gray colors (all channels equal) get hue 0.
    #[must_use]
    pub fn to_hsv(self) -> Hsv {
        let (r, g, b) = (f64::from(self.r), f64::from(self.g), f64::from(self.b));
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let d = max - min;

        let s = if max == 0.0 { 0.0 } else { d / max };
        let v = max / 255.0;

        #[allow(clippy::float_cmp)]
        let h = if max == min {
            0.0
        } else if max == r {
            let wrap = if g < b { 6.0 } else { 0.0 };
            ((g - b) + d * wrap) / (6.0 * d)
        } else if max == g {
            ((b - r) + d * 2.0) / (6.0 * d)
        } else {
            ((r - g) + d * 4.0) / (6.0 * d)
        };

        Hsv { h, s, v }
    }
}

impl Hsv {
    /// Create an HSV color.
    #[must_use]
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Convert to RGB using the six-sector formula.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::many_single_char_names)]
    pub fn to_rgb(self) -> Rgb {
        let Self { h, s, v } = self;
        let sector = (h * 6.0).floor();
        let f = h * 6.0 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - f * s);
        let t = v * (1.0 - (1.0 - f) * s);

        let (r, g, b) = match (sector as i64).rem_euclid(6) {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };

        Rgb::new(
            unit_to_channel(r),
            unit_to_channel(g),
            unit_to_channel(b),
        )
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn unit_to_channel(x: f64) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Normalise any color string the engine may report to `#rrggbb`.
///
/// # Errors
///
/// Returns [`PadError::InvalidColor`] when the string is neither hex nor `rgb()`.
pub fn normalize_color(color: &str) -> PadResult<String> {
    color.parse::<Rgb>().map(Rgb::to_hex)
}

impl FromStr for Rgb {
    type Err = PadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.starts_with("rgb") {
            Self::from_css_function(trimmed)
        } else {
            Self::from_hex(trimmed)
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Hsv> for Rgb {
    fn from(hsv: Hsv) -> Self {
        hsv.to_rgb()
    }
}

impl From<Rgb> for Hsv {
    fn from(rgb: Rgb) -> Self {
        rgb.to_hsv()
    }
}
