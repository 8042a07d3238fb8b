//! PNG export naming.

/// MIME type of exported images.
pub const PNG_MIME: &str = "image/png";

/// Download file name for an export taken at `unix_seconds`.
#[must_use]
pub fn export_file_name(unix_seconds: u64) -> String {
    format!("draw_{unix_seconds}.png")
}

/// Whole seconds from a JavaScript millisecond timestamp.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn unix_seconds_from_millis(millis: f64) -> u64 {
    if millis.is_finite() && millis > 0.0 {
        (millis / 1000.0).floor() as u64
    } else {
        0
    }
}
