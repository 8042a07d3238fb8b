//! Pan and zoom of the canvas inside the easel.
//!
//! The canvas container is centred in the easel and then shifted by the pan
//! offset. Zoom levels are integers; the canvas is scaled by `2^zoom`.

use serde::{Deserialize, Serialize};

/// A width/height pair in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A point in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where and how large the canvas container should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Integer scale applied to the canvas.
    pub scale: u32,
    /// Container size after scaling.
    pub container: Size,
    /// Container left edge relative to the easel.
    pub left: f64,
    /// Container top edge relative to the easel.
    pub top: f64,
}

/// Pan offset and zoom level state.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    offset: Point,
    zoom: u32,
    min_zoom: u32,
    max_zoom: u32,
    canvas: Size,
    pan_origin: Option<Point>,
}

impl Navigation {
    /// Navigation for a canvas of the given unscaled size, starting at `min_zoom`.
    #[must_use]
    pub fn new(canvas: Size, min_zoom: u32, max_zoom: u32) -> Self {
        Self {
            offset: Point::default(),
            zoom: min_zoom,
            min_zoom,
            max_zoom,
            canvas,
            pan_origin: None,
        }
    }

    /// Current zoom level.
    #[must_use]
    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    /// Zoom bounds `(min, max)`.
    #[must_use]
    pub fn zoom_bounds(&self) -> (u32, u32) {
        (self.min_zoom, self.max_zoom)
    }

    /// Current pan offset.
    #[must_use]
    pub fn offset(&self) -> Point {
        self.offset
    }

    /// Canvas scale factor for the current zoom.
    #[must_use]
    pub fn scale(&self) -> u32 {
        scale_for(self.zoom)
    }

    /// Canvas size after scaling.
    #[must_use]
    pub fn scaled_canvas(&self) -> Size {
        let scale = f64::from(self.scale());
        Size::new(self.canvas.width * scale, self.canvas.height * scale)
    }

    /// Change the zoom by `delta`, keeping `anchor` (easel coordinates) fixed.
    ///
    /// Without an anchor the easel centre stays fixed. Returns `None` and
    /// changes nothing when the new zoom would leave the bounds.
    pub fn update_zoom(&mut self, delta: i32, anchor: Option<Point>, easel: Size) -> Option<Placement> {
        let candidate = i64::from(self.zoom) + i64::from(delta);
        tracing::trace!(
            "Attempting zoom update: anchor {:?}, candidate {}",
            anchor,
            candidate
        );

        if candidate < i64::from(self.min_zoom) || candidate > i64::from(self.max_zoom) {
            return None;
        }
        let new_zoom = u32::try_from(candidate).ok()?;

        let (cx, cy) = match anchor {
            Some(a) => (a.x - easel.width / 2.0, a.y - easel.height / 2.0),
            None => (0.0, 0.0),
        };

        let old = self.scaled_canvas();
        self.zoom = new_zoom;
        let new = self.scaled_canvas();

        if old.width > 0.0 && old.height > 0.0 {
            self.offset.x = (new.width / old.width) * (self.offset.x - cx) + cx;
            self.offset.y = (new.height / old.height) * (self.offset.y - cy) + cy;
        }

        tracing::debug!("Zoom set to {}", new_zoom);
        Some(self.refresh_location(easel))
    }

    /// Container placement for the current offset and zoom.
    #[must_use]
    pub fn refresh_location(&self, easel: Size) -> Placement {
        let container = self.scaled_canvas();
        Placement {
            scale: self.scale(),
            container,
            left: (easel.width - container.width) / 2.0 + self.offset.x,
            top: (easel.height - container.height) / 2.0 + self.offset.y,
        }
    }

    /// Return to the origin at minimum zoom.
    pub fn reset(&mut self, easel: Size) -> Placement {
        tracing::debug!("Resetting navigation");
        self.offset = Point::default();
        self.zoom = self.min_zoom;
        self.pan_origin = None;
        self.refresh_location(easel)
    }

    /// Begin a pan drag at `real`.
    pub fn pan_start(&mut self, real: Point) {
        self.pan_origin = Some(real);
    }

    /// Continue a pan drag to `real`. Returns `None` when no drag was started.
    pub fn pan_to(&mut self, real: Point, easel: Size) -> Option<Placement> {
        let origin = self.pan_origin?;
        self.pan_origin = Some(real);
        self.offset.x += real.x - origin.x;
        self.offset.y += real.y - origin.y;
        Some(self.refresh_location(easel))
    }

    /// Unscaled canvas coordinate under an easel point.
    #[must_use]
    pub fn canvas_point_at(&self, easel_point: Point, easel: Size) -> Point {
        let placement = self.refresh_location(easel);
        let scale = f64::from(placement.scale);
        Point::new(
            (easel_point.x - placement.left) / scale,
            (easel_point.y - placement.top) / scale,
        )
    }
}

/// Scale factor `2^zoom`, saturating for absurd levels.
#[must_use]
pub fn scale_for(zoom: u32) -> u32 {
    1u32.checked_shl(zoom).unwrap_or(u32::MAX)
}
