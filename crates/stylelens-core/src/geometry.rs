#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! All values are CSS pixels. [`ClientRect`] is viewport-relative (what a
//! bounding-box query returns); [`Geometry`] is document-absolute.

/// A viewport-relative box as reported by the host's bounding-box query.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClientRect {
    /// Left edge relative to the viewport.
    pub x: f64,
    /// Top edge relative to the viewport.
    pub y: f64,
    /// Width in CSS pixels.
    pub width: f64,
    /// Height in CSS pixels.
    pub height: f64,
}

impl ClientRect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Check if either dimension is zero (or negative).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// The visible area of the host plus its current scroll offsets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

impl Viewport {
    /// A viewport scrolled to the origin.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    /// Set the scroll offsets.
    #[must_use]
    pub const fn with_scroll(mut self, scroll_x: f64, scroll_y: f64) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }
}

/// Document-absolute box of the inspected element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

impl Geometry {
    /// Create a new geometry from document coordinates.
    #[inline]
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Convert a viewport-relative box to document coordinates by adding the
    /// viewport's scroll offsets.
    pub fn from_client_rect(rect: ClientRect, viewport: &Viewport) -> Self {
        Self {
            top: rect.y + viewport.scroll_y,
            left: rect.x + viewport.scroll_x,
            width: rect.width,
            height: rect.height,
        }
    }

    /// Bottom edge (exclusive) in document coordinates.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Width rounded to whole pixels, as shown in the panel summary.
    #[inline]
    pub fn rounded_width(&self) -> i64 {
        self.width.round() as i64
    }

    /// Height rounded to whole pixels, as shown in the panel summary.
    #[inline]
    pub fn rounded_height(&self) -> i64 {
        self.height.round() as i64
    }
}
