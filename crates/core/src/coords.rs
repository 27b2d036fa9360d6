//! Coordinate normalization between viewport and scaled space
//!
//! Viewport space is the pixel geometry of a page as currently rendered
//! (zoom-dependent). Scaled space is resolution-independent and is the only
//! space highlight positions are persisted in. Conversion is a pure function
//! of the page's viewport transform; nothing here knows about highlight
//! identity or rendering.

use crate::highlight::Position;

/// Axis-aligned rectangle with explicit corner coordinates
///
/// `(x1, y1)` is the top-left corner and `(x2, y2)` the bottom-right, in
/// whichever space the surrounding code is working in.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl Rect {
    /// Create a new rectangle from corner coordinates
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Smallest rectangle enclosing both `self` and `other`
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    /// Tight union of a list of rectangles
    ///
    /// Returns `None` for an empty list. This is how a highlight's bounding
    /// rectangle is derived from its per-line sub-rectangles.
    pub fn union_all(rects: &[Rect]) -> Option<Rect> {
        let (first, rest) = rects.split_first()?;
        Some(rest.iter().fold(*first, |acc, r| acc.union(r)))
    }

    /// Check whether the horizontal intervals of two rectangles intersect
    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.x1 <= other.x2 && self.x2 >= other.x1
    }
}

/// A page's current viewport transform
///
/// Supplied per page by the rendering collaborator: the page offset within
/// the viewport followed by a uniform zoom scale. Passed explicitly wherever
/// a conversion is needed; there is no ambient viewer handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageViewport {
    /// Zoom scale factor (1.0 = 100%)
    pub scale: f64,

    /// Horizontal page offset in viewport pixels
    pub offset_x: f64,

    /// Vertical page offset in viewport pixels
    pub offset_y: f64,
}

impl PageViewport {
    pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self { scale, offset_x, offset_y }
    }

    /// Viewport with a bare zoom scale and no page offset
    pub fn with_scale(scale: f64) -> Self {
        Self::new(scale, 0.0, 0.0)
    }
}

impl Default for PageViewport {
    fn default() -> Self {
        Self::with_scale(1.0)
    }
}

/// Convert a viewport-space rectangle to scaled space
pub fn to_scaled(rect: &Rect, viewport: &PageViewport) -> Rect {
    Rect {
        x1: (rect.x1 - viewport.offset_x) / viewport.scale,
        y1: (rect.y1 - viewport.offset_y) / viewport.scale,
        x2: (rect.x2 - viewport.offset_x) / viewport.scale,
        y2: (rect.y2 - viewport.offset_y) / viewport.scale,
    }
}

/// Convert a scaled-space rectangle back to viewport space
///
/// Used transiently when rendering; viewport-space rectangles are never
/// persisted.
pub fn to_viewport(rect: &Rect, viewport: &PageViewport) -> Rect {
    Rect {
        x1: rect.x1 * viewport.scale + viewport.offset_x,
        y1: rect.y1 * viewport.scale + viewport.offset_y,
        x2: rect.x2 * viewport.scale + viewport.offset_x,
        y2: rect.y2 * viewport.scale + viewport.offset_y,
    }
}

/// Convert a whole viewport-space position to scaled space
pub fn position_to_scaled(position: &Position, viewport: &PageViewport) -> Position {
    Position {
        page_number: position.page_number,
        bounding_rect: to_scaled(&position.bounding_rect, viewport),
        rects: position.rects.iter().map(|r| to_scaled(r, viewport)).collect(),
    }
}

/// Convert a scaled position back to viewport space
pub fn position_to_viewport(position: &Position, viewport: &PageViewport) -> Position {
    Position {
        page_number: position.page_number,
        bounding_rect: to_viewport(&position.bounding_rect, viewport),
        rects: position.rects.iter().map(|r| to_viewport(r, viewport)).collect(),
    }
}
