//! Basic geometric types for page-space computation
//!
//! Coordinates are in document points, as supplied by the PDF layer. The
//! containment math only relies on relative positions, so either vertical
//! orientation (top-down or bottom-up) works as long as one document uses
//! one consistently.

/// A point in 2D page space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in x0/y0/x1/y1 form
///
/// Construction normalizes the corners so that `x0 <= x1` and `y0 <= y1`
/// always hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x0: f64,
    /// First vertical edge
    pub y0: f64,
    /// Right edge
    pub x1: f64,
    /// Second vertical edge
    pub y1: f64,
}

impl Rect {
    /// Create a new rectangle from two opposite corners
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Get the width
    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    /// Get the height
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Get the area
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Intersection with another rectangle, `None` when they do not overlap
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x0 = self.x0.max(other.x0);
        let y0 = self.y0.max(other.y0);
        let x1 = self.x1.min(other.x1);
        let y1 = self.y1.min(other.y1);
        if x0 < x1 && y0 < y1 {
            Some(Rect { x0, y0, x1, y1 })
        } else {
            None
        }
    }

    /// Smallest rectangle covering both `self` and `other`
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }
}

/// One quadrilateral strip of a highlight annotation
///
/// Highlights spanning several text lines carry one quad per line. Corner
/// order follows the annotation's vertex list; the bounding rectangle is
/// computed from corner extremes, so any corner ordering is accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    /// The four corners
    pub points: [Point; 4],
}

impl Quad {
    /// Create a quad from its four corners
    pub fn new(points: [Point; 4]) -> Self {
        Self { points }
    }

    /// Create a degenerate quad covering a rectangle
    pub fn from_rect(rect: Rect) -> Self {
        Self {
            points: [
                Point::new(rect.x0, rect.y1),
                Point::new(rect.x1, rect.y1),
                Point::new(rect.x0, rect.y0),
                Point::new(rect.x1, rect.y0),
            ],
        }
    }

    /// Axis-aligned bounding rectangle of the four corners
    pub fn bounding_rect(&self) -> Rect {
        let mut x0 = self.points[0].x;
        let mut y0 = self.points[0].y;
        let mut x1 = self.points[0].x;
        let mut y1 = self.points[0].y;
        for p in &self.points[1..] {
            x0 = x0.min(p.x);
            y0 = y0.min(p.y);
            x1 = x1.max(p.x);
            y1 = y1.max(p.y);
        }
        Rect { x0, y0, x1, y1 }
    }
}
