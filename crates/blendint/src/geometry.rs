//! Integer geometry primitives.
//!
//! All coordinates are whole pixels in the OpenGL convention: the origin is
//! the bottom-left corner and `y` grows upward. A view's position is the
//! bottom-left corner of its rectangle, relative to its container.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

// =============================================================================
// Point
// =============================================================================

/// A 2D integer point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// This point moved by `(dx, dy)`.
    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

// =============================================================================
// Size
// =============================================================================

/// A 2D integer size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Zero size.
    pub const ZERO: Self = Self {
        width: 0,
        height: 0,
    };

    /// Create a new size.
    #[inline]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True if either dimension is zero or negative.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Size) -> Size {
        Size::new(self.width.max(other.width), self.height.max(other.height))
    }

    /// Clamp negative components to zero.
    #[inline]
    pub fn clamp_non_negative(self) -> Size {
        Size::new(self.width.max(0), self.height.max(0))
    }
}

// =============================================================================
// Rect
// =============================================================================

/// An axis-aligned rectangle anchored at its bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    /// Create a rectangle from its bottom-left corner and extent.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    #[inline]
    pub const fn left(&self) -> i32 {
        self.origin.x
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.origin.x + self.size.width
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.origin.y
    }

    #[inline]
    pub const fn top(&self) -> i32 {
        self.origin.y + self.size.height
    }

    /// Half-open containment: the left/bottom edges are inside, right/top are not.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.bottom()
            && point.y < self.top()
    }

    /// The rectangle moved by `(dx, dy)`.
    #[inline]
    pub fn translated(&self, dx: i32, dy: i32) -> Rect {
        Rect::from_origin_size(self.origin.offset(dx, dy), self.size)
    }

    /// The rectangle shrunk by `margin` on each side, clamped to zero size.
    pub fn shrink(&self, margin: Margin) -> Rect {
        Rect::from_origin_size(
            self.origin.offset(margin.left, margin.bottom),
            Size::new(
                self.size.width - margin.horizontal(),
                self.size.height - margin.vertical(),
            )
            .clamp_non_negative(),
        )
    }
}

// =============================================================================
// Margin
// =============================================================================

/// Space reserved around content, per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub left: i32,
    pub right: i32,
    pub top: i32,
    pub bottom: i32,
}

impl Margin {
    /// No margin.
    pub const ZERO: Self = Self::uniform(0);

    /// Create a margin with explicit sides.
    #[inline]
    pub const fn new(left: i32, right: i32, top: i32, bottom: i32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// The same margin on every side.
    #[inline]
    pub const fn uniform(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sum of left and right.
    #[inline]
    pub const fn horizontal(&self) -> i32 {
        self.left + self.right
    }

    /// Sum of top and bottom.
    #[inline]
    pub const fn vertical(&self) -> i32 {
        self.top + self.bottom
    }
}
