use std::fmt::Display;
use std::ops::{Add, Sub};

/// Integer coordinate. Used both for grid cells and for output pixels;
/// which space a `Point` lives in is up to whoever holds it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}
impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
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
impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}
impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Edges of an axis-aligned rectangle.
/// `right` and `bottom` are `left + width` and `top + height`, so they sit one past the last pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}
impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            left: x,
            top: y,
            right: x + width,
            bottom: y + height,
        }
    }
}

/// `true` if the two rectangles share at least one point.
///
/// The comparison is inclusive on every edge, so rectangles that only touch still overlap.
/// The pointer hotspot relies on this to register the pixel right on the canvas border.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.bottom >= b.top && a.top <= b.bottom && a.right >= b.left && a.left <= b.right
}

/// A fixed rectangle, expressed in its owner's coordinate space
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    origin: Point,
    size: Size,
}
impl BoundingBox {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    /// A copy of this box moved to `origin`; the size never changes.
    pub fn moved_to(self, origin: Point) -> Self {
        Self { origin, ..self }
    }

    /// Rectangle in a parent space where this box's units are `scale` pixels wide
    /// and the parent puts our origin at `offset`.
    pub fn rect(&self, offset: Point, scale: u32) -> Rect {
        let scale = scale as i32;
        Rect::new(
            offset.x + self.origin.x * scale,
            offset.y + self.origin.y * scale,
            self.size.width as i32 * scale,
            self.size.height as i32 * scale,
        )
    }

    pub fn bounds(&self) -> Rect {
        self.rect(Point::default(), 1)
    }
}
