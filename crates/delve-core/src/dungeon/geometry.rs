//! Points and rectangles used throughout generation.

use serde::{Deserialize, Serialize};

/// A tile coordinate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    pub fn distance_sq(&self, other: Point) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }
}

/// An axis-aligned rectangle of tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// First column past the right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    /// First row past the bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Grow the rectangle by `margin` tiles on every side.
    pub fn expanded(&self, margin: i32) -> Rect {
        Rect::new(
            self.x - margin,
            self.y - margin,
            self.width + 2 * margin,
            self.height + 2 * margin,
        )
    }

    /// Shrink the rectangle by `margin` tiles on every side.
    /// May produce a rectangle with non-positive dimensions.
    pub fn shrunk(&self, margin: i32) -> Rect {
        self.expanded(-margin)
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance_sq() {
        let a = Point::new(0, 0);
        let b = Point::new(3, 4);
        assert_eq!(a.distance_sq(b), 25);
        assert_eq!(b.distance_sq(a), 25);
        assert_eq!(a.distance_sq(a), 0);
    }

    #[test]
    fn test_rect_edges_and_center() {
        let r = Rect::new(10, 20, 5, 4);
        assert_eq!(r.right(), 15);
        assert_eq!(r.bottom(), 24);
        assert_eq!(r.center(), Point::new(12, 22));
        assert_eq!(r.area(), 20);
    }

    #[test]
    fn test_rect_contains() {
        let r = Rect::new(2, 2, 3, 3);
        assert!(r.contains(Point::new(2, 2)));
        assert!(r.contains(Point::new(4, 4)));
        assert!(!r.contains(Point::new(5, 4)));
        assert!(!r.contains(Point::new(1, 2)));
    }

    #[test]
    fn test_rect_intersects() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        let c = Rect::new(10, 0, 5, 5);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        // Touching edges do not intersect.
        assert!(!a.intersects(&c));
        // But a padded rect does.
        assert!(a.expanded(1).intersects(&c));
    }

    #[test]
    fn test_rect_shrunk() {
        let r = Rect::new(5, 5, 10, 8).shrunk(2);
        assert_eq!(r, Rect::new(7, 7, 6, 4));
        let degenerate = Rect::new(0, 0, 3, 3).shrunk(2);
        assert!(degenerate.width < 0);
    }
}
