use crate::core::geo::Point;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in map units.
///
/// Invariants: `left <= right` and `bottom <= top` (map space is y-up).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ViewBox {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates a box from a center point and per-axis extents
    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        let half_w = width / 2.0;
        let half_h = height / 2.0;
        Self {
            top: center.y + half_h,
            right: center.x + half_w,
            bottom: center.y - half_h,
            left: center.x - half_w,
        }
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.bottom + self.top) / 2.0,
        )
    }

    /// Checks if the box contains a point
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.bottom && point.y <= self.top
    }

    /// Checks if the box intersects with another box
    pub fn intersects(&self, other: &ViewBox) -> bool {
        !(other.right < self.left
            || other.left > self.right
            || other.top < self.bottom
            || other.bottom > self.top)
    }

    /// Returns a new box expanded by the given amount on every side
    pub fn expanded(&self, amount: f64) -> ViewBox {
        ViewBox {
            top: self.top + amount,
            right: self.right + amount,
            bottom: self.bottom - amount,
            left: self.left - amount,
        }
    }

    /// Checks if the box is valid (`left <= right`, `bottom <= top`)
    pub fn is_valid(&self) -> bool {
        self.left <= self.right && self.bottom <= self.top
    }
}

/// Rectangular footprint: CSS-pixel-equivalent units for viewports, map
/// units for map extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Square footprint, the common case for game continents
    pub fn square(extent: f64) -> Self {
        Self::new(extent, extent)
    }

    pub fn major_axis(&self) -> f64 {
        self.width.max(self.height)
    }

    pub fn minor_axis(&self) -> f64 {
        self.width.min(self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Map-to-screen transform produced by the per-frame redraw pass.
///
/// `translate` is the screen position of the map origin in CSS pixels;
/// `scale` is the current zoom factor (pixels per map unit). Applying the
/// transform inverts the y axis, the single place where the y-up/y-down
/// boundary is crossed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translate: Point,
    pub scale: f64,
}

impl Transform {
    pub fn new(translate: Point, scale: f64) -> Self {
        Self { translate, scale }
    }

    /// Create identity transform (no change)
    pub fn identity() -> Self {
        Self {
            translate: Point::new(0.0, 0.0),
            scale: 1.0,
        }
    }

    /// Transform placing the given map-space view box on screen at `zoom`
    pub fn for_view(view_box: &ViewBox, zoom: f64) -> Self {
        Self {
            translate: Point::new(-view_box.left * zoom, view_box.top * zoom),
            scale: zoom,
        }
    }

    /// Map-space point to screen-space (y-down) pixels
    pub fn apply(&self, point: &Point) -> Point {
        Point::new(
            self.translate.x + point.x * self.scale,
            self.translate.y - point.y * self.scale,
        )
    }

    /// Screen-space pixels back to map space
    pub fn unapply(&self, pixel: &Point) -> Point {
        Point::new(
            (pixel.x - self.translate.x) / self.scale,
            (self.translate.y - pixel.y) / self.scale,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_box_dimensions() {
        let vb = ViewBox::new(40.0, 30.0, 20.0, 10.0);
        assert_eq!(vb.width(), 20.0);
        assert_eq!(vb.height(), 20.0);
        assert_eq!(vb.center(), Point::new(20.0, 30.0));
        assert!(vb.is_valid());
    }

    #[test]
    fn test_view_box_contains() {
        let vb = ViewBox::from_center(Point::new(0.0, 0.0), 10.0, 10.0);
        assert!(vb.contains(&Point::new(4.0, -4.0)));
        assert!(!vb.contains(&Point::new(6.0, 0.0)));
    }

    #[test]
    fn test_view_box_intersects() {
        let a = ViewBox::new(10.0, 10.0, 0.0, 0.0);
        let b = ViewBox::new(15.0, 15.0, 5.0, 5.0);
        let c = ViewBox::new(30.0, 30.0, 20.0, 20.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_transform_round_trip() {
        let vb = ViewBox::new(512.0, 512.0, 0.0, 0.0);
        let transform = Transform::for_view(&vb, 2.0);

        let map_point = Point::new(256.0, 256.0);
        let pixel = transform.apply(&map_point);
        // Map center of the box lands at the screen center, y inverted
        assert_eq!(pixel, Point::new(512.0, 512.0));
        assert_eq!(transform.unapply(&pixel), map_point);
    }

    #[test]
    fn test_transform_y_inversion() {
        let vb = ViewBox::new(100.0, 100.0, 0.0, 0.0);
        let transform = Transform::for_view(&vb, 1.0);

        // Top edge of the box is screen y = 0
        assert_eq!(transform.apply(&Point::new(0.0, 100.0)).y, 0.0);
        // Bottom edge is the bottom of the screen footprint
        assert_eq!(transform.apply(&Point::new(0.0, 0.0)).y, 100.0);
    }
}
