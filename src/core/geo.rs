use crate::traits::PointMath;
use serde::{Deserialize, Serialize};

/// Represents a position in map space.
///
/// Map space is measured in game meters with y growing upward; screen space
/// grows downward, so every conversion between the two inverts the y axis
/// (see [`crate::core::bounds::Transform`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rounds both components to integer map units
    pub fn round(&self) -> Point {
        Point::new(self.x.round(), self.y.round())
    }

    pub fn floor(&self) -> Point {
        Point::new(self.x.floor(), self.y.floor())
    }
}

impl PointMath for Point {
    fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    fn subtract(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    fn multiply(&self, scalar: f64) -> Point {
        Point::new(self.x * scalar, self.y * scalar)
    }

    fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

/// Integer tile-grid index within a single LOD's addressing space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: u32,
    pub y: u32,
}

impl GridPos {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// World-tile coordinate as embedded in tile asset names.
///
/// `x`/`y` are centered grid coordinates (origin at the map center) in units
/// of the finest tile step; `lod` selects the pre-rendered resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
    pub lod: u8,
}

impl TileCoord {
    pub fn new(x: i32, y: i32, lod: u8) -> Self {
        Self { x, y, lod }
    }
}

/// Formats one tile coordinate for tile asset names.
///
/// Wire-format contract with the tile server: fixed 3-character zero padding,
/// with a leading `-` replacing the first padding zero for negative values.
/// `7` becomes `"007"`, `-7` becomes `"-07"`, `123` stays `"123"`.
pub fn format_tile_coord(value: i32) -> String {
    if value < 0 {
        format!("-{:02}", -value)
    } else {
        format!("{:03}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_math() {
        let a = Point::new(1.5, -2.0);
        let b = Point::new(0.5, 3.0);
        assert_eq!(a.add(&b), Point::new(2.0, 1.0));
        assert_eq!(a.subtract(&b), Point::new(1.0, -5.0));
        assert_eq!(b.multiply(2.0), Point::new(1.0, 6.0));
        assert_eq!(Point::new(0.0, 0.0).distance_to(&Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_point_round() {
        assert_eq!(Point::new(1.4, -1.6).round(), Point::new(1.0, -2.0));
    }

    #[test]
    fn test_tile_coord_formatting() {
        assert_eq!(format_tile_coord(7), "007");
        assert_eq!(format_tile_coord(-7), "-07");
        assert_eq!(format_tile_coord(123), "123");
        assert_eq!(format_tile_coord(0), "000");
        assert_eq!(format_tile_coord(-123), "-123");
    }
}
