use crate::{core::geo::Point, MapError, Result};
use serde::{Deserialize, Serialize};

/// Straight-alpha RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
}

/// Styles for different rendering primitives
#[derive(Debug, Clone, PartialEq)]
pub struct LineStyle {
    pub color: Color,
    pub width: f64,
    pub opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonStyle {
    pub fill_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f64,
    pub fill_opacity: f32,
    pub stroke_opacity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub color: Color,
    pub icon_size: f64,
    pub label_size: f64,
}

/// Commands that can be issued to the render context
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Raster tile addressed by URL; bounds are min/max screen coordinates
    TileImage {
        url: String,
        bounds: (Point, Point),
        opacity: f32,
    },
    Line {
        points: Vec<Point>,
        style: LineStyle,
    },
    Polygon {
        exterior: Vec<Point>,
        style: PolygonStyle,
    },
    Marker {
        position: Point,
        label: String,
        style: MarkerStyle,
    },
}

/// Retained draw-command sink handed to every layer's `render`.
///
/// The context does not rasterize anything itself; the queue is consumed by
/// whatever drawing surface hosts the map.
pub struct RenderContext {
    pub width: u32,
    pub height: u32,
    /// Drawing primitives queue, consumed by the host surface each frame
    pub drawing_queue: Vec<DrawCommand>,
    /// Viewport clipping bounds (min, max) in screen coordinates
    pub clip_bounds: Option<(Point, Point)>,
    /// Whether clipping is enabled
    pub clipping_enabled: bool,
}

impl RenderContext {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            drawing_queue: Vec::new(),
            clip_bounds: None,
            clipping_enabled: false,
        }
    }

    /// Begin a frame
    pub fn begin_frame(&mut self) {
        self.drawing_queue.clear();
    }

    /// Queue a tile image covering the given screen bounds
    pub fn render_tile(&mut self, url: String, bounds: (Point, Point), opacity: f32) -> Result<()> {
        if bounds.0.x >= bounds.1.x || bounds.0.y >= bounds.1.y {
            return Err(MapError::Layer("invalid tile bounds".into()).into());
        }
        if !(0.0..=1.0).contains(&opacity) {
            return Err(MapError::Layer("opacity must be between 0.0 and 1.0".into()).into());
        }

        if let Some(clipped) = self.clip_to_viewport(bounds) {
            self.drawing_queue.push(DrawCommand::TileImage {
                url,
                bounds: clipped,
                opacity,
            });
        }
        Ok(())
    }

    pub fn render_line(&mut self, points: &[Point], style: &LineStyle) {
        self.drawing_queue.push(DrawCommand::Line {
            points: points.to_vec(),
            style: style.clone(),
        });
    }

    pub fn render_polygon(&mut self, exterior: &[Point], style: &PolygonStyle) {
        self.drawing_queue.push(DrawCommand::Polygon {
            exterior: exterior.to_vec(),
            style: style.clone(),
        });
    }

    pub fn render_marker(&mut self, position: Point, label: &str, style: &MarkerStyle) {
        self.drawing_queue.push(DrawCommand::Marker {
            position,
            label: label.to_string(),
            style: style.clone(),
        });
    }

    /// Get the current drawing queue
    pub fn get_drawing_queue(&self) -> &[DrawCommand] {
        &self.drawing_queue
    }

    /// Set viewport clipping bounds
    pub fn set_clip_bounds(&mut self, min: Point, max: Point) {
        self.clip_bounds = Some((min, max));
        self.clipping_enabled = true;
    }

    /// Clear clipping bounds
    pub fn clear_clip_bounds(&mut self) {
        self.clip_bounds = None;
        self.clipping_enabled = false;
    }

    /// Clip bounds to viewport (returns None if completely outside)
    fn clip_to_viewport(&self, bounds: (Point, Point)) -> Option<(Point, Point)> {
        if !self.clipping_enabled {
            return Some(bounds);
        }
        let Some((clip_min, clip_max)) = self.clip_bounds else {
            return Some(bounds);
        };
        let (min, max) = bounds;

        if max.x < clip_min.x || min.x > clip_max.x || max.y < clip_min.y || min.y > clip_max.y {
            return None;
        }

        Some((
            Point::new(min.x.max(clip_min.x), min.y.max(clip_min.y)),
            Point::new(max.x.min(clip_max.x), max.y.min(clip_max.y)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_tile_validates_bounds() {
        let mut ctx = RenderContext::new(800, 600);
        let bad = (Point::new(10.0, 10.0), Point::new(5.0, 20.0));
        assert!(ctx.render_tile("t.jpeg".into(), bad, 1.0).is_err());
        assert!(ctx.drawing_queue.is_empty());
    }

    #[test]
    fn test_clipping_drops_outside_tiles() {
        let mut ctx = RenderContext::new(800, 600);
        ctx.set_clip_bounds(Point::new(0.0, 0.0), Point::new(800.0, 600.0));

        let outside = (Point::new(900.0, 0.0), Point::new(1000.0, 100.0));
        ctx.render_tile("t.jpeg".into(), outside, 1.0).unwrap();
        assert!(ctx.drawing_queue.is_empty());

        let straddling = (Point::new(700.0, 0.0), Point::new(900.0, 100.0));
        ctx.render_tile("t.jpeg".into(), straddling, 1.0).unwrap();
        match &ctx.drawing_queue[0] {
            DrawCommand::TileImage { bounds, .. } => {
                assert_eq!(bounds.1.x, 800.0);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_begin_frame_clears_queue() {
        let mut ctx = RenderContext::new(100, 100);
        ctx.render_marker(
            Point::new(1.0, 1.0),
            "marker",
            &MarkerStyle {
                color: Color::WHITE,
                icon_size: 16.0,
                label_size: 12.0,
            },
        );
        assert_eq!(ctx.drawing_queue.len(), 1);
        ctx.begin_frame();
        assert!(ctx.drawing_queue.is_empty());
    }
}
