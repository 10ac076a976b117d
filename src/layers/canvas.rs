//! Free-form annotation canvas layer.
//!
//! The only layer whose factory can reject at runtime: hosts without a
//! drawing surface simply run without annotations.

use crate::{
    core::bounds::{Size, ViewBox},
    core::geo::Point,
    layers::base::{LayerProperties, LayerTrait, LayerType},
    rendering::context::{Color, LineStyle, RenderContext},
    MapError, Result,
};

#[derive(Debug)]
pub struct CanvasLayer {
    properties: LayerProperties,
    strokes: Vec<Vec<Point>>,
    stroke_style: LineStyle,
}

impl CanvasLayer {
    /// Creates the annotation layer, rejecting with [`MapError::Unsupported`]
    /// when the host reports no canvas surface. Callers treat the layer as
    /// optional and proceed without it.
    pub fn create(id: String, map_size: Size, surface_available: bool) -> Result<Self> {
        if !surface_available {
            return Err(MapError::Unsupported("no canvas surface available".into()).into());
        }
        Ok(Self {
            properties: LayerProperties::new(id, LayerType::Canvas, map_size),
            strokes: Vec::new(),
            stroke_style: LineStyle {
                color: Color::rgb(255, 255, 0),
                width: 2.0,
                opacity: 1.0,
            },
        })
    }

    /// Appends one free-form stroke in map coordinates
    pub fn add_stroke(&mut self, points: Vec<Point>) {
        if points.len() >= 2 {
            self.strokes.push(points);
        }
    }

    pub fn clear_strokes(&mut self) {
        self.strokes.clear();
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }
}

impl LayerTrait for CanvasLayer {
    crate::impl_layer_trait!(CanvasLayer, properties);
    crate::impl_default_options_serialization!(properties);

    fn deferred_update(&mut self, _view_box: &ViewBox, _zoom: f64) -> Result<()> {
        self.properties.stale = false;
        Ok(())
    }

    fn render(&self, context: &mut RenderContext) -> Result<()> {
        let transform = self.properties.transform;
        for stroke in &self.strokes {
            let screen: Vec<Point> = stroke.iter().map(|p| transform.apply(p)).collect();
            context.render_line(&screen, &self.stroke_style);
        }
        Ok(())
    }
}
