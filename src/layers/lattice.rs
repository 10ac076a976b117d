//! Static vector layer drawing lattice links between connected bases.

use crate::{
    core::{
        bounds::{Size, ViewBox},
        constants::{LATTICE_STROKE_BASE, STROKE_WIDTH_RANGE},
    },
    data::records::LatticeLink,
    layers::base::{LayerProperties, LayerTrait, LayerType},
    rendering::context::{Color, LineStyle, RenderContext},
    Result,
};

/// Always-rendered lattice-link layer.
///
/// Links never change for the lifetime of a continent; only the stroke
/// width responds to zoom.
pub struct LatticeLayer {
    properties: LayerProperties,
    links: Vec<LatticeLink>,
    stroke_width: f64,
}

impl LatticeLayer {
    pub fn from_links(id: String, map_size: Size, links: Vec<LatticeLink>) -> Self {
        Self {
            properties: LayerProperties::new(id, LayerType::Lattice, map_size),
            links,
            stroke_width: LATTICE_STROKE_BASE,
        }
    }

    pub fn links(&self) -> &[LatticeLink] {
        &self.links
    }
}

impl LayerTrait for LatticeLayer {
    crate::impl_layer_trait!(LatticeLayer, properties);
    crate::impl_default_options_serialization!(properties);

    fn deferred_update(&mut self, _view_box: &ViewBox, zoom: f64) -> Result<()> {
        let (min, max) = STROKE_WIDTH_RANGE;
        self.stroke_width = (LATTICE_STROKE_BASE / zoom).clamp(min, max);
        self.properties.stale = false;
        Ok(())
    }

    fn render(&self, context: &mut RenderContext) -> Result<()> {
        let transform = self.properties.transform;
        let style = LineStyle {
            color: Color::rgb(255, 215, 0),
            width: self.stroke_width * transform.scale,
            opacity: 0.9,
        };
        for link in &self.links {
            let points = [transform.apply(&link.pos_a), transform.apply(&link.pos_b)];
            context.render_line(&points, &style);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::Point;
    use crate::rendering::context::DrawCommand;

    fn links() -> Vec<LatticeLink> {
        vec![LatticeLink {
            base_a: 1,
            base_b: 2,
            pos_a: Point::new(1024.0, 1024.0),
            pos_b: Point::new(2048.0, 2048.0),
        }]
    }

    #[test]
    fn test_render_emits_one_line_per_link() {
        let mut layer = LatticeLayer::from_links("lattice".into(), Size::square(8192.0), links());
        let vb = ViewBox::new(8192.0, 8192.0, 0.0, 0.0);
        layer.deferred_update(&vb, 1.0).unwrap();
        layer.redraw(&vb, 1.0);

        let mut ctx = RenderContext::new(1024, 1024);
        layer.render(&mut ctx).unwrap();

        assert_eq!(ctx.drawing_queue.len(), 1);
        match &ctx.drawing_queue[0] {
            DrawCommand::Line { points, .. } => {
                // Map y-up becomes screen y-down
                assert_eq!(points[0], Point::new(1024.0, 8192.0 - 1024.0));
                assert_eq!(points[1], Point::new(2048.0, 8192.0 - 2048.0));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
