//! Static vector layer drawing base outlines, tinted by owning faction.

use crate::{
    core::{
        bounds::{Size, ViewBox},
        constants::{HEX_STROKE_BASE, STROKE_WIDTH_RANGE},
        geo::Point,
    },
    data::records::{Base, BaseId, FactionId, NEUTRAL_FACTION},
    layers::base::{LayerProperties, LayerTrait, LayerType},
    prelude::HashMap,
    rendering::context::{Color, PolygonStyle, RenderContext},
    Result,
};

/// Fill colors per faction id; index 0 is neutral
const FACTION_COLORS: [Color; 4] = [
    Color::rgb(120, 120, 120),
    Color::rgb(148, 0, 211),
    Color::rgb(0, 104, 217),
    Color::rgb(204, 0, 0),
];

pub fn faction_color(faction: FactionId) -> Color {
    FACTION_COLORS
        .get(faction as usize)
        .copied()
        .unwrap_or(FACTION_COLORS[0])
}

/// One base outline with its current owner
#[derive(Debug, Clone, PartialEq)]
pub struct BaseOutline {
    pub base_id: BaseId,
    pub polygon: Vec<Point>,
    pub faction: FactionId,
}

/// Always-rendered vector layer of base outlines.
///
/// Content is static per continent; the deferred update only rescales the
/// stroke width, and ownership snapshots recolor outlines in place.
pub struct HexLayer {
    properties: LayerProperties,
    outlines: Vec<BaseOutline>,
    stroke_width: f64,
}

impl HexLayer {
    pub fn from_bases(id: String, map_size: Size, bases: &[Base]) -> Self {
        let outlines = bases
            .iter()
            .filter(|base| !base.outline.is_empty())
            .map(|base| BaseOutline {
                base_id: base.id,
                polygon: base.outline.clone(),
                faction: NEUTRAL_FACTION,
            })
            .collect();

        Self {
            properties: LayerProperties::new(id, LayerType::Hexes, map_size),
            outlines,
            stroke_width: HEX_STROKE_BASE,
        }
    }

    pub fn outlines(&self) -> &[BaseOutline] {
        &self.outlines
    }
}

impl LayerTrait for HexLayer {
    crate::impl_layer_trait!(HexLayer, properties);
    crate::impl_default_options_serialization!(properties);

    fn deferred_update(&mut self, _view_box: &ViewBox, zoom: f64) -> Result<()> {
        let (min, max) = STROKE_WIDTH_RANGE;
        self.stroke_width = (HEX_STROKE_BASE / zoom).clamp(min, max);
        self.properties.stale = false;
        Ok(())
    }

    fn render(&self, context: &mut RenderContext) -> Result<()> {
        let transform = self.properties.transform;
        for outline in &self.outlines {
            let screen: Vec<Point> = outline.polygon.iter().map(|p| transform.apply(p)).collect();
            context.render_polygon(
                &screen,
                &PolygonStyle {
                    fill_color: faction_color(outline.faction),
                    stroke_color: Color::WHITE,
                    stroke_width: self.stroke_width * transform.scale,
                    fill_opacity: 0.35,
                    stroke_opacity: 0.8,
                },
            );
        }
        Ok(())
    }

    fn supports_ownership(&self) -> bool {
        true
    }

    fn apply_ownership(&mut self, snapshot: &HashMap<BaseId, FactionId>) {
        for outline in &mut self.outlines {
            if let Some(faction) = snapshot.get(&outline.base_id) {
                outline.faction = *faction;
            }
        }
    }
}
