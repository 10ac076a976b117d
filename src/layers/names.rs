//! Point-feature layer: base name/icon markers, gated by zoom level.

use crate::{
    core::{
        bounds::{Size, ViewBox},
        config::NameVisibilityPolicy,
        constants::HOVER_RADIUS,
        geo::Point,
    },
    data::records::{Base, BaseId, FacilityClass},
    layers::base::{LayerProperties, LayerTrait, LayerType},
    rendering::context::{Color, MarkerStyle, RenderContext},
    traits::PointMath,
    Result,
};

/// One marker in the layer's arena; visibility is recomputed on every
/// deferred pass from the zoom gate
#[derive(Debug, Clone, PartialEq)]
pub struct BaseMarker {
    pub base_id: BaseId,
    pub position: Point,
    pub label: String,
    pub facility: FacilityClass,
    pub visible: bool,
}

/// Discrete marker layer with per-facility zoom gating and hover hit-testing.
pub struct NamesLayer {
    properties: LayerProperties,
    markers: Vec<BaseMarker>,
    policy: NameVisibilityPolicy,
}

impl NamesLayer {
    pub fn from_bases(id: String, map_size: Size, bases: &[Base]) -> Self {
        let markers = bases
            .iter()
            .map(|base| BaseMarker {
                base_id: base.id,
                position: base.map_pos,
                label: base.name.clone(),
                facility: base.facility,
                visible: true,
            })
            .collect();

        Self {
            properties: LayerProperties::new(id, LayerType::Names, map_size),
            markers,
            policy: NameVisibilityPolicy::default(),
        }
    }

    pub fn with_visibility_policy(mut self, policy: NameVisibilityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn markers(&self) -> &[BaseMarker] {
        &self.markers
    }

    pub fn visible_marker_count(&self) -> usize {
        self.markers.iter().filter(|m| m.visible).count()
    }
}

impl LayerTrait for NamesLayer {
    crate::impl_layer_trait!(NamesLayer, properties);
    crate::impl_default_options_serialization!(properties);

    fn deferred_update(&mut self, _view_box: &ViewBox, zoom: f64) -> Result<()> {
        for marker in &mut self.markers {
            marker.visible = zoom >= self.policy.min_zoom(marker.facility);
        }
        self.properties.stale = false;
        Ok(())
    }

    fn render(&self, context: &mut RenderContext) -> Result<()> {
        let transform = self.properties.transform;
        let style = MarkerStyle {
            color: Color::WHITE,
            icon_size: 16.0,
            label_size: 12.0,
        };
        for marker in self.markers.iter().filter(|m| m.visible) {
            context.render_marker(transform.apply(&marker.position), &marker.label, &style);
        }
        Ok(())
    }

    fn hit_test(&self, map_pos: Point, zoom: f64) -> Option<BaseId> {
        let radius = HOVER_RADIUS / zoom.max(f64::EPSILON);
        self.markers
            .iter()
            .filter(|m| m.visible)
            .map(|m| (m.base_id, m.position.distance_to(&map_pos)))
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(base_id, _)| base_id)
    }
}
