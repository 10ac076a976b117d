//! Macros to reduce boilerplate in layer implementations
//!
//! This module provides macros that generate common LayerTrait implementations
//! to avoid code duplication across different layer types.

/// Macro to implement the standard LayerTrait boilerplate methods
///
/// This generates implementations for:
/// - id(), layer_type(), size()
/// - is_visible(), set_visible()
/// - is_stale(), mark_stale()
/// - redraw() (the shared O(1) transform refresh)
/// - as_any(), as_any_mut()
///
/// Usage:
/// ```ignore
/// impl_layer_trait!(MyLayer, properties);
/// ```
#[macro_export]
macro_rules! impl_layer_trait {
    ($layer_type:ty, $properties_field:ident) => {
        fn id(&self) -> &str {
            &self.$properties_field.id
        }

        fn layer_type(&self) -> $crate::layers::base::LayerType {
            self.$properties_field.layer_type
        }

        fn size(&self) -> $crate::core::bounds::Size {
            self.$properties_field.size
        }

        fn is_visible(&self) -> bool {
            self.$properties_field.visible
        }

        fn set_visible(&mut self, visible: bool) {
            self.$properties_field.visible = visible;
        }

        fn is_stale(&self) -> bool {
            self.$properties_field.stale
        }

        fn mark_stale(&mut self) {
            self.$properties_field.stale = true;
        }

        fn redraw(&mut self, view_box: &$crate::core::bounds::ViewBox, zoom: f64) {
            self.$properties_field.transform =
                $crate::core::bounds::Transform::for_view(view_box, zoom);
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    };
}

/// Macro to implement the default options serialization for a layer
#[macro_export]
macro_rules! impl_default_options_serialization {
    ($properties_field:ident) => {
        fn options(&self) -> serde_json::Value {
            serde_json::json!({
                "id": self.$properties_field.id,
                "layer_type": self.$properties_field.layer_type.to_string(),
                "visible": self.$properties_field.visible,
            })
        }
    };
}
