use crate::core::bounds::{Size, Transform};

// LayerTrait is unified with LayerOperations in shared traits
pub use crate::traits::LayerOperations as LayerTrait;

/// Closed set of layer behavior kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerType {
    /// Raster LOD tiles
    Terrain,
    /// Static vector base outlines
    Hexes,
    /// Static vector lattice links
    Lattice,
    /// Zoom-gated name/icon markers
    Names,
    /// Free-form annotation canvas
    Canvas,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LayerType::Terrain => write!(f, "terrain"),
            LayerType::Hexes => write!(f, "hexes"),
            LayerType::Lattice => write!(f, "lattice"),
            LayerType::Names => write!(f, "names"),
            LayerType::Canvas => write!(f, "canvas"),
        }
    }
}

/// State shared by every layer kind
#[derive(Debug, Clone)]
pub struct LayerProperties {
    /// Unique within one LayerManager
    pub id: String,
    pub layer_type: LayerType,
    /// Map footprint the layer was built for
    pub size: Size,
    pub visible: bool,
    /// Content missed a deferred update while hidden
    pub stale: bool,
    /// Map-to-screen transform, refreshed by every redraw
    pub transform: Transform,
}

impl LayerProperties {
    pub fn new(id: String, layer_type: LayerType, size: Size) -> Self {
        Self {
            id,
            layer_type,
            size,
            visible: true,
            stale: false,
            transform: Transform::identity(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_properties() {
        let props = LayerProperties::new(
            "test".to_string(),
            LayerType::Hexes,
            Size::square(8192.0),
        );

        assert_eq!(props.id, "test");
        assert_eq!(props.layer_type, LayerType::Hexes);
        assert!(props.visible);
        assert!(!props.stale);
        assert_eq!(props.transform, Transform::identity());
    }

    #[test]
    fn test_layer_type_display() {
        assert_eq!(LayerType::Terrain.to_string(), "terrain");
        assert_eq!(LayerType::Names.to_string(), "names");
        assert_eq!(LayerType::Canvas.to_string(), "canvas");
    }
}
