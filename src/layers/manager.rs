use crate::{core::bounds::Size, layers::base::LayerTrait, MapError, Result};

use crate::prelude::HashMap;

/// Registry of the layers making up one map view.
///
/// All contained layers share the manager's map size (checked at insertion;
/// a mismatch is a caller bug, since layers are always constructed for a
/// specific map) and have unique ids. Layers render in insertion order.
pub struct LayerManager {
    /// Map footprint every layer must match
    map_size: Size,
    /// All layers indexed by ID
    layers: HashMap<String, Box<dyn LayerTrait>>,
    /// Ordered list of layer IDs for rendering
    render_order: Vec<String>,
}

impl LayerManager {
    pub fn new(map_size: Size) -> Self {
        Self {
            map_size,
            layers: HashMap::default(),
            render_order: Vec::new(),
        }
    }

    pub fn map_size(&self) -> Size {
        self.map_size
    }

    /// Adds a layer to the manager.
    ///
    /// Fails with [`MapError::LayerSizeMismatch`] when the layer was built
    /// for a different map, and [`MapError::DuplicateLayer`] on id collision.
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        if layer.size() != self.map_size {
            return Err(MapError::LayerSizeMismatch {
                layer: layer.id().to_string(),
                layer_size: layer.size(),
                map_size: self.map_size,
            }
            .into());
        }

        let layer_id = layer.id().to_string();
        if self.layers.contains_key(&layer_id) {
            return Err(MapError::DuplicateLayer(layer_id).into());
        }

        self.layers.insert(layer_id.clone(), layer);
        self.render_order.push(layer_id);
        Ok(())
    }

    /// Removes a layer from the manager; no-op if absent
    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
        self.render_order.retain(|id| id != layer_id);
        self.layers.remove(layer_id)
    }

    /// Atomic bulk removal of all layers, used when switching continents
    pub fn clear(&mut self) {
        self.layers.clear();
        self.render_order.clear();
    }

    /// Gets a reference to a layer by ID; `None` signals "not found" so
    /// callers can probe for optional layers without error handling
    pub fn get_layer(&self, layer_id: &str) -> Option<&dyn LayerTrait> {
        self.layers.get(layer_id).map(|l| l.as_ref())
    }

    /// Applies a function to a specific layer mutably
    pub fn with_layer_mut<F, R>(&mut self, layer_id: &str, f: F) -> Option<R>
    where
        F: FnOnce(&mut dyn LayerTrait) -> R,
    {
        self.layers.get_mut(layer_id).map(|layer| f(layer.as_mut()))
    }

    /// Lists all layer IDs in render order
    pub fn list_layers(&self) -> Vec<String> {
        self.render_order.clone()
    }

    /// Applies a function to each layer immutably in render order
    pub fn for_each_layer<F>(&self, mut f: F)
    where
        F: FnMut(&dyn LayerTrait),
    {
        for id in &self.render_order {
            if let Some(layer) = self.layers.get(id) {
                f(layer.as_ref());
            }
        }
    }

    /// Applies a function to each layer mutably in render order
    pub fn for_each_layer_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut dyn LayerTrait),
    {
        for id in self.render_order.clone() {
            if let Some(layer) = self.layers.get_mut(&id) {
                f(layer.as_mut());
            }
        }
    }

    /// Gets the number of layers
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if the manager is empty
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::lattice::LatticeLayer;
    use crate::MapError;

    fn lattice_layer(id: &str, extent: f64) -> Box<dyn LayerTrait> {
        Box::new(LatticeLayer::from_links(
            id.to_string(),
            Size::square(extent),
            Vec::new(),
        ))
    }

    #[test]
    fn test_add_and_lookup() {
        let mut manager = LayerManager::new(Size::square(8192.0));
        manager.add_layer(lattice_layer("lattice", 8192.0)).unwrap();

        assert_eq!(manager.len(), 1);
        assert!(manager.get_layer("lattice").is_some());
        assert!(manager.get_layer("missing").is_none());
    }

    #[test]
    fn test_add_rejects_size_mismatch() {
        let mut manager = LayerManager::new(Size::square(8192.0));
        let err = manager.add_layer(lattice_layer("lattice", 4096.0)).unwrap_err();
        let err = err.downcast_ref::<MapError>().unwrap();
        assert!(matches!(err, MapError::LayerSizeMismatch { .. }));
        assert!(manager.is_empty());
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut manager = LayerManager::new(Size::square(8192.0));
        manager.add_layer(lattice_layer("lattice", 8192.0)).unwrap();

        let err = manager.add_layer(lattice_layer("lattice", 8192.0)).unwrap_err();
        let err = err.downcast_ref::<MapError>().unwrap();
        assert!(matches!(err, MapError::DuplicateLayer(id) if id == "lattice"));
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_remove_layer_is_noop_when_absent() {
        let mut manager = LayerManager::new(Size::square(8192.0));
        assert!(manager.remove_layer("missing").is_none());

        manager.add_layer(lattice_layer("lattice", 8192.0)).unwrap();
        assert!(manager.remove_layer("lattice").is_some());
        assert!(manager.is_empty());
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut manager = LayerManager::new(Size::square(8192.0));
        manager.add_layer(lattice_layer("a", 8192.0)).unwrap();
        manager.add_layer(lattice_layer("b", 8192.0)).unwrap();

        manager.clear();
        assert!(manager.is_empty());
        assert!(manager.list_layers().is_empty());
    }

    #[test]
    fn test_render_order_is_insertion_order() {
        let mut manager = LayerManager::new(Size::square(8192.0));
        manager.add_layer(lattice_layer("first", 8192.0)).unwrap();
        manager.add_layer(lattice_layer("second", 8192.0)).unwrap();

        let mut seen = Vec::new();
        manager.for_each_layer(|layer| seen.push(layer.id().to_string()));
        assert_eq!(seen, vec!["first", "second"]);
    }
}
