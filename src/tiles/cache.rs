use crate::core::{
    bounds::ViewBox,
    geo::{GridPos, TileCoord},
};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Immutable geometry of one generated tile: everything about it except the
/// per-viewport visibility flag.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGeometry {
    pub grid_pos: GridPos,
    pub coord: TileCoord,
    /// World-space footprint in the camera frame
    pub tile_box: ViewBox,
    pub url: String,
}

/// LRU cache of generated LOD grids, keyed by LOD.
///
/// Regenerating a grid is O(tiles); zooming across a LOD threshold and back
/// would otherwise rebuild hundreds of tiles each way. Cleared implicitly on
/// continent switch (the owning layer is dropped).
#[derive(Debug)]
pub struct TileGridCache {
    cache: LruCache<u8, Arc<Vec<TileGeometry>>>,
}

impl TileGridCache {
    /// Create a cache holding up to `capacity` LOD grids
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(4).unwrap());
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Create a cache with the default capacity (one grid per renderable LOD)
    pub fn with_default_capacity() -> Self {
        Self::new(crate::core::constants::COARSEST_RENDER_LOD as usize + 1)
    }

    pub fn get(&mut self, lod: u8) -> Option<Arc<Vec<TileGeometry>>> {
        self.cache.get(&lod).cloned()
    }

    pub fn put(&mut self, lod: u8, grid: Arc<Vec<TileGeometry>>) {
        self.cache.put(lod, grid);
    }

    pub fn contains(&self, lod: u8) -> bool {
        self.cache.contains(&lod)
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for TileGridCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}
