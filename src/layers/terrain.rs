//! Raster terrain layer: LOD tile grid generation and visibility culling.

use crate::{
    core::{
        bounds::{Size, ViewBox},
        config::{LodPolicy, DEFAULT_LOD_POLICY},
        geo::{GridPos, Point, TileCoord},
        grid,
    },
    layers::base::{LayerProperties, LayerTrait, LayerType},
    rendering::context::RenderContext,
    tiles::{
        cache::{TileGeometry, TileGridCache},
        source::TileSource,
    },
    Result,
};
use std::sync::Arc;

#[cfg(feature = "debug")]
use log;

/// One renderable tile in the layer's arena.
///
/// The arena entry is the source of truth: visibility and geometry are
/// mutated here, and the drawing surface is derived from it every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct MapTile {
    /// World-space footprint in the camera frame
    pub tile_box: ViewBox,
    pub grid_pos: GridPos,
    pub coord: TileCoord,
    pub url: String,
    /// Mutated on every visibility pass, never externally
    pub visible: bool,
}

impl MapTile {
    fn from_geometry(geometry: &TileGeometry) -> Self {
        Self {
            tile_box: geometry.tile_box,
            grid_pos: geometry.grid_pos,
            coord: geometry.coord,
            url: geometry.url.clone(),
            visible: false,
        }
    }
}

/// Raster tile layer for one continent.
///
/// The deferred update reselects the LOD for the settled zoom: a LOD change
/// regenerates the whole tile arena (through the grid cache), an unchanged
/// LOD only re-culls visibility, which is much cheaper.
pub struct TerrainLayer {
    properties: LayerProperties,
    source: Box<dyn TileSource>,
    lod_policy: LodPolicy,
    device_pixel_ratio: f64,
    tiles: Vec<MapTile>,
    active_lod: Option<u8>,
    grid_cache: TileGridCache,
    background_url: String,
}

impl TerrainLayer {
    pub fn new(id: String, map_size: Size, source: Box<dyn TileSource>) -> Self {
        let background_url = source.background_url();
        Self {
            properties: LayerProperties::new(id, LayerType::Terrain, map_size),
            source,
            lod_policy: DEFAULT_LOD_POLICY.clone(),
            device_pixel_ratio: 1.0,
            tiles: Vec::new(),
            active_lod: None,
            grid_cache: TileGridCache::with_default_capacity(),
            background_url,
        }
    }

    pub fn with_lod_policy(mut self, policy: LodPolicy) -> Self {
        self.lod_policy = policy;
        self
    }

    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    pub fn active_lod(&self) -> Option<u8> {
        self.active_lod
    }

    pub fn tiles(&self) -> &[MapTile] {
        &self.tiles
    }

    pub fn visible_tile_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.visible).count()
    }

    fn map_extent(&self) -> f64 {
        self.properties.size.major_axis()
    }

    /// Batch-create the tile arena for `lod`, reusing a cached grid when the
    /// camera has crossed this LOD before.
    fn regenerate(&mut self, lod: u8) {
        let geometry = match self.grid_cache.get(lod) {
            Some(cached) => cached,
            None => {
                let built = Arc::new(self.build_grid(lod));
                self.grid_cache.put(lod, built.clone());
                built
            }
        };

        self.tiles = geometry.iter().map(MapTile::from_geometry).collect();
        self.active_lod = Some(lod);

        #[cfg(feature = "debug")]
        log::debug!(
            "terrain layer '{}': regenerated {} tiles at lod {}",
            self.properties.id,
            self.tiles.len(),
            lod
        );
    }

    fn build_grid(&self, lod: u8) -> Vec<TileGeometry> {
        let extent = self.map_extent();
        let axis = grid::tiles_per_axis(extent, lod).max(1);

        let mut tiles = Vec::with_capacity((axis * axis) as usize);
        for y in 0..axis {
            for x in 0..axis {
                let grid_pos = GridPos::new(x, y);
                let coord = grid::grid_to_tile_coord(extent, lod, grid_pos);
                tiles.push(TileGeometry {
                    grid_pos,
                    coord,
                    tile_box: grid::tile_box(extent, lod, grid_pos),
                    url: self.source.tile_url(coord),
                });
            }
        }
        tiles
    }

    fn screen_bounds(&self, tile_box: &ViewBox) -> (Point, Point) {
        let transform = self.properties.transform;
        (
            transform.apply(&Point::new(tile_box.left, tile_box.top)),
            transform.apply(&Point::new(tile_box.right, tile_box.bottom)),
        )
    }
}

impl LayerTrait for TerrainLayer {
    crate::impl_layer_trait!(TerrainLayer, properties);
    crate::impl_default_options_serialization!(properties);

    fn deferred_update(&mut self, view_box: &ViewBox, zoom: f64) -> Result<()> {
        let lod = grid::select_lod(zoom, self.device_pixel_ratio, self.map_extent(), &self.lod_policy);

        if self.active_lod != Some(lod) {
            self.regenerate(lod);
        }

        for tile in &mut self.tiles {
            tile.visible = tile.tile_box.intersects(view_box);
        }

        self.properties.stale = false;
        Ok(())
    }

    fn render(&self, context: &mut RenderContext) -> Result<()> {
        // Continent background sits underneath the tile grid
        let extent = self.map_extent();
        let background = ViewBox::new(extent, extent, 0.0, 0.0);
        context.render_tile(self.background_url.clone(), self.screen_bounds(&background), 1.0)?;

        for tile in self.tiles.iter().filter(|t| t.visible) {
            context.render_tile(tile.url.clone(), self.screen_bounds(&tile.tile_box), 1.0)?;
        }
        Ok(())
    }
}
