//! # warmap
//!
//! A Rust-native rendering core for large, multi-resolution 2D game maps.
//!
//! The crate provides the camera/viewport math, discrete zoom levels with
//! LOD tile selection, a layer registry, and the redraw/deferred-update
//! protocol shared by all layer kinds. Data fetching and the actual drawing
//! surface are external collaborators: the core consumes typed records and
//! emits retained draw commands.

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod prelude;
pub mod rendering;
pub mod tiles;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    bounds::{Size, Transform, ViewBox},
    camera::Camera,
    geo::{GridPos, Point, TileCoord},
    map::MapRenderer,
};

pub use layers::{
    base::LayerTrait, canvas::CanvasLayer, hexes::HexLayer, lattice::LatticeLayer,
    manager::LayerManager, names::NamesLayer, terrain::TerrainLayer,
};

pub use input::events::{InputEvent, MapEvent};

pub use rendering::context::{DrawCommand, RenderContext};

pub use tiles::source::{ContinentTileSource, TileSource};

pub use data::{
    provider::MapDataProvider,
    records::{Base, BaseStatus, Continent, FactionId, LatticeLink},
};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("layer '{layer}' sized {layer_size:?} does not match map size {map_size:?}")]
    LayerSizeMismatch {
        layer: String,
        layer_size: crate::core::bounds::Size,
        map_size: crate::core::bounds::Size,
    },

    #[error("a layer with id '{0}' is already registered")]
    DuplicateLayer(String),

    #[error("LOD {lod} is out of range for this map (max {max})")]
    InvalidLod { lod: u8, max: u8 },

    #[error("zoom index {index} outside the {levels}-entry zoom table")]
    ZoomIndexOutOfRange { index: usize, levels: usize },

    #[error("unsupported environment: {0}")]
    Unsupported(String),

    #[error("Layer error: {0}")]
    Layer(String),
}

/// Error type alias for convenience
pub type Error = MapError;
