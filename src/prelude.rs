//! Prelude module for common warmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use warmap::prelude::*;`

pub use crate::core::{
    bounds::{Size, Transform, ViewBox},
    camera::{Camera, CameraOptions},
    config::RendererOptions,
    geo::{GridPos, Point, TileCoord},
    map::MapRenderer,
};

pub use crate::layers::{
    base::{LayerProperties, LayerTrait, LayerType},
    canvas::CanvasLayer,
    hexes::HexLayer,
    lattice::LatticeLayer,
    manager::LayerManager,
    names::NamesLayer,
    terrain::TerrainLayer,
};

pub use crate::input::events::{InputEvent, MapEvent, MouseButton};

pub use crate::rendering::context::{Color, DrawCommand, RenderContext};

pub use crate::tiles::{cache::TileGridCache, source::{ContinentTileSource, TileSource}};

pub use crate::data::{
    provider::{MapDataProvider, RestDataProvider},
    records::{
        Base, BaseId, BaseStatus, Continent, ContinentId, FacilityClass, FactionId, LatticeLink,
        NEUTRAL_FACTION,
    },
};

pub use crate::{Error as MapError, Result};

pub use std::{
    sync::Arc,
    time::Duration,
};

pub use instant::Instant;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};

pub use futures::Future;
pub use std::pin::Pin;
