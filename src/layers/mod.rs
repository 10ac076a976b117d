pub mod base;
pub mod canvas;
pub mod hexes;
pub mod lattice;
pub mod macros;
pub mod manager;
pub mod names;
pub mod terrain;

// Re-export the essential types
pub use base::{LayerProperties, LayerTrait, LayerType};
pub use canvas::CanvasLayer;
pub use hexes::{faction_color, BaseOutline, HexLayer};
pub use lattice::LatticeLayer;
pub use manager::LayerManager;
pub use names::{BaseMarker, NamesLayer};
pub use terrain::{MapTile, TerrainLayer};
