pub mod bounds;
pub mod camera;
pub mod config;
pub mod constants;
pub mod geo;
pub mod grid;
pub mod map;

// Re-export main types
pub use bounds::{Size, Transform, ViewBox};
pub use camera::{Camera, CameraOptions};
pub use config::RendererOptions;
pub use geo::{GridPos, Point, TileCoord};
pub use map::MapRenderer;
