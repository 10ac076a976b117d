pub mod cache;
pub mod source;

// Re-exports for convenience
pub use cache::{TileGeometry, TileGridCache};
pub use source::{ContinentTileSource, TileSource};
