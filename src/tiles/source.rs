use crate::core::geo::{format_tile_coord, TileCoord};

/// Trait representing anything that can produce tile URLs for a given coordinate.
pub trait TileSource: Send + Sync {
    /// Build a URL for the requested `coord`.
    fn tile_url(&self, coord: TileCoord) -> String;

    /// URL of the whole-continent background/minimap image.
    fn background_url(&self) -> String;
}

/// Addresses the standard continent tile tree:
/// `{base_url}/{code}_tile_{X}_{Y}_lod{L}.jpeg` with zero-padded, sign-aware
/// coordinates, plus `{base_url}/{code}.jpg` for the background image.
/// The format is a bit-exact contract with the tile-serving backend.
pub struct ContinentTileSource {
    base_url: String,
    continent_code: String,
}

impl ContinentTileSource {
    pub fn new(base_url: impl Into<String>, continent_code: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            continent_code: continent_code.into(),
        }
    }
}

impl TileSource for ContinentTileSource {
    fn tile_url(&self, coord: TileCoord) -> String {
        format!(
            "{}/{}_tile_{}_{}_lod{}.jpeg",
            self.base_url.trim_end_matches('/'),
            self.continent_code,
            format_tile_coord(coord.x),
            format_tile_coord(coord.y),
            coord.lod,
        )
    }

    fn background_url(&self) -> String {
        format!(
            "{}/{}.jpg",
            self.base_url.trim_end_matches('/'),
            self.continent_code,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tile_url_format() {
        let source = ContinentTileSource::new("https://tiles.example.com/maps", "amerish");
        assert_eq!(
            source.tile_url(TileCoord::new(7, -7, 0)),
            "https://tiles.example.com/maps/amerish_tile_007_-07_lod0.jpeg"
        );
        assert_eq!(
            source.tile_url(TileCoord::new(-16, 15, 3)),
            "https://tiles.example.com/maps/amerish_tile_-16_015_lod3.jpeg"
        );
    }

    #[test]
    fn test_background_url() {
        let source = ContinentTileSource::new("https://tiles.example.com/maps/", "esamir");
        assert_eq!(
            source.background_url(),
            "https://tiles.example.com/maps/esamir.jpg"
        );
    }
}
