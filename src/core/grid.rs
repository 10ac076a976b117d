//! Pure tile-grid and LOD math.
//!
//! Everything here is a stateless function of `(map_size, lod)`. The tile
//! *count* formulas extend up to the map's defining base LOD (where a map
//! collapses to a single tile); the *selection* policy only ever picks LODs
//! for which tile assets exist (`0..=COARSEST_RENDER_LOD`).

use crate::{
    core::bounds::ViewBox,
    core::config::LodPolicy,
    core::constants::{BASE_LOD_EXPONENT, FINEST_TILE_STEP, SMALL_MAP_EXTENT},
    core::geo::{GridPos, TileCoord},
    MapError, Result,
};

/// The LOD at which the map is covered by exactly one tile
pub fn max_lod(map_size: f64) -> u8 {
    let exp = (map_size.log2().floor() as i32) - BASE_LOD_EXPONENT;
    exp.max(0) as u8
}

/// Errors when an explicitly requested LOD exceeds the map's defining base
/// LOD; selection never produces such values, so this flags a caller bug.
pub fn validate_lod(map_size: f64, lod: u8) -> Result<()> {
    let max = max_lod(map_size);
    if lod > max {
        return Err(MapError::InvalidLod { lod, max }.into());
    }
    Ok(())
}

/// Map units covered by one tile edge at the given LOD.
///
/// Fixed policy table, not a derived value: LOD 0 always steps by the finest
/// asset unit, and LOD 2 clamps to a minimum step for small maps so tiny
/// maps don't over-subdivide.
pub fn step_size(map_size: f64, lod: u8) -> f64 {
    match lod {
        0 => FINEST_TILE_STEP,
        1 => 512.0,
        2 if map_size <= SMALL_MAP_EXTENT => 512.0,
        2 => 1024.0,
        _ => 2048.0,
    }
}

/// Total tile count of the square grid at this LOD:
/// `ceil(4 ^ (floor(log2(map_size)) - 8 - lod))`.
///
/// Exponential falloff as LODs get coarser, calibrated so an 8192-unit map
/// has exactly one tile at its defining base LOD.
pub fn tile_count(map_size: f64, lod: u8) -> u32 {
    let exp = (map_size.log2().floor() as i32) - BASE_LOD_EXPONENT - lod as i32;
    4_f64.powi(exp).ceil() as u32
}

pub fn tiles_per_axis(map_size: f64, lod: u8) -> u32 {
    (tile_count(map_size, lod) as f64).sqrt().floor() as u32
}

/// Centered map-unit coordinates of the first and last tile origin:
/// `[-half, half - step]` with `half = step * floor(axis / 2)`.
///
/// Degenerates to `[-step, -step]` for single-tile grids to avoid a
/// zero-size span.
pub fn grid_limits(map_size: f64, lod: u8) -> (f64, f64) {
    let step = step_size(map_size, lod);
    let axis = tiles_per_axis(map_size, lod);
    if axis <= 1 {
        return (-step, -step);
    }
    let half = step * (axis / 2) as f64;
    (-half, half - step)
}

/// Affine map from a grid index to the centered world-tile coordinate the
/// tile server names assets by, in units of the finest tile step.
pub fn grid_to_tile_coord(map_size: f64, lod: u8, pos: GridPos) -> TileCoord {
    let step = step_size(map_size, lod);
    let (min, _) = grid_limits(map_size, lod);
    let to_units = |i: u32| ((min + i as f64 * step) / FINEST_TILE_STEP).round() as i32;
    TileCoord::new(to_units(pos.x), to_units(pos.y), lod)
}

/// Inverse of [`grid_to_tile_coord`]
pub fn tile_coord_to_grid(map_size: f64, lod: u8, coord: TileCoord) -> GridPos {
    let step = step_size(map_size, lod);
    let (min, _) = grid_limits(map_size, lod);
    let to_index = |units: i32| ((units as f64 * FINEST_TILE_STEP - min) / step).round() as u32;
    GridPos::new(to_index(coord.x), to_index(coord.y))
}

/// World-space footprint of a grid cell in the `[0, map_size]` camera frame.
///
/// Single-tile grids center their one tile on the map rather than using the
/// degenerate naming limits.
pub fn tile_box(map_size: f64, lod: u8, pos: GridPos) -> ViewBox {
    let step = step_size(map_size, lod);
    let axis = tiles_per_axis(map_size, lod);
    let origin = if axis <= 1 {
        -step / 2.0
    } else {
        grid_limits(map_size, lod).0
    };

    let half_map = map_size / 2.0;
    let left = half_map + origin + pos.x as f64 * step;
    let bottom = half_map + origin + pos.y as f64 * step;
    ViewBox::new(bottom + step, left + step, bottom, left)
}

/// Monotonic zoom → LOD step function with device-pixel-ratio compensation,
/// clamped to the LODs this map actually has.
pub fn select_lod(zoom: f64, device_pixel_ratio: f64, map_size: f64, policy: &LodPolicy) -> u8 {
    let effective = zoom * device_pixel_ratio;
    let mut lod = policy.coarsest;
    for &(threshold, candidate) in &policy.thresholds {
        if effective >= threshold {
            lod = candidate;
            break;
        }
    }
    lod.min(max_lod(map_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_lod() {
        assert_eq!(max_lod(8192.0), 5);
        assert_eq!(max_lod(4096.0), 4);
        assert_eq!(max_lod(1024.0), 2);
        assert_eq!(max_lod(256.0), 0);
        assert_eq!(max_lod(128.0), 0);
    }

    #[test]
    fn test_validate_lod() {
        assert!(validate_lod(8192.0, 5).is_ok());
        let err = validate_lod(1024.0, 3).unwrap_err();
        let err = err.downcast_ref::<crate::MapError>().unwrap();
        assert!(matches!(err, crate::MapError::InvalidLod { lod: 3, max: 2 }));
    }

    #[test]
    fn test_tile_count_falloff() {
        assert_eq!(tile_count(8192.0, 0), 1024);
        assert_eq!(tile_count(8192.0, 1), 256);
        assert_eq!(tile_count(8192.0, 2), 64);
        assert_eq!(tile_count(8192.0, 3), 16);
        // Single tile at the map's defining base LOD
        assert_eq!(tile_count(8192.0, max_lod(8192.0)), 1);
    }

    #[test]
    fn test_tile_count_small_maps_never_zero() {
        // ceil keeps sub-unity powers at one tile
        assert_eq!(tile_count(512.0, 3), 1);
        assert_eq!(tile_count(256.0, 0), 1);
    }

    #[test]
    fn test_tiles_per_axis() {
        assert_eq!(tiles_per_axis(8192.0, 0), 32);
        assert_eq!(tiles_per_axis(8192.0, 3), 4);
        assert_eq!(tiles_per_axis(1024.0, 0), 4);
        assert_eq!(tiles_per_axis(1024.0, 2), 1);
    }

    #[test]
    fn test_grid_covers_map() {
        // For renderable LODs on production-size maps, the grid exactly
        // tiles the map extent.
        for &map in &[2048.0, 4096.0, 8192.0] {
            for lod in 0..=3u8.min(max_lod(map)) {
                let axis = tiles_per_axis(map, lod);
                if axis > 1 {
                    assert_eq!(axis as f64 * step_size(map, lod), map, "map {map} lod {lod}");
                }
            }
        }
    }

    #[test]
    fn test_grid_limits() {
        assert_eq!(grid_limits(8192.0, 0), (-4096.0, 3840.0));
        assert_eq!(grid_limits(8192.0, 3), (-4096.0, 2048.0));
        // Single-tile degenerate span
        assert_eq!(grid_limits(1024.0, 2), (-512.0, -512.0));
    }

    #[test]
    fn test_grid_to_tile_coord() {
        assert_eq!(
            grid_to_tile_coord(8192.0, 0, GridPos::new(0, 0)),
            TileCoord::new(-16, -16, 0)
        );
        assert_eq!(
            grid_to_tile_coord(8192.0, 0, GridPos::new(31, 31)),
            TileCoord::new(15, 15, 0)
        );
        assert_eq!(
            grid_to_tile_coord(8192.0, 1, GridPos::new(1, 0)),
            TileCoord::new(-14, -16, 1)
        );
    }

    #[test]
    fn test_grid_coord_round_trip() {
        for &(map, lod) in &[(8192.0, 0u8), (8192.0, 3), (4096.0, 1), (2048.0, 2)] {
            let axis = tiles_per_axis(map, lod);
            for y in 0..axis {
                for x in 0..axis {
                    let pos = GridPos::new(x, y);
                    let coord = grid_to_tile_coord(map, lod, pos);
                    assert_eq!(tile_coord_to_grid(map, lod, coord), pos, "map {map} lod {lod}");
                }
            }
        }
    }

    #[test]
    fn test_tile_box() {
        let first = tile_box(8192.0, 0, GridPos::new(0, 0));
        assert_eq!((first.left, first.bottom, first.right, first.top), (0.0, 0.0, 256.0, 256.0));

        let last = tile_box(8192.0, 0, GridPos::new(31, 31));
        assert_eq!((last.left, last.bottom, last.right, last.top), (7936.0, 7936.0, 8192.0, 8192.0));

        // A single-tile grid centers its tile on the map
        let single = tile_box(1024.0, 2, GridPos::new(0, 0));
        assert_eq!(single.center(), crate::core::geo::Point::new(512.0, 512.0));
    }

    #[test]
    fn test_select_lod_monotonic() {
        let policy = LodPolicy::default();
        let mut last = u8::MAX;
        for zoom in [0.05, 0.2, 0.4, 0.8, 1.5, 4.0] {
            let lod = select_lod(zoom, 1.0, 8192.0, &policy);
            assert!(lod <= last);
            last = lod;
        }
    }

    #[test]
    fn test_select_lod_dpr_compensation() {
        let policy = LodPolicy::default();
        // A high-DPI display picks a finer LOD at the same logical zoom
        let standard = select_lod(0.5, 1.0, 8192.0, &policy);
        let retina = select_lod(0.5, 2.0, 8192.0, &policy);
        assert_eq!(standard, 1);
        assert_eq!(retina, 0);
    }

    #[test]
    fn test_select_lod_clamped_to_map() {
        let policy = LodPolicy::default();
        // A 1024 map only has LODs 0..=2; the coarsest fallback clamps
        assert_eq!(select_lod(0.05, 1.0, 1024.0, &policy), 2);
    }
}
