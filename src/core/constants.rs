//! Engine-wide policy constants.
//! Keeping them in a single place makes it easier to tweak engine-wide magic numbers.

/// Map units covered by one tile edge at LOD 0, the finest asset granularity.
pub const FINEST_TILE_STEP: f64 = 256.0;

/// Maps at or below this extent keep a coarser minimum tile step at LOD 2
/// instead of subdividing further.
pub const SMALL_MAP_EXTENT: f64 = 1024.0;

/// Calibration exponent for tile counts: an 8192-unit map has exactly one
/// tile at its defining base LOD (`floor(log2(8192)) - 8 = 5`).
pub const BASE_LOD_EXPONENT: i32 = 8;

/// Coarsest LOD the selection policy will ever pick; tile assets are only
/// rendered for LODs 0 through this value.
pub const COARSEST_RENDER_LOD: u8 = 3;

/// Multiplicative step between adjacent zoom levels.
pub const DEFAULT_ZOOM_STEP: f64 = 1.5;

/// Scale factor (CSS pixels per map unit) of the most-zoomed-in level.
pub const DEFAULT_MAX_ZOOM: f64 = 4.0;

/// Zoom levels never drop below this scale factor, whatever the map size.
pub const MIN_ZOOM_LEVEL: f64 = 0.01;

/// Quiet period after the last camera mutation before the deferred layer
/// update fires (stand-in for a CSS transition-end signal).
pub const DEFAULT_SETTLE_MS: u64 = 200;

/// Base stroke width of base outlines at zoom 1.0, in CSS pixels.
pub const HEX_STROKE_BASE: f64 = 1.5;

/// Base stroke width of lattice links at zoom 1.0, in CSS pixels.
pub const LATTICE_STROKE_BASE: f64 = 2.0;

/// Stroke widths are clamped to this range after zoom scaling.
pub const STROKE_WIDTH_RANGE: (f64, f64) = (0.5, 10.0);

/// Hover hit-test radius around a marker at zoom 1.0, in map units.
pub const HOVER_RADIUS: f64 = 32.0;
