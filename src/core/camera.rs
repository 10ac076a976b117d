use crate::{
    core::bounds::{Size, ViewBox},
    core::constants::{DEFAULT_MAX_ZOOM, DEFAULT_ZOOM_STEP, MIN_ZOOM_LEVEL},
    core::geo::Point,
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// Zoom-table construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraOptions {
    /// Multiplicative step between adjacent zoom levels
    pub step_size: f64,
    /// Scale factor of the most-zoomed-in level
    pub max_zoom: f64,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            step_size: DEFAULT_ZOOM_STEP,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

/// Owns the view target and the discrete zoom level of one map view.
///
/// The camera works in a `[0, width] x [0, height]` y-up map frame. Its zoom
/// table is derived from the map and viewport sizes at construction and is
/// invalidated whenever either changes: a viewport resize recomputes the
/// table in place, a map change requires a fresh camera.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    map_size: Size,
    viewport_size: Size,
    options: CameraOptions,
    /// Scale factors in pixels per map unit, descending; index 0 is the
    /// most-zoomed-in level.
    zoom_levels: Vec<f64>,
    zoom_index: usize,
    target: Point,
}

impl Camera {
    /// Creates a camera with the default zoom table parameters, centered on
    /// the map at the most-zoomed-out level.
    pub fn new(map_size: Size, viewport_size: Size) -> Self {
        Self::with_options(map_size, viewport_size, CameraOptions::default())
    }

    pub fn with_options(map_size: Size, viewport_size: Size, options: CameraOptions) -> Self {
        let zoom_levels = Self::compute_zoom_levels(map_size, viewport_size, options);
        let zoom_index = zoom_levels.len() - 1;
        Self {
            map_size,
            viewport_size,
            options,
            zoom_levels,
            zoom_index,
            target: map_size.center(),
        }
    }

    /// Builds the descending scale table: start at `max_zoom` and divide by
    /// `step_size` until the map's major axis fits inside the viewport's
    /// minor axis. Each level is rounded to 2 decimals to stabilize
    /// floating-point comparisons. Always yields at least `max_zoom`, even
    /// for a zero-area viewport.
    fn compute_zoom_levels(map_size: Size, viewport_size: Size, options: CameraOptions) -> Vec<f64> {
        let major = map_size.major_axis();
        let minor = viewport_size.minor_axis();

        let mut current = round2(options.max_zoom);
        let mut levels = vec![current];
        if minor > 0.0 {
            while major * current >= minor && current > MIN_ZOOM_LEVEL {
                current = round2(current / options.step_size).max(MIN_ZOOM_LEVEL);
                levels.push(current);
            }
        }
        levels
    }

    /// Current scale factor in pixels per map unit.
    ///
    /// Errors only on an internal invariant violation (the index escaping
    /// the table), never from normal interaction.
    pub fn get_zoom(&self) -> Result<f64> {
        self.zoom_levels
            .get(self.zoom_index)
            .copied()
            .ok_or_else(|| {
                MapError::ZoomIndexOutOfRange {
                    index: self.zoom_index,
                    levels: self.zoom_levels.len(),
                }
                .into()
            })
    }

    /// The full scale table, descending; index 0 is the most-zoomed-in level
    pub fn zoom_levels(&self) -> &[f64] {
        &self.zoom_levels
    }

    pub fn zoom_index(&self) -> usize {
        self.zoom_index
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn map_size(&self) -> Size {
        self.map_size
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    /// Steps the zoom index by the sign of `delta` (magnitude is ignored).
    /// Positive deltas zoom in, negative zoom out; zero re-clamps without
    /// moving. Saturates at the table ends. Returns the new scale factor.
    pub fn bump_zoom(&mut self, delta: f64) -> Result<f64> {
        let last = self.zoom_levels.len() - 1;
        if delta > 0.0 {
            self.zoom_index = self.zoom_index.saturating_sub(1);
        } else if delta < 0.0 {
            self.zoom_index = (self.zoom_index + 1).min(last);
        } else {
            self.zoom_index = self.zoom_index.min(last);
        }
        self.get_zoom()
    }

    /// Map-space rectangle currently visible: `target ± (viewport / zoom) / 2`
    /// per axis. Recomputed on every call; never cached across mutations.
    pub fn view_box(&self) -> Result<ViewBox> {
        let zoom = self.get_zoom()?;
        Ok(ViewBox::from_center(
            self.target,
            self.viewport_size.width / zoom,
            self.viewport_size.height / zoom,
        ))
    }

    /// Unconditional target overwrite. Panning past the map edges is
    /// permitted; callers clamp if they want limits.
    pub fn jump_to(&mut self, point: Point) {
        self.target = point;
    }

    /// Zoom bump combined with a target shift keeping the map point under
    /// `viewport_rel` (relative `[0,1] x [0,1]` viewport position, y-down)
    /// visually fixed. Returns the new target, rounded to integer map units
    /// to avoid sub-pixel churn.
    pub fn zoom_towards(&mut self, delta: f64, viewport_rel: Point) -> Result<Point> {
        let zoom_before = self.get_zoom()?;
        let zoom_after = self.bump_zoom(delta)?;

        // Viewport footprint in map units before and after the bump; the
        // bias weights the shrink/grow toward the cursor. Screen y grows
        // downward while map y grows upward, hence the inverted y bias.
        let dx = (self.viewport_size.width / zoom_before - self.viewport_size.width / zoom_after)
            * (viewport_rel.x - 0.5);
        let dy = (self.viewport_size.height / zoom_before - self.viewport_size.height / zoom_after)
            * (0.5 - viewport_rel.y);

        self.target = Point::new(self.target.x + dx, self.target.y + dy).round();
        Ok(self.target)
    }

    /// Recomputes the zoom table for a resized viewport, clamping the index
    /// into the new table. The target is preserved.
    pub fn set_viewport_size(&mut self, viewport_size: Size) {
        self.viewport_size = viewport_size;
        self.zoom_levels = Self::compute_zoom_levels(self.map_size, viewport_size, self.options);
        self.zoom_index = self.zoom_index.min(self.zoom_levels.len() - 1);
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        Camera::new(Size::square(8192.0), Size::square(1024.0))
    }

    #[test]
    fn test_zoom_table_shape() {
        let camera = test_camera();
        let levels = camera.zoom_levels();

        assert!(!levels.is_empty());
        assert_eq!(levels[0], 4.0);
        // Strictly descending
        for pair in levels.windows(2) {
            assert!(pair[0] > pair[1]);
        }
        // Last level fits the whole map into the viewport
        assert!(8192.0 * levels[levels.len() - 1] < 1024.0);
    }

    #[test]
    fn test_construction_defaults() {
        let camera = test_camera();
        let levels = camera.zoom_levels().to_vec();

        // Starts at the most-zoomed-out level, centered on the map
        assert_eq!(camera.get_zoom().unwrap(), levels[levels.len() - 1]);
        assert_eq!(camera.target(), Point::new(4096.0, 4096.0));
    }

    #[test]
    fn test_zero_area_viewport() {
        let camera = Camera::new(Size::square(8192.0), Size::square(0.0));
        assert_eq!(camera.zoom_levels(), &[4.0]);
        assert_eq!(camera.get_zoom().unwrap(), 4.0);
    }

    #[test]
    fn test_bump_zoom_zero_is_noop() {
        let mut camera = test_camera();
        let before = camera.get_zoom().unwrap();
        assert_eq!(camera.bump_zoom(0.0).unwrap(), before);
        assert_eq!(camera.get_zoom().unwrap(), before);
    }

    #[test]
    fn test_bump_zoom_saturates() {
        let mut camera = test_camera();
        let levels = camera.zoom_levels().to_vec();

        // Zoom out from the most-zoomed-out level: no movement, same value twice
        assert_eq!(camera.bump_zoom(-1.0).unwrap(), levels[levels.len() - 1]);
        assert_eq!(camera.bump_zoom(-1.0).unwrap(), levels[levels.len() - 1]);

        // Zoom all the way in; magnitude of the delta is irrelevant
        for _ in 0..levels.len() + 3 {
            camera.bump_zoom(7.5).unwrap();
        }
        assert_eq!(camera.get_zoom().unwrap(), 4.0);
        assert_eq!(camera.zoom_index(), 0);

        // One bump out lands on the second table entry
        assert_eq!(camera.bump_zoom(-1.0).unwrap(), levels[1]);
    }

    #[test]
    fn test_view_box_at_max_zoom() {
        let mut camera = test_camera();
        for _ in 0..camera.zoom_levels().len() {
            camera.bump_zoom(1.0).unwrap();
        }
        assert_eq!(camera.get_zoom().unwrap(), 4.0);

        let vb = camera.view_box().unwrap();
        // 1024 px / 4.0 px-per-unit = 256 map units per axis
        assert_eq!(vb.width(), 256.0);
        assert_eq!(vb.height(), 256.0);
        assert_eq!(vb.center(), Point::new(4096.0, 4096.0));
    }

    #[test]
    fn test_jump_to_is_unclamped() {
        let mut camera = test_camera();
        camera.jump_to(Point::new(-5000.0, 99999.0));
        assert_eq!(camera.target(), Point::new(-5000.0, 99999.0));
    }

    #[test]
    fn test_zoom_towards_center_matches_bump() {
        let mut a = test_camera();
        let mut b = test_camera();

        a.zoom_towards(1.0, Point::new(0.5, 0.5)).unwrap();
        b.bump_zoom(1.0).unwrap();

        assert_eq!(a.target(), b.target());
        assert_eq!(a.get_zoom().unwrap(), b.get_zoom().unwrap());
    }

    #[test]
    fn test_zoom_towards_keeps_cursor_point_fixed() {
        let mut camera = test_camera();
        let rel = Point::new(0.25, 0.75);

        let before = camera.view_box().unwrap();
        let under_cursor = Point::new(
            before.left + rel.x * before.width(),
            before.top - rel.y * before.height(),
        );

        camera.zoom_towards(1.0, rel).unwrap();

        let after = camera.view_box().unwrap();
        let under_cursor_after = Point::new(
            after.left + rel.x * after.width(),
            after.top - rel.y * after.height(),
        );

        // Target is rounded to integer map units, so allow one unit of drift
        assert!((under_cursor.x - under_cursor_after.x).abs() <= 1.0);
        assert!((under_cursor.y - under_cursor_after.y).abs() <= 1.0);
    }

    #[test]
    fn test_viewport_resize_recomputes_table() {
        let mut camera = test_camera();
        let levels_before = camera.zoom_levels().len();

        camera.set_viewport_size(Size::square(4096.0));
        // A bigger viewport needs fewer zoom-out steps
        assert!(camera.zoom_levels().len() < levels_before);
        assert!(camera.zoom_index() < camera.zoom_levels().len());
        assert_eq!(camera.target(), Point::new(4096.0, 4096.0));
    }
}
