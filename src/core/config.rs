//! Configuration for renderer behavior and LOD/visibility policy tuning
//!
//! The threshold tables here are empirically fitted against the target tile
//! assets; treat them as tunable policy, not derived values.

use crate::core::constants::DEFAULT_SETTLE_MS;
use crate::data::records::FacilityClass;
use once_cell::sync::Lazy;
use std::time::Duration;

/// Behavioral options for [`crate::core::map::MapRenderer`]
#[derive(Debug, Clone, PartialEq)]
pub struct RendererOptions {
    /// Quiet period after the last camera mutation before deferred updates fire
    pub settle_delay: Duration,
    /// Device pixel ratio; high-DPI displays select one LOD finer at the
    /// same logical zoom to avoid blur
    pub device_pixel_ratio: f64,
    pub wheel_zoom: bool,
    pub drag_pan: bool,
    pub double_click_zoom: bool,
    pub pinch_zoom: bool,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_MS),
            device_pixel_ratio: 1.0,
            wheel_zoom: true,
            drag_pan: true,
            double_click_zoom: true,
            pinch_zoom: true,
        }
    }
}

/// Zoom → LOD selection table.
///
/// `thresholds` maps minimum effective zoom (after DPR compensation) to a
/// LOD, ordered from finest to coarsest; anything below the last threshold
/// falls through to `coarsest`.
#[derive(Debug, Clone, PartialEq)]
pub struct LodPolicy {
    pub thresholds: Vec<(f64, u8)>,
    pub coarsest: u8,
}

impl Default for LodPolicy {
    fn default() -> Self {
        Self {
            thresholds: vec![(0.8, 0), (0.4, 1), (0.2, 2)],
            coarsest: crate::core::constants::COARSEST_RENDER_LOD,
        }
    }
}

/// Default LOD policy shared by terrain layers constructed without an override
pub static DEFAULT_LOD_POLICY: Lazy<LodPolicy> = Lazy::new(LodPolicy::default);

/// Minimum zoom at which markers of each facility class become visible
#[derive(Debug, Clone, PartialEq)]
pub struct NameVisibilityPolicy {
    pub large_facility: f64,
    pub large_outpost: f64,
    pub small_outpost: f64,
    pub other: f64,
}

impl NameVisibilityPolicy {
    pub fn min_zoom(&self, class: FacilityClass) -> f64 {
        match class {
            FacilityClass::LargeFacility => self.large_facility,
            FacilityClass::LargeOutpost => self.large_outpost,
            FacilityClass::SmallOutpost => self.small_outpost,
            FacilityClass::Other => self.other,
        }
    }
}

impl Default for NameVisibilityPolicy {
    fn default() -> Self {
        // Large facilities are always labeled; outposts fade in as the
        // camera closes in.
        Self {
            large_facility: 0.0,
            large_outpost: 0.2,
            small_outpost: 0.4,
            other: 0.6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lod_policy_ordering() {
        let policy = LodPolicy::default();
        // Finest-first, strictly descending thresholds
        for pair in policy.thresholds.windows(2) {
            assert!(pair[0].0 > pair[1].0);
            assert!(pair[0].1 < pair[1].1);
        }
    }

    #[test]
    fn test_name_visibility_policy() {
        let policy = NameVisibilityPolicy::default();
        assert_eq!(policy.min_zoom(FacilityClass::LargeFacility), 0.0);
        assert!(policy.min_zoom(FacilityClass::SmallOutpost) > policy.min_zoom(FacilityClass::LargeOutpost));
    }
}
