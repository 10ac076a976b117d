//! Shared trait abstractions for common patterns
//!
//! This module provides the layer contract shared by every layer kind plus
//! small math traits reused across the codebase.

use crate::{
    core::bounds::{Size, ViewBox},
    core::geo::Point,
    data::records::{BaseId, FactionId},
    prelude::HashMap,
    Result,
};

/// Trait for layer-like objects
///
/// Every layer kind implements the same two-phase update protocol:
///
/// * [`LayerOperations::redraw`] runs on every camera mutation and must stay
///   O(1): it only refreshes the layer's map-to-screen transform.
/// * [`LayerOperations::deferred_update`] runs once interaction settles and
///   may do expensive work (tile regeneration, culling, visibility toggles).
///   It must be idempotent: repeating it with the same arguments yields the
///   same visible state.
pub trait LayerOperations: Send + Sync {
    /// Get layer ID
    fn id(&self) -> &str;

    /// Get layer type
    fn layer_type(&self) -> crate::layers::base::LayerType;

    /// Map footprint this layer was built for; must match its manager's
    fn size(&self) -> Size;

    /// Check if layer is visible
    fn is_visible(&self) -> bool;

    /// Set layer visibility. Hiding is cosmetic (content is preserved);
    /// a layer whose content went stale while hidden reports `is_stale`.
    fn set_visible(&mut self, visible: bool);

    /// Whether the layer missed a deferred update while hidden
    fn is_stale(&self) -> bool;

    /// Mark the layer's content stale (deferred work was skipped)
    fn mark_stale(&mut self);

    /// Cheap per-frame geometric update; no element creation, no I/O
    fn redraw(&mut self, view_box: &ViewBox, zoom: f64);

    /// Expensive content update, run after interaction settles
    fn deferred_update(&mut self, view_box: &ViewBox, zoom: f64) -> Result<()>;

    /// Emit retained draw commands for the current content
    fn render(&self, context: &mut crate::rendering::context::RenderContext) -> Result<()>;

    /// Whether this layer consumes base-ownership snapshots
    fn supports_ownership(&self) -> bool {
        false
    }

    /// Apply a base → faction snapshot (only called when
    /// [`LayerOperations::supports_ownership`] reports true)
    fn apply_ownership(&mut self, _snapshot: &HashMap<BaseId, FactionId>) {}

    /// Hit-test a map-space position, returning the base under it if any
    fn hit_test(&self, _map_pos: Point, _zoom: f64) -> Option<BaseId> {
        None
    }

    /// Get layer options
    fn options(&self) -> serde_json::Value;

    /// Dynamic casting support
    fn as_any(&self) -> &dyn std::any::Any;
    fn as_any_mut(&mut self) -> &mut dyn std::any::Any;
}

/// Point math operations trait to consolidate point calculations
pub trait PointMath {
    /// Add two points
    fn add(&self, other: &Self) -> Self;

    /// Subtract two points
    fn subtract(&self, other: &Self) -> Self;

    /// Multiply by scalar
    fn multiply(&self, scalar: f64) -> Self;

    /// Calculate distance to another point
    fn distance_to(&self, other: &Self) -> f64;
}
