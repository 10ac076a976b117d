use crate::{
    core::{
        bounds::{Size, ViewBox},
        camera::Camera,
        config::RendererOptions,
        geo::Point,
    },
    data::records::{Base, BaseId, BaseStatus, Continent, ContinentId, FactionId},
    input::{
        events::{InputEvent, MapEvent},
        gestures::GestureRecognizer,
    },
    layers::{base::LayerTrait, manager::LayerManager},
    prelude::{HashMap, HashSet, Instant},
    rendering::context::RenderContext,
    MapError, Result,
};
use std::collections::VecDeque;
use std::time::Duration;

#[cfg(feature = "debug")]
use log;

/// Async factory producing one fully built layer for a continent
pub type LayerFuture =
    std::pin::Pin<Box<dyn futures::Future<Output = Result<Box<dyn LayerTrait>>> + Send>>;

/// Single-slot deferred-update scheduler.
///
/// State machine `Idle -> Scheduled(args) -> Idle`: a new request while one
/// is pending overwrites its arguments and restarts the settle timer. The
/// earlier request is cancelled, never queued, so at most one deferred pass
/// fires per settled interaction.
#[derive(Debug, Clone, Copy, PartialEq)]
enum DeferredRequest {
    Idle,
    Scheduled {
        view_box: ViewBox,
        zoom: f64,
        due: Instant,
    },
}

#[derive(Debug)]
pub struct DeferredScheduler {
    state: DeferredRequest,
    settle_delay: Duration,
    superseded: u64,
}

impl DeferredScheduler {
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            state: DeferredRequest::Idle,
            settle_delay,
            superseded: 0,
        }
    }

    /// Schedule a deferred pass with fresh arguments, superseding any
    /// pending request
    pub fn schedule(&mut self, view_box: ViewBox, zoom: f64, now: Instant) {
        if matches!(self.state, DeferredRequest::Scheduled { .. }) {
            self.superseded += 1;
        }
        self.state = DeferredRequest::Scheduled {
            view_box,
            zoom,
            due: now + self.settle_delay,
        };
    }

    /// Takes the pending request once its settle delay has elapsed
    pub fn poll(&mut self, now: Instant) -> Option<(ViewBox, f64)> {
        match self.state {
            DeferredRequest::Scheduled { view_box, zoom, due } if now >= due => {
                self.state = DeferredRequest::Idle;
                Some((view_box, zoom))
            }
            _ => None,
        }
    }

    /// Takes the pending request immediately (the explicit
    /// "transition finished" signal)
    pub fn flush(&mut self) -> Option<(ViewBox, f64)> {
        match self.state {
            DeferredRequest::Scheduled { view_box, zoom, .. } => {
                self.state = DeferredRequest::Idle;
                Some((view_box, zoom))
            }
            DeferredRequest::Idle => None,
        }
    }

    pub fn cancel(&mut self) {
        self.state = DeferredRequest::Idle;
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self.state, DeferredRequest::Scheduled { .. })
    }

    /// How many pending requests have been replaced before firing
    pub fn superseded_count(&self) -> u64 {
        self.superseded
    }
}

/// Top-level controller binding input to one [`Camera`] and fanning updates
/// out to one [`LayerManager`].
///
/// Every camera mutation immediately redraws all layers (cheap transform
/// refresh) and schedules a deferred content pass that fires once the
/// interaction settles. Continent switching tears the whole view down and
/// rebuilds it atomically.
pub struct MapRenderer {
    camera: Camera,
    layers: LayerManager,
    scheduler: DeferredScheduler,
    options: RendererOptions,
    gestures: GestureRecognizer,
    active_continent: Option<Continent>,
    known_bases: HashSet<BaseId>,
    hovered_base: Option<BaseId>,
    events: VecDeque<MapEvent>,
}

impl MapRenderer {
    pub fn new(continent: Continent, viewport_size: Size) -> Self {
        Self::with_options(continent, viewport_size, RendererOptions::default())
    }

    pub fn with_options(continent: Continent, viewport_size: Size, options: RendererOptions) -> Self {
        let map_size = Size::square(continent.map_size);
        Self {
            camera: Camera::new(map_size, viewport_size),
            layers: LayerManager::new(map_size),
            scheduler: DeferredScheduler::new(options.settle_delay),
            options,
            gestures: GestureRecognizer::new(),
            active_continent: Some(continent),
            known_bases: HashSet::default(),
            hovered_base: None,
            events: VecDeque::new(),
        }
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut LayerManager {
        &mut self.layers
    }

    pub fn active_continent(&self) -> Option<&Continent> {
        self.active_continent.as_ref()
    }

    pub fn hovered_base(&self) -> Option<BaseId> {
        self.hovered_base
    }

    /// Registers the continent's base set for ownership filtering and hover
    pub fn set_known_bases(&mut self, bases: &[Base]) {
        self.known_bases = bases.iter().map(|b| b.id).collect();
    }

    /// Adds a layer and brings its content up to date with the current view
    pub fn add_layer(&mut self, layer: Box<dyn LayerTrait>) -> Result<()> {
        let layer_id = layer.id().to_string();
        self.layers.add_layer(layer)?;

        let view_box = self.camera.view_box()?;
        let zoom = self.camera.get_zoom()?;
        if let Some(result) = self.layers.with_layer_mut(&layer_id, |l| {
            l.redraw(&view_box, zoom);
            l.deferred_update(&view_box, zoom)
        }) {
            result?;
        }

        self.events.push_back(MapEvent::LayerAdded { layer_id });
        Ok(())
    }

    pub fn remove_layer(&mut self, layer_id: &str) -> Option<Box<dyn LayerTrait>> {
        let removed = self.layers.remove_layer(layer_id);
        if removed.is_some() {
            self.events.push_back(MapEvent::LayerRemoved {
                layer_id: layer_id.to_string(),
            });
        }
        removed
    }

    /// Translates one raw input event into camera mutations and layer updates
    pub fn handle_input(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::Scroll { delta, position } if self.options.wheel_zoom => {
                let rel = self.viewport_relative(position);
                self.camera.zoom_towards(delta, rel)?;
                self.after_camera_mutation()?;
            }
            InputEvent::Drag { delta } if self.options.drag_pan => {
                let zoom = self.camera.get_zoom()?;
                let target = self.camera.target();
                // Screen y grows downward, map y upward
                self.camera.jump_to(Point::new(
                    target.x - delta.x / zoom,
                    target.y + delta.y / zoom,
                ));
                self.after_camera_mutation()?;
            }
            InputEvent::DoubleClick { position } if self.options.double_click_zoom => {
                let rel = self.viewport_relative(position);
                self.camera.zoom_towards(1.0, rel)?;
                self.after_camera_mutation()?;
            }
            InputEvent::Resize { size } => {
                self.camera.set_viewport_size(Size::new(size.x, size.y));
                self.after_camera_mutation()?;
            }
            InputEvent::MouseMove { position } => {
                self.hover_at_pixel(position)?;
            }
            InputEvent::Touch {
                event_type,
                touches,
            } if self.options.pinch_zoom => {
                for translated in self.gestures.process(event_type, touches) {
                    self.handle_input(translated)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Fires the pending deferred pass if its settle delay has elapsed.
    /// Returns whether a pass ran.
    pub fn tick(&mut self) -> Result<bool> {
        match self.scheduler.poll(Instant::now()) {
            Some((view_box, zoom)) => {
                self.run_deferred(&view_box, zoom)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Fires the pending deferred pass immediately; the hook for an explicit
    /// "transition finished" signal from the host
    pub fn flush_deferred(&mut self) -> Result<bool> {
        match self.scheduler.flush() {
            Some((view_box, zoom)) => {
                self.run_deferred(&view_box, zoom)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Toggles a layer's visibility. Showing a layer whose content went
    /// stale while hidden re-runs its deferred update right away.
    pub fn set_layer_visibility(&mut self, layer_id: &str, visible: bool) -> Result<()> {
        let view_box = self.camera.view_box()?;
        let zoom = self.camera.get_zoom()?;

        let mut result = Ok(());
        self.layers.with_layer_mut(layer_id, |layer| {
            if layer.is_visible() == visible {
                return;
            }
            layer.set_visible(visible);
            if visible && layer.is_stale() {
                layer.redraw(&view_box, zoom);
                result = layer.deferred_update(&view_box, zoom);
            }
        });
        result
    }

    /// Emits the retained draw commands of all visible layers in order
    pub fn render(&self, context: &mut RenderContext) -> Result<()> {
        context.begin_frame();
        let viewport = self.camera.viewport_size();
        context.set_clip_bounds(
            Point::new(0.0, 0.0),
            Point::new(viewport.width, viewport.height),
        );

        let mut first_err = None;
        self.layers.for_each_layer(|layer| {
            if layer.is_visible() {
                if let Err(err) = layer.render(context) {
                    first_err.get_or_insert(err);
                }
            }
        });
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Switches the whole view to a new continent.
    ///
    /// All async layer factories resolve before any old layer is torn down,
    /// so there is never a frame with neither old nor new content. Factories
    /// failing with [`MapError::Unsupported`] are optional layers and are
    /// skipped; any other failure aborts the switch with the previous map
    /// state fully intact.
    pub async fn switch_continent(
        &mut self,
        continent: Continent,
        bases: Vec<Base>,
        factories: Vec<LayerFuture>,
    ) -> Result<()> {
        let results = futures::future::join_all(factories).await;

        let mut new_layers = Vec::new();
        for result in results {
            match result {
                Ok(layer) => new_layers.push(layer),
                Err(err) => {
                    if matches!(err.downcast_ref::<MapError>(), Some(MapError::Unsupported(_))) {
                        #[cfg(feature = "debug")]
                        log::warn!("skipping optional layer: {err}");
                        continue;
                    }
                    return Err(err);
                }
            }
        }

        // Stage the new layer set first so registration errors surface
        // before the old view is torn down.
        let map_size = Size::square(continent.map_size);
        let mut staging = LayerManager::new(map_size);
        for layer in new_layers {
            staging.add_layer(layer)?;
        }

        let continent_id = continent.id;
        self.layers = staging;
        self.camera = Camera::new(map_size, self.camera.viewport_size());
        self.known_bases = bases.iter().map(|b| b.id).collect();
        self.hovered_base = None;
        self.active_continent = Some(continent);
        self.scheduler.cancel();

        // Forced full pass: one redraw plus one immediate deferred update
        let view_box = self.camera.view_box()?;
        let zoom = self.camera.get_zoom()?;
        self.layers
            .for_each_layer_mut(|layer| layer.redraw(&view_box, zoom));
        self.run_deferred(&view_box, zoom)?;

        for layer_id in self.layers.list_layers() {
            self.events.push_back(MapEvent::LayerAdded { layer_id });
        }
        self.events
            .push_back(MapEvent::ContinentChanged { continent_id });

        #[cfg(feature = "debug")]
        log::debug!(
            "switched to continent {} ({} layers)",
            continent_id,
            self.layers.len()
        );
        Ok(())
    }

    /// Forwards an ownership snapshot to every layer that supports it.
    ///
    /// Snapshots for a continent other than the active one are stale
    /// responses from an abandoned switch and are dropped wholesale;
    /// unknown base ids are filtered out silently.
    pub fn apply_ownership(
        &mut self,
        continent_id: ContinentId,
        snapshot: &HashMap<BaseId, FactionId>,
    ) {
        let is_active = self
            .active_continent
            .as_ref()
            .map(|c| c.id == continent_id)
            .unwrap_or(false);
        if !is_active {
            #[cfg(feature = "debug")]
            log::debug!("dropping stale ownership update for continent {continent_id}");
            return;
        }

        let filtered: HashMap<BaseId, FactionId> = snapshot
            .iter()
            .filter(|(base_id, _)| self.known_bases.contains(base_id))
            .map(|(base_id, faction)| (*base_id, *faction))
            .collect();
        if filtered.is_empty() {
            return;
        }

        self.layers.for_each_layer_mut(|layer| {
            if layer.supports_ownership() {
                layer.apply_ownership(&filtered);
            }
        });
    }

    /// Convenience wrapper over [`MapRenderer::apply_ownership`] for raw
    /// status payloads
    pub fn apply_statuses(&mut self, continent_id: ContinentId, statuses: &[BaseStatus]) {
        let snapshot: HashMap<BaseId, FactionId> = statuses
            .iter()
            .map(|status| (status.base_id, status.faction_id))
            .collect();
        self.apply_ownership(continent_id, &snapshot);
    }

    /// Drains one pending map event, oldest first
    pub fn poll_event(&mut self) -> Option<MapEvent> {
        self.events.pop_front()
    }

    fn viewport_relative(&self, position: Point) -> Point {
        let viewport = self.camera.viewport_size();
        Point::new(
            if viewport.width > 0.0 {
                position.x / viewport.width
            } else {
                0.5
            },
            if viewport.height > 0.0 {
                position.y / viewport.height
            } else {
                0.5
            },
        )
    }

    fn after_camera_mutation(&mut self) -> Result<()> {
        let view_box = self.camera.view_box()?;
        let zoom = self.camera.get_zoom()?;

        self.layers
            .for_each_layer_mut(|layer| layer.redraw(&view_box, zoom));
        self.scheduler.schedule(view_box, zoom, Instant::now());
        self.events.push_back(MapEvent::ViewChanged {
            target: self.camera.target(),
            zoom,
        });
        Ok(())
    }

    fn run_deferred(&mut self, view_box: &ViewBox, zoom: f64) -> Result<()> {
        let mut first_err = None;
        self.layers.for_each_layer_mut(|layer| {
            if layer.is_visible() {
                if let Err(err) = layer.deferred_update(view_box, zoom) {
                    first_err.get_or_insert(err);
                }
            } else {
                // Hidden layers skip the pass; their content is stale until
                // they are shown again.
                layer.mark_stale();
            }
        });
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn hover_at_pixel(&mut self, position: Point) -> Result<()> {
        let view_box = self.camera.view_box()?;
        let zoom = self.camera.get_zoom()?;
        let rel = self.viewport_relative(position);
        let map_pos = Point::new(
            view_box.left + rel.x * view_box.width(),
            view_box.top - rel.y * view_box.height(),
        );

        let mut hit = None;
        self.layers.for_each_layer(|layer| {
            if hit.is_none() && layer.is_visible() {
                hit = layer.hit_test(map_pos, zoom);
            }
        });

        if hit != self.hovered_base {
            self.hovered_base = hit;
            self.events.push_back(match hit {
                Some(base_id) => MapEvent::BaseHovered { base_id },
                None => MapEvent::HoverCleared,
            });
        }
        Ok(())
    }
}
