//! Tool mode and pointer session state.
//!
//! [`PaintSession`] owns everything the brush tool mutates: the committed
//! region, the in-progress stroke, the sample queue and the brush radius.
//! Pointer callbacks from the host map are routed through it, and the
//! resulting redraw notifications are collected as [`PaintEvent`]s for the
//! rendering layer to pick up with [`PaintSession::drain_events`].

use bevy::prelude::*;

use crate::config::BrushSettings;
use crate::geometry::{
    BrushAction, BrushSample, GeoEngine, GeoPoint, GeometryEngine, Region, ScaleResolver,
};

use super::host::MapHost;
use super::queue::EventQueue;
use super::region::RegionStore;
use super::stroke::StrokeTracker;

/// Which brush, if any, is currently armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolMode {
    #[default]
    Idle,
    Drawing,
    Erasing,
}

impl ToolMode {
    /// Action applied by strokes made in this mode
    pub fn action(&self) -> Option<BrushAction> {
        match self {
            ToolMode::Idle => None,
            ToolMode::Drawing => Some(BrushAction::Draw),
            ToolMode::Erasing => Some(BrushAction::Erase),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ToolMode::Idle => "idle",
            ToolMode::Drawing => "drawing",
            ToolMode::Erasing => "erasing",
        }
    }
}

/// Redraw notification for the rendering layer.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintEvent {
    /// The in-progress stroke grew
    StrokeUpdated { stroke: Region, action: BrushAction },
    /// The committed region was replaced; `None` when nothing is painted
    RegionUpdated { region: Option<Region> },
}

/// Brush tool state: mode, pointer session, stroke and committed region.
#[derive(Resource)]
pub struct PaintSession {
    mode: ToolMode,
    radius: f64,
    min_radius: f64,
    max_radius: f64,
    disc_steps: usize,
    pointer_down: bool,
    cursor: GeoPoint,
    engine: Box<dyn GeometryEngine>,
    scale: ScaleResolver,
    queue: EventQueue,
    tracker: StrokeTracker,
    store: RegionStore,
    outbox: Vec<PaintEvent>,
}

impl Default for PaintSession {
    fn default() -> Self {
        Self::new(&BrushSettings::default())
    }
}

impl PaintSession {
    pub fn new(settings: &BrushSettings) -> Self {
        Self::with_engine(settings, GeoEngine::with_steps(settings.disc_steps))
    }

    pub fn with_engine(settings: &BrushSettings, engine: impl GeometryEngine + 'static) -> Self {
        let settings = settings.normalized();
        Self {
            mode: ToolMode::Idle,
            radius: settings.radius,
            min_radius: settings.min_radius,
            max_radius: settings.max_radius,
            disc_steps: settings.disc_steps,
            pointer_down: false,
            cursor: GeoPoint::default(),
            engine: Box::new(engine),
            scale: ScaleResolver::new(),
            queue: EventQueue::default(),
            tracker: StrokeTracker::default(),
            store: RegionStore::default(),
            outbox: Vec::new(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn radius_bounds(&self) -> (f64, f64) {
        (self.min_radius, self.max_radius)
    }

    /// Vertices per brush disc
    pub fn disc_steps(&self) -> usize {
        self.disc_steps
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    /// Last known pointer position, for drawing the brush preview
    pub fn cursor(&self) -> GeoPoint {
        self.cursor
    }

    /// Geometry of the stroke in progress
    pub fn stroke(&self) -> Option<&Region> {
        self.tracker.stroke()
    }

    /// Committed geometry
    pub fn region(&self) -> Option<&Region> {
        self.store.region()
    }

    pub fn pending_samples(&self) -> usize {
        self.queue.len()
    }

    /// Take the redraw notifications produced since the last call
    pub fn drain_events(&mut self) -> Vec<PaintEvent> {
        std::mem::take(&mut self.outbox)
    }

    // ========================================================================
    // Brush size
    // ========================================================================

    /// Set the brush radius in pixels, clamped to the configured bounds.
    /// Returns the radius actually in effect.
    pub fn set_radius(&mut self, radius: f64) -> f64 {
        if radius.is_nan() {
            warn!("Ignoring NaN brush radius");
            return self.radius;
        }
        self.radius = radius.clamp(self.min_radius, self.max_radius);
        self.radius
    }

    /// Replace the radius bounds and re-clamp the current radius.
    /// A different disc step count swaps in a new [`GeoEngine`].
    pub fn apply_brush_settings(&mut self, settings: &BrushSettings) {
        let settings = settings.normalized();
        self.min_radius = settings.min_radius;
        self.max_radius = settings.max_radius;
        self.set_radius(settings.radius);

        if settings.disc_steps != self.disc_steps {
            debug!(
                "Brush disc steps {} -> {}",
                self.disc_steps, settings.disc_steps
            );
            self.disc_steps = settings.disc_steps;
            self.engine = Box::new(GeoEngine::with_steps(settings.disc_steps));
        }
    }

    // ========================================================================
    // Mode transitions
    // ========================================================================

    pub fn start_draw(&mut self, host: &mut impl MapHost) {
        self.start(ToolMode::Drawing, host);
    }

    pub fn start_erase(&mut self, host: &mut impl MapHost) {
        self.start(ToolMode::Erasing, host);
    }

    /// Toolbar behaviour: pressing the active brush again turns it off
    pub fn toggle_draw(&mut self, host: &mut impl MapHost) {
        if self.mode == ToolMode::Drawing {
            self.stop(host);
        } else {
            self.start_draw(host);
        }
    }

    pub fn toggle_erase(&mut self, host: &mut impl MapHost) {
        if self.mode == ToolMode::Erasing {
            self.stop(host);
        } else {
            self.start_erase(host);
        }
    }

    /// Return to idle. An uncommitted stroke is abandoned, not committed.
    pub fn stop(&mut self, host: &mut impl MapHost) {
        let was_active = self.mode != ToolMode::Idle;

        self.mode = ToolMode::Idle;
        self.queue.cancel();
        self.tracker.reset();

        if self.pointer_down {
            self.pointer_down = false;
            host.set_panning(true);
        }
        if was_active {
            host.unsubscribe_pointer();
            info!("Brush stopped");
        }
    }

    /// The tool is being removed from the map
    pub fn detach(&mut self, host: &mut impl MapHost) {
        self.stop(host);
    }

    fn start(&mut self, mode: ToolMode, host: &mut impl MapHost) {
        self.stop(host);
        self.mode = mode;
        self.tracker.reset();
        host.subscribe_pointer();
        info!("Brush {} with radius {} px", mode.display_name(), self.radius);
    }

    // ========================================================================
    // Pointer session
    // ========================================================================

    /// Open a pointer session and paint at the press position
    pub fn pointer_down(&mut self, point: GeoPoint, host: &mut impl MapHost) {
        if self.mode == ToolMode::Idle {
            return;
        }
        if self.pointer_down {
            debug!("Pointer pressed twice, closing the previous session first");
            self.pointer_up(host);
        }

        self.pointer_down = true;
        host.set_panning(false);
        self.pointer_move(point, host);
    }

    pub fn pointer_move(&mut self, point: GeoPoint, host: &mut impl MapHost) {
        if self.record_pointer(point, &*host) {
            self.process_pending();
        }
    }

    /// Close the pointer session and commit its stroke
    pub fn pointer_up(&mut self, host: &mut impl MapHost) {
        if !self.pointer_down {
            return;
        }

        self.process_pending();
        self.pointer_down = false;
        host.set_panning(true);

        let (Some(stroke), Some(action)) = (self.tracker.take(), self.mode.action()) else {
            return;
        };
        if self.store.commit(&stroke, action, self.engine.as_ref()) {
            self.outbox.push(PaintEvent::RegionUpdated {
                region: self.store.region().cloned(),
            });
        }
    }

    /// Track the cursor and, during a session, queue a sample without
    /// processing it. Returns whether a sample was queued.
    pub fn record_pointer(&mut self, point: GeoPoint, host: &impl MapHost) -> bool {
        self.cursor = point;

        let Some(action) = self.mode.action() else {
            return false;
        };
        if !self.pointer_down {
            return false;
        }

        self.queue.enqueue(BrushSample {
            point,
            zoom: host.zoom(),
            radius_px: self.radius,
            action,
        });
        true
    }

    /// Apply every queued sample to the stroke, in arrival order.
    /// Returns how many samples were taken off the queue.
    pub fn process_pending(&mut self) -> usize {
        let Self {
            queue,
            tracker,
            store,
            engine,
            scale,
            outbox,
            ..
        } = self;
        let engine: &dyn GeometryEngine = engine.as_ref();

        queue.drain(|sample| {
            if sample.action == BrushAction::Erase && store.region().is_none() {
                debug!("Nothing painted yet, ignoring erase sample");
                return;
            }
            if tracker.apply_sample(&sample, engine, scale)
                && let Some(stroke) = tracker.stroke()
            {
                outbox.push(PaintEvent::StrokeUpdated {
                    stroke: stroke.clone(),
                    action: sample.action,
                });
            }
        })
    }

    // ========================================================================
    // Whole-region operations
    // ========================================================================

    /// Forget the committed region
    pub fn erase_all(&mut self) {
        self.store.clear();
        info!("Erased all painted geometry");
        self.outbox.push(PaintEvent::RegionUpdated { region: None });
    }

    /// Install a region read from disk; `None` clears the store
    pub fn replace_region(&mut self, region: Option<Region>) {
        match region {
            Some(region) => self.store.replace(region),
            None => self.store.clear(),
        }
        self.outbox.push(PaintEvent::RegionUpdated {
            region: self.store.region().cloned(),
        });
    }
}
