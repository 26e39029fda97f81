//! The canvas session: the one owner of all session-only editor state.
//!
//! A [`CanvasSession`] is created when the editor mounts and disposed
//! when it unmounts. It owns the camera, the selection, the history and
//! the gesture recognizer, and drives the pure command transform in
//! [`crate::commands`]. The floor plan itself is *not* stored here: every
//! call receives the host's current document and committed updates flow
//! back through a [`FloorPlanSink`].
//!
//! Everything runs synchronously inside the event that triggered it; the
//! sink is fire-and-forget and never awaited (optimistic update). The
//! debounce deadline inside [`crate::history::History`] is the only
//! timer-like state, driven by the `now: Instant` the host passes in and
//! cleared unconditionally by [`CanvasSession::dispose`].

use std::time::{Duration, Instant};

use chrono::Utc;

use floorkit_core::constants;
use floorkit_core::{GridBounds, GridDelta, GridMetrics, GridPoint, PixelDelta, PixelPoint, PixelSize};

use crate::commands::{apply_command, CommandCtx, FloorPlanCommand, SelectionEffect};
use crate::gesture::{CanvasAction, GestureConfig, GestureContext, GestureRecognizer, InputEvent};
use crate::history::{History, HistoryAction, ViewSnapshot};
use crate::model::{FloorPlan, ObjectId, TablePatch};
use crate::selection::SelectionManager;
use crate::transform::{Camera, CanvasTransform, ViewportBounds, ZoomLimits};

/// Receives every committed floor-plan update. The host persists the
/// document and re-supplies the canonical copy on the next call.
pub trait FloorPlanSink {
    fn commit(&mut self, plan: &FloorPlan);
}

impl<F: FnMut(&FloorPlan)> FloorPlanSink for F {
    fn commit(&mut self, plan: &FloorPlan) {
        self(plan)
    }
}

/// Host-tunable engine configuration, fixed for the session lifetime.
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    pub metrics: GridMetrics,
    pub zoom: ZoomLimits,
    pub gesture: GestureConfig,
    pub max_history: usize,
    pub history_debounce: Duration,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            metrics: GridMetrics::default(),
            zoom: ZoomLimits::default(),
            gesture: GestureConfig::default(),
            max_history: constants::MAX_HISTORY_ENTRIES,
            history_debounce: Duration::from_millis(constants::HISTORY_DEBOUNCE_MS),
        }
    }
}

/// Session-only canvas state and the operations over it.
#[derive(Debug)]
pub struct CanvasSession {
    config: CanvasConfig,
    camera: Camera,
    selection: SelectionManager,
    history: History,
    recognizer: GestureRecognizer,
    viewport: PixelSize,
    read_only: bool,
    actor: Option<String>,
    disposed: bool,
}

impl CanvasSession {
    /// Creates a session viewing through a viewport of the given pixel
    /// size.
    pub fn new(config: CanvasConfig, viewport: PixelSize, read_only: bool) -> Self {
        let camera = Camera::new(config.zoom, config.metrics);
        let history = History::new(config.max_history, config.history_debounce);
        let recognizer = GestureRecognizer::new(config.gesture.clone());
        Self {
            config,
            camera,
            selection: SelectionManager::new(),
            history,
            recognizer,
            viewport,
            read_only,
            actor: None,
            disposed: false,
        }
    }

    /// Names the operator stamped into `created_by` metadata.
    pub fn with_actor(mut self, actor: impl Into<String>) -> Self {
        self.actor = Some(actor.into());
        self
    }

    /// The camera, for rendering.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The current transform.
    pub fn transform(&self) -> CanvasTransform {
        self.camera.transform()
    }

    /// The selection, for rendering.
    pub fn selection(&self) -> &SelectionManager {
        &self.selection
    }

    /// The history log, for the undo/redo UI.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Whether mutations are suppressed.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Updates the viewport element size (window resize).
    pub fn set_viewport_size(&mut self, viewport: PixelSize) {
        self.viewport = viewport;
    }

    /// The visible canvas-space box under the current transform,
    /// culling input.
    pub fn viewport_bounds(&self) -> ViewportBounds {
        self.camera.viewport_bounds(self.viewport)
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Feeds one raw input event through the gesture recognizer and
    /// applies the resulting actions. Also flushes any history entry
    /// whose quiet period has elapsed.
    pub fn handle_event(
        &mut self,
        event: &InputEvent,
        plan: &FloorPlan,
        sink: &mut dyn FloorPlanSink,
        now: Instant,
    ) {
        if self.disposed {
            return;
        }
        let ctx = GestureContext {
            zoom: self.camera.zoom(),
            read_only: self.read_only,
        };
        let actions = self.recognizer.process(event, &ctx);
        for action in actions {
            self.apply_action(action, plan, sink, now);
        }
        self.tick(now);
    }

    /// Flushes a due debounced history entry. The host calls this from
    /// its timer loop; `handle_event` calls it implicitly.
    pub fn tick(&mut self, now: Instant) {
        if self.disposed {
            return;
        }
        let snapshot = self.view_snapshot();
        self.history.flush_due(now, &snapshot, Utc::now());
    }

    /// Tears the session down: abandons in-flight gestures and the
    /// pending history entry so nothing fires after unmount.
    pub fn dispose(&mut self) {
        self.recognizer.reset();
        self.history.dispose();
        self.disposed = true;
    }

    fn apply_action(
        &mut self,
        action: CanvasAction,
        plan: &FloorPlan,
        sink: &mut dyn FloorPlanSink,
        now: Instant,
    ) {
        match action {
            CanvasAction::Pan { delta } => {
                self.camera.pan_by(delta);
                self.history
                    .record(HistoryAction::ViewChanged, "Panned view", now);
            }
            CanvasAction::ZoomAbout { zoom, anchor } => {
                self.camera.zoom_about(zoom, anchor);
                self.history
                    .record(HistoryAction::ViewChanged, "Zoomed view", now);
            }
            CanvasAction::StepZoom { direction } => {
                self.camera.step_zoom(direction);
                self.history
                    .record(HistoryAction::ViewChanged, "Zoomed view", now);
            }
            CanvasAction::ResetView => self.reset_view(now),
            CanvasAction::SelectObject { id, additive } => {
                self.selection.select([id], additive);
            }
            CanvasAction::SelectAll => {
                let ids: Vec<ObjectId> = plan.objects.iter().map(|o| o.id.clone()).collect();
                self.selection.select(ids, false);
            }
            CanvasAction::ClearSelection => self.selection.deselect_all(),
            CanvasAction::DeleteSelection => {
                let ids: Vec<ObjectId> = self.selection.ids().cloned().collect();
                self.delete_objects(&ids, plan, sink, now);
            }
            CanvasAction::MoveSelection { delta } => {
                // Pixel drag -> grid delta under the current zoom.
                let zoom = self.camera.zoom();
                let grid = self
                    .config
                    .metrics
                    .delta_to_grid(PixelDelta::new(delta.dx / zoom, delta.dy / zoom));
                let ids: Vec<ObjectId> = self.selection.ids().cloned().collect();
                self.move_objects(&ids, grid, plan, sink, now);
            }
            CanvasAction::BoxSelect { min, max, additive } => {
                self.box_select(min, max, additive, plan);
            }
        }
    }

    fn box_select(&mut self, min: PixelPoint, max: PixelPoint, additive: bool, plan: &FloorPlan) {
        let a = self.camera.screen_to_grid(min);
        let b = self.camera.screen_to_grid(max);
        let box_bounds = GridBounds::new(
            a.x.min(b.x),
            a.y.min(b.y),
            a.x.max(b.x),
            a.y.max(b.y),
        );
        let hits: Vec<ObjectId> = plan
            .objects
            .iter()
            .filter(|o| o.bounds().intersects(&box_bounds))
            .map(|o| o.id.clone())
            .collect();
        self.selection.select(hits, additive);
    }

    // ------------------------------------------------------------------
    // View operations
    // ------------------------------------------------------------------

    /// Fits all tables into the viewport. No-op without tables.
    pub fn fit_to_view(&mut self, plan: &FloorPlan, now: Instant) {
        if plan.tables().next().is_none() {
            return;
        }
        self.camera.fit_to_view(plan, self.viewport);
        self.history
            .record(HistoryAction::ViewChanged, "Fit all tables to view", now);
    }

    /// Restores the default view.
    pub fn reset_view(&mut self, now: Instant) {
        self.camera.reset_view();
        self.history
            .record(HistoryAction::ViewChanged, "Reset view to default", now);
    }

    // ------------------------------------------------------------------
    // Undo / redo
    // ------------------------------------------------------------------

    /// Steps the view/selection context back one history entry. No-op
    /// at the boundary.
    pub fn undo(&mut self) {
        if let Some(snapshot) = self.history.undo().cloned() {
            self.restore_snapshot(snapshot);
        }
    }

    /// Steps the view/selection context forward one history entry.
    /// No-op at the boundary.
    pub fn redo(&mut self) {
        if let Some(snapshot) = self.history.redo().cloned() {
            self.restore_snapshot(snapshot);
        }
    }

    fn restore_snapshot(&mut self, snapshot: ViewSnapshot) {
        self.camera.restore(snapshot.transform);
        self.selection.restore(snapshot.selected);
    }

    fn view_snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            selected: self.selection.to_set(),
            transform: self.camera.transform(),
        }
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Moves objects by a grid delta.
    pub fn move_objects(
        &mut self,
        ids: &[ObjectId],
        delta: GridDelta,
        plan: &FloorPlan,
        sink: &mut dyn FloorPlanSink,
        now: Instant,
    ) {
        self.apply_mutation(
            FloorPlanCommand::MoveObjects {
                ids: ids.to_vec(),
                delta,
            },
            plan,
            sink,
            now,
        );
    }

    /// Deletes objects and clears the selection.
    pub fn delete_objects(
        &mut self,
        ids: &[ObjectId],
        plan: &FloorPlan,
        sink: &mut dyn FloorPlanSink,
        now: Instant,
    ) {
        self.apply_mutation(
            FloorPlanCommand::DeleteObjects { ids: ids.to_vec() },
            plan,
            sink,
            now,
        );
    }

    /// Duplicates objects and selects the clones.
    pub fn duplicate_objects(
        &mut self,
        ids: &[ObjectId],
        plan: &FloorPlan,
        sink: &mut dyn FloorPlanSink,
        now: Instant,
    ) {
        self.apply_mutation(
            FloorPlanCommand::DuplicateObjects { ids: ids.to_vec() },
            plan,
            sink,
            now,
        );
    }

    /// Adds a table at a grid position and selects it.
    pub fn add_table(
        &mut self,
        patch: TablePatch,
        position: GridPoint,
        plan: &FloorPlan,
        sink: &mut dyn FloorPlanSink,
        now: Instant,
    ) {
        self.apply_mutation(FloorPlanCommand::AddTable { patch, position }, plan, sink, now);
    }

    /// Merges a patch into a table object.
    pub fn update_table(
        &mut self,
        id: ObjectId,
        patch: TablePatch,
        plan: &FloorPlan,
        sink: &mut dyn FloorPlanSink,
        now: Instant,
    ) {
        self.apply_mutation(FloorPlanCommand::UpdateTable { id, patch }, plan, sink, now);
    }

    /// The three-step contract shared by every mutation: apply the pure
    /// command, commit the whole updated plan through the sink, record
    /// history. Read-only sessions skip all three.
    fn apply_mutation(
        &mut self,
        command: FloorPlanCommand,
        plan: &FloorPlan,
        sink: &mut dyn FloorPlanSink,
        now: Instant,
    ) {
        if self.read_only || self.disposed {
            return;
        }
        let ctx = CommandCtx {
            now: Utc::now(),
            actor: self.actor.clone(),
        };
        let Some(outcome) = apply_command(plan, &command, &ctx) else {
            return;
        };

        sink.commit(&outcome.plan);

        match outcome.selection {
            SelectionEffect::Unchanged => {}
            SelectionEffect::Clear => self.selection.deselect_all(),
            SelectionEffect::Replace(ids) => self.selection.select(ids, false),
        }
        self.history.record(outcome.action, outcome.description, now);
    }
}
