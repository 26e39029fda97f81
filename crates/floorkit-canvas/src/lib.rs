//! # Floorkit Canvas
//!
//! The interactive floor-plan canvas engine: the subsystem that lets an
//! operator pan/zoom/select/move/duplicate restaurant table objects on a
//! virtual grid, with a debounced undo/redo history and a gesture state
//! machine translating raw pointer/touch/keyboard input into transform
//! updates.
//!
//! The engine is functional over the floor-plan document: it never stores
//! a [`FloorPlan`], it receives one per call and hands updated copies to
//! the host through a [`FloorPlanSink`]. Session-only view state (camera,
//! selection, history, in-flight gestures) lives in [`CanvasSession`].

pub mod commands;
pub mod gesture;
pub mod history;
pub mod model;
pub mod selection;
pub mod session;
pub mod transform;

pub use commands::{apply_command, CommandCtx, CommandOutcome, FloorPlanCommand, SelectionEffect};
pub use gesture::{
    CanvasAction, GestureConfig, GestureContext, GesturePhase, GestureRecognizer, InputEvent, Key,
    Modifiers, TouchPoint,
};
pub use history::{History, HistoryAction, HistoryEntry, ViewSnapshot};
pub use model::{
    legacy_to_object, object_to_legacy, FloorObject, FloorPlan, LegacyTableRecord, ObjectId,
    ObjectKind, ObjectMetadata, PlanMetadata, TableAttrs, TableKind, TablePatch, TableShape,
    TableStatus,
};
pub use selection::SelectionManager;
pub use session::{CanvasConfig, CanvasSession, FloorPlanSink};
pub use transform::{Camera, CanvasTransform, TransformPatch, ViewportBounds, ZoomLimits};
