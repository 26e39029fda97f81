//! Gesture recognition: transforms raw pointer/touch/keyboard events
//! into semantic canvas actions.
//!
//! [`GestureRecognizer`] is a stateful processor consuming [`InputEvent`]s
//! and emitting [`CanvasAction`]s which the session applies to the
//! camera, the selection and the mutation engine. The recognizer itself
//! never touches engine state, which keeps the disambiguation logic
//! (pan vs. pinch vs. tap vs. box-select) testable in isolation.
//!
//! # State Machine
//!
//! ```text
//! Idle -> Panning            single pointer/touch down on empty canvas
//! Idle -> PinchZooming       two touches down
//! Idle -> DraggingSelection  pointer down on an object
//! Idle -> BoxSelecting       ctrl/cmd + pointer down
//! ```
//!
//! # Invariants
//!
//! 1. A pointer-down/up pair without movement is a tap: on empty canvas
//!    it clears the selection, it never pans.
//! 2. Lifting one of two pinch touches transitions to Panning anchored
//!    at the remaining touch, not to Idle, preserving continuity.
//! 3. Releasing all pointers/touches is the only gesture cancellation;
//!    there is no gesture timeout.
//! 4. After [`GestureRecognizer::reset`], the phase is `Idle`.
//!
//! The host must forward pointer-up/move events from the whole document,
//! not just the canvas element: otherwise a drag that leaves the canvas
//! bounds would strand the recognizer in `Panning`. On focus loss or
//! unmount, call [`GestureRecognizer::reset`].

use floorkit_core::constants;
use floorkit_core::{PixelDelta, PixelPoint};

use crate::model::ObjectId;

/// Modifier keys held during an input event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }

    /// True when no modifier is held.
    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

/// One active touch point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: u64,
    pub position: PixelPoint,
}

/// Keys the canvas reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Char(char),
}

/// A raw input event forwarded by the host. Pointer events carry the
/// hit-test result so the recognizer can tell object drags from canvas
/// pans without knowing the document.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    PointerDown {
        position: PixelPoint,
        hit: Option<ObjectId>,
        modifiers: Modifiers,
    },
    PointerMove {
        position: PixelPoint,
    },
    PointerUp {
        position: PixelPoint,
    },
    TouchStart {
        touches: Vec<TouchPoint>,
    },
    TouchMove {
        touches: Vec<TouchPoint>,
    },
    /// Fired when touches lift; carries the touches still down.
    TouchEnd {
        remaining: Vec<TouchPoint>,
    },
    Wheel {
        position: PixelPoint,
        delta_y: f64,
        modifiers: Modifiers,
    },
    KeyDown {
        key: Key,
        modifiers: Modifiers,
    },
}

/// A semantic action for the session to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasAction {
    /// Incremental pan by a pixel delta (current minus last pointer
    /// position, not an absolute jump).
    Pan { delta: PixelDelta },
    /// Zoom to an absolute factor, pivoting around a screen anchor
    /// (touch midpoint or wheel cursor). Clamping happens in the camera.
    ZoomAbout { zoom: f64, anchor: PixelPoint },
    /// Keyboard zoom by a signed number of zoom steps.
    StepZoom { direction: f64 },
    /// Restore default position and zoom.
    ResetView,
    /// Select one object, replacing or extending the selection.
    SelectObject { id: ObjectId, additive: bool },
    /// Select everything.
    SelectAll,
    /// Empty the selection.
    ClearSelection,
    /// Ask the host to delete the current selection.
    DeleteSelection,
    /// Drag the selected objects by a pixel delta.
    MoveSelection { delta: PixelDelta },
    /// Select objects intersecting a screen-space box.
    BoxSelect {
        min: PixelPoint,
        max: PixelPoint,
        additive: bool,
    },
}

/// Thresholds and factors for gesture recognition.
#[derive(Debug, Clone)]
pub struct GestureConfig {
    /// Multiplier converting wheel `delta_y` into a zoom delta.
    pub wheel_sensitivity: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            wheel_sensitivity: constants::WHEEL_ZOOM_SENSITIVITY,
        }
    }
}

/// The current gesture phase.
#[derive(Debug, Clone, PartialEq)]
pub enum GesturePhase {
    Idle,
    Panning {
        last: PixelPoint,
        /// Set on the first move; a down/up pair that never moved is a
        /// tap, which clears the selection instead of panning.
        moved: bool,
    },
    PinchZooming {
        initial_distance: f64,
        initial_zoom: f64,
    },
    DraggingSelection {
        last: PixelPoint,
    },
    BoxSelecting {
        origin: PixelPoint,
        corner: PixelPoint,
        additive: bool,
    },
}

/// Facts the recognizer needs from the session per event.
#[derive(Debug, Clone, Copy)]
pub struct GestureContext {
    /// Current camera zoom, captured as `initial_zoom` when a pinch
    /// starts.
    pub zoom: f64,
    /// Read-only sessions suppress keyboard shortcuts and object drags.
    pub read_only: bool,
}

/// Stateful recognizer turning raw events into semantic actions.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    config: GestureConfig,
    phase: GesturePhase,
}

impl GestureRecognizer {
    /// Creates a recognizer in the idle phase.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            phase: GesturePhase::Idle,
        }
    }

    /// The current phase (the host renders the selection box from it).
    pub fn phase(&self) -> &GesturePhase {
        &self.phase
    }

    /// Returns to idle, abandoning any in-flight gesture. The teardown
    /// path for focus loss and unmount.
    pub fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
    }

    /// Processes one event, returning the actions to apply in order.
    pub fn process(&mut self, event: &InputEvent, ctx: &GestureContext) -> Vec<CanvasAction> {
        match event {
            InputEvent::PointerDown {
                position,
                hit,
                modifiers,
            } => self.on_pointer_down(*position, hit.clone(), *modifiers, ctx),
            InputEvent::PointerMove { position } => self.on_pointer_move(*position),
            InputEvent::PointerUp { position } => self.on_pointer_up(*position),
            InputEvent::TouchStart { touches } => self.on_touch_start(touches, ctx),
            InputEvent::TouchMove { touches } => self.on_touch_move(touches),
            InputEvent::TouchEnd { remaining } => self.on_touch_end(remaining),
            InputEvent::Wheel {
                position,
                delta_y,
                modifiers: _,
            } => self.on_wheel(*position, *delta_y, ctx),
            InputEvent::KeyDown { key, modifiers } => self.on_key(*key, *modifiers, ctx),
        }
    }

    fn on_pointer_down(
        &mut self,
        position: PixelPoint,
        hit: Option<ObjectId>,
        modifiers: Modifiers,
        ctx: &GestureContext,
    ) -> Vec<CanvasAction> {
        // Ctrl/cmd+press draws a selection box instead of panning.
        if modifiers.command() {
            self.phase = GesturePhase::BoxSelecting {
                origin: position,
                corner: position,
                additive: modifiers.shift,
            };
            return Vec::new();
        }

        if let Some(id) = hit {
            let additive = modifiers.shift;
            if ctx.read_only {
                // Selection still works on read-only plans, dragging
                // does not.
                self.phase = GesturePhase::Idle;
            } else {
                self.phase = GesturePhase::DraggingSelection { last: position };
            }
            return vec![CanvasAction::SelectObject { id, additive }];
        }

        self.phase = GesturePhase::Panning {
            last: position,
            moved: false,
        };
        Vec::new()
    }

    fn on_pointer_move(&mut self, position: PixelPoint) -> Vec<CanvasAction> {
        match &mut self.phase {
            GesturePhase::Panning { last, moved } => {
                let delta = PixelDelta::between(*last, position);
                *last = position;
                *moved = true;
                vec![CanvasAction::Pan { delta }]
            }
            GesturePhase::DraggingSelection { last } => {
                let delta = PixelDelta::between(*last, position);
                *last = position;
                vec![CanvasAction::MoveSelection { delta }]
            }
            GesturePhase::BoxSelecting { corner, .. } => {
                *corner = position;
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn on_pointer_up(&mut self, _position: PixelPoint) -> Vec<CanvasAction> {
        let actions = match &self.phase {
            // A press that never moved is a tap on empty canvas.
            GesturePhase::Panning { moved: false, .. } => vec![CanvasAction::ClearSelection],
            GesturePhase::BoxSelecting {
                origin,
                corner,
                additive,
            } => vec![CanvasAction::BoxSelect {
                min: PixelPoint::new(origin.x.min(corner.x), origin.y.min(corner.y)),
                max: PixelPoint::new(origin.x.max(corner.x), origin.y.max(corner.y)),
                additive: *additive,
            }],
            _ => Vec::new(),
        };
        self.phase = GesturePhase::Idle;
        actions
    }

    fn on_touch_start(&mut self, touches: &[TouchPoint], ctx: &GestureContext) -> Vec<CanvasAction> {
        match touches {
            [a, b, ..] => {
                self.phase = GesturePhase::PinchZooming {
                    initial_distance: a.position.distance_to(b.position),
                    initial_zoom: ctx.zoom,
                };
            }
            [only] => {
                self.phase = GesturePhase::Panning {
                    last: only.position,
                    moved: false,
                };
            }
            [] => {}
        }
        Vec::new()
    }

    fn on_touch_move(&mut self, touches: &[TouchPoint]) -> Vec<CanvasAction> {
        match (&mut self.phase, touches) {
            (
                GesturePhase::PinchZooming {
                    initial_distance,
                    initial_zoom,
                },
                [a, b, ..],
            ) => {
                if *initial_distance <= f64::EPSILON {
                    return Vec::new();
                }
                let factor = a.position.distance_to(b.position) / *initial_distance;
                vec![CanvasAction::ZoomAbout {
                    zoom: *initial_zoom * factor,
                    anchor: a.position.midpoint(b.position),
                }]
            }
            (GesturePhase::Panning { last, moved }, [only]) => {
                let delta = PixelDelta::between(*last, only.position);
                *last = only.position;
                *moved = true;
                vec![CanvasAction::Pan { delta }]
            }
            _ => Vec::new(),
        }
    }

    fn on_touch_end(&mut self, remaining: &[TouchPoint]) -> Vec<CanvasAction> {
        match (&self.phase, remaining) {
            // One finger lifted mid-pinch: keep panning with the other,
            // anchored where it is now.
            (GesturePhase::PinchZooming { .. }, [only]) => {
                self.phase = GesturePhase::Panning {
                    last: only.position,
                    moved: true,
                };
                Vec::new()
            }
            (_, []) => {
                let actions = match &self.phase {
                    GesturePhase::Panning { moved: false, .. } => {
                        vec![CanvasAction::ClearSelection]
                    }
                    _ => Vec::new(),
                };
                self.phase = GesturePhase::Idle;
                actions
            }
            _ => Vec::new(),
        }
    }

    fn on_wheel(
        &mut self,
        position: PixelPoint,
        delta_y: f64,
        ctx: &GestureContext,
    ) -> Vec<CanvasAction> {
        // Wheel zoom applies from idle; mid-gesture scrolls are ignored
        // rather than aborting the gesture.
        if self.phase != GesturePhase::Idle {
            return Vec::new();
        }
        let zoom_delta = -delta_y * self.config.wheel_sensitivity;
        vec![CanvasAction::ZoomAbout {
            zoom: ctx.zoom + zoom_delta,
            anchor: position,
        }]
    }

    fn on_key(&mut self, key: Key, modifiers: Modifiers, ctx: &GestureContext) -> Vec<CanvasAction> {
        if ctx.read_only {
            return Vec::new();
        }
        match (key, modifiers) {
            (Key::Delete | Key::Backspace, m) if m.is_none() => {
                vec![CanvasAction::DeleteSelection]
            }
            (Key::Escape, m) if m.is_none() => vec![CanvasAction::ClearSelection],
            (Key::Char(c), m) if m.command() => match c {
                'a' | 'A' => vec![CanvasAction::SelectAll],
                '=' | '+' => vec![CanvasAction::StepZoom { direction: 1.0 }],
                '-' => vec![CanvasAction::StepZoom { direction: -1.0 }],
                '0' => vec![CanvasAction::ResetView],
                _ => Vec::new(),
            },
            _ => Vec::new(),
        }
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> GestureContext {
        GestureContext {
            zoom: 1.0,
            read_only: false,
        }
    }

    fn touch(id: u64, x: f64, y: f64) -> TouchPoint {
        TouchPoint {
            id,
            position: PixelPoint::new(x, y),
        }
    }

    #[test]
    fn pan_emits_incremental_deltas() {
        let mut rec = GestureRecognizer::default();
        rec.process(
            &InputEvent::PointerDown {
                position: PixelPoint::new(100.0, 100.0),
                hit: None,
                modifiers: Modifiers::NONE,
            },
            &ctx(),
        );
        let a = rec.process(
            &InputEvent::PointerMove {
                position: PixelPoint::new(150.0, 70.0),
            },
            &ctx(),
        );
        assert_eq!(
            a,
            vec![CanvasAction::Pan {
                delta: PixelDelta::new(50.0, -30.0)
            }]
        );
        // The anchor advances: the next move yields only the new delta.
        let b = rec.process(
            &InputEvent::PointerMove {
                position: PixelPoint::new(160.0, 70.0),
            },
            &ctx(),
        );
        assert_eq!(
            b,
            vec![CanvasAction::Pan {
                delta: PixelDelta::new(10.0, 0.0)
            }]
        );
        assert!(rec
            .process(
                &InputEvent::PointerUp {
                    position: PixelPoint::new(160.0, 70.0)
                },
                &ctx()
            )
            .is_empty());
        assert_eq!(*rec.phase(), GesturePhase::Idle);
    }

    #[test]
    fn tap_on_empty_canvas_clears_selection() {
        let mut rec = GestureRecognizer::default();
        rec.process(
            &InputEvent::PointerDown {
                position: PixelPoint::new(10.0, 10.0),
                hit: None,
                modifiers: Modifiers::NONE,
            },
            &ctx(),
        );
        let actions = rec.process(
            &InputEvent::PointerUp {
                position: PixelPoint::new(10.0, 10.0),
            },
            &ctx(),
        );
        assert_eq!(actions, vec![CanvasAction::ClearSelection]);
    }

    #[test]
    fn pointer_down_on_object_selects_and_drags() {
        let mut rec = GestureRecognizer::default();
        let actions = rec.process(
            &InputEvent::PointerDown {
                position: PixelPoint::new(10.0, 10.0),
                hit: Some(ObjectId::new("t1")),
                modifiers: Modifiers::NONE,
            },
            &ctx(),
        );
        assert_eq!(
            actions,
            vec![CanvasAction::SelectObject {
                id: ObjectId::new("t1"),
                additive: false
            }]
        );
        let moves = rec.process(
            &InputEvent::PointerMove {
                position: PixelPoint::new(15.0, 10.0),
            },
            &ctx(),
        );
        assert_eq!(
            moves,
            vec![CanvasAction::MoveSelection {
                delta: PixelDelta::new(5.0, 0.0)
            }]
        );
    }

    #[test]
    fn pinch_scales_zoom_by_distance_ratio() {
        let mut rec = GestureRecognizer::default();
        rec.process(
            &InputEvent::TouchStart {
                touches: vec![touch(1, 100.0, 200.0), touch(2, 200.0, 200.0)],
            },
            &GestureContext {
                zoom: 1.5,
                read_only: false,
            },
        );
        let actions = rec.process(
            &InputEvent::TouchMove {
                touches: vec![touch(1, 50.0, 200.0), touch(2, 250.0, 200.0)],
            },
            &ctx(),
        );
        // Distance went 100 -> 200, so requested zoom is 1.5 * 2.
        assert_eq!(
            actions,
            vec![CanvasAction::ZoomAbout {
                zoom: 3.0,
                anchor: PixelPoint::new(150.0, 200.0)
            }]
        );
    }

    #[test]
    fn lifting_one_pinch_touch_falls_back_to_panning() {
        let mut rec = GestureRecognizer::default();
        rec.process(
            &InputEvent::TouchStart {
                touches: vec![touch(1, 100.0, 200.0), touch(2, 200.0, 200.0)],
            },
            &ctx(),
        );
        rec.process(
            &InputEvent::TouchEnd {
                remaining: vec![touch(2, 200.0, 200.0)],
            },
            &ctx(),
        );
        assert!(matches!(rec.phase(), GesturePhase::Panning { .. }));
        // The remaining touch is the new pan anchor.
        let actions = rec.process(
            &InputEvent::TouchMove {
                touches: vec![touch(2, 210.0, 205.0)],
            },
            &ctx(),
        );
        assert_eq!(
            actions,
            vec![CanvasAction::Pan {
                delta: PixelDelta::new(10.0, 5.0)
            }]
        );
    }

    #[test]
    fn wheel_zooms_at_cursor_from_idle_only() {
        let mut rec = GestureRecognizer::default();
        let actions = rec.process(
            &InputEvent::Wheel {
                position: PixelPoint::new(400.0, 300.0),
                delta_y: -100.0,
                modifiers: Modifiers::NONE,
            },
            &ctx(),
        );
        assert_eq!(
            actions,
            vec![CanvasAction::ZoomAbout {
                zoom: 1.0 + 100.0 * constants::WHEEL_ZOOM_SENSITIVITY,
                anchor: PixelPoint::new(400.0, 300.0)
            }]
        );

        // Mid-pan, wheel input is ignored.
        rec.process(
            &InputEvent::PointerDown {
                position: PixelPoint::new(0.0, 0.0),
                hit: None,
                modifiers: Modifiers::NONE,
            },
            &ctx(),
        );
        assert!(rec
            .process(
                &InputEvent::Wheel {
                    position: PixelPoint::new(400.0, 300.0),
                    delta_y: -100.0,
                    modifiers: Modifiers::NONE,
                },
                &ctx()
            )
            .is_empty());
    }

    #[test]
    fn command_click_starts_box_selection() {
        let mut rec = GestureRecognizer::default();
        rec.process(
            &InputEvent::PointerDown {
                position: PixelPoint::new(10.0, 10.0),
                hit: None,
                modifiers: Modifiers {
                    ctrl: true,
                    ..Modifiers::NONE
                },
            },
            &ctx(),
        );
        rec.process(
            &InputEvent::PointerMove {
                position: PixelPoint::new(60.0, 40.0),
            },
            &ctx(),
        );
        let actions = rec.process(
            &InputEvent::PointerUp {
                position: PixelPoint::new(60.0, 40.0),
            },
            &ctx(),
        );
        assert_eq!(
            actions,
            vec![CanvasAction::BoxSelect {
                min: PixelPoint::new(10.0, 10.0),
                max: PixelPoint::new(60.0, 40.0),
                additive: false
            }]
        );
    }

    #[test]
    fn keyboard_shortcuts_map_to_actions() {
        let mut rec = GestureRecognizer::default();
        let command = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        let cases = [
            (Key::Delete, Modifiers::NONE, CanvasAction::DeleteSelection),
            (Key::Backspace, Modifiers::NONE, CanvasAction::DeleteSelection),
            (Key::Escape, Modifiers::NONE, CanvasAction::ClearSelection),
            (Key::Char('a'), command, CanvasAction::SelectAll),
            (Key::Char('='), command, CanvasAction::StepZoom { direction: 1.0 }),
            (Key::Char('+'), command, CanvasAction::StepZoom { direction: 1.0 }),
            (Key::Char('-'), command, CanvasAction::StepZoom { direction: -1.0 }),
            (Key::Char('0'), command, CanvasAction::ResetView),
        ];
        for (key, modifiers, expected) in cases {
            let actions = rec.process(&InputEvent::KeyDown { key, modifiers }, &ctx());
            assert_eq!(actions, vec![expected]);
        }
    }

    #[test]
    fn read_only_suppresses_keyboard_and_drag() {
        let ro = GestureContext {
            zoom: 1.0,
            read_only: true,
        };
        let mut rec = GestureRecognizer::default();
        assert!(rec
            .process(
                &InputEvent::KeyDown {
                    key: Key::Delete,
                    modifiers: Modifiers::NONE
                },
                &ro
            )
            .is_empty());

        let actions = rec.process(
            &InputEvent::PointerDown {
                position: PixelPoint::new(0.0, 0.0),
                hit: Some(ObjectId::new("t1")),
                modifiers: Modifiers::NONE,
            },
            &ro,
        );
        // Selecting still works; no drag phase is entered.
        assert_eq!(actions.len(), 1);
        assert_eq!(*rec.phase(), GesturePhase::Idle);
    }

    #[test]
    fn reset_returns_to_idle() {
        let mut rec = GestureRecognizer::default();
        rec.process(
            &InputEvent::PointerDown {
                position: PixelPoint::new(0.0, 0.0),
                hit: None,
                modifiers: Modifiers::NONE,
            },
            &ctx(),
        );
        rec.reset();
        assert_eq!(*rec.phase(), GesturePhase::Idle);
    }
}
