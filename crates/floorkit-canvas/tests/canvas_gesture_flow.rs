//! End-to-end gesture flows: raw events in, camera/selection/document
//! effects out.

use std::time::Instant;

use floorkit_canvas::{InputEvent, Key, Modifiers, ObjectId, TouchPoint};
use floorkit_core::PixelPoint;

mod common;
use common::{editable_session, plan_with_tables, RecordingSink};

fn pointer_down(x: f64, y: f64, hit: Option<&str>) -> InputEvent {
    InputEvent::PointerDown {
        position: PixelPoint::new(x, y),
        hit: hit.map(ObjectId::new),
        modifiers: Modifiers::NONE,
    }
}

fn pointer_move(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerMove {
        position: PixelPoint::new(x, y),
    }
}

fn pointer_up(x: f64, y: f64) -> InputEvent {
    InputEvent::PointerUp {
        position: PixelPoint::new(x, y),
    }
}

fn touch(id: u64, x: f64, y: f64) -> TouchPoint {
    TouchPoint {
        id,
        position: PixelPoint::new(x, y),
    }
}

fn key(key: Key, modifiers: Modifiers) -> InputEvent {
    InputEvent::KeyDown { key, modifiers }
}

const COMMAND: Modifiers = Modifiers {
    ctrl: true,
    shift: false,
    alt: false,
    meta: false,
};

#[test]
fn drag_on_empty_canvas_pans_the_camera() {
    let mut session = editable_session();
    let mut sink = RecordingSink::default();
    let plan = plan_with_tables(&[("t1", 1, 0.0, 0.0)]);
    let now = Instant::now();

    session.handle_event(&pointer_down(100.0, 100.0, None), &plan, &mut sink, now);
    session.handle_event(&pointer_move(150.0, 70.0), &plan, &mut sink, now);
    session.handle_event(&pointer_up(150.0, 70.0), &plan, &mut sink, now);

    assert!((session.transform().position.x - 50.0).abs() < 1e-9);
    assert!((session.transform().position.y - -30.0).abs() < 1e-9);
    // Pure view change: nothing was committed.
    assert!(sink.commits.is_empty());
}

#[test]
fn pinch_zoom_is_clamped_and_survives_finger_lift() {
    let mut session = editable_session();
    let mut sink = RecordingSink::default();
    let plan = plan_with_tables(&[("t1", 1, 0.0, 0.0)]);
    let now = Instant::now();

    session.handle_event(
        &InputEvent::TouchStart {
            touches: vec![touch(1, 600.0, 400.0), touch(2, 700.0, 400.0)],
        },
        &plan,
        &mut sink,
        now,
    );
    // Fingers spread to 40x the initial distance: clamped to max zoom.
    session.handle_event(
        &InputEvent::TouchMove {
            touches: vec![touch(1, 0.0, 400.0), touch(2, 4000.0, 400.0)],
        },
        &plan,
        &mut sink,
        now,
    );
    let limits = session.camera().limits();
    assert_eq!(session.transform().zoom, limits.max);

    // Lift one finger: the remaining one keeps panning smoothly.
    session.handle_event(
        &InputEvent::TouchEnd {
            remaining: vec![touch(2, 4000.0, 400.0)],
        },
        &plan,
        &mut sink,
        now,
    );
    let position_before = session.transform().position;
    session.handle_event(
        &InputEvent::TouchMove {
            touches: vec![touch(2, 4010.0, 420.0)],
        },
        &plan,
        &mut sink,
        now,
    );
    let position_after = session.transform().position;
    assert!((position_after.x - position_before.x - 10.0).abs() < 1e-9);
    assert!((position_after.y - position_before.y - 20.0).abs() < 1e-9);
    assert_eq!(session.transform().zoom, limits.max);
}

#[test]
fn tap_clears_selection_and_escape_does_too() {
    let mut session = editable_session();
    let mut sink = RecordingSink::default();
    let plan = plan_with_tables(&[("t1", 1, 0.0, 0.0)]);
    let now = Instant::now();

    session.handle_event(&pointer_down(10.0, 10.0, Some("t1")), &plan, &mut sink, now);
    session.handle_event(&pointer_up(10.0, 10.0), &plan, &mut sink, now);
    assert!(session.selection().contains(&ObjectId::new("t1")));

    // Tap on empty canvas.
    session.handle_event(&pointer_down(500.0, 500.0, None), &plan, &mut sink, now);
    session.handle_event(&pointer_up(500.0, 500.0), &plan, &mut sink, now);
    assert!(session.selection().is_empty());

    // Select again, clear with Escape.
    session.handle_event(&pointer_down(10.0, 10.0, Some("t1")), &plan, &mut sink, now);
    session.handle_event(&pointer_up(10.0, 10.0), &plan, &mut sink, now);
    session.handle_event(&key(Key::Escape, Modifiers::NONE), &plan, &mut sink, now);
    assert!(session.selection().is_empty());
}

#[test]
fn shift_click_extends_the_selection() {
    let mut session = editable_session();
    let mut sink = RecordingSink::default();
    let plan = plan_with_tables(&[("t1", 1, 0.0, 0.0), ("t2", 2, 10.0, 0.0)]);
    let now = Instant::now();

    session.handle_event(&pointer_down(10.0, 10.0, Some("t1")), &plan, &mut sink, now);
    session.handle_event(&pointer_up(10.0, 10.0), &plan, &mut sink, now);
    session.handle_event(
        &InputEvent::PointerDown {
            position: PixelPoint::new(40.0, 10.0),
            hit: Some(ObjectId::new("t2")),
            modifiers: Modifiers {
                shift: true,
                ..Modifiers::NONE
            },
        },
        &plan,
        &mut sink,
        now,
    );
    session.handle_event(&pointer_up(40.0, 10.0), &plan, &mut sink, now);

    assert_eq!(session.selection().len(), 2);
}

#[test]
fn select_all_then_delete_removes_everything() {
    let mut session = editable_session();
    let mut sink = RecordingSink::default();
    let plan = plan_with_tables(&[("t1", 1, 0.0, 0.0), ("t2", 2, 10.0, 0.0)]);
    let now = Instant::now();

    session.handle_event(&key(Key::Char('a'), COMMAND), &plan, &mut sink, now);
    assert_eq!(session.selection().len(), 2);

    session.handle_event(&key(Key::Delete, Modifiers::NONE), &plan, &mut sink, now);
    assert_eq!(sink.commits.len(), 1);
    assert!(sink.last().objects.is_empty());
    assert!(session.selection().is_empty());
}

#[test]
fn dragging_an_object_moves_it_in_grid_units() {
    let mut session = editable_session();
    let mut sink = RecordingSink::default();
    let plan = plan_with_tables(&[("t1", 1, 5.0, 5.0)]);
    let now = Instant::now();

    session.handle_event(&pointer_down(100.0, 100.0, Some("t1")), &plan, &mut sink, now);
    // 40px right at zoom 1.0 with 20px cells = 2 grid units.
    session.handle_event(&pointer_move(140.0, 100.0), &plan, &mut sink, now);

    let committed = sink.last();
    let position = committed.object(&ObjectId::new("t1")).unwrap().position;
    assert!((position.x - 7.0).abs() < 1e-9);
    assert!((position.y - 5.0).abs() < 1e-9);
}

#[test]
fn keyboard_zoom_steps_and_reset() {
    let mut session = editable_session();
    let mut sink = RecordingSink::default();
    let plan = plan_with_tables(&[("t1", 1, 0.0, 0.0)]);
    let now = Instant::now();
    let limits = session.camera().limits();

    session.handle_event(&key(Key::Char('+'), COMMAND), &plan, &mut sink, now);
    assert!((session.transform().zoom - (limits.default + limits.step)).abs() < 1e-9);

    session.handle_event(&key(Key::Char('-'), COMMAND), &plan, &mut sink, now);
    session.handle_event(&key(Key::Char('-'), COMMAND), &plan, &mut sink, now);
    assert!((session.transform().zoom - (limits.default - limits.step)).abs() < 1e-9);

    session.handle_event(&key(Key::Char('0'), COMMAND), &plan, &mut sink, now);
    assert_eq!(session.transform().zoom, limits.default);
    assert_eq!(session.transform().position, PixelPoint::new(0.0, 0.0));
}

#[test]
fn ctrl_drag_box_selects_objects_under_the_box() {
    let mut session = editable_session();
    let mut sink = RecordingSink::default();
    // Tables at grid (0,0) and (50,50); only the first sits under the box.
    let plan = plan_with_tables(&[("near", 1, 0.0, 0.0), ("far", 2, 50.0, 50.0)]);
    let now = Instant::now();

    // Grid (0,0) is pixel (2000,2000) at zoom 1 with position (0,0).
    session.handle_event(
        &InputEvent::PointerDown {
            position: PixelPoint::new(1950.0, 1950.0),
            hit: None,
            modifiers: COMMAND,
        },
        &plan,
        &mut sink,
        now,
    );
    session.handle_event(&pointer_move(2050.0, 2050.0), &plan, &mut sink, now);
    session.handle_event(&pointer_up(2050.0, 2050.0), &plan, &mut sink, now);

    assert!(session.selection().contains(&ObjectId::new("near")));
    assert!(!session.selection().contains(&ObjectId::new("far")));
}
