//! Shared fixtures for the canvas integration tests.
#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use floorkit_canvas::{
    CanvasConfig, CanvasSession, FloorObject, FloorPlan, FloorPlanSink, ObjectId, ObjectKind,
    ObjectMetadata, TableAttrs,
};
use floorkit_core::{GridPoint, GridSize, PixelSize};

pub fn created_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

pub fn table(id: &str, number: u32, x: f64, y: f64) -> FloorObject {
    FloorObject {
        id: ObjectId::new(id),
        kind: ObjectKind::Table(TableAttrs {
            number,
            ..TableAttrs::default()
        }),
        position: GridPoint::new(x, y),
        size: GridSize::new(3.0, 3.0),
        rotation: 0.0,
        z_index: 0,
        metadata: ObjectMetadata::created_at(created_at(), None),
    }
}

pub fn plan_with_tables(tables: &[(&str, u32, f64, f64)]) -> FloorPlan {
    let mut plan = FloorPlan::new("fp-1", "rest-1", created_at());
    for (id, number, x, y) in tables {
        plan.objects.push(table(id, *number, *x, *y));
    }
    plan
}

pub fn editable_session() -> CanvasSession {
    CanvasSession::new(
        CanvasConfig::default(),
        PixelSize::new(1280.0, 720.0),
        false,
    )
}

/// Sink that keeps every committed plan for inspection.
#[derive(Default)]
pub struct RecordingSink {
    pub commits: Vec<FloorPlan>,
}

impl RecordingSink {
    pub fn last(&self) -> &FloorPlan {
        self.commits.last().expect("no plan was committed")
    }
}

impl FloorPlanSink for RecordingSink {
    fn commit(&mut self, plan: &FloorPlan) {
        self.commits.push(plan.clone());
    }
}
