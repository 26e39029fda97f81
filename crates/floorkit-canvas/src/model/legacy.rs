//! Conversion between legacy flat table records and canvas objects.
//!
//! The hosted backend stores tables as flat rows with pixel-unit
//! positions. The canvas works in grid units, so importing divides by
//! the grid cell size and exporting multiplies back.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use floorkit_core::{CoreError, GridMetrics, GridPoint, GridSize, Result};

use super::object::{FloorObject, ObjectId, ObjectKind, ObjectMetadata};
use super::table::{TableAttrs, TableKind, TableShape, TableStatus};

/// A flat table row as stored by the backend: pixel units, stringly
/// typed shape/type columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyTableRecord {
    pub id: String,
    pub table_number: u32,
    pub x_position: f64,
    pub y_position: f64,
    pub width: f64,
    pub height: f64,
    pub table_type: String,
    pub shape: String,
    pub min_capacity: u32,
    pub max_capacity: u32,
    #[serde(default)]
    pub is_combinable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

fn parse_table_kind(raw: &str) -> TableKind {
    match raw {
        "booth" => TableKind::Booth,
        "bar" => TableKind::Bar,
        "outdoor" => TableKind::Outdoor,
        _ => TableKind::Standard,
    }
}

fn parse_table_shape(raw: &str) -> TableShape {
    match raw {
        "round" => TableShape::Round,
        "square" => TableShape::Square,
        _ => TableShape::Rectangle,
    }
}

/// Converts a legacy record into a canvas object, mapping pixel columns
/// into grid units.
pub fn legacy_to_object(
    record: &LegacyTableRecord,
    metrics: &GridMetrics,
    now: DateTime<Utc>,
) -> Result<FloorObject> {
    if !record.x_position.is_finite() || !record.y_position.is_finite() {
        return Err(CoreError::InvalidLegacyRecord {
            table_id: record.id.clone(),
            reason: "non-finite position".to_string(),
        });
    }
    if record.width <= 0.0 || record.height <= 0.0 {
        return Err(CoreError::InvalidLegacyRecord {
            table_id: record.id.clone(),
            reason: format!("non-positive size {}x{}", record.width, record.height),
        });
    }
    if record.min_capacity > record.max_capacity {
        return Err(CoreError::InvalidLegacyRecord {
            table_id: record.id.clone(),
            reason: format!(
                "min_capacity {} exceeds max_capacity {}",
                record.min_capacity, record.max_capacity
            ),
        });
    }

    let created = record.created_at.unwrap_or(now);
    Ok(FloorObject {
        id: ObjectId::new(record.id.clone()),
        kind: ObjectKind::Table(TableAttrs {
            number: record.table_number,
            shape: parse_table_shape(&record.shape),
            sub_type: parse_table_kind(&record.table_type),
            min_seats: record.min_capacity,
            max_seats: record.max_capacity,
            default_seats: (record.min_capacity + record.max_capacity) / 2,
            status: TableStatus::Available,
            combinable: record.is_combinable,
            combines_with: Vec::new(),
        }),
        position: GridPoint::new(
            record.x_position / metrics.cell_px,
            record.y_position / metrics.cell_px,
        ),
        size: GridSize::new(
            record.width / metrics.cell_px,
            record.height / metrics.cell_px,
        ),
        rotation: 0.0,
        z_index: 0,
        metadata: ObjectMetadata {
            created,
            last_modified: record.updated_at.unwrap_or(created),
            created_by: None,
        },
    })
}

/// Converts a table object back into the legacy flat form. Returns
/// `None` for non-table objects, which have no legacy representation.
pub fn object_to_legacy(object: &FloorObject, metrics: &GridMetrics) -> Option<LegacyTableRecord> {
    let attrs = object.table()?;
    Some(LegacyTableRecord {
        id: object.id.as_str().to_string(),
        table_number: attrs.number,
        x_position: object.position.x * metrics.cell_px,
        y_position: object.position.y * metrics.cell_px,
        width: object.size.width * metrics.cell_px,
        height: object.size.height * metrics.cell_px,
        table_type: attrs.sub_type.label().to_string(),
        shape: match attrs.shape {
            TableShape::Rectangle => "rectangle",
            TableShape::Round => "round",
            TableShape::Square => "square",
        }
        .to_string(),
        min_capacity: attrs.min_seats,
        max_capacity: attrs.max_seats,
        is_combinable: attrs.combinable,
        created_at: Some(object.metadata.created),
        updated_at: Some(object.metadata.last_modified),
    })
}
