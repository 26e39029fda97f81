//! Floor-plan objects: the entities placed on the canvas grid.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use floorkit_core::{GridBounds, GridPoint, GridSize};

use super::table::TableAttrs;

/// Stable identifier of a floor-plan object.
///
/// Ids are opaque strings: imported documents keep whatever the backend
/// assigned, synthesized objects get `"table_<uuid>"` style ids, and
/// duplicated objects derive their id from the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub String);

impl ObjectId {
    /// Wraps an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// The kind of object placed on the floor plan.
///
/// A tagged union rather than a flag-probed record: every consumer must
/// match exhaustively, so a table-only operation cannot silently touch a
/// wall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ObjectKind {
    Table(TableAttrs),
    Chair,
    Decoration,
    Wall,
    Door,
}

impl ObjectKind {
    /// Human-readable label for the object kind.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Table(_) => "table",
            Self::Chair => "chair",
            Self::Decoration => "decoration",
            Self::Wall => "wall",
            Self::Door => "door",
        }
    }

    /// Whether this object is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Self::Table(_))
    }

    /// The table attributes, when this object is a table.
    pub fn as_table(&self) -> Option<&TableAttrs> {
        match self {
            Self::Table(attrs) => Some(attrs),
            _ => None,
        }
    }
}

/// Creation and modification metadata stamped by mutation operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    pub created: DateTime<Utc>,
    pub last_modified: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl ObjectMetadata {
    /// Metadata for an object created at `now`.
    pub fn created_at(now: DateTime<Utc>, created_by: Option<String>) -> Self {
        Self {
            created: now,
            last_modified: now,
            created_by,
        }
    }
}

/// An object on the floor plan: a table, chair, decoration, wall or door.
///
/// Position and size are grid units; the position is the object's center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorObject {
    pub id: ObjectId,
    #[serde(flatten)]
    pub kind: ObjectKind,
    pub position: GridPoint,
    pub size: GridSize,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub z_index: i32,
    pub metadata: ObjectMetadata,
}

impl FloorObject {
    /// The axis-aligned bounding box of this object in grid units,
    /// centered on its position.
    pub fn bounds(&self) -> GridBounds {
        let mut bounds = GridBounds::empty();
        bounds.include_rect(self.position, self.size);
        bounds
    }

    /// The table attributes, when this object is a table.
    pub fn table(&self) -> Option<&TableAttrs> {
        self.kind.as_table()
    }

    /// Mutable table attributes, when this object is a table.
    pub fn table_mut(&mut self) -> Option<&mut TableAttrs> {
        match &mut self.kind {
            ObjectKind::Table(attrs) => Some(attrs),
            _ => None,
        }
    }
}
