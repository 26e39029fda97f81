//! The floor-plan aggregate: the document the engine transforms but
//! never owns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::object::{FloorObject, ObjectId};

/// Document-level metadata, bumped on every committed mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanMetadata {
    pub version: u32,
    pub last_modified: DateTime<Utc>,
}

/// A restaurant floor plan: an unordered set of objects plus metadata.
///
/// Owned by the hosting application. The canvas engine receives a plan,
/// derives an updated copy and hands it back through the sink; it keeps
/// no reference between calls, so concurrent remote edits resolve by the
/// host simply replacing the document (last-write-wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorPlan {
    pub id: String,
    pub restaurant_id: String,
    pub objects: Vec<FloorObject>,
    pub metadata: PlanMetadata,
}

impl FloorPlan {
    /// Creates an empty plan for a restaurant.
    pub fn new(id: impl Into<String>, restaurant_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            restaurant_id: restaurant_id.into(),
            objects: Vec::new(),
            metadata: PlanMetadata {
                version: 1,
                last_modified: now,
            },
        }
    }

    /// Looks up an object by id.
    pub fn object(&self, id: &ObjectId) -> Option<&FloorObject> {
        self.objects.iter().find(|o| &o.id == id)
    }

    /// Iterates over the table objects only.
    pub fn tables(&self) -> impl Iterator<Item = &FloorObject> {
        self.objects.iter().filter(|o| o.kind.is_table())
    }

    /// Next free table number: one past the highest in use.
    pub fn next_table_number(&self) -> u32 {
        self.objects
            .iter()
            .filter_map(|o| o.table().map(|t| t.number))
            .max()
            .map_or(1, |n| n + 1)
    }

    /// Stamps the document metadata after a mutation.
    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.metadata.version += 1;
        self.metadata.last_modified = now;
    }
}
