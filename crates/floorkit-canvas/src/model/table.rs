//! Table-specific attributes and the patch type used by table updates.

use serde::{Deserialize, Serialize};

/// Physical shape of a table, used for rendering and chair layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableShape {
    Rectangle,
    Round,
    Square,
}

impl Default for TableShape {
    fn default() -> Self {
        Self::Rectangle
    }
}

/// Service category of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    Standard,
    Booth,
    Bar,
    Outdoor,
}

impl TableKind {
    /// Lowercase label used in history descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Booth => "booth",
            Self::Bar => "bar",
            Self::Outdoor => "outdoor",
        }
    }
}

impl Default for TableKind {
    fn default() -> Self {
        Self::Standard
    }
}

impl std::fmt::Display for TableKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Operational status of a table on the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    Available,
    Occupied,
    Reserved,
    OutOfOrder,
}

impl Default for TableStatus {
    fn default() -> Self {
        Self::Available
    }
}

/// Seating and service attributes carried by table objects.
///
/// Invariant: `min_seats <= max_seats`, maintained by the mutation
/// engine when merging patches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableAttrs {
    pub number: u32,
    #[serde(default)]
    pub shape: TableShape,
    #[serde(default)]
    pub sub_type: TableKind,
    pub min_seats: u32,
    pub max_seats: u32,
    pub default_seats: u32,
    #[serde(default)]
    pub status: TableStatus,
    #[serde(default)]
    pub combinable: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub combines_with: Vec<super::ObjectId>,
}

impl TableAttrs {
    /// The booking capacity of the table.
    pub fn capacity(&self) -> u32 {
        self.max_seats
    }
}

impl Default for TableAttrs {
    fn default() -> Self {
        Self {
            number: 0,
            shape: TableShape::default(),
            sub_type: TableKind::default(),
            min_seats: 2,
            max_seats: 8,
            default_seats: 4,
            status: TableStatus::default(),
            combinable: false,
            combines_with: Vec::new(),
        }
    }
}

/// Partial table update merged by `UpdateTable` / `AddTable`.
///
/// Every field is optional; absent fields leave the current value
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TablePatch {
    pub number: Option<u32>,
    pub shape: Option<TableShape>,
    pub sub_type: Option<TableKind>,
    pub min_seats: Option<u32>,
    pub max_seats: Option<u32>,
    pub default_seats: Option<u32>,
    pub status: Option<TableStatus>,
    pub combinable: Option<bool>,
    pub size: Option<floorkit_core::GridSize>,
    pub rotation: Option<f64>,
    pub z_index: Option<i32>,
}

impl TablePatch {
    /// Merges this patch into table attributes, re-establishing the
    /// `min_seats <= max_seats` invariant afterwards.
    pub fn merge_into(&self, attrs: &mut TableAttrs) {
        if let Some(number) = self.number {
            attrs.number = number;
        }
        if let Some(shape) = self.shape {
            attrs.shape = shape;
        }
        if let Some(sub_type) = self.sub_type {
            attrs.sub_type = sub_type;
        }
        if let Some(min_seats) = self.min_seats {
            attrs.min_seats = min_seats;
        }
        if let Some(max_seats) = self.max_seats {
            attrs.max_seats = max_seats;
        }
        if let Some(default_seats) = self.default_seats {
            attrs.default_seats = default_seats;
        }
        if let Some(status) = self.status {
            attrs.status = status;
        }
        if let Some(combinable) = self.combinable {
            attrs.combinable = combinable;
        }
        if attrs.min_seats > attrs.max_seats {
            attrs.max_seats = attrs.min_seats;
        }
    }
}
