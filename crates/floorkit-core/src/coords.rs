//! Coordinate transformation between grid units and pixel space.
//!
//! Grid units are the canonical position/size unit for persisted
//! floor-plan objects. Pixel space is derived for rendering and input
//! handling.
//!
//! The transformation is a uniform scale plus a fixed offset:
//!
//! ```text
//! pixel_x = grid_x * cell_px + center_x
//! pixel_y = grid_y * cell_px + center_y
//! ```
//!
//! `pixel_to_grid` is the exact inverse, so the round trip
//! `pixel_to_grid(grid_to_pixel(g)) == g` holds for all finite `g`
//! (up to f64 rounding).

use serde::{Deserialize, Serialize};

use crate::constants;
use crate::geometry::{GridDelta, GridPoint, GridSize, PixelDelta, PixelPoint};

/// The fixed scale and offset mapping grid units to pixel space.
///
/// Host-tunable at construction time, never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridMetrics {
    /// Size of one grid cell in pixels.
    pub cell_px: f64,
    /// The virtual canvas center in pixel space.
    pub center: PixelPoint,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            cell_px: constants::GRID_CELL_PX,
            center: PixelPoint::new(constants::CANVAS_CENTER_X, constants::CANVAS_CENTER_Y),
        }
    }
}

impl GridMetrics {
    /// Creates metrics with an explicit cell size and canvas center.
    pub fn new(cell_px: f64, center: PixelPoint) -> Self {
        Self { cell_px, center }
    }

    /// Converts a grid position to pixel space.
    pub fn grid_to_pixel(&self, grid: GridPoint) -> PixelPoint {
        PixelPoint::new(
            grid.x * self.cell_px + self.center.x,
            grid.y * self.cell_px + self.center.y,
        )
    }

    /// Converts a pixel position to grid units. Exact inverse of
    /// [`GridMetrics::grid_to_pixel`].
    pub fn pixel_to_grid(&self, pixel: PixelPoint) -> GridPoint {
        GridPoint::new(
            (pixel.x - self.center.x) / self.cell_px,
            (pixel.y - self.center.y) / self.cell_px,
        )
    }

    /// Converts a grid extent to pixels (no center offset, pure scale).
    pub fn size_to_pixels(&self, size: GridSize) -> (f64, f64) {
        (size.width * self.cell_px, size.height * self.cell_px)
    }

    /// Converts a pixel translation to grid units.
    pub fn delta_to_grid(&self, delta: PixelDelta) -> GridDelta {
        GridDelta::new(delta.dx / self.cell_px, delta.dy / self.cell_px)
    }
}
