//! Viewport camera for the floor-plan canvas.
//!
//! Handles the transform (pan position, zoom factor, optional rotation)
//! through which the floor plan is viewed, and the derived visible
//! bounds used for culling. All zoom writes route through one place so
//! clamping is enforced consistently: out-of-range requests are silently
//! clamped, never rejected.
//!
//! Screen mapping:
//!
//! ```text
//! screen = content_pixel * zoom + position
//! ```
//!
//! where `content_pixel` is the fixed grid-to-pixel mapping from
//! [`GridMetrics`].

use serde::{Deserialize, Serialize};

use floorkit_core::constants;
use floorkit_core::{GridBounds, GridMetrics, GridPoint, PixelDelta, PixelPoint, PixelSize};

use crate::model::FloorPlan;

/// Inclusive zoom range enforced on every write.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomLimits {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: constants::MIN_ZOOM,
            max: constants::MAX_ZOOM,
            default: constants::DEFAULT_ZOOM,
            step: constants::ZOOM_STEP,
        }
    }
}

impl ZoomLimits {
    /// Clamps a requested zoom into the legal range.
    pub fn clamp(&self, requested: f64) -> f64 {
        requested.clamp(self.min, self.max)
    }
}

/// The camera state: pan position, zoom factor, rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasTransform {
    pub position: PixelPoint,
    pub zoom: f64,
    pub rotation: f64,
}

/// Partial transform update; absent fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformPatch {
    pub position: Option<PixelPoint>,
    pub zoom: Option<f64>,
    pub rotation: Option<f64>,
}

/// The axis-aligned box of canvas space visible through the viewport,
/// recomputed whenever the transform changes. Culling input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportBounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

/// The viewport camera. Owns the transform and the math that derives
/// new transforms from fit/zoom/pan requests.
#[derive(Debug, Clone)]
pub struct Camera {
    transform: CanvasTransform,
    limits: ZoomLimits,
    metrics: GridMetrics,
}

impl Camera {
    /// Creates a camera at the default transform.
    pub fn new(limits: ZoomLimits, metrics: GridMetrics) -> Self {
        Self {
            transform: CanvasTransform {
                position: PixelPoint::new(0.0, 0.0),
                zoom: limits.default,
                rotation: 0.0,
            },
            limits,
            metrics,
        }
    }

    /// The current transform.
    pub fn transform(&self) -> CanvasTransform {
        self.transform
    }

    /// The zoom limits in force.
    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// The grid metrics in force.
    pub fn metrics(&self) -> &GridMetrics {
        &self.metrics
    }

    /// Current zoom factor.
    pub fn zoom(&self) -> f64 {
        self.transform.zoom
    }

    /// Current pan position.
    pub fn position(&self) -> PixelPoint {
        self.transform.position
    }

    /// Shallow-merges a patch into the transform. The single write path:
    /// zoom is clamped here and nowhere else.
    pub fn apply(&mut self, patch: TransformPatch) {
        if let Some(position) = patch.position {
            self.transform.position = position;
        }
        if let Some(zoom) = patch.zoom {
            self.transform.zoom = self.limits.clamp(zoom);
        }
        if let Some(rotation) = patch.rotation {
            self.transform.rotation = rotation;
        }
    }

    /// Restores a previously captured transform (undo/redo path).
    /// Zoom still passes through the clamp.
    pub fn restore(&mut self, transform: CanvasTransform) {
        self.apply(TransformPatch {
            position: Some(transform.position),
            zoom: Some(transform.zoom),
            rotation: Some(transform.rotation),
        });
    }

    /// Pans by a pixel delta, zoom unchanged.
    pub fn pan_by(&mut self, delta: PixelDelta) {
        let p = self.transform.position;
        self.apply(TransformPatch {
            position: Some(PixelPoint::new(p.x + delta.dx, p.y + delta.dy)),
            ..TransformPatch::default()
        });
    }

    /// Sets the zoom, pivoting relative to `anchor` (a screen-space
    /// point) instead of the canvas origin: the anchor's offset from
    /// the canvas center, scaled by the zoom change, is subtracted from
    /// the pan position. Used by wheel zoom (anchor = cursor) and pinch
    /// zoom (anchor = touch midpoint).
    pub fn zoom_about(&mut self, requested: f64, anchor: PixelPoint) {
        let old_zoom = self.transform.zoom;
        let new_zoom = self.limits.clamp(requested);
        if new_zoom == old_zoom {
            return;
        }
        let factor = new_zoom / old_zoom;
        // Offset of the anchor from the canvas center, scaled by the
        // zoom change, subtracted from the position.
        let offset_x = (anchor.x - self.metrics.center.x) * (factor - 1.0);
        let offset_y = (anchor.y - self.metrics.center.y) * (factor - 1.0);
        let p = self.transform.position;
        self.apply(TransformPatch {
            position: Some(PixelPoint::new(p.x - offset_x, p.y - offset_y)),
            zoom: Some(new_zoom),
            ..TransformPatch::default()
        });
    }

    /// Steps the zoom by a signed multiple of the configured step
    /// (keyboard zoom, no anchor).
    pub fn step_zoom(&mut self, direction: f64) {
        let requested = self.transform.zoom + direction * self.limits.step;
        self.apply(TransformPatch {
            zoom: Some(requested),
            ..TransformPatch::default()
        });
    }

    /// Restores the default view: position (0,0), default zoom, no
    /// rotation.
    pub fn reset_view(&mut self) {
        self.apply(TransformPatch {
            position: Some(PixelPoint::new(0.0, 0.0)),
            zoom: Some(self.limits.default),
            rotation: Some(0.0),
        });
    }

    /// Fits all table objects into the viewport with a 20% margin and
    /// centers them. No-op when the plan has no tables.
    pub fn fit_to_view(&mut self, plan: &FloorPlan, viewport: PixelSize) {
        let mut bounds = GridBounds::empty();
        for table in plan.tables() {
            bounds.include_rect(table.position, table.size);
        }
        if bounds.is_empty() {
            return;
        }

        let content_width = bounds.width() * self.metrics.cell_px;
        let content_height = bounds.height() * self.metrics.cell_px;

        let zoom_x = if content_width > 0.0 {
            viewport.width * constants::FIT_VIEW_PADDING / content_width
        } else {
            self.limits.max
        };
        let zoom_y = if content_height > 0.0 {
            viewport.height * constants::FIT_VIEW_PADDING / content_height
        } else {
            self.limits.max
        };
        let zoom = self
            .limits
            .min
            .max(zoom_x.min(zoom_y).min(self.limits.max));

        // Center the content midpoint at the canvas center.
        let midpoint = self.metrics.grid_to_pixel(bounds.center());
        let position = PixelPoint::new(
            self.metrics.center.x - midpoint.x * zoom,
            self.metrics.center.y - midpoint.y * zoom,
        );

        self.apply(TransformPatch {
            position: Some(position),
            zoom: Some(zoom),
            ..TransformPatch::default()
        });
    }

    /// Converts a screen-space point to grid units under the current
    /// transform.
    pub fn screen_to_grid(&self, screen: PixelPoint) -> GridPoint {
        let content = PixelPoint::new(
            (screen.x - self.transform.position.x) / self.transform.zoom,
            (screen.y - self.transform.position.y) / self.transform.zoom,
        );
        self.metrics.pixel_to_grid(content)
    }

    /// Converts a grid position to screen space under the current
    /// transform.
    pub fn grid_to_screen(&self, grid: GridPoint) -> PixelPoint {
        let content = self.metrics.grid_to_pixel(grid);
        PixelPoint::new(
            content.x * self.transform.zoom + self.transform.position.x,
            content.y * self.transform.zoom + self.transform.position.y,
        )
    }

    /// The canvas-space box covering the visible element, centered at
    /// `-position / zoom` and scaled by the inverse zoom.
    pub fn viewport_bounds(&self, element: PixelSize) -> ViewportBounds {
        let zoom = self.transform.zoom;
        let scaled_width = element.width / zoom;
        let scaled_height = element.height / zoom;
        let center_x = -self.transform.position.x / zoom;
        let center_y = -self.transform.position.y / zoom;
        ViewportBounds {
            min_x: center_x - scaled_width / 2.0,
            min_y: center_y - scaled_height / 2.0,
            max_x: center_x + scaled_width / 2.0,
            max_y: center_y + scaled_height / 2.0,
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(ZoomLimits::default(), GridMetrics::default())
    }
}
