//! Tunable constants for the canvas engine.
//!
//! These are the host-tunable defaults: the engine reads its effective
//! values from a config struct built from this module, they are never
//! mutated at runtime.

/// Size of one grid cell in pixels. All persisted positions are grid
/// units; multiplying by this yields pixel space.
pub const GRID_CELL_PX: f64 = 20.0;

/// X coordinate of the virtual canvas center in pixel space.
pub const CANVAS_CENTER_X: f64 = 2000.0;

/// Y coordinate of the virtual canvas center in pixel space.
pub const CANVAS_CENTER_Y: f64 = 2000.0;

/// Minimum zoom factor. Requests below this are clamped, never rejected.
pub const MIN_ZOOM: f64 = 0.25;

/// Maximum zoom factor.
pub const MAX_ZOOM: f64 = 4.0;

/// Zoom applied to a freshly mounted canvas and by view reset.
pub const DEFAULT_ZOOM: f64 = 1.0;

/// Zoom increment for keyboard zoom shortcuts.
pub const ZOOM_STEP: f64 = 0.25;

/// Multiplier converting wheel `delta_y` into a zoom delta.
pub const WHEEL_ZOOM_SENSITIVITY: f64 = 0.001;

/// Fraction of the viewport used when fitting content (the remaining
/// 20% is margin).
pub const FIT_VIEW_PADDING: f64 = 0.8;

/// Maximum number of undo/redo entries retained; older entries are
/// trimmed from the front.
pub const MAX_HISTORY_ENTRIES: usize = 50;

/// Quiet period collapsing bursts of history-triggering calls into a
/// single entry.
pub const HISTORY_DEBOUNCE_MS: u64 = 500;

/// Grid offset applied to duplicated objects on both axes.
pub const DUPLICATE_OFFSET_GRID: f64 = 2.0;

/// Smallest allowed table edge in grid units.
pub const MIN_TABLE_SIZE_GRID: f64 = 1.0;

/// Largest allowed table edge in grid units.
pub const MAX_TABLE_SIZE_GRID: f64 = 20.0;

/// Default reservation turn time in minutes.
pub const DEFAULT_TURN_MINUTES: i64 = 120;
