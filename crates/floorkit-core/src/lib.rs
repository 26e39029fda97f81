//! # Floorkit Core
//!
//! Core types and utilities for Floorkit.
//! Provides the grid/pixel coordinate system, geometry primitives,
//! tunable constants, and shared error types used by the canvas engine
//! and the booking crates.

pub mod constants;
pub mod coords;
pub mod error;
pub mod geometry;

pub use coords::GridMetrics;
pub use error::{CoreError, Result};
pub use geometry::{GridBounds, GridDelta, GridPoint, GridSize, PixelDelta, PixelPoint, PixelSize};
