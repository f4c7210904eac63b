//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed ticks only
//! - Stable iteration order (object list order)
//! - No rendering or platform dependencies

pub mod geometry;
pub mod objects;
pub mod tick;

pub use geometry::{Rect, collision};
pub use objects::{Ball, Body, Contact, GameObject, Launch, ObjectKind, Paddle, Wall};
pub use tick::{clear_collisions, collect_collisions, step, step_with};
