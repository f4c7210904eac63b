//! Pong - a minimal two-player paddle game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, game objects, collision pass)
//! - `screen`: Title and game screens, scoring and reset lifecycle
//! - `app`: Top-level application state machine and fixed-step driver
//! - `input`: Controllers, key bindings and pressed-key tracking
//! - `renderer`: Retained draw batch handed to the host renderer
//! - `settings`: Data-driven configuration

pub mod app;
pub mod error;
pub mod input;
pub mod renderer;
pub mod screen;
pub mod settings;
pub mod sim;

pub use app::Pong;
pub use error::PongError;
pub use settings::Settings;

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation tick period in seconds (100 Hz)
    pub const TICK_PERIOD: f64 = 0.01;
    /// Maximum ticks run per `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Frame deltas longer than this are clamped before accumulating
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Window dimensions
    pub const WINDOW_WIDTH: u32 = 1024;
    pub const WINDOW_HEIGHT: u32 = 768;

    /// Ball defaults
    pub const BALL_SIZE: f64 = 16.0;
    pub const BALL_INITIAL_SPEED: f64 = 5.0;
    pub const BALL_INITIAL_DIRECTION: f64 = std::f64::consts::PI / 4.0;
    /// Added to ball speed on every paddle hit
    pub const BALL_INITIAL_ACCELERATION: f64 = 1.0;

    /// Paddle defaults
    pub const PADDLE_SPEED: f64 = 10.0;
    /// Gap between a paddle and its side of the window
    pub const PADDLE_MARGIN: f64 = 20.0;
    /// Paddle bar size as a fraction of the window (width, height)
    pub const PADDLE_WIDTH_FRACTION: f64 = 0.025;
    pub const PADDLE_HEIGHT_FRACTION: f64 = 0.15;

    /// Wall thickness as a fraction of the window height
    pub const WALL_HEIGHT_FRACTION: f64 = 0.025;
}

/// Unit vector pointing along `angle` (radians)
#[inline]
pub fn heading(angle: f64) -> DVec2 {
    DVec2::new(angle.cos(), angle.sin())
}

/// Mirror an angle across the vertical axis (left/right bounce)
#[inline]
pub fn mirror_vertical(angle: f64) -> f64 {
    -angle + std::f64::consts::PI
}

/// Mirror an angle across the horizontal axis (top/bottom bounce)
#[inline]
pub fn mirror_horizontal(angle: f64) -> f64 {
    -angle
}
