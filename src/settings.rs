//! Game settings
//!
//! Loaded from JSON on startup. Every field has a default, so a settings file
//! only needs the values it overrides.

use std::collections::HashSet;
use std::path::Path;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::PongError;
use crate::input::{Controller, Controllers, Key};

/// Number of players (and paddles) in a game
pub const PLAYER_COUNT: usize = 2;

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Surface ===
    /// Play area width in pixels
    pub width: u32,
    /// Play area height in pixels
    pub height: u32,

    // === Timing ===
    /// Seconds between simulation ticks
    pub tick_period: f64,

    // === Ball ===
    /// Side length of the (square) ball
    pub ball_size: f64,
    /// Speed after every reset (pixels per tick)
    pub ball_speed: f64,
    /// Direction after every reset (radians)
    pub ball_direction: f64,
    /// Speed gained on each paddle hit
    pub ball_acceleration: f64,

    // === Paddles ===
    /// Paddle step per tick while a direction is held
    pub paddle_speed: f64,
    /// Gap between each paddle and its side of the play area
    pub paddle_margin: f64,
    /// Move paddles back to their start position after a point
    pub recenter_paddles: bool,

    // === Controls ===
    /// Key bindings, left player first
    pub players: Vec<Controller>,
    /// Key that requests application exit
    pub quit_key: Key,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,

            tick_period: TICK_PERIOD,

            ball_size: BALL_SIZE,
            ball_speed: BALL_INITIAL_SPEED,
            ball_direction: BALL_INITIAL_DIRECTION,
            ball_acceleration: BALL_INITIAL_ACCELERATION,

            paddle_speed: PADDLE_SPEED,
            paddle_margin: PADDLE_MARGIN,
            recenter_paddles: false,

            players: vec![
                Controller::new(Key::char('w'), Key::char('s')),
                Controller::new(Key::Up, Key::Down),
            ],
            quit_key: Key::Escape,
        }
    }
}

impl Settings {
    /// Default settings on a surface of the given size
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, PongError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, PongError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, PongError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check every value is usable by the simulation
    pub fn validate(&self) -> Result<(), PongError> {
        let invalid = |msg: String| Err(PongError::InvalidSettings(msg));

        if self.width == 0 || self.height == 0 {
            return invalid(format!("surface {}x{} is empty", self.width, self.height));
        }
        if !(self.tick_period.is_finite() && self.tick_period > 0.0) {
            return invalid(format!("tick_period {} must be positive", self.tick_period));
        }
        if !(self.ball_size.is_finite() && self.ball_size > 0.0) {
            return invalid(format!("ball_size {} must be positive", self.ball_size));
        }
        for (name, value) in [
            ("ball_speed", self.ball_speed),
            ("ball_acceleration", self.ball_acceleration),
            ("paddle_speed", self.paddle_speed),
            ("paddle_margin", self.paddle_margin),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return invalid(format!("{name} {value} must be non-negative"));
            }
        }
        if !self.ball_direction.is_finite() {
            return invalid("ball_direction must be finite".to_string());
        }
        if self.players.len() != PLAYER_COUNT {
            return invalid(format!(
                "expected {PLAYER_COUNT} players, got {}",
                self.players.len()
            ));
        }

        // A key may drive exactly one action
        let mut bound = HashSet::new();
        let keys = self
            .players
            .iter()
            .flat_map(|c| [c.up_key, c.down_key])
            .chain(std::iter::once(self.quit_key));
        for key in keys {
            if !bound.insert(key) {
                return invalid(format!("key {key:?} is bound twice"));
            }
        }

        Ok(())
    }

    /// Size of the paddle bar, truncated to whole pixels
    pub fn paddle_size(&self) -> DVec2 {
        DVec2::new(
            (PADDLE_WIDTH_FRACTION * self.width as f64).trunc(),
            (PADDLE_HEIGHT_FRACTION * self.height as f64).trunc(),
        )
    }

    /// Size of a wall: full width, thin band
    pub fn wall_size(&self) -> DVec2 {
        DVec2::new(
            self.width as f64,
            (WALL_HEIGHT_FRACTION * self.height as f64).trunc(),
        )
    }

    pub fn ball_extent(&self) -> DVec2 {
        DVec2::splat(self.ball_size)
    }

    /// Fresh controller arena built from the key bindings
    pub fn controllers(&self) -> Controllers {
        Controllers::new(
            self.players
                .iter()
                .map(|c| Controller::new(c.up_key, c.down_key))
                .collect(),
        )
    }
}
