//! Game objects: ball, paddles and walls
//!
//! Every object owns its bounds and a transient list of contacts. The
//! collision pass fills the list at the start of a tick, `update` reacts to
//! it, and the pass clears it again before the tick ends.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::input::{Controller, ControllerId, Controllers};
use crate::settings::Settings;
use crate::{heading, mirror_horizontal, mirror_vertical};

/// Discriminant of a game object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectKind {
    Ball,
    Paddle,
    Wall,
}

/// Snapshot of another object this one touched during the current tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub kind: ObjectKind,
    /// Bounds of the other object at the start of the tick
    pub bounds: Rect,
}

/// Ball motion values restored on every reset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    pub speed: f64,
    pub direction: f64,
    pub acceleration: f64,
}

impl Launch {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            speed: settings.ball_speed,
            direction: settings.ball_direction,
            acceleration: settings.ball_acceleration,
        }
    }
}

impl Default for Launch {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// The game ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    /// Distance travelled per tick
    pub speed: f64,
    /// Heading in radians (0 = right, counter-clockwise)
    pub direction: f64,
    /// Added to `speed` on each paddle hit
    pub acceleration: f64,
    /// Position recorded at construction, restored on reset
    pub start: DVec2,
    launch: Launch,
}

impl Ball {
    pub fn new(start: DVec2, launch: Launch) -> Self {
        Self {
            speed: launch.speed,
            direction: launch.direction,
            acceleration: launch.acceleration,
            start,
            launch,
        }
    }

    /// Bounce off paddles and walls, then advance one step
    pub fn update(&mut self, bounds: &mut Rect, contacts: &[Contact]) {
        if contacts.iter().any(|c| c.kind == ObjectKind::Paddle) {
            self.direction = mirror_vertical(self.direction);
            self.speed += self.acceleration;
        }

        if contacts.iter().any(|c| c.kind == ObjectKind::Wall) {
            self.direction = mirror_horizontal(self.direction);
        }

        bounds.pos += self.speed * heading(self.direction);
    }

    pub fn reset(&mut self, bounds: &mut Rect) {
        bounds.pos = self.start;
        self.speed = self.launch.speed;
        self.direction = self.launch.direction;
        self.acceleration = self.launch.acceleration;
    }
}

/// A player-controlled paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    /// Vertical step per tick while a direction is held
    pub speed: f64,
    /// Controller this paddle reads (never writes)
    pub controller: ControllerId,
    /// Position recorded at construction
    pub start: DVec2,
    /// Restore `start` on reset instead of staying put
    pub recenter: bool,
}

impl Paddle {
    pub fn new(start: DVec2, controller: ControllerId, speed: f64) -> Self {
        Self {
            speed,
            controller,
            start,
            recenter: false,
        }
    }

    /// Move according to the controller, unless a wall blocks that direction
    ///
    /// Up and down are checked independently: holding both with nothing in
    /// the way leaves the paddle where it is.
    pub fn update(&mut self, bounds: &mut Rect, contacts: &[Contact], controller: &Controller) {
        let y = bounds.pos.y;
        let wall_above = contacts
            .iter()
            .any(|c| c.kind == ObjectKind::Wall && c.bounds.pos.y > y);
        let wall_below = contacts
            .iter()
            .any(|c| c.kind == ObjectKind::Wall && c.bounds.pos.y < y);

        if controller.player_up && !wall_above {
            bounds.pos.y += self.speed;
        }

        if controller.player_down && !wall_below {
            bounds.pos.y -= self.speed;
        }
    }

    pub fn reset(&mut self, bounds: &mut Rect) {
        if self.recenter {
            bounds.pos = self.start;
        }
    }
}

/// A wall bounding the play area; static geometry only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Wall;

/// Per-kind state of a game object
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Ball(Ball),
    Paddle(Paddle),
    Wall(Wall),
}

/// Anything that lives in a game screen and takes part in collisions
#[derive(Debug, Clone, PartialEq)]
pub struct GameObject {
    pub bounds: Rect,
    pub body: Body,
    /// Contacts found this tick; empty outside the collision pass
    pub collisions: Vec<Contact>,
}

impl GameObject {
    pub fn new(bounds: Rect, body: Body) -> Self {
        Self {
            bounds,
            body,
            collisions: Vec::new(),
        }
    }

    /// Ball whose reset position is the lower-left corner of `bounds`
    pub fn ball(bounds: Rect, launch: Launch) -> Self {
        Self::new(bounds, Body::Ball(Ball::new(bounds.pos, launch)))
    }

    pub fn paddle(bounds: Rect, controller: ControllerId, speed: f64) -> Self {
        Self::new(bounds, Body::Paddle(Paddle::new(bounds.pos, controller, speed)))
    }

    pub fn wall(bounds: Rect) -> Self {
        Self::new(bounds, Body::Wall(Wall))
    }

    pub fn kind(&self) -> ObjectKind {
        match self.body {
            Body::Ball(_) => ObjectKind::Ball,
            Body::Paddle(_) => ObjectKind::Paddle,
            Body::Wall(_) => ObjectKind::Wall,
        }
    }

    pub fn is_ball(&self) -> bool {
        matches!(self.body, Body::Ball(_))
    }

    /// What another object records when it touches this one
    pub fn contact(&self) -> Contact {
        Contact {
            kind: self.kind(),
            bounds: self.bounds,
        }
    }

    pub fn as_ball(&self) -> Option<&Ball> {
        match &self.body {
            Body::Ball(ball) => Some(ball),
            _ => None,
        }
    }

    pub fn as_ball_mut(&mut self) -> Option<&mut Ball> {
        match &mut self.body {
            Body::Ball(ball) => Some(ball),
            _ => None,
        }
    }

    pub fn as_paddle(&self) -> Option<&Paddle> {
        match &self.body {
            Body::Paddle(paddle) => Some(paddle),
            _ => None,
        }
    }

    pub fn as_paddle_mut(&mut self) -> Option<&mut Paddle> {
        match &mut self.body {
            Body::Paddle(paddle) => Some(paddle),
            _ => None,
        }
    }

    /// React to this tick's contacts
    pub fn update(&mut self, controllers: &Controllers) {
        match &mut self.body {
            Body::Ball(ball) => ball.update(&mut self.bounds, &self.collisions),
            Body::Paddle(paddle) => match controllers.get(paddle.controller) {
                Some(controller) => paddle.update(&mut self.bounds, &self.collisions, controller),
                None => log::warn!("Paddle bound to missing controller {:?}", paddle.controller),
            },
            Body::Wall(_) => {}
        }
    }

    /// Return to the start-of-rally state
    pub fn reset(&mut self) {
        match &mut self.body {
            Body::Ball(ball) => ball.reset(&mut self.bounds),
            Body::Paddle(paddle) => paddle.reset(&mut self.bounds),
            Body::Wall(_) => {}
        }
    }
}
