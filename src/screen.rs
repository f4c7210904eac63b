//! Application screens
//!
//! A screen owns everything in one scene of the game and the rules for
//! updating and drawing it. The title screen waits for a key; the game screen
//! owns the ball, paddles, walls and the score.

use glam::DVec2;

use crate::error::PongError;
use crate::input::{ControllerId, Controllers, KeyState};
use crate::renderer::{AssetTag, Batch, Label};
use crate::settings::{PLAYER_COUNT, Settings};
use crate::sim::{self, GameObject, Launch, ObjectKind, Rect};

/// Side of the play area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    BallHitPaddle,
    BallHitWall,
    /// `side` scored; totals after the point
    Scored { side: Side, left: u32, right: u32 },
}

/// Request from a screen to switch to another one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    StartGame,
}

/// Title screen of the game
#[derive(Debug, Clone)]
pub struct TitleScreen {
    labels: [Label; 2],
}

impl TitleScreen {
    pub fn new(settings: &Settings) -> Self {
        let center = DVec2::new((settings.width / 2) as f64, (settings.height / 2) as f64);
        Self {
            labels: [
                Label::new("Pong", 36, center),
                Label::new("Press any key to start", 16, center - DVec2::new(0.0, 60.0)),
            ],
        }
    }

    /// Start the game as soon as any key is held
    pub fn update(&self, keys: &KeyState) -> Option<Transition> {
        keys.any_pressed().then_some(Transition::StartGame)
    }

    pub fn draw(&self, batch: &mut Batch) {
        for label in &self.labels {
            batch.push_label(label.clone());
        }
    }
}

/// Main game screen. Holds the objects and scoring rules of the core loop.
#[derive(Debug, Clone)]
pub struct GameScreen {
    objects: Vec<GameObject>,
    left_score: u32,
    right_score: u32,
    /// Ball x beyond `[0, width]` is a point
    width: f64,
    left_label: Label,
    right_label: Label,
}

impl GameScreen {
    /// Build the standard scene: ball, left and right paddles, top and bottom walls
    pub fn new(settings: &Settings, controllers: &Controllers) -> Result<Self, PongError> {
        let (w, h) = (settings.width as f64, settings.height as f64);
        let center = DVec2::new((settings.width / 2) as f64, (settings.height / 2) as f64);
        let paddle = settings.paddle_size();
        let wall = settings.wall_size();

        let mut objects = vec![GameObject::ball(
            Rect::new(center, settings.ball_extent()),
            Launch::from_settings(settings),
        )];

        let paddle_x = [settings.paddle_margin, w - settings.paddle_margin - paddle.x];
        for (x, id) in paddle_x.into_iter().zip(controllers.ids()) {
            let mut obj = GameObject::paddle(
                Rect::new(DVec2::new(x, center.y), paddle),
                id,
                settings.paddle_speed,
            );
            if let Some(p) = obj.as_paddle_mut() {
                p.recenter = settings.recenter_paddles;
            }
            objects.push(obj);
        }

        objects.push(GameObject::wall(Rect::new(DVec2::new(0.0, h - wall.y), wall)));
        objects.push(GameObject::wall(Rect::new(DVec2::ZERO, wall)));

        validate_scene(&objects, controllers)?;
        Ok(Self::with_objects(objects, settings))
    }

    /// Scene from an arbitrary object list, without layout checks
    pub fn with_objects(objects: Vec<GameObject>, settings: &Settings) -> Self {
        let label_y = settings.height as f64 - 50.0;
        let mid = (settings.width / 2) as f64;
        let mut screen = Self {
            objects,
            left_score: 0,
            right_score: 0,
            width: settings.width as f64,
            left_label: Label::new("0", 25, DVec2::new(mid - 40.0, label_y)),
            right_label: Label::new("0", 25, DVec2::new(mid + 40.0, label_y)),
        };
        screen.reset();
        screen
    }

    pub fn objects(&self) -> &[GameObject] {
        &self.objects
    }

    /// Object list, for rearranging the scene
    pub fn objects_mut(&mut self) -> &mut Vec<GameObject> {
        &mut self.objects
    }

    /// First ball in the scene
    pub fn ball(&self) -> Option<&GameObject> {
        self.objects.iter().find(|o| o.is_ball())
    }

    pub fn ball_mut(&mut self) -> Option<&mut GameObject> {
        self.objects.iter_mut().find(|o| o.is_ball())
    }

    pub fn left_score(&self) -> u32 {
        self.left_score
    }

    pub fn right_score(&self) -> u32 {
        self.right_score
    }

    pub fn score_labels(&self) -> (&Label, &Label) {
        (&self.left_label, &self.right_label)
    }

    /// Reset every object and refresh the score display. Used after a point.
    pub fn reset(&mut self) {
        reset_objects(&mut self.objects);
        self.refresh_labels();
    }

    fn refresh_labels(&mut self) {
        self.left_label.text = self.left_score.to_string();
        self.right_label.text = self.right_score.to_string();
    }

    /// Advance one tick
    pub fn update(&mut self, controllers: &Controllers) -> Vec<GameEvent> {
        let width = self.width;
        let left_score = &mut self.left_score;
        let right_score = &mut self.right_score;
        let mut scored = Vec::new();

        let pairs = sim::step_with(&mut self.objects, controllers, |objects, index| {
            if !objects[index].is_ball() {
                return;
            }

            // Ball goes off screen
            let x = objects[index].bounds.pos.x;
            let side = if x < 0.0 {
                *right_score += 1;
                Side::Right
            } else if x > width {
                *left_score += 1;
                Side::Left
            } else {
                return;
            };

            reset_objects(objects);
            scored.push(GameEvent::Scored {
                side,
                left: *left_score,
                right: *right_score,
            });
        });

        let mut events = Vec::new();
        for (i, j) in pairs {
            let kinds = (self.objects[i].kind(), self.objects[j].kind());
            let other = match kinds {
                (ObjectKind::Ball, other) | (other, ObjectKind::Ball) => other,
                _ => continue,
            };
            match other {
                ObjectKind::Paddle => events.push(GameEvent::BallHitPaddle),
                ObjectKind::Wall => events.push(GameEvent::BallHitWall),
                ObjectKind::Ball => {}
            }
        }
        for event in &events {
            log::debug!("{event:?}");
        }

        if !scored.is_empty() {
            self.refresh_labels();
            for event in &scored {
                if let GameEvent::Scored { side, left, right } = event {
                    log::info!("{side:?} scores ({left} - {right})");
                }
            }
            events.extend(scored);
        }

        events
    }

    pub fn draw(&self, batch: &mut Batch) {
        for obj in &self.objects {
            batch.push_sprite(AssetTag::from(obj.kind()), obj.bounds);
        }
        batch.push_label(self.left_label.clone());
        batch.push_label(self.right_label.clone());
    }
}

fn reset_objects(objects: &mut [GameObject]) {
    objects.iter_mut().for_each(GameObject::reset);
}

/// Check a scene has one ball, one paddle per controller and two walls
pub fn validate_scene(objects: &[GameObject], controllers: &Controllers) -> Result<(), PongError> {
    let count = |kind| objects.iter().filter(|o| o.kind() == kind).count();
    let invalid = |msg: String| Err(PongError::InvalidScene(msg));

    if count(ObjectKind::Ball) != 1 {
        return invalid(format!("expected 1 ball, found {}", count(ObjectKind::Ball)));
    }
    if count(ObjectKind::Wall) != 2 {
        return invalid(format!("expected 2 walls, found {}", count(ObjectKind::Wall)));
    }

    let mut bound: Vec<ControllerId> = objects
        .iter()
        .filter_map(|o| o.as_paddle().map(|p| p.controller))
        .collect();
    if bound.len() != PLAYER_COUNT {
        return invalid(format!("expected {PLAYER_COUNT} paddles, found {}", bound.len()));
    }
    if let Some(id) = bound.iter().find(|id| controllers.get(**id).is_none()) {
        return invalid(format!("paddle bound to missing controller {id:?}"));
    }
    bound.sort_by_key(|id| id.0);
    bound.dedup();
    if bound.len() != PLAYER_COUNT {
        return invalid("two paddles share a controller".to_string());
    }

    Ok(())
}

/// The active application mode
#[derive(Debug, Clone)]
pub enum Screen {
    Title(TitleScreen),
    Game(GameScreen),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Title(_) => "title",
            Screen::Game(_) => "game",
        }
    }

    pub fn draw(&self, batch: &mut Batch) {
        match self {
            Screen::Title(title) => title.draw(batch),
            Screen::Game(game) => game.draw(batch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Key, KeyEvent};
    use std::f64::consts::PI;

    fn settings() -> Settings {
        Settings::with_size(640, 480)
    }

    fn game() -> GameScreen {
        let settings = settings();
        GameScreen::new(&settings, &settings.controllers()).unwrap()
    }

    /// Game screen with everything but the ball removed
    fn ball_only(direction: f64) -> GameScreen {
        let mut screen = game();
        screen.objects_mut().retain(GameObject::is_ball);
        screen.ball_mut().unwrap().as_ball_mut().unwrap().direction = direction;
        screen
    }

    #[test]
    fn test_title_screen_waits_for_key() {
        let title = TitleScreen::new(&settings());
        let mut keys = KeyState::new();
        assert_eq!(title.update(&keys), None);
        keys.apply(KeyEvent::Pressed(Key::Escape));
        assert_eq!(title.update(&keys), Some(Transition::StartGame));
    }

    #[test]
    fn test_title_screen_draws_labels() {
        let mut batch = Batch::new();
        TitleScreen::new(&settings()).draw(&mut batch);
        let texts: Vec<&str> = batch.labels().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Pong", "Press any key to start"]);
    }

    #[test]
    fn test_game_screen_construction() {
        let screen = game();
        let kinds: Vec<ObjectKind> = screen.objects().iter().map(GameObject::kind).collect();
        assert_eq!(
            kinds,
            vec![
                ObjectKind::Ball,
                ObjectKind::Paddle,
                ObjectKind::Paddle,
                ObjectKind::Wall,
                ObjectKind::Wall
            ]
        );
        assert_eq!(screen.left_score(), 0);
        assert_eq!(screen.right_score(), 0);

        // Right paddle sits its margin away from the right edge
        let right = &screen.objects()[2].bounds;
        assert_eq!(right.pos, DVec2::new(604.0, 240.0));
        // Top wall sits flush with the top edge
        assert_eq!(screen.objects()[3].bounds.top(), 480.0);

        let mut batch = Batch::new();
        screen.draw(&mut batch);
        assert_eq!(batch.len(), 7);
    }

    #[test]
    fn test_game_screen_update_runs() {
        let settings = settings();
        let controllers = settings.controllers();
        let mut screen = GameScreen::new(&settings, &controllers).unwrap();
        screen.update(&controllers);
        assert!(screen.objects().iter().all(|o| o.collisions.is_empty()));
    }

    #[test]
    fn test_left_side_scores() {
        let controllers = settings().controllers();
        let mut screen = ball_only(0.0);
        let start = screen.ball().unwrap().as_ball().unwrap().start;

        let mut events = Vec::new();
        for _ in 0..100 {
            events = screen.update(&controllers);
            if screen.left_score() > 0 {
                break;
            }
        }

        assert_eq!(screen.left_score(), 1);
        assert_eq!(screen.right_score(), 0);
        assert!(events.contains(&GameEvent::Scored {
            side: Side::Left,
            left: 1,
            right: 0
        }));

        let ball = screen.ball().unwrap();
        assert_eq!(ball.bounds.pos, start);
        let state = ball.as_ball().unwrap();
        assert_eq!(state.speed, 5.0);
        assert_eq!(state.direction, PI / 4.0);
        assert_eq!(state.acceleration, 1.0);
        assert_eq!(screen.score_labels().0.text, "1");
        assert_eq!(screen.score_labels().1.text, "0");
    }

    #[test]
    fn test_right_side_scores() {
        let controllers = settings().controllers();
        let mut screen = ball_only(PI);
        for _ in 0..100 {
            screen.update(&controllers);
        }
        assert_eq!(screen.left_score(), 0);
        assert_eq!(screen.right_score(), 1);
        assert_eq!(screen.score_labels().1.text, "1");
    }

    #[test]
    fn test_collision_handling() {
        let controllers = settings().controllers();
        let mut screen = game();
        // Should hit the right paddle
        screen.ball_mut().unwrap().as_ball_mut().unwrap().direction = 0.0;
        let mut hits = 0;
        for _ in 0..100 {
            hits += screen
                .update(&controllers)
                .iter()
                .filter(|e| **e == GameEvent::BallHitPaddle)
                .count();
        }
        assert_eq!(hits, 1);
        let ball = screen.ball().unwrap().as_ball().unwrap();
        assert_eq!(ball.direction, PI);
        assert_eq!(ball.speed, 6.0);
    }

    #[test]
    fn test_paddles_stop_at_walls() {
        let settings = settings();
        let mut controllers = settings.controllers();
        let mut screen = GameScreen::new(&settings, &controllers).unwrap();
        // Park the ball so it never reaches a paddle
        screen.ball_mut().unwrap().as_ball_mut().unwrap().speed = 0.0;
        controllers.press(Key::char('w'));

        for _ in 0..100 {
            screen.update(&controllers);
        }

        let paddle = &screen.objects()[1].bounds;
        let top_wall = &screen.objects()[3].bounds;
        // The paddle stops on the first tick it touches the wall
        assert!(paddle.top() >= top_wall.bottom());
        assert!(paddle.top() < top_wall.bottom() + 10.0);
        // The other player's paddle never moved
        assert_eq!(screen.objects()[2].bounds.pos.y, 240.0);
    }

    #[test]
    fn test_recentered_paddles_return_after_point() {
        let settings = Settings {
            recenter_paddles: true,
            ..settings()
        };
        let mut controllers = settings.controllers();
        let mut screen = GameScreen::new(&settings, &controllers).unwrap();
        controllers.press(Key::Down);
        for _ in 0..3 {
            screen.update(&controllers);
        }
        assert_eq!(screen.objects()[2].bounds.pos.y, 210.0);

        screen.reset();
        assert_eq!(screen.objects()[2].bounds.pos.y, 240.0);
    }

    #[test]
    fn test_validate_scene_rejects_missing_walls() {
        let settings = settings();
        let controllers = settings.controllers();
        let mut objects = game().objects().to_vec();
        objects.retain(|o| o.kind() != ObjectKind::Wall);
        assert!(matches!(
            validate_scene(&objects, &controllers),
            Err(PongError::InvalidScene(_))
        ));
    }

    #[test]
    fn test_validate_scene_rejects_shared_controller() {
        let settings = settings();
        let controllers = settings.controllers();
        let mut objects = game().objects().to_vec();
        if let Some(p) = objects[2].as_paddle_mut() {
            p.controller = ControllerId(0);
        }
        assert!(validate_scene(&objects, &controllers).is_err());
    }
}
