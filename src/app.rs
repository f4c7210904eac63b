//! Top-level application
//!
//! Owns the controllers, the pressed-key set and the active screen. The host
//! feeds it key events and frame times; the app turns frame time into fixed
//! ticks and swaps screens between ticks.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS};
use crate::error::PongError;
use crate::input::{Controllers, InputSource, KeyEvent, KeyState};
use crate::renderer::{Batch, Renderer};
use crate::screen::{GameEvent, GameScreen, Screen, TitleScreen, Transition};
use crate::settings::Settings;

/// The game as a whole
pub struct Pong {
    settings: Settings,
    controllers: Controllers,
    keys: KeyState,
    screen: Screen,
    /// Unspent frame time, in seconds
    accumulator: f64,
    /// Ticks run since startup
    ticks: u64,
    exit_requested: bool,
}

impl Pong {
    /// Validate settings and start on the title screen
    pub fn new(settings: Settings) -> Result<Self, PongError> {
        settings.validate()?;
        let controllers = settings.controllers();
        let screen = Screen::Title(TitleScreen::new(&settings));
        log::info!(
            "Pong starting ({}x{}, tick {}s)",
            settings.width,
            settings.height,
            settings.tick_period
        );
        Ok(Self {
            settings,
            controllers,
            keys: KeyState::new(),
            screen,
            accumulator: 0.0,
            ticks: 0,
            exit_requested: false,
        })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn controllers(&self) -> &Controllers {
        &self.controllers
    }

    pub fn keys(&self) -> &KeyState {
        &self.keys
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The game screen, once the title has been dismissed
    pub fn game(&self) -> Option<&GameScreen> {
        match &self.screen {
            Screen::Game(game) => Some(game),
            Screen::Title(_) => None,
        }
    }

    pub fn game_mut(&mut self) -> Option<&mut GameScreen> {
        match &mut self.screen {
            Screen::Game(game) => Some(game),
            Screen::Title(_) => None,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// True once the quit key has been pressed
    pub fn should_exit(&self) -> bool {
        self.exit_requested
    }

    /// Apply one key press or release
    pub fn handle_key(&mut self, event: KeyEvent) {
        self.keys.apply(event);
        match event {
            KeyEvent::Pressed(key) => {
                if key == self.settings.quit_key {
                    log::info!("Quit requested");
                    self.exit_requested = true;
                }
                self.controllers.press(key);
            }
            KeyEvent::Released(key) => {
                self.controllers.release(key);
            }
        }
    }

    /// Drain pending events from an input source
    pub fn poll_input(&mut self, source: &mut impl InputSource) {
        for event in source.poll() {
            self.handle_key(event);
        }
    }

    /// Replace the active screen
    ///
    /// The old screen is dropped before the new one sees a tick, so two
    /// screens never run in the same tick.
    pub fn set_screen(&mut self, next: Screen) {
        log::info!("Screen: {} -> {}", self.screen.name(), next.name());
        self.screen = next;
    }

    /// Run exactly one simulation tick on the active screen
    pub fn tick(&mut self) -> Result<Vec<GameEvent>, PongError> {
        self.ticks += 1;
        let transition = match &mut self.screen {
            Screen::Title(title) => title.update(&self.keys),
            Screen::Game(game) => return Ok(game.update(&self.controllers)),
        };

        if let Some(Transition::StartGame) = transition {
            let game = GameScreen::new(&self.settings, &self.controllers)?;
            self.set_screen(Screen::Game(game));
        }
        Ok(Vec::new())
    }

    /// Turn elapsed frame time into fixed ticks. Returns the events of every
    /// tick run.
    ///
    /// Time beyond `MAX_SUBSTEPS` ticks is dropped, not carried over.
    pub fn advance(&mut self, dt: f64) -> Result<Vec<GameEvent>, PongError> {
        if dt.is_finite() {
            self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);
        } else {
            log::warn!("Ignoring non-finite frame time {dt}");
        }

        let tick_period = self.settings.tick_period;
        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= tick_period {
            if substeps == MAX_SUBSTEPS {
                log::debug!("Dropping {:.4}s of frame time", self.accumulator);
                self.accumulator = 0.0;
                break;
            }
            events.extend(self.tick()?);
            self.accumulator -= tick_period;
            substeps += 1;
        }
        Ok(events)
    }

    /// Forget every held key, for when the window loses focus and releases
    /// will never arrive
    pub fn focus_lost(&mut self) {
        log::info!("Focus lost, releasing all keys");
        self.keys.clear();
        self.controllers.clear();
    }

    /// Collect the active screen's visuals
    pub fn batch(&self) -> Batch {
        let mut batch = Batch::new();
        self.screen.draw(&mut batch);
        batch
    }

    pub fn draw(&self, renderer: &mut impl Renderer) {
        renderer.draw(&self.batch());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ControllerId, Key, ScriptedInput};

    fn app() -> Pong {
        Pong::new(Settings::with_size(640, 480)).unwrap()
    }

    #[test]
    fn test_starts_on_title() {
        let mut app = app();
        assert!(matches!(app.screen(), Screen::Title(_)));
        app.tick().unwrap();
        assert!(app.game().is_none());
    }

    #[test]
    fn test_title_to_game_screen_switch() {
        let mut app = app();
        app.handle_key(KeyEvent::Pressed(Key::Escape));
        app.tick().unwrap();
        assert!(matches!(app.screen(), Screen::Game(_)));
    }

    #[test]
    fn test_game_exit() {
        let mut app = app();
        assert!(!app.should_exit());
        app.handle_key(KeyEvent::Pressed(Key::Escape));
        assert!(app.should_exit());
    }

    #[test]
    fn test_controllers() {
        let mut app = app();
        app.handle_key(KeyEvent::Pressed(Key::Up));
        app.handle_key(KeyEvent::Pressed(Key::Down));
        let c = app.controllers().get(ControllerId(1)).unwrap();
        assert!(c.player_up);
        assert!(c.player_down);

        app.handle_key(KeyEvent::Released(Key::Up));
        app.handle_key(KeyEvent::Released(Key::Down));
        let c = app.controllers().get(ControllerId(1)).unwrap();
        assert!(!c.player_up);
        assert!(!c.player_down);
    }

    #[test]
    fn test_advance_runs_whole_ticks() {
        let mut app = app();
        app.advance(0.035).unwrap();
        assert_eq!(app.ticks(), 3);
        // Leftover time carries into the next frame
        app.advance(0.006).unwrap();
        assert_eq!(app.ticks(), 4);
    }

    #[test]
    fn test_advance_caps_substeps() {
        let mut app = app();
        app.advance(5.0).unwrap();
        assert_eq!(app.ticks(), MAX_SUBSTEPS as u64);
    }

    #[test]
    fn test_advance_drops_time_past_the_cap() {
        let mut app = app();
        for _ in 0..100 {
            app.advance(MAX_FRAME_DT).unwrap();
        }
        assert_eq!(app.ticks(), 100 * MAX_SUBSTEPS as u64);

        let ticks = app.ticks();
        for _ in 0..25 {
            app.advance(0.0).unwrap();
        }
        assert_eq!(app.ticks(), ticks);

        app.advance(0.01).unwrap();
        assert_eq!(app.ticks(), ticks + 1);
    }

    #[test]
    fn test_advance_survives_non_finite_time() {
        let mut app = app();
        app.advance(f64::NAN).unwrap();
        app.advance(f64::INFINITY).unwrap();
        assert_eq!(app.ticks(), 0);

        for _ in 0..100 {
            app.advance(0.01).unwrap();
        }
        assert_eq!(app.ticks(), 100);
    }

    #[test]
    fn test_focus_lost_releases_keys() {
        let mut app = app();
        app.handle_key(KeyEvent::Pressed(Key::Space));
        app.handle_key(KeyEvent::Pressed(Key::Up));
        app.focus_lost();

        assert!(!app.keys().any_pressed());
        let c = app.controllers().get(ControllerId(1)).unwrap();
        assert!(!c.player_up);

        // Title no longer sees a held key
        app.tick().unwrap();
        assert!(app.game().is_none());
    }

    #[test]
    fn test_advance_ignores_negative_time() {
        let mut app = app();
        app.advance(-1.0).unwrap();
        assert_eq!(app.ticks(), 0);
    }

    #[test]
    fn test_poll_input_starts_game() {
        let mut app = app();
        let mut input = ScriptedInput::new(vec![(0, KeyEvent::Pressed(Key::Space))]);
        app.poll_input(&mut input);
        app.tick().unwrap();
        assert!(app.game().is_some());
    }

    #[test]
    fn test_rejects_invalid_settings() {
        let settings = Settings {
            width: 0,
            ..Settings::default()
        };
        assert!(matches!(
            Pong::new(settings),
            Err(PongError::InvalidSettings(_))
        ));
    }

    #[test]
    fn test_batch_follows_screen() {
        let mut app = app();
        assert_eq!(app.batch().len(), 2);
        app.handle_key(KeyEvent::Pressed(Key::Space));
        app.tick().unwrap();
        assert_eq!(app.batch().len(), 7);
    }
}
