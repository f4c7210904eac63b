//! Pong entry point
//!
//! Headless native runner: drives the game with a scripted input source at
//! the fixed tick rate and reports the score. A windowed host replaces
//! `ScriptedInput` and `AsciiRenderer` with real implementations.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use pong::input::{Key, KeyEvent, ScriptedInput};
use pong::renderer::AsciiRenderer;
use pong::{Pong, PongError, Settings};

#[derive(Debug, Parser)]
#[command(name = "pong", about = "Run a headless game of Pong")]
struct Args {
    /// Settings JSON file (defaults are used when omitted)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Number of frames to simulate
    #[arg(long, default_value_t = 2000)]
    frames: u64,
    /// Print the final frame as text
    #[arg(long)]
    ascii: bool,
    /// Text frame size (columns x rows)
    #[arg(long, default_value_t = 64)]
    cols: usize,
    #[arg(long, default_value_t = 24)]
    rows: usize,
}

/// Dismiss the title, then have both players wiggle their paddles
fn demo_script(settings: &Settings) -> ScriptedInput {
    let left = &settings.players[0];
    let right = &settings.players[1];
    ScriptedInput::new(vec![
        (0, KeyEvent::Pressed(Key::Space)),
        (1, KeyEvent::Released(Key::Space)),
        (20, KeyEvent::Pressed(left.up_key)),
        (45, KeyEvent::Released(left.up_key)),
        (30, KeyEvent::Pressed(right.down_key)),
        (50, KeyEvent::Released(right.down_key)),
        (400, KeyEvent::Pressed(right.up_key)),
        (440, KeyEvent::Released(right.up_key)),
    ])
}

fn run(args: &Args) -> Result<(), PongError> {
    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut input = demo_script(&settings);
    let mut renderer = AsciiRenderer::new(settings.width, settings.height, args.cols, args.rows);
    let frame_dt = settings.tick_period;
    let mut game = Pong::new(settings)?;

    for _ in 0..args.frames {
        game.poll_input(&mut input);
        game.advance(frame_dt)?;
        if game.should_exit() {
            break;
        }
    }

    game.draw(&mut renderer);
    if args.ascii {
        println!("{}", renderer.to_text());
    }

    match game.game() {
        Some(screen) => {
            log::info!("Finished after {} ticks", game.ticks());
            println!("{} - {}", screen.left_score(), screen.right_score());
        }
        None => log::warn!("Game never left the title screen"),
    }
    Ok(())
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Pong (native) starting...");

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
