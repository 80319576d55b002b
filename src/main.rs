//! Retro Pong headless driver
//!
//! Plays one round with a simple tracking player against the CPU and prints
//! the final world snapshot as JSON. Pass a settings file to override the
//! defaults: `retro-pong [settings.json]`.

use std::process::ExitCode;

use retro_pong::sim::{FixedStep, Input, Session, World};
use retro_pong::{LogSink, Settings};

/// Simulated frame time of the virtual display (a little uneven on purpose)
const FRAME_TIMES: [f32; 4] = [0.016, 0.017, 0.016, 0.018];
/// Give up after this many frames (about ten minutes of play)
const MAX_FRAMES: usize = 36_000;
/// Fastest the tracking player can drag per frame
const PLAYER_MAX_DRAG: f32 = 3.0;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Retro Pong (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };

    let world = match World::try_with_sink(settings, LogSink) {
        Ok(world) => world,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let mut session = Session::new(world);
    let mut clock = FixedStep::default();
    session.handle(Input::Tap(None));

    let mut outcome = None;
    'frames: for frame in 0..MAX_FRAMES {
        let steps = clock.advance(FRAME_TIMES[frame % FRAME_TIMES.len()]);
        for _ in 0..steps {
            session.handle(Input::Drag(track_ball(session.world())));
            if let Some(result) = session.tick(clock.step()) {
                outcome = Some(result);
                break 'frames;
            }
        }
    }

    let world = session.world();
    match outcome {
        Some(result) => log::info!(
            "{:?}: {} - {}",
            result,
            world.paddle1().points(),
            world.paddle2().points()
        ),
        None => log::warn!("No result after {} frames", MAX_FRAMES),
    }

    match serde_json::to_string_pretty(&world.snapshot()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Failed to serialize snapshot: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Drag that moves the player paddle toward the ball, limited in speed
fn track_ball<S: retro_pong::SoundSink>(world: &World<S>) -> f32 {
    let target = world.ball().bounds().center().y;
    let current = world.paddle1().bounds().center().y;
    (target - current).clamp(-PLAYER_MAX_DRAG, PLAYER_MAX_DRAG)
}
