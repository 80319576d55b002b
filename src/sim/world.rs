//! The world: owns every body and the game state machine
//!
//! ```text
//! Ready --(countdown | resume)--> Resumed <--(pause/resume)--> Paused
//! Resumed --(max points)--> Ending --(end)--> Ended --(new_game)--> Ready
//! ```
//!
//! `new_game` is accepted from any state. Only `update`, the player move and
//! the transition methods below change anything.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, WorldEvents, WorldQuery};
use super::cpu::Cpu;
use super::paddle::{Paddle, Side};
use super::rect::{Block, Rect};
use super::score::ScoreBitmap;
use crate::audio::{Silent, SoundEffect, SoundSink};
use crate::error::SettingsError;
use crate::settings::Settings;

/// Float slack on the Ready countdown so summed frame deltas still reach it
const COUNTDOWN_SLACK: f32 = 1e-4;

/// Game lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    /// Counting down before play
    Ready,
    Paused,
    /// Play is running
    Resumed,
    /// A paddle reached max points; waiting for the UI to acknowledge
    Ending,
    /// Round over until a new game
    Ended,
}

/// Read-only view of a paddle for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaddleView {
    pub bounds: Rect,
    pub points: u32,
    pub score: ScoreBitmap,
}

impl From<&Paddle> for PaddleView {
    fn from(paddle: &Paddle) -> Self {
        Self {
            bounds: *paddle.bounds(),
            points: paddle.points(),
            score: paddle.score_bitmap().clone(),
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: State,
    pub game_over: bool,
    pub ball: Rect,
    pub paddle1: PaddleView,
    pub paddle2: PaddleView,
    pub border: Vec<Rect>,
    pub walls: Vec<Rect>,
}

/// Geometry handed to the ball during an update
struct Field<'a> {
    paddle1: &'a Rect,
    paddle2: &'a Rect,
    walls: &'a [Block],
    play_width: f32,
}

impl WorldQuery for Field<'_> {
    fn paddle_bounds(&self, side: Side) -> Rect {
        match side {
            Side::Left => *self.paddle1,
            Side::Right => *self.paddle2,
        }
    }

    fn walls(&self) -> &[Block] {
        self.walls
    }

    fn play_width(&self) -> f32 {
        self.play_width
    }
}

/// Forwards hits to the sink and remembers who scored
struct Relay<'a, S: SoundSink> {
    sink: &'a mut S,
    scorer: Option<Side>,
}

impl<S: SoundSink> WorldEvents for Relay<'_, S> {
    fn paddle_hit(&mut self) {
        self.sink.play(SoundEffect::PaddleHit);
    }

    fn wall_hit(&mut self) {
        self.sink.play(SoundEffect::WallHit);
    }

    fn scored(&mut self, scorer: Side) {
        self.scorer.get_or_insert(scorer);
    }
}

/// The game world
#[derive(Debug)]
pub struct World<S: SoundSink = Silent> {
    settings: Settings,
    ball: Ball,
    ball_start: Vec2,
    /// Left, player controlled
    paddle1: Paddle,
    /// Right, CPU controlled
    paddle2: Paddle,
    border: Vec<Block>,
    walls: Vec<Block>,
    state: State,
    /// Seconds spent counting down; only meaningful while Ready
    state_time: f32,
    score_changed: bool,
    game_over: bool,
    sink: S,
}

impl World<Silent> {
    /// World with no sound output
    pub fn new(settings: Settings) -> Self {
        Self::with_sink(settings, Silent)
    }
}

impl<S: SoundSink> World<S> {
    /// Validate `settings`, then build the world
    pub fn try_with_sink(settings: Settings, sink: S) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self::with_sink(settings, sink))
    }

    /// Build the world from settings that already passed [`Settings::validate`]
    ///
    /// Geometry is derived from the settings without further checks; a zero
    /// block size, for one, would ask for an unbounded border. Use
    /// [`World::try_with_sink`] for settings from an untrusted source.
    pub fn with_sink(settings: Settings, sink: S) -> Self {
        debug_assert!(settings.validate().is_ok(), "invalid settings: {settings:?}");

        let block = settings.block;
        let width = settings.play_width;
        let height = settings.play_height;
        let border_count = settings.border_block_count();
        let paddle_height = settings.paddle_height();
        let paddle_y = (height - paddle_height) / 2.0;

        let start_rows = if border_count % 2 == 0 { 1.0 } else { 2.0 };
        let ball_start = Vec2::new(
            (width - block) / 2.0,
            border_count as f32 * block - start_rows * block,
        );
        let ball = Ball::new(
            ball_start,
            block,
            settings.ball_acceleration,
            settings.ball_velocity_ratio,
        );

        let paddle1 = Paddle::new(Rect::new(block, paddle_y, block, paddle_height), height);
        let paddle2 = Paddle::new(
            Rect::new(width - block - block, paddle_y, block, paddle_height),
            height,
        )
        .with_cpu(Cpu::new(
            settings.cpu_min_random,
            settings.cpu_max_random,
            settings.seed,
        ));

        let border = (0..border_count)
            .map(|i| {
                Block::new(
                    (width - block) / 2.0,
                    block + block * i as f32 * 2.0,
                    block,
                    block,
                )
            })
            .collect();

        let wall_width = width - 4.0 * block;
        let walls = vec![
            Block::new(2.0 * block, 0.0, wall_width, block),
            Block::new(2.0 * block, height.floor() - block, wall_width, block),
        ];

        log::info!(
            "World created: {}x{} play area, first to {}",
            width,
            height,
            settings.max_points
        );

        Self {
            settings,
            ball,
            ball_start,
            paddle1,
            paddle2,
            border,
            walls,
            state: State::Ready,
            state_time: 0.0,
            score_changed: false,
            game_over: false,
            sink,
        }
    }

    /// Advance one frame
    ///
    /// Resumed runs the ball and the CPU paddle. Ready runs the countdown and
    /// switches to Resumed once it reaches `ready_wait_secs`. Other states do
    /// nothing.
    pub fn update(&mut self, delta: f32) {
        match self.state {
            State::Resumed => self.advance(delta),
            State::Ready => self.count_down(delta),
            State::Paused | State::Ending | State::Ended => {}
        }
    }

    fn count_down(&mut self, delta: f32) {
        self.state_time += delta;
        if self.state_time + COUNTDOWN_SLACK >= self.settings.ready_wait_secs {
            self.resume();
        }
    }

    fn advance(&mut self, delta: f32) {
        let scorer = {
            let field = Field {
                paddle1: self.paddle1.bounds(),
                paddle2: self.paddle2.bounds(),
                walls: &self.walls,
                play_width: self.settings.play_width,
            };
            let mut relay = Relay {
                sink: &mut self.sink,
                scorer: None,
            };
            self.ball.update(delta, &field, &mut relay);
            relay.scorer
        };

        // Serving resets the ball before the next frame can see it out of bounds
        if let Some(side) = scorer {
            self.points(side);
        }

        self.paddle2.update(delta, &self.ball);
    }

    /// Award a point to `scorer` and serve again
    ///
    /// The ball is served toward the scorer's side. Reaching max points moves
    /// to Ending; the game is lost if the CPU got there.
    pub fn points(&mut self, scorer: Side) {
        self.sink.play(SoundEffect::Point);

        let acceleration = self.settings.ball_acceleration;
        let total = match scorer {
            Side::Left => {
                self.ball.set_acceleration(-acceleration);
                self.paddle1.add_point()
            }
            Side::Right => {
                self.ball.set_acceleration(acceleration);
                self.paddle2.add_point()
            }
        };
        self.serve();

        log::debug!(
            "{:?} scored: {} - {}",
            scorer,
            self.paddle1.points(),
            self.paddle2.points()
        );

        if total >= self.settings.max_points {
            self.game_over = scorer == Side::Right;
            self.set_state(State::Ending);
            if self.game_over {
                log::info!("Game over: CPU reached {} points", total);
            } else {
                log::info!("Player won with {} points", total);
            }
        }
    }

    /// Put the ball back at center and flag the score change
    fn serve(&mut self) {
        self.score_changed = true;
        self.ball.reset(self.ball_start.x, self.ball_start.y);
    }

    /// Reset scores, paddles and ball, and return to Ready
    pub fn new_game(&mut self) {
        self.set_state(State::Ready);
        self.state_time = 0.0;
        self.game_over = false;

        self.paddle1.return_to_start();
        self.paddle1.reset_points();
        self.paddle2.return_to_start();
        self.paddle2.reset_points();

        self.ball.set_acceleration(-self.settings.ball_acceleration);
        self.serve();
        log::info!("New game");
    }

    /// Resumed -> Paused
    pub fn pause(&mut self) {
        if self.state == State::Resumed {
            self.set_state(State::Paused);
        } else {
            log::debug!("pause ignored in {:?}", self.state);
        }
    }

    /// Paused or Ready -> Resumed
    pub fn resume(&mut self) {
        match self.state {
            State::Paused | State::Ready => {
                self.state_time = 0.0;
                self.set_state(State::Resumed);
            }
            _ => log::debug!("resume ignored in {:?}", self.state),
        }
    }

    /// Ending -> Ended, once the UI has shown the result
    pub fn end(&mut self) {
        if self.state == State::Ending {
            self.set_state(State::Ended);
        } else {
            log::debug!("end ignored in {:?}", self.state);
        }
    }

    fn set_state(&mut self, state: State) {
        if self.state != state {
            log::info!("World state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    /// Move the player paddle by a signed on-screen delta
    pub fn move_paddle1(&mut self, amount: f32) {
        self.paddle1.move_by(amount);
    }

    /// Forward a UI button press to the sound channel
    pub fn press_button(&mut self) {
        self.sink.play(SoundEffect::Button);
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == State::Ready
    }

    pub fn is_paused(&self) -> bool {
        self.state == State::Paused
    }

    pub fn is_resumed(&self) -> bool {
        self.state == State::Resumed
    }

    pub fn is_ending(&self) -> bool {
        self.state == State::Ending
    }

    pub fn is_end(&self) -> bool {
        self.state == State::Ended
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Set by every serve until the consumer calls `reset_score_changed`
    pub fn is_score_changed(&self) -> bool {
        self.score_changed
    }

    pub fn reset_score_changed(&mut self) {
        self.score_changed = false;
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn ball_start(&self) -> Vec2 {
        self.ball_start
    }

    pub fn paddle1(&self) -> &Paddle {
        &self.paddle1
    }

    pub fn paddle2(&self) -> &Paddle {
        &self.paddle2
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.paddle1,
            Side::Right => &self.paddle2,
        }
    }

    /// Center-line dashes, bottom to top
    pub fn border(&self) -> &[Block] {
        &self.border
    }

    /// Bottom wall then top wall
    pub fn walls(&self) -> &[Block] {
        &self.walls
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state,
            game_over: self.game_over,
            ball: *self.ball.bounds(),
            paddle1: PaddleView::from(&self.paddle1),
            paddle2: PaddleView::from(&self.paddle2),
            border: self.border.iter().map(|b| *b.bounds()).collect(),
            walls: self.walls.iter().map(|b| *b.bounds()).collect(),
        }
    }
}
