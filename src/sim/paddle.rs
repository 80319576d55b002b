//! Paddles: vertical movement clamped to the play area, and the score they carry

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::body::Motion;
use super::cpu::Cpu;
use super::rect::Rect;
use super::score::ScoreBitmap;

/// Which end of the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Paddle 1, the player
    Left,
    /// Paddle 2, the CPU
    Right,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// What moves a paddle
#[derive(Debug, Clone)]
pub enum Driver {
    /// Moved only through [`Paddle::move_by`]
    Player,
    /// Follows the ball every update
    Cpu(Cpu),
}

/// A paddle
#[derive(Debug, Clone)]
pub struct Paddle {
    motion: Motion,
    /// Where `return_to_start` puts the paddle
    start: Vec2,
    /// Top of the play area; bounds stay within `[0, play_height]`
    play_height: f32,
    points: u32,
    score: ScoreBitmap,
    driver: Driver,
}

impl Paddle {
    pub fn new(bounds: Rect, play_height: f32) -> Self {
        Self {
            motion: Motion::new(bounds.x, bounds.y, bounds.width, bounds.height),
            start: bounds.origin(),
            play_height,
            points: 0,
            score: ScoreBitmap::from_points(0),
            driver: Driver::Player,
        }
    }

    /// Hand this paddle over to a CPU controller
    pub fn with_cpu(mut self, cpu: Cpu) -> Self {
        self.driver = Driver::Cpu(cpu);
        self
    }

    #[inline]
    pub fn motion(&self) -> &Motion {
        &self.motion
    }

    #[inline]
    pub fn bounds(&self) -> &Rect {
        self.motion.bounds()
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.motion.position()
    }

    pub fn is_cpu(&self) -> bool {
        matches!(self.driver, Driver::Cpu(_))
    }

    pub fn cpu(&self) -> Option<&Cpu> {
        match &self.driver {
            Driver::Cpu(cpu) => Some(cpu),
            Driver::Player => None,
        }
    }

    /// Move vertically by a signed amount, staying inside the play area
    pub fn move_by(&mut self, amount: f32) {
        let y = self.motion.bounds().y + amount;
        self.motion.set_bounds_y(y);
        self.motion.clamp_y(0.0, self.play_height);
        self.motion.sync_position();
    }

    /// Advance one frame; only CPU paddles move on their own
    pub fn update(&mut self, delta: f32, ball: &Ball) {
        if let Driver::Cpu(cpu) = &mut self.driver {
            cpu.drive(&mut self.motion, ball, delta, self.play_height);
        }
    }

    /// Put the paddle back where it started and stop it
    pub fn return_to_start(&mut self) {
        self.motion.set_position(self.start.x, self.start.y);
        self.motion.set_velocity(Vec2::ZERO);
        self.motion.set_acceleration(Vec2::ZERO);
        if let Driver::Cpu(cpu) = &mut self.driver {
            cpu.forget_sample();
        }
    }

    #[inline]
    pub fn points(&self) -> u32 {
        self.points
    }

    /// Award a point and redraw the score; returns the new total
    pub fn add_point(&mut self) -> u32 {
        self.points += 1;
        self.update_score();
        self.points
    }

    pub fn reset_points(&mut self) {
        self.points = 0;
        self.update_score();
    }

    /// Regenerate the score bitmap from `points`
    pub fn update_score(&mut self) {
        self.score = ScoreBitmap::from_points(self.points);
    }

    #[inline]
    pub fn score_bitmap(&self) -> &ScoreBitmap {
        &self.score
    }

    /// Lit cells in the score bitmap
    pub fn size(&self) -> usize {
        self.score.lit_count()
    }
}
