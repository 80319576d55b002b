//! CPU opponent
//!
//! Copies the ball's vertical acceleration onto its paddle while the ball is
//! coming toward it. Speed is scaled by a random whole-number multiplier drawn
//! once per approach and held until the ball moves away again, so the paddle
//! overshoots by a different amount each rally.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::ball::Ball;
use super::body::Motion;

/// Controller for the right-hand paddle
#[derive(Debug, Clone)]
pub struct Cpu {
    min_multiplier: u32,
    max_multiplier: u32,
    /// Set once a multiplier has been drawn for the current approach
    has_sampled: bool,
    held_multiplier: u32,
    rng: Pcg32,
}

impl Cpu {
    /// Multiplier bounds are inclusive
    pub fn new(min_multiplier: u32, max_multiplier: u32, seed: u64) -> Self {
        Self::with_rng(min_multiplier, max_multiplier, Pcg32::seed_from_u64(seed))
    }

    /// # Panics
    ///
    /// Panics if `min_multiplier > max_multiplier`.
    pub fn with_rng(min_multiplier: u32, max_multiplier: u32, rng: Pcg32) -> Self {
        assert!(
            min_multiplier <= max_multiplier,
            "cpu multiplier range {min_multiplier}..={max_multiplier} is empty"
        );
        Self {
            min_multiplier,
            max_multiplier,
            has_sampled: false,
            held_multiplier: 1,
            rng,
        }
    }

    /// Multiplier held for the current approach, if one was drawn
    pub fn held_multiplier(&self) -> Option<u32> {
        self.has_sampled.then_some(self.held_multiplier)
    }

    /// Drop the held multiplier so the next approach draws a new one
    pub fn forget_sample(&mut self) {
        self.has_sampled = false;
    }

    fn multiplier(&mut self) -> u32 {
        if !self.has_sampled {
            self.held_multiplier = self
                .rng
                .random_range(self.min_multiplier..=self.max_multiplier);
            self.has_sampled = true;
            log::debug!("cpu speed multiplier {}", self.held_multiplier);
        }
        self.held_multiplier
    }

    /// Move `paddle` for one frame
    pub fn drive(&mut self, paddle: &mut Motion, ball: &Ball, delta: f32, play_height: f32) {
        let ball_velocity = ball.velocity();
        if ball_velocity.x <= 0.0 {
            // Ball is heading away
            self.forget_sample();
            return;
        }

        let paddle_center = paddle.bounds().center().y;
        let ball_center = ball.bounds().center().y;
        let chasing = (ball_velocity.y > 0.0 && paddle_center < ball_center)
            || (ball_velocity.y < 0.0 && paddle_center > ball_center);

        if chasing {
            paddle.set_acceleration_y(ball.acceleration().y);
        } else {
            paddle.set_acceleration_y(0.0);
        }

        let multiplier = self.multiplier() as f32;
        paddle.set_velocity_y(paddle.acceleration().y * delta * multiplier);
        paddle.set_bounds_y(paddle.bounds().y + paddle.velocity().y);
        paddle.clamp_y(0.0, play_height);
        paddle.set_position_y(paddle.bounds().y);
    }
}
