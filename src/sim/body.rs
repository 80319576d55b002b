//! Shared motion state for moving bodies
//!
//! Ball and paddle both embed a [`Motion`] and apply their own rules on top of
//! the integration primitives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Position, velocity, acceleration and bounds of a moving body
///
/// `position` mirrors the bounds origin once an update completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    bounds: Rect,
    position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
    /// Seconds since the last reset
    state_time: f32,
}

impl Motion {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            bounds: Rect::new(x, y, width, height),
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            state_time: 0.0,
        }
    }

    #[inline]
    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    #[inline]
    pub(crate) fn bounds_mut(&mut self) -> &mut Rect {
        &mut self.bounds
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    #[inline]
    pub fn state_time(&self) -> f32 {
        self.state_time
    }

    /// Move bounds and position together
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.bounds.x = x;
        self.bounds.y = y;
        self.position = Vec2::new(x, y);
    }

    pub fn set_position_y(&mut self, y: f32) {
        self.position.y = y;
    }

    pub fn set_bounds_y(&mut self, y: f32) {
        self.bounds.y = y;
    }

    pub fn set_acceleration(&mut self, acceleration: Vec2) {
        self.acceleration = acceleration;
    }

    pub fn set_acceleration_y(&mut self, y: f32) {
        self.acceleration.y = y;
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    pub fn set_velocity_y(&mut self, y: f32) {
        self.velocity.y = y;
    }

    /// Advance the state clock
    pub fn tick(&mut self, delta: f32) {
        self.state_time += delta;
    }

    pub fn reset_state_time(&mut self) {
        self.state_time = 0.0;
    }

    /// Derive velocity from acceleration and move the bounds by it
    ///
    /// Velocity here is a per-frame displacement: `acceleration * delta * scale`.
    /// Position is left untouched until [`Motion::sync_position`].
    pub fn integrate(&mut self, delta: f32, scale: f32) {
        self.velocity = self.acceleration * delta * scale;
        self.bounds.x += self.velocity.x;
        self.bounds.y += self.velocity.y;
    }

    /// Keep the bounds inside `[min_y, max_y - height]` vertically
    pub fn clamp_y(&mut self, min_y: f32, max_y: f32) {
        if self.bounds.top() > max_y {
            self.bounds.y = max_y - self.bounds.height;
        } else if self.bounds.y < min_y {
            self.bounds.y = min_y;
        }
    }

    /// Mirror the bounds origin into `position`
    pub fn sync_position(&mut self) {
        self.position = self.bounds.origin();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_scales_with_delta() {
        let mut motion = Motion::new(10.0, 10.0, 8.0, 8.0);
        motion.set_acceleration(Vec2::new(100.0, -50.0));

        motion.integrate(0.5, 2.0);

        assert_eq!(motion.velocity(), Vec2::new(100.0, -50.0));
        assert_eq!(motion.bounds().origin(), Vec2::new(110.0, -40.0));
        // Position lags until synced
        assert_eq!(motion.position(), Vec2::new(10.0, 10.0));

        motion.sync_position();
        assert_eq!(motion.position(), Vec2::new(110.0, -40.0));
    }

    #[test]
    fn test_clamp_y() {
        let mut motion = Motion::new(0.0, -5.0, 8.0, 32.0);
        motion.clamp_y(0.0, 240.0);
        assert_eq!(motion.bounds().y, 0.0);

        motion.set_bounds_y(230.0);
        motion.clamp_y(0.0, 240.0);
        assert_eq!(motion.bounds().y, 208.0);
    }

    #[test]
    fn test_state_time() {
        let mut motion = Motion::new(0.0, 0.0, 1.0, 1.0);
        motion.tick(0.25);
        motion.tick(0.25);
        assert_eq!(motion.state_time(), 0.5);
        motion.reset_state_time();
        assert_eq!(motion.state_time(), 0.0);
    }
}
