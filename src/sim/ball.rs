//! Ball physics: speed-up over a rally, paddle and wall reflection, scoring
//!
//! The ball has no reference to the world. Each update gets a read-only
//! [`WorldQuery`] for the geometry it collides with and a [`WorldEvents`]
//! receiver for what happened.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Motion;
use super::paddle::Side;
use super::rect::{Block, Rect};

/// Geometry the ball needs from the world
pub trait WorldQuery {
    fn paddle_bounds(&self, side: Side) -> Rect;
    fn walls(&self) -> &[Block];
    fn play_width(&self) -> f32;
}

/// Things the ball reports back to the world
pub trait WorldEvents {
    fn paddle_hit(&mut self);
    fn wall_hit(&mut self);
    /// The ball left the field; `scorer` gets the point
    fn scored(&mut self, scorer: Side);
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    motion: Motion,
    /// Speed-up per second of rally time
    velocity_ratio: f32,
}

impl Ball {
    pub fn new(position: Vec2, size: f32, acceleration: f32, velocity_ratio: f32) -> Self {
        let mut ball = Self {
            motion: Motion::new(position.x, position.y, size, size),
            velocity_ratio,
        };
        ball.set_acceleration(-acceleration);
        ball
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

    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.motion.velocity()
    }

    #[inline]
    pub fn acceleration(&self) -> Vec2 {
        self.motion.acceleration()
    }

    /// Serve direction: horizontal acceleration is `value`, vertical is `-|value|`
    pub fn set_acceleration(&mut self, value: f32) {
        self.motion.set_acceleration(Vec2::new(value, -value.abs()));
    }

    /// Put the ball at a start point and restart its rally clock
    pub fn reset(&mut self, x: f32, y: f32) {
        self.motion.set_position(x, y);
        self.motion.reset_state_time();
    }

    /// Speed multiplier for the current rally time
    pub fn speed_scale(&self) -> f32 {
        1.0 + self.motion.state_time() * self.velocity_ratio
    }

    /// Advance one frame
    pub fn update(&mut self, delta: f32, world: &impl WorldQuery, events: &mut impl WorldEvents) {
        self.motion.tick(delta);
        let scale = self.speed_scale();
        self.motion.integrate(delta, scale);

        // Paddles before walls so a ball wedged in a corner resolves on the paddle
        for side in [Side::Left, Side::Right] {
            self.collide_paddle(&world.paddle_bounds(side), events);
        }
        for wall in world.walls() {
            self.collide_wall(wall.bounds(), events);
        }

        self.motion.sync_position();
        self.check_field(world.play_width(), events);
    }

    fn collide_paddle(&mut self, paddle: &Rect, events: &mut impl WorldEvents) {
        if !self.motion.bounds().overlaps(paddle) {
            return;
        }

        let velocity = self.motion.velocity();
        let mut acceleration = self.motion.acceleration();
        let bounds = self.motion.bounds_mut();

        if velocity.x < 0.0 && bounds.x > paddle.x {
            // Moving left into a paddle face: bounce right
            bounds.x = paddle.right();
            acceleration.x = -acceleration.x;
        } else if velocity.x > 0.0 && bounds.x < paddle.right() {
            // Moving right into a paddle face: bounce left
            bounds.x = paddle.x - bounds.width;
            acceleration.x = -acceleration.x;
        } else if (bounds.y > paddle.y && velocity.y < 0.0)
            || (bounds.y < paddle.y && velocity.y > 0.0)
        {
            // Top or bottom of the paddle
            acceleration.y = -acceleration.y;
        }

        self.motion.set_acceleration(acceleration);
        log::trace!("ball hit paddle at {:?}", self.motion.bounds().origin());
        events.paddle_hit();
    }

    fn collide_wall(&mut self, wall: &Rect, events: &mut impl WorldEvents) {
        if !self.motion.bounds().overlaps(wall) {
            return;
        }

        let velocity = self.motion.velocity();
        let bounds = self.motion.bounds_mut();
        if velocity.y < 0.0 {
            bounds.y = wall.top();
        } else if velocity.y > 0.0 {
            bounds.y = wall.y - bounds.height;
        }

        let acceleration = self.motion.acceleration();
        self.motion.set_acceleration_y(-acceleration.y);
        log::trace!("ball hit wall at {:?}", self.motion.bounds().origin());
        events.wall_hit();
    }

    fn check_field(&self, play_width: f32, events: &mut impl WorldEvents) {
        let position = self.motion.position();
        if position.x + self.motion.bounds().width < 0.0 {
            events.scored(Side::Right);
        } else if position.x > play_width {
            events.scored(Side::Left);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Field {
        left: Rect,
        right: Rect,
        walls: Vec<Block>,
    }

    impl Default for Field {
        fn default() -> Self {
            Self {
                left: Rect::new(8.0, 104.0, 8.0, 32.0),
                right: Rect::new(384.0, 104.0, 8.0, 32.0),
                walls: vec![
                    Block::new(16.0, 0.0, 368.0, 8.0),
                    Block::new(16.0, 232.0, 368.0, 8.0),
                ],
            }
        }
    }

    impl WorldQuery for Field {
        fn paddle_bounds(&self, side: Side) -> Rect {
            match side {
                Side::Left => self.left,
                Side::Right => self.right,
            }
        }

        fn walls(&self) -> &[Block] {
            &self.walls
        }

        fn play_width(&self) -> f32 {
            400.0
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Hit {
        Paddle,
        Wall,
    }

    #[derive(Default)]
    struct Recorder {
        paddle_hits: u32,
        wall_hits: u32,
        hits: Vec<Hit>,
        scored: Vec<Side>,
    }

    impl WorldEvents for Recorder {
        fn paddle_hit(&mut self) {
            self.paddle_hits += 1;
            self.hits.push(Hit::Paddle);
        }

        fn wall_hit(&mut self) {
            self.wall_hits += 1;
            self.hits.push(Hit::Wall);
        }

        fn scored(&mut self, scorer: Side) {
            self.scored.push(scorer);
        }
    }

    fn ball_at(x: f32, y: f32, acceleration: Vec2) -> Ball {
        let mut ball = Ball::new(Vec2::new(x, y), 8.0, 100.0, 0.1);
        ball.motion.set_acceleration(acceleration);
        ball
    }

    #[test]
    fn test_new_ball_serves_left_and_down() {
        let ball = Ball::new(Vec2::new(196.0, 104.0), 8.0, 100.0, 0.1);
        assert_eq!(ball.acceleration(), Vec2::new(-100.0, -100.0));
    }

    #[test]
    fn test_set_acceleration_biases_down() {
        let mut ball = Ball::new(Vec2::ZERO, 8.0, 100.0, 0.1);
        ball.set_acceleration(100.0);
        assert_eq!(ball.acceleration(), Vec2::new(100.0, -100.0));
        ball.set_acceleration(-100.0);
        assert_eq!(ball.acceleration(), Vec2::new(-100.0, -100.0));
    }

    #[test]
    fn test_speed_scale_grows_with_rally_time() {
        let field = Field::default();
        let mut events = Recorder::default();
        let mut ball = ball_at(200.0, 120.0, Vec2::new(100.0, 0.0));

        ball.update(0.5, &field, &mut events);
        // state_time 0.5 -> scale 1.05
        assert!((ball.velocity().x - 100.0 * 0.5 * 1.05).abs() < 1e-4);
        assert!(ball.speed_scale() > 1.0);

        ball.reset(200.0, 120.0);
        assert_eq!(ball.speed_scale(), 1.0);
        assert_eq!(ball.position(), Vec2::new(200.0, 120.0));
    }

    #[test]
    fn test_position_mirrors_bounds_after_update() {
        let field = Field::default();
        let mut events = Recorder::default();
        let mut ball = ball_at(200.0, 120.0, Vec2::new(-100.0, -100.0));

        ball.update(0.016, &field, &mut events);
        assert_eq!(ball.position(), ball.bounds().origin());
    }

    #[test]
    fn test_bounces_off_left_paddle_face() {
        let field = Field::default();
        let mut events = Recorder::default();
        // One frame left moves the ball 1 unit into the paddle (right edge at 16)
        let mut ball = ball_at(16.5, 116.0, Vec2::new(-100.0, 0.0));

        ball.update(0.015, &field, &mut events);

        assert!(ball.velocity().x < 0.0);
        assert_eq!(ball.bounds().x, field.left.right());
        assert_eq!(ball.acceleration().x, 100.0);
        assert_eq!(events.paddle_hits, 1);
    }

    #[test]
    fn test_bounces_off_right_paddle_face() {
        let field = Field::default();
        let mut events = Recorder::default();
        let mut ball = ball_at(375.5, 116.0, Vec2::new(100.0, 0.0));

        ball.update(0.015, &field, &mut events);

        assert_eq!(ball.bounds().x, field.right.x - 8.0);
        assert_eq!(ball.acceleration().x, -100.0);
        assert_eq!(events.paddle_hits, 1);
    }

    #[test]
    fn test_paddle_top_flips_vertical_only() {
        let field = Field::default();
        let mut events = Recorder::default();
        // Behind the left paddle's face (x <= paddle.x) falling onto its top
        let mut ball = ball_at(7.0, 136.5, Vec2::new(-100.0, -100.0));

        ball.update(0.015, &field, &mut events);

        assert_eq!(ball.acceleration(), Vec2::new(-100.0, 100.0));
        assert_eq!(events.paddle_hits, 1);
    }

    #[test]
    fn test_bounces_off_bottom_wall() {
        let field = Field::default();
        let mut events = Recorder::default();
        let mut ball = ball_at(200.0, 8.5, Vec2::new(100.0, -100.0));

        ball.update(0.015, &field, &mut events);

        assert_eq!(ball.bounds().y, 8.0);
        assert_eq!(ball.position().y, 8.0);
        assert_eq!(ball.acceleration().y, 100.0);
        assert_eq!(events.wall_hits, 1);
    }

    #[test]
    fn test_bounces_off_top_wall() {
        let field = Field::default();
        let mut events = Recorder::default();
        let mut ball = ball_at(200.0, 223.5, Vec2::new(100.0, 100.0));

        ball.update(0.015, &field, &mut events);

        assert_eq!(ball.bounds().y, 224.0);
        assert_eq!(ball.acceleration().y, -100.0);
        assert_eq!(events.wall_hits, 1);
    }

    #[test]
    fn test_corner_resolves_paddle_before_wall() {
        // Left paddle resting on the bottom wall's level
        let field = Field {
            left: Rect::new(8.0, 0.0, 8.0, 32.0),
            ..Field::default()
        };
        let mut events = Recorder::default();
        let mut ball = ball_at(16.5, 8.5, Vec2::new(-100.0, -100.0));

        ball.update(0.015, &field, &mut events);

        assert_eq!(events.hits, vec![Hit::Paddle, Hit::Wall]);
        assert_eq!(ball.bounds().origin(), Vec2::new(16.0, 8.0));
        assert_eq!(ball.acceleration(), Vec2::new(100.0, 100.0));
        assert_eq!(ball.position(), ball.bounds().origin());
    }

    #[test]
    fn test_no_events_in_open_field() {
        let field = Field::default();
        let mut events = Recorder::default();
        let mut ball = ball_at(200.0, 120.0, Vec2::new(100.0, -100.0));

        ball.update(0.016, &field, &mut events);

        assert_eq!(events.paddle_hits, 0);
        assert_eq!(events.wall_hits, 0);
        assert!(events.scored.is_empty());
    }

    #[test]
    fn test_right_scores_when_ball_leaves_left() {
        let field = Field::default();
        let mut events = Recorder::default();
        let mut ball = ball_at(-7.5, 60.0, Vec2::new(-100.0, 0.0));

        ball.update(0.015, &field, &mut events);
        assert_eq!(events.scored, vec![Side::Right]);
    }

    #[test]
    fn test_left_scores_when_ball_leaves_right() {
        let field = Field::default();
        let mut events = Recorder::default();
        let mut ball = ball_at(399.5, 60.0, Vec2::new(100.0, 0.0));

        ball.update(0.015, &field, &mut events);
        assert_eq!(events.scored, vec![Side::Left]);
    }
}
