//! Simulation module
//!
//! All gameplay logic lives here. It is driven only through a delta time and
//! player input:
//! - No rendering or platform dependencies
//! - Seeded RNG only (the CPU opponent)
//! - Sound is reported through an injected sink

pub mod ball;
pub mod body;
pub mod clock;
pub mod cpu;
pub mod paddle;
pub mod rect;
pub mod score;
pub mod session;
pub mod world;

pub use ball::{Ball, WorldEvents, WorldQuery};
pub use body::Motion;
pub use clock::FixedStep;
pub use cpu::Cpu;
pub use paddle::{Driver, Paddle, Side};
pub use rect::{Block, Rect};
pub use score::ScoreBitmap;
pub use session::{Input, MenuItem, Outcome, Session};
pub use world::{PaddleView, Snapshot, State, World};
