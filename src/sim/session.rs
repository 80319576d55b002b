//! Frame driver and input routing on top of a [`World`]
//!
//! Mirrors what a game screen does each frame: update the world while it is
//! live, consume score changes, and acknowledge the end of a round. Input
//! arrives already decoded (a drag amount, a back press, a tap on a menu item).

use super::world::World;
use crate::audio::{Silent, SoundSink};

/// Items on the pause and end-of-round menus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Resume,
    NewGame,
}

const PAUSE_MENU: [MenuItem; 2] = [MenuItem::Resume, MenuItem::NewGame];
const END_MENU: [MenuItem; 1] = [MenuItem::NewGame];

/// Decoded player input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Input {
    /// Back key: toggles pause
    Back,
    /// Vertical drag by a signed amount
    Drag(f32),
    /// Tap, with the menu item under it if any
    Tap(Option<MenuItem>),
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// A world plus the rules for driving it
#[derive(Debug)]
pub struct Session<S: SoundSink = Silent> {
    world: World<S>,
}

impl<S: SoundSink> Session<S> {
    pub fn new(world: World<S>) -> Self {
        Self { world }
    }

    pub fn world(&self) -> &World<S> {
        &self.world
    }

    pub fn into_world(self) -> World<S> {
        self.world
    }

    /// Run one frame; returns the outcome on the frame a round finishes
    pub fn tick(&mut self, delta: f32) -> Option<Outcome> {
        if !(self.world.is_resumed() || self.world.is_ready()) {
            return None;
        }

        self.world.update(delta);

        if !self.world.is_score_changed() {
            return None;
        }
        self.world.reset_score_changed();

        if !self.world.is_ending() {
            return None;
        }

        let outcome = if self.world.is_game_over() {
            Outcome::Lost
        } else {
            Outcome::Won
        };
        self.world.end();
        log::info!("Round finished: {:?}", outcome);
        Some(outcome)
    }

    /// Apply one input event
    pub fn handle(&mut self, input: Input) {
        match input {
            Input::Back => {
                self.world.press_button();
                if self.world.is_resumed() {
                    self.world.pause();
                } else if self.world.is_paused() {
                    self.world.resume();
                }
            }
            Input::Drag(amount) => {
                if self.world.is_resumed() {
                    self.world.move_paddle1(amount);
                }
            }
            Input::Tap(item) => self.tap(item),
        }
    }

    fn tap(&mut self, item: Option<MenuItem>) {
        if self.world.is_ready() {
            self.world.resume();
            return;
        }

        let Some(item) = item else { return };
        if !self.menu().contains(&item) {
            return;
        }

        self.world.press_button();
        match item {
            MenuItem::Resume => self.world.resume(),
            MenuItem::NewGame => self.world.new_game(),
        }
    }

    /// Menu items currently on screen
    pub fn menu(&self) -> &'static [MenuItem] {
        if self.world.is_paused() {
            &PAUSE_MENU
        } else if self.world.is_end() {
            &END_MENU
        } else {
            &[]
        }
    }
}
