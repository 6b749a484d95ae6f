//! Logical input actions.
//!
//! The host maps physical keys to [`Action`]s and hands the simulator a
//! snapshot that stays fixed for one `advance` call.

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBack,
    TurnLeft,
    TurnRight,
    Fire,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::MoveForward,
        Action::MoveBack,
        Action::TurnLeft,
        Action::TurnRight,
        Action::Fire,
    ];

    #[inline]
    fn bit(self) -> u8 {
        1 << self as u8
    }
}

pub trait InputSource {
    fn is_pressed(&self, action: Action) -> bool;
}

/// Held-key state captured between frames.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: u8,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, action: Action) -> Self {
        self.set(action, true);
        self
    }

    pub fn set(&mut self, action: Action, down: bool) {
        if down {
            self.held |= action.bit();
        } else {
            self.held &= !action.bit();
        }
    }

    /// Captures the current state of any other source.
    pub fn capture(source: &impl InputSource) -> Self {
        let mut snap = Self::new();
        for action in Action::ALL {
            snap.set(action, source.is_pressed(action));
        }
        snap
    }
}

impl InputSource for InputSnapshot {
    #[inline]
    fn is_pressed(&self, action: Action) -> bool {
        self.held & action.bit() != 0
    }
}
