//! Debounced button input
//!
//! Raw button levels chatter for a few milliseconds after each press or
//! release. A level only becomes the stable state once it has held for the
//! settle window; the sim only ever sees stable state.

use crate::platform::ButtonSource;
use crate::sim::TickInput;

/// Logical buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
}

impl Button {
    pub const ALL: [Button; 4] = [Button::Up, Button::Down, Button::Left, Button::Right];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Debounce record for one button
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Last sampled level
    pub raw: bool,
    /// Accepted level
    pub stable: bool,
    /// When `raw` last changed
    pub last_change_ms: u64,
}

impl ButtonState {
    /// Feed one raw sample. Returns true if the stable level changed.
    pub fn update(&mut self, raw: bool, now_ms: u64, settle_ms: u64) -> bool {
        if raw != self.raw {
            self.raw = raw;
            self.last_change_ms = now_ms;
        }
        if self.stable != self.raw && now_ms.saturating_sub(self.last_change_ms) >= settle_ms {
            self.stable = self.raw;
            return true;
        }
        false
    }
}

/// Debounce state for every logical button
#[derive(Debug, Clone)]
pub struct ButtonBank {
    states: [ButtonState; 4],
    settle_ms: u64,
}

impl ButtonBank {
    pub fn new(settle_ms: u64) -> Self {
        Self {
            states: [ButtonState::default(); 4],
            settle_ms,
        }
    }

    /// Sample every button once and return the debounced levels
    pub fn poll<S: ButtonSource + ?Sized>(&mut self, source: &mut S, now_ms: u64) -> TickInput {
        for button in Button::ALL {
            let raw = source.is_pressed(button);
            if self.states[button.index()].update(raw, now_ms, self.settle_ms) {
                log::debug!("{:?} -> {}", button, raw);
            }
        }
        self.input()
    }

    /// Debounced level of one button
    pub fn is_pressed(&self, button: Button) -> bool {
        self.states[button.index()].stable
    }

    pub fn state(&self, button: Button) -> &ButtonState {
        &self.states[button.index()]
    }

    /// Current debounced levels as sim input
    pub fn input(&self) -> TickInput {
        TickInput {
            up: self.is_pressed(Button::Up),
            down: self.is_pressed(Button::Down),
            left: self.is_pressed(Button::Left),
            right: self.is_pressed(Button::Right),
        }
    }
}
