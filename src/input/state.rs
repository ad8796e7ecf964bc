//! Per-frame input state
//!
//! An [`InputSnapshot`] answers "is this action held right now". The
//! simulation keeps the previous frame's snapshot so it can tell a fresh
//! press (jump, debug toggle) from a held key.

use super::Action;

/// Which actions are held on a single frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    bits: u8,
}

impl InputSnapshot {
    /// Nothing held
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Builder: mark an action as held
    pub fn with(mut self, action: Action) -> Self {
        self.set(action, true);
        self
    }

    pub fn set(&mut self, action: Action, held: bool) {
        if held {
            self.bits |= action.bit();
        } else {
            self.bits &= !action.bit();
        }
    }

    /// Check if action is currently held down
    pub fn is_held(&self, action: Action) -> bool {
        self.bits & action.bit() != 0
    }

    /// Horizontal direction from the two movement actions: -1, 0 or +1.
    /// Holding both cancels out.
    pub fn horizontal(&self) -> f32 {
        let mut direction = 0.0;
        if self.is_held(Action::MoveLeft) {
            direction -= 1.0;
        }
        if self.is_held(Action::MoveRight) {
            direction += 1.0;
        }
        direction
    }
}

/// Current snapshot paired with the previous one, for edge detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputFrame {
    pub current: InputSnapshot,
    pub previous: InputSnapshot,
}

impl InputFrame {
    pub fn new(current: InputSnapshot, previous: InputSnapshot) -> Self {
        Self { current, previous }
    }

    pub fn is_held(&self, action: Action) -> bool {
        self.current.is_held(action)
    }

    /// Check if action was just pressed this frame
    pub fn pressed(&self, action: Action) -> bool {
        self.current.is_held(action) && !self.previous.is_held(action)
    }

    pub fn horizontal(&self) -> f32 {
        self.current.horizontal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear() {
        let mut snapshot = InputSnapshot::empty().with(Action::Fire).with(Action::Jump);
        assert!(snapshot.is_held(Action::Fire));
        assert!(snapshot.is_held(Action::Jump));
        assert!(!snapshot.is_held(Action::MoveLeft));

        snapshot.set(Action::Fire, false);
        assert!(!snapshot.is_held(Action::Fire));
        assert!(snapshot.is_held(Action::Jump));
    }

    #[test]
    fn test_horizontal_cancels_out() {
        let left = InputSnapshot::empty().with(Action::MoveLeft);
        let both = left.with(Action::MoveRight);
        assert_eq!(left.horizontal(), -1.0);
        assert_eq!(InputSnapshot::empty().with(Action::MoveRight).horizontal(), 1.0);
        assert_eq!(both.horizontal(), 0.0);
    }

    #[test]
    fn test_pressed_only_on_edge() {
        let held = InputSnapshot::empty().with(Action::Jump);
        assert!(InputFrame::new(held, InputSnapshot::empty()).pressed(Action::Jump));
        assert!(!InputFrame::new(held, held).pressed(Action::Jump));
        assert!(InputFrame::new(held, held).is_held(Action::Jump));
    }
}
