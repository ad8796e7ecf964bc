//! Sprite-sheet animation clock
//!
//! Maps elapsed time onto a looping frame index. Each entity owns its own
//! copies of the animations it can play, so their clocks advance
//! independently.

use crate::timer::Timer;

/// Static description of an animation: how many frames and how long one
/// full cycle lasts. Used to build the per-entity [`Animation`] clocks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationDef {
    pub frames: u32,
    /// Cycle length in seconds
    pub length: f32,
}

impl AnimationDef {
    pub const fn new(frames: u32, length: f32) -> Self {
        Self { frames, length }
    }

    /// Create a fresh animation clock from this description.
    pub fn build(&self) -> Animation {
        Animation::new(self.frames, self.length)
    }
}

/// A looping animation driven by a [`Timer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    timer: Timer,
    frame_count: u32,
}

impl Animation {
    pub fn new(frame_count: u32, length: f32) -> Self {
        debug_assert!(frame_count >= 1, "animation needs at least one frame");
        Self {
            timer: Timer::new(length),
            frame_count,
        }
    }

    /// Frame index for the current point in the cycle, in `0..frame_count`.
    pub fn current_frame(&self) -> u32 {
        let frame = (self.timer.time() / self.timer.length() * self.frame_count as f32) as u32;
        // Float error can land exactly on the cycle length before the wrap
        frame.min(self.frame_count - 1)
    }

    pub fn step(&mut self, delta_time: f32) {
        self.timer.step(delta_time);
    }

    /// True once the animation has played through at least one full cycle.
    pub fn is_done(&self) -> bool {
        self.timer.is_timeout()
    }

    /// Restart from frame 0.
    pub fn reset(&mut self) {
        self.timer.reset();
    }

    pub fn length(&self) -> f32 {
        self.timer.length()
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }
}
