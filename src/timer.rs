//! Restartable countdown
//!
//! Used both for animation playback and for gameplay cooldowns (weapon fire
//! rate, enemy stagger, damage flash). The timer never resets itself to zero
//! on timeout: it subtracts its length once so the remainder carries into the
//! next cycle and long runs don't drift.

/// Elapsed-time accumulator with a fixed length and a sticky timeout flag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timer {
    length: f32,
    time: f32,
    timed_out: bool,
}

impl Timer {
    /// Create a timer that times out every `length` seconds.
    /// `length` must be positive.
    pub fn new(length: f32) -> Self {
        debug_assert!(length > 0.0, "timer length must be positive, got {length}");
        Self {
            length,
            time: 0.0,
            timed_out: false,
        }
    }

    /// Advance by `delta_time` seconds.
    /// Returns true if the timer timed out on this call.
    pub fn step(&mut self, delta_time: f32) -> bool {
        self.time += delta_time;
        // Don't reset to 0 - keep the remainder
        if self.time >= self.length {
            self.time -= self.length;
            self.timed_out = true;
            return true;
        }
        false
    }

    /// Has the timer timed out at least once since the last reset?
    pub fn is_timeout(&self) -> bool {
        self.timed_out
    }

    /// Elapsed time within the current cycle
    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    /// Zero the elapsed time and clear the timeout flag.
    pub fn reset(&mut self) {
        self.time = 0.0;
        self.timed_out = false;
    }
}
