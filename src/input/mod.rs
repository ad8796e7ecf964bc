//! Input handling
//!
//! The simulation never talks to a platform input API. The frame driver
//! samples the keyboard once per frame into an [`InputSnapshot`] keyed by
//! logical [`Action`], and the simulation derives key-down edges by comparing
//! against the previous frame's snapshot.

mod actions;
mod keyboard;
mod state;

pub use actions::*;
pub use keyboard::sample_keyboard;
pub use state::*;
