//! RUNNGUN: a small 2D run-and-gun platformer
//!
//! The player runs, jumps, slides and shoots across a tile map while
//! enemies shamble toward them. The library holds the whole simulation;
//! the binary only samples the keyboard, clamps the frame time and draws.
//! - Fixed logical resolution (640x320), letterboxed into the window
//! - Axis-aligned box collision with minimum-penetration push-out
//! - State machines for the player, enemies and projectiles

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod animation;
pub mod assets;
pub mod config;
pub mod game;
pub mod input;
pub mod timer;
