//! Game Simulation
//!
//! A 2D side-scroller core: entities, physics, collision and per-kind state
//! machines, advanced one variable-length frame at a time by [`Simulation`].
//!
//! Key concepts:
//! - Entity: shared spatial/render state plus a tagged per-kind state
//! - World: level tiles, characters and projectiles in fixed update order
//! - Slot: stable address of an entity in the world
//!
//! Everything except `renderer` is independent of the window and can run
//! headless in tests.

pub mod camera;
pub mod collision;
pub mod enemy;
pub mod entity;
pub mod level;
pub mod physics;
pub mod player;
pub mod projectile;
pub mod rect;
pub mod renderer;
pub mod runtime;
pub mod world;

// Re-export main types
pub use camera::Camera;
pub use collision::{CollisionResolver, NaiveResolver};
pub use entity::{Entity, EntityKind, TypeState};
pub use level::{LevelError, TileMap};
pub use rect::Rect;
pub use runtime::{DebugStats, Simulation};
pub use world::{Layer, Slot, World};
