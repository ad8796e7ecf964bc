//! Simulation Runtime
//!
//! Owns the world and advances it one variable-length frame at a time. Each
//! frame:
//! 1. edge-detect input against the previous frame
//! 2. update characters, then projectiles, in index order
//! 3. move the camera to the player
//!
//! Per entity the order is fixed: flash timer, state machine, gravity,
//! integration, collision, landing, animation, projectile retirement.
//! Level tiles are static and never updated.
//!
//! The core accepts any delta time. Clamping long frames is the frame
//! driver's job (see `GameConfig::max_frame_delta`).

use std::fmt;
use macroquad::math::Vec2;
use tracing::debug;
use crate::assets::Assets;
use crate::config::GameConfig;
use crate::input::{Action, InputFrame, InputSnapshot};
use super::camera::Camera;
use super::collision::{CollisionResolver, CollisionRules, NaiveResolver};
use super::entity::{Entity, EntityKind, PlayerState};
use super::level::{self, LevelError, TileMap};
use super::world::{Layer, Slot, World};
use super::{enemy, physics, player, projectile};

/// Numbers shown by the debug overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugStats {
    pub player_state: PlayerState,
    pub active_projectiles: usize,
    pub grounded: bool,
}

impl fmt::Display for DebugStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "State: {} Bullets: {} G: {}",
            self.player_state.ordinal(),
            self.active_projectiles,
            u8::from(self.grounded)
        )
    }
}

pub struct Simulation {
    world: World,
    player: Slot,
    pub camera: Camera,
    config: GameConfig,
    resolver: Box<dyn CollisionResolver>,
    previous_input: InputSnapshot,
    /// Draw colliders and stats
    pub debug: bool,
    frame: u64,
}

impl Simulation {
    /// Build a simulation from map layers.
    pub fn new(maps: &[TileMap], assets: &Assets, config: GameConfig) -> Result<Self, LevelError> {
        let (world, player) = level::build_world(maps, assets, &config)?;
        Self::with_world(world, player, config)
    }

    /// Wrap an already populated world. `player` must address the player.
    pub fn with_world(world: World, player: Slot, config: GameConfig) -> Result<Self, LevelError> {
        let valid = player.layer == Layer::Characters
            && world.get(player).map(Entity::kind) == Some(EntityKind::Player);
        if !valid {
            return Err(LevelError::MissingPlayer);
        }

        let mut camera = Camera::new(config.logical_width, config.logical_height);
        if let Some(entity) = world.get(player) {
            camera.follow(entity.position);
        }
        Ok(Self {
            world,
            player,
            camera,
            config,
            resolver: Box::new(NaiveResolver),
            previous_input: InputSnapshot::empty(),
            debug: false,
            frame: 0,
        })
    }

    /// Swap the collision strategy.
    pub fn with_resolver(mut self, resolver: impl CollisionResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player_slot(&self) -> Slot {
        self.player
    }

    pub fn player(&self) -> &Entity {
        &self.world.layer(Layer::Characters)[self.player.index]
    }

    /// Frames simulated so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn stats(&self) -> DebugStats {
        let player = self.player();
        DebugStats {
            player_state: player.player().map_or(PlayerState::Idle, |p| p.state),
            active_projectiles: self.world.active_projectiles(),
            grounded: player.grounded,
        }
    }

    /// Advance one frame.
    pub fn update(&mut self, delta_time: f32, input: &InputSnapshot, assets: &Assets) {
        let frame = InputFrame::new(*input, self.previous_input);
        self.previous_input = *input;

        if frame.pressed(Action::ToggleDebug) {
            self.debug = !self.debug;
            debug!("debug overlay {}", if self.debug { "on" } else { "off" });
        }

        for layer in [Layer::Characters, Layer::Projectiles] {
            // Firing can append projectiles mid-frame; they update this frame too
            let mut index = 0;
            while index < self.world.len(layer) {
                self.update_entity(Slot::new(layer, index), &frame, delta_time, assets);
                index += 1;
            }
        }

        let target = self.player().position;
        self.camera.follow(target);
        self.frame += 1;
    }

    fn update_entity(&mut self, slot: Slot, input: &InputFrame, delta_time: f32, assets: &Assets) {
        let player_position = self.player().position;
        let gravity = Vec2::new(0.0, self.config.gravity);
        let rules = CollisionRules {
            projectile_damage: self.config.projectile_damage,
        };

        let Some(entity) = self.world.get_mut(slot) else {
            return;
        };
        if entity.is_inactive() {
            return;
        }

        if entity.should_flash && entity.flash_timer.step(delta_time) {
            entity.should_flash = false;
        }

        let mut fired = None;
        let direction = match entity.kind() {
            EntityKind::Player => {
                let step = player::step(entity, input, delta_time, assets, &self.config);
                fired = step.fired;
                step.direction
            }
            EntityKind::Enemy => enemy::step(entity, player_position, delta_time, &self.config),
            EntityKind::Level | EntityKind::Projectile => 0.0,
        };

        physics::apply_gravity(entity, gravity, delta_time);
        physics::integrate(entity, direction, delta_time);

        let contacts = self.resolver.resolve(&mut self.world, slot, &rules);

        if let Some(entity) = self.world.get_mut(slot) {
            if contacts.on_ground != entity.grounded {
                entity.grounded = contacts.on_ground;
                if contacts.on_ground {
                    player::land(entity);
                }
            }
            entity.step_animation(delta_time);
            if entity.kind() == EntityKind::Projectile {
                projectile::update_state(entity, &self.camera);
            }
        }

        if let Some(bullet) = fired {
            self.world.spawn_projectile(bullet);
        }
    }
}
