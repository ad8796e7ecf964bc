//! Entity Model
//!
//! Every game object (level tile, player, enemy, projectile) is one
//! [`Entity`]: shared spatial and render state plus a closed [`TypeState`]
//! enum carrying the per-kind state machine data. The kind is derived from
//! the active variant, so the two can never disagree, and kind-specific data
//! is only reachable through a match or a checked accessor.

use std::fmt;
use macroquad::math::Vec2;
use thiserror::Error;
use crate::animation::Animation;
use crate::assets::TextureKey;
use crate::timer::Timer;
use super::rect::Rect;

/// Seconds between player shots
pub const WEAPON_COOLDOWN: f32 = 0.1;
/// Seconds an enemy stays staggered after a hit
pub const DAMAGE_COOLDOWN: f32 = 0.5;
/// Seconds the damage tint stays on
pub const FLASH_DURATION: f32 = 0.05;
pub const ENEMY_HEALTH: u32 = 100;

/// Discriminant of [`TypeState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Level,
    Player,
    Enemy,
    Projectile,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityKind::Level => "level",
            EntityKind::Player => "player",
            EntityKind::Enemy => "enemy",
            EntityKind::Projectile => "projectile",
        };
        f.write_str(label)
    }
}

/// Errors from misusing an entity. These are programming errors: the
/// simulation itself never produces them.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EntityError {
    #[error("expected {expected} entity, found {found}")]
    WrongKind { expected: EntityKind, found: EntityKind },
    #[error("animation index {index} out of range ({count} animations)")]
    AnimationOutOfRange { index: usize, count: usize },
}

// =============================================================================
// Per-kind state
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    Idle,
    Running,
    Jumping,
}

impl PlayerState {
    /// Stable number for the debug overlay
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerData {
    pub state: PlayerState,
    pub weapon_cooldown: Timer,
}

impl Default for PlayerData {
    fn default() -> Self {
        Self {
            state: PlayerState::Idle,
            weapon_cooldown: Timer::new(WEAPON_COOLDOWN),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    Shambling,
    Damaged,
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyData {
    pub state: EnemyState,
    pub damage_cooldown: Timer,
    pub health: u32,
}

impl Default for EnemyData {
    fn default() -> Self {
        Self {
            state: EnemyState::Shambling,
            damage_cooldown: Timer::new(DAMAGE_COOLDOWN),
            health: ENEMY_HEALTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileState {
    Moving,
    Colliding,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileData {
    pub state: ProjectileState,
}

impl Default for ProjectileData {
    fn default() -> Self {
        Self { state: ProjectileState::Moving }
    }
}

/// Kind-specific state. Exactly one variant is live per entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TypeState {
    Level,
    Player(PlayerData),
    Enemy(EnemyData),
    Projectile(ProjectileData),
}

impl TypeState {
    pub fn kind(&self) -> EntityKind {
        match self {
            TypeState::Level => EntityKind::Level,
            TypeState::Player(_) => EntityKind::Player,
            TypeState::Enemy(_) => EntityKind::Enemy,
            TypeState::Projectile(_) => EntityKind::Projectile,
        }
    }
}

// =============================================================================
// Entity
// =============================================================================

/// A game object.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Kind-specific state machine data
    pub data: TypeState,

    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    /// +1 facing right, -1 facing left. Flips the sprite.
    pub facing: f32,
    /// Clamp applied to |velocity.x|
    pub max_speed_x: f32,

    animations: Vec<Animation>,
    current_animation: Option<usize>,
    /// Frame drawn when no animation is playing
    pub rest_frame: u32,
    pub texture: TextureKey,

    /// Collider relative to `position`
    pub collider: Rect,
    /// Affected by gravity
    pub dynamic: bool,
    /// Standing on level geometry (from last frame's ground sensor)
    pub grounded: bool,

    pub flash_timer: Timer,
    pub should_flash: bool,
}

impl Entity {
    /// Create an entity at the origin with no animations.
    pub fn new(data: TypeState, texture: TextureKey) -> Self {
        Self {
            data,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            facing: 1.0,
            max_speed_x: 0.0,
            animations: Vec::new(),
            current_animation: None,
            rest_frame: 0,
            texture,
            collider: Rect::default(),
            dynamic: false,
            grounded: false,
            flash_timer: Timer::new(FLASH_DURATION),
            should_flash: false,
        }
    }

    /// A static level tile covering its whole texture.
    pub fn tile(position: Vec2, size: f32, texture: TextureKey) -> Self {
        let mut tile = Self::new(TypeState::Level, texture);
        tile.position = position;
        tile.collider = Rect::new(0.0, 0.0, size, size);
        tile
    }

    pub fn with_position(mut self, position: Vec2) -> Self {
        self.position = position;
        self
    }

    pub fn with_collider(mut self, collider: Rect) -> Self {
        self.collider = collider;
        self
    }

    /// Attach an animation set and start playing `current`.
    pub fn with_animations(mut self, animations: Vec<Animation>, current: usize) -> Self {
        self.current_animation = (current < animations.len()).then_some(current);
        self.animations = animations;
        self
    }

    pub fn kind(&self) -> EntityKind {
        self.data.kind()
    }

    fn wrong_kind(&self, expected: EntityKind) -> EntityError {
        EntityError::WrongKind { expected, found: self.kind() }
    }

    pub fn player(&self) -> Result<&PlayerData, EntityError> {
        match &self.data {
            TypeState::Player(player) => Ok(player),
            _ => Err(self.wrong_kind(EntityKind::Player)),
        }
    }

    pub fn player_mut(&mut self) -> Result<&mut PlayerData, EntityError> {
        let found = self.kind();
        match &mut self.data {
            TypeState::Player(player) => Ok(player),
            _ => Err(EntityError::WrongKind { expected: EntityKind::Player, found }),
        }
    }

    pub fn enemy(&self) -> Result<&EnemyData, EntityError> {
        match &self.data {
            TypeState::Enemy(enemy) => Ok(enemy),
            _ => Err(self.wrong_kind(EntityKind::Enemy)),
        }
    }

    pub fn enemy_mut(&mut self) -> Result<&mut EnemyData, EntityError> {
        let found = self.kind();
        match &mut self.data {
            TypeState::Enemy(enemy) => Ok(enemy),
            _ => Err(EntityError::WrongKind { expected: EntityKind::Enemy, found }),
        }
    }

    pub fn projectile(&self) -> Result<&ProjectileData, EntityError> {
        match &self.data {
            TypeState::Projectile(projectile) => Ok(projectile),
            _ => Err(self.wrong_kind(EntityKind::Projectile)),
        }
    }

    pub fn projectile_mut(&mut self) -> Result<&mut ProjectileData, EntityError> {
        let found = self.kind();
        match &mut self.data {
            TypeState::Projectile(projectile) => Ok(projectile),
            _ => Err(EntityError::WrongKind { expected: EntityKind::Projectile, found }),
        }
    }

    /// Inactive projectiles stay in their collection for slot reuse but are
    /// skipped by update, collision and drawing.
    pub fn is_inactive(&self) -> bool {
        matches!(
            self.data,
            TypeState::Projectile(ProjectileData { state: ProjectileState::Inactive })
        )
    }

    // =========================================================================
    // Animation
    // =========================================================================

    pub fn animations(&self) -> &[Animation] {
        &self.animations
    }

    pub fn current_animation(&self) -> Option<usize> {
        self.current_animation
    }

    /// Select the animation to play, or None to show `rest_frame`.
    pub fn set_animation(&mut self, index: Option<usize>) -> Result<(), EntityError> {
        if let Some(index) = index {
            if index >= self.animations.len() {
                return Err(EntityError::AnimationOutOfRange {
                    index,
                    count: self.animations.len(),
                });
            }
        }
        self.current_animation = index;
        Ok(())
    }

    /// Select an animation and a texture together, as every state change
    /// does. Animation sets are checked against the `anim` slots at level
    /// load, so an out-of-range index here is a bug.
    pub(crate) fn show(&mut self, texture: TextureKey, animation: usize) {
        self.texture = texture;
        let selected = self.set_animation(Some(animation));
        debug_assert!(selected.is_ok(), "{:?} on {} entity", selected, self.kind());
    }

    pub fn animation(&self) -> Option<&Animation> {
        self.current_animation.and_then(|i| self.animations.get(i))
    }

    pub fn animation_mut(&mut self) -> Option<&mut Animation> {
        self.current_animation.and_then(|i| self.animations.get_mut(i))
    }

    /// Advance the playing animation, if any.
    pub fn step_animation(&mut self, delta_time: f32) {
        if let Some(animation) = self.animation_mut() {
            animation.step(delta_time);
        }
    }

    /// Sprite sheet frame to draw this frame
    pub fn sprite_frame(&self) -> u32 {
        self.animation()
            .map(Animation::current_frame)
            .unwrap_or(self.rest_frame)
    }

    /// Collider in world space
    pub fn world_collider(&self) -> Rect {
        self.collider.offset(self.position)
    }
}
