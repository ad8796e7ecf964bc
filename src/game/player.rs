//! Player State Machine
//!
//! - Idle: no horizontal input; decelerates to a stop
//! - Running: horizontal input held; slides when moving against its facing
//! - Jumping: airborne after a jump press, until landing
//!
//! Landing always forces Running. The next frame drops back to Idle if no
//! direction is held. Holding fire swaps in the matching shooting sprite and
//! spawns a projectile each time the weapon cooldown allows.

use macroquad::math::Vec2;
use tracing::debug;
use crate::assets::{anim, Assets, TextureKey};
use crate::config::GameConfig;
use crate::input::{Action, InputFrame};
use super::entity::{Entity, PlayerData, PlayerState, TypeState};
use super::physics;
use super::projectile;
use super::rect::Rect;

/// Player collider inside its 32x32 frame
pub const PLAYER_COLLIDER: Rect = Rect::new(11.0, 6.0, 10.0, 26.0);

/// Result of one player step
#[derive(Debug, Default)]
pub struct PlayerStep {
    /// Horizontal input direction: -1, 0 or +1
    pub direction: f32,
    /// Projectile fired this frame, not yet in the world
    pub fired: Option<Entity>,
}

/// Sprite and animation pair, plain and shooting variants
struct Pose {
    texture: TextureKey,
    animation: usize,
    shoot_texture: TextureKey,
    shoot_animation: usize,
}

const IDLE_POSE: Pose = Pose {
    texture: TextureKey::PlayerIdle,
    animation: anim::PLAYER_IDLE,
    shoot_texture: TextureKey::PlayerShoot,
    shoot_animation: anim::PLAYER_SHOOT,
};

const RUN_POSE: Pose = Pose {
    texture: TextureKey::PlayerRun,
    animation: anim::PLAYER_RUN,
    shoot_texture: TextureKey::PlayerRunShoot,
    shoot_animation: anim::PLAYER_RUN,
};

const SLIDE_POSE: Pose = Pose {
    texture: TextureKey::PlayerSlide,
    animation: anim::PLAYER_SLIDE,
    shoot_texture: TextureKey::PlayerSlideShoot,
    shoot_animation: anim::PLAYER_SLIDE_SHOOT,
};

/// Create the player standing at `position`.
pub fn spawn(position: Vec2, assets: &Assets, config: &GameConfig) -> Entity {
    let mut player = Entity::new(TypeState::Player(PlayerData::default()), TextureKey::PlayerIdle)
        .with_position(position)
        .with_collider(PLAYER_COLLIDER)
        .with_animations(assets.player_animations(), anim::PLAYER_IDLE);
    player.acceleration = Vec2::new(config.player_acceleration, 0.0);
    player.max_speed_x = config.player_max_speed;
    player.dynamic = true;
    player
}

/// Moving on the ground against the facing direction
fn is_sliding(entity: &Entity) -> bool {
    entity.grounded && entity.velocity.x * entity.facing < 0.0
}

/// Run one frame of the player state machine.
pub fn step(
    entity: &mut Entity,
    input: &InputFrame,
    delta_time: f32,
    assets: &Assets,
    config: &GameConfig,
) -> PlayerStep {
    let Ok(player) = entity.player() else {
        return PlayerStep::default();
    };
    let mut data = *player;
    let previous = data.state;

    let direction = input.horizontal();
    if direction != 0.0 {
        entity.facing = direction;
    }

    if input.pressed(Action::Jump) && data.state != PlayerState::Jumping {
        data.state = PlayerState::Jumping;
        entity.velocity.y += config.jump_impulse;
    }

    data.weapon_cooldown.step(delta_time);

    match data.state {
        PlayerState::Idle if direction != 0.0 => data.state = PlayerState::Running,
        PlayerState::Idle => physics::decelerate(entity, delta_time),
        PlayerState::Running if direction == 0.0 => data.state = PlayerState::Idle,
        PlayerState::Running | PlayerState::Jumping => {}
    }

    let pose = match data.state {
        PlayerState::Idle => &IDLE_POSE,
        PlayerState::Running if is_sliding(entity) => &SLIDE_POSE,
        PlayerState::Running | PlayerState::Jumping => &RUN_POSE,
    };

    let mut fired = None;
    if input.is_held(Action::Fire) {
        entity.show(pose.shoot_texture, pose.shoot_animation);
        if data.weapon_cooldown.is_timeout() {
            data.weapon_cooldown.reset();
            fired = Some(projectile::launch(entity, assets, config));
        }
    } else {
        entity.show(pose.texture, pose.animation);
    }

    if data.state != previous {
        debug!("player {:?} -> {:?}", previous, data.state);
    }
    entity.data = TypeState::Player(data);
    PlayerStep { direction, fired }
}

/// Grounded rising edge. Forces Running regardless of input.
pub fn land(entity: &mut Entity) {
    if let Ok(player) = entity.player_mut() {
        if player.state != PlayerState::Running {
            debug!("player {:?} -> Running (landed)", player.state);
        }
        player.state = PlayerState::Running;
    }
}
