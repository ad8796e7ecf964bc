//! Enemy State Machine
//!
//! - Shambling: walks toward the player while it is within sight range,
//!   otherwise stands still
//! - Damaged: staggered for the damage cooldown after a hit, then shambles
//! - Dead: stops, plays the death animation once and rests on its last frame

use macroquad::math::Vec2;
use tracing::debug;
use crate::assets::{anim, Assets, TextureKey};
use crate::config::GameConfig;
use super::entity::{EnemyData, EnemyState, Entity, TypeState};
use super::rect::Rect;

/// Enemy collider inside its 32x32 frame
pub const ENEMY_COLLIDER: Rect = Rect::new(10.0, 4.0, 12.0, 28.0);

/// Create an enemy standing at `position`.
pub fn spawn(position: Vec2, assets: &Assets, config: &GameConfig) -> Entity {
    let mut enemy = Entity::new(TypeState::Enemy(EnemyData::default()), TextureKey::Enemy)
        .with_position(position)
        .with_collider(ENEMY_COLLIDER)
        .with_animations(assets.enemy_animations(), anim::ENEMY);
    enemy.max_speed_x = config.enemy_max_speed;
    enemy.dynamic = true;
    enemy
}

pub fn is_alive(entity: &Entity) -> bool {
    entity.enemy().map_or(false, |enemy| enemy.state != EnemyState::Dead)
}

/// Apply a projectile hit. The enemy turns to face the shot, flashes and
/// loses `damage` health, dying when it reaches zero.
pub fn take_damage(entity: &mut Entity, damage: u32, shot_facing: f32) {
    let Ok(enemy) = entity.enemy() else {
        return;
    };
    let mut data = *enemy;
    if data.state == EnemyState::Dead {
        return;
    }

    entity.facing = -shot_facing;
    entity.should_flash = true;
    entity.flash_timer.reset();
    data.health = data.health.saturating_sub(damage);
    data.damage_cooldown.reset();

    if data.health == 0 {
        data.state = EnemyState::Dead;
        entity.velocity.x = 0.0;
        entity.show(TextureKey::EnemyDie, anim::ENEMY_DIE);
        if let Some(animation) = entity.animation_mut() {
            animation.reset();
        }
        debug!("enemy died at {:?}", entity.position);
    } else {
        data.state = EnemyState::Damaged;
        entity.show(TextureKey::EnemyHit, anim::ENEMY_HIT);
    }
    entity.data = TypeState::Enemy(data);
}

/// Run one frame of the enemy state machine. Returns the horizontal
/// direction to accelerate in.
pub fn step(entity: &mut Entity, player_position: Vec2, delta_time: f32, config: &GameConfig) -> f32 {
    let Ok(enemy) = entity.enemy() else {
        return 0.0;
    };
    let mut data = *enemy;
    let mut direction = 0.0;

    match data.state {
        EnemyState::Shambling => {
            let to_player = player_position - entity.position;
            if to_player.length() < config.enemy_sight_range {
                direction = if to_player.x < 0.0 { -1.0 } else { 1.0 };
                entity.acceleration = Vec2::new(config.enemy_acceleration, 0.0);
            } else {
                entity.acceleration = Vec2::ZERO;
                entity.velocity.x = 0.0;
            }
        }
        EnemyState::Damaged => {
            if data.damage_cooldown.step(delta_time) {
                data.state = EnemyState::Shambling;
                entity.show(TextureKey::Enemy, anim::ENEMY);
            }
        }
        EnemyState::Dead => {
            entity.velocity.x = 0.0;
            let finished = entity
                .animation()
                .filter(|a| a.is_done())
                .map(|a| a.frame_count().saturating_sub(1));
            if let Some(last_frame) = finished {
                entity.rest_frame = last_frame;
                // None is always a valid selection
                let _ = entity.set_animation(None);
            }
        }
    }

    if direction != 0.0 {
        entity.facing = direction;
    }
    entity.data = TypeState::Enemy(data);
    direction
}
