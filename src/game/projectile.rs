//! Projectile State Machine
//!
//! Moving -> Colliding when the bullet hits level geometry or a live enemy,
//! Colliding -> Inactive once the hit animation has played through, and
//! Moving -> Inactive when the bullet leaves the camera viewport. Inactive
//! projectiles keep their slot so the next shot can reuse it.

use macroquad::math::Vec2;
use tracing::trace;
use crate::assets::{anim, Assets, TextureKey};
use crate::config::GameConfig;
use super::camera::Camera;
use super::entity::{Entity, ProjectileData, ProjectileState, TypeState};
use super::rect::Rect;

/// Bullet collider edge length
pub const PROJECTILE_SIZE: f32 = 8.0;

/// Horizontal muzzle offset for a shooter facing `facing` (-1 or +1),
/// interpolated between the left and right offsets.
pub fn muzzle_offset_x(facing: f32, config: &GameConfig) -> f32 {
    let t = (facing + 1.0) / 2.0;
    config.muzzle_offset_left + (config.muzzle_offset_right - config.muzzle_offset_left) * t
}

/// Build a bullet leaving `shooter`'s muzzle. Inherits the shooter's
/// horizontal velocity and facing.
pub fn launch(shooter: &Entity, assets: &Assets, config: &GameConfig) -> Entity {
    let position = shooter.position
        + Vec2::new(muzzle_offset_x(shooter.facing, config), config.muzzle_offset_y);
    let mut bullet = Entity::new(TypeState::Projectile(ProjectileData::default()), TextureKey::Bullet)
        .with_position(position)
        .with_collider(Rect::new(0.0, 0.0, PROJECTILE_SIZE, PROJECTILE_SIZE))
        .with_animations(assets.bullet_animations(), anim::BULLET_MOVING);
    bullet.velocity = Vec2::new(shooter.velocity.x + config.muzzle_speed * shooter.facing, 0.0);
    bullet.facing = shooter.facing;
    bullet.max_speed_x = config.projectile_max_speed;
    bullet
}

/// Stop a moving bullet and start its hit animation.
///
/// Returns false (and does nothing) unless the entity is a projectile in the
/// Moving state, so a bullet can only ever hit one thing.
pub fn collide(entity: &mut Entity) -> bool {
    match entity.projectile_mut() {
        Ok(projectile) if projectile.state == ProjectileState::Moving => {
            projectile.state = ProjectileState::Colliding;
        }
        _ => return false,
    }
    entity.velocity = Vec2::ZERO;
    entity.show(TextureKey::BulletHit, anim::BULLET_HIT);
    if let Some(animation) = entity.animation_mut() {
        animation.reset();
    }
    trace!("projectile hit at {:?}", entity.position);
    true
}

/// Post-step checks: retire bullets that left the view or finished their
/// hit animation.
pub fn update_state(entity: &mut Entity, camera: &Camera) {
    let Ok(projectile) = entity.projectile() else {
        return;
    };
    let retire = match projectile.state {
        ProjectileState::Moving => camera.is_outside(entity.position),
        ProjectileState::Colliding => entity.animation().map_or(true, |a| a.is_done()),
        ProjectileState::Inactive => false,
    };
    if retire {
        if let Ok(projectile) = entity.projectile_mut() {
            projectile.state = ProjectileState::Inactive;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::PlayerData;

    fn shooter(facing: f32) -> Entity {
        let mut player = Entity::new(TypeState::Player(PlayerData::default()), TextureKey::PlayerShoot)
            .with_position(Vec2::new(100.0, 200.0));
        player.facing = facing;
        player.velocity.x = 40.0 * facing;
        player
    }

    #[test]
    fn test_launch_from_muzzle() {
        let assets = Assets::default();
        let config = GameConfig::default();

        let right = launch(&shooter(1.0), &assets, &config);
        assert_eq!(right.position, Vec2::new(124.0, 217.0));
        assert_eq!(right.velocity, Vec2::new(640.0, 0.0));
        assert_eq!(right.current_animation(), Some(anim::BULLET_MOVING));
        assert_eq!(right.max_speed_x, 1000.0);
        assert!(!right.dynamic);

        let left = launch(&shooter(-1.0), &assets, &config);
        assert_eq!(left.position, Vec2::new(100.0, 217.0));
        assert_eq!(left.velocity.x, -640.0);
        assert_eq!(left.facing, -1.0);
    }

    #[test]
    fn test_collide_only_while_moving() {
        let mut bullet = launch(&shooter(1.0), &Assets::default(), &GameConfig::default());
        assert!(collide(&mut bullet));
        assert_eq!(bullet.velocity, Vec2::ZERO);
        assert_eq!(bullet.texture, TextureKey::BulletHit);
        assert_eq!(bullet.current_animation(), Some(anim::BULLET_HIT));
        assert!(!collide(&mut bullet));

        let mut player = shooter(1.0);
        assert!(!collide(&mut player));
    }

    #[test]
    fn test_retire_after_hit_animation() {
        let camera = Camera::new(640.0, 320.0);
        let mut bullet = launch(&shooter(1.0), &Assets::default(), &GameConfig::default());
        collide(&mut bullet);

        bullet.step_animation(0.1);
        update_state(&mut bullet, &camera);
        assert_eq!(bullet.projectile().unwrap().state, ProjectileState::Colliding);

        bullet.step_animation(0.1);
        update_state(&mut bullet, &camera);
        assert!(bullet.is_inactive());
    }

    #[test]
    fn test_retire_outside_viewport() {
        let camera = Camera::new(640.0, 320.0);
        let mut bullet = launch(&shooter(1.0), &Assets::default(), &GameConfig::default());
        update_state(&mut bullet, &camera);
        assert!(!bullet.is_inactive());

        bullet.position.x = 641.0;
        update_state(&mut bullet, &camera);
        assert!(bullet.is_inactive());
    }
}
