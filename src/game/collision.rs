//! Collision System
//!
//! Axis-aligned box collision between every pair of entities. Each dynamic
//! entity is tested against all others after it moves; overlaps are resolved
//! by pushing the mover out along the axis of least penetration.
//!
//! The same scan also tests a one-unit strip directly below the mover's
//! collider. If that strip touches level geometry the entity is on the
//! ground, which is what stops gravity and triggers landing.

use super::enemy;
use super::entity::{Entity, EntityKind};
use super::projectile;
use super::rect::Rect;
use super::world::{Layer, Slot, World};

/// Height of the ground sensor below a collider
pub const SENSOR_HEIGHT: f32 = 1.0;

/// Gameplay numbers the collision responses need.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionRules {
    /// Health removed from an enemy per projectile hit
    pub projectile_damage: u32,
}

/// Result of resolving one entity against the world
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionResult {
    /// Ground sensor touched level geometry
    pub on_ground: bool,
    /// Number of overlapping pairs found
    pub contacts: u32,
}

/// Finds and responds to everything one entity overlaps.
pub trait CollisionResolver {
    fn resolve(&mut self, world: &mut World, slot: Slot, rules: &CollisionRules) -> CollisionResult;
}

/// Tests the mover against every other entity. O(n) per call, O(n²) per
/// frame. Fine for a single screen of tiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveResolver;

impl CollisionResolver for NaiveResolver {
    fn resolve(&mut self, world: &mut World, slot: Slot, rules: &CollisionRules) -> CollisionResult {
        let mut result = CollisionResult::default();
        for layer in Layer::ALL {
            for index in 0..world.len(layer) {
                let other = Slot::new(layer, index);
                if other == slot {
                    continue;
                }
                let (mover, target) = world.pair_mut(slot, other);
                if target.is_inactive() {
                    continue;
                }

                // Earlier responses may have moved the mover
                let bounds = mover.world_collider();
                let target_bounds = target.world_collider();
                if let Some(overlap) = bounds.intersection(&target_bounds) {
                    result.contacts += 1;
                    respond(mover, target, overlap, rules);
                }

                if target.kind() == EntityKind::Level
                    && mover.world_collider().strip_below(SENSOR_HEIGHT).overlaps(&target_bounds)
                {
                    result.on_ground = true;
                }
            }
        }
        result
    }
}

/// Dispatch the response for an overlapping pair by kind.
pub fn respond(mover: &mut Entity, target: &mut Entity, overlap: Rect, rules: &CollisionRules) {
    match (mover.kind(), target.kind()) {
        (EntityKind::Player | EntityKind::Enemy, EntityKind::Level) => push_out(mover, overlap),
        (EntityKind::Projectile, EntityKind::Level) => {
            projectile::collide(mover);
        }
        (EntityKind::Projectile, EntityKind::Enemy) => {
            if enemy::is_alive(target) && projectile::collide(mover) {
                enemy::take_damage(target, rules.projectile_damage, mover.facing);
            }
        }
        _ => {}
    }
}

/// -1, 0 or +1. Unlike `f32::signum`, zero maps to zero.
fn sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Minimum-penetration response against static geometry.
///
/// The smaller overlap extent picks the axis (ties go vertical). The mover
/// is pushed back against its velocity on that axis, and that velocity
/// component is zeroed even when it was already zero.
pub fn push_out(entity: &mut Entity, overlap: Rect) {
    if overlap.w < overlap.h {
        entity.position.x -= overlap.w * sign(entity.velocity.x);
        entity.velocity.x = 0.0;
    } else {
        entity.position.y -= overlap.h * sign(entity.velocity.y);
        entity.velocity.y = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::math::Vec2;
    use crate::assets::{anim, Assets, TextureKey};
    use crate::game::entity::{EnemyData, EnemyState, PlayerData, ProjectileData, ProjectileState, TypeState};

    const RULES: CollisionRules = CollisionRules { projectile_damage: 10 };

    fn player_at(x: f32, y: f32, velocity: Vec2) -> Entity {
        let mut player = Entity::new(TypeState::Player(PlayerData::default()), TextureKey::PlayerIdle)
            .with_position(Vec2::new(x, y))
            .with_collider(Rect::new(0.0, 0.0, 10.0, 10.0));
        player.velocity = velocity;
        player.dynamic = true;
        player
    }

    fn bullet_at(x: f32, y: f32, size: f32) -> Entity {
        let mut bullet = Entity::new(TypeState::Projectile(ProjectileData::default()), TextureKey::Bullet)
            .with_position(Vec2::new(x, y))
            .with_collider(Rect::new(0.0, 0.0, size, size))
            .with_animations(Assets::default().bullet_animations(), anim::BULLET_MOVING);
        bullet.velocity.x = 600.0;
        bullet
    }

    #[test]
    fn test_narrow_overlap_corrects_horizontally() {
        // Overlap is 2 wide, 5 tall
        let mut player = player_at(0.0, 0.0, Vec2::new(50.0, 20.0));
        let mut tile = Entity::tile(Vec2::new(8.0, 5.0), 10.0, TextureKey::Ground);
        let overlap = player.world_collider().intersection(&tile.world_collider()).unwrap();
        assert_eq!(overlap, Rect::new(8.0, 5.0, 2.0, 5.0));

        respond(&mut player, &mut tile, overlap, &RULES);
        assert_eq!(player.position, Vec2::new(-2.0, 0.0));
        assert_eq!(player.velocity, Vec2::new(0.0, 20.0));
    }

    #[test]
    fn test_square_overlap_corrects_vertically() {
        let mut player = player_at(0.0, 0.0, Vec2::new(30.0, 40.0));
        push_out(&mut player, Rect::new(7.0, 7.0, 3.0, 3.0));
        assert_eq!(player.position, Vec2::new(0.0, -3.0));
        assert_eq!(player.velocity, Vec2::new(30.0, 0.0));
    }

    #[test]
    fn test_zero_velocity_is_not_pushed() {
        let mut player = player_at(0.0, 0.0, Vec2::new(0.0, 15.0));
        push_out(&mut player, Rect::new(8.0, 0.0, 2.0, 10.0));
        assert_eq!(player.position, Vec2::ZERO);
        assert_eq!(player.velocity, Vec2::new(0.0, 15.0));
    }

    #[test]
    fn test_resolver_lands_on_floor() {
        let mut world = World::new();
        for x in 0..3 {
            world.push(Layer::Level, Entity::tile(Vec2::new(x as f32 * 10.0, 10.0), 10.0, TextureKey::Ground));
        }
        // Sunk 2 units into the middle tile while falling
        let slot = world.push(Layer::Characters, player_at(10.0, 2.0, Vec2::new(0.0, 100.0)));

        let result = NaiveResolver.resolve(&mut world, slot, &RULES);
        let player = world.get(slot).unwrap();
        assert!(result.on_ground);
        assert_eq!(result.contacts, 1);
        assert_eq!(player.position.y, 0.0);
        assert_eq!(player.velocity.y, 0.0);
    }

    #[test]
    fn test_sensor_ignores_characters() {
        let mut world = World::new();
        world.push(Layer::Characters, Entity::new(TypeState::Enemy(EnemyData::default()), TextureKey::Enemy)
            .with_position(Vec2::new(0.0, 10.0))
            .with_collider(Rect::new(0.0, 0.0, 10.0, 10.0)));
        let slot = world.push(Layer::Characters, player_at(0.0, 0.0, Vec2::ZERO));

        let result = NaiveResolver.resolve(&mut world, slot, &RULES);
        assert!(!result.on_ground);
        assert_eq!(result.contacts, 0);
    }

    #[test]
    fn test_projectile_hits_enemy_once() {
        let mut world = World::new();
        let enemy = world.push(Layer::Characters, Entity::new(TypeState::Enemy(EnemyData::default()), TextureKey::Enemy)
            .with_position(Vec2::new(0.0, 0.0))
            .with_collider(Rect::new(0.0, 0.0, 10.0, 10.0))
            .with_animations(Assets::default().enemy_animations(), anim::ENEMY));
        let slot = world.push(Layer::Projectiles, bullet_at(5.0, 2.0, 4.0));

        NaiveResolver.resolve(&mut world, slot, &RULES);
        NaiveResolver.resolve(&mut world, slot, &RULES);

        let bullet = world.get(slot).unwrap();
        assert_eq!(bullet.projectile().unwrap().state, ProjectileState::Colliding);
        assert_eq!(bullet.velocity, Vec2::ZERO);
        let enemy = world.get(enemy).unwrap().enemy().unwrap();
        assert_eq!(enemy.health, 90);
        assert_eq!(enemy.state, EnemyState::Damaged);
    }

    #[test]
    fn test_projectile_stops_at_wall() {
        let mut world = World::new();
        let wall = world.push(Layer::Level, Entity::tile(Vec2::new(100.0, 100.0), 32.0, TextureKey::Brick));
        let slot = world.push(Layer::Projectiles, bullet_at(96.0, 110.0, 8.0));

        let result = NaiveResolver.resolve(&mut world, slot, &RULES);
        assert_eq!(result.contacts, 1);

        let bullet = world.get(slot).unwrap();
        assert_eq!(bullet.projectile().unwrap().state, ProjectileState::Colliding);
        assert_eq!(bullet.velocity, Vec2::ZERO);
        assert_eq!(bullet.texture, TextureKey::BulletHit);
        assert_eq!(bullet.current_animation(), Some(anim::BULLET_HIT));
        // Projectiles are not pushed out of walls
        assert_eq!(bullet.position, Vec2::new(96.0, 110.0));
        assert_eq!(world.get(wall).unwrap().position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_inactive_projectiles_are_skipped() {
        let mut world = World::new();
        let mut bullet = bullet_at(0.0, 0.0, 10.0);
        bullet.projectile_mut().unwrap().state = ProjectileState::Inactive;
        world.push(Layer::Projectiles, bullet);
        let slot = world.push(Layer::Characters, player_at(0.0, 0.0, Vec2::ZERO));

        assert_eq!(NaiveResolver.resolve(&mut world, slot, &RULES).contacts, 0);
    }
}
