//! Physics Integrator
//!
//! Variable-timestep integration for one entity per call. The steps run in
//! a fixed order each frame (see `Simulation::update`):
//! 1. gravity (dynamic, airborne entities only)
//! 2. idle deceleration (player only, applied by the player state machine)
//! 3. horizontal acceleration from the input direction
//! 4. horizontal speed clamp
//! 5. position integration

use macroquad::math::Vec2;
use super::entity::Entity;

/// Deceleration applied to an idle player, as a multiple of its acceleration
pub const IDLE_DECELERATION: f32 = -1.5;

/// Pull airborne dynamic entities down.
pub fn apply_gravity(entity: &mut Entity, gravity: Vec2, delta_time: f32) {
    if entity.dynamic && !entity.grounded {
        entity.velocity += gravity * delta_time;
    }
}

/// Slow horizontal motion toward zero without overshooting.
///
/// If this frame's deceleration would carry velocity past zero, it snaps to
/// exactly zero instead, so an idle character never oscillates.
pub fn decelerate(entity: &mut Entity, delta_time: f32) {
    if entity.velocity.x == 0.0 {
        return;
    }
    let amount = entity.velocity.x.signum() * IDLE_DECELERATION * entity.acceleration.x * delta_time;
    if entity.velocity.x.abs() < amount.abs() {
        entity.velocity.x = 0.0;
    } else {
        entity.velocity.x += amount;
    }
}

/// Accelerate along the input direction (-1, 0 or +1), clamp horizontal
/// speed and move.
///
/// The clamp sets velocity.x to `direction * max_speed_x`, not to the old
/// velocity's sign. With no input held that means an over-speed entity stops
/// dead rather than being capped.
pub fn integrate(entity: &mut Entity, direction: f32, delta_time: f32) {
    entity.velocity += direction * entity.acceleration * delta_time;
    if entity.velocity.x.abs() > entity.max_speed_x {
        entity.velocity.x = direction * entity.max_speed_x;
    }
    entity.position += entity.velocity * delta_time;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TextureKey;
    use crate::game::entity::{PlayerData, TypeState};

    fn player(velocity_x: f32) -> Entity {
        let mut entity = Entity::new(TypeState::Player(PlayerData::default()), TextureKey::PlayerIdle);
        entity.acceleration = Vec2::new(300.0, 0.0);
        entity.max_speed_x = 100.0;
        entity.velocity.x = velocity_x;
        entity.dynamic = true;
        entity
    }

    #[test]
    fn test_gravity_only_when_airborne() {
        let mut entity = player(0.0);
        apply_gravity(&mut entity, Vec2::new(0.0, 500.0), 0.1);
        assert_eq!(entity.velocity.y, 50.0);

        entity.grounded = true;
        apply_gravity(&mut entity, Vec2::new(0.0, 500.0), 0.1);
        assert_eq!(entity.velocity.y, 50.0);

        let mut tile = Entity::tile(Vec2::ZERO, 32.0, TextureKey::Ground);
        apply_gravity(&mut tile, Vec2::new(0.0, 500.0), 0.1);
        assert_eq!(tile.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_deceleration_snaps_to_zero() {
        // 1.5 * 300 * 0.1 = 45 > 40
        let mut entity = player(40.0);
        decelerate(&mut entity, 0.1);
        assert_eq!(entity.velocity.x, 0.0);

        let mut entity = player(-40.0);
        decelerate(&mut entity, 0.1);
        assert_eq!(entity.velocity.x, 0.0);
    }

    #[test]
    fn test_deceleration_opposes_motion() {
        // 1.5 * 300 * 0.01 = 4.5
        let mut entity = player(50.0);
        decelerate(&mut entity, 0.01);
        assert!((entity.velocity.x - 45.5).abs() < 1e-4);

        let mut entity = player(-50.0);
        decelerate(&mut entity, 0.01);
        assert!((entity.velocity.x + 45.5).abs() < 1e-4);
    }

    #[test]
    fn test_clamp_to_input_direction() {
        let mut entity = player(99.0);
        integrate(&mut entity, 1.0, 0.1);
        assert_eq!(entity.velocity.x, 100.0);
        assert!((entity.position.x - 10.0).abs() < 1e-4);

        let mut entity = player(-99.0);
        integrate(&mut entity, -1.0, 0.1);
        assert_eq!(entity.velocity.x, -100.0);
    }

    #[test]
    fn test_clamp_with_no_input_zeroes_velocity() {
        let mut entity = player(150.0);
        integrate(&mut entity, 0.0, 0.1);
        assert_eq!(entity.velocity.x, 0.0);
        assert_eq!(entity.position.x, 0.0);
    }

    #[test]
    fn test_speed_never_exceeds_max() {
        let mut entity = player(0.0);
        for step in 0..120 {
            let direction = if step % 40 < 20 { 1.0 } else { -1.0 };
            integrate(&mut entity, direction, 1.0 / 30.0);
            assert!(entity.velocity.x.abs() <= entity.max_speed_x);
        }
    }
}
