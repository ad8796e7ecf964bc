//! Game World
//!
//! The World owns every simulated entity, grouped into three collections
//! that are always visited in the same order:
//! - level tiles (static, collidable)
//! - characters (player and enemies, map order)
//! - projectiles (fire order, inactive slots reused in place)
//!
//! Decorative tiles that never collide live in separate background and
//! foreground lists so the collision scan doesn't visit them.
//!
//! Entities are addressed by [`Slot`] (collection + index). Indices are
//! stable: nothing is ever removed, so the player's slot stays valid for the
//! whole session.

use tracing::debug;
use super::entity::{Entity, EntityKind};

/// One of the simulated entity collections, in update order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    Level = 0,
    Characters = 1,
    Projectiles = 2,
}

impl Layer {
    pub const ALL: [Layer; 3] = [Layer::Level, Layer::Characters, Layer::Projectiles];
}

/// Stable address of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub layer: Layer,
    pub index: usize,
}

impl Slot {
    pub const fn new(layer: Layer, index: usize) -> Self {
        Self { layer, index }
    }
}

/// Two distinct mutable elements of one slice.
fn two_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    assert_ne!(a, b, "two_mut needs distinct indices");
    if a < b {
        let (low, high) = items.split_at_mut(b);
        (&mut low[a], &mut high[0])
    } else {
        let (low, high) = items.split_at_mut(a);
        (&mut high[0], &mut low[b])
    }
}

/// Container for all entities.
#[derive(Debug, Default)]
pub struct World {
    /// Indexed by `Layer as usize`
    layers: [Vec<Entity>; 3],
    /// Non-colliding tiles drawn behind the characters
    pub background: Vec<Entity>,
    /// Non-colliding tiles drawn in front of the characters
    pub foreground: Vec<Entity>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entity to a collection and return its slot.
    pub fn push(&mut self, layer: Layer, entity: Entity) -> Slot {
        let entities = &mut self.layers[layer as usize];
        entities.push(entity);
        Slot::new(layer, entities.len() - 1)
    }

    pub fn layer(&self, layer: Layer) -> &[Entity] {
        &self.layers[layer as usize]
    }

    pub fn len(&self, layer: Layer) -> usize {
        self.layers[layer as usize].len()
    }

    pub fn get(&self, slot: Slot) -> Option<&Entity> {
        self.layers[slot.layer as usize].get(slot.index)
    }

    pub fn get_mut(&mut self, slot: Slot) -> Option<&mut Entity> {
        self.layers[slot.layer as usize].get_mut(slot.index)
    }

    /// Mutable access to two different entities at once.
    /// Panics if both slots are the same or either is out of range.
    pub fn pair_mut(&mut self, a: Slot, b: Slot) -> (&mut Entity, &mut Entity) {
        if a.layer == b.layer {
            two_mut(&mut self.layers[a.layer as usize], a.index, b.index)
        } else {
            let (first, second) = two_mut(&mut self.layers, a.layer as usize, b.layer as usize);
            (&mut first[a.index], &mut second[b.index])
        }
    }

    /// Every simulated entity in update order
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.layers.iter().flatten()
    }

    /// Add a projectile, overwriting the first inactive one if there is one.
    pub fn spawn_projectile(&mut self, projectile: Entity) -> Slot {
        debug_assert_eq!(projectile.kind(), EntityKind::Projectile);
        let projectiles = &mut self.layers[Layer::Projectiles as usize];
        if let Some(index) = projectiles.iter().position(Entity::is_inactive) {
            projectiles[index] = projectile;
            debug!("projectile reused slot {}", index);
            return Slot::new(Layer::Projectiles, index);
        }
        projectiles.push(projectile);
        debug!("projectile appended, {} total", projectiles.len());
        Slot::new(Layer::Projectiles, projectiles.len() - 1)
    }

    /// Projectiles still in flight or playing their hit animation
    pub fn active_projectiles(&self) -> usize {
        self.layer(Layer::Projectiles)
            .iter()
            .filter(|p| !p.is_inactive())
            .count()
    }
}
