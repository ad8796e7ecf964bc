//! Tile map loading
//!
//! Maps are grids of single-digit tile codes, one string per row. Several
//! layers can be stacked; each is anchored to the bottom of the logical
//! screen so the last row sits on the bottom edge. Code 0 is empty space and
//! every other code is looked up in the [`Assets`] tile table.

use macroquad::math::Vec2;
use thiserror::Error;
use tracing::info;
use crate::assets::{AssetError, Assets, TileRole};
use crate::config::GameConfig;
use super::enemy;
use super::entity::Entity;
use super::player;
use super::world::{Layer, Slot, World};

/// Edge length of a map cell in world units
pub const TILE_SIZE: f32 = 32.0;

/// Collidable geometry and spawn points
pub const GROUND_LAYER: [&str; 5] = [
    "0000000000000000000000000000000000000000",
    "0000000000000000000000000066600000000000",
    "0000000000000066000000000000000000000000",
    "0400000003000000000003000000006000300000",
    "1111111111111111111111111111111111111111",
];

/// Decoration: background panels and foreground grass
pub const DECORATION_LAYER: [&str; 5] = [
    "0000000000000000000000000000000000000000",
    "0002220000000000000000022200000000000000",
    "0002220000000000000000022200000000000000",
    "0000055500000000555000000000055500000000",
    "0000000000000000000000000000000000000000",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("map has no player spawn")]
    MissingPlayer,
    #[error("map has {0} player spawns, expected exactly one")]
    MultiplePlayers(usize),
    #[error("unknown tile code {code} at row {row}, column {column}")]
    UnknownTile { code: u8, row: usize, column: usize },
    #[error("invalid tile character {found:?} at row {row}, column {column}")]
    InvalidCharacter { found: char, row: usize, column: usize },
    #[error("row {row} is {found} tiles wide, expected {expected}")]
    RaggedRow { row: usize, expected: usize, found: usize },
    #[error("invalid assets: {0}")]
    Assets(#[from] AssetError),
}

/// One parsed map layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileMap {
    rows: Vec<Vec<u8>>,
}

impl TileMap {
    /// Parse digit rows. All rows must be the same width.
    pub fn parse(rows: &[&str]) -> Result<Self, LevelError> {
        let mut parsed: Vec<Vec<u8>> = Vec::with_capacity(rows.len());
        for (row, line) in rows.iter().enumerate() {
            let codes = line
                .chars()
                .enumerate()
                .map(|(column, c)| {
                    c.to_digit(10)
                        .map(|d| d as u8)
                        .ok_or(LevelError::InvalidCharacter { found: c, row, column })
                })
                .collect::<Result<Vec<u8>, _>>()?;
            if let Some(first) = parsed.first() {
                if codes.len() != first.len() {
                    return Err(LevelError::RaggedRow { row, expected: first.len(), found: codes.len() });
                }
            }
            parsed.push(codes);
        }
        Ok(Self { rows: parsed })
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn code(&self, row: usize, column: usize) -> Option<u8> {
        self.rows.get(row).and_then(|r| r.get(column)).copied()
    }

    /// Non-empty cells as (row, column, code)
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, codes)| {
            codes
                .iter()
                .enumerate()
                .filter(|(_, code)| **code != 0)
                .map(move |(column, code)| (row, column, *code))
        })
    }
}

/// The built-in two-layer map
pub fn default_map() -> Result<Vec<TileMap>, LevelError> {
    Ok(vec![TileMap::parse(&GROUND_LAYER)?, TileMap::parse(&DECORATION_LAYER)?])
}

/// World position of a cell, anchored to the bottom of the logical screen
fn cell_position(map: &TileMap, row: usize, column: usize, logical_height: f32) -> Vec2 {
    Vec2::new(
        column as f32 * TILE_SIZE,
        logical_height - (map.height() - row) as f32 * TILE_SIZE,
    )
}

/// Instantiate every layer into a new world. Returns the world and the
/// player's slot.
pub fn build_world(maps: &[TileMap], assets: &Assets, config: &GameConfig) -> Result<(World, Slot), LevelError> {
    assets.validate()?;
    let mut world = World::new();
    let mut players = Vec::new();

    for map in maps {
        for (row, column, code) in map.cells() {
            let tile = assets
                .tile(code)
                .ok_or(LevelError::UnknownTile { code, row, column })?;
            let position = cell_position(map, row, column, config.logical_height);
            match tile.role {
                TileRole::Solid => {
                    world.push(Layer::Level, Entity::tile(position, TILE_SIZE, tile.texture));
                }
                TileRole::Background => world.background.push(Entity::tile(position, TILE_SIZE, tile.texture)),
                TileRole::Foreground => world.foreground.push(Entity::tile(position, TILE_SIZE, tile.texture)),
                TileRole::Enemy => {
                    world.push(Layer::Characters, enemy::spawn(position, assets, config));
                }
                TileRole::Player => {
                    players.push(world.push(Layer::Characters, player::spawn(position, assets, config)));
                }
            }
        }
    }

    let player = match players.as_slice() {
        [] => return Err(LevelError::MissingPlayer),
        [slot] => *slot,
        many => return Err(LevelError::MultiplePlayers(many.len())),
    };
    info!(
        "level loaded: {} tiles, {} characters, {} decorations",
        world.len(Layer::Level),
        world.len(Layer::Characters),
        world.background.len() + world.foreground.len()
    );
    Ok((world, player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::EntityKind;

    #[test]
    fn test_default_map_builds() {
        let maps = default_map().unwrap();
        assert_eq!(maps[0].width(), 40);
        assert_eq!(maps[0].height(), 5);
        assert_eq!(maps[0].code(3, 1), Some(4));
        assert_eq!(maps[0].code(4, 39), Some(1));
        assert_eq!(maps[0].code(5, 0), None);

        let (world, player) = build_world(&maps, &Assets::default(), &GameConfig::default()).unwrap();
        let player = world.get(player).unwrap();
        assert_eq!(player.kind(), EntityKind::Player);
        // Row 3 of 5, 320 high
        assert_eq!(player.position, Vec2::new(32.0, 256.0));

        let enemies = world
            .layer(Layer::Characters)
            .iter()
            .filter(|e| e.kind() == EntityKind::Enemy)
            .count();
        assert_eq!(enemies, 3);
        assert_eq!(world.len(Layer::Level), 40 + 3 + 2 + 1);
        assert_eq!(world.len(Layer::Projectiles), 0);
        assert_eq!(world.background.len(), 12);
        assert_eq!(world.foreground.len(), 9);
    }

    #[test]
    fn test_bottom_row_on_screen_edge() {
        let map = TileMap::parse(&["40", "11"]).unwrap();
        let (world, _) = build_world(&[map], &Assets::default(), &GameConfig::default()).unwrap();
        let ground = world.layer(Layer::Level);
        assert_eq!(ground[0].position, Vec2::new(0.0, 288.0));
        assert_eq!(ground[1].position, Vec2::new(32.0, 288.0));
    }

    #[test]
    fn test_player_count_checked() {
        let assets = Assets::default();
        let config = GameConfig::default();
        let none = TileMap::parse(&["0300", "1111"]).unwrap();
        assert_eq!(build_world(&[none], &assets, &config).unwrap_err(), LevelError::MissingPlayer);

        let two = TileMap::parse(&["0404", "1111"]).unwrap();
        assert_eq!(build_world(&[two], &assets, &config).unwrap_err(), LevelError::MultiplePlayers(2));
    }

    #[test]
    fn test_truncated_animations_rejected() {
        let mut assets = Assets::default();
        assets.player_anims.truncate(1);
        let map = TileMap::parse(&["40", "11"]).unwrap();
        assert_eq!(
            build_world(&[map], &assets, &GameConfig::default()).unwrap_err(),
            LevelError::Assets(AssetError::MissingAnimations { set: "player", expected: 5, found: 1 })
        );
    }

    #[test]
    fn test_bad_cells_rejected() {
        assert_eq!(
            TileMap::parse(&["01x"]).unwrap_err(),
            LevelError::InvalidCharacter { found: 'x', row: 0, column: 2 }
        );
        assert_eq!(
            TileMap::parse(&["011", "01"]).unwrap_err(),
            LevelError::RaggedRow { row: 1, expected: 3, found: 2 }
        );

        let map = TileMap::parse(&["49"]).unwrap();
        assert_eq!(
            build_world(&[map], &Assets::default(), &GameConfig::default()).unwrap_err(),
            LevelError::UnknownTile { code: 9, row: 0, column: 1 }
        );
    }
}
