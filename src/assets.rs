//! Static asset descriptors
//!
//! Built once at startup and handed to the simulation by shared reference.
//! The core never loads or frees image data: textures are addressed by
//! [`TextureKey`] and the frame driver owns the actual GPU textures.

use thiserror::Error;
use crate::animation::{Animation, AnimationDef};

/// Directory the frame driver loads sprite sheets from
pub const TEXTURES_DIR: &str = "assets/textures";

/// Opaque handle to a renderable image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKey {
    PlayerIdle,
    PlayerRun,
    PlayerSlide,
    PlayerShoot,
    PlayerRunShoot,
    PlayerSlideShoot,
    Enemy,
    EnemyHit,
    EnemyDie,
    Bullet,
    BulletHit,
    Ground,
    Panel,
    Grass,
    Brick,
}

impl TextureKey {
    pub const ALL: [TextureKey; 15] = [
        TextureKey::PlayerIdle,
        TextureKey::PlayerRun,
        TextureKey::PlayerSlide,
        TextureKey::PlayerShoot,
        TextureKey::PlayerRunShoot,
        TextureKey::PlayerSlideShoot,
        TextureKey::Enemy,
        TextureKey::EnemyHit,
        TextureKey::EnemyDie,
        TextureKey::Bullet,
        TextureKey::BulletHit,
        TextureKey::Ground,
        TextureKey::Panel,
        TextureKey::Grass,
        TextureKey::Brick,
    ];

    /// Sprite sheet file name inside [`TEXTURES_DIR`]
    pub fn file_name(&self) -> &'static str {
        match self {
            TextureKey::PlayerIdle => "idle.png",
            TextureKey::PlayerRun => "run.png",
            TextureKey::PlayerSlide => "slide.png",
            TextureKey::PlayerShoot => "idle_shoot.png",
            TextureKey::PlayerRunShoot => "run_shoot.png",
            TextureKey::PlayerSlideShoot => "slide_shoot.png",
            TextureKey::Enemy => "enemy.png",
            TextureKey::EnemyHit => "enemy_hit.png",
            TextureKey::EnemyDie => "enemy_die.png",
            TextureKey::Bullet => "bullet.png",
            TextureKey::BulletHit => "bullet_hit.png",
            TextureKey::Ground => "tiles/ground.png",
            TextureKey::Panel => "tiles/panel.png",
            TextureKey::Grass => "tiles/grass.png",
            TextureKey::Brick => "tiles/brick.png",
        }
    }

    /// Size of one animation frame in the sheet (width, height)
    pub fn frame_size(&self) -> (f32, f32) {
        match self {
            TextureKey::Bullet | TextureKey::BulletHit => (8.0, 8.0),
            _ => (32.0, 32.0),
        }
    }
}

/// Animation slots. Entities store clones of one of the animation sets below
/// and select among them by these indices.
pub mod anim {
    pub const PLAYER_IDLE: usize = 0;
    pub const PLAYER_RUN: usize = 1;
    pub const PLAYER_SLIDE: usize = 2;
    pub const PLAYER_SHOOT: usize = 3;
    pub const PLAYER_SLIDE_SHOOT: usize = 4;

    pub const ENEMY: usize = 0;
    pub const ENEMY_HIT: usize = 1;
    pub const ENEMY_DIE: usize = 2;

    pub const BULLET_MOVING: usize = 0;
    pub const BULLET_HIT: usize = 1;

    /// Minimum length of each animation set
    pub const PLAYER_SLOTS: usize = PLAYER_SLIDE_SHOOT + 1;
    pub const ENEMY_SLOTS: usize = ENEMY_DIE + 1;
    pub const BULLET_SLOTS: usize = BULLET_HIT + 1;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("{set} animation set has {found} entries, expected at least {expected}")]
    MissingAnimations { set: &'static str, expected: usize, found: usize },
}

/// What a tile code turns into at map load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileRole {
    /// Collidable level geometry
    Solid,
    /// Drawn behind characters, no collision
    Background,
    /// Drawn in front of characters, no collision
    Foreground,
    /// Spawns an enemy
    Enemy,
    /// Spawns the player (exactly one per map)
    Player,
}

/// Mapping from a small integer map code to an entity role and texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileDescriptor {
    pub code: u8,
    pub role: TileRole,
    pub texture: TextureKey,
}

/// Read-only descriptor table shared by the simulation and the renderer.
#[derive(Debug, Clone)]
pub struct Assets {
    pub player_anims: Vec<AnimationDef>,
    pub enemy_anims: Vec<AnimationDef>,
    pub bullet_anims: Vec<AnimationDef>,
    pub tiles: Vec<TileDescriptor>,
}

impl Assets {
    /// Check every animation set covers its `anim` slots.
    pub fn validate(&self) -> Result<(), AssetError> {
        let sets = [
            ("player", &self.player_anims, anim::PLAYER_SLOTS),
            ("enemy", &self.enemy_anims, anim::ENEMY_SLOTS),
            ("bullet", &self.bullet_anims, anim::BULLET_SLOTS),
        ];
        for (set, anims, expected) in sets {
            if anims.len() < expected {
                return Err(AssetError::MissingAnimations { set, expected, found: anims.len() });
            }
        }
        Ok(())
    }

    /// Look up the descriptor for a map code. Code 0 is always empty space.
    pub fn tile(&self, code: u8) -> Option<&TileDescriptor> {
        self.tiles.iter().find(|t| t.code == code)
    }

    pub fn player_animations(&self) -> Vec<Animation> {
        self.player_anims.iter().map(AnimationDef::build).collect()
    }

    pub fn enemy_animations(&self) -> Vec<Animation> {
        self.enemy_anims.iter().map(AnimationDef::build).collect()
    }

    pub fn bullet_animations(&self) -> Vec<Animation> {
        self.bullet_anims.iter().map(AnimationDef::build).collect()
    }
}

impl Default for Assets {
    fn default() -> Self {
        Self {
            // Indexed by anim::PLAYER_*
            player_anims: vec![
                AnimationDef::new(8, 1.6),
                AnimationDef::new(4, 0.5),
                AnimationDef::new(1, 1.0),
                AnimationDef::new(4, 0.5),
                AnimationDef::new(4, 0.5),
            ],
            // Indexed by anim::ENEMY*
            enemy_anims: vec![
                AnimationDef::new(8, 1.0),
                AnimationDef::new(8, 1.0),
                AnimationDef::new(18, 2.0),
            ],
            // Indexed by anim::BULLET_*
            bullet_anims: vec![
                AnimationDef::new(4, 0.05),
                AnimationDef::new(4, 0.15),
            ],
            tiles: vec![
                TileDescriptor { code: 1, role: TileRole::Solid, texture: TextureKey::Ground },
                TileDescriptor { code: 2, role: TileRole::Background, texture: TextureKey::Panel },
                TileDescriptor { code: 3, role: TileRole::Enemy, texture: TextureKey::Enemy },
                TileDescriptor { code: 4, role: TileRole::Player, texture: TextureKey::PlayerIdle },
                TileDescriptor { code: 5, role: TileRole::Foreground, texture: TextureKey::Grass },
                TileDescriptor { code: 6, role: TileRole::Solid, texture: TextureKey::Brick },
            ],
        }
    }
}
