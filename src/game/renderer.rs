//! Sprite Renderer
//!
//! Draws the simulation at its logical resolution, scaled uniformly and
//! centered in the window (letterboxed). Pixel art is sampled with nearest
//! filtering. Missing sprite sheets fall back to flat colored boxes so the
//! game still runs without its assets.

use std::collections::HashMap;
use macroquad::color::{Color, BLACK, BLUE, BROWN, DARKGRAY, GREEN, ORANGE, PURPLE, RED, WHITE, YELLOW};
use macroquad::math::{vec2, Rect as SourceRect, Vec2};
use macroquad::shapes::{draw_rectangle, draw_rectangle_lines};
use macroquad::text::draw_text;
use macroquad::texture::{draw_texture_ex, load_texture, DrawTextureParams, FilterMode, Texture2D};
use macroquad::window::{clear_background, screen_height, screen_width};
use tracing::{info, warn};
use crate::assets::TextureKey;
use super::camera::Camera;
use super::entity::{Entity, EntityKind};
use super::runtime::Simulation;

/// Tint applied while an entity is flashing
const FLASH_TINT: Color = Color::new(1.0, 0.25, 0.25, 1.0);

/// GPU textures keyed by [`TextureKey`]
#[derive(Default)]
pub struct TextureCache {
    textures: HashMap<TextureKey, Texture2D>,
}

impl TextureCache {
    /// Load every sprite sheet from `dir`. Missing files are logged and
    /// skipped.
    pub async fn load(dir: &str) -> Self {
        let mut textures = HashMap::new();
        for key in TextureKey::ALL {
            let path = format!("{}/{}", dir, key.file_name());
            match load_texture(&path).await {
                Ok(texture) => {
                    texture.set_filter(FilterMode::Nearest);
                    textures.insert(key, texture);
                }
                Err(e) => warn!("failed to load {}: {}", path, e),
            }
        }
        info!("loaded {}/{} textures", textures.len(), TextureKey::ALL.len());
        Self { textures }
    }

    pub fn get(&self, key: TextureKey) -> Option<&Texture2D> {
        self.textures.get(&key)
    }
}

/// Placement of the logical view inside the window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Letterbox {
    pub scale: f32,
    pub offset: Vec2,
}

impl Letterbox {
    /// Largest uniform scale that fits `logical` in `screen`, centered.
    pub fn fit(screen: Vec2, logical: Vec2) -> Self {
        let scale = (screen.x / logical.x).min(screen.y / logical.y);
        Self {
            scale,
            offset: (screen - logical * scale) / 2.0,
        }
    }

    pub fn to_screen(&self, view: Vec2) -> Vec2 {
        self.offset + view * self.scale
    }
}

fn placeholder_color(key: TextureKey) -> Color {
    match key {
        TextureKey::PlayerIdle
        | TextureKey::PlayerRun
        | TextureKey::PlayerSlide
        | TextureKey::PlayerShoot
        | TextureKey::PlayerRunShoot
        | TextureKey::PlayerSlideShoot => BLUE,
        TextureKey::Enemy | TextureKey::EnemyHit => PURPLE,
        TextureKey::EnemyDie => DARKGRAY,
        TextureKey::Bullet => YELLOW,
        TextureKey::BulletHit => ORANGE,
        TextureKey::Ground | TextureKey::Brick => BROWN,
        TextureKey::Panel => Color::new(0.2, 0.2, 0.3, 1.0),
        TextureKey::Grass => GREEN,
    }
}

struct Frame<'a> {
    camera: &'a Camera,
    letterbox: Letterbox,
    textures: &'a TextureCache,
}

impl Frame<'_> {
    fn draw_entity(&self, entity: &Entity) {
        let (w, h) = entity.texture.frame_size();
        let screen = self.letterbox.to_screen(self.camera.to_view(entity.position));
        let size = vec2(w, h) * self.letterbox.scale;

        match self.textures.get(entity.texture) {
            Some(texture) => {
                let tint = if entity.should_flash { FLASH_TINT } else { WHITE };
                let frame = entity.sprite_frame() as f32;
                draw_texture_ex(
                    texture,
                    screen.x,
                    screen.y,
                    tint,
                    DrawTextureParams {
                        dest_size: Some(size),
                        source: Some(SourceRect::new(frame * w, 0.0, w, h)),
                        flip_x: entity.facing < 0.0,
                        ..Default::default()
                    },
                );
            }
            None => {
                let color = if entity.should_flash { RED } else { placeholder_color(entity.texture) };
                draw_rectangle(screen.x, screen.y, size.x, size.y, color);
            }
        }
    }

    fn draw_collider(&self, entity: &Entity) {
        let bounds = entity.world_collider();
        let screen = self.letterbox.to_screen(self.camera.to_view(vec2(bounds.x, bounds.y)));
        let color = match entity.kind() {
            EntityKind::Level => DARKGRAY,
            EntityKind::Player => GREEN,
            EntityKind::Enemy => RED,
            EntityKind::Projectile => YELLOW,
        };
        draw_rectangle_lines(
            screen.x,
            screen.y,
            bounds.w * self.letterbox.scale,
            bounds.h * self.letterbox.scale,
            1.0,
            color,
        );
    }

    /// Skip anything more than a tile outside the view
    fn visible(&self, entity: &Entity) -> bool {
        let view = self.camera.to_view(entity.position);
        let (w, h) = entity.texture.frame_size();
        view.x > -w && view.x < self.camera.viewport.w && view.y > -h && view.y < self.camera.viewport.h
    }
}

/// Draw one frame: background tiles, level, characters, projectiles,
/// foreground tiles, then the debug overlay if enabled.
pub fn draw_frame(sim: &Simulation, textures: &TextureCache) {
    clear_background(BLACK);

    let config = sim.config();
    let frame = Frame {
        camera: &sim.camera,
        letterbox: Letterbox::fit(
            vec2(screen_width(), screen_height()),
            vec2(config.logical_width, config.logical_height),
        ),
        textures,
    };
    let world = sim.world();

    let background = world.background.iter();
    let simulated = world.iter().filter(|e| !e.is_inactive());
    let foreground = world.foreground.iter();
    for entity in background.chain(simulated).chain(foreground) {
        if frame.visible(entity) {
            frame.draw_entity(entity);
        }
    }

    if sim.debug {
        for entity in world.iter().filter(|e| !e.is_inactive()) {
            if frame.visible(entity) {
                frame.draw_collider(entity);
            }
        }
        draw_text(&sim.stats().to_string(), 10.0, 24.0, 24.0, WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letterbox_wide_window() {
        let letterbox = Letterbox::fit(vec2(1600.0, 900.0), vec2(640.0, 320.0));
        assert_eq!(letterbox.scale, 2.5);
        assert_eq!(letterbox.offset, vec2(0.0, 50.0));
        assert_eq!(letterbox.to_screen(vec2(640.0, 320.0)), vec2(1600.0, 850.0));
    }

    #[test]
    fn test_letterbox_tall_window() {
        let letterbox = Letterbox::fit(vec2(640.0, 640.0), vec2(640.0, 320.0));
        assert_eq!(letterbox.scale, 1.0);
        assert_eq!(letterbox.offset, vec2(0.0, 160.0));
    }
}
