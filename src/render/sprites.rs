//! Billboard sprites and the first-person weapon overlay.
//!
//! Sprites are drawn farthest first so nearer glyphs cover farther ones.
//! Walls occlude via the depth buffer with a single test at the sprite's
//! center column.
use glam::Vec2;
use rand::Rng;

use crate::core::entity::{Entity, EntityKind};
use crate::core::player::Player;
use crate::core::state::GameState;
use crate::render::raycaster::DepthBuffer;
use crate::render::surface::{Color, Surface};

/// Sprites closer than this along the view axis are not drawn.
pub const NEAR: f32 = 0.1;
const MIN_DET: f32 = 1e-6;
const GLYPH_SCALE: f32 = 0.5;

pub const WEAPON_GLYPH: &str = "_|_";
pub const WEAPON_FIRING_GLYPH: &str = "*|*";
const WEAPON_SIZE: f32 = 64.0;
const FLASH: Color = Color::new(255, 220, 120, 48);

fn glyph_color(e: &Entity) -> Color {
    match e.kind {
        EntityKind::Enemy if e.is_dead() => Color::GRAY,
        EntityKind::Enemy => Color::RED,
        EntityKind::Treasure => Color::YELLOW,
        EntityKind::Medkit => Color::GREEN,
        EntityKind::Ammo => Color::new(120, 180, 255, 255),
    }
}

/// Screen placement of a sprite.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    pub screen_x: f32,
    /// Forward distance along the view axis.
    pub depth: f32,
    pub size: f32,
}

/// Inverse of the (plane, dir) camera matrix.
pub struct CameraBasis {
    origin: Vec2,
    dir: Vec2,
    plane: Vec2,
    inv_det: f32,
}

impl CameraBasis {
    /// `None` when facing and plane are (nearly) parallel.
    pub fn new(player: &Player) -> Option<Self> {
        let det = player.plane.x * player.dir.y - player.dir.x * player.plane.y;
        if det.abs() < MIN_DET {
            return None;
        }
        Some(Self {
            origin: player.pos,
            dir: player.dir,
            plane: player.plane,
            inv_det: 1.0 / det,
        })
    }

    /// World point to camera space: x is lateral, y is depth.
    #[inline]
    pub fn to_camera(&self, world: Vec2) -> Vec2 {
        let s = world - self.origin;
        Vec2::new(
            self.inv_det * (self.dir.y * s.x - self.dir.x * s.y),
            self.inv_det * (-self.plane.y * s.x + self.plane.x * s.y),
        )
    }

    pub fn project(&self, world: Vec2, screen_w: u32, screen_h: u32) -> Option<Projection> {
        let cam = self.to_camera(world);
        if cam.y <= NEAR {
            return None;
        }
        Some(Projection {
            screen_x: (screen_w as f32 / 2.0) * (1.0 + cam.x / cam.y),
            depth: cam.y,
            size: (screen_h as f32 / cam.y).abs(),
        })
    }
}

pub struct SpriteCompositor {
    recoil_jitter: f32,
}

impl SpriteCompositor {
    pub fn new(recoil_jitter: f32) -> Self {
        Self { recoil_jitter }
    }

    pub fn render(
        &self,
        fb: &mut impl Surface,
        state: &GameState,
        depth: &DepthBuffer,
        rng: &mut impl Rng,
    ) {
        self.draw_sprites_sorted(fb, state, depth);
        self.draw_weapon(fb, state.is_shooting, rng);
    }

    /// Returns how many sprites passed the depth test.
    pub fn draw_sprites_sorted(
        &self,
        fb: &mut impl Surface,
        state: &GameState,
        depth: &DepthBuffer,
    ) -> usize {
        let Some(basis) = CameraBasis::new(&state.player) else {
            log::warn!("degenerate camera basis, skipping sprites this frame");
            return 0;
        };
        let (w, h) = (fb.width(), fb.height());
        let pos = state.player.pos;

        let mut sprites: Vec<(&Entity, f32)> = state
            .entities
            .iter()
            .filter(|e| e.is_visible())
            .map(|e| (e, e.pos.distance_squared(pos)))
            .collect();
        sprites.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        let mut drawn = 0;
        for (e, _) in sprites {
            let Some(p) = basis.project(e.pos, w, h) else {
                continue;
            };
            let col = p.screen_x.floor();
            if col < 0.0 || col >= w as f32 {
                continue;
            }
            if depth.get(col as usize).is_none_or(|wall| wall <= p.depth) {
                continue;
            }
            let size = (p.size * GLYPH_SCALE).clamp(4.0, h as f32);
            fb.draw_glyph(&e.glyph, p.screen_x, h as f32 / 2.0, size, glyph_color(e));
            drawn += 1;
        }
        drawn
    }

    pub fn draw_weapon(&self, fb: &mut impl Surface, shooting: bool, rng: &mut impl Rng) {
        let (w, h) = (fb.width() as f32, fb.height() as f32);
        let mut cy = h - WEAPON_SIZE * 0.6;
        if shooting {
            fb.fill_rect(0, 0, w as i32, h as i32, FLASH);
            if self.recoil_jitter > 0.0 {
                cy += rng.gen_range(-self.recoil_jitter..=self.recoil_jitter);
            }
        }
        let glyph = if shooting { WEAPON_FIRING_GLYPH } else { WEAPON_GLYPH };
        fb.draw_glyph(glyph, w / 2.0, cy, WEAPON_SIZE, Color::WHITE);
    }
}
