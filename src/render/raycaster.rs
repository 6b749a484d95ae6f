//! Column raycaster: grid walk per screen column, wall strips and the
//! per-column depth buffer used to occlude sprites.
use glam::Vec2;

use crate::core::map::WorldMap;
use crate::core::state::GameState;
use crate::render::surface::{Color, Surface};

const CEIL_TOP: Color = Color::new(10, 12, 18, 255);
const CEIL_MID: Color = Color::new(36, 40, 52, 255);
const FLOOR_FAR: Color = Color::new(26, 28, 30, 255);
const FLOOR_NEAR: Color = Color::new(70, 66, 60, 255);

/// Brightness of faces hit across a horizontal grid line.
pub const SIDE_SHADE: f32 = 0.7;

pub fn wall_color(material: u8) -> Color {
    match material {
        1 => Color::RED,
        2 => Color::GREEN,
        3 => Color::BLUE,
        4 => Color::WHITE,
        5 => Color::YELLOW,
        _ => Color::GRAY,
    }
}

/// Which kind of grid line the ray crossed last.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Side {
    /// A vertical (constant x) line: east/west face.
    Vertical,
    /// A horizontal (constant y) line: north/south face.
    Horizontal,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WallHit {
    /// Distance projected onto the facing axis.
    pub perp_dist: f32,
    pub material: u8,
    pub side: Side,
    pub cell: (i32, i32),
}

// (step, distance to first grid line, distance between grid lines)
#[inline]
fn axis_setup(origin: f32, dir: f32, cell: i32) -> (i32, f32, f32) {
    if dir == 0.0 {
        return (0, f32::INFINITY, f32::INFINITY);
    }
    let delta = (1.0 / dir).abs();
    if dir < 0.0 {
        (-1, (origin - cell as f32) * delta, delta)
    } else {
        (1, (cell as f32 + 1.0 - origin) * delta, delta)
    }
}

/// Walks the grid from `origin` along `dir` until a wall cell is entered.
///
/// Returns `None` if the ray leaves the grid or takes more than
/// `max_steps` cell steps; an unenclosed map never reads out of bounds.
pub fn cast_ray(map: &WorldMap, origin: Vec2, dir: Vec2, max_steps: u32) -> Option<WallHit> {
    if dir == Vec2::ZERO {
        return None;
    }
    let mut map_x = origin.x.floor() as i32;
    let mut map_y = origin.y.floor() as i32;
    let (step_x, mut side_x, delta_x) = axis_setup(origin.x, dir.x, map_x);
    let (step_y, mut side_y, delta_y) = axis_setup(origin.y, dir.y, map_y);

    for _ in 0..max_steps {
        let side = if side_x < side_y {
            side_x += delta_x;
            map_x += step_x;
            Side::Vertical
        } else {
            side_y += delta_y;
            map_y += step_y;
            Side::Horizontal
        };
        match map.get(map_x, map_y)? {
            0 => continue,
            material => {
                let perp_dist = match side {
                    Side::Vertical => side_x - delta_x,
                    Side::Horizontal => side_y - delta_y,
                };
                return Some(WallHit {
                    perp_dist,
                    material,
                    side,
                    cell: (map_x, map_y),
                });
            }
        }
    }
    None
}

/// Wall strip height in pixels, truncated toward zero.
#[inline]
pub fn strip_height(perp_dist: f32, screen_height: u32) -> i32 {
    (screen_height as f32 / perp_dist) as i32
}

/// Vertically centered `[start, end]` rows of a strip, clipped to the screen.
#[inline]
pub fn strip_span(line_height: i32, screen_height: u32) -> (i32, i32) {
    let h = screen_height as i32;
    let start = (h / 2 - line_height / 2).max(0);
    let end = (h / 2 + line_height / 2).min(h - 1);
    (start, end)
}

/// Nearest wall distance per screen column for one frame. Columns whose
/// ray found no wall hold `f32::INFINITY`.
#[derive(Clone, Debug, PartialEq)]
pub struct DepthBuffer {
    cols: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(width: usize) -> Self {
        Self { cols: vec![f32::INFINITY; width] }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cols.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cols.is_empty()
    }

    #[inline]
    pub fn get(&self, col: usize) -> Option<f32> {
        self.cols.get(col).copied()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.cols
    }
}

pub struct Raycaster {
    max_steps: u32,
}

impl Raycaster {
    pub fn new(max_steps: u32) -> Self {
        Self { max_steps }
    }

    /// Draws sky, floor and walls, and returns this frame's depth buffer.
    pub fn render(&self, fb: &mut impl Surface, state: &GameState) -> DepthBuffer {
        let (w, h) = (fb.width(), fb.height());
        paint_ceiling_and_floor(fb);

        let player = &state.player;
        let mut depth = DepthBuffer::new(w as usize);
        let mut misses = 0u32;
        for (x, z) in depth.cols.iter_mut().enumerate() {
            let camera_x = 2.0 * x as f32 / w as f32 - 1.0;
            let ray_dir = player.dir + player.plane * camera_x;
            let Some(hit) = cast_ray(&state.map, player.pos, ray_dir, self.max_steps) else {
                misses += 1;
                continue;
            };
            *z = hit.perp_dist;

            let (y0, y1) = strip_span(strip_height(hit.perp_dist, h), h);
            let mut color = wall_color(hit.material);
            if hit.side == Side::Horizontal {
                color = color.scale(SIDE_SHADE);
            }
            fb.fill_rect(x as i32, y0, 1, y1 - y0 + 1, color);
        }
        if misses > 0 {
            log::warn!("{misses} column(s) found no wall; is the map enclosed?");
        }
        depth
    }
}

fn paint_ceiling_and_floor(fb: &mut impl Surface) {
    let w = fb.width() as i32;
    let h = fb.height() as i32;
    let hh = h / 2;
    for y in 0..hh {
        let t = y as f32 / hh.max(1) as f32;
        fb.fill_rect(0, y, w, 1, CEIL_TOP.lerp(CEIL_MID, t));
    }
    for y in hh..h {
        let t = (y - hh) as f32 / (h - hh).max(1) as f32;
        fb.fill_rect(0, y, w, 1, FLOOR_FAR.lerp(FLOOR_NEAR, t));
    }
}
