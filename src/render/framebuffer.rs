//! CPU framebuffer: a pixel buffer plus a queue of text glyphs.
//!
//! Pixels are written directly; glyphs are queued because rasterising text
//! is the host's job (it owns the fonts). The host blits the pixels first,
//! then draws the queued glyphs in order.
use crate::render::surface::{Color, Surface};

#[derive(Clone, Debug, PartialEq)]
pub struct Glyph {
    pub text: String,
    pub cx: f32,
    pub cy: f32,
    pub size: f32,
    pub color: Color,
}

pub struct Framebuffer {
    pub color_buffer: Vec<Color>,
    pub width: u32,
    pub height: u32,
    pub background_color: Color,
    pub glyphs: Vec<Glyph>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        let bg = Color::BLACK;
        Self {
            color_buffer: vec![bg; size],
            width,
            height,
            background_color: bg,
            glyphs: Vec::new(),
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
        self.glyphs.clear();
    }

    #[inline]
    pub fn set_pixel_color(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }

    /// Packs the pixels as tightly laid out RGBA8, ready for a texture upload.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.color_buffer.iter().flat_map(|c| [c.r, c.g, c.b, c.a]).collect()
    }
}

impl Surface for Framebuffer {
    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w).min(self.width as i32);
        let y1 = y.saturating_add(h).min(self.height as i32);
        if x0 >= x1 || y0 >= y1 || color.a == 0 {
            return;
        }
        let stride = self.width as usize;
        for yy in y0 as usize..y1 as usize {
            let row = &mut self.color_buffer[yy * stride + x0 as usize..yy * stride + x1 as usize];
            if color.a == 255 {
                row.fill(color);
            } else {
                for px in row {
                    *px = color.over(*px);
                }
            }
        }
    }

    fn draw_glyph(&mut self, text: &str, cx: f32, cy: f32, size: f32, color: Color) {
        self.glyphs.push(Glyph {
            text: text.to_string(),
            cx,
            cy,
            size,
            color,
        });
    }
}
