//! Display surface interface and colors.

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0, 255);
    pub const WHITE: Color = Color::new(255, 255, 255, 255);
    pub const RED: Color = Color::new(220, 40, 40, 255);
    pub const GREEN: Color = Color::new(40, 200, 60, 255);
    pub const BLUE: Color = Color::new(50, 80, 230, 255);
    pub const YELLOW: Color = Color::new(240, 220, 60, 255);
    pub const GRAY: Color = Color::new(128, 128, 128, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Multiplies RGB by `k`, keeping alpha.
    #[inline]
    pub fn scale(self, k: f32) -> Self {
        let s = k.max(0.0);
        let mul = |v: u8| -> u8 { (v as f32 * s).min(255.0) as u8 };
        Color::new(mul(self.r), mul(self.g), mul(self.b), self.a)
    }

    #[inline]
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let f = |x: u8, y: u8| -> u8 { ((x as f32) * (1.0 - t) + (y as f32) * t) as u8 };
        Color::new(
            f(self.r, other.r),
            f(self.g, other.g),
            f(self.b, other.b),
            f(self.a, other.a),
        )
    }

    /// Source-over blend of `self` onto an opaque `dst`.
    #[inline]
    pub fn over(self, dst: Color) -> Color {
        if self.a == 255 {
            return self;
        }
        dst.lerp(self.with_alpha(255), self.a as f32 / 255.0).with_alpha(dst.a)
    }
}

/// Rectangular drawing target supplied by the host.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Fills a rectangle, alpha-blending when `color.a < 255`. Parts
    /// outside the surface are clipped.
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color);

    /// Draws `text` centered on (`cx`, `cy`) at `size` pixels.
    fn draw_glyph(&mut self, text: &str, cx: f32, cy: f32, size: f32, color: Color);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_darkens_and_keeps_alpha() {
        let c = Color::new(200, 100, 50, 255).scale(0.5);
        assert_eq!(c, Color::new(100, 50, 25, 255));
    }

    #[test]
    fn opaque_over_replaces() {
        assert_eq!(Color::RED.over(Color::BLUE), Color::RED);
    }

    #[test]
    fn translucent_over_blends() {
        let c = Color::WHITE.with_alpha(128).over(Color::BLACK);
        assert!(c.r > 120 && c.r < 136);
        assert_eq!(c.a, 255);
    }
}
