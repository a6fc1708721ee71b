//! 8-bit RGBA color with fixed-point blending.
//!
//! `Rgba8` is what colormaps produce, surfaces receive and pixel buffers
//! store.

use crate::basics::{uround, CoverType};

// ============================================================================
// Rgba8 (8-bit per channel)
// ============================================================================

/// RGBA color with u8 components (non-premultiplied).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BASE_SHIFT: u32 = 8;
    pub const BASE_SCALE: u32 = 1 << Self::BASE_SHIFT;
    pub const BASE_MASK: u32 = Self::BASE_SCALE - 1;
    pub const BASE_MSB: u32 = 1 << (Self::BASE_SHIFT - 1);

    pub const WHITE: Rgba8 = Rgba8 {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
    pub const BLACK: Rgba8 = Rgba8 {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };

    pub fn new(r: u32, g: u32, b: u32, a: u32) -> Self {
        Self {
            r: r as u8,
            g: g as u8,
            b: b as u8,
            a: a as u8,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    pub fn is_opaque(&self) -> bool {
        self.a == Self::BASE_MASK as u8
    }

    /// Fixed-point multiply, exact over u8.
    #[inline]
    pub fn multiply(a: u8, b: u8) -> u8 {
        let t: u32 = a as u32 * b as u32 + Self::BASE_MSB;
        (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT) as u8
    }

    /// Multiply a color component by a cover.
    #[inline]
    pub fn mult_cover(a: u8, b: CoverType) -> u8 {
        Self::multiply(a, b)
    }

    /// Interpolate p to q by a.
    #[inline]
    pub fn lerp(p: u8, q: u8, a: u8) -> u8 {
        let t = (q as i32 - p as i32) * a as i32 + Self::BASE_MSB as i32 - (p > q) as i32;
        (p as i32 + (((t >> Self::BASE_SHIFT) + t) >> Self::BASE_SHIFT)) as u8
    }

    /// Interpolate between `self` and `c` by parameter `k` in `[0, 1]`.
    pub fn gradient(&self, c: &Rgba8, k: f64) -> Rgba8 {
        let ik = uround(k.clamp(0.0, 1.0) * Self::BASE_MASK as f64) as u8;
        Rgba8 {
            r: Self::lerp(self.r, c.r, ik),
            g: Self::lerp(self.g, c.g, ik),
            b: Self::lerp(self.b, c.b, ik),
            a: Self::lerp(self.a, c.a, ik),
        }
    }

    /// `#rrggbb` (opaque) or `#rrggbbaa` notation.
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn no_color() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::no_color()
    }
}

/// Opaque color from a packed `0xRRGGBB` value.
pub fn rgb8_packed(v: u32) -> Rgba8 {
    Rgba8::new((v >> 16) & 0xFF, (v >> 8) & 0xFF, v & 0xFF, 255)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba8_multiply() {
        assert_eq!(Rgba8::multiply(255, 255), 255);
        assert_eq!(Rgba8::multiply(255, 0), 0);
        assert_eq!(Rgba8::multiply(128, 255), 128);
    }

    #[test]
    fn test_rgba8_lerp() {
        assert_eq!(Rgba8::lerp(0, 255, 0), 0);
        assert_eq!(Rgba8::lerp(0, 255, 255), 255);
        assert_eq!(Rgba8::lerp(100, 200, 128), 150);
        assert_eq!(Rgba8::lerp(200, 100, 255), 100);
    }

    #[test]
    fn test_rgba8_gradient_endpoints() {
        let c1 = rgb8_packed(0x000000);
        let c2 = rgb8_packed(0xFFFFFF);
        assert_eq!(c1.gradient(&c2, 0.0), c1);
        assert_eq!(c1.gradient(&c2, 1.0), c2);
        let mid = c1.gradient(&c2, 0.5);
        assert!(mid.r > 125 && mid.r < 130);
    }

    #[test]
    fn test_packed_and_hex() {
        let c = rgb8_packed(0x440154);
        assert_eq!((c.r, c.g, c.b, c.a), (0x44, 0x01, 0x54, 255));
        assert_eq!(c.to_hex(), "#440154");
        assert_eq!(Rgba8::new(1, 2, 3, 4).to_hex(), "#01020304");
        assert!(Rgba8::default().is_transparent());
        assert!(Rgba8::WHITE.is_opaque());
    }
}
