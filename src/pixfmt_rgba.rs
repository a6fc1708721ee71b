//! RGBA pixel format with alpha blending.
//!
//! Pixels are stored as RGBA32 (4 bytes per pixel, non-premultiplied alpha)
//! in an owned, row-major buffer with no row padding.
//!
//! Provides the `PixelFormat` trait and the `RgbaBuffer` implementation.

use crate::basics::CoverType;
use crate::color::Rgba8;

// ============================================================================
// PixelFormat trait
// ============================================================================

/// Trait for pixel stores that can blend colors with coverage.
///
/// Callers guarantee coordinates are inside the buffer; `RendererBase`
/// clips before delegating.
pub trait PixelFormat {
    type ColorType;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Blend a single pixel at (x, y) with color `c` and coverage `cover`.
    fn blend_pixel(&mut self, x: i32, y: i32, c: &Self::ColorType, cover: CoverType);

    /// Blend a horizontal line of `len` pixels at (x, y) with uniform color and coverage.
    fn blend_hline(&mut self, x: i32, y: i32, len: u32, c: &Self::ColorType, cover: CoverType);

    /// Blend a horizontal span of `len` pixels with per-pixel coverage values.
    fn blend_solid_hspan(
        &mut self,
        x: i32,
        y: i32,
        len: u32,
        c: &Self::ColorType,
        covers: &[CoverType],
    );

    /// Copy (overwrite) a horizontal line of `len` pixels with color `c`.
    fn copy_hline(&mut self, x: i32, y: i32, len: u32, c: &Self::ColorType);

    /// Get the pixel color at (x, y).
    fn pixel(&self, x: i32, y: i32) -> Self::ColorType;
}

// ============================================================================
// RgbaBuffer
// ============================================================================

const BPP: usize = 4; // bytes per pixel

/// Owned RGBA32 image. Component order: R=0, G=1, B=2, A=3.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbaBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbaBuffer {
    /// A `width × height` buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * BPP],
        }
    }

    /// Raw RGBA bytes, row by row from the top.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn offset(&self, x: i32, y: i32) -> usize {
        (y as usize * self.width as usize + x as usize) * BPP
    }

    #[inline]
    fn span_mut(&mut self, x: i32, y: i32, len: u32) -> &mut [u8] {
        let start = self.offset(x, y);
        &mut self.data[start..start + len as usize * BPP]
    }

    #[inline]
    fn blend_pix(p: &mut [u8], c: &Rgba8, alpha: u8) {
        if alpha == 255 {
            p.copy_from_slice(&[c.r, c.g, c.b, 255]);
        } else {
            p[0] = Rgba8::lerp(p[0], c.r, alpha);
            p[1] = Rgba8::lerp(p[1], c.g, alpha);
            p[2] = Rgba8::lerp(p[2], c.b, alpha);
            p[3] = Rgba8::lerp(p[3], 255, alpha);
        }
    }
}

impl PixelFormat for RgbaBuffer {
    type ColorType = Rgba8;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: i32, y: i32) -> Rgba8 {
        let off = self.offset(x, y);
        let p = &self.data[off..off + BPP];
        Rgba8::new(p[0] as u32, p[1] as u32, p[2] as u32, p[3] as u32)
    }

    fn copy_hline(&mut self, x: i32, y: i32, len: u32, c: &Rgba8) {
        for px in self.span_mut(x, y, len).chunks_exact_mut(BPP) {
            px.copy_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    }

    fn blend_pixel(&mut self, x: i32, y: i32, c: &Rgba8, cover: CoverType) {
        self.blend_hline(x, y, 1, c, cover);
    }

    fn blend_hline(&mut self, x: i32, y: i32, len: u32, c: &Rgba8, cover: CoverType) {
        let alpha = Rgba8::mult_cover(c.a, cover);
        if alpha == 0 {
            return;
        }
        for px in self.span_mut(x, y, len).chunks_exact_mut(BPP) {
            Self::blend_pix(px, c, alpha);
        }
    }

    fn blend_solid_hspan(&mut self, x: i32, y: i32, len: u32, c: &Rgba8, covers: &[CoverType]) {
        let len = len.min(covers.len() as u32);
        for (px, &cov) in self.span_mut(x, y, len).chunks_exact_mut(BPP).zip(covers) {
            let alpha = Rgba8::mult_cover(c.a, cov);
            if alpha > 0 {
                Self::blend_pix(px, c, alpha);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
