//! Clipping renderer and solid-color scanline rendering.
//!
//! `RendererBase` wraps a pixel format and clips every operation to the
//! buffer; `render_scanlines_aa_solid` drains a rasterizer into it.

use crate::basics::{CoverType, RectI};
use crate::pixfmt_rgba::PixelFormat;
use crate::rasterizer::RasterizerScanlineAa;
use crate::scanline::{Scanline, ScanlineU8};

// ============================================================================
// RendererBase: clip-and-delegate renderer
// ============================================================================

/// Base renderer that clips all operations to the buffer before delegating
/// to the underlying pixel format.
pub struct RendererBase<PF: PixelFormat> {
    ren: PF,
    clip_box: RectI,
}

impl<PF: PixelFormat> RendererBase<PF> {
    /// Create a new renderer wrapping the given pixel format.
    /// The clip box is initialized to the full buffer extent.
    pub fn new(ren: PF) -> Self {
        let w = ren.width() as i32;
        let h = ren.height() as i32;
        Self {
            ren,
            clip_box: RectI::new(0, 0, w - 1, h - 1),
        }
    }

    #[inline]
    pub fn inbox(&self, x: i32, y: i32) -> bool {
        self.clip_box.hit_test(x, y)
    }

    pub fn ren(&self) -> &PF {
        &self.ren
    }

    pub fn into_inner(self) -> PF {
        self.ren
    }

    // ========================================================================
    // Rendering operations (clip then delegate)
    // ========================================================================

    /// Clear the entire buffer to a solid color.
    pub fn clear(&mut self, c: &PF::ColorType) {
        let w = self.ren.width();
        if w > 0 {
            for y in 0..self.ren.height() as i32 {
                self.ren.copy_hline(0, y, w, c);
            }
        }
    }

    /// Get the pixel at (x, y), or default if outside the buffer.
    pub fn pixel(&self, x: i32, y: i32) -> PF::ColorType
    where
        PF::ColorType: Default,
    {
        if self.inbox(x, y) {
            self.ren.pixel(x, y)
        } else {
            PF::ColorType::default()
        }
    }

    /// Blend a horizontal line (clipped). x1, x2 are inclusive endpoints.
    pub fn blend_hline(
        &mut self,
        mut x1: i32,
        y: i32,
        mut x2: i32,
        c: &PF::ColorType,
        cover: CoverType,
    ) {
        if x1 > x2 {
            std::mem::swap(&mut x1, &mut x2);
        }
        let cb = self.clip_box;
        if y > cb.y2 || y < cb.y1 || x1 > cb.x2 || x2 < cb.x1 {
            return;
        }
        x1 = x1.max(cb.x1);
        x2 = x2.min(cb.x2);
        self.ren.blend_hline(x1, y, (x2 - x1 + 1) as u32, c, cover);
    }

    /// Blend a vertical line (clipped). y1, y2 are inclusive endpoints.
    pub fn blend_vline(
        &mut self,
        x: i32,
        mut y1: i32,
        mut y2: i32,
        c: &PF::ColorType,
        cover: CoverType,
    ) {
        if y1 > y2 {
            std::mem::swap(&mut y1, &mut y2);
        }
        let cb = self.clip_box;
        if x > cb.x2 || x < cb.x1 || y1 > cb.y2 || y2 < cb.y1 {
            return;
        }
        for y in y1.max(cb.y1)..=y2.min(cb.y2) {
            self.ren.blend_pixel(x, y, c, cover);
        }
    }

    /// Blend a solid horizontal span with per-pixel coverage (clipped).
    pub fn blend_solid_hspan(
        &mut self,
        mut x: i32,
        y: i32,
        mut len: i32,
        c: &PF::ColorType,
        covers: &[CoverType],
    ) {
        let cb = self.clip_box;
        if y > cb.y2 || y < cb.y1 {
            return;
        }

        let mut covers_offset = 0usize;
        if x < cb.x1 {
            let d = cb.x1 - x;
            len -= d;
            if len <= 0 {
                return;
            }
            covers_offset += d as usize;
            x = cb.x1;
        }
        if x + len > cb.x2 + 1 {
            len = cb.x2 - x + 1;
            if len <= 0 {
                return;
            }
        }
        self.ren
            .blend_solid_hspan(x, y, len as u32, c, &covers[covers_offset..]);
    }
}

// ============================================================================
// Scanline rendering
// ============================================================================

/// Render all scanlines from the rasterizer with a solid color.
pub fn render_scanlines_aa_solid<PF: PixelFormat>(
    ras: &mut RasterizerScanlineAa,
    sl: &mut ScanlineU8,
    ren: &mut RendererBase<PF>,
    color: &PF::ColorType,
) {
    if !ras.rewind_scanlines() {
        return;
    }
    while ras.sweep_scanline(sl) {
        let y = sl.y();
        for span in sl.spans() {
            ren.blend_solid_hspan(span.x, y, span.len as i32, color, sl.span_covers(span));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
