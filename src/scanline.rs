//! Scanline containers fed by the rasterizer.
//!
//! A scanline holds the anti-aliased coverage of one pixel row as a list of
//! horizontal spans with per-pixel coverage bytes.

use crate::basics::CoverType;

// ============================================================================
// Scanline trait: the interface that sweep_scanline feeds data into
// ============================================================================

/// Trait for scanline containers that accumulate coverage data.
pub trait Scanline {
    /// Prepare for a new scanline, clearing all span data.
    fn reset_spans(&mut self);

    /// Add a single cell at position `x` with coverage `cover`.
    fn add_cell(&mut self, x: i32, cover: u32);

    /// Add a horizontal span of `len` pixels starting at `x`, all with `cover`.
    fn add_span(&mut self, x: i32, len: u32, cover: u32);

    /// Finalize the scanline at the given Y coordinate.
    fn finalize(&mut self, y: i32);

    /// Number of spans in this scanline (0 means empty).
    fn num_spans(&self) -> u32;

    /// The Y coordinate of this scanline.
    fn y(&self) -> i32;
}

// ============================================================================
// ScanlineU8: unpacked scanline with per-pixel coverage
// ============================================================================

/// A horizontal run within a scanline; `cover_offset` indexes the covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanlineSpan {
    pub x: i32,
    pub len: u32,
    pub cover_offset: usize,
}

/// Unpacked scanline with one coverage byte per pixel.
///
/// X must increase monotonically between `reset_spans()` calls; adjacent
/// cells and spans are merged into a single span.
#[derive(Debug, Clone, Default)]
pub struct ScanlineU8 {
    y_val: i32,
    covers: Vec<CoverType>,
    spans: Vec<ScanlineSpan>,
}

impl ScanlineU8 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spans(&self) -> &[ScanlineSpan] {
        &self.spans
    }

    /// Coverage bytes of one span.
    pub fn span_covers(&self, span: &ScanlineSpan) -> &[CoverType] {
        &self.covers[span.cover_offset..span.cover_offset + span.len as usize]
    }

    fn push(&mut self, x: i32, len: u32, cover: u32) {
        let cover = cover.min(255) as CoverType;
        let extends = self
            .spans
            .last()
            .is_some_and(|last| last.x + last.len as i32 == x);
        if extends {
            if let Some(last) = self.spans.last_mut() {
                last.len += len;
            }
        } else {
            self.spans.push(ScanlineSpan {
                x,
                len,
                cover_offset: self.covers.len(),
            });
        }
        self.covers
            .extend(std::iter::repeat(cover).take(len as usize));
    }
}

impl Scanline for ScanlineU8 {
    fn reset_spans(&mut self) {
        self.spans.clear();
        self.covers.clear();
    }

    fn add_cell(&mut self, x: i32, cover: u32) {
        self.push(x, 1, cover);
    }

    fn add_span(&mut self, x: i32, len: u32, cover: u32) {
        if len > 0 {
            self.push(x, len, cover);
        }
    }

    fn finalize(&mut self, y: i32) {
        self.y_val = y;
    }

    fn num_spans(&self) -> u32 {
        self.spans.len() as u32
    }

    fn y(&self) -> i32 {
        self.y_val
    }
}
