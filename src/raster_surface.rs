//! In-memory RGBA image surface.
//!
//! The plot area occupies the image minus its margins and a colorbar band
//! on the right. Polygons are mapped from the plot plane through a
//! `TransViewport` (uniform scale, centred, y up) and filled with the anti-aliased
//! rasterizer; edges are stroked as thin quads. The colorbar is a vertical
//! gradient strip with tick marks; tick labels are kept as text.

use crate::basics::{iround, PointD, RectD, RectI, COVER_FULL};
use crate::color::Rgba8;
use crate::colorbar::{ColorbarSpec, DEFAULT_TICKS};
use crate::pixfmt_rgba::RgbaBuffer;
use crate::rasterizer::RasterizerScanlineAa;
use crate::renderer::{render_scanlines_aa_solid, RendererBase};
use crate::scanline::ScanlineU8;
use crate::simplex::SQRT3_OVER_2;
use crate::surface::Surface;
use crate::viewport::TransViewport;

/// Image size and layout of a [`RasterSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct RasterSurfaceConfig {
    pub width: u32,
    pub height: u32,
    pub background: Rgba8,
    /// Blank border around the plot area and the colorbar, in pixels.
    pub margin: u32,
    pub colorbar_width: u32,
    /// Width of polygon outlines in pixels; 0 disables outlines.
    pub edge_width: f64,
    pub tick_color: Rgba8,
    pub tick_length: u32,
}

impl Default for RasterSurfaceConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            background: Rgba8::WHITE,
            margin: 20,
            colorbar_width: 20,
            edge_width: 0.5,
            tick_color: Rgba8::BLACK,
            tick_length: 4,
        }
    }
}

/// [`Surface`] that rasterizes into an RGBA image.
pub struct RasterSurface {
    config: RasterSurfaceConfig,
    ren: RendererBase<RgbaBuffer>,
    ras: RasterizerScanlineAa,
    sl: ScanlineU8,
    viewport: TransViewport,
    colorbar_labels: Vec<(f64, String)>,
}

impl RasterSurface {
    /// A `width × height` surface with the default layout.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_config(RasterSurfaceConfig {
            width,
            height,
            ..RasterSurfaceConfig::default()
        })
    }

    pub fn with_config(config: RasterSurfaceConfig) -> Self {
        let mut ren = RendererBase::new(RgbaBuffer::new(config.width, config.height));
        ren.clear(&config.background);

        let mut viewport = TransViewport::new();
        let plot = Self::plot_area(&config);
        viewport.set_device_viewport(plot.x1, plot.y1, plot.x2, plot.y2);
        viewport.set_world_viewport(0.0, 0.0, 1.0, SQRT3_OVER_2);

        Self {
            config,
            ren,
            ras: RasterizerScanlineAa::new(),
            sl: ScanlineU8::new(),
            viewport,
            colorbar_labels: Vec::new(),
        }
    }

    pub fn config(&self) -> &RasterSurfaceConfig {
        &self.config
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }

    /// Pixel at `(x, y)` counted from the top-left; transparent outside.
    pub fn pixel(&self, x: i32, y: i32) -> Rgba8 {
        self.ren.pixel(x, y)
    }

    /// Raw RGBA bytes, row by row from the top.
    pub fn as_bytes(&self) -> &[u8] {
        self.ren.ren().as_bytes()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.ren.into_inner().into_bytes()
    }

    /// Tick values and labels of the last colorbar drawn.
    pub fn colorbar_labels(&self) -> &[(f64, String)] {
        &self.colorbar_labels
    }

    pub fn viewport(&self) -> &TransViewport {
        &self.viewport
    }

    /// Device rectangle available to the plot.
    pub fn plot_area(config: &RasterSurfaceConfig) -> RectD {
        let m = config.margin as f64;
        let right = config.width as f64 - 2.0 * m - config.colorbar_width as f64;
        RectD::new(m, m, right.max(m), (config.height as f64 - m).max(m))
    }

    /// Pixel rectangle of the colorbar strip, inclusive.
    pub fn colorbar_area(config: &RasterSurfaceConfig) -> RectI {
        let m = config.margin as i32;
        let x2 = config.width as i32 - m - 1;
        RectI::new(
            x2 - config.colorbar_width as i32 + 1,
            m,
            x2,
            config.height as i32 - m - 1,
        )
    }

    fn fill_device(&mut self, vertices: &[PointD], color: Rgba8) {
        self.ras.reset();
        self.ras.add_polygon(vertices);
        render_scanlines_aa_solid(&mut self.ras, &mut self.sl, &mut self.ren, &color);
    }

    fn stroke_device(&mut self, vertices: &[PointD], color: Rgba8) {
        let half = self.config.edge_width * 0.5;
        self.ras.reset();
        for (idx, &p0) in vertices.iter().enumerate() {
            let p1 = vertices[(idx + 1) % vertices.len()];
            let (dx, dy) = (p1.x - p0.x, p1.y - p0.y);
            let len = (dx * dx + dy * dy).sqrt();
            if len == 0.0 {
                continue;
            }
            let (nx, ny) = (-dy / len * half, dx / len * half);
            // Each side goes in as its own contour; non-zero winding unions the overlaps.
            self.ras.add_polygon(&[
                PointD::new(p0.x + nx, p0.y + ny),
                PointD::new(p1.x + nx, p1.y + ny),
                PointD::new(p1.x - nx, p1.y - ny),
                PointD::new(p0.x - nx, p0.y - ny),
            ]);
        }
        render_scanlines_aa_solid(&mut self.ras, &mut self.sl, &mut self.ren, &color);
    }
}

impl Surface for RasterSurface {
    fn set_plot_bounds(&mut self, bounds: RectD) {
        self.viewport
            .set_world_viewport(bounds.x1, bounds.y1, bounds.x2, bounds.y2);
    }

    fn fill_polygon(&mut self, xs: &[f64], ys: &[f64], face: Rgba8, edge: Rgba8) {
        let vertices: Vec<PointD> = xs
            .iter()
            .zip(ys)
            .map(|(&x, &y)| self.viewport.transform(PointD::new(x, y)))
            .collect();
        if vertices.len() < 3 {
            return;
        }
        if !face.is_transparent() {
            self.fill_device(&vertices, face);
        }
        if self.config.edge_width > 0.0 && !edge.is_transparent() {
            self.stroke_device(&vertices, edge);
        }
    }

    fn draw_colorbar(&mut self, spec: &ColorbarSpec) {
        let area = Self::colorbar_area(&self.config);
        self.colorbar_labels = spec.ticks(DEFAULT_TICKS);
        if !area.is_valid() {
            return;
        }

        let rows = (area.y2 - area.y1) as f64;
        for y in area.y1..=area.y2 {
            let t = if rows > 0.0 {
                (area.y2 - y) as f64 / rows
            } else {
                0.0
            };
            let c = spec.colormap.map(t);
            self.ren.blend_hline(area.x1, y, area.x2, &c, COVER_FULL);
        }

        let tick = self.config.tick_color;
        let tick_end = area.x2 + self.config.tick_length as i32;
        for (value, _) in &self.colorbar_labels {
            let y = area.y2 - iround(spec.position(*value) * rows);
            self.ren.blend_hline(area.x2 + 1, y, tick_end, &tick, COVER_FULL);
        }
        self.ren
            .blend_vline(area.x2 + 1, area.y1, area.y2, &tick, COVER_FULL);
    }
}

// ============================================================================
// Tests
// ============================================================================
