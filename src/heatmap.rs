//! Heatmap rendering driver.
//!
//! Resolves the color range and colormap, walks the polygons of the chosen
//! style and hands each coloured polygon, then optionally a colorbar, to a
//! [`Surface`].

use log::{debug, trace, warn};

use crate::basics::RectD;
use crate::colorbar::ColorbarSpec;
use crate::colormap::{colormapper, ColormapRegistry};
use crate::data::HeatmapData;
use crate::error::{HeatmapError, Result};
use crate::polygon_iter::polygon_iterator;
use crate::raster_surface::{RasterSurface, RasterSurfaceConfig};
use crate::simplex::{normalize, project_point, simplex_iterator, Permutation};
use crate::style::Style;
use crate::surface::Surface;

/// Default lattice scale for [`heatmapf`].
pub const DEFAULT_SCALE: u32 = 10;

// ============================================================================
// HeatmapOptions
// ============================================================================

/// Rendering options shared by [`heatmap`], [`heatmapf`] and
/// [`heatmap_raster`].
///
/// `style` and `cmap` are kept as names and resolved at render time, so
/// option sets loaded from configuration are validated in one place.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeatmapOptions {
    /// Lower end of the color range; derived from the data when `None`.
    pub vmin: Option<f64>,
    /// Upper end of the color range; derived from the data when `None`.
    pub vmax: Option<f64>,
    /// Colormap name looked up in the registry; registry default when `None`.
    pub cmap: Option<String>,
    pub scientific: bool,
    pub style: String,
    pub colorbar: bool,
    pub permutation: Option<Permutation>,
}

impl Default for HeatmapOptions {
    fn default() -> Self {
        Self {
            vmin: None,
            vmax: None,
            cmap: None,
            scientific: false,
            style: Style::Triangular.into(),
            colorbar: true,
            permutation: None,
        }
    }
}

impl HeatmapOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vmin(mut self, v: f64) -> Self {
        self.vmin = Some(v);
        self
    }

    pub fn vmax(mut self, v: f64) -> Self {
        self.vmax = Some(v);
        self
    }

    /// Accepts a [`ColormapName`](crate::colormap::ColormapName) or any
    /// registered name.
    pub fn cmap(mut self, name: impl Into<String>) -> Self {
        self.cmap = Some(name.into());
        self
    }

    pub fn scientific(mut self, on: bool) -> Self {
        self.scientific = on;
        self
    }

    /// Accepts a [`Style`] or a style name; names are matched on their
    /// first letter when rendering.
    pub fn style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
    }

    pub fn colorbar(mut self, on: bool) -> Self {
        self.colorbar = on;
        self
    }

    pub fn permutation(mut self, permutation: Permutation) -> Self {
        self.permutation = Some(permutation);
        self
    }
}

// ============================================================================
// Range resolution
// ============================================================================

/// Color range from explicit bounds, falling back to the extremes of the
/// defined values of `data`.
pub fn resolve_color_range(
    data: &HeatmapData,
    vmin: Option<f64>,
    vmax: Option<f64>,
) -> Result<(f64, f64)> {
    let derived = || data.value_range().ok_or(HeatmapError::EmptyData);
    let lo = match vmin {
        Some(v) => v,
        None => derived()?.0,
    };
    let hi = match vmax {
        Some(v) => v,
        None => derived()?.1,
    };

    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        return Err(HeatmapError::InvalidRange { vmin: lo, vmax: hi });
    }
    if lo == hi {
        warn!("degenerate color range [{lo}, {hi}], every cell maps to the low end");
    }
    Ok((lo, hi))
}

/// Plot-plane bounding box of the simplex of `scale`.
pub fn simplex_bounds(scale: u32, permutation: Option<&Permutation>) -> RectD {
    let s = scale as f64;
    let corners = [[s, 0.0, 0.0], [0.0, s, 0.0], [0.0, 0.0, s]]
        .map(|c| project_point(c, permutation));
    let mut r = RectD::new(corners[0].x, corners[0].y, corners[0].x, corners[0].y);
    for c in &corners[1..] {
        r.include(*c);
    }
    r
}

// ============================================================================
// Drivers
// ============================================================================

/// Render `data` onto `surface`.
///
/// Fails before drawing anything if the style, colormap or color range
/// cannot be resolved. Cells whose value is undefined are skipped.
pub fn heatmap<'s, S: Surface>(
    data: &HeatmapData,
    opts: &HeatmapOptions,
    registry: &ColormapRegistry,
    surface: &'s mut S,
) -> Result<&'s mut S> {
    let style: Style = opts.style.parse()?;
    let cmap = registry.resolve(opts.cmap.as_deref())?;
    let (vmin, vmax) = resolve_color_range(data, opts.vmin, opts.vmax)?;

    debug!(
        "heatmap: style={style} scale={} points={} range=[{vmin}, {vmax}] cmap={}",
        data.scale(),
        data.len(),
        cmap.name()
    );

    surface.set_plot_bounds(simplex_bounds(data.scale(), opts.permutation.as_ref()));

    let mut drawn = 0usize;
    let mut dropped = 0usize;
    for cell in polygon_iterator(data, style, opts.permutation) {
        let Some(value) = cell.value else {
            dropped += 1;
            continue;
        };
        let color = colormapper(value, vmin, vmax, cmap);
        let (xs, ys) = cell.xs_ys();
        surface.fill_polygon(&xs, &ys, color, color);
        drawn += 1;
    }
    trace!("heatmap: drew {drawn} polygons, dropped {dropped} with undefined value");

    if opts.colorbar {
        surface.draw_colorbar(&ColorbarSpec::new(vmin, vmax, cmap.clone(), opts.scientific));
    }
    Ok(surface)
}

/// Evaluate `func` on the normalized lattice points of the simplex of
/// `scale` and render the result.
///
/// The color range is always derived from the computed values; `vmin` and
/// `vmax` in `opts` are ignored.
pub fn heatmapf<'s, F, S>(
    func: F,
    scale: u32,
    boundary: bool,
    opts: &HeatmapOptions,
    registry: &ColormapRegistry,
    surface: &'s mut S,
) -> Result<&'s mut S>
where
    F: Fn([f64; 3]) -> f64,
    S: Surface,
{
    if scale == 0 {
        return Err(HeatmapError::InvalidScale);
    }
    let data = HeatmapData::from_pairs(
        scale,
        simplex_iterator(scale, boundary).map(|p| {
            let v = func(normalize([p.i as f64, p.j as f64, p.k as f64]));
            ((p.i, p.j), Some(v))
        }),
    )?;
    let opts = HeatmapOptions {
        vmin: None,
        vmax: None,
        ..opts.clone()
    };
    heatmap(&data, &opts, registry, surface)
}

/// Render `data` onto a new [`RasterSurface`] built from `config`.
pub fn heatmap_raster(
    data: &HeatmapData,
    opts: &HeatmapOptions,
    registry: &ColormapRegistry,
    config: RasterSurfaceConfig,
) -> Result<RasterSurface> {
    let mut surface = RasterSurface::with_config(config);
    heatmap(data, opts, registry, &mut surface)?;
    Ok(surface)
}

// ============================================================================
// Tests
// ============================================================================
