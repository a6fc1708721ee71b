//! Drawing surfaces a heatmap is rendered onto.
//!
//! The heatmap driver only needs two primitives, a filled polygon and a
//! colorbar legend, plus a hint about the plot-plane extent so surfaces that
//! map to pixels can fit the simplex.

use crate::basics::RectD;
use crate::color::Rgba8;
use crate::colorbar::ColorbarSpec;

/// Target of heatmap drawing requests.
pub trait Surface {
    /// Plot-plane rectangle the following polygons lie in.
    fn set_plot_bounds(&mut self, _bounds: RectD) {}

    /// Fill the polygon with vertices `(xs[n], ys[n])` in plot-plane
    /// coordinates, outlined in `edge`.
    fn fill_polygon(&mut self, xs: &[f64], ys: &[f64], face: Rgba8, edge: Rgba8);

    /// Draw a colorbar legend.
    fn draw_colorbar(&mut self, spec: &ColorbarSpec);
}

/// One recorded drawing request.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillPolygon {
        xs: Vec<f64>,
        ys: Vec<f64>,
        face: Rgba8,
        edge: Rgba8,
    },
    Colorbar(ColorbarSpec),
}

/// Surface that records every request, for handing the geometry to another
/// plotting backend.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    bounds: Option<RectD>,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn bounds(&self) -> Option<RectD> {
        self.bounds
    }

    /// Recorded polygon fills as `(xs, ys, face)`.
    pub fn polygons(&self) -> impl Iterator<Item = (&[f64], &[f64], Rgba8)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillPolygon { xs, ys, face, .. } => {
                Some((xs.as_slice(), ys.as_slice(), *face))
            }
            DrawCommand::Colorbar(_) => None,
        })
    }

    /// The last recorded colorbar, if any.
    pub fn colorbar(&self) -> Option<&ColorbarSpec> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Colorbar(spec) => Some(spec),
            DrawCommand::FillPolygon { .. } => None,
        })
    }

    pub fn clear(&mut self) {
        self.bounds = None;
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    fn set_plot_bounds(&mut self, bounds: RectD) {
        self.bounds = Some(bounds);
    }

    fn fill_polygon(&mut self, xs: &[f64], ys: &[f64], face: Rgba8, edge: Rgba8) {
        self.commands.push(DrawCommand::FillPolygon {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            face,
            edge,
        });
    }

    fn draw_colorbar(&mut self, spec: &ColorbarSpec) {
        self.commands.push(DrawCommand::Colorbar(spec.clone()));
    }
}
