//! Enumeration of the coloured polygons of a heatmap.
//!
//! Walks the value mapping in ascending key order, skips lattice points with
//! no value, and for each remaining anchor yields one or two projected
//! polygons with the value that colours them, depending on the style.
//! Polygons whose value is undefined are still yielded; the renderer drops
//! them.

use crate::basics::PointD;
use crate::blend::{alt_blend_value, blend_value};
use crate::cells::{
    alt_triangle_coordinates, classify_hexagon, hexagon_coordinates, triangle_coordinates,
    HexagonKind,
};
use crate::data::HeatmapData;
use crate::simplex::{project_point, LatticePoint, Permutation};
use crate::style::Style;

/// Which cell of the tiling a polygon is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellShape {
    Upright,
    Inverted,
    Hexagon(HexagonKind),
}

/// A projected polygon paired with its colour value.
#[derive(Debug, Clone, PartialEq)]
pub struct CellPolygon {
    pub anchor: LatticePoint,
    pub shape: CellShape,
    pub vertices: Vec<PointD>,
    pub value: Option<f64>,
}

impl CellPolygon {
    /// Vertex x and y sequences, the form plotting backends take.
    pub fn xs_ys(&self) -> (Vec<f64>, Vec<f64>) {
        self.vertices.iter().map(|p| (p.x, p.y)).unzip()
    }
}

/// Iterator over the polygons of a heatmap. Created by [`polygon_iterator`].
pub struct PolygonIter<'a> {
    data: &'a HeatmapData,
    entries: Box<dyn Iterator<Item = (LatticePoint, Option<f64>)> + 'a>,
    style: Style,
    permutation: Option<Permutation>,
    pending: Option<CellPolygon>,
}

impl<'a> PolygonIter<'a> {
    fn project<I>(&self, vertices: I) -> Vec<PointD>
    where
        I: IntoIterator<Item = [f64; 3]>,
    {
        vertices
            .into_iter()
            .map(|v| project_point(v, self.permutation.as_ref()))
            .collect()
    }

    fn triangle(&self, corners: [LatticePoint; 3]) -> Vec<PointD> {
        self.project(corners.iter().map(|c| c.to_simplex()))
    }

    fn cell(&self, anchor: LatticePoint, shape: CellShape, value: Option<f64>) -> CellPolygon {
        let vertices = match shape {
            CellShape::Upright => self.triangle(triangle_coordinates(anchor)),
            CellShape::Inverted => self.triangle(alt_triangle_coordinates(anchor)),
            CellShape::Hexagon(_) => self.project(hexagon_coordinates(anchor)),
        };
        CellPolygon {
            anchor,
            shape,
            vertices,
            value,
        }
    }
}

impl<'a> Iterator for PolygonIter<'a> {
    type Item = CellPolygon;

    fn next(&mut self) -> Option<CellPolygon> {
        if let Some(p) = self.pending.take() {
            return Some(p);
        }

        let (anchor, value) = loop {
            match self.entries.next()? {
                (p, Some(v)) => break (p, v),
                (_, None) => continue,
            }
        };

        let scale = self.data.scale() as i32;
        match self.style {
            Style::Hexagonal => Some(self.cell(
                anchor,
                CellShape::Hexagon(classify_hexagon(anchor)),
                Some(value),
            )),
            Style::DualTriangular => {
                let inverted = alt_blend_value(self.data, anchor);
                self.pending = Some(self.cell(anchor, CellShape::Inverted, inverted));
                Some(self.cell(anchor, CellShape::Upright, Some(value)))
            }
            Style::Triangular => {
                let upright = blend_value(self.data, anchor, None);
                if anchor.i != scale {
                    let inverted = alt_blend_value(self.data, anchor);
                    self.pending = Some(self.cell(anchor, CellShape::Inverted, inverted));
                }
                Some(self.cell(anchor, CellShape::Upright, upright))
            }
        }
    }
}

/// Polygons of `data` drawn in `style`, with vertices projected through the
/// optional axis permutation.
pub fn polygon_iterator(
    data: &HeatmapData,
    style: Style,
    permutation: Option<Permutation>,
) -> PolygonIter<'_> {
    PolygonIter {
        data,
        entries: Box::new(data.iter()),
        style,
        permutation,
        pending: None,
    }
}

// ============================================================================
// Tests
// ============================================================================
