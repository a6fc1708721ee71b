//! Cell geometry for triangular and hexagonal tilings of the simplex.
//!
//! All vertices are returned in (unprojected) simplex coordinates; the
//! polygon iterator projects them to the plane.
//!
//! Triangular tiling: every lattice point `(i, j, k)` anchors an upright
//! triangle with two vertices on its lower side, and (away from the `k = 0`
//! edge) an inverted triangle with two vertices on its upper side.
//!
//! Hexagonal tiling: every lattice point is the centre of a hexagon made of
//! the centroids of the six surrounding triangles. Points on the simplex
//! boundary get a clipped hexagon: five vertices along an edge, four at a
//! corner.

use crate::simplex::{LatticePoint, SimplexPoint};

// ============================================================================
// Triangles
// ============================================================================

/// Upright triangle anchored at `p`: `{(i,j,k), (i+1,j,k-1), (i,j+1,k-1)}`.
pub fn triangle_coordinates(p: LatticePoint) -> [LatticePoint; 3] {
    let LatticePoint { i, j, k } = p;
    [
        LatticePoint::new(i, j, k),
        LatticePoint::new(i + 1, j, k - 1),
        LatticePoint::new(i, j + 1, k - 1),
    ]
}

/// Inverted triangle anchored at `p`: `{(i,j+1,k-1), (i+1,j+1,k), (i+1,j,k-1)}`.
///
/// Only lies inside the simplex when `k >= 2` at the anchor. The third
/// coordinate of the middle vertex is not re-derived; projection and value
/// lookups only read `i` and `j`.
pub fn alt_triangle_coordinates(p: LatticePoint) -> [LatticePoint; 3] {
    let LatticePoint { i, j, k } = p;
    [
        LatticePoint::new(i, j + 1, k - 1),
        LatticePoint::new(i + 1, j + 1, k),
        LatticePoint::new(i + 1, j, k - 1),
    ]
}

// ============================================================================
// Hexagons
// ============================================================================

const ALPHA: SimplexPoint = [-1.0 / 3.0, 2.0 / 3.0, 0.0];
const DELTA_UP: SimplexPoint = [1.0 / 3.0, 1.0 / 3.0, 0.0];
const DELTA_DOWN: SimplexPoint = [2.0 / 3.0, -1.0 / 3.0, 0.0];
const I_VEC: SimplexPoint = [0.0, 0.5, -0.5];
const I_VEC_DOWN: SimplexPoint = [0.5, -0.5, 0.0];
const DELTA_X: SimplexPoint = [0.5, 0.0, -0.5];

/// One of the three simplex axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    I,
    J,
    K,
}

/// Position of a lattice point relative to the simplex boundary, which
/// decides the shape of its hexagonal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HexagonKind {
    /// The named coordinate equals the scale; four vertices.
    Corner(Axis),
    /// The named coordinate is zero (not a corner); five vertices.
    Edge(Axis),
    /// No coordinate is zero; six vertices.
    Interior,
}

impl HexagonKind {
    /// Number of polygon vertices for this kind of cell.
    pub fn vertex_count(&self) -> usize {
        match self {
            HexagonKind::Corner(_) => 4,
            HexagonKind::Edge(_) => 5,
            HexagonKind::Interior => 6,
        }
    }
}

/// Classify a lattice point. Corners are tested before edges: a corner has
/// two zero coordinates and would otherwise match an edge case.
pub fn classify_hexagon(p: LatticePoint) -> HexagonKind {
    let steps = p.steps();
    if p.j == steps {
        HexagonKind::Corner(Axis::J)
    } else if p.k == steps {
        HexagonKind::Corner(Axis::K)
    } else if p.i == steps {
        HexagonKind::Corner(Axis::I)
    } else if p.j == 0 {
        HexagonKind::Edge(Axis::J)
    } else if p.i == 0 {
        HexagonKind::Edge(Axis::I)
    } else if p.k == 0 {
        HexagonKind::Edge(Axis::K)
    } else {
        HexagonKind::Interior
    }
}

#[inline]
fn plus(p: SimplexPoint, v: SimplexPoint) -> SimplexPoint {
    [p[0] + v[0], p[1] + v[1], p[2] + v[2]]
}

#[inline]
fn minus(p: SimplexPoint, v: SimplexPoint) -> SimplexPoint {
    [p[0] - v[0], p[1] - v[1], p[2] - v[2]]
}

/// Polygon of the hexagonal cell centred at `p`, clipped to the simplex.
pub fn hexagon_coordinates(p: LatticePoint) -> Vec<SimplexPoint> {
    let c = p.to_simplex();
    match classify_hexagon(p) {
        HexagonKind::Corner(Axis::J) => {
            vec![c, plus(c, I_VEC_DOWN), minus(c, ALPHA), minus(c, I_VEC)]
        }
        HexagonKind::Corner(Axis::K) => {
            vec![c, plus(c, I_VEC), plus(c, DELTA_UP), plus(c, DELTA_X)]
        }
        HexagonKind::Corner(Axis::I) => {
            vec![c, minus(c, DELTA_X), minus(c, DELTA_DOWN), minus(c, I_VEC_DOWN)]
        }
        HexagonKind::Edge(Axis::J) => vec![
            minus(c, DELTA_X),
            minus(c, DELTA_DOWN),
            plus(c, ALPHA),
            plus(c, DELTA_UP),
            plus(c, DELTA_X),
        ],
        HexagonKind::Edge(Axis::I) => vec![
            plus(c, I_VEC),
            plus(c, DELTA_UP),
            plus(c, DELTA_DOWN),
            minus(c, ALPHA),
            minus(c, I_VEC),
        ],
        HexagonKind::Edge(Axis::K) => vec![
            plus(c, I_VEC_DOWN),
            minus(c, ALPHA),
            minus(c, DELTA_UP),
            minus(c, DELTA_DOWN),
            minus(c, I_VEC_DOWN),
        ],
        HexagonKind::Interior => vec![
            plus(c, ALPHA),
            plus(c, DELTA_UP),
            plus(c, DELTA_DOWN),
            minus(c, ALPHA),
            minus(c, DELTA_UP),
            minus(c, DELTA_DOWN),
        ],
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basics::PointD;
    use crate::simplex::{project_point, simplex_iterator, SQRT3_OVER_2};
    use approx::assert_abs_diff_eq;
    use std::collections::HashSet;

    fn area(pts: &[PointD]) -> f64 {
        let n = pts.len();
        let mut a = 0.0;
        for idx in 0..n {
            let p = pts[idx];
            let q = pts[(idx + 1) % n];
            a += p.x * q.y - q.x * p.y;
        }
        a.abs() / 2.0
    }

    fn project_lattice(tri: &[LatticePoint; 3]) -> Vec<PointD> {
        tri.iter().map(|p| project_point(p.to_simplex(), None)).collect()
    }

    #[test]
    fn test_triangle_vertices() {
        let p = LatticePoint::new(1, 2, 3);
        assert_eq!(
            triangle_coordinates(p),
            [
                LatticePoint::new(1, 2, 3),
                LatticePoint::new(2, 2, 2),
                LatticePoint::new(1, 3, 2),
            ]
        );
        assert_eq!(
            alt_triangle_coordinates(p),
            [
                LatticePoint::new(1, 3, 2),
                LatticePoint::new(2, 3, 3),
                LatticePoint::new(2, 2, 2),
            ]
        );
    }

    /// Upright triangles over every anchor with k >= 1 plus inverted
    /// triangles over every anchor with k >= 2 cover each unit cell of the
    /// simplex exactly once.
    #[test]
    fn test_triangles_tile_simplex() {
        for scale in 1..7u32 {
            let mut seen: HashSet<[LatticePoint; 3]> = HashSet::new();
            let mut total_area = 0.0;
            let unit_area = SQRT3_OVER_2 / 2.0;

            for p in simplex_iterator(scale, true) {
                let mut tris = Vec::new();
                if p.k >= 1 {
                    tris.push(triangle_coordinates(p));
                }
                if p.k >= 2 {
                    tris.push(alt_triangle_coordinates(p));
                }
                for tri in tris {
                    let key = tri.map(|v| LatticePoint::from_ij(v.i, v.j, scale));
                    assert!(key.iter().all(|v| v.on_simplex(scale)));
                    let mut key = key;
                    key.sort();
                    assert!(seen.insert(key), "duplicate triangle {tri:?}");
                    let a = area(&project_lattice(&tri));
                    assert_abs_diff_eq!(a, unit_area, epsilon = 1e-9);
                    total_area += a;
                }
            }

            let n = scale as usize;
            assert_eq!(seen.len(), n * n);
            let simplex_area = SQRT3_OVER_2 * (scale * scale) as f64 / 2.0;
            assert_abs_diff_eq!(total_area, simplex_area, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_hexagon_classification_is_exhaustive() {
        for scale in 1..9u32 {
            for p in simplex_iterator(scale, true) {
                let kind = classify_hexagon(p);
                let zeros = [p.i, p.j, p.k].iter().filter(|&&c| c == 0).count();
                let expected = match zeros {
                    2 => 4,
                    1 => 5,
                    0 => 6,
                    _ => unreachable!(),
                };
                assert_eq!(kind.vertex_count(), expected, "at {p}");
                assert_eq!(hexagon_coordinates(p).len(), expected, "at {p}");
            }
        }
    }

    #[test]
    fn test_hexagon_corner_kinds() {
        assert_eq!(
            classify_hexagon(LatticePoint::new(3, 0, 0)),
            HexagonKind::Corner(Axis::I)
        );
        assert_eq!(
            classify_hexagon(LatticePoint::new(0, 3, 0)),
            HexagonKind::Corner(Axis::J)
        );
        assert_eq!(
            classify_hexagon(LatticePoint::new(0, 0, 3)),
            HexagonKind::Corner(Axis::K)
        );
        assert_eq!(
            classify_hexagon(LatticePoint::new(1, 0, 2)),
            HexagonKind::Edge(Axis::J)
        );
        assert_eq!(
            classify_hexagon(LatticePoint::new(0, 1, 2)),
            HexagonKind::Edge(Axis::I)
        );
        assert_eq!(
            classify_hexagon(LatticePoint::new(1, 2, 0)),
            HexagonKind::Edge(Axis::K)
        );
        assert_eq!(
            classify_hexagon(LatticePoint::new(1, 1, 1)),
            HexagonKind::Interior
        );
    }

    #[test]
    fn test_interior_hexagon_is_regular() {
        let p = LatticePoint::new(2, 2, 2);
        let centre = project_point(p.to_simplex(), None);
        let pts: Vec<PointD> = hexagon_coordinates(p)
            .into_iter()
            .map(|v| project_point(v, None))
            .collect();
        // Each vertex is a triangle centroid: 1/sqrt(3) from the centre.
        for v in &pts {
            let r = ((v.x - centre.x).powi(2) + (v.y - centre.y).powi(2)).sqrt();
            assert_abs_diff_eq!(r, 1.0 / 3f64.sqrt(), epsilon = 1e-9);
        }
        // Hexagon area equals the area of one unit triangle doubled.
        assert_abs_diff_eq!(area(&pts), SQRT3_OVER_2, epsilon = 1e-9);
    }

    #[test]
    fn test_corner_hexagon_starts_at_lattice_point() {
        let p = LatticePoint::new(0, 0, 4);
        let coords = hexagon_coordinates(p);
        assert_eq!(coords[0], [0.0, 0.0, 4.0]);
        assert_eq!(coords[1], [0.0, 0.5, 3.5]);
    }
}
