//! Simplex lattice coordinates and the ternary-to-plane projection.
//!
//! A lattice point is an integer triple `(i, j, k)` with `i + j + k = scale`.
//! Cell geometry is computed in (real-valued) simplex coordinates and only
//! projected to the drawing plane at the very end, so the projection and the
//! optional axis permutation live here together with the lattice enumerator
//! and the normalizer used by function heatmaps.

use core::fmt;
use core::str::FromStr;

use crate::basics::PointD;
use crate::error::{HeatmapError, Result};

pub const SQRT3: f64 = 1.732_050_807_568_877_2;
pub const SQRT3_OVER_2: f64 = SQRT3 / 2.0;

// ============================================================================
// LatticePoint
// ============================================================================

/// Integer triple addressing a vertex of the simplex triangulation.
///
/// Coordinates are signed: blending and cell generation address neighbours
/// such as `(i + 1, j + 1, k - 1)` which may fall outside the simplex, and
/// those lookups must simply miss rather than wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LatticePoint {
    pub i: i32,
    pub j: i32,
    pub k: i32,
}

impl LatticePoint {
    pub fn new(i: i32, j: i32, k: i32) -> Self {
        Self { i, j, k }
    }

    /// Build the point for key `(i, j)` on the simplex of the given scale.
    pub fn from_ij(i: i32, j: i32, scale: u32) -> Self {
        Self {
            i,
            j,
            k: scale as i32 - i - j,
        }
    }

    /// Sum of the three coordinates (the scale for points on the simplex).
    pub fn steps(&self) -> i32 {
        self.i + self.j + self.k
    }

    /// True if the point lies on the simplex of `scale` (sum matches, no
    /// negative coordinate).
    pub fn on_simplex(&self, scale: u32) -> bool {
        self.i >= 0 && self.j >= 0 && self.k >= 0 && self.steps() == scale as i32
    }

    pub fn to_simplex(self) -> SimplexPoint {
        [self.i as f64, self.j as f64, self.k as f64]
    }
}

impl From<(i32, i32, i32)> for LatticePoint {
    fn from((i, j, k): (i32, i32, i32)) -> Self {
        Self { i, j, k }
    }
}

impl fmt::Display for LatticePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.i, self.j, self.k)
    }
}

/// Real-valued simplex coordinates, e.g. a hexagon corner at a third of a
/// lattice step.
pub type SimplexPoint = [f64; 3];

// ============================================================================
// Permutation
// ============================================================================

/// Reordering of the three simplex axes before projection.
///
/// Parsed from a three character string of the digits `0`, `1`, `2`:
/// `"120"` places coordinate 1 first, then 2, then 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Permutation([usize; 3]);

impl Permutation {
    pub const IDENTITY: Permutation = Permutation([0, 1, 2]);

    pub fn new(order: [usize; 3]) -> Result<Self> {
        let mut seen = [false; 3];
        for &ix in &order {
            if ix > 2 || seen[ix] {
                return Err(HeatmapError::InvalidPermutation(format!("{order:?}")));
            }
            seen[ix] = true;
        }
        Ok(Self(order))
    }

    pub fn order(&self) -> [usize; 3] {
        self.0
    }

    pub fn apply(&self, p: SimplexPoint) -> SimplexPoint {
        [p[self.0[0]], p[self.0[1]], p[self.0[2]]]
    }
}

impl FromStr for Permutation {
    type Err = HeatmapError;

    fn from_str(s: &str) -> Result<Self> {
        let digits: Vec<usize> = s
            .chars()
            .map(|c| c.to_digit(10).map(|d| d as usize))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| HeatmapError::InvalidPermutation(s.to_string()))?;
        match digits.as_slice() {
            &[a, b, c] => {
                Self::new([a, b, c]).map_err(|_| HeatmapError::InvalidPermutation(s.to_string()))
            }
            _ => Err(HeatmapError::InvalidPermutation(s.to_string())),
        }
    }
}

/// Apply an optional permutation to a simplex point.
pub fn permute_point(p: SimplexPoint, permutation: Option<&Permutation>) -> SimplexPoint {
    match permutation {
        Some(perm) => perm.apply(p),
        None => p,
    }
}

// ============================================================================
// Projection
// ============================================================================

/// Map simplex coordinates to the drawing plane.
///
/// Standard ternary layout: the first (permuted) axis runs along the bottom
/// edge, the second rises to the apex. Corners of the simplex of scale `s`
/// land at `(0, 0)`, `(s, 0)` and `(s / 2, s * sqrt(3) / 2)`.
pub fn project_point(p: SimplexPoint, permutation: Option<&Permutation>) -> PointD {
    let [a, b, _] = permute_point(p, permutation);
    PointD::new(a + b / 2.0, SQRT3_OVER_2 * b)
}

/// Divide a 3-vector by its component sum so it lies on the unit simplex.
/// A zero sum leaves the vector unchanged.
pub fn normalize(p: [f64; 3]) -> [f64; 3] {
    let s = p[0] + p[1] + p[2];
    if s == 0.0 {
        return p;
    }
    [p[0] / s, p[1] / s, p[2] / s]
}

// ============================================================================
// Lattice enumeration
// ============================================================================

/// Iterator over all lattice points of a simplex, `i` ascending then `j`
/// ascending. Created by [`simplex_iterator`].
#[derive(Debug, Clone)]
pub struct SimplexIter {
    scale: i32,
    start: i32,
    i: i32,
    j: i32,
}

impl Iterator for SimplexIter {
    type Item = LatticePoint;

    fn next(&mut self) -> Option<LatticePoint> {
        // Without the boundary every coordinate stays >= 1, so the row and
        // column limits shrink by one.
        let end = self.scale + 1 - self.start;
        loop {
            if self.i >= end {
                return None;
            }
            if self.j < end - self.i {
                let p = LatticePoint::new(self.i, self.j, self.scale - self.i - self.j);
                self.j += 1;
                return Some(p);
            }
            self.i += 1;
            self.j = self.start;
        }
    }
}

/// Enumerate the lattice points `(i, j, k)` with `i + j + k = scale`.
///
/// With `boundary == false` only strictly interior points (all coordinates
/// at least 1) are produced.
pub fn simplex_iterator(scale: u32, boundary: bool) -> SimplexIter {
    let start = if boundary { 0 } else { 1 };
    SimplexIter {
        scale: scale as i32,
        start,
        i: start,
        j: start,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_project_corners() {
        let s = 4.0;
        let a = project_point([s, 0.0, 0.0], None);
        let b = project_point([0.0, s, 0.0], None);
        let c = project_point([0.0, 0.0, s], None);
        assert_abs_diff_eq!(a.x, 4.0);
        assert_abs_diff_eq!(a.y, 0.0);
        assert_abs_diff_eq!(b.x, 2.0);
        assert_abs_diff_eq!(b.y, 4.0 * SQRT3_OVER_2, epsilon = 1e-12);
        assert_abs_diff_eq!(c.x, 0.0);
        assert_abs_diff_eq!(c.y, 0.0);
    }

    #[test]
    fn test_projection_is_equilateral() {
        let s = 3.0;
        let pts = [
            project_point([s, 0.0, 0.0], None),
            project_point([0.0, s, 0.0], None),
            project_point([0.0, 0.0, s], None),
        ];
        let d = |p: PointD, q: PointD| ((p.x - q.x).powi(2) + (p.y - q.y).powi(2)).sqrt();
        assert_abs_diff_eq!(d(pts[0], pts[1]), s, epsilon = 1e-12);
        assert_abs_diff_eq!(d(pts[1], pts[2]), s, epsilon = 1e-12);
        assert_abs_diff_eq!(d(pts[2], pts[0]), s, epsilon = 1e-12);
    }

    #[test]
    fn test_permutation_parse_and_apply() {
        let perm: Permutation = "120".parse().unwrap();
        assert_eq!(perm.order(), [1, 2, 0]);
        assert_eq!(perm.apply([10.0, 20.0, 30.0]), [20.0, 30.0, 10.0]);
        assert_eq!(permute_point([1.0, 2.0, 3.0], None), [1.0, 2.0, 3.0]);

        let p = project_point([0.0, 5.0, 0.0], Some(&perm));
        assert_abs_diff_eq!(p.x, 5.0);
        assert_abs_diff_eq!(p.y, 0.0);
    }

    #[test]
    fn test_permutation_rejects_bad_input() {
        assert!("012".parse::<Permutation>().is_ok());
        assert!("011".parse::<Permutation>().is_err());
        assert!("01".parse::<Permutation>().is_err());
        assert!("0123".parse::<Permutation>().is_err());
        assert!("ab2".parse::<Permutation>().is_err());
        assert!(Permutation::new([0, 1, 3]).is_err());
    }

    #[test]
    fn test_normalize() {
        let n = normalize([1.0, 1.0, 2.0]);
        assert_abs_diff_eq!(n[0], 0.25);
        assert_abs_diff_eq!(n[1], 0.25);
        assert_abs_diff_eq!(n[2], 0.5);
        assert_eq!(normalize([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_simplex_iterator_with_boundary() {
        let pts: Vec<_> = simplex_iterator(2, true).collect();
        let expected = [
            (0, 0, 2),
            (0, 1, 1),
            (0, 2, 0),
            (1, 0, 1),
            (1, 1, 0),
            (2, 0, 0),
        ];
        assert_eq!(pts.len(), expected.len());
        for (p, e) in pts.iter().zip(expected) {
            assert_eq!(*p, LatticePoint::from(e));
        }
    }

    #[test]
    fn test_simplex_iterator_count_and_sum() {
        for scale in 0..8u32 {
            let pts: Vec<_> = simplex_iterator(scale, true).collect();
            let n = (scale + 1) * (scale + 2) / 2;
            assert_eq!(pts.len() as u32, n);
            assert!(pts.iter().all(|p| p.on_simplex(scale)));
        }
    }

    #[test]
    fn test_simplex_iterator_interior_only() {
        let pts: Vec<_> = simplex_iterator(4, false).collect();
        // (1,1,2), (1,2,1), (2,1,1)
        assert_eq!(pts.len(), 3);
        assert!(pts.iter().all(|p| p.i >= 1 && p.j >= 1 && p.k >= 1));
        assert_eq!(simplex_iterator(2, false).count(), 0);
    }

    #[test]
    fn test_simplex_iterator_restarts() {
        let a: Vec<_> = simplex_iterator(5, true).collect();
        let b: Vec<_> = simplex_iterator(5, true).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_lattice_point_helpers() {
        let p = LatticePoint::from_ij(1, 2, 5);
        assert_eq!(p.k, 2);
        assert!(p.on_simplex(5));
        assert!(!LatticePoint::new(1, 1, -1).on_simplex(1));
        assert_eq!(p.to_string(), "(1, 2, 2)");
    }
}
