//! Value mapping from lattice points to heatmap values.
//!
//! Keys are always stored as full triples on the simplex. Callers may supply
//! `(i, j)` pairs, in which case `k` is derived from the scale, or `(i, j, k)`
//! triples, which are checked against the scale at the boundary. Lookups
//! only read `i` and `j` of the query and derive `k`, so neighbour keys
//! produced by the cell generators resolve regardless of their third
//! coordinate.

use std::collections::BTreeMap;

use crate::error::{HeatmapError, Result};
use crate::simplex::LatticePoint;

/// Scalar values sampled at lattice points of a simplex of fixed scale.
///
/// A stored `None` marks a lattice point with no data; it is kept so the
/// caller's key set survives, but it never produces a cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeatmapData {
    scale: u32,
    values: BTreeMap<LatticePoint, Option<f64>>,
}

impl HeatmapData {
    pub fn new(scale: u32) -> Self {
        Self {
            scale,
            values: BTreeMap::new(),
        }
    }

    /// Build from `(i, j)` keyed values; `k` is derived as `scale - i - j`
    /// and every derived key must lie on the simplex.
    pub fn from_pairs<I>(scale: u32, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = ((i32, i32), Option<f64>)>,
    {
        let mut data = Self::new(scale);
        for ((i, j), v) in pairs {
            data.insert(LatticePoint::from_ij(i, j, scale), v)?;
        }
        Ok(data)
    }

    /// Build from `(i, j, k)` keyed values. Every key must sum to the scale.
    pub fn from_triples<I>(scale: u32, triples: I) -> Result<Self>
    where
        I: IntoIterator<Item = ((i32, i32, i32), Option<f64>)>,
    {
        let mut data = Self::new(scale);
        for (key, v) in triples {
            data.insert(LatticePoint::from(key), v)?;
        }
        Ok(data)
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Insert a value at a lattice point. The point's coordinates must be
    /// non-negative and sum to the scale.
    pub fn insert(&mut self, p: LatticePoint, value: Option<f64>) -> Result<()> {
        if !p.on_simplex(self.scale) {
            return Err(HeatmapError::KeyOffSimplex {
                i: p.i as i64,
                j: p.j as i64,
                k: p.k as i64,
                scale: self.scale,
            });
        }
        self.values.insert(p, value);
        Ok(())
    }

    /// Look up the value at `(p.i, p.j)`. Absent keys and stored `None`
    /// both return `None`.
    pub fn get(&self, p: LatticePoint) -> Option<f64> {
        self.values
            .get(&LatticePoint::from_ij(p.i, p.j, self.scale))
            .copied()
            .flatten()
    }

    /// All entries in ascending key order, including undefined values.
    pub fn iter(&self) -> impl Iterator<Item = (LatticePoint, Option<f64>)> + '_ {
        self.values.iter().map(|(k, v)| (*k, *v))
    }

    /// Defined values in ascending key order.
    pub fn defined_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.values().filter_map(|v| *v)
    }

    /// `(min, max)` over all defined finite values, or `None` if there are
    /// none. NaN and infinite values are ignored.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.defined_values()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_derives_k() {
        let data = HeatmapData::from_pairs(3, [((1, 1), Some(2.0)), ((0, 0), None)]).unwrap();
        assert_eq!(data.len(), 2);
        let keys: Vec<_> = data.iter().map(|(k, _)| k).collect();
        assert_eq!(
            keys,
            vec![LatticePoint::new(0, 0, 3), LatticePoint::new(1, 1, 1)]
        );
        assert_eq!(data.get(LatticePoint::new(1, 1, 1)), Some(2.0));
        assert_eq!(data.get(LatticePoint::new(0, 0, 3)), None);
    }

    #[test]
    fn test_from_triples_rejects_off_simplex_keys() {
        let ok = HeatmapData::from_triples(2, [((1, 1, 0), Some(1.0)), ((0, 0, 2), Some(3.0))]);
        assert!(ok.is_ok());

        let err = HeatmapData::from_triples(2, [((1, 1, 1), Some(1.0))]).unwrap_err();
        assert_eq!(
            err,
            HeatmapError::KeyOffSimplex {
                i: 1,
                j: 1,
                k: 1,
                scale: 2
            }
        );
    }

    #[test]
    fn test_insert_rejects_negative_coordinate() {
        let mut data = HeatmapData::new(1);
        let err = data.insert(LatticePoint::new(-1, 1, 1), Some(1.0)).unwrap_err();
        assert_eq!(
            err,
            HeatmapError::KeyOffSimplex {
                i: -1,
                j: 1,
                k: 1,
                scale: 1
            }
        );
        assert!(data.is_empty());
    }

    #[test]
    fn test_from_pairs_rejects_pair_past_scale() {
        let err =
            HeatmapData::from_pairs(1, [((0, 0), Some(1.0)), ((3, 0), Some(50.0))]).unwrap_err();
        assert_eq!(
            err,
            HeatmapError::KeyOffSimplex {
                i: 3,
                j: 0,
                k: -2,
                scale: 1
            }
        );
    }

    #[test]
    fn test_get_ignores_query_k() {
        let data = HeatmapData::from_pairs(2, [((1, 1), Some(5.0))]).unwrap();
        // Third coordinate of a neighbour key may be off by the cell
        // generator; only (i, j) matter for the lookup.
        assert_eq!(data.get(LatticePoint::new(1, 1, 2)), Some(5.0));
        assert_eq!(data.get(LatticePoint::new(2, 1, -1)), None);
    }

    #[test]
    fn test_pairs_and_triples_agree() {
        let a = HeatmapData::from_pairs(2, [((0, 1), Some(1.5)), ((2, 0), Some(0.5))]).unwrap();
        let b =
            HeatmapData::from_triples(2, [((0, 1, 1), Some(1.5)), ((2, 0, 0), Some(0.5))]).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_value_range() {
        let data = HeatmapData::from_pairs(
            2,
            [
                ((0, 0), Some(4.0)),
                ((0, 1), None),
                ((1, 0), Some(-1.0)),
                ((1, 1), Some(f64::NAN)),
                ((2, 0), Some(2.5)),
            ],
        )
        .unwrap();
        assert_eq!(data.value_range(), Some((-1.0, 4.0)));
        assert_eq!(data.defined_values().count(), 4);

        let empty = HeatmapData::from_pairs(2, [((0, 0), None)]).unwrap();
        assert_eq!(empty.value_range(), None);
    }

    #[test]
    fn test_value_range_skips_infinities() {
        let data = HeatmapData::from_pairs(
            1,
            [
                ((0, 0), Some(1.0)),
                ((1, 0), Some(f64::INFINITY)),
                ((0, 1), Some(3.0)),
            ],
        )
        .unwrap();
        assert_eq!(data.value_range(), Some((1.0, 3.0)));

        let only_inf = HeatmapData::from_pairs(1, [((0, 0), Some(f64::NEG_INFINITY))]).unwrap();
        assert_eq!(only_inf.value_range(), None);
    }
}
