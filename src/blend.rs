//! Vertex value blending for smooth triangular heatmaps.
//!
//! A triangle's colour is the mean of the values at its three corners. If
//! any corner has no value the triangle has no value either; averaging the
//! corners that do exist would paint misleading colours along the edges of
//! the data.

use crate::cells::{alt_triangle_coordinates, triangle_coordinates};
use crate::data::HeatmapData;
use crate::simplex::LatticePoint;

/// Mean of the values at `keys`, or `None` if any key is missing.
///
/// When `keys` is `None` the corners of the upright triangle anchored at
/// `p` are used.
pub fn blend_value(
    data: &HeatmapData,
    p: LatticePoint,
    keys: Option<&[LatticePoint]>,
) -> Option<f64> {
    let upright;
    let keys = match keys {
        Some(keys) => keys,
        None => {
            upright = triangle_coordinates(p);
            &upright[..]
        }
    };

    if keys.is_empty() {
        return None;
    }
    let mut sum = 0.0;
    for key in keys {
        sum += data.get(*key)?;
    }
    Some(sum / keys.len() as f64)
}

/// Mean of the values at the corners of the inverted triangle anchored at `p`.
pub fn alt_blend_value(data: &HeatmapData, p: LatticePoint) -> Option<f64> {
    let keys = alt_triangle_coordinates(p);
    blend_value(data, p, Some(&keys))
}
