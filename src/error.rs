//! Error type for heatmap construction and rendering.

use thiserror::Error;

/// Errors raised while building or rendering a heatmap.
///
/// Missing cell values are never errors; they only suppress drawing of the
/// affected polygons.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HeatmapError {
    #[error("heatmap style must be 'triangular', 'dual-triangular', or 'hexagonal', got {0:?}")]
    InvalidStyle(String),

    #[error("unknown colormap {0:?}")]
    UnknownColormap(String),

    #[error("simplex scale must be positive")]
    InvalidScale,

    #[error("key ({i}, {j}, {k}) does not lie on the simplex of scale {scale}")]
    KeyOffSimplex { i: i64, j: i64, k: i64, scale: u32 },

    #[error("no defined values to derive a color range from")]
    EmptyData,

    #[error("invalid color range: vmin {vmin} > vmax {vmax} or non-finite bound")]
    InvalidRange { vmin: f64, vmax: f64 },

    #[error("invalid permutation {0:?}: expected the digits 0, 1, 2 each exactly once")]
    InvalidPermutation(String),
}

pub type Result<T> = std::result::Result<T, HeatmapError>;
